use {
    crate::error::{Error, Result},
    std::ops::{Bound, RangeBounds},
};

/// Range aggregate over a fixed-length sequence.
///
/// Updates merge `value` into the range instead of overwriting it.
pub trait RangeQuery<T> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn query<R: RangeBounds<usize>>(&self, range: R) -> Result<T>;

    fn update_range<R: RangeBounds<usize>>(&mut self, range: R, value: T) -> Result<()>;

    fn update(&mut self, index: usize, value: T) -> Result<()> {
        self.update_range(index..=index, value)
    }
}

/// Normalizes `range` into inclusive `(from, to)` with `from <= to < len`.
pub(crate) fn to_inclusive<R: RangeBounds<usize>>(range: &R, len: usize) -> Result<(usize, usize)> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.checked_add(1).ok_or(Error::OutOfBounds { index: s, len })?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.checked_add(1).ok_or(Error::OutOfBounds { index: e, len })?,
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };

    if start >= end {
        return Err(Error::EmptyRange { start, end });
    }
    if end > len {
        return Err(Error::OutOfBounds {
            index: end - 1,
            len,
        });
    }

    Ok((start, end - 1))
}

#[test]
fn test_to_inclusive() {
    assert_eq!(to_inclusive(&(1..=3), 5), Ok((1, 3)));
    assert_eq!(to_inclusive(&(1..3), 5), Ok((1, 2)));
    assert_eq!(to_inclusive(&(..), 5), Ok((0, 4)));
    assert_eq!(to_inclusive(&(2..), 5), Ok((2, 4)));
    assert_eq!(
        to_inclusive(&(0..=5), 5),
        Err(Error::OutOfBounds { index: 5, len: 5 })
    );
    assert_eq!(
        to_inclusive(&(3..=1), 5),
        Err(Error::EmptyRange { start: 3, end: 2 })
    );
    assert_eq!(
        to_inclusive(&(0..0), 5),
        Err(Error::EmptyRange { start: 0, end: 0 })
    );
    assert_eq!(
        to_inclusive(&(..), 0),
        Err(Error::EmptyRange { start: 0, end: 0 })
    );
}
