use {
    crate::{
        error::{Error, Result},
        merge::Merge,
        range_query::{to_inclusive, RangeQuery},
    },
    std::ops::RangeBounds,
};

/// Linear-scan reference with the same merge semantics as [`SegTree`](crate::SegTree)
/// under an idempotent merge. Used as an oracle in differential checks.
#[derive(Debug, Clone)]
pub struct NaiveArray<T, M> {
    elements: Vec<T>,
    merger: M,
}

impl<T, M> NaiveArray<T, M> {
    pub fn new(elements: Vec<T>, merger: M) -> Self {
        Self { elements, merger }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }
}

impl<T: Clone, M: Merge<T>> RangeQuery<T> for NaiveArray<T, M> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn query<R: RangeBounds<usize>>(&self, range: R) -> Result<T> {
        let (from, to) = to_inclusive(&range, self.elements.len())?;
        let (first, rest) = self.elements[from..=to]
            .split_first()
            .ok_or(Error::EmptyRange {
                start: from,
                end: to + 1,
            })?;

        Ok(rest
            .iter()
            .fold(first.clone(), |acc, x| self.merger.merge(&acc, x)))
    }

    fn update_range<R: RangeBounds<usize>>(&mut self, range: R, value: T) -> Result<()> {
        let (from, to) = to_inclusive(&range, self.elements.len())?;
        let merger = &self.merger;
        for x in &mut self.elements[from..=to] {
            *x = merger.merge(x, &value);
        }
        Ok(())
    }
}
