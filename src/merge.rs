use std::ops::Add;

/// Merge は以下を満たさなければならない.
/// ```rs
/// fn test<T, M: Merge<T>>(m: &M, a: &T, b: &T, c: &T) {
///     m.merge(a, &m.merge(b, c)) == m.merge(&m.merge(a, b), c);
/// }
/// ```
/// Commutativity is not required: children are always merged left then right.
pub trait Merge<T> {
    fn merge(&self, left: &T, right: &T) -> T;
}

impl<T, F> Merge<T> for F
where
    F: Fn(&T, &T) -> T,
{
    fn merge(&self, left: &T, right: &T) -> T {
        self(left, right)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max;

impl<T: Ord + Clone> Merge<T> for Max {
    fn merge(&self, left: &T, right: &T) -> T {
        left.max(right).clone()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Min;

impl<T: Ord + Clone> Merge<T> for Min {
    fn merge(&self, left: &T, right: &T) -> T {
        left.min(right).clone()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum;

impl<T: Add<Output = T> + Clone> Merge<T> for Sum {
    fn merge(&self, left: &T, right: &T) -> T {
        left.clone() + right.clone()
    }
}

/// `None` acts as the identity for any merge, so padding never needs a
/// sentinel value of `T`.
pub(crate) fn merge_absent<T: Clone, M: Merge<T>>(
    merger: &M,
    left: Option<&T>,
    right: Option<&T>,
) -> Option<T> {
    match (left, right) {
        (Some(l), Some(r)) => Some(merger.merge(l, r)),
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (None, None) => None,
    }
}

#[test]
fn test_builtin_merges() {
    assert_eq!(Max.merge(&3, &7), 7);
    assert_eq!(Min.merge(&3, &7), 3);
    assert_eq!(Sum.merge(&3, &7), 10);
    assert_eq!(Max.merge(&"b", &"a"), "b");
}

#[test]
fn test_closure_merge() {
    let concat = |a: &String, b: &String| format!("{}{}", a, b);
    assert_eq!(concat.merge(&"ab".to_string(), &"cd".to_string()), "abcd");
}

#[test]
fn test_merge_absent() {
    assert_eq!(merge_absent(&Sum, Some(&1), Some(&2)), Some(3));
    assert_eq!(merge_absent(&Sum, Some(&1), None), Some(1));
    assert_eq!(merge_absent(&Sum, None, Some(&2)), Some(2));
    assert_eq!(merge_absent::<i32, _>(&Sum, None, None), None);
}
