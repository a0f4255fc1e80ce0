use {
    crate::{
        error::{Error, Result},
        merge::{merge_absent, Merge},
        range_query::{to_inclusive, RangeQuery},
    },
    log::{debug, trace},
    std::{fmt, ops::RangeBounds},
};


/// セグメント木. 完全二分木を配列で表し, `i` の子は `2i+1` と `2i+2`.
/// クエリ: O(log N), 範囲更新: 範囲に重なるノード数に比例 (最悪 2N-1).
///
/// Updates are eager: the value is merged into *every* node whose span lies
/// inside the update range, at every level. For idempotent merges such as
/// [`Max`](crate::Max) and [`Min`](crate::Min) this is the same as merging the
/// value into each element. For [`Sum`](crate::Sum) it is not a per-element
/// add, since each covered node receives the value once.
pub struct SegTree<T, M> {
    vals: Vec<Option<T>>,
    starts: Vec<usize>,
    ends: Vec<usize>,
    len: usize,
    merger: M,
}

/// Smallest power of two that is at least `len`, and 1 for an empty input.
pub(crate) fn bottom_level_size(len: usize) -> usize {
    len.max(1).next_power_of_two()
}

fn left_child(index: usize) -> usize {
    2 * index + 1
}

fn right_child(index: usize) -> usize {
    2 * index + 2
}

impl<T: Clone, M: Merge<T>> SegTree<T, M> {
    pub fn new(elements: Vec<T>, merger: M) -> Self {
        let len = elements.len();
        let bottom = bottom_level_size(len);
        let num_nodes = 2 * bottom - 1;
        let first_leaf = bottom - 1;

        let mut vals = Vec::with_capacity(num_nodes);
        vals.resize_with(first_leaf, || None);
        vals.extend(elements.into_iter().map(Some));
        vals.resize_with(num_nodes, || None);

        let mut starts = vec![0; num_nodes];
        let mut ends = vec![0; num_nodes];

        // padding leaves also get spans so that the tree stays perfect
        for i in first_leaf..num_nodes {
            starts[i] = i - first_leaf;
            ends[i] = i - first_leaf;
        }

        for i in (0..first_leaf).rev() {
            let (l, r) = (left_child(i), right_child(i));
            let merged = merge_absent(&merger, vals[l].as_ref(), vals[r].as_ref());
            vals[i] = merged;
            starts[i] = starts[l];
            ends[i] = ends[r];
        }

        debug!(
            "built segment tree: len = {}, bottom level = {}, nodes = {}",
            len, bottom, num_nodes
        );

        Self {
            vals,
            starts,
            ends,
            len,
            merger,
        }
    }

    pub fn from_iter_with<I: IntoIterator<Item = T>>(iter: I, merger: M) -> Self {
        Self::new(iter.into_iter().collect(), merger)
    }

    pub fn query<R: RangeBounds<usize>>(&self, range: R) -> Result<T> {
        let (from, to) = to_inclusive(&range, self.len)?;

        // a validated range always covers at least one input leaf
        self.query_sub(0, from, to).ok_or(Error::EmptyRange {
            start: from,
            end: to + 1,
        })
    }

    pub fn get(&self, index: usize) -> Result<T> {
        self.query(index..=index)
    }

    pub fn update(&mut self, index: usize, value: T) -> Result<()> {
        self.update_range(index..=index, value)
    }

    pub fn update_range<R: RangeBounds<usize>>(&mut self, range: R, value: T) -> Result<()> {
        let (from, to) = to_inclusive(&range, self.len)?;
        let touched = self.update_sub(0, from, to, &value);
        trace!("update {}..={} touched {} nodes", from, to, touched);
        Ok(())
    }

    fn query_sub(&self, index: usize, from: usize, to: usize) -> Option<T> {
        let (start, end) = (self.starts[index], self.ends[index]);

        if end < from || to < start {
            // 重ならない
            None
        } else if from <= start && end <= to {
            // 完全に含む
            self.vals[index].clone()
        } else {
            let (l, r) = (left_child(index), right_child(index));
            let left = self.query_sub(l, from, to);
            let right = self.query_sub(r, from, to);
            merge_absent(&self.merger, left.as_ref(), right.as_ref())
        }
    }

    /// Returns how many nodes received `value`.
    fn update_sub(&mut self, index: usize, from: usize, to: usize, value: &T) -> usize {
        let (start, end) = (self.starts[index], self.ends[index]);

        if end < from || to < start {
            return 0;
        }

        let covered = from <= start && end <= to;
        let mut touched = 0;

        if covered {
            let merged = self.vals[index]
                .as_ref()
                .map(|current| self.merger.merge(current, value));
            self.vals[index] = merged;
            touched += 1;
        }

        let (l, r) = (left_child(index), right_child(index));
        if !self.is_valid_node(l) {
            return touched;
        }

        // covered or not, keep descending
        touched += self.update_sub(l, from, to, value);
        touched += self.update_sub(r, from, to, value);

        if !covered {
            let merged = merge_absent(&self.merger, self.vals[l].as_ref(), self.vals[r].as_ref());
            self.vals[index] = merged;
        }

        touched
    }
}

impl<T, M> SegTree<T, M> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn num_nodes(&self) -> usize {
        self.vals.len()
    }

    pub fn merger(&self) -> &M {
        &self.merger
    }

    fn is_valid_node(&self, index: usize) -> bool {
        index < self.vals.len()
    }
}

impl<T: Clone, M: Merge<T>> RangeQuery<T> for SegTree<T, M> {
    fn len(&self) -> usize {
        self.len
    }

    fn query<R: RangeBounds<usize>>(&self, range: R) -> Result<T> {
        SegTree::query(self, range)
    }

    fn update_range<R: RangeBounds<usize>>(&mut self, range: R, value: T) -> Result<()> {
        SegTree::update_range(self, range, value)
    }
}

impl<T: fmt::Debug, M> fmt::Debug for SegTree<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegTree")
            .field("len", &self.len)
            .field("vals", &self.vals)
            .field("starts", &self.starts)
            .field("ends", &self.ends)
            .finish()
    }
}
