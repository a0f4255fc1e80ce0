//! Array-backed segment tree generic over its merge operation.
//!
//! ```
//! use seg_tree::{Max, SegTree};
//!
//! let mut tree = SegTree::new(vec![1, 2, 3, 4, 5], Max);
//! assert_eq!(tree.query(1..=2).unwrap(), 3);
//!
//! tree.update_range(0..=3, 10).unwrap();
//! assert_eq!(tree.query(..).unwrap(), 10);
//! ```

pub mod error;
pub mod merge;
pub mod naive;
pub mod range_query;
pub mod seg_tree;
#[cfg(feature = "stress")]
pub mod stress;

pub use crate::{
    error::{Error, Result},
    merge::{Max, Merge, Min, Sum},
    naive::NaiveArray,
    range_query::RangeQuery,
    seg_tree::SegTree,
};
