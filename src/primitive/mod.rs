//! Road-network primitives shared by the index, the graph
//! and the matcher: identifiers, nodes, segments and the
//! projection of a position onto a segment.

use std::fmt::Debug;
use std::hash::Hash;

pub mod node;
pub mod project;
pub mod segment;


#[doc(inline)]
pub use node::Node;
#[doc(inline)]
pub use project::Projection;
#[doc(inline)]
pub use segment::{Segment, SegmentKey};

/// An identifier of a node within the road network.
///
/// Identifiers must be cheap to copy, totally ordered and hashable, since
/// they key the graph, the spatial index and the ranking of hypotheses.
pub trait Entry:
    Default + Copy + Clone + PartialEq + Eq + Ord + Hash + Debug + Send + Sync
{
    fn identifier(&self) -> i64;
}

impl Entry for i64 {
    #[inline]
    fn identifier(&self) -> i64 {
        *self
    }
}

impl Entry for u64 {
    #[inline]
    fn identifier(&self) -> i64 {
        *self as i64
    }
}

impl Entry for u32 {
    #[inline]
    fn identifier(&self) -> i64 {
        *self as i64
    }
}
