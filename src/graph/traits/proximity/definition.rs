use crate::primitive::{Entry, Node};

use geo::Point;

/// Trait containing utility functions to find nodes upon a root structure.
///
/// This is the spatial index contract the matcher seeds from. Any structure
/// implementing it must be read-only for the duration of a match, so it can be
/// shared between concurrent matches on different traces.
pub trait Scan<E>
where
    E: Entry,
{
    /// A function which returns an unsorted iterator of [`Node`] references which are within
    /// the provided `distance` of the input [point](Point).
    ///
    /// ### Note
    /// This function implements a square-scan.
    ///
    /// Therefore, it bounds the search to be within a square-radius of the origin. Therefore,
    /// it may not select every node within the supplied distance, or it may select more nodes.
    /// This resolution method is however significantly cheaper than a circular scan, so a wider
    /// or shorter search radius may be required in some use-cases.
    fn scan_nodes<'a>(&'a self, point: &Point, distance: f64) -> impl Iterator<Item = &'a Node<E>>
    where
        E: 'a;

    /// Returns the `k` nodes closest to the origin [point](Point), closest first.
    ///
    /// If at least `k` nodes exist, exactly `k` are returned. Ties in distance are
    /// broken by the node identifier, so the result is deterministic.
    fn nearest(&self, point: &Point, k: usize) -> Vec<Node<E>>;

    /// Returns every node within `radius` meters of the origin [point](Point), closest first.
    fn range(&self, point: &Point, radius: f64) -> Vec<Node<E>>;
}
