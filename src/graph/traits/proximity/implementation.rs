use crate::graph::{Graph, NodeIndex};
use crate::primitive::node::bounding_box;
use crate::primitive::{Entry, Node};
use crate::Scan;

use geo::{Distance, Haversine, Point};
use itertools::Itertools;
use log::trace;
use std::f64::consts::SQRT_2;

#[cfg(feature = "tracing")]
use tracing::Level;

const INSCRIBED_MARGIN: f64 = 0.99;

/// Orders nodes by their great-circle distance to `point`, breaking
/// ties by identifier, and discards their distances.
fn closest_first<'a, E>(point: &Point, nodes: impl Iterator<Item = &'a Node<E>>) -> Vec<Node<E>>
where
    E: Entry + 'a,
{
    nodes
        .map(|node| (Haversine.distance(*point, node.position), *node))
        .sorted_by(|(a, na), (b, nb)| a.total_cmp(b).then_with(|| na.id.cmp(&nb.id)))
        .map(|(_, node)| node)
        .collect()
}

impl<E> Scan<E> for NodeIndex<E>
where
    E: Entry,
{
    #[inline]
    fn scan_nodes<'a>(&'a self, point: &Point, distance: f64) -> impl Iterator<Item = &'a Node<E>>
    where
        E: 'a,
    {
        self.tree.locate_in_envelope(&bounding_box(point, distance))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    fn nearest(&self, point: &Point, k: usize) -> Vec<Node<E>> {
        if k == 0 {
            return vec![];
        }

        if self.tree.size() <= k {
            return closest_first(point, self.tree.iter());
        }

        // The square scan reaches `distance` toward its corners, so only
        // nodes inside its inscribed circle are certain to be the closest.
        let mut distance = self.initial_radius;
        for doubling in 0..=self.max_doublings {
            let found = closest_first(point, self.scan_nodes(point, distance));
            // Margin for the geodesic box against haversine distances.
            let inscribed = distance / SQRT_2 * INSCRIBED_MARGIN;

            if let Some(kth) = found.get(k - 1) {
                if Haversine.distance(*point, kth.position) <= inscribed {
                    trace!("Found {k} nearest nodes after {doubling} doublings at {distance}m");
                    return found.into_iter().take(k).collect();
                }
            }

            distance *= 2.0;
        }

        trace!("Falling back to a full ordering of {} nodes", self.tree.size());
        closest_first(point, self.tree.iter())
            .into_iter()
            .take(k)
            .collect()
    }

    fn range(&self, point: &Point, radius: f64) -> Vec<Node<E>> {
        // Widen the square so its inscribed circle covers the radius.
        closest_first(point, self.scan_nodes(point, radius * SQRT_2 / INSCRIBED_MARGIN))
            .into_iter()
            .filter(|node| Haversine.distance(*point, node.position) <= radius)
            .collect()
    }
}

impl<E> Scan<E> for Graph<E>
where
    E: Entry,
{
    #[inline]
    fn scan_nodes<'a>(&'a self, point: &Point, distance: f64) -> impl Iterator<Item = &'a Node<E>>
    where
        E: 'a,
    {
        self.index.scan_nodes(point, distance)
    }

    #[inline]
    fn nearest(&self, point: &Point, k: usize) -> Vec<Node<E>> {
        self.index.nearest(point, k)
    }

    #[inline]
    fn range(&self, point: &Point, radius: f64) -> Vec<Node<E>> {
        self.index.range(point, radius)
    }
}
