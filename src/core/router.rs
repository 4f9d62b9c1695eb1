//! Greedy nearest-neighbor tour construction
//!
//! O(n²): from the last point added, always move to the closest point not yet
//! visited. The tour is anchored on the first input point and ties go to the
//! earliest remaining point, so the result depends on nothing but the input.

use crate::core::point::LocatedPoint;

/// Visiting order as indices into `points`
///
/// The input slice is left untouched; visited points are tracked with a
/// marker array instead of being removed.
pub fn tour_order(points: &[LocatedPoint]) -> Vec<usize> {
    let n = points.len();
    if n < 2 {
        return (0..n).collect();
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let anchor = &points[current];
        let mut best: Option<(usize, f64)> = None;

        for (i, candidate) in points.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let distance = anchor.distance_to(candidate);
            // Strict comparison keeps the earliest point on ties
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((i, distance));
            }
        }

        let Some((next, _)) = best else {
            break;
        };

        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

/// Order located points into a nearest-neighbor tour
pub fn nearest_neighbor(points: &[LocatedPoint]) -> Vec<LocatedPoint> {
    tour_order(points)
        .into_iter()
        .map(|i| points[i].clone())
        .collect()
}

/// Summed straight-line length of a tour, in degrees
pub fn tour_length(tour: &[LocatedPoint]) -> f64 {
    tour.windows(2).map(|pair| pair[0].distance_to(&pair[1])).sum()
}
