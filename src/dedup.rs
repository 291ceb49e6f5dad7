//////////////////////////////////////////////////////////////////////
// both halves of every tile complete to the same quadrilateral, so
// the completed list holds each tile twice (up to float noise and
// vertex rotation). sort by center, then collapse equal centers.
//
// a tolerant comparison is not a total order, so the sort is on exact
// coordinates and the collapse looks back over every kept quad whose
// center x is within the equality radius rather than only the
// immediate neighbor.

use crate::geometry::{cmp_points, Point2f, Quadrilateral, Tolerance};

pub fn dedup_quads(quads: Vec<Quadrilateral>, tol: &Tolerance) -> Vec<Quadrilateral> {

    let mut keyed: Vec<(Point2f, Quadrilateral)> =
        quads.into_iter().map(|q| (q.center(), q)).collect();

    keyed.sort_by(|(p, _), (q, _)| cmp_points(p, q));

    let reach = tol.radius();

    let mut kept: Vec<(Point2f, Quadrilateral)> = Vec::with_capacity(keyed.len() / 2 + 1);

    for (center, quad) in keyed {

        let seen = kept.iter().rev()
            .take_while(|(k, _)| center.x - k.x < reach)
            .any(|(k, _)| tol.points_equal(k, &center));

        if !seen {
            kept.push((center, quad));
        }

    }

    kept.into_iter().map(|(_, q)| q).collect()

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::completion::complete_all;
    use crate::deflate::deflate_n;
    use crate::geometry::cmp_quads;
    use crate::pipeline::decagon;
    use crate::tile::{Family, TileKind};
    use std::cmp::Ordering;

    fn quad_at(x: f32, y: f32) -> Quadrilateral {
        Quadrilateral::new(TileKind::Dart,
                           Point2f::new(x - 1.0, y),
                           Point2f::new(x, y - 1.0),
                           Point2f::new(x, y + 1.0),
                           Point2f::new(x + 1.0, y))
    }

    #[test]
    fn collapses_noisy_duplicates() {
        let tol = Tolerance::default();
        let quads = vec![quad_at(5.0, 5.0), quad_at(0.0, 0.0),
                         quad_at(5.01, 4.99), quad_at(0.0, 0.02)];
        let out = dedup_quads(quads, &tol);
        assert_eq!(out.len(), 2);
        assert_eq!(cmp_quads(&out[0], &out[1]), Ordering::Less);
    }

    #[test]
    fn finds_duplicates_that_do_not_sort_adjacent() {
        // the middle quad sorts between the two copies by x but is far
        // away in y
        let tol = Tolerance::default();
        let quads = vec![quad_at(1.0, 0.0), quad_at(1.05, 50.0), quad_at(1.1, 0.0)];
        let out = dedup_quads(quads, &tol);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn keeps_distinct_quads() {
        let tol = Tolerance::default();
        let quads: Vec<_> = (0..10).map(|i| quad_at(i as f32, 0.0)).collect();
        assert_eq!(dedup_quads(quads, &tol).len(), 10);
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(dedup_quads(vec![], &Tolerance::default()).is_empty());
    }

    #[test]
    fn dedup_is_idempotent() {
        let tol = Tolerance::default();
        let tris = deflate_n(decagon(Family::P3, Point2f::origin(), 1000.0), 4);
        let once = dedup_quads(complete_all(&tris), &tol);
        let twice = dedup_quads(once.clone(), &tol);
        assert_eq!(once, twice);
        assert!(once.len() < tris.len());
    }

}
