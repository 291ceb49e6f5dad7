//////////////////////////////////////////////////////////////////////
// shrink tiles toward their interior so that neighbors are visibly
// separated when drawn
//
// each vertex moves along its angle bisector. the step is scaled by
// 1/|cos| of the angle between bisector and edge normal so that the
// perpendicular distance to both incident edges is exactly the
// margin, whatever the interior angle.

use tracing::warn;

use crate::geometry::{Point2f, Quadrilateral, Vec2f};

// below this, a length or cosine counts as zero
const DEGENERATE: f32 = 1e-6;

// move vertex a inward. b and c are its neighbors along the boundary,
// d is the opposite vertex and only decides which way is inward.
// None if the geometry is degenerate at a.
pub fn inset_vertex(a: &Point2f,
                    b: &Point2f,
                    c: &Point2f,
                    d: &Point2f,
                    margin: f32) -> Option<Point2f> {

    let ab = b - a;
    let ac = c - a;

    let lb = ab.norm();
    let lc = ac.norm();

    if lb < DEGENERATE || lc < DEGENERATE {
        return None;
    }

    let mut ao = ac / lc + ab / lb;

    let lo = ao.norm();

    if lo < DEGENERATE {
        return None;
    }

    ao /= lo;

    if ao.dot(&(d - a)) <= 0.0 {
        ao = -ao;
    }

    // unit normal of edge a-c
    let u = Vec2f::new(-ac.y, ac.x) / lc;

    let cos = ao.dot(&u).abs();

    if cos < DEGENERATE {
        return None;
    }

    Some(a + ao * (margin / cos))

}

pub fn inset_quad(quad: &Quadrilateral, margin: f32) -> Quadrilateral {

    let [a, b, c, d] = quad.vertices;

    // (vertex, neighbor, neighbor, opposite); boundary order is A B D C
    let corners = [
        (a, b, c, d),
        (b, a, d, c),
        (c, a, d, b),
        (d, b, c, a)
    ];

    let mut vertices = quad.vertices;

    for (v, &(p, n0, n1, opp)) in vertices.iter_mut().zip(corners.iter()) {
        match inset_vertex(&p, &n0, &n1, &opp, margin) {
            Some(moved) => *v = moved,
            None => warn!(x = p.x, y = p.y, kind = %quad.kind,
                          "degenerate vertex, leaving it in place")
        }
    }

    Quadrilateral { vertices: vertices, ..*quad }

}

pub fn add_margin(quads: &[Quadrilateral], margin: f32) -> Vec<Quadrilateral> {
    quads.iter().map(|q| inset_quad(q, margin)).collect()
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::completion::complete_shape;
    use crate::geometry::{Tags, Triangle};
    use crate::tile::TileKind;
    use approx::assert_relative_eq;

    fn line_dist(p: &Point2f, u: &Point2f, v: &Point2f) -> f32 {
        let e = v - u;
        let w = p - u;
        (e.x * w.y - e.y * w.x).abs() / e.norm()
    }

    // strictly inside a simple polygon, by winding of a ray cast
    fn inside(p: &Point2f, poly: &[Point2f; 4]) -> bool {
        let mut crossings = 0;
        for i in 0..4 {
            let (u, v) = (&poly[i], &poly[(i + 1) % 4]);
            if (u.y > p.y) != (v.y > p.y) {
                let x = u.x + (p.y - u.y) / (v.y - u.y) * (v.x - u.x);
                if p.x < x {
                    crossings += 1;
                }
            }
        }
        crossings % 2 == 1 &&
            (0..4).all(|i| line_dist(p, &poly[i], &poly[(i + 1) % 4]) > 1e-4)
    }

    fn check_inset(quad: &Quadrilateral, m: f32) {

        let inset = inset_quad(quad, m);

        let o = quad.outline();
        let n = inset.outline();

        for i in 0..4 {
            assert!(inside(&n[i], &o), "{:?} not inside {:?}", n[i], o);
            let j = (i + 1) % 4;
            assert_relative_eq!(line_dist(&n[i], &o[i], &o[j]), m, epsilon = 1e-2);
            assert_relative_eq!(line_dist(&n[j], &o[i], &o[j]), m, epsilon = 1e-2);
        }

        assert_eq!(inset.kind, quad.kind);
        assert_eq!(inset.tags, quad.tags);

    }

    #[test]
    fn square_insets_evenly() {
        let quad = Quadrilateral::new(TileKind::RhombusCyan,
                                      Point2f::new(0.0, 0.0),
                                      Point2f::new(10.0, 0.0),
                                      Point2f::new(0.0, 10.0),
                                      Point2f::new(10.0, 10.0));
        let inset = inset_quad(&quad, 1.0);
        assert_relative_eq!(inset.vertices[0].x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(inset.vertices[0].y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(inset.vertices[3].x, 9.0, epsilon = 1e-5);
        assert_relative_eq!(inset.vertices[3].y, 9.0, epsilon = 1e-5);
        check_inset(&quad, 1.0);
    }

    #[test]
    fn rhombi_inset_evenly() {
        let deg = std::f32::consts::PI / 180.0;
        for &apex in &[36.0f32, 72.0] {
            let tri = Triangle::new(TileKind::RhombusViolet,
                                    Point2f::new(0.0, 0.0),
                                    Point2f::new(100.0, 0.0),
                                    Point2f::new(100.0 * (apex * deg).cos(),
                                                 100.0 * (apex * deg).sin()));
            let tags = Tags { flag: Some(true), parent: Some(TileKind::Dart) };
            check_inset(&complete_shape(&tri).with_tags(tags), 3.0);
        }
    }

    #[test]
    fn concave_dart_insets_evenly() {
        // arrowhead with its reflex corner at A
        let quad = Quadrilateral::new(TileKind::Dart,
                                      Point2f::new(0.0, 0.0),
                                      Point2f::new(-30.0, 40.0),
                                      Point2f::new(-30.0, -40.0),
                                      Point2f::new(60.0, 0.0));
        check_inset(&quad, 2.0);
    }

    #[test]
    fn degenerate_vertex_is_left_alone() {
        let p = Point2f::new(1.0, 1.0);
        let quad = Quadrilateral::new(TileKind::Kite, p, p,
                                      Point2f::new(5.0, 1.0),
                                      Point2f::new(5.0, 5.0));
        let inset = inset_quad(&quad, 0.5);
        assert_eq!(inset.vertices[0], p);
        assert!(inset.vertices.iter().all(|v| v.x.is_finite() && v.y.is_finite()));
    }

    #[test]
    fn add_margin_maps_every_quad() {
        let quad = Quadrilateral::new(TileKind::Kite,
                                      Point2f::new(0.0, 0.0),
                                      Point2f::new(4.0, 0.0),
                                      Point2f::new(0.0, 4.0),
                                      Point2f::new(4.0, 4.0));
        let out = add_margin(&[quad, quad, quad], 0.5);
        assert_eq!(out.len(), 3);
        for q in &out {
            assert_relative_eq!(q.vertices[0].x, 0.5, epsilon = 1e-5);
            assert_relative_eq!(q.vertices[0].y, 0.5, epsilon = 1e-5);
        }
    }

}
