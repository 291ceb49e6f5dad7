//////////////////////////////////////////////////////////////////////
// going between half-tiles and whole tiles
//
// subdivision always leaves the two halves of a tile on either side
// of a shared edge, so reflecting A across line BC recovers the
// fourth vertex

use crate::geometry::{Quadrilateral, Triangle};

pub fn complete_shape(tri: &Triangle) -> Quadrilateral {

    let [a, b, c] = tri.vertices;

    let bc = c - b;
    let t = (a - b).dot(&bc) / bc.dot(&bc);

    let d = a + 2.0 * ((b - a) + bc * t);

    Quadrilateral::new(tri.kind, a, b, c, d).with_tags(tri.tags)

}

// inverse of complete_shape: (A, B, C) and (D, B, C)
pub fn split_shape(quad: &Quadrilateral) -> (Triangle, Triangle) {

    let [a, b, c, d] = quad.vertices;

    (Triangle::new(quad.kind, a, b, c).with_tags(quad.tags),
     Triangle::new(quad.kind, d, b, c).with_tags(quad.tags))

}

pub fn complete_all(generation: &[Triangle]) -> Vec<Quadrilateral> {
    generation.iter().map(complete_shape).collect()
}

pub fn split_all(quads: &[Quadrilateral]) -> Vec<Triangle> {

    let mut tris = Vec::with_capacity(2 * quads.len());

    for quad in quads {
        let (t0, t1) = split_shape(quad);
        tris.push(t0);
        tris.push(t1);
    }

    tris

}
