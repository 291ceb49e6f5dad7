//////////////////////////////////////////////////////////////////////
// substitution rules: split each half-tile into 2 or 3 half-tiles
// whose edges are the parent's divided by the golden ratio

use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::geometry::{Triangle, PHI};
use crate::tile::TileKind;

// deflate a single triangle. A, B, C are addressed by position.
// children inherit the parent's tags.
pub fn deflate_triangle(tri: &Triangle) -> Vec<Triangle> {

    let [a, b, c] = tri.vertices;

    let child = |kind, p0, p1, p2| Triangle::new(kind, p0, p1, p2).with_tags(tri.tags);

    match tri.kind {

        TileKind::Dart => {

            let r = a + (b - a) / PHI;
            let q = b + (c - b) / PHI;

            vec![
                child(TileKind::Dart, r, a, q),
                child(TileKind::Dart, c, a, q),
                child(TileKind::Kite, q, b, r)
            ]

        }

        TileKind::Kite => {

            let p = b + (a - b) / PHI;

            vec![
                child(TileKind::Kite, c, a, p),
                child(TileKind::Dart, p, b, c)
            ]

        }

        TileKind::RhombusCyan => {

            let p = a + (b - a) / PHI;

            vec![
                child(TileKind::RhombusCyan, c, p, b),
                child(TileKind::RhombusViolet, p, c, a)
            ]

        }

        TileKind::RhombusViolet => {

            let q = b + (a - b) / PHI;
            let r = b + (c - b) / PHI;

            vec![
                child(TileKind::RhombusViolet, r, c, a),
                child(TileKind::RhombusViolet, q, r, b),
                child(TileKind::RhombusCyan, r, q, a)
            ]

        }

    }

}

// deflate a whole generation. output order follows input order so
// results are reproducible; the work itself is spread over rayon's pool.
pub fn deflate_generation(generation: &[Triangle]) -> Vec<Triangle> {

    let count = generation.iter().map(|t| t.kind.branching()).sum();

    let mut next = Vec::with_capacity(count);
    next.par_extend(generation.par_iter().flat_map_iter(deflate_triangle));

    debug_assert!(next.len() == count);

    next

}

// run exactly `level` generations
pub fn deflate_n(seed: Vec<Triangle>, level: usize) -> Vec<Triangle> {

    (1..=level).fold(seed, |generation, gen| {
        let next = deflate_generation(&generation);
        debug!(generation = gen, triangles = next.len(), "deflated");
        next
    })

}

//////////////////////////////////////////////////////////////////////
// ancestry tagging: at one fixed generation every triangle gets a
// coin-flip Dart/Kite tag that all of its descendants keep

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AncestryTagging {
    pub level_to_fix: usize, // generation index to stamp, 0 = seed
    pub bias: f64,           // probability of Dart
}

// bias must lie in [0, 1]
pub fn stamp_ancestry<R: Rng + ?Sized>(generation: &mut [Triangle],
                                       bias: f64,
                                       rng: &mut R) {

    for tri in generation.iter_mut() {
        let kind = if rng.gen_bool(bias) { TileKind::Dart } else { TileKind::Kite };
        tri.tags.parent = Some(kind);
    }

}

// like deflate_n, stamping at tagging.level_to_fix. nothing is
// stamped if that generation is never reached.
pub fn deflate_n_tagged<R: Rng + ?Sized>(seed: Vec<Triangle>,
                                         level: usize,
                                         tagging: &AncestryTagging,
                                         rng: &mut R) -> Vec<Triangle> {

    let mut generation = seed;

    if tagging.level_to_fix == 0 {
        stamp_ancestry(&mut generation, tagging.bias, rng);
    }

    for gen in 1..=level {

        generation = deflate_generation(&generation);
        debug!(generation = gen, triangles = generation.len(), "deflated");

        if gen == tagging.level_to_fix {
            debug!(generation = gen, "stamping ancestry");
            stamp_ancestry(&mut generation, tagging.bias, rng);
        }

    }

    generation

}
