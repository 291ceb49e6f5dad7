//////////////////////////////////////////////////////////////////////
// orchestration: seed -> deflate N times -> complete -> dedup
// plus the tagged and two-pass variants used for two-tone patterns

use rand::Rng;
use tracing::{debug, info};

use crate::completion::{complete_all, split_all};
use crate::config::{Tagging, TilingSpec};
use crate::dedup::dedup_quads;
use crate::deflate::{deflate_n, deflate_n_tagged, AncestryTagging};
use crate::errors::*;
use crate::geometry::{Point2f, Quadrilateral, Tolerance, Triangle, Vec2f};
use crate::margin::add_margin;
use crate::tile::Family;

//////////////////////////////////////////////////////////////////////
// how close two tile centers must be to count as the same tile

// fraction of the shortest edge used by ToleranceMode::Relative
pub const DEFAULT_RELATIVE_TOLERANCE: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToleranceMode {
    Absolute(Tolerance),
    Relative(f32),
}

impl Default for ToleranceMode {
    fn default() -> Self {
        ToleranceMode::Relative(DEFAULT_RELATIVE_TOLERANCE)
    }
}

impl ToleranceMode {

    // relative tolerances scale with the smallest tile in the
    // generation, so deep subdivisions of small canvases still
    // separate neighbors
    pub fn resolve(&self, generation: &[Triangle]) -> Tolerance {

        match self {

            ToleranceMode::Absolute(tol) => *tol,

            ToleranceMode::Relative(fraction) => {

                if generation.is_empty() {
                    return Tolerance::default();
                }

                let shortest = generation.iter()
                    .map(|t| t.shortest_edge())
                    .fold(f32::MAX, f32::min);

                Tolerance::for_distance(fraction * shortest)

            }

        }

    }

}

//////////////////////////////////////////////////////////////////////
// initial decagon: 10 half-tiles radiating from center, every other
// one mirrored so that neighbors pair up into whole tiles.
//
// the center goes where each family's rules expect the sharp
// corner: A for the rhombus seed, B for the dart seed.

pub fn decagon(family: Family, center: Point2f, radius: f32) -> Vec<Triangle> {

    let pi = std::f32::consts::PI;
    let kind = family.seed_kind();

    let mut tris = Vec::with_capacity(10);

    for i in 0..10i32 {

        let phi1 = (2 * i - 1) as f32 * pi / 10.0;
        let phi2 = (2 * i + 1) as f32 * pi / 10.0;

        let mut b = center + radius * Vec2f::new(phi1.cos(), phi1.sin());
        let mut c = center + radius * Vec2f::new(phi2.cos(), phi2.sin());

        if i % 2 == 0 {
            std::mem::swap(&mut b, &mut c);
        }

        tris.push(match family {
            Family::P3 => Triangle::new(kind, center, b, c),
            Family::P2 => Triangle::new(kind, b, center, c)
        });

    }

    tris

}

//////////////////////////////////////////////////////////////////////

fn merge(generation: &[Triangle], mode: &ToleranceMode) -> Vec<Quadrilateral> {

    let tol = mode.resolve(generation);

    let quads = complete_all(generation);
    let completed = quads.len();

    let merged = dedup_quads(quads, &tol);

    debug!(completed = completed, merged = merged.len(),
           epsilon = tol.epsilon(), "deduplicated");

    merged

}

pub fn deflate_and_merge(seed: Vec<Triangle>,
                         level: usize,
                         mode: &ToleranceMode) -> Vec<Quadrilateral> {

    let generation = deflate_n(seed, level);

    merge(&generation, mode)

}

pub fn deflate_and_merge_tagged<R: Rng + ?Sized>(seed: Vec<Triangle>,
                                                 level: usize,
                                                 tagging: &AncestryTagging,
                                                 mode: &ToleranceMode,
                                                 rng: &mut R) -> Result<Vec<Quadrilateral>> {

    check_bias(tagging.bias)?;

    let generation = deflate_n_tagged(seed, level, tagging, rng);

    Ok(merge(&generation, mode))

}

// gen_bool panics outside [0, 1], NaN included
fn check_bias(bias: f64) -> Result<()> {

    if !(0.0..=1.0).contains(&bias) {
        bail!(ErrorKind::InvalidSpec(
            format!("bias must be in [0, 1], got {:}", bias)));
    }

    Ok(())

}

// random two-tone flag per tile, true with probability bias.
// bias must lie in [0, 1].
pub fn assign_flags<R: Rng + ?Sized>(quads: &mut [Quadrilateral], bias: f64, rng: &mut R) {
    for quad in quads.iter_mut() {
        quad.tags.flag = Some(rng.gen_bool(bias));
    }
}

// two passes: `step` generations, flag and tag the coarse tiles,
// split them back into halves, then the remaining `level - step`
// generations. fine tiles carry their coarse ancestor's flag and kind.
pub fn deflate_and_merge_stepped<R: Rng + ?Sized>(seed: Vec<Triangle>,
                                                  level: usize,
                                                  step: usize,
                                                  bias: f64,
                                                  mode: &ToleranceMode,
                                                  rng: &mut R) -> Result<Vec<Quadrilateral>> {

    if step > level {
        bail!(ErrorKind::InvalidSpec(
            format!("step {:} is deeper than level {:}", step, level)));
    }

    check_bias(bias)?;

    let mut coarse = deflate_and_merge(seed, step, mode);

    assign_flags(&mut coarse, bias, rng);

    for quad in coarse.iter_mut() {
        quad.tags.parent = Some(quad.kind);
    }

    debug!(step = step, tiles = coarse.len(), "coarse pass done");

    let halves = split_all(&coarse);
    drop(coarse);

    Ok(deflate_and_merge(halves, level - step, mode))

}

//////////////////////////////////////////////////////////////////////
// check a TilingSpec, then build everything it asks for short of drawing

pub fn generate<R: Rng + ?Sized>(spec: &TilingSpec, rng: &mut R) -> Result<Vec<Quadrilateral>> {

    spec.validate()?;

    let seed = decagon(spec.family, Point2f::origin(), spec.radius);

    let quads = match &spec.tagging {

        Tagging::None => deflate_and_merge(seed, spec.level, &spec.tolerance),

        Tagging::Ancestry(tagging) =>
            deflate_and_merge_tagged(seed, spec.level, tagging, &spec.tolerance, rng)?,

        Tagging::Stepped { step, bias } =>
            deflate_and_merge_stepped(seed, spec.level, *step, *bias, &spec.tolerance, rng)?

    };

    info!(family = ?spec.family, level = spec.level, tiles = quads.len(), "tiling generated");

    if spec.margin > 0.0 {
        Ok(add_margin(&quads, spec.margin))
    } else {
        Ok(quads)
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::tile::TileKind;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn decagon_shapes() {
        for &fam in &[Family::P2, Family::P3] {
            let seed = decagon(fam, Point2f::new(3.0, -2.0), 10.0);
            assert_eq!(seed.len(), 10);
            for t in &seed {
                assert_eq!(t.kind, fam.seed_kind());
                let apex = if fam == Family::P3 { t.vertices[0] } else { t.vertices[1] };
                assert_eq!(apex, Point2f::new(3.0, -2.0));
                // legs are radius, base is radius / phi
                let mut e = t.edge_lengths().to_vec();
                e.sort_by(|a, b| a.total_cmp(b));
                assert_relative_eq!(e[0], 6.18034, epsilon = 1e-3);
                assert_relative_eq!(e[2], 10.0, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn relative_tolerance_tracks_tile_size() {
        let small = deflate_n(decagon(Family::P3, Point2f::origin(), 1.0), 3);
        let big = deflate_n(decagon(Family::P3, Point2f::origin(), 1000.0), 3);
        let mode = ToleranceMode::default();
        let ratio = (mode.resolve(&big).epsilon() / mode.resolve(&small).epsilon()).sqrt();
        assert_relative_eq!(ratio, 1000.0, max_relative = 1e-3);
        assert_eq!(mode.resolve(&[]), Tolerance::default());
        let fixed = ToleranceMode::Absolute(Tolerance::new(2.0));
        assert_eq!(fixed.resolve(&small).epsilon(), 2.0);
    }

    #[test]
    fn merged_counts() {
        let mode = ToleranceMode::default();
        let p3 = deflate_and_merge(decagon(Family::P3, Point2f::origin(), 1.0), 3, &mode);
        let p2 = deflate_and_merge(decagon(Family::P2, Point2f::origin(), 1.0), 3, &mode);
        assert_eq!(p3.len(), 70);
        assert_eq!(p2.len(), 115);
    }

    #[test]
    fn absolute_reference_tolerance_at_reference_scale() {
        let mode = ToleranceMode::Absolute(Tolerance::default());
        let quads = deflate_and_merge(decagon(Family::P3, Point2f::origin(), 1000.0), 3, &mode);
        assert_eq!(quads.len(), 70);
    }

    #[test]
    fn flags_follow_bias() {
        let mut quads = deflate_and_merge(decagon(Family::P3, Point2f::origin(), 100.0), 2,
                                          &ToleranceMode::default());
        let mut rng = StdRng::seed_from_u64(3);
        assign_flags(&mut quads, 1.0, &mut rng);
        assert!(quads.iter().all(|q| q.flag() == Some(true)));
        assign_flags(&mut quads, 0.0, &mut rng);
        assert!(quads.iter().all(|q| q.flag() == Some(false)));
    }

    #[test]
    fn stepped_tiles_carry_coarse_tags() {

        let mode = ToleranceMode::default();
        let seed = decagon(Family::P2, Point2f::origin(), 100.0);

        let mut rng = StdRng::seed_from_u64(11);
        let quads = deflate_and_merge_stepped(seed.clone(), 4, 2, 0.5, &mode, &mut rng).unwrap();

        assert!(!quads.is_empty());
        for q in &quads {
            assert!(q.flag().is_some());
            let parent = q.parent().unwrap();
            assert!(parent == TileKind::Kite || parent == TileKind::Dart);
        }
        assert!(quads.iter().any(|q| q.flag() == Some(true)));
        assert!(quads.iter().any(|q| q.flag() == Some(false)));

        let mut rng = StdRng::seed_from_u64(11);
        let again = deflate_and_merge_stepped(seed, 4, 2, 0.5, &mode, &mut rng).unwrap();
        assert_eq!(quads, again);

    }

    #[test]
    fn step_deeper_than_level_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let seed = decagon(Family::P3, Point2f::origin(), 1.0);
        let err = deflate_and_merge_stepped(seed, 2, 3, 0.5, &ToleranceMode::default(), &mut rng)
            .unwrap_err();
        match err.kind() {
            ErrorKind::InvalidSpec(_) => {},
            other => panic!("unexpected error {:?}", other)
        }
    }

    fn is_invalid_spec<T: std::fmt::Debug>(result: Result<T>) -> bool {
        match result {
            Err(Error(ErrorKind::InvalidSpec(_), _)) => true,
            _ => false
        }
    }

    #[test]
    fn bias_outside_unit_interval_is_rejected() {

        let mode = ToleranceMode::default();
        let mut rng = StdRng::seed_from_u64(0);

        for &bias in &[1.5, -0.1, f64::NAN] {

            let seed = decagon(Family::P3, Point2f::origin(), 1.0);
            assert!(is_invalid_spec(
                deflate_and_merge_stepped(seed.clone(), 2, 1, bias, &mode, &mut rng)));

            let tagging = AncestryTagging { level_to_fix: 1, bias: bias };
            assert!(is_invalid_spec(
                deflate_and_merge_tagged(seed, 2, &tagging, &mode, &mut rng)));

            let spec = TilingSpec {
                level: 2,
                tagging: Tagging::Stepped { step: 1, bias: bias },
                ..TilingSpec::default()
            };
            assert!(is_invalid_spec(generate(&spec, &mut rng)));

        }

    }

    #[test]
    fn untagged_runs_are_bit_reproducible() {
        let mode = ToleranceMode::default();
        let a = deflate_and_merge(decagon(Family::P2, Point2f::origin(), 1.0), 4, &mode);
        let b = deflate_and_merge(decagon(Family::P2, Point2f::origin(), 1.0), 4, &mode);
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b.iter()) {
            for (v, w) in p.vertices.iter().zip(q.vertices.iter()) {
                assert_eq!(v.x.to_bits(), w.x.to_bits());
                assert_eq!(v.y.to_bits(), w.y.to_bits());
            }
        }
    }

}
