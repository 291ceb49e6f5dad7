//////////////////////////////////////////////////////////////////////
// run configuration: what to tile, how deep, how to decorate, where
// to write it. built by the command line, checked by validate().

use std::path::PathBuf;

use phf::phf_map;

use crate::deflate::AncestryTagging;
use crate::errors::*;
use crate::pipeline::ToleranceMode;
use crate::render::{ColorScheme, OutputFormat};
use crate::tile::Family;

// deeper than this and the triangle count runs into the hundreds
// of millions
pub const MAX_LEVEL: usize = 14;

//////////////////////////////////////////////////////////////////////
// define some statically allocated maps for
// lookups during parsing

pub static FAMILIES: phf::Map<&'static str, Family> = phf_map! {
    "p2" => Family::P2,
    "kite-dart" => Family::P2,
    "p3" => Family::P3,
    "rhombus" => Family::P3,
};

pub static SCHEMES: phf::Map<&'static str, ColorScheme> = phf_map! {
    "kind" => ColorScheme::Kind,
    "size" => ColorScheme::Size,
    "two-tone" => ColorScheme::TwoTone,
    "outline" => ColorScheme::Outline,
};

pub static OUTPUT_FORMATS: phf::Map<&'static str, OutputFormat> = phf_map! {
    "svg" => OutputFormat::Svg,
    "pdf" => OutputFormat::Pdf,
};

fn lookup<T: Copy>(map: &phf::Map<&'static str, T>, what: &str, value: &str) -> Result<T> {

    match map.get(value) {

        Some(&v) => Ok(v),

        None => {
            let mut names: Vec<&str> = map.keys().copied().collect();
            names.sort();
            bail!(ErrorKind::InvalidSpec(
                format!("unexpected value \"{:}\" for {:}, expected one of: {{\"{:}\"}}",
                        value, what, names.join("\", \""))));
        }

    }

}

pub fn lookup_family(name: &str) -> Result<Family> {
    lookup(&FAMILIES, "family", name)
}

pub fn lookup_scheme(name: &str) -> Result<ColorScheme> {
    lookup(&SCHEMES, "scheme", name)
}

pub fn lookup_format(extension: &str) -> Result<OutputFormat> {
    lookup(&OUTPUT_FORMATS, "output format", &extension.to_ascii_lowercase())
}

//////////////////////////////////////////////////////////////////////

// how tiles get their two-tone decoration, if at all
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tagging {
    None,
    Ancestry(AncestryTagging),          // stamp at one generation
    Stepped { step: usize, bias: f64 }, // coarse pass, then finer pass
}

#[derive(Debug, Clone)]
pub struct TilingSpec {
    pub family: Family,            // P2 or P3 rules
    pub level: usize,              // number of deflations
    pub radius: f32,               // seed decagon radius in tile units
    pub margin: f32,               // inset per tile in tile units, 0 = none
    pub tagging: Tagging,          // two-tone decoration
    pub seed: Option<u64>,         // random seed, None = from entropy
    pub tolerance: ToleranceMode,  // dedup tolerance
    pub scheme: ColorScheme,       // fills for each group of tiles
    pub canvas: f64,               // page size in points
    pub output: PathBuf,           // svg or pdf file
}

impl Default for TilingSpec {
    fn default() -> Self {
        TilingSpec {
            family: Family::P3,
            level: 5,
            radius: 1000.0,
            margin: 0.0,
            tagging: Tagging::None,
            seed: None,
            tolerance: ToleranceMode::default(),
            scheme: ColorScheme::Kind,
            canvas: 800.0,
            output: PathBuf::from("penrose_tiling.svg"),
        }
    }
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

impl TilingSpec {

    pub fn output_format(&self) -> Result<OutputFormat> {

        match self.output.extension().and_then(|e| e.to_str()) {
            Some(ext) => lookup_format(ext),
            None => bail!(ErrorKind::InvalidSpec(
                format!("can't tell output format of {:}", self.output.display())))
        }

    }

    // collect every problem before complaining
    pub fn validate(&self) -> Result<()> {

        let mut problems: Vec<String> = Vec::new();

        if self.level > MAX_LEVEL {
            problems.push(format!("level {:} exceeds maximum of {:}", self.level, MAX_LEVEL));
        }

        if !(self.radius.is_finite() && self.radius > 0.0) {
            problems.push(format!("radius must be positive, got {:}", self.radius));
        }

        if !(self.margin.is_finite() && self.margin >= 0.0) {
            problems.push(format!("margin must be non-negative, got {:}", self.margin));
        }

        if !(self.canvas.is_finite() && self.canvas > 0.0) {
            problems.push(format!("canvas must be positive, got {:}", self.canvas));
        }

        match self.tagging {

            Tagging::None => {}

            Tagging::Ancestry(tagging) => {
                if !is_probability(tagging.bias) {
                    problems.push(format!("bias must be in [0, 1], got {:}", tagging.bias));
                }
                if tagging.level_to_fix > self.level {
                    problems.push(format!("fix level {:} is deeper than level {:}",
                                          tagging.level_to_fix, self.level));
                }
            }

            Tagging::Stepped { step, bias } => {
                if !is_probability(bias) {
                    problems.push(format!("bias must be in [0, 1], got {:}", bias));
                }
                if step > self.level {
                    problems.push(format!("step {:} is deeper than level {:}", step, self.level));
                }
            }

        }

        match self.tolerance {

            ToleranceMode::Absolute(tol) => {
                if !(tol.epsilon().is_finite() && tol.epsilon() > 0.0) {
                    problems.push(format!("epsilon must be positive, got {:}", tol.epsilon()));
                }
            }

            ToleranceMode::Relative(fraction) => {
                if !(fraction > 0.0 && fraction <= 0.5) {
                    problems.push(format!("relative tolerance must be in (0, 0.5], got {:}",
                                          fraction));
                }
            }

        }

        if let Err(Error(ErrorKind::InvalidSpec(msg), _)) = self.output_format() {
            problems.push(msg);
        }

        if !problems.is_empty() {
            bail!(ErrorKind::InvalidSpec(problems.join("; ")));
        }

        Ok(())

    }

}
