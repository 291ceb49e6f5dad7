// penrose_rs: generate a Penrose tiling and draw it to svg or pdf.
//
// usage: penrose_rs LEVEL [options], see --help

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

#[macro_use]
extern crate error_chain;

use penrose_rs::config::{self, Tagging, TilingSpec};
use penrose_rs::deflate::AncestryTagging;
use penrose_rs::errors::*;
use penrose_rs::pipeline::{self, ToleranceMode, DEFAULT_RELATIVE_TOLERANCE};
use penrose_rs::render;
use penrose_rs::Tolerance;

//////////////////////////////////////////////////////////////////////

const DEFAULT_BIAS: f64 = 0.5;

#[derive(Parser, Debug)]
#[command(name = "penrose_rs", version)]
#[command(about = "Penrose tilings by triangle deflation")]
#[command(group(ArgGroup::new("decoration").args(["step", "fix_level"])))]
struct Cli {
    /// Number of deflations to apply to the seed decagon
    level: usize,

    /// Tile family: p2 (kite-dart) or p3 (rhombus)
    #[arg(long, default_value = "p3")]
    family: String,

    /// Radius of the seed decagon, in tile units
    #[arg(long, default_value_t = 1000.0)]
    radius: f32,

    /// Inset applied to every tile, in tile units
    #[arg(long, default_value_t = 0.0)]
    margin: f32,

    /// Two-pass decoration: flag tiles after this many deflations
    #[arg(long, conflicts_with = "fix_level")]
    step: Option<usize>,

    /// Ancestry decoration: stamp a random parent kind at this generation
    #[arg(long)]
    fix_level: Option<usize>,

    /// Probability of the dart/flagged half of a two-tone decoration
    /// [default: 0.5]; needs --step or --fix-level
    #[arg(long, requires = "decoration")]
    bias: Option<f64>,

    /// Random seed; drawn from entropy and logged when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Absolute squared-distance tolerance for merging tiles
    #[arg(long, conflicts_with = "relative_tolerance")]
    epsilon: Option<f32>,

    /// Merge tolerance as a fraction of the shortest edge
    #[arg(long)]
    relative_tolerance: Option<f32>,

    /// Color scheme: kind, size, two-tone or outline
    #[arg(long, default_value = "kind")]
    scheme: String,

    /// Page size in points
    #[arg(long, default_value_t = 800.0)]
    canvas: f64,

    /// Output file; the extension picks svg or pdf
    #[arg(short, long, default_value = "penrose_tiling.svg")]
    output: PathBuf,
}

impl Cli {

    fn into_spec(self) -> Result<TilingSpec> {

        let bias = self.bias.unwrap_or(DEFAULT_BIAS);

        let tagging = match (self.step, self.fix_level) {
            (Some(step), _) => Tagging::Stepped { step: step, bias: bias },
            (None, Some(level_to_fix)) =>
                Tagging::Ancestry(AncestryTagging { level_to_fix: level_to_fix, bias: bias }),
            (None, None) => Tagging::None
        };

        let tolerance = match self.epsilon {
            Some(epsilon) => ToleranceMode::Absolute(Tolerance::new(epsilon)),
            None => ToleranceMode::Relative(
                self.relative_tolerance.unwrap_or(DEFAULT_RELATIVE_TOLERANCE))
        };

        Ok(TilingSpec {
            family: config::lookup_family(&self.family.to_ascii_lowercase())?,
            level: self.level,
            radius: self.radius,
            margin: self.margin,
            tagging: tagging,
            seed: self.seed,
            tolerance: tolerance,
            scheme: config::lookup_scheme(&self.scheme.to_ascii_lowercase())?,
            canvas: self.canvas,
            output: self.output,
        })

    }

}

//////////////////////////////////////////////////////////////////////

fn run() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let spec = Cli::parse().into_spec()?;

    let format = spec.output_format()?;

    let seed = spec.seed.unwrap_or_else(rand::random);

    info!(seed = seed, "random seed");

    let mut rng = StdRng::seed_from_u64(seed);

    let quads = pipeline::generate(&spec, &mut rng)?;

    render::render_to_file(&quads, spec.scheme, spec.canvas, &spec.output, format)?;

    Ok(())

}

quick_main!(run);
