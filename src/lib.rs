// Penrose tilings by triangle deflation, rendered with cairo.
//
// The kernel (tile kinds, substitution rules, completion to
// quadrilaterals, deduplication, margin inset) lives in the modules
// below; main.rs is just the command line on top of it.

extern crate cairo;

//////////////////////////////////////////////////////////////////////
// use error chain so we can use Result<> everywhere
// for error handling

#[macro_use]
extern crate error_chain;

pub mod errors {

    error_chain!{

        foreign_links {
            Fmt(::std::fmt::Error);
            Io(::std::io::Error);
            Cairo(::cairo::Error);
        }

        errors {

            EmptyTiling {
                description("empty tiling")
                display("empty tiling: no tiles to work with")
            }

            InvalidSpec(msg: String) {
                description("invalid tiling spec")
                display("invalid tiling spec: {}", msg)
            }

        }

    }

}

pub mod tile;
pub mod geometry;
pub mod deflate;
pub mod completion;
pub mod dedup;
pub mod margin;
pub mod pipeline;
pub mod config;
pub mod render;

pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::geometry::{Point2f, Quadrilateral, Tags, Tolerance, Triangle, Vec2f};
pub use crate::tile::{Family, SizeClass, TileKind};
