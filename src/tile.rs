//////////////////////////////////////////////////////////////////////
// Penrose tile kinds
//
// kind names follow the coloring used in Simon Tatham's writeup:
// https://tartarus.org/~simon/20110412-penrose/penrose.xhtml

use std::fmt;

#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
pub enum TileKind {
    Kite,
    Dart,
    RhombusCyan,
    RhombusViolet
}

pub const ALL_KINDS: [TileKind; 4] = [
    TileKind::Kite,
    TileKind::Dart,
    TileKind::RhombusCyan,
    TileKind::RhombusViolet
];

// the two classical rule sets
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Family {
    P2, // kite & dart
    P3  // thin & thick rhombus
}

// used only by the renderer, never by subdivision
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SizeClass {
    Small,
    Large
}

impl TileKind {

    pub fn size_class(self) -> SizeClass {
        match self {
            TileKind::Kite | TileKind::RhombusCyan => SizeClass::Small,
            TileKind::Dart | TileKind::RhombusViolet => SizeClass::Large
        }
    }

    pub fn is_small(self) -> bool {
        self.size_class() == SizeClass::Small
    }

    pub fn family(self) -> Family {
        match self {
            TileKind::Kite | TileKind::Dart => Family::P2,
            TileKind::RhombusCyan | TileKind::RhombusViolet => Family::P3
        }
    }

    // number of children one deflation step produces
    pub fn branching(self) -> usize {
        match self {
            TileKind::Kite | TileKind::RhombusCyan => 2,
            TileKind::Dart | TileKind::RhombusViolet => 3
        }
    }

    // index into ALL_KINDS, handy for palettes
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TileKind::Kite => "kite",
            TileKind::Dart => "dart",
            TileKind::RhombusCyan => "rhombus-cyan",
            TileKind::RhombusViolet => "rhombus-violet"
        }
    }

}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Family {

    // kind the decagon seed is built from
    pub fn seed_kind(self) -> TileKind {
        match self {
            Family::P2 => TileKind::Dart,
            Family::P3 => TileKind::RhombusCyan
        }
    }

}
