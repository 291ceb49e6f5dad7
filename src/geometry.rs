//////////////////////////////////////////////////////////////////////
// points, tolerances and the two polygon shapes

use std::cmp::Ordering;
use std::fmt;

use crate::tile::TileKind;

//////////////////////////////////////////////////////////////////////
// pull in some types from nalgebra
//
// single precision is plenty: tiles are O(1) to O(2000) units across
// and the tolerance below absorbs the drift

pub type Vec2f = nalgebra::Vector2<f32>;
pub type Point2f = nalgebra::geometry::Point2<f32>;

pub const PHI: f32 = 1.618033988749895;

// reference tolerance, compared against squared distances
pub const DEFAULT_EPSILON: f32 = 0.1;

//////////////////////////////////////////////////////////////////////
// approximate point equality
//
// two points are equal iff their squared distance is below epsilon.
// this is what lets the deduplicator recognize the same tile computed
// twice from different triangle halves.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    epsilon: f32
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance { epsilon: DEFAULT_EPSILON }
    }
}

impl Tolerance {

    pub fn new(epsilon: f32) -> Self {
        Tolerance { epsilon: epsilon }
    }

    // points closer than dist compare equal
    pub fn for_distance(dist: f32) -> Self {
        Tolerance { epsilon: dist * dist }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    // linear distance below which points compare equal
    pub fn radius(&self) -> f32 {
        self.epsilon.sqrt()
    }

    pub fn points_equal(&self, a: &Point2f, b: &Point2f) -> bool {
        nalgebra::distance_squared(a, b) < self.epsilon
    }

    // quads are compared by center: duplicates may list their
    // vertices in a different rotation
    pub fn quads_equal(&self, p: &Quadrilateral, q: &Quadrilateral) -> bool {
        self.points_equal(&p.center(), &q.center())
    }

}

// lexicographic on (x, y); a total order so it is safe to sort with
pub fn cmp_points(a: &Point2f, b: &Point2f) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

pub fn cmp_quads(p: &Quadrilateral, q: &Quadrilateral) -> Ordering {
    cmp_points(&p.center(), &q.center())
}

//////////////////////////////////////////////////////////////////////
// decoration carried along through subdivision

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tags {
    pub flag: Option<bool>,        // two-tone decoration
    pub parent: Option<TileKind>,  // kind of an ancestor at a fixed depth
}

//////////////////////////////////////////////////////////////////////
// Penrose triangle (half-tile)
//
// vertex order matters: the deflation rules address A, B, C by
// position

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub kind: TileKind,
    pub vertices: [Point2f; 3],
    pub tags: Tags,
}

impl Triangle {

    pub fn new(kind: TileKind, a: Point2f, b: Point2f, c: Point2f) -> Self {
        Triangle {
            kind: kind,
            vertices: [a, b, c],
            tags: Tags::default()
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    // lengths of AB, BC, CA
    pub fn edge_lengths(&self) -> [f32; 3] {
        let [a, b, c] = self.vertices;
        [(b - a).norm(), (c - b).norm(), (a - c).norm()]
    }

    pub fn shortest_edge(&self) -> f32 {
        let e = self.edge_lengths();
        e[0].min(e[1]).min(e[2])
    }

    pub fn center(&self) -> Point2f {
        let [a, b, c] = self.vertices;
        Point2f::from((a.coords + b.coords + c.coords) / 3.0)
    }

}

//////////////////////////////////////////////////////////////////////
// Penrose quadrilateral (whole tile)
//
// vertices are (A, B, C, D) as produced by completion: D is opposite
// A, so going around the boundary visits A, B, D, C

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrilateral {
    pub kind: TileKind,
    pub vertices: [Point2f; 4],
    pub tags: Tags,
}

impl Quadrilateral {

    pub fn new(kind: TileKind,
               a: Point2f, b: Point2f,
               c: Point2f, d: Point2f) -> Self {
        Quadrilateral {
            kind: kind,
            vertices: [a, b, c, d],
            tags: Tags::default()
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn flag(&self) -> Option<bool> {
        self.tags.flag
    }

    pub fn parent(&self) -> Option<TileKind> {
        self.tags.parent
    }

    pub fn center(&self) -> Point2f {
        let [a, b, c, d] = self.vertices;
        Point2f::from((a.coords + b.coords + c.coords + d.coords) / 4.0)
    }

    // vertices in boundary order, ready to draw
    pub fn outline(&self) -> [Point2f; 4] {
        let [a, b, c, d] = self.vertices;
        [a, b, d, c]
    }

    pub fn shortest_edge(&self) -> f32 {
        let o = self.outline();
        (0..4)
            .map(|i| (o[(i + 1) % 4] - o[i]).norm())
            .fold(f32::MAX, f32::min)
    }

}

//////////////////////////////////////////////////////////////////////
// human readable dumps, mostly for trace logging

fn fmt_point(f: &mut fmt::Formatter, p: &Point2f) -> fmt::Result {
    write!(f, "({:}, {:})", p.x, p.y)
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:}", self.kind)?;
        for p in self.vertices.iter() {
            f.write_str(", ")?;
            fmt_point(f, p)?;
        }
        Ok(())
    }
}

impl fmt::Display for Quadrilateral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:}", self.kind)?;
        for p in self.vertices.iter() {
            f.write_str(", ")?;
            fmt_point(f, p)?;
        }
        Ok(())
    }
}
