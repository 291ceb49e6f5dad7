//////////////////////////////////////////////////////////////////////
// drawing tilings with cairo
//
// tiles are grouped into layers by arbitrary predicates; every layer
// becomes one path that is filled and/or stroked once.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::*;
use crate::geometry::{Point2f, Quadrilateral};
use crate::tile::{SizeClass, TileKind};

//////////////////////////////////////////////////////////////////////
// pull in some types from nalgebra
//
// page space is double precision since that's what cairo speaks

type Vec2d = nalgebra::Vector2<f64>;
type Point2d = nalgebra::geometry::Point2<f64>;
type Translation2d = nalgebra::Translation2<f64>;
type Transform2d = nalgebra::Transform2<f64>;
type Matrix3d = nalgebra::Matrix3<f64>;

//////////////////////////////////////////////////////////////////////
// styles

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Rgb { r: r, g: g, b: b }
    }
}

pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

// one per TileKind, in declaration order
const KIND_COLORS: [Rgb; 4] = [
    Rgb::new(1.0, 0.314, 0.314),
    Rgb::new(1.0, 1.0, 0.314),
    Rgb::new(0.0, 0.8, 0.8),
    Rgb::new(0.56, 0.27, 0.68)
];

const SMALL_COLOR: Rgb = Rgb::new(0.549, 0.549, 0.549);
const LARGE_COLOR: Rgb = Rgb::new(0.3, 0.3, 0.3);

// (flag, size) -> color for two-tone
const TWO_TONE_COLORS: [[Rgb; 2]; 2] = [
    [Rgb::new(0.93, 0.93, 0.87), Rgb::new(0.8, 0.8, 0.72)],
    [Rgb::new(0.2, 0.35, 0.6), Rgb::new(0.1, 0.2, 0.4)]
];

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ColorScheme {
    Kind,    // one fill per tile kind
    Size,    // small vs large
    TwoTone, // decoration flag x size
    Outline  // strokes only
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum OutputFormat {
    Svg,
    Pdf
}

// which half of a two-tone pattern a tile belongs to. tiles flagged
// explicitly win; otherwise fall back on the ancestry tag.
pub fn two_tone_flag(quad: &Quadrilateral) -> bool {
    match quad.flag() {
        Some(flag) => flag,
        None => quad.parent() == Some(TileKind::Dart)
    }
}

//////////////////////////////////////////////////////////////////////
// a group of tiles sharing one style

pub struct Layer<'a> {
    pub fill: Option<Rgb>,
    pub stroke: Option<Stroke>,
    pub predicate: Box<dyn Fn(&Quadrilateral, usize) -> bool + 'a>
}

impl<'a> Layer<'a> {

    pub fn new<F>(fill: Option<Rgb>, stroke: Option<Stroke>, predicate: F) -> Self
    where F: Fn(&Quadrilateral, usize) -> bool + 'a {
        Layer {
            fill: fill,
            stroke: stroke,
            predicate: Box::new(predicate)
        }
    }

}

pub fn scheme_layers(scheme: ColorScheme, stroke: Stroke) -> Vec<Layer<'static>> {

    let stroke = Some(stroke);

    match scheme {

        ColorScheme::Kind => {
            KIND_COLORS.iter().enumerate().map(|(idx, &color)| {
                Layer::new(Some(color), stroke, move |q: &Quadrilateral, _| q.kind.index() == idx)
            }).collect()
        }

        ColorScheme::Size => vec![
            Layer::new(Some(SMALL_COLOR), stroke,
                       |q: &Quadrilateral, _| q.kind.size_class() == SizeClass::Small),
            Layer::new(Some(LARGE_COLOR), stroke,
                       |q: &Quadrilateral, _| q.kind.size_class() == SizeClass::Large),
        ],

        ColorScheme::TwoTone => {
            let mut layers = vec![];
            for &flag in &[false, true] {
                for &small in &[true, false] {
                    let color = TWO_TONE_COLORS[flag as usize][(!small) as usize];
                    layers.push(Layer::new(Some(color), stroke, move |q: &Quadrilateral, _| {
                        two_tone_flag(q) == flag && q.kind.is_small() == small
                    }));
                }
            }
            layers
        }

        ColorScheme::Outline => vec![
            Layer::new(None, stroke, |_: &Quadrilateral, _| true)
        ]

    }

}

//////////////////////////////////////////////////////////////////////
// Rect2d type has lower-left p0 and upper-right p1

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Rect2d {
    pub p0: Point2d,
    pub p1: Point2d
}

impl Rect2d {

    // empty rectangle has p0 > p1
    pub fn empty() -> Self {

        let p0 = Point2d::new(f64::MAX, f64::MAX);
        let p1 = -p0;

        Rect2d { p0: p0, p1: p1 }

    }

    pub fn new(p0: Point2d, p1: Point2d) -> Self {
        Rect2d { p0: p0, p1: p1 }
    }

    // expand this rect to include the given point
    pub fn expand(&mut self, p: &Point2d) {
        self.p0 = self.p0.inf(p);
        self.p1 = self.p1.sup(p);
    }

    pub fn dims(&self) -> Vec2d {
        self.p1 - self.p0
    }

    pub fn center(&self) -> Point2d {
        self.p0 + 0.5*(self.p1 - self.p0)
    }

}

fn to_page_point(p: &Point2f) -> Point2d {
    Point2d::new(p.x as f64, p.y as f64)
}

// bounding box of all tiles, in tile units
pub fn bounds(quads: &[Quadrilateral]) -> Result<Rect2d> {

    if quads.is_empty() {
        bail!(ErrorKind::EmptyTiling);
    }

    let mut rect = Rect2d::empty();

    for quad in quads {
        for p in quad.vertices.iter() {
            rect.expand(&to_page_point(p));
        }
    }

    Ok(rect)

}

//////////////////////////////////////////////////////////////////////
//
// make a Transform2d that will translate and scale the given
// contents_rect (input) to the given page_rect (output).
//
// always includes vertical flip because graphics coordinate system
// is left-handed (y increases going down)

pub fn get_page_transform(contents_rect: &Rect2d,
                          page_rect: &Rect2d) -> (Transform2d, f64) {

    let cdims = contents_rect.dims();
    let pdims = page_rect.dims();

    let scl = (pdims.component_div(&cdims)).min();

    let vmid = contents_rect.center();
    let pmid = page_rect.center();

    let translate_page = Translation2d::new(pmid[0], pmid[1]);

    let scale = Transform2d::from_matrix_unchecked(
        Matrix3d::new(
            scl, 0.0, 0.0,
            0.0, -scl, 0.0,
            0.0, 0.0, 1.0
        )
    );

    let translate_points = Translation2d::new(-vmid[0], -vmid[1]);

    let transform = translate_page * scale * translate_points;

    (transform, scl)

}

// tiles mapped into page space, kinds and tags untouched
pub fn to_page(quads: &[Quadrilateral], transform: &Transform2d) -> Vec<Quadrilateral> {

    quads.iter().map(|q| {
        let mut out = *q;
        for v in out.vertices.iter_mut() {
            let p = transform * to_page_point(v);
            *v = Point2f::new(p.x as f32, p.y as f32);
        }
        out
    }).collect()

}

// stroke width from the first tile's shortest edge, in page units
pub fn stroke_width(page_quads: &[Quadrilateral]) -> Result<f64> {

    match page_quads.first() {
        None => bail!(ErrorKind::EmptyTiling),
        Some(quad) => Ok((0.05 * quad.shortest_edge() as f64).max(0.25).min(1.0))
    }

}

//////////////////////////////////////////////////////////////////////

trait CairoVecOps {

    fn moveto(&self, p: &Point2f);
    fn lineto(&self, p: &Point2f);
    fn setcolor(&self, c: &Rgb);
    fn drawpoly(&self, poly: &[Point2f]);

}

impl CairoVecOps for cairo::Context {

    fn setcolor(&self, c: &Rgb) {
        self.set_source_rgb(c.r, c.g, c.b);
    }

    fn moveto(&self, p: &Point2f) {
        self.move_to(p.x as f64, p.y as f64);
    }

    fn lineto(&self, p: &Point2f) {
        self.line_to(p.x as f64, p.y as f64);
    }

    fn drawpoly(&self, poly: &[Point2f]) {
        for (i, p) in poly.iter().enumerate() {
            if i == 0 {
                self.moveto(p);
            } else {
                self.lineto(p);
            }
        }
        self.close_path();
    }

}

macro_rules! with_save_restore {

    ($ctx:ident, { $($tree:tt)* }) => {

        $ctx.save();

        {

            $($tree)*

        }

        $ctx.restore();

    }

}

// concatenate every shape the predicate accepts into one path, then
// fill and/or stroke it. returns the number of shapes emitted.
pub fn emit<P>(ctx: &cairo::Context,
               shapes: &[Quadrilateral],
               fill: Option<Rgb>,
               stroke: Option<&Stroke>,
               predicate: P) -> usize
where P: Fn(&Quadrilateral, usize) -> bool {

    let mut count = 0;

    ctx.new_path();

    for (idx, shape) in shapes.iter().enumerate() {
        if predicate(shape, idx) {
            ctx.drawpoly(&shape.outline());
            count += 1;
        }
    }

    if count == 0 {
        return 0;
    }

    with_save_restore!(ctx, {

        if let Some(color) = fill {
            ctx.setcolor(&color);
            if stroke.is_some() {
                ctx.fill_preserve();
            } else {
                ctx.fill();
            }
        }

        if let Some(stroke) = stroke {
            ctx.setcolor(&stroke.color);
            ctx.set_line_width(stroke.width);
            ctx.set_line_join(cairo::LineJoin::Round);
            ctx.stroke();
        }

    });

    ctx.new_path();

    count

}

// draw the whole tiling fitted into page_rect. returns number of
// shapes drawn, summed over layers.
pub fn draw_tiling(ctx: &cairo::Context,
                   quads: &[Quadrilateral],
                   scheme: ColorScheme,
                   page_rect: &Rect2d) -> Result<usize> {

    let contents_rect = bounds(quads)?;

    let (transform, scl) = get_page_transform(&contents_rect, page_rect);

    let page_quads = to_page(quads, &transform);

    let stroke = Stroke { color: BLACK, width: stroke_width(&page_quads)? };

    debug!(scale = scl, line_width = stroke.width, "page transform");

    let mut drawn = 0;

    for layer in scheme_layers(scheme, stroke) {
        drawn += emit(ctx, &page_quads, layer.fill, layer.stroke.as_ref(), &*layer.predicate);
    }

    Ok(drawn)

}

fn paint_page(ctx: &cairo::Context,
              quads: &[Quadrilateral],
              scheme: ColorScheme,
              canvas: f64) -> Result<usize> {

    let inset = 0.02 * canvas;

    let page_rect = Rect2d::new(Point2d::new(inset, inset),
                                Point2d::new(canvas - inset, canvas - inset));

    with_save_restore!(ctx, {
        ctx.setcolor(&WHITE);
        ctx.paint();
    });

    draw_tiling(ctx, quads, scheme, &page_rect)

}

// square page of canvas x canvas points
pub fn render_to_file(quads: &[Quadrilateral],
                      scheme: ColorScheme,
                      canvas: f64,
                      path: &Path,
                      format: OutputFormat) -> Result<()> {

    if quads.is_empty() {
        bail!(ErrorKind::EmptyTiling);
    }

    let drawn = match format {

        OutputFormat::Svg => {
            let surface = cairo::SvgSurface::new(canvas, canvas, Some(path))?;
            let ctx = cairo::Context::new(&surface);
            let drawn = paint_page(&ctx, quads, scheme, canvas)?;
            surface.finish();
            drawn
        }

        OutputFormat::Pdf => {
            let surface = cairo::PdfSurface::new(canvas, canvas, path)?;
            let ctx = cairo::Context::new(&surface);
            let drawn = paint_page(&ctx, quads, scheme, canvas)?;
            surface.finish();
            drawn
        }

    };

    info!(shapes = drawn, path = %path.display(), "wrote");

    Ok(())

}
