use crate::prelude::*;
use crate::resolve::{resolve, document_bounds};
use std::path::PathBuf;

/// Where a rendering backend sends its output.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Window,
    File(PathBuf),
}

/// The part of the plane a backend shows, in document units.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub view: Rect,
    /// always the viewBox size, so exports keep the canvas dimensions
    pub size_hint: (f64, f64),
    /// maps document coordinates (y down) into y up coordinates within `view`
    pub flip: Transform,
}

impl Frame {
    pub fn new(doc: &Document, target: &Target) -> Frame {
        let view_box = doc.canvas.view_box;
        let view = match (target, document_bounds(doc)) {
            (Target::File(_), _) | (Target::Window, BoundingBox::Empty) => view_box,
            (Target::Window, BoundingBox::Bounds(r)) => {
                let pad = |extent: f64| if extent == 0.0 { 1.0 } else { extent * 0.05 };
                r.pad(pad(r.width()), pad(r.height()))
            }
        };
        Frame {
            view,
            size_hint: (view_box.width(), view_box.height()),
            flip: Transform::new(1., 0., 0., -1., 0., view.min_y + view.max_y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}
impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { red: 0, green: 0, blue: 0, alpha: 0.0 };

    fn from_paint(paint: &Paint, alpha: f64) -> Option<Rgba> {
        match *paint {
            Paint::None => None,
            Paint::Color(ref c) => Some(Rgba { red: c.red, green: c.green, blue: c.blue, alpha }),
            // no `color` property, so the current color is the initial one
            Paint::CurrentColor => Some(Rgba { alpha, .. Rgba::TRANSPARENT }),
            Paint::Ref(ref id) => {
                warn!("paint server #{} is not supported", id);
                None
            }
        }
    }
}

/// What a backend needs to know to paint one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPaint {
    pub fill: Rgba,
    pub stroke: Option<Rgba>,
    pub line_width: f64,
}
impl PathPaint {
    pub fn new(style: &Style) -> PathPaint {
        let fill = Rgba::from_paint(&style.fill, style.fill_alpha()).unwrap_or(Rgba::TRANSPARENT);
        let stroke = Rgba::from_paint(&style.stroke, style.stroke_alpha());
        let line_width = if stroke.is_some() { style.stroke_width } else { 0.0 };
        PathPaint { fill, stroke, line_width }
    }
}

/// A plotting or raster backend.
pub trait Backend {
    type Error;

    fn begin(&mut self, frame: &Frame) -> Result<(), Self::Error>;
    /// `transform` maps the path's own coordinates into the frame
    fn draw_path(&mut self, path: &TagPath, transform: &Transform, paint: &PathPaint) -> Result<(), Self::Error>;
    fn finish(&mut self, target: &Target) -> Result<(), Self::Error>;
}

/// Hands every path to the backend in painter's order.
pub fn render<B: Backend>(doc: &Document, backend: &mut B, target: &Target) -> Result<(), B::Error> {
    let frame = Frame::new(doc, target);
    debug!("render view {:?} size {:?}", frame.view, frame.size_hint);
    backend.begin(&frame)?;
    for path in resolve(doc) {
        let transform = frame.flip.compose(&path.transform);
        backend.draw_path(path.path, &transform, &PathPaint::new(&path.style))?;
    }
    backend.finish(target)
}
