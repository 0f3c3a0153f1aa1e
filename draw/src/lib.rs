#[macro_use] extern crate log;

mod prelude {
    pub use svg_dom::prelude::*;
    pub use crate::{
        resolve::{Style, ResolveOptions, ResolvedPath},
        info::Info,
        render::{Target, Frame, PathPaint, Rgba, Backend},
    };
}

mod resolve;
mod info;
mod render;

pub use prelude::*;
pub use resolve::{resolve, resolve_with, document_bounds, document_bounds_with};
pub use render::render;
