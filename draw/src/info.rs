use crate::prelude::*;
use crate::resolve::resolve;
use itertools::Itertools;
use std::fmt;

/// Summary of a document's declared size and content.
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    /// width and height as written
    pub width_attr: Option<String>,
    pub height_attr: Option<String>,
    /// absolute width and height, without the viewBox fallback
    pub parsed_width: Option<f64>,
    pub parsed_height: Option<f64>,
    pub view_box: Rect,
    pub paths: usize,
    /// distinct group labels
    pub groups: usize,
    /// distinct path ids
    pub ids: usize,
}

impl Info {
    pub fn collect(doc: &Document) -> Info {
        let paths = resolve(doc);
        let canvas = &doc.canvas;
        let parsed = |attr: &Option<String>| attr.as_deref().and_then(|s| canvas_length(s).ok().flatten());
        Info {
            width_attr: canvas.width_attr.clone(),
            height_attr: canvas.height_attr.clone(),
            parsed_width: parsed(&canvas.width_attr),
            parsed_height: parsed(&canvas.height_attr),
            view_box: canvas.view_box,
            paths: paths.len(),
            groups: paths.iter().flat_map(|p| p.group_trail.iter()).unique().count(),
            ids: paths.iter().filter_map(|p| p.id).unique().count(),
        }
    }
}

struct Opt<'a, T>(&'a Option<T>, &'static str);
impl<'a, T: fmt::Display> fmt::Display for Opt<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(v) => fmt::Display::fmt(v, f),
            None => f.write_str(self.1),
        }
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let vb = &self.view_box;
        writeln!(f, "Size attrs: width={}, height={} (parsed: {} x {})",
            Opt(&self.width_attr, "(unset)"), Opt(&self.height_attr, "(unset)"),
            Opt(&self.parsed_width, "-"), Opt(&self.parsed_height, "-"))?;
        writeln!(f, "ViewBox: {} {} {} {}", vb.min_x, vb.min_y, vb.width(), vb.height())?;
        writeln!(f, "Paths: {}", self.paths)?;
        write!(f, "Groups: {}", self.groups)?;
        if self.ids > 0 {
            write!(f, "\nIDs: {} unique", self.ids)?;
        }
        Ok(())
    }
}
