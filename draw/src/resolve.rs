use crate::prelude::*;
use itertools::Itertools;
use std::fmt;
use std::sync::Arc;

/// Effective style of a path after inheritance.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: Paint,
    pub stroke: Paint,
    pub opacity: f64,
    pub fill_opacity: f64,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
}
impl Default for Style {
    fn default() -> Self {
        Style {
            fill: Paint::black(),
            stroke: Paint::None,
            opacity: 1.0,
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
            stroke_width: 1.0,
        }
    }
}
impl Style {
    /// The style of a child node: whatever `attrs` sets, inherited otherwise.
    pub fn apply(&self, attrs: &Attrs) -> Style {
        let new = Style {
            fill: attrs.fill.clone().unwrap_or_else(|| self.fill.clone()),
            stroke: attrs.stroke.clone().unwrap_or_else(|| self.stroke.clone()),
            opacity: attrs.opacity.unwrap_or(self.opacity),
            fill_opacity: attrs.fill_opacity.unwrap_or(self.fill_opacity),
            stroke_opacity: attrs.stroke_opacity.unwrap_or(self.stroke_opacity),
            stroke_width: attrs.stroke_width.unwrap_or(self.stroke_width),
        };
        trace!("fill {:?} + {:?} -> {:?}", self.fill, attrs.fill, new.fill);
        trace!("stroke {:?} + {:?} -> {:?}", self.stroke, attrs.stroke, new.stroke);
        new
    }
    pub fn fill_alpha(&self) -> f64 {
        self.fill_opacity * self.opacity
    }
    pub fn stroke_alpha(&self) -> f64 {
        self.stroke_opacity * self.opacity
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// style of the document before the root sets anything
    pub default_style: Style,
}

/// A path with everything its ancestors contribute.
#[derive(Debug, Clone)]
pub struct ResolvedPath<'a> {
    /// position in document order, starting at 1
    pub index: usize,
    pub id: Option<&'a str>,
    pub path: &'a TagPath,
    /// labels of the enclosing groups, outermost first
    pub group_trail: Vec<&'a str>,
    pub transform: Transform,
    pub style: Style,
    /// world space
    pub bounds: BoundingBox,
}

impl<'a> fmt::Display for ResolvedPath<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let groups = if self.group_trail.is_empty() {
            "(root)".to_owned()
        } else {
            self.group_trail.iter().join(" > ")
        };
        write!(f, "[{}] id={}, groups={}, fill={}, stroke={}, stroke_width={}, opacity=(fill:{}, stroke:{}), transform={}, bbox={}",
            self.index,
            self.id.unwrap_or("(no id)"),
            groups,
            self.style.fill,
            self.style.stroke,
            self.style.stroke_width,
            self.style.fill_alpha(),
            self.style.stroke_alpha(),
            self.transform,
            self.bounds,
        )
    }
}

struct Walk<'a> {
    trail: Vec<&'a str>,
    out: Vec<ResolvedPath<'a>>,
}

impl<'a> Walk<'a> {
    fn items(&mut self, items: &'a [Arc<Item>], transform: &Transform, style: &Style) {
        for item in items {
            match &**item {
                Item::Path(path) => self.path(path, transform, style),
                Item::G(g) => {
                    let transform = transform.compose(&g.attrs.transform);
                    let style = style.apply(&g.attrs);
                    let label = g.label.as_deref();
                    if let Some(label) = label {
                        self.trail.push(label);
                    }
                    self.items(&g.items, &transform, &style);
                    if label.is_some() {
                        self.trail.pop();
                    }
                }
            }
        }
    }

    fn path(&mut self, path: &'a TagPath, transform: &Transform, style: &Style) {
        let transform = transform.compose(&path.attrs.transform);
        let resolved = ResolvedPath {
            index: self.out.len() + 1,
            id: path.id(),
            path,
            group_trail: self.trail.clone(),
            transform,
            style: style.apply(&path.attrs),
            bounds: path.bounds().map(&transform),
        };
        trace!("{}", resolved);
        self.out.push(resolved);
    }
}

pub fn resolve(doc: &Document) -> Vec<ResolvedPath> {
    resolve_with(doc, &ResolveOptions::default())
}

/// All paths of the document in painter's order.
pub fn resolve_with<'a>(doc: &'a Document, options: &ResolveOptions) -> Vec<ResolvedPath<'a>> {
    let root = &doc.root;
    let mut walk = Walk { trail: Vec::new(), out: Vec::new() };
    walk.items(&root.items, &root.attrs.transform, &options.default_style.apply(&root.attrs));
    debug!("resolved {} paths", walk.out.len());
    walk.out
}

pub fn document_bounds(doc: &Document) -> BoundingBox {
    document_bounds_with(doc, &ResolveOptions::default())
}

/// Union of the world space bounds of all paths, `Empty` if there are none.
pub fn document_bounds_with(doc: &Document, options: &ResolveOptions) -> BoundingBox {
    resolve_with(doc, options).iter().map(|p| p.bounds).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> Document {
        let text = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" width="100" height="100">{}</svg>"#,
            content);
        Document::parse(&text).unwrap()
    }

    fn bounds(b: BoundingBox) -> (f64, f64, f64, f64) {
        let r = b.rect().unwrap();
        (r.min_x, r.min_y, r.max_x, r.max_y)
    }

    #[test]
    fn nested_transforms_compose_outside_in() {
        let d = doc(r#"<g transform="translate(10,20)"><g transform="scale(2)">
            <path d="M0 0 L1 0" transform="rotate(90)"/></g></g>"#);
        let paths = resolve(&d);
        assert_eq!(paths.len(), 1);
        let p = &paths[0];
        assert_eq!(p.transform, Transform::translate(10., 20.) * Transform::scale(2., 2.) * Transform::rotate(90.));
        assert_eq!(p.transform.apply(vec(1., 0.)), vec(10., 22.));
        assert_eq!(bounds(p.bounds), (10., 20., 10., 22.));
    }

    #[test]
    fn style_nearest_ancestor_wins() {
        let d = doc(r##"<g stroke="blue" opacity="0.5" style="stroke-width:3">
            <path id="a" fill="none" d="M0 0"/>
            <g fill="#00ff00"><path id="b" d="M0 0"/></g>
            <path id="c" stroke="inherit" d="M0 0"/>
        </g><path id="d" d="M0 0"/>"##);
        let paths = resolve(&d);
        let ids: Vec<_> = paths.iter().map(|p| p.id.unwrap()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);

        assert!(paths[0].style.fill.is_none());
        assert_eq!(paths[0].style.stroke.to_string(), "#0000ff");
        assert_eq!(paths[0].style.stroke_width, 3.);
        assert_eq!(paths[1].style.fill.to_string(), "#00ff00");
        assert_eq!(paths[1].style.fill_alpha(), 0.5);
        assert_eq!(paths[2].style.stroke.to_string(), "#0000ff");
        assert_eq!(paths[2].style.fill, Paint::black());
        // outside the group only the defaults apply
        assert_eq!(paths[3].style, Style::default());
    }

    #[test]
    fn custom_default_style() {
        let d = doc(r#"<path d="M0 0"/>"#);
        let options = ResolveOptions { default_style: Style { fill: Paint::None, .. Style::default() } };
        assert!(resolve_with(&d, &options)[0].style.fill.is_none());
    }

    #[test]
    fn group_trail() {
        let d = doc(r#"<g id="layer1" inkscape:label="Layer 1"><g><g id="inner">
            <path d="M0 0"/></g></g></g><path d="M1 1"/>"#);
        let paths = resolve(&d);
        assert_eq!(paths[0].group_trail, ["Layer 1", "inner"]);
        assert!(paths[1].group_trail.is_empty());
        assert_eq!(paths[1].index, 2);
    }

    #[test]
    fn report_line() {
        let d = doc(r#"<g id="g1" transform="translate(5,0)"><path id="p" d="M0 0 L10 20" stroke="red" fill-opacity="0.25"/></g><path d="M0 0"/>"#);
        let lines: Vec<_> = resolve(&d).iter().map(|p| p.to_string()).collect();
        assert_eq!(lines[0], "[1] id=p, groups=g1, fill=#000000, stroke=#ff0000, stroke_width=1, \
            opacity=(fill:0.25, stroke:1), transform=matrix(1,0,0,1,5,0), bbox=(5.00,0.00)-(15.00,20.00)");
        assert!(lines[1].starts_with("[2] id=(no id), groups=(root), fill=#000000, stroke=none"));
    }

    #[test]
    fn document_bounds_fold() {
        let d = doc(r#"<path d="M0 0 L10 10"/><g transform="translate(50,50)"><path d="M0 0 L5 5"/></g>"#);
        assert_eq!(bounds(document_bounds(&d)), (0., 0., 55., 55.));
        assert_eq!(document_bounds(&doc("")), BoundingBox::Empty);
        assert_eq!(document_bounds(&doc("<g><g/></g>")), BoundingBox::Empty);
    }

    #[test]
    fn resolving_does_not_change_the_document() {
        let d = doc(r#"<g transform="scale(3)"><path d="M0 0 L1 1"/></g>"#);
        let first: Vec<_> = resolve(&d).iter().map(|p| p.to_string()).collect();
        let second: Vec<_> = resolve(&d).iter().map(|p| p.to_string()).collect();
        assert_eq!(first, second);
    }
}
