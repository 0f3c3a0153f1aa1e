use crate::prelude::*;
use crate::{parse_node_list, link, ParseContext};
use std::sync::Arc;

/// What to do with graphic elements other than `<g>` and `<path>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// drop the element, log a warning and record it in `Document::skipped`
    Skip,
    /// fail with `ParseError::UnsupportedElement`
    Fail,
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub unsupported: UnsupportedPolicy,
}
impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { unsupported: UnsupportedPolicy::Skip }
    }
}

/// Declared size of the drawing, independent of its content.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub view_box: Rect,
    /// width and height as written, if they were
    pub width_attr: Option<String>,
    pub height_attr: Option<String>,
}
impl Canvas {
    pub fn new(width: f64, height: f64) -> Canvas {
        Canvas {
            width,
            height,
            view_box: Rect::from_origin_size(0., 0., width, height),
            width_attr: None,
            height_attr: None,
        }
    }

    fn parse(node: &Node) -> Result<Canvas, ParseError> {
        let width_attr = node.attribute("width");
        let height_attr = node.attribute("height");
        let view_box = node.attribute("viewBox").map(parse_view_box).transpose()?;

        let width = width_attr.map(canvas_length).transpose()?.flatten().or(view_box.map(|r| r.width()));
        let height = height_attr.map(canvas_length).transpose()?.flatten().or(view_box.map(|r| r.height()));
        let (width, height) = match (width, height) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(ParseError::MissingCanvasSize),
        };
        Ok(Canvas {
            width,
            height,
            view_box: view_box.unwrap_or_else(|| Rect::from_origin_size(0., 0., width, height)),
            width_attr: width_attr.map(|s| s.into()),
            height_attr: height_attr.map(|s| s.into()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    pub prefix: Option<String>,
    pub uri: String,
}

// attributes that only make sense on the outermost <svg>
const CANVAS_ATTRS: &[&str] = &[
    "width", "height", "viewBox", "x", "y", "id", "version", "baseProfile",
    "preserveAspectRatio", "zoomAndPan", "contentScriptType", "contentStyleType",
];

fn is_document_attr(a: &Attribute) -> bool {
    CANVAS_ATTRS.contains(&a.name.as_str()) || (a.name.contains(':') && !a.name.starts_with("xml:"))
}

#[derive(Debug, Clone)]
pub struct Document {
    /// the outermost <svg> as a group: its presentation attributes and children
    pub root: TagG,
    pub canvas: Canvas,
    pub namespaces: Vec<Namespace>,
    /// attributes of <svg> that belong to the document rather than the content
    pub root_attrs: Vec<Attribute>,
    /// `<defs>` and `<style>` markup as written
    pub opaque: Vec<String>,
    skipped: Vec<String>,
    named_items: ItemCollection,
}

impl Document {
    pub fn parse(text: &str) -> Result<Document, ParseError> {
        Self::parse_with(text, &ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Document, ParseError> {
        let xml_options = roxmltree::ParsingOptions { allow_dtd: true, ..Default::default() };
        timed!("parse xml", {
            let xml = roxmltree::Document::parse_with_options(text, xml_options)?;
        });
        let node = xml.root_element();
        if !(is_svg_element(&node) && node.has_tag_name("svg")) {
            return Err(ParseError::NotSvg);
        }

        let canvas = Canvas::parse(&node)?;
        let namespaces = node.namespaces()
            .filter(|ns| ns.name() != Some("xml"))
            .map(|ns| Namespace { prefix: ns.name().map(|s| s.into()), uri: ns.uri().into() })
            .collect();
        let (root_attrs, source): (Vec<_>, Vec<_>) = source_attrs(&node).into_iter().partition(is_document_attr);

        let mut ctx = ParseContext::new(options, text);
        timed!("build document", {
            let items = parse_node_list(node.children(), &mut ctx)?;
        });
        let root = TagG { items, attrs: Attrs::parse(&node)?, id: None, label: None, source };
        debug!("parsed {} top level items, skipped {}", root.items.len(), ctx.skipped.len());

        let mut doc = Document {
            root,
            canvas,
            namespaces,
            root_attrs,
            opaque: ctx.opaque,
            skipped: ctx.skipped,
            named_items: ItemCollection::new(),
        };
        doc.relink();
        Ok(doc)
    }

    /// Accepts plain or gzip compressed (svgz) data.
    pub fn from_data(data: &[u8]) -> Result<Document, ParseError> {
        Self::from_data_with(data, &ParseOptions::default())
    }

    pub fn from_data_with(data: &[u8], options: &ParseOptions) -> Result<Document, ParseError> {
        #[cfg(feature="svgz")]
        {
            if data.starts_with(&[0x1f, 0x8b]) {
                use std::io::Read;
                timed!("inflate", {
                    let mut decoder = libflate::gzip::Decoder::new(data)?;
                    let mut decoded_data = Vec::new();
                    decoder.read_to_end(&mut decoded_data)?;
                });
                return Self::parse_with(std::str::from_utf8(&decoded_data)?, options);
            }
        }
        Self::parse_with(std::str::from_utf8(data)?, options)
    }

    /// A new document with this one's namespaces, document attributes and
    /// opaque markup, but different content and size.
    pub fn with_content(&self, root: TagG, canvas: Canvas) -> Document {
        let mut doc = Document {
            root,
            canvas,
            namespaces: self.namespaces.clone(),
            root_attrs: self.root_attrs.clone(),
            opaque: self.opaque.clone(),
            skipped: Vec::new(),
            named_items: ItemCollection::new(),
        };
        doc.relink();
        doc
    }

    fn relink(&mut self) {
        let mut named_items = ItemCollection::new();
        for item in &self.root.items {
            link(&mut named_items, item);
        }
        self.named_items = named_items;
    }

    /// The item with this id, the first in document order if the id repeats.
    pub fn get_item(&self, id: &str) -> Option<&Arc<Item>> {
        self.named_items.get(id)
    }

    /// Tag names of unsupported elements that were dropped while parsing.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}
