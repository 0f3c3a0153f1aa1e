#[macro_use] extern crate log;
use std::sync::Arc;
use roxmltree::NodeType;

pub mod prelude {
    pub use crate::{
        Item, Tag, ParseNode, ParseContext,
        attrs::*,
        error::*,
        g::*,
        geometry::*,
        parser::transform_list,
        path::*,
        svg::*,
        util::*,
        write::*,
    };
    pub use roxmltree::Node;
    pub use std::str::FromStr;

    use std::collections::HashMap;
    use std::sync::Arc;
    pub type ItemCollection = HashMap<String, Arc<Item>>;
}

#[macro_use]
mod util;
mod attrs;
mod error;
mod g;
mod geometry;
pub mod parser;
mod path;
mod svg;
mod write;

pub use prelude::*;

macro_rules! items {
    ($(#[$meta:meta])* pub enum $name:ident { $($($e:literal)|* => $variant:ident($data:ty), )* }) => {
        $( #[$meta] )*
        pub enum $name {
            $( $variant($data), )*
        }
        impl Tag for $name {
            fn id(&self) -> Option<&str> {
                match *self {
                    $( $name::$variant ( ref tag ) => tag.id(), )*
                }
            }
            fn children(&self) -> &[Arc<Item>] {
                match *self {
                    $( $name::$variant ( ref tag ) => tag.children(), )*
                }
            }
        }
        fn parse_graphic(node: &Node, ctx: &mut ParseContext) -> Result<Option<Item>, ParseError> {
            let item = match node.tag_name().name() {
                $( $($e )|* => Item::$variant(<$data>::parse_node(node, ctx)?), )*
                _ => return Ok(None)
            };
            Ok(Some(item))
        }
    };
}

items!(
    #[derive(Debug, Clone)]
    pub enum Item {
        "path" => Path(TagPath),
        "g" => G(TagG),
    }
);

pub trait ParseNode: Sized {
    fn parse_node(node: &Node, ctx: &mut ParseContext) -> Result<Self, ParseError>;
}

pub trait Tag: std::fmt::Debug {
    fn id(&self) -> Option<&str> { None }
    fn children(&self) -> &[Arc<Item>] { &[] }
}

/// State shared by all nodes while one document is parsed.
pub struct ParseContext<'a> {
    options: &'a ParseOptions,
    text: &'a str,
    skipped: Vec<String>,
    opaque: Vec<String>,
}
impl<'a> ParseContext<'a> {
    fn new(options: &'a ParseOptions, text: &'a str) -> Self {
        ParseContext { options, text, skipped: Vec::new(), opaque: Vec::new() }
    }
    fn unsupported(&mut self, tag: &str) -> Result<(), ParseError> {
        match self.options.unsupported {
            UnsupportedPolicy::Fail => Err(ParseError::UnsupportedElement(tag.into())),
            UnsupportedPolicy::Skip => {
                warn!("skipping unsupported element <{}>", tag);
                self.skipped.push(tag.into());
                Ok(())
            }
        }
    }
    fn keep_opaque(&mut self, node: &Node) {
        if let Some(markup) = self.text.get(node.range()) {
            self.opaque.push(markup.to_owned());
        }
    }
}

fn parse_node(node: &Node, ctx: &mut ParseContext) -> Result<Option<Item>, ParseError> {
    if !is_svg_element(node) {
        debug!("ignoring foreign element {:?}", node.tag_name());
        return Ok(None);
    }
    if let Some(item) = parse_graphic(node, ctx)? {
        return Ok(Some(item));
    }
    match node.tag_name().name() {
        "defs" | "style" => ctx.keep_opaque(node),
        "title" | "desc" | "metadata" => debug!("ignoring <{}>", node.tag_name().name()),
        tag => ctx.unsupported(tag)?,
    }
    Ok(None)
}

fn link(ids: &mut ItemCollection, item: &Arc<Item>) {
    if let Some(id) = item.id() {
        ids.entry(id.into()).or_insert_with(|| item.clone());
    }
    for child in item.children() {
        link(ids, child);
    }
}

fn parse_node_list<'a, 'i: 'a>(nodes: impl Iterator<Item=Node<'a, 'i>>, ctx: &mut ParseContext) -> Result<Vec<Arc<Item>>, ParseError> {
    let mut items = Vec::new();
    for node in nodes {
        match node.node_type() {
            NodeType::Element => {
                if let Some(item) = parse_node(&node, ctx)? {
                    items.push(Arc::new(item));
                }
            }
            _ => {}
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAWING: &str = r#"
        <svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
            <title>t</title>
            <defs><linearGradient id="lg"/></defs>
            <g id="outer"><path id="p1" d="M0 0 L1 1"/><g id="inner"><path id="p2" d="M2 2"/></g></g>
            <rect width="5" height="5"/>
        </svg>"#;

    #[test]
    fn skip_policy_records_diagnostics() {
        let doc = Document::parse(DRAWING).unwrap();
        assert_eq!(doc.skipped(), ["rect"]);
        assert_eq!(doc.root.items.len(), 1);
        assert_eq!(doc.opaque.len(), 1);
        assert!(doc.opaque[0].starts_with("<defs>"));
        assert!(doc.get_item("p2").is_some());
        assert!(matches!(**doc.get_item("inner").unwrap(), Item::G(_)));
    }

    #[test]
    fn fail_policy_rejects_unsupported() {
        let options = ParseOptions { unsupported: UnsupportedPolicy::Fail };
        match Document::parse_with(DRAWING, &options) {
            Err(ParseError::UnsupportedElement(tag)) => assert_eq!(tag, "rect"),
            r => panic!("expected UnsupportedElement, got {:?}", r),
        }
    }

    #[test]
    fn document_order_is_kept() {
        let doc = Document::parse(DRAWING).unwrap();
        let outer = doc.get_item("outer").unwrap();
        let ids: Vec<_> = outer.children().iter().map(|c| c.id().unwrap()).collect();
        assert_eq!(ids, ["p1", "inner"]);
    }
}
