use crate::prelude::*;
use crate::{parse_node_list, ParseContext};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct TagG {
    pub items: Vec<Arc<Item>>,
    pub attrs: Attrs,
    pub id: Option<String>,
    pub label: Option<String>,
    pub source: Vec<Attribute>,
}
impl Tag for TagG {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
    fn children(&self) -> &[Arc<Item>] {
        &*self.items
    }
}
impl ParseNode for TagG {
    fn parse_node(node: &Node, ctx: &mut ParseContext) -> Result<TagG, ParseError> {
        let attrs = Attrs::parse(node)?;
        let items = parse_node_list(node.children(), ctx)?;
        let id = node.attribute("id").map(|s| s.into());
        Ok(TagG { items, attrs, id, label: label(node), source: source_attrs(node) })
    }
}

impl TagG {
    /// A group that only moves its content, labelled by `id`.
    pub fn translated(id: &str, dx: f64, dy: f64, items: Vec<Arc<Item>>) -> TagG {
        let attrs = Attrs { transform: Transform::translate(dx, dy), .. Attrs::default() };
        TagG {
            items,
            attrs,
            id: Some(id.into()),
            label: Some(id.into()),
            source: vec![
                Attribute::new("id", id),
                Attribute::new("transform", format!("translate({},{})", dx, dy)),
            ],
        }
    }

    /// Same group, different content.
    pub fn with_items(&self, items: Vec<Arc<Item>>) -> TagG {
        TagG { items, .. self.clone() }
    }
}
