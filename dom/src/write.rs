use crate::prelude::*;
use std::fmt::Write;

fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {}=\"{}\"", name, xml_escape(value));
}

fn write_attrs(out: &mut String, attrs: &[Attribute]) {
    for a in attrs {
        write_attr(out, &a.name, &a.value);
    }
}

// keep the written form (units and all) as long as it still says the same
fn dimension(written: Option<&str>, value: f64) -> String {
    match written {
        Some(s) if canvas_length(s).ok().flatten() == Some(value) => s.to_owned(),
        _ => value.to_string(),
    }
}

fn write_svg_start(out: &mut String, doc: &Document) {
    let canvas = &doc.canvas;
    out.push_str("<svg");
    if !doc.namespaces.iter().any(|ns| ns.prefix.is_none()) {
        write_attr(out, "xmlns", SVG_NS);
    }
    for ns in &doc.namespaces {
        match ns.prefix {
            Some(ref prefix) => write_attr(out, &format!("xmlns:{}", prefix), &ns.uri),
            None => write_attr(out, "xmlns", &ns.uri),
        }
    }
    write_attr(out, "width", &dimension(canvas.width_attr.as_deref(), canvas.width));
    write_attr(out, "height", &dimension(canvas.height_attr.as_deref(), canvas.height));
    let vb = &canvas.view_box;
    let had_view_box = doc.root_attrs.iter().any(|a| a.name == "viewBox");
    if had_view_box || *vb != Rect::from_origin_size(0., 0., canvas.width, canvas.height) {
        write_attr(out, "viewBox", &format!("{} {} {} {}", vb.min_x, vb.min_y, vb.width(), vb.height()));
    }
    let rest: Vec<_> = doc.root_attrs.iter()
        .filter(|a| !matches!(a.name.as_str(), "width" | "height" | "viewBox"))
        .cloned()
        .collect();
    write_attrs(out, &rest);
    write_attrs(out, &doc.root.source);
    out.push_str(">\n");
}

fn write_item(out: &mut String, item: &Item, depth: usize) {
    let indent = "  ".repeat(depth);
    match *item {
        Item::Path(ref path) => {
            out.push_str(&indent);
            out.push_str("<path");
            write_attrs(out, &path.source);
            out.push_str("/>\n");
        }
        Item::G(ref g) => {
            out.push_str(&indent);
            out.push_str("<g");
            write_attrs(out, &g.source);
            if g.items.is_empty() {
                out.push_str("/>\n");
                return;
            }
            out.push_str(">\n");
            for child in &g.items {
                write_item(out, child, depth + 1);
            }
            let _ = writeln!(out, "{}</g>", indent);
        }
    }
}

/// Serializes the document. Nodes are written in document order with the
/// attributes they were parsed from.
pub fn write_document(doc: &Document) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_svg_start(&mut out, doc);
    for markup in &doc.opaque {
        let _ = writeln!(out, "  {}", markup);
    }
    for item in &doc.root.items {
        write_item(&mut out, item, 1);
    }
    out.push_str("</svg>\n");
    out
}
