use crate::error::ParseError;
use crate::geometry::Rect;
use svgtypes::{Length, LengthUnit, LengthListParser};
use std::str::FromStr;
use roxmltree::Node;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

#[cfg(feature="profile")]
#[macro_export]
macro_rules! timed {
    ($label:expr, { $($t:tt)* }) => (
        let t0 = ::std::time::Instant::now();
        $($t)*
        info!("{}: {:?}", $label, t0.elapsed());
    )
}

#[cfg(not(feature="profile"))]
#[macro_export]
macro_rules! timed {
    ($label:expr, { $($t:tt)* }) => (
        $($t)*
    )
}

pub trait Parse: Sized {
    fn parse(s: &str) -> Result<Self, ParseError>;
}

impl Parse for f64 {
    fn parse(s: &str) -> Result<Self, ParseError> {
        f64::from_str(s.trim()).map_err(|_| ParseError::attr("number", s))
    }
}

pub fn inherit<T>(f: impl Fn(&str) -> Result<T, ParseError>) -> impl Fn(&str) -> Result<Option<T>, ParseError> {
    move |s: &str| match s.trim() {
        "inherit" => Ok(None),
        s => Ok(Some(f(s)?))
    }
}

pub fn parse_opacity(s: &str) -> Result<f64, ParseError> {
    let val = f64::parse(s).map_err(|_| ParseError::attr("opacity", s))?;
    Ok(val.min(1.0).max(0.0))
}

/// Length in user units. Units are not converted, `2mm` is `2`.
pub fn user_length(s: &str) -> Result<f64, ParseError> {
    Length::from_str(s).map(|l| l.num).map_err(|_| ParseError::attr("length", s))
}

/// Like `user_length`, but percentages have no absolute value.
pub fn canvas_length(s: &str) -> Result<Option<f64>, ParseError> {
    let l = Length::from_str(s).map_err(|_| ParseError::attr("length", s))?;
    Ok(match l.unit {
        LengthUnit::Percent => None,
        _ => Some(l.num),
    })
}

pub fn parse_view_box(s: &str) -> Result<Rect, ParseError> {
    let mut p = LengthListParser::from(s);
    let mut next = || -> Result<f64, ParseError> {
        match p.next() {
            Some(Ok(l)) => Ok(l.num),
            _ => Err(ParseError::attr("viewBox", s)),
        }
    };
    let (x, y, w, h) = (next()?, next()?, next()?, next()?);
    if w < 0. || h < 0. {
        return Err(ParseError::attr("viewBox", s));
    }
    Ok(Rect::from_origin_size(x, y, w, h))
}

fn pair<I: Iterator>(mut iter: I) -> Option<(I::Item, I::Item)> {
    match (iter.next(), iter.next()) {
        (Some(a), Some(b)) => Some((a, b)),
        _ => None
    }
}

pub fn style_list(s: &str) -> impl Iterator<Item=(&str, &str)> + '_ {
    s.split(';').flat_map(|s| pair(s.splitn(2, ':'))).map(|(a, b)| (a.trim(), b.trim()))
}

/// An attribute as written in the source, with its namespace prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}
impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Attribute {
        Attribute { name: name.into(), value: value.into() }
    }
}

pub fn qualified_name(node: &Node, namespace: Option<&str>, local: &str) -> String {
    match namespace {
        None => local.to_owned(),
        Some(XML_NS) => format!("xml:{}", local),
        Some(uri) => match node.lookup_prefix(uri) {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
            _ => local.to_owned(),
        }
    }
}

pub fn source_attrs(node: &Node) -> Vec<Attribute> {
    node.attributes()
        .map(|a| Attribute::new(qualified_name(node, a.namespace(), a.name()), a.value()))
        .collect()
}

/// `inkscape:label` if present, otherwise the id.
pub fn label(node: &Node) -> Option<String> {
    node.attribute((INKSCAPE_NS, "label"))
        .or_else(|| node.attribute("id"))
        .map(|s| s.to_owned())
}

pub fn is_svg_element(node: &Node) -> bool {
    node.is_element() && matches!(node.tag_name().namespace(), None | Some(SVG_NS))
}
