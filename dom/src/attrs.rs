use crate::prelude::*;
use std::fmt;
use svgtypes::Color;

/// Presentation attributes of a single node. `None` means the node does not
/// set the property and it is inherited from the nearest ancestor that does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs {
    pub transform: Transform,
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub opacity: Option<f64>,
    pub fill_opacity: Option<f64>,
    pub stroke_opacity: Option<f64>,
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    None,
    CurrentColor,
    Color(Color),
    Ref(String),
}
impl Paint {
    pub fn black() -> Paint {
        Paint::Color(Color { red: 0, green: 0, blue: 0 })
    }
    pub fn is_none(&self) -> bool {
        matches!(*self, Paint::None)
    }
}
impl Parse for Option<Paint> {
    fn parse(s: &str) -> Result<Self, ParseError> {
        use svgtypes::Paint as SvgPaint;
        Ok(Some(match SvgPaint::from_str(s).map_err(|_| ParseError::attr("paint", s))? {
            SvgPaint::Inherit => return Ok(None),
            SvgPaint::None => Paint::None,
            SvgPaint::CurrentColor => Paint::CurrentColor,
            SvgPaint::Color(color) => Paint::Color(color),
            SvgPaint::FuncIRI(link, _) => Paint::Ref(link.to_owned()),
            #[allow(unreachable_patterns)]
            _ => return Err(ParseError::attr("paint", s)),
        }))
    }
}
impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Paint::None => write!(f, "none"),
            Paint::CurrentColor => write!(f, "currentColor"),
            Paint::Color(Color { red, green, blue }) => write!(f, "#{:02x}{:02x}{:02x}", red, green, blue),
            Paint::Ref(ref id) => write!(f, "url(#{})", id),
        }
    }
}

impl Attrs {
    pub fn parse(node: &Node) -> Result<Attrs, ParseError> {
        let style: Vec<(&str, &str)> = node.attribute("style").map(|s| style_list(s).collect()).unwrap_or_default();
        // presentation attributes take precedence over the style declaration
        let get = |name: &str| node.attribute(name)
            .or_else(|| style.iter().rev().find(|&&(k, _)| k == name).map(|&(_, v)| v));

        let transform = node.attribute("transform").map(transform_list).transpose()?.unwrap_or_default();
        let fill = get("fill").map(<Option<Paint>>::parse).transpose()?.flatten();
        let stroke = get("stroke").map(<Option<Paint>>::parse).transpose()?.flatten();
        let opacity = get("opacity").map(inherit(parse_opacity)).transpose()?.flatten();
        let fill_opacity = get("fill-opacity").map(inherit(parse_opacity)).transpose()?.flatten();
        let stroke_opacity = get("stroke-opacity").map(inherit(parse_opacity)).transpose()?.flatten();
        let stroke_width = get("stroke-width").map(inherit(user_length)).transpose()?.flatten();

        Ok(Attrs { transform, fill, stroke, opacity, fill_opacity, stroke_opacity, stroke_width })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn attrs(element: &str) -> Result<Attrs, ParseError> {
        let doc = Document::parse(element).unwrap();
        Attrs::parse(&doc.root_element())
    }

    #[test]
    fn presentation_attributes() {
        let a = attrs(r#"<path fill="red" stroke="none" opacity="0.5" stroke-width="2px"/>"#).unwrap();
        assert_eq!(a.fill, Some(Paint::Color(Color { red: 255, green: 0, blue: 0 })));
        assert_eq!(a.stroke, Some(Paint::None));
        assert_eq!(a.opacity, Some(0.5));
        assert_eq!(a.stroke_width, Some(2.0));
        assert_eq!(a.fill_opacity, None);
    }

    #[test]
    fn style_declarations() {
        let a = attrs(r#"<g style="fill:#00ff00; stroke : url(#grad) ;fill-opacity:2"/>"#).unwrap();
        assert_eq!(a.fill, Some(Paint::Color(Color { red: 0, green: 255, blue: 0 })));
        assert_eq!(a.stroke, Some(Paint::Ref("grad".into())));
        assert_eq!(a.fill_opacity, Some(1.0));
    }

    #[test]
    fn attribute_wins_over_style() {
        let a = attrs(r#"<g fill="blue" style="fill:red"/>"#).unwrap();
        assert_eq!(a.fill.unwrap().to_string(), "#0000ff");
    }

    #[test]
    fn inherit_is_unset() {
        let a = attrs(r#"<g fill="inherit" opacity="inherit"/>"#).unwrap();
        assert_eq!(a, Attrs::default());
    }

    #[test]
    fn transform_attribute() {
        let a = attrs(r#"<g transform="translate(5 6)"/>"#).unwrap();
        assert_eq!(a.transform, Transform::translate(5., 6.));
        assert!(matches!(attrs(r#"<g transform="spin(5)"/>"#), Err(ParseError::MalformedTransform { .. })));
    }

    #[test]
    fn bad_values() {
        assert!(matches!(attrs(r#"<g opacity="lots"/>"#), Err(ParseError::InvalidAttributeValue { .. })));
    }
}
