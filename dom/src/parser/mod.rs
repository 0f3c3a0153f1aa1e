mod path_data;

pub use path_data::{path_data, PathCommand};

use nom::{
    character::complete::{alpha1, one_of},
    combinator::map,
    number::complete::recognize_float,
    IResult,
};
use crate::error::ParseError;
use crate::geometry::Transform;

type R<'i, T> = IResult<&'i str, T, ()>;

fn is_wsp(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

pub(crate) fn skip_wsp(i: &str) -> &str {
    i.trim_start_matches(is_wsp)
}

/// `wsp* ","? wsp*`
pub(crate) fn skip_comma_wsp(i: &str) -> &str {
    let i = skip_wsp(i);
    skip_wsp(i.strip_prefix(',').unwrap_or(i))
}

pub fn number(i: &str) -> R<f64> {
    let (rest, text) = recognize_float(i)?;
    match text.parse() {
        Ok(n) => Ok((rest, n)),
        Err(_) => Err(nom::Err::Error(())),
    }
}

#[test]
fn test_number() {
    assert_eq!(number("10-5"), Ok(("-5", 10.)));
    assert_eq!(number("-.5.5"), Ok((".5", -0.5)));
    assert_eq!(number("1e2,"), Ok((",", 100.)));
    assert!(number("x").is_err());
}

pub(crate) fn flag(i: &str) -> R<f64> {
    map(one_of("01"), |c| if c == '1' { 1.0 } else { 0.0 })(i)
}

/// `( number (comma-wsp number)* )`, whitespace allowed around the parentheses.
fn arguments(i: &str) -> Option<(&str, Vec<f64>)> {
    let mut i = skip_wsp(skip_wsp(i).strip_prefix('(')?);
    let mut args = Vec::with_capacity(6);
    if let Ok((rest, n)) = number(i) {
        args.push(n);
        i = rest;
        while let Ok((rest, n)) = number(skip_comma_wsp(i)) {
            args.push(n);
            i = rest;
        }
    }
    skip_wsp(i).strip_prefix(')').map(|rest| (rest, args))
}

fn transform_function(name: &str, args: &[f64]) -> Result<Transform, String> {
    Ok(match (name, args) {
        ("matrix", &[a, b, c, d, e, f]) => Transform::new(a, b, c, d, e, f),
        ("translate", &[tx]) => Transform::translate(tx, 0.),
        ("translate", &[tx, ty]) => Transform::translate(tx, ty),
        ("scale", &[s]) => Transform::scale(s, s),
        ("scale", &[sx, sy]) => Transform::scale(sx, sy),
        ("rotate", &[angle]) => Transform::rotate(angle),
        ("rotate", &[angle, cx, cy]) => Transform::rotate_about(angle, cx, cy),
        ("skewX", &[angle]) => Transform::skew_x(angle),
        ("skewY", &[angle]) => Transform::skew_y(angle),
        ("matrix", _) | ("translate", _) | ("scale", _) | ("rotate", _) | ("skewX", _) | ("skewY", _) =>
            return Err(format!("wrong number of arguments for {}(): {}", name, args.len())),
        _ => return Err(format!("unknown function {:?}", name)),
    })
}

/// Parses an SVG transform list, composing the functions in the order written.
pub fn transform_list(value: &str) -> Result<Transform, ParseError> {
    let err = |reason: String| ParseError::MalformedTransform { value: value.into(), reason };
    let mut transform = Transform::identity();
    let mut i = skip_wsp(value);
    while !i.is_empty() {
        let offset = value.len() - i.len();
        let (rest, name) = alpha1::<_, ()>(i)
            .map_err(|_| err(format!("expected a function name at offset {}", offset)))?;
        let (rest, args) = arguments(rest)
            .ok_or_else(|| err(format!("malformed arguments for {}() at offset {}", name, offset)))?;
        transform = transform.compose(&transform_function(name, &args).map_err(err)?);
        i = skip_comma_wsp(rest);
    }
    Ok(transform)
}
