use super::{number, flag, skip_wsp, skip_comma_wsp};
use crate::error::ParseError;

/// One path command with its arguments, as written. Implicitly repeated
/// commands are expanded, so `M0 0 10 10` yields a `M` and an `L`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub command: char,
    pub offset: usize,
    pub args: Vec<f64>,
}

impl PathCommand {
    pub fn is_absolute(&self) -> bool {
        self.command.is_ascii_uppercase()
    }
}

fn arity(command: char) -> Option<usize> {
    Some(match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'S' | 'Q' => 4,
        'C' => 6,
        'A' => 7,
        'Z' => 0,
        _ => return None,
    })
}

// coordinates following a moveto are implicit linetos
fn repeated(command: char) -> char {
    match command {
        'M' => 'L',
        'm' => 'l',
        c => c,
    }
}

fn arguments(command: char, count: usize, mut i: &str) -> Result<(&str, Vec<f64>), &str> {
    let mut args = Vec::with_capacity(count);
    for n in 0 .. count {
        if n > 0 {
            i = skip_comma_wsp(i);
        }
        let is_flag = command.to_ascii_uppercase() == 'A' && (n == 3 || n == 4);
        let (rest, value) = (if is_flag { flag(i) } else { number(i) }).map_err(|_| i)?;
        args.push(value);
        i = rest;
    }
    Ok((i, args))
}

pub fn path_data(d: &str) -> Result<Vec<PathCommand>, ParseError> {
    let offset = |i: &str| d.len() - i.len();
    let mut commands: Vec<PathCommand> = Vec::new();
    let mut i = skip_wsp(d);

    while let Some(c) = i.chars().next() {
        let at = offset(i);
        let (command, count) = match arity(c) {
            Some(count) => {
                i = skip_wsp(&i[c.len_utf8() ..]);
                (c, count)
            }
            None => match commands.last().map(|last| repeated(last.command)) {
                Some(prev) if !matches!(prev, 'Z' | 'z') && (c.is_ascii_digit() || matches!(c, '+' | '-' | '.')) =>
                    (prev, arity(prev).unwrap_or(0)),
                prev => {
                    let command = if c.is_ascii_alphabetic() { c } else { prev.unwrap_or(c) };
                    return Err(ParseError::MalformedPathData { command, offset: at });
                }
            }
        };
        if commands.is_empty() && !matches!(command, 'M' | 'm') {
            return Err(ParseError::MalformedPathData { command, offset: at });
        }
        let (rest, args) = arguments(command, count, i)
            .map_err(|rest| ParseError::MalformedPathData { command, offset: offset(rest) })?;
        commands.push(PathCommand { command, offset: at, args });
        i = skip_comma_wsp(rest);
    }
    Ok(commands)
}
