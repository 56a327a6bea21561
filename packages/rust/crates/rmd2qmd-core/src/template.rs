//! Backslash replacement templates.
//!
//! Users write replacements as `\1`, `\g<1>` or `\g<name>` for groups and
//! `\n`, `\t` and friends for control characters. The `regex` crate expands
//! `$1`, so templates are parsed here into literal and group pieces and
//! expanded against each match. `$` is always literal.
//!
//! Rules:
//! - `\0` and three-digit octal sequences (`\101`) insert the character.
//! - `\1`..`\99` reference numbered groups (two digits taken greedily).
//! - `\a \b \f \n \r \t \v \\` are escapes.
//! - Any other ASCII letter after a backslash is an error.
//! - Any other character after a backslash keeps the backslash.

use regex::{Captures, Regex};

use crate::error::PatternError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
    Named(String),
}

/// A parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceTemplate {
    pieces: Vec<Piece>,
    // Char offset of each group reference, for error messages.
    positions: Vec<usize>,
}

impl ReplaceTemplate {
    /// Parse a template, rejecting malformed escapes.
    ///
    /// # Errors
    /// Returns [`PatternError::Template`] for bad escapes or group syntax.
    pub fn parse(template: &str) -> Result<Self, PatternError> {
        let chars: Vec<char> = template.chars().collect();
        let mut pieces = Vec::new();
        let mut positions = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c != '\\' {
                literal.push(c);
                i += 1;
                continue;
            }

            let start = i;
            let Some(&next) = chars.get(i + 1) else {
                return Err(PatternError::Template(format!(
                    "bad escape (end of pattern) at position {start}"
                )));
            };
            i += 2;

            match next {
                'g' => {
                    let (reference, consumed) = parse_named_group(&chars[i..], start)?;
                    i += consumed;
                    flush(&mut literal, &mut pieces);
                    positions.push(start);
                    pieces.push(reference);
                }
                '0' => {
                    let mut value = 0u32;
                    let mut taken = 0;
                    while taken < 2 {
                        match chars.get(i).and_then(|d| d.to_digit(8)) {
                            Some(d) => {
                                value = value * 8 + d;
                                i += 1;
                                taken += 1;
                            }
                            None => break,
                        }
                    }
                    literal.push(char::from_u32(value).unwrap_or('\0'));
                }
                '1'..='9' => {
                    let first = next.to_digit(10).unwrap_or(0);
                    let second = chars.get(i).and_then(|d| d.to_digit(10));
                    let third = chars.get(i + 1).and_then(|d| d.to_digit(8));

                    if let (Some(second), Some(third)) = (second, third)
                        && first < 8
                        && second < 8
                    {
                        let value = first * 64 + second * 8 + third;
                        if value > 0o377 {
                            return Err(PatternError::Template(format!(
                                "octal escape value \\{first}{second}{third} outside of range 0-0o377 at position {start}"
                            )));
                        }
                        i += 2;
                        literal.push(char::from_u32(value).unwrap_or('\0'));
                        continue;
                    }

                    let index = match second {
                        Some(second) => {
                            i += 1;
                            first * 10 + second
                        }
                        None => first,
                    };
                    flush(&mut literal, &mut pieces);
                    positions.push(start);
                    pieces.push(Piece::Group(index as usize));
                }
                'a' => literal.push('\x07'),
                'b' => literal.push('\x08'),
                'f' => literal.push('\x0c'),
                'n' => literal.push('\n'),
                'r' => literal.push('\r'),
                't' => literal.push('\t'),
                'v' => literal.push('\x0b'),
                '\\' => literal.push('\\'),
                other if other.is_ascii_alphabetic() => {
                    return Err(PatternError::Template(format!(
                        "bad escape \\{other} at position {start}"
                    )));
                }
                other => {
                    literal.push('\\');
                    literal.push(other);
                }
            }
        }

        flush(&mut literal, &mut pieces);
        Ok(Self { pieces, positions })
    }

    /// Check every group reference against the compiled pattern.
    ///
    /// # Errors
    /// Returns [`PatternError::Template`] for references to missing groups.
    pub fn validate(&self, regex: &Regex) -> Result<(), PatternError> {
        let group_refs = self
            .pieces
            .iter()
            .filter(|piece| !matches!(piece, Piece::Literal(_)));

        for (piece, position) in group_refs.zip(&self.positions) {
            match piece {
                Piece::Group(index) if *index >= regex.captures_len() => {
                    return Err(PatternError::Template(format!(
                        "invalid group reference {index} at position {position}"
                    )));
                }
                Piece::Named(name) if !regex.capture_names().flatten().any(|n| n == name) => {
                    return Err(PatternError::Template(format!(
                        "unknown group name '{name}'"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Append the expansion for one match to `dst`.
    ///
    /// Groups that did not participate in the match expand to nothing.
    pub fn expand(&self, caps: &Captures<'_>, dst: &mut String) {
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => dst.push_str(text),
                Piece::Group(index) => {
                    dst.push_str(caps.get(*index).map_or("", |m| m.as_str()));
                }
                Piece::Named(name) => {
                    dst.push_str(caps.name(name).map_or("", |m| m.as_str()));
                }
            }
        }
    }
}

fn flush(literal: &mut String, pieces: &mut Vec<Piece>) {
    if !literal.is_empty() {
        pieces.push(Piece::Literal(std::mem::take(literal)));
    }
}

/// Parse the `<...>` part of `\g<...>`. Returns the piece and chars consumed.
fn parse_named_group(rest: &[char], start: usize) -> Result<(Piece, usize), PatternError> {
    if rest.first() != Some(&'<') {
        return Err(PatternError::Template(format!(
            "missing < at position {}",
            start + 2
        )));
    }
    let Some(close) = rest.iter().position(|&c| c == '>') else {
        return Err(PatternError::Template(format!(
            "missing >, unterminated name at position {}",
            start + 3
        )));
    };

    let name: String = rest[1..close].iter().collect();
    if name.is_empty() {
        return Err(PatternError::Template(format!(
            "missing group name at position {}",
            start + 3
        )));
    }

    let piece = if name.chars().all(|c| c.is_ascii_digit()) {
        let index = name.parse::<usize>().map_err(|_| {
            PatternError::Template(format!("invalid group reference {name} at position {start}"))
        })?;
        Piece::Group(index)
    } else if is_identifier(&name) {
        Piece::Named(name)
    } else {
        return Err(PatternError::Template(format!(
            "bad character in group name '{name}' at position {}",
            start + 3
        )));
    };

    Ok((piece, close + 1))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}
