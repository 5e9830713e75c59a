use chumsky::prelude::*;

use crate::errors::CodecError;

/// Single-digit grammar for height vectors.
///
/// `0`..`9` decode to themselves; `-` followed by `1`..`9` decodes to the
/// negated digit (a marked entry). Nothing else is accepted, so values are
/// confined to `-9..=9`.
fn height_vector() -> impl Parser<char, Vec<i32>, Error = Simple<char>> {
    let plain = filter(|c: &char| c.is_ascii_digit()).map(digit_value);
    let marked = just('-')
        .ignore_then(filter(|c: &char| matches!(*c, '1'..='9')))
        .map(|c| -digit_value(c));

    plain.or(marked).repeated().then_ignore(end())
}

fn digit_value(c: char) -> i32 {
    c.to_digit(10).map(|d| d as i32).unwrap_or_default()
}

pub fn decode(text: &str) -> Result<Vec<i32>, CodecError> {
    height_vector().parse(text).map_err(|errs| {
        let offset = errs
            .iter()
            .map(|err| err.span().start)
            .min()
            .unwrap_or_default();
        CodecError {
            text: text.to_string(),
            offset,
        }
    })
}

/// Inverse of [`decode`]. Returns `None` when a value falls outside the
/// single-digit range.
pub fn encode(values: &[i32]) -> Option<String> {
    let mut out = String::with_capacity(values.len() * 2);
    for &value in values {
        match value {
            0..=9 => out.push(char::from(b'0' + value as u8)),
            -9..=-1 => {
                out.push('-');
                out.push(char::from(b'0' + (-value) as u8));
            }
            _ => return None,
        }
    }
    Some(out)
}
