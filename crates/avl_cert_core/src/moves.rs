//! Transcript lines parsed into typed moves.
//!
//! Parsing only checks grammar and field counts. Range checks and the
//! comparison against computed successors live in [`crate::phases`].

use crate::errors::VerifyError;
use crate::vector::HeightVector;

pub const FIELD_SEPARATOR: char = '\t';
pub const GROUP_SEPARATOR: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Expand,
    Terminalize,
    Merge,
}

impl MoveKind {
    pub fn tag(self) -> &'static str {
        match self {
            MoveKind::Expand => "E",
            MoveKind::Terminalize => "T",
            MoveKind::Merge => "M",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "E" => Some(MoveKind::Expand),
            "T" => Some(MoveKind::Terminalize),
            "M" => Some(MoveKind::Merge),
            _ => None,
        }
    }
}

/// One `W:p` answer of an expand line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub field: usize,
    pub heights: HeightVector,
    pub position: i64,
}

/// `E  V:pos:split  W:p ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandMove {
    pub source: HeightVector,
    pub position: i64,
    pub split: i64,
    pub replies: Vec<Reply>,
}

impl ExpandMove {
    /// Number of replies expected per branch: the marked node splits into
    /// two candidates when it is the node being expanded.
    pub fn marks_per_branch(position: i64, split: i64) -> usize {
        if position == split {
            2
        } else {
            1
        }
    }
}

/// `T  V1:pos:target1  V2:target2  V3:target3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalizeMove {
    pub source: HeightVector,
    pub position: i64,
    pub targets: [i64; 3],
    pub kept: HeightVector,
    pub shifted: HeightVector,
}

/// `M  V1:target1:m  V2:target2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeMove {
    pub source: HeightVector,
    pub index: i64,
    pub targets: [i64; 2],
    pub merged: HeightVector,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    Expand(ExpandMove),
    Terminalize(TerminalizeMove),
    Merge(MergeMove),
}

impl Move {
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Expand(_) => MoveKind::Expand,
            Move::Terminalize(_) => MoveKind::Terminalize,
            Move::Merge(_) => MoveKind::Merge,
        }
    }
}

/// Parse one non-empty transcript line.
pub fn parse_line(line: usize, text: &str) -> Result<Move, VerifyError> {
    let fields: Vec<&str> = text.split(FIELD_SEPARATOR).collect();
    let tag = fields[0];
    let kind = MoveKind::from_tag(tag)
        .ok_or_else(|| VerifyError::structural(line, format!("unknown move tag `{}`", tag)))?;
    match kind {
        MoveKind::Expand => parse_expand(line, &fields).map(Move::Expand),
        MoveKind::Terminalize => parse_terminalize(line, &fields).map(Move::Terminalize),
        MoveKind::Merge => parse_merge(line, &fields).map(Move::Merge),
    }
}

fn parse_expand(line: usize, fields: &[&str]) -> Result<ExpandMove, VerifyError> {
    let header = fields
        .get(1)
        .ok_or_else(|| VerifyError::structural(line, "expand line without source field"))?;
    let [source, position, split] = group::<3>(line, 1, header)?;
    let source = vector(line, 1, source)?;
    let position = integer(line, 1, position)?;
    let split = integer(line, 1, split)?;

    let per_branch = ExpandMove::marks_per_branch(position, split);
    expect_fields(line, fields, 3 * per_branch + 2, MoveKind::Expand)?;

    let replies = fields[2..]
        .iter()
        .enumerate()
        .map(|(offset, raw)| {
            let field = offset + 2;
            let [heights, position] = group::<2>(line, field, raw)?;
            Ok(Reply {
                field,
                heights: vector(line, field, heights)?,
                position: integer(line, field, position)?,
            })
        })
        .collect::<Result<Vec<_>, VerifyError>>()?;

    Ok(ExpandMove {
        source,
        position,
        split,
        replies,
    })
}

fn parse_terminalize(line: usize, fields: &[&str]) -> Result<TerminalizeMove, VerifyError> {
    expect_fields(line, fields, 4, MoveKind::Terminalize)?;
    let [source, position, target1] = group::<3>(line, 1, fields[1])?;
    let [kept, target2] = group::<2>(line, 2, fields[2])?;
    let [shifted, target3] = group::<2>(line, 3, fields[3])?;
    Ok(TerminalizeMove {
        source: vector(line, 1, source)?,
        position: integer(line, 1, position)?,
        targets: [
            integer(line, 1, target1)?,
            integer(line, 2, target2)?,
            integer(line, 3, target3)?,
        ],
        kept: vector(line, 2, kept)?,
        shifted: vector(line, 3, shifted)?,
    })
}

fn parse_merge(line: usize, fields: &[&str]) -> Result<MergeMove, VerifyError> {
    expect_fields(line, fields, 3, MoveKind::Merge)?;
    let [source, target1, index] = group::<3>(line, 1, fields[1])?;
    let [merged, target2] = group::<2>(line, 2, fields[2])?;
    Ok(MergeMove {
        source: vector(line, 1, source)?,
        index: integer(line, 1, index)?,
        targets: [integer(line, 1, target1)?, integer(line, 2, target2)?],
        merged: vector(line, 2, merged)?,
    })
}

fn expect_fields(
    line: usize,
    fields: &[&str],
    expected: usize,
    kind: MoveKind,
) -> Result<(), VerifyError> {
    if fields.len() != expected {
        return Err(VerifyError::structural(
            line,
            format!(
                "`{}` line has {} fields, expected {}",
                kind.tag(),
                fields.len(),
                expected
            ),
        ));
    }
    Ok(())
}

fn group<'a, const N: usize>(
    line: usize,
    field: usize,
    raw: &'a str,
) -> Result<[&'a str; N], VerifyError> {
    let parts: Vec<&str> = raw.split(GROUP_SEPARATOR).collect();
    <[&str; N]>::try_from(parts).map_err(|parts| {
        VerifyError::syntax(
            line,
            field,
            format!(
                "`{}` has {} `:`-separated parts, expected {}",
                raw,
                parts.len(),
                N
            ),
        )
    })
}

fn vector(line: usize, field: usize, raw: &str) -> Result<HeightVector, VerifyError> {
    HeightVector::parse(raw).map_err(|err| VerifyError::syntax(line, field, err.to_string()))
}

fn integer(line: usize, field: usize, raw: &str) -> Result<i64, VerifyError> {
    raw.parse::<i64>()
        .map_err(|err| VerifyError::syntax(line, field, format!("`{}`: {}", raw, err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn parses_expand_with_two_marks_per_branch() {
        let mv = parse_line(1, "E\t0:0:0\t11:0\t11:1\t12:0\t12:1\t21:0\t21:1").expect("parse");
        let Move::Expand(expand) = mv else {
            panic!("expected expand move");
        };
        assert_eq!(expand.source.values(), &[0]);
        assert_eq!((expand.position, expand.split), (0, 0));
        assert_eq!(expand.replies.len(), 6);
        assert_eq!(expand.replies[3].field, 5);
        assert_eq!(expand.replies[3].heights.values(), &[1, 2]);
        assert_eq!(expand.replies[3].position, 1);
    }

    #[test]
    fn expand_field_count_depends_on_split() {
        let err = parse_line(4, "E\t21:1:0\t331:2\t341:2").expect_err("one reply missing");
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.line(), Some(4));
        assert!(parse_line(4, "E\t21:1:0\t331:2\t341:2\t431:2").is_ok());
    }

    #[test]
    fn parses_terminalize_and_merge() {
        let Move::Terminalize(t) = parse_line(2, "T\t11:1:0\t11:0\t12:0").expect("parse T") else {
            panic!("expected terminalize move");
        };
        assert_eq!(t.targets, [0, 0, 0]);
        assert_eq!(t.shifted.values(), &[1, 2]);

        let Move::Merge(m) = parse_line(3, "M\t430:-1:0\t20:-1").expect("parse M") else {
            panic!("expected merge move");
        };
        assert_eq!(m.index, 0);
        assert_eq!(m.targets, [-1, -1]);
        assert_eq!(m.merged.values(), &[2, 0]);
    }

    #[test]
    fn unknown_tag_is_structural() {
        let err = parse_line(9, "X\t0:0:0").expect_err("unknown tag");
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(err.to_string().contains("unknown move tag `X`"));
    }

    #[test]
    fn bad_vector_is_syntax_error_on_its_field() {
        let err = parse_line(5, "M\t1a:0:0\t0:0").expect_err("bad digit");
        match err {
            VerifyError::Syntax { line, field, .. } => assert_eq!((line, field), (5, 1)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_group_part_is_syntax_error() {
        let err = parse_line(6, "T\t11:1\t11:0\t12:0").expect_err("target missing");
        assert_eq!(err.kind(), ErrorKind::Syntax);
        let err = parse_line(6, "M\t11:0:x\t0:0").expect_err("index not numeric");
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn wrong_field_counts_are_structural() {
        assert_eq!(
            parse_line(1, "T\t11:1:0\t11:0").unwrap_err().kind(),
            ErrorKind::Structural
        );
        assert_eq!(
            parse_line(1, "M\t11:0:0\t0:0\t0:0").unwrap_err().kind(),
            ErrorKind::Structural
        );
        assert_eq!(parse_line(1, "E").unwrap_err().kind(), ErrorKind::Structural);
    }
}
