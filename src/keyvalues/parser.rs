//! Single-pass KeyValues parser.
//!
//! Each significant line is exactly one statement: a quoted `"name" "value"`
//! leaf, a quoted or bare name declaring a section, `{`, or `}`. Parsing
//! keeps an explicit stack of open sections; the top of the stack is the
//! list being appended to. There is no comment syntax.

use super::error::KeyValError;
use super::property::{Property, Value};

/// Is `s` acceptable as a property name?
///
/// Quotes, braces, whitespace, and control characters are rejected; anything
/// else printable is allowed.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, '"' | '{' | '}'))
}

/// Parse lines of KeyValues text into a top-level forest.
///
/// Errors are fatal with 1-based line numbers; no partial tree is returned.
pub fn parse<I, S>(lines: I) -> Result<Vec<Property>, KeyValError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // The synthetic root; `open` tracks every section awaiting its `}`.
    let mut open: Vec<Property> = vec![Property::section("", Vec::new())];

    for (idx, raw) in lines.into_iter().enumerate() {
        let line = idx + 1;
        let fresh = raw.as_ref().trim();
        if fresh.is_empty() {
            continue;
        }

        if let Some(first) = fresh.strip_prefix('"') {
            // Quoted statement: `"name"` or `"name" "value"`.
            let mut parts = first.split('"');
            let name = parts.next().unwrap_or("");
            if !is_identifier(name) {
                return Err(KeyValError::InvalidName {
                    name: name.to_string(),
                    line,
                });
            }
            // Skip the separator between the closing and opening quotes.
            let _ = parts.next();
            let prop = match parts.next() {
                Some(value) => Property::new(name, value),
                // No value: a section is expected to follow.
                None => Property::section(name, Vec::new()),
            };
            push_child(&mut open, prop);
        } else if fresh.starts_with('{') {
            open_section(&mut open, line)?;
        } else if fresh.starts_with('}') {
            close_section(&mut open, line)?;
        } else if is_identifier(fresh) {
            // A bare name; its section opens on the following line.
            push_child(&mut open, Property::section(fresh, Vec::new()));
        } else {
            return Err(KeyValError::UnexpectedChar {
                found: fresh.chars().next().unwrap_or(' '),
                line,
            });
        }
    }

    if open.len() > 1 {
        return Err(KeyValError::UnclosedSection);
    }
    let root = open.pop().expect("parse stack holds the root");
    match root.into_value() {
        Value::Section(list) => Ok(list),
        Value::Leaf(_) => unreachable!("parser root is a section"),
    }
}

fn top_list(open: &mut [Property]) -> &mut Vec<Property> {
    match open
        .last_mut()
        .expect("parse stack is never empty mid-line")
        .value_mut()
    {
        Value::Section(list) => list,
        Value::Leaf(_) => unreachable!("parser only opens sections"),
    }
}

fn push_child(open: &mut Vec<Property>, prop: Property) {
    top_list(open).push(prop);
}

fn open_section(open: &mut Vec<Property>, line: usize) -> Result<(), KeyValError> {
    let pending = top_list(open)
        .pop()
        .ok_or(KeyValError::OrphanSection { line })?;
    // Only a freshly declared, still-empty section may be opened.
    match pending.value_str() {
        Some(_) => Err(KeyValError::InlineValueConflict { line }),
        None if !pending.children().is_empty() => Err(KeyValError::InlineValueConflict { line }),
        None => {
            open.push(pending);
            Ok(())
        }
    }
}

fn close_section(open: &mut Vec<Property>, line: usize) -> Result<(), KeyValError> {
    if open.len() <= 1 {
        return Err(KeyValError::UnmatchedClose { line });
    }
    let finished = open.pop().expect("checked above");
    push_child(open, finished);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(text: &str) -> Result<Vec<Property>, KeyValError> {
        parse(text.lines())
    }

    #[test]
    fn test_parse_leaf_pair() {
        let forest = parse_str("\"State\" \"Open\"").unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name(), Some("State"));
        assert_eq!(forest[0].value_str(), Some("Open"));
    }

    #[test]
    fn test_parse_door_example() {
        let forest = parse_str("\"Door\"\n{\n\t\"State\" \"Open\"\n}").unwrap();
        assert_eq!(forest.len(), 1);
        let door = &forest[0];
        assert_eq!(door.name(), Some("Door"));
        assert_eq!(door.len(), 1);
        assert_eq!(door.children()[0].name(), Some("State"));
        assert_eq!(door.children()[0].value_str(), Some("Open"));
    }

    #[test]
    fn test_parse_bare_identifier_section() {
        let forest = parse_str("Door\n{\n\"a\" \"1\"\n}").unwrap();
        assert_eq!(forest[0].name(), Some("Door"));
        assert_eq!(forest[0].len(), 1);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let forest = parse_str("\n  \n\"a\" \"1\"\n\n\"b\" \"2\"\n").unwrap();
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_nested_sections() {
        let forest = parse_str(
            "\"Outer\"\n{\n\"Inner\"\n{\n\"k\" \"v\"\n}\n\"leaf\" \"x\"\n}",
        )
        .unwrap();
        let outer = &forest[0];
        assert_eq!(outer.len(), 2);
        let inner = &outer.children()[0];
        assert!(inner.has_children());
        assert_eq!(inner.children()[0].value_str(), Some("v"));
    }

    #[test]
    fn test_extra_close_brace_errors() {
        assert_eq!(
            parse_str("\"a\" \"1\"\n}"),
            Err(KeyValError::UnmatchedClose { line: 2 })
        );
    }

    #[test]
    fn test_missing_close_brace_errors() {
        assert_eq!(
            parse_str("\"Door\"\n{\n\"a\" \"1\"\n"),
            Err(KeyValError::UnclosedSection)
        );
    }

    #[test]
    fn test_inline_value_conflict() {
        assert_eq!(
            parse_str("\"a\" \"1\"\n{\n}"),
            Err(KeyValError::InlineValueConflict { line: 2 })
        );
    }

    #[test]
    fn test_orphan_brace_errors() {
        assert_eq!(parse_str("{\n}"), Err(KeyValError::OrphanSection { line: 1 }));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let err = parse_str("\"ba{d\" \"1\"").unwrap_err();
        assert!(matches!(err, KeyValError::InvalidName { line: 1, .. }));
    }

    #[test]
    fn test_unexpected_character() {
        let err = parse_str("bad line here").unwrap_err();
        assert!(matches!(err, KeyValError::UnexpectedChar { line: 1, .. }));
    }

    #[test]
    fn test_error_returns_no_partial_tree() {
        // The first two statements are fine, the third is not; the whole
        // parse must fail.
        assert!(parse_str("\"a\" \"1\"\n\"b\" \"2\"\n}").is_err());
    }
}
