//! Serialization back to KeyValues text.
//!
//! Emits the same grammar the parser accepts: quoted names and values, one
//! statement per line, one tab of indentation per nesting level. Tombstoned
//! nodes are skipped entirely, so a rewritten tree serializes as if the
//! deleted nodes never existed.

use super::property::Property;

impl Property {
    /// Render this subtree as the lines it would occupy in a file.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut Vec<String>, depth: usize) {
        if !self.is_valid() {
            return;
        }
        let indent = "\t".repeat(depth);
        let name = self.name().unwrap_or("");
        match self.value_str() {
            Some(value) => out.push(format!("{indent}\"{name}\" \"{value}\"")),
            None => {
                out.push(format!("{indent}\"{name}\""));
                out.push(format!("{indent}{{"));
                for child in self.children() {
                    child.write_into(out, depth + 1);
                }
                out.push(format!("{indent}}}"));
            }
        }
    }
}

/// Serialize a whole top-level forest.
#[must_use]
pub fn to_lines(forest: &[Property]) -> Vec<String> {
    let mut out = Vec::new();
    for prop in forest {
        prop.write_into(&mut out, 0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyvalues::parse;

    #[test]
    fn test_leaf_line() {
        let prop = Property::new("State", "Open");
        assert_eq!(prop.to_strings(), vec!["\"State\" \"Open\""]);
    }

    #[test]
    fn test_section_indents_children() {
        let prop = Property::section(
            "Door",
            vec![
                Property::new("State", "Open"),
                Property::section("Inner", vec![Property::new("k", "v")]),
            ],
        );
        assert_eq!(
            prop.to_strings(),
            vec![
                "\"Door\"",
                "{",
                "\t\"State\" \"Open\"",
                "\t\"Inner\"",
                "\t{",
                "\t\t\"k\" \"v\"",
                "\t}",
                "}",
            ]
        );
    }

    #[test]
    fn test_invalid_nodes_skipped() {
        let mut prop = Property::section(
            "Door",
            vec![Property::new("a", "1"), Property::new("b", "2")],
        );
        prop.children_mut()[0].make_invalid();
        assert_eq!(
            prop.to_strings(),
            vec!["\"Door\"", "{", "\t\"b\" \"2\"", "}"]
        );
    }

    #[test]
    fn test_round_trip_structural_equality() {
        let text = "\"Door\"\n{\n\t\"State\" \"Open\"\n\t\"Nested\"\n\t{\n\t\t\"x\" \"1\"\n\t}\n}";
        let forest = parse(text.lines()).unwrap();
        let lines = to_lines(&forest);
        let reparsed = parse(lines.iter().map(String::as_str)).unwrap();
        assert_eq!(forest, reparsed);
    }

    #[test]
    fn test_round_trip_drops_tombstones() {
        let mut forest = parse(
            "\"Door\"\n{\n\t\"a\" \"1\"\n\t\"b\" \"2\"\n}".lines(),
        )
        .unwrap();
        forest[0].children_mut()[0].make_invalid();
        let reparsed = parse(to_lines(&forest).iter().map(String::as_str)).unwrap();
        assert_eq!(reparsed[0].len(), 1);
        assert_eq!(reparsed[0].children()[0].name(), Some("b"));
    }
}
