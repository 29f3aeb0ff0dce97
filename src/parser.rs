use std::str::Split;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::{ParseError, ParseErrorKind};
use crate::section::Section;

/// Represents an on-going parse.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lines: Split<'a, char>,
    line: usize,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n'),
            line: 0,
        }
    }

    /// Consume the input line by line and collect every section, keyed by name.
    pub fn into_sections(mut self) -> Result<IndexMap<String, Section>, ParseError> {
        let mut sections = IndexMap::<String, Section>::with_capacity(8);

        while let Some(line) = self.next_line() {
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                self.parse_section(line, &mut sections)?;
            } else {
                self.parse_property(line, &mut sections)?;
            }
        }

        Ok(sections)
    }

    /// Next physical line with the line ending and surrounding spaces removed.
    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line += 1;

        let line = line.strip_suffix('\r').unwrap_or(line);
        Some(line.trim_matches(' '))
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.line, kind)
    }

    fn parse_section(
        &self,
        line: &str,
        sections: &mut IndexMap<String, Section>,
    ) -> Result<(), ParseError> {
        // The name is everything between the brackets, interior whitespace included.
        let name = line
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| self.error(ParseErrorKind::MalformedSection))?;

        match sections.entry(name.to_owned()) {
            Entry::Occupied(entry) => Err(self.error(ParseErrorKind::DuplicateSection {
                name: entry.key().clone(),
            })),
            Entry::Vacant(entry) => {
                let section = Section::new(entry.key().clone());
                entry.insert(section);
                Ok(())
            }
        }
    }

    fn parse_property(
        &self,
        line: &str,
        sections: &mut IndexMap<String, Section>,
    ) -> Result<(), ParseError> {
        // Sections are only ever appended here, so the open section is the last one.
        let Some((_, section)) = sections.last_mut() else {
            return Err(self.error(ParseErrorKind::PropertyOutsideSection));
        };

        let (key, value) = line
            .split_once('=')
            .filter(|(_, value)| !value.contains('='))
            .ok_or_else(|| self.error(ParseErrorKind::MalformedProperty))?;
        let key = key.trim_matches(' ');
        let value = value.trim_matches(' ');

        if section.contains_key(key) {
            return Err(self.error(ParseErrorKind::DuplicateProperty {
                name: key.to_owned(),
            }));
        }

        section.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<IndexMap<String, Section>, ParseError> {
        Parser::new(text).into_sections()
    }

    #[test]
    fn comments_and_padding() {
        let text = "; some comment
; another
    [main]
  string   =  this is a test
integer =   0123

;integer = 9999
 boolean =  true
; boolean = false

;[auxillary]
[auxillary]

       whatever =  something

";

        let sections = parse(text).expect("failed to parse hardcoded INI file");
        let main = sections.get("main").expect("expected [main] section");

        assert_eq!(sections.len(), 2);
        assert_eq!(
            main.properties().collect::<Vec<_>>(),
            vec![
                ("string", "this is a test"),
                ("integer", "0123"),
                ("boolean", "true"),
            ]
        );
        assert_eq!(
            sections.get("auxillary").and_then(|s| s.get("whatever")),
            Some("something")
        );
    }

    #[test]
    fn crlf_line_endings() {
        let sections = parse("[a]\r\nkey = value\r\n[b]\r\n")
            .expect("failed to parse hardcoded INI file");

        assert_eq!(
            sections.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(sections["a"].get("key"), Some("value"));
    }

    #[test]
    fn section_name_keeps_interior_whitespace() {
        let sections =
            parse("  [ spaced name ]  \nk=v").expect("failed to parse hardcoded INI file");

        assert!(sections.contains_key(" spaced name "));
    }

    #[test]
    fn key_with_spaces() {
        let sections = parse("\n[ugly]\n  key with spaces   =   value with spaces too   ")
            .expect("failed to parse hardcoded INI file");

        assert_eq!(
            sections["ugly"].get("key with spaces"),
            Some("value with spaces too")
        );
    }

    #[test]
    fn empty_value() {
        let sections = parse("[a]\nkey =").expect("failed to parse hardcoded INI file");

        assert_eq!(sections["a"].get("key"), Some(""));
    }

    #[test]
    fn empty_input() {
        let sections = parse("").expect("empty input is a valid document");

        assert!(sections.is_empty());
    }

    #[test]
    fn malformed_sections() {
        for text in ["[", "[aaa", "[]", "[a] ; trailing comment"] {
            let error = parse(text).expect_err("malformed section parsed");

            assert_eq!(error.kind, ParseErrorKind::MalformedSection, "{text:?}");
            assert_eq!(error.line, 1);
        }
    }

    #[test]
    fn malformed_properties() {
        let cases = [
            ("whatever", ParseErrorKind::PropertyOutsideSection, 1),
            ("this = that", ParseErrorKind::PropertyOutsideSection, 1),
            ("[hello]\nthis", ParseErrorKind::MalformedProperty, 2),
            ("[hello]\na = b = c", ParseErrorKind::MalformedProperty, 2),
            ("something\n[section]", ParseErrorKind::PropertyOutsideSection, 1),
        ];

        for (text, kind, line) in cases {
            let error = parse(text).expect_err("malformed property parsed");

            assert_eq!(error, ParseError::new(line, kind), "{text:?}");
        }
    }

    #[test]
    fn redefined_section() {
        let error = parse("[a]\nval=1\n\n[a]\nval=1\n").expect_err("redefined section parsed");

        assert_eq!(
            error,
            ParseError::new(
                4,
                ParseErrorKind::DuplicateSection {
                    name: "a".to_owned()
                }
            )
        );
    }

    #[test]
    fn redefined_property() {
        let error = parse("[a]\nval=1\nval =2\n").expect_err("redefined property parsed");

        assert_eq!(
            error,
            ParseError::new(
                3,
                ParseErrorKind::DuplicateProperty {
                    name: "val".to_owned()
                }
            )
        );
    }

    #[test]
    fn same_key_in_different_sections() {
        let sections =
            parse("[a]\nval=1\n[b]\nval=2").expect("failed to parse hardcoded INI file");

        assert_eq!(sections["a"].get("val"), Some("1"));
        assert_eq!(sections["b"].get("val"), Some("2"));
    }
}
