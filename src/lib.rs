#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

//! Reader and writer for a small subset of the INI format.
//!
//! Every property must live inside a `[section]`, comments are whole lines starting with `;`,
//! and values are plain strings with integer and boolean views derived on access.

mod error;
mod parser;
mod section;
mod value;

use std::io::{BufWriter, Read, Write};
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::{debug, trace};

pub use crate::error::{Error, ErrorKind, ParseError, ParseErrorKind};
use crate::parser::Parser;
pub use crate::section::Section;

/// Line terminator used for all output, independent of platform.
pub const CRLF: &str = "\r\n";

/// An INI document: uniquely named sections, each holding uniquely named properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    sections: IndexMap<String, Section>,
}

impl Ini {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying the offending line number for malformed or duplicate
    /// sections, malformed or duplicate properties, and properties outside of any section.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let sections = Parser::new(text).into_sections()?;
        debug!(sections = sections.len(), "parsed INI document");

        Ok(Self { sections })
    }

    /// Read `reader` to completion and parse the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails or the data is not valid UTF-8, and
    /// [`Error::Parse`] if the text is not a valid document.
    pub fn from_reader<R>(mut reader: R) -> Result<Self, Error>
    where
        R: Read,
    {
        let mut text = String::with_capacity(4096);
        reader.read_to_string(&mut text)?;

        Ok(Self::parse(&text)?)
    }

    /// Section names, in the order they were first defined.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Property keys of `section`, in the order they were first defined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if there is no such section.
    pub fn properties(&self, section: &str) -> Result<impl Iterator<Item = &str>, Error> {
        Ok(self.require_section(section)?.keys())
    }

    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] or [`Error::PropertyNotFound`].
    pub fn get_str(&self, section: &str, property: &str) -> Result<&str, Error> {
        self.require_section(section)?
            .get(property)
            .ok_or_else(|| Error::PropertyNotFound {
                section: section.to_owned(),
                property: property.to_owned(),
            })
    }

    /// # Errors
    ///
    /// Returns the lookup errors of [`Ini::get_str`], or [`Error::NotAnInteger`] if the stored
    /// value is not a base-10 integer.
    pub fn get_int(&self, section: &str, property: &str) -> Result<i64, Error> {
        let value = self.get_str(section, property)?;

        crate::value::parse_int(value).map_err(|source| Error::NotAnInteger {
            section: section.to_owned(),
            property: property.to_owned(),
            source,
        })
    }

    /// Accepts `true`/`yes`/`on` and `false`/`no`/`off`.
    ///
    /// # Errors
    ///
    /// Returns the lookup errors of [`Ini::get_str`], or [`Error::NotABoolean`] for any other
    /// spelling.
    pub fn get_bool(&self, section: &str, property: &str) -> Result<bool, Error> {
        let value = self.get_str(section, property)?;

        crate::value::parse_bool(value).ok_or_else(|| Error::NotABoolean {
            section: section.to_owned(),
            property: property.to_owned(),
            value: value.to_owned(),
        })
    }

    /// Set a property, creating the section first if needed.
    pub fn set_str<V>(&mut self, section: &str, property: &str, value: V)
    where
        V: Into<String>,
    {
        let section = self
            .sections
            .entry(section.to_owned())
            .or_insert_with_key(|name| {
                trace!(section = %name, "creating section");
                Section::new(name.clone())
            });

        section.insert(property.to_owned(), value.into());
    }

    pub fn set_int(&mut self, section: &str, property: &str, value: i64) {
        self.set_str(section, property, value.to_string());
    }

    pub fn set_bool(&mut self, section: &str, property: &str, value: bool) {
        self.set_str(section, property, crate::value::format_bool(value));
    }

    /// Remove a section and all of its properties. Returns whether anything was removed.
    pub fn delete_section(&mut self, section: &str) -> bool {
        let removed = self.sections.shift_remove(section).is_some();
        trace!(section, removed, "delete section");
        removed
    }

    /// Remove a single property. Returns whether anything was removed.
    pub fn delete_property(&mut self, section: &str, property: &str) -> bool {
        let removed = self
            .sections
            .get_mut(section)
            .and_then(|s| s.remove(property))
            .is_some();
        trace!(section, property, removed, "delete property");
        removed
    }

    /// Serialize the document to `writer` using CRLF line endings.
    ///
    /// Without `prettify`, sections and properties are written in insertion order. With it, both
    /// are sorted and every section is followed by a blank line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if any write or the final flush fails; whatever reached `writer`
    /// before the failure must be treated as incomplete.
    pub fn write<W>(&self, writer: W, prettify: bool) -> Result<(), Error>
    where
        W: Write,
    {
        let mut out = BufWriter::new(writer);

        let mut sections = self.sections.values().collect::<Vec<&Section>>();
        if prettify {
            sections.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        }

        for section in &sections {
            write!(out, "[{}]{CRLF}", section.name())?;

            let mut properties = section.properties().collect::<Vec<(&str, &str)>>();
            if prettify {
                properties.sort_unstable_by(|a, b| a.0.cmp(b.0));
            }

            for (key, value) in properties {
                write!(out, "{key} = {value}{CRLF}")?;
            }

            if prettify {
                out.write_all(CRLF.as_bytes())?;
            }
        }

        out.flush()?;
        debug!(sections = sections.len(), prettify, "wrote INI document");

        Ok(())
    }

    fn require_section(&self, section: &str) -> Result<&Section, Error> {
        self.sections
            .get(section)
            .ok_or_else(|| Error::SectionNotFound {
                section: section.to_owned(),
            })
    }
}

impl FromStr for Ini {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
