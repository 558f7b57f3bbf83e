//! Indented XML serialization of a [`DocumentArena`]

use std::io::Write;

use generational_arena::Index;
use tracing::instrument;

use crate::domain::DocumentArena;
use crate::infrastructure::error::{InfraError, InfraResult};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// Streams a document as pretty-printed XML.
pub struct XmlWriter<W: Write> {
    out: W,
    indent: usize,
    declaration: bool,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(out: W, indent: usize, declaration: bool) -> Self {
        Self {
            out,
            indent,
            declaration,
        }
    }

    /// Writes the whole document and flushes the sink.
    #[instrument(level = "debug", skip_all, fields(nodes = document.len()))]
    pub fn write_document(&mut self, document: &DocumentArena) -> InfraResult<()> {
        if self.declaration {
            writeln!(self.out, "{}", XML_DECLARATION)
                .map_err(|e| InfraError::serialization("write xml declaration", e))?;
        }
        if let Some(root) = document.root() {
            self.write_element(document, root, 0)?;
        }
        self.out
            .flush()
            .map_err(|e| InfraError::serialization("flush output", e))
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_element(&mut self, document: &DocumentArena, idx: Index, level: usize) -> InfraResult<()> {
        let Some(node) = document.get_node(idx) else {
            return Ok(());
        };
        let element = &node.data;

        let mut line = String::new();
        line.push_str(&" ".repeat(level * self.indent));
        line.push('<');
        line.push_str(element.name);
        for (key, value) in &element.attributes {
            line.push(' ');
            line.push_str(key);
            line.push_str("=\"");
            escape_attribute(value, &mut line, element.name)?;
            line.push('"');
        }

        match (&element.text, node.children.is_empty()) {
            (None, true) => {
                line.push_str("/>");
                self.write_line(&line, element.name)
            }
            (Some(text), true) => {
                line.push('>');
                escape_text(text, &mut line, element.name)?;
                line.push_str("</");
                line.push_str(element.name);
                line.push('>');
                self.write_line(&line, element.name)
            }
            (text, false) => {
                line.push('>');
                self.write_line(&line, element.name)?;
                if let Some(text) = text {
                    let mut text_line = " ".repeat((level + 1) * self.indent);
                    escape_text(text, &mut text_line, element.name)?;
                    self.write_line(&text_line, element.name)?;
                }
                for &child in &node.children {
                    self.write_element(document, child, level + 1)?;
                }
                let closing = format!("{}</{}>", " ".repeat(level * self.indent), element.name);
                self.write_line(&closing, element.name)
            }
        }
    }

    fn write_line(&mut self, line: &str, element: &str) -> InfraResult<()> {
        writeln!(self.out, "{}", line)
            .map_err(|e| InfraError::serialization(format!("write <{}>", element), e))
    }
}

/// Characters allowed by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn check_char(c: char, element: &str) -> InfraResult<()> {
    if is_xml_char(c) {
        Ok(())
    } else {
        Err(InfraError::UnsupportedCharacter {
            character: c,
            context: format!("<{}>", element),
        })
    }
}

pub fn escape_attribute(value: &str, out: &mut String, element: &str) -> InfraResult<()> {
    for c in value.chars() {
        check_char(c, element)?;
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    Ok(())
}

pub fn escape_text(value: &str, out: &mut String, element: &str) -> InfraResult<()> {
    for c in value.chars() {
        check_char(c, element)?;
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    Ok(())
}
