//! Thin document builder over the quick-xml event writer.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use mockmdm_core::{Error, Result};

/// Indented XML document with a UTF-8 declaration. Text is always escaped.
pub(crate) struct XmlDocument {
    writer: Writer<Vec<u8>>,
}

impl XmlDocument {
    pub(crate) fn new() -> Result<Self> {
        let mut doc = Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        };
        doc.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(doc)
    }

    pub(crate) fn open(&mut self, tag: &str) -> Result<()> {
        self.emit(Event::Start(BytesStart::new(tag)))
    }

    pub(crate) fn close(&mut self, tag: &str) -> Result<()> {
        self.emit(Event::End(BytesEnd::new(tag)))
    }

    /// `<tag>text</tag>` on one line; empty text still gets a closing tag.
    pub(crate) fn leaf(&mut self, tag: &str, text: &str) -> Result<()> {
        self.open(tag)?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.close(tag)
    }

    /// Finish the document with a trailing newline.
    pub(crate) fn finish(self) -> Result<String> {
        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| Error::Xml(e.to_string()))
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::Xml(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_and_escaping() {
        let mut doc = XmlDocument::new().unwrap();
        doc.open("root").unwrap();
        doc.leaf("a", "x < y & z").unwrap();
        doc.leaf("empty", "").unwrap();
        doc.close("root").unwrap();
        assert_eq!(
            doc.finish().unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root>\n  <a>x &lt; y &amp; z</a>\n  <empty></empty>\n</root>\n"
        );
    }
}
