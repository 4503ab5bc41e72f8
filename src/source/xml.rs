use async_trait::async_trait;
use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use super::{SourceLoader, SourceOrigin, malformed};
use crate::{
    error::LoadError,
    record::{FieldValue, Record},
    schema::Schema,
};

/// An XML document whose `schema.record_tag` elements are records.
///
/// Each child element of a record element is one field, its text content
/// (surrounding whitespace included) the value:
///
/// ```xml
/// <employees>
///     <employee><id>1</id><name>Alice</name><salary>55000</salary></employee>
/// </employees>
/// ```
#[derive(Debug, Clone)]
pub struct XmlSource {
    origin: SourceOrigin,
    schema: Schema,
}

impl XmlSource {
    pub fn new(origin: SourceOrigin, schema: Schema) -> Self {
        Self { origin, schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn parse(&self, text: &str) -> Result<Vec<Record>, LoadError> {
        // Text is not trimmed: whitespace between elements falls outside any
        // field and is dropped, while field text is kept verbatim.
        let mut reader = Reader::from_str(text);
        let record_tag = self.schema.record_tag.as_bytes();

        let mut records = Vec::new();
        let mut fields: Option<Vec<(String, FieldValue)>> = None;
        let mut field: Option<(String, String)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) if field.is_none() && e.name().as_ref() == record_tag => {
                    fields = Some(Vec::new());
                }
                Event::Empty(e) if fields.is_none() && e.name().as_ref() == record_tag => {
                    records.push(self.finish(records.len(), Vec::new())?);
                }
                Event::Start(e) if fields.is_some() && field.is_none() => {
                    field = Some((tag_name(&e), String::new()));
                }
                Event::Empty(e) if field.is_none() => {
                    if let Some(fields) = fields.as_mut() {
                        fields.push((tag_name(&e), FieldValue::Text(String::new())));
                    }
                }
                Event::Text(t) => {
                    if let Some((_, buf)) = field.as_mut() {
                        let text = t.unescape().map_err(|e| LoadError::Xml(e.into()))?;
                        buf.push_str(&text);
                    }
                }
                Event::CData(c) => {
                    if let Some((_, buf)) = field.as_mut() {
                        buf.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::End(e) => {
                    let name = e.name();
                    if let Some((tag, value)) = field.take() {
                        if tag.as_bytes() == name.as_ref() {
                            if let Some(fields) = fields.as_mut() {
                                fields.push((tag, FieldValue::Text(value)));
                            }
                        } else {
                            // Closing tag of something nested inside a field.
                            field = Some((tag, value));
                        }
                    } else if name.as_ref() == record_tag {
                        if let Some(done) = fields.take() {
                            records.push(self.finish(records.len(), done)?);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if fields.is_some() {
            return Err(malformed(
                records.len(),
                format!("unclosed <{}> element", self.schema.record_tag),
            ));
        }
        Ok(records)
    }

    fn finish(&self, index: usize, fields: Vec<(String, FieldValue)>) -> Result<Record, LoadError> {
        self.schema
            .record_from_fields(fields)
            .map_err(|e| malformed(index, e))
    }

    /// Write the whole sequence back out under `schema.root_tag`.
    pub fn serialize(&self, records: &[Record]) -> Result<String, LoadError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new(self.schema.root_tag.as_str())))?;
        for record in records {
            writer.write_event(Event::Start(BytesStart::new(self.schema.record_tag.as_str())))?;
            for (name, value) in record.fields() {
                if value.as_text() == Some("") {
                    writer.write_event(Event::Empty(BytesStart::new(name)))?;
                    continue;
                }
                writer.write_event(Event::Start(BytesStart::new(name)))?;
                writer.write_event(Event::Text(BytesText::new(&value.to_string())))?;
                writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            writer.write_event(Event::End(BytesEnd::new(self.schema.record_tag.as_str())))?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.schema.root_tag.as_str())))?;

        String::from_utf8(writer.into_inner()).map_err(|e| LoadError::Io(std::io::Error::other(e)))
    }
}

#[async_trait]
impl SourceLoader for XmlSource {
    type Record = Record;

    async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        let text = self.origin.read().await?;
        self.parse(&text)
    }
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}
