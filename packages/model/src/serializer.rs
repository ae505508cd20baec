//! JSON form of a page document.
//!
//! Export is pretty-printed. Import parses in two steps: the text must be
//! valid JSON (`ParseError::Syntax`), and the value must map onto the
//! document types (`ParseError::Shape`). Missing fields take their defaults
//! and unknown fields are ignored, so documents written by newer builds still
//! load. Nothing here checks nodes against the schema registry.
//!
//! Every tree level costs two JSON levels (node object and `children`
//! array), so serde_json's recursion limit is turned off and the stack is
//! grown on demand instead. Any page the editor can build can be re-read.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::document::Document;
use crate::error::{ParseError, ParseResult, SerializeError};

/// Serializer converts a document to its export text
#[derive(Debug, Clone)]
pub struct Serializer {
    indent_string: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            indent_string: "  ".to_string(), // 2 spaces
        }
    }

    pub fn with_indent(indent: &str) -> Self {
        Self {
            indent_string: indent.to_string(),
        }
    }

    /// Serialize a document to pretty-printed JSON
    pub fn serialize(&self, doc: &Document) -> Result<String, SerializeError> {
        let mut output = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent_string.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut output, formatter);
        doc.serialize(&mut ser)?;

        // serde_json only ever writes UTF-8
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize with the default two-space indent
pub fn serialize(doc: &Document) -> Result<String, SerializeError> {
    Serializer::new().serialize(doc)
}

/// Parse export text back into a document
pub fn deserialize(text: &str) -> ParseResult<Document> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(ParseError::from_json)?;
    de.end().map_err(ParseError::from_json)?;

    if !value.is_object() {
        return Err(ParseError::shape(format!(
            "expected a JSON object at the top level, found {}",
            describe(&value)
        )));
    }

    Document::deserialize(serde_stacker::Deserializer::new(value)).map_err(ParseError::from_json)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
