// Fri Jan 16 2026 - Alex

use crate::structure::{FieldKind, LayoutNode, RecordStore, StructureError};
use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter, Formatter};
use std::io;

#[derive(Serialize)]
pub struct SerializableNode<'a> {
    #[serde(rename = "fieldType")]
    field_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(rename = "type")]
    type_name: &'a str,
    size: u64,
    align: u64,
    offset: u64,
    #[serde(rename = "bitWidth", skip_serializing_if = "Option::is_none")]
    bit_width: Option<u64>,
    #[serde(rename = "subFields", skip_serializing_if = "Option::is_none")]
    sub_fields: Option<Vec<SerializableNode<'a>>>,
}

impl<'a> From<&'a LayoutNode> for SerializableNode<'a> {
    fn from(node: &'a LayoutNode) -> Self {
        let kind = node.kind();
        Self {
            field_type: kind.as_str(),
            name: Some(node.name()).filter(|n| !n.is_empty()),
            type_name: node.type_name(),
            size: node.size(),
            align: node.align(),
            offset: node.offset_bytes(),
            bit_width: (kind == FieldKind::BitField).then_some(node.bit_width()),
            sub_fields: kind
                .is_aggregate()
                .then(|| node.children().iter().map(SerializableNode::from).collect()),
        }
    }
}

#[derive(Serialize)]
pub struct RecordEntry<'a> {
    id: String,
    name: &'a str,
}

/// Compact output with upper-case `\u00XX` escapes for control bytes.
/// Everything else, including non-ASCII text, passes through unchanged.
struct LayoutFormatter;

impl Formatter for LayoutFormatter {
    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::AsciiControl(byte) => write!(writer, "\\u00{:02X}", byte),
            other => CompactFormatter.write_char_escape(writer, other),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, StructureError> {
    let mut buf = Vec::with_capacity(256);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, LayoutFormatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Renders one layout tree. Output is byte-identical for identical trees.
pub fn layout_json(node: &LayoutNode) -> Result<String, StructureError> {
    to_json(&SerializableNode::from(node))
}

/// Renders `[{"id":"<id>","name":"<type>"}, ...]` in ascending id order.
pub fn record_list_json(store: &RecordStore) -> Result<String, StructureError> {
    let entries: Vec<RecordEntry<'_>> = store
        .iter()
        .map(|(id, layout)| RecordEntry {
            id: id.to_string(),
            name: layout.type_name(),
        })
        .collect();
    to_json(&entries)
}
