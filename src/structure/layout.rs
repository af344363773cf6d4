// Fri Jan 16 2026 - Alex

use crate::structure::FieldKind;

/// One entry of a record layout tree. Every node exclusively owns its
/// children; there are no back references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode {
    is_valid: bool,
    kind: FieldKind,
    name: String,
    type_name: String,
    offset_bits: u64,
    size: u64,
    align: u64,
    bit_width: u64,
    children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub fn new(kind: FieldKind, type_name: &str) -> Self {
        Self {
            is_valid: true,
            kind,
            name: String::new(),
            type_name: type_name.to_string(),
            offset_bits: 0,
            size: 0,
            align: 0,
            bit_width: 0,
            children: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_offset_bits(mut self, offset_bits: u64) -> Self {
        self.offset_bits = offset_bits;
        self
    }

    pub fn with_size(mut self, size: u64, align: u64) -> Self {
        self.size = size;
        self.align = align;
        self
    }

    pub fn with_bit_width(mut self, bit_width: u64) -> Self {
        self.bit_width = bit_width;
        self
    }

    pub fn with_valid(mut self, is_valid: bool) -> Self {
        self.is_valid = is_valid;
        self
    }

    /// Appends a child, folding its validity into this node's.
    pub fn add_child(&mut self, child: LayoutNode) {
        self.is_valid &= child.is_valid;
        self.children.push(child);
    }

    pub fn set_kind(&mut self, kind: FieldKind) {
        self.kind = kind;
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_offset_bits(&mut self, offset_bits: u64) {
        self.offset_bits = offset_bits;
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn offset_bits(&self) -> u64 {
        self.offset_bits
    }

    /// Byte offset, truncating any sub-byte bit-field position.
    pub fn offset_bytes(&self) -> u64 {
        self.offset_bits >> 3
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn align(&self) -> u64 {
        self.align
    }

    pub fn bit_width(&self) -> u64 {
        self.bit_width
    }

    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&LayoutNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(LayoutNode::node_count).sum::<usize>()
    }
}
