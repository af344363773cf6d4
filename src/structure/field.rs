// Fri Jan 16 2026 - Alex

use std::fmt;

/// What a layout node stands for inside its enclosing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Simple,
    Record,
    BitField,
    NonVirtualBase,
    /// Reserved; virtual bases are not expanded into layout trees.
    VirtualBase,
    VTablePointer,
}

impl FieldKind {
    /// Name used in rendered layouts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Record => "Record",
            Self::BitField => "BitField",
            Self::NonVirtualBase => "NVBase",
            Self::VirtualBase => "VBase",
            Self::VTablePointer => "VPtr",
        }
    }

    /// Whether nodes of this kind carry sub-fields.
    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::Record | Self::NonVirtualBase)
    }

    pub fn is_base(self) -> bool {
        matches!(self, Self::NonVirtualBase | Self::VirtualBase)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
