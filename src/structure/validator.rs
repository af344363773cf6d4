// Fri Jan 16 2026 - Alex

use crate::structure::{FieldKind, LayoutNode, StructureError};

/// Checks the shape rules every analyzed layout tree must satisfy.
pub struct LayoutValidator;

impl LayoutValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, layout: &LayoutNode) -> Result<(), StructureError> {
        match self.violations(layout).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every rule violation in the tree, outermost first.
    pub fn violations(&self, layout: &LayoutNode) -> Vec<StructureError> {
        let mut found = Vec::new();
        self.check_node(layout, layout.type_name(), &mut found);
        found
    }

    fn check_node(&self, node: &LayoutNode, path: &str, found: &mut Vec<StructureError>) {
        let mut fail = |reason: String| {
            found.push(StructureError::ValidationFailed {
                path: path.to_string(),
                reason,
            })
        };

        let children_valid = node.children().iter().all(LayoutNode::is_valid);
        if node.is_valid() && !children_valid {
            fail("node is valid but a child is not".to_string());
        }

        if !node.kind().is_aggregate() && !node.children().is_empty() {
            fail(format!("{} node has sub-fields", node.kind()));
        }

        // vptr, then bases, then fields.
        let mut stage = 0;
        let mut last_base_offset = 0;
        for (i, child) in node.children().iter().enumerate() {
            let child_stage = match child.kind() {
                FieldKind::VTablePointer => 0,
                FieldKind::NonVirtualBase | FieldKind::VirtualBase => 1,
                _ => 2,
            };
            if child.kind() == FieldKind::VTablePointer && (i != 0 || child.offset_bits() != 0) {
                fail(format!("vptr at position {} offset {}", i, child.offset_bits()));
            }
            if child_stage < stage {
                fail(format!("{} child at position {} is out of order", child.kind(), i));
            }
            if child_stage == 1 {
                if stage == 1 && child.offset_bits() < last_base_offset {
                    fail(format!(
                        "base {} at offset {} precedes offset {}",
                        child.type_name(),
                        child.offset_bits(),
                        last_base_offset
                    ));
                }
                last_base_offset = child.offset_bits();
            }
            stage = stage.max(child_stage);
        }

        for child in node.children() {
            let label = if child.name().is_empty() {
                format!("{}.<{}>", path, child.type_name())
            } else {
                format!("{}.{}", path, child.name())
            };
            self.check_node(child, &label, found);
        }
    }
}

impl Default for LayoutValidator {
    fn default() -> Self {
        Self::new()
    }
}
