// Fri Jan 16 2026 - Alex

use crate::decl::{BaseSpec, DeclId, FieldDecl, RecordDecl, TypeModel};
use crate::structure::{FieldKind, LayoutNode};
use ahash::AHashSet;

/// Deepest chain of nested records expanded before the analyzer gives up.
pub const MAX_RECORD_DEPTH: usize = 256;

/// Converts record declarations into layout trees following the Itanium
/// C++ object model.
///
/// Children are emitted in a fixed order: the record's own vptr (if any),
/// then non-virtual bases sorted by sub-object offset, then fields in
/// declaration order. Bases are sorted because the base-specifier list and
/// the memory order can differ; fields never are. The resulting child list
/// is therefore address-sorted within each group but not across groups.
pub struct LayoutAnalyzer<'a, M: TypeModel + ?Sized> {
    model: &'a M,
    in_progress: AHashSet<DeclId>,
}

impl<'a, M: TypeModel + ?Sized> LayoutAnalyzer<'a, M> {
    pub fn new(model: &'a M) -> Self {
        Self {
            model,
            in_progress: AHashSet::new(),
        }
    }

    /// Builds the layout tree of a complete record definition.
    pub fn analyze(&mut self, record: &RecordDecl) -> LayoutNode {
        if self.in_progress.len() >= MAX_RECORD_DEPTH {
            log::warn!("Record {} (#{}) nests deeper than {} records", record.name, record.id, MAX_RECORD_DEPTH);
            return LayoutNode::new(FieldKind::Record, &record.name)
                .with_size(record.size, record.align)
                .with_valid(false);
        }
        if !self.in_progress.insert(record.id) {
            log::warn!("Record {} (#{}) contains itself, stopping recursion", record.name, record.id);
            return LayoutNode::new(FieldKind::Record, &record.name)
                .with_size(record.size, record.align)
                .with_valid(false);
        }
        let node = self.build_record(record);
        self.in_progress.remove(&record.id);
        node
    }

    fn build_record(&mut self, record: &RecordDecl) -> LayoutNode {
        log::debug!("Analyzing record {} (#{})", record.name, record.id);

        let mut info = LayoutNode::new(FieldKind::Record, &record.name)
            .with_size(record.size, record.align)
            .with_valid(!record.is_invalid());

        if record.has_own_vptr {
            info.add_child(self.vptr());
        }

        let mut bases = Vec::with_capacity(record.bases.len());
        for base in &record.bases {
            if base.is_virtual {
                log::debug!("Skipping virtual base #{} of {}", base.record, record.name);
                continue;
            }
            let mut base_info = self.analyze_base(base);
            base_info.set_kind(FieldKind::NonVirtualBase);
            match base.offset.checked_mul(8) {
                Some(offset_bits) => base_info.set_offset_bits(offset_bits),
                None => {
                    log::warn!("Base #{} of {} has out-of-range offset {}", base.record, record.name, base.offset);
                    base_info.set_offset_bits(u64::MAX);
                    base_info = base_info.with_valid(false);
                }
            }
            bases.push(base_info);
        }
        bases.sort_by_key(LayoutNode::offset_bits);
        for base_info in bases {
            info.add_child(base_info);
        }

        for field in &record.fields {
            let field_info = self.analyze_field(field);
            info.add_child(field_info);
        }

        info
    }

    fn vptr(&self) -> LayoutNode {
        let target = self.model.target();
        LayoutNode::new(FieldKind::VTablePointer, "vptr")
            .with_offset_bits(0)
            .with_size(target.pointer_size(), target.pointer_align())
    }

    // Unresolvable bases still get a node so the rest of the tree survives.
    fn analyze_base(&mut self, base: &BaseSpec) -> LayoutNode {
        let model = self.model;
        match model.record(base.record) {
            Some(decl) if decl.is_complete() => self.analyze(decl),
            Some(decl) => {
                log::warn!("Base {} (#{}) is not a complete definition", decl.name, decl.id);
                LayoutNode::new(FieldKind::Record, &decl.name).with_valid(false)
            }
            None => {
                log::warn!("Base #{} does not resolve to a record", base.record);
                LayoutNode::new(FieldKind::Record, &format!("<unresolved #{}>", base.record))
                    .with_valid(false)
            }
        }
    }

    fn analyze_field(&mut self, field: &FieldDecl) -> LayoutNode {
        let model = self.model;
        let nested = field
            .ty
            .record
            .and_then(|id| model.record(id))
            .filter(|decl| decl.is_complete());

        if let Some(decl) = nested {
            let mut node = self.analyze(decl);
            node.set_name(&field.name);
            node.set_offset_bits(field.offset_bits);
            if field.invalid {
                node = node.with_valid(false);
            }
            return node;
        }

        let node = LayoutNode::new(FieldKind::Simple, &field.ty.name)
            .with_name(&field.name)
            .with_offset_bits(field.offset_bits)
            .with_size(field.ty.size, field.ty.align)
            .with_valid(!field.invalid);

        match field.bit_width {
            Some(width) => {
                let mut node = node.with_bit_width(width);
                node.set_kind(FieldKind::BitField);
                node
            }
            None => node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{Decl, RecordDeclBuilder, TargetInfo, TranslationUnit, TypeRef};

    fn int() -> TypeRef {
        TypeRef::new("int", 4, 4)
    }

    fn unit(records: Vec<RecordDecl>) -> TranslationUnit {
        TranslationUnit::new(
            TargetInfo::default(),
            records.into_iter().map(Decl::Record).collect(),
        )
    }

    fn analyze(tu: &TranslationUnit, id: DeclId) -> LayoutNode {
        let record = tu.record(id).unwrap();
        LayoutAnalyzer::new(tu).analyze(record)
    }

    fn scenario_a() -> TranslationUnit {
        let a = RecordDeclBuilder::new(1, "A")
            .size(8)
            .align(4)
            .field("x", int(), 0)
            .field("y", TypeRef::new("char", 1, 1), 32)
            .build();
        let b = RecordDeclBuilder::new(2, "B")
            .size(16)
            .align(8)
            .base(1, 0)
            .field("z", TypeRef::new("double", 8, 8), 64)
            .build();
        unit(vec![a, b])
    }

    #[test]
    fn test_plain_record() {
        let tu = scenario_a();
        let a = analyze(&tu, 1);

        assert_eq!(a.kind(), FieldKind::Record);
        assert_eq!(a.type_name(), "A");
        assert_eq!((a.size(), a.align()), (8, 4));
        assert!(a.is_valid());

        let children = a.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name(), "x");
        assert_eq!(children[0].kind(), FieldKind::Simple);
        assert_eq!((children[0].offset_bytes(), children[0].size()), (0, 4));
        assert_eq!(children[1].name(), "y");
        assert_eq!((children[1].offset_bytes(), children[1].size()), (4, 1));
    }

    #[test]
    fn test_derived_record() {
        let tu = scenario_a();
        let b = analyze(&tu, 2);

        assert_eq!((b.size(), b.align()), (16, 8));
        let children = b.children();
        assert_eq!(children.len(), 2);

        assert_eq!(children[0].kind(), FieldKind::NonVirtualBase);
        assert_eq!(children[0].type_name(), "A");
        assert_eq!(children[0].name(), "");
        assert_eq!(children[0].offset_bits(), 0);
        assert_eq!(children[0].children().len(), 2);

        assert_eq!(children[1].name(), "z");
        assert_eq!(children[1].kind(), FieldKind::Simple);
        assert_eq!((children[1].offset_bytes(), children[1].size()), (8, 8));
    }

    #[test]
    fn test_bit_fields_share_storage() {
        let unsigned = TypeRef::new("unsigned int", 4, 4);
        let c = RecordDeclBuilder::new(1, "C")
            .size(4)
            .align(4)
            .bit_field("a", unsigned.clone(), 0, 3)
            .bit_field("b", unsigned, 3, 5)
            .build();
        let tu = unit(vec![c]);
        let c = analyze(&tu, 1);

        let children = c.children();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|f| f.kind() == FieldKind::BitField));
        assert_eq!(children[0].bit_width(), 3);
        assert_eq!(children[1].bit_width(), 5);
        assert_eq!(children[0].offset_bytes(), 0);
        assert_eq!(children[1].offset_bytes(), 0);
        assert_eq!(children[1].offset_bits(), 3);
    }

    #[test]
    fn test_vptr_comes_first() {
        let base = RecordDeclBuilder::new(1, "Base")
            .size(4)
            .align(4)
            .field("b", int(), 0)
            .build();
        let poly = RecordDeclBuilder::new(2, "Poly")
            .size(16)
            .align(8)
            .own_vptr()
            .base(1, 8)
            .field("p", int(), 96)
            .build();
        let tu = unit(vec![base, poly]);
        let poly = analyze(&tu, 2);

        let children = poly.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].kind(), FieldKind::VTablePointer);
        assert_eq!(children[0].type_name(), "vptr");
        assert_eq!(children[0].offset_bits(), 0);
        assert_eq!((children[0].size(), children[0].align()), (8, 8));
        assert_eq!(children[1].kind(), FieldKind::NonVirtualBase);
        assert_eq!(children[1].offset_bytes(), 8);
        assert_eq!(children[2].name(), "p");
    }

    #[test]
    fn test_vptr_uses_target_pointer_width() {
        let poly = RecordDeclBuilder::new(1, "Poly").size(4).align(4).own_vptr().build();
        let target = TargetInfo::from_triple("i686-pc-linux-gnu").unwrap();
        let tu = TranslationUnit::new(target, vec![Decl::Record(poly)]);
        let poly = analyze(&tu, 1);
        assert_eq!((poly.children()[0].size(), poly.children()[0].align()), (4, 4));
    }

    #[test]
    fn test_bases_sorted_fields_not() {
        // The primary base is listed second: it owns the vptr and goes first.
        let plain = RecordDeclBuilder::new(1, "Plain").size(4).align(4).field("a", int(), 0).build();
        let dynamic = RecordDeclBuilder::new(2, "Dynamic").size(8).align(8).own_vptr().build();
        let derived = RecordDeclBuilder::new(3, "Derived")
            .size(24)
            .align(8)
            .base(1, 8)
            .base(2, 0)
            .field("late", int(), 128)
            .field("early", int(), 96)
            .build();
        let tu = unit(vec![plain, dynamic, derived]);
        let derived = analyze(&tu, 3);

        let children = derived.children();
        assert_eq!(children[0].type_name(), "Dynamic");
        assert_eq!(children[0].offset_bytes(), 0);
        assert_eq!(children[1].type_name(), "Plain");
        assert_eq!(children[1].offset_bytes(), 8);
        assert_eq!(children[2].name(), "late");
        assert_eq!(children[3].name(), "early");
    }

    #[test]
    fn test_virtual_bases_skipped() {
        let vbase = RecordDeclBuilder::new(1, "V").size(4).align(4).field("v", int(), 0).build();
        let derived = RecordDeclBuilder::new(2, "D")
            .size(16)
            .align(8)
            .own_vptr()
            .virtual_base(1)
            .field("d", int(), 64)
            .build();
        let tu = unit(vec![vbase, derived]);
        let derived = analyze(&tu, 2);

        let children = derived.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind(), FieldKind::VTablePointer);
        assert_eq!(children[1].name(), "d");
        assert_eq!(children[1].offset_bytes(), 8);
        assert!(children.iter().all(|c| !c.kind().is_base()));
    }

    #[test]
    fn test_record_field_expands() {
        let inner = RecordDeclBuilder::new(1, "ns::Inner")
            .size(8)
            .align(4)
            .field("a", int(), 0)
            .field("b", int(), 32)
            .build();
        let outer = RecordDeclBuilder::new(2, "Outer")
            .size(12)
            .align(4)
            .field("head", int(), 0)
            .field("inner", TypeRef::record("struct ns::Inner", 8, 4, 1), 32)
            .build();
        let tu = unit(vec![inner, outer]);
        let outer = analyze(&tu, 2);

        let inner = outer.child("inner").unwrap();
        assert_eq!(inner.kind(), FieldKind::Record);
        assert_eq!(inner.type_name(), "ns::Inner");
        assert_eq!(inner.offset_bytes(), 4);
        assert_eq!(inner.children().len(), 2);
    }

    #[test]
    fn test_incomplete_record_field_is_leaf() {
        let fwd = RecordDeclBuilder::new(1, "Fwd").forward_decl().build();
        let holder = RecordDeclBuilder::new(2, "Holder")
            .size(8)
            .align(8)
            .field("ptr", TypeRef::record("Fwd *", 8, 8, 1), 0)
            .build();
        let tu = unit(vec![fwd, holder]);
        let holder = analyze(&tu, 2);
        assert_eq!(holder.children()[0].kind(), FieldKind::Simple);
        assert_eq!(holder.children()[0].type_name(), "Fwd *");
        assert!(holder.is_valid());
    }

    #[test]
    fn test_validity_propagates() {
        let broken = RecordDeclBuilder::new(1, "Broken").size(4).align(4).invalid().build();
        let bad_field = RecordDeclBuilder::new(2, "BadField")
            .size(4)
            .align(4)
            .invalid_field("x", int(), 0)
            .build();
        let derived = RecordDeclBuilder::new(3, "Derived")
            .size(8)
            .align(4)
            .base(1, 0)
            .field("ok", int(), 32)
            .build();
        let holder = RecordDeclBuilder::new(4, "Holder")
            .size(8)
            .align(4)
            .field("d", TypeRef::record("Derived", 8, 4, 3), 0)
            .build();
        let tu = unit(vec![broken, bad_field, derived, holder]);

        let bad_field = analyze(&tu, 2);
        assert!(!bad_field.is_valid());
        assert!(!bad_field.children()[0].is_valid());

        let derived = analyze(&tu, 3);
        assert!(!derived.is_valid());
        assert!(!derived.children()[0].is_valid());
        assert!(derived.children()[1].is_valid());

        let holder = analyze(&tu, 4);
        assert!(!holder.is_valid());
    }

    #[test]
    fn test_unresolved_base_is_best_effort() {
        let derived = RecordDeclBuilder::new(1, "Derived")
            .size(8)
            .align(4)
            .base(99, 0)
            .field("x", int(), 32)
            .build();
        let tu = unit(vec![derived]);
        let derived = analyze(&tu, 1);

        assert!(!derived.is_valid());
        assert_eq!(derived.children().len(), 2);
        assert_eq!(derived.children()[0].kind(), FieldKind::NonVirtualBase);
        assert_eq!(derived.children()[0].type_name(), "<unresolved #99>");
        assert_eq!(derived.children()[1].name(), "x");
    }

    #[test]
    fn test_out_of_range_base_offset() {
        let base = RecordDeclBuilder::new(1, "A").size(4).align(4).field("a", int(), 0).build();
        let derived = RecordDeclBuilder::new(2, "B")
            .size(8)
            .align(4)
            .base(1, 1 << 62)
            .field("b", int(), 32)
            .build();
        let tu = unit(vec![base, derived]);
        let derived = analyze(&tu, 2);

        assert!(!derived.is_valid());
        let children = derived.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind(), FieldKind::NonVirtualBase);
        assert!(!children[0].is_valid());
        assert_eq!(children[0].children().len(), 1);
        assert_eq!(children[1].name(), "b");
    }

    #[test]
    fn test_long_base_chain_is_capped() {
        let depth = MAX_RECORD_DEPTH as i64 + 50;
        let mut records = vec![RecordDeclBuilder::new(0, "R0").size(4).align(4).field("v", int(), 0).build()];
        for id in 1..=depth {
            records.push(
                RecordDeclBuilder::new(id, &format!("R{}", id))
                    .size(4)
                    .align(4)
                    .base(id - 1, 0)
                    .build(),
            );
        }
        let tu = unit(records);

        let shallow = analyze(&tu, 10);
        assert!(shallow.is_valid());

        let deep = analyze(&tu, depth);
        assert!(!deep.is_valid());
        let mut node = &deep;
        let mut levels = 0;
        while let Some(base) = node.children().first() {
            node = base;
            levels += 1;
        }
        assert_eq!(levels, MAX_RECORD_DEPTH);
        assert!(!node.is_valid());
    }

    #[test]
    fn test_self_reference_terminates() {
        let looped = RecordDeclBuilder::new(1, "Loop")
            .size(4)
            .align(4)
            .field("self", TypeRef::record("Loop", 4, 4, 1), 0)
            .build();
        let tu = unit(vec![looped]);
        let looped = analyze(&tu, 1);
        assert!(!looped.is_valid());
        assert!(looped.children()[0].children().is_empty());
    }
}
