// Fri Jan 16 2026 - Alex

use crate::decl::{BaseSpec, Decl, DeclId, FieldDecl, RecordDecl, TypeRef};

/// Builder for synthetic record declarations.
pub struct RecordDeclBuilder {
    record: RecordDecl,
}

impl RecordDeclBuilder {
    pub fn new(id: DeclId, name: &str) -> Self {
        Self {
            record: RecordDecl {
                id,
                name: name.to_string(),
                complete: true,
                invalid: false,
                size: 0,
                align: 1,
                has_own_vptr: false,
                bases: Vec::new(),
                fields: Vec::new(),
                decls: Vec::new(),
            },
        }
    }

    pub fn size(mut self, size: u64) -> Self {
        self.record.size = size;
        self
    }

    pub fn align(mut self, align: u64) -> Self {
        self.record.align = align;
        self
    }

    pub fn own_vptr(mut self) -> Self {
        self.record.has_own_vptr = true;
        self
    }

    pub fn invalid(mut self) -> Self {
        self.record.invalid = true;
        self
    }

    pub fn forward_decl(mut self) -> Self {
        self.record.complete = false;
        self
    }

    /// Adds a non-virtual base at `offset` bytes.
    pub fn base(mut self, record: DeclId, offset: u64) -> Self {
        self.record.bases.push(BaseSpec {
            record,
            is_virtual: false,
            offset,
        });
        self
    }

    pub fn virtual_base(mut self, record: DeclId) -> Self {
        self.record.bases.push(BaseSpec {
            record,
            is_virtual: true,
            offset: 0,
        });
        self
    }

    pub fn field(mut self, name: &str, ty: TypeRef, offset_bits: u64) -> Self {
        self.record.fields.push(FieldDecl {
            name: name.to_string(),
            ty,
            offset_bits,
            bit_width: None,
            invalid: false,
        });
        self
    }

    pub fn bit_field(mut self, name: &str, ty: TypeRef, offset_bits: u64, width: u64) -> Self {
        self.record.fields.push(FieldDecl {
            name: name.to_string(),
            ty,
            offset_bits,
            bit_width: Some(width),
            invalid: false,
        });
        self
    }

    pub fn invalid_field(mut self, name: &str, ty: TypeRef, offset_bits: u64) -> Self {
        self.record.fields.push(FieldDecl {
            name: name.to_string(),
            ty,
            offset_bits,
            bit_width: None,
            invalid: true,
        });
        self
    }

    pub fn nested(mut self, decl: Decl) -> Self {
        self.record.decls.push(decl);
        self
    }

    pub fn build(self) -> RecordDecl {
        self.record
    }
}
