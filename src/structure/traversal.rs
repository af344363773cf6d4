// Fri Jan 16 2026 - Alex

use crate::decl::{Decl, RecordDecl, TypeModel};
use crate::structure::{LayoutAnalyzer, RecordStore};

/// Walks a declaration tree in pre-order and stores the layout of every
/// complete record it meets, once per identity.
pub struct DeclVisitor<'a, M: TypeModel + ?Sized> {
    analyzer: LayoutAnalyzer<'a, M>,
    store: &'a mut RecordStore,
    inserted: usize,
}

impl<'a, M: TypeModel + ?Sized> DeclVisitor<'a, M> {
    pub fn new(model: &'a M, store: &'a mut RecordStore) -> Self {
        Self {
            analyzer: LayoutAnalyzer::new(model),
            store,
            inserted: 0,
        }
    }

    /// Traverses `decls` and everything nested in them. Returns the number
    /// of layouts added to the store by this visitor so far.
    pub fn visit(&mut self, decls: &[Decl]) -> usize {
        for decl in decls {
            self.visit_decl(decl);
        }
        self.inserted
    }

    fn visit_decl(&mut self, decl: &Decl) {
        if let Decl::Record(record) = decl {
            self.visit_record(record);
        }
        for child in decl.children() {
            self.visit_decl(child);
        }
    }

    fn visit_record(&mut self, record: &RecordDecl) {
        if !record.is_complete() {
            log::trace!("Skipping forward declaration {} (#{})", record.name, record.id);
            return;
        }
        if self.store.contains(record.id) {
            return;
        }
        let layout = self.analyzer.analyze(record);
        if self.store.insert(record.id, layout) {
            self.inserted += 1;
        }
    }
}
