// Fri Jan 16 2026 - Alex

pub mod config;
pub mod decl;
pub mod session;
pub mod structure;

pub use config::Config;
pub use decl::{DeclId, DumpFrontend, Frontend, TranslationUnit, TypeModel};
pub use session::Session;
pub use structure::{FieldKind, LayoutAnalyzer, LayoutNode, RecordStore};
