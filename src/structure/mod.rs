// Fri Jan 16 2026 - Alex

pub mod analyzer;
pub mod cache;
pub mod error;
pub mod field;
pub mod layout;
pub mod serializer;
pub mod traversal;
pub mod validator;

pub use analyzer::LayoutAnalyzer;
pub use cache::RecordStore;
pub use error::StructureError;
pub use field::FieldKind;
pub use layout::LayoutNode;
pub use serializer::{layout_json, record_list_json, SerializableNode};
pub use traversal::DeclVisitor;
pub use validator::LayoutValidator;
