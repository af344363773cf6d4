// Fri Jan 16 2026 - Alex

pub mod builder;
pub mod frontend;
pub mod target;

pub use builder::RecordDeclBuilder;
pub use frontend::{DumpFrontend, Frontend, FrontendError};
pub use target::{CxxAbi, TargetInfo};

use ahash::AHashMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Stable identity of a declaration within one translation unit.
pub type DeclId = i64;

/// Lookup surface the layout analyzer needs from the front-end.
///
/// All size, alignment and offset numbers are authoritative: the analyzer
/// copies them into the layout tree and never recomputes them.
pub trait TypeModel {
    fn target(&self) -> &TargetInfo;

    /// Resolves a record declaration by identity, if it was declared.
    fn record(&self, id: DeclId) -> Option<&RecordDecl>;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawDecl")]
pub enum Decl {
    Namespace(NamespaceDecl),
    Record(RecordDecl),
    /// Any other kind (linkage specs, functions, ...). Only its nested
    /// declarations matter for layout.
    Other(OtherDecl),
}

// The `kind` tag is split off first so that unknown kinds keep their
// nested declarations.
#[derive(Deserialize)]
struct RawDecl {
    kind: String,
    #[serde(flatten)]
    body: Map<String, Value>,
}

impl TryFrom<RawDecl> for Decl {
    type Error = serde_json::Error;

    fn try_from(raw: RawDecl) -> Result<Self, Self::Error> {
        let body = Value::Object(raw.body);
        match raw.kind.as_str() {
            "namespace" => serde_json::from_value(body).map(Decl::Namespace),
            "record" => serde_json::from_value(body).map(Decl::Record),
            _ => {
                let mut other: OtherDecl = serde_json::from_value(body)?;
                other.kind = raw.kind;
                Ok(Decl::Other(other))
            }
        }
    }
}

impl Decl {
    /// Declarations lexically nested inside this one.
    pub fn children(&self) -> &[Decl] {
        match self {
            Self::Namespace(ns) => &ns.decls,
            Self::Record(record) => &record.decls,
            Self::Other(other) => &other.decls,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamespaceDecl {
    pub name: String,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OtherDecl {
    #[serde(skip)]
    pub kind: String,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

impl OtherDecl {
    pub fn new(kind: &str, decls: Vec<Decl>) -> Self {
        Self {
            kind: kind.to_string(),
            decls,
        }
    }
}

/// A struct, class or union declaration with its target layout numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDecl {
    pub id: DeclId,
    /// Qualified name, e.g. `ns::Outer::Inner`.
    pub name: String,
    #[serde(default = "default_true")]
    pub complete: bool,
    #[serde(default)]
    pub invalid: bool,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Alignment in bytes.
    #[serde(default)]
    pub align: u64,
    /// Whether this record introduces its own vptr rather than sharing the
    /// primary base's.
    #[serde(default)]
    pub has_own_vptr: bool,
    #[serde(default)]
    pub bases: Vec<BaseSpec>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

impl RecordDecl {
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }
}

/// One entry of a record's base-specifier list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BaseSpec {
    pub record: DeclId,
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
    /// Sub-object offset in bytes. Ignored for virtual bases.
    #[serde(default)]
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub offset_bits: u64,
    /// Number of value bits for bit-fields.
    #[serde(default)]
    pub bit_width: Option<u64>,
    #[serde(default)]
    pub invalid: bool,
}

impl FieldDecl {
    pub fn is_bit_field(&self) -> bool {
        self.bit_width.is_some()
    }
}

/// The resolved type of a field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub align: u64,
    /// Set when the type is a record type.
    #[serde(default)]
    pub record: Option<DeclId>,
}

impl TypeRef {
    pub fn new(name: &str, size: u64, align: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
            align,
            record: None,
        }
    }

    pub fn record(name: &str, size: u64, align: u64, id: DeclId) -> Self {
        Self {
            record: Some(id),
            ..Self::new(name, size, align)
        }
    }
}

fn default_true() -> bool {
    true
}

/// A parsed program: its target and top-level declarations, indexed by
/// record identity.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    target: TargetInfo,
    decls: Vec<Decl>,
    index: AHashMap<DeclId, Vec<usize>>,
}

impl TranslationUnit {
    pub fn new(target: TargetInfo, decls: Vec<Decl>) -> Self {
        let mut index = AHashMap::new();
        let mut path = Vec::new();
        Self::index_decls(&decls, &mut path, &mut index);
        Self {
            target,
            decls,
            index,
        }
    }

    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    pub fn record_count(&self) -> usize {
        self.index.len()
    }

    // Records are addressed by their child-index path from the root so the
    // index does not borrow from the tree it describes.
    fn index_decls(
        decls: &[Decl],
        path: &mut Vec<usize>,
        index: &mut AHashMap<DeclId, Vec<usize>>,
    ) {
        for (i, decl) in decls.iter().enumerate() {
            path.push(i);
            if let Decl::Record(record) = decl {
                index.entry(record.id).or_insert_with(|| path.clone());
            }
            Self::index_decls(decl.children(), path, index);
            path.pop();
        }
    }

    fn resolve(&self, path: &[usize]) -> Option<&Decl> {
        let (first, rest) = path.split_first()?;
        let mut decl = self.decls.get(*first)?;
        for &i in rest {
            decl = decl.children().get(i)?;
        }
        Some(decl)
    }
}

impl TypeModel for TranslationUnit {
    fn target(&self) -> &TargetInfo {
        &self.target
    }

    fn record(&self, id: DeclId) -> Option<&RecordDecl> {
        let path = self.index.get(&id)?;
        match self.resolve(path)? {
            Decl::Record(record) => Some(record),
            _ => None,
        }
    }
}
