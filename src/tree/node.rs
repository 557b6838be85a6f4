// Mon Aug 24 2026 - Alex

use std::fmt;

/// Syntactic category of a declaration-tree node. The extractor only
/// dispatches on `StructDecl` and `FieldDecl`; everything else is carried
/// so diagnostics can name what was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    TranslationUnit,
    StructDecl,
    UnionDecl,
    EnumDecl,
    FieldDecl,
    TypedefDecl,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Pointer,
    Array,
    Record,
    Enum,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Type descriptor attached to field nodes. `size` is the in-memory byte
/// count as the front end sees it; 0 means the type has no concrete size
/// (bit-field, incomplete type, zero-length marker array).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDesc {
    kind: TypeKind,
    spelling: String,
    size: u64,
}

impl TypeDesc {
    pub fn new(kind: TypeKind, spelling: String, size: u64) -> Self {
        Self { kind, spelling, size }
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_pointer(&self) -> bool {
        self.kind == TypeKind::Pointer
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.spelling, self.size)
    }
}

/// One node of the parsed declaration tree. Immutable once the front end
/// hands the tree out; owned data only, so sharing a tree across threads
/// for concurrent extraction is safe.
#[derive(Debug, Clone)]
pub struct DeclNode {
    kind: DeclKind,
    spelling: String,
    location: SourceLocation,
    type_desc: Option<TypeDesc>,
    children: Vec<DeclNode>,
}

impl DeclNode {
    pub fn new(kind: DeclKind, spelling: String, location: SourceLocation) -> Self {
        Self {
            kind,
            spelling,
            location,
            type_desc: None,
            children: Vec::new(),
        }
    }

    pub fn with_type(mut self, type_desc: TypeDesc) -> Self {
        self.type_desc = Some(type_desc);
        self
    }

    pub fn with_children(mut self, children: Vec<DeclNode>) -> Self {
        self.children = children;
        self
    }

    pub fn push_child(&mut self, child: DeclNode) {
        self.children.push(child);
    }

    pub fn kind(&self) -> DeclKind {
        self.kind
    }

    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn type_desc(&self) -> Option<&TypeDesc> {
        self.type_desc.as_ref()
    }

    pub fn children(&self) -> &[DeclNode] {
        &self.children
    }

    pub fn is_struct_decl(&self) -> bool {
        self.kind == DeclKind::StructDecl
    }

    pub fn is_field_decl(&self) -> bool {
        self.kind == DeclKind::FieldDecl
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclKind::TranslationUnit => "translation-unit",
            DeclKind::StructDecl => "struct-decl",
            DeclKind::UnionDecl => "union-decl",
            DeclKind::EnumDecl => "enum-decl",
            DeclKind::FieldDecl => "field-decl",
            DeclKind::TypedefDecl => "typedef-decl",
            DeclKind::Other => "other",
        };
        write!(f, "{}", name)
    }
}
