// Wed Aug 26 2026 - Alex

use crate::tree::TypeKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// LP64 model, matching the targets the consuming bindings run on.
pub const POINTER_SIZE: u64 = 8;
pub const ENUM_SIZE: u64 = 4;

static PRIMITIVE_SIZES: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("void", 0);
    m.insert("char", 1);
    m.insert("signed char", 1);
    m.insert("unsigned char", 1);
    m.insert("short", 2);
    m.insert("short int", 2);
    m.insert("signed short", 2);
    m.insert("signed short int", 2);
    m.insert("unsigned short", 2);
    m.insert("unsigned short int", 2);
    m.insert("int", 4);
    m.insert("signed", 4);
    m.insert("signed int", 4);
    m.insert("unsigned", 4);
    m.insert("unsigned int", 4);
    m.insert("long", 8);
    m.insert("long int", 8);
    m.insert("signed long", 8);
    m.insert("signed long int", 8);
    m.insert("unsigned long", 8);
    m.insert("unsigned long int", 8);
    m.insert("long long", 8);
    m.insert("long long int", 8);
    m.insert("signed long long", 8);
    m.insert("signed long long int", 8);
    m.insert("unsigned long long", 8);
    m.insert("unsigned long long int", 8);
    m.insert("float", 4);
    m.insert("double", 8);
    m.insert("long double", 16);
    m.insert("_Bool", 1);
    m.insert("bool", 1);
    m
});

// Pre-seeded so headers can be sized without pulling in the system
// include tree; real stdint.h would only restate these on LP64.
static BUILTIN_TYPEDEFS: &[(&str, u64)] = &[
    ("int8_t", 1),
    ("uint8_t", 1),
    ("int16_t", 2),
    ("uint16_t", 2),
    ("int32_t", 4),
    ("uint32_t", 4),
    ("int64_t", 8),
    ("uint64_t", 8),
    ("intptr_t", 8),
    ("uintptr_t", 8),
    ("size_t", 8),
    ("ssize_t", 8),
    ("ptrdiff_t", 8),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedType {
    pub kind: TypeKind,
    pub size: u64,
}

impl ResolvedType {
    pub fn new(kind: TypeKind, size: u64) -> Self {
        Self { kind, size }
    }

    pub fn unknown() -> Self {
        Self {
            kind: TypeKind::Unknown,
            size: 0,
        }
    }
}

/// Registry of everything nameable that has been declared so far. The
/// parser feeds it as declarations complete, then queries it to size
/// field types. Struct and union tags registered with `None` are
/// incomplete (forward-declared) and size to 0.
#[derive(Debug, Default)]
pub struct TypeTable {
    typedefs: HashMap<String, ResolvedType>,
    struct_sizes: HashMap<String, Option<u64>>,
    union_sizes: HashMap<String, Option<u64>>,
    enum_tags: HashMap<String, ()>,
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = Self::default();
        for (name, size) in BUILTIN_TYPEDEFS {
            table.typedefs.insert(
                (*name).to_string(),
                ResolvedType::new(TypeKind::Primitive, *size),
            );
        }
        table
    }

    pub fn define_typedef(&mut self, name: &str, resolved: ResolvedType) {
        self.typedefs.insert(name.to_string(), resolved);
    }

    pub fn typedef(&self, name: &str) -> Option<ResolvedType> {
        self.typedefs.get(name).copied()
    }

    pub fn declare_struct(&mut self, tag: &str) {
        self.struct_sizes.entry(tag.to_string()).or_insert(None);
    }

    pub fn define_struct(&mut self, tag: &str, size: u64) {
        self.struct_sizes.insert(tag.to_string(), Some(size));
    }

    pub fn declare_union(&mut self, tag: &str) {
        self.union_sizes.entry(tag.to_string()).or_insert(None);
    }

    pub fn define_union(&mut self, tag: &str, size: u64) {
        self.union_sizes.insert(tag.to_string(), Some(size));
    }

    pub fn define_enum(&mut self, tag: &str) {
        self.enum_tags.insert(tag.to_string(), ());
    }

    /// Resolves a base type spelled as specifier words with qualifiers
    /// already removed, e.g. `["unsigned", "short"]`, `["uint64_t"]`, or
    /// `["struct", "rte_mempool"]`.
    pub fn resolve(&self, words: &[&str]) -> ResolvedType {
        match words {
            [] => ResolvedType::unknown(),
            ["struct", tag] => match self.struct_sizes.get(*tag) {
                Some(Some(size)) => ResolvedType::new(TypeKind::Record, *size),
                _ => ResolvedType::new(TypeKind::Record, 0),
            },
            ["union", tag] => match self.union_sizes.get(*tag) {
                Some(Some(size)) => ResolvedType::new(TypeKind::Record, *size),
                _ => ResolvedType::new(TypeKind::Record, 0),
            },
            ["enum", _] => ResolvedType::new(TypeKind::Enum, ENUM_SIZE),
            _ => {
                let joined = words.join(" ");
                if let Some(size) = PRIMITIVE_SIZES.get(joined.as_str()) {
                    return ResolvedType::new(TypeKind::Primitive, *size);
                }
                if let [single] = words {
                    if let Some(resolved) = self.typedef(single) {
                        return resolved;
                    }
                }
                log::debug!("unknown base type '{}', sizing as 0", joined);
                ResolvedType::unknown()
            }
        }
    }

    pub fn is_known_type_name(&self, name: &str) -> bool {
        PRIMITIVE_SIZES.contains_key(name) || self.typedefs.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_sizes() {
        let table = TypeTable::new();
        assert_eq!(table.resolve(&["unsigned", "short"]).size, 2);
        assert_eq!(table.resolve(&["long", "long"]).size, 8);
        assert_eq!(table.resolve(&["char"]).size, 1);
        assert_eq!(table.resolve(&["double"]).size, 8);
    }

    #[test]
    fn test_builtin_stdint_typedefs() {
        let table = TypeTable::new();
        assert_eq!(table.resolve(&["uint16_t"]).size, 2);
        assert_eq!(table.resolve(&["uint64_t"]).size, 8);
        assert_eq!(table.resolve(&["uint8_t"]).kind, TypeKind::Primitive);
    }

    #[test]
    fn test_incomplete_struct_sizes_to_zero() {
        let mut table = TypeTable::new();
        table.declare_struct("rte_mempool");
        let resolved = table.resolve(&["struct", "rte_mempool"]);
        assert_eq!(resolved.kind, TypeKind::Record);
        assert_eq!(resolved.size, 0);

        table.define_struct("rte_mempool", 24);
        assert_eq!(table.resolve(&["struct", "rte_mempool"]).size, 24);
    }

    #[test]
    fn test_enum_and_unknown() {
        let mut table = TypeTable::new();
        table.define_enum("color");
        assert_eq!(table.resolve(&["enum", "color"]).size, ENUM_SIZE);
        assert_eq!(table.resolve(&["mystery_t"]).size, 0);
        assert_eq!(table.resolve(&["mystery_t"]).kind, TypeKind::Unknown);
    }

    #[test]
    fn test_typedef_chain() {
        let mut table = TypeTable::new();
        let base = table.resolve(&["uint64_t"]);
        table.define_typedef("phys_addr_t", base);
        assert_eq!(table.resolve(&["phys_addr_t"]).size, 8);
    }
}
