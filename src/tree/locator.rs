// Mon Aug 24 2026 - Alex

use crate::tree::{DeclKind, DeclNode};

/// Finds the first struct declaration spelled `name`, depth-first and
/// pre-order. A forward declaration shadows a later definition under this
/// policy; callers that need the definition must order their input so the
/// definition comes first (this matches the behavior the downstream
/// generators were built against).
pub fn find_struct<'a>(node: &'a DeclNode, name: &str) -> Option<&'a DeclNode> {
    if node.kind() == DeclKind::StructDecl && node.spelling() == name {
        return Some(node);
    }
    for child in node.children() {
        if let Some(found) = find_struct(child, name) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SourceLocation;

    fn struct_node(name: &str, line: u32) -> DeclNode {
        DeclNode::new(
            DeclKind::StructDecl,
            name.to_string(),
            SourceLocation::new(line, 1),
        )
    }

    #[test]
    fn test_finds_struct_at_any_depth() {
        let nested = struct_node("inner", 5);
        let outer = struct_node("outer", 3).with_children(vec![nested]);
        let root = DeclNode::new(
            DeclKind::TranslationUnit,
            String::new(),
            SourceLocation::default(),
        )
        .with_children(vec![outer]);

        let found = find_struct(&root, "inner").unwrap();
        assert_eq!(found.location().line, 5);
    }

    #[test]
    fn test_first_match_wins_in_preorder() {
        let forward = struct_node("rte_mbuf", 2);
        let definition = struct_node("rte_mbuf", 40).with_children(vec![DeclNode::new(
            DeclKind::FieldDecl,
            "buf_addr".to_string(),
            SourceLocation::new(41, 5),
        )]);
        let root = DeclNode::new(
            DeclKind::TranslationUnit,
            String::new(),
            SourceLocation::default(),
        )
        .with_children(vec![forward, definition]);

        let found = find_struct(&root, "rte_mbuf").unwrap();
        assert_eq!(found.location().line, 2);
        assert!(found.children().is_empty());
    }

    #[test]
    fn test_not_found_returns_none() {
        let root = DeclNode::new(
            DeclKind::TranslationUnit,
            String::new(),
            SourceLocation::default(),
        )
        .with_children(vec![struct_node("other", 1)]);

        assert!(find_struct(&root, "rte_mbuf").is_none());
    }

    #[test]
    fn test_union_with_same_name_does_not_match() {
        let union_node = DeclNode::new(
            DeclKind::UnionDecl,
            "rte_mbuf".to_string(),
            SourceLocation::new(1, 1),
        );
        let root = DeclNode::new(
            DeclKind::TranslationUnit,
            String::new(),
            SourceLocation::default(),
        )
        .with_children(vec![union_node]);

        assert!(find_struct(&root, "rte_mbuf").is_none());
    }
}
