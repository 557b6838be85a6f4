// Wed Aug 26 2026 - Alex

use crate::frontend::error::ParseError;
use crate::frontend::lexer::{Token, TokenKind};
use crate::frontend::types::{ResolvedType, TypeTable, POINTER_SIZE};
use crate::tree::{DeclKind, DeclNode, SourceLocation, TypeDesc, TypeKind};

const QUALIFIERS: &[&str] = &[
    "const",
    "volatile",
    "restrict",
    "__restrict",
    "__restrict__",
    "register",
    "static",
    "extern",
    "inline",
    "__inline",
    "__extension__",
    "_Atomic",
];

/// Recursive-descent declaration parser over the preprocessed token
/// stream. Only declarations are modeled; anything else (prototypes,
/// function definitions, stray expressions) collapses into an `Other`
/// node so the walk never aborts on real-world headers.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    types: TypeTable,
}

struct AggregateBody {
    children: Vec<DeclNode>,
    size: u64,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            types: TypeTable::new(),
        }
    }

    pub fn parse(mut self) -> Result<DeclNode, ParseError> {
        let mut root = DeclNode::new(
            DeclKind::TranslationUnit,
            String::new(),
            SourceLocation::new(1, 1),
        );

        while self.peek().is_some() {
            if self.eat_punct(";") {
                continue;
            }
            let node = self.parse_top_level()?;
            root.push_child(node);
        }
        Ok(root)
    }

    fn parse_top_level(&mut self) -> Result<DeclNode, ParseError> {
        let token = self.peek().cloned().ok_or(ParseError::UnexpectedEof {
            expected: "declaration".to_string(),
        })?;

        if token.is_ident("typedef") {
            return self.parse_typedef();
        }
        if is_tag_keyword(&token) && self.tag_introduces_body_or_forward() {
            let (node, _resolved, _spelling) = self.parse_tagged_decl()?;
            self.skip_to_semicolon();
            return Ok(node);
        }
        Ok(self.skip_other(token.location))
    }

    /// True when the upcoming struct/union/enum keyword starts a
    /// definition or a forward declaration, as opposed to being the type
    /// of a variable declaration (`struct foo bar;`).
    fn tag_introduces_body_or_forward(&self) -> bool {
        let mut look = self.pos + 1;
        if let Some(t) = self.tokens.get(look) {
            if t.kind == TokenKind::Ident {
                look += 1;
            }
        }
        match self.tokens.get(look) {
            Some(t) => t.is_punct("{") || t.is_punct(";"),
            None => false,
        }
    }

    /// Parses `struct|union|enum [tag] [{ body }]` and registers the
    /// result in the type table. The caller deals with whatever follows
    /// (declarators, attributes, the semicolon).
    fn parse_tagged_decl(&mut self) -> Result<(DeclNode, ResolvedType, String), ParseError> {
        let keyword = self.bump().ok_or(ParseError::UnexpectedEof {
            expected: "struct, union, or enum".to_string(),
        })?;
        let location = keyword.location;
        let keyword_text = keyword.text;

        let tag = if self.at_ident() {
            self.bump().map(|t| t.text).unwrap_or_default()
        } else {
            String::new()
        };

        let base_spelling = if tag.is_empty() {
            format!("{} <anonymous>", keyword_text)
        } else {
            format!("{} {}", keyword_text, tag)
        };

        let kind = match keyword_text.as_str() {
            "struct" => DeclKind::StructDecl,
            "union" => DeclKind::UnionDecl,
            _ => DeclKind::EnumDecl,
        };

        if !self.at_punct("{") {
            // Forward declaration.
            match kind {
                DeclKind::StructDecl => self.types.declare_struct(&tag),
                DeclKind::UnionDecl => self.types.declare_union(&tag),
                _ => {}
            }
            let node = DeclNode::new(kind, tag, location);
            let resolved = ResolvedType::new(
                if kind == DeclKind::EnumDecl {
                    TypeKind::Enum
                } else {
                    TypeKind::Record
                },
                0,
            );
            return Ok((node, resolved, base_spelling));
        }

        if kind == DeclKind::EnumDecl {
            self.skip_balanced_braces()?;
            if !tag.is_empty() {
                self.types.define_enum(&tag);
            }
            let node = DeclNode::new(kind, tag, location);
            let resolved = ResolvedType::new(TypeKind::Enum, crate::frontend::types::ENUM_SIZE);
            return Ok((node, resolved, base_spelling));
        }

        let body = self.parse_aggregate_body(kind)?;
        if !tag.is_empty() {
            match kind {
                DeclKind::StructDecl => self.types.define_struct(&tag, body.size),
                _ => self.types.define_union(&tag, body.size),
            }
        }
        let node = DeclNode::new(kind, tag, location).with_children(body.children);
        let resolved = ResolvedType::new(TypeKind::Record, body.size);
        Ok((node, resolved, base_spelling))
    }

    fn parse_aggregate_body(&mut self, kind: DeclKind) -> Result<AggregateBody, ParseError> {
        self.expect_punct("{")?;
        let mut children = Vec::new();

        while !self.at_punct("}") {
            if self.peek().is_none() {
                return Err(ParseError::UnexpectedEof {
                    expected: "'}' closing aggregate body".to_string(),
                });
            }
            if self.eat_punct(";") {
                continue;
            }
            self.parse_member(&mut children)?;
        }
        self.expect_punct("}")?;

        // Manual size model: structs sum their members, unions take the
        // widest one. No alignment padding; the downstream running-offset
        // model makes the same assumption.
        let sizes = children
            .iter()
            .filter(|c| c.is_field_decl())
            .filter_map(|c| c.type_desc().map(|t| t.size()));
        let size = if kind == DeclKind::UnionDecl {
            sizes.max().unwrap_or(0)
        } else {
            sizes.sum()
        };
        Ok(AggregateBody { children, size })
    }

    fn parse_member(&mut self, children: &mut Vec<DeclNode>) -> Result<(), ParseError> {
        let start = self.peek().cloned().ok_or(ParseError::UnexpectedEof {
            expected: "member declaration".to_string(),
        })?;

        // Nested aggregate definition, possibly followed by declarators.
        if is_tag_keyword(&start) && self.tag_introduces_nested_body() {
            let (node, resolved, base_spelling) = self.parse_tagged_decl()?;
            children.push(node);
            if self.at_punct(";") {
                self.bump();
                return Ok(());
            }
            self.parse_declarator_list(resolved, &base_spelling, None, children)?;
            return Ok(());
        }

        let mut words: Vec<String> = Vec::new();
        while let Some(token) = self.peek() {
            if token.kind != TokenKind::Ident {
                break;
            }
            let text = token.text.clone();
            if QUALIFIERS.contains(&text.as_str()) {
                self.bump();
                continue;
            }
            if text == "struct" || text == "union" || text == "enum" {
                self.bump();
                words.push(text);
                if self.at_ident() {
                    if let Some(tag) = self.bump() {
                        words.push(tag.text);
                    }
                }
                continue;
            }
            self.bump();
            words.push(text);
        }

        if words.is_empty() {
            log::warn!(
                "line {}: unparseable member starting at '{}', skipping to ';'",
                start.location.line,
                start.text
            );
            children.push(self.skip_other(start.location));
            return Ok(());
        }

        let (first_name, resolved, spelling) = if self.at_punct("*") {
            // Name follows the stars; everything gathered is specifier.
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            (None, self.types.resolve(&refs), words.join(" "))
        } else if self.at_punct("(") {
            // Function-pointer member or prototype; not modeled.
            log::warn!(
                "line {}: unsupported declarator after '{}', skipping to ';'",
                start.location.line,
                words.join(" ")
            );
            children.push(self.skip_other(start.location));
            return Ok(());
        } else {
            let name = words.pop().ok_or_else(|| ParseError::UnexpectedToken {
                line: start.location.line,
                found: start.text.clone(),
                expected: "member name".to_string(),
            })?;
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            (Some(name), self.types.resolve(&refs), words.join(" "))
        };

        self.parse_declarator_list(resolved, &spelling, first_name, children)
    }

    /// Parses `[*]* name ([dim])* [: width]` declarators separated by
    /// commas, ending at ';'. `first_name` is set when the member parse
    /// already consumed the first declarator's identifier.
    fn parse_declarator_list(
        &mut self,
        base: ResolvedType,
        base_spelling: &str,
        mut first_name: Option<String>,
        children: &mut Vec<DeclNode>,
    ) -> Result<(), ParseError> {
        loop {
            let mut stars = 0u32;
            let name = match first_name.take() {
                Some(name) => name,
                None => {
                    while self.at_punct("*")
                        || self
                            .peek()
                            .map(|t| {
                                t.kind == TokenKind::Ident && QUALIFIERS.contains(&t.text.as_str())
                            })
                            .unwrap_or(false)
                    {
                        if self.at_punct("*") {
                            stars += 1;
                        }
                        self.bump();
                    }
                    let token = self.bump().ok_or(ParseError::UnexpectedEof {
                        expected: "declarator name".to_string(),
                    })?;
                    if token.kind != TokenKind::Ident {
                        return Err(ParseError::UnexpectedToken {
                            line: token.location.line,
                            found: token.text,
                            expected: "declarator name".to_string(),
                        });
                    }
                    token.text
                }
            };

            let location = self.last_location();
            let mut dims: Vec<u64> = Vec::new();
            while self.eat_punct("[") {
                dims.push(self.parse_array_extent()?);
            }

            let mut bit_field = false;
            if self.eat_punct(":") {
                bit_field = true;
                // Width is irrelevant; bit-fields size to 0.
                while let Some(t) = self.peek() {
                    if t.is_punct(";") || t.is_punct(",") {
                        break;
                    }
                    self.bump();
                }
            }

            let type_desc = make_type_desc(base, base_spelling, stars, &dims, bit_field);
            children.push(
                DeclNode::new(DeclKind::FieldDecl, name, location).with_type(type_desc),
            );

            if self.eat_punct(",") {
                continue;
            }
            self.expect_punct(";")?;
            return Ok(());
        }
    }

    fn parse_array_extent(&mut self) -> Result<u64, ParseError> {
        let mut tokens = Vec::new();
        let mut depth = 1usize;
        loop {
            let token = self.bump().ok_or(ParseError::UnexpectedEof {
                expected: "']' closing array extent".to_string(),
            })?;
            if token.is_punct("[") {
                depth += 1;
            } else if token.is_punct("]") {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            tokens.push(token);
        }
        Ok(eval_const_expr(&tokens))
    }

    fn parse_typedef(&mut self) -> Result<DeclNode, ParseError> {
        let keyword = self.bump().ok_or(ParseError::UnexpectedEof {
            expected: "typedef".to_string(),
        })?;
        let location = keyword.location;

        let mut nested_child = None;
        let (base, _base_spelling) = if self
            .peek()
            .map(|t| is_tag_keyword(t))
            .unwrap_or(false)
            && self.tag_introduces_nested_body()
        {
            let (node, resolved, spelling) = self.parse_tagged_decl()?;
            nested_child = Some(node);
            (resolved, spelling)
        } else {
            let mut words: Vec<String> = Vec::new();
            while let Some(token) = self.peek() {
                if token.kind != TokenKind::Ident {
                    break;
                }
                let text = token.text.clone();
                if QUALIFIERS.contains(&text.as_str()) {
                    self.bump();
                    continue;
                }
                // Stop once the remaining identifier must be the typedef
                // name itself.
                let next_is_ident = self
                    .tokens
                    .get(self.pos + 1)
                    .map(|t| t.kind == TokenKind::Ident)
                    .unwrap_or(false);
                if !next_is_ident && !words.is_empty() && !self.word_extends_specifier(&text) {
                    break;
                }
                if text == "struct" || text == "union" || text == "enum" {
                    self.bump();
                    words.push(text);
                    if self.at_ident() {
                        if let Some(tag) = self.bump() {
                            words.push(tag.text);
                        }
                    }
                    continue;
                }
                self.bump();
                words.push(text);
            }
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            (self.types.resolve(&refs), words.join(" "))
        };

        let mut stars = 0u32;
        while self.at_punct("*") {
            stars += 1;
            self.bump();
        }
        let name_token = self.bump().ok_or(ParseError::UnexpectedEof {
            expected: "typedef name".to_string(),
        })?;
        if name_token.kind != TokenKind::Ident {
            return Err(ParseError::UnexpectedToken {
                line: name_token.location.line,
                found: name_token.text,
                expected: "typedef name".to_string(),
            });
        }
        let name = name_token.text;

        let mut dims: Vec<u64> = Vec::new();
        while self.eat_punct("[") {
            dims.push(self.parse_array_extent()?);
        }
        self.skip_to_semicolon();

        let resolved = if stars > 0 {
            ResolvedType::new(TypeKind::Pointer, POINTER_SIZE)
        } else if !dims.is_empty() {
            let count: u64 = dims.iter().product();
            ResolvedType::new(TypeKind::Array, base.size * count)
        } else {
            base
        };
        self.types.define_typedef(&name, resolved);

        let mut node = DeclNode::new(DeclKind::TypedefDecl, name, location);
        if let Some(child) = nested_child {
            node.push_child(child);
        }
        Ok(node)
    }

    /// True when `word` continues a multi-word primitive specifier, e.g.
    /// the "long" in "unsigned long".
    fn word_extends_specifier(&self, word: &str) -> bool {
        matches!(
            word,
            "unsigned" | "signed" | "long" | "short" | "int" | "char" | "double"
        )
    }

    fn tag_introduces_nested_body(&self) -> bool {
        let mut look = self.pos + 1;
        if let Some(t) = self.tokens.get(look) {
            if t.kind == TokenKind::Ident {
                look += 1;
            }
        }
        self.tokens
            .get(look)
            .map(|t| t.is_punct("{"))
            .unwrap_or(false)
    }

    fn skip_balanced_braces(&mut self) -> Result<(), ParseError> {
        self.expect_punct("{")?;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.bump().ok_or(ParseError::UnexpectedEof {
                expected: "'}'".to_string(),
            })?;
            if token.is_punct("{") {
                depth += 1;
            } else if token.is_punct("}") {
                depth -= 1;
            }
        }
        Ok(())
    }

    /// Consumes one unmodeled construct: everything up to the next ';' at
    /// brace depth zero, or a closing brace that returns to depth zero
    /// (function bodies).
    fn skip_other(&mut self, location: SourceLocation) -> DeclNode {
        let mut spelling = String::new();
        let mut depth = 0usize;
        while let Some(token) = self.bump() {
            if spelling.is_empty() && token.kind == TokenKind::Ident {
                spelling = token.text.clone();
            }
            if token.is_punct("{") {
                depth += 1;
            } else if token.is_punct("}") {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if self.at_punct(";") {
                        self.bump();
                    }
                    break;
                }
            } else if token.is_punct(";") && depth == 0 {
                break;
            }
        }
        DeclNode::new(DeclKind::Other, spelling, location)
    }

    fn skip_to_semicolon(&mut self) {
        while let Some(token) = self.bump() {
            if token.is_punct(";") {
                break;
            }
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_ident(&self) -> bool {
        self.peek().map(|t| t.kind == TokenKind::Ident).unwrap_or(false)
    }

    fn at_punct(&self, text: &str) -> bool {
        self.peek().map(|t| t.is_punct(text)).unwrap_or(false)
    }

    fn eat_punct(&mut self, text: &str) -> bool {
        if self.at_punct(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, text: &str) -> Result<(), ParseError> {
        match self.bump() {
            Some(token) if token.is_punct(text) => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                line: token.location.line,
                found: token.text,
                expected: format!("'{}'", text),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: format!("'{}'", text),
            }),
        }
    }

    fn last_location(&self) -> SourceLocation {
        if self.pos == 0 {
            return SourceLocation::new(1, 1);
        }
        self.tokens
            .get(self.pos - 1)
            .map(|t| t.location)
            .unwrap_or_default()
    }
}

fn is_tag_keyword(token: &Token) -> bool {
    token.is_ident("struct") || token.is_ident("union") || token.is_ident("enum")
}

fn make_type_desc(
    base: ResolvedType,
    base_spelling: &str,
    stars: u32,
    dims: &[u64],
    bit_field: bool,
) -> TypeDesc {
    if stars > 0 {
        let mut spelling = format!("{} *", base_spelling);
        for _ in 1..stars {
            spelling.push('*');
        }
        return TypeDesc::new(TypeKind::Pointer, spelling, POINTER_SIZE);
    }
    if bit_field {
        // The front end cannot size a bit-field; 0 tells the extractor
        // to leave it out.
        return TypeDesc::new(base.kind, base_spelling.to_string(), 0);
    }
    if !dims.is_empty() {
        let count: u64 = dims.iter().product();
        let mut spelling = base_spelling.to_string();
        for dim in dims {
            spelling.push_str(&format!(" [{}]", dim));
        }
        return TypeDesc::new(TypeKind::Array, spelling, base.size * count);
    }
    TypeDesc::new(base.kind, base_spelling.to_string(), base.size)
}

/// Folds the constant expressions that appear in array extents once
/// macros have been substituted: integers with `* / + - << >>`.
/// Anything it cannot fold becomes 0, which downstream means "unsized".
fn eval_const_expr(tokens: &[Token]) -> u64 {
    fn factor(tokens: &[Token], pos: &mut usize) -> u64 {
        match tokens.get(*pos) {
            Some(t) if t.is_punct("(") => {
                *pos += 1;
                let value = shift(tokens, pos);
                if tokens.get(*pos).map(|t| t.is_punct(")")).unwrap_or(false) {
                    *pos += 1;
                }
                value
            }
            Some(t) if t.kind == TokenKind::Number => {
                let value = t.int_value().unwrap_or(0);
                *pos += 1;
                value
            }
            Some(_) => {
                *pos += 1;
                0
            }
            None => 0,
        }
    }

    fn term(tokens: &[Token], pos: &mut usize) -> u64 {
        let mut value = factor(tokens, pos);
        while let Some(t) = tokens.get(*pos) {
            if t.is_punct("*") {
                *pos += 1;
                value = value.wrapping_mul(factor(tokens, pos));
            } else if t.is_punct("/") {
                *pos += 1;
                let rhs = factor(tokens, pos);
                value = if rhs == 0 { 0 } else { value / rhs };
            } else {
                break;
            }
        }
        value
    }

    fn sum(tokens: &[Token], pos: &mut usize) -> u64 {
        let mut value = term(tokens, pos);
        while let Some(t) = tokens.get(*pos) {
            if t.is_punct("+") {
                *pos += 1;
                value = value.wrapping_add(term(tokens, pos));
            } else if t.is_punct("-") {
                *pos += 1;
                value = value.wrapping_sub(term(tokens, pos));
            } else {
                break;
            }
        }
        value
    }

    fn shift(tokens: &[Token], pos: &mut usize) -> u64 {
        let mut value = sum(tokens, pos);
        while let Some(t) = tokens.get(*pos) {
            if t.is_punct("<<") {
                *pos += 1;
                value = value.wrapping_shl(sum(tokens, pos) as u32);
            } else if t.is_punct(">>") {
                *pos += 1;
                value = value.wrapping_shr(sum(tokens, pos) as u32);
            } else {
                break;
            }
        }
        value
    }

    let mut pos = 0usize;
    shift(tokens, &mut pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::preprocessor::Preprocessor;
    use crate::tree::find_struct;

    fn parse_source(source: &str) -> DeclNode {
        let mut pp = Preprocessor::new();
        let tokens = pp.preprocess_text(source).unwrap();
        Parser::new(tokens).parse().unwrap()
    }

    fn field<'a>(node: &'a DeclNode, name: &str) -> &'a DeclNode {
        node.children()
            .iter()
            .find(|c| c.is_field_decl() && c.spelling() == name)
            .unwrap()
    }

    #[test]
    fn test_struct_with_primitive_fields() {
        let root = parse_source(
            "struct point {\n    int x;\n    unsigned short y;\n    char tag;\n};\n",
        );
        let node = find_struct(&root, "point").unwrap();
        assert_eq!(field(node, "x").type_desc().unwrap().size(), 4);
        assert_eq!(field(node, "y").type_desc().unwrap().size(), 2);
        assert_eq!(
            field(node, "y").type_desc().unwrap().spelling(),
            "unsigned short"
        );
        assert_eq!(field(node, "tag").type_desc().unwrap().size(), 1);
    }

    #[test]
    fn test_pointer_fields() {
        let root = parse_source(
            "struct buf {\n    void *buf_addr;\n    struct buf *next;\n    char **argv;\n};\n",
        );
        let node = find_struct(&root, "buf").unwrap();
        for name in ["buf_addr", "next", "argv"] {
            let desc = field(node, name).type_desc().unwrap();
            assert!(desc.is_pointer(), "{} should be a pointer", name);
            assert_eq!(desc.size(), 8);
        }
        assert_eq!(field(node, "buf_addr").type_desc().unwrap().spelling(), "void *");
        assert_eq!(field(node, "argv").type_desc().unwrap().spelling(), "char **");
    }

    #[test]
    fn test_array_and_zero_length_marker() {
        let root = parse_source(
            "typedef uint64_t MARKER[0];\nstruct m {\n    MARKER cacheline0;\n    uint8_t pad[16];\n};\n",
        );
        let node = find_struct(&root, "m").unwrap();
        assert_eq!(field(node, "cacheline0").type_desc().unwrap().size(), 0);
        assert_eq!(field(node, "pad").type_desc().unwrap().size(), 16);
        assert_eq!(
            field(node, "pad").type_desc().unwrap().kind(),
            TypeKind::Array
        );
    }

    #[test]
    fn test_bit_field_sizes_to_zero() {
        let root = parse_source(
            "struct flags {\n    uint32_t l2_type:4;\n    uint32_t l3_type:4;\n    uint32_t plain;\n};\n",
        );
        let node = find_struct(&root, "flags").unwrap();
        assert_eq!(field(node, "l2_type").type_desc().unwrap().size(), 0);
        assert_eq!(field(node, "plain").type_desc().unwrap().size(), 4);
    }

    #[test]
    fn test_multi_declarator_line() {
        let root = parse_source("struct pair {\n    uint16_t a, b;\n};\n");
        let node = find_struct(&root, "pair").unwrap();
        let names: Vec<_> = node
            .children()
            .iter()
            .filter(|c| c.is_field_decl())
            .map(|c| c.spelling())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(field(node, "b").type_desc().unwrap().size(), 2);
    }

    #[test]
    fn test_nested_union_member() {
        let root = parse_source(
            "struct outer {\n    uint32_t before;\n    union {\n        uint32_t rss;\n        uint64_t tx_offload;\n    } hash;\n    uint32_t after;\n};\n",
        );
        let node = find_struct(&root, "outer").unwrap();
        // Union sizes to its widest member under the manual model.
        assert_eq!(field(node, "hash").type_desc().unwrap().size(), 8);
        assert_eq!(
            field(node, "hash").type_desc().unwrap().kind(),
            TypeKind::Record
        );
        // The nested definition itself is also present as a child.
        assert!(node
            .children()
            .iter()
            .any(|c| c.kind() == DeclKind::UnionDecl));
    }

    #[test]
    fn test_struct_tag_field_uses_registered_size() {
        let root = parse_source(
            "struct inner {\n    uint64_t a;\n    uint64_t b;\n};\nstruct outer {\n    struct inner pair;\n    struct unknown_fwd *ptr;\n};\n",
        );
        let node = find_struct(&root, "outer").unwrap();
        assert_eq!(field(node, "pair").type_desc().unwrap().size(), 16);
        assert_eq!(
            field(node, "pair").type_desc().unwrap().spelling(),
            "struct inner"
        );
        assert!(field(node, "ptr").type_desc().unwrap().is_pointer());
    }

    #[test]
    fn test_forward_declaration_comes_back_first() {
        let root = parse_source("struct s;\nstruct s {\n    int x;\n};\n");
        let found = find_struct(&root, "s").unwrap();
        assert!(found.children().is_empty());
    }

    #[test]
    fn test_typedef_resolution_chain() {
        let root = parse_source(
            "typedef uint64_t phys_addr_t;\nstruct m {\n    phys_addr_t buf_physaddr;\n};\n",
        );
        let node = find_struct(&root, "m").unwrap();
        assert_eq!(field(node, "buf_physaddr").type_desc().unwrap().size(), 8);
    }

    #[test]
    fn test_function_prototype_becomes_other() {
        let root = parse_source("int rte_mbuf_sanity_check(struct rte_mbuf *m, int h);\n");
        assert!(root.children().iter().any(|c| c.kind() == DeclKind::Other));
        assert!(find_struct(&root, "rte_mbuf").is_none());
    }

    #[test]
    fn test_enum_member_sizes_to_four() {
        let root = parse_source(
            "enum color { RED, GREEN };\nstruct paint {\n    enum color c;\n    uint8_t alpha;\n};\n",
        );
        let node = find_struct(&root, "paint").unwrap();
        assert_eq!(field(node, "c").type_desc().unwrap().size(), 4);
        assert_eq!(field(node, "c").type_desc().unwrap().kind(), TypeKind::Enum);
    }

    #[test]
    fn test_array_extent_expression() {
        let root = parse_source(
            "#define CACHE_LINE 64\nstruct padded {\n    char pad[CACHE_LINE - 8];\n    char grid[2][4];\n};\n",
        );
        let node = find_struct(&root, "padded").unwrap();
        assert_eq!(field(node, "pad").type_desc().unwrap().size(), 56);
        assert_eq!(field(node, "grid").type_desc().unwrap().size(), 8);
    }
}
