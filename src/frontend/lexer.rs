// Mon Aug 24 2026 - Alex

use crate::frontend::error::ParseError;
use crate::tree::SourceLocation;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    StringLit,
    CharLit,
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn ident(text: &str, location: SourceLocation) -> Self {
        Self {
            kind: TokenKind::Ident,
            text: text.to_string(),
            location,
        }
    }

    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == text
    }

    pub fn is_punct(&self, text: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == text
    }

    /// Integer value of a number token, with C suffixes and hex/octal
    /// prefixes handled. Returns None for floats and malformed digits.
    pub fn int_value(&self) -> Option<u64> {
        if self.kind != TokenKind::Number {
            return None;
        }
        let trimmed = self
            .text
            .trim_end_matches(|c: char| matches!(c, 'u' | 'U' | 'l' | 'L'));
        if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
            return u64::from_str_radix(hex, 16).ok();
        }
        if trimmed.len() > 1 && trimmed.starts_with('0') && !trimmed.contains('.') {
            return u64::from_str_radix(&trimmed[1..], 8).ok();
        }
        trimmed.parse::<u64>().ok()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

const TWO_CHAR_PUNCTS: &[&str] = &[
    "->", "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "+=", "-=", "*=", "/=", "|=", "&=",
    "^=", "##",
];

/// Tokenizes one logical (spliced, comment-stripped) source line. The
/// preprocessor owns everything that spans lines, so the lexer never has
/// to look past the text it is given.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
}

impl Lexer {
    pub fn new(text: &str, line: u32) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
        if self.pos >= self.chars.len() {
            return Ok(None);
        }

        let start = self.pos;
        let location = SourceLocation::new(self.line, start as u32 + 1);
        let c = self.chars[self.pos];

        if c.is_alphabetic() || c == '_' {
            while self.pos < self.chars.len()
                && (self.chars[self.pos].is_alphanumeric() || self.chars[self.pos] == '_')
            {
                self.pos += 1;
            }
            return Ok(Some(Token {
                kind: TokenKind::Ident,
                text: self.slice(start),
                location,
            }));
        }

        if c.is_ascii_digit() {
            while self.pos < self.chars.len()
                && (self.chars[self.pos].is_alphanumeric() || self.chars[self.pos] == '.')
            {
                self.pos += 1;
            }
            return Ok(Some(Token {
                kind: TokenKind::Number,
                text: self.slice(start),
                location,
            }));
        }

        if c == '"' || c == '\'' {
            let what = if c == '"' { "string" } else { "character" };
            self.pos += 1;
            while self.pos < self.chars.len() && self.chars[self.pos] != c {
                if self.chars[self.pos] == '\\' {
                    self.pos += 1;
                }
                self.pos += 1;
            }
            if self.pos >= self.chars.len() {
                return Err(ParseError::UnterminatedLiteral {
                    what,
                    line: self.line,
                });
            }
            self.pos += 1;
            return Ok(Some(Token {
                kind: if c == '"' {
                    TokenKind::StringLit
                } else {
                    TokenKind::CharLit
                },
                text: self.slice(start),
                location,
            }));
        }

        if self.pos + 1 < self.chars.len() {
            let pair: String = self.chars[self.pos..self.pos + 2].iter().collect();
            if TWO_CHAR_PUNCTS.contains(&pair.as_str()) {
                self.pos += 2;
                return Ok(Some(Token {
                    kind: TokenKind::Punct,
                    text: pair,
                    location,
                }));
            }
        }

        self.pos += 1;
        Ok(Some(Token {
            kind: TokenKind::Punct,
            text: c.to_string(),
            location,
        }))
    }

    fn slice(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }
}

pub fn tokenize_line(text: &str, line: u32) -> Result<Vec<Token>, ParseError> {
    Lexer::new(text, line).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_field_line() {
        let tokens = tokenize_line("uint16_t buf_len;", 12).unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["uint16_t", "buf_len", ";"]);
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].location.line, 12);
    }

    #[test]
    fn test_tokenize_pointer_and_array() {
        let tokens = tokenize_line("void *buf_addr; uint8_t pad[16];", 1).unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["void", "*", "buf_addr", ";", "uint8_t", "pad", "[", "16", "]", ";"]
        );
    }

    #[test]
    fn test_number_values() {
        let tokens = tokenize_line("64 0x40 0100 12UL", 1).unwrap();
        let values: Vec<_> = tokens.iter().map(|t| t.int_value().unwrap()).collect();
        assert_eq!(values, vec![64, 64, 64, 12]);
    }

    #[test]
    fn test_two_char_puncts() {
        let tokens = tokenize_line("a && b || !c", 1).unwrap();
        assert!(tokens[1].is_punct("&&"));
        assert!(tokens[3].is_punct("||"));
        assert!(tokens[5].is_punct("!"));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            tokenize_line("\"oops", 7),
            Err(ParseError::UnterminatedLiteral { line: 7, .. })
        ));
    }
}
