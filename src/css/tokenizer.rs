//! logos-based selector tokenizer.
//!
//! Only selector lists go through the lexer; declaration bodies are raw text.
//! Longest match wins, so:
//! - `:has(` matches [`Token::HasOpen`], not `PseudoClass` + `(`
//! - `ChatBox.Message` is a single [`Token::Ident`]

use logos::Logos;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Opening of a structural constraint: `:has(`.
    #[token(":has(")]
    HasOpen,

    /// Pseudo-class: `:hover`, `:checked`, `:drag-hover`, etc.
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoClass,

    /// Type name or widget name. Dots allow qualified names like `ChatBox.Message`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.-]*")]
    Ident,

    /// `#`
    #[token("#")]
    Hash,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,

    /// `,`
    #[token(",")]
    Comma,

    /// `)`
    #[token(")")]
    ParenClose,
}

/// A token with its source text and byte span.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Tokenize a selector list.
///
/// Returns the byte offset of the first character that does not lex.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, usize> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push(Spanned {
                token,
                text: lexer.slice().to_owned(),
                start: span.start,
                end: span.end,
            }),
            Err(()) => return Err(span.start),
        }
    }
    Ok(tokens)
}
