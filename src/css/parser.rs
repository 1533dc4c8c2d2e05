//! Stylesheet parser.
//!
//! Three passes over the source:
//! 1. [`preprocess`] strips comments and unwraps `/* suppress ... */` blocks
//! 2. rule blocks `selector-list { body }` are split out textually
//! 3. selector lists are lexed with [`crate::css::tokenizer`] and parsed by
//!    recursive descent; bodies are split into raw `key: value` pairs
//!
//! Any error aborts the whole parse.

use crate::css::expand::expand;
use crate::css::model::{Selector, StylesheetRule, UNIVERSAL};
use crate::css::state::State;
use crate::css::tokenizer::{tokenize, Spanned, Token};

/// Errors from stylesheet parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unterminated comment starting at byte {0}")]
    UnterminatedComment(usize),
    #[error("unterminated rule block starting at byte {0}")]
    UnterminatedBlock(usize),
    #[error("unexpected text at byte {offset}: {text:?}")]
    UnexpectedText { offset: usize, text: String },
    #[error("empty selector list at byte {0}")]
    EmptySelector(usize),
    #[error("invalid selector {selector:?} at position {position}: {message}")]
    InvalidSelector {
        selector: String,
        position: usize,
        message: String,
    },
    #[error("unknown pseudo-class :{0}")]
    UnknownPseudoClass(String),
    #[error(":has() must contain exactly one selector, got {0:?}")]
    HasList(String),
    #[error("malformed declaration {0:?}")]
    MalformedDeclaration(String),
}

/// Strip `/* ... */` comments, unwrapping `/* suppress <content> */` to `<content>`.
///
/// Comment markers nest inside a suppression, and the unwrapped content is
/// emitted verbatim, so `/* suppress /* x */ */` yields `/* x */`.
pub fn preprocess(input: &str) -> Result<String, ParseError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut offset = 0;

    while let Some(open) = rest.find("/*") {
        out.push_str(&rest[..open]);
        let start = offset + open;
        let after = &rest[open + 2..];

        let used = if let Some(body) = suppression_body(after) {
            let (content, consumed) =
                scan_suppressed(body).ok_or(ParseError::UnterminatedComment(start))?;
            out.push_str(content.trim_end());
            (after.len() - body.len()) + consumed
        } else {
            let close = after
                .find("*/")
                .ok_or(ParseError::UnterminatedComment(start))?;
            out.push(' ');
            close + 2
        };

        rest = &after[used..];
        offset = start + 2 + used;
    }

    out.push_str(rest);
    Ok(out)
}

/// If `after` (the text following `/*`) opens a suppression, return the text
/// following the `suppress` keyword and its whitespace.
fn suppression_body(after: &str) -> Option<&str> {
    let body = after.trim_start().strip_prefix("suppress")?;
    if body.starts_with(char::is_whitespace) || body.starts_with("*/") {
        Some(body.trim_start())
    } else {
        None
    }
}

/// Find the `*/` that closes a suppression, honouring nested `/* ... */`.
///
/// Returns the enclosed content and the number of bytes consumed including
/// the closing marker.
fn scan_suppressed(body: &str) -> Option<(&str, usize)> {
    let bytes = body.as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                if depth == 0 {
                    return Some((&body[..i], i + 2));
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    None
}

/// Parse a stylesheet into rules, one per selector chain, in source order.
pub fn parse_stylesheet(input: &str) -> Result<Vec<StylesheetRule>, ParseError> {
    let cleaned = preprocess(input)?;
    let mut rules = Vec::new();

    for block in split_blocks(&cleaned)? {
        let chains = parse_selector_list(block.selectors)?;
        let declarations = parse_declarations(block.body)?;
        for selectors in chains {
            rules.push(StylesheetRule {
                selectors,
                declarations: declarations.clone(),
            });
        }
    }

    Ok(rules)
}

/// One `selector-list { body }` block.
#[derive(Debug)]
struct Block<'a> {
    selectors: &'a str,
    body: &'a str,
}

fn split_blocks(text: &str) -> Result<Vec<Block<'_>>, ParseError> {
    let mut blocks = Vec::new();
    let mut rest = text;
    let mut base = 0;

    loop {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        let lead = base + (rest.len() - trimmed.len());

        let Some(open) = trimmed.find(['{', '}']).filter(|&i| trimmed.as_bytes()[i] == b'{')
        else {
            return Err(ParseError::UnexpectedText {
                offset: lead,
                text: trimmed.trim_end().to_owned(),
            });
        };

        let selectors = trimmed[..open].trim();
        if selectors.is_empty() {
            return Err(ParseError::EmptySelector(lead));
        }

        let body_start = open + 1;
        let close = find_block_end(&trimmed[body_start..])
            .map_err(|nested| match nested {
                Some(at) => ParseError::UnexpectedText {
                    offset: lead + body_start + at,
                    text: "{".to_owned(),
                },
                None => ParseError::UnterminatedBlock(lead + open),
            })?;

        blocks.push(Block {
            selectors,
            body: &trimmed[body_start..body_start + close],
        });

        let consumed = body_start + close + 1;
        rest = &trimmed[consumed..];
        base = lead + consumed;
    }

    Ok(blocks)
}

/// Index of the `}` closing a body, skipping quoted text.
///
/// `Err(Some(i))` reports a nested `{` at `i`; `Err(None)` an unterminated body.
fn find_block_end(body: &str) -> Result<usize, Option<usize>> {
    let mut quoted = false;
    for (i, c) in body.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '}' if !quoted => return Ok(i),
            '{' if !quoted => return Err(Some(i)),
            _ => {}
        }
    }
    Err(None)
}

/// Split a declaration body into expanded `(key, value)` pairs.
///
/// Later declarations of the same key replace earlier ones in place.
pub fn parse_declarations(body: &str) -> Result<Vec<(String, String)>, ParseError> {
    let mut declarations: Vec<(String, String)> = Vec::new();

    for segment in split_top_level(body, ';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let malformed = || ParseError::MalformedDeclaration(segment.to_owned());
        let (key, value) = segment.split_once(':').ok_or_else(malformed)?;
        let (key, value) = (key.trim(), value.trim());
        if !is_property_name(key) || value.is_empty() {
            return Err(malformed());
        }

        for (key, value) in expand(key, value) {
            match declarations.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => declarations.push((key, value)),
            }
        }
    }

    Ok(declarations)
}

/// Split on `separator` outside of double quotes and parentheses.
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted => depth = depth.saturating_sub(1),
            c if c == separator && !quoted && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn is_property_name(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '-')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Parse a comma-separated selector list into chains (ancestor-to-subject order).
pub fn parse_selector_list(source: &str) -> Result<Vec<Vec<Selector>>, ParseError> {
    let tokens = tokenize(source).map_err(|position| ParseError::InvalidSelector {
        selector: source.to_owned(),
        position,
        message: "unexpected character".into(),
    })?;

    let mut parser = SelectorParser {
        source,
        tokens,
        cursor: 0,
    };

    let mut chains = vec![parser.parse_chain(false)?];
    while parser.peek_is(&Token::Comma) {
        parser.advance();
        chains.push(parser.parse_chain(false)?);
    }
    if let Some(tok) = parser.peek() {
        return Err(parser.error_at(tok.start, format!("unexpected {:?}", tok.token)));
    }

    Ok(chains)
}

/// Recursive descent over selector tokens.
struct SelectorParser<'a> {
    source: &'a str,
    tokens: Vec<Spanned>,
    cursor: usize,
}

impl SelectorParser<'_> {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.cursor)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.peek().is_some_and(|t| &t.token == token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    /// Whether the next token touches the previous one (no whitespace).
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        self.peek().is_some_and(|curr| curr.start == prev.end)
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.source.len(), |t| t.start)
    }

    fn error_at(&self, position: usize, message: impl Into<String>) -> ParseError {
        ParseError::InvalidSelector {
            selector: self.source.to_owned(),
            position,
            message: message.into(),
        }
    }

    /// Parse tokens separated by whitespace or `>` until `,`, `)` (inside
    /// `:has(`), or the end of input.
    fn parse_chain(&mut self, nested: bool) -> Result<Vec<Selector>, ParseError> {
        let mut chain: Vec<Selector> = Vec::new();

        loop {
            let Some(tok) = self.peek() else { break };
            match tok.token {
                Token::Comma => break,
                Token::ParenClose if nested => break,
                Token::GreaterThan => {
                    self.advance();
                    chain.push(self.parse_compound()?.direct());
                }
                Token::Ident | Token::Hash | Token::Star => {
                    if !chain.is_empty() && self.is_adjacent() {
                        return Err(self.error_at(tok.start, "expected whitespace between selectors"));
                    }
                    chain.push(self.parse_compound()?);
                }
                _ => {
                    return Err(self.error_at(tok.start, format!("unexpected {:?}", tok.token)));
                }
            }
        }

        if chain.is_empty() {
            return Err(self.error_at(self.position(), "expected selector"));
        }
        Ok(chain)
    }

    /// Parse `(type | #name | *) (:pseudo)* (:has(chain))?`.
    fn parse_compound(&mut self) -> Result<Selector, ParseError> {
        let position = self.position();
        let mut selector = match self.advance() {
            Some(Spanned { token: Token::Ident, text, .. }) => Selector::new(text),
            Some(Spanned { token: Token::Star, .. }) => Selector::new(UNIVERSAL),
            Some(Spanned { token: Token::Hash, .. }) => {
                if !self.is_adjacent() || !self.peek_is(&Token::Ident) {
                    return Err(self.error_at(position, "expected name after '#'"));
                }
                let name = self.advance().map(|t| t.text).unwrap_or_default();
                Selector::new(format!("#{name}"))
            }
            _ => return Err(self.error_at(position, "expected type name, '#name' or '*'")),
        };

        while self.is_adjacent() {
            match self.peek().map(|t| t.token.clone()) {
                Some(Token::PseudoClass) => {
                    let Some(tok) = self.advance() else { break };
                    let name = &tok.text[1..];
                    let state = State::from_pseudo_class(name)
                        .ok_or_else(|| ParseError::UnknownPseudoClass(name.to_owned()))?;
                    selector.state |= state;
                }
                Some(Token::HasOpen) => {
                    let open = self.advance().map_or(position, |t| t.start);
                    let mut inner = self.parse_chain(true)?;
                    if self.peek_is(&Token::Comma) {
                        let close = self.skip_past_close();
                        return Err(ParseError::HasList(self.source[open..close].to_owned()));
                    }
                    if !self.peek_is(&Token::ParenClose) {
                        return Err(self.error_at(open, "unterminated :has("));
                    }
                    let close = self.advance().map_or(self.source.len(), |t| t.end);
                    if inner.len() != 1 {
                        return Err(ParseError::HasList(self.source[open..close].to_owned()));
                    }
                    selector.has = inner.pop().map(Box::new);
                    break;
                }
                _ => break,
            }
        }

        Ok(selector)
    }

    /// Consume up to and including the `)` closing the current `:has(`.
    /// Returns the byte offset just past it, or the end of input.
    fn skip_past_close(&mut self) -> usize {
        let mut depth = 0usize;
        while let Some(tok) = self.advance() {
            match tok.token {
                Token::HasOpen => depth += 1,
                Token::ParenClose if depth == 0 => return tok.end,
                Token::ParenClose => depth -= 1,
                _ => {}
            }
        }
        self.source.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(source: &str) -> Vec<Selector> {
        let mut chains = parse_selector_list(source).expect("valid selector");
        assert_eq!(chains.len(), 1);
        chains.remove(0)
    }

    // ── Comments ─────────────────────────────────────────────────────

    #[test]
    fn strips_plain_comments() {
        assert_eq!(preprocess("a /* gone */ b").unwrap(), "a   b");
    }

    #[test]
    fn suppressed_comment_survives() {
        assert_eq!(
            preprocess("/* suppress /* not a real comment */ */").unwrap(),
            "/* not a real comment */"
        );
    }

    #[test]
    fn suppression_unwraps_plain_content() {
        assert_eq!(
            preprocess("x { content: /* suppress \"a\" */; }").unwrap(),
            "x { content: \"a\"; }"
        );
    }

    #[test]
    fn suppress_needs_word_boundary() {
        assert_eq!(preprocess("/*suppressed*/x").unwrap(), " x");
    }

    #[test]
    fn unterminated_comment_fails() {
        assert_eq!(
            preprocess("a { } /* open"),
            Err(ParseError::UnterminatedComment(6))
        );
        assert!(preprocess("/* suppress /* inner */").is_err());
    }

    // ── Selectors ────────────────────────────────────────────────────

    #[test]
    fn single_type() {
        assert_eq!(chain("Button"), vec![Selector::new("Button")]);
    }

    #[test]
    fn id_and_universal() {
        assert_eq!(chain("#send"), vec![Selector::new("#send")]);
        assert_eq!(chain("*"), vec![Selector::new("*")]);
    }

    #[test]
    fn pseudo_classes_accumulate() {
        assert_eq!(
            chain("Button:hover:checked"),
            vec![Selector::new("Button").with_state(State::HOVER | State::CHECKED)]
        );
    }

    #[test]
    fn descendant_and_child() {
        assert_eq!(
            chain("Sidebar > Guild Icon"),
            vec![
                Selector::new("Sidebar"),
                Selector::new("Guild").direct(),
                Selector::new("Icon"),
            ]
        );
    }

    #[test]
    fn child_without_whitespace() {
        assert_eq!(
            chain("A>B"),
            vec![Selector::new("A"), Selector::new("B").direct()]
        );
    }

    #[test]
    fn has_constraint() {
        assert_eq!(
            chain("Guild:hover:has(> Pill:active) Icon"),
            vec![
                Selector::new("Guild")
                    .with_state(State::HOVER)
                    .with_has(Selector::new("Pill").with_state(State::ACTIVE).direct()),
                Selector::new("Icon"),
            ]
        );
    }

    #[test]
    fn selector_list_splits_on_commas() {
        let chains = parse_selector_list("A B, #c, *:hover").unwrap();
        assert_eq!(chains.len(), 3);
        assert_eq!(chains[1], vec![Selector::new("#c")]);
        assert_eq!(chains[2][0].state, State::HOVER);
    }

    #[test]
    fn qualified_type_names() {
        assert_eq!(chain("ChatBox.Message"), vec![Selector::new("ChatBox.Message")]);
    }

    #[test]
    fn unknown_pseudo_class_fails() {
        assert_eq!(
            parse_selector_list("Button:focus"),
            Err(ParseError::UnknownPseudoClass("focus".into()))
        );
    }

    #[test]
    fn has_list_fails() {
        assert!(matches!(
            parse_selector_list("A:has(B C)"),
            Err(ParseError::HasList(_))
        ));
    }

    #[test]
    fn comma_inside_has_is_a_list() {
        assert_eq!(
            parse_selector_list("Window:has(Badge, Pill) Label"),
            Err(ParseError::HasList(":has(Badge, Pill)".into()))
        );
        assert_eq!(
            parse_selector_list("A:has(B:has(C), D)"),
            Err(ParseError::HasList(":has(B:has(C), D)".into()))
        );
    }

    #[test]
    fn invalid_selectors_fail() {
        assert!(parse_selector_list("").is_err());
        assert!(parse_selector_list("A,").is_err());
        assert!(parse_selector_list("A ~ B").is_err());
        assert!(parse_selector_list("# a").is_err());
        assert!(parse_selector_list("A:has(B").is_err());
        assert!(parse_selector_list("A#b").is_err());
        assert!(parse_selector_list("A >").is_err());
    }

    // ── Declarations ─────────────────────────────────────────────────

    #[test]
    fn declarations_split_and_trim() {
        let decls = parse_declarations(" color : red ; background:rgb(1, 2, 3);").unwrap();
        assert_eq!(
            decls,
            vec![
                ("color".to_owned(), "red".to_owned()),
                ("background".to_owned(), "rgb(1, 2, 3)".to_owned()),
            ]
        );
    }

    #[test]
    fn declarations_split_on_first_colon() {
        let decls = parse_declarations("image: url(\"local:icon.svg\");").unwrap();
        assert_eq!(decls[0].1, "url(\"local:icon.svg\")");
    }

    #[test]
    fn semicolon_inside_quotes() {
        let decls = parse_declarations("tooltip: \"a; b\";").unwrap();
        assert_eq!(decls, vec![("tooltip".to_owned(), "\"a; b\"".to_owned())]);
    }

    #[test]
    fn final_semicolon_optional() {
        let decls = parse_declarations("color: red").unwrap();
        assert_eq!(decls.len(), 1);
    }

    #[test]
    fn compound_expanded_on_parse() {
        let decls = parse_declarations("margin: 4px 8px;").unwrap();
        assert_eq!(
            decls,
            vec![
                ("margin-top".to_owned(), "4px".to_owned()),
                ("margin-right".to_owned(), "8px".to_owned()),
                ("margin-bottom".to_owned(), "4px".to_owned()),
                ("margin-left".to_owned(), "8px".to_owned()),
            ]
        );
    }

    #[test]
    fn duplicate_key_later_wins() {
        let decls = parse_declarations("color: red; color: blue;").unwrap();
        assert_eq!(decls, vec![("color".to_owned(), "blue".to_owned())]);
    }

    #[test]
    fn malformed_declarations_fail() {
        assert!(parse_declarations("color red;").is_err());
        assert!(parse_declarations("color:;").is_err());
        assert!(parse_declarations(": red;").is_err());
        assert!(parse_declarations("1color: red;").is_err());
    }

    // ── Whole stylesheets ────────────────────────────────────────────

    #[test]
    fn parse_rules_in_order() {
        let rules = parse_stylesheet(
            "Button:hover { color: red; }\n/* comment */\nButton { color: blue; }",
        )
        .unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].subject().state, State::HOVER);
        assert_eq!(rules[1].declarations[0].1, "blue");
    }

    #[test]
    fn selector_list_shares_declarations() {
        let rules = parse_stylesheet("A, B > C { opacity: 0.5; }").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].declarations, rules[1].declarations);
        assert_eq!(rules[1].subject().name, "C");
    }

    #[test]
    fn empty_block_allowed() {
        let rules = parse_stylesheet("A {}").unwrap();
        assert!(rules[0].declarations.is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(parse_stylesheet("  /* nothing */  ").unwrap().is_empty());
    }

    #[test]
    fn structural_errors() {
        assert!(matches!(
            parse_stylesheet("A { color: red; "),
            Err(ParseError::UnterminatedBlock(_))
        ));
        assert!(matches!(
            parse_stylesheet("A { color: red; } trailing"),
            Err(ParseError::UnexpectedText { .. })
        ));
        assert!(matches!(
            parse_stylesheet("{ color: red; }"),
            Err(ParseError::EmptySelector(0))
        ));
        assert!(matches!(
            parse_stylesheet("} A { }"),
            Err(ParseError::UnexpectedText { offset: 0, .. })
        ));
        assert!(matches!(
            parse_stylesheet("A { B { } }"),
            Err(ParseError::UnexpectedText { .. })
        ));
    }

    #[test]
    fn brace_inside_quoted_value() {
        let rules = parse_stylesheet("A { tooltip: \"{x}\"; }").unwrap();
        assert_eq!(rules[0].declarations[0].1, "\"{x}\"");
    }
}
