use std::ops::Range;

use serde::Serialize;

use crate::node::FormattingKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Text,
    Delimiter,
}

/// A maximal run of text or of unescaped underscores
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Token text with `\_` unescaped to `_`
    pub content: String,
    /// Byte range of the token in the source text
    pub span: Range<usize>,
}

impl Token {
    fn new(kind: TokenKind, raw: &str, span: Range<usize>) -> Self {
        let content = match kind {
            TokenKind::Text => raw.replace("\\_", "_"),
            TokenKind::Delimiter => raw.to_string(),
        };
        Self {
            kind,
            content,
            span,
        }
    }

    pub fn is_delimiter(&self) -> bool {
        self.kind == TokenKind::Delimiter
    }

    /// Kind of tag this token could open or close. Text tokens and
    /// over-length runs are `None`.
    pub fn formatting_kind(&self) -> FormattingKind {
        match self.kind {
            TokenKind::Delimiter => FormattingKind::from_run_len(self.content.len()),
            TokenKind::Text => FormattingKind::None,
        }
    }

    pub fn first_char(&self) -> Option<char> {
        self.content.chars().next()
    }

    pub fn last_char(&self) -> Option<char> {
        self.content.chars().next_back()
    }
}

fn classify(ch: char, escaped: bool) -> TokenKind {
    if ch == '_' && !escaped {
        TokenKind::Delimiter
    } else {
        TokenKind::Text
    }
}

/// Split text into alternating text and delimiter tokens.
///
/// The tokens cover the whole input. Empty input yields a single empty
/// text token so that every token sequence has at least one element.
pub fn lex(text: &str) -> Vec<Token> {
    if text.is_empty() {
        return vec![Token::new(TokenKind::Text, "", 0..0)];
    }

    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_kind: Option<TokenKind> = None;
    // Consecutive backslashes seen right before the current character
    let mut backslashes = 0usize;

    for (offset, ch) in text.char_indices() {
        let kind = classify(ch, backslashes % 2 == 1);
        backslashes = if ch == '\\' { backslashes + 1 } else { 0 };

        match run_kind {
            Some(current) if current != kind => {
                tokens.push(Token::new(current, &text[run_start..offset], run_start..offset));
                run_start = offset;
            }
            _ => {}
        }
        run_kind = Some(kind);
    }

    if let Some(kind) = run_kind {
        tokens.push(Token::new(kind, &text[run_start..], run_start..text.len()));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds_and_contents(text: &str) -> Vec<(TokenKind, String)> {
        lex(text)
            .into_iter()
            .map(|token| (token.kind, token.content))
            .collect()
    }

    #[test]
    fn plain_text_is_one_token() {
        let text = "4OP[]!  1@$$%b23^";
        assert_eq!(
            kinds_and_contents(text),
            vec![(TokenKind::Text, text.to_string())]
        );
    }

    #[test]
    fn single_underscore_is_delimiter() {
        assert_eq!(
            kinds_and_contents("_"),
            vec![(TokenKind::Delimiter, "_".to_string())]
        );
    }

    #[test]
    fn empty_input_is_one_empty_token() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].content, "");
        assert_eq!(tokens[0].span, 0..0);
    }

    #[test]
    fn runs_alternate() {
        assert_eq!(
            kinds_and_contents("t__t___"),
            vec![
                (TokenKind::Text, "t".to_string()),
                (TokenKind::Delimiter, "__".to_string()),
                (TokenKind::Text, "t".to_string()),
                (TokenKind::Delimiter, "___".to_string()),
            ]
        );
    }

    #[test]
    fn escaped_underscore_joins_text() {
        assert_eq!(
            kinds_and_contents("a\\___bcd"),
            vec![
                (TokenKind::Text, "a_".to_string()),
                (TokenKind::Delimiter, "__".to_string()),
                (TokenKind::Text, "bcd".to_string()),
            ]
        );
    }

    #[test]
    fn escaped_backslash_does_not_escape_underscore() {
        assert_eq!(
            kinds_and_contents("a\\\\_b"),
            vec![
                (TokenKind::Text, "a\\\\".to_string()),
                (TokenKind::Delimiter, "_".to_string()),
                (TokenKind::Text, "b".to_string()),
            ]
        );
    }

    #[test]
    fn spans_point_into_source() {
        let text = "é_x_";
        let tokens = lex(text);
        assert_eq!(tokens[0].span, 0..2);
        assert_eq!(tokens[1].span, 2..3);
        assert_eq!(&text[tokens[2].span.clone()], "x");
        assert_eq!(tokens[3].span.end, text.len());
    }

    #[test]
    fn over_length_run_has_no_formatting_kind() {
        let tokens = lex("____");
        assert!(tokens[0].is_delimiter());
        assert_eq!(tokens[0].formatting_kind(), FormattingKind::None);
    }
}
