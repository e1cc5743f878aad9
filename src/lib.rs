//! Convert underscore emphasis markup (`_`, `__`, `___`) to HTML.
//!
//! ```text
//! __a_b_c__  ->  <strong>a<em>b</em>c</strong>
//! ```
//!
//! Underscore runs that do not form a valid pair are kept as literal text.

mod config;
mod html;
mod lexer;
mod matcher;
mod node;
mod tree;

use std::ops::Range;

use serde::Serialize;

pub use config::{CONFIG_FILE_NAME, Config, ConfigError, Emit, LogConfig, OutputConfig};
pub use html::markers;
pub use lexer::{Token, TokenKind};
pub use matcher::{Match, NestingContext, Segment, find_match};
pub use node::{FormattingKind, Node};

/// A recognized tag with the byte ranges of its delimiters in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLocation {
    pub kind: FormattingKind,
    pub open: Range<usize>,
    pub close: Range<usize>,
}

/// Split markup into text and delimiter tokens.
pub fn lex(markup: &str) -> Vec<Token> {
    lexer::lex(markup)
}

/// Parse markup into a formatting tree rooted at a `FormattingKind::None` node.
pub fn parse(markup: &str) -> Node {
    tree::build(&lex(markup)).root
}

/// Render a formatting tree to HTML.
pub fn render(node: &Node) -> String {
    html::node_to_html(node)
}

/// Convert markup to HTML.
pub fn convert(markup: &str) -> String {
    render(&parse(markup))
}

/// Locate every recognized tag in the source, outer tags first.
pub fn locate(markup: &str) -> Vec<TagLocation> {
    let tokens = lex(markup);
    tree::build(&tokens)
        .matches
        .into_iter()
        .map(|found| TagLocation {
            kind: found.kind,
            open: tokens[found.open].span.clone(),
            close: tokens[found.close].span.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn locate_reports_delimiter_ranges() {
        assert_eq!(
            locate("_ta_tb__tc__"),
            vec![
                TagLocation {
                    kind: FormattingKind::Italic,
                    open: 0..1,
                    close: 3..4,
                },
                TagLocation {
                    kind: FormattingKind::Bold,
                    open: 6..8,
                    close: 10..12,
                },
            ]
        );
    }

    #[test]
    fn locate_skips_inactive_underscores() {
        let locations = locate("_ta__tb_");
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].open, 0..1);
        assert_eq!(locations[0].close, 7..8);
    }

    #[test]
    fn parse_and_render_compose_to_convert() {
        let markup = "x __bold _and_ italic__ y";
        assert_eq!(render(&parse(markup)), convert(markup));
        assert_eq!(
            convert(markup),
            "x <strong>bold <em>and</em> italic</strong> y"
        );
    }
}
