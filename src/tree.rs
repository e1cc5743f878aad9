use log::debug;

use crate::lexer::Token;
use crate::matcher::{self, Match, NestingContext, Segment};
use crate::node::{FormattingKind, Node};

/// Formatting tree together with every tag recognized while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub root: Node,
    /// Matches in pre-order: outer tags before inner, left before right
    pub matches: Vec<Match>,
}

/// Build the formatting tree for a token sequence
pub fn build(tokens: &[Token]) -> Tree {
    let mut builder = TreeBuilder {
        tokens,
        matches: Vec::new(),
    };
    let children = builder.children(Segment::whole(tokens), NestingContext::default());
    debug!(
        "built tree from {} tokens with {} tags",
        tokens.len(),
        builder.matches.len()
    );
    Tree {
        root: Node::Formatted {
            kind: FormattingKind::None,
            children,
        },
        matches: builder.matches,
    }
}

struct TreeBuilder<'a> {
    tokens: &'a [Token],
    matches: Vec<Match>,
}

impl TreeBuilder<'_> {
    /// Child nodes covering every token of `segment` exactly once
    fn children(&mut self, segment: Segment, context: NestingContext) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut cursor = segment.start();

        while cursor <= segment.end() {
            let window = segment.starting_at(cursor);
            let Some(found) = matcher::find_match(self.tokens, window, context) else {
                break;
            };
            self.matches.push(found);

            if found.open > cursor {
                nodes.push(self.leaf(cursor, found.open - 1));
            }

            // close >= open + 2, so the interior holds at least one token
            let inner = Segment::new(found.open + 1, found.close - 1, self.tokens.len());
            let children = self.children(inner, context.toggled(found.kind));
            nodes.push(Node::Formatted {
                kind: found.kind,
                children,
            });

            cursor = found.close + 1;
        }

        if cursor <= segment.end() {
            nodes.push(self.leaf(cursor, segment.end()));
        }

        nodes
    }

    fn leaf(&self, start: usize, end: usize) -> Node {
        let text = self.tokens[start..=end]
            .iter()
            .map(|token| token.content.as_str())
            .collect();
        Node::Text(text)
    }
}
