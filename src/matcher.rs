//! Opener/closer disambiguation for underscore runs.
//!
//! The matcher works on a [`Segment`] of the shared token array and a
//! [`NestingContext`] describing which tags enclose that segment. It never
//! mutates either: callers narrow the segment or toggle the context and pass
//! the new value down.

use log::trace;

use crate::lexer::Token;
use crate::node::FormattingKind;

/// An opener needs at least one content token and a closer after it.
const MIN_TOKENS_AFTER_OPENER: usize = 2;

/// Inclusive window `start..=end` over the token array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    start: usize,
    end: usize,
}

impl Segment {
    /// Panics when `start > end` or `end` is outside a token array of length `len`.
    pub fn new(start: usize, end: usize, len: usize) -> Self {
        assert!(
            start <= end && end < len,
            "invalid segment {start}..={end} over {len} tokens"
        );
        Self { start, end }
    }

    /// Segment covering every token. Panics on an empty token array.
    pub fn whole(tokens: &[Token]) -> Self {
        assert!(!tokens.is_empty(), "cannot build a segment over no tokens");
        Self::new(0, tokens.len() - 1, tokens.len())
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// The same segment starting at `start` instead. Panics if `start` is
    /// outside this segment.
    pub fn starting_at(&self, start: usize) -> Self {
        assert!(
            self.start <= start && start <= self.end,
            "{start} is outside segment {}..={}",
            self.start,
            self.end
        );
        Self {
            start,
            end: self.end,
        }
    }
}

/// Set of tags enclosing the current position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NestingContext {
    active: [bool; 4],
}

impl NestingContext {
    /// A copy of this context with `kind` flipped.
    pub fn toggled(self, kind: FormattingKind) -> Self {
        let mut active = self.active;
        active[kind.index()] = !active[kind.index()];
        Self { active }
    }

    pub fn is_active(&self, kind: FormattingKind) -> bool {
        self.active[kind.index()]
    }

    /// Inside italic or bold-italic no delimiter opens or closes a tag.
    pub fn allows_tags(&self) -> bool {
        !self.is_active(FormattingKind::Italic) && !self.is_active(FormattingKind::BoldItalic)
    }
}

/// A resolved tag: indices of its opening and closing delimiter tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub kind: FormattingKind,
    pub open: usize,
    pub close: usize,
}

fn is_inert_neighbour(ch: char) -> bool {
    ch == ' ' || ch.is_ascii_digit()
}

/// Find the leftmost tag in the segment.
pub fn find_match(tokens: &[Token], segment: Segment, context: NestingContext) -> Option<Match> {
    (segment.start()..=segment.end()).find_map(|index| match_at(tokens, segment, context, index))
}

/// Try to open a tag at `index` and close it inside the segment.
///
/// `None` means nothing starts here and the scan should move on by one token.
pub fn match_at(
    tokens: &[Token],
    segment: Segment,
    context: NestingContext,
    index: usize,
) -> Option<Match> {
    let kind = opening_kind(tokens, segment, context, index)?;
    match closing_index(tokens, segment, context, index, kind) {
        Some(close) => {
            trace!("matched {kind:?} at tokens {index}..={close}");
            Some(Match {
                kind,
                open: index,
                close,
            })
        }
        None => {
            trace!("discarding unclosed {kind:?} opener at token {index}");
            None
        }
    }
}

/// Kind of tag the token at `index` opens, if it is a valid opener.
pub fn opening_kind(
    tokens: &[Token],
    segment: Segment,
    context: NestingContext,
    index: usize,
) -> Option<FormattingKind> {
    let kind = tokens[index].formatting_kind();
    if kind == FormattingKind::None || !context.allows_tags() {
        return None;
    }
    if segment.end() - index < MIN_TOKENS_AFTER_OPENER {
        return None;
    }
    if tokens[index + 1].first_char().is_some_and(is_inert_neighbour) {
        return None;
    }
    Some(kind)
}

/// Whether the token at `index` closes a tag of `kind`.
pub fn closes_at(
    tokens: &[Token],
    context: NestingContext,
    index: usize,
    kind: FormattingKind,
) -> bool {
    index > 0
        && tokens[index].formatting_kind() == kind
        && !tokens[index - 1].last_char().is_some_and(is_inert_neighbour)
        && context.allows_tags()
}

fn closing_index(
    tokens: &[Token],
    segment: Segment,
    context: NestingContext,
    open: usize,
    kind: FormattingKind,
) -> Option<usize> {
    (open + MIN_TOKENS_AFTER_OPENER..=segment.end())
        .find(|&index| closes_at(tokens, context, index, kind))
}
