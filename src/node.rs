use serde::Serialize;

/// Formatting produced by a matched pair of underscore runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormattingKind {
    /// Plain text, also used for runs that never form a tag
    None,
    /// `_text_`
    Italic,
    /// `__text__`
    Bold,
    /// `___text___`
    BoldItalic,
}

impl FormattingKind {
    /// Every kind that can open a tag, in run length order.
    pub const TAGS: [FormattingKind; 3] = [
        FormattingKind::Italic,
        FormattingKind::Bold,
        FormattingKind::BoldItalic,
    ];

    /// Map an underscore run length to the kind it would open.
    ///
    /// Runs of four or more underscores are inert and map to `None`.
    pub fn from_run_len(len: usize) -> Self {
        match len {
            1 => FormattingKind::Italic,
            2 => FormattingKind::Bold,
            3 => FormattingKind::BoldItalic,
            _ => FormattingKind::None,
        }
    }

    pub fn run_len(self) -> usize {
        match self {
            FormattingKind::None => 0,
            FormattingKind::Italic => 1,
            FormattingKind::Bold => 2,
            FormattingKind::BoldItalic => 3,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.run_len()
    }
}

/// Formatting tree built from a token sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Literal text, including any underscores that did not form a tag
    Text(String),
    /// A recognized tag and its content. The root uses `FormattingKind::None`.
    Formatted {
        kind: FormattingKind,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn kind(&self) -> FormattingKind {
        match self {
            Node::Text(_) => FormattingKind::None,
            Node::Formatted { kind, .. } => *kind,
        }
    }

    /// Child nodes of an interior node, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text(_) => &[],
            Node::Formatted { children, .. } => children,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Formatted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_lengths_map_to_kinds() {
        assert_eq!(FormattingKind::from_run_len(1), FormattingKind::Italic);
        assert_eq!(FormattingKind::from_run_len(2), FormattingKind::Bold);
        assert_eq!(FormattingKind::from_run_len(3), FormattingKind::BoldItalic);
        assert_eq!(FormattingKind::from_run_len(4), FormattingKind::None);
        assert_eq!(FormattingKind::from_run_len(0), FormattingKind::None);
    }

    #[test]
    fn kinds_are_ordered_by_run_length() {
        for kind in FormattingKind::TAGS {
            assert_eq!(FormattingKind::from_run_len(kind.run_len()), kind);
        }
    }

    #[test]
    fn leaf_has_no_children() {
        let leaf = Node::Text("plain".to_string());
        assert_eq!(leaf.kind(), FormattingKind::None);
        assert!(leaf.children().is_empty());
        assert_eq!(leaf.as_text(), Some("plain"));
    }
}
