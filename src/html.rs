use crate::node::{FormattingKind, Node};

/// Opening and closing markup for each formatting kind
pub const fn markers(kind: FormattingKind) -> (&'static str, &'static str) {
    match kind {
        FormattingKind::None => ("", ""),
        FormattingKind::Italic => ("<em>", "</em>"),
        FormattingKind::Bold => ("<strong>", "</strong>"),
        FormattingKind::BoldItalic => ("<strong><em>", "</em></strong>"),
    }
}

/// Render a formatting tree to HTML
pub fn node_to_html(node: &Node) -> String {
    let mut out = String::new();
    emit_node(node, &mut out);
    out
}

fn emit_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Formatted { kind, children } => {
            let (open, close) = markers(*kind);
            out.push_str(open);
            for child in children {
                emit_node(child, out);
            }
            out.push_str(close);
        }
    }
}
