//! Canonical re-rendering of a parsed tree as `tree`-style text.

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::entities::{Node, Tree};

pub trait TreeRender {
    fn to_term_tree(&self) -> TermTree<String>;
}

impl TreeRender for Node {
    fn to_term_tree(&self) -> TermTree<String> {
        let leaves: Vec<_> = self.children.values().map(|c| c.to_term_tree()).collect();
        TermTree::new(self.name.clone()).with_leaves(leaves)
    }
}

/// Render every root in order, one block per root.
///
/// Output uses `├── `, `└── `, `│   ` and four-space skips, so it parses back
/// to the same structure.
#[instrument(level = "debug", skip(tree))]
pub fn render(tree: &Tree) -> String {
    tree.roots()
        .map(|root| root.to_term_tree().to_string())
        .collect()
}
