//! Domain entities: core data structures

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Serialize, Serializer};

/// One connector glyph, or four spaces / no-break spaces.
fn indent_unit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[│├└]|[ \x{00A0}]{4}").expect("indent unit pattern is valid")
    })
}

fn decoration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[│├└─\s]*").expect("decoration pattern is valid"))
}

/// Nesting depth of a decorated line.
///
/// Counts, left to right, every connector glyph and every run of exactly four
/// spaces or no-break spaces.
pub fn indent_of(line: &str) -> usize {
    indent_unit_regex().find_iter(line).count()
}

/// Name carried by a decorated line, with all leading decoration and
/// surrounding whitespace removed. Empty for structural lines.
pub fn name_of(line: &str) -> &str {
    let stripped = match decoration_regex().find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    };
    stripped.trim()
}

/// One line of tree text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number in the caller's text
    pub number: usize,
    pub raw: &'a str,
    pub indent: usize,
    pub name: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, raw: &'a str) -> Self {
        Self {
            number,
            raw,
            indent: indent_of(raw),
            name: name_of(raw),
        }
    }

    /// Structural lines (only decoration) carry no entry.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
    }
}

/// A named entry with children in order of discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub children: IndexMap<String, Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: IndexMap::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(Node::node_count).sum::<usize>()
    }

    /// Levels in this subtree, counting self as 1.
    pub fn depth(&self) -> usize {
        1 + self.children.values().map(Node::depth).max().unwrap_or(0)
    }

    fn collect_leaf_paths(&self, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
        prefix.push(self.name.clone());
        if self.is_leaf() {
            out.push(prefix.clone());
        } else {
            for child in self.children.values() {
                child.collect_leaf_paths(prefix, out);
            }
        }
        prefix.pop();
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.children.serialize(serializer)
    }
}

/// The parsed hierarchy: top-level names mapped to their nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    roots: IndexMap<String, Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.roots.get(name)
    }

    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.roots.values()
    }

    /// Follow a sequence of names from the top level down.
    pub fn get_path(&self, path: &[&str]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.roots.get(*first)?, |node, name| node.child(name))
    }

    pub fn node_count(&self) -> usize {
        self.roots.values().map(Node::node_count).sum()
    }

    pub fn depth(&self) -> usize {
        self.roots.values().map(Node::depth).max().unwrap_or(0)
    }

    /// Every root-to-leaf path, in document order.
    pub fn leaf_paths(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        for root in self.roots.values() {
            root.collect_leaf_paths(&mut prefix, &mut out);
        }
        out
    }

    /// Children map at `parents`, creating missing intermediate nodes.
    pub(crate) fn children_at_mut(&mut self, parents: &[String]) -> &mut IndexMap<String, Node> {
        let mut level = &mut self.roots;
        for parent in parents {
            level = &mut level
                .entry(parent.clone())
                .or_insert_with(|| Node::new(parent.clone()))
                .children;
        }
        level
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.roots.serialize(serializer)
    }
}
