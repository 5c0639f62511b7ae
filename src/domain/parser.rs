//! Indentation-driven tree text parser.
//!
//! Rebuilds parent/child relations from decorated `tree` output in a single
//! pass, carrying only a stack of open ancestor names between lines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::entities::{Line, Node, Tree};
use crate::domain::error::{DomainError, DomainResult};

/// Whitespace stripped from both ends of the input. ASCII only, so a leading
/// no-break-space indent unit survives.
const TRIMMED: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// What to do when a name repeats among siblings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Replace the earlier entry with a fresh, empty one (keeps its position).
    #[default]
    Overwrite,
    /// Keep the earlier entry and its children; later children join it.
    Merge,
    /// Fail with `DomainError::DuplicateEntry`.
    Reject,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DuplicatePolicy::Overwrite => "overwrite",
            DuplicatePolicy::Merge => "merge",
            DuplicatePolicy::Reject => "reject",
        };
        f.write_str(s)
    }
}

impl FromStr for DuplicatePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            "merge" => Ok(DuplicatePolicy::Merge),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(DomainError::UnknownDuplicatePolicy(other.to_string())),
        }
    }
}

/// Open ancestors, one entry per indent level.
#[derive(Debug, Default)]
struct ParentStack {
    names: Vec<String>,
}

impl ParentStack {
    fn push(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    /// Pop `n` levels; never underflows.
    fn pop(&mut self, n: usize) {
        let keep = self.names.len().saturating_sub(n);
        self.names.truncate(keep);
    }

    fn path(&self) -> &[String] {
        &self.names
    }
}

/// Parser for canonical Unicode tree text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeTextParser {
    duplicates: DuplicatePolicy,
}

impl TreeTextParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Parse tree text into a nested structure.
    ///
    /// Only `DuplicatePolicy::Reject` can fail; every other input degrades to a
    /// best-effort tree.
    #[instrument(level = "debug", skip(self, text), fields(bytes = text.len(), duplicates = %self.duplicates))]
    pub fn try_parse(&self, text: &str) -> DomainResult<Tree> {
        let mut tree = Tree::new();
        let mut parents = ParentStack::default();
        let mut last_indent: Option<usize> = None;

        let body = text.trim_start_matches(&TRIMMED[..]);
        let skipped = text[..text.len() - body.len()].matches('\n').count();

        for (idx, raw) in body.trim_end_matches(&TRIMMED[..]).split('\n').enumerate() {
            let line = Line::new(skipped + idx + 1, raw);
            if line.is_blank() {
                continue;
            }
            let this_indent = line.indent;

            match last_indent {
                Some(last) if this_indent < last => {
                    trace!(line = line.number, raw = line.raw, "ascend");
                    parents.pop(1 + (last - this_indent));
                }
                Some(last) if this_indent == last => {
                    trace!(line = line.number, raw = line.raw, "sibling");
                    parents.pop(1);
                }
                _ => {
                    trace!(line = line.number, raw = line.raw, "descend");
                }
            }

            self.store(&mut tree, parents.path(), &line)?;
            parents.push(line.name);
            last_indent = Some(this_indent);
        }

        debug!(roots = tree.len(), nodes = tree.node_count(), "parsed tree");
        Ok(tree)
    }

    /// Insert `line.name` under the node addressed by `parents`.
    fn store(&self, tree: &mut Tree, parents: &[String], line: &Line<'_>) -> DomainResult<()> {
        let siblings = tree.children_at_mut(parents);
        match (siblings.contains_key(line.name), self.duplicates) {
            (true, DuplicatePolicy::Merge) => {}
            (true, DuplicatePolicy::Reject) => {
                return Err(DomainError::DuplicateEntry {
                    name: line.name.to_string(),
                    line: line.number,
                });
            }
            _ => {
                siblings.insert(line.name.to_string(), Node::new(line.name));
            }
        }
        Ok(())
    }
}

/// Parse tree text with the default (overwrite) policy.
pub fn parse(text: &str) -> Tree {
    // overwrite never rejects
    TreeTextParser::new().try_parse(text).unwrap_or_default()
}
