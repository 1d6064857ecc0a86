//! Export-table parsing
//!
//! The mount service returns the export table as a chain of nodes, each
//! carrying its own chain of permitted client groups. Both chains are
//! flattened here, preserving chain order, before anything else consumes
//! them.

use crate::nfs::{ExportNode, GroupNode};
use crate::report::Reporter;
use serde::Serialize;

/// One exported share and the client groups permitted to mount it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    /// Exported path.
    pub path: String,

    /// Named groups/hosts allowed to mount this export.
    pub groups: Vec<String>,
}

impl ExportEntry {
    /// `path group1, group2` line as shown in export listings.
    pub fn summary(&self) -> String {
        if self.groups.is_empty() {
            self.path.clone()
        } else {
            format!("{} {}", self.path, self.groups.join(", "))
        }
    }
}

/// Flatten the chained export table into an ordered list of entries.
///
/// An empty table is a valid response and yields an empty vector.
pub fn parse_exports(head: Option<&ExportNode>) -> Vec<ExportEntry> {
    let mut entries = Vec::new();
    let mut cursor = head;

    while let Some(node) = cursor {
        entries.push(ExportEntry {
            path: String::from_utf8_lossy(&node.dir).into_owned(),
            groups: flatten_groups(node.groups.as_deref()),
        });
        cursor = node.next.as_deref();
    }

    entries
}

fn flatten_groups(head: Option<&GroupNode>) -> Vec<String> {
    let mut groups = Vec::new();
    let mut cursor = head;

    while let Some(node) = cursor {
        groups.push(String::from_utf8_lossy(&node.name).into_owned());
        cursor = node.next.as_deref();
    }

    groups
}

/// Just the share paths, in export order.
pub fn share_paths(entries: &[ExportEntry]) -> Vec<String> {
    entries.iter().map(|entry| entry.path.clone()).collect()
}

/// Print each export with its permitted client groups.
pub fn report_exports<R: Reporter + ?Sized>(reporter: &R, entries: &[ExportEntry]) {
    for entry in entries {
        reporter.highlight(&entry.summary());
    }
}
