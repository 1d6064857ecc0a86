//! Recursive share walking
//!
//! Walks a mounted share depth-first under a caller-supplied depth budget,
//! probing effective permissions on every terminal entry. Walks are
//! best-effort: a failed subtree is logged and skipped without discarding
//! what has already been collected, so one bad branch never costs the rest
//! of the listing.

use crate::error::TransportResult;
use crate::nfs::{flatten_entries, AuthContext, EntryKind, FileHandle, NfsTransport};
use crate::walker::probe::{probe, Permissions};
use serde::Serialize;
use tracing::debug;

/// One reported filesystem object with its effective permissions.
///
/// Paths are logical: parent path joined with the entry name by `/`, no
/// normalization or symlink resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkEntry {
    pub path: String,
    pub permissions: Permissions,
}

/// Depth-bounded walker over a mounted share.
pub struct ShareWalker<'a, T: NfsTransport + ?Sized> {
    transport: &'a T,
    auth: &'a AuthContext,
}

impl<'a, T: NfsTransport + ?Sized> ShareWalker<'a, T> {
    pub fn new(transport: &'a T, auth: &'a AuthContext) -> Self {
        Self { transport, auth }
    }

    /// Walk `handle` at `path` with `depth` directory levels left to expand.
    ///
    /// `depth == 0` probes the handle itself and reports it as a single
    /// `path/` record without listing contents. With `depth > 0` the
    /// directory is listed; an authorization failure on this listing is
    /// returned to the caller, while failures deeper in the tree only
    /// terminate their own subtree. Directories sitting at the final budget
    /// level go through the same depth-0 base case, so they are still
    /// probed and reported rather than skipped.
    ///
    /// Results preserve depth-first, sibling order. `.` and `..` never
    /// appear. Entries the server returned without attributes carry no
    /// handle to probe and are skipped.
    pub fn walk(
        &self,
        handle: &FileHandle,
        path: &str,
        depth: u32,
    ) -> TransportResult<Vec<WalkEntry>> {
        if depth == 0 {
            let permissions = probe(self.transport, handle, self.auth);
            return Ok(vec![WalkEntry {
                path: format!("{path}/"),
                permissions,
            }]);
        }

        let entries = flatten_entries(self.transport.read_directory(handle, self.auth)?);

        let mut contents = Vec::new();
        for entry in entries {
            if entry.is_special() {
                continue;
            }

            let item_path = format!("{}/{}", path, entry.name);

            let Some(entry_handle) = entry.handle else {
                debug!("no attributes reported for {}, skipping", item_path);
                continue;
            };

            if entry.kind == Some(EntryKind::Directory) {
                // Contain subtree failures at the subtree boundary.
                match self.walk(&entry_handle, &item_path, depth - 1) {
                    Ok(subtree) => contents.extend(subtree),
                    Err(err) => debug!("error listing {}: {}", item_path, err),
                }
            } else {
                let permissions = probe(self.transport, &entry_handle, self.auth);
                contents.push(WalkEntry {
                    path: item_path,
                    permissions,
                });
            }
        }

        Ok(contents)
    }
}
