//! NFS transport seam
//!
//! The enumeration core never speaks the wire protocol itself. Everything it
//! needs from the remote host goes through [`NfsTransport`]: a blocking
//! capability interface over an established portmap/mount/NFSv3 session.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │              Enumeration core (walker/)              │
//! │   exports · probe · walk · classify · brute · audit  │
//! └──────────────────────────┬───────────────────────────┘
//!                            │ NfsTransport
//!                            ▼
//! ┌──────────────────────────────────────────────────────┐
//! │           RPC transport (external crate/FFI)         │
//! │   portmap lookup · MOUNT · READDIRPLUS · ACCESS      │
//! │   wire codec, timeouts, retries                      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Timeouts and retries live behind the trait; a call that times out
//! surfaces as an ordinary [`TransportError`](crate::error::TransportError)
//! and is handled like any other per-share failure. Implementations should
//! return the structured error variants (`AuthRejected`, `AuthTooWeak`,
//! `InsufficientPermissions`) whenever they can recognize the condition,
//! and fall back to the free-text `Rpc` variant with the server's message
//! verbatim otherwise.

pub mod types;

use crate::error::TransportResult;

pub use types::{
    flatten_entries, AuthContext, Capability, DirEntry, DirEntryNode, EntryKind, ExportNode,
    FileHandle, FsStat, GroupNode,
};

/// Blocking capability interface over an established NFS session.
pub trait NfsTransport {
    /// Mount an exported share and return the handle of its root.
    fn mount(&self, share: &str, auth: &AuthContext) -> TransportResult<FileHandle>;

    /// Release the current mount for this identity.
    fn unmount(&self, auth: &AuthContext) -> TransportResult<()>;

    /// Fetch the export table as its raw chained structure.
    ///
    /// An empty table is a valid response and comes back as `None`.
    fn exports(&self) -> TransportResult<Option<ExportNode>>;

    /// List a directory as its raw sibling-chained structure.
    ///
    /// Fails with
    /// [`TransportError::InsufficientPermissions`](crate::error::TransportError::InsufficientPermissions)
    /// when the server answers the listing with an authorization failure.
    fn read_directory(
        &self,
        dir: &FileHandle,
        auth: &AuthContext,
    ) -> TransportResult<Option<DirEntryNode>>;

    /// Ask whether `capability` is granted on `handle` for `auth`.
    ///
    /// The answer is positive only when the response grants exactly the
    /// requested capability bit.
    fn check_access(
        &self,
        handle: &FileHandle,
        capability: Capability,
        auth: &AuthContext,
    ) -> TransportResult<bool>;

    /// Query filesystem statistics for a mounted share root.
    fn stat_filesystem(&self, handle: &FileHandle, auth: &AuthContext) -> TransportResult<FsStat>;
}

impl<T: NfsTransport + ?Sized> NfsTransport for &T {
    fn mount(&self, share: &str, auth: &AuthContext) -> TransportResult<FileHandle> {
        (**self).mount(share, auth)
    }

    fn unmount(&self, auth: &AuthContext) -> TransportResult<()> {
        (**self).unmount(auth)
    }

    fn exports(&self) -> TransportResult<Option<ExportNode>> {
        (**self).exports()
    }

    fn read_directory(
        &self,
        dir: &FileHandle,
        auth: &AuthContext,
    ) -> TransportResult<Option<DirEntryNode>> {
        (**self).read_directory(dir, auth)
    }

    fn check_access(
        &self,
        handle: &FileHandle,
        capability: Capability,
        auth: &AuthContext,
    ) -> TransportResult<bool> {
        (**self).check_access(handle, capability, auth)
    }

    fn stat_filesystem(&self, handle: &FileHandle, auth: &AuthContext) -> TransportResult<FsStat> {
        (**self).stat_filesystem(handle, auth)
    }
}
