//! Transport-level data types
//!
//! These mirror what the RPC layer hands back from the remote service.
//! Export tables and directory listings arrive as sibling-chained nodes,
//! reflecting the protocol's paging structure; both are flattened
//! iteratively into plain vectors before the enumeration core sees them, so
//! arbitrarily long chains never touch the call stack.

use uuid::Uuid;

/// Opaque remote file handle.
///
/// Issued by the mount or listing call that produced it; never inspected or
/// mutated by the core, only passed back on subsequent calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle(Vec<u8>);

impl FileHandle {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Identity presented on every remote call.
///
/// Only `uid` is ever rewritten, and only by the brute-forcer; the remaining
/// fields are fixed for the session's lifetime.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Numeric user id.
    pub uid: u32,

    /// Numeric group id.
    pub gid: u32,

    /// Auxiliary group ids.
    pub aux_gids: Vec<u32>,

    /// Per-session client machine token.
    pub machine_name: String,
}

impl AuthContext {
    /// New identity with a fresh session token and no auxiliary groups.
    pub fn new(uid: u32, gid: u32) -> Self {
        Self {
            uid,
            gid,
            aux_gids: Vec::new(),
            machine_name: session_token(),
        }
    }
}

/// 6-character uppercase machine token, unique per session.
fn session_token() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_uppercase()
}

/// Capability probed by an ACCESS call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Read,
    Write,
    Execute,
}

impl Capability {
    /// NFSv3 ACCESS3 bitmask for this capability.
    ///
    /// Write maps to MODIFY: the probe asks whether existing content may be
    /// changed, not whether the object can be extended or deleted.
    pub fn access_mask(&self) -> u32 {
        match self {
            Capability::Read => 0x0001,    // ACCESS3_READ
            Capability::Write => 0x0004,   // ACCESS3_MODIFY
            Capability::Execute => 0x0020, // ACCESS3_EXECUTE
        }
    }
}

/// NFSv3 file type (ftype3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    BlockDevice,
    CharDevice,
    Symlink,
    Socket,
    Fifo,
    Unknown,
}

impl EntryKind {
    /// Convert from the wire ftype3 value.
    pub fn from_ftype(value: u32) -> Self {
        match value {
            1 => EntryKind::File,
            2 => EntryKind::Directory,
            3 => EntryKind::BlockDevice,
            4 => EntryKind::CharDevice,
            5 => EntryKind::Symlink,
            6 => EntryKind::Socket,
            7 => EntryKind::Fifo,
            _ => EntryKind::Unknown,
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        *self == EntryKind::Directory
    }
}

/// One node of a sibling-chained directory listing, as decoded from the
/// wire. Kind and handle are present only when the server reported
/// attributes for the entry.
#[derive(Debug, Clone)]
pub struct DirEntryNode {
    /// Entry name as raw bytes.
    pub name: Vec<u8>,

    /// Entry type, when attributes were reported.
    pub kind: Option<EntryKind>,

    /// Entry handle, when attributes were reported.
    pub handle: Option<FileHandle>,

    /// Next sibling in the chain.
    pub next: Option<Box<DirEntryNode>>,
}

/// A directory entry after chain flattening.
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Entry name, decoded for display.
    pub name: String,

    /// Entry type, when the server reported attributes.
    pub kind: Option<EntryKind>,

    /// Entry handle, when the server reported attributes.
    pub handle: Option<FileHandle>,
}

impl DirEntry {
    /// Check if this is the "." or ".." entry.
    pub fn is_special(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// Flatten a sibling chain into a plain vector, preserving chain order.
///
/// Chains can be arbitrarily long, so `next` links are walked with a loop
/// rather than recursion.
pub fn flatten_entries(head: Option<DirEntryNode>) -> Vec<DirEntry> {
    let mut entries = Vec::new();
    let mut cursor = head.map(Box::new);

    while let Some(node) = cursor {
        let node = *node;
        entries.push(DirEntry {
            name: String::from_utf8_lossy(&node.name).into_owned(),
            kind: node.kind,
            handle: node.handle,
        });
        cursor = node.next;
    }

    entries
}

/// One node of the chained export table.
#[derive(Debug, Clone)]
pub struct ExportNode {
    /// Exported directory path as raw bytes.
    pub dir: Vec<u8>,

    /// Head of this export's permitted-group chain.
    pub groups: Option<Box<GroupNode>>,

    /// Next export in the chain.
    pub next: Option<Box<ExportNode>>,
}

/// One node of an export's permitted-group chain.
#[derive(Debug, Clone)]
pub struct GroupNode {
    /// Group or host name as raw bytes.
    pub name: Vec<u8>,

    /// Next group in the chain.
    pub next: Option<Box<GroupNode>>,
}

/// Filesystem statistics returned by the FSSTAT procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStat {
    /// Free bytes on the exported filesystem.
    pub free_bytes: u64,

    /// Total bytes on the exported filesystem.
    pub total_bytes: u64,
}

impl FsStat {
    /// Bytes in use, saturating if the server reports free > total.
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.free_bytes)
    }
}
