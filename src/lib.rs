//! nfs-recon - NFS share enumeration for authorized security assessment
//!
//! Discovers exported NFS shares on a remote host, determines effective
//! read/write/execute permissions per share and per nested entry, walks
//! share contents under a depth budget, and searches a UID space for an
//! identity that grants access when the configured one does not.
//!
//! # Features
//!
//! - **Export discovery**: flattens the chained export table into an
//!   ordered share list with permitted client groups.
//!
//! - **Permission probing**: three independent ACCESS checks per object;
//!   a failed probe reads as not-granted, never as an error.
//!
//! - **Depth-bounded walking**: recursive listing with per-entry probing,
//!   best-effort by contract - one bad branch never costs the rest.
//!
//! - **UID brute-forcing**: ascending sweep with stop-on-first-success per
//!   share, so each share is reported at most once.
//!
//! - **Share auditing**: fixed-width permissions + storage usage table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       NfsSession                            │
//! │   exports() · audit_shares() · enumerate_shares() ·        │
//! │   brute_force()                                             │
//! └───────┬─────────────────────────────────────────┬───────────┘
//!         │                                         │
//!         ▼                                         ▼
//! ┌──────────────────────────────┐   ┌──────────────────────────┐
//! │      Enumeration core        │   │      Reporter sink       │
//! │  exports → walk → probe      │   │  display/success/fail/   │
//! │  classify · brute · audit    │   │  highlight/debug         │
//! └──────────────┬───────────────┘   └──────────────────────────┘
//!                │ NfsTransport
//!                ▼
//! ┌──────────────────────────────┐
//! │  RPC transport collaborator  │
//! │  portmap · MOUNT · NFSv3     │
//! └──────────────────────────────┘
//! ```
//!
//! The wire protocol lives entirely behind the [`NfsTransport`] trait; this
//! crate is the enumeration engine on top of it. Per-share and per-UID
//! failures are contained and reported - only failing to fetch the export
//! table at session start is fatal.

pub mod config;
pub mod error;
pub mod nfs;
pub mod report;
pub mod session;
pub mod units;
pub mod walker;

pub use config::SessionConfig;
pub use error::{ConfigError, ReconError, Result, TransportError, TransportResult};
pub use nfs::{
    flatten_entries, AuthContext, Capability, DirEntry, DirEntryNode, EntryKind, ExportNode,
    FileHandle, FsStat, GroupNode, NfsTransport,
};
pub use report::{BufferedReporter, ConsoleReporter, ReportEvent, Reporter};
pub use session::NfsSession;
pub use units::format_size;
pub use walker::{
    classify, parse_exports, probe, share_paths, ExportEntry, FailureKind, Permissions,
    ShareAuditor, ShareEnumerator, ShareWalker, UidBruteForcer, WalkEntry,
};
