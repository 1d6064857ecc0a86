//! Share enumeration core
//!
//! The components that turn a transport session into findings:
//!
//! - [`exports`]: flattens the chained export table into share entries
//! - [`probe`]: three-way permission probing per filesystem object
//! - [`walk`]: depth-bounded recursive listing with per-entry probing
//! - [`classify`]: maps mount/list failures to actionable categories
//! - [`brute`]: UID-space search and single-identity enumeration
//! - [`audit`]: per-share permissions + storage usage table
//!
//! Everything here is best-effort by contract: per-share and per-UID
//! failures are contained, reported through the sink, and never abort the
//! surrounding loop.

pub mod audit;
pub mod brute;
pub mod classify;
pub mod exports;
pub mod probe;
pub mod walk;

pub use audit::ShareAuditor;
pub use brute::{ShareEnumerator, UidBruteForcer};
pub use classify::{classify, report_failure, FailureKind};
pub use exports::{parse_exports, report_exports, share_paths, ExportEntry};
pub use probe::{probe, Permissions};
pub use walk::{ShareWalker, WalkEntry};
