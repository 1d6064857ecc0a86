//! Error types for nfs-recon
//!
//! Two error domains:
//! - [`TransportError`]: failures surfaced by the remote NFS service or the
//!   RPC layer beneath it. These are expected, per-share outcomes and never
//!   abort an enumeration loop.
//! - [`ConfigError`]: session configuration validation.
//!
//! The transport reports a structured category wherever it recognizes one;
//! free-text RPC errors are carried verbatim so the failure classifier can
//! fall back to substring matching against them.

use thiserror::Error;

/// Top-level error type for the nfs-recon library
#[derive(Error, Debug)]
pub enum ReconError {
    /// Transport/RPC errors
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors surfaced by the remote service or the RPC layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Could not reach the remote service at all
    #[error("failed to connect to {host}:{port}: {reason}")]
    Connect {
        host: String,
        port: u16,
        reason: String,
    },

    /// A call exceeded the session timeout
    #[error("operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Credentials rejected outright by the RPC layer
    #[error("RPC credentials rejected by server")]
    AuthRejected,

    /// The server demands a stronger authentication flavor than offered
    #[error("server requires a stronger authentication flavor")]
    AuthTooWeak,

    /// Authenticated, but denied at the directory-listing step
    #[error("insufficient permissions for directory listing")]
    InsufficientPermissions,

    /// Response had an unexpected shape
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Uncategorized RPC failure, message kept verbatim
    #[error("RPC error: {0}")]
    Rpc(String),
}

/// Session configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Target host is empty
    #[error("target host must not be empty")]
    EmptyHost,

    /// Recursion depth exceeds the supported ceiling
    #[error("invalid recursion depth {depth}: must be at most {max}")]
    InvalidDepth { depth: u32, max: u32 },

    /// Timeout too small to be useful
    #[error("invalid timeout {seconds}s: must be at least 1s")]
    InvalidTimeout { seconds: u64 },

    /// UID brute-force ceiling out of range
    #[error("invalid UID ceiling {max_uid}: must be at most {max}")]
    InvalidUidCeiling { max_uid: u32, max: u32 },
}

/// Result type alias for ReconError
pub type Result<T> = std::result::Result<T, ReconError>;

/// Result type alias for TransportError
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Result type alias for ConfigError
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
