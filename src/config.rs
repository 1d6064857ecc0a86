//! Session configuration
//!
//! A [`SessionConfig`] is validated once when the session is built and
//! read-only afterwards. Timeouts configured here are enforced by the
//! transport, not by the enumeration core.

use crate::error::{ConfigError, ConfigResult};
use std::time::Duration;

/// Maximum directory levels a single walk may expand.
///
/// Recursion depth in the walker is bounded by this ceiling, which is the
/// sole protection against pathological or hostile directory trees.
pub const MAX_LIST_DEPTH: u32 = 64;

/// Highest accepted UID brute-force ceiling.
pub const MAX_BRUTE_UID: u32 = 65_535;

/// Default portmapper port.
pub const DEFAULT_PORT: u16 = 111;

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-session settings consumed by the enumeration engine.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Target host name or address.
    pub host: String,

    /// Portmapper port on the target.
    pub port: u16,

    /// Per-call timeout, enforced by the transport.
    pub timeout: Duration,

    /// Directory levels to expand when enumerating share contents.
    pub list_depth: u32,

    /// Inclusive UID ceiling for brute-forcing. `0` runs the same code path
    /// as a single-identity listing.
    pub brute_max_uid: u32,

    /// Initial UID presented on remote calls.
    pub uid: u32,

    /// GID presented on remote calls.
    pub gid: u32,
}

impl SessionConfig {
    /// Configuration for `host` with the defaults used by a plain
    /// single-identity enumeration run.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            list_depth: 1,
            brute_max_uid: 0,
            uid: 0,
            gid: 0,
        }
    }

    /// Set the portmapper port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the listing recursion depth.
    pub fn with_list_depth(mut self, depth: u32) -> Self {
        self.list_depth = depth;
        self
    }

    /// Set the UID brute-force ceiling.
    pub fn with_brute_max_uid(mut self, max_uid: u32) -> Self {
        self.brute_max_uid = max_uid;
        self
    }

    /// Set the initial identity.
    pub fn with_identity(mut self, uid: u32, gid: u32) -> Self {
        self.uid = uid;
        self.gid = gid;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        if self.timeout < Duration::from_secs(1) {
            return Err(ConfigError::InvalidTimeout {
                seconds: self.timeout.as_secs(),
            });
        }

        if self.list_depth > MAX_LIST_DEPTH {
            return Err(ConfigError::InvalidDepth {
                depth: self.list_depth,
                max: MAX_LIST_DEPTH,
            });
        }

        if self.brute_max_uid > MAX_BRUTE_UID {
            return Err(ConfigError::InvalidUidCeiling {
                max_uid: self.brute_max_uid,
                max: MAX_BRUTE_UID,
            });
        }

        Ok(())
    }
}
