//! Per-object permission probing
//!
//! Effective permissions are established by three independent ACCESS calls
//! against the same handle and identity. Absence of a definitive grant,
//! whatever the reason, reads as not-granted; a probe never raises.

use crate::nfs::{AuthContext, Capability, FileHandle, NfsTransport};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Effective capabilities on one filesystem object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl Permissions {
    /// `rwx`-style flag string used in report lines.
    pub fn flags(&self) -> String {
        format!(
            "{}{}{}",
            if self.read { 'r' } else { '-' },
            if self.write { 'w' } else { '-' },
            if self.execute { 'x' } else { '-' }
        )
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flags())
    }
}

/// Probe read, write and execute on `handle` for `auth`.
///
/// The three checks never couple: a failed, malformed or denied reply for
/// one capability yields `false` for that capability alone. The caller
/// always gets a complete [`Permissions`], never an error.
pub fn probe<T: NfsTransport + ?Sized>(
    transport: &T,
    handle: &FileHandle,
    auth: &AuthContext,
) -> Permissions {
    Permissions {
        read: check(transport, handle, Capability::Read, auth),
        write: check(transport, handle, Capability::Write, auth),
        execute: check(transport, handle, Capability::Execute, auth),
    }
}

fn check<T: NfsTransport + ?Sized>(
    transport: &T,
    handle: &FileHandle,
    capability: Capability,
    auth: &AuthContext,
) -> bool {
    match transport.check_access(handle, capability, auth) {
        Ok(granted) => granted,
        Err(err) => {
            debug!("access probe for {:?} failed: {}", capability, err);
            false
        }
    }
}
