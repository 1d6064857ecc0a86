//! Failure classification for mount and list operations
//!
//! Mount and listing failures fall into a small set of actionable
//! categories. Structured transport errors map directly; free-text RPC
//! errors fall back to substring matching against the strings common
//! server implementations put on the wire. The fallback is best-effort by
//! nature, not protocol-guaranteed.

use crate::error::TransportError;
use crate::report::Reporter;
use tracing::error;

/// Actionable category of a share-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Credentials rejected outright by the RPC layer.
    AccessDenied,

    /// The server demands a stronger authentication mechanism (Kerberos).
    WeakAuthRequired,

    /// Authenticated, but denied at the directory-listing step.
    InsufficientPermissions,

    /// Anything else; reported with full detail.
    Unclassified,
}

/// Classify a transport failure into its reporting category.
///
/// Structured variants are authoritative; the substring match over
/// free-text RPC errors exists only for transports that could not
/// categorize the failure themselves.
pub fn classify(err: &TransportError) -> FailureKind {
    match err {
        TransportError::AuthRejected => FailureKind::AccessDenied,
        TransportError::AuthTooWeak => FailureKind::WeakAuthRequired,
        TransportError::InsufficientPermissions => FailureKind::InsufficientPermissions,
        TransportError::Rpc(text) => classify_text(text),
        _ => FailureKind::Unclassified,
    }
}

fn classify_text(text: &str) -> FailureKind {
    if text.contains("AUTH_REJECTEDCRED") {
        FailureKind::AccessDenied
    } else if text.contains("AUTH_TOOWEAK") {
        FailureKind::WeakAuthRequired
    } else if text.contains("Insufficient Permissions") {
        FailureKind::InsufficientPermissions
    } else {
        FailureKind::Unclassified
    }
}

/// Report a share-level failure through the sink with its classified
/// message.
pub fn report_failure<R: Reporter + ?Sized>(reporter: &R, share: &str, err: &TransportError) {
    match classify(err) {
        FailureKind::AccessDenied => reporter.fail(&format!("{share} - RPC access denied")),
        FailureKind::WeakAuthRequired => {
            reporter.fail(&format!("{share} - Kerberos authentication required"));
        }
        FailureKind::InsufficientPermissions => {
            reporter.fail(&format!(
                "{share} - insufficient permissions for share listing"
            ));
        }
        FailureKind::Unclassified => {
            error!("unclassified failure on {}: {:?}", share, err);
            reporter.fail(&format!("{share} - {err}"));
        }
    }
}
