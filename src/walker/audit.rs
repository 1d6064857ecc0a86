//! Share auditing
//!
//! Produces the one-line-per-share summary table: effective root
//! permissions and storage usage per export.

use crate::error::TransportResult;
use crate::nfs::{AuthContext, FileHandle, FsStat, NfsTransport};
use crate::report::Reporter;
use crate::units::format_size;
use crate::walker::probe::{probe, Permissions};
use tracing::debug;

/// Audits each discovered share: root permissions plus storage usage.
pub struct ShareAuditor<'a, T: NfsTransport + ?Sized, R: Reporter + ?Sized> {
    transport: &'a T,
    reporter: &'a R,
    auth: &'a AuthContext,
}

impl<'a, T: NfsTransport + ?Sized, R: Reporter + ?Sized> ShareAuditor<'a, T, R> {
    pub fn new(transport: &'a T, reporter: &'a R, auth: &'a AuthContext) -> Self {
        Self {
            transport,
            reporter,
            auth,
        }
    }

    /// Audit every share, one table row each.
    ///
    /// A failing share gets its row with the permission and usage columns
    /// blanked; the audit always continues with the remaining shares.
    pub fn run(&self, shares: &[String]) {
        self.reporter.display(&format!(
            "Auditing NFS shares with UID {}",
            self.auth.uid
        ));
        self.reporter
            .highlight(&format!("{:<9}{:<17}{:<15}", "Perms", "Storage Usage", "Share"));
        self.reporter
            .highlight(&format!("{:<9}{:<17}{:<15}", "-----", "-------------", "-----"));

        for share in shares {
            match self.audit_share(share) {
                Ok(row) => self.reporter.highlight(&row),
                Err(err) => {
                    self.reporter.fail(&format!("{share} - {err}"));
                    self.reporter
                        .highlight(&format!("{:<26}{:<15}", "---", share));
                }
            }
        }
    }

    fn audit_share(&self, share: &str) -> TransportResult<String> {
        let root = self.transport.mount(share, self.auth)?;
        let outcome = self.collect_row(share, &root);

        if let Err(err) = self.transport.unmount(self.auth) {
            debug!("unmount after {} failed: {}", share, err);
        }

        outcome
    }

    fn collect_row(&self, share: &str, root: &FileHandle) -> TransportResult<String> {
        let stat = self.transport.stat_filesystem(root, self.auth)?;
        let permissions = probe(self.transport, root, self.auth);
        Ok(format_row(share, permissions, stat))
    }
}

/// `{perms}{used}/{total} {share}` with the audit table's column widths.
fn format_row(share: &str, permissions: Permissions, stat: FsStat) -> String {
    let usage = format!(
        "{}/{}",
        format_size(stat.used_bytes()),
        format_size(stat.total_bytes)
    );
    format!("{:<9}{:<17}{:<15}", permissions.flags(), usage, share)
}
