//! Top-level enumeration session
//!
//! Ties a connected transport, a reporting sink and a validated
//! configuration together and exposes the operation entry points. The
//! session mirrors how the engine is driven in practice: discover exports
//! once, then audit, enumerate or brute-force against them.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::nfs::{AuthContext, NfsTransport};
use crate::report::Reporter;
use crate::walker::{
    parse_exports, report_exports, share_paths, ExportEntry, ShareAuditor, ShareEnumerator,
    UidBruteForcer,
};

/// One enumeration session against a single target.
pub struct NfsSession<T: NfsTransport, R: Reporter> {
    transport: T,
    reporter: R,
    config: SessionConfig,
    auth: AuthContext,
}

impl<T: NfsTransport, R: Reporter> NfsSession<T, R> {
    /// Build a session over an established transport.
    ///
    /// Configuration is validated here. This and the first export-table
    /// fetch are the only fatal failure points; every later per-share or
    /// per-UID failure is contained and reported through the sink.
    pub fn new(transport: T, reporter: R, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let auth = AuthContext::new(config.uid, config.gid);

        Ok(Self {
            transport,
            reporter,
            config,
            auth,
        })
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Fetch and parse the export table.
    pub fn exports(&self) -> Result<Vec<ExportEntry>> {
        let chain = self.transport.exports()?;
        Ok(parse_exports(chain.as_ref()))
    }

    /// Display each export with its permitted client groups.
    pub fn list_exports(&self) -> Result<()> {
        let entries = self.exports()?;
        self.reporter
            .display(&format!("{} exported shares", entries.len()));
        report_exports(&self.reporter, &entries);
        Ok(())
    }

    /// Per-share permissions and storage usage table.
    pub fn audit_shares(&self) -> Result<()> {
        let shares = share_paths(&self.exports()?);
        ShareAuditor::new(&self.transport, &self.reporter, &self.auth).run(&shares);
        Ok(())
    }

    /// Recursive single-identity listing at the configured depth.
    pub fn enumerate_shares(&self) -> Result<()> {
        let shares = share_paths(&self.exports()?);
        ShareEnumerator::new(
            &self.transport,
            &self.reporter,
            &self.auth,
            self.config.list_depth,
        )
        .run(&shares);
        Ok(())
    }

    /// UID brute-force up to the configured ceiling.
    ///
    /// The sweep works on its own identity copy; the session identity is
    /// unchanged afterwards.
    pub fn brute_force(&self) -> Result<()> {
        let shares = share_paths(&self.exports()?);
        let mut forcer = UidBruteForcer::new(&self.transport, &self.reporter, self.auth.clone());
        forcer.run(self.config.brute_max_uid, &shares);
        Ok(())
    }
}
