//! UID-space brute-forcing and single-identity enumeration
//!
//! Both operations drive the same per-share attempt: mount, walk, unmount.
//! They differ in how the identity is handled and how failures are
//! reported.

use crate::error::TransportResult;
use crate::nfs::{AuthContext, NfsTransport};
use crate::report::Reporter;
use crate::walker::classify::report_failure;
use crate::walker::walk::{ShareWalker, WalkEntry};
use tracing::debug;

/// Listing depth used during brute-forcing: one level under each share
/// root is enough to prove access.
const BRUTE_DEPTH: u32 = 1;

/// Searches an ascending UID range for identities that can list shares.
pub struct UidBruteForcer<'a, T: NfsTransport + ?Sized, R: Reporter + ?Sized> {
    transport: &'a T,
    reporter: &'a R,
    auth: AuthContext,
}

impl<'a, T: NfsTransport + ?Sized, R: Reporter + ?Sized> UidBruteForcer<'a, T, R> {
    /// The forcer takes its own identity copy; only its UID field is
    /// rewritten during the sweep.
    pub fn new(transport: &'a T, reporter: &'a R, auth: AuthContext) -> Self {
        Self {
            transport,
            reporter,
            auth,
        }
    }

    /// Try `0..=max_uid` against every share, ascending.
    ///
    /// The first UID that lists a share wins it: the share goes on the
    /// whitelist and is never retried at a higher UID. Stop-on-first-success
    /// is a deliberate policy, not an attempt to enumerate every UID a
    /// share would admit.
    ///
    /// With `max_uid == 0` this degrades to a single-identity run and
    /// per-share failures are reported. During a real sweep most
    /// (uid, share) attempts are expected to fail, so failures are only
    /// debug-logged.
    pub fn run(&mut self, max_uid: u32, shares: &[String]) {
        if max_uid > 0 {
            self.reporter
                .display(&format!("Enumerating NFS shares up to UID {max_uid}"));
        } else {
            self.reporter
                .display(&format!("Enumerating NFS shares with UID {max_uid}"));
        }

        let mut whitelist: Vec<String> = Vec::new();

        for uid in 0..=max_uid {
            self.auth.uid = uid;

            for share in shares {
                if whitelist.contains(share) {
                    debug!("skipping {} as it is already listed", share);
                    continue;
                }

                match attempt_share(self.transport, &self.auth, share, BRUTE_DEPTH) {
                    Ok(contents) => {
                        whitelist.push(share.clone());
                        self.reporter.success(share);
                        for entry in &contents {
                            self.reporter.highlight(&format!(
                                "UID: {} {} {}",
                                uid, entry.permissions, entry.path
                            ));
                        }
                    }
                    Err(err) => {
                        if max_uid == 0 {
                            report_failure(self.reporter, share, &err);
                        } else {
                            debug!("UID {} failed on {}: {}", uid, share, err);
                        }
                    }
                }
            }
        }
    }
}

/// Single-identity share-content enumeration at a configured depth.
///
/// Uses the session identity as-is and reports classified failures per
/// share; one failing share never stops the rest.
pub struct ShareEnumerator<'a, T: NfsTransport + ?Sized, R: Reporter + ?Sized> {
    transport: &'a T,
    reporter: &'a R,
    auth: &'a AuthContext,
    depth: u32,
}

impl<'a, T: NfsTransport + ?Sized, R: Reporter + ?Sized> ShareEnumerator<'a, T, R> {
    pub fn new(transport: &'a T, reporter: &'a R, auth: &'a AuthContext, depth: u32) -> Self {
        Self {
            transport,
            reporter,
            auth,
            depth,
        }
    }

    /// List every share's contents, reporting one `rwx path` line per
    /// discovered entry.
    pub fn run(&self, shares: &[String]) {
        self.reporter.display(&format!(
            "Enumerating NFS share directories with UID {}",
            self.auth.uid
        ));

        for share in shares {
            match attempt_share(self.transport, self.auth, share, self.depth) {
                Ok(contents) => {
                    self.reporter.success(share);
                    for entry in &contents {
                        self.reporter
                            .highlight(&format!("{} {}", entry.permissions, entry.path));
                    }
                }
                Err(err) => report_failure(self.reporter, share, &err),
            }
        }
    }
}

/// One mount → walk → unmount attempt against a single share.
///
/// The unmount is issued whether or not the walk succeeded, keeping every
/// mount paired with an unmount inside the attempt.
fn attempt_share<T: NfsTransport + ?Sized>(
    transport: &T,
    auth: &AuthContext,
    share: &str,
    depth: u32,
) -> TransportResult<Vec<WalkEntry>> {
    let root = transport.mount(share, auth)?;
    let outcome = ShareWalker::new(transport, auth).walk(&root, share, depth);

    if let Err(err) = transport.unmount(auth) {
        debug!("unmount after {} failed: {}", share, err);
    }

    outcome
}
