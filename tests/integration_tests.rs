//! Integration tests for nfs-recon
//!
//! These drive the full enumeration engine against an in-memory transport
//! fake; no NFS server is required. The fake models mountable shares,
//! directory trees, per-UID mount rules and injectable listing/access
//! failures.

use nfs_recon::{
    AuthContext, BufferedReporter, Capability, DirEntryNode, EntryKind, ExportNode, FileHandle,
    FsStat, GroupNode, NfsSession, NfsTransport, ReportEvent, SessionConfig, ShareWalker,
    TransportError, TransportResult, WalkEntry,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One object in the fake remote filesystem.
struct FakeObject {
    kind: EntryKind,
    children: Vec<String>,
    perms: (bool, bool, bool),
}

/// In-memory stand-in for the RPC transport.
///
/// Handles are the logical path bytes of the object they refer to, which
/// keeps lookups trivial and the handles opaque to the engine under test.
#[derive(Default)]
struct FakeTransport {
    exports: Vec<(String, Vec<String>)>,
    objects: HashMap<String, FakeObject>,
    mount_denials: HashMap<(String, u32), TransportError>,
    readdir_denials: HashSet<(String, u32)>,
    access_errors: HashSet<(String, Capability)>,
    attrless: HashSet<String>,
    fsstat: HashMap<String, FsStat>,
    mounts: Mutex<Vec<(String, u32)>>,
    unmounts: Mutex<usize>,
}

impl Default for FakeObject {
    fn default() -> Self {
        Self {
            kind: EntryKind::File,
            children: Vec::new(),
            perms: (true, false, true),
        }
    }
}

impl FakeTransport {
    fn new() -> Self {
        Self::default()
    }

    fn add_export(&mut self, path: &str, groups: &[&str]) {
        self.exports
            .push((path.to_string(), groups.iter().map(|g| g.to_string()).collect()));
        self.objects.insert(
            path.to_string(),
            FakeObject {
                kind: EntryKind::Directory,
                ..FakeObject::default()
            },
        );
    }

    fn add_dir(&mut self, path: &str) {
        self.link_to_parent(path);
        self.objects.insert(
            path.to_string(),
            FakeObject {
                kind: EntryKind::Directory,
                ..FakeObject::default()
            },
        );
    }

    fn add_file(&mut self, path: &str, perms: (bool, bool, bool)) {
        self.link_to_parent(path);
        self.objects.insert(
            path.to_string(),
            FakeObject {
                kind: EntryKind::File,
                children: Vec::new(),
                perms,
            },
        );
    }

    fn link_to_parent(&mut self, path: &str) {
        let parent = path.rsplit_once('/').map(|(p, _)| p).unwrap_or("");
        if let Some(parent_object) = self.objects.get_mut(parent) {
            parent_object.children.push(path.to_string());
        }
    }

    fn deny_mount(&mut self, share: &str, uid: u32, err: TransportError) {
        self.mount_denials.insert((share.to_string(), uid), err);
    }

    fn deny_readdir(&mut self, path: &str, uid: u32) {
        self.readdir_denials.insert((path.to_string(), uid));
    }

    fn fail_access(&mut self, path: &str, capability: Capability) {
        self.access_errors.insert((path.to_string(), capability));
    }

    fn strip_attrs(&mut self, path: &str) {
        self.attrless.insert(path.to_string());
    }

    fn set_fsstat(&mut self, share: &str, free_bytes: u64, total_bytes: u64) {
        self.fsstat.insert(
            share.to_string(),
            FsStat {
                free_bytes,
                total_bytes,
            },
        );
    }

    fn mounts(&self) -> Vec<(String, u32)> {
        self.mounts.lock().unwrap().clone()
    }

    fn unmount_count(&self) -> usize {
        *self.unmounts.lock().unwrap()
    }

    fn handle_path(handle: &FileHandle) -> String {
        String::from_utf8(handle.as_bytes().to_vec()).unwrap()
    }

    fn entries_chain(&self, dir_path: &str) -> Option<DirEntryNode> {
        let object = &self.objects[dir_path];

        let mut listing: Vec<(String, String)> = vec![
            (".".to_string(), dir_path.to_string()),
            ("..".to_string(), dir_path.to_string()),
        ];
        for child in &object.children {
            let name = child
                .rsplit_once('/')
                .map(|(_, n)| n.to_string())
                .unwrap_or_else(|| child.clone());
            listing.push((name, child.clone()));
        }

        let mut head: Option<DirEntryNode> = None;
        for (name, path) in listing.into_iter().rev() {
            let (kind, handle) = if self.attrless.contains(&path) {
                (None, None)
            } else {
                (
                    Some(self.objects[&path].kind),
                    Some(FileHandle::new(path.clone().into_bytes())),
                )
            };
            head = Some(DirEntryNode {
                name: name.into_bytes(),
                kind,
                handle,
                next: head.map(Box::new),
            });
        }
        head
    }
}

impl NfsTransport for FakeTransport {
    fn mount(&self, share: &str, auth: &AuthContext) -> TransportResult<FileHandle> {
        self.mounts
            .lock()
            .unwrap()
            .push((share.to_string(), auth.uid));

        if let Some(err) = self.mount_denials.get(&(share.to_string(), auth.uid)) {
            return Err(err.clone());
        }
        if !self.objects.contains_key(share) {
            return Err(TransportError::Rpc(format!("MNT3ERR_NOENT: {share}")));
        }
        Ok(FileHandle::new(share.as_bytes().to_vec()))
    }

    fn unmount(&self, _auth: &AuthContext) -> TransportResult<()> {
        *self.unmounts.lock().unwrap() += 1;
        Ok(())
    }

    fn exports(&self) -> TransportResult<Option<ExportNode>> {
        let mut head: Option<ExportNode> = None;
        for (path, groups) in self.exports.iter().rev() {
            let mut group_head: Option<GroupNode> = None;
            for name in groups.iter().rev() {
                group_head = Some(GroupNode {
                    name: name.clone().into_bytes(),
                    next: group_head.map(Box::new),
                });
            }
            head = Some(ExportNode {
                dir: path.clone().into_bytes(),
                groups: group_head.map(Box::new),
                next: head.map(Box::new),
            });
        }
        Ok(head)
    }

    fn read_directory(
        &self,
        dir: &FileHandle,
        auth: &AuthContext,
    ) -> TransportResult<Option<DirEntryNode>> {
        let path = Self::handle_path(dir);
        if self.readdir_denials.contains(&(path.clone(), auth.uid)) {
            return Err(TransportError::InsufficientPermissions);
        }
        if !self.objects.contains_key(&path) {
            return Err(TransportError::Rpc(format!("NFS3ERR_STALE: {path}")));
        }
        Ok(self.entries_chain(&path))
    }

    fn check_access(
        &self,
        handle: &FileHandle,
        capability: Capability,
        _auth: &AuthContext,
    ) -> TransportResult<bool> {
        let path = Self::handle_path(handle);
        if self.access_errors.contains(&(path.clone(), capability)) {
            return Err(TransportError::Timeout { seconds: 1 });
        }
        let object = self
            .objects
            .get(&path)
            .ok_or_else(|| TransportError::Rpc(format!("NFS3ERR_STALE: {path}")))?;
        Ok(match capability {
            Capability::Read => object.perms.0,
            Capability::Write => object.perms.1,
            Capability::Execute => object.perms.2,
        })
    }

    fn stat_filesystem(&self, handle: &FileHandle, _auth: &AuthContext) -> TransportResult<FsStat> {
        let path = Self::handle_path(handle);
        self.fsstat
            .get(&path)
            .copied()
            .ok_or_else(|| TransportError::Rpc(format!("FSSTAT unavailable for {path}")))
    }
}

fn paths(entries: &[WalkEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.path.as_str()).collect()
}

#[test]
fn test_walk_depth_zero_reports_share_root_only() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.add_file("/data/a.txt", (true, true, false));

    let auth = AuthContext::new(0, 0);
    let root = fake.mount("/data", &auth).unwrap();
    let entries = ShareWalker::new(&fake, &auth).walk(&root, "/data", 0).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "/data/");
}

#[test]
fn test_walk_flat_share_is_depth_invariant() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.add_file("/data/one", (true, false, false));
    fake.add_file("/data/two", (true, false, false));
    fake.add_file("/data/three", (true, false, false));

    let auth = AuthContext::new(0, 0);
    let root = fake.mount("/data", &auth).unwrap();
    let walker = ShareWalker::new(&fake, &auth);

    for depth in 1..=4 {
        let entries = walker.walk(&root, "/data", depth).unwrap();
        assert_eq!(
            paths(&entries),
            vec!["/data/one", "/data/two", "/data/three"],
            "depth {depth}"
        );
    }
}

#[test]
fn test_walk_never_reports_dot_entries() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.add_file("/data/visible", (true, false, false));

    let auth = AuthContext::new(0, 0);
    let root = fake.mount("/data", &auth).unwrap();
    let entries = ShareWalker::new(&fake, &auth).walk(&root, "/data", 2).unwrap();

    assert_eq!(paths(&entries), vec!["/data/visible"]);
    assert!(entries
        .iter()
        .all(|entry| !entry.path.ends_with("/.") && !entry.path.ends_with("/..")));
}

#[test]
fn test_walk_descends_and_preserves_sibling_order() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.add_file("/data/a.txt", (true, false, false));
    fake.add_dir("/data/nested");
    fake.add_file("/data/nested/inner.txt", (true, true, false));
    fake.add_file("/data/z.txt", (true, false, false));

    let auth = AuthContext::new(0, 0);
    let root = fake.mount("/data", &auth).unwrap();

    // Depth 2: the nested directory is expanded in place between siblings.
    let entries = ShareWalker::new(&fake, &auth).walk(&root, "/data", 2).unwrap();
    assert_eq!(
        paths(&entries),
        vec!["/data/a.txt", "/data/nested/inner.txt", "/data/z.txt"]
    );

    // Depth 1: the nested directory hits the budget and is reported as a
    // probed terminal record instead of being skipped.
    let entries = ShareWalker::new(&fake, &auth).walk(&root, "/data", 1).unwrap();
    assert_eq!(
        paths(&entries),
        vec!["/data/a.txt", "/data/nested/", "/data/z.txt"]
    );
}

#[test]
fn test_walk_contains_subtree_failures() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.add_file("/data/a.txt", (true, false, false));
    fake.add_dir("/data/locked");
    fake.add_file("/data/locked/secret", (false, false, false));
    fake.add_file("/data/c.txt", (true, false, false));
    fake.deny_readdir("/data/locked", 0);

    let auth = AuthContext::new(0, 0);
    let root = fake.mount("/data", &auth).unwrap();
    let entries = ShareWalker::new(&fake, &auth).walk(&root, "/data", 3).unwrap();

    // The locked subtree contributes nothing; its siblings survive.
    assert_eq!(paths(&entries), vec!["/data/a.txt", "/data/c.txt"]);
}

#[test]
fn test_walk_top_level_denial_surfaces_to_caller() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.deny_readdir("/data", 0);

    let auth = AuthContext::new(0, 0);
    let root = fake.mount("/data", &auth).unwrap();
    let result = ShareWalker::new(&fake, &auth).walk(&root, "/data", 1);

    assert_eq!(result, Err(TransportError::InsufficientPermissions));
}

#[test]
fn test_walk_skips_entries_without_attributes() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.add_file("/data/known", (true, false, false));
    fake.add_file("/data/ghost", (true, false, false));
    fake.strip_attrs("/data/ghost");

    let auth = AuthContext::new(0, 0);
    let root = fake.mount("/data", &auth).unwrap();
    let entries = ShareWalker::new(&fake, &auth).walk(&root, "/data", 1).unwrap();

    assert_eq!(paths(&entries), vec!["/data/known"]);
}

#[test]
fn test_probe_failure_on_one_capability_leaves_others_intact() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.add_file("/data/f", (true, true, true));
    fake.fail_access("/data/f", Capability::Write);

    let auth = AuthContext::new(0, 0);
    let root = fake.mount("/data", &auth).unwrap();
    let entries = ShareWalker::new(&fake, &auth).walk(&root, "/data", 1).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].permissions.read, true);
    assert_eq!(entries[0].permissions.write, false);
    assert_eq!(entries[0].permissions.execute, true);
    assert_eq!(entries[0].permissions.flags(), "r-x");
}

#[test]
fn test_session_exports_preserve_chain_order_and_groups() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &["lab.example.com", "10.0.0.0/24"]);
    fake.add_export("/backup", &[]);

    let reporter = BufferedReporter::new();
    let session = NfsSession::new(&fake, &reporter, SessionConfig::new("10.0.0.5")).unwrap();

    let exports = session.exports().unwrap();
    assert_eq!(exports.len(), 2);
    assert_eq!(exports[0].path, "/data");
    assert_eq!(exports[0].groups, vec!["lab.example.com", "10.0.0.0/24"]);
    assert_eq!(exports[1].path, "/backup");

    session.list_exports().unwrap();
    let highlights = reporter.highlights();
    assert_eq!(highlights[0], "/data lab.example.com, 10.0.0.0/24");
    assert_eq!(highlights[1], "/backup");
}

#[test]
fn test_session_with_empty_export_table() {
    let fake = FakeTransport::new();
    let reporter = BufferedReporter::new();
    let session = NfsSession::new(&fake, &reporter, SessionConfig::new("10.0.0.5")).unwrap();

    assert!(session.exports().unwrap().is_empty());
    session.enumerate_shares().unwrap();
    assert!(reporter.successes().is_empty());
    assert!(reporter.failures().is_empty());
}

#[test]
fn test_brute_force_first_uid_wins_per_share() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.add_export("/backup", &[]);
    fake.add_dir("/data/users");
    fake.add_file("/backup/flag.txt", (true, false, false));
    // UID 0 is rejected on /data but fine on /backup; UID 1 unlocks /data.
    fake.deny_mount("/data", 0, TransportError::AuthRejected);

    let reporter = BufferedReporter::new();
    let config = SessionConfig::new("10.0.0.5").with_brute_max_uid(1);
    let session = NfsSession::new(&fake, &reporter, config).unwrap();
    session.brute_force().unwrap();

    // /backup unlocked by UID 0, /data by UID 1, each reported exactly once.
    assert_eq!(reporter.successes(), vec!["/backup", "/data"]);

    let highlights = reporter.highlights();
    assert!(highlights
        .iter()
        .any(|line| line.starts_with("UID: 0") && line.contains("/backup/flag.txt")));
    assert!(highlights
        .iter()
        .any(|line| line.starts_with("UID: 1") && line.contains("/data/users/")));
    assert!(!highlights
        .iter()
        .any(|line| line.starts_with("UID: 1") && line.contains("/backup")));

    // /backup is whitelisted after UID 0, so UID 1 never re-mounts it.
    let mounts = fake.mounts();
    assert_eq!(
        mounts,
        vec![
            ("/data".to_string(), 0),
            ("/backup".to_string(), 0),
            ("/data".to_string(), 1),
        ]
    );
}

#[test]
fn test_brute_force_failures_suppressed_during_sweep() {
    let mut fake = FakeTransport::new();
    fake.add_export("/vault", &[]);
    fake.deny_mount("/vault", 0, TransportError::AuthRejected);
    fake.deny_mount("/vault", 1, TransportError::AuthRejected);
    fake.deny_mount("/vault", 2, TransportError::AuthRejected);

    let reporter = BufferedReporter::new();
    let config = SessionConfig::new("10.0.0.5").with_brute_max_uid(2);
    let session = NfsSession::new(&fake, &reporter, config).unwrap();
    session.brute_force().unwrap();

    assert!(reporter.successes().is_empty());
    assert!(reporter.failures().is_empty());
}

#[test]
fn test_brute_force_with_zero_ceiling_reports_classified_failures() {
    let mut fake = FakeTransport::new();
    fake.add_export("/vault", &[]);
    fake.deny_mount("/vault", 0, TransportError::AuthTooWeak);

    let reporter = BufferedReporter::new();
    let config = SessionConfig::new("10.0.0.5").with_brute_max_uid(0);
    let session = NfsSession::new(&fake, &reporter, config).unwrap();
    session.brute_force().unwrap();

    assert_eq!(
        reporter.failures(),
        vec!["/vault - Kerberos authentication required"]
    );
}

#[test]
fn test_enumerate_reports_classified_failure_per_share() {
    let mut fake = FakeTransport::new();
    fake.add_export("/open", &[]);
    fake.add_export("/sealed", &[]);
    fake.add_file("/open/readme", (true, false, false));
    fake.deny_readdir("/sealed", 0);

    let reporter = BufferedReporter::new();
    let session = NfsSession::new(&fake, &reporter, SessionConfig::new("10.0.0.5")).unwrap();
    session.enumerate_shares().unwrap();

    assert_eq!(reporter.successes(), vec!["/open"]);
    assert_eq!(
        reporter.failures(),
        vec!["/sealed - insufficient permissions for share listing"]
    );
    assert!(reporter
        .highlights()
        .iter()
        .any(|line| line.contains("/open/readme")));
}

#[test]
fn test_enumerate_uses_free_text_fallback_classification() {
    let mut fake = FakeTransport::new();
    fake.add_export("/legacy", &[]);
    fake.deny_mount(
        "/legacy",
        0,
        TransportError::Rpc("RPC_AUTH_ERROR: AUTH_REJECTEDCRED".into()),
    );

    let reporter = BufferedReporter::new();
    let session = NfsSession::new(&fake, &reporter, SessionConfig::new("10.0.0.5")).unwrap();
    session.enumerate_shares().unwrap();

    assert_eq!(reporter.failures(), vec!["/legacy - RPC access denied"]);
}

#[test]
fn test_audit_row_matches_fixed_width_layout() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.set_fsstat("/data", 500_000_000, 1_000_000_000);
    if let Some(object) = fake.objects.get_mut("/data") {
        object.perms = (true, true, true);
    }

    let reporter = BufferedReporter::new();
    let session = NfsSession::new(&fake, &reporter, SessionConfig::new("10.0.0.5")).unwrap();
    session.audit_shares().unwrap();

    let highlights = reporter.highlights();
    assert!(highlights[0].starts_with("Perms"));
    assert!(highlights[0].contains("Storage Usage"));
    assert!(highlights[1].starts_with("-----"));

    let row = &highlights[2];
    assert!(row.starts_with("rwx"));
    assert!(row.contains("476.8MB/953.7MB"));
    assert!(row.contains("/data"));
}

#[test]
fn test_audit_failure_blanks_row_and_continues() {
    let mut fake = FakeTransport::new();
    fake.add_export("/broken", &[]);
    fake.add_export("/healthy", &[]);
    fake.deny_mount("/broken", 0, TransportError::AuthRejected);
    fake.set_fsstat("/healthy", 0, 1024);

    let reporter = BufferedReporter::new();
    let session = NfsSession::new(&fake, &reporter, SessionConfig::new("10.0.0.5")).unwrap();
    session.audit_shares().unwrap();

    assert_eq!(reporter.failures().len(), 1);
    assert!(reporter.failures()[0].starts_with("/broken - "));

    let highlights = reporter.highlights();
    // Header, separator, blanked row for /broken, real row for /healthy.
    assert_eq!(highlights.len(), 4);
    assert!(highlights[2].starts_with("---"));
    assert!(highlights[2].contains("/broken"));
    assert!(highlights[3].contains("1.0KB/1.0KB"));
    assert!(highlights[3].contains("/healthy"));
}

#[test]
fn test_every_successful_mount_is_paired_with_unmount() {
    let mut fake = FakeTransport::new();
    fake.add_export("/denied", &[]);
    fake.add_export("/listed", &[]);
    fake.add_export("/sealed", &[]);
    fake.add_file("/listed/file", (true, false, false));
    // Mount refused outright: no unmount owed.
    fake.deny_mount("/denied", 0, TransportError::AuthRejected);
    // Mounted but listing denied: unmount still owed.
    fake.deny_readdir("/sealed", 0);

    let reporter = BufferedReporter::new();
    let session = NfsSession::new(&fake, &reporter, SessionConfig::new("10.0.0.5")).unwrap();
    session.enumerate_shares().unwrap();

    let successful_mounts = fake
        .mounts()
        .iter()
        .filter(|(share, _)| share != "/denied")
        .count();
    assert_eq!(successful_mounts, 2);
    assert_eq!(fake.unmount_count(), 2);
}

#[test]
fn test_walk_entries_serialize_for_export() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.add_file("/data/report.pdf", (true, false, false));

    let auth = AuthContext::new(0, 0);
    let root = fake.mount("/data", &auth).unwrap();
    let entries = ShareWalker::new(&fake, &auth).walk(&root, "/data", 1).unwrap();

    let json = serde_json::to_string(&entries).unwrap();
    assert!(json.contains("\"path\":\"/data/report.pdf\""));
    assert!(json.contains("\"read\":true"));
    assert!(json.contains("\"write\":false"));
}

#[test]
fn test_report_events_preserve_emission_order() {
    let mut fake = FakeTransport::new();
    fake.add_export("/data", &[]);
    fake.add_file("/data/file", (true, false, false));

    let reporter = BufferedReporter::new();
    let session = NfsSession::new(&fake, &reporter, SessionConfig::new("10.0.0.5")).unwrap();
    session.enumerate_shares().unwrap();

    let events = reporter.events();
    assert!(matches!(events[0], ReportEvent::Display(_)));
    assert!(matches!(events[1], ReportEvent::Success(_)));
    assert!(matches!(events[2], ReportEvent::Highlight(_)));
}
