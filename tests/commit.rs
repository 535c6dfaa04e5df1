//! Commit writes the rendered file through the replacer, all-or-nothing.

mod common;

use std::fs;
use std::path::Path;

use hostess::platform::{FileReplacer, PrivilegedReplace};
use hostess::{HostessError, RegionStore};

/// Replacer that simulates a declined elevation prompt.
struct DeclinedReplacer;

impl PrivilegedReplace for DeclinedReplacer {
    fn replace(&self, _temp: &Path, _target: &Path) -> anyhow::Result<()> {
        anyhow::bail!("authentication dismissed")
    }
}

#[test]
fn commit_replaces_file() {
    let dir = common::temp_hostess_home();
    let hosts = common::write_hosts(dir.path(), common::SAMPLE_HOSTS);

    let mut store = RegionStore::load(&hosts).unwrap();
    store.set_active(1, true).unwrap();
    store.add_entry("new.com").unwrap();
    store.commit(&FileReplacer).unwrap();
    assert!(!store.is_dirty());

    let content = fs::read_to_string(&hosts).unwrap();
    assert_eq!(
        content,
        "keep.me\n# begin Hostess ownership\n127.0.1.1\tblocked.com\n127.0.1.1\tallowed.com\n\
127.0.1.1\tnew.com\n# end Hostess ownership\nafter.me\n"
    );

    let reloaded = RegionStore::load(&hosts).unwrap();
    assert_eq!(reloaded.entries(), store.entries());
}

#[test]
fn commit_after_removing_everything_unmarks_file() {
    let dir = common::temp_hostess_home();
    let hosts = common::write_hosts(dir.path(), common::SAMPLE_HOSTS);

    let mut store = RegionStore::load(&hosts).unwrap();
    store.remove_entry("blocked.com");
    store.remove_entry("allowed.com");
    store.commit(&FileReplacer).unwrap();

    assert_eq!(fs::read_to_string(&hosts).unwrap(), "keep.me\nafter.me\n");
}

#[test]
fn declined_replace_is_privilege_error_and_file_untouched() {
    let dir = common::temp_hostess_home();
    let hosts = common::write_hosts(dir.path(), common::SAMPLE_HOSTS);

    let mut store = RegionStore::load(&hosts).unwrap();
    store.add_entry("new.com").unwrap();
    let err = store.commit(&DeclinedReplacer).unwrap_err();

    match err {
        HostessError::Privilege { target, message } => {
            assert_eq!(target, hosts);
            assert!(message.contains("dismissed"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(store.is_dirty());
    assert_eq!(fs::read_to_string(&hosts).unwrap(), common::SAMPLE_HOSTS);
}

#[cfg(unix)]
#[test]
fn file_replacer_keeps_target_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = common::temp_hostess_home();
    let hosts = common::write_hosts(dir.path(), "127.0.0.1\tlocalhost\n");
    fs::set_permissions(&hosts, fs::Permissions::from_mode(0o644)).unwrap();

    let mut store = RegionStore::load(&hosts).unwrap();
    store.add_entry("a.com").unwrap();
    store.commit(&FileReplacer).unwrap();

    let mode = fs::metadata(&hosts).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
}

#[test]
fn local_write_failure_is_io_error_not_privilege() {
    let dir = common::temp_hostess_home();
    let target = dir.path().join("missing").join("hosts");

    let mut store = RegionStore::from_text(&target, String::new()).unwrap();
    store.add_entry("a.com").unwrap();
    let err = store.commit(&FileReplacer).unwrap_err();

    assert!(matches!(err, HostessError::Io { .. }), "{err:?}");
    assert!(store.is_dirty());
    assert!(!target.exists());
}

#[cfg(unix)]
#[test]
fn elevated_replacer_installs_new_file() {
    use hostess::platform::unix::ElevatedReplacer;
    use std::os::unix::fs::PermissionsExt;

    let dir = common::temp_hostess_home();
    let hosts = common::write_hosts(dir.path(), "127.0.0.1\tlocalhost\n");
    fs::set_permissions(&hosts, fs::Permissions::from_mode(0o600)).unwrap();

    // `env` runs the replace script unprivileged.
    let mut store = RegionStore::load(&hosts).unwrap();
    store.add_entry("a.com").unwrap();
    store.commit(&ElevatedReplacer::new("env")).unwrap();

    assert_eq!(
        fs::read_to_string(&hosts).unwrap(),
        "127.0.0.1\tlocalhost\n# begin Hostess ownership\n127.0.1.1\ta.com\n# end Hostess ownership\n"
    );
    let mode = fs::metadata(&hosts).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
    assert!(!dir.path().join("hosts.hostess-new").exists());
    assert!(!store.is_dirty());
}

#[cfg(unix)]
#[test]
fn elevated_replacer_failure_is_privilege_error() {
    use hostess::platform::unix::ElevatedReplacer;

    let dir = common::temp_hostess_home();
    let hosts = common::write_hosts(dir.path(), common::SAMPLE_HOSTS);

    let mut store = RegionStore::load(&hosts).unwrap();
    store.add_entry("a.com").unwrap();
    let err = store.commit(&ElevatedReplacer::new("false")).unwrap_err();

    assert!(matches!(err, HostessError::Privilege { .. }), "{err:?}");
    assert_eq!(fs::read_to_string(&hosts).unwrap(), common::SAMPLE_HOSTS);
    assert!(!dir.path().join("hosts.hostess-new").exists());
}
