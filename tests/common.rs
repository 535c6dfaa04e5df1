//! Shared test helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temp directory for use as HOSTESS_HOME.
pub fn temp_hostess_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("hostess_test_")
        .tempdir()
        .expect("temp dir")
}

/// Write a hosts file with the given content into `dir`.
pub fn write_hosts(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hosts");
    std::fs::write(&path, content).expect("write hosts");
    path
}

/// Hosts content from the region example: one line before, two managed, one after.
pub const SAMPLE_HOSTS: &str = "keep.me\n\
# begin Hostess ownership\n\
127.0.1.1\tblocked.com\n\
#127.0.1.1\tallowed.com\n\
# end Hostess ownership\n\
after.me\n";

/// hostess binary with HOSTESS_HOME and HOSTESS_HOSTS_FILE pointing into `home`.
pub fn hostess_cmd(home: &Path, hosts: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("hostess").unwrap();
    cmd.env("HOSTESS_HOME", home)
        .env("HOSTESS_HOSTS_FILE", hosts)
        .env_remove("LOG_LEVEL");
    cmd
}
