use std::{ffi::OsStr, path::Path, sync::LazyLock};

use jiff::{Zoned, civil};

mod date;
mod duration;

/// The current time in every test. Phrases like `วันนี้` resolve to this.
static NOW: LazyLock<Zoned> = LazyLock::new(|| {
    civil::date(2024, 7, 20).at(16, 30, 55, 0).in_tz("Asia/Bangkok").unwrap()
});

/// A temporary directory that commands can be run in.
#[derive(Debug)]
struct TempDir(tempfile::TempDir);

impl TempDir {
    fn new() -> TempDir {
        TempDir(tempfile::tempdir().unwrap())
    }

    /// Create a new `khaopak` command, with the given arguments, whose CWD is
    /// this directory.
    fn khaopak<T: AsRef<OsStr>>(
        &self,
        args: impl IntoIterator<Item = T>,
    ) -> crate::command::Command {
        khaopak(args).current_dir(self.0.path())
    }

    /// Create a new file in this temporary directory with the given relative
    /// path and contents.
    fn create(
        &self,
        relative_path: impl AsRef<Path>,
        contents: impl AsRef<[u8]>,
    ) {
        let path = self.0.path().join(relative_path.as_ref());
        std::fs::write(&path, contents).unwrap();
    }
}

/// Return a command for the `khaopak` binary and no arguments.
fn khaopak_bare() -> crate::command::Command {
    crate::command::bin("khaopak")
        .env("TZ", "Asia/Bangkok")
        .env("KHAOPAK_NOW", NOW.timestamp().to_string())
        .env("KHAOPAK_LOG", "off")
}

/// Return a command for the `khaopak` binary with the given arguments.
fn khaopak<T: AsRef<OsStr>>(
    args: impl IntoIterator<Item = T>,
) -> crate::command::Command {
    khaopak_bare().args(args)
}

/// Test that calling `khaopak` with no arguments prints today's date.
#[test]
fn no_args() {
    crate::command::assert_cmd_snapshot!(
        khaopak_bare(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20 กรกฎาคม

    ----- stderr -----
    ",
    );
}

/// A date alone in `KHAOPAK_NOW` means midnight of that day.
#[test]
fn now_as_date() {
    crate::command::assert_cmd_snapshot!(
        khaopak_bare().env("KHAOPAK_NOW", "2025-01-31"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    31 มกราคม

    ----- stderr -----
    ",
    );
}

/// Today is the local date, not the UTC date.
#[test]
fn now_is_local() {
    // 2024-07-20T20:00:00Z is already the 21st in Bangkok.
    crate::command::assert_cmd_snapshot!(
        khaopak_bare().env("KHAOPAK_NOW", "2024-07-20T20:00:00Z"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    21 กรกฎาคม

    ----- stderr -----
    ",
    );
}

#[test]
fn version() {
    crate::command::assert_cmd_snapshot!(
        khaopak(["--version"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    khaopak 0.1.0

    ----- stderr -----
    ",
    );
}

#[test]
fn unknown_command() {
    crate::command::assert_cmd_snapshot!(
        khaopak(["checkin"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unrecognized command 'checkin'
    ",
    );
}

#[test]
fn unknown_log_level() {
    crate::command::assert_cmd_snapshot!(
        khaopak_bare().env("KHAOPAK_LOG", "loud"),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unrecognized log level 'loud'
    ",
    );
}
