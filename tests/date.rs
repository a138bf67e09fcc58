use crate::command::assert_cmd_snapshot;

fn date<T: AsRef<std::ffi::OsStr>>(
    args: impl IntoIterator<Item = T>,
) -> crate::command::Command {
    crate::khaopak(["date"]).args(args)
}

#[test]
fn phrases() {
    assert_cmd_snapshot!(
        date([
            "วันนี้",
            "พรุ่งนี้",
            "วันพรุ่งนี้",
            "อีก 3 วัน",
            "15 มกราคม",
            "15 มกรา",
            "เข้าพักวันที่ ๕ ธันวา นะ",
            "เมื่อวาน",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20 กรกฎาคม
    21 กรกฎาคม
    21 กรกฎาคม
    23 กรกฎาคม
    15 มกราคม
    15 มกราคม
    5 ธันวาคม
    Invalid date

    ----- stderr -----
    ",
    );
}

#[test]
fn days_that_do_not_exist() {
    assert_cmd_snapshot!(
        date(["-f", "iso", "29 กุมภาพันธ์", "30 กุมภาพันธ์", "0 มกราคม"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-02-29
    Invalid date
    Invalid date

    ----- stderr -----
    ",
    );
}

#[test]
fn relative() {
    assert_cmd_snapshot!(
        date(["-f", "iso", "-r", "2025-12-31", "2 มกราคม", "พรุ่งนี้"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2025-01-02
    2026-01-01

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        date(["--relative", "พรุ่งนี้", "พรุ่งนี้"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    22 กรกฎาคม

    ----- stderr -----
    ",
    );
}

#[test]
fn stdin() {
    assert_cmd_snapshot!(
        date(["-f", "iso"]).stdin("วันนี้\r\nอีก 30 วัน\n"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-20
    2024-08-19

    ----- stderr -----
    ",
    );
}

#[test]
fn bad_flags() {
    assert_cmd_snapshot!(
        date(["-f", "rfc3339", "วันนี้"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -f/--format: unrecognized format `rfc3339`
    ",
    );
    assert_cmd_snapshot!(
        date(["-r", "เมื่อวาน", "วันนี้"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -r/--relative: `เมื่อวาน` is neither an ISO 8601 date nor a recognized Thai phrase
    ",
    );
}
