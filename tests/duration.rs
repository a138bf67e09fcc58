use crate::command::assert_cmd_snapshot;

fn duration<T: AsRef<std::ffi::OsStr>>(
    args: impl IntoIterator<Item = T>,
) -> crate::command::Command {
    crate::khaopak(["duration"]).args(args)
}

#[test]
fn units() {
    assert_cmd_snapshot!(
        duration([
            "3 คืน",
            "2 วัน",
            "2 สัปดาห์",
            "1 อาทิตย์",
            "2 เดือน",
            "1 ปี",
            "หนึ่งสัปดาห์",
            "๑๐ คืน",
            "พัก 3 คืน ครับ",
        ]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    3
    2
    14
    7
    60
    365
    7
    10

    ----- stderr -----
    unrecognized duration `พัก 3 คืน ครับ`
    ",
    );
}

#[test]
fn stdin() {
    assert_cmd_snapshot!(
        duration::<&str>([]).stdin("3 คืน\nพรุ่งนี้\n๑ เดือน\n"),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    3

    ----- stderr -----
    line 2 of <stdin>: unrecognized duration `พรุ่งนี้`
    ",
    );
}

#[test]
fn ignore_invalid() {
    assert_cmd_snapshot!(
        duration(["-i"]).stdin("3 คืน\nพรุ่งนี้\n๑ เดือน\n"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    3
    30

    ----- stderr -----
    ",
    );
}
