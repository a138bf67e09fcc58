mod batch;
mod calc;
mod date;
mod duration;
mod fmt;
mod normalize;

const USAGE: &'static str = "\
Resolve Thai check-in and check-out phrases into calendar dates.

USAGE:
    khaopak <command> ...

COMMANDS:
    batch      Compute stays for JSON requests, one per line
    calc       Compute the check-in and check-out dates of a stay
    date       Resolve phrases like `พรุ่งนี้` or `15 มกราคม` to dates
    duration   Convert phrases like `3 คืน` to a number of days
    fmt        Format ISO 8601 dates in Thai
    normalize  Strip conversational noise from phrases
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    // Running `khaopak` with no arguments prints today's date.
    if p.try_raw_args().map_or(false, |args| args.as_slice().is_empty()) {
        use std::io::Write;

        let today = crate::thai::ThaiDate(crate::today());
        writeln!(std::io::stdout(), "{today}")?;
        return Ok(());
    }

    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "batch" => batch::run(p),
        "calc" => calc::run(p),
        "date" => date::run(p),
        "duration" => duration::run(p),
        "fmt" => fmt::run(p),
        "normalize" => normalize::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
