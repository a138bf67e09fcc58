use std::io::Write;

use lexopt::{Arg, Parser};

use crate::{
    args::{self, Usage, flags, positional},
    normalize::normalize,
    resolve,
};

const USAGE: &'static str = r#"
Resolve phrases to calendar dates.

Each phrase is normalized and then resolved relative to today, or to the date
given by `-r/--relative`. A phrase that can't be resolved prints
`Invalid date`.

Recognized phrases are `วันนี้` (today), `พรุ่งนี้` or `วันพรุ่งนี้`
(tomorrow), `อีก N วัน` (N days later) and a day followed by a full or short
Thai month name, like `15 มกราคม` or `15 มกรา`. A day and month always land in
the year of the reference date. A day that doesn't exist in that month, like
`31 กุมภาพันธ์`, doesn't resolve.

USAGE:
    khaopak date <phrase>...
    khaopak date < line delimited <phrase>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Find the date three days from now:

        $ khaopak date 'อีก 3 วัน'
        23 กรกฎาคม

    %snip-start%

    Check which year a date lands in:

        $ khaopak date -f iso -r 2025-12-31 '2 มกราคม' พรุ่งนี้
        2025-01-02
        2026-01-01

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut phrases = positional::Phrases::default();
    args::configure(p, USAGE, &mut [&mut config, &mut phrases])?;

    let reference = config.relative.get();
    let mut wtr = std::io::stdout().lock();
    phrases.try_map(|phrase| {
        let date = resolve::resolve(normalize(phrase).as_str(), reference);
        writeln!(wtr, "{}", config.format.format(date))?;
        Ok(true)
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    relative: flags::Reference,
    format: flags::Format,
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('r') | Arg::Long("relative") => {
                self.relative = args::parse(p, "-r/--relative")?;
            }
            Arg::Short('f') | Arg::Long("format") => {
                self.format = args::parse(p, "-f/--format")?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[flags::Reference::USAGE, flags::Format::USAGE]
    }
}
