use std::io::Write;

use lexopt::{Arg, Parser};

use crate::{
    args::{self, Usage, positional},
    duration,
    normalize::normalize,
};

const USAGE: &'static str = r#"
Convert lengths of stay to a number of days.

Each phrase is normalized and then parsed as a number followed by a unit:
`คืน` (nights), `วัน` (days), `สัปดาห์` or `อาทิตย์` (weeks), `เดือน` (months)
or `ปี` (years). A week is 7 days, a month is always 30 days and a year is
always 365 days. Thai digits are accepted too.

USAGE:
    khaopak duration <phrase>...
    khaopak duration < line delimited <phrase>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Convert two weeks to days:

        $ khaopak duration '2 สัปดาห์'
        14

    %snip-start%

    Skip anything that isn't a length of stay:

        $ printf '3 คืน\nพรุ่งนี้\n๑ เดือน\n' | khaopak duration -i
        3
        30

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

    let mut wtr = std::io::stdout().lock();
    phrases.try_map(|phrase| {
        let normalized = normalize(phrase);
        match duration::parse(normalized.as_str()) {
            Some(days) => writeln!(wtr, "{days}")?,
            None if config.ignore_invalid => {
                log::debug!("skipping unrecognized duration `{phrase}`");
            }
            None => anyhow::bail!("unrecognized duration `{phrase}`"),
        }
        Ok(true)
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    ignore_invalid: bool,
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        _: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('i') | Arg::Long("ignore-invalid") => {
                self.ignore_invalid = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const IGNORE_INVALID: Usage = Usage::flag(
            "-i, --ignore-invalid",
            "Skip phrases that aren't lengths of stay.",
            r#"
Skip phrases that aren't lengths of stay.

By default, the first unrecognized phrase stops khaopak with an error. With
this flag, unrecognized phrases print nothing and processing continues.
"#,
        );
        &[IGNORE_INVALID]
    }
}
