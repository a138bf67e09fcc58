use std::io::Write;

use {anyhow::Context, jiff::civil::Date, lexopt::Parser};

use crate::{
    args::{self, Usage, positional},
    thai::ThaiDate,
};

const USAGE: &'static str = r#"
Format ISO 8601 dates in Thai.

Dates are printed as the day of the month followed by the full Thai month
name. The year is dropped.

USAGE:
    khaopak fmt <date>...
    khaopak fmt < line delimited <date>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Format a date:

        $ khaopak fmt 2025-03-15
        15 มีนาคม

REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    let mut dates = Dates::default();
    args::configure(p, USAGE, &mut [&mut dates])?;

    let mut wtr = std::io::stdout().lock();
    dates.0.try_map(|arg| {
        let arg = arg.to_str()?;
        let date: Date = arg
            .trim()
            .parse()
            .with_context(|| format!("invalid date `{arg}`"))?;
        writeln!(wtr, "{}", ThaiDate(date))?;
        Ok(true)
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct Dates(positional::Arguments);

impl args::Configurable for Dates {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        self.0.configure(p, arg)
    }

    fn usage(&self) -> &[Usage] {
        const DATE: Usage = Usage::arg(
            "<date>",
            "An ISO 8601 date, e.g., `2025-03-15`.",
            r#"
An ISO 8601 date, e.g., `2025-03-15`.

Any number of dates may be given. When none are given as arguments, they are
read from stdin, one per line.
"#,
        );
        &[DATE]
    }
}
