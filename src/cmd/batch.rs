use std::io::Write;

use {
    anyhow::Context,
    lexopt::{Arg, Parser},
};

use crate::{
    api,
    args::{self, Usage, flags},
    parse::BufReadExt,
};

const USAGE: &'static str = r#"
Compute stays for JSON requests, one per line.

Each non-blank line must be a JSON object with the string fields `checkIn` and
`durationOrCheckout`, which mean the same thing as the arguments to
`khaopak calc`. For every request, exactly one line of JSON is printed: either
the computed stay or an error with a `status` and a `detail`.

A `status` of 400 means the request was well formed but one of its phrases
couldn't be understood. A `status` of 422 means the request itself was
malformed. Neither stops processing of later lines.

USAGE:
    khaopak batch <path>
    khaopak batch < line delimited JSON

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Compute a stay read from stdin:

        $ echo '{"checkIn":"พรุ่งนี้","durationOrCheckout":"2 คืน"}' \
            | khaopak batch
        {"checkIn":"21 กรกฎาคม","checkOut":"23 กรกฎาคม"}

POSITIONAL ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let today = crate::today();
    let mut wtr = std::io::stdout().lock();
    let result = config.input.reader()?.for_byte_line(|line| {
        let json = line.content();
        if json.trim_ascii().is_empty() {
            return Ok(true);
        }
        api::respond(json, today, &mut wtr)?;
        writeln!(wtr)?;
        Ok(true)
    });
    result.with_context(|| format!("{}", config.input.display()))?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    input: flags::FileOrStdin,
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        _: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Value(ref mut v) => {
                self.input.set(std::mem::take(v))?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const PATH: Usage = Usage::arg(
            "<path>",
            "A file of line delimited JSON requests.",
            r#"
A file of line delimited JSON requests.

When absent, or when `-`, requests are read from stdin instead.
"#,
        );
        &[PATH]
    }
}
