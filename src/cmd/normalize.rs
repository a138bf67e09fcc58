use std::io::Write;

use lexopt::Parser;

use crate::args::{self, positional};

const USAGE: &'static str = r#"
Strip conversational noise from phrases.

This removes filler words, polite particles and lead-ins like
`อยากเช็คอินวันที่`, and collapses whitespace. What's left is what the date
and duration parsers see.

USAGE:
    khaopak normalize <phrase>...
    khaopak normalize < line delimited <phrase>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Strip a lead-in and a trailing question:

        $ khaopak normalize 'อยากเช็คอินวันที่ 15 มกราคม ได้ไหมครับ'
        15 มกราคม

REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    let mut phrases = positional::Phrases::default();
    args::configure(p, USAGE, &mut [&mut phrases])?;

    let mut wtr = std::io::stdout().lock();
    phrases.try_map(|phrase| {
        writeln!(wtr, "{}", crate::normalize::normalize(phrase))?;
        Ok(true)
    })?;
    Ok(())
}
