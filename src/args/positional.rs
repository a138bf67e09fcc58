use {
    anyhow::Context,
    bstr::{BString, ByteSlice, ByteVec},
};

use crate::{
    args::{Configurable, Usage},
    parse::{BufReadExt, Line},
};

/// The CLI parsing configuration for reading Thai phrases.
///
/// This greedily consumes all remaining positional arguments. When there are
/// none, phrases are read from stdin, one per line.
#[derive(Clone, Debug, Default)]
pub struct Phrases(Arguments);

impl Phrases {
    pub const ARG_OR_STDIN: Usage = Usage::arg(
        "<phrase>",
        "A Thai phrase. Read from stdin, one per line, when absent.",
        r#"
A Thai phrase, for example `วันนี้`, `3 คืน` or `อยากเช็คอินวันที่ 15 มกราคม`.

Any number of phrases may be given. Each is handled independently and produces
one line of output. When no phrases are given as arguments, they are read from
stdin, one per line. Phrases must be valid UTF-8.
"#,
    );

    /// Run the given function over each phrase.
    ///
    /// Iteration stops when the closure returns `false` or an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(&str) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        self.0.try_map(|arg| f(arg.to_str()?))
    }
}

impl Configurable for Phrases {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        self.0.configure(p, arg)
    }

    fn usage(&self) -> &[Usage] {
        &[Phrases::ARG_OR_STDIN]
    }
}

/// Arguments given either positionally on the CLI or as line-delimited data
/// on stdin.
///
/// When there are _zero_ positional arguments, lines are read from stdin
/// instead.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    positional: Vec<BString>,
}

impl Arguments {
    /// Run the given function over each argument.
    ///
    /// The closure gets either only `Positional` arguments or only
    /// `StdinLine` arguments. Never a mix.
    ///
    /// Iteration stops when the closure returns `false` or an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(Argument<'_>) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        if !self.positional.is_empty() {
            for arg in self.positional {
                if !f(Argument::Positional(arg))? {
                    break;
                }
            }
            return Ok(());
        }
        std::io::stdin().lock().for_byte_line(|line| {
            f(Argument::StdinLine(line))
                .with_context(|| format!("line {} of <stdin>", line.number()))
        })
    }
}

impl Configurable for Arguments {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Value(ref mut v) => {
                let v = std::mem::take(v);
                let bytes = Vec::from_os_string(v).map_err(|arg| {
                    anyhow::anyhow!(
                        "khaopak requires that positional arguments \
                         be valid UTF-8, but `{arg:?}` is not",
                    )
                })?;
                self.positional.push(BString::from(bytes));
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A single argument from the CLI or a single line from stdin.
#[derive(Clone, Debug)]
pub enum Argument<'a> {
    Positional(BString),
    StdinLine(Line<'a>),
}

impl<'a> Argument<'a> {
    /// Returns this argument as UTF-8, without any line terminator.
    pub fn to_str(&self) -> anyhow::Result<&str> {
        match *self {
            Argument::Positional(ref arg) => arg.to_str().map_err(|err| {
                anyhow::anyhow!(
                    "argument `{arg}` has invalid UTF-8 at byte offset {}",
                    err.valid_up_to(),
                )
            }),
            Argument::StdinLine(ref line) => line.to_str(),
        }
    }
}
