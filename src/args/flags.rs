use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use {anyhow::Context, jiff::civil::Date};

use crate::{args::Usage, normalize::normalize, resolve, thai};

/// How resolved dates are printed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Format {
    /// `15 มกราคม`.
    #[default]
    Thai,
    /// `2024-01-15`.
    Iso,
}

impl Format {
    pub const USAGE: Usage = Usage::flag(
        "-f, --format <kind>",
        "Print dates as `thai` (default) or `iso`.",
        r#"
Print dates in this format.

The legal values for this flag are `thai` (the default) and `iso`.

`thai` prints the day of the month followed by the full Thai month name, for
example, `15 มกราคม`. The year is never printed.

`iso` prints an ISO 8601 date, for example, `2024-01-15`. This is useful for
checking which year a phrase resolved to.

Either way, a phrase that can't be resolved prints `Invalid date`.
"#,
    );

    /// Formats a possibly unresolved date.
    pub fn format(&self, date: Option<Date>) -> String {
        match (*self, date) {
            (Format::Thai, date) => thai::format(date),
            (Format::Iso, Some(date)) => date.to_string(),
            (Format::Iso, None) => thai::INVALID_DATE.to_string(),
        }
    }
}

impl std::str::FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Format> {
        Ok(match s {
            "thai" => Format::Thai,
            "iso" => Format::Iso,
            unk => anyhow::bail!("unrecognized format `{}`", unk),
        })
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Format::Thai => write!(f, "thai"),
            Format::Iso => write!(f, "iso"),
        }
    }
}

/// The date that relative phrases are resolved against.
///
/// This is either an ISO 8601 date or a Thai phrase, which is itself resolved
/// against today.
#[derive(Clone, Copy, Debug)]
pub struct Reference(Date);

impl Reference {
    pub const USAGE: Usage = Usage::flag(
        "-r, --relative <date>",
        "Resolve phrases relative to this date instead of today.",
        r#"
Resolve phrases relative to this date instead of today.

This may be an ISO 8601 date like `2024-01-15`, or any phrase that khaopak
understands, like `พรุ่งนี้` or `15 มกราคม`. A phrase is resolved relative to
today.

Today is normally the current date in the system time zone. It can be
overridden with the `KHAOPAK_NOW` environment variable.
"#,
    );

    pub fn get(&self) -> Date {
        self.0
    }
}

impl Default for Reference {
    fn default() -> Reference {
        Reference(crate::today())
    }
}

impl std::str::FromStr for Reference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Reference> {
        match s.parse::<Date>() {
            Ok(date) => return Ok(Reference(date)),
            Err(err) => {
                log::debug!(
                    "failed to parse `{s}` as an ISO 8601 date, \
                     falling back to resolving a phrase: {err}",
                );
            }
        }
        let date = resolve::resolve(normalize(s).as_str(), crate::today())
            .with_context(|| {
                format!(
                    "`{s}` is neither an ISO 8601 date \
                     nor a recognized Thai phrase",
                )
            })?;
        Ok(Reference(date))
    }
}

/// A simple abstraction over "one file path or stdin."
#[derive(Clone, Debug)]
pub struct FileOrStdin {
    path: Option<PathBuf>,
}

impl FileOrStdin {
    /// Create a `FileOrStdin` that reads from `stdin`.
    ///
    /// Nothing is read until `FileOrStdin::reader` is called, so this is a
    /// fine default for CLI parsing.
    pub fn stdin() -> FileOrStdin {
        FileOrStdin { path: None }
    }

    /// Sets the path, but only if none has been set yet.
    ///
    /// The path `-` means stdin.
    pub fn set(&mut self, path: impl Into<OsString>) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.path.is_none(),
            "command only accepts a single path",
        );
        *self = FileOrStdin::from(path.into());
        Ok(())
    }

    /// Return a `std::fmt::Display` impl for the underlying file or stdin.
    ///
    /// When a file, this is its file path. When stdin, it's the literal
    /// string `<stdin>`.
    pub fn display(&self) -> impl std::fmt::Display + '_ {
        self.path.as_deref().unwrap_or_else(|| Path::new("<stdin>")).display()
    }

    /// Return a buffered reader for the underlying file or stdin.
    pub fn reader(&self) -> anyhow::Result<Box<dyn io::BufRead>> {
        Ok(if let Some(ref path) = self.path {
            let file = std::fs::File::open(path)
                .with_context(|| format!("{}", path.display()))?;
            Box::new(io::BufReader::new(file))
        } else {
            Box::new(io::stdin().lock())
        })
    }
}

impl Default for FileOrStdin {
    fn default() -> FileOrStdin {
        FileOrStdin::stdin()
    }
}

impl From<OsString> for FileOrStdin {
    fn from(os_str: OsString) -> FileOrStdin {
        let path = PathBuf::from(os_str);
        if path == Path::new("-") {
            FileOrStdin { path: None }
        } else {
            FileOrStdin { path: Some(path) }
        }
    }
}
