use std::{
    fmt::{Debug, Display, Write},
    str::FromStr,
    sync::LazyLock,
};

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
    regex::Regex,
};

pub mod flags;
pub mod positional;

/// Something that consumes command line arguments.
///
/// `configure` is offered every argument in turn. It returns `true` when it
/// consumed the argument and `false` to let the next target try.
pub trait Configurable: Debug {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool>;

    /// Docs for the flags and arguments this target consumes.
    ///
    /// Generic targets like `positional::Arguments` leave this empty, and the
    /// command supplies its own docs.
    fn usage(&self) -> &[Usage] {
        &[]
    }
}

/// Feeds every remaining argument in `p` to `targets`.
///
/// `usage` is the command's help template. See `Help::render` for how it
/// gets filled in.
pub fn configure(
    p: &mut Parser,
    usage: &str,
    targets: &mut [&mut dyn Configurable],
) -> anyhow::Result<()> {
    while let Some(arg) = p.next()? {
        // Targets need `p` mutably, so a long flag name can't keep
        // borrowing from it.
        let long;
        let mut arg = match arg {
            Arg::Short('h') => {
                return Err(Help::render(usage, targets, false).into());
            }
            Arg::Long("help") => {
                return Err(Help::render(usage, targets, true).into());
            }
            Arg::Long("version") => return Err(Version.into()),
            Arg::Long(name) => {
                long = name.to_string();
                Arg::Long(&long)
            }
            Arg::Short(c) => Arg::Short(c),
            Arg::Value(v) => Arg::Value(v),
        };
        if !offer(targets, p, &mut arg)? {
            return Err(arg.unexpected().into());
        }
    }
    Ok(())
}

/// Offers `arg` to each target until one takes it.
fn offer(
    targets: &mut [&mut dyn Configurable],
    p: &mut Parser,
    arg: &mut Arg,
) -> anyhow::Result<bool> {
    for target in targets.iter_mut() {
        if target.configure(p, arg)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Parses the next argument as a command name.
///
/// `-h/--help` and `--version` are turned into `Help` and `Version` errors,
/// which `main` prints to stdout. Anything else that isn't a plain value is
/// an error.
pub fn next_as_command(usage: &str, p: &mut Parser) -> anyhow::Result<String> {
    let usage = usage.trim();
    let Some(arg) = p.next()? else { anyhow::bail!("{usage}") };
    match arg {
        Arg::Value(cmd) => Ok(cmd.string()?),
        Arg::Short('h') | Arg::Long("help") => {
            Err(Help(usage.to_string()).into())
        }
        Arg::Long("version") => Err(Version.into()),
        arg => Err(arg.unexpected().into()),
    }
}

/// Parses the value of the flag `flag_name` into `T`.
///
/// Errors, including a value that isn't valid UTF-8, name the flag.
pub fn parse<T>(p: &mut Parser, flag_name: &'static str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: Display + Debug + Send + Sync + 'static,
{
    let value = p.value().and_then(|v| v.string()).context(flag_name)?;
    value.parse().map_err(|err| anyhow::Error::msg(err).context(flag_name))
}

/// The documentation of one flag or positional argument.
#[derive(Clone, Copy, Debug)]
pub struct Usage {
    /// Whether this is a flag rather than a positional argument.
    flag: bool,
    /// How it's written on the command line, e.g., `-f, --format <kind>`.
    name: &'static str,
    /// A one line description, shown by `-h`.
    brief: &'static str,
    /// The full description, shown by `--help`. Paragraphs are separated by
    /// blank lines.
    doc: &'static str,
}

impl Usage {
    pub const fn flag(
        name: &'static str,
        brief: &'static str,
        doc: &'static str,
    ) -> Usage {
        Usage { flag: true, name, brief, doc }
    }

    pub const fn arg(
        name: &'static str,
        brief: &'static str,
        doc: &'static str,
    ) -> Usage {
        Usage { flag: false, name, brief, doc }
    }

    /// Flags are listed by their long name, so `-f, --format` sorts under
    /// `f`.
    fn sort_key(&self) -> &'static str {
        self.name.split_once(", ").map_or(self.name, |(_, long)| long)
    }

    /// An aligned two column table of names and brief descriptions.
    fn table(usages: &[Usage]) -> String {
        let width =
            usages.iter().map(|u| u.name.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        for u in usages.iter() {
            writeln!(out, "    {:<width$}  {}", u.name, u.brief).unwrap();
        }
        out
    }

    /// Each name followed by its full description, wrapped and indented.
    fn document(usages: &[Usage]) -> String {
        let indent = "        ";
        let wrap = textwrap::Options::new(79)
            .initial_indent(indent)
            .subsequent_indent(indent);
        let mut out = String::new();
        for (i, u) in usages.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let paragraphs: Vec<String> = u
                .doc
                .trim()
                .split("\n\n")
                .map(|para| textwrap::fill(&para.replace('\n', " "), &wrap))
                .collect();
            writeln!(out, "    {}", u.name).unwrap();
            writeln!(out, "{}", paragraphs.join("\n\n")).unwrap();
        }
        out
    }
}

/// The rendered output of `-h/--help`.
///
/// This travels as an error so that parsing stops immediately. `main`
/// downcasts it and prints it to stdout with a successful exit code.
#[derive(Debug)]
pub struct Help(String);

impl Help {
    /// Fills in a command's help template.
    ///
    /// `%args%` and `%flags%` become the docs collected from `targets`, with
    /// `-h/--help` and `--version` always among the flags. Anything between
    /// `%snip-start%` and `%snip-end%` is only kept when `full` is set, as it
    /// is for `--help`.
    fn render(
        template: &str,
        targets: &[&mut dyn Configurable],
        full: bool,
    ) -> Help {
        static SNIPPED: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"(?m)^\s*%snip-start%\p{any}*?%snip-end%\s*$").unwrap()
        });
        static SNIP_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"(?m)^\s*%snip-(start|end)%\s*$").unwrap()
        });

        let (args, mut flags): (Vec<Usage>, Vec<Usage>) = targets
            .iter()
            .flat_map(|t| t.usage().iter().copied())
            .chain([Help::USAGE, Version::USAGE])
            .partition(|u| !u.flag);
        flags.sort_by_key(Usage::sort_key);

        let (template, args, flags) = if full {
            let template = SNIP_MARKERS.replace_all(template, "");
            (template, Usage::document(&args), Usage::document(&flags))
        } else {
            let template = SNIPPED.replace_all(template, "");
            (template, Usage::table(&args), Usage::table(&flags))
        };
        let text =
            template.replace("%args%", &args).replace("%flags%", &flags);
        Help(text.trim().to_string())
    }

    const USAGE: Usage = Usage::flag(
        "-h/--help",
        "Print help output.",
        r#"
Print help output.

The short flag, -h, shows one line for each argument and flag. The long flag,
--help, shows complete documentation, including examples that the short output
leaves out.
"#,
    );
}

impl std::fmt::Display for Help {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Help {}

/// The output of `--version`. Handled by `main` just like `Help`.
#[derive(Debug)]
pub struct Version;

impl Version {
    const USAGE: Usage = Usage::flag(
        "--version",
        "Print the version of khaopak.",
        r#"
Print the version of khaopak.
"#,
    );
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let semver = option_env!("CARGO_PKG_VERSION").unwrap_or("N/A");
        match option_env!("KHAOPAK_BUILD_GIT_HASH") {
            None => write!(f, "khaopak {semver}"),
            Some(hash) => write!(f, "khaopak {semver} (rev {hash})"),
        }
    }
}

impl std::error::Error for Version {}
