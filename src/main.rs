use std::{env, io::Write, process::ExitCode, sync::LazyLock};

use {
    anyhow::Context,
    jiff::{Timestamp, Zoned, civil, tz::TimeZone},
};

mod api;
mod args;
mod checkout;
mod cmd;
mod duration;
mod logger;
mod normalize;
mod parse;
mod resolve;
mod style;
mod thai;

static TZ: LazyLock<TimeZone> = LazyLock::new(|| TimeZone::system());

/// The current instant, read exactly once.
///
/// Everything that needs "today" goes through this, so that all phrases in
/// one invocation agree on what today is.
static NOW: LazyLock<Zoned> = LazyLock::new(|| match read_env_khaopak_now() {
    Ok(Some(zdt)) => {
        log::trace!(
            "setting current time to `{zdt}` from `KHAOPAK_NOW` \
             environment variable",
        );
        zdt
    }
    Ok(None) => {
        let now = Timestamp::now().to_zoned(TZ.clone());
        log::trace!(
            "`KHAOPAK_NOW` environment variable not set, using \
             current time `{now}`",
        );
        now
    }
    Err(err) => {
        let now = Timestamp::now().to_zoned(TZ.clone());
        log::warn!(
            "reading `KHAOPAK_NOW` failed, using current time \
             `{now}`: {err:#}",
        );
        now
    }
});

/// The local date of `NOW`.
pub fn today() -> civil::Date {
    NOW.date()
}

/// One night here, and the next day you leave.
fn main() -> ExitCode {
    let err = match run() {
        Ok(code) => return code,
        Err(err) => err,
    };
    if let Some(help) = err.root_cause().downcast_ref::<args::Help>() {
        writeln!(&mut std::io::stdout(), "{help}").unwrap();
        return ExitCode::SUCCESS;
    }
    if let Some(version) = err.root_cause().downcast_ref::<args::Version>() {
        writeln!(&mut std::io::stdout(), "{version}").unwrap();
        return ExitCode::SUCCESS;
    }
    // A closed pipe (e.g., `khaopak batch | head -n1`) isn't an error worth
    // reporting. Rust ignores SIGPIPE, so it shows up as an I/O error.
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<std::io::Error>() {
            if err.kind() == std::io::ErrorKind::BrokenPipe {
                return ExitCode::from(0);
            }
        }
        // `serde_json` wraps I/O errors instead of exposing them as a
        // source, so they need to be sniffed out separately.
        if let Some(err) = cause.downcast_ref::<serde_json::Error>() {
            if err.io_error_kind() == Some(std::io::ErrorKind::BrokenPipe) {
                return ExitCode::from(0);
            }
        }
    }
    if std::env::var("RUST_BACKTRACE").map_or(false, |v| v == "1")
        && std::env::var("RUST_LIB_BACKTRACE").map_or(true, |v| v == "1")
    {
        writeln!(&mut std::io::stderr(), "{:?}", err).unwrap();
    } else {
        writeln!(&mut std::io::stderr(), "{:#}", err).unwrap();
    }
    ExitCode::from(1)
}

fn run() -> anyhow::Result<ExitCode> {
    let level = env::var("KHAOPAK_LOG").unwrap_or_else(|_| String::new());
    let level = match &*level {
        "" | "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        unk => anyhow::bail!("unrecognized log level '{}'", unk),
    };
    log::set_max_level(level);
    // The logger is installed before the time zone is known so that
    // `TimeZone::system()` can log while it is being discovered. Early
    // messages are stamped in UTC.
    let logger = logger::Logger::init()?;
    logger.set_time_zone(TZ.clone());
    cmd::run(&mut lexopt::Parser::from_env())?;
    Ok(ExitCode::SUCCESS)
}

/// Reads `KHAOPAK_NOW` as either an RFC 3339 timestamp or a civil date.
///
/// A civil date is interpreted as midnight in the system time zone.
fn read_env_khaopak_now() -> anyhow::Result<Option<Zoned>> {
    let Some(val) = std::env::var_os("KHAOPAK_NOW") else { return Ok(None) };
    let Some(val) = val.to_str() else {
        anyhow::bail!(
            "`KHAOPAK_NOW` environment variable is not valid UTF-8: {val:?}"
        )
    };
    if let Ok(ts) = val.parse::<Timestamp>() {
        return Ok(Some(ts.to_zoned(TZ.clone())));
    }
    let date = val.parse::<civil::Date>().context(
        "`KHAOPAK_NOW` environment variable is neither a valid RFC 3339 \
         timestamp nor a valid date",
    )?;
    let zdt = date.to_zoned(TZ.clone()).with_context(|| {
        format!("failed to find the start of {date} in the system time zone")
    })?;
    Ok(Some(zdt))
}
