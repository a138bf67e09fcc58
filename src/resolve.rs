use std::sync::LazyLock;

use {
    jiff::{Span, civil::Date},
    regex::Regex,
};

use crate::thai::{self, DIGIT, NON_DIGIT, parse_count};

/// A single way of turning text into a date relative to a reference date.
type Resolver = fn(&str, Date) -> Option<Date>;

/// The resolvers in priority order. The first one that returns a date wins.
static RESOLVERS: &[(&str, Resolver)] = &[
    ("keyword", keyword),
    ("days from now", days_from_now),
    ("day and month", day_and_month),
];

/// Resolves a normalized phrase into a date, relative to `reference`.
///
/// This understands `วันนี้` (today), `พรุ่งนี้`/`วันพรุ่งนี้` (tomorrow),
/// `อีก N วัน` (N days from now) and a day followed by a full or short Thai
/// month name. In the last case, the year is always the reference date's year.
/// A month name followed by a day (the reverse order) is not supported.
///
/// When nothing matches, or the phrase names a day that doesn't exist (like
/// `31 กุมภาพันธ์`), `None` is returned.
pub fn resolve(text: &str, reference: Date) -> Option<Date> {
    RESOLVERS.iter().find_map(|&(name, resolver)| {
        let date = resolver(text, reference)?;
        log::trace!("resolved `{text}` to {date} via {name}");
        Some(date)
    })
}

/// Adds a number of days to a date.
///
/// This returns an error when the result falls outside of the range of
/// dates supported by Jiff.
pub fn add_days(date: Date, days: i64) -> Result<Date, jiff::Error> {
    date.checked_add(Span::new().try_days(days)?)
}

/// Exact matches for a handful of relative keywords.
fn keyword(text: &str, reference: Date) -> Option<Date> {
    let days = match text {
        "วันนี้" => 0,
        "พรุ่งนี้" | "วันพรุ่งนี้" => 1,
        _ => return None,
    };
    offset(reference, days)
}

/// `อีก N วัน`, i.e., "in N more days."
fn days_from_now(text: &str, reference: Date) -> Option<Date> {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(&format!(r"^อีก\s*(?<days>{DIGIT}+)\s*วัน")).unwrap()
    });

    let caps = RE.captures(text)?;
    let days = parse_count(&caps["days"])?;
    offset(reference, days)
}

/// `<day><month name>`, e.g., `15 มกราคม` or `15มกรา`.
///
/// Everything after the day up to the next digit must be a month name once
/// trimmed. So `15 มกราคม 2567` works (the year is ignored), but `15 มกราคม
/// นี้` does not.
fn day_and_month(text: &str, reference: Date) -> Option<Date> {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(&format!(r"^(?<day>{DIGIT}+)\s*(?<month>{NON_DIGIT}+)"))
            .unwrap()
    });

    let caps = RE.captures(text)?;
    let month = thai::month_from_name(caps["month"].trim())?;
    let day = parse_count(&caps["day"]).and_then(|n| i8::try_from(n).ok());
    let Some(day) = day else {
        log::debug!("day `{}` in `{text}` is out of range", &caps["day"]);
        return None;
    };
    match Date::new(reference.year(), month, day) {
        Ok(date) => Some(date),
        Err(err) => {
            log::debug!("`{text}` is not a real date: {err}");
            None
        }
    }
}

fn offset(reference: Date, days: i64) -> Option<Date> {
    match add_days(reference, days) {
        Ok(date) => Some(date),
        Err(err) => {
            log::debug!("failed to add {days} days to {reference}: {err}");
            None
        }
    }
}
