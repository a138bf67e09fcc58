use std::sync::LazyLock;

use regex::Regex;

use crate::thai::{DIGIT, parse_count};

/// A unit of stay length and the number of days it stands for.
///
/// Months and years are approximated as 30 and 365 days. This isn't
/// calendar arithmetic: `1 เดือน` from January 31 lands on March 2 (or 1).
#[derive(Debug)]
struct Unit {
    name: &'static str,
    /// Matches `<count><unit>` at the start of the text, with the count in
    /// the `count` capture group.
    regex: Regex,
    days: i64,
}

impl Unit {
    fn new(name: &'static str, spellings: &str, days: i64) -> Unit {
        let pattern = format!(r"^(?<count>{DIGIT}+)\s*(?:{spellings})");
        Unit { name, regex: Regex::new(&pattern).unwrap(), days }
    }

    /// Returns the total number of days if `text` starts with this unit.
    ///
    /// A count too big to compute with is treated as no match at all.
    fn days(&self, text: &str) -> Option<i64> {
        let caps = self.regex.captures(text)?;
        let count = &caps["count"];
        let Some(days) =
            parse_count(count).and_then(|n| n.checked_mul(self.days))
        else {
            log::debug!(
                "matched `{count}` {name} in `{text}`, but it overflows",
                name = self.name,
            );
            return None;
        };
        Some(days)
    }
}

/// The unit matchers in priority order. The first that matches wins.
static UNITS: LazyLock<Vec<Unit>> = LazyLock::new(|| {
    vec![
        Unit::new("nights", "คืน", 1),
        Unit::new("days", "วัน", 1),
        Unit::new("weeks", "สัปดาห์|อาทิตย์", 7),
        Unit::new("months", "เดือน", 30),
        Unit::new("years", "ปี", 365),
    ]
});

/// Phrases without a numeral that are still recognized as a duration. These
/// must match the whole text.
const LITERALS: &[(&str, i64)] = &[("หนึ่งสัปดาห์", 7), ("หนึ่งอาทิตย์", 7)];

/// Parses a stay duration, in days, from the start of a normalized phrase.
///
/// Anything after the unit is ignored, so `3 คืน 4 วัน` is 3 days. When
/// nothing matches, `None` is returned and the caller may want to try the
/// text as a check-out date instead.
pub fn parse(text: &str) -> Option<i64> {
    let text = text.trim().to_lowercase();
    for unit in UNITS.iter() {
        if let Some(days) = unit.days(&text) {
            log::trace!("parsed `{text}` as {days} days via {}", unit.name);
            return Some(days);
        }
    }
    let days = LITERALS
        .iter()
        .find_map(|&(phrase, days)| (phrase == text).then_some(days));
    match days {
        Some(days) => log::trace!("parsed `{text}` as literal {days} days"),
        None => log::trace!("`{text}` is not a recognized duration"),
    }
    days
}
