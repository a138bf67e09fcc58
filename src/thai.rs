use std::fmt::Display;

use jiff::civil::Date;

/// What `format` returns when there is no date to render.
///
/// Callers that care about the distinction must compare against this.
pub const INVALID_DATE: &str = "Invalid date";

/// A character class matching one ASCII or Thai decimal digit.
///
/// This is spelled out instead of using `\d`, since `\d` matches every
/// Unicode decimal digit and `parse_count` only knows about these two sets.
pub const DIGIT: &str = "[0-9๐-๙]";

/// A character class matching anything that `DIGIT` doesn't.
pub const NON_DIGIT: &str = "[^0-9๐-๙]";

/// Full Thai month names, indexed by `month - 1`.
static MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// The spoken short forms, i.e., the full name without its `คม`/`ยน`/`พันธ์`
/// suffix. These are distinct from the dotted written abbreviations (`ม.ค.`),
/// which aren't supported.
static MONTHS_SHORT: [&str; 12] = [
    "มกรา",
    "กุมภา",
    "มีนา",
    "เมษา",
    "พฤษภา",
    "มิถุนา",
    "กรกฎา",
    "สิงหา",
    "กันยา",
    "ตุลา",
    "พฤศจิกา",
    "ธันวา",
];

/// Look up a month by its full or short Thai name.
///
/// The name must match exactly. Callers are responsible for trimming.
pub fn month_from_name(name: &str) -> Option<i8> {
    let index = MONTHS
        .iter()
        .position(|&full| full == name)
        .or_else(|| MONTHS_SHORT.iter().position(|&short| short == name))?;
    // There are only 12 months, so this can never truncate.
    Some(index as i8 + 1)
}

/// Return the full Thai name for the given month in the range `1..=12`.
pub fn month_name(month: i8) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTHS.get(index).copied()
}

/// Renders a date as `<day> <full Thai month name>`.
///
/// There's no year and no weekday. This never fails: when given nothing, the
/// `INVALID_DATE` sentinel is returned instead.
pub fn format(date: Option<Date>) -> String {
    match date {
        Some(date) => ThaiDate(date).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// A `Display` wrapper that renders a civil date the same way as `format`.
#[derive(Clone, Copy, Debug)]
pub struct ThaiDate(pub Date);

impl Display for ThaiDate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Jiff guarantees a month in `1..=12`.
        let month = month_name(self.0.month()).unwrap_or("?");
        write!(f, "{} {}", self.0.day(), month)
    }
}

/// Parses a non-negative count written in ASCII digits, Thai digits or any
/// mix of the two.
///
/// This returns `None` for empty input, any other character, or a number
/// that doesn't fit in an `i64`.
pub fn parse_count(digits: &str) -> Option<i64> {
    if digits.is_empty() {
        return None;
    }
    let mut n: i64 = 0;
    for ch in digits.chars() {
        let digit = match ch {
            '0'..='9' => u32::from(ch) - u32::from('0'),
            '๐'..='๙' => u32::from(ch) - u32::from('๐'),
            _ => return None,
        };
        n = n.checked_mul(10)?.checked_add(i64::from(digit))?;
    }
    Some(n)
}
