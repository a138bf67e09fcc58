use jiff::{Unit, civil::Date};

use crate::{
    duration,
    normalize::{Normalized, normalize},
    resolve, thai,
};

/// The reason a stay couldn't be computed.
///
/// None of these are fatal. They describe input that didn't make sense,
/// and each one maps to a fixed message suitable for showing to an end
/// user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Failure {
    /// The check-in phrase didn't resolve to a date.
    InvalidCheckIn,
    /// The second phrase was neither a duration nor a date.
    InvalidDuration,
    /// The check-out date couldn't be computed or rendered, e.g., because it
    /// is beyond the range of supported dates.
    InvalidDateCalculation,
}

impl Failure {
    /// The user facing message for this failure.
    pub fn message(&self) -> &'static str {
        match *self {
            Failure::InvalidCheckIn => "invalid check-in date",
            Failure::InvalidDuration => "invalid duration/checkout input",
            Failure::InvalidDateCalculation => "invalid date calculation",
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for Failure {}

/// A resolved stay, with both dates already rendered in Thai.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stay {
    pub check_in: String,
    pub check_out: String,
}

/// Computes a stay from a check-in phrase and a phrase that is either a
/// duration or a check-out date.
///
/// `today` is the reference for the check-in phrase. When the second phrase
/// isn't a duration, it is resolved as a date relative to the check-in date
/// instead, and the stay is however many days separate the two. That may be
/// negative. A check-out before check-in is not rejected.
pub fn calculate(
    check_in: &str,
    duration_or_checkout: &str,
    today: Date,
) -> Result<Stay, Failure> {
    let arrival_text = normalize(check_in);
    let rest_text = normalize(duration_or_checkout);
    log::debug!(
        "calculating stay for check-in `{arrival_text}` and \
         duration/check-out `{rest_text}` relative to {today}",
    );

    let arrival = resolve::resolve(arrival_text.as_str(), today)
        .ok_or(Failure::InvalidCheckIn)?;
    let days = stay_length(&rest_text, arrival)?;
    let departure = match resolve::add_days(arrival, days) {
        Ok(departure) => Some(departure),
        Err(err) => {
            log::debug!("failed to add {days} days to {arrival}: {err}");
            None
        }
    };
    let check_out = thai::format(departure);
    if check_out == thai::INVALID_DATE {
        return Err(Failure::InvalidDateCalculation);
    }
    // The check-in date is resolved a second time from the raw phrase rather
    // than reusing `arrival`. Both use the same `today`, so they agree.
    let again = resolve::resolve(normalize(check_in).as_str(), today);
    let check_in = thai::format(again);
    Ok(Stay { check_in, check_out })
}

/// Returns the number of days in the stay.
///
/// The text is tried as a duration first, and then as a check-out date
/// relative to the arrival date.
fn stay_length(text: &Normalized, arrival: Date) -> Result<i64, Failure> {
    if let Some(days) = duration::parse(text.as_str()) {
        return Ok(days);
    }
    log::debug!(
        "`{text}` is not a duration, falling back to parsing a check-out date",
    );
    let departure = resolve::resolve(text.as_str(), arrival)
        .ok_or(Failure::InvalidDuration)?;
    let span = arrival.until((Unit::Day, departure)).map_err(|err| {
        log::debug!("failed to find days from {arrival} to {departure}: {err}");
        Failure::InvalidDateCalculation
    })?;
    Ok(i64::from(span.get_days()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    const TODAY: Date = date(2024, 7, 20);

    fn stay(check_in: &str, check_out: &str) -> Result<Stay, Failure> {
        Ok(Stay {
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
        })
    }

    #[test]
    fn today_and_nights() {
        assert_eq!(
            calculate("วันนี้", "3 คืน", TODAY),
            stay("20 กรกฎาคม", "23 กรกฎาคม"),
        );
    }

    #[test]
    fn durations_in_every_unit() {
        let cases = [
            ("2 วัน", "22 กรกฎาคม"),
            ("2 สัปดาห์", "3 สิงหาคม"),
            ("1 เดือน", "19 สิงหาคม"),
            ("1 ปี", "20 กรกฎาคม"),
            ("หนึ่งสัปดาห์", "27 กรกฎาคม"),
        ];
        for (duration, check_out) in cases {
            assert_eq!(
                calculate("วันนี้", duration, TODAY),
                stay("20 กรกฎาคม", check_out),
                "{duration}",
            );
        }
    }

    #[test]
    fn tomorrow_and_checkout_date() {
        assert_eq!(
            calculate("พรุ่งนี้", "25 กรกฎาคม", TODAY),
            stay("21 กรกฎาคม", "25 กรกฎาคม"),
        );
    }

    #[test]
    fn checkout_before_checkin_is_allowed() {
        assert_eq!(
            calculate("พรุ่งนี้", "1 กรกฎาคม", TODAY),
            stay("21 กรกฎาคม", "1 กรกฎาคม"),
        );
    }

    /// A relative check-out phrase is relative to the check-in date, not to
    /// today.
    #[test]
    fn relative_checkout_is_relative_to_checkin() {
        assert_eq!(
            calculate("15 สิงหาคม", "พรุ่งนี้", TODAY),
            stay("15 สิงหาคม", "16 สิงหาคม"),
        );
        assert_eq!(
            calculate("15 สิงหาคม", "อีก 5 วัน", TODAY),
            stay("15 สิงหาคม", "20 สิงหาคม"),
        );
    }

    #[test]
    fn noisy_phrases() {
        assert_eq!(
            calculate(
                "อยากเช็คอินวันที่ 15 สิงหาคม ครับ",
                "3 คืนได้ไหมครับ",
                TODAY,
            ),
            stay("15 สิงหาคม", "18 สิงหาคม"),
        );
        assert_eq!(
            calculate("ขอเข้าพักพรุ่งนี้ ค่ะ", "ออกวันที่ 30 กรกฎา", TODAY),
            stay("21 กรกฎาคม", "30 กรกฎาคม"),
        );
    }

    #[test]
    fn invalid_check_in() {
        assert_eq!(
            calculate("เมื่อไหร่ก็ได้", "3 คืน", TODAY),
            Err(Failure::InvalidCheckIn),
        );
        assert_eq!(
            calculate("31 กุมภาพันธ์", "3 คืน", TODAY),
            Err(Failure::InvalidCheckIn),
        );
        assert_eq!(
            calculate("", "3 คืน", TODAY),
            Err(Failure::InvalidCheckIn),
        );
    }

    #[test]
    fn invalid_duration() {
        assert_eq!(
            calculate("วันนี้", "นานๆ", TODAY),
            Err(Failure::InvalidDuration),
        );
        assert_eq!(
            calculate("วันนี้", "30 กุมภาพันธ์", TODAY),
            Err(Failure::InvalidDuration),
        );
    }

    #[test]
    fn invalid_date_calculation() {
        assert_eq!(
            calculate("วันนี้", "99999 ปี", TODAY),
            Err(Failure::InvalidDateCalculation),
        );
    }

    #[test]
    fn check_in_is_checked_first() {
        assert_eq!(
            calculate("ไม่รู้", "ไม่รู้", TODAY),
            Err(Failure::InvalidCheckIn),
        );
    }

    #[test]
    fn messages() {
        assert_eq!(Failure::InvalidCheckIn.to_string(), "invalid check-in date");
        assert_eq!(
            Failure::InvalidDuration.to_string(),
            "invalid duration/checkout input",
        );
        assert_eq!(
            Failure::InvalidDateCalculation.to_string(),
            "invalid date calculation",
        );
    }
}
