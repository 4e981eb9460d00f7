//! JavaScript Date
//!
//! A date is a time value: milliseconds since 1970-01-01T00:00:00Z as an
//! f64, NaN for an invalid date. All calendar fields are computed in UTC.

use std::time::{SystemTime, UNIX_EPOCH};

const MS_PER_SECOND: f64 = 1000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;

/// Largest magnitude a time value may have (100 million days)
pub const MAX_TIME: f64 = 8.64e15;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// JavaScript Date value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JSDate {
    time: f64,
}

impl JSDate {
    /// Create a date from a time value, clipping out-of-range values to NaN
    pub fn from_time(time: f64) -> Self {
        let time = if time.is_finite() && time.abs() <= MAX_TIME {
            time.trunc() + 0.0
        } else {
            f64::NAN
        };
        JSDate { time }
    }

    /// The current time
    pub fn now() -> Self {
        let ms = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_millis() as f64,
            Err(e) => -(e.duration().as_millis() as f64),
        };
        JSDate::from_time(ms)
    }

    /// An invalid date
    pub fn invalid() -> Self {
        JSDate { time: f64::NAN }
    }

    /// `Date.UTC(year, month0, day, hours, minutes, seconds, ms)`
    ///
    /// Fields out of their usual range carry into the next larger field:
    /// month 12 is January of the following year, day 0 is the last day of
    /// the previous month.
    pub fn from_components(
        year: f64,
        month0: f64,
        day: f64,
        hours: f64,
        minutes: f64,
        seconds: f64,
        ms: f64,
    ) -> Self {
        let fields = [year, month0, day, hours, minutes, seconds, ms];
        if fields.iter().any(|f| !f.is_finite()) {
            return JSDate::invalid();
        }
        let [year, month0, day, hours, minutes, seconds, ms] = fields.map(f64::trunc);

        let y = year + (month0 / 12.0).floor();
        let m = month0.rem_euclid(12.0);
        if y.abs() > 400_000.0 {
            return JSDate::invalid();
        }
        let days = days_from_civil(y as i64, m as u32 + 1, 1) as f64 + day - 1.0;
        let time = hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + ms;
        JSDate::from_time(days * MS_PER_DAY + time)
    }

    /// Parse an ISO-8601 date or date-time string
    ///
    /// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, extended years (`+YYYYYY`),
    /// and an optional `THH:MM[:SS[.sss]]` part followed by `Z` or a
    /// `±HH:MM` offset. A missing offset is read as UTC. Anything else gives
    /// an invalid date.
    pub fn parse(text: &str) -> Self {
        parse_iso(text.trim()).map_or_else(JSDate::invalid, JSDate::from_time)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.time.is_nan()
    }

    /// `date.getTime()`
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    fn day_number(&self) -> Option<i64> {
        self.is_valid().then(|| (self.time / MS_PER_DAY).floor() as i64)
    }

    fn time_in_day(&self) -> Option<i64> {
        self.is_valid().then(|| self.time.rem_euclid(MS_PER_DAY) as i64)
    }

    fn civil(&self) -> Option<(i64, u32, u32)> {
        self.day_number().map(civil_from_days)
    }

    /// Full year
    pub fn year(&self) -> Option<i64> {
        self.civil().map(|(y, _, _)| y)
    }

    /// Month, 0 for January
    pub fn month(&self) -> Option<u32> {
        self.civil().map(|(_, m, _)| m - 1)
    }

    /// Day of the month, from 1
    pub fn day(&self) -> Option<u32> {
        self.civil().map(|(_, _, d)| d)
    }

    /// Day of the week, 0 for Sunday
    pub fn weekday(&self) -> Option<u32> {
        // 1970-01-01 was a Thursday
        self.day_number().map(|d| (d + 4).rem_euclid(7) as u32)
    }

    pub fn hours(&self) -> Option<u32> {
        self.time_in_day().map(|t| (t / 3_600_000) as u32)
    }

    pub fn minutes(&self) -> Option<u32> {
        self.time_in_day().map(|t| (t / 60_000 % 60) as u32)
    }

    pub fn seconds(&self) -> Option<u32> {
        self.time_in_day().map(|t| (t / 1000 % 60) as u32)
    }

    pub fn milliseconds(&self) -> Option<u32> {
        self.time_in_day().map(|t| (t % 1000) as u32)
    }

    /// `date.toISOString()`, None for an invalid date
    pub fn to_iso_string(&self) -> Option<String> {
        let (y, m, d) = self.civil()?;
        let year = if (0..=9999).contains(&y) {
            format!("{:04}", y)
        } else if y < 0 {
            format!("-{:06}", -y)
        } else {
            format!("+{:06}", y)
        };
        Some(format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year,
            m,
            d,
            self.hours()?,
            self.minutes()?,
            self.seconds()?,
            self.milliseconds()?
        ))
    }

    /// `String(date)`, always rendered in UTC
    pub fn to_js_string(&self) -> String {
        let (Some((y, m, d)), Some(wd)) = (self.civil(), self.weekday()) else {
            return "Invalid Date".to_string();
        };
        let year = if y < 0 {
            format!("-{:06}", -y)
        } else {
            format!("{:04}", y)
        };
        format!(
            "{} {} {:02} {} {:02}:{:02}:{:02} GMT+0000 (Coordinated Universal Time)",
            WEEKDAYS[wd as usize],
            MONTHS[(m - 1) as usize],
            d,
            year,
            self.hours().unwrap_or_default(),
            self.minutes().unwrap_or_default(),
            self.seconds().unwrap_or_default()
        )
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date
fn days_from_civil(y: i64, m: u32, d: u32) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(400);
    let yoe = y.rem_euclid(400);
    let m = m as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + d as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of `days_from_civil`
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let y = yoe + era * 400 + if m <= 2 { 1 } else { 0 };
    (y, m, d)
}

fn is_leap_year(y: i64) -> bool {
    (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
}

fn days_in_month(y: i64, m: u32) -> u32 {
    match m {
        2 if is_leap_year(y) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Cursor over the bytes of a date string
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Read exactly `n` decimal digits
    fn digits(&mut self, n: usize) -> Option<i64> {
        let end = self.pos + n;
        let chunk = self.bytes.get(self.pos..end)?;
        if !chunk.iter().all(u8::is_ascii_digit) {
            return None;
        }
        self.pos = end;
        Some(chunk.iter().fold(0, |acc, b| acc * 10 + (b - b'0') as i64))
    }

    fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }
}

fn parse_iso(text: &str) -> Option<f64> {
    let mut s = Scanner {
        bytes: text.as_bytes(),
        pos: 0,
    };

    let year = match s.peek()? {
        b'+' => {
            s.pos += 1;
            s.digits(6)?
        }
        b'-' => {
            s.pos += 1;
            let y = s.digits(6)?;
            // -000000 is not a valid year
            if y == 0 {
                return None;
            }
            -y
        }
        _ => s.digits(4)?,
    };

    let mut month = 1;
    let mut day = 1;
    if s.eat(b'-') {
        month = s.digits(2)? as u32;
        if !(1..=12).contains(&month) {
            return None;
        }
        if s.eat(b'-') {
            day = s.digits(2)? as u32;
            if day < 1 || day > days_in_month(year, month) {
                return None;
            }
        }
    }

    let (mut hour, mut minute, mut second, mut millis) = (0, 0, 0, 0);
    let mut offset_minutes = 0;
    if s.eat(b'T') || s.eat(b' ') {
        hour = s.digits(2)?;
        if !s.eat(b':') {
            return None;
        }
        minute = s.digits(2)?;
        if s.eat(b':') {
            second = s.digits(2)?;
            if s.eat(b'.') {
                let start = s.pos;
                while s.peek().is_some_and(|c| c.is_ascii_digit()) {
                    s.pos += 1;
                }
                let frac = &text[start..s.pos];
                if frac.is_empty() {
                    return None;
                }
                // Only milliseconds are kept; extra precision is dropped
                let padded = format!("{:0<3}", &frac[..frac.len().min(3)]);
                millis = padded.parse().ok()?;
            }
        }
        let past_midnight = hour == 24 && (minute, second, millis) != (0, 0, 0);
        if minute > 59 || second > 59 || hour > 24 || past_midnight {
            return None;
        }

        match s.peek() {
            Some(b'Z') => s.pos += 1,
            Some(sign @ (b'+' | b'-')) => {
                s.pos += 1;
                let oh = s.digits(2)?;
                if !s.eat(b':') {
                    return None;
                }
                let om = s.digits(2)?;
                if oh > 23 || om > 59 {
                    return None;
                }
                offset_minutes = (oh * 60 + om) * if sign == b'+' { 1 } else { -1 };
            }
            _ => {}
        }
    }

    if !s.at_end() {
        return None;
    }

    let days = days_from_civil(year, month, day) as f64;
    let time = hour as f64 * MS_PER_HOUR
        + minute as f64 * MS_PER_MINUTE
        + second as f64 * MS_PER_SECOND
        + millis as f64
        - offset_minutes as f64 * MS_PER_MINUTE;
    let t = days * MS_PER_DAY + time;
    (t.abs() <= MAX_TIME).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let d = JSDate::from_time(0.0);
        assert_eq!(d.year(), Some(1970));
        assert_eq!(d.month(), Some(0));
        assert_eq!(d.day(), Some(1));
        assert_eq!(d.weekday(), Some(4));
        assert_eq!(d.to_iso_string().as_deref(), Some("1970-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_from_components() {
        let d = JSDate::from_components(2023.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(d.to_iso_string().as_deref(), Some("2023-01-01T00:00:00.000Z"));
        assert_eq!(d.weekday(), Some(0));
    }

    #[test]
    fn test_component_overflow_carries() {
        let d = JSDate::from_components(2023.0, 12.0, 1.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(d.year(), Some(2024));
        assert_eq!(d.month(), Some(0));

        // Day 0 is the last day of the previous month
        let d = JSDate::from_components(2024.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(d.month(), Some(1));
        assert_eq!(d.day(), Some(29));
    }

    #[test]
    fn test_parse_date_only() {
        let d = JSDate::parse("2023-12-25");
        assert_eq!(d.to_iso_string().as_deref(), Some("2023-12-25T00:00:00.000Z"));
        assert_eq!(JSDate::parse("2023").month(), Some(0));
    }

    #[test]
    fn test_parse_date_time() {
        let d = JSDate::parse("2023-12-25T10:30:00Z");
        assert_eq!(d.hours(), Some(10));
        assert_eq!(d.minutes(), Some(30));

        let d = JSDate::parse("2023-12-25T10:30:00.5+09:00");
        assert_eq!(d.to_iso_string().as_deref(), Some("2023-12-25T01:30:00.500Z"));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(!JSDate::parse("invalid date").is_valid());
        assert!(!JSDate::parse("2023-02-30").is_valid());
        assert!(!JSDate::parse("2023-13-01").is_valid());
        assert!(!JSDate::parse("2023-01-01T25:00").is_valid());
        assert!(!JSDate::parse("").is_valid());
    }

    #[test]
    fn test_invalid_date() {
        let d = JSDate::invalid();
        assert!(!d.is_valid());
        assert_eq!(d.to_iso_string(), None);
        assert_eq!(d.year(), None);
        assert_eq!(d.to_js_string(), "Invalid Date");
    }

    #[test]
    fn test_time_clip() {
        assert!(JSDate::from_time(MAX_TIME).is_valid());
        assert!(!JSDate::from_time(MAX_TIME + 1.0).is_valid());
        assert!(!JSDate::from_time(f64::INFINITY).is_valid());
    }

    #[test]
    fn test_extended_years() {
        let d = JSDate::from_time(-MAX_TIME);
        assert_eq!(d.to_iso_string().as_deref(), Some("-271821-04-20T00:00:00.000Z"));
        let d = JSDate::from_time(MAX_TIME);
        assert_eq!(d.to_iso_string().as_deref(), Some("+275760-09-13T00:00:00.000Z"));
        assert!(JSDate::parse("+275760-09-13T00:00:00.000Z").is_valid());
    }

    #[test]
    fn test_before_epoch() {
        let d = JSDate::from_time(-1.0);
        assert_eq!(d.to_iso_string().as_deref(), Some("1969-12-31T23:59:59.999Z"));
    }

    #[test]
    fn test_to_js_string() {
        let d = JSDate::from_components(2023.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            d.to_js_string(),
            "Sun Jan 01 2023 00:00:00 GMT+0000 (Coordinated Universal Time)"
        );
    }
}
