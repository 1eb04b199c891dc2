// Wall-clock helpers: Unix time <-> calendar fields, and the hand angles for a time of day.
// Calendar math uses days-from-civil, valid for 1970..2106 (u32 seconds).

use crate::trig::minute_index;

const SECS_PER_DAY: u32 = 86_400;
// 1970-01-01 was a Thursday
const EPOCH_WEEKDAY: u32 = 4;
// Days from 0000-03-01 to 1970-01-01
const DAYS_TO_EPOCH: i64 = 719_468;
const DAYS_PER_ERA: i64 = 146_097;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,  // full year, e.g., 2024
    pub month: u8,  // 1-12
    pub day: u8,    // 1-31
    pub hour: u8,   // 0-23
    pub minute: u8, // 0-59
    pub second: u8, // 0-59
}

impl DateTime {
    /// 0 = Sunday .. 6 = Saturday.
    pub fn weekday(&self) -> u8 {
        let days = days_from_civil(self.year, self.month, self.day);
        ((days + EPOCH_WEEKDAY as i64).rem_euclid(7)) as u8
    }

    /// Angles of the three hands at this time of day.
    pub fn hand_angles(&self) -> HandAngles {
        HandAngles::from_time(self.hour, self.minute, self.second)
    }
}

// Signed day count relative to 1970-01-01.
fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let (y, m) = if month <= 2 {
        (year as i64 - 1, month as i64 + 12)
    } else {
        (year as i64, month as i64)
    };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let doy = (153 * (m - 3) + 2) / 5 + day as i64 - 1; // days since March 1
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - DAYS_TO_EPOCH
}

/// Seconds since 1970-01-01 (UTC), saturating at the `u32` range.
pub fn datetime_to_unix(dt: &DateTime) -> u32 {
    let days = days_from_civil(dt.year, dt.month, dt.day);
    let secs = days * SECS_PER_DAY as i64
        + dt.hour as i64 * 3600
        + dt.minute as i64 * 60
        + dt.second as i64;
    secs.clamp(0, u32::MAX as i64) as u32
}

/// Calendar fields for a Unix timestamp.
pub fn unix_to_datetime(ts: u32) -> DateTime {
    let days = (ts / SECS_PER_DAY) as i64;
    let rem = ts % SECS_PER_DAY;

    let z = days + DAYS_TO_EPOCH;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    DateTime {
        year: year as u16,
        month: month as u8,
        day: day as u8,
        hour: (rem / 3600) as u8,
        minute: (rem % 3600 / 60) as u8,
        second: (rem % 60) as u8,
    }
}

// Basic sanity check, e.g. for a clock chip that lost power.
pub fn datetime_is_valid(dt: &DateTime) -> bool {
    (1970..=2106).contains(&dt.year)
        && (1..=12).contains(&dt.month)
        && (1..=31).contains(&dt.day)
        && dt.hour < 24
        && dt.minute < 60
        && dt.second < 60
}

/// Three-letter month name for 1..=12, `"???"` otherwise.
pub fn month_abbrev(month: u8) -> &'static str {
    MONTHS.get((month as usize).wrapping_sub(1)).copied().unwrap_or("???")
}

/// Three-letter weekday name, 0 = Sunday.
pub fn weekday_abbrev(weekday: u8) -> &'static str {
    WEEKDAYS.get(weekday as usize).copied().unwrap_or("???")
}

/// Hand angles in trig-angle units, 0 at 12 o'clock, clockwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HandAngles {
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

impl HandAngles {
    /// Hour hand moves half an arc-minute per second, minute hand six per
    /// second, second hand six degrees per second.
    pub fn from_time(hour: u8, minute: u8, second: u8) -> Self {
        let (h, m, s) = ((hour % 12) as i32, minute as i32, second as i32);
        Self {
            hour: minute_index(((h * 60 + m) * 60 + s) / 2),
            minute: minute_index((m * 60 + s) * 6),
            second: minute_index(s * 360),
        }
    }
}
