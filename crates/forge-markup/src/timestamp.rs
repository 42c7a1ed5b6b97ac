// embed-forge/forge-markup
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// The style letter of a `<t:seconds:style>` timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimestampStyle {
    /// 2:30 PM
    #[serde(rename = "t")]
    ShortTime,
    /// 2:30:20 PM
    #[serde(rename = "T")]
    LongTime,
    /// 01/20/2022
    #[serde(rename = "d")]
    ShortDate,
    /// January 20, 2022
    #[serde(rename = "D")]
    LongDate,
    /// January 20, 2022 2:30 PM
    #[default]
    #[serde(rename = "f")]
    ShortDateTime,
    /// Thursday, January 20, 2022 2:30 PM
    #[serde(rename = "F")]
    LongDateTime,
    /// 2 hours ago
    #[serde(rename = "R")]
    Relative,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Unknown timestamp style '{0}'")]
pub struct UnknownTimestampStyle(pub String);

impl TimestampStyle {
    pub fn code(&self) -> char {
        match self {
            TimestampStyle::ShortTime => 't',
            TimestampStyle::LongTime => 'T',
            TimestampStyle::ShortDate => 'd',
            TimestampStyle::LongDate => 'D',
            TimestampStyle::ShortDateTime => 'f',
            TimestampStyle::LongDateTime => 'F',
            TimestampStyle::Relative => 'R',
        }
    }

    /// Formats `instant` in `offset`. Relative timestamps are measured against `now`.
    pub fn format(
        &self,
        instant: DateTime<Utc>,
        now: DateTime<Utc>,
        offset: &FixedOffset,
    ) -> String {
        let local = instant.with_timezone(offset);
        match self {
            TimestampStyle::ShortTime => local.format("%-I:%M %p").to_string(),
            TimestampStyle::LongTime => local.format("%-I:%M:%S %p").to_string(),
            TimestampStyle::ShortDate => local.format("%m/%d/%Y").to_string(),
            TimestampStyle::LongDate => local.format("%B %-d, %Y").to_string(),
            TimestampStyle::ShortDateTime => local.format("%B %-d, %Y %-I:%M %p").to_string(),
            TimestampStyle::LongDateTime => {
                local.format("%A, %B %-d, %Y %-I:%M %p").to_string()
            }
            TimestampStyle::Relative => format_relative(instant, now),
        }
    }
}

impl TryFrom<char> for TimestampStyle {
    type Error = UnknownTimestampStyle;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            't' => TimestampStyle::ShortTime,
            'T' => TimestampStyle::LongTime,
            'd' => TimestampStyle::ShortDate,
            'D' => TimestampStyle::LongDate,
            'f' => TimestampStyle::ShortDateTime,
            'F' => TimestampStyle::LongDateTime,
            'R' => TimestampStyle::Relative,
            _ => return Err(UnknownTimestampStyle(value.to_string())),
        })
    }
}

impl FromStr for TimestampStyle {
    type Err = UnknownTimestampStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.try_into(),
            _ => Err(UnknownTimestampStyle(s.to_string())),
        }
    }
}

impl Display for TimestampStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Converts seconds since the epoch, rejecting values chrono can't represent.
pub fn instant_from_unix_seconds(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

pub fn format_relative(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(instant).num_seconds();
    let seconds = diff.abs();

    let (amount, unit) = match seconds {
        s if s < MINUTE => (s, "second"),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < MONTH => (s / DAY, "day"),
        s if s < YEAR => (s / MONTH, "month"),
        s => (s / YEAR, "year"),
    };
    let plural = if amount == 1 { "" } else { "s" };

    if diff < 0 {
        format!("in {amount} {unit}{plural}")
    } else {
        format!("{amount} {unit}{plural} ago")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn instant() -> DateTime<Utc> {
        instant_from_unix_seconds(1_700_000_000).unwrap()
    }

    #[test]
    fn test_formats_absolute_styles_in_utc() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let now = Utc::now();

        let cases = [
            (TimestampStyle::ShortTime, "10:13 PM"),
            (TimestampStyle::LongTime, "10:13:20 PM"),
            (TimestampStyle::ShortDate, "11/14/2023"),
            (TimestampStyle::LongDate, "November 14, 2023"),
            (TimestampStyle::ShortDateTime, "November 14, 2023 10:13 PM"),
            (
                TimestampStyle::LongDateTime,
                "Tuesday, November 14, 2023 10:13 PM",
            ),
        ];

        for (style, expected) in cases {
            assert_eq!(style.format(instant(), now, &utc), expected, "{style}");
        }
    }

    #[test]
    fn test_formats_in_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            TimestampStyle::ShortTime.format(instant(), Utc::now(), &offset),
            "12:13 AM"
        );
        assert_eq!(
            TimestampStyle::LongDate.format(instant(), Utc::now(), &offset),
            "November 15, 2023"
        );
    }

    #[test]
    fn test_formats_relative() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        assert_eq!(format_relative(now, now), "0 seconds ago");
        assert_eq!(format_relative(now - Duration::seconds(1), now), "1 second ago");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_relative(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(format_relative(now - Duration::days(3), now), "3 days ago");
        assert_eq!(format_relative(now - Duration::days(65), now), "2 months ago");
        assert_eq!(format_relative(now - Duration::days(800), now), "2 years ago");
        assert_eq!(format_relative(now + Duration::hours(2), now), "in 2 hours");
    }

    #[test]
    fn test_parses_style_codes() {
        assert_eq!("D".parse::<TimestampStyle>(), Ok(TimestampStyle::LongDate));
        assert_eq!("R".parse::<TimestampStyle>(), Ok(TimestampStyle::Relative));
        assert!("x".parse::<TimestampStyle>().is_err());
        assert!("DD".parse::<TimestampStyle>().is_err());
        assert_eq!(TimestampStyle::default(), TimestampStyle::ShortDateTime);
    }

    #[test]
    fn test_rejects_unrepresentable_instants() {
        assert!(instant_from_unix_seconds(i64::MAX).is_none());
    }
}
