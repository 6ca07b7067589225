//! Locale-aware date labels for note cards.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// Label used when a timestamp is outside the representable range.
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// Field order and clock style of a date+time label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `11/14/2023, 10:13:20 PM`
    MonthDayYear12h,
    /// `14/11/2023, 22:13:20`
    DayMonthYear24h,
    /// `14.11.2023, 22:13:20`
    DayMonthYearDotted24h,
    /// `2023/11/14 22:13:20`
    YearMonthDay24h,
    /// `2023-11-14 22:13:20`
    Iso24h,
}

impl DateStyle {
    /// Picks a style from a BCP 47 / POSIX locale tag (`en-US`, `de_DE.UTF-8`).
    ///
    /// Unknown tags fall back to `MonthDayYear12h`.
    pub fn for_locale(tag: &str) -> Self {
        let normalized = tag
            .split('.')
            .next()
            .unwrap_or_default()
            .replace('_', "-")
            .to_ascii_lowercase();
        let mut parts = normalized.split('-');
        let language = parts.next().unwrap_or_default();
        let region = parts.next().unwrap_or_default();

        match language {
            "en" => match region {
                "gb" | "au" | "nz" | "ie" | "in" | "za" => Self::DayMonthYear24h,
                _ => Self::MonthDayYear12h,
            },
            "fr" | "es" | "it" | "pt" | "el" | "nl" | "vi" => Self::DayMonthYear24h,
            "de" | "ru" | "pl" | "fi" | "nb" | "no" | "da" | "cs" | "tr" | "uk" => {
                Self::DayMonthYearDotted24h
            }
            "ja" | "zh" | "ko" => Self::YearMonthDay24h,
            "sv" | "lt" => Self::Iso24h,
            _ => Self::MonthDayYear12h,
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::MonthDayYear12h => "%-m/%-d/%Y, %-I:%M:%S %p",
            Self::DayMonthYear24h => "%d/%m/%Y, %H:%M:%S",
            Self::DayMonthYearDotted24h => "%d.%m.%Y, %H:%M:%S",
            Self::YearMonthDay24h => "%Y/%m/%d %H:%M:%S",
            Self::Iso24h => "%Y-%m-%d %H:%M:%S",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Local,
    Fixed(FixedOffset),
}

/// Formats epoch-millisecond timestamps as human-readable labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    style: DateStyle,
    zone: Zone,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::local(DateStyle::MonthDayYear12h)
    }
}

impl DateFormat {
    /// Formats in the process-local time zone.
    pub fn local(style: DateStyle) -> Self {
        Self {
            style,
            zone: Zone::Local,
        }
    }

    /// Formats at a fixed UTC offset; `None` when the offset is out of range.
    pub fn with_offset_minutes(style: DateStyle, offset_minutes: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset_minutes.checked_mul(60)?)?;
        Some(Self {
            style,
            zone: Zone::Fixed(offset),
        })
    }

    /// Formats in UTC.
    pub fn utc(style: DateStyle) -> Self {
        Self {
            style,
            zone: Zone::Fixed(Utc.fix()),
        }
    }

    pub fn style(&self) -> DateStyle {
        self.style
    }

    /// Renders `epoch_ms` as a date+time label.
    pub fn format(&self, epoch_ms: i64) -> String {
        let Some(instant) = DateTime::<Utc>::from_timestamp_millis(epoch_ms) else {
            return INVALID_DATE_LABEL.to_string();
        };
        let pattern = self.style.pattern();
        match self.zone {
            Zone::Local => instant.with_timezone(&Local).format(pattern).to_string(),
            Zone::Fixed(offset) => instant.with_timezone(&offset).format(pattern).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DateFormat, DateStyle, INVALID_DATE_LABEL};

    const NOV_14_2023_221320_UTC: i64 = 1_700_000_000_000;

    #[test]
    fn formats_us_style_in_utc() {
        let format = DateFormat::utc(DateStyle::MonthDayYear12h);
        assert_eq!(format.format(NOV_14_2023_221320_UTC), "11/14/2023, 10:13:20 PM");
    }

    #[test]
    fn formats_with_fixed_offset() {
        let format = DateFormat::with_offset_minutes(DateStyle::DayMonthYearDotted24h, 60).unwrap();
        assert_eq!(format.format(NOV_14_2023_221320_UTC), "14.11.2023, 23:13:20");

        let tokyo = DateFormat::with_offset_minutes(DateStyle::YearMonthDay24h, 9 * 60).unwrap();
        assert_eq!(tokyo.format(NOV_14_2023_221320_UTC), "2023/11/15 07:13:20");
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        assert!(DateFormat::with_offset_minutes(DateStyle::Iso24h, 24 * 60).is_none());
    }

    #[test]
    fn locale_tags_map_to_styles() {
        assert_eq!(DateStyle::for_locale("en-US"), DateStyle::MonthDayYear12h);
        assert_eq!(DateStyle::for_locale("en_GB.UTF-8"), DateStyle::DayMonthYear24h);
        assert_eq!(DateStyle::for_locale("de-DE"), DateStyle::DayMonthYearDotted24h);
        assert_eq!(DateStyle::for_locale("ja"), DateStyle::YearMonthDay24h);
        assert_eq!(DateStyle::for_locale("sv-SE"), DateStyle::Iso24h);
        assert_eq!(DateStyle::for_locale("C"), DateStyle::MonthDayYear12h);
    }

    #[test]
    fn out_of_range_timestamp_is_labelled_invalid() {
        let format = DateFormat::utc(DateStyle::Iso24h);
        assert_eq!(format.format(i64::MAX), INVALID_DATE_LABEL);
    }
}
