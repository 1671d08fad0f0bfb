//! Spreadsheet date serial detection and display formatting.
//!
//! Spreadsheets store dates as a day count from a fixed epoch. A decoded
//! sheet hands those through as plain numbers, so a birth date column reads
//! as `32999` instead of a calendar date.
//!
//! # Serial range
//!
//! A serial is plausible when `0 < serial < 2958466`, the span covering years
//! 1900 through 9999. Values whose fractional part is exactly `0.999` are
//! rejected as a known near-integer artifact.
//!
//! # Epochs
//!
//! [`DateEpoch::Naive1900`] counts serial `1` as 1900-01-01 and adds
//! `serial - 1` whole days. Spreadsheet applications treat 1900 as a leap
//! year, so for serials from 61 onward the naive count lands one day after
//! what the application displays; [`DateEpoch::Excel1900`] compensates.

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::debug;

use recode_model::{CellValue, format_number};

/// Exclusive upper bound of the plausible serial range.
pub const MAX_DATE_SERIAL_EXCLUSIVE: f64 = 2_958_466.0;

/// Fractional part excluded from serial detection.
pub const ARTIFACT_FRACTION: f64 = 0.999;

/// Day-count base used to turn a serial into a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateEpoch {
    /// Serial 1 is 1900-01-01; serial `n` is 1900-01-01 plus `n - 1` days.
    #[default]
    Naive1900,
    /// Spreadsheet 1900 system including the fictitious 1900-02-29 (serial 60).
    Excel1900,
    /// Spreadsheet 1904 system: serial 0 is 1904-01-01.
    Excel1904,
}

impl DateEpoch {
    /// Calendar date of a serial, ignoring any time-of-day fraction.
    ///
    /// Returns `None` when the date does not exist in this epoch or falls
    /// outside the supported calendar range.
    pub fn serial_to_date(self, serial: f64) -> Option<NaiveDate> {
        let whole = serial.floor();
        if !whole.is_finite() || whole.abs() > i32::MAX as f64 {
            return None;
        }
        let days = whole as i64;
        let (base, offset) = match self {
            Self::Naive1900 => (NaiveDate::from_ymd_opt(1900, 1, 1)?, days - 1),
            Self::Excel1900 => match days {
                60 => return None,
                d if d < 60 => (NaiveDate::from_ymd_opt(1900, 1, 1)?, d - 1),
                d => (NaiveDate::from_ymd_opt(1900, 1, 1)?, d - 2),
            },
            Self::Excel1904 => (NaiveDate::from_ymd_opt(1904, 1, 1)?, days),
        };
        base.checked_add_signed(TimeDelta::try_days(offset)?)
    }
}

/// True if the cell is a number that plausibly encodes a date.
///
/// Text and empty cells are never serials, even when the text looks numeric.
pub fn is_date_serial(value: &CellValue) -> bool {
    match value {
        CellValue::Number(number) => is_date_serial_number(*number),
        _ => false,
    }
}

/// Range and artifact check on a raw number.
pub fn is_date_serial_number(value: f64) -> bool {
    value > 0.0 && value < MAX_DATE_SERIAL_EXCLUSIVE && value % 1.0 != ARTIFACT_FRACTION
}

/// Formats a serial as `dd/mm/yyyy` using the naive 1900 epoch.
pub fn to_display_date(serial: f64) -> String {
    format_serial_date(serial, DateEpoch::Naive1900)
}

/// Formats a serial as `dd/mm/yyyy` in the given epoch.
///
/// Conversion failures do not propagate: the serial's own string form is
/// returned instead.
pub fn format_serial_date(serial: f64, epoch: DateEpoch) -> String {
    match epoch.serial_to_date(serial) {
        Some(date) => format!("{:02}/{:02}/{}", date.day(), date.month(), date.year()),
        None => {
            debug!(serial, ?epoch, "date serial has no calendar date; keeping raw value");
            format_number(serial)
        }
    }
}
