//! Policy period and region models.
//!
//! This module contains the [`PolicyPeriod`] and [`Region`] selectors that index
//! the policy table. Both are chosen explicitly by the caller; nothing here
//! consults the system clock.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn calendar_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("policy period dates are valid calendar dates")
}

/// A policy period with its own deductions, minimum-wage table and bracket table.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PolicyPeriod;
/// use chrono::NaiveDate;
///
/// let period = PolicyPeriod::P2FirstHalf2026;
/// assert_eq!(period.code(), "P2_2026_H1");
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyPeriod {
    /// 01/07/2025 to 31/12/2025.
    #[serde(rename = "P1_2025_H2")]
    P1SecondHalf2025,
    /// 01/01/2026 to 30/06/2026.
    #[serde(rename = "P2_2026_H1")]
    P2FirstHalf2026,
    /// From 01/07/2026 onward.
    #[serde(rename = "P3_2026_H2_ONWARD")]
    P3FromSecondHalf2026,
}

impl PolicyPeriod {
    /// Every period, in chronological order.
    pub const ALL: [PolicyPeriod; 3] = [
        PolicyPeriod::P1SecondHalf2025,
        PolicyPeriod::P2FirstHalf2026,
        PolicyPeriod::P3FromSecondHalf2026,
    ];

    /// Position of the period in [`PolicyPeriod::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            PolicyPeriod::P1SecondHalf2025 => 0,
            PolicyPeriod::P2FirstHalf2026 => 1,
            PolicyPeriod::P3FromSecondHalf2026 => 2,
        }
    }

    /// The wire code of the period (e.g. `"P1_2025_H2"`).
    pub fn code(self) -> &'static str {
        match self {
            PolicyPeriod::P1SecondHalf2025 => "P1_2025_H2",
            PolicyPeriod::P2FirstHalf2026 => "P2_2026_H1",
            PolicyPeriod::P3FromSecondHalf2026 => "P3_2026_H2_ONWARD",
        }
    }

    /// Human-readable label shown next to a calculation.
    pub fn label(self) -> &'static str {
        match self {
            PolicyPeriod::P1SecondHalf2025 => "P1: 01/07/2025 – 31/12/2025",
            PolicyPeriod::P2FirstHalf2026 => "P2: 01/01/2026 – 30/06/2026",
            PolicyPeriod::P3FromSecondHalf2026 => "P3: Từ 01/07/2026 trở đi",
        }
    }

    /// First day (inclusive) on which the period applies.
    pub fn starts_on(self) -> NaiveDate {
        match self {
            PolicyPeriod::P1SecondHalf2025 => calendar_date(2025, 7, 1),
            PolicyPeriod::P2FirstHalf2026 => calendar_date(2026, 1, 1),
            PolicyPeriod::P3FromSecondHalf2026 => calendar_date(2026, 7, 1),
        }
    }

    /// Last day (inclusive) on which the period applies, `None` if open-ended.
    pub fn ends_on(self) -> Option<NaiveDate> {
        match self {
            PolicyPeriod::P1SecondHalf2025 => Some(calendar_date(2025, 12, 31)),
            PolicyPeriod::P2FirstHalf2026 => Some(calendar_date(2026, 6, 30)),
            PolicyPeriod::P3FromSecondHalf2026 => None,
        }
    }

    /// Checks if a date falls within this period (inclusive).
    pub fn contains_date(self, date: NaiveDate) -> bool {
        date >= self.starts_on() && self.ends_on().is_none_or(|end| date <= end)
    }

    /// Resolves the period in force on a caller-supplied date.
    ///
    /// Returns `None` for dates before the first period.
    pub fn containing(date: NaiveDate) -> Option<PolicyPeriod> {
        Self::ALL.into_iter().find(|period| period.contains_date(date))
    }
}

impl fmt::Display for PolicyPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Administrative region determining the regional minimum wage.
///
/// The region only affects the unemployment-insurance contribution cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// Vùng I.
    I,
    /// Vùng II.
    II,
    /// Vùng III.
    III,
    /// Vùng IV.
    IV,
}

impl Region {
    /// Every region, in order.
    pub const ALL: [Region; 4] = [Region::I, Region::II, Region::III, Region::IV];

    pub(crate) fn index(self) -> usize {
        match self {
            Region::I => 0,
            Region::II => 1,
            Region::III => 2,
            Region::IV => 3,
        }
    }

    /// The wire code of the region (`"I"` to `"IV"`).
    pub fn code(self) -> &'static str {
        match self {
            Region::I => "I",
            Region::II => "II",
            Region::III => "III",
            Region::IV => "IV",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
