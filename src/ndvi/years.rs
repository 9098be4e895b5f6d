//! Year allow-lists and the pair of years being compared.

use serde::Serialize;

/// Years offered for the baseline composite.
pub const BASE_YEARS: [i32; 6] = [2015, 2016, 2017, 2018, 2019, 2020];

/// Years offered for the current composite.
pub const CURRENT_YEARS: [i32; 3] = [2021, 2022, 2023];

/// Default baseline year.
pub const DEFAULT_BASE_YEAR: i32 = 2015;

/// Default current year.
pub const DEFAULT_CURRENT_YEAR: i32 = 2023;

/// A validated pair of years. `year1` is not required to precede `year2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSelection {
    /// Baseline year, one of [`BASE_YEARS`].
    pub year1: i32,
    /// Current year, one of [`CURRENT_YEARS`].
    pub year2: i32,
}

impl YearSelection {
    /// Validates each year against its own allow-list.
    ///
    /// # Errors
    ///
    /// Returns an error string naming the offending year and the allowed values.
    pub fn new(year1: i32, year2: i32) -> Result<Self, String> {
        check_allowed("base", year1, &BASE_YEARS)?;
        check_allowed("current", year2, &CURRENT_YEARS)?;
        Ok(Self { year1, year2 })
    }
}

impl Default for YearSelection {
    fn default() -> Self {
        Self {
            year1: DEFAULT_BASE_YEAR,
            year2: DEFAULT_CURRENT_YEAR,
        }
    }
}

fn check_allowed(role: &str, year: i32, allowed: &[i32]) -> Result<(), String> {
    if allowed.contains(&year) {
        return Ok(());
    }
    let listed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
    Err(format!(
        "{year} is not a valid {role} year (expected one of {})",
        listed.join(", ")
    ))
}

/// Parses a CLI value into a baseline year.
///
/// # Errors
///
/// Returns an error string if the value is not an integer in [`BASE_YEARS`].
pub fn parse_base_year(value: &str) -> Result<i32, String> {
    parse_year("base", value, &BASE_YEARS)
}

/// Parses a CLI value into a current year.
///
/// # Errors
///
/// Returns an error string if the value is not an integer in [`CURRENT_YEARS`].
pub fn parse_current_year(value: &str) -> Result<i32, String> {
    parse_year("current", value, &CURRENT_YEARS)
}

fn parse_year(role: &str, value: &str, allowed: &[i32]) -> Result<i32, String> {
    let year: i32 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a year"))?;
    check_allowed(role, year, allowed)?;
    Ok(year)
}
