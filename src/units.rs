//! Physical unit tags and time conversions.
//!
//! Variables carry a display unit so logs and snapshots stay unambiguous.
//! There is no general unit-algebra engine here; the only numeric conversion
//! the collector needs is year-to-hours.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Hours in one Julian year (365.25 days).
pub const HOURS_PER_YEAR: f64 = 8766.0;

/// Display unit attached to a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Unit {
    /// Thermal megawatts
    #[strum(serialize = "MW")]
    Megawatt,
    /// Kilowatts
    #[strum(serialize = "kW")]
    Kilowatt,
    /// Kilowatt-hours
    #[strum(serialize = "kWh")]
    KilowattHour,
    /// Hours
    #[strum(serialize = "h")]
    Hour,
    /// Degrees Celsius
    #[strum(serialize = "C")]
    Celsius,
}

/// Convert a per-hour rate into an annual total.
pub fn annual_from_rate(rate_per_hour: f64) -> f64 {
    rate_per_hour * HOURS_PER_YEAR
}

/// Convert an annual total into a per-hour rate.
pub fn rate_from_annual(annual: f64) -> f64 {
    annual / HOURS_PER_YEAR
}
