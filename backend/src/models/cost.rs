//! Cost rate table
//!
//! Every game session carries its own immutable [`CostRates`] value,
//! embedded at creation time. There is deliberately no process-wide
//! rate singleton: concurrent sessions with different rules must not
//! interfere.

use serde::{Deserialize, Serialize};

/// Per-round cost rates, in whole dollars per unit.
///
/// Defaults follow the standard scoring worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRates {
    /// Flat penalty per ambulance diverted away from the ER
    pub er_diversion_financial: i64,
    pub er_diversion_quality: i64,

    /// Per ER patient waiting for admission, per round
    pub er_waiting_financial: i64,
    pub er_waiting_quality: i64,

    /// Per extra staff member on duty, per round (all departments)
    pub extra_staff_financial: i64,
    pub extra_staff_quality: i64,

    /// Per waiting arrival in Surgery / Critical Care / Step Down
    pub arrivals_waiting_financial: i64,
    pub arrivals_waiting_quality: i64,

    /// Per pending transfer request (quality only; financial rate is zero)
    pub requests_waiting_financial: i64,
    pub requests_waiting_quality: i64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            er_diversion_financial: 5_000,
            er_diversion_quality: 200,
            er_waiting_financial: 150,
            er_waiting_quality: 20,
            extra_staff_financial: 40,
            extra_staff_quality: 5,
            arrivals_waiting_financial: 3_750,
            arrivals_waiting_quality: 20,
            requests_waiting_financial: 0,
            requests_waiting_quality: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates_match_worksheet() {
        let rates = CostRates::default();
        assert_eq!(rates.er_diversion_financial, 5_000);
        assert_eq!(rates.er_waiting_financial, 150);
        assert_eq!(rates.arrivals_waiting_financial, 3_750);
        assert_eq!(rates.requests_waiting_financial, 0);
        assert_eq!(rates.requests_waiting_quality, 20);
    }
}
