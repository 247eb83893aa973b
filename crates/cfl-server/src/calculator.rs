//! Household carbon footprint estimate from bills, mileage, and flights.

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const ELECTRIC_FACTOR: f64 = 105.0;
pub const GAS_FACTOR: f64 = 105.0;
pub const OIL_FACTOR: f64 = 113.0;
pub const MILEAGE_FACTOR: f64 = 0.79;
pub const SHORT_FLIGHT_FACTOR: f64 = 1100.0;
pub const LONG_FLIGHT_FACTOR: f64 = 4400.0;

/// Validated calculator inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FootprintInputs {
    pub electric_bill: i64,
    pub gas_bill: i64,
    pub oil_bill: i64,
    pub car_mileage: i64,
    pub short_flights: i64,
    pub long_flights: i64,
}

impl FootprintInputs {
    pub fn total(&self) -> f64 {
        self.electric_bill as f64 * ELECTRIC_FACTOR
            + self.gas_bill as f64 * GAS_FACTOR
            + self.oil_bill as f64 * OIL_FACTOR
            + self.car_mileage as f64 * MILEAGE_FACTOR
            + self.short_flights as f64 * SHORT_FLIGHT_FACTOR
            + self.long_flights as f64 * LONG_FLIGHT_FACTOR
    }
}

/// Raw calculator form, one text field per input.
#[derive(Clone, Debug, Deserialize)]
pub struct CalculatorForm {
    pub electric_bill: String,
    pub gas_bill: String,
    pub oil_bill: String,
    pub car_mileage: String,
    pub short_flights: String,
    pub long_flights: String,
}

impl CalculatorForm {
    pub fn parse(&self) -> ServerResult<FootprintInputs> {
        Ok(FootprintInputs {
            electric_bill: parse_integer("electric_bill", &self.electric_bill)?,
            gas_bill: parse_integer("gas_bill", &self.gas_bill)?,
            oil_bill: parse_integer("oil_bill", &self.oil_bill)?,
            car_mileage: parse_integer("car_mileage", &self.car_mileage)?,
            short_flights: parse_integer("short_flights", &self.short_flights)?,
            long_flights: parse_integer("long_flights", &self.long_flights)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FootprintEstimate {
    pub inputs: FootprintInputs,
    pub total: f64,
}

impl From<FootprintInputs> for FootprintEstimate {
    fn from(inputs: FootprintInputs) -> Self {
        Self {
            total: inputs.total(),
            inputs,
        }
    }
}

/// Parse user-supplied text as an integer, surrounding whitespace allowed.
pub fn parse_integer(field: &str, text: &str) -> ServerResult<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|e| ServerError::InvalidInput(format!("{field}: {text:?} is not an integer ({e})")))
}
