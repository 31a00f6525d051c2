//! Database models for the `voltage_regulator` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Regulation mode of a voltage regulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Fixed,
    Adjustable,
}

impl OutputType {
    pub const ALL: [OutputType; 2] = [OutputType::Fixed, OutputType::Adjustable];

    /// The value stored in the `output_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Fixed => "fixed",
            OutputType::Adjustable => "adjustable",
        }
    }

    /// Human readable label used in the composite type column
    pub fn label(&self) -> &'static str {
        match self {
            OutputType::Fixed => "Fixed",
            OutputType::Adjustable => "Adjustable",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(OutputType::Fixed),
            "adjustable" => Ok(OutputType::Adjustable),
            other => Err(format!("unknown output_type '{other}', expected 'fixed' or 'adjustable'")),
        }
    }
}

/// A row of the `voltage_regulator` table, exactly as stored.
///
/// Booleans are kept in their 0/1 integer representation here; conversion happens when the row
/// is shaped for a response.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct VoltageRegulatorRecord {
    pub lcsc: i64,
    pub mfr: String,
    pub package: String,
    pub output_type: String,
    pub is_low_dropout: i64,
    pub is_positive: i64,
    pub output_voltage_min: f64,
    pub output_voltage_max: f64,
    pub output_current_max: Option<f64>,
    pub dropout_voltage: Option<f64>,
    pub input_voltage_min: Option<f64>,
    pub input_voltage_max: Option<f64>,
    pub quiescent_current: Option<f64>,
    pub stock: i64,
    pub price1: f64,
}

impl VoltageRegulatorRecord {
    pub fn is_low_dropout(&self) -> bool {
        self.is_low_dropout != 0
    }

    pub fn is_positive(&self) -> bool {
        self.is_positive != 0
    }

    /// `None` if the stored value is outside the known set
    pub fn output_type(&self) -> Option<OutputType> {
        self.output_type.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_type_parse_and_display() {
        for output_type in OutputType::ALL {
            assert_eq!(output_type.to_string().parse::<OutputType>(), Ok(output_type));
        }
        assert!("switching".parse::<OutputType>().is_err());
        assert!("Fixed".parse::<OutputType>().is_err());
    }

    #[test]
    fn test_output_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(OutputType::Adjustable).unwrap(), serde_json::json!("adjustable"));
    }
}
