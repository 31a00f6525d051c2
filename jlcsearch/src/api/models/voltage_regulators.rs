//! API request/response models for voltage regulators.

use crate::db::handlers::voltage_regulators::VoltageRegulatorFilter;
use crate::db::models::voltage_regulators::{OutputType, VoltageRegulatorRecord};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing voltage regulators.
///
/// Empty values (as submitted by the HTML form for "any") are treated as absent.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct ListVoltageRegulatorsQuery {
    /// Exact package name, e.g. `SOT-23`
    #[serde_as(as = "NoneAsEmptyString")]
    pub package: Option<String>,

    /// `fixed` or `adjustable`; empty means no filter
    #[serde_as(as = "NoneAsEmptyString")]
    pub output_type: Option<OutputType>,

    /// Only low-dropout (`true`) or only non-LDO (`false`) regulators
    #[serde_as(as = "NoneAsEmptyString")]
    pub is_ldo: Option<bool>,

    /// Desired output voltage in volts
    #[serde_as(as = "NoneAsEmptyString")]
    pub output_voltage: Option<f64>,
}

impl ListVoltageRegulatorsQuery {
    /// Validate the parameters and turn them into a repository filter.
    pub fn to_filter(&self) -> Result<VoltageRegulatorFilter> {
        if let Some(voltage) = self.output_voltage.filter(|voltage| !voltage.is_finite()) {
            return Err(Error::BadRequest {
                message: format!("output_voltage must be a finite number, got {voltage}"),
            });
        }

        Ok(VoltageRegulatorFilter {
            package: self.package.clone(),
            output_type: self.output_type,
            is_ldo: self.is_ldo,
            output_voltage: self.output_voltage,
        })
    }
}

/// A voltage regulator as returned by the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VoltageRegulatorResponse {
    /// LCSC part number without the `C` prefix
    #[schema(example = 6186)]
    pub lcsc: i64,
    /// Manufacturer part number
    #[schema(example = "AMS1117-3.3")]
    pub mfr: String,
    #[schema(example = "SOT-223")]
    pub package: String,
    /// `fixed` or `adjustable`
    #[schema(example = "fixed")]
    pub output_type: String,
    pub is_low_dropout: bool,
    pub is_positive: bool,
    pub output_voltage_min: f64,
    pub output_voltage_max: f64,
    pub output_current_max: Option<f64>,
    pub dropout_voltage: Option<f64>,
    pub input_voltage_min: Option<f64>,
    pub input_voltage_max: Option<f64>,
    pub quiescent_current: Option<f64>,
    pub stock: i64,
    /// Unit price at the lowest quantity break, in USD
    pub price1: f64,
}

impl From<VoltageRegulatorRecord> for VoltageRegulatorResponse {
    fn from(record: VoltageRegulatorRecord) -> Self {
        Self {
            is_low_dropout: record.is_low_dropout(),
            is_positive: record.is_positive(),
            lcsc: record.lcsc,
            mfr: record.mfr,
            package: record.package,
            output_type: record.output_type,
            output_voltage_min: record.output_voltage_min,
            output_voltage_max: record.output_voltage_max,
            output_current_max: record.output_current_max,
            dropout_voltage: record.dropout_voltage,
            input_voltage_min: record.input_voltage_min,
            input_voltage_max: record.input_voltage_max,
            quiescent_current: record.quiescent_current,
            stock: record.stock,
            price1: record.price1,
        }
    }
}

/// Response body of the JSON listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListVoltageRegulatorsResponse {
    pub regulators: Vec<VoltageRegulatorResponse>,
}

/// A voltage regulator shaped for the HTML table: every cell is display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoltageRegulatorRow {
    pub lcsc: String,
    pub mfr: String,
    pub package: String,
    pub output_voltage: String,
    pub output_current: String,
    pub dropout_voltage: String,
    pub input_voltage: String,
    pub quiescent_current: String,
    pub regulator_type: String,
    pub stock: String,
    pub price: String,
}

impl From<&VoltageRegulatorResponse> for VoltageRegulatorRow {
    fn from(regulator: &VoltageRegulatorResponse) -> Self {
        Self {
            lcsc: format!("C{}", regulator.lcsc),
            mfr: regulator.mfr.clone(),
            package: regulator.package.clone(),
            output_voltage: format_voltage_range(regulator.output_voltage_min, regulator.output_voltage_max),
            output_current: format_quantity(regulator.output_current_max, "A"),
            dropout_voltage: format_quantity(regulator.dropout_voltage, "v"),
            input_voltage: match (regulator.input_voltage_min, regulator.input_voltage_max) {
                (Some(min), Some(max)) => format_voltage_range(min, max),
                (Some(voltage), None) | (None, Some(voltage)) => format!("{voltage}v"),
                (None, None) => String::new(),
            },
            quiescent_current: format_quantity(regulator.quiescent_current, "A"),
            regulator_type: regulator_type_label(&regulator.output_type, regulator.is_low_dropout, regulator.is_positive),
            stock: regulator.stock.to_string(),
            price: format!("${:.4}", regulator.price1),
        }
    }
}

/// `"Xv"` when both bounds are equal, `"Xv - Yv"` otherwise.
pub fn format_voltage_range(min: f64, max: f64) -> String {
    if min == max {
        format!("{min}v")
    } else {
        format!("{min}v - {max}v")
    }
}

fn format_quantity(value: Option<f64>, unit: &str) -> String {
    value.map(|value| format!("{value}{unit}")).unwrap_or_default()
}

/// Composite label: output type, an `LDO` tag for low-dropout parts, then polarity.
pub fn regulator_type_label(output_type: &str, is_low_dropout: bool, is_positive: bool) -> String {
    let output_label = output_type
        .parse::<OutputType>()
        .map(|output_type| output_type.label())
        .unwrap_or(output_type);

    let mut parts = vec![output_label];
    if is_low_dropout {
        parts.push("LDO");
    }
    parts.push(if is_positive { "Positive" } else { "Negative" });

    parts.join(" ")
}
