//! Server-rendered HTML pages.
//!
//! Templates are compiled into the binary and loaded into a single [`minijinja::Environment`]
//! at startup. Auto-escaping is on for every `.html` template.

use minijinja::Environment;
use serde::Serialize;

use crate::api::models::voltage_regulators::{ListVoltageRegulatorsQuery, VoltageRegulatorResponse, VoltageRegulatorRow};
use crate::db::models::voltage_regulators::OutputType;

pub const VOLTAGE_REGULATORS_TITLE: &str = "JLCPCB Voltage Regulator Search";

const VOLTAGE_REGULATORS_TEMPLATE: &str = "voltage_regulators.html";

pub struct Views {
    env: Environment<'static>,
}

#[derive(Debug, Serialize)]
struct SelectOption {
    value: &'static str,
    label: &'static str,
}

/// Submitted filter values as the form should show them again.
#[derive(Debug, Default, Serialize)]
struct FormValues {
    package: String,
    output_type: String,
    is_ldo: String,
    output_voltage: String,
}

impl From<&ListVoltageRegulatorsQuery> for FormValues {
    fn from(query: &ListVoltageRegulatorsQuery) -> Self {
        Self {
            package: query.package.clone().unwrap_or_default(),
            output_type: query.output_type.map(|t| t.as_str().to_string()).unwrap_or_default(),
            is_ldo: query.is_ldo.map(|b| b.to_string()).unwrap_or_default(),
            output_voltage: query.output_voltage.map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct VoltageRegulatorsPage<'a> {
    title: &'static str,
    packages: &'a [String],
    output_types: Vec<SelectOption>,
    filters: FormValues,
    rows: Vec<VoltageRegulatorRow>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(VOLTAGE_REGULATORS_TEMPLATE, include_str!("../templates/voltage_regulators.html"))?;

        Ok(Self { env })
    }

    /// The filter form, with the submitted values selected, followed by the results table.
    pub fn render_voltage_regulators(
        &self,
        query: &ListVoltageRegulatorsQuery,
        packages: &[String],
        regulators: &[VoltageRegulatorResponse],
    ) -> Result<String, minijinja::Error> {
        let page = VoltageRegulatorsPage {
            title: VOLTAGE_REGULATORS_TITLE,
            packages,
            output_types: OutputType::ALL
                .iter()
                .map(|output_type| SelectOption {
                    value: output_type.as_str(),
                    label: output_type.label(),
                })
                .collect(),
            filters: FormValues::from(query),
            rows: regulators.iter().map(VoltageRegulatorRow::from).collect(),
        };

        self.env.get_template(VOLTAGE_REGULATORS_TEMPLATE)?.render(&page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::voltage_regulators::VoltageRegulatorRecord;
    use crate::test_utils::test_regulator;

    fn packages() -> Vec<String> {
        vec!["SOT-223".to_string(), "SOT-23".to_string(), "TO-220".to_string()]
    }

    #[test]
    fn test_renders_title_and_rows() {
        let views = Views::new().unwrap();
        let regulator = VoltageRegulatorResponse::from(VoltageRegulatorRecord {
            mfr: "AMS1117-3.3".to_string(),
            ..test_regulator(6186)
        });

        let html = views
            .render_voltage_regulators(&ListVoltageRegulatorsQuery::default(), &packages(), &[regulator])
            .unwrap();

        assert!(html.contains("<title>JLCPCB Voltage Regulator Search</title>"));
        assert!(html.contains("<td>C6186</td>"));
        assert!(html.contains("<td>AMS1117-3.3</td>"));
        assert!(html.contains(r#"<option value="TO-220">TO-220</option>"#));
        assert!(!html.contains("No voltage regulators match"));
    }

    #[test]
    fn test_form_retains_submitted_values() {
        let views = Views::new().unwrap();
        let query = ListVoltageRegulatorsQuery {
            package: Some("SOT-23".to_string()),
            output_type: Some(OutputType::Adjustable),
            is_ldo: Some(false),
            output_voltage: Some(3.3),
        };

        let html = views.render_voltage_regulators(&query, &packages(), &[]).unwrap();

        assert!(html.contains(r#"<option value="SOT-23" selected>SOT-23</option>"#));
        assert!(html.contains(r#"<option value="SOT-223">SOT-223</option>"#));
        assert!(html.contains(r#"<option value="adjustable" selected>Adjustable</option>"#));
        assert!(html.contains(r#"<option value="false" selected>No</option>"#));
        assert!(html.contains(r#"name="output_voltage" value="3.3""#));
        assert!(html.contains("No voltage regulators match"));
    }

    #[test]
    fn test_values_are_escaped() {
        let views = Views::new().unwrap();
        let regulator = VoltageRegulatorResponse::from(VoltageRegulatorRecord {
            mfr: "<script>alert(1)</script>".to_string(),
            ..test_regulator(1)
        });

        let html = views
            .render_voltage_regulators(&ListVoltageRegulatorsQuery::default(), &[], &[regulator])
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
