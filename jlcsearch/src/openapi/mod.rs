//! OpenAPI documentation, served as JSON at `/api-docs/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::api::models::voltage_regulators::{ListVoltageRegulatorsResponse, VoltageRegulatorResponse};
use crate::db::models::voltage_regulators::OutputType;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "jlcsearch",
        description = "Search the JLCPCB parts catalog. Listing endpoints return JSON for API clients and an HTML search page for browsers."
    ),
    paths(crate::api::handlers::voltage_regulators::list_voltage_regulators),
    components(schemas(ListVoltageRegulatorsResponse, VoltageRegulatorResponse, OutputType)),
    tags(
        (name = "voltage_regulators", description = "Linear voltage regulators, including LDOs")
    )
)]
pub struct ApiDoc;
