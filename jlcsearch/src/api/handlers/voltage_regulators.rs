use crate::AppState;
use crate::api::models::format::ResponseFormat;
use crate::api::models::voltage_regulators::{ListVoltageRegulatorsQuery, ListVoltageRegulatorsResponse, VoltageRegulatorResponse};
use crate::db::handlers::{Repository, VoltageRegulators};
use crate::errors::{Error, Result};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{Html, IntoResponse, Response},
};

#[utoipa::path(
    get,
    path = "/voltage_regulators/list",
    tag = "voltage_regulators",
    summary = "Search voltage regulators",
    description = "Returns up to 100 regulators ordered by stock, highest first. \
                   Responds with JSON when the path ends in `.json` or the client accepts \
                   `application/json`, and with an HTML search page otherwise.",
    params(ListVoltageRegulatorsQuery),
    responses(
        (status = 200, description = "Matching voltage regulators", body = ListVoltageRegulatorsResponse),
        (status = 400, description = "Malformed query parameter"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all, fields(format = ?format))]
pub async fn list_voltage_regulators(
    State(state): State<AppState>,
    format: ResponseFormat,
    query: std::result::Result<Query<ListVoltageRegulatorsQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query?;
    let filter = query.to_filter()?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let (records, packages) = {
        let mut repo = VoltageRegulators::new(&mut conn);
        let records = repo.list(&filter).await?;
        let packages = repo.list_packages().await?;
        (records, packages)
    };

    let regulators: Vec<VoltageRegulatorResponse> = records.into_iter().map(VoltageRegulatorResponse::from).collect();

    match format {
        ResponseFormat::Json => Ok(Json(ListVoltageRegulatorsResponse { regulators }).into_response()),
        ResponseFormat::Html => {
            let page = state.views.render_voltage_regulators(&query, &packages, &regulators)?;
            Ok(Html(page).into_response())
        }
    }
}
