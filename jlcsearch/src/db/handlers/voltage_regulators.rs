//! Database repository for voltage regulators.
//!
//! Filters are turned into a [`RegulatorQuery`]: an immutable value holding the predicates that
//! apply, combined with AND, plus the fixed ordering and row cap. Each predicate knows how to
//! render itself as SQL and how to test a record in memory.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::voltage_regulators::{OutputType, VoltageRegulatorRecord},
};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::instrument;

/// Maximum number of rows a listing returns.
pub const MAX_ROWS: i64 = 100;

/// Filter for listing voltage regulators. Every field is optional; `None` leaves that dimension
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoltageRegulatorFilter {
    pub package: Option<String>,
    pub output_type: Option<OutputType>,
    pub is_ldo: Option<bool>,
    pub output_voltage: Option<f64>,
}

impl VoltageRegulatorFilter {
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = Some(output_type);
        self
    }

    pub fn with_is_ldo(mut self, is_ldo: bool) -> Self {
        self.is_ldo = Some(is_ldo);
        self
    }

    pub fn with_output_voltage(mut self, voltage: f64) -> Self {
        self.output_voltage = Some(voltage);
        self
    }
}

/// A single narrowing condition on the `voltage_regulator` table.
#[derive(Debug, Clone, PartialEq)]
pub enum RegulatorPredicate {
    PackageEquals(String),
    OutputTypeEquals(OutputType),
    LowDropoutEquals(bool),
    /// Matches when the voltage is at or above the record's minimum, or at or below its maximum.
    ///
    /// This is an OR of the two bounds, not a range containment check. For rows where
    /// `output_voltage_min <= output_voltage_max` it therefore matches every voltage.
    OutputVoltageReachable(f64),
}

impl RegulatorPredicate {
    /// Append this predicate as an `AND (...)` clause with bound parameters.
    fn push_sql(&self, query: &mut QueryBuilder<'static, Sqlite>) {
        match self {
            RegulatorPredicate::PackageEquals(package) => {
                query.push(" AND package = ");
                query.push_bind(package.clone());
            }
            RegulatorPredicate::OutputTypeEquals(output_type) => {
                query.push(" AND output_type = ");
                query.push_bind(output_type.as_str());
            }
            RegulatorPredicate::LowDropoutEquals(is_ldo) => {
                query.push(" AND is_low_dropout = ");
                query.push_bind(i64::from(*is_ldo));
            }
            RegulatorPredicate::OutputVoltageReachable(voltage) => {
                query.push(" AND (output_voltage_min <= ");
                query.push_bind(*voltage);
                query.push(" OR output_voltage_max >= ");
                query.push_bind(*voltage);
                query.push(")");
            }
        }
    }

    /// Evaluate the predicate against a record, with the same semantics as the SQL clause.
    pub fn matches(&self, record: &VoltageRegulatorRecord) -> bool {
        match self {
            RegulatorPredicate::PackageEquals(package) => record.package == *package,
            RegulatorPredicate::OutputTypeEquals(output_type) => record.output_type == output_type.as_str(),
            RegulatorPredicate::LowDropoutEquals(is_ldo) => record.is_low_dropout() == *is_ldo,
            RegulatorPredicate::OutputVoltageReachable(voltage) => {
                *voltage >= record.output_voltage_min || *voltage <= record.output_voltage_max
            }
        }
    }
}

type PredicateBuilder = fn(&VoltageRegulatorFilter) -> Option<RegulatorPredicate>;

fn package_predicate(filter: &VoltageRegulatorFilter) -> Option<RegulatorPredicate> {
    filter.package.clone().map(RegulatorPredicate::PackageEquals)
}

fn output_type_predicate(filter: &VoltageRegulatorFilter) -> Option<RegulatorPredicate> {
    filter.output_type.map(RegulatorPredicate::OutputTypeEquals)
}

fn low_dropout_predicate(filter: &VoltageRegulatorFilter) -> Option<RegulatorPredicate> {
    filter.is_ldo.map(RegulatorPredicate::LowDropoutEquals)
}

fn output_voltage_predicate(filter: &VoltageRegulatorFilter) -> Option<RegulatorPredicate> {
    filter.output_voltage.map(RegulatorPredicate::OutputVoltageReachable)
}

/// Applied in order; the order only affects the generated SQL text, not the result.
const PREDICATE_BUILDERS: [PredicateBuilder; 4] = [
    package_predicate,
    output_type_predicate,
    low_dropout_predicate,
    output_voltage_predicate,
];

/// Immutable description of a listing query: predicates joined by AND, ordered by stock
/// descending, capped at `limit` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RegulatorQuery {
    predicates: Vec<RegulatorPredicate>,
    limit: i64,
}

impl Default for RegulatorQuery {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
            limit: MAX_ROWS,
        }
    }
}

impl RegulatorQuery {
    /// Build the query for a filter by running every predicate builder over it.
    pub fn from_filter(filter: &VoltageRegulatorFilter) -> Self {
        PREDICATE_BUILDERS
            .iter()
            .filter_map(|build| build(filter))
            .fold(Self::default(), |query, predicate| query.with(predicate))
    }

    /// Return a new query additionally constrained by `predicate`.
    pub fn with(&self, predicate: RegulatorPredicate) -> Self {
        let mut predicates = self.predicates.clone();
        predicates.push(predicate);
        Self {
            predicates,
            limit: self.limit,
        }
    }

    pub fn predicates(&self) -> &[RegulatorPredicate] {
        &self.predicates
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// True when the record satisfies every predicate.
    pub fn matches(&self, record: &VoltageRegulatorRecord) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(record))
    }

    pub fn to_query_builder(&self) -> QueryBuilder<'static, Sqlite> {
        let mut query = QueryBuilder::new("SELECT * FROM voltage_regulator WHERE 1=1");

        for predicate in &self.predicates {
            predicate.push_sql(&mut query);
        }

        query.push(" ORDER BY stock DESC LIMIT ");
        query.push_bind(self.limit);

        query
    }
}

pub struct VoltageRegulators<'c> {
    db: &'c mut SqliteConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for VoltageRegulators<'c> {
    type Response = VoltageRegulatorRecord;
    type Filter = VoltageRegulatorFilter;

    #[instrument(skip(self, filter), fields(
        package = ?filter.package,
        output_type = ?filter.output_type,
        is_ldo = ?filter.is_ldo,
        output_voltage = ?filter.output_voltage
    ), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let regulator_query = RegulatorQuery::from_filter(filter);
        let mut query = regulator_query.to_query_builder();

        tracing::debug!("Executing SQL: {}", query.sql());

        let regulators = query
            .build_query_as::<VoltageRegulatorRecord>()
            .fetch_all(&mut *self.db)
            .await?;

        tracing::debug!("Retrieved {} voltage regulators", regulators.len());

        Ok(regulators)
    }
}

impl<'c> VoltageRegulators<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Every distinct package in the table, ascending. Not affected by any filter.
    #[instrument(skip(self), err)]
    pub async fn list_packages(&mut self) -> Result<Vec<String>> {
        let packages = sqlx::query_scalar::<_, String>("SELECT DISTINCT package FROM voltage_regulator ORDER BY package ASC")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(packages)
    }
}
