//! Test utilities: an in-memory catalog, fixture regulators and a test server.

use crate::db::models::voltage_regulators::VoltageRegulatorRecord;
use axum_test::TestServer;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

/// A fresh in-memory database with migrations applied.
///
/// Every SQLite in-memory connection is its own database, so the pool is pinned to a single
/// connection that is never reaped.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    crate::migrator().run(&pool).await.expect("Failed to run migrations");

    pool
}

pub fn create_test_config() -> crate::config::Config {
    crate::config::Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: crate::config::DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        },
        enable_metrics: false,
        ..Default::default()
    }
}

pub async fn create_test_app(pool: SqlitePool) -> TestServer {
    let app = crate::Application::new_with_pool(create_test_config(), pool)
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

/// A fixed, positive, non-LDO 3.3v regulator in SOT-23 with the given part number.
pub fn test_regulator(lcsc: i64) -> VoltageRegulatorRecord {
    VoltageRegulatorRecord {
        lcsc,
        mfr: format!("TEST-{lcsc}"),
        package: "SOT-23".to_string(),
        output_type: "fixed".to_string(),
        is_low_dropout: 0,
        is_positive: 1,
        output_voltage_min: 3.3,
        output_voltage_max: 3.3,
        output_current_max: Some(0.5),
        dropout_voltage: None,
        input_voltage_min: Some(4.5),
        input_voltage_max: Some(18.0),
        quiescent_current: None,
        stock: 100,
        price1: 0.05,
    }
}

pub async fn insert_regulator(pool: &SqlitePool, regulator: &VoltageRegulatorRecord) {
    sqlx::query(
        "INSERT INTO voltage_regulator (
            lcsc, mfr, package, output_type, is_low_dropout, is_positive,
            output_voltage_min, output_voltage_max, output_current_max, dropout_voltage,
            input_voltage_min, input_voltage_max, quiescent_current, stock, price1
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(regulator.lcsc)
    .bind(&regulator.mfr)
    .bind(&regulator.package)
    .bind(&regulator.output_type)
    .bind(regulator.is_low_dropout)
    .bind(regulator.is_positive)
    .bind(regulator.output_voltage_min)
    .bind(regulator.output_voltage_max)
    .bind(regulator.output_current_max)
    .bind(regulator.dropout_voltage)
    .bind(regulator.input_voltage_min)
    .bind(regulator.input_voltage_max)
    .bind(regulator.quiescent_current)
    .bind(regulator.stock)
    .bind(regulator.price1)
    .execute(pool)
    .await
    .expect("Failed to insert test regulator");
}

/// Insert a small catalog covering every filter dimension and return it.
pub async fn seed_regulators(pool: &SqlitePool) -> Vec<VoltageRegulatorRecord> {
    let regulators = vec![
        VoltageRegulatorRecord {
            mfr: "AMS1117-3.3".to_string(),
            package: "SOT-223".to_string(),
            is_low_dropout: 1,
            output_current_max: Some(1.0),
            dropout_voltage: Some(1.1),
            stock: 500_000,
            price1: 0.0125,
            ..test_regulator(6186)
        },
        VoltageRegulatorRecord {
            mfr: "XC6206P332MR".to_string(),
            is_low_dropout: 1,
            output_current_max: Some(0.2),
            dropout_voltage: Some(0.25),
            quiescent_current: Some(0.000001),
            stock: 300_000,
            ..test_regulator(5446)
        },
        VoltageRegulatorRecord {
            mfr: "LM317T".to_string(),
            package: "TO-220".to_string(),
            output_type: "adjustable".to_string(),
            output_voltage_min: 1.25,
            output_voltage_max: 37.0,
            output_current_max: Some(1.5),
            input_voltage_min: Some(3.0),
            input_voltage_max: Some(40.0),
            stock: 120_000,
            price1: 0.21,
            ..test_regulator(2837)
        },
        VoltageRegulatorRecord {
            mfr: "ME6211C18M5G".to_string(),
            package: "SOT-23-5".to_string(),
            is_low_dropout: 1,
            output_voltage_min: 1.8,
            output_voltage_max: 1.8,
            stock: 80_000,
            ..test_regulator(347376)
        },
        VoltageRegulatorRecord {
            mfr: "L7905CV".to_string(),
            package: "TO-220".to_string(),
            is_positive: 0,
            output_voltage_min: -5.0,
            output_voltage_max: -5.0,
            input_voltage_min: Some(-35.0),
            input_voltage_max: Some(-7.0),
            stock: 20_000,
            ..test_regulator(7900)
        },
        VoltageRegulatorRecord {
            mfr: "78L05".to_string(),
            output_voltage_min: 5.0,
            output_voltage_max: 5.0,
            stock: 1_000,
            ..test_regulator(42411)
        },
        VoltageRegulatorRecord {
            mfr: "TLV75801PDBVR".to_string(),
            package: "SOT-23".to_string(),
            output_type: "adjustable".to_string(),
            is_low_dropout: 1,
            output_voltage_min: 3.3,
            output_voltage_max: 5.0,
            stock: 50,
            ..test_regulator(2861882)
        },
    ];

    for regulator in &regulators {
        insert_regulator(pool, regulator).await;
    }

    regulators
}
