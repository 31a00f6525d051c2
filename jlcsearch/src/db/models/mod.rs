//! Database record structures matching table schemas.

pub mod voltage_regulators;
