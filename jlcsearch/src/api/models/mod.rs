//! Request/response data structures for API communication.

pub mod format;
pub mod voltage_regulators;
