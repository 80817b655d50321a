//! Services module for proforma-service.

pub mod database;
pub mod demo;
pub mod format;
pub mod invoicing;
pub mod metrics;
pub mod search;
pub mod store;
pub mod totals;

pub use database::Database;
pub use demo::DemoStore;
pub use self::metrics::{get_metrics, init_metrics};
pub use store::{DashboardStats, SharedStore, Store};
