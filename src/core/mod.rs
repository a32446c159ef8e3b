pub mod backup;
pub mod export;
pub mod import;
pub mod log;
pub mod reconcile;
pub mod rolling;
pub mod store;
