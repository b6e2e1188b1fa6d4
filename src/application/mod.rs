// Application layer - Dashboard lifecycle use cases
pub mod classifier;
pub mod formatter;
pub mod metrics_source;
pub mod navigation;
pub mod polling;
pub mod random;
pub mod refresh;
pub mod session;
pub mod store;
