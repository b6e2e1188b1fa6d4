// Domain layer - Dashboard snapshot and its sections
pub mod activity;
pub mod charts;
pub mod dashboard;
pub mod health;
