//! Application layer: orchestration, plan/apply, and driven ports.

pub mod error;
pub mod plan;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use plan::{AppPaths, PlanStep, RoutingEntry, ScaffoldPlan};
pub use services::{BundleService, ScaffoldReport};
