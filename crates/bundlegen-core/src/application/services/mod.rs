pub mod bundle_service;

pub use bundle_service::{BundleService, ScaffoldReport};
