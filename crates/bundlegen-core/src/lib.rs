//! Bundlegen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the bundlegen
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          bundlegen-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        BundleService (use case)         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, SkeletonStore, Renderer,   │
//! │              ConfigStore)               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   bundlegen-adapters (Infrastructure)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Namespace, BundleName, line merging,   │
//! │           config tree walks)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bundlegen_core::prelude::*;
//!
//! let namespace: Namespace = "Acme\\DemoBundle".parse().unwrap();
//! let bundle = BundleName::derived_from(&namespace);
//!
//! // With injected adapters:
//! // let service = BundleService::new(skeleton, renderer, filesystem, configs);
//! // service.generate(&namespace, &bundle, &AppPaths::default()).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AppPaths, BundleService, PlanStep, RoutingEntry, ScaffoldPlan, ScaffoldReport,
        ports::{ConfigStore, Filesystem, SkeletonFile, SkeletonStore, TemplateRenderer},
    };
    pub use crate::domain::{
        BundleName, ConfigNode, ConfigScalar, InsertOutcome, Namespace, RenderContext,
        insert_before_marker,
    };
    pub use crate::error::{BundlegenError, BundlegenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
