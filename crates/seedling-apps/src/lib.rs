//! # Seedling Apps
//!
//! Django-inspired application configuration and registry.
//!
//! ## Overview
//!
//! - **[`AppConfig`]**: Application configuration (name, label, path)
//! - **[`Apps`]**: Ordered registry of installed applications
//! - **[`FixturesProvider`]**: Where an application keeps its fixtures
//!
//! ## Quick Start
//!
//! ```rust
//! use seedling_apps::{AppConfig, Apps};
//!
//! let apps = Apps::new(vec!["cms.pages".to_string()]);
//! apps.register(AppConfig::new("cms.boxes", "boxes")).unwrap();
//! apps.populate().unwrap();
//!
//! assert_eq!(apps.get_app_config("boxes").unwrap().name, "cms.boxes");
//! assert!(apps.get_app_config("unknown").is_err());
//! ```

pub mod apps;

pub use apps::{AppConfig, AppError, AppResult, Apps, FixturesProvider};
