//! Application configuration and registry.
//!
//! ```rust
//! use seedling::apps::Apps;
//!
//! let apps = Apps::new(vec!["cms.boxes".to_string()]);
//! apps.populate().unwrap();
//! assert!(apps.get_app_config("boxes").is_ok());
//! ```

pub use seedling_apps::*;
