//! Sanitization pipeline
//!
//! - [`detector`] - one detection strategy per PII category
//! - [`catalog`] - the ordered set of enabled strategies
//! - [`engine`] - substitution against the placeholder vault, and restoration
//! - [`restore`] - placeholder scanning and masked previews
//! - [`stats`] - usage statistics

pub mod catalog;
pub mod detector;
pub mod engine;
pub mod restore;
pub mod stats;

pub use catalog::StrategyCatalog;
pub use detector::{DetectorStrategy, Match};
pub use engine::{SanitizationEngine, SanitizationResult};
pub use restore::{masked_preview, PlaceholderScanner, RestorationResult};
pub use stats::UsageStats;
