//! Domain types for AIgis.
//!
//! This module contains the vocabulary shared by every other layer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Categories** ([`Category`]) naming each kind of sensitive value, in
//!   the fixed order strategies run
//! - **Detection modes** ([`Mode`]) switching between strict and developer
//!   heuristics
//! - **Placeholders** ([`Placeholder`]) formatting and parsing `[PREFIX_N]` tokens
//! - **Error types** ([`AigisError`]) and the [`Result`] alias
//!
//! ```rust
//! use aigis::domain::{Category, Placeholder};
//!
//! let ph = Placeholder::new(Category::Email, 3);
//! assert_eq!(ph.to_string(), "[EMAIL_3]");
//! assert_eq!(Placeholder::parse("[EMAIL_3]"), Some(ph));
//! ```

pub mod category;
pub mod errors;
pub mod placeholder;
pub mod result;

// Re-export commonly used types for convenience
pub use category::{Category, Mode};
pub use errors::AigisError;
pub use placeholder::Placeholder;
pub use result::Result;
