//! Result type alias for AIgis

use super::errors::AigisError;

/// Result type alias for AIgis operations
///
/// # Examples
///
/// ```
/// use aigis::domain::result::Result;
/// use aigis::domain::errors::AigisError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AigisError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AigisError>;
