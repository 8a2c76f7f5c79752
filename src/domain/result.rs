//! Result type alias for Argus

use super::errors::ArgusError;

/// Result type alias for Argus operations
///
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use argus::domain::result::Result;
/// use argus::domain::errors::ArgusError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ArgusError::Configuration("invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ArgusError>;
