//! Result type alias for filmo-batch

use super::errors::FilmoError;

/// Result type alias for filmo-batch operations
///
/// # Examples
///
/// ```
/// use filmo_batch::domain::result::Result;
/// use filmo_batch::domain::errors::FilmoError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(FilmoError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, FilmoError>;
