pub mod currency;
pub mod liga;
pub mod search;
pub mod tcgplayer;

use crate::error::AppError;

/// The trimmed `q` parameter, or a 400 when it is missing or blank.
pub fn required_query(q: Option<String>) -> Result<String, AppError> {
    q.map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::bad_request("Query parameter is required"))
}
