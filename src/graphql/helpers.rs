use async_graphql::ErrorExtensions;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Helper to parse a widget session id from a GraphQL ID string
pub fn parse_id(id: &str) -> AppResult<String> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|_| AppError::ValidationError("Invalid UUID format".to_string()))
}

/// Attach the error code extension before handing an error to GraphQL
pub fn to_graphql<T>(result: AppResult<T>) -> async_graphql::Result<T> {
    result.map_err(|err| err.extend())
}
