use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;

use crate::dataset::DatasetError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("Dataset task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    /// Loader failures stay opaque to callers; only an empty dataset gets its
    /// own status.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Dataset(DatasetError::Empty) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> String {
        match self {
            ApiError::Dataset(DatasetError::Empty) => "No wind data available.".to_string(),
            _ => "Internal server error.".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub code: u16,
    pub message: String,
}
