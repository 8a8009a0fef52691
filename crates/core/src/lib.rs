pub mod config;
pub mod error;
pub mod util;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub use crate::error::BadgeError;

pub enum AppError {
    Status(StatusCode),
    Internal(anyhow::Error),
}

impl AppError {
    /// The failure class name used in logs. Anything outside the badge pipeline
    /// is reported as `Internal`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status(_) => "Status",
            Self::Internal(err) => err.downcast_ref::<BadgeError>().map_or("Internal", BadgeError::kind),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Status(status) => status.into_response(),
            Self::Internal(ref err) => {
                tracing::error!("{}: {:#}", self.kind(), err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self { Self::Internal(err.into()) }
}
