use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Plain-text confirmation returned by mutation endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub status: StatusCode,
    pub message: &'static str,
}

impl Confirmation {
    /// 200 OK
    pub fn ok(message: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            message,
        }
    }

    /// 201 Created
    pub fn created(message: &'static str) -> Self {
        Self {
            status: StatusCode::CREATED,
            message,
        }
    }
}

impl IntoResponse for Confirmation {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

pub type ApiResult<T> = Result<T, crate::error::ApiError>;
