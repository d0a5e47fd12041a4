pub mod admin;
pub mod complete;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::corpus::Corpus;

/// Application context passed to all handlers.
pub struct Ctx {
    pub corpus: Arc<Corpus>,

    /// Set once the corpus file has been fully imported.
    pub loaded: AtomicBool,

    pub consts: Consts,
}

impl Ctx {
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn set_loaded(&self) {
        self.loaded.store(true, Ordering::Release);
    }
}

/// Application constants.
#[derive(Debug, Clone, Serialize)]
pub struct Consts {
    pub default_results: usize,
    pub max_results: usize,
}

impl Default for Consts {
    fn default() -> Self {
        Self {
            default_results: 10,
            max_results: 50,
        }
    }
}

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResp<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResp<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub fn json<T: Serialize>(data: T) -> ApiResp<T> {
    ApiResp {
        data: Some(data),
        message: None,
    }
}

/// API error type.
#[derive(Debug)]
pub struct ApiErr {
    pub message: String,
    pub status: StatusCode,
}

impl ApiErr {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let json = Json(ApiResp::<()> {
            data: None,
            message: Some(self.message),
        });
        (self.status, json).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiErr>;

/// Resolve the number of results to return for a requested limit.
pub fn clamp_limit(limit: usize, max: usize, default: usize) -> usize {
    if limit < 1 {
        default
    } else if limit > max {
        max
    } else {
        limit
    }
}
