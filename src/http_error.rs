use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use crate::db::StoreError;

/// A failed page request. Store failures never reach the browser as error
/// statuses: they are logged and turned into a redirect whose `error` query
/// parameter lets the target page show a flash banner.
#[derive(Debug)]
pub struct PageError {
    pub location: Option<String>,
    pub message: String,
    pub code: Option<String>,
}

impl PageError {
    pub fn redirect(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self { location: Some(location.into()), message: message.into(), code: None }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Maps a store failure to a redirect to `location`. `NotFound` always
    /// carries the `not_found` code, anything else carries `backend_code`.
    pub fn from_store(err: StoreError, location: &str, backend_code: &str) -> Self {
        let code = match err {
            StoreError::NotFound => "not_found",
            StoreError::Backend(_) => backend_code,
        };
        PageError::redirect(location, err.to_string()).with_code(code)
    }

    pub fn target(&self) -> Option<String> {
        let location = self.location.as_ref()?;
        Some(match &self.code {
            Some(code) => format!("{location}?error={code}"),
            None => location.clone(),
        })
    }
}

impl From<minijinja::Error> for PageError {
    fn from(e: minijinja::Error) -> Self {
        Self { location: None, message: format!("template error: {e:#}"), code: None }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self.target() {
            Some(target) => {
                tracing::error!(redirect = %target, "{}", self.message);
                Redirect::to(&target).into_response()
            }
            None => {
                tracing::error!("{}", self.message);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
