use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};

/// Errors returned to the client when a request does not get past the gate.
#[derive(Debug, Display, Error)]
pub enum AccessError {
    #[display("forbidden")]
    Forbidden,
    #[display("unauthorized")]
    Unauthorized,
}

impl error::ResponseError for AccessError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AccessError::Forbidden => StatusCode::FORBIDDEN,
            AccessError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body(self.to_string())
    }
}
