use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use isbn_lookup::{Client, Error, ErrorKind, Isbn, Lookup};
use log::{error, info};
use serde::Serialize;

/// The JSON body returned for every unsuccessful lookup.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl ErrorBody {
    fn new<S: Into<String>>(error: S) -> Self {
        Self {
            error: error.into(),
            message: None,
            location: None,
        }
    }

    fn relocated(error: &str, message: String, location: String) -> Self {
        Self {
            error: error.to_owned(),
            message: Some(message),
            location: Some(location),
        }
    }
}

pub(crate) async fn isbn_handler<C>(Path(isbn): Path<String>) -> Response
where
    C: Client + Send + 'static,
{
    let isbn = match Isbn::parse_plain(&isbn) {
        Ok(isbn) => isbn,
        Err(err) => {
            info!("Rejected ISBN '{isbn}': {err}");
            return error_response(&err);
        }
    };

    info!("Looking up ISBN '{isbn}'");
    let task_isbn = isbn.clone();
    let res = tokio::task::spawn_blocking(move || isbn_lookup::lookup_with::<C>(&task_isbn)).await;

    match res {
        Ok(Ok(lookup)) => lookup_response(&isbn, lookup),
        Ok(Err(err)) => {
            error!("Lookup of ISBN '{isbn}' failed: {err}");
            error_response(&err)
        }
        Err(err) => {
            error!("Lookup task for ISBN '{isbn}' did not complete: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(
                    "Failed to fetch data from Open Library API. Check network connectivity.",
                )),
            )
                .into_response()
        }
    }
}

fn lookup_response(isbn: &Isbn, lookup: Lookup) -> Response {
    // the requested ISBN is not found directly so redirects are reported as 404
    match lookup {
        Lookup::Book(book) => (StatusCode::OK, Json(book)).into_response(),
        Lookup::Redirected { location } => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::relocated(
                "ISBN Redirected",
                format!("The ISBN {isbn} has been redirected. Try looking up the new location."),
                location,
            )),
        )
            .into_response(),
        Lookup::Moved { location } => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::relocated(
                "Resource Moved or Merged",
                format!("The resource related to ISBN {isbn} has been moved or merged. See 'location' for details."),
                location,
            )),
        )
            .into_response(),
    }
}

fn error_response(err: &Error) -> Response {
    (status_for(err.kind()), Json(ErrorBody::new(err.message()))).into_response()
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidIsbn => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Status(code) => {
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
        ErrorKind::Empty | ErrorKind::Deserialize | ErrorKind::Timeout | ErrorKind::IO => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
