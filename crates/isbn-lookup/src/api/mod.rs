use std::time::Duration;

use log::trace;

pub(crate) mod open_library;

/// How long a single request to Open Library may take.
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// The status line and body of an HTTP reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    /// The status code, e.g. 200.
    pub status: u16,
    /// The reason phrase for the status code, e.g. "Not Found".
    pub reason: String,
    /// The body decoded as text.
    pub text: String,
}

impl Reply {
    /// Creates a `200 OK` [`Reply`] with the body of `text`.
    #[must_use]
    pub fn ok<S: Into<String>>(text: S) -> Self {
        Self {
            status: 200,
            reason: "OK".to_owned(),
            text: text.into(),
        }
    }

    /// Creates a [`Reply`] with the `status` and `reason` with an empty body.
    #[must_use]
    pub fn status<S: Into<String>>(status: u16, reason: S) -> Self {
        Self {
            status,
            reason: reason.into(),
            text: String::new(),
        }
    }

    /// Returns true when the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// An HTTP client able to make a GET request.
///
/// Non success status codes are not errors for a [`Client`], they are returned as a [`Reply`]
/// so that the caller can decide what they mean.
pub trait Client
where
    Self: Default,
{
    /// Sends a GET request to `url`.
    ///
    /// # Errors
    ///
    /// An [`Err`] of [`ErrorKind::Timeout`] is returned when the request does not complete in
    /// time. An [`Err`] of [`ErrorKind::IO`] is returned for any other transport failure.
    fn fetch(&self, url: &str) -> Result<Reply, Error>;
}

impl Client for reqwest::blocking::Client {
    fn fetch(&self, url: &str) -> Result<Reply, Error> {
        let resp = self
            .get(url)
            .timeout(TIMEOUT)
            .send()
            .map_err(|e| transport_error(url, e))?;

        let status = resp.status();
        trace!("Open Library replied with {status}");

        let text = resp.text().map_err(|e| transport_error(url, e))?;

        Ok(Reply {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
            text,
        })
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> Error {
    let error = if err.is_timeout() {
        Error::new(
            ErrorKind::Timeout,
            format!("Request to Open Library API timed out accessing {url}"),
        )
    } else {
        Error::new(
            ErrorKind::IO,
            "Failed to fetch data from Open Library API. Check network connectivity.",
        )
    };
    error.with_source(err)
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_reply_producer, MockClient, NetworkErrorProducer, Producer, TimeoutProducer,
    URL_SINK,
};

use crate::{Error, ErrorKind};
