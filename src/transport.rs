use std::{fmt, future::Future, pin::Pin, time::Duration};

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    redirect, Response, StatusCode,
};

use crate::{Call, Error, Result};

/// Boxed future returned by [`Transport::send`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Per-request options chosen by the call preprocessor.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestOptions {
    /// Ask the server to close the connection once the response completes.
    pub close_connection: bool,
    pub timeout: Option<Duration>,
}

/// Everything the transport needs to issue one attempt of a call.
#[derive(Clone, Copy, Debug)]
pub struct OutgoingCall<'a> {
    pub endpoint: &'a str,
    pub call: &'a Call,
    pub headers: &'a HeaderMap,
    pub options: &'a RequestOptions,
}

/// Sends scheduler calls and classifies the raw HTTP outcome.
///
/// Implementations must report a not-leader answer as
/// [`Error::NotLeader`] carrying the redirect response.
pub trait Transport: Send + Sync {
    fn send<'a>(&'a self, request: OutgoingCall<'a>) -> BoxFuture<'a, Result<Response>>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send<'a>(&'a self, request: OutgoingCall<'a>) -> BoxFuture<'a, Result<Response>> {
        (**self).send(request)
    }
}

/// `reqwest`-backed transport speaking JSON to a Mesos master.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Builds a transport that never follows redirects on its own.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(Error::Transport)?;
        Ok(Self { http })
    }

    async fn post(&self, request: OutgoingCall<'_>) -> Result<Response> {
        let body = serde_json::to_vec(request.call)?;
        let mut builder = self
            .http
            .post(request.endpoint)
            .headers(request.headers.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(body);
        if request.options.close_connection {
            builder = builder.header(header::CONNECTION, HeaderValue::from_static("close"));
        }
        if let Some(timeout) = request.options.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(Error::Transport)?;
        classify(response).await
    }
}

impl Transport for HttpTransport {
    fn send<'a>(&'a self, request: OutgoingCall<'a>) -> BoxFuture<'a, Result<Response>> {
        Box::pin(self.post(request))
    }
}

async fn classify(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::TEMPORARY_REDIRECT {
        return Err(Error::NotLeader(Some(response)));
    }
    let body = response.text().await.map_err(Error::Transport)?;
    Err(Error::Http {
        status: status.as_u16(),
        body,
    })
}
