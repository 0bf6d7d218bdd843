use std::{fmt, time::Duration};

use reqwest::{
    header::{HeaderName, HeaderValue},
    Response, StatusCode,
};

use crate::{transport::RequestOptions, Call, Error, Result};

/// Response header carrying the SUBSCRIBE session token.
pub const STREAM_ID_HEADER: &str = "Mesos-Stream-Id";

/// Session token issued by the master on a successful SUBSCRIBE.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct StreamId(HeaderValue);

impl fmt::Debug for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StreamId").field(&"<redacted>").finish()
    }
}

/// A header to attach to every subsequent call made by a client.
///
/// Returned by [`SchedulerClient::call`](crate::SchedulerClient::call) when
/// the call established state the master expects to see again.
#[derive(Clone, PartialEq, Eq)]
pub struct DefaultHeader {
    pub name: HeaderName,
    pub value: HeaderValue,
}

impl DefaultHeader {
    pub(crate) fn stream_id(id: StreamId) -> Self {
        Self {
            name: HeaderName::from_static("mesos-stream-id"),
            value: id.0,
        }
    }
}

impl fmt::Debug for DefaultHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultHeader")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Transport result after call-specific inspection.
#[derive(Debug)]
pub(crate) struct Intercepted {
    pub(crate) response: Response,
    pub(crate) stream_id: Option<StreamId>,
}

/// Call-type specific pre- and post-processing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Preprocessor {
    PassThrough,
    Subscribe,
}

impl Preprocessor {
    pub(crate) fn for_call(call: &Call) -> Self {
        if call.is_subscribe() {
            Self::Subscribe
        } else {
            Self::PassThrough
        }
    }

    /// SUBSCRIBE holds its connection for the event stream: it is never
    /// pooled for reuse and is not subject to the request timeout.
    pub(crate) fn request_options(self, timeout: Option<Duration>) -> RequestOptions {
        match self {
            Self::PassThrough => RequestOptions {
                close_connection: false,
                timeout,
            },
            Self::Subscribe => RequestOptions {
                close_connection: true,
                timeout: None,
            },
        }
    }

    /// Inspects one transport attempt. Only a 200 SUBSCRIBE response is
    /// examined; everything else is returned untouched.
    pub(crate) fn intercept(self, result: Result<Response>) -> Result<Intercepted> {
        let response = result?;
        if self == Self::PassThrough || response.status() != StatusCode::OK {
            return Ok(Intercepted {
                response,
                stream_id: None,
            });
        }

        let stream_id = response
            .headers()
            .get(STREAM_ID_HEADER)
            .filter(|value| !value.is_empty())
            .cloned();
        match stream_id {
            Some(value) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(len = value.len(), "captured mesos stream id");
                Ok(Intercepted {
                    response,
                    stream_id: Some(StreamId(value)),
                })
            }
            None => {
                drop(response);
                Err(Error::MissingStreamId)
            }
        }
    }

    pub(crate) fn post_call(self, stream_id: Option<StreamId>) -> Option<DefaultHeader> {
        match self {
            Self::PassThrough => None,
            Self::Subscribe => stream_id.map(DefaultHeader::stream_id),
        }
    }
}
