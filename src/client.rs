use std::{fmt, sync::Arc};

use reqwest::{header::HeaderMap, Response, Url};

use crate::{
    endpoint::SharedEndpoint,
    prepare::{Intercepted, Preprocessor},
    redirect::Redirector,
    transport::{HttpTransport, OutgoingCall, Transport},
    Call, ClientOptions, DefaultHeader, Error, Result,
};

/// Formats a master `host:port` into the scheduler API URL.
///
/// Example: `"10.0.0.1:5050"` → `"http://10.0.0.1:5050/api/v1/scheduler"`
pub fn scheduler_endpoint(master: &str) -> String {
    format!("http://{}/api/v1/scheduler", master.trim())
}

/// Response of [`SchedulerClient::call`].
#[derive(Debug)]
pub struct CallResponse {
    pub response: Response,
    /// Configuration to adopt for all later calls, see
    /// [`SchedulerClient::with_default_header`].
    pub default_header: Option<DefaultHeader>,
}

/// Mesos scheduler API client that follows leader redirects.
///
/// Clones share the current endpoint: a redirect observed through any clone
/// moves all of them to the new leader.
pub struct SchedulerClient<T = HttpTransport> {
    transport: Arc<T>,
    endpoint: SharedEndpoint,
    default_headers: HeaderMap,
    options: ClientOptions,
}

impl<T> Clone for SchedulerClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            endpoint: self.endpoint.clone(),
            default_headers: self.default_headers.clone(),
            options: self.options.clone(),
        }
    }
}

impl<T> fmt::Debug for SchedulerClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<_> = self.default_headers.keys().collect();
        f.debug_struct("SchedulerClient")
            .field("endpoint", &self.endpoint.get())
            .field("default_headers", &headers)
            .field("options", &self.options)
            .finish()
    }
}

impl SchedulerClient<HttpTransport> {
    /// Creates a client for a full scheduler endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_transport(endpoint, HttpTransport::new()?)
    }

    /// Creates a client for a master given as `host:port`.
    pub fn from_master(master: impl AsRef<str>) -> Result<Self> {
        Self::new(scheduler_endpoint(master.as_ref()))
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `MESOS_SCHEDULER_ENDPOINT` (full URL) or, when unset,
    /// `MESOS_MASTER` (`host:port`).
    pub fn from_env() -> Result<Self> {
        if let Ok(endpoint) = std::env::var("MESOS_SCHEDULER_ENDPOINT") {
            return Self::new(endpoint);
        }
        let master = std::env::var("MESOS_MASTER").map_err(|_| {
            Error::InvalidEndpoint(
                "missing MESOS_SCHEDULER_ENDPOINT or MESOS_MASTER environment variable".to_owned(),
            )
        })?;
        if master.trim().is_empty() {
            return Err(Error::InvalidEndpoint(
                "MESOS_MASTER is set but empty".to_owned(),
            ));
        }
        Self::from_master(master)
    }
}

impl<T: Transport> SchedulerClient<T> {
    /// Creates a client sending calls through a custom transport.
    pub fn with_transport(endpoint: impl Into<String>, transport: T) -> Result<Self> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint)
            .map_err(|err| Error::InvalidEndpoint(format!("{endpoint}: {err}")))?;
        Ok(Self {
            transport: Arc::new(transport),
            endpoint: SharedEndpoint::new(endpoint),
            default_headers: HeaderMap::new(),
            options: ClientOptions::default(),
        })
    }

    /// Applies redirect, backoff and timeout options.
    pub fn with_options(mut self, opts: ClientOptions) -> Result<Self> {
        opts.validate()?;
        self.options = opts;
        Ok(self)
    }

    /// Adopts a header returned by [`call`](Self::call) for all later calls.
    pub fn with_default_header(mut self, header: DefaultHeader) -> Self {
        self.default_headers.insert(header.name, header.value);
        self
    }

    /// Current endpoint, including any redirect already followed.
    pub fn endpoint(&self) -> String {
        self.endpoint.get()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Issues a call whose acknowledgement carries no payload.
    pub async fn call_no_data(&self, call: &Call) -> Result<()> {
        self.dispatch(call, Preprocessor::for_call(call))
            .await
            .map(drop)
    }

    /// Issues a call and returns the response together with any
    /// configuration the caller should adopt.
    ///
    /// A successful SUBSCRIBE yields a `Mesos-Stream-Id` [`DefaultHeader`];
    /// the response body is the event stream.
    pub async fn call(&self, call: &Call) -> Result<CallResponse> {
        let preprocessor = Preprocessor::for_call(call);
        let Intercepted {
            response,
            stream_id,
        } = self.dispatch(call, preprocessor).await?;
        Ok(CallResponse {
            response,
            default_header: preprocessor.post_call(stream_id),
        })
    }

    async fn dispatch(&self, call: &Call, preprocessor: Preprocessor) -> Result<Intercepted> {
        let options = preprocessor.request_options(self.options.timeout);
        let options = &options;

        Redirector::new(&self.endpoint, &self.options)
            .resolve(move |endpoint| async move {
                let request = OutgoingCall {
                    endpoint: &endpoint,
                    call,
                    headers: &self.default_headers,
                    options,
                };
                preprocessor.intercept(self.transport.send(request).await)
            })
            .await
    }
}
