use reqwest::Response;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// The contacted master is not the leader.
    ///
    /// Carries the redirect response when one was received. Returned to the
    /// caller once redirect attempts are exhausted or the `Location` hint
    /// could not be turned into a new endpoint.
    #[error("not leader")]
    NotLeader(Option<Response>),
    /// A successful SUBSCRIBE response lacked the `Mesos-Stream-Id` header.
    #[error("missing Mesos-Stream-Id header expected with successful SUBSCRIBE")]
    MissingStreamId,
    /// A not-leader error arrived without the HTTP response it belongs to.
    #[error("expected an HTTP response, found something else instead")]
    NotHttpResponse,
    /// The configured endpoint is not a usable URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Client options failed validation.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    /// The call payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` for the not-leader condition, with or without a response.
    pub fn is_not_leader(&self) -> bool {
        matches!(self, Error::NotLeader(_))
    }
}
