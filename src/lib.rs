//! `httpsched` is an async client for the Mesos v1 scheduler HTTP API.
//!
//! Calls are issued with:
//! - [`SchedulerClient::call`]
//! - [`SchedulerClient::call_no_data`]
//!
//! Both follow "not leader" redirects (HTTP 307 + `Location`) to the elected
//! master, pacing attempts with capped exponential backoff. A successful
//! `SUBSCRIBE` hands back its `Mesos-Stream-Id` as a [`DefaultHeader`] to be
//! adopted for all later calls.

mod backoff;
mod call;
mod client;
mod endpoint;
mod error;
mod options;
mod prepare;
mod redirect;
mod transport;

pub use backoff::{BackoffNotifier, BackoffSchedule};
pub use call::{Call, CallType};
pub use client::{scheduler_endpoint, CallResponse, SchedulerClient};
pub use endpoint::rewrite_endpoint;
pub use error::Error;
pub use options::{
    ClientOptions, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_REDIRECT_BACKOFF,
    DEFAULT_MIN_REDIRECT_BACKOFF,
};
pub use prepare::{DefaultHeader, STREAM_ID_HEADER};
pub use transport::{BoxFuture, HttpTransport, OutgoingCall, RequestOptions, Transport};

pub type Result<T> = std::result::Result<T, Error>;
