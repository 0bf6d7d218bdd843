use std::sync::{Arc, PoisonError, RwLock};

use reqwest::Url;

// Placeholder scheme for `//host:port` hints. Non-special schemes keep the
// port exactly as written.
const HINT_SCHEME: &str = "mesos";

/// Builds the endpoint to retry against after a not-leader redirect.
///
/// Mesos reports the leading master as `//host:port` in the `Location`
/// header; newer masters send a full URL. Either way only the host and port
/// of `current` are replaced, its scheme and path are kept.
///
/// The result is `current` in normalized URL form: an endpoint with an empty
/// path gains a trailing `/`, and a port equal to the scheme default is
/// dropped.
///
/// Returns `None` when the hint is empty, unparsable or carries no host, or
/// when `current` is not a URL that can hold a host.
pub fn rewrite_endpoint(hint: &str, current: &str) -> Option<String> {
    let hint = hint.trim();
    if hint.is_empty() {
        return None;
    }
    let (hinted, port) = parse_hint(hint)?;
    let host = hinted.host_str().filter(|host| !host.is_empty())?;

    let mut endpoint = Url::parse(current).ok()?;
    endpoint.set_host(Some(host)).ok()?;
    endpoint.set_port(port).ok()?;
    Some(endpoint.into())
}

// A fully qualified hint names its port even when it is the default for its
// own scheme, since that scheme is discarded.
fn parse_hint(hint: &str) -> Option<(Url, Option<u16>)> {
    match hint.strip_prefix("//") {
        Some(authority) => {
            let url = Url::parse(&format!("{HINT_SCHEME}://{authority}")).ok()?;
            let port = url.port();
            Some((url, port))
        }
        None => {
            let url = Url::parse(hint).ok()?;
            let port = url.port_or_known_default();
            Some((url, port))
        }
    }
}

/// Endpoint shared by every clone of a client.
///
/// Redirects replace the value for all holders; concurrent writers race and
/// the last one wins. Readers always see a complete endpoint.
#[derive(Clone, Debug)]
pub(crate) struct SharedEndpoint(Arc<RwLock<String>>);

impl SharedEndpoint {
    pub(crate) fn new(endpoint: String) -> Self {
        Self(Arc::new(RwLock::new(endpoint)))
    }

    pub(crate) fn get(&self) -> String {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn set(&self, endpoint: String) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = endpoint;
    }
}
