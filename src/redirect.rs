use std::future::Future;

use reqwest::header;

use crate::{
    backoff::BackoffNotifier,
    endpoint::{rewrite_endpoint, SharedEndpoint},
    ClientOptions, Error, Result,
};

/// Retries a call against the leading master.
///
/// Each attempt receives the endpoint to use. A not-leader answer moves the
/// shared endpoint to the host named by `Location` and, after a backoff
/// delay, tries again, at most `max_redirects` times per call.
pub(crate) struct Redirector<'a> {
    endpoint: &'a SharedEndpoint,
    options: &'a ClientOptions,
}

impl<'a> Redirector<'a> {
    pub(crate) fn new(endpoint: &'a SharedEndpoint, options: &'a ClientOptions) -> Self {
        Self { endpoint, options }
    }

    pub(crate) async fn resolve<T, F, Fut>(&self, mut attempt: F) -> Result<T>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        // Created on the first redirect only; aborted on drop if we unwind.
        let mut backoff = None;
        let result = self.redirect_loop(&mut attempt, &mut backoff).await;
        if let Some(notifier) = backoff.as_mut() {
            notifier.stop().await;
        }
        result
    }

    async fn redirect_loop<T, F, Fut>(
        &self,
        attempt: &mut F,
        backoff: &mut Option<BackoffNotifier>,
    ) -> Result<T>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut redirects = 0usize;
        loop {
            let response = match attempt(self.endpoint.get()).await {
                Err(Error::NotLeader(response)) => response,
                other => return other,
            };
            let Some(response) = response else {
                return Err(Error::NotHttpResponse);
            };

            #[cfg(feature = "tracing")]
            tracing::warn!(attempt = redirects, "master changed?");

            if redirects >= self.options.max_redirects {
                return Err(Error::NotLeader(Some(response)));
            }

            let current = self.endpoint.get();
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            let Some(next) = rewrite_endpoint(location, &current) else {
                #[cfg(feature = "tracing")]
                tracing::warn!(location, endpoint = %current, "cannot derive leader endpoint");
                return Err(Error::NotLeader(Some(response)));
            };
            drop(response);

            #[cfg(feature = "tracing")]
            tracing::info!(endpoint = %next, "redirecting to leader");

            self.endpoint.set(next);
            let (min, max) = (
                self.options.min_redirect_backoff,
                self.options.max_redirect_backoff,
            );
            backoff
                .get_or_insert_with(|| BackoffNotifier::start(min, max))
                .notified()
                .await;
            redirects += 1;
        }
    }
}
