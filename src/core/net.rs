use std::time::Duration;

use url::Url;

use crate::core::{FailureReason, FetchFailure, MwClient};

/// Issue one bounded GET and return the body bytes.
///
/// Never retries. Every way the request can go wrong ends up as a [`FetchFailure`]
/// so the caller decides whether to skip or surface it.
pub(crate) async fn fetch(
    client: &MwClient,
    url: &Url,
    timeout: Duration,
) -> Result<Vec<u8>, FetchFailure> {
    let resp = client
        .http()
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| FetchFailure::from_reqwest(url.as_str(), &e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchFailure::new(
            url.as_str(),
            FailureReason::Status(status.as_u16()),
        ));
    }

    let body = resp
        .bytes()
        .await
        .map_err(|e| FetchFailure::from_reqwest(url.as_str(), &e))?;
    Ok(body.to_vec())
}

/// [`fetch`], with the failure logged against its URL and swallowed.
pub(crate) async fn fetch_or_skip(
    client: &MwClient,
    url: &Url,
    timeout: Duration,
) -> Option<Vec<u8>> {
    match fetch(client, url, timeout).await {
        Ok(body) => Some(body),
        Err(failure) => {
            tracing::warn!(url = %failure.url, reason = %failure.reason, "fetch failed; skipping");
            None
        }
    }
}
