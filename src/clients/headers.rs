//! Scoped header overrides.
//!
//! [`with_headers`] runs a future with extra headers that apply to every
//! request the future issues, such as an alternate `Authorization` token.
//! Scopes nest and merge innermost-wins. The overrides live in a Tokio
//! task-local, so concurrent tasks with different scopes never see each
//! other's headers.
//!
//! # Example
//!
//! ```rust,ignore
//! use monday_api::clients::with_headers;
//! use std::collections::HashMap;
//!
//! let headers = HashMap::from([("Authorization".to_string(), "other-token".to_string())]);
//! let boards = with_headers(headers, client.boards().query(&query, &fields)).await?;
//! ```

use std::collections::HashMap;
use std::future::Future;

tokio::task_local! {
    static HEADER_OVERRIDES: HashMap<String, String>;
}

/// Runs `future` with `headers` layered over any enclosing scope.
pub async fn with_headers<F>(headers: HashMap<String, String>, future: F) -> F::Output
where
    F: Future,
{
    let mut merged = current_headers();
    merge_headers(&mut merged, headers);
    HEADER_OVERRIDES.scope(merged, future).await
}

/// Returns the overrides active for the current task, or an empty map.
#[must_use]
pub fn current_headers() -> HashMap<String, String> {
    HEADER_OVERRIDES
        .try_with(Clone::clone)
        .unwrap_or_default()
}

/// Merges `source` into `target`. Names compare case-insensitively and the
/// incoming value wins.
pub(crate) fn merge_headers(
    target: &mut HashMap<String, String>,
    source: impl IntoIterator<Item = (String, String)>,
) {
    for (name, value) in source {
        target.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        target.insert(name, value);
    }
}
