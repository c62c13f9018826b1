//! Connection URL helpers
//!
//! Connection URLs end up in assertion messages, so anything printed should
//! go through [`redact_url`] first.

use url::Url;

const REDACTED: &str = "***";

/// Query parameter names whose values are masked by [`redact_url`]
const SECRET_PARAMS: [&str; 4] = ["password", "pass", "pwd", "sslpassword"];

fn is_secret_param(key: &str) -> bool {
    SECRET_PARAMS.iter().any(|secret| key.eq_ignore_ascii_case(secret))
}

/// Return the URL scheme (the part before the first `:`), if there is one.
pub fn url_scheme(url: &str) -> Option<&str> {
    let (scheme, _) = url.split_once(':')?;
    let valid = !scheme.is_empty()
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

/// Append extra connection properties to a URL.
///
/// `query` is in URL query form with or without a leading `?`. An empty
/// query leaves the URL untouched.
pub fn append_query(url: &str, query: &str) -> String {
    let query = query.trim_start_matches(['?', '&']);
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

/// Mask credentials embedded in a connection URL.
///
/// Replaces the userinfo password and the values of password-like query
/// parameters with `***`. Strings that do not parse as URLs are returned
/// unchanged.
pub fn redact_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    let mut changed = false;
    if parsed.password().is_some() {
        changed |= parsed.set_password(Some(REDACTED)).is_ok();
    }

    if parsed.query_pairs().any(|(key, _)| is_secret_param(&key)) {
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(key, value)| {
                let value = if is_secret_param(&key) {
                    REDACTED.to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();
        parsed.query_pairs_mut().clear().extend_pairs(pairs.iter());
        changed = true;
    }

    if changed {
        parsed.to_string()
    } else {
        raw.to_string()
    }
}
