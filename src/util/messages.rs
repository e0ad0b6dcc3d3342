//! User-facing message lookup.
//!
//! A pure `key -> string` table standing in for the localization layer.
//! Unknown keys fall back to the key itself so a missing entry shows up
//! in the UI instead of crashing it.

#[cfg(test)]
#[path = "messages_test.rs"]
mod messages_test;

/// Look up the display string for `key`.
#[must_use]
pub fn message(key: &str) -> &str {
    match key {
        "error.request-failed" => "Something went wrong",
        "error.sign-in-failed" => "Sign-in failed",
        "login.check-inbox" => "Check your inbox",
        "login.link-sent-to" => "We sent a sign-in link to",
        "share.valid-for" => "Valid for",
        "share.renewing" => "Fetching a new code...",
        "access.granted" => "Access granted to the record of",
        _ => key,
    }
}

/// Format an error for inline display, prefixed with the localized
/// request-failure message.
#[must_use]
pub fn describe_error(err: &crate::net::error::ApiError) -> String {
    format!("{}: {err}", message("error.request-failed"))
}
