//! Field checks for admin create/update payloads.

use folio_core::{Error, Result};
use url::Url;

/// Profile name / skill name.
pub const NAME_MAX: usize = 100;
/// Profile tagline.
pub const TAGLINE_MAX: usize = 200;
/// Project title.
pub const TITLE_MAX: usize = 200;
/// Project technologies string.
pub const TECHNOLOGIES_MAX: usize = 500;
/// Any stored URL.
pub const URL_MAX: usize = 200;
/// Social link name and icon name.
pub const SHORT_MAX: usize = 50;

/// Non-blank and at most `max` characters.
pub fn required(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    max_len(field, value, max)
}

/// At most `max` characters.
pub fn max_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(Error::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// An absolute `http`/`https` URL of at most [`URL_MAX`] characters.
pub fn http_url(field: &str, value: &str) -> Result<()> {
    required(field, value, URL_MAX)?;
    let parsed =
        Url::parse(value).map_err(|e| Error::validation(format!("{field} is not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host().is_some() => Ok(()),
        _ => Err(Error::validation(format!(
            "{field} must be an http or https URL"
        ))),
    }
}

/// Treat a blank optional URL as absent, otherwise check it.
pub fn optional_url(field: &str, value: Option<&str>) -> Result<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => {
            http_url(field, v)?;
            Ok(Some(v.to_string()))
        }
    }
}
