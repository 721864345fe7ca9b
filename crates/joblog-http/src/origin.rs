//! URL resolution and same-origin checks.

use url::Url;

use crate::error::{HttpError, HttpResult};

/// Resolve an attribute value against the page origin.
///
/// Absolute URLs are used as-is; relative ones need a base.
pub fn resolve(base: Option<&Url>, raw: &str) -> HttpResult<Url> {
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => Ok(base.join(raw)?),
            None => Err(HttpError::RelativeWithoutBase(raw.to_string())),
        },
        Err(e) => Err(e.into()),
    }
}

/// Whether credentials may be sent to `url`.
///
/// Scheme, host and port must all match the base. Without a base nothing is
/// same-origin.
pub fn is_same_origin(base: Option<&Url>, url: &Url) -> bool {
    base.is_some_and(|base| base.origin().is_tuple() && base.origin() == url.origin())
}
