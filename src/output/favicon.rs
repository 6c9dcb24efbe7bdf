//! Best-effort favicon lookup for referrer names.

use crate::utils::config::FAVICON_SERVICE;
use url::Url;

/// Favicon URL for a referrer, if its name is a URL with a host
///
/// Referrer names like `https://news.ycombinator.com/item?id=1` resolve to
/// the favicon service; bare names like `Direct / None` resolve to `None`
/// and the dashboard falls back to a generic marker.
pub fn favicon_url(referrer_name: &str) -> Option<String> {
    let parsed = Url::parse(referrer_name).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?;
    Some(format!("{}/{}.ico", FAVICON_SERVICE, host))
}
