//! Best-effort check for a newer release on GitHub.
//!
//! A HEAD request to the fixed `releases/latest` URL with redirects disabled
//! yields a 302 whose `Location` ends in the latest tag. If that tag does not
//! match the running version an update is available. The check runs once on a
//! background thread; failures are logged and never affect the overlays.

use std::thread;

use tao::event_loop::EventLoopProxy;
use thiserror::Error;
use tracing::{debug, warn};

use crate::app::UserEvent;

pub const RELEASE_LATEST_URL: &str = "https://github.com/hperrin/stream-overlay/releases/latest";

#[derive(Debug, Error)]
pub enum UpdateCheckError {
    #[error("release check request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Decide from the redirect whether a newer release exists.
///
/// Anything other than a 302 pointing at the running version's tag counts as
/// an update: an unexpected response shape means the assumption baked into
/// this check no longer holds, and flagging is the safer direction.
pub fn update_available(status: u16, location: Option<&str>, current_version: &str) -> bool {
    if status != 302 {
        return true;
    }
    let tag = format!("v{current_version}");
    !location.is_some_and(|location| location.ends_with(&tag))
}

/// Spawn the one-shot check; a positive result is delivered through the
/// event-loop proxy.
pub fn spawn_check(proxy: EventLoopProxy<UserEvent>) {
    thread::spawn(move || match query_latest() {
        Ok((status, location)) => {
            if update_available(status, location.as_deref(), env!("CARGO_PKG_VERSION")) {
                debug!(status, ?location, "newer release detected");
                if proxy.send_event(UserEvent::UpdateAvailable).is_err() {
                    debug!("event loop gone before update result was delivered");
                }
            }
        }
        Err(err) => warn!("release check failed: {err}"),
    });
}

fn query_latest() -> Result<(u16, Option<String>), UpdateCheckError> {
    let client = reqwest::blocking::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let response = client.head(RELEASE_LATEST_URL).send()?;
    let status = response.status().as_u16();
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    Ok((status, location))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: &str = env!("CARGO_PKG_VERSION");

    #[test]
    fn matching_tag_means_current() {
        let location = format!("https://github.com/hperrin/stream-overlay/releases/tag/v{VERSION}");
        assert!(!update_available(302, Some(&location), VERSION));
    }

    #[test]
    fn different_tag_means_update() {
        let location = "https://github.com/hperrin/stream-overlay/releases/tag/v99.0.0";
        assert!(update_available(302, Some(location), VERSION));
    }

    #[test]
    fn unexpected_status_means_update() {
        let location = format!("https://github.com/hperrin/stream-overlay/releases/tag/v{VERSION}");
        assert!(update_available(200, Some(&location), VERSION));
        assert!(update_available(404, None, VERSION));
    }

    #[test]
    fn missing_location_means_update() {
        assert!(update_available(302, None, VERSION));
    }
}
