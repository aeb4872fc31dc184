//! Script-injection bridge between the host and the hosted page.
//!
//! The bootstrap script runs before the page and exposes
//! `window.streamOverlay` with `requestConfig()` and `requestClose()`, which
//! post JSON envelopes over the webview IPC channel. Outbound traffic is
//! plain script evaluation: a config dump as a `overlay-config` custom event,
//! and focus/blur notifications that also swap the page background between
//! the focused tint and full transparency.

use serde_json::json;

use crate::config::WindowSpec;

/// Background while focused. Visibly tints the page so the user can see the
/// overlay is interactive.
pub const FOCUS_BACKGROUND: &str = "#ddd";
/// Background while blurred; restores full transparency.
pub const BLUR_BACKGROUND: &str = "rgba(0, 0, 0, 0)";

/// Request posted by the hosted page over the IPC channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRequest {
    /// Page asks for the spec it was created from.
    Config,
    /// Page asks its own window to close.
    Close,
}

/// Parse an IPC message body. Unknown or malformed payloads yield `None`;
/// hosted pages are arbitrary web content and must not be able to break the
/// host by posting garbage.
pub fn parse_request(body: &str) -> Option<ContentRequest> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("type")?.as_str()? {
        "requestConfig" => Some(ContentRequest::Config),
        "requestClose" => Some(ContentRequest::Close),
        _ => None,
    }
}

/// Script injected before page load. Defines the page-facing API and applies
/// the configured opacity to the document root once the DOM exists.
pub fn bootstrap_script(opacity: f64) -> String {
    let opacity = opacity.clamp(0.0, 1.0);
    format!(
        r#"(function () {{
  window.streamOverlay = {{
    requestConfig: function () {{
      window.ipc.postMessage(JSON.stringify({{ type: 'requestConfig' }}));
    }},
    requestClose: function () {{
      window.ipc.postMessage(JSON.stringify({{ type: 'requestClose' }}));
    }}
  }};
  var apply = function () {{
    document.documentElement.style.opacity = '{opacity}';
  }};
  if (document.readyState === 'loading') {{
    document.addEventListener('DOMContentLoaded', apply);
  }} else {{
    apply();
  }}
}})();"#
    )
}

/// Script delivering the window's spec as an `overlay-config` event.
pub fn config_script(spec: &WindowSpec) -> Result<String, serde_json::Error> {
    let detail = serde_json::to_string(spec)?;
    Ok(format!(
        "window.dispatchEvent(new CustomEvent('overlay-config', {{ detail: {detail} }}));"
    ))
}

pub fn focus_script() -> String {
    background_script(FOCUS_BACKGROUND, "overlay-focus")
}

pub fn blur_script() -> String {
    background_script(BLUR_BACKGROUND, "overlay-blur")
}

fn background_script(background: &str, event: &str) -> String {
    format!(
        "document.documentElement.style.background = {background};\
         window.dispatchEvent(new Event({event}));",
        background = json!(background),
        event = json!(event),
    )
}
