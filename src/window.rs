//! One overlay window: a frameless always-on-top tao window hosting its URL
//! in a transparent wry webview.
//!
//! The visual contract is fixed at creation: no decorations, transparent,
//! not resizable or maximizable, always on top, visible on all workspaces,
//! hidden from the taskbar. Focus and blur toggle cursor-event passthrough
//! and notify the page through the bridge.

use std::rc::Rc;

use anyhow::{Context, Result};
use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Fullscreen, Window, WindowBuilder, WindowId};
use tracing::{debug, warn};
use wry::{WebView, WebViewBuilder};

use crate::app::UserEvent;
use crate::bridge;
use crate::config::WindowSpec;
use crate::focus::{FocusEvent, Interactivity};
use crate::placement;

/// OS window title when the spec has none. Distinct from the tray's
/// positional fallback, which is applied per menu entry.
pub const FALLBACK_TITLE: &str = "Stream Overlay";

pub struct OverlayWindow {
    // Dropped before `window`; the webview borrows the window's surface.
    webview: WebView,
    window: Window,
    spec: Rc<WindowSpec>,
    interactivity: Interactivity,
}

impl OverlayWindow {
    pub fn create(
        spec: Rc<WindowSpec>,
        target: &EventLoopWindowTarget<UserEvent>,
        proxy: EventLoopProxy<UserEvent>,
    ) -> Result<Self> {
        placement::validate_size(&spec)?;

        let (display_width, display_height) = target
            .primary_monitor()
            .map(|monitor| {
                let size = monitor.size();
                (size.width, size.height)
            })
            .unwrap_or((0, 0));
        let (x, y) = placement::resolve_position(&spec, display_width, display_height);

        let title = if spec.title.is_empty() {
            FALLBACK_TITLE
        } else {
            &spec.title
        };

        let mut builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(spec.width, spec.height))
            .with_position(LogicalPosition::new(x, y))
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_maximizable(false)
            .with_always_on_top(true)
            .with_visible_on_all_workspaces(true);
        if spec.fullscreen {
            builder = builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        #[cfg(target_os = "windows")]
        let builder = {
            use tao::platform::windows::WindowBuilderExtWindows;
            builder.with_skip_taskbar(true)
        };
        #[cfg(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd"
        ))]
        let builder = {
            use tao::platform::unix::WindowBuilderExtUnix;
            builder.with_skip_taskbar(true)
        };

        let window = builder.build(target).context("creating overlay window")?;
        let handle = window.id();
        debug!(url = %spec.url, ?handle, "overlay window created");

        let webview_builder = WebViewBuilder::new()
            .with_transparent(true)
            .with_initialization_script(&bridge::bootstrap_script(spec.opacity))
            .with_url(&spec.url)
            .with_ipc_handler(move |message| match bridge::parse_request(message.body()) {
                Some(request) => {
                    if proxy.send_event(UserEvent::Content { window: handle, request }).is_err() {
                        debug!("event loop gone, dropping content request");
                    }
                }
                None => warn!(body = %message.body(), "ignoring unrecognized content message"),
            });

        #[cfg(not(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd"
        )))]
        let webview = webview_builder
            .build(&window)
            .context("creating overlay webview")?;
        #[cfg(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd"
        ))]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = window
                .default_vbox()
                .context("overlay window has no container for the webview")?;
            webview_builder
                .build_gtk(vbox)
                .context("creating overlay webview")?
        };

        let mut overlay = OverlayWindow {
            webview,
            window,
            spec,
            interactivity: Interactivity::initial(false),
        };
        // Start click-through; the toolkit reports the real focus state right
        // after creation and `set_focused` converges on it.
        overlay.apply(FocusEvent::Blur);
        Ok(overlay)
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn spec(&self) -> &Rc<WindowSpec> {
        &self.spec
    }

    pub fn interactivity(&self) -> Interactivity {
        self.interactivity
    }

    pub fn set_focused(&mut self, focused: bool) {
        let event = if focused {
            FocusEvent::Focus
        } else {
            FocusEvent::Blur
        };
        self.apply(event);
    }

    fn apply(&mut self, event: FocusEvent) {
        self.interactivity = self.interactivity.apply(event);
        let click_through = self.interactivity.is_click_through();
        if let Err(err) = self.window.set_ignore_cursor_events(click_through) {
            warn!("failed to toggle cursor passthrough: {err}");
        }
        let script = match event {
            FocusEvent::Focus => bridge::focus_script(),
            FocusEvent::Blur => bridge::blur_script(),
        };
        if let Err(err) = self.webview.evaluate_script(&script) {
            warn!("failed to notify page of focus change: {err}");
        }
    }

    /// Bring the window forward for interaction.
    pub fn focus(&self) {
        self.window.set_focus();
    }

    /// Re-assert the top-most flag. Other always-on-top surfaces can take
    /// the top slot between ticks.
    pub fn raise(&self) {
        self.window.set_always_on_top(true);
    }

    /// Deliver the window's spec to the hosted page.
    pub fn send_config(&self) {
        match bridge::config_script(&self.spec) {
            Ok(script) => {
                if let Err(err) = self.webview.evaluate_script(&script) {
                    warn!("failed to deliver config to page: {err}");
                }
            }
            Err(err) => warn!("failed to serialize spec for page: {err}"),
        }
    }
}
