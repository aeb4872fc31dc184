//! Control-thread context and the event loop.
//!
//! Everything lives on one thread: the tao event loop owns the windows, the
//! registry, the pin schedule and the tray. Work arriving from elsewhere
//! (menu clicks, the update check, webview IPC callbacks) is funneled in as
//! `UserEvent`s through the loop's proxy.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use tao::event::{Event, StartCause, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopWindowTarget, EventLoopProxy};
use tao::window::WindowId;
use tracing::{error, info, warn};
use tray_icon::menu::{MenuEvent, MenuId};

use crate::bridge::ContentRequest;
use crate::config::WindowSpec;
use crate::menu;
use crate::pin::PinSchedule;
use crate::registry::Registry;
use crate::tray::{MenuAction, Tray};
use crate::update;
use crate::window::OverlayWindow;

/// Events injected into the loop from outside the windowing toolkit.
#[derive(Debug)]
pub enum UserEvent {
    /// The release check found a newer version.
    UpdateAvailable,
    /// A tray menu item was clicked.
    Menu(MenuId),
    /// A hosted page posted a request over the bridge.
    Content {
        window: WindowId,
        request: ContentRequest,
    },
}

struct App {
    specs: Vec<Rc<WindowSpec>>,
    registry: Registry<WindowId>,
    windows: HashMap<WindowId, OverlayWindow>,
    pins: PinSchedule<WindowId>,
    tray: Tray,
    update_available: bool,
}

impl App {
    fn new(specs: Vec<Rc<WindowSpec>>) -> Self {
        App {
            specs,
            registry: Registry::new(),
            windows: HashMap::new(),
            pins: PinSchedule::new(),
            tray: Tray::new(),
            update_available: false,
        }
    }

    fn open_window(
        &mut self,
        spec: Rc<WindowSpec>,
        target: &EventLoopWindowTarget<UserEvent>,
        proxy: &EventLoopProxy<UserEvent>,
    ) {
        match OverlayWindow::create(spec.clone(), target, proxy.clone()) {
            Ok(overlay) => {
                let handle = overlay.id();
                self.pins.track(handle, Instant::now());
                if !self.registry.add(handle, spec) {
                    warn!(?handle, "window handle already registered");
                }
                self.windows.insert(handle, overlay);
            }
            Err(err) => {
                error!("failed to create overlay window: {err}");
                std::process::exit(1);
            }
        }
    }

    /// Tear down one window. Returns true when no windows remain.
    fn close_window(&mut self, handle: WindowId) -> bool {
        self.windows.remove(&handle);
        self.pins.untrack(&handle);
        self.registry.remove(handle);
        self.windows.is_empty()
    }

    /// Focus the live window for the spec, or re-open it from its original
    /// configuration if the user closed it.
    fn activate(
        &mut self,
        index: usize,
        target: &EventLoopWindowTarget<UserEvent>,
        proxy: &EventLoopProxy<UserEvent>,
    ) {
        let Some(spec) = self.specs.get(index).cloned() else {
            warn!(index, "menu activation for unknown spec");
            return;
        };
        let live = self.registry.find_by_spec(&spec).map(|entry| entry.handle);
        match live.and_then(|handle| self.windows.get(&handle)) {
            Some(window) => window.focus(),
            None => self.open_window(spec, target, proxy),
        }
    }
}

/// Run the overlay host until quit. Exits the process when the loop ends.
pub fn run(specs: Vec<Rc<WindowSpec>>) -> ! {
    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let menu_proxy = proxy.clone();
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        // Err means the loop is already gone; nothing to route the click to.
        let _ = menu_proxy.send_event(UserEvent::Menu(event.id().clone()));
    }));

    let mut app = App::new(specs);

    event_loop.run(move |event, target, control_flow| {
        match event {
            Event::NewEvents(StartCause::Init) => {
                for spec in app.specs.clone() {
                    app.open_window(spec, target, &proxy);
                }
                if let Err(err) = app.tray.rebuild(&app.specs, app.update_available) {
                    error!("failed to build tray icon: {err}");
                }
                update::spawn_check(proxy.clone());
            }

            Event::WindowEvent { window_id, event, .. } => match event {
                WindowEvent::Focused(focused) => {
                    if let Some(window) = app.windows.get_mut(&window_id) {
                        window.set_focused(focused);
                    }
                }
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    let all_closed = app.close_window(window_id);
                    // The tray stays resident on macOS with every window
                    // closed, matching platform convention.
                    if all_closed && !cfg!(target_os = "macos") {
                        info!("all windows closed, exiting");
                        *control_flow = ControlFlow::Exit;
                    }
                }
                _ => {}
            },

            Event::UserEvent(user_event) => match user_event {
                UserEvent::Menu(id) => match app.tray.action(&id).copied() {
                    Some(MenuAction::Activate(index)) => app.activate(index, target, &proxy),
                    Some(MenuAction::Homepage) => {
                        if let Err(err) = open::that(menu::HOMEPAGE_URL) {
                            warn!("failed to open homepage: {err}");
                        }
                    }
                    Some(MenuAction::Quit) => *control_flow = ControlFlow::Exit,
                    None => warn!(?id, "click on unknown menu item"),
                },
                UserEvent::Content { window, request } => match request {
                    ContentRequest::Config => {
                        if let Some(overlay) = app.windows.get(&window) {
                            overlay.send_config();
                        }
                    }
                    ContentRequest::Close => {
                        let all_closed = app.close_window(window);
                        if all_closed && !cfg!(target_os = "macos") {
                            info!("all windows closed, exiting");
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                },
                UserEvent::UpdateAvailable => {
                    if !app.update_available {
                        app.update_available = true;
                        info!("a newer release is available");
                        if let Err(err) = app.tray.rebuild(&app.specs, true) {
                            error!("failed to rebuild tray icon: {err}");
                        }
                    }
                }
            },

            _ => {}
        }

        if !matches!(*control_flow, ControlFlow::Exit | ControlFlow::ExitWithCode(_)) {
            let now = Instant::now();
            for handle in app.pins.due(now) {
                if let Some(window) = app.windows.get(&handle) {
                    window.raise();
                }
            }
            *control_flow = match app.pins.next_deadline() {
                Some(deadline) => ControlFlow::WaitUntil(deadline),
                None => ControlFlow::Wait,
            };
        }
    })
}
