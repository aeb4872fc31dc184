//! Tray icon and menu rendering.
//!
//! Renders the pure layout from `menu` with `tray-icon` and keeps a map from
//! menu-item ids to actions so clicks coming back through
//! `MenuEvent::set_event_handler` can be routed. The menu backend has no
//! in-place mutation worth the bookkeeping, so any change rebuilds the icon
//! wholesale.

use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Context, Result};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use crate::config::WindowSpec;
use crate::menu::{self, MenuEntry};

pub const TOOLTIP: &str = "Stream Overlay";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Focus or re-open the window for spec `index`.
    Activate(usize),
    Homepage,
    Quit,
}

pub struct Tray {
    icon: Option<TrayIcon>,
    actions: HashMap<MenuId, MenuAction>,
}

impl Tray {
    pub fn new() -> Self {
        Tray {
            icon: None,
            actions: HashMap::new(),
        }
    }

    /// Drop the current icon (if any) and build a fresh one from the layout.
    pub fn rebuild(&mut self, specs: &[Rc<WindowSpec>], update_available: bool) -> Result<()> {
        self.icon = None;
        self.actions.clear();

        let tray_menu = Menu::new();
        for entry in menu::layout(specs, update_available) {
            match entry {
                MenuEntry::Window { index, label } => {
                    let item = MenuItem::new(&label, true, None);
                    self.actions.insert(item.id().clone(), MenuAction::Activate(index));
                    tray_menu.append(&item).context("appending window entry")?;
                }
                MenuEntry::Separator => {
                    tray_menu
                        .append(&PredefinedMenuItem::separator())
                        .context("appending separator")?;
                }
                MenuEntry::Homepage { label } => {
                    let item = MenuItem::new(&label, true, None);
                    self.actions.insert(item.id().clone(), MenuAction::Homepage);
                    tray_menu.append(&item).context("appending homepage entry")?;
                }
                MenuEntry::Quit => {
                    let item = MenuItem::new("Quit", true, None);
                    self.actions.insert(item.id().clone(), MenuAction::Quit);
                    tray_menu.append(&item).context("appending quit entry")?;
                }
            }
        }

        let icon = TrayIconBuilder::new()
            .with_tooltip(TOOLTIP)
            .with_icon(tray_icon()?)
            .with_menu(Box::new(tray_menu))
            .build()
            .context("building tray icon")?;
        self.icon = Some(icon);
        Ok(())
    }

    pub fn action(&self, id: &MenuId) -> Option<&MenuAction> {
        self.actions.get(id)
    }
}

impl Default for Tray {
    fn default() -> Self {
        Self::new()
    }
}

/// Programmatic icon: a filled circle on a transparent square.
fn tray_icon() -> Result<Icon> {
    const SIZE: u32 = 22;
    let mut rgba = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    let center = (SIZE as f32 - 1.0) / 2.0;
    let radius = SIZE as f32 / 2.0 - 1.0;
    for y in 0..SIZE {
        for x in 0..SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            if (dx * dx + dy * dy).sqrt() <= radius {
                rgba.extend_from_slice(&[0x33, 0x99, 0xff, 0xff]);
            } else {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
    Icon::from_rgba(rgba, SIZE, SIZE).context("building tray icon bitmap")
}
