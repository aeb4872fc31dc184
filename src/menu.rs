//! Pure model of the tray menu.
//!
//! The layout is a function of the configured specs and the update flag, so
//! the labels and ordering can be tested without touching the tray backend.
//! `tray.rs` renders this model with `tray-icon`.

use std::rc::Rc;

use crate::config::WindowSpec;

pub const HOMEPAGE_URL: &str = "https://github.com/hperrin/stream-overlay";
pub const UPDATE_SUFFIX: &str = " (Update Available)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Activates (focuses or re-opens) the window for spec `index`.
    Window { index: usize, label: String },
    Separator,
    Homepage { label: String },
    Quit,
}

/// Label for a window entry: its title, or a positional fallback.
pub fn window_label(title: &str, index: usize) -> String {
    if title.is_empty() {
        format!("Window {}", index + 1)
    } else {
        title.to_string()
    }
}

pub fn homepage_label(update_available: bool) -> String {
    if update_available {
        format!("Homepage{UPDATE_SUFFIX}")
    } else {
        "Homepage".to_string()
    }
}

/// Full menu: one entry per configured spec, then Homepage and Quit.
pub fn layout(specs: &[Rc<WindowSpec>], update_available: bool) -> Vec<MenuEntry> {
    let mut entries = Vec::with_capacity(specs.len() + 4);
    for (index, spec) in specs.iter().enumerate() {
        entries.push(MenuEntry::Window {
            index,
            label: window_label(&spec.title, index),
        });
    }
    entries.push(MenuEntry::Separator);
    entries.push(MenuEntry::Homepage {
        label: homepage_label(update_available),
    });
    entries.push(MenuEntry::Separator);
    entries.push(MenuEntry::Quit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(url: &str, title: &str) -> Rc<WindowSpec> {
        Rc::new(WindowSpec {
            url: url.to_string(),
            title: title.to_string(),
            width: 450,
            height: 650,
            x: -1,
            y: -1,
            opacity: 1.0,
            fullscreen: false,
        })
    }

    #[test]
    fn untitled_entries_get_positional_labels() {
        let specs = vec![spec("a.html", ""), spec("b.html", "Chat")];
        let entries = layout(&specs, false);

        assert_eq!(
            entries[0],
            MenuEntry::Window {
                index: 0,
                label: "Window 1".to_string()
            }
        );
        assert_eq!(
            entries[1],
            MenuEntry::Window {
                index: 1,
                label: "Chat".to_string()
            }
        );
    }

    #[test]
    fn layout_ends_with_homepage_and_quit() {
        let specs = vec![spec("a.html", "")];
        let entries = layout(&specs, false);

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[1], MenuEntry::Separator);
        assert_eq!(
            entries[2],
            MenuEntry::Homepage {
                label: "Homepage".to_string()
            }
        );
        assert_eq!(entries[3], MenuEntry::Separator);
        assert_eq!(entries[4], MenuEntry::Quit);
    }

    #[test]
    fn update_flag_suffixes_the_homepage_entry() {
        let specs = vec![spec("a.html", "")];
        let entries = layout(&specs, true);

        assert_eq!(
            entries[2],
            MenuEntry::Homepage {
                label: "Homepage (Update Available)".to_string()
            }
        );
    }

    #[test]
    fn layout_is_stable_across_calls() {
        let specs = vec![spec("a.html", ""), spec("b.html", "B")];
        assert_eq!(layout(&specs, false), layout(&specs, false));
    }
}
