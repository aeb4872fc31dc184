//! Per-window interactivity driven by OS focus.
//!
//! An overlay is click-through while unfocused so it never intercepts input
//! meant for the application underneath. Focusing it (tray activation or
//! taskbar, where shown) makes it interactive until it blurs again.

/// Whether the window currently receives mouse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interactivity {
    Interactive,
    ClickThrough,
}

/// Focus edge reported by the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    Focus,
    Blur,
}

impl Interactivity {
    pub fn initial(focused: bool) -> Self {
        if focused {
            Interactivity::Interactive
        } else {
            Interactivity::ClickThrough
        }
    }

    pub fn apply(self, event: FocusEvent) -> Self {
        match event {
            FocusEvent::Focus => Interactivity::Interactive,
            FocusEvent::Blur => Interactivity::ClickThrough,
        }
    }

    pub fn is_click_through(self) -> bool {
        matches!(self, Interactivity::ClickThrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_follows_focus() {
        assert_eq!(Interactivity::initial(true), Interactivity::Interactive);
        assert_eq!(Interactivity::initial(false), Interactivity::ClickThrough);
    }

    #[test]
    fn focus_makes_interactive_blur_makes_click_through() {
        let state = Interactivity::ClickThrough.apply(FocusEvent::Focus);
        assert_eq!(state, Interactivity::Interactive);
        assert!(!state.is_click_through());

        let state = state.apply(FocusEvent::Blur);
        assert_eq!(state, Interactivity::ClickThrough);
        assert!(state.is_click_through());
    }

    #[test]
    fn transitions_are_idempotent() {
        assert_eq!(
            Interactivity::Interactive.apply(FocusEvent::Focus),
            Interactivity::Interactive
        );
        assert_eq!(
            Interactivity::ClickThrough.apply(FocusEvent::Blur),
            Interactivity::ClickThrough
        );
    }
}
