//! Command-line surface.
//!
//! Running with no arguments loads `config.json` when present; passing any
//! argument describes a single window and bypasses the file.

use clap::Parser;

use crate::config::WindowSpec;

#[derive(Debug, Parser)]
#[command(
    name = "stream-overlay",
    version,
    about = "Always-on-top transparent overlay windows for streaming"
)]
pub struct Cli {
    /// URL to show in the overlay window
    #[arg(default_value = "./help.html")]
    pub url: String,

    /// Window title
    #[arg(short, long, default_value = "Stream Overlay")]
    pub title: String,

    /// Window width in pixels
    #[arg(short, long, default_value_t = 450)]
    pub width: u32,

    /// Window height in pixels
    #[arg(short = 'H', long, default_value_t = 650)]
    pub height: u32,

    /// Horizontal position, -1 to center
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub x: i32,

    /// Vertical position, -1 to center
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub y: i32,

    /// Window opacity from 0 to 1
    #[arg(short, long, default_value_t = 1.0)]
    pub opacity: f64,

    /// Cover the whole screen
    #[arg(short, long)]
    pub fullscreen: bool,
}

impl Cli {
    pub fn into_spec(self) -> WindowSpec {
        WindowSpec {
            url: self.url,
            title: self.title,
            width: self.width,
            height: self.height,
            x: self.x,
            y: self.y,
            opacity: self.opacity,
            fullscreen: self.fullscreen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn argument_definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let spec = Cli::try_parse_from(["stream-overlay"]).unwrap().into_spec();
        assert_eq!(spec.url, "./help.html");
        assert_eq!(spec.title, "Stream Overlay");
        assert_eq!(spec.width, 450);
        assert_eq!(spec.height, 650);
        assert_eq!(spec.x, -1);
        assert_eq!(spec.y, -1);
        assert_eq!(spec.opacity, 1.0);
        assert!(!spec.fullscreen);
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let spec = Cli::try_parse_from([
            "stream-overlay",
            "chat.html",
            "--title",
            "Chat",
            "--width",
            "300",
            "-H",
            "200",
            "--x",
            "10",
            "--y",
            "-1",
            "--opacity",
            "0.8",
            "--fullscreen",
        ])
        .unwrap()
        .into_spec();

        assert_eq!(spec.url, "chat.html");
        assert_eq!(spec.title, "Chat");
        assert_eq!(spec.width, 300);
        assert_eq!(spec.height, 200);
        assert_eq!(spec.x, 10);
        assert_eq!(spec.y, -1);
        assert_eq!(spec.opacity, 0.8);
        assert!(spec.fullscreen);
    }
}
