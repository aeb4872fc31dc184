//! Size validation and auto-centering for overlay windows.

use thiserror::Error;

use crate::config::WindowSpec;

pub const MIN_WIDTH: u32 = 45;
pub const MIN_HEIGHT: u32 = 30;

/// Sentinel coordinate meaning "center on the primary display".
pub const AUTO: i32 = -1;

/// A window below the minimum size. Startup-time configuration error, fatal.
#[derive(Debug, Error)]
#[error("window size {width}x{height} is below the minimum of {}x{}", MIN_WIDTH, MIN_HEIGHT)]
pub struct GeometryError {
    pub width: u32,
    pub height: u32,
}

pub fn validate_size(spec: &WindowSpec) -> Result<(), GeometryError> {
    if spec.width < MIN_WIDTH || spec.height < MIN_HEIGHT {
        return Err(GeometryError {
            width: spec.width,
            height: spec.height,
        });
    }
    Ok(())
}

/// Resolve the final position of a window against the primary display size.
///
/// Each axis that is `AUTO` centers independently; explicit coordinates pass
/// through verbatim. Centered coordinates are clamped at zero so a window
/// larger than the display still starts on-screen.
pub fn resolve_position(spec: &WindowSpec, display_width: u32, display_height: u32) -> (i32, i32) {
    let x = if spec.x == AUTO {
        center(display_width, spec.width)
    } else {
        spec.x
    };
    let y = if spec.y == AUTO {
        center(display_height, spec.height)
    } else {
        spec.y
    };
    (x, y)
}

fn center(display: u32, window: u32) -> i32 {
    // floor(display/2 - window/2) == (display - window) / 2 for the
    // non-negative case; negative results clamp to zero anyway.
    ((i64::from(display) - i64::from(window)) / 2).max(0) as i32
}
