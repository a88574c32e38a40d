//! Device profile
//!
//! Maps the viewport width to the default zoom. Nothing here is stored; the
//! value is recomputed whenever the viewer needs it.

/// Widths at or below this are phones
pub const PHONE_MAX_WIDTH: f64 = 480.0;

/// Widths at or below this count as mobile
pub const TABLET_MAX_WIDTH: f64 = 768.0;

/// Default zoom for `width` CSS pixels, in whole percent
pub fn scale_percent_for_width(width: f64) -> u16 {
    if width <= PHONE_MAX_WIDTH {
        90
    } else if width <= TABLET_MAX_WIDTH {
        100
    } else {
        120
    }
}

/// Default zoom for `width` CSS pixels, as a render scale
pub fn scale_for_width(width: f64) -> f64 {
    f64::from(scale_percent_for_width(width)) / 100.0
}
