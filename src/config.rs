use bon::Builder;

/// Opacity used for emphasized tick marks and for every hour label.
pub const FULL_ALPHA: u8 = 255;
/// Opacity used for the remaining tick marks.
pub const CUSTOM_ALPHA: u8 = 140;

/// Tick stroke width as a fraction of the viewport width.
pub const DEGREE_STROKE_RATIO: f32 = 0.010;
/// Gap between the viewport edge and the outer end of a tick.
pub const TICK_OUTER_PADDING_RATIO: f32 = 0.01;
/// Gap between the viewport edge and the inner end of a tick.
pub const TICK_INNER_PADDING_RATIO: f32 = 0.05;

pub const HOUR_LABEL_SIZE_RATIO: f32 = 0.1;
/// Hour labels sit this fraction of the radius inside the rim.
pub const HOUR_LABEL_INSET_RATIO: f32 = 0.25;

pub const DIGITAL_TEXT_SIZE_RATIO: f32 = 0.2;
/// Relative size of the AM/PM suffix in digital mode.
pub const MERIDIEM_SIZE_RATIO: f32 = 0.3;

pub const CENTER_RADIUS_RATIO: f32 = 0.02;
pub const CENTER_STROKE_RATIO: f32 = 0.01;

/// Color representation for clock face elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const LIGHT_GRAY: Color = Color::new(0xcc, 0xcc, 0xcc);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal. The top byte is ignored.
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

/// Shape of one clock hand.
///
/// The hand spans from `radius / 6` below the center up to
/// `radius * 3 / 5 - tip_inset` above it, so a larger inset gives a shorter
/// reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedleStyle {
    /// Hand width as a fraction of the viewport width.
    pub width_ratio: f32,
    /// Pixels taken off the tip.
    pub tip_inset: f32,
}

impl NeedleStyle {
    pub const HOUR: NeedleStyle = NeedleStyle {
        width_ratio: 0.015,
        tip_inset: 100.0,
    };
    pub const MINUTE: NeedleStyle = NeedleStyle {
        width_ratio: 0.010,
        tip_inset: 30.0,
    };
    pub const SECOND: NeedleStyle = NeedleStyle {
        width_ratio: 0.005,
        tip_inset: 5.0,
    };
}

/// Everything a render pass needs besides the canvas, the viewport and the time.
///
/// A value of this type is never mutated while a frame is drawn; swap in a new
/// one through [`crate::ClockFace::set_config`] instead.
///
/// ```
/// use clockface::{ClockConfig, Color};
///
/// let config = ClockConfig::builder()
///     .show_analog(false)
///     .digital_color(Color::new(0x00, 0xff, 0x80))
///     .build();
/// assert!(!config.show_analog);
/// assert_eq!(config.seconds_needle_color, Color::LIGHT_GRAY);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ClockConfig {
    /// Analog face when `true`, digital readout when `false`.
    #[builder(default = true)]
    pub show_analog: bool,

    // Colors
    #[builder(default = Color::WHITE)]
    pub degrees_color: Color,
    #[builder(default = Color::WHITE)]
    pub hours_values_color: Color,
    #[builder(default = Color::WHITE)]
    pub hours_needle_color: Color,
    #[builder(default = Color::WHITE)]
    pub minutes_needle_color: Color,
    #[builder(default = Color::LIGHT_GRAY)]
    pub seconds_needle_color: Color,
    #[builder(default = Color::LIGHT_GRAY)]
    pub center_inner_color: Color,
    #[builder(default = Color::WHITE)]
    pub center_outer_color: Color,
    #[builder(default = Color::WHITE)]
    pub digital_color: Color,

    // Needles
    #[builder(default = NeedleStyle::HOUR)]
    pub hour_needle: NeedleStyle,
    #[builder(default = NeedleStyle::MINUTE)]
    pub minute_needle: NeedleStyle,
    #[builder(default = NeedleStyle::SECOND)]
    pub second_needle: NeedleStyle,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClockConfig {
    /// Same configuration with the display mode replaced.
    pub fn with_mode(self, show_analog: bool) -> Self {
        Self {
            show_analog,
            ..self
        }
    }
}
