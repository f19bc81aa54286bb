// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! Analog and digital clock face rendering.
//!
//! [`ClockFace`] turns a [`TimeSample`] into drawing calls on any [`Canvas`]:
//! sixty graduation marks, twelve hour labels, three rotated hands and a hub,
//! or a centered `HH:MM:SSAM` readout in digital mode. Hosts own the drawing
//! surface and the redraw cadence; [`window::run`] is a ready-made desktop
//! host built on winit and pixels.
//!
//! ```
//! use clockface::{ClockConfig, ClockFace, DrawCommand, Meridiem, Scene, TimeSample, Viewport};
//!
//! let face = ClockFace::new(ClockConfig::default());
//! let mut scene = Scene::new();
//! face.render_frame(&mut scene, Viewport::square(300), TimeSample::new(3, 0, 0, Meridiem::Pm));
//!
//! let ticks = scene
//!     .commands()
//!     .iter()
//!     .filter(|c| matches!(c, DrawCommand::Line { .. }))
//!     .count();
//! assert_eq!(ticks, 60);
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod raster;
pub mod render;
pub mod schedule;
pub mod time;
pub mod window;

pub use canvas::{
    Canvas, DrawCommand, LineMetrics, Paint, PaintStyle, Scene, StrokeCap, TextAlign, TextSpan,
    VMetrics,
};
pub use config::{ClockConfig, Color, NeedleStyle};
pub use error::ClockError;
pub use geometry::{measure, Measured, Padding, Point, Rect, Viewport};
pub use raster::PixelCanvas;
pub use render::render_frame;
pub use schedule::{FrameTick, RedrawScheduler};
pub use time::{FixedClock, Meridiem, SystemClock, TimeSample, TimeSource};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Main clock face struct - the primary public interface
#[derive(Debug, Clone)]
pub struct ClockFace {
    config: ClockConfig,
    redraw_requested: bool,
}

impl ClockFace {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            redraw_requested: true,
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Replaces the whole configuration and asks the host for a new frame.
    pub fn set_config(&mut self, config: ClockConfig) {
        self.config = config;
        self.redraw_requested = true;
    }

    /// Switches between the analog face and the digital readout.
    pub fn set_mode(&mut self, show_analog: bool) {
        if self.config.show_analog != show_analog {
            log::debug!(
                "clock face switched to {} mode",
                if show_analog { "analog" } else { "digital" }
            );
        }
        self.config.show_analog = show_analog;
        self.redraw_requested = true;
    }

    pub fn is_analog_mode(&self) -> bool {
        self.config.show_analog
    }

    /// Returns whether a redraw was requested since the last call, and clears
    /// the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Largest square the face can use inside `available_*` minus `padding`.
    pub fn measure(available_width: i32, available_height: i32, padding: Padding) -> Measured {
        geometry::measure(available_width, available_height, padding)
    }

    /// Draws one frame for an explicit time.
    pub fn render_frame<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        viewport: Viewport,
        time: TimeSample,
    ) {
        render::render_frame(canvas, viewport, &self.config, time);
    }

    /// Draws one frame for whatever `source` reports right now.
    pub fn render_now<C, S>(&self, canvas: &mut C, viewport: Viewport, source: &S)
    where
        C: Canvas + ?Sized,
        S: TimeSource + ?Sized,
    {
        self.render_frame(canvas, viewport, source.now());
    }
}

impl Default for ClockFace {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TimeSample {
        TimeSample::new(9, 41, 7, Meridiem::Pm)
    }

    #[test]
    fn new_face_wants_a_first_frame() {
        let mut face = ClockFace::default();
        assert!(face.take_redraw_request());
        assert!(!face.take_redraw_request());
    }

    #[test]
    fn set_mode_toggles_and_requests_redraw() {
        let mut face = ClockFace::default();
        face.take_redraw_request();

        assert!(face.is_analog_mode());
        face.set_mode(false);
        assert!(!face.is_analog_mode());
        assert!(face.take_redraw_request());

        face.set_mode(true);
        assert!(face.is_analog_mode());
        assert!(face.take_redraw_request());
    }

    #[test]
    fn set_config_requests_redraw() {
        let mut face = ClockFace::default();
        face.take_redraw_request();
        let config = ClockConfig::builder().degrees_color(Color::BLACK).build();
        face.set_config(config.clone());
        assert_eq!(face.config(), &config);
        assert!(face.take_redraw_request());
    }

    #[test]
    fn measure_matches_geometry() {
        assert_eq!(ClockFace::measure(300, 200, Padding::default()).draw_size, 200);
        assert_eq!(ClockFace::measure(-1, 200, Padding::default()).draw_size, 0);
    }

    #[test]
    fn render_now_reads_the_source() {
        let face = ClockFace::default();
        let viewport = Viewport::square(240);

        let mut from_source = Scene::new();
        face.render_now(&mut from_source, viewport, &FixedClock(sample()));

        let mut explicit = Scene::new();
        face.render_frame(&mut explicit, viewport, sample());

        assert_eq!(from_source.commands(), explicit.commands());
    }

    #[test]
    fn mode_switch_changes_the_frame() {
        let mut face = ClockFace::default();
        let viewport = Viewport::square(240);

        let mut analog = Scene::new();
        face.render_frame(&mut analog, viewport, sample());

        face.set_mode(false);
        let mut digital = Scene::new();
        face.render_frame(&mut digital, viewport, sample());

        assert_eq!(digital.commands().len(), 1);
        assert!(analog.commands().len() > 60);
    }

    #[test]
    fn scene_replays_onto_pixels() {
        let face = ClockFace::default();
        let viewport = Viewport::square(64);
        let mut scene = Scene::new();
        face.render_frame(&mut scene, viewport, sample());

        let mut buf = vec![0u8; 64 * 64 * 4];
        let mut canvas = PixelCanvas::new(&mut buf, 64, 64);
        scene.replay(&mut canvas);
        // Hub sits on the center pixel.
        let [r, g, b, a] = canvas.pixel(32, 32).unwrap();
        assert_eq!(a, 255);
        assert!(r > 0 && g > 0 && b > 0);
    }
}
