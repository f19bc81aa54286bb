//! Screen-space geometry for the clock face: the square viewport, the measure
//! pass and the angle conventions.
//!
//! Two angle conventions coexist here. Tick marks use math convention
//! (counter-clockwise from east, y flipped onto the screen), while needles are
//! drawn by rotating the canvas clockwise from twelve o'clock. Both are kept
//! as they are; unifying them would move the needles.

/// Degrees between two neighbouring tick marks.
pub const TICK_STEP_DEGREES: i32 = 6;
/// Number of tick marks around the dial.
pub const TICK_COUNT: usize = 60;

const FULL_ANGLE: i32 = 360;
const RIGHT_ANGLE: i32 = 90;
const FIVE_MINUTES: i32 = 15;

/// Hour labels in clockwise order starting at one o'clock.
pub const HOUR_LABELS: [&str; 12] = [
    "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12",
];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its edges, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// Padding around the clock face, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const fn uniform(px: i32) -> Self {
        Self {
            left: px,
            top: px,
            right: px,
            bottom: px,
        }
    }

    /// Left plus right; negative sides count as zero.
    pub fn horizontal(&self) -> i32 {
        self.left.max(0).saturating_add(self.right.max(0))
    }

    /// Top plus bottom; negative sides count as zero.
    pub fn vertical(&self) -> i32 {
        self.top.max(0).saturating_add(self.bottom.max(0))
    }
}

/// Result of a measure pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measured {
    /// Side of the square the face is drawn into.
    pub draw_size: i32,
    /// Total width including horizontal padding.
    pub width: i32,
    /// Total height including vertical padding.
    pub height: i32,
}

/// Fits the largest square into the padded region.
///
/// Negative or too-small regions measure as an empty square; padding is
/// still reported around it. Negative padding is treated as none.
pub fn measure(available_width: i32, available_height: i32, padding: Padding) -> Measured {
    let inner_width = available_width.saturating_sub(padding.horizontal());
    let inner_height = available_height.saturating_sub(padding.vertical());
    let draw_size = inner_width.min(inner_height).max(0);

    Measured {
        draw_size,
        width: draw_size.saturating_add(padding.horizontal()),
        height: draw_size.saturating_add(padding.vertical()),
    }
}

/// The square region a frame is drawn into.
///
/// Center and radius are derived with integer halving so that all three are
/// equal, matching a face letterboxed into the top-left of its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
}

impl Viewport {
    /// Viewport for a drawable surface of the given size.
    pub fn from_surface(width: i32, height: i32) -> Self {
        Self::square(width.min(height))
    }

    pub fn square(size: i32) -> Self {
        let width = size.max(0);
        let half = width / 2;
        Self {
            width,
            center_x: half,
            center_y: half,
            radius: half,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x as f32, self.center_y as f32)
    }

    /// `ratio` of the viewport width, in pixels.
    pub fn scaled(&self, ratio: f32) -> f32 {
        self.width as f32 * ratio
    }
}

/// Tick angles in degrees, 0 through 354.
pub fn tick_angles() -> impl Iterator<Item = i32> {
    (0..FULL_ANGLE).step_by(TICK_STEP_DEGREES as usize)
}

/// Whether the tick at `degrees` is drawn bold and carries an hour label.
///
/// Every multiple of 90 is also a multiple of 15, so the first branch never
/// changes the outcome. It is kept to mirror the established rule.
pub fn is_emphasized(degrees: i32) -> bool {
    degrees % RIGHT_ANGLE == 0 || degrees % FIVE_MINUTES == 0
}

pub fn tick_alpha(degrees: i32) -> u8 {
    if is_emphasized(degrees) {
        crate::config::FULL_ALPHA
    } else {
        crate::config::CUSTOM_ALPHA
    }
}

/// Label for an emphasized tick. East (0°) maps to three o'clock.
pub fn hour_label(degrees: i32) -> &'static str {
    HOUR_LABELS[((degrees / 30 + 2) % 12) as usize]
}

/// Point `radius` away from the center in math convention (y up), snapped to
/// whole pixels by truncation.
pub fn polar_point(center_x: i32, center_y: i32, radius: i32, degrees: i32) -> Point {
    let rad = (degrees as f64).to_radians();
    let x = (center_x as f64 + radius as f64 * rad.cos()) as i32;
    let y = (center_y as f64 - radius as f64 * rad.sin()) as i32;
    Point::new(x as f32, y as f32)
}

/// Point `radius` away from the center with y growing downwards, so angles
/// advance clockwise on screen.
pub fn clockwise_point(center_x: i32, center_y: i32, radius: i32, degrees: i32) -> Point {
    let rad = (degrees as f64).to_radians();
    let x = (center_x as f64 + radius as f64 * rad.cos()) as i32;
    let y = (center_y as f64 + radius as f64 * rad.sin()) as i32;
    Point::new(x as f32, y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── measure ───────────────────────────────────────────────────────────

    #[test]
    fn measure_fits_the_smaller_side() {
        let m = measure(300, 200, Padding::default());
        assert_eq!(m.draw_size, 200);
        assert_eq!((m.width, m.height), (200, 200));
    }

    #[test]
    fn measure_keeps_padding_around_the_square() {
        let padding = Padding {
            left: 10,
            top: 5,
            right: 20,
            bottom: 15,
        };
        let m = measure(300, 200, padding);
        assert_eq!(m.draw_size, 180);
        assert_eq!(m.width, 210);
        assert_eq!(m.height, 200);
    }

    #[test]
    fn measure_clamps_empty_and_negative_regions() {
        assert_eq!(measure(0, 200, Padding::default()).draw_size, 0);
        assert_eq!(measure(-50, 200, Padding::default()).draw_size, 0);
        assert_eq!(measure(10, 10, Padding::uniform(8)).draw_size, 0);
    }

    #[test]
    fn measure_ignores_negative_padding() {
        let m = measure(100, 100, Padding::uniform(-10));
        assert_eq!(m.draw_size, 100);
        assert_eq!((m.width, m.height), (100, 100));
    }

    #[test]
    fn measure_saturates_huge_padding() {
        let padding = Padding {
            left: i32::MAX,
            top: 0,
            right: 1,
            bottom: 0,
        };
        assert_eq!(padding.horizontal(), i32::MAX);
        let m = measure(300, 200, padding);
        assert_eq!(m.draw_size, 0);
        assert_eq!(m.width, i32::MAX);
        assert_eq!(m.height, 0);
    }

    // ── viewport ──────────────────────────────────────────────────────────

    #[test]
    fn viewport_center_equals_radius() {
        let vp = Viewport::from_surface(401, 600);
        assert_eq!(vp.width, 401);
        assert_eq!(vp.center_x, 200);
        assert_eq!(vp.center_y, 200);
        assert_eq!(vp.radius, 200);
    }

    #[test]
    fn viewport_negative_is_empty() {
        let vp = Viewport::from_surface(-3, 100);
        assert_eq!(vp.width, 0);
        assert!(vp.is_empty());
    }

    // ── ticks and labels ──────────────────────────────────────────────────

    #[test]
    fn sixty_ticks_six_degrees_apart() {
        let angles: Vec<i32> = tick_angles().collect();
        assert_eq!(angles.len(), TICK_COUNT);
        assert_eq!(angles.first(), Some(&0));
        assert_eq!(angles.last(), Some(&354));
    }

    #[test]
    fn tick_alpha_follows_emphasis_rule() {
        for i in tick_angles() {
            let expected = if i % 90 == 0 || i % 15 == 0 { 255 } else { 140 };
            assert_eq!(tick_alpha(i), expected, "tick at {i}°");
        }
    }

    #[test]
    fn emphasis_selects_one_tick_per_thirty_degrees() {
        let selected: Vec<i32> = tick_angles().filter(|&i| is_emphasized(i)).collect();
        assert_eq!(selected.len(), 12);
        assert!(selected.iter().all(|i| i % 30 == 0));
    }

    #[test]
    fn labels_run_clockwise_from_three() {
        let labels: Vec<&str> = tick_angles()
            .filter(|&i| is_emphasized(i))
            .map(hour_label)
            .collect();
        assert_eq!(hour_label(0), "03");
        assert_eq!(hour_label(90), "06");
        assert_eq!(hour_label(270), "12");
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, HOUR_LABELS.to_vec());
    }

    #[test]
    fn polar_point_flips_y_for_math_angles() {
        let top = polar_point(100, 100, 50, 90);
        assert_eq!(top, Point::new(100.0, 50.0));
        let east = polar_point(100, 100, 50, 0);
        assert_eq!(east, Point::new(150.0, 100.0));
    }

    #[test]
    fn clockwise_point_grows_downwards() {
        let bottom = clockwise_point(100, 100, 50, 90);
        assert_eq!(bottom, Point::new(100.0, 150.0));
    }

    #[test]
    fn rect_center_and_extent() {
        let r = Rect::new(10.0, 20.0, 30.0, 60.0);
        assert_eq!(r.width(), 20.0);
        assert_eq!(r.height(), 40.0);
        assert_eq!(r.center(), Point::new(20.0, 40.0));
    }
}
