// ============================================================================
// RENDERING AND DRAWING FUNCTIONS
// ============================================================================

use crate::canvas::{Canvas, Paint, PaintStyle, StrokeCap, TextAlign, TextSpan};
use crate::config::{
    ClockConfig, Color, NeedleStyle, CENTER_RADIUS_RATIO, CENTER_STROKE_RATIO,
    DEGREE_STROKE_RATIO, DIGITAL_TEXT_SIZE_RATIO, FULL_ALPHA, HOUR_LABEL_INSET_RATIO,
    HOUR_LABEL_SIZE_RATIO, MERIDIEM_SIZE_RATIO, TICK_INNER_PADDING_RATIO,
    TICK_OUTER_PADDING_RATIO,
};
use crate::geometry::{
    clockwise_point, hour_label, is_emphasized, polar_point, tick_alpha, tick_angles, Point,
    Rect, Viewport,
};
use crate::time::TimeSample;

/// Draws one complete frame of the clock face for `time`.
///
/// The output depends only on the arguments, so two calls with the same
/// inputs issue the same primitives. An empty viewport draws nothing.
pub fn render_frame<C: Canvas + ?Sized>(
    canvas: &mut C,
    viewport: Viewport,
    config: &ClockConfig,
    time: TimeSample,
) {
    if viewport.is_empty() {
        log::trace!("skipping frame for empty viewport");
        return;
    }

    if config.show_analog {
        draw_degrees(canvas, &viewport, config);
        draw_hours_values(canvas, &viewport, config);
        draw_needles(canvas, &viewport, config, time);
        draw_center(canvas, &viewport, config);
    } else {
        draw_digital(canvas, &viewport, config, time);
    }
}

/// The 60 graduation marks around the rim.
fn draw_degrees<C: Canvas + ?Sized>(canvas: &mut C, viewport: &Viewport, config: &ClockConfig) {
    let base = Paint::new(config.degrees_color)
        .with_style(PaintStyle::FillAndStroke)
        .with_stroke(viewport.scaled(DEGREE_STROKE_RATIO), StrokeCap::Round);

    let r_padded = viewport.center_x - viewport.scaled(TICK_OUTER_PADDING_RATIO) as i32;
    let r_end = viewport.center_x - viewport.scaled(TICK_INNER_PADDING_RATIO) as i32;

    for i in tick_angles() {
        let paint = base.with_alpha(tick_alpha(i));
        // Both ends are taken about center_x; the viewport is square.
        let start = polar_point(viewport.center_x, viewport.center_x, r_padded, i);
        let stop = polar_point(viewport.center_x, viewport.center_x, r_end, i);
        canvas.draw_line(start, stop, &paint);
    }
}

/// Hour numbers at every emphasized position.
fn draw_hours_values<C: Canvas + ?Sized>(
    canvas: &mut C,
    viewport: &Viewport,
    config: &ClockConfig,
) {
    let paint = Paint::new(config.hours_values_color)
        .with_alpha(FULL_ALPHA)
        .with_text(viewport.scaled(HOUR_LABEL_SIZE_RATIO), TextAlign::Center);
    let metrics = canvas.v_metrics(paint.text_size);

    let r_label = viewport.radius - (viewport.radius as f32 * HOUR_LABEL_INSET_RATIO) as i32;

    for i in tick_angles().filter(|&i| is_emphasized(i)) {
        let pos = clockwise_point(viewport.center_x, viewport.center_y, r_label, i);
        let origin = Point::new(pos.x, metrics.centered_baseline(pos.y));
        canvas.draw_text(hour_label(i), origin, &paint);
    }
}

fn draw_needles<C: Canvas + ?Sized>(
    canvas: &mut C,
    viewport: &Viewport,
    config: &ClockConfig,
    time: TimeSample,
) {
    let needles = [
        (
            time.hour_angle(),
            &config.hour_needle,
            config.hours_needle_color,
        ),
        (
            time.minute_angle(),
            &config.minute_needle,
            config.minutes_needle_color,
        ),
        (
            time.second_angle() as f32,
            &config.second_needle,
            config.seconds_needle_color,
        ),
    ];

    for (angle, style, color) in needles {
        draw_needle(canvas, viewport, angle, style, color);
    }
}

fn draw_needle<C: Canvas + ?Sized>(
    canvas: &mut C,
    viewport: &Viewport,
    angle: f32,
    style: &NeedleStyle,
    color: Color,
) {
    let rect = needle_rect(viewport, style);
    let corner = (viewport.radius / 5) as f32;
    let paint = Paint::new(color).with_style(PaintStyle::FillAndStroke);

    canvas.save();
    canvas.rotate(angle, viewport.center());
    canvas.draw_round_rect(rect, corner, corner, &paint);
    canvas.restore();
}

/// Unrotated hand pointing at twelve o'clock.
pub fn needle_rect(viewport: &Viewport, style: &NeedleStyle) -> Rect {
    let cx = viewport.center_x as f32;
    let cy = viewport.center_y as f32;
    let half_width = viewport.scaled(style.width_ratio) / 2.0;
    let reach = (viewport.radius * 3 / 5) as f32;
    let top = (cy - reach + style.tip_inset).min(cy);
    let bottom = (viewport.center_y + viewport.radius / 6) as f32;

    Rect::new(cx - half_width, top, cx + half_width, bottom)
}

/// Hub: a filled disc with a ring of the same radius on top.
fn draw_center<C: Canvas + ?Sized>(canvas: &mut C, viewport: &Viewport, config: &ClockConfig) {
    let center = viewport.center();
    let radius = viewport.scaled(CENTER_RADIUS_RATIO);

    let fill = Paint::new(config.center_inner_color).with_style(PaintStyle::Fill);
    canvas.draw_circle(center, radius, &fill);

    let ring = Paint::new(config.center_outer_color)
        .with_style(PaintStyle::Stroke)
        .with_stroke(viewport.scaled(CENTER_STROKE_RATIO), StrokeCap::Butt);
    canvas.draw_circle(center, radius, &ring);
}

fn draw_digital<C: Canvas + ?Sized>(
    canvas: &mut C,
    viewport: &Viewport,
    config: &ClockConfig,
    time: TimeSample,
) {
    let paint = Paint::new(config.digital_color)
        .with_text(viewport.scaled(DIGITAL_TEXT_SIZE_RATIO), TextAlign::Center);
    let spans = [
        TextSpan::new(time.digits(), 1.0),
        TextSpan::new(time.meridiem().as_str(), MERIDIEM_SIZE_RATIO),
    ];
    canvas.draw_text_block(&spans, viewport.center(), &paint);
}
