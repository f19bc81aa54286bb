// ============================================================================
// SOFTWARE RASTERIZER
// ============================================================================
//
// `PixelCanvas` draws straight into an RGBA8 frame buffer such as the one
// handed out by `pixels::Pixels::frame_mut`. Every primitive is rasterized by
// sampling pixel centers against a distance function, which gives cheap
// anti-aliasing and makes rotated shapes no harder than upright ones.

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::canvas::{
    Canvas, LineMetrics, Paint, PaintStyle, StrokeCap, TextAlign, TextSpan, VMetrics,
};
use crate::config::Color;
use crate::geometry::{Point, Rect};

/// 2D affine transform `[a c e; b d f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translation(dx: f32, dy: f32) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::IDENTITY
        }
    }

    /// Clockwise rotation on a y-down surface about `pivot`.
    pub fn rotation(degrees: f32, pivot: Point) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: pivot.x - cos * pivot.x + sin * pivot.y,
            f: pivot.y - sin * pivot.x - cos * pivot.y,
        }
    }

    /// Transform that applies `inner` first, then `self`.
    pub fn then_inner(&self, inner: &Transform) -> Self {
        Self {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    pub fn map(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn invert(&self) -> Option<Transform> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    /// Uniform scale factor, exact for rotations and translations.
    fn scale(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

pub struct PixelCanvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    font: Option<&'a Font<'static>>,
    fallback_metrics: LineMetrics,
    current: Transform,
    stack: Vec<Transform>,
}

impl<'a> PixelCanvas<'a> {
    /// Wraps an RGBA8 frame of `width * height` pixels.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
            font: None,
            fallback_metrics: LineMetrics::default(),
            current: Transform::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn with_font(mut self, font: &'a Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn transform(&self) -> Transform {
        self.current
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// RGBA of one pixel, `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let px = self.frame.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let Some(dst) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r, color.g, color.b];
        for (d, s) in dst.iter_mut().zip(src) {
            *d = (s as f32 * a + *d as f32 * (1.0 - a)).round() as u8;
        }
        dst[3] = 0xff;
    }

    /// Pixel box covering `points` grown by `margin`, clipped to the frame.
    fn device_bounds(&self, points: &[Point], margin: f32) -> Option<(i32, i32, i32, i32)> {
        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let x0 = ((min_x - margin).floor() as i32).max(0);
        let y0 = ((min_y - margin).floor() as i32).max(0);
        let x1 = ((max_x + margin).ceil() as i32).min(self.width as i32 - 1);
        let y1 = ((max_y + margin).ceil() as i32).min(self.height as i32 - 1);
        (x0 <= x1 && y0 <= y1).then_some((x0, y0, x1, y1))
    }

    /// Fills every pixel whose center lies within `coverage` of a shape
    /// described in local (untransformed) coordinates.
    fn fill_local<F>(&mut self, local_bounds: [Point; 4], margin: f32, color: Color, alpha: f32, coverage: F)
    where
        F: Fn(Point) -> f32,
    {
        let Some(inverse) = self.current.invert() else {
            return;
        };
        let device = local_bounds.map(|p| self.current.map(p));
        let Some((x0, y0, x1, y1)) = self.device_bounds(&device, margin) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let local = inverse.map(Point::new(x as f32 + 0.5, y as f32 + 0.5));
                let aa = coverage(local);
                if aa > 0.01 {
                    self.set_pixel(x, y, color, aa * alpha);
                }
            }
        }
    }

    fn font_v_metrics(&self, size: f32) -> VMetrics {
        match self.font {
            Some(font) => {
                let v = font.v_metrics(Scale::uniform(size));
                VMetrics {
                    ascent: v.ascent,
                    descent: v.descent,
                }
            }
            None => self.fallback_metrics.at(size),
        }
    }

    /// Draws glyphs laid out from `origin` (on the baseline, device space).
    fn blit_glyphs(&mut self, glyphs: &[PositionedGlyph<'_>], color: Color, alpha: f32) {
        for glyph in glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                let mut hits = Vec::new();
                glyph.draw(|gx, gy, v| {
                    if v > 0.001 {
                        hits.push((bb.min.x + gx as i32, bb.min.y + gy as i32, v));
                    }
                });
                for (px, py, v) in hits {
                    self.set_pixel(px, py, color, v * alpha);
                }
            }
        }
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (lx, ly) = (a.x + t * dx, a.y + t * dy);
    ((p.x - lx).powi(2) + (p.y - ly).powi(2)).sqrt()
}

/// Signed distance to a flat-ended stroke of half-width `half` along
/// `a`-`b`, negative inside. Nothing extends past the endpoints.
fn butt_distance(p: Point, a: Point, b: Point, half: f32) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return f32::MAX;
    }
    let (ux, uy) = (dx / len, dy / len);
    let (px, py) = (p.x - (a.x + b.x) / 2.0, p.y - (a.y + b.y) / 2.0);
    let along = (px * ux + py * uy).abs() - len / 2.0;
    let across = (px * uy - py * ux).abs() - half;
    along.max(across)
}

/// Signed distance to a rounded rectangle, negative inside.
fn round_rect_distance(p: Point, rect: &Rect, rx: f32, ry: f32) -> f32 {
    let c = rect.center();
    let half_w = rect.width().abs() / 2.0;
    let half_h = rect.height().abs() / 2.0;
    let r = rx.min(ry).min(half_w).min(half_h).max(0.0);
    let qx = (p.x - c.x).abs() - (half_w - r);
    let qy = (p.y - c.y).abs() - (half_h - r);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - r
}

/// Pixel coverage for a signed distance, one pixel of feathering.
fn coverage(distance: f32) -> f32 {
    (0.5 - distance).clamp(0.0, 1.0)
}

impl Canvas for PixelCanvas<'_> {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(saved) = self.stack.pop() {
            self.current = saved;
        }
    }

    fn rotate(&mut self, degrees: f32, pivot: Point) {
        self.current = self.current.then_inner(&Transform::rotation(degrees, pivot));
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.current = self.current.then_inner(&Transform::translation(dx, dy));
    }

    fn draw_line(&mut self, from: Point, to: Point, paint: &Paint) {
        let half = paint.stroke_width.max(1.0) / 2.0;
        let bounds = [from, to, from, to];
        let cap = paint.stroke_cap;
        self.fill_local(bounds, half + 1.0, paint.color, paint.opacity(), |p| match cap {
            StrokeCap::Round => coverage(segment_distance(p, from, to) - half),
            StrokeCap::Butt => coverage(butt_distance(p, from, to, half)),
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        let stroke = paint.stroke_width.max(1.0);
        let extent = radius + stroke;
        let bounds = [
            Point::new(center.x - extent, center.y - extent),
            Point::new(center.x + extent, center.y - extent),
            Point::new(center.x - extent, center.y + extent),
            Point::new(center.x + extent, center.y + extent),
        ];
        let style = paint.style;
        self.fill_local(bounds, 1.0, paint.color, paint.opacity(), |p| {
            let dist = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
            match style {
                PaintStyle::Fill => coverage(dist - radius),
                PaintStyle::Stroke => coverage((dist - radius).abs() - stroke / 2.0),
                PaintStyle::FillAndStroke => coverage(dist - radius - stroke / 2.0),
            }
        });
    }

    fn draw_round_rect(&mut self, rect: Rect, rx: f32, ry: f32, paint: &Paint) {
        let grow = match paint.style {
            PaintStyle::Fill => 0.0,
            _ => paint.stroke_width / 2.0,
        };
        let bounds = [
            Point::new(rect.left - grow, rect.top - grow),
            Point::new(rect.right + grow, rect.top - grow),
            Point::new(rect.left - grow, rect.bottom + grow),
            Point::new(rect.right + grow, rect.bottom + grow),
        ];
        let style = paint.style;
        let stroke = paint.stroke_width.max(1.0);
        self.fill_local(bounds, 1.0, paint.color, paint.opacity(), |p| {
            let dist = round_rect_distance(p, &rect, rx, ry);
            match style {
                PaintStyle::Stroke => coverage(dist.abs() - stroke / 2.0),
                _ => coverage(dist - grow),
            }
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, paint: &Paint) {
        let Some(font) = self.font else {
            return;
        };
        let scale = Scale::uniform(paint.text_size * self.current.scale());
        let origin = self.current.map(origin);
        let width = text_width(font, text, scale);
        let x = match paint.text_align {
            TextAlign::Left => origin.x,
            TextAlign::Center => origin.x - width / 2.0,
            TextAlign::Right => origin.x - width,
        };
        let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(x, origin.y)).collect();
        self.blit_glyphs(&glyphs, paint.color, paint.opacity());
    }

    fn draw_text_block(&mut self, spans: &[TextSpan], center: Point, paint: &Paint) {
        let Some(font) = self.font else {
            return;
        };
        let base = paint.text_size * self.current.scale();
        let scales: Vec<Scale> = spans
            .iter()
            .map(|span| Scale::uniform(base * span.relative_size))
            .collect();

        let mut total_width = 0.0;
        let (mut ascent, mut descent) = (0.0f32, 0.0f32);
        for (span, scale) in spans.iter().zip(&scales) {
            total_width += text_width(font, &span.text, *scale);
            let v = font.v_metrics(*scale);
            ascent = ascent.max(v.ascent);
            descent = descent.min(v.descent);
        }

        let center = self.current.map(center);
        let top = center.y - (ascent - descent) / 2.0;
        let baseline = top + ascent;
        let mut x = center.x - total_width / 2.0;
        for (span, scale) in spans.iter().zip(scales) {
            let glyphs: Vec<PositionedGlyph> =
                font.layout(&span.text, scale, point(x, baseline)).collect();
            self.blit_glyphs(&glyphs, paint.color, paint.opacity());
            x += text_width(font, &span.text, scale);
        }
    }

    fn v_metrics(&self, size: f32) -> VMetrics {
        self.font_v_metrics(size)
    }
}

/// Advance width of `text`, kerning included.
fn text_width(font: &Font<'_>, text: &str, scale: Scale) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: usize, height: usize) -> Vec<u8> {
        vec![0; width * height * 4]
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[test]
    fn rotation_is_clockwise_on_screen() {
        // Twelve o'clock rotated by 90° lands on three o'clock.
        let t = Transform::rotation(90.0, Point::new(50.0, 50.0));
        assert!(close(t.map(Point::new(50.0, 10.0)), Point::new(90.0, 50.0)));
    }

    #[test]
    fn rotation_keeps_the_pivot() {
        let pivot = Point::new(12.0, 34.0);
        let t = Transform::rotation(37.0, pivot);
        assert!(close(t.map(pivot), pivot));
    }

    #[test]
    fn inverse_undoes_the_transform() {
        let t = Transform::rotation(33.0, Point::new(5.0, 7.0))
            .then_inner(&Transform::translation(3.0, -2.0));
        let inv = t.invert().unwrap();
        let p = Point::new(19.0, -4.0);
        assert!(close(inv.map(t.map(p)), p));
    }

    #[test]
    fn save_restore_round_trips_the_transform() {
        let mut buf = frame(4, 4);
        let mut canvas = PixelCanvas::new(&mut buf, 4, 4);
        canvas.save();
        canvas.rotate(45.0, Point::new(2.0, 2.0));
        assert_ne!(canvas.transform(), Transform::IDENTITY);
        canvas.restore();
        assert_eq!(canvas.transform(), Transform::IDENTITY);
        // Unbalanced restore is ignored.
        canvas.restore();
        assert_eq!(canvas.transform(), Transform::IDENTITY);
    }

    // ── primitives ────────────────────────────────────────────────────────

    #[test]
    fn clear_fills_every_pixel() {
        let mut buf = frame(3, 2);
        let mut canvas = PixelCanvas::new(&mut buf, 3, 2);
        canvas.clear(Color::new(1, 2, 3));
        assert_eq!(canvas.pixel(2, 1), Some([1, 2, 3, 255]));
        assert_eq!(canvas.pixel(3, 0), None);
    }

    #[test]
    fn filled_circle_covers_its_center_only() {
        let mut buf = frame(20, 20);
        let mut canvas = PixelCanvas::new(&mut buf, 20, 20);
        canvas.draw_circle(Point::new(10.0, 10.0), 3.0, &Paint::new(Color::WHITE));
        assert_eq!(canvas.pixel(10, 10), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn ring_leaves_the_middle_empty() {
        let mut buf = frame(40, 40);
        let mut canvas = PixelCanvas::new(&mut buf, 40, 40);
        let paint = Paint::new(Color::WHITE)
            .with_style(PaintStyle::Stroke)
            .with_stroke(2.0, StrokeCap::Butt);
        canvas.draw_circle(Point::new(20.0, 20.0), 10.0, &paint);
        assert_eq!(canvas.pixel(20, 20), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(29, 19), Some([255, 255, 255, 255]));
    }

    #[test]
    fn line_honours_paint_alpha() {
        let mut buf = frame(10, 10);
        let mut canvas = PixelCanvas::new(&mut buf, 10, 10);
        let paint = Paint::new(Color::WHITE)
            .with_stroke(3.0, StrokeCap::Round)
            .with_alpha(140);
        canvas.draw_line(Point::new(1.0, 5.5), Point::new(9.0, 5.5), &paint);
        let [r, _, _, a] = canvas.pixel(5, 5).unwrap();
        assert_eq!(r, 140);
        assert_eq!(a, 255);
    }

    #[test]
    fn butt_cap_stops_at_the_endpoint() {
        let white = Paint::new(Color::WHITE);
        let from = Point::new(3.0, 5.5);
        let to = Point::new(8.0, 5.5);

        let mut round_buf = frame(12, 12);
        let mut round = PixelCanvas::new(&mut round_buf, 12, 12);
        round.draw_line(from, to, &white.with_stroke(3.0, StrokeCap::Round));
        // Half a pixel before the start, still inside the round cap.
        assert_eq!(round.pixel(2, 5), Some([255, 255, 255, 255]));

        let mut butt_buf = frame(12, 12);
        let mut butt = PixelCanvas::new(&mut butt_buf, 12, 12);
        butt.draw_line(from, to, &white.with_stroke(3.0, StrokeCap::Butt));
        assert_eq!(butt.pixel(1, 5), Some([0, 0, 0, 0]));
        assert_eq!(butt.pixel(9, 5), Some([0, 0, 0, 0]));
        assert_eq!(butt.pixel(5, 5), Some([255, 255, 255, 255]));
        assert_eq!(butt.pixel(5, 7), Some([0, 0, 0, 0]));
    }

    #[test]
    fn rotated_round_rect_follows_the_transform() {
        let mut buf = frame(40, 40);
        let mut canvas = PixelCanvas::new(&mut buf, 40, 40);
        let paint = Paint::new(Color::WHITE);
        // Upright needle above the center, rotated to point at three o'clock.
        canvas.save();
        canvas.rotate(90.0, Point::new(20.0, 20.0));
        canvas.draw_round_rect(Rect::new(18.0, 4.0, 22.0, 20.0), 1.0, 1.0, &paint);
        canvas.restore();

        assert_eq!(canvas.pixel(30, 19), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(19, 10), Some([0, 0, 0, 0]));
    }

    #[test]
    fn drawing_off_frame_is_clipped() {
        let mut buf = frame(8, 8);
        let mut canvas = PixelCanvas::new(&mut buf, 8, 8);
        canvas.draw_circle(Point::new(-50.0, -50.0), 4.0, &Paint::new(Color::WHITE));
        canvas.draw_line(Point::new(-5.0, 4.0), Point::new(20.0, 4.0), &Paint::new(Color::WHITE));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn text_without_font_is_skipped() {
        let mut buf = frame(8, 8);
        let mut canvas = PixelCanvas::new(&mut buf, 8, 8);
        canvas.draw_text("12", Point::new(4.0, 4.0), &Paint::new(Color::WHITE));
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn fallback_metrics_without_font() {
        let mut buf = frame(1, 1);
        let canvas = PixelCanvas::new(&mut buf, 1, 1);
        let m = canvas.v_metrics(10.0);
        assert_eq!(m.ascent, 8.0);
        assert_eq!(m.descent, -2.0);
    }

    // ── distance helpers ──────────────────────────────────────────────────

    #[test]
    fn degenerate_segment_measures_to_its_point() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(segment_distance(p, Point::default(), Point::default()), 5.0);
    }

    #[test]
    fn butt_distance_is_a_box_along_the_segment() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(butt_distance(Point::new(5.0, 0.0), a, b, 2.0), -2.0);
        assert_eq!(butt_distance(Point::new(12.0, 0.0), a, b, 2.0), 2.0);
        assert_eq!(butt_distance(Point::new(5.0, 3.0), a, b, 2.0), 1.0);
        assert!(butt_distance(Point::new(1.0, 1.0), a, a, 2.0) > 0.0);
    }

    #[test]
    fn round_rect_distance_signs() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(round_rect_distance(Point::new(5.0, 5.0), &rect, 2.0, 2.0) < 0.0);
        assert!(round_rect_distance(Point::new(15.0, 5.0), &rect, 2.0, 2.0) > 0.0);
        // Rounded corner is carved away.
        assert!(round_rect_distance(Point::new(0.2, 0.2), &rect, 2.0, 2.0) > 0.0);
    }
}
