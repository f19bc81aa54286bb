// ============================================================================
// DRAWING SURFACE CONTRACT
// ============================================================================

use crate::config::{Color, FULL_ALPHA};
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
    FillAndStroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How a primitive is colored and outlined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: u8,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub stroke_cap: StrokeCap,
    pub text_size: f32,
    pub text_align: TextAlign,
}

impl Paint {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            alpha: FULL_ALPHA,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            stroke_cap: StrokeCap::Butt,
            text_size: 12.0,
            text_align: TextAlign::Left,
        }
    }

    pub fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }

    pub fn with_style(self, style: PaintStyle) -> Self {
        Self { style, ..self }
    }

    pub fn with_stroke(self, width: f32, cap: StrokeCap) -> Self {
        Self {
            stroke_width: width,
            stroke_cap: cap,
            ..self
        }
    }

    pub fn with_text(self, size: f32, align: TextAlign) -> Self {
        Self {
            text_size: size,
            text_align: align,
            ..self
        }
    }

    /// Alpha as a 0..=1 coverage multiplier.
    pub fn opacity(&self) -> f32 {
        self.alpha as f32 / 255.0
    }
}

/// One run of a text block, scaled relative to the block's base size.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub relative_size: f32,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, relative_size: f32) -> Self {
        Self {
            text: text.into(),
            relative_size,
        }
    }
}

/// Vertical font metrics at one size, y growing upwards from the baseline:
/// `ascent` is positive, `descent` negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl VMetrics {
    pub fn height(&self) -> f32 {
        self.ascent - self.descent
    }

    /// Baseline that centers a line of text vertically on `y`.
    pub fn centered_baseline(&self, y: f32) -> f32 {
        y + (self.ascent + self.descent) / 2.0
    }
}

/// Size-independent font proportions, used where no real font is loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent_ratio: f32,
    pub descent_ratio: f32,
}

impl Default for LineMetrics {
    fn default() -> Self {
        Self {
            ascent_ratio: 0.8,
            descent_ratio: -0.2,
        }
    }
}

impl LineMetrics {
    pub fn at(&self, size: f32) -> VMetrics {
        VMetrics {
            ascent: self.ascent_ratio * size,
            descent: self.descent_ratio * size,
        }
    }
}

/// A 2D drawing surface with a save/rotate/restore transform stack.
///
/// Rotation is clockwise-positive on a y-down surface. Transforms apply to
/// every primitive drawn after them until the matching `restore`.
pub trait Canvas {
    fn save(&mut self);
    /// Pops the last `save`. Does nothing when the stack is empty.
    fn restore(&mut self);
    fn rotate(&mut self, degrees: f32, pivot: Point);
    fn translate(&mut self, dx: f32, dy: f32);

    fn draw_line(&mut self, from: Point, to: Point, paint: &Paint);
    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint);
    fn draw_round_rect(&mut self, rect: Rect, rx: f32, ry: f32, paint: &Paint);
    /// Draws one run with its baseline at `origin.y`, aligned on `origin.x`
    /// according to `paint.text_align`.
    fn draw_text(&mut self, text: &str, origin: Point, paint: &Paint);
    /// Lays the spans out on one shared baseline and centers the whole line
    /// on `center`. Span sizes are `paint.text_size * span.relative_size`.
    fn draw_text_block(&mut self, spans: &[TextSpan], center: Point, paint: &Paint);

    fn v_metrics(&self, size: f32) -> VMetrics;
}

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Rotate {
        degrees: f32,
        pivot: Point,
    },
    Translate {
        dx: f32,
        dy: f32,
    },
    Line {
        from: Point,
        to: Point,
        paint: Paint,
    },
    Circle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    RoundRect {
        rect: Rect,
        rx: f32,
        ry: f32,
        paint: Paint,
    },
    Text {
        text: String,
        origin: Point,
        paint: Paint,
    },
    TextBlock {
        spans: Vec<TextSpan>,
        center: Point,
        paint: Paint,
    },
}

/// Canvas that records what is drawn on it.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
    metrics: LineMetrics,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Plays every recorded command onto `canvas`, in order.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for command in &self.commands {
            match command {
                DrawCommand::Save => canvas.save(),
                DrawCommand::Restore => canvas.restore(),
                DrawCommand::Rotate { degrees, pivot } => canvas.rotate(*degrees, *pivot),
                DrawCommand::Translate { dx, dy } => canvas.translate(*dx, *dy),
                DrawCommand::Line { from, to, paint } => canvas.draw_line(*from, *to, paint),
                DrawCommand::Circle {
                    center,
                    radius,
                    paint,
                } => canvas.draw_circle(*center, *radius, paint),
                DrawCommand::RoundRect {
                    rect,
                    rx,
                    ry,
                    paint,
                } => canvas.draw_round_rect(*rect, *rx, *ry, paint),
                DrawCommand::Text {
                    text,
                    origin,
                    paint,
                } => canvas.draw_text(text, *origin, paint),
                DrawCommand::TextBlock {
                    spans,
                    center,
                    paint,
                } => canvas.draw_text_block(spans, *center, paint),
            }
        }
    }
}

impl Canvas for Scene {
    fn save(&mut self) {
        self.add_command(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.add_command(DrawCommand::Restore);
    }

    fn rotate(&mut self, degrees: f32, pivot: Point) {
        self.add_command(DrawCommand::Rotate { degrees, pivot });
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.add_command(DrawCommand::Translate { dx, dy });
    }

    fn draw_line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.add_command(DrawCommand::Line {
            from,
            to,
            paint: *paint,
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        self.add_command(DrawCommand::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn draw_round_rect(&mut self, rect: Rect, rx: f32, ry: f32, paint: &Paint) {
        self.add_command(DrawCommand::RoundRect {
            rect,
            rx,
            ry,
            paint: *paint,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, paint: &Paint) {
        self.add_command(DrawCommand::Text {
            text: text.to_string(),
            origin,
            paint: *paint,
        });
    }

    fn draw_text_block(&mut self, spans: &[TextSpan], center: Point, paint: &Paint) {
        self.add_command(DrawCommand::TextBlock {
            spans: spans.to_vec(),
            center,
            paint: *paint,
        });
    }

    fn v_metrics(&self, size: f32) -> VMetrics {
        self.metrics.at(size)
    }
}
