// ============================================================================
// WINDOWED HOST
// ============================================================================
//
// Reference host for the clock face: a winit window, a pixels frame buffer
// and a `PixelCanvas` on top of it. The face itself never sees any of this.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bon::Builder;
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::canvas::Canvas;
use crate::config::Color;
use crate::error::ClockError;
use crate::geometry::{measure, Padding, Viewport};
use crate::raster::PixelCanvas;
use crate::schedule::{RedrawScheduler, DEFAULT_REDRAW_INTERVAL};
use crate::time::TimeSource;
use crate::ClockFace;

/// Places to look for a font when none is configured.
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone, Builder)]
pub struct WindowConfig {
    #[builder(default = "Clock".to_string())]
    pub title: String,
    #[builder(default = 600)]
    pub width: u32,
    #[builder(default = 600)]
    pub height: u32,
    #[builder(default = Color::BLACK)]
    pub background: Color,
    #[builder(default)]
    pub padding: Padding,
    /// Font for hour labels and the digital readout. Falls back to
    /// [`SYSTEM_FONT_PATHS`].
    pub font_path: Option<PathBuf>,
    #[builder(default = DEFAULT_REDRAW_INTERVAL)]
    pub redraw_interval: Duration,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// What the host does with a new surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceChange {
    /// The window was minimized or collapsed; keep the old buffer and stop
    /// drawing until a real size comes back.
    Collapsed,
    Resize { width: u32, height: u32 },
}

/// Classifies a resize event. pixels rejects zero-sized buffers, so a zero
/// side never reaches it.
pub fn surface_change(width: u32, height: u32) -> SurfaceChange {
    if width == 0 || height == 0 {
        SurfaceChange::Collapsed
    } else {
        SurfaceChange::Resize { width, height }
    }
}

/// Loads the font at `path`, or the first readable system font.
pub fn load_font(path: Option<&Path>) -> Result<Font<'static>, ClockError> {
    if let Some(path) = path {
        return read_font(path);
    }

    for candidate in SYSTEM_FONT_PATHS.iter().map(Path::new) {
        if !candidate.is_file() {
            continue;
        }
        match read_font(candidate) {
            Ok(font) => return Ok(font),
            Err(err) => log::debug!("skipping {}: {err}", candidate.display()),
        }
    }

    Err(ClockError::FontNotFound {
        searched: SYSTEM_FONT_PATHS.len(),
    })
}

fn read_font(path: &Path) -> Result<Font<'static>, ClockError> {
    let data = std::fs::read(path).map_err(|source| ClockError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    let font = Font::try_from_vec(data).ok_or_else(|| ClockError::FontParse {
        path: path.to_path_buf(),
    })?;
    log::info!("using font {}", path.display());
    Ok(font)
}

/// Opens a window and keeps the face on screen until it is closed.
pub fn run<S: TimeSource>(
    mut face: ClockFace,
    config: WindowConfig,
    source: S,
) -> Result<(), ClockError> {
    let font = load_font(config.font_path.as_deref())?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
        .build(&event_loop)?;
    let window = Arc::new(window);
    let window_handle = window.clone();

    let size = window.inner_size();
    let mut fb_width = size.width as usize;
    let mut fb_height = size.height as usize;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
    log::debug!("window created at {}x{}", size.width, size.height);

    let mut scheduler = RedrawScheduler::new(config.redraw_interval);
    let mut failure: Option<ClockError> = None;
    let mut collapsed = false;

    event_loop.run(|event, window_target| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                window_target.exit();
            }
            WindowEvent::Resized(new_size) => {
                match surface_change(new_size.width, new_size.height) {
                    SurfaceChange::Collapsed => {
                        log::debug!("surface collapsed, drawing suspended");
                        collapsed = true;
                        scheduler.pause();
                    }
                    SurfaceChange::Resize { width, height } => {
                        let resized = pixels
                            .resize_buffer(width, height)
                            .and_then(|()| pixels.resize_surface(width, height));
                        if let Err(err) = resized {
                            log::error!("resize to {width}x{height} failed: {err}");
                            failure = Some(err.into());
                            window_target.exit();
                            return;
                        }
                        fb_width = width as usize;
                        fb_height = height as usize;
                        collapsed = false;
                        scheduler.resume();
                    }
                }
            }
            WindowEvent::Occluded(hidden) => {
                if hidden {
                    scheduler.pause();
                } else if !collapsed {
                    scheduler.resume();
                }
            }
            WindowEvent::RedrawRequested => {
                let time = source.now();
                let measured = measure(fb_width as i32, fb_height as i32, config.padding);
                let viewport = Viewport::square(measured.draw_size);
                // Center the square in whatever the padding leaves over.
                let dx = config.padding.left.max(0)
                    + (fb_width as i32 - config.padding.horizontal() - measured.draw_size) / 2;
                let dy = config.padding.top.max(0)
                    + (fb_height as i32 - config.padding.vertical() - measured.draw_size) / 2;

                {
                    let mut canvas =
                        PixelCanvas::new(pixels.frame_mut(), fb_width, fb_height).with_font(&font);
                    canvas.clear(config.background);
                    canvas.translate(dx.max(0) as f32, dy.max(0) as f32);
                    face.render_frame(&mut canvas, viewport, time);
                }

                if let Err(err) = pixels.render() {
                    log::error!("frame render failed: {err}");
                    failure = Some(err.into());
                    window_target.exit();
                    return;
                }
                let tick = scheduler.frame_drawn(Instant::now());
                log::trace!("frame {} drawn for {time}", tick.index);
            }
            _ => {}
        },
        Event::AboutToWait => {
            if face.take_redraw_request() {
                scheduler.request_immediate();
            }
            if scheduler.is_due(Instant::now()) {
                window_handle.request_redraw();
            }
            let flow = match scheduler.next_deadline() {
                Some(deadline) => ControlFlow::WaitUntil(deadline),
                None => ControlFlow::Wait,
            };
            window_target.set_control_flow(flow);
        }
        _ => {}
    })?;

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
