use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clockface::logging::{init_logging, LoggingConfig};
use clockface::window::{self, WindowConfig};
use clockface::{ClockConfig, ClockFace, Color, Padding, SystemClock};

/// Parses `#RRGGBB`, `0xRRGGBB` or bare `RRGGBB`.
fn parse_color(value: &str) -> anyhow::Result<Color> {
    let hex = value
        .strip_prefix('#')
        .or_else(|| value.strip_prefix("0x"))
        .unwrap_or(value);
    anyhow::ensure!(hex.len() == 6, "expected six hex digits, got {value:?}");
    let rgb = u32::from_str_radix(hex, 16).with_context(|| format!("invalid color {value:?}"))?;
    Ok(Color::from_rgb_u32(rgb))
}

fn main() -> anyhow::Result<()> {
    let verbose = env::args().skip(1).any(|arg| arg == "--verbose");
    init_logging(LoggingConfig::verbose(verbose));

    let mut show_analog = true;
    let mut size = 600u32;
    let mut padding = 0i32;
    let mut font_path: Option<PathBuf> = None;
    let mut window_title = "Clock".to_string();
    let mut background = Color::BLACK;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--digital" => show_analog = false,
            "--verbose" => {}
            "--size" => {
                let value = args.next().context("--size needs a pixel count")?;
                size = value
                    .parse()
                    .with_context(|| format!("invalid --size {value:?}"))?;
            }
            "--padding" => {
                let value = args.next().context("--padding needs a pixel count")?;
                padding = value
                    .parse()
                    .with_context(|| format!("invalid --padding {value:?}"))?;
            }
            "--font" => {
                font_path = Some(args.next().context("--font needs a path")?.into());
            }
            "--title" => {
                window_title = args.next().context("--title needs a value")?;
            }
            "--background" => {
                let value = args.next().context("--background needs a color")?;
                background = parse_color(&value)?;
            }
            other => log::warn!("ignoring unknown argument {other:?}"),
        }
    }

    let face = ClockFace::new(ClockConfig::builder().show_analog(show_analog).build());
    let config = WindowConfig::builder()
        .title(window_title)
        .width(size)
        .height(size)
        .padding(Padding::uniform(padding))
        .background(background)
        .maybe_font_path(font_path)
        .build();

    window::run(face, config, SystemClock::new()).context("clock window failed")?;
    Ok(())
}
