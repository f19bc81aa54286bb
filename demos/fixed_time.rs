use clockface::logging::{init_logging, LoggingConfig};
use clockface::{
    ClockConfig, ClockFace, Color, DrawCommand, FixedClock, Meridiem, Scene, TimeSample, Viewport,
};

fn main() {
    init_logging(LoggingConfig::default());

    // Build a face with the bon-generated builder
    let config = ClockConfig::builder()
        .seconds_needle_color(Color::new(0xff, 0x40, 0x40))
        .center_inner_color(Color::new(0xff, 0x40, 0x40))
        .build();
    let mut face = ClockFace::new(config);
    let clock = FixedClock(TimeSample::new(10, 8, 42, Meridiem::Am));
    let viewport = Viewport::square(480);

    let mut scene = Scene::new();
    face.render_now(&mut scene, viewport, &clock);

    println!("Analog face at {} ({} commands):", clock.0, scene.commands().len());
    for command in scene.commands() {
        match command {
            DrawCommand::Rotate { degrees, .. } => println!("  rotate {degrees:>6.1}°"),
            DrawCommand::Text { text, origin, .. } => {
                println!("  label  {text} at ({:.0}, {:.0})", origin.x, origin.y)
            }
            DrawCommand::RoundRect { rect, .. } => println!(
                "  needle {:.1}px wide, {:.0}px long",
                rect.width(),
                rect.height()
            ),
            _ => {}
        }
    }

    face.set_mode(false);
    scene.clear();
    face.render_now(&mut scene, viewport, &clock);
    println!("Digital face: {:?}", scene.commands());
}
