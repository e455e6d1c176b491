use clap::Parser;
use trail_sim_core::{InstanceBuffer, ParticleField, PerspectiveCamera, TrailSettings, Vec3};

/// Pointer-trail simulation demo with a scripted pointer path
#[derive(Parser, Debug)]
#[command(name = "trail-demo")]
#[command(about = "Headless pointer-trail particle simulation demo", long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Frame delta ratio (1.0 = one 60 fps reference frame)
    #[arg(short, long, default_value_t = 1.0)]
    delta: f32,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Radius of the scripted pointer circle in pixels
    #[arg(short, long, default_value_t = 250.0)]
    radius: f32,

    /// Pointer angular speed in radians per frame
    #[arg(long, default_value_t = 0.05)]
    angular_speed: f32,

    /// Particle pool size
    #[arg(long, default_value_t = 100)]
    pool: usize,

    /// Spawn distance in world units (defaults to the tuning default)
    #[arg(long)]
    spawn_distance: Option<f32>,

    /// Load a settings preset from a JSON file (overrides --spawn-distance)
    #[arg(long)]
    preset: Option<String>,

    /// Report interval in frames
    #[arg(long, default_value_t = 60)]
    report_interval: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut settings = match &args.preset {
        Some(path) => match TrailSettings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Could not load preset {path}: {e}");
                std::process::exit(1);
            }
        },
        None => TrailSettings::default(),
    };
    if args.preset.is_none() {
        if let Some(distance) = args.spawn_distance {
            settings.spawn_distance = distance;
        }
    }

    let mut field = ParticleField::new(args.pool, settings);
    field.set_projector(Box::new(PerspectiveCamera::new(
        Vec3::new(0.0, 0.0, 20.0),
        Vec3::zeros(),
        45.0_f32.to_radians(),
        args.width / args.height,
    )));
    field.resize(args.width, args.height);

    let mut buffer = InstanceBuffer::new(args.pool);
    let center = (args.width / 2.0, args.height / 2.0);

    println!(
        "Simulating {} frames, pool {}, pointer circle r={}px",
        args.frames, args.pool, args.radius
    );

    let mut total_uploads = 0u32;
    for frame in 0..args.frames {
        let angle = frame as f32 * args.angular_speed;
        field.pointer_moved(
            center.0 + args.radius * angle.cos(),
            center.1 + args.radius * angle.sin(),
        );
        field.update(args.delta, &mut buffer);

        // The renderer would upload here; count and acknowledge
        if buffer.is_dirty() {
            total_uploads += 1;
            buffer.clear_dirty();
        }

        if frame % args.report_interval == 0 {
            let live = field.live_count();
            let mean_opacity = if live > 0 {
                field
                    .pool()
                    .iter()
                    .filter(|p| !p.is_dead())
                    .map(trail_sim_core::Particle::opacity)
                    .sum::<f32>()
                    / live as f32
            } else {
                0.0
            };
            println!(
                "frame {:5}  live {:3}/{}  mean opacity {:.3}  pointer target ({:6.2}, {:6.2})",
                frame,
                live,
                args.pool,
                mean_opacity,
                field.pointer_world_position().x,
                field.pointer_world_position().y,
            );
        }
    }

    println!(
        "Done: {} live particles at exit, {} buffer uploads over {} frames",
        field.live_count(),
        total_uploads,
        args.frames
    );
}
