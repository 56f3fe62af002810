//! Quiver CLI - Render self-contained animated SVG arrows.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use quiver::config::QuiverConfig;
use quiver::generators::{Arrow, ArrowGenerator, ArrowKind, VariantOptions};
use quiver::options::{ArrowOptions, Easing};
use quiver::rewrite::random_suffix;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "quiver")]
#[command(about = "Generate animated SVG arrows for web pages")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "quiver.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate a single arrow
    Generate {
        /// Arrow style
        #[arg(short, long, value_enum, default_value = "moving-flow")]
        kind: KindArg,

        /// right/left/up/down for flows, horizontal/vertical for spreads
        #[arg(short, long)]
        direction: Option<String>,

        #[arg(long, default_value_t = 100.0)]
        width: f64,

        #[arg(long, default_value_t = 100.0)]
        height: f64,

        /// Stroke color (e.g. "#0af", "red")
        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        stroke_width: Option<f64>,

        #[arg(short, long)]
        num_arrows: Option<usize>,

        /// Speed in px per second
        #[arg(long, conflicts_with = "duration")]
        speed: Option<f64>,

        /// Seconds per animation cycle
        #[arg(long)]
        duration: Option<f64>,

        /// linear, ease, ease-in, ease-out, ease-in-out or overshoot
        #[arg(long)]
        easing: Option<Easing>,

        /// Suffix appended to every id, class and keyframe name
        #[arg(long, conflicts_with = "random_id")]
        unique_id: Option<String>,

        /// Use a random suffix
        #[arg(long)]
        random_id: bool,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate every style and direction for comparison
    Showcase {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Generate the arrows listed in the config file
    Batch,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum KindArg {
    /// Chevrons travelling along the flow axis
    MovingFlow,
    /// Static chevrons with a sweeping highlight
    SpotlightFlow,
    /// Two groups bouncing away from the center
    BouncingSpread,
    /// Static spread with highlights sweeping outward
    SpotlightSpread,
}

impl KindArg {
    fn to_kind(self) -> ArrowKind {
        match self {
            KindArg::MovingFlow => ArrowKind::MovingFlow,
            KindArg::SpotlightFlow => ArrowKind::SpotlightFlow,
            KindArg::BouncingSpread => ArrowKind::BouncingSpread,
            KindArg::SpotlightSpread => ArrowKind::SpotlightSpread,
        }
    }

    fn name(self) -> &'static str {
        self.to_kind().as_str()
    }

    fn all() -> Vec<KindArg> {
        vec![
            KindArg::MovingFlow,
            KindArg::SpotlightFlow,
            KindArg::BouncingSpread,
            KindArg::SpotlightSpread,
        ]
    }
}

const SHOWCASE_SPEED: f64 = 50.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quiver=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = QuiverConfig::load(Path::new(&cli.config))?;

    match cli.command {
        Commands::Generate {
            kind,
            direction,
            width,
            height,
            color,
            stroke_width,
            num_arrows,
            speed,
            duration,
            easing,
            unique_id,
            random_id,
            output,
        } => {
            let mut options = ArrowOptions::new(width, height);
            if let Some(color) = color {
                options = options.with_color(color);
            }
            options.stroke_width = stroke_width;
            options.num_arrows = num_arrows;
            options.speed_in_px_per_second = speed;
            options.speed_in_duration_seconds = duration;
            options.animation_timing_function = easing;

            let direction =
                direction.unwrap_or_else(|| kind.to_kind().default_direction().to_string());
            let arrow = Arrow::build(
                kind.to_kind(),
                &options,
                &direction,
                &VariantOptions::default(),
            )
            .with_context(|| format!("invalid {} arrow", kind.name()))?;
            let unique_id = if random_id { Some(random_suffix()) } else { unique_id };

            let timing = arrow.generator().timing();
            info!(
                kind = kind.name(),
                direction = %direction,
                duration_s = timing.duration_seconds,
                speed_px_s = timing.speed_px_per_second,
                "generating arrow"
            );

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        fs::create_dir_all(parent)?;
                    }
                    arrow
                        .generator()
                        .save_to_file(&path, unique_id.as_deref())?;
                    info!("Saved to {}", path.display());
                }
                None => println!("{}", arrow.generate(unique_id.as_deref())?),
            }
        }

        Commands::Showcase { output_dir } => {
            let output_dir = output_dir
                .unwrap_or_else(|| PathBuf::from(&config.output.directory).join("showcase"));
            fs::create_dir_all(&output_dir)?;

            let options = ArrowOptions::new(100.0, 100.0).with_speed(SHOWCASE_SPEED);
            let mut fragments = Vec::new();

            for kind in KindArg::all() {
                for direction in kind.to_kind().directions() {
                    let arrow = Arrow::build(
                        kind.to_kind(),
                        &options,
                        direction,
                        &VariantOptions::default(),
                    )?;
                    // The stem doubles as the suffix so every fragment can share one page.
                    let stem = format!("{}_{}", kind.name(), direction);
                    let markup = arrow.generate(Some(stem.as_str()))?;

                    let filename = format!("{stem}.{}", arrow.generator().extension());
                    fs::write(output_dir.join(&filename), &markup)?;
                    info!("Created {}", filename);
                    fragments.push((stem, markup));
                }
            }

            let index = output_dir.join("index.html");
            fs::write(&index, showcase_page(&fragments))?;
            info!("Done! Showcase saved to {}", output_dir.display());
        }

        Commands::Batch => {
            if config.arrows.is_empty() {
                info!("No [[arrows]] in {}", cli.config.display());
                return Ok(());
            }

            let output_dir = PathBuf::from(&config.output.directory);
            fs::create_dir_all(&output_dir)?;

            for spec in &config.arrows {
                let arrow = spec
                    .build()
                    .with_context(|| format!("invalid arrow '{}'", spec.name))?;
                let filename = format!("{}.{}", spec.name, arrow.generator().extension());
                let path = output_dir.join(filename);
                arrow
                    .generator()
                    .save_to_file(&path, spec.unique_id.as_deref())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(kind = %arrow.kind(), "Created {}", path.display());
            }
        }
    }

    Ok(())
}

fn showcase_page(fragments: &[(String, String)]) -> String {
    let mut page = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>quiver showcase</title>\n</head>\n<body>\n",
    );
    for (stem, markup) in fragments {
        page.push_str(&format!("<figure>\n{markup}\n<figcaption>{stem}</figcaption>\n</figure>\n"));
    }
    page.push_str("</body>\n</html>\n");
    page
}
