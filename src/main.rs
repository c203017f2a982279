//! fivekit CLI - 5-axis toolpath conversion and generation
//!
//! Converts oriented G-code into five-axis motion, rescales existing files
//! and emits parametric test toolpaths.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fivekit::{
    convert_program, emitter_from_config, format_oriented_point, init_logging, load_parameters,
    rescale_filter_from_config, to_records, Config, ExtrusionGenerator, ExtrusionParameters,
    MeasurementSystem, MotionCommand, OrientedPoint, PrismWallGenerator, PrismWallParameters,
    SphereShellGenerator, SphereShellParameters,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fivekit")]
#[command(version = fivekit::VERSION)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
#[command(about = "5-axis kinematics toolkit", long_about = None)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert oriented G-code (X Y Z I J K) into five-axis motion
    Convert {
        /// Input G-code file
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rescale the X/Y/Z values of an existing G-code file
    Rescale {
        /// Input G-code file
        input: PathBuf,
        /// Output G-code file
        output: PathBuf,
        /// Factor applied to X, Y and Z
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        multiplier: Option<f64>,
        /// Source measurement system (metric|imperial)
        #[arg(long, requires = "to")]
        from: Option<MeasurementSystem>,
        /// Target measurement system (metric|imperial)
        #[arg(long, requires = "from")]
        to: Option<MeasurementSystem>,
    },
    /// Generate a parametric toolpath
    Generate {
        #[command(subcommand)]
        shape: Shape,
    },
}

#[derive(Subcommand)]
enum Shape {
    /// Square walls with the tool normal to each face
    Prism(GenerateArgs),
    /// Vertical column with a sideways extension printed tilted 90°
    Extrusion(GenerateArgs),
    /// Spherical shell printed along the sphere normal
    Sphere(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// JSON file with generator parameters (default: built-in values)
    #[arg(short, long)]
    params: Option<PathBuf>,
    /// Emit raw `G01 X Y Z I J K` lines instead of five-axis records
    #[arg(long)]
    raw: bool,
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Convert { input, output } => {
            convert_file(&config, &input, output.as_deref())?;
        }
        Commands::Rescale {
            input,
            output,
            multiplier,
            from,
            to,
        } => {
            let multiplier = match (multiplier, from, to) {
                (Some(m), _, _) => m,
                (None, Some(from), Some(to)) => {
                    tracing::info!("Converting lengths from {} to {}", from, to);
                    MeasurementSystem::conversion_factor(from, to)
                }
                _ => config.rescale.multiplier,
            };
            rescale_filter_from_config(&config, multiplier)
                .rescale_file(&input, &output)
                .with_context(|| format!("Failed to rescale {}", input.display()))?;
            tracing::info!("Rescaled {} to {}", input.display(), output.display());
        }
        Commands::Generate { shape } => {
            generate(&config, shape)?;
        }
    }

    Ok(())
}

fn convert_file(config: &Config, input: &Path, output: Option<&Path>) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let converted = convert_program(config, &text)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    write_output(output, &converted)
}

fn generate(config: &Config, shape: Shape) -> Result<()> {
    let (lines, output) = match shape {
        Shape::Prism(args) => {
            let params: PrismWallParameters = parameters(args.params.as_deref())?;
            let points = PrismWallGenerator::new(params).generate()?;
            (render_points(config, &points, args.raw)?, args.output)
        }
        Shape::Sphere(args) => {
            let params: SphereShellParameters = parameters(args.params.as_deref())?;
            let points = SphereShellGenerator::new(params).generate()?;
            (render_points(config, &points, args.raw)?, args.output)
        }
        Shape::Extrusion(args) => {
            if args.raw {
                anyhow::bail!("--raw is not supported by the extrusion generator");
            }
            let params: ExtrusionParameters = parameters(args.params.as_deref())?;
            let records = ExtrusionGenerator::new(params).generate()?;
            let emitter = emitter_from_config(config);
            let lines: Vec<String> = records.iter().map(|r| emitter.format(r)).collect();
            (lines, args.output)
        }
    };

    let mut text = lines.join("\n");
    text.push('\n');
    write_output(output.as_deref(), &text)
}

fn parameters<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => load_parameters(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display())),
        None => Ok(T::default()),
    }
}

fn render_points(config: &Config, points: &[OrientedPoint], raw: bool) -> Result<Vec<String>> {
    if raw {
        let decimals = config.output.oriented_decimals;
        return Ok(points
            .iter()
            .map(|p| format_oriented_point(p, decimals))
            .collect());
    }
    let emitter = emitter_from_config(config);
    let records = to_records(points, MotionCommand::Linear)?;
    Ok(records.iter().map(|r| emitter.format(r)).collect())
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
