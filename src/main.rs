use anyhow::Context;
use clap::{Parser, ValueEnum};
use dd2wall::Config;
use dd2wall::pipeline::{Stage, convert};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Turn the line-of-sight walls of a dd2vtt scene into a printable wall mesh.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Input dd2vtt file. Outputs are written next to it.
    input: PathBuf,

    /// JSON config file. Flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simplification tolerance in grid units. Larger removes more wall points.
    #[arg(short, long)]
    epsilon: Option<f64>,

    #[arg(long)]
    scale_x: Option<f64>,

    #[arg(long)]
    scale_y: Option<f64>,

    /// Extrusion height of the walls.
    #[arg(long)]
    height: Option<f64>,

    #[arg(long)]
    wall_width: Option<f64>,

    /// OpenSCAD executable.
    #[arg(long)]
    openscad: Option<PathBuf>,

    /// MeshLab server executable.
    #[arg(long)]
    meshlabserver: Option<PathBuf>,

    /// Directory containing dotSCAD's polyline2d.scad.
    #[arg(long)]
    dotscad_path: Option<PathBuf>,

    /// Keep the .scad and .stl files after the .obj is written.
    #[arg(short, long)]
    keep_intermediates: bool,

    /// Last file to produce. `scad` needs no external tools.
    #[arg(long, value_enum, default_value_t = StopAfter::Obj)]
    stop_after: StopAfter,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StopAfter {
    Scad,
    Stl,
    Obj,
}

impl From<StopAfter> for Stage {
    fn from(s: StopAfter) -> Self {
        match s {
            StopAfter::Scad => Stage::Scad,
            StopAfter::Stl => Stage::Stl,
            StopAfter::Obj => Stage::Obj,
        }
    }
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(v) = self.epsilon {
            cfg.epsilon = v;
        }
        if let Some(v) = self.scale_x {
            cfg.scale_x = v;
        }
        if let Some(v) = self.scale_y {
            cfg.scale_y = v;
        }
        if let Some(v) = self.height {
            cfg.height = v;
        }
        if let Some(v) = self.wall_width {
            cfg.wall_width = v;
        }
        if let Some(v) = &self.openscad {
            cfg.openscad = v.clone();
        }
        if let Some(v) = &self.meshlabserver {
            cfg.meshlabserver = v.clone();
        }
        if let Some(v) = &self.dotscad_path {
            cfg.dotscad_path = v.clone();
        }
        cfg.keep_intermediates |= self.keep_intermediates;

        Ok(cfg)
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let cfg = args.config()?;
    let report = convert(&args.input, &cfg, args.stop_after.into())
        .with_context(|| format!("converting {}", args.input.display()))?;

    for path in &report.produced {
        println!("{}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
