use crate::config::Config;
use crate::error::{Error, Result};
use crate::rdp::{Polyline, simplify};
use crate::scad::{render_scad, write_scad};
use crate::scene::{Scene, is_dd2vtt_path, load_scene};
use crate::toolchain::{MESHLABSERVER, OPENSCAD, meshlab_command, openscad_command, run_tool};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How far the conversion runs. Later stages need the external tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Stage {
    Scad,
    Stl,
    #[default]
    Obj,
}

/// Output files sit next to the input and share its stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub scad: PathBuf,
    pub stl: PathBuf,
    pub obj: PathBuf,
}

impl OutputPaths {
    pub fn for_input(input: &Path) -> Self {
        Self {
            scad: input.with_extension("scad"),
            stl: input.with_extension("stl"),
            obj: input.with_extension("obj"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub wall_count: usize,
    pub input_point_count: usize,
    pub output_point_count: usize,
    /// The files left on disk once the conversion finished.
    pub produced: Vec<PathBuf>,
}

/// Simplifies every wall of the scene, keeping wall order.
pub fn simplify_walls(scene: &Scene, epsilon: f64) -> Vec<Polyline> {
    scene
        .line_of_sight
        .par_iter()
        .map(|wall| simplify(wall, epsilon))
        .collect()
}

pub fn convert(input: &Path, cfg: &Config, stop_after: Stage) -> Result<Report> {
    cfg.validate()?;
    if !is_dd2vtt_path(input) {
        return Err(Error::NotDd2vtt {
            path: input.to_path_buf(),
        });
    }
    let paths = OutputPaths::for_input(input);

    info!("loading lines from {}", input.display());
    let scene = load_scene(input)?;
    if let Some(res) = &scene.resolution {
        info!(
            "map is {}x{} grid squares at {} px/grid",
            res.map_size.x, res.map_size.y, res.pixels_per_grid
        );
    }
    if scene.wall_count() == 0 {
        warn!("{} has no line_of_sight walls", input.display());
    }

    let walls = simplify_walls(&scene, cfg.epsilon);
    let output_point_count = walls.iter().map(Vec::len).sum();
    info!(
        "simplified {} walls from {} to {} points (epsilon {})",
        scene.wall_count(),
        scene.point_count(),
        output_point_count,
        cfg.epsilon
    );

    info!("generating {}", paths.scad.display());
    write_scad(&paths.scad, &render_scad(&walls, cfg))?;

    let mut report = Report {
        wall_count: scene.wall_count(),
        input_point_count: scene.point_count(),
        output_point_count,
        produced: vec![paths.scad.clone()],
    };
    if stop_after == Stage::Scad {
        return Ok(report);
    }

    info!("converting {} to stl", paths.scad.display());
    run_tool(OPENSCAD, openscad_command(cfg, &paths.scad, &paths.stl))?;
    report.produced.push(paths.stl.clone());
    if stop_after == Stage::Stl {
        return Ok(report);
    }

    info!("converting {} to obj", paths.stl.display());
    run_tool(MESHLABSERVER, meshlab_command(cfg, &paths.stl, &paths.obj))?;
    report.produced.push(paths.obj.clone());

    if !cfg.keep_intermediates {
        info!("removing intermediate files");
        for tmp in [&paths.scad, &paths.stl] {
            std::fs::remove_file(tmp).map_err(|e| Error::io(tmp, e))?;
        }
        report.produced.retain(|p| *p == paths.obj);
    }

    Ok(report)
}
