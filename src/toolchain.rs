//! External tools: OpenSCAD compiles the description to STL, MeshLab server converts
//! the STL to OBJ.

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub const OPENSCAD: &str = "openscad";
pub const MESHLABSERVER: &str = "meshlabserver";

/// `openscad <scad> -o <stl>`, with dotSCAD on `OPENSCADPATH`.
pub fn openscad_command(cfg: &Config, scad: &Path, stl: &Path) -> Command {
    let mut cmd = Command::new(&cfg.openscad);
    cmd.arg(scad).arg("-o").arg(stl);
    cmd.env("OPENSCADPATH", &cfg.dotscad_path);
    cmd
}

/// `meshlabserver -i <stl> -o <obj>`.
pub fn meshlab_command(cfg: &Config, stl: &Path, obj: &Path) -> Command {
    let mut cmd = Command::new(&cfg.meshlabserver);
    cmd.arg("-i").arg(stl).arg("-o").arg(obj);
    cmd
}

/// Runs `cmd` to completion. A non-zero exit is an error carrying the tool's stderr.
pub fn run_tool(tool: &'static str, mut cmd: Command) -> Result<()> {
    debug!(?cmd, "running {tool}");
    let output = cmd
        .output()
        .map_err(|source| Error::ToolLaunch { tool, source })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        debug!("{tool} stdout:\n{}", stdout.trim_end());
    }

    if !output.status.success() {
        return Err(Error::ToolFailed {
            tool,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
