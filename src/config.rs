use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Everything the conversion needs besides the input file.
///
/// Can be read from a JSON file where every key is optional; missing keys fall back
/// to the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Multiplicative scale of the final object along x.
    pub scale_x: f64,
    /// Multiplicative scale of the final object along y.
    pub scale_y: f64,
    /// Extrusion height of the walls.
    pub height: f64,
    pub wall_width: f64,
    /// Ramer-Douglas-Peucker tolerance, in map grid units.
    pub epsilon: f64,
    pub openscad: PathBuf,
    pub meshlabserver: PathBuf,
    /// Exported to OpenSCAD as `OPENSCADPATH`; must contain dotSCAD's `polyline2d.scad`.
    pub dotscad_path: PathBuf,
    pub keep_intermediates: bool,
}

impl Default for Config {
    fn default() -> Self {
        let tool_dir = exe_dir();
        let (openscad, meshlabserver, dotscad_path) = if cfg!(windows) {
            (
                tool_dir.join("openscad-2019.05").join("openscad.exe"),
                PathBuf::from(r"C:\Program Files\VCG\MeshLab\meshlabserver.exe"),
                tool_dir.join("dotSCAD-2.4").join("src"),
            )
        } else {
            (
                PathBuf::from("openscad"),
                PathBuf::from("./MeshLabServer2020.09-linux.AppImage"),
                tool_dir.join("dotSCAD").join("src"),
            )
        };

        Self {
            scale_x: 1.1,
            scale_y: 1.1,
            height: 2.0,
            wall_width: 0.1,
            epsilon: 0.1,
            openscad,
            meshlabserver,
            dotscad_path,
            keep_intermediates: false,
        }
    }
}

/// Directory holding the running executable; bundled tools are looked up next to it.
fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    pub fn from_json(json_text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json_text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&text).map_err(|source| Error::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects values the conversion cannot use. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::Config(format!(
                "epsilon must be a finite value >= 0, got {}",
                self.epsilon
            )));
        }

        let positive = [
            ("scale_x", self.scale_x),
            ("scale_y", self.scale_y),
            ("height", self.height),
            ("wall_width", self.wall_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be a finite value > 0, got {value}"
                )));
            }
        }

        Ok(())
    }
}
