//! OpenSCAD emission.
//!
//! Each wall becomes a `pointsN` vector drawn with dotSCAD's `polyline2d`, the union of
//! all walls is scaled, extruded and rotated upright.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::rdp::{Polyline, V2};
use std::fmt::Write;
use std::path::Path;

fn push_point(out: &mut String, p: &V2) {
    let _ = write!(out, "[{},{}]", p.x, p.y);
}

pub fn render_scad(walls: &[Polyline], cfg: &Config) -> String {
    let mut out = String::from("use <polyline2d.scad>;\n");

    for (i, wall) in walls.iter().enumerate() {
        let _ = write!(out, "points{i} = [");
        for (j, p) in wall.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            push_point(&mut out, p);
        }
        out.push_str("];\n");
    }

    out.push_str("rotate([90,180,0])\n");
    let _ = writeln!(out, "linear_extrude({})", cfg.height);
    let _ = writeln!(out, "scale([{},{},1])", cfg.scale_x, cfg.scale_y);
    out.push_str("union(){\n");
    let calls: Vec<String> = (0..walls.len())
        .map(|i| {
            format!(
                "\tpolyline2d(points=points{i}, width={},joinStyle=\"JOIN_MITER\");",
                cfg.wall_width
            )
        })
        .collect();
    out.push_str(&calls.join("\n"));
    out.push_str("\n};");
    out
}

pub fn write_scad(path: &Path, scad_text: &str) -> Result<()> {
    std::fs::write(path, scad_text).map_err(|e| Error::io(path, e))
}
