use crate::rdp::{Polyline, V2};
use std::path::PathBuf;

pub fn pline(coords: &[(f64, f64)]) -> Polyline {
    coords.iter().copied().map(V2::from).collect()
}

/// A deterministic noisy walk along +x. Small jitter with an occasional large jog so
/// that every tolerance in the 0..5 range removes a different number of points.
pub fn wobbly_pline(n: usize, seed: u64) -> Polyline {
    assert!(n >= 2, "polyline needs at least 2 points");

    // Plain LCG; the exact sequence does not matter, only that it is repeatable.
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next_unit = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 11) as f64) / ((1u64 << 53) as f64)
    };

    let mut y = 0.0;
    (0..n)
        .map(|i| {
            let r = next_unit();
            y += (r - 0.5) * 0.2;
            if r > 0.9 {
                y += 2.0;
            }
            V2::new(i as f64 * 0.5, y)
        })
        .collect()
}

/// True when every point of `sub` appears in `full` in the same relative order.
pub fn is_subsequence(sub: &[V2], full: &[V2]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|p| it.any(|q| q == p))
}

/// Builds a minimal dd2vtt document holding only the given walls.
pub fn dd2vtt_json(walls: &[Polyline]) -> String {
    let walls_json: Vec<String> = walls
        .iter()
        .map(|wall| {
            let pts: Vec<String> = wall
                .iter()
                .map(|p| format!("{{\"x\": {:?}, \"y\": {:?}}}", p.x, p.y))
                .collect();
            format!("[{}]", pts.join(", "))
        })
        .collect();

    format!(
        r#"{{
            "format": 0.2,
            "resolution": {{
                "map_origin": {{ "x": 0, "y": 0 }},
                "map_size": {{ "x": 10, "y": 8 }},
                "pixels_per_grid": 70
            }},
            "line_of_sight": [{}],
            "portals": [],
            "environment": {{ "baked_lighting": true, "ambient_light": "ffffffff" }},
            "lights": [],
            "image": ""
        }}"#,
        walls_json.join(", ")
    )
}

/// A fresh, empty scratch directory for tests that touch the filesystem.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dd2wall_test_{}_{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap_or_else(|e| panic!("failed to create {dir:?}: {e}"));
    dir
}
