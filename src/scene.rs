use crate::error::{Error, Result};
use crate::rdp::{Polyline, V2};
use serde::Deserialize;
use std::path::Path;

/// The part of a dd2vtt export this tool cares about.
///
/// A dd2vtt file also carries portals, lights, environment settings and a base64 map
/// image. Those keys are ignored by serde; only `line_of_sight` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub format: Option<f64>,
    #[serde(default)]
    pub resolution: Option<Resolution>,
    pub line_of_sight: Vec<Polyline>,
}

/// Map extent in grid squares.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resolution {
    pub map_origin: V2,
    pub map_size: V2,
    pub pixels_per_grid: f64,
}

impl Scene {
    pub fn wall_count(&self) -> usize {
        self.line_of_sight.len()
    }

    pub fn point_count(&self) -> usize {
        self.line_of_sight.iter().map(Vec::len).sum()
    }
}

pub fn parse_scene_json(json_text: &str) -> std::result::Result<Scene, serde_json::Error> {
    serde_json::from_str(json_text)
}

pub fn load_scene(path: &Path) -> Result<Scene> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_scene_json(&text).map_err(|source| Error::Scene {
        path: path.to_path_buf(),
        source,
    })
}

/// Accepts anything whose extension mentions `dd2vtt` (`map.dd2vtt`, `map.dd2vtt_old`).
pub fn is_dd2vtt_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.contains("dd2vtt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{dd2vtt_json, pline, scratch_dir};

    #[test]
    fn scene_deserializes_sample_json() {
        let walls = vec![
            pline(&[(1.0, 1.0), (4.0, 1.0), (4.0, 3.5)]),
            pline(&[(0.5, 0.25), (0.5, 6.0)]),
        ];
        let scene = parse_scene_json(&dd2vtt_json(&walls)).expect("sample json should deserialize");

        assert_eq!(scene.format, Some(0.2));
        assert_eq!(scene.wall_count(), 2);
        assert_eq!(scene.point_count(), 5);
        assert_eq!(scene.line_of_sight, walls);

        let res = scene.resolution.expect("resolution should be present");
        assert_eq!(res.map_size, V2::new(10.0, 8.0));
        assert_eq!(res.pixels_per_grid, 70.0);
    }

    #[test]
    fn integer_coordinates_are_accepted() {
        let sample = r#"{ "line_of_sight": [[{"x": 1, "y": 2}, {"x": 3, "y": -4}]] }"#;
        let scene = parse_scene_json(sample).expect("integer coords should deserialize");
        assert!(scene.format.is_none());
        assert!(scene.resolution.is_none());
        assert_eq!(scene.line_of_sight, vec![pline(&[(1.0, 2.0), (3.0, -4.0)])]);
    }

    #[test]
    fn empty_wall_list_is_valid() {
        let scene = parse_scene_json(r#"{ "line_of_sight": [] }"#).expect("should deserialize");
        assert_eq!(scene.wall_count(), 0);
        assert_eq!(scene.point_count(), 0);
    }

    #[test]
    fn missing_line_of_sight_is_an_error() {
        let err = parse_scene_json(r#"{ "format": 0.2, "portals": [] }"#).unwrap_err();
        assert!(err.to_string().contains("line_of_sight"), "{err}");
    }

    #[test]
    fn non_numeric_coordinate_is_an_error() {
        let sample = r#"{ "line_of_sight": [[{"x": "a", "y": 2}]] }"#;
        assert!(parse_scene_json(sample).is_err());
    }

    #[test]
    fn load_scene_reports_path() {
        let dir = scratch_dir("load_scene");
        let missing = dir.join("missing.dd2vtt");
        match load_scene(&missing) {
            Err(Error::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }

        let broken = dir.join("broken.dd2vtt");
        std::fs::write(&broken, "{ not json").unwrap();
        match load_scene(&broken) {
            Err(Error::Scene { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected Scene error, got {other:?}"),
        }

        let good = dir.join("good.dd2vtt");
        std::fs::write(&good, dd2vtt_json(&[pline(&[(0.0, 0.0), (1.0, 0.0)])])).unwrap();
        assert_eq!(load_scene(&good).unwrap().wall_count(), 1);
    }

    #[test]
    fn dd2vtt_extension_check() {
        assert!(is_dd2vtt_path(Path::new("maps/cave.dd2vtt")));
        assert!(is_dd2vtt_path(Path::new("cave.dd2vtt_backup")));
        assert!(!is_dd2vtt_path(Path::new("cave.json")));
        assert!(!is_dd2vtt_path(Path::new("dd2vtt")));
        assert!(!is_dd2vtt_path(Path::new("cave.DD2VTT")));
    }
}
