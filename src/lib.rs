// Library crate root.
//
// The binary (src/main.rs) is a thin CLI over `pipeline::convert`; the modules are
// public so the simplifier and the OpenSCAD emitter can be reused on their own.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod rdp;
pub mod scad;
pub mod scene;
pub mod toolchain;

pub use config::Config;
pub use error::{Error, Result};
pub use rdp::{Polyline, V2, simplify};

#[cfg(test)]
pub mod test_helpers;
