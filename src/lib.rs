//! Pixel-drawn logic circuits.
//!
//! A circuit is drawn as an indexed-color raster: conductive pixels form
//! wires, notches between three wires form transistors, and solid 2x2
//! blocks mark power sources. [`Simulation::new`] extracts the circuit and
//! [`Simulation::step`] advances its charge one tick at a time.

pub mod circuit;
pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod looping;
pub mod raster;
pub mod render;
pub mod simulation;
pub mod vector;

pub use circuit::{Circuit, CircuitBuilder, Transistor, TransistorId, Wire, WireId};
pub use config::{Config, FrameMode, LoopConfig, RenderConfig};
pub use error::{Error, Result};
pub use looping::{Looping, StateHash};
pub use raster::Raster;
pub use simulation::{Simulation, WireState};
pub use vector::{Rect, Vec2i};

/// Highest charge a wire can carry.
pub const MAX_CHARGE: u8 = 6;
