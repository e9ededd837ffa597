//! Painting wire charge back onto rasters.

use crate::{
    circuit::Wire,
    config::{FrameMode, RenderConfig},
    raster::{color_for_charge, Raster},
    simulation::Simulation,
    Error, Result,
};

fn paint(wire: &Wire, raster: &mut Raster, index: u8) {
    for &pixel in wire.pixels() {
        raster.set_color_index(pixel, index);
    }
}

impl Simulation {
    /// Paints every wire with the color of its charge.
    pub fn draw(&self, raster: &mut Raster) {
        let wires = self.circuit().wires();
        for state in self.states() {
            paint(&wires[state.wire().0], raster, color_for_charge(state.charge()));
        }
    }

    /// Paints only the wires whose charge differs from `previous`; every
    /// other pixel keeps what `raster` already holds.
    pub fn diff_draw(&self, previous: &Simulation, raster: &mut Raster) -> Result<()> {
        if previous.states().len() != self.states().len() {
            return Err(Error::StateMismatch {
                expected: self.states().len(),
                found: previous.states().len(),
            });
        }

        self.draw_changes(previous, raster);
        Ok(())
    }

    /// Renders `frame_count` frames starting from this snapshot.
    ///
    /// Frame 0 is `initial` with the current charges drawn over it. Each
    /// later frame advances one step and, in [`FrameMode::Diff`], holds
    /// only the wires that changed on a blank raster; in
    /// [`FrameMode::Full`] it is a complete picture.
    pub fn render_frames(&self, mut initial: Raster, config: &RenderConfig) -> Vec<Raster> {
        if config.frame_count == 0 {
            return vec![];
        }

        self.draw(&mut initial);
        let blank = initial.blank_like();
        let mut frames = Vec::with_capacity(config.frame_count);
        frames.push(initial);

        let mut current = self.clone();
        for _ in 1..config.frame_count {
            let next = current.step();
            let mut frame = match config.mode {
                FrameMode::Diff => blank.clone(),
                FrameMode::Full => frames[frames.len() - 1].clone(),
            };
            next.draw_changes(&current, &mut frame);
            frames.push(frame);
            current = next;
        }
        frames
    }

    /// [`render_frames`](Self::render_frames) with sparse diff frames.
    pub fn draw_all(&self, initial: Raster, frame_count: usize) -> Vec<Raster> {
        self.render_frames(
            initial,
            &RenderConfig {
                frame_count,
                mode: FrameMode::Diff,
            },
        )
    }

    fn draw_changes(&self, previous: &Simulation, raster: &mut Raster) {
        let wires = self.circuit().wires();
        for (state, before) in self.states().iter().zip(previous.states()) {
            if state.charge() != before.charge() {
                paint(&wires[state.wire().0], raster, color_for_charge(state.charge()));
            }
        }
    }
}
