use std::sync::Arc;

use crate::{
    circuit::{Circuit, WireId},
    extract::{extract, Extraction},
    raster::Raster,
    Error, Result, MAX_CHARGE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireState {
    charge: u8,
    wire: WireId,
}

impl WireState {
    pub fn charge(&self) -> u8 {
        self.charge
    }

    pub fn wire(&self) -> WireId {
        self.wire
    }
}

/// One frame of charge across a circuit.
///
/// Snapshots are never mutated in place: [`Simulation::step`] returns a
/// new snapshot and leaves the old one intact, so earlier frames stay
/// valid for diffing and can be read from other threads. All snapshots
/// derived from one another share the same [`Circuit`].
#[derive(Debug, Clone)]
pub struct Simulation {
    circuit: Arc<Circuit>,
    states: Vec<WireState>,
}

impl PartialEq for Simulation {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.circuit, &other.circuit) || self.circuit == other.circuit)
            && self.states == other.states
    }
}

impl Eq for Simulation {}

impl Simulation {
    /// Extracts the circuit drawn in `raster`. Every wire starts at the
    /// highest charge found among its pixels.
    pub fn new(raster: &Raster) -> Self {
        let Extraction { circuit, charges } = extract(raster);
        Self::from_parts(Arc::new(circuit), charges)
    }

    /// All wires uncharged.
    pub fn from_circuit(circuit: impl Into<Arc<Circuit>>) -> Self {
        let circuit = circuit.into();
        let charges = vec![0; circuit.wires().len()];
        Self::from_parts(circuit, charges)
    }

    /// Starts from explicit per-wire charges, clamped to `MAX_CHARGE`.
    pub fn with_charges(circuit: impl Into<Arc<Circuit>>, charges: Vec<u8>) -> Result<Self> {
        let circuit = circuit.into();
        if charges.len() != circuit.wires().len() {
            return Err(Error::ChargeCount {
                expected: circuit.wires().len(),
                found: charges.len(),
            });
        }
        Ok(Self::from_parts(circuit, charges))
    }

    fn from_parts(circuit: Arc<Circuit>, charges: Vec<u8>) -> Self {
        let states = charges
            .into_iter()
            .enumerate()
            .map(|(i, charge)| WireState {
                charge: charge.min(MAX_CHARGE),
                wire: WireId(i),
            })
            .collect();
        Self { circuit, states }
    }

    /// Copy of this snapshot with one wire's charge replaced. Unknown
    /// wires are ignored.
    pub fn with_charge(&self, wire: WireId, charge: u8) -> Self {
        let mut states = self.states.clone();
        if let Some(state) = states.get_mut(wire.0) {
            state.charge = charge.min(MAX_CHARGE);
        }
        Self {
            circuit: self.circuit.clone(),
            states,
        }
    }

    pub fn circuit(&self) -> &Arc<Circuit> {
        &self.circuit
    }

    pub fn state(&self, wire: WireId) -> Option<WireState> {
        self.states.get(wire.0).copied()
    }

    pub fn states(&self) -> &[WireState] {
        &self.states
    }

    pub fn charges(&self) -> impl Iterator<Item = u8> + '_ {
        self.states.iter().map(WireState::charge)
    }

    /// Advances every wire by one tick.
    ///
    /// Power sources ramp up by one until they saturate. Every other wire
    /// moves one level toward the strongest charge reachable through an
    /// open transistor: it rises if that charge is at least two above its
    /// own, and decays if nothing stronger is reachable.
    pub fn step(&self) -> Simulation {
        let wires = self.circuit.wires();
        let states = self
            .states
            .iter()
            .map(|&state| {
                let charge = if wires[state.wire.0].is_power_source() {
                    (state.charge + 1).min(MAX_CHARGE)
                } else {
                    let source = self.trace_power_source(state);
                    if source.charge > state.charge + 1 {
                        state.charge + 1
                    } else if source.charge <= state.charge && state.charge > 0 {
                        state.charge - 1
                    } else {
                        state.charge
                    }
                };
                WireState { charge, ..state }
            })
            .collect();

        Simulation {
            circuit: self.circuit.clone(),
            states,
        }
    }

    /// Strongest state reachable from `origin` across one transistor,
    /// falling back to `origin` itself.
    ///
    /// A transistor whose base carries any charge blocks. A fully
    /// charged neighbor ends the search early.
    pub fn trace_power_source(&self, origin: WireState) -> WireState {
        let Some(wire) = self.circuit.wire(origin.wire) else {
            return origin;
        };

        let mut result = origin;
        for &id in wire.transistors() {
            let transistor = &self.circuit.transistors()[id.0];
            if transistor.base().is_some_and(|base| self.states[base.0].charge > 0) {
                continue;
            }
            let Some(other) = transistor.opposite(origin.wire) else {
                continue;
            };

            let other = self.states[other.0];
            if other.charge == MAX_CHARGE {
                return other;
            }
            if other.charge > result.charge {
                result = other;
            }
        }
        result
    }
}
