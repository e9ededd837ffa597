use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    circuit::{Circuit, WireId},
    simulation::Simulation,
    vector::Vec2i,
    Error, Result,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSavestate {
    pub circuit: CircuitSavestate,
    pub charges: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitSavestate {
    pub wires: Vec<WireSavestate>,
    pub transistors: Vec<TransistorSavestate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSavestate {
    pub pixels: Vec<Vec2i>,
    #[serde(default)]
    pub power_source: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransistorSavestate {
    pub position: Vec2i,
    pub base: Option<WireId>,
    pub input_a: WireId,
    pub input_b: WireId,
}

impl CircuitSavestate {
    pub fn save(circuit: &Circuit) -> Self {
        Self {
            wires: circuit
                .wires()
                .iter()
                .map(|w| WireSavestate {
                    pixels: w.pixels().to_vec(),
                    power_source: w.is_power_source(),
                })
                .collect(),
            transistors: circuit
                .transistors()
                .iter()
                .map(|t| TransistorSavestate {
                    position: t.position(),
                    base: t.base(),
                    input_a: t.input_a(),
                    input_b: t.input_b(),
                })
                .collect(),
        }
    }

    /// Rebuilds the circuit. Wires keep their saved order, and with it
    /// their indices.
    pub fn load(&self) -> Result<Circuit> {
        let mut builder = Circuit::builder();
        for wire in &self.wires {
            builder.add_wire(wire.pixels.iter().copied(), wire.power_source);
        }

        let count = builder.wire_count();
        for transistor in &self.transistors {
            let terminals = transistor
                .base
                .iter()
                .map(|w| (*w, "transistor base"))
                .chain([
                    (transistor.input_a, "transistor input a"),
                    (transistor.input_b, "transistor input b"),
                ]);
            for (wire, context) in terminals {
                if wire.0 >= count {
                    return Err(Error::UnknownWire { wire, context });
                }
            }
            builder.add_transistor(
                transistor.position,
                transistor.base,
                transistor.input_a,
                transistor.input_b,
            );
        }
        Ok(builder.build())
    }
}

impl SimulationSavestate {
    pub fn save(simulation: &Simulation) -> Self {
        Self {
            circuit: CircuitSavestate::save(simulation.circuit()),
            charges: simulation.charges().collect(),
        }
    }

    pub fn load(&self) -> Result<Simulation> {
        let circuit = Arc::new(self.circuit.load()?);
        Simulation::with_charges(circuit, self.charges.clone())
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, Default::default())?)
    }
}

impl Simulation {
    pub fn save(&self) -> SimulationSavestate {
        SimulationSavestate::save(self)
    }
}
