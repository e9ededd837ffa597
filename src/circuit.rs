//! Static circuit topology: wires, transistors, and the handles tying
//! them together. Wires and transistors refer to each other by index
//! into the flat arrays owned by [`Circuit`].

use serde::{Deserialize, Serialize};

use crate::vector::{Rect, Vec2i};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WireId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransistorId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    index: WireId,
    pixels: Vec<Vec2i>,
    bounds: Rect,
    transistors: Vec<TransistorId>,
    is_power_source: bool,
}

impl Wire {
    pub fn index(&self) -> WireId {
        self.index
    }

    pub fn pixels(&self) -> &[Vec2i] {
        &self.pixels
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Transistors this wire is an input of. A wire used only as a base
    /// does not list that transistor.
    pub fn transistors(&self) -> &[TransistorId] {
        &self.transistors
    }

    pub fn is_power_source(&self) -> bool {
        self.is_power_source
    }
}

/// Three-terminal junction. While `base` carries any charge the
/// transistor blocks; with an uncharged or missing base, `input_a` and
/// `input_b` are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transistor {
    position: Vec2i,
    base: Option<WireId>,
    input_a: WireId,
    input_b: WireId,
}

impl Transistor {
    pub fn position(&self) -> Vec2i {
        self.position
    }

    pub fn base(&self) -> Option<WireId> {
        self.base
    }

    pub fn input_a(&self) -> WireId {
        self.input_a
    }

    pub fn input_b(&self) -> WireId {
        self.input_b
    }

    /// The input on the other side of this transistor, if `wire` is one of its inputs.
    pub fn opposite(&self, wire: WireId) -> Option<WireId> {
        if wire == self.input_a {
            Some(self.input_b)
        } else if wire == self.input_b {
            Some(self.input_a)
        } else {
            None
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Circuit {
    wires: Vec<Wire>,
    transistors: Vec<Transistor>,
}

impl Circuit {
    pub fn builder() -> CircuitBuilder {
        CircuitBuilder::default()
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn transistors(&self) -> &[Transistor] {
        &self.transistors
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id.0)
    }

    pub fn transistor(&self, id: TransistorId) -> Option<&Transistor> {
        self.transistors.get(id.0)
    }

    /// The wire owning the pixel at `pos`, if any.
    pub fn wire_at(&self, pos: Vec2i) -> Option<&Wire> {
        self.wires
            .iter()
            .filter(|w| w.bounds.contains(pos))
            .find(|w| w.pixels.contains(&pos))
    }
}

/// Incrementally assembles a [`Circuit`]. Wire indices are handed out in
/// insertion order.
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn wire_count(&self) -> usize {
        self.circuit.wires.len()
    }

    pub fn add_wire(&mut self, pixels: impl IntoIterator<Item = Vec2i>, is_power_source: bool) -> WireId {
        let pixels: Vec<Vec2i> = pixels.into_iter().collect();
        let bounds = pixels
            .iter()
            .fold(Rect::default(), |bounds, &p| bounds.union(Rect::pixel(p)));
        self.push_wire(pixels, bounds, is_power_source)
    }

    pub(crate) fn push_wire(&mut self, pixels: Vec<Vec2i>, bounds: Rect, is_power_source: bool) -> WireId {
        let index = WireId(self.circuit.wires.len());
        self.circuit.wires.push(Wire {
            index,
            pixels,
            bounds,
            transistors: vec![],
            is_power_source,
        });
        index
    }

    /// Adds a transistor and registers it on both inputs (not on the base).
    ///
    /// # Panics
    ///
    /// Panics if any terminal was not created by this builder.
    pub fn add_transistor(
        &mut self,
        position: Vec2i,
        base: Option<WireId>,
        input_a: WireId,
        input_b: WireId,
    ) -> TransistorId {
        let count = self.circuit.wires.len();
        for wire in base.into_iter().chain([input_a, input_b]) {
            assert!(wire.0 < count, "transistor terminal {wire:?} is not a wire of this circuit");
        }

        let id = TransistorId(self.circuit.transistors.len());
        self.circuit.transistors.push(Transistor {
            position,
            base,
            input_a,
            input_b,
        });
        self.circuit.wires[input_a.0].transistors.push(id);
        self.circuit.wires[input_b.0].transistors.push(id);
        id
    }

    pub fn build(self) -> Circuit {
        self.circuit
    }
}
