//! Turns an indexed raster into a [`Circuit`].
//!
//! Extraction runs three scans over the raster:
//!
//! 1. Connected-component labelling of conductive pixels in row-major
//!    order, merging nets whenever a pixel joins two different ones. A
//!    pixel whose top-left, top and left neighbors all conduct marks its
//!    net as a power source.
//! 2. Crossings: a background pixel with four conductive sides and four
//!    background diagonals joins its top and bottom nets, and separately
//!    its left and right nets, so two wires can pass through each other.
//! 3. Transistor notches (see [`transistor`]), once nets are final.

pub mod matrix;
pub mod nets;
pub mod transistor;

use log::debug;

use crate::{
    circuit::{Circuit, WireId},
    raster::Raster,
    vector::Vec2i,
};

use self::{
    matrix::{Neighborhood, RegionMatrix},
    nets::{NetId, NetTable},
};

/// Result of extracting a raster: the topology plus the initial charge
/// of every wire, indexed like [`Circuit::wires`].
#[derive(Debug, Clone)]
pub struct Extraction {
    pub circuit: Circuit,
    pub charges: Vec<u8>,
}

fn positions(raster: &Raster) -> impl Iterator<Item = Vec2i> {
    let (width, height) = (raster.width() as i32, raster.height() as i32);
    (0..height).flat_map(move |y| (0..width).map(move |x| Vec2i::new(x, y)))
}

fn resolved(matrix: &RegionMatrix<NetId>, table: &mut NetTable, pos: Vec2i) -> Neighborhood<Option<NetId>> {
    matrix
        .neighborhood(pos)
        .map(|net| net.map(|net| table.find(net)))
}

fn label(raster: &Raster, matrix: &mut RegionMatrix<NetId>, table: &mut NetTable) {
    for pos in positions(raster) {
        let Some(charge) = raster.charge_at(pos) else {
            continue;
        };

        let n = resolved(matrix, table, pos);
        let net = match (n.top, n.left) {
            (None, None) => table.create(),
            (None, Some(left)) => left,
            (Some(top), None) => top,
            (Some(top), Some(left)) if top == left => top,
            (Some(top), Some(left)) => table.merge(left, top),
        };

        if n.top_left.is_some() && n.top.is_some() && n.left.is_some() {
            table.net_mut(net).is_power_source = true;
        }

        matrix.set(pos, net);
        table.net_mut(net).add_pixel(pos, charge);
    }
}

fn join_crossings(raster: &Raster, matrix: &RegionMatrix<NetId>, table: &mut NetTable) {
    for pos in positions(raster) {
        if matrix.get(pos).is_some() {
            continue;
        }

        let n = matrix.neighborhood(pos);
        if !n.diagonals_empty() {
            continue;
        }
        let (Some(top), Some(right), Some(bottom), Some(left)) = (n.top, n.right, n.bottom, n.left) else {
            continue;
        };

        if table.find(top) != table.find(bottom) {
            table.merge(top, bottom);
        }
        if table.find(right) != table.find(left) {
            table.merge(right, left);
        }
    }
}

pub fn extract(raster: &Raster) -> Extraction {
    let mut matrix = RegionMatrix::new(raster.width(), raster.height());
    let mut table = NetTable::default();

    label(raster, &mut matrix, &mut table);
    join_crossings(raster, &matrix, &mut table);

    let created = table.created();
    let merges = table.merges();
    let (nets, wire_of) = table.finish();

    let mut builder = Circuit::builder();
    let mut charges = Vec::with_capacity(nets.len());
    for net in nets {
        builder.push_wire(net.pixels, net.bounds, net.is_power_source);
        charges.push(net.peak_charge);
    }

    let wire_at = |net: Option<NetId>| -> Option<WireId> { net.map(|net| wire_of[net.index()]) };
    for pos in positions(raster) {
        if matrix.get(pos).is_some() {
            continue;
        }
        let n = matrix.neighborhood(pos).map(wire_at);
        if let Some(t) = transistor::detect(&n) {
            builder.add_transistor(pos, Some(t.base), t.input_a, t.input_b);
        }
    }

    let circuit = builder.build();
    debug!(
        "extracted {} wires ({} power sources) and {} transistors from a {}x{} raster; {} nets created, {} merged",
        circuit.wires().len(),
        circuit.wires().iter().filter(|w| w.is_power_source()).count(),
        circuit.transistors().len(),
        raster.width(),
        raster.height(),
        created,
        merges,
    );

    Extraction { circuit, charges }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_pixels(circuit: &Circuit) -> Vec<Vec<(i32, i32)>> {
        let mut wires: Vec<Vec<(i32, i32)>> = circuit
            .wires()
            .iter()
            .map(|w| {
                let mut pixels: Vec<_> = w.pixels().iter().map(|p| (p.x, p.y)).collect();
                pixels.sort();
                pixels
            })
            .collect();
        wires.sort();
        wires
    }

    #[test]
    fn empty_raster_has_no_wires() {
        let extraction = extract(&Raster::new(4, 3));
        assert!(extraction.circuit.wires().is_empty());
        assert!(extraction.circuit.transistors().is_empty());
    }

    #[test]
    fn merge_event_joins_u_shape() {
        let raster = Raster::from_rows(&[[1u8, 0, 1], [1, 1, 1]]);
        let extraction = extract(&raster);

        assert_eq!(extraction.circuit.wires().len(), 1);
        let wire = &extraction.circuit.wires()[0];
        assert_eq!(wire.pixels().len(), 5);
        assert!(!wire.is_power_source());
        assert_eq!(wire.bounds().width(), 3);
        assert_eq!(wire.bounds().height(), 2);
    }

    #[test]
    fn peak_charge_survives_merges() {
        let raster = Raster::from_rows(&[[1u8, 0, 5], [1, 1, 1]]);
        let extraction = extract(&raster);
        assert_eq!(extraction.charges, vec![4]);
    }

    #[test]
    fn off_palette_pixels_are_background() {
        let raster = Raster::from_rows(&[[1u8, 9, 1]]);
        let extraction = extract(&raster);
        assert_eq!(extraction.circuit.wires().len(), 2);
    }

    #[test]
    fn diagonal_contact_does_not_connect() {
        let raster = Raster::from_rows(&[[1u8, 0], [0, 1]]);
        assert_eq!(extract(&raster).circuit.wires().len(), 2);
    }

    #[test]
    fn square_block_is_power_source() {
        let raster = Raster::from_rows(&[[1u8, 1], [1, 1]]);
        let extraction = extract(&raster);
        assert_eq!(extraction.circuit.wires().len(), 1);
        assert!(extraction.circuit.wires()[0].is_power_source());
    }

    #[test]
    fn crossing_keeps_axes_apart() {
        #[rustfmt::skip]
        let raster = Raster::from_rows(&[
            [0u8, 1, 0],
            [1,   0, 1],
            [0,   1, 0],
        ]);
        let extraction = extract(&raster);

        assert_eq!(
            sorted_pixels(&extraction.circuit),
            vec![vec![(0, 1), (2, 1)], vec![(1, 0), (1, 2)]]
        );
        assert!(extraction.circuit.transistors().is_empty());
    }

    #[test]
    fn notch_becomes_transistor() {
        #[rustfmt::skip]
        let raster = Raster::from_rows(&[
            [0u8, 0, 0, 0, 0],
            [1,   1, 0, 1, 1],
            [0,   0, 1, 0, 0],
            [0,   0, 1, 0, 0],
        ]);
        let extraction = extract(&raster);
        let circuit = &extraction.circuit;

        assert_eq!(circuit.wires().len(), 3);
        assert_eq!(circuit.transistors().len(), 1);

        let t = &circuit.transistors()[0];
        let left = circuit.wire_at(Vec2i::new(0, 1)).unwrap().index();
        let right = circuit.wire_at(Vec2i::new(4, 1)).unwrap().index();
        let gate = circuit.wire_at(Vec2i::new(2, 3)).unwrap().index();
        assert_eq!(t.position(), Vec2i::new(2, 1));
        assert_eq!(t.base(), Some(gate));
        assert_eq!(t.input_a(), right);
        assert_eq!(t.input_b(), left);

        assert!(circuit.wire(gate).unwrap().transistors().is_empty());
        assert_eq!(circuit.wire(left).unwrap().transistors().len(), 1);
        assert_eq!(circuit.wire(right).unwrap().transistors().len(), 1);
    }

    #[test]
    fn wire_indices_follow_creation_order() {
        let raster = Raster::from_rows(&[[0u8, 1, 0, 1], [1, 0, 0, 1]]);
        let extraction = extract(&raster);
        let firsts: Vec<_> = extraction
            .circuit
            .wires()
            .iter()
            .map(|w| w.pixels()[0])
            .collect();
        assert_eq!(firsts, vec![Vec2i::new(1, 0), Vec2i::new(3, 0), Vec2i::new(0, 1)]);
        for (i, wire) in extraction.circuit.wires().iter().enumerate() {
            assert_eq!(wire.index(), WireId(i));
        }
    }
}
