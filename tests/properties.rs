use std::collections::{HashMap, VecDeque};

use cuprite::{Raster, Simulation, Vec2i, MAX_CHARGE};
use proptest::prelude::*;

/// Small rasters mixing background, every charge level and an
/// off-palette index.
fn raster() -> impl Strategy<Value = Raster> {
    (1usize..9, 1usize..9).prop_flat_map(|(width, height)| {
        let pixel = prop_oneof![
            4 => Just(0u8),
            4 => Just(1u8),
            2 => 2u8..=MAX_CHARGE + 1,
            1 => Just(MAX_CHARGE + 5),
        ];
        prop::collection::vec(pixel, width * height)
            .prop_map(move |pixels| Raster::from_pixels(width, height, pixels).unwrap())
    })
}

fn conductive(raster: &Raster, pos: Vec2i) -> bool {
    raster.charge_at(pos).is_some()
}

/// Component labels by flood fill: orthogonal neighbors connect, and a
/// crossing gap joins its top with its bottom and its left with its right.
/// Each pixel is labelled with the smallest linear offset in its component.
fn reference_labels(raster: &Raster) -> HashMap<Vec2i, usize> {
    let (w, h) = (raster.width() as i32, raster.height() as i32);
    let mut edges: HashMap<Vec2i, Vec<Vec2i>> = HashMap::new();
    let mut link = |a: Vec2i, b: Vec2i| {
        edges.entry(a).or_default().push(b);
        edges.entry(b).or_default().push(a);
    };

    for y in 0..h {
        for x in 0..w {
            let pos = Vec2i::new(x, y);
            let at = |dx, dy| pos + Vec2i::new(dx, dy);
            if conductive(raster, pos) {
                for next in [at(1, 0), at(0, 1)] {
                    if conductive(raster, next) {
                        link(pos, next);
                    }
                }
                continue;
            }

            let diagonals = [at(-1, -1), at(1, -1), at(-1, 1), at(1, 1)];
            let sides = [at(0, -1), at(1, 0), at(0, 1), at(-1, 0)];
            if diagonals.iter().all(|p| !conductive(raster, *p)) && sides.iter().all(|p| conductive(raster, *p)) {
                link(sides[0], sides[2]);
                link(sides[1], sides[3]);
            }
        }
    }

    let mut labels = HashMap::new();
    for y in 0..h {
        for x in 0..w {
            let start = Vec2i::new(x, y);
            if !conductive(raster, start) || labels.contains_key(&start) {
                continue;
            }
            let label = (y * w + x) as usize;
            let mut queue = VecDeque::from([start]);
            labels.insert(start, label);
            while let Some(pos) = queue.pop_front() {
                for &next in edges.get(&pos).into_iter().flatten() {
                    if !labels.contains_key(&next) {
                        labels.insert(next, label);
                        queue.push_back(next);
                    }
                }
            }
        }
    }
    labels
}

fn extracted_labels(sim: &Simulation, width: usize) -> HashMap<Vec2i, usize> {
    let mut labels = HashMap::new();
    for wire in sim.circuit().wires() {
        let label = wire
            .pixels()
            .iter()
            .map(|p| p.y as usize * width + p.x as usize)
            .min()
            .unwrap_or(usize::MAX);
        for &pixel in wire.pixels() {
            assert!(labels.insert(pixel, label).is_none(), "pixel {pixel:?} in two wires");
        }
    }
    labels
}

proptest! {
    #[test]
    fn partition_matches_flood_fill(raster in raster()) {
        let sim = Simulation::new(&raster);
        prop_assert_eq!(extracted_labels(&sim, raster.width()), reference_labels(&raster));
        for (i, wire) in sim.circuit().wires().iter().enumerate() {
            prop_assert_eq!(wire.index().0, i);
            prop_assert!(!wire.pixels().is_empty());
        }
    }

    #[test]
    fn charge_stays_in_range(raster in raster(), steps in 0usize..24) {
        let mut sim = Simulation::new(&raster);
        for _ in 0..steps {
            sim = sim.step();
            prop_assert!(sim.charges().all(|c| c <= MAX_CHARGE));
        }
    }

    #[test]
    fn power_sources_never_drop(raster in raster()) {
        let mut sim = Simulation::new(&raster);
        for _ in 0..12 {
            let next = sim.step();
            for (wire, (before, after)) in sim.circuit().wires().iter().zip(sim.charges().zip(next.charges())) {
                if wire.is_power_source() {
                    prop_assert!(after >= before);
                    prop_assert!(after == MAX_CHARGE || after == before + 1);
                }
            }
            sim = next;
        }
    }

    #[test]
    fn stepping_is_deterministic(raster in raster()) {
        let a = Simulation::new(&raster);
        let b = Simulation::new(&raster);
        prop_assert_eq!(a.hash(), b.hash());

        let (a, b) = (a.step().step(), b.step().step());
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn cycles_are_found(raster in raster()) {
        let looping = Simulation::new(&raster).find_looping_within(5_000);
        prop_assume!(looping.is_ok());
        let looping = looping.unwrap();
        prop_assert!(looping.length >= 1);
        prop_assert!(looping.length <= looping.steps);
        let mut sim = looping.simulation.clone();
        for _ in 0..looping.length {
            sim = sim.step();
        }
        prop_assert_eq!(sim.hash(), looping.simulation.hash());
    }
}
