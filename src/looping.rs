//! Detection of repeating simulation states.

use std::collections::HashMap;

use log::{debug, warn};
use sha2::{Digest, Sha256};

use crate::{config::LoopConfig, simulation::Simulation, Error, Result};

/// SHA-256 digest of a snapshot's charges.
pub type StateHash = [u8; 32];

/// The first snapshot whose state had already been seen.
#[derive(Debug, Clone)]
pub struct Looping {
    pub simulation: Simulation,
    /// Steps between the two occurrences of the repeated state.
    pub length: usize,
    /// Steps taken from the starting snapshot to `simulation`.
    pub steps: usize,
}

impl Simulation {
    /// Digest over `(wire index as u32 LE, charge)` for every wire in
    /// index order. Equal states always hash equal; distinct states
    /// colliding is accepted.
    pub fn hash(&self) -> StateHash {
        let mut hasher = Sha256::new();
        for (index, state) in self.states().iter().enumerate() {
            hasher.update((index as u32).to_le_bytes());
            hasher.update([state.charge()]);
        }
        hasher.finalize().into()
    }

    /// Steps until a state repeats. Runs without bound; a circuit with an
    /// enormous state space can exhaust memory before returning.
    pub fn find_looping(&self) -> Looping {
        match self.search_looping(None) {
            Ok(looping) => looping,
            Err(_) => unreachable!("unbounded search only returns on a repeat"),
        }
    }

    /// Like [`find_looping`](Self::find_looping), giving up after `limit` steps.
    pub fn find_looping_within(&self, limit: usize) -> Result<Looping> {
        self.search_looping(Some(limit))
    }

    pub fn find_looping_with(&self, config: &LoopConfig) -> Result<Looping> {
        self.search_looping(config.step_limit)
    }

    fn search_looping(&self, limit: Option<usize>) -> Result<Looping> {
        let mut seen: HashMap<StateHash, usize> = HashMap::new();
        let mut simulation = self.clone();
        let mut frame = 0;
        loop {
            if limit.is_some_and(|limit| frame >= limit) {
                let limit = frame;
                warn!("no repeated state after {limit} steps, giving up");
                return Err(Error::StepBudgetExceeded { limit });
            }

            simulation = simulation.step();
            let hash = simulation.hash();
            if let Some(first) = seen.get(&hash) {
                let length = frame - first;
                debug!("state of step {} repeats step {}, cycle length {length}", frame + 1, first + 1);
                return Ok(Looping {
                    simulation,
                    length,
                    steps: frame + 1,
                });
            }
            seen.insert(hash, frame);
            frame += 1;
        }
    }
}
