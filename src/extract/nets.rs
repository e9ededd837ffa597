//! Net merging for the extraction scans.
//!
//! Nets live in a flat arena addressed by [`NetId`]. Absorbing a net
//! moves its contents into the survivor and leaves a redirect behind, so
//! handles stored in the region matrix before the merge keep resolving
//! to the right net through [`NetTable::find`].

use log::trace;

use crate::{
    circuit::WireId,
    vector::{Rect, Vec2i},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetId(usize);

impl NetId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Net {
    pub pixels: Vec<Vec2i>,
    pub bounds: Rect,
    pub peak_charge: u8,
    pub is_power_source: bool,
}

impl Net {
    pub fn add_pixel(&mut self, pos: Vec2i, charge: u8) {
        self.peak_charge = self.peak_charge.max(charge);
        self.pixels.push(pos);
        self.bounds = self.bounds.union(Rect::pixel(pos));
    }

    fn absorb(&mut self, other: Net) {
        self.is_power_source |= other.is_power_source;
        self.peak_charge = self.peak_charge.max(other.peak_charge);
        self.bounds = self.bounds.union(other.bounds);
        self.pixels.extend(other.pixels);
    }
}

#[derive(Debug, Default)]
pub struct NetTable {
    parents: Vec<usize>,
    nets: Vec<Net>,
    merges: usize,
}

impl NetTable {
    pub fn create(&mut self) -> NetId {
        let id = self.nets.len();
        self.parents.push(id);
        self.nets.push(Net::default());
        NetId(id)
    }

    /// Number of nets ever created, absorbed ones included.
    pub fn created(&self) -> usize {
        self.nets.len()
    }

    pub fn merges(&self) -> usize {
        self.merges
    }

    pub fn live(&self) -> usize {
        self.nets.len() - self.merges
    }

    /// Follows redirects to the surviving net.
    pub fn find(&mut self, id: NetId) -> NetId {
        let mut i = id.0;
        while self.parents[i] != i {
            let grandparent = self.parents[self.parents[i]];
            self.parents[i] = grandparent;
            i = grandparent;
        }
        NetId(i)
    }

    pub fn net_mut(&mut self, id: NetId) -> &mut Net {
        let root = self.find(id);
        &mut self.nets[root.0]
    }

    /// Folds `absorbed` into `survivor` and returns the survivor.
    ///
    /// # Panics
    ///
    /// Panics if both handles resolve to the same net; callers compare
    /// resolved nets before merging, so this only fires on an
    /// extraction bug.
    pub fn merge(&mut self, absorbed: NetId, survivor: NetId) -> NetId {
        let absorbed = self.find(absorbed);
        let survivor = self.find(survivor);
        if absorbed == survivor {
            panic!("net {} can not be merged into itself", absorbed.0);
        }

        trace!("merging net {} into net {}", absorbed.0, survivor.0);
        let content = std::mem::take(&mut self.nets[absorbed.0]);
        self.nets[survivor.0].absorb(content);
        self.parents[absorbed.0] = survivor.0;
        self.merges += 1;
        survivor
    }

    /// Surviving nets in creation order, together with the wire index
    /// every handle (absorbed or not) resolves to.
    pub fn finish(mut self) -> (Vec<Net>, Vec<WireId>) {
        let mut slots = vec![None; self.nets.len()];
        let mut survivors = Vec::with_capacity(self.live());
        for (i, net) in std::mem::take(&mut self.nets).into_iter().enumerate() {
            if self.parents[i] == i {
                slots[i] = Some(WireId(survivors.len()));
                survivors.push(net);
            }
        }

        let wires = (0..slots.len())
            .map(|i| {
                let root = self.find(NetId(i));
                slots[root.0].unwrap_or_else(|| unreachable!("net {} has no surviving root", i))
            })
            .collect();
        (survivors, wires)
    }
}
