//! Particle storage split into two partitions.
//!
//! `live` holds falling and deflected particles in no particular order.
//! `resting` holds settled (and decaying) particles oldest first, so the cap
//! can evict from the front. A particle is owned by exactly one partition;
//! moving between them is a move, never a copy.

use std::collections::VecDeque;

use crate::particle::{Particle, ParticleId};

#[derive(Debug, Default)]
pub struct Registry {
    live: Vec<Particle>,
    resting: VecDeque<Particle>,
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert_live(&mut self, particle: Particle) {
        debug_assert!(particle.state.is_live());
        self.live.push(particle);
    }

    pub fn live(&self) -> &[Particle] {
        &self.live
    }

    pub fn live_mut(&mut self) -> &mut [Particle] {
        &mut self.live
    }

    pub fn resting(&self) -> &VecDeque<Particle> {
        &self.resting
    }

    pub fn resting_mut(&mut self) -> &mut VecDeque<Particle> {
        &mut self.resting
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn resting_count(&self) -> usize {
        self.resting.len()
    }

    pub fn len(&self) -> usize {
        self.live.len() + self.resting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.resting.is_empty()
    }

    /// Remove a live particle by index. Order of the live partition is not kept.
    pub fn take_live(&mut self, index: usize) -> Particle {
        self.live.swap_remove(index)
    }

    /// Append to the resting partition; past `cap` the oldest entry is evicted
    /// and returned.
    pub fn settle(&mut self, particle: Particle, cap: usize) -> Option<Particle> {
        self.resting.push_back(particle);
        if self.resting.len() > cap {
            self.resting.pop_front()
        } else {
            None
        }
    }

    pub fn remove_resting(&mut self, index: usize) -> Option<Particle> {
        self.resting.remove(index)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.live
            .iter()
            .chain(self.resting.iter())
            .find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.live.iter().chain(self.resting.iter())
    }

    pub fn clear(&mut self) {
        self.live.clear();
        self.resting.clear();
    }
}
