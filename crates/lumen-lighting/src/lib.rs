//! Worklist flood-fill light propagation over a single chunk.
#![forbid(unsafe_code)]

use lumen_grid::{ChunkDims, Light, LightField, SeedField};
use rayon::prelude::*;

mod borders;
#[cfg(feature = "dial_queues")]
mod dial;
mod error;
mod propagate;
mod worklist;

pub use borders::{LightBorders, stitch_neighbor_plane};
#[cfg(feature = "dial_queues")]
pub use dial::{DialWorklist, propagate_dial, run_propagation_dial};
pub use error::LightError;
pub use propagate::{expand, probe, propagate, run_propagation, scan_seeds};
pub use worklist::{PUSHES_PER_CELL, Worklist};

/// Sink for cells whose light improved.
pub trait LightQueue {
    fn clear(&mut self);
    fn push_cell(&mut self, index: usize, level: Light) -> Result<(), LightError>;
}

impl LightQueue for Worklist {
    #[inline]
    fn clear(&mut self) {
        Worklist::clear(self);
    }

    #[inline]
    fn push_cell(&mut self, index: usize, _level: Light) -> Result<(), LightError> {
        self.push(index).map(|_| ())
    }
}

/// How emitters enter the light field during the seed scan.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EmitterSeeding {
    /// Write each emitter's strength into the light field before draining.
    #[default]
    Prime,
    /// Queue emitters without touching the light field. An isolated emitter
    /// then expands with 0 and lights nothing; only emitters reached by
    /// another emitter's expansion shine.
    Literal,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DrainOrder {
    /// Growing append-only worklist walked front to back.
    #[default]
    Fifo,
    /// Brightest pending cell first.
    #[cfg(feature = "dial_queues")]
    Dial,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationStats {
    pub seeds: usize,
    /// Worklist entries written, seeds included.
    pub pushes: usize,
    pub expansions: usize,
    pub improvements: usize,
    /// Dial entries skipped because their cell had improved since.
    pub stale: usize,
}

/// Scratch queue for one chunk, allocated once and reused across runs.
#[derive(Clone, Debug)]
pub enum Drain {
    Fifo(Worklist),
    #[cfg(feature = "dial_queues")]
    Dial(DialWorklist),
}

impl Drain {
    /// `max_level` bounds the brightest emitter the dial order can hold.
    pub fn new(order: DrainOrder, dims: &ChunkDims, max_level: Light) -> Self {
        match (order, max_level) {
            (DrainOrder::Fifo, _) => Drain::Fifo(Worklist::for_dims(dims)),
            #[cfg(feature = "dial_queues")]
            (DrainOrder::Dial, max_level) => Drain::Dial(DialWorklist::for_dims(dims, max_level)),
        }
    }

    pub fn order(&self) -> DrainOrder {
        match self {
            Drain::Fifo(_) => DrainOrder::Fifo,
            #[cfg(feature = "dial_queues")]
            Drain::Dial(_) => DrainOrder::Dial,
        }
    }

    /// Seeds and drains. `dest` must be zeroed by the caller.
    pub fn run(
        &mut self,
        seed: &SeedField,
        dest: &mut LightField,
        emitters: EmitterSeeding,
    ) -> Result<PropagationStats, LightError> {
        match self {
            Drain::Fifo(list) => run_propagation(seed, dest, list, emitters),
            #[cfg(feature = "dial_queues")]
            Drain::Dial(dial) => run_propagation_dial(seed, dest, dial, emitters),
        }
    }
}

/// One chunk's exclusively owned buffer triple.
#[derive(Clone, Debug)]
pub struct ChunkJob {
    pub seed: SeedField,
    pub dest: LightField,
    pub drain: Drain,
}

impl ChunkJob {
    pub fn new(seed: SeedField, order: DrainOrder, max_level: Light) -> Self {
        let dims = *seed.dims();
        Self {
            seed,
            dest: LightField::new(dims),
            drain: Drain::new(order, &dims, max_level),
        }
    }

    /// Zeroes the light field and propagates.
    pub fn run(&mut self, emitters: EmitterSeeding) -> Result<PropagationStats, LightError> {
        self.dest.clear();
        self.drain.run(&self.seed, &mut self.dest, emitters)
    }
}

/// Lights independent chunks on the rayon pool. Results line up with `jobs`.
pub fn light_chunks_parallel(
    jobs: &mut [ChunkJob],
    emitters: EmitterSeeding,
) -> Vec<Result<PropagationStats, LightError>> {
    jobs.par_iter_mut().map(|job| job.run(emitters)).collect()
}
