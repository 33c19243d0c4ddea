//! Bucket queue keyed by light level.
//!
//! Draining always expands the brightest pending cell, so once a cell is
//! expanded nothing brighter can reach it later. Stale entries (the cell
//! improved after it was queued) are skipped, and every directed edge relaxes
//! at most once. With primed emitters total pushes stay within
//! `emitters + 6 * media`, which `6 * volume` covers.

use lumen_grid::{ChunkDims, Light, LightField, SeedField};

use crate::propagate::{expand, scan_seeds};
use crate::{EmitterSeeding, LightError, LightQueue, PUSHES_PER_CELL, PropagationStats};

const NIL: u32 = u32::MAX;

#[derive(Clone, Debug)]
pub struct DialWorklist {
    // Per level: most recent entry, linked through `next`.
    heads: Vec<u32>,
    next: Vec<u32>,
    cells: Vec<u32>,
    end: usize,
    top: usize,
}

impl DialWorklist {
    pub fn with_capacity(capacity: usize, max_level: Light) -> Self {
        let levels = max_level.max(0) as usize + 1;
        Self {
            heads: vec![NIL; levels],
            next: vec![NIL; capacity],
            cells: vec![0; capacity],
            end: 0,
            top: 0,
        }
    }

    pub fn for_dims(dims: &ChunkDims, max_level: Light) -> Self {
        Self::with_capacity(PUSHES_PER_CELL * dims.volume(), max_level)
    }

    #[inline]
    pub fn max_level(&self) -> Light {
        (self.heads.len() - 1) as Light
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Entries pushed since the last clear, including ones already popped.
    #[inline]
    pub fn pushed(&self) -> usize {
        self.end
    }

    pub fn clear(&mut self) {
        self.heads.fill(NIL);
        self.end = 0;
        self.top = 0;
    }

    pub fn push(&mut self, index: usize, level: Light) -> Result<(), LightError> {
        if level < 0 || level as usize >= self.heads.len() {
            return Err(LightError::LevelOutOfRange {
                level,
                max: self.max_level(),
            });
        }
        if self.end == self.cells.len() {
            return Err(LightError::WorklistOverflow {
                capacity: self.cells.len(),
            });
        }
        let l = level as usize;
        let e = self.end;
        self.cells[e] = index as u32;
        self.next[e] = self.heads[l];
        self.heads[l] = e as u32;
        self.end += 1;
        self.top = self.top.max(l);
        Ok(())
    }

    /// Pops an entry from the highest non-empty level.
    pub fn pop(&mut self) -> Option<(usize, Light)> {
        loop {
            let e = self.heads[self.top];
            if e != NIL {
                self.heads[self.top] = self.next[e as usize];
                return Some((self.cells[e as usize] as usize, self.top as Light));
            }
            if self.top == 0 {
                return None;
            }
            self.top -= 1;
        }
    }
}

impl LightQueue for DialWorklist {
    #[inline]
    fn clear(&mut self) {
        DialWorklist::clear(self);
    }

    #[inline]
    fn push_cell(&mut self, index: usize, level: Light) -> Result<(), LightError> {
        self.push(index, level)
    }
}

/// Drains `dial` brightest first, skipping entries whose cell has since improved.
pub fn propagate_dial(
    seed: &SeedField,
    dest: &mut LightField,
    dial: &mut DialWorklist,
    seeds: usize,
) -> Result<PropagationStats, LightError> {
    let mut expansions = 0;
    let mut improvements = 0;
    let mut stale = 0;
    while let Some((index, level)) = dial.pop() {
        if dest[index] != level {
            stale += 1;
            continue;
        }
        improvements += expand(seed, dest, dial, index)?;
        expansions += 1;
    }
    Ok(PropagationStats {
        seeds,
        pushes: dial.pushed(),
        expansions,
        improvements,
        stale,
    })
}

/// Seeds and drains in priority order. `dest` must be zeroed by the caller.
pub fn run_propagation_dial(
    seed: &SeedField,
    dest: &mut LightField,
    dial: &mut DialWorklist,
    emitters: EmitterSeeding,
) -> Result<PropagationStats, LightError> {
    debug_assert!(seed.border_is_opaque(), "seed field border is not opaque");
    debug_assert_eq!(seed.dims(), dest.dims());
    let start = std::time::Instant::now();
    let seeds = scan_seeds(seed, dest, dial, emitters)?;
    let stats = propagate_dial(seed, dest, dial, seeds)?;
    log::debug!(
        target: "perf",
        "us={} lighting_dial side={} seeds={} pushes={} expansions={} stale={}",
        start.elapsed().as_micros(),
        seed.dims().side(),
        stats.seeds,
        stats.pushes,
        stats.expansions,
        stats.stale
    );
    Ok(stats)
}
