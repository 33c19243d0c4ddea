use std::ops::{Index, IndexMut};

use crate::{ChunkDims, GridError, Light};

/// Legacy packed encoding of the opaque sentinel.
pub const OPAQUE_RAW: i32 = -128;

/// What a cell does to light passing through it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Seed {
    /// Light leaving this cell starts at `strength`, whatever arrived.
    /// `Emitter(0)` is a dark cell: it never lights and passes nothing on.
    Emitter(u16),
    /// Light passing through loses `cost`.
    Medium(u16),
    /// Light never enters.
    Opaque,
}

impl Default for Seed {
    fn default() -> Self {
        Seed::DARK
    }
}

impl Seed {
    /// Packed value 0. Light arriving here resolves to 0.
    pub const DARK: Seed = Seed::Emitter(0);

    /// Decodes the packed integer form: non-negative emits (0 is dark),
    /// `<= OPAQUE_RAW` is opaque, anything else is a medium costing `-raw`.
    pub fn from_raw(raw: i32) -> Seed {
        if raw >= 0 {
            Seed::Emitter(raw.min(u16::MAX as i32) as u16)
        } else if raw <= OPAQUE_RAW {
            Seed::Opaque
        } else {
            Seed::Medium((-raw) as u16)
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            Seed::Emitter(s) => s as i32,
            Seed::Medium(c) => -(c as i32),
            Seed::Opaque => OPAQUE_RAW,
        }
    }

    #[inline]
    pub fn is_emitter(self) -> bool {
        matches!(self, Seed::Emitter(s) if s > 0)
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        matches!(self, Seed::Opaque)
    }
}

/// Per-cell seeds for one chunk.
#[derive(Clone, Debug)]
pub struct SeedField {
    dims: ChunkDims,
    cells: Vec<Seed>,
}

impl SeedField {
    pub fn new(dims: ChunkDims) -> Self {
        Self {
            dims,
            cells: vec![Seed::DARK; dims.volume()],
        }
    }

    /// Decodes a packed chunk. `raw` must hold exactly one value per cell.
    pub fn from_raw(dims: ChunkDims, raw: &[i32]) -> Result<Self, GridError> {
        if raw.len() != dims.volume() {
            return Err(GridError::CellCount {
                got: raw.len(),
                expected: dims.volume(),
            });
        }
        let cells = raw.iter().copied().map(Seed::from_raw).collect();
        Ok(Self { dims, cells })
    }

    #[inline]
    pub fn dims(&self) -> &ChunkDims {
        &self.dims
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Seed {
        self.cells[self.dims.index(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, seed: Seed) {
        let i = self.dims.index(x, y, z);
        self.cells[i] = seed;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Seed] {
        &self.cells
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Seed] {
        &mut self.cells
    }

    pub fn fill(&mut self, seed: Seed) {
        self.cells.fill(seed);
    }

    /// Writes `Opaque` into every cell on the six outer faces.
    pub fn set_border_opaque(&mut self) {
        let n = self.dims.side();
        let m = n - 1;
        for i in 0..n {
            for j in 0..n {
                for (x, y, z) in [(j, i, 0), (j, 0, i), (0, j, i), (j, i, m), (j, m, i), (m, j, i)] {
                    let idx = self.dims.index(x, y, z);
                    self.cells[idx] = Seed::Opaque;
                }
            }
        }
    }

    /// True when every outer face cell is opaque.
    pub fn border_is_opaque(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(i, s)| s.is_opaque() || !self.dims.is_border_index(i))
    }

    pub fn emitter_count(&self) -> usize {
        self.cells.iter().filter(|s| s.is_emitter()).count()
    }
}

impl Index<usize> for SeedField {
    type Output = Seed;
    #[inline]
    fn index(&self, i: usize) -> &Seed {
        &self.cells[i]
    }
}

impl IndexMut<usize> for SeedField {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Seed {
        &mut self.cells[i]
    }
}

/// Converged light per cell. Must be zeroed before each propagation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightField {
    dims: ChunkDims,
    values: Vec<Light>,
}

impl LightField {
    pub fn new(dims: ChunkDims) -> Self {
        Self {
            dims,
            values: vec![0; dims.volume()],
        }
    }

    #[inline]
    pub fn dims(&self) -> &ChunkDims {
        &self.dims
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Light {
        self.values[self.dims.index(x, y, z)]
    }

    #[inline]
    pub fn as_slice(&self) -> &[Light] {
        &self.values
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Light] {
        &mut self.values
    }

    pub fn clear(&mut self) {
        self.values.fill(0);
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0)
    }

    pub fn max_level(&self) -> Light {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

impl Index<usize> for LightField {
    type Output = Light;
    #[inline]
    fn index(&self, i: usize) -> &Light {
        &self.values[i]
    }
}

impl IndexMut<usize> for LightField {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Light {
        &mut self.values[i]
    }
}
