use lumen_grid::ChunkDims;

use crate::LightError;

/// Pushes per cell the worklist is provisioned for.
pub const PUSHES_PER_CELL: usize = 6;

/// Fixed-capacity, append-only list of pending cell indices.
///
/// The buffer is allocated once; a run only moves the logical end. Entries are
/// never removed, the drain walks them with a cursor while the end grows.
#[derive(Clone, Debug)]
pub struct Worklist {
    items: Vec<u32>,
    end: usize,
}

impl Worklist {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: vec![0; capacity],
            end: 0,
        }
    }

    /// Capacity of `6 * volume`, enough for every cell to be reached from all six sides.
    pub fn for_dims(dims: &ChunkDims) -> Self {
        Self::with_capacity(PUSHES_PER_CELL * dims.volume())
    }

    #[inline]
    pub fn clear(&mut self) {
        self.end = 0;
    }

    /// Appends `index` and returns the new end.
    #[inline]
    pub fn push(&mut self, index: usize) -> Result<usize, LightError> {
        let Some(slot) = self.items.get_mut(self.end) else {
            return Err(LightError::WorklistOverflow {
                capacity: self.items.len(),
            });
        };
        *slot = index as u32;
        self.end += 1;
        Ok(self.end)
    }

    #[inline]
    pub fn get(&self, cursor: usize) -> Option<usize> {
        if cursor < self.end {
            Some(self.items[cursor] as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.items[..self.end]
    }
}
