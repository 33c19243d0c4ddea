//! Cubic chunk addressing, seed cells, and flat light fields.
#![forbid(unsafe_code)]

pub mod field;

pub use field::{LightField, OPAQUE_RAW, Seed, SeedField};

/// Light level stored per cell.
pub type Light = i32;

/// Default cube side: 16 interior cells plus a stitching shell and an opaque shell per side.
pub const LINSIZE: usize = 16 + 4;

/// Smallest side with at least one cell inside the opaque shell.
pub const MIN_SIDE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("chunk side {side} is smaller than the minimum {min}")]
    InvalidSide { side: usize, min: usize },
    #[error("chunk holds {expected} cells, got {got}")]
    CellCount { got: usize, expected: usize },
}

/// Side length and strides of a cubic chunk.
///
/// Cells are packed as `x * dx + y * dy + z * dz`: unit stride along X,
/// row stride along Y, plane stride along Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDims {
    side: usize,
    dx: usize,
    dy: usize,
    dz: usize,
    volume: usize,
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self::with_min(LINSIZE)
    }
}

impl ChunkDims {
    pub fn new(side: usize) -> Result<Self, GridError> {
        if side < MIN_SIDE {
            return Err(GridError::InvalidSide { side, min: MIN_SIDE });
        }
        Ok(Self::with_min(side))
    }

    /// Like [`ChunkDims::new`] but for sides that also carry a stitching shell.
    pub fn stitchable(side: usize) -> Result<Self, GridError> {
        if side < MIN_SIDE + 2 {
            return Err(GridError::InvalidSide { side, min: MIN_SIDE + 2 });
        }
        Ok(Self::with_min(side))
    }

    const fn with_min(side: usize) -> Self {
        Self {
            side,
            dx: 1,
            dy: side,
            dz: side * side,
            volume: side * side * side,
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.volume
    }

    #[inline]
    pub fn dx(&self) -> usize {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> usize {
        self.dy
    }

    #[inline]
    pub fn dz(&self) -> usize {
        self.dz
    }

    /// Linear index of `(x, y, z)`. Panics when a coordinate is outside `[0, side)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < self.side && y < self.side && z < self.side,
            "coordinate ({x}, {y}, {z}) outside chunk of side {}",
            self.side
        );
        x * self.dx + y * self.dy + z * self.dz
    }

    #[inline]
    pub fn try_index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        if x < self.side && y < self.side && z < self.side {
            Some(x * self.dx + y * self.dy + z * self.dz)
        } else {
            None
        }
    }

    /// Inverse of [`ChunkDims::index`].
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        debug_assert!(index < self.volume);
        let z = index / self.dz;
        let rem = index % self.dz;
        (rem % self.dy, rem / self.dy, z)
    }

    /// Signed offsets to the six axis neighbors: +X, +Y, +Z, -X, -Y, -Z.
    #[inline]
    pub fn neighbor_offsets(&self) -> [isize; 6] {
        let (dx, dy, dz) = (self.dx as isize, self.dy as isize, self.dz as isize);
        [dx, dy, dz, -dx, -dy, -dz]
    }

    /// True for cells on any of the six outer faces.
    #[inline]
    pub fn is_border(&self, x: usize, y: usize, z: usize) -> bool {
        let m = self.side - 1;
        x == 0 || y == 0 || z == 0 || x == m || y == m || z == m
    }

    #[inline]
    pub fn is_border_index(&self, index: usize) -> bool {
        let (x, y, z) = self.coords(index);
        self.is_border(x, y, z)
    }
}

/// Chunk face, numbered like the mesher faces: 0=+Y, 1=-Y, 2=+X, 3=-X, 4=+Z, 5=-Z.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn opposite(self) -> Face {
        match self {
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }

    #[inline]
    pub fn normal(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// Coordinate along the face normal at shell `depth` (0 = outermost).
    #[inline]
    pub fn layer(self, dims: &ChunkDims, depth: usize) -> usize {
        match self {
            Face::PosY | Face::PosX | Face::PosZ => dims.side() - 1 - depth,
            Face::NegY | Face::NegX | Face::NegZ => depth,
        }
    }

    /// Maps in-plane coordinates `(u, v)` on the layer `w` to chunk `(x, y, z)`.
    ///
    /// X faces use `(u, v) = (y, z)`, Y faces `(z, x)`, Z faces `(y, x)`.
    #[inline]
    pub fn plane_to_xyz(self, w: usize, u: usize, v: usize) -> (usize, usize, usize) {
        match self {
            Face::PosX | Face::NegX => (w, u, v),
            Face::PosY | Face::NegY => (v, w, u),
            Face::PosZ | Face::NegZ => (v, u, w),
        }
    }
}
