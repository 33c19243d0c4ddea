use lumen_grid::{ChunkDims, Face, Light, LightField, Seed, SeedField};

use crate::LightError;

// Shell depths: 0 is the opaque sentinel, 1 holds light copied from a
// neighbor, 2 is the chunk's own outermost interior layer.
const STITCH_DEPTH: usize = 1;
const EDGE_DEPTH: usize = 2;

/// Light on the outermost interior layer of each face, ready to be copied
/// into a neighbor's stitching shell.
///
/// Planes are `m * m` with `m = side - 4`, indexed interior-relative:
/// X faces `y * m + z`, Y faces `z * m + x`, Z faces `y * m + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightBorders {
    m: usize,
    planes: [Vec<Light>; 6],
}

impl LightBorders {
    pub fn from_field(dest: &LightField) -> Result<Self, LightError> {
        let dims = *dest.dims();
        let m = plane_side(&dims)?;
        let planes = Face::ALL.map(|face| {
            let w = face.layer(&dims, EDGE_DEPTH);
            let mut plane = vec![0; m * m];
            for u in 0..m {
                for v in 0..m {
                    let (x, y, z) = face.plane_to_xyz(w, u + EDGE_DEPTH, v + EDGE_DEPTH);
                    plane[u * m + v] = dest.get(x, y, z);
                }
            }
            plane
        });
        // Face::ALL is in discriminant order, so planes[face.index()] lines up.
        Ok(Self { m, planes })
    }

    #[inline]
    pub fn plane_side(&self) -> usize {
        self.m
    }

    #[inline]
    pub fn plane(&self, face: Face) -> &[Light] {
        &self.planes[face.index()]
    }
}

fn plane_side(dims: &ChunkDims) -> Result<usize, LightError> {
    let dims = ChunkDims::stitchable(dims.side())?;
    Ok(dims.side() - 2 * EDGE_DEPTH)
}

/// Copies a neighbor's facing plane into this chunk's stitching shell on `face`.
///
/// `plane` is the neighbor's `LightBorders::plane(face.opposite())`. Lit cells
/// become emitters at the neighbor's level, dark ones opaque, so light only
/// enters from the neighbor and never leaks back into the shell.
pub fn stitch_neighbor_plane(
    seed: &mut SeedField,
    face: Face,
    plane: &[Light],
) -> Result<(), LightError> {
    let dims = *seed.dims();
    let m = plane_side(&dims)?;
    if plane.len() != m * m {
        return Err(LightError::PlaneSize {
            got: plane.len(),
            expected: m * m,
        });
    }
    let w = face.layer(&dims, STITCH_DEPTH);
    for u in 0..m {
        for v in 0..m {
            let (x, y, z) = face.plane_to_xyz(w, u + EDGE_DEPTH, v + EDGE_DEPTH);
            let level = plane[u * m + v];
            let s = if level > 0 {
                Seed::Emitter(level.min(u16::MAX as Light) as u16)
            } else {
                Seed::Opaque
            };
            seed.set(x, y, z, s);
        }
    }
    Ok(())
}
