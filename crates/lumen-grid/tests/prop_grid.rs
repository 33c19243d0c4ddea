use lumen_grid::{ChunkDims, Face, GridError, LightField, OPAQUE_RAW, Seed, SeedField};
use proptest::prelude::*;

fn side() -> impl Strategy<Value = usize> {
    3usize..=9
}

proptest! {
    // index maps each (x,y,z) within bounds to unique in-range indices
    #[test]
    fn index_is_unique_and_in_range(n in side()) {
        let dims = ChunkDims::new(n).unwrap();
        let mut seen = vec![false; dims.volume()];
        for z in 0..n { for y in 0..n { for x in 0..n {
            let i = dims.index(x, y, z);
            prop_assert!(i < dims.volume());
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // coords inverts index
    #[test]
    fn coords_inverts_index(n in side(), x in 0usize..9, y in 0usize..9, z in 0usize..9) {
        let dims = ChunkDims::new(n).unwrap();
        prop_assume!(x < n && y < n && z < n);
        let i = dims.index(x, y, z);
        prop_assert_eq!(dims.coords(i), (x, y, z));
        prop_assert_eq!(dims.try_index(x, y, z), Some(i));
    }

    // try_index rejects anything outside the cube
    #[test]
    fn try_index_rejects_out_of_range(n in side(), x in 0usize..20, y in 0usize..20, z in 0usize..20) {
        let dims = ChunkDims::new(n).unwrap();
        let inside = x < n && y < n && z < n;
        prop_assert_eq!(dims.try_index(x, y, z).is_some(), inside);
    }

    // raw decoding keeps emitters and media, collapses the sentinel range, 0 is dark
    #[test]
    fn raw_seed_decoding(raw in -300i32..300) {
        let s = Seed::from_raw(raw);
        if raw >= 0 {
            prop_assert_eq!(s, Seed::Emitter(raw as u16));
            prop_assert_eq!(s.is_emitter(), raw > 0);
            prop_assert_eq!(s.to_raw(), raw);
        } else if raw <= OPAQUE_RAW {
            prop_assert_eq!(s, Seed::Opaque);
            prop_assert_eq!(s.to_raw(), OPAQUE_RAW);
        } else {
            prop_assert_eq!(s, Seed::Medium((-raw) as u16));
            prop_assert_eq!(s.to_raw(), raw);
        }
    }
}

#[test]
fn strides_follow_side() {
    let dims = ChunkDims::new(7).unwrap();
    assert_eq!((dims.dx(), dims.dy(), dims.dz()), (1, 7, 49));
    assert_eq!(dims.volume(), 343);
    assert_eq!(dims.index(1, 2, 3), 1 + 2 * 7 + 3 * 49);
    assert_eq!(dims.neighbor_offsets(), [1, 7, 49, -1, -7, -49]);
}

#[test]
fn default_dims_are_linsize() {
    let dims = ChunkDims::default();
    assert_eq!(dims.side(), 20);
    assert_eq!(dims.volume(), 8000);
}

#[test]
fn too_small_sides_are_rejected() {
    assert_eq!(ChunkDims::new(2), Err(GridError::InvalidSide { side: 2, min: 3 }));
    assert!(ChunkDims::new(3).is_ok());
    assert_eq!(ChunkDims::stitchable(4), Err(GridError::InvalidSide { side: 4, min: 5 }));
    assert!(ChunkDims::stitchable(5).is_ok());
}

#[test]
#[should_panic]
fn index_panics_out_of_range() {
    let dims = ChunkDims::new(4).unwrap();
    let _ = dims.index(4, 0, 0);
}

#[test]
fn border_is_exactly_the_outer_shell() {
    let dims = ChunkDims::new(5).unwrap();
    let mut seed = SeedField::new(dims);
    assert!(!seed.border_is_opaque());
    seed.set_border_opaque();
    assert!(seed.border_is_opaque());
    let mut opaque = 0;
    for z in 0..5 { for y in 0..5 { for x in 0..5 {
        let s = seed.get(x, y, z);
        assert_eq!(s.is_opaque(), dims.is_border(x, y, z), "at ({x},{y},{z})");
        if s.is_opaque() { opaque += 1; }
    }}}
    assert_eq!(opaque, 125 - 27);

    seed.set(0, 2, 2, Seed::Medium(1));
    assert!(!seed.border_is_opaque());
}

#[test]
fn emitter_count_ignores_media() {
    let dims = ChunkDims::new(4).unwrap();
    let raw: Vec<i32> = (0..dims.volume() as i32).map(|i| if i % 10 == 0 { 3 } else { -1 }).collect();
    let seed = SeedField::from_raw(dims, &raw).unwrap();
    assert_eq!(seed.emitter_count(), 7);
}

#[test]
fn raw_chunk_must_match_volume() {
    let dims = ChunkDims::new(3).unwrap();
    assert_eq!(
        SeedField::from_raw(dims, &[-1; 26]).unwrap_err(),
        GridError::CellCount { got: 26, expected: 27 }
    );
    assert_eq!(
        SeedField::from_raw(dims, &[-1; 28]).unwrap_err(),
        GridError::CellCount { got: 28, expected: 27 }
    );
    let seed = SeedField::from_raw(dims, &[0; 27]).unwrap();
    assert!(seed.as_slice().iter().all(|s| *s == Seed::DARK));
    assert_eq!(seed.as_slice(), SeedField::new(dims).as_slice());
}

#[test]
fn light_field_reads_by_coordinate() {
    let dims = ChunkDims::new(4).unwrap();
    let mut lf = LightField::new(dims);
    assert!(lf.is_zero());
    let i = dims.index(1, 2, 3);
    lf[i] = 9;
    assert_eq!(lf.get(1, 2, 3), 9);
    assert_eq!(lf.max_level(), 9);
    lf.clear();
    assert!(lf.is_zero());
}

#[test]
fn face_layers_and_planes() {
    let dims = ChunkDims::new(6).unwrap();
    assert_eq!(Face::PosX.layer(&dims, 0), 5);
    assert_eq!(Face::NegZ.layer(&dims, 1), 1);
    assert_eq!(Face::PosY.layer(&dims, 2), 3);
    for f in Face::ALL {
        assert_eq!(f.opposite().opposite(), f);
        let (a, b, c) = f.normal();
        let (d, e, g) = f.opposite().normal();
        assert_eq!((a + d, b + e, c + g), (0, 0, 0));
    }
    // X planes carry (y, z), Y planes (z, x), Z planes (y, x)
    assert_eq!(Face::PosX.plane_to_xyz(5, 1, 2), (5, 1, 2));
    assert_eq!(Face::NegY.plane_to_xyz(0, 1, 2), (2, 0, 1));
    assert_eq!(Face::PosZ.plane_to_xyz(5, 1, 2), (2, 1, 5));
}
