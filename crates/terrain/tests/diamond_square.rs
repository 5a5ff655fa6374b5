//! End-to-end properties of generated terrain.

use rand::SeedableRng;
use rand::rngs::StdRng;
use terrain::{Heightmap, TerrainGenerator, TerrainParams, generate};

fn heightmap(params: TerrainParams, seed: u64) -> Heightmap {
    let mut rng = StdRng::seed_from_u64(seed);
    TerrainGenerator::new(params)
        .unwrap()
        .generate_heightmap(&mut rng)
        .unwrap()
}

#[test]
fn test_vertex_and_face_counts() {
    for order in 1..=8 {
        let mesh = generate(&TerrainParams::new(order), Some(1)).unwrap();
        let size = (1usize << order) + 1;
        assert_eq!(mesh.vertex_count(), size * size, "order {order}");
        assert_eq!(mesh.face_count(), (size - 1) * (size - 1), "order {order}");
    }
}

#[test]
fn test_face_indices_in_range_and_distinct() {
    let mesh = generate(&TerrainParams::new(5), Some(9)).unwrap();
    let count = mesh.vertex_count();

    for face in &mesh.faces {
        assert!(face.iter().all(|&idx| idx < count), "{face:?}");
        for a in 0..4 {
            for b in (a + 1)..4 {
                assert_ne!(face[a], face[b], "{face:?}");
            }
        }
    }
}

#[test]
fn test_same_seed_is_bit_identical() {
    let params = TerrainParams::new(6).with_scale(2.0, 3.0, 4.0);
    let first = generate(&params, Some(12345)).unwrap();
    let second = generate(&params, Some(12345)).unwrap();

    let bits = |m: &terrain::Mesh| -> Vec<u64> {
        m.vertices
            .iter()
            .flat_map(|v| v.iter().map(|c| c.to_bits()))
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(first.faces, second.faces);
}

#[test]
fn test_different_seeds_differ() {
    let params = TerrainParams::new(4);
    let a = generate(&params, Some(1)).unwrap();
    let b = generate(&params, Some(2)).unwrap();
    assert_ne!(a.vertices, b.vertices);
}

#[test]
fn test_unseeded_generation_succeeds() {
    let mesh = generate(&TerrainParams::new(3), None).unwrap();
    assert_eq!(mesh.vertex_count(), 81);
    assert!(mesh.vertices.iter().all(|v| v[2].is_finite()));
}

#[test]
fn test_seamless_edges_wrap() {
    for order in 1..=7 {
        for seed in [0, 42, 777] {
            let grid = heightmap(TerrainParams::new(order).seamless(true), seed);
            let last = grid.size() - 1;

            assert_eq!(grid.row(0), grid.row(last), "order {order} seed {seed}");
            let first_col: Vec<f64> = grid.column(0).collect();
            let last_col: Vec<f64> = grid.column(last).collect();
            assert_eq!(first_col, last_col, "order {order} seed {seed}");
        }
    }
}

#[test]
fn test_order_two_seamless_wrap_is_exact() {
    let mesh = generate(&TerrainParams::new(2).seamless(true), Some(2024)).unwrap();
    let size = 5;

    for col in 0..size {
        let top = mesh.vertices[col][2];
        let bottom = mesh.vertices[(size - 1) * size + col][2];
        assert_eq!(top.to_bits(), bottom.to_bits(), "column {col}");
    }
    for row in 0..size {
        let left = mesh.vertices[row * size][2];
        let right = mesh.vertices[row * size + size - 1][2];
        assert_eq!(left.to_bits(), right.to_bits(), "row {row}");
    }
}

#[test]
fn test_seamless_corners_stay_flat() {
    let grid = heightmap(TerrainParams::new(4).seamless(true), 5);
    let last = grid.size() - 1;
    for (row, col) in [(0, 0), (0, last), (last, 0), (last, last)] {
        assert_eq!(grid.get(row, col), 0.0);
    }
}

#[test]
fn test_scale_is_linear() {
    let (w, h, d) = (12.5, 3.0, 0.75);
    let unit = generate(&TerrainParams::new(5), Some(99)).unwrap();
    let scaled = generate(&TerrainParams::new(5).with_scale(w, h, d), Some(99)).unwrap();

    assert_eq!(unit.faces, scaled.faces);
    for (u, s) in unit.vertices.iter().zip(&scaled.vertices) {
        assert_eq!(u[0] * w, s[0]);
        assert_eq!(u[1] * d, s[1]);
        assert_eq!(u[2] * h, s[2]);
    }
}

#[test]
fn test_first_level_displacement_bounded() {
    for seed in 0..20 {
        let grid = heightmap(TerrainParams::new(4), seed);
        let last = grid.size() - 1;
        let mid = last / 2;
        let avg = (grid.get(0, 0) + grid.get(0, last) + grid.get(last, 0) + grid.get(last, last))
            / 4.0;
        // k = 0: factor 1/2, noise within half of it
        assert!((grid.get(mid, mid) - avg).abs() <= 0.25 + 1e-12, "seed {seed}");
    }
}

#[test]
fn test_last_level_displacement_bounded() {
    for order in 2..=6 {
        let grid = heightmap(TerrainParams::new(order), u64::from(order));
        let size = grid.size();
        let last = size - 1;
        let bound = 0.5 / f64::from(1u32 << order) + 1e-12;

        for row in 0..size {
            for col in 0..size {
                let mut neighbours = Vec::new();
                match (row % 2, col % 2) {
                    (1, 1) => {
                        neighbours.extend([
                            grid.get(row - 1, col - 1),
                            grid.get(row - 1, col + 1),
                            grid.get(row + 1, col - 1),
                            grid.get(row + 1, col + 1),
                        ]);
                    }
                    (0, 1) => {
                        neighbours.extend([grid.get(row, col - 1), grid.get(row, col + 1)]);
                        if row > 0 {
                            neighbours.push(grid.get(row - 1, col));
                        }
                        if row < last {
                            neighbours.push(grid.get(row + 1, col));
                        }
                    }
                    (1, 0) => {
                        neighbours.extend([grid.get(row - 1, col), grid.get(row + 1, col)]);
                        if col > 0 {
                            neighbours.push(grid.get(row, col - 1));
                        }
                        if col < last {
                            neighbours.push(grid.get(row, col + 1));
                        }
                    }
                    _ => continue,
                }

                let avg = neighbours.iter().sum::<f64>() / neighbours.len() as f64;
                let delta = (grid.get(row, col) - avg).abs();
                assert!(
                    delta <= bound,
                    "order {order} cell ({row}, {col}) delta {delta} > {bound}"
                );
            }
        }
    }
}

#[test]
fn test_every_cell_assigned() {
    let grid = heightmap(TerrainParams::new(5), 31);
    // With random corners every cell receives a non-zero displaced value.
    assert!(grid.elevations().iter().all(|z| *z != 0.0));
}
