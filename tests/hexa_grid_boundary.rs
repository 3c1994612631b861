use mesh_topo::algs::meshgen::{raster, structured_hexa};
use mesh_topo::algs::shrink::ShrinkOptions;
use mesh_topo::prelude::*;

fn grid() -> ElementSet {
    structured_hexa([0.0; 3], [1.0; 3], [2, 3, 4]).unwrap()
}

#[test]
fn raster_2x3x4_face_counts() {
    let volumes = grid();
    assert_eq!(volumes.len(), 6);

    let faces = volumes.to_faces(false).unwrap();
    assert_eq!(faces.len(), 36);

    let unique = volumes.unique_faces().unwrap();
    assert_eq!(unique.len(), 29);
    assert_eq!(unique.counts().iter().sum::<usize>(), 36);
    assert!(unique.counts().iter().all(|&c| c == 1 || c == 2));

    // 2 * (1*2 + 2*3 + 1*3) unit squares on the outside
    let boundary = volumes.single_faces().unwrap();
    assert_eq!(boundary.len(), 22);
    assert_eq!(boundary.cell_type(), CellType::Quadrilateral);
}

#[test]
fn boundary_faces_lie_on_the_box() {
    let volumes = grid();
    let boundary = volumes.single_faces().unwrap();
    let centers = boundary.centers().unwrap();
    let on_box = |x: f64| x.abs() < 1e-12 || (x - 1.0).abs() < 1e-12;
    for c in centers.iter() {
        assert!(c.iter().any(|&x| on_box(x)), "interior face center {c:?}");
    }
}

#[test]
fn interior_faces_are_shared() {
    let volumes = grid();
    let unique = volumes.unique_faces().unwrap();
    let shared = unique.counts().iter().filter(|&&c| c == 2).count();
    assert_eq!(shared, 7);
}

#[test]
fn face_owners_split_boundary_from_interior() {
    let volumes = grid();
    let unique = volumes.unique_faces().unwrap();
    assert_eq!(unique.rows_per_parent(), 6);

    let owners = volumes.face_owners().unwrap();
    assert_eq!(owners.len(), 29);
    assert_eq!(owners.iter().filter(|o| o.len() == 1).count(), 22);
    assert_eq!(owners.iter().filter(|o| o.len() == 2).count(), 7);
    for (uid, o) in owners.iter().enumerate() {
        assert_eq!(o.len(), unique.counts()[uid]);
        assert_eq!(unique.owners(uid), *o);
        // hexahedra are numbered y (stride 1) then z (stride 2)
        if let [a, b] = o[..] {
            assert!(b - a == 1 || b - a == 2, "face {uid} owned by {a} and {b}");
        }
    }

    // every single face belongs to the element it was derived from
    for row in volumes.single_face_ids().unwrap() {
        let uid = unique.inverse()[row];
        assert_eq!(owners[uid], vec![row / 6]);
    }
}

#[test]
fn raster_2x3x4_edge_counts() {
    let volumes = grid();
    assert_eq!(volumes.edges().unwrap().len() / 2, 72);
    // x: 1*3*4, y: 2*2*4, z: 2*3*3
    assert_eq!(volumes.unique_edges().unwrap().len(), 12 + 16 + 18);
}

#[test]
fn surface_edges_of_boundary() {
    // boundary of a closed surface is empty
    let surface = grid().single_faces().unwrap();
    assert!(surface.single_edges().unwrap().is_empty());
    assert_eq!(surface.unique_edges().unwrap().len(), 44);
}

#[test]
fn shrink_faces_edges_chain() {
    let volumes = grid();
    let edges = volumes
        .shrink(ShrinkOptions::default())
        .unwrap()
        .to_faces(false)
        .unwrap()
        .shrink(ShrinkOptions::default())
        .unwrap()
        .to_edges(false)
        .unwrap()
        .shrink(ShrinkOptions::default())
        .unwrap();
    assert_eq!(edges.len(), 6 * 6 * 4);
    assert_eq!(edges.points().len(), 6 * 6 * 4 * 2);
    // every element is isolated after shrinking
    assert_eq!(edges.single_edges().unwrap().len(), edges.len());
}

#[test]
fn direct_edges_keep_parent_order() {
    let volumes = grid();
    let mut direct = volumes.to_edges(false).unwrap();
    direct.vis.arrows = true;
    let shrunk = direct.shrink(ShrinkOptions { factor: 0.9 }).unwrap();
    assert!(shrunk.vis.arrows);
    assert_eq!(shrunk.len(), 72);
    assert_eq!(direct.element(0).unwrap(), &[0, 1]);
    assert_eq!(direct.element(11).unwrap(), &[2, 8]);
}

/// 3x3x3 hexahedra with vertex ids wrapped on every axis: a closed volume
/// (a 3-torus) where every face separates two distinct hexahedra.
fn periodic_hexa() -> ElementSet {
    const N: usize = 3;
    let points = raster(&[0.0; 3], &[1.0; 3], &[N, N, N]).unwrap();
    let id = |i: usize, j: usize, k: usize| (k % N) * N * N + (j % N) * N + i % N;
    let mut hex = Vec::with_capacity(N * N * N * 8);
    for k in 0..N {
        for j in 0..N {
            for i in 0..N {
                hex.extend_from_slice(&[
                    id(i, j, k),
                    id(i + 1, j, k),
                    id(i + 1, j + 1, k),
                    id(i, j + 1, k),
                    id(i, j, k + 1),
                    id(i + 1, j, k + 1),
                    id(i + 1, j + 1, k + 1),
                    id(i, j + 1, k + 1),
                ]);
            }
        }
    }
    ElementSet::try_new(CellType::Hexahedron, points, hex).unwrap()
}

#[test]
fn closed_volume_has_no_single_faces() {
    let torus = periodic_hexa();
    assert_eq!(torus.len(), 27);
    assert!(torus.diagnose().is_empty());

    let unique = torus.unique_faces().unwrap();
    // one face per hexahedron and axis
    assert_eq!(unique.len(), 81);
    assert!(unique.counts().iter().all(|&c| c == 2));
    assert!(torus.single_faces().unwrap().is_empty());
    assert!(torus.single_face_ids().unwrap().is_empty());

    for owners in torus.face_owners().unwrap() {
        assert_eq!(owners.len(), 2);
        assert!(owners[0] < owners[1]);
    }
}

#[test]
fn closed_volume_edges_have_four_owners() {
    let torus = periodic_hexa();
    let owners = torus.edge_owners().unwrap();
    assert_eq!(owners.len(), 81);
    assert!(owners.iter().all(|o| o.len() == 4));
    assert!(torus.single_edges().unwrap().is_empty());
}
