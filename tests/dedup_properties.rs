use mesh_topo::algs::dedup::{sorted_rows, unique_rows};
use mesh_topo::algs::meshgen::raster;
use mesh_topo::prelude::*;
use proptest::prelude::*;

fn rows(width: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(prop::collection::vec(0usize..12, width), 0..40)
        .prop_map(|rows| rows.into_iter().flatten().collect())
}

proptest! {
    #[test]
    fn canonicalization_is_idempotent(edges in rows(2)) {
        let once = sorted_rows(&edges, 2).unwrap();
        let twice = sorted_rows(&once, 2).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn counts_sum_to_row_count(width in 2usize..5, seed in rows(4)) {
        let n = seed.len() / 4 * 4 / width * width;
        let data = &seed[..n];
        let unique = unique_rows(data, width).unwrap();
        prop_assert_eq!(unique.counts().iter().sum::<usize>(), n / width);
        prop_assert_eq!(unique.inverse().len(), n / width);
    }

    #[test]
    fn inverse_points_at_matching_key(faces in rows(3)) {
        let unique = unique_rows(&faces, 3).unwrap();
        let sorted = sorted_rows(&faces, 3).unwrap();
        for (row, &uid) in unique.inverse().iter().enumerate() {
            prop_assert_eq!(Some(&sorted[row * 3..row * 3 + 3]), unique.key(uid));
        }
        // first occurrences are strictly increasing
        prop_assert!(unique.first_occurrence().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn permuting_a_row_keeps_its_key(mut quad in prop::collection::vec(0usize..50, 4), k in 0usize..4) {
        let original = quad.clone();
        quad.rotate_left(k);
        quad.reverse();
        let mut both = original;
        both.extend_from_slice(&quad);
        let unique = unique_rows(&both, 4).unwrap();
        prop_assert_eq!(unique.len(), 1);
        prop_assert_eq!(unique.counts(), &[2]);
    }

    #[test]
    fn compaction_round_trips(ids in prop::collection::vec(0usize..20, 1..10)) {
        let points = raster(&[0.0, 0.0], &[3.0, 4.0], &[4, 5]).unwrap();
        let edges_ids: Vec<usize> = ids.iter().chain(ids.iter().rev()).copied().collect();
        let edges = ElementSet::try_new(CellType::Segment, points, edges_ids).unwrap();
        let compact = edges.remove_unreferenced_vertices().unwrap();

        prop_assert_eq!(compact.elements.points().len(), edges.referenced_vertices().len());
        for (new, old) in compact.elements.elements().iter().zip(edges.elements()) {
            prop_assert_eq!(compact.old_ids[*new], *old);
            prop_assert_eq!(
                compact.elements.points().try_point(*new).unwrap(),
                edges.points().try_point(*old).unwrap()
            );
        }
    }
}
