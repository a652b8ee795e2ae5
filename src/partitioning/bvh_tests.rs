use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Real, Vector};
use crate::partitioning::{Bvh, BvhBuildError, BvhWorkspace};
use crate::shape::Triangle;
use approx::assert_relative_eq;

fn make_test_aabb(i: usize) -> Aabb {
    Aabb::from_half_extents(Vector::repeat(i as Real).into(), Vector::repeat(1.0))
}

fn random_aabb(rng: &mut oorandom::Rand32) -> Aabb {
    let center = Point::new(
        rng.rand_float() * 20.0 - 10.0,
        rng.rand_float() * 20.0 - 10.0,
        rng.rand_float() * 20.0 - 10.0,
    );
    let half_extents = Vector::new(
        rng.rand_float() + 0.1,
        rng.rand_float() + 0.1,
        rng.rand_float() + 0.1,
    );
    Aabb::from_half_extents(center, half_extents)
}

// Recomputes the exact union of a node's children and compares.
fn assert_exact_enclosure(bvh: &Bvh<Aabb>) {
    for id in bvh.collect_nodes() {
        let node = bvh.node(id);
        if node.is_leaf() {
            continue;
        }

        let mut union = *bvh.node(node.children()[0]).volume();
        for &child in &node.children()[1..] {
            union.merge(bvh.node(child).volume());
        }

        assert_relative_eq!(*node.volume(), union, epsilon = 1.0e-6);
    }
}

#[test]
fn build_is_well_formed() {
    for len in 0..=64 {
        let leaves: Vec<_> = (0..len).map(make_test_aabb).collect();
        let bvh = Bvh::from_leaves(&leaves);

        bvh.assert_well_formed();
        assert_eq!(bvh.collect_nodes().len(), bvh.node_count());
        assert_eq!(bvh.collect_leaves().len(), len);
        assert_eq!(bvh.leaf_count(), len);

        // Every input leaf index must appear exactly once.
        let mut seen = vec![false; len];
        for leaf in bvh.collect_leaves() {
            let data = bvh.node(leaf).leaf_data().unwrap() as usize;
            assert!(!seen[data]);
            seen[data] = true;
        }
    }
}

#[test]
fn bfs_parents_before_descendants() {
    let leaves: Vec<_> = (0..33).map(make_test_aabb).collect();
    let bvh = Bvh::from_leaves(&leaves);

    let order = bvh.collect_nodes();
    let mut position = vec![usize::MAX; bvh.node_count()];
    for (pos, id) in order.iter().enumerate() {
        position[*id as usize] = pos;
    }

    assert_eq!(order[0], bvh.root().unwrap());
    for &id in &order {
        if let Some(parent) = bvh.node(id).parent() {
            assert!(position[parent as usize] < position[id as usize]);
        }
    }
}

#[test]
fn empty_hierarchy_operations_are_noops() {
    let mut bvh: Bvh<Aabb> = Bvh::new();
    let mut workspace = BvhWorkspace::default();

    assert!(bvh.is_empty());
    assert_eq!(bvh.root(), None);
    assert_eq!(bvh.node_count(), 0);
    assert!(bvh.collect_nodes().is_empty());
    assert!(bvh.collect_leaves().is_empty());
    assert!(bvh.root_volume().is_none());
    bvh.assert_well_formed();

    // Refitting nothing on an empty hierarchy is legitimate.
    bvh.refit(&mut workspace, &[], 0.0, |_| unreachable!());
}

#[test]
fn refit_translated_single_leaf() {
    // A single-leaf hierarchy whose triangle spans the unit AABB. After
    // translating all vertices by (2, 0, 0), a refit of that leaf must
    // produce the translated AABB, and propagation stops at the root.
    let mut triangle = Triangle::new(
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 1.0, 0.0),
        Point::new(0.0, 1.0, 1.0),
    );
    assert_eq!(
        triangle.local_aabb(),
        Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0))
    );

    let mut bvh = Bvh::from_leaves(&[triangle.local_aabb()]);
    assert_eq!(bvh.node_count(), 1);

    let shift = Vector::new(2.0, 0.0, 0.0);
    triangle.a += shift;
    triangle.b += shift;
    triangle.c += shift;

    let mut workspace = BvhWorkspace::default();
    let leaves = bvh.collect_leaves();
    bvh.refit(&mut workspace, &leaves, 0.0, |_| triangle.local_aabb());

    let expected = Aabb::new(Point::new(2.0, 0.0, 0.0), Point::new(3.0, 1.0, 1.0));
    assert_relative_eq!(*bvh.root_volume().unwrap(), expected, epsilon = 1.0e-6);
    bvh.assert_well_formed();
}

#[test]
fn refit_restores_enclosure_invariant() {
    let mut rng = oorandom::Rand32::new(42);
    let mut leaves: Vec<_> = (0..100).map(|_| random_aabb(&mut rng)).collect();
    let mut bvh = Bvh::from_leaves(&leaves);
    let mut workspace = BvhWorkspace::default();

    bvh.assert_well_formed();
    assert_exact_enclosure(&bvh);

    let leaf_ids = bvh.collect_leaves();

    for _ in 0..10 {
        // Move a random subset of the leaves.
        let mut moved = Vec::new();
        for &leaf in &leaf_ids {
            if rng.rand_float() < 0.3 {
                let data = bvh.node(leaf).leaf_data().unwrap();
                leaves[data as usize] = random_aabb(&mut rng);
                moved.push(leaf);
            }
        }

        bvh.refit(&mut workspace, &moved, 0.0, |data| leaves[data as usize]);

        // With a zero margin every internal volume is the exact union of its
        // children, and leaves match their geometry exactly.
        assert_exact_enclosure(&bvh);
        bvh.assert_well_formed();
        for &leaf in &moved {
            let data = bvh.node(leaf).leaf_data().unwrap();
            assert_eq!(*bvh.node(leaf).volume(), leaves[data as usize]);
        }
    }
}

#[test]
fn refit_with_margin_keeps_slack() {
    let mut rng = oorandom::Rand32::new(7);
    let leaves: Vec<_> = (0..32).map(|_| random_aabb(&mut rng)).collect();
    let mut bvh = Bvh::from_leaves(&leaves);
    let mut workspace = BvhWorkspace::default();

    let leaf_ids = bvh.collect_leaves();
    bvh.refit(&mut workspace, &leaf_ids, 0.5, |data| leaves[data as usize]);

    // The margin loosens every recomputed volume, so enclosure still holds
    // (with strict containment) and each leaf contains its exact geometry.
    bvh.assert_well_formed();
    for &leaf in &leaf_ids {
        let data = bvh.node(leaf).leaf_data().unwrap();
        assert!(bvh.node(leaf).volume().contains(&leaves[data as usize]));
    }
}

#[test]
fn refit_shared_parent_double_enqueue_converges() {
    // Two moved leaves re-enqueue their common ancestors once each; the
    // recomputation is idempotent so the final volumes are still exact.
    let mut leaves = vec![
        Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0)),
        Aabb::new(Point::new(2.0, 0.0, 0.0), Point::new(3.0, 1.0, 1.0)),
        Aabb::new(Point::new(4.0, 0.0, 0.0), Point::new(5.0, 1.0, 1.0)),
        Aabb::new(Point::new(6.0, 0.0, 0.0), Point::new(7.0, 1.0, 1.0)),
    ];
    let mut bvh = Bvh::from_leaves(&leaves);
    let mut workspace = BvhWorkspace::default();

    for volume in leaves.iter_mut() {
        *volume = volume.translated(&Vector::new(0.0, 10.0, 0.0));
    }

    let leaf_ids = bvh.collect_leaves();
    bvh.refit(&mut workspace, &leaf_ids, 0.0, |data| leaves[data as usize]);

    assert_exact_enclosure(&bvh);
    bvh.assert_well_formed();
}

#[test]
fn leaf_count_conserved_across_refits() {
    let mut rng = oorandom::Rand32::new(1234);
    let mut leaves: Vec<_> = (0..57).map(|_| random_aabb(&mut rng)).collect();
    let mut bvh = Bvh::from_leaves(&leaves);
    let mut workspace = BvhWorkspace::default();

    let initial_leaf_count = bvh.leaf_count();
    assert_eq!(initial_leaf_count, leaves.len());

    for _ in 0..5 {
        for volume in leaves.iter_mut() {
            *volume = random_aabb(&mut rng);
        }
        let leaf_ids = bvh.collect_leaves();
        bvh.refit(&mut workspace, &leaf_ids, 0.0, |data| leaves[data as usize]);
        assert_eq!(bvh.leaf_count(), initial_leaf_count);
        assert_eq!(bvh.collect_leaves().len(), initial_leaf_count);
    }
}

#[test]
fn try_from_leaves_rejects_non_finite_volumes() {
    let leaves = vec![
        make_test_aabb(0),
        Aabb::new(
            Point::new(Real::NAN, 0.0, 0.0),
            Point::new(1.0, 1.0, 1.0),
        ),
    ];

    assert_eq!(
        Bvh::try_from_leaves(&leaves).err(),
        Some(BvhBuildError::NonFiniteLeafVolume { leaf: 1 })
    );
    assert!(Bvh::try_from_leaves(&leaves[..1]).is_ok());
}
