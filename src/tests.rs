use proptest::prelude::*;

use super::{
    AvlConfig, AvlTree, BalanceStrategy, BinarySearchTree, ConfigurationError, DeletePolicy,
    NodeRef, Rotations,
};

const N: i32 = 1_000;
const LARGE_N: i32 = 10_000_000;

fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

/// Pre-order list of (value, height). Determines the shape of a search tree.
fn shape<V: Copy>(root: Option<NodeRef<'_, V>>) -> Vec<(V, i32)> {
    fn walk<V: Copy>(node: Option<NodeRef<'_, V>>, out: &mut Vec<(V, i32)>) {
        if let Some(node) = node {
            out.push((*node.value(), node.height()));
            walk(node.left(), out);
            walk(node.right(), out);
        }
    }
    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

fn full_tree() -> AvlTree<i32> {
    init_logging();
    let config = AvlConfig::default().with_balance_strategy(BalanceStrategy::FullTree);
    AvlTree::with_config(config).unwrap()
}

fn preserving_tree() -> AvlTree<i32> {
    let config = AvlConfig::default().with_delete_policy(DeletePolicy::Preserve);
    AvlTree::with_config(config).unwrap()
}

#[test]
fn test_new() {
    let tree_i32 = AvlTree::<i32>::new();
    assert!(tree_i32.is_empty());
    assert_eq!(tree_i32.height(), -1);
    assert!(tree_i32.root().is_none());
    tree_i32.check_consistency();

    let tree_i8 = AvlTree::<i8>::new();
    assert!(tree_i8.is_empty());
    tree_i8.check_consistency();

    let tree_string = AvlTree::<String>::new();
    assert!(tree_string.is_empty());
    tree_string.check_consistency();

    let bst = BinarySearchTree::<i32>::new();
    assert!(bst.is_empty());
    assert_eq!(bst.height(), -1);
    bst.check_consistency();
}

#[test]
fn test_with_config() {
    let tree = full_tree();
    assert_eq!(tree.config().balance_strategy, BalanceStrategy::FullTree);
    assert_eq!(tree.config().delete_policy, DeletePolicy::Rebalance);

    let result = AvlTree::<i32>::with_config(AvlConfig::default().with_field_width(0));
    assert_eq!(result.err(), Some(ConfigurationError::ZeroFieldWidth));
}

#[test]
fn test_rebalance() {
    {
        //     3 ->   2
        //    /      / \
        //   2      1   3
        //  /
        // 1
        let mut tree = AvlTree::new();
        tree.insert(3);
        tree.insert(2);
        tree.insert(1);
        tree.check_consistency();
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.rotations(), Rotations { left: 0, right: 1 });
    }
    {
        //     3   ->     3 ->   2
        //    / \        /      / \
        //   2   4      2      1   3
        //  /          /
        // 1          1
        let mut tree = AvlTree::new();
        tree.insert(3);
        tree.insert(2);
        tree.insert(4);
        tree.insert(1);
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.rotations().total(), 0);
        tree.remove(&4);
        tree.check_consistency();
        assert_eq!(tree.height(), 1);
        assert_eq!(shape(tree.root()), [(2, 1), (1, 0), (3, 0)]);
    }
    {
        //   3  ->   2
        //  /       / \
        // 1       1   3
        //  \
        //   2
        let mut tree = AvlTree::new();
        tree.insert(3);
        tree.insert(1);
        tree.insert(2);
        tree.check_consistency();
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.rotations(), Rotations { left: 1, right: 1 });
    }
    {
        //   3   ->   3  ->   2
        //  / \      /       / \
        // 1   4    1       1   3
        //  \        \
        //   2        2
        let mut tree = AvlTree::new();
        tree.insert(3);
        tree.insert(1);
        tree.insert(4);
        tree.insert(2);
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
        tree.remove(&4);
        tree.check_consistency();
        assert_eq!(tree.height(), 1);
        assert_eq!(shape(tree.root()), [(2, 1), (1, 0), (3, 0)]);
    }
    {
        // 1 ->    2
        //  \     / \
        //   2   1   3
        //    \
        //     3
        let mut tree = AvlTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.insert(3);
        tree.check_consistency();
        assert_eq!(tree.height(), 1);
    }
    {
        //   1     -> 1     ->    2
        //  / \        \         / \
        // 0   2        2       1   3
        //      \        \
        //       3        3
        let mut tree = AvlTree::new();
        tree.insert(1);
        tree.insert(0);
        tree.insert(2);
        tree.insert(3);
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
        tree.remove(&0);
        tree.check_consistency();
        assert_eq!(tree.height(), 1);
    }
    {
        // 1   ->  2
        //  \     / \
        //   3   1   3
        //  /
        // 2
        let mut tree = AvlTree::new();
        tree.insert(1);
        tree.insert(3);
        tree.insert(2);
        tree.check_consistency();
        assert_eq!(tree.height(), 1);
    }
    {
        //   1   ->  1   ->  2
        //  / \       \     / \
        // 0   3       3   1   3
        //    /       /
        //   2       2
        let mut tree = AvlTree::new();
        tree.insert(1);
        tree.insert(0);
        tree.insert(3);
        tree.insert(2);
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
        tree.remove(&0);
        tree.check_consistency();
        assert_eq!(tree.height(), 1);
    }
}

#[test]
fn test_single_rotation() {
    for mut tree in [AvlTree::new(), full_tree()] {
        tree.extend([10, 20, 30]);
        tree.check_consistency();
        assert_eq!(tree.rotations(), Rotations { left: 1, right: 0 });

        let root = tree.root().unwrap();
        assert_eq!(root.value(), &20);
        assert_eq!(root.left().unwrap().value(), &10);
        assert_eq!(root.right().unwrap().value(), &30);
        assert!(root.left().unwrap().parent().unwrap().ptr_eq(&root));
        assert!(root.right().unwrap().parent().unwrap().ptr_eq(&root));
    }

    let mut tree = AvlTree::new();
    tree.extend([30, 20, 10]);
    assert_eq!(tree.rotations(), Rotations { left: 0, right: 1 });
    assert_eq!(shape(tree.root()), [(20, 1), (10, 0), (30, 0)]);
}

#[test]
fn test_double_rotation() {
    for mut tree in [AvlTree::new(), full_tree()] {
        tree.extend([30, 10, 20]);
        tree.check_consistency();
        assert_eq!(tree.rotations(), Rotations { left: 1, right: 1 });
        assert_eq!(shape(tree.root()), [(20, 1), (10, 0), (30, 0)]);
    }

    let mut tree = AvlTree::new();
    tree.extend([10, 30, 20]);
    assert_eq!(tree.rotations(), Rotations { left: 1, right: 1 });
    assert_eq!(shape(tree.root()), [(20, 1), (10, 0), (30, 0)]);
}

#[test]
fn test_interleaved_halves() {
    // Values are doubled: 1..=15 followed by 0.5, 1.5, ..., 15.5
    let values: Vec<i32> = (1..=15).map(|value| value * 2).chain((0..=15).map(|i| 2 * i + 1)).collect();
    assert_eq!(values.len(), 31);

    for mut tree in [AvlTree::new(), full_tree()] {
        for value in &values {
            assert!(tree.insert(*value));
            tree.check_consistency();
        }
        assert_eq!(tree.len(), 31);
        assert_eq!(tree.height(), 4);
        assert_eq!(tree.root().unwrap().value(), &16);
        assert!(tree.iter().copied().eq(1..=31));
    }
}

#[test]
fn test_bst_remove_successor() {
    //       5                6
    //      / \              / \
    //     4   7            4   7
    //    /   / \   ->     /     \
    //   2   6   8        2       8
    //  / \              / \
    // 1   3            1   3
    let mut tree: BinarySearchTree<i32> = [5, 4, 2, 3, 1, 7, 6, 8].into_iter().collect();
    tree.check_consistency();
    assert_eq!(tree.height(), 3);

    assert!(tree.remove(&5));
    tree.check_consistency();
    assert_eq!(
        shape(tree.root()),
        [(6, 3), (4, 2), (2, 1), (1, 0), (3, 0), (7, 1), (8, 0)]
    );
    let root = tree.root().unwrap();
    assert!(root.is_root());
    assert_eq!(root.left().unwrap().value(), &4);
    assert!(root.right().unwrap().left().is_none());
    assert_eq!(tree.len(), 7);
}

#[test]
fn test_bst_remove_cases() {
    let values = [5, 4, 2, 3, 1, 7, 6, 8];

    // No right child: the left child moves up
    let mut tree: BinarySearchTree<i32> = values.into_iter().collect();
    assert!(tree.remove(&4));
    tree.check_consistency();
    assert_eq!(
        shape(tree.root()),
        [(5, 2), (2, 1), (1, 0), (3, 0), (7, 1), (6, 0), (8, 0)]
    );

    // Right child without left child: it moves up and adopts the left subtree
    let mut tree: BinarySearchTree<i32> = values.into_iter().collect();
    assert!(tree.remove(&7));
    tree.check_consistency();
    assert_eq!(
        shape(tree.root()),
        [(5, 3), (4, 2), (2, 1), (1, 0), (3, 0), (8, 1), (6, 0)]
    );

    // Leaf and absent value
    let mut tree: BinarySearchTree<i32> = values.into_iter().collect();
    assert!(tree.remove(&1));
    assert!(!tree.remove(&1));
    assert!(!tree.remove(&42));
    tree.check_consistency();
    assert_eq!(tree.len(), 7);

    // Root without right child
    let mut tree: BinarySearchTree<i32> = [2, 1].into_iter().collect();
    assert!(tree.remove(&2));
    tree.check_consistency();
    assert_eq!(shape(tree.root()), [(1, 0)]);
    assert!(tree.remove(&1));
    assert!(tree.is_empty());
}

#[test]
fn test_bst_recalculate_heights() {
    let mut tree: BinarySearchTree<i32> = [5, 4, 2, 3, 1, 7, 6, 8].into_iter().collect();
    let before = shape(tree.root());
    tree.recalculate_heights();
    assert_eq!(shape(tree.root()), before);
    tree.check_consistency();
}

#[test]
fn test_remove_rebalances() {
    let values = [5, 4, 2, 3, 1, 7, 6, 8];

    let tree: AvlTree<i32> = values.into_iter().collect();
    assert_eq!(
        shape(tree.root()),
        [(4, 3), (2, 1), (1, 0), (3, 0), (6, 2), (5, 0), (7, 1), (8, 0)]
    );

    for mut tree in [values.into_iter().collect(), full_tree()] {
        tree.extend(values);
        assert!(tree.remove(&5));
        tree.check_consistency();
        assert_eq!(
            shape(tree.root()),
            [(4, 2), (2, 1), (1, 0), (3, 0), (7, 1), (6, 0), (8, 0)]
        );
    }

    let mut tree: AvlTree<i32> = values.into_iter().collect();
    assert!(tree.remove(&4));
    tree.check_consistency();
    assert_eq!(
        shape(tree.root()),
        [(5, 2), (2, 1), (1, 0), (3, 0), (7, 1), (6, 0), (8, 0)]
    );
}

#[test]
fn test_delete_policy_preserve() {
    let mut tree = preserving_tree();
    tree.extend([5, 4, 2, 3, 1, 7, 6, 8]);
    let rotations = tree.rotations();

    assert!(tree.remove(&5));
    tree.check_consistency();
    assert_eq!(tree.rotations(), rotations);
    assert_eq!(
        shape(tree.root()),
        [(4, 3), (2, 1), (1, 0), (3, 0), (6, 2), (7, 1), (8, 0)]
    );

    for value in [1, 2, 3] {
        assert!(tree.remove(&value));
    }
    tree.check_consistency();
    assert!(tree.is_valid());
    assert!(!tree.is_balanced());
    assert_eq!(shape(tree.root()), [(4, 3), (6, 2), (7, 1), (8, 0)]);

    tree.balance();
    assert!(tree.is_balanced());
    assert_eq!(tree.rotations().left, rotations.left + 2);
    assert_eq!(shape(tree.root()), [(7, 2), (4, 1), (6, 0), (8, 0)]);
}

#[test]
fn test_balance_deep_imbalance() {
    let mut tree = preserving_tree();
    tree.extend(0..64);
    for value in 0..40 {
        assert!(tree.remove(&value));
    }
    tree.check_consistency();
    assert_eq!(tree.height(), 6);
    let mut worst = 0;
    for value in 40..64 {
        worst = worst.max(tree.search(&value).unwrap().balance_factor().abs());
    }
    assert!(worst >= 3);

    let rotations = tree.rotations();
    tree.balance();
    tree.check_consistency();
    assert!(tree.is_balanced());
    assert_eq!(tree.height(), 4);
    assert_eq!(tree.len(), 24);
    assert!(tree.iter().copied().eq(40..64));
    assert_eq!(tree.rotations().left, rotations.left + 5);
    assert_eq!(tree.rotations().right, rotations.right);

    // Already balanced, nothing left to do
    tree.balance();
    assert_eq!(tree.rotations().total(), rotations.total() + 5);
}

#[test]
fn test_balance_unbalanced_chain() {
    for len in [3, 10, 100, 1000] {
        let mut tree = preserving_tree();
        tree.extend(0..len);
        for value in 0..len / 2 {
            tree.remove(&value);
        }
        tree.balance();
        assert!(tree.is_balanced());
        assert!(tree.iter().copied().eq(len / 2..len));
        tree.check_consistency();
    }
}

#[test]
fn test_duplicate_insert() {
    let mut tree: AvlTree<i32> = (0..100).collect();
    let before = shape(tree.root());
    let rotations = tree.rotations();

    for value in 0..100 {
        assert!(!tree.insert(value));
    }
    assert_eq!(tree.len(), 100);
    assert_eq!(shape(tree.root()), before);
    assert_eq!(tree.rotations(), rotations);
}

#[test]
fn test_insert() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort();
    values.dedup();

    let mut tree = AvlTree::new();
    for value in &values {
        assert!(tree.insert(*value));
        tree.check_consistency();
    }
    assert!(tree.len() == values.len());

    for value in &values {
        assert!(!tree.insert(*value));
    }
    assert!(tree.len() == values.len());
}

#[test]
fn test_insert_sorted_range() {
    let mut tree = AvlTree::new();
    for value in 0..N {
        assert!(tree.insert(value));
        tree.check_consistency();
    }
    assert!(tree.len() == N as usize);
    assert_eq!(tree.height(), 9);
    assert!(tree.search(&-42).is_none());

    let mut bst = BinarySearchTree::new();
    for value in 0..N {
        assert!(bst.insert(value));
    }
    bst.check_consistency();
    assert_eq!(bst.height(), N - 1);
}

#[test]
fn test_insert_shuffled_range() {
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    let mut values: Vec<i32> = (0..N).collect();
    let mut rng = StdRng::seed_from_u64(0);
    values.shuffle(&mut rng);

    for mut tree in [AvlTree::new(), full_tree()] {
        for value in &values {
            assert!(tree.insert(*value));
            tree.check_consistency();
        }
        assert!(tree.len() == values.len());

        for value in &values {
            assert!(!tree.insert(*value));
        }
        assert!(tree.len() == values.len());
        assert!(tree.get(&-42).is_none());
    }
}

#[test]
fn test_strategies_agree() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut path_tree = AvlTree::new();
    let mut full_tree = full_tree();
    for _ in 0..N {
        let value = rng.gen_range(0..N / 4);
        if rng.gen_bool(0.7) {
            assert_eq!(path_tree.insert(value), full_tree.insert(value));
        } else {
            assert_eq!(path_tree.remove(&value), full_tree.remove(&value));
        }
        assert_eq!(shape(path_tree.root()), shape(full_tree.root()));
    }
    path_tree.check_consistency();
    full_tree.check_consistency();
}

#[test]
fn test_search() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut tree = AvlTree::new();
    assert!(tree.search(&42).is_none());
    for value in &values {
        tree.insert(*value);
    }

    for value in &values {
        let node = tree.search(value);
        assert!(node.is_some());
        assert_eq!(node.unwrap().value(), value);
        assert_eq!(tree.get(value), Some(value));
        assert!(tree.contains(value));
    }
}

#[test]
fn test_node_ref() {
    //     4
    //    / \
    //   2   6
    //  /
    // 1
    let tree: AvlTree<i32> = [4, 2, 6, 1].into_iter().collect();
    let root = tree.root().unwrap();
    assert!(root.is_root());
    assert!(!root.is_left_child() && !root.is_right_child());
    assert_eq!(root.balance_factor(), -1);

    let two = tree.search(&2).unwrap();
    assert!(two.is_left_child());
    assert_eq!(two.height(), 1);
    assert!(two.parent().unwrap().ptr_eq(&root));
    assert!(two.right().is_none());

    let one = two.left().unwrap();
    assert!(one.is_leaf());
    assert_eq!(one.height(), 0);

    let six = tree.search(&6).unwrap();
    assert!(six.is_right_child());
    assert!(six.is_leaf());
    assert!(!six.ptr_eq(&one));
}

#[test]
fn test_clear() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort();
    values.dedup();

    let mut tree = AvlTree::new();
    for value in &values {
        tree.insert(*value);
    }
    assert!(!tree.is_empty());
    assert!(tree.len() == values.len());

    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.len() == 0);
    assert_eq!(tree.rotations().total(), 0);

    for value in &values {
        assert!(tree.insert(*value));
    }
    assert!(!tree.is_empty());
    assert!(tree.len() == values.len());
    tree.check_consistency();
}

#[test]
fn test_remove() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort();
    values.dedup();

    for mut tree in [AvlTree::new(), full_tree()] {
        for value in &values {
            tree.insert(*value);
        }

        values.shuffle(&mut rng);
        for value in &values {
            let len = tree.len();
            assert!(tree.search(value).is_some());
            assert!(tree.remove(value));
            assert!(tree.search(value).is_none());
            assert!(!tree.remove(value));
            assert_eq!(tree.len(), len - 1);
            tree.check_consistency();
        }
        assert!(tree.is_empty());
        assert!(tree.len() == 0);
    }
}

#[test]
fn test_take() {
    let mut tree: AvlTree<String> = ["pear", "apple", "fig", "plum"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(tree.get("fig").map(String::as_str), Some("fig"));
    assert_eq!(tree.take("fig"), Some(String::from("fig")));
    assert_eq!(tree.take("fig"), None);
    assert!(!tree.contains("fig"));
    tree.check_consistency();
    assert!(tree.iter().map(String::as_str).eq(["apple", "pear", "plum"]));
}

#[test]
fn test_iter() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut tree = AvlTree::new();
    for value in &values {
        tree.insert(*value);
    }

    values.sort();
    values.dedup();

    let mut tree_iter = tree.iter();
    assert_eq!(tree_iter.len(), values.len());
    for value in &values {
        let value_in_tree = tree_iter.next();
        assert!(value_in_tree.is_some());
        assert_eq!(value_in_tree.unwrap(), value);
    }
    assert!(tree_iter.next().is_none());

    let mut value_iter = values.iter();
    for value_in_tree in &tree {
        let value = value_iter.next();
        assert!(value.is_some());
        assert_eq!(value_in_tree, value.unwrap());
    }
    assert!(value_iter.next().is_none());

    assert!(tree.iter().rev().eq(values.iter().rev()));

    // Meeting in the middle yields every value once
    let mut tree_iter = tree.iter();
    let mut seen = 0;
    while let Some(front) = tree_iter.next() {
        seen += 1;
        if let Some(back) = tree_iter.next_back() {
            assert!(front < back);
            seen += 1;
        }
    }
    assert_eq!(seen, values.len());
}

#[test]
fn test_clone() {
    let tree: AvlTree<i32> = (0..64).collect();
    let mut copy = tree.clone();
    copy.check_consistency();
    assert_eq!(shape(copy.root()), shape(tree.root()));
    assert_eq!(copy.rotations(), tree.rotations());

    copy.remove(&0);
    assert!(tree.contains(&0));
    assert_eq!(tree.len(), 64);
    tree.check_consistency();
    copy.check_consistency();
}

#[test]
fn test_debug() {
    let tree: AvlTree<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(format!("{:?}", tree), "{1, 2, 3}");
    assert_eq!(format!("{:?}", tree.root().unwrap()), "NodeRef { value: 2, height: 1 }");
}

#[test]
fn test_shared_behind_mutex() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let tree = Arc::new(Mutex::new(AvlTree::new()));
    let handles: Vec<_> = (0..4)
        .map(|offset| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for value in (0..100).map(|i| i * 4 + offset) {
                    tree.lock().unwrap().insert(value);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let tree = tree.lock().unwrap();
    assert_eq!(tree.len(), 400);
    tree.check_consistency();
}

#[test]
#[ignore]
fn test_large() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..LARGE_N).map(|_| rng.gen_range(0..LARGE_N)).collect();

    let mut tree = AvlTree::new();
    for value in &values {
        tree.insert(*value);
    }
    tree.check_consistency();

    values.shuffle(&mut rng);
    values.resize(values.len() / 2, 0);
    for value in &values {
        tree.remove(value);
    }
    tree.check_consistency();
}

fn op_strategy() -> impl Strategy<Value = Vec<(bool, u8)>> {
    proptest::collection::vec((proptest::bool::weighted(0.7), 0u8..64), 0..200)
}

proptest! {
    #[test]
    fn prop_invariants_hold(ops in op_strategy()) {
        let mut tree = AvlTree::new();
        let mut model = std::collections::BTreeSet::new();
        for (insert, value) in ops {
            if insert {
                prop_assert_eq!(tree.insert(value), model.insert(value));
            } else {
                prop_assert_eq!(tree.remove(&value), model.remove(&value));
            }
            tree.check_consistency();
            prop_assert_eq!(tree.len(), model.len());
        }
        prop_assert!(tree.iter().eq(model.iter()));
    }

    #[test]
    fn prop_strategies_agree(ops in op_strategy()) {
        let mut path_tree = AvlTree::new();
        let mut full_tree = full_tree();
        for (insert, value) in ops {
            let value = i32::from(value);
            if insert {
                path_tree.insert(value);
                full_tree.insert(value);
            } else {
                path_tree.remove(&value);
                full_tree.remove(&value);
            }
            prop_assert_eq!(shape(path_tree.root()), shape(full_tree.root()));
        }
    }

    #[test]
    fn prop_bst_matches_model(ops in op_strategy()) {
        let mut tree = BinarySearchTree::new();
        let mut model = std::collections::BTreeSet::new();
        for (insert, value) in ops {
            if insert {
                prop_assert_eq!(tree.insert(value), model.insert(value));
            } else {
                prop_assert_eq!(tree.take(&value), model.take(&value));
            }
            tree.check_consistency();
        }
        prop_assert!(tree.iter().eq(model.iter()));
    }
}
