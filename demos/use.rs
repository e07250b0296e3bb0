use avl_engine::{AvlConfig, AvlTree, BinarySearchTree, DeletePolicy, TraversalMode};

fn main() {
    let mut tree = AvlTree::new();
    for value in [10, 20, 30, 40, 50, 25] {
        tree.insert(value);
    }
    assert!(!tree.insert(20));
    assert_eq!(tree.get(&25), Some(&25));
    tree.remove(&20);
    assert!(tree.search(&20).is_none());

    for value in &tree {
        println!("{value}");
    }
    println!("{:?}", tree.rotations());

    // Removals leave balance alone until asked to restore it
    let config = AvlConfig::default().with_delete_policy(DeletePolicy::Preserve);
    let mut lazy = AvlTree::with_config(config).unwrap();
    lazy.extend(1..=15);
    for value in 1..=7 {
        lazy.remove(&value);
    }
    println!("balanced after removals: {}", lazy.is_balanced());
    lazy.balance();
    println!("balanced after balance(): {}", lazy.is_balanced());

    let bst: BinarySearchTree<i32> = (1..=4).collect();
    println!("{}", bst.render_with_width(TraversalMode::Entire, 2).unwrap());
}
