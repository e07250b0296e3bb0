use avl_engine::{AvlTree, TraversalMode};

fn main() {
    pretty_env_logger::init();

    let tree: AvlTree<i32> = (1..=10).collect();

    for mode in [
        TraversalMode::BinaryPrefix,
        TraversalMode::BinaryInfix,
        TraversalMode::BinaryPostfix,
        TraversalMode::ZigZagStartLeft,
        TraversalMode::ZigZagStartRight,
        TraversalMode::LeftToRight,
        TraversalMode::RightToLeft,
        TraversalMode::Entire,
    ] {
        println!("{:?}:", mode);
        match tree.render(mode) {
            Ok(text) => println!("{text}\n"),
            Err(err) => eprintln!("{err}\n"),
        }
    }
}
