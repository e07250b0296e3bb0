//! Read-only textual renderings of a tree.
//!
//! Every mode produces lines joined by `\n` without a trailing newline.
//! Values on one line are separated by a single space. An empty tree
//! renders as an empty string.

use std::fmt::Display;
use std::mem;

use crate::error::ConfigurationError;
use crate::node::NodeRef;

/// Column width of the [`TraversalMode::Entire`] layout unless configured otherwise.
pub const DEFAULT_FIELD_WIDTH: usize = 4;

/// Tallest tree the [`TraversalMode::Entire`] layout accepts. Its last row
/// holds `2^height` slots.
pub const MAX_ENTIRE_HEIGHT: usize = 16;

/// The order in which [`render`] visits nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalMode {
    /// Parent, then children. One `Value: v, Height: h` line per node.
    BinaryPrefix,
    /// Left child, parent, then right child. One `Value: v` line per node.
    BinaryInfix,
    /// Children, then parent. One `Value: v` line per node.
    BinaryPostfix,
    /// One line per level, the second level read left to right and each
    /// further level in the opposite direction of the one above.
    ZigZagStartLeft,
    /// Like `ZigZagStartLeft`, with the second level read right to left.
    ZigZagStartRight,
    /// One line per level, left to right.
    LeftToRight,
    /// One line per level, right to left.
    RightToLeft,
    /// The whole tree as a 2-D diagram, one row per level.
    Entire,
}

/// Renders the tree below `root` in the given mode.
///
/// `max_field_width` is the number of columns reserved for one value in the
/// `Entire` layout and is ignored by every other mode.
///
/// ```
/// use avl_engine::{render, AvlTree, TraversalMode};
/// let tree: AvlTree<i32> = (1..=3).collect();
/// let text = render(tree.root(), TraversalMode::LeftToRight, 4).unwrap();
/// assert_eq!(text, "2\n1 3");
/// ```
pub fn render<V: Display>(
    root: Option<NodeRef<'_, V>>,
    mode: TraversalMode,
    max_field_width: usize,
) -> Result<String, ConfigurationError> {
    if mode == TraversalMode::Entire && max_field_width == 0 {
        return Err(ConfigurationError::ZeroFieldWidth);
    }
    let Some(root) = root else {
        return Ok(String::new());
    };

    let lines = match mode {
        TraversalMode::BinaryPrefix | TraversalMode::BinaryInfix | TraversalMode::BinaryPostfix => {
            let mut lines = Vec::new();
            depth_first(root, mode, &mut lines);
            lines
        }
        TraversalMode::ZigZagStartLeft => zig_zag(root, true),
        TraversalMode::ZigZagStartRight => zig_zag(root, false),
        TraversalMode::LeftToRight => by_level(root, false),
        TraversalMode::RightToLeft => by_level(root, true),
        TraversalMode::Entire => entire(root, max_field_width)?,
    };
    Ok(lines.join("\n"))
}

fn depth_first<V: Display>(node: NodeRef<'_, V>, mode: TraversalMode, lines: &mut Vec<String>) {
    let line = || match mode {
        TraversalMode::BinaryPrefix => format!("Value: {}, Height: {}", node.value(), node.height()),
        _ => format!("Value: {}", node.value()),
    };

    if mode == TraversalMode::BinaryPrefix {
        lines.push(line());
    }
    if let Some(left) = node.left() {
        depth_first(left, mode, lines);
    }
    if mode == TraversalMode::BinaryInfix {
        lines.push(line());
    }
    if let Some(right) = node.right() {
        depth_first(right, mode, lines);
    }
    if mode == TraversalMode::BinaryPostfix {
        lines.push(line());
    }
}

/// Two stacks, one for the level being printed and one for the level below.
/// Absent children are pushed as `None` and skipped when popped.
fn zig_zag<V: Display>(root: NodeRef<'_, V>, start_left: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = vec![Some(root)];
    let mut next = Vec::new();
    let mut left_to_right = start_left;

    while !current.is_empty() {
        let mut values = Vec::new();
        while let Some(slot) = current.pop() {
            let Some(node) = slot else {
                continue;
            };
            values.push(node.value().to_string());
            // Pushed in reverse of the order the next level is read in
            if left_to_right {
                next.push(node.right());
                next.push(node.left());
            } else {
                next.push(node.left());
                next.push(node.right());
            }
        }
        if !values.is_empty() {
            lines.push(values.join(" "));
        }
        mem::swap(&mut current, &mut next);
        left_to_right = !left_to_right;
    }
    lines
}

fn by_level<V: Display>(root: NodeRef<'_, V>, right_to_left: bool) -> Vec<String> {
    Levels::new(root, false)
        .map(|level| {
            let mut values: Vec<String> = level
                .into_iter()
                .flatten()
                .map(|node| node.value().to_string())
                .collect();
            if right_to_left {
                values.reverse();
            }
            values.join(" ")
        })
        .collect()
}

/// Row `i` of a tree of height `H` describes level height `h = H - i`. It is
/// indented by `w * (2^h - 1)` columns and every slot on it is `w * 2^(h + 1)`
/// columns wide, which puts each parent midway between its children.
fn entire<V: Display>(
    root: NodeRef<'_, V>,
    field_width: usize,
) -> Result<Vec<String>, ConfigurationError> {
    let tree_height = root.height().max(0) as usize;
    if tree_height > MAX_ENTIRE_HEIGHT {
        return Err(ConfigurationError::TreeTooTall {
            height: tree_height,
            max: MAX_ENTIRE_HEIGHT,
        });
    }
    let too_large = ConfigurationError::FieldWidthTooLarge { width: field_width };
    // Every row spans at most `w * 2^(H + 1)` columns
    field_width
        .checked_mul(1 << (tree_height + 1))
        .ok_or(too_large)?;
    let mut rows = Vec::with_capacity(tree_height + 1);

    for (depth, level) in Levels::new(root, true).enumerate() {
        let level_height = tree_height.saturating_sub(depth);
        let indent = field_width * ((1 << level_height) - 1);
        let slot_width = field_width << (level_height + 1);

        let mut row = " ".repeat(indent);
        for slot in level {
            let Some(node) = slot else {
                row.push_str(&" ".repeat(slot_width));
                continue;
            };
            let value = node.value().to_string();
            let value_width = value.chars().count();
            if value_width > field_width {
                return Err(ConfigurationError::FieldWidthTooSmall {
                    width: field_width,
                    required: value_width,
                });
            }
            let pad = (field_width - value_width) / 2;
            row.push_str(&" ".repeat(pad));
            row.push_str(&value);
            row.push_str(&" ".repeat(slot_width - pad - value_width));
        }
        rows.push(row.trim_end().to_string());
    }
    Ok(rows)
}

/// Breadth-first walk yielding one level at a time, left to right.
///
/// With `keep_gaps` an absent node stays in its level as `None` and expands
/// into two absent children, so level `i` always holds `2^i` slots.
struct Levels<'a, V> {
    current: Vec<Option<NodeRef<'a, V>>>,
    keep_gaps: bool,
}

impl<'a, V> Levels<'a, V> {
    fn new(root: NodeRef<'a, V>, keep_gaps: bool) -> Self {
        Self {
            current: vec![Some(root)],
            keep_gaps,
        }
    }
}

impl<'a, V> Iterator for Levels<'a, V> {
    type Item = Vec<Option<NodeRef<'a, V>>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.iter().all(Option::is_none) {
            return None;
        }
        let mut next = Vec::with_capacity(self.current.len() * 2);
        for slot in &self.current {
            match slot {
                Some(node) if self.keep_gaps => {
                    next.push(node.left());
                    next.push(node.right());
                }
                Some(node) => {
                    next.extend(node.left().map(Some));
                    next.extend(node.right().map(Some));
                }
                None if self.keep_gaps => {
                    next.push(None);
                    next.push(None);
                }
                None => {}
            }
        }
        Some(mem::replace(&mut self.current, next))
    }
}
