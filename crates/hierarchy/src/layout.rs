//! Layered node-link layout. Depth fixes the vertical axis, sibling
//! insertion order fixes the horizontal one: leaves get evenly spaced
//! slots and internal nodes sit at the midpoint of their first and last
//! child, so edges never cross within a level.

use shared::domain::PersonId;

use crate::tree::{PersonNode, PersonTree};

/// Drawing surface contract shared with the canvas: 800x600 units with a
/// 40-unit margin per side, leaving a 720x520 usable layout area.
pub const SURFACE_WIDTH: f32 = 800.0;
pub const SURFACE_HEIGHT: f32 = 600.0;
pub const SURFACE_MARGIN: f32 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: PersonId,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub depth: usize,
}

/// Placed nodes in preorder plus parent->child edge index pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeLayout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<(usize, usize)>,
}

pub fn layered_layout(tree: &PersonTree, width: f32, height: f32) -> TreeLayout {
    let depth = max_depth(tree.root(), 0);
    let mut pass = LayoutPass {
        width,
        level_gap: if depth == 0 {
            0.0
        } else {
            height / depth as f32
        },
        leaf_count: count_leaves(tree.root()),
        next_leaf: 0,
        out: TreeLayout::default(),
    };
    pass.place(tree.root(), 0);
    pass.out
}

struct LayoutPass {
    width: f32,
    level_gap: f32,
    leaf_count: usize,
    next_leaf: usize,
    out: TreeLayout,
}

impl LayoutPass {
    fn place(&mut self, node: &PersonNode, depth: usize) -> (usize, f32) {
        let index = self.out.nodes.len();
        self.out.nodes.push(PlacedNode {
            id: node.record.id.clone(),
            label: node.record.name.clone(),
            x: 0.0,
            y: depth as f32 * self.level_gap,
            depth,
        });

        let x = if node.children.is_empty() {
            let slot = self.next_leaf as f32;
            self.next_leaf += 1;
            (slot + 0.5) * self.width / self.leaf_count as f32
        } else {
            let mut first_x = None;
            let mut last_x = 0.0;
            for child in &node.children {
                let (child_index, child_x) = self.place(child, depth + 1);
                self.out.edges.push((index, child_index));
                first_x.get_or_insert(child_x);
                last_x = child_x;
            }
            (first_x.unwrap_or(last_x) + last_x) / 2.0
        };

        self.out.nodes[index].x = x;
        (index, x)
    }
}

fn count_leaves(node: &PersonNode) -> usize {
    if node.children.is_empty() {
        1
    } else {
        node.children.iter().map(count_leaves).sum()
    }
}

fn max_depth(node: &PersonNode, depth: usize) -> usize {
    node.children
        .iter()
        .map(|child| max_depth(child, depth + 1))
        .max()
        .unwrap_or(depth)
}
