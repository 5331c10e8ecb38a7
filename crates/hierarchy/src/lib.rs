//! Builds the single-rooted family hierarchy from flat person records and
//! computes the layered node-link layout the canvas draws from.

pub mod error;
mod layout;
mod tree;

pub use error::HierarchyError;
pub use layout::{
    layered_layout, PlacedNode, TreeLayout, SURFACE_HEIGHT, SURFACE_MARGIN, SURFACE_WIDTH,
};
pub use tree::{build, PersonNode, PersonTree};
