//! Shared domain and wire types for the silsilah family-tree client.

pub mod domain;
pub mod protocol;
