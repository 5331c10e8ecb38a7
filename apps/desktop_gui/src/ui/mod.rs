//! UI layer: the egui app shell, tree canvas, roster table, and add form.

pub mod app;

pub use app::FamilyTreeApp;
