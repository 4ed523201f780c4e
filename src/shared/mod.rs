//! Geteilte Typen für modul-übergreifende Verträge.

pub mod options;

pub use options::LrOptions;
pub use options::{DRAG_PICK_RADIUS, SNAP_TOLERANCE};
