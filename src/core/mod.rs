//! Core-Domänentypen: Stützpunkte, Polylinien, WKB-Grenze, KBS-Einheiten, Fehlerarten.

pub mod crs;
pub mod error;
pub mod polyline;
pub mod vertex;
pub mod wkb;
pub mod wkb_type;

pub use crs::{CrsCalibration, DistanceUnit};
pub use error::LrError;
pub use polyline::Polyline;
pub use vertex::Vertex;
pub use wkb::{polyline_to_wkb, read_polyline, write_polyline, WkbError};
pub use wkb_type::{GeometryKind, WkbType};
