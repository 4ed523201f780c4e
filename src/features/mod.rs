//! Stationierungs-Datensätze: Point-on-Line und Line-on-Line.

pub mod lol;
pub mod pol;
mod segment;

pub use lol::{Endpoint, LolFeature};
pub use pol::{station, GeomSource, LrMode, PolFeature, Stationing};
pub use segment::{segment_geom_m, segment_geom_n};
