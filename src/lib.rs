//! Lineare Referenzierung: Stationierung von Punkten (PoL) und Abschnitten (LoL)
//! auf Referenzlinien eines GIS-Hosts.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod features;
pub mod geometry;
pub mod host;
pub mod shared;

pub use app::{
    ActiveTool, AppCommand, AppController, AppIntent, AppState, CommitKind, CommitRecord,
    CommitRequest,
};
pub use core::{CrsCalibration, DistanceUnit, LrError, Polyline, Vertex, WkbType};
pub use features::{Endpoint, GeomSource, LolFeature, LrMode, PolFeature};
pub use host::{
    CrsTransformer, Feature, MapHost, MemoryHost, MemoryLayer, MessageLevel, MessageSink,
    Modifiers, MouseEvent, ReferenceLayer, SnapMatch,
};
pub use shared::LrOptions;
