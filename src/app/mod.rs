//! Application-Layer: Controller, State, Events und Karten-Werkzeuge.

pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Optionen, Werkzeuge, Speicher-Ausgang).
pub mod state;
pub mod tools;

pub use controller::AppController;
pub use events::{AppCommand, AppIntent, CommitKind, CommitRecord, CommitRequest};
pub use state::{ActiveTool, AppState};
