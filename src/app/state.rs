//! Application State: Werkzeuge, Optionen und Speicher-Ausgang.

use serde::{Deserialize, Serialize};

use super::events::CommitRequest;
use super::tools::{LolTool, MapTool, PolTool};
use crate::shared::LrOptions;

/// Aktives Karten-Werkzeug.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveTool {
    #[default]
    None,
    /// Point-on-Line
    Pol,
    /// Line-on-Line
    Lol,
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Laufzeit-Optionen
    pub options: LrOptions,
    pub active_tool: ActiveTool,
    pub pol_tool: PolTool,
    pub lol_tool: LolTool,
    /// Speicher-Aufträge, die der Host noch abholen muss
    pub pending_commits: Vec<CommitRequest>,
}

impl AppState {
    /// Erstellt einen neuen App-State mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(LrOptions::default())
    }

    pub fn with_options(options: LrOptions) -> Self {
        Self {
            options,
            active_tool: ActiveTool::None,
            pol_tool: PolTool::new(),
            lol_tool: LolTool::new(),
            pending_commits: Vec::new(),
        }
    }

    /// Aktives Werkzeug als Trait-Objekt.
    pub fn active_tool(&self) -> Option<&dyn MapTool> {
        match self.active_tool {
            ActiveTool::None => None,
            ActiveTool::Pol => Some(&self.pol_tool),
            ActiveTool::Lol => Some(&self.lol_tool),
        }
    }

    /// Statustext des aktiven Werkzeugs.
    pub fn status_text(&self) -> &str {
        self.active_tool()
            .map_or("Kein Werkzeug aktiv", |tool| tool.status_text())
    }

    /// Gibt alle offenen Speicher-Aufträge zurück und leert den Ausgang.
    pub fn take_commits(&mut self) -> Vec<CommitRequest> {
        std::mem::take(&mut self.pending_commits)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
