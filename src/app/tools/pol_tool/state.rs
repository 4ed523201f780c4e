//! State-Definitionen und Konstruktor für das PoL-Werkzeug.

use super::super::DragState;
use crate::features::PolFeature;

/// Zustand des PoL-Werkzeugs.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PolToolState {
    /// Kein Punkt gehalten
    #[default]
    Idle,
    /// Maus schwebt über der Referenzlinie (Vorschau)
    Hovering(PolFeature),
    /// Punkt gemessen, Eingaben und Drags möglich
    Measured {
        pol: PolFeature,
        drag: Option<DragState>,
    },
    /// Gespeicherter Datensatz wird bearbeitet
    Edit {
        pk: i64,
        pol: PolFeature,
        drag: Option<DragState>,
    },
}

/// Point-on-Line-Werkzeug
#[derive(Debug, Clone, Default)]
pub struct PolTool {
    pub(crate) state: PolToolState,
}

impl PolTool {
    /// Erstellt ein Werkzeug im Zustand `Idle`.
    pub fn new() -> Self {
        Self {
            state: PolToolState::Idle,
        }
    }

    pub fn state(&self) -> &PolToolState {
        &self.state
    }

    /// Gehaltener Punkt (auch Hover-Vorschau).
    pub fn pol(&self) -> Option<&PolFeature> {
        match &self.state {
            PolToolState::Idle => None,
            PolToolState::Hovering(pol)
            | PolToolState::Measured { pol, .. }
            | PolToolState::Edit { pol, .. } => Some(pol),
        }
    }

    /// Gemessener Punkt (nur `Measured` / `Edit`).
    pub fn measured_pol(&self) -> Option<&PolFeature> {
        match &self.state {
            PolToolState::Measured { pol, .. } | PolToolState::Edit { pol, .. } => Some(pol),
            _ => None,
        }
    }

    /// Primärschlüssel im Edit-Modus.
    pub fn edit_pk(&self) -> Option<i64> {
        match self.state {
            PolToolState::Edit { pk, .. } => Some(pk),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.state,
            PolToolState::Measured { drag: Some(_), .. } | PolToolState::Edit { drag: Some(_), .. }
        )
    }

    /// Übernimmt einen gespeicherten Datensatz zur Bearbeitung.
    pub fn start_edit(&mut self, pk: i64, mut pol: PolFeature) {
        pol.data_fid = Some(pk);
        log::debug!("PoL-Tool: Edit pk={}", pk);
        self.state = PolToolState::Edit {
            pk,
            pol,
            drag: None,
        };
    }

    /// Mutabler Zugriff auf Punkt und Drag in `Measured` / `Edit`.
    pub(crate) fn measured_parts(&mut self) -> Option<(&mut PolFeature, &mut Option<DragState>)> {
        match &mut self.state {
            PolToolState::Measured { pol, drag } | PolToolState::Edit { pol, drag, .. } => {
                Some((pol, drag))
            }
            _ => None,
        }
    }
}
