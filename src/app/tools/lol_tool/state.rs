//! State-Definitionen und Konstruktor für das LoL-Werkzeug.

use super::super::DragState;
use crate::core::Polyline;
use crate::features::{LolFeature, PolFeature};
use crate::host::MapHost;

/// Zustand des LoL-Werkzeugs.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LolToolState {
    /// Kein Abschnitt gehalten
    #[default]
    Idle,
    /// Anfangspunkt gesetzt, Hover zeigt den möglichen Endpunkt
    AwaitingTo {
        from: PolFeature,
        hover: Option<PolFeature>,
    },
    /// Abschnitt gemessen, Eingaben und Drags möglich
    Measured {
        lol: LolFeature,
        drag: Option<DragState>,
    },
    /// Gespeicherter Datensatz wird bearbeitet
    Edit {
        pk: i64,
        lol: LolFeature,
        drag: Option<DragState>,
    },
}

/// Line-on-Line-Werkzeug
#[derive(Debug, Clone, Default)]
pub struct LolTool {
    pub(crate) state: LolToolState,
}

impl LolTool {
    /// Erstellt ein Werkzeug im Zustand `Idle`.
    pub fn new() -> Self {
        Self {
            state: LolToolState::Idle,
        }
    }

    pub fn state(&self) -> &LolToolState {
        &self.state
    }

    /// Gemessener Abschnitt (nur `Measured` / `Edit`).
    pub fn lol(&self) -> Option<&LolFeature> {
        match &self.state {
            LolToolState::Measured { lol, .. } | LolToolState::Edit { lol, .. } => Some(lol),
            _ => None,
        }
    }

    /// Gesetzter Anfangspunkt während `AwaitingTo`.
    pub fn from_pol(&self) -> Option<&PolFeature> {
        match &self.state {
            LolToolState::AwaitingTo { from, .. } => Some(from),
            _ => None,
        }
    }

    pub fn hover_pol(&self) -> Option<&PolFeature> {
        match &self.state {
            LolToolState::AwaitingTo { hover, .. } => hover.as_ref(),
            _ => None,
        }
    }

    /// Primärschlüssel im Edit-Modus.
    pub fn edit_pk(&self) -> Option<i64> {
        match self.state {
            LolToolState::Edit { pk, .. } => Some(pk),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.state,
            LolToolState::Measured { drag: Some(_), .. } | LolToolState::Edit { drag: Some(_), .. }
        )
    }

    /// Übernimmt einen gespeicherten Datensatz zur Bearbeitung.
    pub fn start_edit(&mut self, pk: i64, mut lol: LolFeature) {
        lol.data_fid = Some(pk);
        log::debug!("LoL-Tool: Edit pk={}", pk);
        self.state = LolToolState::Edit {
            pk,
            lol,
            drag: None,
        };
    }

    /// Vorschau-Geometrie: gemessener Abschnitt oder Anfangspunkt bis Hover.
    ///
    /// Die Vorschau während `AwaitingTo` ist ohne Versatz.
    pub fn preview_segment(&self, host: &dyn MapHost) -> Option<Polyline> {
        match &self.state {
            LolToolState::Idle => None,
            LolToolState::AwaitingTo { from, hover } => {
                let to = hover.as_ref()?;
                LolFeature::from_pols(from.clone(), to.clone(), 0.0)
                    .segment_geom(host)
                    .ok()
            }
            LolToolState::Measured { lol, .. } | LolToolState::Edit { lol, .. } => {
                lol.segment_geom(host).ok()
            }
        }
    }

    /// Mutabler Zugriff auf Abschnitt und Drag in `Measured` / `Edit`.
    pub(crate) fn measured_parts(&mut self) -> Option<(&mut LolFeature, &mut Option<DragState>)> {
        match &mut self.state {
            LolToolState::Measured { lol, drag } | LolToolState::Edit { lol, drag, .. } => {
                Some((lol, drag))
            }
            _ => None,
        }
    }
}
