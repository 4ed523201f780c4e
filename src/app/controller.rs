//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};
use crate::host::{MapHost, MessageSink};

/// Orchestriert Host-Events und Werkzeuge auf den AppState.
///
/// Host und Meldungskanal werden pro Aufruf geliehen; der Controller selbst
/// hält keinen Zustand.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut AppState,
        host: &dyn MapHost,
        sink: &mut dyn MessageSink,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, host, sink, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    ///
    /// Abgelehnte Werkzeug-Ereignisse sind kein Fehler: sie werden über den
    /// `MessageSink` gemeldet. `Err` kommt nur aus Datei-I/O.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        host: &dyn MapHost,
        sink: &mut dyn MessageSink,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        log::trace!("Command: {:?}", command);
        use super::handlers;

        match command {
            // === Werkzeug ===
            AppCommand::SetActiveTool { tool } => handlers::tool::set_active(state, tool),
            AppCommand::CancelTools => handlers::tool::cancel_all(state),
            AppCommand::ToolMouseMove { event } => {
                handlers::tool::mouse_move(state, host, sink, &event);
            }
            AppCommand::ToolClick { event } => {
                handlers::tool::click(state, host, sink, &event);
            }
            AppCommand::ToolDragStart { event } => {
                handlers::tool::drag_start(state, host, sink, &event);
            }
            AppCommand::ToolDragUpdate { event } => {
                handlers::tool::drag_update(state, host, sink, &event);
            }
            AppCommand::ToolDragEnd => {
                handlers::tool::drag_end(state, host, sink);
            }
            AppCommand::ToolCommit => handlers::tool::commit(state, host, sink),
            AppCommand::ToolDelete => handlers::tool::delete(state, host, sink),
            AppCommand::ToolReset => handlers::tool::reset(state),

            // === PoL ===
            AppCommand::PolSetStationing { value, mode } => {
                handlers::pol_tool::set_stationing(state, host, sink, value, mode);
            }
            AppCommand::PolMoveToStart => {
                handlers::pol_tool::move_to_start(state, host, sink);
            }
            AppCommand::PolMoveToEnd => {
                handlers::pol_tool::move_to_end(state, host, sink);
            }
            AppCommand::PolStep {
                direction,
                modifiers,
            } => {
                handlers::pol_tool::step(state, host, sink, direction, modifiers);
            }
            AppCommand::PolStartEdit { pk, pol } => handlers::pol_tool::start_edit(state, pk, pol),

            // === LoL ===
            AppCommand::LolSetEndpointStationing {
                endpoint,
                value,
                mode,
            } => {
                handlers::lol_tool::set_endpoint_stationing(state, host, sink, endpoint, value, mode);
            }
            AppCommand::LolMoveSegmentToStart => {
                handlers::lol_tool::move_to_start(state, host, sink);
            }
            AppCommand::LolMoveSegmentToEnd => {
                handlers::lol_tool::move_to_end(state, host, sink);
            }
            AppCommand::LolPrependSegment => {
                handlers::lol_tool::prepend(state, host, sink);
            }
            AppCommand::LolAppendSegment => {
                handlers::lol_tool::append(state, host, sink);
            }
            AppCommand::LolShiftSegment {
                direction,
                modifiers,
            } => {
                handlers::lol_tool::shift(state, host, sink, direction, modifiers);
            }
            AppCommand::LolSetDistance { distance } => {
                handlers::lol_tool::set_distance(state, host, sink, distance);
            }
            AppCommand::LolSetOffset { offset } => {
                handlers::lol_tool::set_offset(state, host, sink, offset);
            }
            AppCommand::LolFlip => {
                handlers::lol_tool::flip(state);
            }
            AppCommand::LolStartEdit { pk, lol } => handlers::lol_tool::start_edit(state, pk, lol),

            // === Optionen ===
            AppCommand::SetReferenceLayer { layer_id } => {
                handlers::options::set_reference_layer(state, layer_id)
            }
            AppCommand::ApplyOptions { options } => handlers::options::apply(state, options),
            AppCommand::LoadOptions { path } => handlers::options::load(state, &path),
            AppCommand::SaveOptions { path } => handlers::options::save(state, &path)?,
        }

        Ok(())
    }
}
