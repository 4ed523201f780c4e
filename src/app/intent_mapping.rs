//! Mapping von Host-Intents auf mutierende App-Commands.

use super::state::ActiveTool;
use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
///
/// Werkzeug-spezifische Intents ergeben nur beim passenden aktiven Werkzeug
/// Commands.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let active = state.active_tool;
    if active == ActiveTool::None && is_tool_input(&intent) {
        return vec![];
    }

    match intent {
        AppIntent::ToolSelected { tool } => {
            if tool == active {
                vec![]
            } else {
                vec![AppCommand::CancelTools, AppCommand::SetActiveTool { tool }]
            }
        }
        AppIntent::ToolDeactivated | AppIntent::ProjectClosed => vec![
            AppCommand::CancelTools,
            AppCommand::SetActiveTool {
                tool: ActiveTool::None,
            },
        ],

        // === Maus ===
        AppIntent::MouseMoved { event } => vec![AppCommand::ToolMouseMove { event }],
        AppIntent::MouseClicked { event } => vec![AppCommand::ToolClick { event }],
        AppIntent::DragStarted { event } => vec![AppCommand::ToolDragStart { event }],
        AppIntent::DragMoved { event } => vec![AppCommand::ToolDragUpdate { event }],
        AppIntent::DragEnded => vec![AppCommand::ToolDragEnd],

        // === Stationierung ===
        AppIntent::PointStationingEdited { value, mode } => match active {
            ActiveTool::Pol => vec![AppCommand::PolSetStationing { value, mode }],
            _ => vec![],
        },
        AppIntent::EndpointStationingEdited {
            endpoint,
            value,
            mode,
        } => match active {
            ActiveTool::Lol => vec![AppCommand::LolSetEndpointStationing {
                endpoint,
                value,
                mode,
            }],
            _ => vec![],
        },
        AppIntent::MoveToStartRequested => match active {
            ActiveTool::Pol => vec![AppCommand::PolMoveToStart],
            ActiveTool::Lol => vec![AppCommand::LolMoveSegmentToStart],
            ActiveTool::None => vec![],
        },
        AppIntent::MoveToEndRequested => match active {
            ActiveTool::Pol => vec![AppCommand::PolMoveToEnd],
            ActiveTool::Lol => vec![AppCommand::LolMoveSegmentToEnd],
            ActiveTool::None => vec![],
        },
        AppIntent::StepRequested {
            direction,
            modifiers,
        } => match active {
            ActiveTool::Pol => vec![AppCommand::PolStep {
                direction,
                modifiers,
            }],
            ActiveTool::Lol => vec![AppCommand::LolShiftSegment {
                direction,
                modifiers,
            }],
            ActiveTool::None => vec![],
        },

        // === Abschnitt ===
        AppIntent::SegmentPrependRequested => lol_only(active, AppCommand::LolPrependSegment),
        AppIntent::SegmentAppendRequested => lol_only(active, AppCommand::LolAppendSegment),
        AppIntent::DistanceEdited { distance } => {
            lol_only(active, AppCommand::LolSetDistance { distance })
        }
        AppIntent::OffsetEdited { offset } => lol_only(active, AppCommand::LolSetOffset { offset }),
        AppIntent::FlipRequested => lol_only(active, AppCommand::LolFlip),

        // === Lifecycle ===
        AppIntent::CommitRequested => vec![AppCommand::ToolCommit],
        AppIntent::DeleteRequested => vec![AppCommand::ToolDelete],
        AppIntent::CancelRequested => vec![AppCommand::ToolReset],
        AppIntent::EditPolRequested { pk, pol } => vec![
            AppCommand::CancelTools,
            AppCommand::SetActiveTool {
                tool: ActiveTool::Pol,
            },
            AppCommand::PolStartEdit { pk, pol },
        ],
        AppIntent::EditLolRequested { pk, lol } => vec![
            AppCommand::CancelTools,
            AppCommand::SetActiveTool {
                tool: ActiveTool::Lol,
            },
            AppCommand::LolStartEdit { pk, lol },
        ],

        // === Referenz & Optionen ===
        AppIntent::ReferenceLayerChanged { layer_id } => {
            if layer_id == state.options.reference_layer_id {
                vec![]
            } else {
                vec![
                    AppCommand::CancelTools,
                    AppCommand::SetReferenceLayer { layer_id },
                ]
            }
        }
        AppIntent::LayerRemoved { layer_id } => {
            if state.options.reference_layer_id.as_deref() == Some(layer_id.as_str()) {
                vec![
                    AppCommand::CancelTools,
                    AppCommand::SetReferenceLayer { layer_id: None },
                ]
            } else if tools_hold_layer(state, &layer_id) {
                // Edit-Datensatz auf einem anderen Layer als dem Referenz-Layer
                vec![AppCommand::CancelTools]
            } else {
                vec![]
            }
        }
        AppIntent::OptionsChanged { options } => {
            if options.reference_layer_id == state.options.reference_layer_id {
                vec![AppCommand::ApplyOptions { options }]
            } else {
                vec![AppCommand::CancelTools, AppCommand::ApplyOptions { options }]
            }
        }
        AppIntent::OptionsLoadRequested { path } => vec![
            AppCommand::CancelTools,
            AppCommand::LoadOptions { path },
        ],
        AppIntent::OptionsSaveRequested { path } => vec![AppCommand::SaveOptions { path }],
    }
}

/// Eingaben, die ohne aktives Werkzeug keine Wirkung haben.
fn is_tool_input(intent: &AppIntent) -> bool {
    matches!(
        intent,
        AppIntent::MouseMoved { .. }
            | AppIntent::MouseClicked { .. }
            | AppIntent::DragStarted { .. }
            | AppIntent::DragMoved { .. }
            | AppIntent::DragEnded
            | AppIntent::CommitRequested
            | AppIntent::DeleteRequested
            | AppIntent::CancelRequested
    )
}

fn lol_only(active: ActiveTool, command: AppCommand) -> Vec<AppCommand> {
    if active == ActiveTool::Lol {
        vec![command]
    } else {
        vec![]
    }
}

/// Hält eines der Werkzeuge einen PoL/LoL mit Referenz auf `layer_id`?
fn tools_hold_layer(state: &AppState, layer_id: &str) -> bool {
    let held = [
        state.pol_tool.pol(),
        state.lol_tool.from_pol(),
        state.lol_tool.hover_pol(),
        state.lol_tool.lol().map(|lol| &lol.pol_from),
        state.lol_tool.lol().map(|lol| &lol.pol_to),
    ];
    held.into_iter()
        .flatten()
        .any(|pol| pol.ref_layer_id.as_deref() == Some(layer_id))
}

#[cfg(test)]
mod tests;
