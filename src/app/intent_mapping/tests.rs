use crate::app::state::ActiveTool;
use crate::app::tools::StepDirection;
use crate::app::{AppCommand, AppIntent, AppState};
use crate::features::PolFeature;
use crate::host::{Modifiers, MouseEvent};
use crate::shared::LrOptions;
use glam::DVec2;

use super::map_intent_to_commands;

fn state_with(tool: ActiveTool) -> AppState {
    let mut state = AppState::new();
    state.active_tool = tool;
    state.options.reference_layer_id = Some("roads".to_string());
    state
}

#[test]
fn tool_selected_cancels_before_switching() {
    let state = state_with(ActiveTool::Pol);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ToolSelected {
            tool: ActiveTool::Lol,
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::CancelTools));
    assert!(matches!(
        commands[1],
        AppCommand::SetActiveTool {
            tool: ActiveTool::Lol
        }
    ));
}

#[test]
fn same_tool_selected_maps_to_nothing() {
    let state = state_with(ActiveTool::Pol);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ToolSelected {
            tool: ActiveTool::Pol,
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn mouse_without_active_tool_is_dropped() {
    let state = state_with(ActiveTool::None);
    let event = MouseEvent::new(DVec2::new(1.0, 2.0), None);

    let commands = map_intent_to_commands(&state, AppIntent::MouseClicked { event });

    assert!(commands.is_empty());
}

#[test]
fn step_maps_per_active_tool() {
    let intent = AppIntent::StepRequested {
        direction: StepDirection::Forward,
        modifiers: Modifiers::NONE,
    };

    let pol = map_intent_to_commands(&state_with(ActiveTool::Pol), intent.clone());
    assert!(matches!(pol[0], AppCommand::PolStep { .. }));

    let lol = map_intent_to_commands(&state_with(ActiveTool::Lol), intent);
    assert!(matches!(lol[0], AppCommand::LolShiftSegment { .. }));
}

#[test]
fn segment_intents_need_lol_tool() {
    let state = state_with(ActiveTool::Pol);

    assert!(map_intent_to_commands(&state, AppIntent::FlipRequested).is_empty());
    assert!(
        map_intent_to_commands(&state, AppIntent::DistanceEdited { distance: 5.0 }).is_empty()
    );
}

#[test]
fn edit_request_activates_tool_in_order() {
    let state = state_with(ActiveTool::Lol);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::EditPolRequested {
            pk: 3,
            pol: PolFeature::new(),
        },
    );

    assert_eq!(commands.len(), 3);
    assert!(matches!(commands[0], AppCommand::CancelTools));
    assert!(matches!(
        commands[1],
        AppCommand::SetActiveTool {
            tool: ActiveTool::Pol
        }
    ));
    assert!(matches!(commands[2], AppCommand::PolStartEdit { pk: 3, .. }));
}

#[test]
fn removing_reference_layer_cancels_tools() {
    let state = state_with(ActiveTool::Pol);

    let other = map_intent_to_commands(
        &state,
        AppIntent::LayerRemoved {
            layer_id: "rivers".to_string(),
        },
    );
    assert!(other.is_empty());

    let reference = map_intent_to_commands(
        &state,
        AppIntent::LayerRemoved {
            layer_id: "roads".to_string(),
        },
    );
    assert_eq!(reference.len(), 2);
    assert!(matches!(reference[0], AppCommand::CancelTools));
    assert!(matches!(
        reference[1],
        AppCommand::SetReferenceLayer { layer_id: None }
    ));
}

#[test]
fn removing_layer_of_edited_pol_cancels_tools() {
    let mut state = state_with(ActiveTool::Pol);
    let pol = PolFeature {
        ref_layer_id: Some("other".to_string()),
        ref_fid: Some(3),
        ..PolFeature::new()
    };
    state.pol_tool.start_edit(42, pol);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::LayerRemoved {
            layer_id: "other".to_string(),
        },
    );
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::CancelTools));

    let unrelated = map_intent_to_commands(
        &state,
        AppIntent::LayerRemoved {
            layer_id: "rivers".to_string(),
        },
    );
    assert!(unrelated.is_empty());
}

#[test]
fn options_with_new_reference_cancel_tools() {
    let state = state_with(ActiveTool::Pol);

    let unchanged = map_intent_to_commands(
        &state,
        AppIntent::OptionsChanged {
            options: state.options.clone(),
        },
    );
    assert_eq!(unchanged.len(), 1);

    let changed = map_intent_to_commands(
        &state,
        AppIntent::OptionsChanged {
            options: LrOptions::default(),
        },
    );
    assert_eq!(changed.len(), 2);
    assert!(matches!(changed[0], AppCommand::CancelTools));
}
