use super::*;
use crate::app::events::CommitKind;
use crate::app::tools::{MapTool, StepDirection, ToolAction, ToolContext, ToolRecord};
use crate::core::{LrError, Polyline, WkbType};
use crate::features::{Endpoint, LrMode};
use crate::host::{CollectingSink, MemoryHost, MemoryLayer, Modifiers, MouseEvent};
use crate::shared::{LrOptions, SNAP_TOLERANCE};
use approx::assert_relative_eq;
use glam::DVec2;

const LAYER: &str = "roads";

fn host() -> MemoryHost {
    let mut host = MemoryHost::new("EPSG:25832");
    host.add_layer(
        MemoryLayer::new(LAYER, WkbType::line_string(false, true), Some("EPSG:25832"))
            .with_feature(
                1,
                Polyline::from_xym(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0), (10.0, 10.0, 25.0)])
                    .expect("gültig"),
            )
            .with_feature(
                2,
                Polyline::from_xym(&[(0.0, 20.0, 0.0), (30.0, 20.0, 30.0)]).expect("gültig"),
            ),
    );
    host
}

fn options() -> LrOptions {
    LrOptions {
        reference_layer_id: Some(LAYER.to_string()),
        ..LrOptions::default()
    }
}

fn event(host: &MemoryHost, x: f64, y: f64) -> MouseEvent {
    host.mouse_event(DVec2::new(x, y), SNAP_TOLERANCE)
}

/// Werkzeug mit gemessenem Abschnitt 2..8 auf fid 1.
fn measured_tool(host: &MemoryHost, options: &LrOptions, sink: &mut CollectingSink) -> LolTool {
    let mut tool = LolTool::new();
    let mut ctx = ToolContext::new(host, sink, options);
    assert_eq!(
        tool.on_click(&mut ctx, &event(host, 2.0, 1.0)),
        ToolAction::Updated
    );
    assert_eq!(
        tool.on_click(&mut ctx, &event(host, 8.0, 1.0)),
        ToolAction::Measured
    );
    tool
}

fn range(tool: &LolTool) -> (f64, f64) {
    let lol = tool.lol().expect("Abschnitt erwartet");
    (
        lol.pol_from.snap_n_abs.expect("from"),
        lol.pol_to.snap_n_abs.expect("to"),
    )
}

fn assert_range(tool: &LolTool, from: f64, to: f64) {
    let (actual_from, actual_to) = range(tool);
    assert_relative_eq!(actual_from, from, epsilon = 1e-9);
    assert_relative_eq!(actual_to, to, epsilon = 1e-9);
}

#[test]
fn test_zwei_klicks_mit_vorschau() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = LolTool::new();
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    tool.on_click(&mut ctx, &event(&host, 2.0, 1.0));
    assert!(tool.from_pol().is_some());
    assert!(matches!(tool.record(), Some(ToolRecord::Pol(_))));

    // Hover auf einer anderen Linie zeigt keine Vorschau
    assert_eq!(
        tool.on_mouse_move(&mut ctx, &event(&host, 5.0, 19.0)),
        ToolAction::Ignored
    );
    assert!(tool.preview_segment(&host).is_none());

    assert_eq!(
        tool.on_mouse_move(&mut ctx, &event(&host, 8.0, 1.0)),
        ToolAction::Updated
    );
    let preview = tool.preview_segment(&host).expect("Vorschau erwartet");
    assert_eq!(preview.vertex_count(), 2);
    let last = preview.last_vertex().expect("Endpunkt");
    assert_relative_eq!(last.x, 8.0);

    // Zweiter Klick auf anderer Linie: abgelehnt, Anfang bleibt
    assert_eq!(
        tool.on_click(&mut ctx, &event(&host, 5.0, 18.0)),
        ToolAction::Rejected(LrError::FidMismatch)
    );
    assert!(matches!(tool.state(), LolToolState::AwaitingTo { .. }));

    assert_eq!(
        tool.on_click(&mut ctx, &event(&host, 8.0, 1.0)),
        ToolAction::Measured
    );
    let lol = tool.lol().expect("Abschnitt erwartet");
    assert!(lol.is_valid);
    assert_relative_eq!(lol.distance().expect("Länge"), 6.0);
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_erster_klick_ohne_snap() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = LolTool::new();
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    assert_eq!(
        tool.on_click(&mut ctx, &event(&host, 50.0, 50.0)),
        ToolAction::Rejected(LrError::NoSnap)
    );
    assert_eq!(tool.state(), &LolToolState::Idle);
}

#[test]
fn test_abschnitt_verschieben() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = measured_tool(&host, &options, &mut sink);
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    let ctrl = Modifiers {
        ctrl: true,
        shift: false,
    };
    tool.shift_segment(&mut ctx, StepDirection::Forward, ctrl);
    assert_range(&tool, 12.0, 18.0);
    // Begrenzt durch das Linienende, Länge bleibt
    tool.shift_segment(&mut ctx, StepDirection::Forward, ctrl);
    assert_range(&tool, 14.0, 20.0);

    tool.move_segment_to_start(&mut ctx);
    assert_range(&tool, 0.0, 6.0);
    tool.append_segment(&mut ctx);
    assert_range(&tool, 6.0, 12.0);
    tool.prepend_segment(&mut ctx);
    assert_range(&tool, 0.0, 6.0);
    tool.move_segment_to_end(&mut ctx);
    assert_range(&tool, 14.0, 20.0);
    tool.append_segment(&mut ctx);
    assert_range(&tool, 20.0, 20.0);
    assert!(sink.is_empty());
}

#[test]
fn test_richtung_bleibt_bei_operationen() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = measured_tool(&host, &options, &mut sink);
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    assert_eq!(tool.flip(), ToolAction::Updated);
    assert_range(&tool, 8.0, 2.0);
    assert_relative_eq!(tool.lol().and_then(|l| l.distance()).expect("Länge"), -6.0);

    tool.move_segment_to_start(&mut ctx);
    assert_range(&tool, 6.0, 0.0);
}

#[test]
fn test_laenge_setzen() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = measured_tool(&host, &options, &mut sink);
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    tool.set_distance(&mut ctx, 10.0);
    assert_range(&tool, 2.0, 12.0);
    tool.set_distance(&mut ctx, 30.0);
    assert_range(&tool, 2.0, 20.0);
    tool.set_distance(&mut ctx, -5.0);
    assert_range(&tool, 2.0, 0.0);
}

#[test]
fn test_endpunkt_per_formular() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = measured_tool(&host, &options, &mut sink);
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    assert_eq!(
        tool.set_endpoint_stationing(&mut ctx, Endpoint::To, 20.0, LrMode::MAbs),
        ToolAction::Updated
    );
    assert_eq!(
        tool.set_endpoint_stationing(&mut ctx, Endpoint::From, 0.5, LrMode::NFract),
        ToolAction::Updated
    );
    assert_range(&tool, 10.0, 50.0 / 3.0);

    // Numerische Eingaben werden nicht begrenzt, sondern abgelehnt
    assert_eq!(
        tool.set_endpoint_stationing(&mut ctx, Endpoint::To, 25.0, LrMode::NAbs),
        ToolAction::Rejected(LrError::StationingOutOfRange)
    );
    assert_range(&tool, 10.0, 50.0 / 3.0);
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_versatz_in_vorschau() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = measured_tool(&host, &options, &mut sink);
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    tool.set_endpoint_stationing(&mut ctx, Endpoint::From, 5.0, LrMode::NAbs);
    tool.set_endpoint_stationing(&mut ctx, Endpoint::To, 15.0, LrMode::NAbs);
    assert_eq!(tool.set_offset(&mut ctx, 1.0), ToolAction::Updated);

    let segment = tool.preview_segment(&host).expect("Abschnitt erwartet");
    let points: Vec<(f64, f64)> = segment.vertices().map(|v| (v.x, v.y)).collect();
    assert_eq!(points.len(), 3);
    for (actual, expected) in points.iter().zip([(5.0, 1.0), (9.0, 1.0), (9.0, 5.0)]) {
        assert_relative_eq!(actual.0, expected.0, epsilon = 1e-9);
        assert_relative_eq!(actual.1, expected.1, epsilon = 1e-9);
    }
}

#[test]
fn test_endpunkt_und_abschnitt_ziehen() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = measured_tool(&host, &options, &mut sink);
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    // Endpunkt `to` ziehen
    assert_eq!(
        tool.drag_start(&mut ctx, &event(&host, 8.0, 0.5)),
        ToolAction::Updated
    );
    tool.drag_update(&mut ctx, &event(&host, 10.0, 4.0));
    assert_eq!(tool.drag_end(&mut ctx), ToolAction::Updated);
    assert_range(&tool, 2.0, 14.0);

    // Ganzen Abschnitt ziehen, begrenzt durch das Linienende
    assert_eq!(
        tool.drag_start(&mut ctx, &event(&host, 5.0, 0.5)),
        ToolAction::Updated
    );
    tool.drag_update(&mut ctx, &event(&host, 7.0, 0.5));
    assert_range(&tool, 4.0, 16.0);
    tool.drag_update(&mut ctx, &event(&host, 10.0, 8.0));
    assert_range(&tool, 8.0, 20.0);
    assert_eq!(tool.drag_end(&mut ctx), ToolAction::Updated);
    assert!(sink.is_empty());
}

#[test]
fn test_drag_auf_andere_linie_wird_gemeldet() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = measured_tool(&host, &options, &mut sink);
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    tool.drag_start(&mut ctx, &event(&host, 2.0, 0.5));
    assert_eq!(
        tool.drag_update(&mut ctx, &event(&host, 5.0, 18.0)),
        ToolAction::Ignored
    );
    // Während des Drags keine Formular-Eingaben und kein Speichern
    assert_eq!(
        tool.set_endpoint_stationing(&mut ctx, Endpoint::From, 1.0, LrMode::NAbs),
        ToolAction::Ignored
    );
    assert!(tool.commit(&mut ctx).is_none());
    assert_eq!(
        tool.drag_end(&mut ctx),
        ToolAction::Rejected(LrError::FidMismatch)
    );
    assert_range(&tool, 2.0, 8.0);
}

#[test]
fn test_commit_und_edit() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = measured_tool(&host, &options, &mut sink);
    let lol = tool.lol().cloned().expect("Abschnitt");
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    let insert = tool.commit(&mut ctx).expect("INSERT erwartet");
    assert_eq!(insert.kind, CommitKind::Insert);
    assert_eq!(tool.state(), &LolToolState::Idle);

    tool.start_edit(3, lol);
    tool.move_segment_to_start(&mut ctx);
    let update = tool.commit(&mut ctx).expect("UPDATE erwartet");
    assert_eq!(update.kind, CommitKind::Update);
    assert_eq!(update.pk, Some(3));
    assert_eq!(tool.edit_pk(), Some(3));

    let delete = tool.delete(&mut ctx).expect("DELETE erwartet");
    assert_eq!(delete.kind, CommitKind::Delete);
    assert!(!tool.has_pending_input());
}

#[test]
fn test_verschieben_ans_linienende_trotz_rundung() {
    let mut host = MemoryHost::new("EPSG:25832");
    host.add_layer(
        MemoryLayer::new("street", WkbType::line_string(false, false), Some("EPSG:25832"))
            .with_feature(
                1,
                Polyline::from_xy(&[(0.0, 0.0), (23.44, 0.0)]).expect("gültig"),
            ),
    );
    let options = LrOptions {
        reference_layer_id: Some("street".to_string()),
        ..LrOptions::default()
    };
    let mut sink = CollectingSink::new();
    let mut tool = LolTool::new();
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    tool.on_click(&mut ctx, &event(&host, 5.13, 0.5));
    assert_eq!(
        tool.on_click(&mut ctx, &event(&host, 5.42, 0.5)),
        ToolAction::Measured
    );

    let ctrl_shift = Modifiers {
        ctrl: true,
        shift: true,
    };
    assert_eq!(
        tool.shift_segment(&mut ctx, StepDirection::Forward, ctrl_shift),
        ToolAction::Updated
    );
    assert_range(&tool, 23.15, 23.44);

    assert_eq!(tool.append_segment(&mut ctx), ToolAction::Updated);
    assert_range(&tool, 23.44, 23.44);
    assert!(sink.is_empty());
}

#[test]
fn test_nicht_endlicher_versatz_abgelehnt() {
    let host = host();
    let options = options();
    let mut sink = CollectingSink::new();
    let mut tool = measured_tool(&host, &options, &mut sink);
    let mut ctx = ToolContext::new(&host, &mut sink, &options);

    assert_eq!(tool.set_offset(&mut ctx, 2.0), ToolAction::Updated);
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            tool.set_offset(&mut ctx, bad),
            ToolAction::Rejected(LrError::OffsetCurveFailed)
        );
    }
    assert_relative_eq!(tool.lol().expect("Abschnitt erwartet").offset, 2.0);
    assert_eq!(sink.len(), 3);
}
