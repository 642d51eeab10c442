//! End-to-end session tests over a synthetic head mesh.

#![allow(clippy::unwrap_used)]

use std::f64::consts::TAU;

use approx::assert_relative_eq;
use nalgebra::Point3;

use neuroglide::control::{PITCH_MAX, PITCH_MIN};
use neuroglide::{
    ControlAction, ControlConfig, FiducialSet, InputState, Protocol, ProxyConfig, Session,
    SnapRequest, StimulationType, SurfaceMesh,
};

/// A coarse octahedral head stand-in.
fn head_mesh() -> SurfaceMesh {
    let positions = [
        1.0, 0.0, 0.0, //
        -1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, -1.0, 0.0, //
        0.0, 0.0, 1.0, //
        0.0, 0.0, -1.0,
    ];
    let indices = [
        0, 2, 4, 2, 1, 4, 1, 3, 4, 3, 0, 4, //
        2, 0, 5, 1, 2, 5, 3, 1, 5, 0, 3, 5,
    ];
    SurfaceMesh::from_raw(&positions, &indices)
}

fn head_fiducials() -> FiducialSet {
    FiducialSet::new(
        Point3::new(0.0, 0.0, 0.9),
        Point3::new(0.0, 0.0, -0.9),
        Point3::new(-0.9, 0.0, 0.0),
        Point3::new(0.9, 0.0, 0.0),
    )
}

fn start_session(protocol: Protocol) -> Session {
    Session::new(
        &head_mesh(),
        Some(&head_fiducials()),
        ProxyConfig::preview(),
        ControlConfig::default(),
        protocol,
    )
    .unwrap()
}

#[test]
fn session_starts_with_fiducials_or_fallback() {
    let protocol = Protocol::standard(10.0, 40, 11.0, 100).unwrap();
    let with_fiducials = start_session(protocol);
    assert!(with_fiducials.tracker().proxy().face_count() > 0);

    let without = Session::new(
        &head_mesh(),
        None,
        ProxyConfig::preview(),
        ControlConfig::default(),
        protocol,
    )
    .unwrap();
    assert!(without.tracker().proxy().face_count() > 0);
}

#[test]
fn movement_keeps_ghost_invariants_and_moves_the_coil() {
    let mut session = start_session(Protocol::standard(10.0, 40, 11.0, 3000).unwrap());

    let start = session.update(&InputState::new(), 0.016).position;

    let actions = [
        ControlAction::MoveLeft,
        ControlAction::MoveUp,
        ControlAction::MoveRight,
        ControlAction::MoveDown,
    ];
    for step in 0..500 {
        let mut input = InputState::new();
        input.press(actions[step % actions.len()]);
        session.update(&input, 0.02);

        let ghost = session.ghost();
        assert!((0.0..TAU).contains(&ghost.yaw));
        assert!((PITCH_MIN..=PITCH_MAX).contains(&ghost.pitch));
    }

    let mut input = InputState::new();
    input.press(ControlAction::MoveLeft);
    for _ in 0..50 {
        session.update(&input, 0.02);
    }
    let end = session.update(&InputState::new(), 0.016).position;
    assert!((end - start).norm() > 1e-3, "coil never moved");
    assert!(session.diagnostics().committed_moves > 0);
}

#[test]
fn session_emits_exactly_the_pulse_budget() {
    let mut session = start_session(Protocol::standard(50.0, 5, 0.2, 23).unwrap());
    let input = InputState::new();

    let mut total = 0;
    for _ in 0..10_000 {
        total += session.update(&input, 0.016).pulses_emitted;
        if session.scheduler().is_complete() {
            break;
        }
    }
    assert_eq!(total, 23);
    // Budget exhausted: further updates stay silent
    assert_eq!(session.update(&input, 1.0).pulses_emitted, 0);
}

#[test]
fn oversized_frame_delta_is_clamped_for_both_subsystems() {
    let mut session = start_session(Protocol::standard(50.0, 1000, 0.0, 1000).unwrap());
    // 100 s of wall time collapses to max_tick_delta (0.1 s) -> 5 pulses at 50 Hz
    let tick = session.update(&InputState::new(), 100.0);
    assert_eq!(tick.pulses_emitted, 5);
}

#[test]
fn snap_tokens_are_consumed_once_per_value() {
    let mut session = start_session(Protocol::standard(10.0, 40, 11.0, 100).unwrap());

    let target = session
        .tracker()
        .project_spherical(2.5, 0.7, None)
        .unwrap()
        .point;

    let request = SnapRequest { token: 1, target };
    assert!(session.request_snap(&request));
    assert_relative_eq!(session.ghost().yaw, 2.5, epsilon = 1e-6);
    assert!(!session.request_snap(&request));
    assert_eq!(session.diagnostics().snaps_applied, 1);

    assert!(session.request_snap(&SnapRequest { token: 2, target }));
    assert_eq!(session.diagnostics().snaps_applied, 2);
}

#[test]
fn snap_round_trip_reproduces_the_point() {
    let session = start_session(Protocol::standard(10.0, 40, 11.0, 100).unwrap());
    let tracker = session.tracker();

    for &(yaw, pitch) in &[(0.5, 0.6), (2.2, 1.0), (4.0, 0.4), (5.7, 0.9)] {
        let point = tracker.project_spherical(yaw, pitch, None).unwrap().point;
        let (yaw2, pitch2) = tracker.spherical_coordinates(&point);
        let back = tracker.project_spherical(yaw2, pitch2, None).unwrap().point;
        assert_relative_eq!((back - point).norm(), 0.0, epsilon = 1e-6);
    }
}

#[test]
fn locked_session_ignores_movement() {
    let mut session = start_session(Protocol::standard(10.0, 40, 11.0, 100).unwrap());
    session.set_locked(true);
    assert!(session.is_locked());

    let ghost_before = *session.ghost();
    let mut input = InputState::new();
    input.press(ControlAction::MoveLeft);
    for _ in 0..20 {
        session.update(&input, 0.02);
    }
    assert_eq!(session.ghost().yaw, ghost_before.yaw);

    // The pulse schedule keeps running while locked
    assert!(session.scheduler().total_delivered() > 0);
}

#[test]
fn rebuild_surface_replaces_the_proxy_wholesale() {
    let mut session = start_session(Protocol::standard(10.0, 40, 11.0, 100).unwrap());
    let faces_before = session.tracker().proxy().face_count();

    // Rebuild against a scaled copy of the head without fiducials
    let mut bigger = head_mesh();
    for vertex in &mut bigger.vertices {
        vertex.position = Point3::from(vertex.position.coords * 2.0);
    }
    session.rebuild_surface(&bigger, None).unwrap();

    assert_eq!(session.tracker().proxy().face_count(), faces_before);
    // Queries resolve against the new, larger surface
    let hit = session
        .tracker()
        .project_spherical(1.0, 0.8, None)
        .unwrap();
    assert!((hit.point - session.tracker().center()).norm() > 0.5);

    // A rebuild from an empty source fails and keeps the old surface
    assert!(session
        .rebuild_surface(&SurfaceMesh::new(), None)
        .is_err());
    assert!(session.tracker().project_spherical(1.0, 0.8, None).is_some());
}

#[test]
fn itbs_session_reports_interval_state() {
    let mut session = start_session(Protocol::intermittent_theta_burst(600).unwrap());
    assert_eq!(
        session.scheduler().protocol().stimulation_type(),
        StimulationType::IntermittentThetaBurst
    );

    let input = InputState::new();
    let mut saw_pause = false;
    let mut saw_pulses_while_active = false;
    for _ in 0..40_000 {
        let tick = session.update(&input, 0.016);
        if tick.interval.in_inter_train_interval {
            saw_pause = true;
            assert!(tick.interval.remaining_seconds > 0.0);
            assert!((0.0..=1.0).contains(&tick.interval.progress));
        } else if tick.pulses_emitted > 0 {
            saw_pulses_while_active = true;
        }
        if session.scheduler().is_complete() {
            break;
        }
    }
    assert!(saw_pause);
    assert!(saw_pulses_while_active);
    assert_eq!(session.scheduler().total_delivered(), 600);
}
