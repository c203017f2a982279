use fivekit_core::{KinematicsError, MotionCommand, OrientedPoint, Tolerance, Vector3, Winding};
use fivekit_kinematics::{
    plan_arc, resolve, to_motion_record, ArcPlanner, ArcPlannerConfig, KinematicsResult,
};
use std::f64::consts::{FRAC_PI_2, PI};

fn assert_vec_close(a: &Vector3, b: &Vector3, eps: f64) {
    assert!((a - b).norm() < eps, "{:?} != {:?}", a, b);
}

#[test]
fn test_resolve_reference_directions() {
    let up = resolve(&Vector3::z()).unwrap();
    assert_eq!(up.angles.tilt, 0.0);
    assert_eq!(up.angles.azimuth, 0.0);

    let side = resolve(&Vector3::x()).unwrap();
    assert!((side.angles.tilt - FRAC_PI_2).abs() < 1e-12);
    assert_eq!(side.angles.azimuth, 0.0);

    let down = resolve(&-Vector3::z()).unwrap();
    assert!((down.angles.tilt - PI).abs() < 1e-12);
    assert_eq!(down.angles.azimuth, 0.0);

    assert_eq!(
        resolve(&Vector3::zeros()).unwrap_err(),
        KinematicsError::DegenerateDirection
    );
}

#[test]
fn test_motion_record_in_tilted_frame() {
    // Tool along +X: the tilted frame sees the point on its +Z axis.
    let point = OrientedPoint::from_components(0.0, 0.0, 5.0, 1.0, 0.0, 0.0);
    let record = to_motion_record(&point, MotionCommand::Rapid).unwrap();
    assert_eq!(record.command, MotionCommand::Rapid);
    assert_vec_close(&record.position, &Vector3::new(5.0, 0.0, 0.0), 1e-12);
    let angles = record.angles.unwrap();
    assert!((angles.tilt - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn test_tilted_plane_arc() {
    // Arc of radius 2 in the plane x + z = 4, sweeping 120°.
    let center = Vector3::new(2.0, 1.0, 2.0);
    let u = Vector3::new(1.0, 0.0, -1.0).normalize();
    let v = Vector3::y();
    let radius = 2.0;
    let start = center + u * radius;
    let end = center + (u * (2.0 * PI / 3.0).cos() + v * (2.0 * PI / 3.0).sin()) * radius;

    let p1 = OrientedPoint::new(start, center - start);
    let p2 = OrientedPoint::new(end, Vector3::zeros());
    let arc = plan_arc(&p1, &p2, Winding::Ccw, PI / 18.0).unwrap();

    assert!((arc.spec.sweep() - 2.0 * PI / 3.0).abs() < 1e-9);
    assert!((arc.spec.radius() - radius).abs() < 1e-9);

    let machine: Vec<Vector3> = arc.machine_points().collect();
    assert_eq!(machine.len(), 13);
    assert_vec_close(&machine[0], &start, 1e-9);
    assert_vec_close(machine.last().unwrap(), &end, 1e-9);
    for p in &machine {
        assert!(((p - center).norm() - radius).abs() < 1e-9);
        // every point stays on the plane through the arc
        assert!((p - center).dot(&arc.normal).abs() < 1e-9);
    }
}

#[test]
fn test_winding_selects_arc() {
    let p1 = OrientedPoint::from_components(1.0, 0.0, 0.0, -1.0, 0.0, 0.0);
    let p2 = OrientedPoint::from_components(0.0, 1.0, 0.0, 0.0, 0.0, 0.0);

    let short = plan_arc(&p1, &p2, Winding::Ccw, 0.1).unwrap();
    let long = plan_arc(&p1, &p2, Winding::Cw, 0.1).unwrap();
    assert!((short.spec.sweep() - FRAC_PI_2).abs() < 1e-12);
    assert!((long.spec.sweep() + 1.5 * PI).abs() < 1e-12);
    assert!(long.points().count() > short.points().count());
}

#[test]
fn test_planner_tolerance_controls_identical_endpoints() {
    let p1 = OrientedPoint::from_components(1.0, 0.0, 0.0, -1.0, 0.0, 0.0);
    let near = Vector3::new(1.0, 1e-4, 0.0);

    let coarse = ArcPlanner::new(ArcPlannerConfig {
        tolerance: Tolerance::new(1e-3, 1e-9),
        step: 0.1,
    });
    let result: KinematicsResult<_> = coarse.plan(&p1, &near, Winding::Ccw);
    assert_eq!(result.unwrap_err(), KinematicsError::IdenticalEndpoints);

    let fine = ArcPlanner::default();
    assert!(fine.plan(&p1, &near, Winding::Ccw).is_ok());
}

#[test]
fn test_planning_is_thread_safe() {
    let handles: Vec<_> = (1..=4)
        .map(|i| {
            std::thread::spawn(move || {
                let r = i as f64;
                let p1 = OrientedPoint::from_components(r, 0.0, 0.0, -r, 0.0, 0.0);
                let p2 = OrientedPoint::from_components(0.0, r, 0.0, 0.0, 0.0, 0.0);
                plan_arc(&p1, &p2, Winding::Ccw, 0.05)
                    .map(|arc| arc.points().count())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 33);
    }
}
