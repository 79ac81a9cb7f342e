use approx::assert_abs_diff_eq;
use palletize::calib::{PointSlot, ValidatorParams};
use palletize::core::{
    calc_app_ret_pos_arr, resolve_frame, Dimension, EulerAngle, Point3, Pose, ToolOffset,
};
use palletize::layout::{FeederParams, PackingParams};
use palletize::{
    derive_feeder_pallet, generate_packing_layout, validate_calibration, TaughtPoints,
};

fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

fn taught(position: Point3<f64>) -> Pose {
    Pose::new(position, EulerAngle::new(0.0, 180.0, 0.0))
}

#[test]
fn validated_points_drive_a_packing_layout_with_waypoints() {
    let origin = p(500.0, -400.0, 100.0);
    let x_ref = p(1700.0, -400.0, 100.0);
    let y_ref = p(500.0, 400.0, 100.0);

    let points = TaughtPoints::new(
        Some(taught(origin)),
        Some(taught(x_ref)),
        Some(taught(y_ref)),
    );
    let report = validate_calibration(&points, &ValidatorParams::default());
    assert!(report.is_clean());
    assert!(PointSlot::ALL.iter().all(|&s| report.is_point_valid(s)));

    let params = PackingParams::new(Dimension::new(200.0, 300.0, 400.0), 4, 2, 3);
    let layout = generate_packing_layout(&origin, &x_ref, &y_ref, &params);
    assert_eq!(layout.len(), 24);

    let first = layout.get(0).expect("first");
    assert_eq!(first.position, p(650.0, -200.0, 300.0));
    // Snake order: row 1 starts at the far column.
    let third = layout.get(2).expect("third");
    assert_eq!(third.position, p(950.0, 200.0, 300.0));

    let approach = calc_app_ret_pos_arr(layout.as_slice(), &ToolOffset::new(0.0, 0.0, 150.0));
    assert_eq!(approach.len(), layout.len());
    for (waypoint, pose) in approach.iter().zip(&layout) {
        let waypoint = waypoint.expect("waypoint");
        // Level frame with zero orientation: tool Z is world Z, so backing
        // off moves the pose down.
        assert_abs_diff_eq!(waypoint.position.x, pose.position.x, epsilon = 1e-6);
        assert_abs_diff_eq!(waypoint.position.y, pose.position.y, epsilon = 1e-6);
        assert_abs_diff_eq!(waypoint.position.z, pose.position.z - 150.0, epsilon = 1e-6);
    }
}

#[test]
fn feeder_pallet_rebuilds_product_tops() {
    let params = FeederParams {
        product: Dimension::new(100.0, 100.0, 100.0),
        rows: 5,
        columns: 3,
        layers: 2,
        pallet: Dimension::new(150.0, 800.0, 600.0),
    };
    let (a, b, c) = (p(0.0, 0.0, 200.0), p(400.0, 0.0, 200.0), p(0.0, 200.0, 200.0));
    let feeder = derive_feeder_pallet(&a, &b, &c, &params).expect("feeder");

    assert_eq!(feeder.product_poses.len(), 30);
    assert_abs_diff_eq!(feeder.row_padding, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(feeder.column_padding, 0.0, epsilon = 1e-9);

    // Top layer starts at index 15 and its first product sits under point1.
    let top_first = feeder.product_poses.get(15).expect("top layer");
    assert_abs_diff_eq!(top_first.position.x, a.x, epsilon = 1e-6);
    assert_abs_diff_eq!(top_first.position.y, a.y, epsilon = 1e-6);
    assert_abs_diff_eq!(top_first.position.z, a.z, epsilon = 1e-6);

    assert_abs_diff_eq!(feeder.pallet_pose.position.z, 0.0, epsilon = 1e-9);
}

#[test]
fn tilted_frame_orientation_is_shared_by_every_product() {
    let (o, a, b) = (p(0.0, 0.0, 0.0), p(600.0, 0.0, 0.0), p(0.0, 400.0, 400.0));
    let frame = resolve_frame(&o, &a, &b).expect("frame");
    assert_eq!(frame.euler, EulerAngle::new(-90.0, 45.0, 90.0));

    let params = PackingParams::new(Dimension::new(10.0, 100.0, 100.0), 2, 2, 1);
    let layout = generate_packing_layout(&o, &a, &b, &params);
    assert!(layout.iter().all(|pose| pose.orientation == frame.euler));
}
