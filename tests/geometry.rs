use glam::DVec2;
use pagewarp::{MapError, Quad};

fn p(x: f64, y: f64) -> DVec2 {
    DVec2::new(x, y)
}

#[test]
fn test_unit_square_corner_order() {
    let q = Quad::unit_square();
    assert_eq!(q.corners(), &[p(0.0, 1.0), p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]);
}

#[test]
fn test_screen_rect_corner_order() {
    let q = Quad::screen_rect(1280.0, 720.0);
    assert_eq!(q.corner(0), p(0.0, 720.0));
    assert_eq!(q.corner(1), p(0.0, 0.0));
    assert_eq!(q.corner(2), p(1280.0, 0.0));
    assert_eq!(q.corner(3), p(1280.0, 720.0));
}

#[test]
fn test_from_points_needs_four() {
    let pts = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)];
    assert_eq!(Quad::from_points(&pts), Err(MapError::InsufficientPoints { got: 3 }));
    assert_eq!(Quad::from_points(&[]), Err(MapError::InsufficientPoints { got: 0 }));
}

#[test]
fn test_from_points_ignores_extras() {
    let pts = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(9.0, 9.0)];
    let q = Quad::from_points(&pts).unwrap();
    assert_eq!(q, Quad::new(pts[0], pts[1], pts[2], pts[3]));
}

#[test]
fn test_bounds_and_centroid() {
    let q = Quad::new(p(150.0, 500.0), p(250.0, 100.0), p(550.0, 100.0), p(650.0, 500.0));
    assert_eq!(q.bounds(), (p(150.0, 100.0), p(650.0, 500.0)));
    assert_eq!(q.centroid(), p(400.0, 300.0));
}

#[test]
fn test_quad_json_shape() {
    let value = serde_json::to_value(Quad::unit_square()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "corners": [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]] })
    );
    let back: Quad = serde_json::from_value(value).unwrap();
    assert_eq!(back, Quad::unit_square());
}
