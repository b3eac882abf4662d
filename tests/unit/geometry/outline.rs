use super::*;

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn square() -> Outline {
    Outline::new([pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])])
}

fn assert_bounds_exact(o: &Outline) {
    let all: Vec<Vector> = o.subpaths().iter().flatten().copied().collect();
    let min_x = all.iter().map(|v| v.x).min().unwrap();
    let min_y = all.iter().map(|v| v.y).min().unwrap();
    let max_x = all.iter().map(|v| v.x).max().unwrap();
    let max_y = all.iter().map(|v| v.y).max().unwrap();
    assert_eq!(o.min(), Vector::new(min_x, min_y));
    assert_eq!(o.max(), Vector::new(max_x, max_y));
    assert_eq!(o.dim().w, o.max().x - o.min().x);
    assert_eq!(o.dim().h, o.max().y - o.min().y);
}

#[test]
fn ingestion_truncates_coordinates() {
    let o = Outline::new([pts(&[(1.9, 2.1), (-3.7, 4.99)])]);
    assert_eq!(o.subpaths()[0], vec![Vector::new(1, 2), Vector::new(-3, 4)]);
    assert_bounds_exact(&o);
}

#[test]
fn translate_moves_min_corner_to_target() {
    let mut o = Outline::new([
        pts(&[(5.0, 7.0), (15.0, 7.0), (15.0, 20.0)]),
        pts(&[(8.0, 9.0), (9.0, 12.0)]),
    ]);
    o.translate(100.0, 50.0);
    assert_eq!(o.min(), Vector::new(100, 50));
    assert_eq!(o.max(), Vector::new(110, 63));
    assert_eq!(o.subpaths()[1][0], Vector::new(103, 52));
    assert_bounds_exact(&o);
}

#[test]
fn translate_with_fractional_target_truncates() {
    let mut o = square();
    o.translate(2.75, -1.5);
    assert_eq!(o.min(), Vector::new(2, -1));
    assert_bounds_exact(&o);
}

#[test]
fn scale_uniform_and_non_uniform() {
    let mut o = square();
    o.scale(1.5);
    assert_eq!(o.dim(), Dim { w: 15, h: 15 });
    assert_bounds_exact(&o);

    let mut o = square();
    o.scale_xy(2.0, 0.25);
    assert_eq!(o.max(), Vector::new(20, 2));
    assert_bounds_exact(&o);
}

#[test]
fn bounds_exact_for_negative_only_geometry() {
    let mut o = Outline::new([pts(&[(-10.0, -20.0), (-2.0, -4.0)])]);
    o.scale(3.0);
    assert_eq!(o.min(), Vector::new(-30, -60));
    assert_eq!(o.max(), Vector::new(-6, -12));
    assert_bounds_exact(&o);
}

#[test]
fn resize_width_only_preserves_aspect() {
    let mut o = Outline::new([pts(&[(0.0, 0.0), (40.0, 0.0), (40.0, 20.0), (0.0, 20.0)])]);
    let before = o.dim().h as f64 / o.dim().w as f64;
    o.resize(100.0, 0.0).unwrap();
    assert_eq!(o.dim(), Dim { w: 100, h: 50 });
    let after = o.dim().h as f64 / o.dim().w as f64;
    assert!((before - after).abs() < 0.02);
    assert_bounds_exact(&o);
}

#[test]
fn resize_height_only_copies_ratio() {
    let mut o = Outline::new([pts(&[(0.0, 0.0), (30.0, 0.0), (30.0, 10.0)])]);
    o.resize(0.0, 25.0).unwrap();
    assert_eq!(o.dim(), Dim { w: 75, h: 25 });
}

#[test]
fn resize_both_axes_is_independent() {
    let mut o = square();
    o.resize(30.0, 5.0).unwrap();
    assert_eq!(o.dim(), Dim { w: 30, h: 5 });
}

#[test]
fn resize_requires_a_target() {
    let mut o = square();
    let err = o.resize(0.0, 0.0).unwrap_err();
    assert!(matches!(err, TrailsError::InvalidResize(_)));
    assert!(matches!(
        o.resize(f64::NAN, -3.0),
        Err(TrailsError::InvalidResize(_))
    ));
    assert_eq!(o, square());
}

#[test]
fn resize_of_flat_geometry_uses_usable_axis() {
    let mut o = Outline::new([pts(&[(0.0, 5.0), (10.0, 5.0)])]);
    o.resize(20.0, 40.0).unwrap();
    assert_eq!(o.subpaths()[0], vec![Vector::new(0, 10), Vector::new(20, 10)]);

    let mut o = Outline::new([pts(&[(3.0, 3.0), (3.0, 3.0)])]);
    assert!(matches!(
        o.resize(20.0, 0.0),
        Err(TrailsError::InvalidResize(_))
    ));
}

#[test]
fn transforms_are_deterministic() {
    let run = || {
        let mut o = Outline::new([
            pts(&[(0.3, 1.7), (13.9, 2.2), (7.4, 19.6)]),
            pts(&[(4.4, 4.4), (6.6, 8.8)]),
        ]);
        o.scale(1.37);
        o.resize(123.0, 0.0).unwrap();
        o.translate(17.5, 9.25);
        o
    };
    assert_eq!(run(), run());
    assert_bounds_exact(&run());
}

#[test]
fn point_count_never_changes() {
    let mut o = square();
    let n = o.point_count();
    o.scale(0.1);
    o.translate(3.0, 3.0);
    assert_eq!(o.point_count(), n);
}

#[test]
fn huge_scale_saturates_instead_of_overflowing() {
    let mut o = Outline::new([pts(&[(-10.0, -10.0), (10.0, -10.0), (10.0, 10.0)])]);
    o.scale(1e300);
    assert_eq!(o.min(), Vector::new(i64::MIN, i64::MIN));
    assert_eq!(o.max(), Vector::new(i64::MAX, i64::MAX));
    assert_eq!(o.dim().w, i64::MAX);
    assert_eq!(o.dim().h, i64::MAX);

    o.resize(80.0, 0.0).unwrap();
    let dim = o.dim();
    assert_eq!(dim.w, 160);
    assert_bounds_exact(&o);
}
