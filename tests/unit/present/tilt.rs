use super::*;

#[test]
fn offset_is_signed_fraction_of_half_extent() {
    let vp = Rect::new(100.0, 100.0, 300.0, 200.0);
    assert_eq!(pointer_offset(vp, Point::new(200.0, 150.0)), Some(Vec2::new(0.0, 0.0)));
    assert_eq!(pointer_offset(vp, Point::new(300.0, 100.0)), Some(Vec2::new(1.0, -1.0)));
    assert_eq!(pointer_offset(vp, Point::new(100.0, 175.0)), Some(Vec2::new(-1.0, 0.5)));
    // Outside the viewport the offset is not clamped.
    assert_eq!(pointer_offset(vp, Point::new(400.0, 150.0)), Some(Vec2::new(2.0, 0.0)));
}

#[test]
fn empty_viewport_has_no_offset() {
    assert_eq!(pointer_offset(Rect::ZERO, Point::new(1.0, 1.0)), None);
}

#[test]
fn tilt_leans_toward_pointer() {
    let t = tilt_for_offset(Vec2::new(1.0, -0.5), 10.0);
    assert_eq!(t.rotate_y, 10.0);
    assert_eq!(t.rotate_x, 5.0);
    assert_eq!(
        t.css(),
        "perspective(1000px) rotateX(5.00deg) rotateY(10.00deg)"
    );
    assert_eq!(Tilt::NEUTRAL.css(), "none");
}
