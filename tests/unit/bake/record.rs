use super::*;
use crate::foundation::core::NORMAL_MAP_COLOR;

fn record_with_dot(with_normal: bool) -> FrameRecord {
    let mut color = Bitmap::filled(16, 12, CLEAR_COLOR);
    color.set_pixel(5, 4, [200, 10, 10, 255]);
    color.set_pixel(7, 6, [10, 200, 10, 255]);
    let normal = with_normal.then(|| {
        let mut n = Bitmap::filled(16, 12, NORMAL_MAP_COLOR);
        n.set_pixel(5, 4, [1, 2, 3, 255]);
        n
    });
    FrameRecord::new("000_0000", 0, IntegerPoint::new(6, 8), color, normal)
}

#[test]
fn trim_moves_pivot_into_local_space() {
    let mut r = record_with_dot(false);
    r.trim(IntegerRect::from_corners(5, 4, 7, 6), 2).unwrap();
    assert_eq!((r.color.width(), r.color.height()), (7, 7));
    assert_eq!(r.pivot, IntegerPoint::new(3, 6));
    assert_eq!(r.origin, IntegerPoint::new(3, 2));
    assert_eq!(r.screen_pivot(), IntegerPoint::new(6, 8));
    assert_eq!(r.color.pixel(2, 2), Some([200, 10, 10, 255]));
    assert_eq!(r.color.pixel(4, 4), Some([10, 200, 10, 255]));
}

#[test]
fn second_trim_with_same_rect_is_a_no_op() {
    let rect = IntegerRect::from_corners(4, 3, 9, 8);
    let mut once = record_with_dot(true);
    once.trim(rect, 3).unwrap();
    let mut twice = once.clone();
    twice.trim(rect, 3).unwrap();
    assert_eq!(twice, once);
}

#[test]
fn normal_map_stays_aligned_with_color() {
    let mut r = record_with_dot(true);
    r.trim(IntegerRect::from_corners(5, 4, 7, 6), 1).unwrap();
    let n = r.normal.as_ref().unwrap();
    assert_eq!((n.width(), n.height()), (r.color.width(), r.color.height()));
    assert_eq!(n.pixel(1, 1), Some([1, 2, 3, 255]));
    assert_eq!(n.pixel(0, 0), Some(NORMAL_MAP_COLOR));
}

#[test]
fn wider_rect_after_tight_trim_recovers_source_pixels() {
    let mut r = record_with_dot(false);
    r.trim(IntegerRect::from_corners(5, 4, 7, 6), 0).unwrap();
    r.trim(IntegerRect::from_corners(4, 3, 8, 7), 0).unwrap();
    assert_eq!((r.color.width(), r.color.height()), (5, 5));
    assert_eq!(r.color.pixel(1, 1), Some([200, 10, 10, 255]));
    assert_eq!(r.color.pixel(0, 0), Some(CLEAR_COLOR));
    assert_eq!(r.screen_pivot(), IntegerPoint::new(6, 8));
}
