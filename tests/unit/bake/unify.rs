use super::*;
use crate::{
    bitmap::{Bitmap, geometry::compute_tight_bound},
    foundation::core::{CLEAR_COLOR, IntegerPoint},
};

fn frame(view: usize, dots: &[(i32, i32)]) -> FrameRecord {
    let mut b = Bitmap::filled(32, 32, CLEAR_COLOR);
    for &(x, y) in dots {
        b.set_pixel(x, y, [255, 255, 255, 255]);
    }
    FrameRecord::new(format!("{view}"), view, IntegerPoint::new(16, 30), b, None)
}

fn accumulate(records: &[FrameRecord], scope: UnifyScope, views: usize) -> UnifiedBounds {
    let mut bounds = UnifiedBounds::new(scope, views).unwrap();
    for r in records {
        bounds.include(r.view_index, compute_tight_bound(&r.color).unwrap());
    }
    bounds
}

#[test]
fn off_scope_has_no_accumulator() {
    assert_eq!(UnifiedBounds::new(UnifyScope::Off, 3), None);
}

#[test]
fn per_view_frames_share_size_within_a_view() {
    let mut records = vec![
        frame(0, &[(2, 2), (4, 5)]),
        frame(0, &[(10, 10)]),
        frame(1, &[(20, 20), (21, 21)]),
    ];
    let bounds = accumulate(&records, UnifyScope::PerView, 2);
    assert_eq!(bounds.bound_for(0), IntegerRect::from_corners(2, 2, 10, 10));
    assert_eq!(bounds.bound_for(1), IntegerRect::from_corners(20, 20, 21, 21));

    unify_records(&mut records, &bounds, 1).unwrap();
    let size = |r: &FrameRecord| (r.color.width(), r.color.height());
    assert_eq!(size(&records[0]), (11, 11));
    assert_eq!(size(&records[1]), (11, 11));
    assert_eq!(size(&records[2]), (4, 4));
    assert_eq!(records[0].pivot, IntegerPoint::new(16 - 2 + 1, 30 - 2 + 1));
}

#[test]
fn all_views_scope_gives_one_size() {
    let mut records = vec![frame(0, &[(3, 3)]), frame(1, &[(8, 12)]), frame(2, &[(5, 1)])];
    let bounds = accumulate(&records, UnifyScope::AllViews, 3);
    unify_records(&mut records, &bounds, 2).unwrap();
    for r in &records {
        assert_eq!((r.color.width(), r.color.height()), (10, 16));
    }
}

#[test]
fn unification_is_idempotent() {
    let mut records = vec![frame(0, &[(2, 9), (7, 3)]), frame(0, &[(30, 31)])];
    let bounds = accumulate(&records, UnifyScope::PerView, 1);
    unify_records(&mut records, &bounds, 3).unwrap();
    let first = records.clone();
    unify_records(&mut records, &bounds, 3).unwrap();
    assert_eq!(records, first);
}

#[test]
fn union_order_does_not_matter() {
    let rects = [
        IntegerRect::from_corners(0, 5, 3, 9),
        IntegerRect::from_corners(-2, 7, 1, 8),
        IntegerRect::from_corners(4, -1, 6, 2),
    ];
    let mut forward = UnifiedBounds::new(UnifyScope::AllViews, 1).unwrap();
    let mut backward = forward.clone();
    for r in rects {
        forward.include(0, r);
    }
    for r in rects.iter().rev() {
        backward.include(0, *r);
    }
    assert_eq!(forward, backward);
    assert_eq!(forward.bound_for(0), IntegerRect::from_corners(-2, -1, 6, 9));
}
