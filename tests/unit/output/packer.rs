use super::*;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("f{i}")).collect()
}

fn solid(w: u32, h: u32, v: u8) -> Bitmap {
    Bitmap::filled(w, h, [v, v, v, 255])
}

#[test]
fn cells_keep_request_order_and_never_overlap() {
    let colors = vec![solid(3, 5, 1), solid(6, 2, 2), solid(4, 4, 3), solid(3, 5, 4)];
    let names = names(colors.len());
    let pivots: Vec<IntegerPoint> = (0..4).map(|i| IntegerPoint::new(i, i)).collect();
    let atlas = ShelfPacker::new(1, 64)
        .pack(&PackRequest {
            names: &names,
            pivots: &pivots,
            colors: &colors,
            normals: None,
        })
        .unwrap();

    assert_eq!(atlas.cells.len(), 4);
    for (i, cell) in atlas.cells.iter().enumerate() {
        assert_eq!(cell.name, names[i]);
        assert_eq!(cell.pivot, pivots[i]);
        assert_eq!(
            (cell.rect.width, cell.rect.height),
            (colors[i].width(), colors[i].height())
        );
        let v = i as u8 + 1;
        assert_eq!(
            atlas.color.pixel(cell.rect.x as i32, cell.rect.y as i32),
            Some([v, v, v, 255])
        );
        for other in &atlas.cells[i + 1..] {
            assert!(!cell.rect.overlaps(&other.rect));
        }
    }
    assert!(atlas.color.width().is_power_of_two());
    assert!(atlas.color.height().is_power_of_two());
    assert!(atlas.normal.is_none());
}

#[test]
fn packing_is_deterministic() {
    let colors = vec![solid(5, 3, 1), solid(2, 7, 2), solid(5, 3, 3)];
    let names = names(3);
    let pivots = vec![IntegerPoint::ZERO; 3];
    let req = PackRequest {
        names: &names,
        pivots: &pivots,
        colors: &colors,
        normals: None,
    };
    let a = ShelfPacker::default().pack(&req).unwrap();
    let b = ShelfPacker::default().pack(&req).unwrap();
    assert_eq!(a.cells, b.cells);
    assert_eq!(a.color, b.color);
}

#[test]
fn normal_atlas_shares_layout_and_flat_background() {
    let colors = vec![solid(4, 4, 10), solid(4, 4, 20)];
    let normals = vec![solid(4, 4, 30), solid(4, 4, 40)];
    let names = names(2);
    let pivots = vec![IntegerPoint::ZERO; 2];
    let atlas = ShelfPacker::new(2, 64)
        .pack(&PackRequest {
            names: &names,
            pivots: &pivots,
            colors: &colors,
            normals: Some(&normals),
        })
        .unwrap();
    let normal = atlas.normal.unwrap();
    assert_eq!(
        (normal.width(), normal.height()),
        (atlas.color.width(), atlas.color.height())
    );
    let r = atlas.cells[1].rect;
    assert_eq!(normal.pixel(r.x as i32, r.y as i32), Some([40, 40, 40, 255]));
    assert_eq!(normal.pixel(0, 0), Some(NORMAL_MAP_COLOR));
    assert_eq!(atlas.color.pixel(0, 0), Some(CLEAR_COLOR));
}

#[test]
fn partial_normals_are_rejected() {
    let colors = vec![solid(2, 2, 1), solid(2, 2, 2)];
    let normals = vec![solid(2, 2, 3)];
    let names = names(2);
    let pivots = vec![IntegerPoint::ZERO; 2];
    let err = ShelfPacker::default()
        .pack(&PackRequest {
            names: &names,
            pivots: &pivots,
            colors: &colors,
            normals: Some(&normals),
        })
        .unwrap_err();
    assert!(err.to_string().contains("packing error"));
}

#[test]
fn oversized_frames_fail_instead_of_growing_forever() {
    let colors = vec![solid(40, 40, 1), solid(40, 40, 2)];
    let names = names(2);
    let pivots = vec![IntegerPoint::ZERO; 2];
    let req = PackRequest {
        names: &names,
        pivots: &pivots,
        colors: &colors,
        normals: None,
    };
    assert!(ShelfPacker::new(0, 64).pack(&req).is_err());
    let atlas = ShelfPacker::new(0, 128).pack(&req).unwrap();
    assert_eq!((atlas.color.width(), atlas.color.height()), (128, 64));
}

#[test]
fn empty_request_is_an_error() {
    let req = PackRequest {
        names: &[],
        pivots: &[],
        colors: &[],
        normals: None,
    };
    assert!(ShelfPacker::default().pack(&req).is_err());
}
