use super::*;
use crate::{
    assets::store::LoadedAsset,
    config::{descriptor::RawThemeDescriptor, normalize::normalize},
    layout::dimensions::resolve_dimensions,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn assert_rect(r: Rect, x0: f64, y0: f64, w: f64, h: f64) {
    assert!(
        close(r.x0, x0) && close(r.y0, y0) && close(r.width(), w) && close(r.height(), h),
        "got {r:?}, want ({x0}, {y0}) {w}x{h}"
    );
}

fn setup(json: serde_json::Value, assets: &LoadedAssets) -> (NormalizedConfig, ResolvedDimensions) {
    let cfg = normalize(&RawThemeDescriptor::from_value(&json), "/t/");
    let dims = resolve_dimensions(&cfg, assets);
    (cfg, dims)
}

#[test]
fn card_is_contained_and_centered() {
    let assets = LoadedAssets::new();
    let (cfg, dims) = setup(serde_json::json!({}), &assets);
    let layout = compute_layout(&cfg, &dims, &assets, Rect::new(0.0, 0.0, 1000.0, 300.0));
    assert!(close(layout.scale, 0.5));
    assert_rect(layout.card, 300.0, 0.0, 400.0, 300.0);
    assert_rect(layout.faces.front.rect, 0.0, 0.0, 400.0, 300.0);
}

#[test]
fn slots_scale_with_their_own_face() {
    let assets = LoadedAssets::new();
    let (cfg, dims) = setup(
        serde_json::json!({
            "front": { "width": 800, "height": 600 },
            "back": { "width": 600, "height": 600 }
        }),
        &assets,
    );
    let layout = compute_layout(&cfg, &dims, &assets, Rect::new(0.0, 0.0, 400.0, 300.0));

    let back = &layout.faces.back;
    assert!(close(back.scale, 0.5));
    assert_rect(back.rect, 50.0, 0.0, 300.0, 300.0);

    let a0 = &layout.areas[&AreaId(0)];
    assert_rect(a0.rect, 0.0, 0.0, 400.0, 300.0);
    let a1 = &layout.areas[&AreaId(1)];
    assert_eq!(a1.side, Side::Back);
    assert_rect(a1.rect, 30.0, 30.0, 240.0, 240.0);
}

#[test]
fn pixel_and_percent_areas() {
    let assets = LoadedAssets::new();
    let (cfg, dims) = setup(
        serde_json::json!({
            "front": { "width": 1000, "height": 500 },
            "contentArea": [
                { "x": "10px", "y": "20%", "width": 560, "height": "50%" },
                { "area": 1 }
            ]
        }),
        &assets,
    );
    let layout = compute_layout(&cfg, &dims, &assets, Rect::new(0.0, 0.0, 500.0, 250.0));
    assert_rect(layout.areas[&AreaId(0)].rect, 5.0, 50.0, 280.0, 125.0);
}

#[test]
fn frame_paint_requires_a_loaded_frame() {
    let mut assets = LoadedAssets::new();
    assets.insert(
        AssetSlot::FrontFrame,
        LoadedAsset {
            width: 800,
            height: 600,
            url: "/t/front.png".to_string(),
        },
    );
    let (cfg, dims) = setup(
        serde_json::json!({
            "front": { "image": "front.png" },
            "back": { "image": "back.png", "background": "linear-gradient(#000, #fff)" }
        }),
        &assets,
    );
    let layout = compute_layout(&cfg, &dims, &assets, Rect::new(0.0, 0.0, 800.0, 600.0));
    assert_eq!(
        layout.faces.front.paint,
        FacePaint::Frame {
            url: "/t/front.png".to_string()
        }
    );
    assert_eq!(
        layout.faces.back.paint,
        FacePaint::Background {
            value: "linear-gradient(#000, #fff)".to_string()
        }
    );
}

#[test]
fn containment_is_tight_for_many_shapes() {
    let assets = LoadedAssets::new();
    for (cw, ch) in [(800.0, 600.0), (600.0, 800.0), (1.0, 1000.0), (333.0, 333.0)] {
        let (cfg, dims) = setup(
            serde_json::json!({ "front": { "width": cw, "height": ch } }),
            &assets,
        );
        for (vw, vh) in [(1920.0, 1080.0), (320.0, 640.0), (50.5, 49.25), (1.0, 1.0)] {
            let vp = Rect::new(10.0, 20.0, 10.0 + vw, 20.0 + vh);
            let l = compute_layout(&cfg, &dims, &assets, vp);
            assert!(l.card.x0 >= vp.x0 - 1e-9 && l.card.x1 <= vp.x1 + 1e-9);
            assert!(l.card.y0 >= vp.y0 - 1e-9 && l.card.y1 <= vp.y1 + 1e-9);
            assert!(
                close(l.card.width(), vw) || close(l.card.height(), vh),
                "no binding axis for card {cw}x{ch} in {vw}x{vh}"
            );
            let aspect = l.card.width() / l.card.height();
            assert!((aspect - cw / ch).abs() / (cw / ch) < 1e-9);
        }
    }
}

#[test]
fn degenerate_viewport_yields_empty_rects() {
    let assets = LoadedAssets::new();
    let (cfg, dims) = setup(serde_json::json!({}), &assets);
    let l = compute_layout(&cfg, &dims, &assets, Rect::new(0.0, 0.0, 0.0, 0.0));
    assert_eq!(l.scale, 0.0);
    assert_eq!(l.card.area(), 0.0);
    assert!(l.areas.values().all(|a| a.rect.area() == 0.0));
}

#[test]
fn style_names_become_kebab_case() {
    let assets = LoadedAssets::new();
    let (cfg, dims) = setup(
        serde_json::json!({
            "contentArea": [
                { "style": { "fontSize": "14px", "text-align": "left", "WebkitMaskImage": "none" } },
                { "area": 1 }
            ]
        }),
        &assets,
    );
    let l = compute_layout(&cfg, &dims, &assets, Rect::new(0.0, 0.0, 800.0, 600.0));
    let style = &l.areas[&AreaId(0)].style;
    assert_eq!(style.get("font-size").map(String::as_str), Some("14px"));
    assert_eq!(style.get("text-align").map(String::as_str), Some("left"));
    assert_eq!(style.get("-webkit-mask-image").map(String::as_str), Some("none"));
}

#[test]
fn css_property_name_cases() {
    assert_eq!(css_property_name("backgroundColor"), "background-color");
    assert_eq!(css_property_name("msTransform"), "-ms-transform");
    assert_eq!(css_property_name("--accent"), "--accent");
    assert_eq!(css_property_name("color"), "color");
}
