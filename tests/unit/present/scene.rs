use super::*;
use crate::{
    assets::store::LoadedAssets,
    config::{descriptor::RawThemeDescriptor, normalize::normalize},
    layout::{dimensions::resolve_dimensions, engine::compute_layout},
};

fn layout_for(json: serde_json::Value) -> CardLayout {
    let cfg = normalize(&RawThemeDescriptor::from_value(&json), "/t/");
    let assets = LoadedAssets::new();
    let dims = resolve_dimensions(&cfg, &assets);
    compute_layout(&cfg, &dims, &assets, Rect::new(0.0, 0.0, 400.0, 300.0))
}

fn markup(s: &str) -> SlotContent {
    SlotContent::Markup {
        html: s.to_string(),
    }
}

#[test]
fn rebuild_reuses_handles_and_refreshes_content() {
    let layout = layout_for(serde_json::json!({}));
    let mut table = SlotTable::default();

    table.rebuild(&layout, BTreeMap::from([(AreaId(1), markup("one"))]), 1);
    table.rebuild(&layout, BTreeMap::from([(AreaId(1), markup("two"))]), 2);

    assert_eq!(table.element_ids(), vec!["area-0", "area-1"]);
    let back = table.get(AreaId(1)).unwrap();
    assert_eq!(back.content, markup("two"));
    assert_eq!(back.created_revision, 1);
    assert_eq!(back.filled_revision, 2);
    assert_eq!(table.get(AreaId(0)).unwrap().content, SlotContent::Empty);
}

#[test]
fn rebuild_drops_areas_no_longer_configured() {
    let mut table = SlotTable::default();
    table.rebuild(
        &layout_for(serde_json::json!({
            "contentArea": [ {}, { "area": 1 }, { "area": 5, "side": "back" } ]
        })),
        BTreeMap::new(),
        1,
    );
    assert_eq!(table.len(), 3);

    table.rebuild(&layout_for(serde_json::json!({})), BTreeMap::new(), 2);
    assert_eq!(table.element_ids(), vec!["area-0", "area-1"]);
}

#[test]
fn slot_inline_style_merges_geometry_fit_and_authored() {
    let layout = layout_for(serde_json::json!({
        "contentArea": [ { "fit": "stretch", "style": { "borderRadius": "4px" } }, { "area": 1 } ]
    }));
    let mut table = SlotTable::default();
    table.rebuild(
        &layout,
        BTreeMap::from([(
            AreaId(0),
            SlotContent::Image {
                src: "/a.png".to_string(),
                alt: None,
                natural: None,
            },
        )]),
        1,
    );
    let style = table.get(AreaId(0)).unwrap().inline_style();
    assert_eq!(style["width"], "400px");
    assert_eq!(style["height"], "300px");
    assert_eq!(style["object-fit"], "fill");
    assert_eq!(style["object-position"], "center");
    assert_eq!(style["border-radius"], "4px");

    let text_style = table.get(AreaId(1)).unwrap().inline_style();
    assert!(!text_style.contains_key("object-fit"));
}

#[test]
fn mount_paints_faces_and_clear_keeps_handles() {
    let layout = layout_for(serde_json::json!({ "back": { "background": "#123" } }));
    let mut scene = CardScene::new("card".to_string());
    scene.mount(&layout, BTreeMap::from([(AreaId(1), markup("x"))]), 1);

    assert_eq!(scene.back.inline_style["background"], "#123");
    assert_eq!(scene.face(Side::Front).inline_style["width"], "400px");

    scene.clear_content();
    assert!(scene.front.inline_style.is_empty() && scene.back.paint.is_none());
    assert_eq!(scene.slots.len(), 2);
    assert!(scene.slots.iter().all(|s| s.content == SlotContent::Empty));

    scene.unmount();
    assert!(scene.slots.is_empty());
    assert_eq!(scene.data_attributes()["data-visible"], "false");
}
