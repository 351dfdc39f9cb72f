use super::*;
use crate::assets::resolver::MemoryResolver;

#[test]
fn slot_names_follow_logical_keys() {
    assert_eq!(AssetSlot::FrontFrame.to_string(), "frontFrame");
    assert_eq!(AssetSlot::BackFrame.to_string(), "backFrame");
    assert_eq!(AssetSlot::Content(3).to_string(), "content_3");
}

#[test]
fn join_keeps_successes_and_drops_failures() {
    let r = MemoryResolver::new()
        .with_image("/t/front.png", 900, 700)
        .with_image("/m/photo.jpg", 400, 300)
        .with_image("/m/empty.jpg", 0, 300);

    let loaded = load_assets(
        &r,
        vec![
            (AssetSlot::FrontFrame, "/t/front.png".to_string()),
            (AssetSlot::BackFrame, "/t/back.png".to_string()),
            (AssetSlot::Content(2), "/m/empty.jpg".to_string()),
            (AssetSlot::Content(4), "/m/photo.jpg".to_string()),
        ],
    );

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.get(AssetSlot::FrontFrame).unwrap().width, 900);
    assert!(loaded.get(AssetSlot::BackFrame).is_none());
    assert_eq!(loaded.first_content().unwrap().url, "/m/photo.jpg");
    assert_eq!(r.requests().len(), 4);
}

#[test]
fn first_content_prefers_lowest_index() {
    let mut assets = LoadedAssets::new();
    let mk = |w: u32| LoadedAsset {
        width: w,
        height: 10,
        url: format!("/{w}.png"),
    };
    assets.insert(AssetSlot::Content(5), mk(50));
    assets.insert(AssetSlot::Content(1), mk(10));
    assets.insert(AssetSlot::BackFrame, mk(99));
    assert_eq!(assets.first_content().unwrap().width, 10);
}

#[test]
fn serializes_with_logical_keys() {
    let mut assets = LoadedAssets::new();
    assets.insert(
        AssetSlot::Content(0),
        LoadedAsset {
            width: 1,
            height: 2,
            url: "/a.png".to_string(),
        },
    );
    let json = serde_json::to_value(&assets).unwrap();
    assert_eq!(json["content_0"]["height"], 2);
}
