use super::*;

#[test]
fn decodes_wire_shape() {
    let opts: ConfigureOptions = serde_json::from_value(serde_json::json!({
        "themePath": "/themes/gold",
        "contents": [
            { "area": 0, "type": "image", "src": "/media/a.jpg", "alt": "A" },
            { "area": 1, "type": "text", "content": "**hi**" }
        ]
    }))
    .unwrap();

    assert_eq!(opts.theme_path, "/themes/gold");
    assert_eq!(
        opts.contents,
        vec![
            ContentItem::image(0, "/media/a.jpg", Some("A".to_string())),
            ContentItem::text(1, "**hi**"),
        ]
    );
}

#[test]
fn unknown_type_is_rejected() {
    let r = serde_json::from_value::<ContentItem>(serde_json::json!({
        "area": 0, "type": "video", "src": "/v.mp4"
    }));
    assert!(r.is_err());
}
