use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::{
    assets::resolver::MemoryResolver,
    foundation::core::AreaId,
    present::{content::ContentBody, scene::SlotContent},
};

fn counter() -> (Arc<AtomicUsize>, ViewerHook) {
    let n = Arc::new(AtomicUsize::new(0));
    let hook_n = Arc::clone(&n);
    (
        n,
        Box::new(move || {
            hook_n.fetch_add(1, Ordering::SeqCst);
        }),
    )
}

fn item() -> MediaItem {
    MediaItem {
        filename: "cat.jpg".to_string(),
        title: "Cat".to_string(),
        description: "A cat.".to_string(),
        postscript: Some("1999".to_string()),
        theme: None,
    }
}

fn viewer(opts: ViewerOptions) -> Viewer {
    let resolver = MemoryResolver::new()
        .with_json("/themes/default/config.json", serde_json::json!({}))
        .with_image("/media/cat.jpg", 400, 300);
    Viewer::new(
        opts,
        Arc::new(resolver),
        Arc::new(MarkupCapability::plain_text()),
    )
    .unwrap()
}

#[test]
fn description_markdown_skips_empty_parts() {
    assert_eq!(description_markdown(&item()), "**Cat**\n\nA cat.\n\n_1999_");
    let bare = MediaItem {
        filename: "x".to_string(),
        description: "  ".to_string(),
        ..MediaItem::default()
    };
    assert_eq!(description_markdown(&bare), "");
}

#[test]
fn configure_options_compose_paths() {
    let v = viewer(ViewerOptions {
        media_base: "/media/".to_string(),
        ..ViewerOptions::default()
    });
    let opts = v.configure_options(&MediaItem {
        theme: Some("gold".to_string()),
        ..item()
    });
    assert_eq!(opts.theme_path, "/themes/gold");
    assert_eq!(opts.contents[0].area, AreaId(0));
    assert_eq!(
        opts.contents[0].body,
        ContentBody::Image {
            src: "/media/cat.jpg".to_string(),
            alt: Some("Cat".to_string())
        }
    );
    assert_eq!(v.configure_options(&item()).theme_path, "/themes/default");
}

#[test]
fn open_and_close_fire_hooks_after_transition() {
    let (opened, on_open) = counter();
    let (closed, on_close) = counter();
    let mut v = viewer(ViewerOptions {
        on_open: Some(on_open),
        on_close: Some(on_close),
        ..ViewerOptions::default()
    });

    assert!(v.show(&item(), Millis(0)));
    assert!(v.controller().is_visible());
    v.advance(Millis(299));
    assert_eq!(opened.load(Ordering::SeqCst), 0);
    v.advance(Millis(300));
    assert!(v.is_open());
    assert_eq!(opened.load(Ordering::SeqCst), 1);

    match &v.controller().scene().slots.get(AreaId(0)).unwrap().content {
        SlotContent::Image { natural, .. } => assert!(natural.is_some()),
        other => panic!("unexpected {other:?}"),
    }

    assert!(v.close(Millis(1000)));
    assert!(!v.controller().is_visible());
    v.advance(Millis(1300));
    assert_eq!(v.overlay(), OverlayState::Closed);
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn show_is_ignored_while_transitioning() {
    let mut v = viewer(ViewerOptions::default());
    assert!(v.show(&item(), Millis(0)));
    assert!(!v.show(&item(), Millis(100)));
    v.advance(Millis(300));
    assert!(v.close(Millis(400)));
    assert!(!v.show(&item(), Millis(500)));
    assert!(!v.close(Millis(500)));
}

#[test]
fn reopening_starts_front_facing() {
    let mut v = viewer(ViewerOptions::default());
    v.show(&item(), Millis(0));
    v.advance(Millis(300));
    assert!(v.controller_mut().flip(Millis(300)));
    v.advance(Millis(900));
    assert!(v.controller().is_flipped());

    v.close(Millis(1000));
    v.advance(Millis(1300));
    v.show(&item(), Millis(1400));
    assert!(!v.controller().is_flipped());
}

#[test]
fn destroy_detaches() {
    let (opened, on_open) = counter();
    let mut v = viewer(ViewerOptions {
        on_open: Some(on_open),
        ..ViewerOptions::default()
    });
    v.show(&item(), Millis(0));
    v.destroy();
    v.advance(Millis(1000));
    assert_eq!(opened.load(Ordering::SeqCst), 0);
    assert!(!v.is_attached());
    assert!(v.controller().is_destroyed());
    assert!(!v.show(&item(), Millis(2000)));
}

#[test]
fn new_requires_overlay_and_container() {
    let r: Arc<dyn AssetResolver> = Arc::new(MemoryResolver::new());
    let m = Arc::new(MarkupCapability::plain_text());
    let no_overlay = ViewerOptions {
        overlay_id: String::new(),
        ..ViewerOptions::default()
    };
    assert!(Viewer::new(no_overlay, Arc::clone(&r), Arc::clone(&m)).is_err());
    let no_container = ViewerOptions {
        container_id: String::new(),
        ..ViewerOptions::default()
    };
    assert!(Viewer::new(no_container, r, m).is_err());
}
