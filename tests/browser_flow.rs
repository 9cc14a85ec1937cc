use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use egui::{pos2, Rect};
use product_gallery::browser::{CatalogStatus, ProductBrowser};
use product_gallery::gallery::GalleryView;
use product_gallery::http::{HttpClient, RequestEvent, RequestId, RequestState, Response};
use product_gallery::loader::SequentialImageLoader;
use product_gallery::surface::{EventStatus, InputHandler, PointerEvent};

const CATALOG_URL: &str = "https://shop.test/products";

const CATALOG: &str = r#"{"products": [
    {"title": "Lamp", "price": 19.5, "brand": "Glow", "category": "home", "rating": 4.5,
     "description": "A lamp.", "images": ["lamp/1.png", "lamp/2.png", "lamp/3.png"]},
    {"title": "Chair", "price": 45, "category": "furniture", "rating": 3.9,
     "description": "A chair.", "images": ["chair/1.png"]}
]}"#;

#[derive(Default)]
struct ScriptedClient {
    next_id: u64,
    started: Vec<(RequestId, String)>,
    cancelled: Vec<RequestId>,
}

impl ScriptedClient {
    fn id_for(&self, url: &str) -> RequestId {
        self.started
            .iter()
            .rev()
            .find(|(_, u)| u == url)
            .map(|(id, _)| *id)
            .unwrap_or_else(|| panic!("{url} was never requested"))
    }

    fn urls(&self) -> Vec<&str> {
        self.started.iter().map(|(_, u)| u.as_str()).collect()
    }
}

impl HttpClient for ScriptedClient {
    fn start(&mut self, url: &str) -> RequestId {
        self.next_id += 1;
        let id = RequestId::new(self.next_id);
        self.started.push((id, url.to_string()));
        id
    }

    fn cancel(&mut self, id: RequestId) {
        self.cancelled.push(id);
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 120, 200, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn completed(id: RequestId, url: &str, body: Vec<u8>) -> RequestEvent {
    RequestEvent {
        id,
        state: RequestState::Completed,
        response: Some(Response {
            status: 200,
            url: url.to_string(),
            body: body.into(),
        }),
    }
}

fn finish(browser: &mut ProductBrowser<ScriptedClient>, url: &str, body: Vec<u8>) {
    let id = browser.client().id_for(url);
    browser.handle_event(&completed(id, url, body));
}

fn loaded_browser() -> ProductBrowser<ScriptedClient> {
    let mut browser = ProductBrowser::new(
        ScriptedClient::default(),
        GalleryView::new().with_transition(Duration::from_millis(100)),
        SequentialImageLoader::default(),
        CATALOG_URL,
    );
    browser.download_catalog();
    finish(&mut browser, CATALOG_URL, CATALOG.as_bytes().to_vec());
    browser
}

#[test]
fn images_arrive_in_catalog_order() {
    let mut browser = loaded_browser();
    assert_eq!(browser.catalog_status(), &CatalogStatus::Loaded);
    assert_eq!(browser.client().urls(), vec![CATALOG_URL, "lamp/1.png"]);

    finish(&mut browser, "lamp/1.png", png(4, 2));
    finish(&mut browser, "lamp/2.png", png(2, 4));
    finish(&mut browser, "lamp/3.png", png(3, 3));

    let sizes: Vec<(u32, u32)> = browser
        .gallery()
        .images()
        .iter()
        .map(|img| (img.width, img.height))
        .collect();
    assert_eq!(sizes, vec![(4, 2), (2, 4), (3, 3)]);
    assert!(browser.loader().is_idle());
}

#[test]
fn broken_image_is_skipped() {
    let mut browser = loaded_browser();
    finish(&mut browser, "lamp/1.png", b"not an image".to_vec());
    let id = browser.client().id_for("lamp/2.png");
    browser.handle_event(&RequestEvent {
        id,
        state: RequestState::Failed,
        response: None,
    });
    finish(&mut browser, "lamp/3.png", png(3, 3));

    assert_eq!(browser.gallery().images().len(), 1);
    assert!(browser.loader().is_idle());
}

#[test]
fn late_result_of_superseded_product_is_ignored() {
    let mut browser = loaded_browser();
    let lamp = browser.client().id_for("lamp/1.png");

    assert!(browser.next_product());
    assert_eq!(browser.client().cancelled, vec![lamp]);

    // The server answers before the cancellation lands
    browser.handle_event(&completed(lamp, "lamp/1.png", png(4, 4)));
    assert!(browser.gallery().images().is_empty());
    assert_eq!(browser.loader().active_url(), Some("chair/1.png"));

    // The cancellation itself arrives afterwards and changes nothing
    browser.handle_event(&RequestEvent::cancelled(lamp));
    assert_eq!(browser.loader().active_url(), Some("chair/1.png"));
    assert_eq!(browser.client().cancelled.len(), 1);

    finish(&mut browser, "chair/1.png", png(5, 5));
    assert_eq!(browser.gallery().images().len(), 1);
    assert_eq!(browser.gallery().images()[0].width, 5);
}

#[test]
fn clicking_the_right_strip_animates_to_the_next_image() {
    let mut browser = loaded_browser();
    finish(&mut browser, "lamp/1.png", png(4, 4));
    finish(&mut browser, "lamp/2.png", png(4, 4));

    let gallery = browser.gallery_mut();
    gallery.set_bounds(Rect::from_min_max(pos2(0.0, 0.0), pos2(300.0, 200.0)));

    let t0 = Instant::now();
    let edge = pos2(295.0, 100.0);
    gallery.on_pointer_move(PointerEvent::new(edge, t0));
    assert!(gallery.is_right_hovered());
    assert_eq!(
        gallery.on_pointer_down(PointerEvent::new(edge, t0)),
        EventStatus::Consumed
    );
    assert!(gallery.is_animating());
    assert_eq!(gallery.selected_index(), 0);

    gallery.tick(t0 + Duration::from_millis(50));
    assert!(gallery.animation_offset() > 0.0);

    gallery.tick(t0 + Duration::from_millis(150));
    assert!(!gallery.is_animating());
    assert_eq!(gallery.selected_index(), 1);
    assert_eq!(gallery.animation_offset(), 0.0);
}

#[test]
fn shutdown_waits_for_the_cancellation() {
    let mut browser = loaded_browser();
    let done = Rc::new(Cell::new(false));
    let flag = done.clone();

    browser.shutdown(move || flag.set(true));
    assert!(!done.get());

    let id = browser.client().id_for("lamp/1.png");
    browser.handle_event(&RequestEvent::cancelled(id));
    assert!(done.get());
    assert!(browser.loader().is_idle());
    assert_eq!(browser.loader().pending_len(), 0);
}
