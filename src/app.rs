//! eframe shell: owns the browser, pumps HTTP results and paints the product page.

use std::collections::HashMap;
use std::time::Instant;

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke};
use tracing::{debug, info};

use product_gallery::browser::{CatalogStatus, ProductBrowser};
use product_gallery::config::{Action, Config, InputBinding};
use product_gallery::gallery::GalleryView;
use product_gallery::http::ReqwestClient;
use product_gallery::image_loader::{DecodedImage, ImageId, RasterDecoder};
use product_gallery::loader::SequentialImageLoader;
use product_gallery::surface::{Canvas, Drawable, InputHandler, Key, KeyEvent, PointerEvent};

/// Share of the window height given to the gallery
const GALLERY_HEIGHT_RATIO: f32 = 2.0 / 3.0;

/// Uploaded textures keyed by the image they came from
#[derive(Default)]
struct TextureCache {
    textures: HashMap<ImageId, egui::TextureHandle>,
}

impl TextureCache {
    fn get_or_upload(&mut self, ctx: &egui::Context, image: &DecodedImage) -> egui::TextureId {
        self.textures
            .entry(image.id())
            .or_insert_with(|| {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [image.width as usize, image.height as usize],
                    &image.pixels,
                );
                ctx.load_texture(
                    format!("gallery-{:?}", image.id()),
                    color_image,
                    egui::TextureOptions::LINEAR,
                )
            })
            .id()
    }

    /// Free textures for images the gallery no longer holds
    fn retain(&mut self, images: &[DecodedImage]) {
        self.textures
            .retain(|id, _| images.iter().any(|img| img.id() == *id));
    }
}

/// [`Canvas`] over an egui painter
struct EguiCanvas<'a> {
    painter: &'a egui::Painter,
    textures: &'a mut TextureCache,
}

impl Canvas for EguiCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(rect, 0.0, color);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter.circle_filled(center, radius, color);
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.painter
            .line_segment([from, to], Stroke::new(width, color));
    }

    fn draw_image(&mut self, image: &DecodedImage, rect: Rect, clip: Rect) {
        let texture = self.textures.get_or_upload(self.painter.ctx(), image);
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        self.painter
            .with_clip_rect(clip)
            .image(texture, rect, uv, Color32::WHITE);
    }
}

pub struct ProductBrowserApp {
    browser: ProductBrowser<ReqwestClient>,
    config: Config,
    textures: TextureCache,
    last_pointer: Option<Pos2>,
}

impl ProductBrowserApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, mut client: ReqwestClient) -> Self {
        let ctx = cc.egui_ctx.clone();
        client.set_waker(move || ctx.request_repaint());

        let mut gallery = GalleryView::new()
            .with_transition(config.transition_duration())
            .with_nav_strip_width(config.nav_strip_width)
            .with_tick_interval(config.tick_interval());
        gallery.set_scaling_mode(config.scaling_mode);

        let loader =
            SequentialImageLoader::new(Box::new(RasterDecoder::new(config.max_texture_side)));

        let mut browser = ProductBrowser::new(client, gallery, loader, config.catalog_url.clone());
        browser.download_catalog();

        Self {
            browser,
            config,
            textures: TextureCache::default(),
            last_pointer: None,
        }
    }

    fn pump_requests(&mut self) {
        for event in self.browser.client_mut().poll() {
            self.browser.handle_event(&event);
        }
    }

    /// Handle keyboard shortcuts
    fn handle_keys(&mut self, ctx: &egui::Context, now: Instant) {
        let pressed: Vec<InputBinding> = ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => Some(InputBinding::from_key(*key, *modifiers)),
                    _ => None,
                })
                .collect()
        });

        for binding in pressed {
            let Some(action) = self.config.action_for(&binding) else {
                continue;
            };
            debug!("Shortcut {binding:?} -> {action:?}");
            match action {
                Action::NextImage => {
                    self.browser
                        .gallery_mut()
                        .on_key(KeyEvent::new(Key::ArrowRight, now));
                }
                Action::PreviousImage => {
                    self.browser
                        .gallery_mut()
                        .on_key(KeyEvent::new(Key::ArrowLeft, now));
                }
                Action::NextProduct => {
                    self.browser.next_product();
                }
                Action::PreviousProduct => {
                    self.browser.previous_product();
                }
                Action::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
    }

    /// Forward pointer activity over the gallery area
    fn handle_pointer(&mut self, response: &egui::Response, now: Instant) {
        let gallery = self.browser.gallery_mut();
        match response.hover_pos() {
            Some(pos) => {
                if self.last_pointer != Some(pos) {
                    gallery.on_pointer_move(PointerEvent::new(pos, now));
                    self.last_pointer = Some(pos);
                }
                if response.clicked() {
                    gallery.on_pointer_down(PointerEvent::new(pos, now));
                }
            }
            None => {
                if self.last_pointer.take().is_some() {
                    gallery.on_pointer_leave();
                }
            }
        }
    }

    fn draw_gallery(&mut self, ui: &mut egui::Ui, now: Instant) {
        let width = ui.available_width();
        let height = (ui.ctx().screen_rect().height() * GALLERY_HEIGHT_RATIO).max(120.0);
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());

        self.browser.gallery_mut().set_bounds(rect);
        self.handle_pointer(&response, now);

        let painter = ui.painter_at(rect);
        let mut canvas = EguiCanvas {
            painter: &painter,
            textures: &mut self.textures,
        };
        self.browser.gallery().render(&mut canvas, rect);
        self.textures.retain(self.browser.gallery().images());
    }

    fn draw_details(&mut self, ui: &mut egui::Ui) {
        match self.browser.catalog_status().clone() {
            CatalogStatus::NotRequested => {}
            CatalogStatus::Loading(_) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading products...");
                });
                return;
            }
            CatalogStatus::Failed(reason) => {
                let error_color = ui.visuals().error_fg_color;
                ui.colored_label(error_color, "Failed to download products");
                ui.label(reason);
                if ui.button("Retry").clicked() {
                    self.browser.download_catalog();
                }
                return;
            }
            CatalogStatus::Loaded => {}
        }

        if let Some(product) = self.browser.selected_product() {
            ui.heading(&product.title);
            ui.add_space(4.0);

            egui::Grid::new("product_fields")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Price:");
                    ui.label(product.price_label());
                    ui.end_row();

                    ui.strong("Brand:");
                    ui.label(product.brand_label());
                    ui.end_row();

                    ui.strong("Category:");
                    ui.label(product.category_label());
                    ui.end_row();

                    ui.strong("Rating:");
                    ui.label(product.rating_label());
                    ui.end_row();
                });

            ui.add_space(8.0);
            let buttons_height = ui.spacing().interact_size.y + 8.0;
            egui::ScrollArea::vertical()
                .max_height((ui.available_height() - buttons_height).max(0.0))
                .show(ui, |ui| {
                    ui.add(egui::Label::new(&product.description).wrap());
                });
        }

        let selected = self.browser.selected_index();
        let count = self.browser.catalog().len();
        let has_previous = matches!(selected, Some(i) if i > 0);
        let has_next = matches!(selected, Some(i) if i + 1 < count);

        ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(has_previous, egui::Button::new("< Prev"))
                    .clicked()
                {
                    self.browser.previous_product();
                }
                if ui
                    .add_enabled(has_next, egui::Button::new("Next >"))
                    .clicked()
                {
                    self.browser.next_product();
                }
            });
        });
    }

    fn panel_frame(&self, ctx: &egui::Context) -> egui::Frame {
        let frame = egui::Frame::central_panel(&ctx.style());
        match self.config.background_rgb {
            Some([r, g, b]) => frame.fill(Color32::from_rgb(r, g, b)),
            None => frame,
        }
    }
}

impl eframe::App for ProductBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump_requests();

        let now = Instant::now();
        self.handle_keys(ctx, now);
        self.browser.gallery_mut().tick(now);

        egui::CentralPanel::default()
            .frame(self.panel_frame(ctx))
            .show(ctx, |ui| {
                self.draw_gallery(ui, now);
                ui.add_space(8.0);
                self.draw_details(ui);
            });

        let gallery = self.browser.gallery_mut();
        if gallery.is_animating() {
            ctx.request_repaint_after(gallery.tick_interval());
        }
        if gallery.take_redraw_request() {
            ctx.request_repaint();
        }
    }
}

impl Drop for ProductBrowserApp {
    fn drop(&mut self) {
        self.browser.shutdown(|| info!("Image loading stopped"));
        // Cancellations are queued synchronously, one pass delivers them
        self.pump_requests();
    }
}
