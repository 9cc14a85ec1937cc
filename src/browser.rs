//! Product browser controller.
//!
//! Downloads the catalog, tracks the selected product and feeds that
//! product's image URLs to the [`SequentialImageLoader`]. Request events from
//! the HTTP client are routed here and dispatched to whoever issued them.

use tracing::{debug, error, info};

use crate::catalog::{parse_catalog, Catalog, Product};
use crate::gallery::GalleryView;
use crate::http::{HttpClient, RequestEvent, RequestId, RequestState};
use crate::loader::SequentialImageLoader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    NotRequested,
    Loading(RequestId),
    Loaded,
    /// Download or parse failed; the view stays empty until retried.
    Failed(String),
}

pub struct ProductBrowser<C> {
    client: C,
    gallery: GalleryView,
    loader: SequentialImageLoader,
    catalog: Catalog,
    catalog_url: String,
    catalog_status: CatalogStatus,
    selected: Option<usize>,
}

impl<C: HttpClient> ProductBrowser<C> {
    pub fn new(
        client: C,
        gallery: GalleryView,
        loader: SequentialImageLoader,
        catalog_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            gallery,
            loader,
            catalog: Catalog::default(),
            catalog_url: catalog_url.into(),
            catalog_status: CatalogStatus::NotRequested,
            selected: None,
        }
    }

    pub fn gallery(&self) -> &GalleryView {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut GalleryView {
        &mut self.gallery
    }

    pub fn loader(&self) -> &SequentialImageLoader {
        &self.loader
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog_status
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.and_then(|i| self.catalog.get(i))
    }

    /// Request the catalog. Ignored while a download is already running.
    pub fn download_catalog(&mut self) {
        if matches!(self.catalog_status, CatalogStatus::Loading(_)) {
            debug!("Catalog download already running");
            return;
        }
        let id = self.client.start(&self.catalog_url);
        info!("Downloading catalog from {}", self.catalog_url);
        self.catalog_status = CatalogStatus::Loading(id);
    }

    /// Dispatch a request event to the catalog download or the image loader.
    pub fn handle_event(&mut self, event: &RequestEvent) {
        if self.catalog_status == CatalogStatus::Loading(event.id) {
            self.on_catalog_event(event);
        } else {
            self.loader
                .on_request_event(event, &mut self.client, &mut self.gallery);
        }
    }

    /// Show product `index` and load its images, superseding any batch in flight.
    pub fn select_product(&mut self, index: usize) -> bool {
        let Some(product) = self.catalog.get(index) else {
            return false;
        };
        if self.selected == Some(index) {
            return false;
        }
        debug!("Selecting product {index}: {}", product.title);
        let urls = product.images.clone();
        self.selected = Some(index);
        self.loader.load(urls, &mut self.client, &mut self.gallery);
        true
    }

    pub fn next_product(&mut self) -> bool {
        match self.selected {
            Some(i) => self.select_product(i + 1),
            None => false,
        }
    }

    pub fn previous_product(&mut self) -> bool {
        match self.selected {
            Some(i) if i > 0 => self.select_product(i - 1),
            _ => false,
        }
    }

    /// Stop all image loading; `done` runs once the loader is idle.
    pub fn shutdown(&mut self, done: impl FnOnce() + 'static) {
        self.loader.cancel_all(done, &mut self.client);
    }

    fn on_catalog_event(&mut self, event: &RequestEvent) {
        if !event.state.is_terminal() {
            return;
        }

        let body = match (&event.state, &event.response) {
            (RequestState::Completed, Some(response)) if response.status == 200 => {
                response.as_string()
            }
            (state, response) => {
                let status = response.as_ref().map(|r| r.status);
                error!("Failed to download products: state <{state}>, status {status:?}");
                self.catalog_status = CatalogStatus::Failed(format!("request {state}"));
                return;
            }
        };

        match parse_catalog(&body) {
            Ok(catalog) => {
                info!("Catalog loaded with {} product(s)", catalog.len());
                self.catalog = catalog;
                self.catalog_status = CatalogStatus::Loaded;
                self.selected = None;
                self.select_product(0);
            }
            Err(e) => {
                error!("Failed to parse products: {e}");
                self.catalog_status = CatalogStatus::Failed(e.to_string());
            }
        }
    }
}
