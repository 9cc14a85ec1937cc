//! Backend-independent drawing and input seams.
//!
//! Views render through a [`Canvas`] and receive already-translated pointer
//! and key events. The egui shell in `app.rs` provides the real canvas; tests
//! record calls instead.

use std::time::Instant;

use egui::{Color32, Pos2, Rect};

use crate::image_loader::DecodedImage;

/// Minimal painting surface a view draws onto.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color32);

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);

    /// Draw `image` stretched into `rect`, with everything outside `clip` cut off.
    fn draw_image(&mut self, image: &DecodedImage, rect: Rect, clip: Rect);
}

/// Something that can paint itself into a rectangle.
pub trait Drawable {
    fn render(&self, canvas: &mut dyn Canvas, bounds: Rect);
}

/// Whether a view acted on an event or let it fall through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Consumed,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Position in the same coordinate space as the view bounds
    pub pos: Pos2,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(pos: Pos2, time: Instant) -> Self {
        Self { pos, time }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub time: Instant,
}

impl KeyEvent {
    pub fn new(key: Key, time: Instant) -> Self {
        Self { key, time }
    }
}

/// Pointer and keyboard handling for a view.
pub trait InputHandler {
    fn on_pointer_move(&mut self, event: PointerEvent) -> EventStatus;

    fn on_pointer_down(&mut self, event: PointerEvent) -> EventStatus;

    fn on_pointer_leave(&mut self) -> EventStatus;

    fn on_key(&mut self, event: KeyEvent) -> EventStatus;
}
