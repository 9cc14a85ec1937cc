//! Swipeable image gallery.
//!
//! Holds the decoded images of one product, the selected index and the
//! transient pan offset of an in-flight page transition. Rendering pans the
//! current image and its neighbour horizontally according to that offset.

use std::f32::consts::{FRAC_PI_4, PI};
use std::time::{Duration, Instant};

use egui::{pos2, vec2, Color32, Pos2, Rect, Vec2};
use tracing::debug;

use crate::animation::{AnimatedValue, Animator, EasingFunction, Sample, Tick};
use crate::image_loader::DecodedImage;
use crate::surface::{Canvas, Drawable, EventStatus, InputHandler, Key, KeyEvent, PointerEvent};

/// Name of the animated horizontal offset.
pub const X_OFFSET: &str = "x_offset";

pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(200);
pub const DEFAULT_NAV_STRIP_WIDTH: f32 = 30.0;

const ARROW_LINE_WIDTH: f32 = 5.0;
const DOT_RADIUS: f32 = 4.0;
const DOT_SPACING: f32 = 6.0;

const NAV_FILL: Color32 = Color32::from_rgba_premultiplied(64, 64, 64, 64);
const DOT_DIM: Color32 = Color32::from_rgba_premultiplied(64, 64, 64, 64);

/// How an image is sized inside the gallery cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalingMode {
    /// Native size, centered
    #[default]
    Center,
    /// Largest uniform scale that fits both dimensions
    Fit,
    /// Uniform scale matching the cell width (may overflow vertically)
    FillWidth,
    /// Uniform scale matching the cell height (may overflow horizontally)
    FillHeight,
}

impl ScalingMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "center" | "none" | "native" => Some(Self::Center),
            "fit" | "contain" => Some(Self::Fit),
            "fill_width" | "fillwidth" | "width" => Some(Self::FillWidth),
            "fill_height" | "fillheight" | "height" => Some(Self::FillHeight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Fit => "fit",
            Self::FillWidth => "fill_width",
            Self::FillHeight => "fill_height",
        }
    }
}

/// What to do once the running transition ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    /// Make `index` the selected image
    Commit { index: usize },
    /// Drop every image and return to the initial state
    Reset,
}

/// Size of an image of `image` points drawn into a cell of `cell` points.
pub fn scaled_image_size(image: Vec2, cell: Vec2, mode: ScalingMode) -> Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = match mode {
        ScalingMode::Center => 1.0,
        ScalingMode::Fit => (cell.x / image.x).min(cell.y / image.y),
        ScalingMode::FillWidth => cell.x / image.x,
        ScalingMode::FillHeight => cell.y / image.y,
    };
    image * scale
}

/// Rect of an image of `size` centered in `cell`.
pub fn image_rect(cell: Rect, size: Vec2) -> Rect {
    Rect::from_center_size(cell.center(), size)
}

pub fn nav_rect_left(bounds: Rect, strip_width: f32) -> Rect {
    Rect::from_min_size(bounds.min, vec2(strip_width, bounds.height()))
}

pub fn nav_rect_right(bounds: Rect, strip_width: f32) -> Rect {
    Rect::from_min_size(
        pos2(bounds.max.x - strip_width, bounds.min.y),
        vec2(strip_width, bounds.height()),
    )
}

/// Centers of the paging dots, left to right.
pub fn dot_centers(bounds: Rect, count: usize) -> Vec<Pos2> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f32;
    let row_width = n * DOT_RADIUS * 2.0 + (n - 1.0) * DOT_SPACING;
    let first_x = bounds.center().x - row_width / 2.0 + DOT_RADIUS;
    let y = bounds.max.y - DOT_RADIUS * 4.0;
    (0..count)
        .map(|i| pos2(first_x + i as f32 * (DOT_RADIUS * 2.0 + DOT_SPACING), y))
        .collect()
}

/// End points of a chevron centered in `rect`: `[corner, arm_a, arm_b]`.
/// `rotation` 0 points left, PI points right.
fn chevron(rect: Rect, arm_length: f32, rotation: f32) -> [Pos2; 3] {
    let center = rect.center();
    let angle = -FRAC_PI_4 + rotation;
    let (sin, cos) = angle.sin_cos();
    let rotate = |p: Vec2| center + vec2(p.x * cos - p.y * sin, p.x * sin + p.y * cos);

    let corner = vec2(-arm_length / 4.0, -arm_length / 4.0);
    [
        rotate(corner),
        rotate(corner + vec2(arm_length, 0.0)),
        rotate(corner + vec2(0.0, arm_length)),
    ]
}

pub struct GalleryView {
    images: Vec<DecodedImage>,
    selected_index: usize,
    scaling_mode: ScalingMode,
    /// In [-1, 1], 0 when no transition runs
    animation_offset: f32,
    animator: Animator<GalleryAction>,
    transition: Duration,
    nav_strip_width: f32,
    bounds: Rect,
    hover_left: bool,
    hover_right: bool,
    redraw_requested: bool,
}

impl Default for GalleryView {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryView {
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            selected_index: 0,
            scaling_mode: ScalingMode::default(),
            animation_offset: 0.0,
            animator: Animator::new(),
            transition: DEFAULT_TRANSITION,
            nav_strip_width: DEFAULT_NAV_STRIP_WIDTH,
            bounds: Rect::NOTHING,
            hover_left: false,
            hover_right: false,
            redraw_requested: false,
        }
    }

    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    /// Takes effect from the next transition.
    pub fn set_transition_duration(&mut self, transition: Duration) {
        self.transition = transition;
    }

    pub fn with_nav_strip_width(mut self, width: f32) -> Self {
        self.nav_strip_width = width.max(1.0);
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.animator = Animator::new().with_tick_interval(interval);
        self
    }

    pub fn images(&self) -> &[DecodedImage] {
        &self.images
    }

    /// Append an image and ask for a redraw.
    pub fn push_image(&mut self, image: DecodedImage) {
        self.images.push(image);
        self.redraw_requested = true;
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_image(&self) -> Option<&DecodedImage> {
        self.images.get(self.selected_index)
    }

    pub fn animation_offset(&self) -> f32 {
        self.animation_offset
    }

    pub fn scaling_mode(&self) -> ScalingMode {
        self.scaling_mode
    }

    pub fn set_scaling_mode(&mut self, mode: ScalingMode) {
        if self.scaling_mode != mode {
            self.scaling_mode = mode;
            self.redraw_requested = true;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// How soon the host should call [`GalleryView::tick`] again while animating.
    pub fn tick_interval(&self) -> Duration {
        self.animator.tick_interval()
    }

    /// Area the view occupies; used for hit-testing input.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_left_hovered(&self) -> bool {
        self.hover_left
    }

    pub fn is_right_hovered(&self) -> bool {
        self.hover_right
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Drop all images. A running transition is stopped first and the clear
    /// happens in its place, so images never vanish mid-pan.
    pub fn reset_images(&mut self) {
        if self.animator.is_running() {
            debug!("Gallery: reset deferred to animation stop");
            self.animator.set_on_stop(GalleryAction::Reset);
            if let Some(action) = self.animator.stop() {
                self.apply(action);
            }
        } else {
            self.apply(GalleryAction::Reset);
        }
    }

    /// Pan to the next image. Returns whether a transition started.
    pub fn next(&mut self, now: Instant) -> bool {
        if self.animator.is_running() || self.selected_index + 1 >= self.images.len() {
            return false;
        }
        self.start_transition(1.0, self.selected_index + 1, now)
    }

    /// Pan to the previous image. Returns whether a transition started.
    pub fn previous(&mut self, now: Instant) -> bool {
        if self.animator.is_running() || self.selected_index == 0 {
            return false;
        }
        self.start_transition(-1.0, self.selected_index - 1, now)
    }

    /// Advance the transition. Returns whether the view changed and needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.animator.tick(now) {
            Tick::Idle => false,
            Tick::Running { samples, .. } => {
                self.apply_samples(&samples);
                self.redraw_requested = true;
                true
            }
            Tick::Finished { samples, action } => {
                self.apply_samples(&samples);
                if let Some(action) = action {
                    self.apply(action);
                }
                self.redraw_requested = true;
                true
            }
        }
    }

    fn start_transition(&mut self, target: f32, index: usize, now: Instant) -> bool {
        self.animator.set_animated_values(vec![AnimatedValue::new(
            X_OFFSET,
            0.0,
            target,
            EasingFunction::EaseInOut,
        )]);
        self.animator.set_on_stop(GalleryAction::Commit { index });
        let started = self.animator.start(self.transition, now);
        if started {
            self.redraw_requested = true;
        }
        started
    }

    fn apply_samples(&mut self, samples: &[Sample]) {
        for sample in samples {
            if sample.name == X_OFFSET {
                self.animation_offset = sample.value;
            }
        }
    }

    fn apply(&mut self, action: GalleryAction) {
        match action {
            GalleryAction::Commit { index } => {
                if index < self.images.len() {
                    self.selected_index = index;
                }
            }
            GalleryAction::Reset => {
                self.images.clear();
                self.selected_index = 0;
            }
        }
        self.animation_offset = 0.0;
        self.redraw_requested = true;
    }

    /// Indices drawn this frame: the selection plus the neighbour being panned to.
    fn visible_indices(&self) -> Vec<usize> {
        let mut visible = vec![self.selected_index];
        if self.animation_offset > 0.0 && self.selected_index + 1 < self.images.len() {
            visible.push(self.selected_index + 1);
        } else if self.animation_offset < 0.0 && self.selected_index > 0 {
            visible.push(self.selected_index - 1);
        }
        visible
    }

    fn draw_images(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        let cell_size = bounds.size();
        for index in self.visible_indices() {
            let Some(image) = self.images.get(index) else {
                continue;
            };
            let shift = cell_size.x
                * (index as f32 - self.selected_index as f32 - self.animation_offset);
            let cell = bounds.translate(vec2(shift, 0.0));
            let size = scaled_image_size(image.size(), cell_size, self.scaling_mode);
            canvas.draw_image(image, image_rect(cell, size), cell.intersect(bounds));
        }
    }

    fn draw_navigation(&self, canvas: &mut dyn Canvas, rect: Rect, rotation: f32) {
        canvas.fill_rect(rect, NAV_FILL);
        let arm = rect.width() * 2.0 / 3.0;
        let [corner, a, b] = chevron(rect, arm, rotation);
        canvas.stroke_line(corner, a, ARROW_LINE_WIDTH, Color32::WHITE);
        canvas.stroke_line(corner, b, ARROW_LINE_WIDTH, Color32::WHITE);
    }

    fn draw_dots(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        for (i, center) in dot_centers(bounds, self.images.len()).into_iter().enumerate() {
            let color = if i == self.selected_index {
                Color32::WHITE
            } else {
                DOT_DIM
            };
            canvas.fill_circle(center, DOT_RADIUS, color);
        }
    }
}

impl Drawable for GalleryView {
    fn render(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        if self.images.is_empty() {
            return;
        }

        self.draw_images(canvas, bounds);

        if self.hover_left {
            self.draw_navigation(canvas, nav_rect_left(bounds, self.nav_strip_width), 0.0);
        }
        if self.hover_right {
            self.draw_navigation(canvas, nav_rect_right(bounds, self.nav_strip_width), PI);
        }

        if self.images.len() > 1 {
            self.draw_dots(canvas, bounds);
        }
    }
}

impl InputHandler for GalleryView {
    fn on_pointer_move(&mut self, event: PointerEvent) -> EventStatus {
        self.hover_left = nav_rect_left(self.bounds, self.nav_strip_width).contains(event.pos);
        self.hover_right = nav_rect_right(self.bounds, self.nav_strip_width).contains(event.pos);
        self.redraw_requested = true;
        EventStatus::Consumed
    }

    fn on_pointer_down(&mut self, event: PointerEvent) -> EventStatus {
        if self.hover_left && nav_rect_left(self.bounds, self.nav_strip_width).contains(event.pos) {
            self.previous(event.time);
            EventStatus::Consumed
        } else if self.hover_right
            && nav_rect_right(self.bounds, self.nav_strip_width).contains(event.pos)
        {
            self.next(event.time);
            EventStatus::Consumed
        } else {
            EventStatus::Ignored
        }
    }

    fn on_pointer_leave(&mut self) -> EventStatus {
        self.hover_left = false;
        self.hover_right = false;
        self.redraw_requested = true;
        EventStatus::Consumed
    }

    fn on_key(&mut self, event: KeyEvent) -> EventStatus {
        match event.key {
            Key::ArrowLeft => {
                self.previous(event.time);
                EventStatus::Consumed
            }
            Key::ArrowRight => {
                self.next(event.time);
                EventStatus::Consumed
            }
            Key::Other => EventStatus::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Rect(Rect),
        Circle(Pos2, Color32),
        Line,
        Image { width: u32, rect: Rect, clip: Rect },
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Canvas for Recorder {
        fn fill_rect(&mut self, rect: Rect, _color: Color32) {
            self.0.push(Op::Rect(rect));
        }
        fn fill_circle(&mut self, center: Pos2, _radius: f32, color: Color32) {
            self.0.push(Op::Circle(center, color));
        }
        fn stroke_line(&mut self, _from: Pos2, _to: Pos2, _width: f32, _color: Color32) {
            self.0.push(Op::Line);
        }
        fn draw_image(&mut self, image: &DecodedImage, rect: Rect, clip: Rect) {
            self.0.push(Op::Image {
                width: image.width,
                rect,
                clip,
            });
        }
    }

    fn image(width: u32, height: u32) -> DecodedImage {
        DecodedImage::from_rgba(width, height, vec![255; (width * height * 4) as usize]).unwrap()
    }

    fn gallery_with(count: u32) -> GalleryView {
        let mut gallery = GalleryView::new();
        for i in 0..count {
            gallery.push_image(image(10 + i, 10));
        }
        gallery.set_bounds(Rect::from_min_size(Pos2::ZERO, vec2(200.0, 100.0)));
        gallery
    }

    fn ms(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn scaling_modes() {
        let img = vec2(100.0, 50.0);
        let cell = vec2(400.0, 100.0);
        assert_eq!(scaled_image_size(img, cell, ScalingMode::Center), vec2(100.0, 50.0));
        assert_eq!(scaled_image_size(img, cell, ScalingMode::Fit), vec2(200.0, 100.0));
        assert_eq!(scaled_image_size(img, cell, ScalingMode::FillWidth), vec2(400.0, 200.0));
        assert_eq!(scaled_image_size(img, cell, ScalingMode::FillHeight), vec2(200.0, 100.0));
    }

    #[test]
    fn scaling_mode_names_round_trip() {
        for mode in [
            ScalingMode::Center,
            ScalingMode::Fit,
            ScalingMode::FillWidth,
            ScalingMode::FillHeight,
        ] {
            assert_eq!(ScalingMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(ScalingMode::from_str("stretch"), None);
    }

    #[test]
    fn next_at_last_index_is_noop() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(1);
        assert!(!gallery.next(t0));
        assert!(!gallery.is_animating());
        assert_eq!(gallery.selected_index(), 0);
    }

    #[test]
    fn previous_at_first_index_is_noop() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(3);
        assert!(!gallery.previous(t0));
        assert!(!gallery.is_animating());
    }

    #[test]
    fn navigation_on_empty_gallery_is_noop() {
        let t0 = Instant::now();
        let mut gallery = GalleryView::new();
        assert!(!gallery.next(t0));
        assert!(!gallery.previous(t0));
    }

    #[test]
    fn next_commits_after_transition() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(3);
        assert!(gallery.next(t0));

        assert!(gallery.tick(ms(t0, 100)));
        assert_eq!(gallery.selected_index(), 0);
        assert!((gallery.animation_offset() - 0.5).abs() < 1e-3);

        assert!(gallery.tick(ms(t0, 200)));
        assert_eq!(gallery.selected_index(), 1);
        assert_eq!(gallery.animation_offset(), 0.0);
        assert!(!gallery.is_animating());
        assert!(!gallery.tick(ms(t0, 250)));
    }

    #[test]
    fn previous_pans_negative() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(3);
        gallery.next(t0);
        gallery.tick(ms(t0, 200));

        assert!(gallery.previous(ms(t0, 300)));
        gallery.tick(ms(t0, 350));
        assert!(gallery.animation_offset() < 0.0);
        gallery.tick(ms(t0, 500));
        assert_eq!(gallery.selected_index(), 0);
        assert_eq!(gallery.animation_offset(), 0.0);
    }

    #[test]
    fn transition_duration_is_configurable() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(2);
        gallery.set_transition_duration(Duration::from_millis(50));
        gallery.next(t0);
        gallery.tick(ms(t0, 50));
        assert!(!gallery.is_animating());
        assert_eq!(gallery.selected_index(), 1);
    }

    #[test]
    fn navigation_ignored_while_animating() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(3);
        assert!(gallery.next(t0));
        assert!(!gallery.next(ms(t0, 50)));
        assert!(!gallery.previous(ms(t0, 50)));
        gallery.tick(ms(t0, 200));
        assert_eq!(gallery.selected_index(), 1);
    }

    #[test]
    fn reset_while_animating_replaces_commit() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(3);
        gallery.next(t0);
        gallery.tick(ms(t0, 100));

        gallery.reset_images();
        assert!(gallery.images().is_empty());
        assert_eq!(gallery.selected_index(), 0);
        assert_eq!(gallery.animation_offset(), 0.0);
        assert!(!gallery.is_animating());
        // The commit never lands after the reset
        assert!(!gallery.tick(ms(t0, 300)));
        assert_eq!(gallery.selected_index(), 0);
    }

    #[test]
    fn reset_when_idle_clears_immediately() {
        let mut gallery = gallery_with(2);
        gallery.take_redraw_request();
        gallery.reset_images();
        assert!(gallery.images().is_empty());
        assert!(gallery.take_redraw_request());
    }

    #[test]
    fn render_empty_draws_nothing() {
        let gallery = GalleryView::new();
        let mut canvas = Recorder::default();
        gallery.render(&mut canvas, Rect::from_min_size(Pos2::ZERO, vec2(200.0, 100.0)));
        assert!(canvas.0.is_empty());
    }

    #[test]
    fn render_single_image_has_no_dots() {
        let gallery = gallery_with(1);
        let mut canvas = Recorder::default();
        gallery.render(&mut canvas, gallery.bounds());
        assert_eq!(canvas.0.len(), 1);
        assert!(matches!(canvas.0[0], Op::Image { width: 10, .. }));
    }

    #[test]
    fn render_mid_transition_draws_neighbour_shifted() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(3);
        gallery.next(t0);
        gallery.tick(ms(t0, 100));
        let offset = gallery.animation_offset();

        let mut canvas = Recorder::default();
        gallery.render(&mut canvas, gallery.bounds());

        let images: Vec<_> = canvas
            .0
            .iter()
            .filter_map(|op| match op {
                Op::Image { width, rect, clip } => Some((*width, *rect, *clip)),
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), 2);

        let (w0, r0, c0) = images[0];
        let (w1, r1, _) = images[1];
        assert_eq!((w0, w1), (10, 11));
        // Center mode keeps native size, centered in the shifted cell
        assert!((r0.center().x - (100.0 - 200.0 * offset)).abs() < 1e-3);
        assert!((r1.center().x - (100.0 + 200.0 * (1.0 - offset))).abs() < 1e-3);
        assert!(c0.max.x <= 200.0 && c0.min.x >= 0.0);

        let dots = canvas.0.iter().filter(|op| matches!(op, Op::Circle(..))).count();
        assert_eq!(dots, 3);
    }

    #[test]
    fn selected_dot_is_highlighted() {
        let gallery = gallery_with(3);
        let mut canvas = Recorder::default();
        gallery.render(&mut canvas, gallery.bounds());
        let colors: Vec<_> = canvas
            .0
            .iter()
            .filter_map(|op| match op {
                Op::Circle(_, c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Color32::WHITE, DOT_DIM, DOT_DIM]);
    }

    #[test]
    fn dot_row_is_centered_above_bottom() {
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(200.0, 100.0));
        let dots = dot_centers(bounds, 3);
        assert_eq!(dots.len(), 3);
        assert_eq!(dots[1], pos2(100.0, 84.0));
        assert_eq!(dots[2].x - dots[1].x, 14.0);
    }

    #[test]
    fn hover_shows_affordance_and_click_navigates() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(3);

        let right = PointerEvent::new(pos2(190.0, 50.0), t0);
        gallery.on_pointer_move(right);
        assert!(gallery.is_right_hovered());
        assert!(!gallery.is_left_hovered());

        let mut canvas = Recorder::default();
        gallery.render(&mut canvas, gallery.bounds());
        assert!(canvas.0.contains(&Op::Rect(nav_rect_right(gallery.bounds(), 30.0))));
        assert_eq!(canvas.0.iter().filter(|op| **op == Op::Line).count(), 2);

        assert_eq!(gallery.on_pointer_down(right), EventStatus::Consumed);
        assert!(gallery.is_animating());
    }

    #[test]
    fn click_in_middle_is_ignored() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(3);
        let mid = PointerEvent::new(pos2(100.0, 50.0), t0);
        gallery.on_pointer_move(mid);
        assert_eq!(gallery.on_pointer_down(mid), EventStatus::Ignored);
        assert!(!gallery.is_animating());
    }

    #[test]
    fn leaving_clears_hover() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(2);
        gallery.on_pointer_move(PointerEvent::new(pos2(5.0, 50.0), t0));
        assert!(gallery.is_left_hovered());
        gallery.on_pointer_leave();
        assert!(!gallery.is_left_hovered() && !gallery.is_right_hovered());
    }

    #[test]
    fn arrow_keys_navigate() {
        let t0 = Instant::now();
        let mut gallery = gallery_with(2);
        assert_eq!(
            gallery.on_key(KeyEvent::new(Key::ArrowRight, t0)),
            EventStatus::Consumed
        );
        gallery.tick(ms(t0, 200));
        assert_eq!(gallery.selected_index(), 1);
        assert_eq!(
            gallery.on_key(KeyEvent::new(Key::Other, t0)),
            EventStatus::Ignored
        );
    }

    #[test]
    fn chevrons_point_outwards() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(30.0, 100.0));
        let [corner, a, b] = chevron(rect, 20.0, 0.0);
        assert!(corner.x < a.x && corner.x < b.x);
        let [corner, a, b] = chevron(rect, 20.0, PI);
        assert!(corner.x > a.x && corner.x > b.x);
    }
}
