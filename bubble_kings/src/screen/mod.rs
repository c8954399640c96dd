pub mod frame_loop;

pub use frame_loop::{FrameClock, FrameLoop, InstantClock, ManualClock, StopHandle};

use bevy::prelude::*;
use rand::rngs::StdRng;

use crate::board::GameBoard;
use crate::bubbles::{Bubble, BubbleId, PlayerId, PopObserver};
use crate::render::{BubbleRenderer, RenderSurface};

/// Something a [`GameBoard`] can hand its bubbles to
pub trait BubbleRegistry {
    fn register_bubble(&mut self, bubble: Bubble) -> BubbleId;
    fn set_dimensions(&mut self, width: u32, height: u32);
}

/// Owns the bubbles, their renderers, the render surface and the frame loop.
///
/// Bubbles live in an arena; renderers and the pop observer refer to them by [`BubbleId`].
/// The surface is never cleared, renderers paint over whatever the previous frame left.
pub struct BubbleScreen<S: RenderSurface> {
    bubbles: Vec<Bubble>,
    renderers: Vec<BubbleRenderer>,
    observer: PopObserver,
    width: u32,
    height: u32,
    surface: S,
    frame_loop: FrameLoop,
    rng: StdRng,
    /// Milliseconds between the two most recent frames
    delta: f32,
}

impl<S: RenderSurface> BubbleScreen<S> {
    /// Build a screen for `board`, drawing on `surface` and popping on behalf of `player`.
    ///
    /// The surface is resized to the board's dimensions before anything is drawn.
    pub fn new(board: &GameBoard, surface: S, player: PlayerId, rng: StdRng) -> Self {
        let mut screen = Self {
            bubbles: Vec::new(),
            renderers: Vec::new(),
            observer: PopObserver::new(player),
            width: 0,
            height: 0,
            surface,
            frame_loop: FrameLoop::new(),
            rng,
            delta: 0.0,
        };
        board.register_screen(&mut screen);
        screen.surface.resize(screen.width, screen.height);
        screen
    }

    /// Start the frame loop, the first frame's delta is measured from `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.frame_loop.start(now_ms);
        info!("Frame loop started with {} bubbles", self.renderers.len());
    }

    pub fn stop(&self) {
        self.frame_loop.stop();
        info!("Frame loop stopped after {} frames", self.frame_loop.frames());
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.frame_loop.stop_handle()
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Frame callback. Renders a frame if the loop is running and reports whether it did.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        match self.frame_loop.advance(now_ms) {
            Some(delta) => {
                self.step(delta);
                true
            }
            None => false,
        }
    }

    /// Render one frame with a fixed `delta`, regardless of the frame loop state.
    ///
    /// Renderers are drawn from the last registered to the first, all with the same delta.
    pub fn step(&mut self, delta: f32) {
        self.delta = delta;
        for renderer in self.renderers.iter_mut().rev() {
            let Some(bubble) = self.bubbles.get(renderer.bubble_id().0) else {
                continue;
            };
            renderer.render(bubble, &mut self.surface, delta, &mut self.rng);
        }
    }

    /// Drive the loop from `clock` until it is stopped or `max_frames` frames were rendered.
    /// Returns the number of frames rendered.
    pub fn run(&mut self, clock: &mut impl FrameClock, max_frames: Option<u64>) -> u64 {
        if !self.is_running() {
            self.start(clock.now_ms());
        }

        let mut frames = 0;
        while max_frames.is_none_or(|max| frames < max) {
            if !self.on_frame(clock.now_ms()) {
                break;
            }
            frames += 1;
        }
        frames
    }

    /// Pointer click at surface coordinates. Returns the bubbles it popped.
    pub fn click(&mut self, point: Vec2) -> Vec<BubbleId> {
        let popped = self.observer.handle_click(point, &mut self.bubbles);
        for id in &popped {
            info!("{} popped bubble {}", self.observer.player(), id.0);
        }
        popped
    }

    /// Pop the bubble of the renderer at `index` directly, skipping the hit test.
    ///
    /// Returns `false` when there is no such renderer or its bubble was already popped.
    pub fn pop_bubble(&mut self, index: usize, popper: PlayerId) -> bool {
        let Some(id) = self.renderers.get(index).map(BubbleRenderer::bubble_id) else {
            warn!("No bubble at index {}, {} registered", index, self.renderers.len());
            return false;
        };
        let Some(bubble) = self.bubbles.get_mut(id.0) else {
            return false;
        };
        if bubble.is_popped() {
            return false;
        }

        bubble.pop(popper);
        self.observer.forget(id);
        info!("{} popped bubble {} directly", popper, id.0);
        true
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn delta(&self) -> f32 {
        self.delta
    }

    pub const fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }

    pub fn bubble(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles.get(id.0)
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn renderers(&self) -> &[BubbleRenderer] {
        &self.renderers
    }

    pub const fn observer(&self) -> &PopObserver {
        &self.observer
    }

    pub const fn player(&self) -> PlayerId {
        self.observer.player()
    }

    pub const fn set_player(&mut self, player: PlayerId) {
        self.observer.set_player(player);
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: RenderSurface> BubbleRegistry for BubbleScreen<S> {
    fn register_bubble(&mut self, bubble: Bubble) -> BubbleId {
        let id = BubbleId(self.bubbles.len());
        self.bubbles.push(bubble);
        self.renderers.push(BubbleRenderer::new(id));
        self.observer.register_bubble(id);
        id
    }

    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
