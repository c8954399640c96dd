use bevy::prelude::*;

use crate::bubbles::types::{Bubble, BubbleId, PlayerId};

/// Turns pointer clicks into pop attempts against the bubbles that can still be hit.
#[derive(Debug, Clone, Default)]
pub struct PopObserver {
    /// Ids still eligible for hit-testing, in registration order
    tracked: Vec<BubbleId>,
    player: PlayerId,
}

impl PopObserver {
    pub const fn new(player: PlayerId) -> Self {
        Self {
            tracked: Vec::new(),
            player,
        }
    }

    pub fn register_bubble(&mut self, id: BubbleId) {
        self.tracked.push(id);
    }

    pub const fn player(&self) -> PlayerId {
        self.player
    }

    pub const fn set_player(&mut self, player: PlayerId) {
        self.player = player;
    }

    /// Stop hit-testing `id`, used when a bubble is popped without a click
    pub fn forget(&mut self, id: BubbleId) {
        self.tracked.retain(|tracked| *tracked != id);
    }

    pub fn tracked(&self) -> &[BubbleId] {
        &self.tracked
    }

    /// Handle a click at surface coordinates `point`.
    ///
    /// Walks the tracked set from the last registered bubble to the first so removals
    /// never skip a neighbour. Every bubble under the point pops, there is no early exit.
    /// Returns the ids popped by this click, in the order they popped.
    pub fn handle_click(&mut self, point: Vec2, bubbles: &mut [Bubble]) -> Vec<BubbleId> {
        let mut popped = Vec::new();

        for i in (0..self.tracked.len()).rev() {
            let id = self.tracked[i];
            let Some(bubble) = bubbles.get_mut(id.0) else {
                warn!("Pop observer tracks unknown bubble {:?}, dropping it", id);
                self.tracked.remove(i);
                continue;
            };

            if bubble.try_to_pop(point, self.player) {
                self.tracked.remove(i);
                popped.push(id);
            }
        }

        if !popped.is_empty() {
            debug!(
                "Click at {} popped {} bubble(s) for {}, {} left",
                point,
                popped.len(),
                self.player,
                self.tracked.len()
            );
        }
        popped
    }
}
