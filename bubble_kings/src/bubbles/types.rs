use bevy::color::Srgba;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Identifies who popped a bubble.
///
/// The identity is kept apart from the colour used to draw it; see [`PlayerId::color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    #[default]
    Red,
    Green,
    Blue,
}

impl PlayerId {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Splat colour for bubbles popped by this player
    pub fn color(self) -> Srgba {
        match self {
            Self::Red => Srgba::rgb_u8(0xCC, 0x44, 0x44),   // #C44
            Self::Green => Srgba::rgb_u8(0x44, 0xCC, 0x44), // #4C4
            Self::Blue => Srgba::rgb_u8(0x44, 0x44, 0xCC),  // #44C
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Index of a bubble inside the screen's bubble arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BubbleId(pub usize);

/// Pop state of a bubble. The only legal transition is `Unpopped -> Popped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BubbleState {
    #[default]
    Unpopped,
    Popped { by: PlayerId },
}

/// A circular target that can be popped exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    center: Vec2,
    radius: f32,
    state: BubbleState,
}

impl Bubble {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            state: BubbleState::Unpopped,
        }
    }

    pub const fn center(&self) -> Vec2 {
        self.center
    }

    pub const fn radius(&self) -> f32 {
        self.radius
    }

    pub const fn state(&self) -> BubbleState {
        self.state
    }

    /// Attempt to pop this bubble with a click at `point`.
    ///
    /// Already popped bubbles are left alone and report `false`. A point exactly on the
    /// rim does not count as a hit.
    pub fn try_to_pop(&mut self, point: Vec2, popper: PlayerId) -> bool {
        if self.is_popped() {
            return false;
        }

        if point.distance(self.center) < self.radius {
            self.pop(popper);
        }
        self.is_popped()
    }

    /// Mark the bubble as popped by `popper`.
    ///
    /// A bubble keeps its first popper: popping again is ignored.
    pub(crate) fn pop(&mut self, popper: PlayerId) {
        if let BubbleState::Popped { by } = self.state {
            debug!("Bubble at {} already popped by {}, ignoring {}", self.center, by, popper);
            return;
        }
        self.state = BubbleState::Popped { by: popper };
    }

    pub const fn is_popped(&self) -> bool {
        matches!(self.state, BubbleState::Popped { .. })
    }

    pub const fn was_popped_by(&self) -> Option<PlayerId> {
        match self.state {
            BubbleState::Popped { by } => Some(by),
            BubbleState::Unpopped => None,
        }
    }
}
