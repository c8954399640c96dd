#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bubbles::Bubble;
use crate::screen::BubbleRegistry;

/// Largest surface edge the board may ask for, in pixels
pub const MAX_SURFACE_EDGE: u32 = 8192;

/// Grid shape and bubble size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardOptions {
    pub rows: u32,
    pub cols: u32,
    /// Bubble radius in surface pixels
    pub bubble_size: f32,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 6,
            bubble_size: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error("board needs at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },
    #[error("bubble size must be a positive finite number, got {0}")]
    InvalidBubbleSize(f32),
    #[error("board would need a {width}x{height} surface, limit is {}", MAX_SURFACE_EDGE)]
    SurfaceTooLarge { width: f32, height: f32 },
}

/// A rows x cols grid of touching bubbles with a half-bubble margin around it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameBoard {
    options: BoardOptions,
    width: u32,
    height: u32,
}

impl GameBoard {
    /// Validate `options` and lay out the board.
    ///
    /// # Errors
    /// Returns a [`BoardError`] for an empty grid, a non-positive or non-finite bubble size,
    /// or a board that would not fit on a [`MAX_SURFACE_EDGE`] sized surface.
    pub fn new(options: BoardOptions) -> Result<Self, BoardError> {
        let BoardOptions {
            rows,
            cols,
            bubble_size,
        } = options;

        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyGrid { rows, cols });
        }
        if !bubble_size.is_finite() || bubble_size <= 0.0 {
            return Err(BoardError::InvalidBubbleSize(bubble_size));
        }

        let width = 2.0 * cols as f32 * bubble_size;
        let height = 2.0 * rows as f32 * bubble_size;
        let limit = MAX_SURFACE_EDGE as f32;
        if width.ceil() > limit || height.ceil() > limit {
            return Err(BoardError::SurfaceTooLarge { width, height });
        }

        Ok(Self {
            options,
            width: width.ceil() as u32,
            height: height.ceil() as u32,
        })
    }

    pub const fn options(&self) -> BoardOptions {
        self.options
    }

    /// Surface size the board needs: `(2 * cols * size, 2 * rows * size)`
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Centre of the bubble in `row`, `col`
    pub fn center(&self, row: u32, col: u32) -> Vec2 {
        let size = self.options.bubble_size;
        Vec2::new(
            size * (2.0 * (col as f32 + 0.5)),
            size * (2.0 * (row as f32 + 0.5)),
        )
    }

    /// Fresh, unpopped bubbles in row-major order starting at the top left
    pub fn bubbles(&self) -> impl Iterator<Item = Bubble> + '_ {
        let BoardOptions {
            rows,
            cols,
            bubble_size,
        } = self.options;
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| Bubble::new(self.center(row, col), bubble_size))
        })
    }

    /// Hand every bubble of the board to `screen` and tell it how large to be.
    pub fn register_screen(&self, screen: &mut impl BubbleRegistry) {
        let mut count = 0;
        for bubble in self.bubbles() {
            screen.register_bubble(bubble);
            count += 1;
        }
        screen.set_dimensions(self.width, self.height);

        info!(
            "Registered {} bubbles ({}x{}), surface {}x{}",
            count, self.options.rows, self.options.cols, self.width, self.height
        );
    }
}

impl Default for GameBoard {
    fn default() -> Self {
        let options = BoardOptions::default();
        Self {
            options,
            width: 300,
            height: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubbles::BubbleId;
    use rstest::rstest;

    #[derive(Default)]
    struct Collect {
        bubbles: Vec<Bubble>,
        dimensions: Option<(u32, u32)>,
    }

    impl BubbleRegistry for Collect {
        fn register_bubble(&mut self, bubble: Bubble) -> BubbleId {
            self.bubbles.push(bubble);
            BubbleId(self.bubbles.len() - 1)
        }

        fn set_dimensions(&mut self, width: u32, height: u32) {
            self.dimensions = Some((width, height));
        }
    }

    #[test]
    fn default_layout_matches_the_classic_board() {
        let board = GameBoard::new(BoardOptions::default()).unwrap();

        assert_eq!(board.dimensions(), (300, 250));
        assert_eq!(board.center(0, 0), Vec2::new(25.0, 25.0));
        assert_eq!(board.center(4, 5), Vec2::new(275.0, 225.0));
        assert_eq!(board, GameBoard::default());
    }

    #[test]
    fn registration_is_row_major() {
        let board = GameBoard::new(BoardOptions {
            rows: 2,
            cols: 3,
            bubble_size: 10.0,
        })
        .unwrap();
        let mut registry = Collect::default();

        board.register_screen(&mut registry);

        let centers: Vec<_> = registry.bubbles.iter().map(Bubble::center).collect();
        assert_eq!(
            centers,
            vec![
                Vec2::new(10.0, 10.0),
                Vec2::new(30.0, 10.0),
                Vec2::new(50.0, 10.0),
                Vec2::new(10.0, 30.0),
                Vec2::new(30.0, 30.0),
                Vec2::new(50.0, 30.0),
            ]
        );
        assert!(registry.bubbles.iter().all(|b| !b.is_popped() && b.radius() == 10.0));
        assert_eq!(registry.dimensions, Some((60, 40)));
    }

    #[rstest]
    #[case(BoardOptions { rows: 0, cols: 6, bubble_size: 25.0 }, BoardError::EmptyGrid { rows: 0, cols: 6 })]
    #[case(BoardOptions { rows: 5, cols: 0, bubble_size: 25.0 }, BoardError::EmptyGrid { rows: 5, cols: 0 })]
    #[case(BoardOptions { rows: 5, cols: 6, bubble_size: -1.0 }, BoardError::InvalidBubbleSize(-1.0))]
    #[case(BoardOptions { rows: 5, cols: 6, bubble_size: 0.0 }, BoardError::InvalidBubbleSize(0.0))]
    #[case(
        BoardOptions { rows: 1, cols: 1000, bubble_size: 25.0 },
        BoardError::SurfaceTooLarge { width: 50_000.0, height: 50.0 }
    )]
    fn invalid_options_are_rejected(#[case] options: BoardOptions, #[case] expected: BoardError) {
        assert_eq!(GameBoard::new(options), Err(expected));
    }

    #[test]
    fn nan_size_is_rejected() {
        let options = BoardOptions {
            bubble_size: f32::NAN,
            ..BoardOptions::default()
        };
        assert!(matches!(GameBoard::new(options), Err(BoardError::InvalidBubbleSize(_))));
    }
}
