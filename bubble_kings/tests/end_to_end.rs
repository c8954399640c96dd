use bevy::math::Vec2;
use bubble_kings::board::{BoardOptions, GameBoard};
use bubble_kings::bubbles::{BubbleId, PlayerId};
use bubble_kings::particles::SPLAT_PARTICLES;
use bubble_kings::render::PixelCanvas;
use bubble_kings::screen::{BubbleScreen, ManualClock};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn single_bubble_screen(player: PlayerId) -> BubbleScreen<PixelCanvas> {
    let board = GameBoard::new(BoardOptions {
        rows: 1,
        cols: 1,
        bubble_size: 10.0,
    })
    .unwrap();
    BubbleScreen::new(&board, PixelCanvas::new(0, 0), player, StdRng::seed_from_u64(42))
}

#[test]
fn popped_bubble_bursts_then_fades() {
    let mut screen = single_bubble_screen(PlayerId::Blue);
    assert_eq!((screen.width(), screen.height()), (20, 20));

    let popped = screen.click(Vec2::new(10.0, 10.0));
    assert_eq!(popped, vec![BubbleId(0)]);
    assert_eq!(
        screen.bubble(BubbleId(0)).and_then(|b| b.was_popped_by()),
        Some(PlayerId::Blue)
    );

    screen.step(16.0);
    let splat = screen.renderers()[0].splat().unwrap();
    assert_eq!(splat.len(), SPLAT_PARTICLES);

    // Longest possible particle life is under 125ms
    for _ in 0..8 {
        screen.step(16.0);
    }
    assert!(screen.renderers()[0].splat().unwrap().is_empty());

    // Further frames keep the empty splat and never rebuild it
    screen.step(16.0);
    assert!(screen.renderers()[0].splat().unwrap().is_empty());
}

#[test]
fn clock_driven_run_until_stopped() {
    let mut screen = single_bubble_screen(PlayerId::Red);
    let mut clock = ManualClock::new(1_000.0, 16.0);

    assert_eq!(screen.run(&mut clock, Some(3)), 3);
    assert!(screen.renderers()[0].has_drawn_unpopped());
    assert_eq!(screen.delta(), 16.0);

    let handle = screen.stop_handle();
    handle.stop();
    assert!(!screen.is_running());
    assert!(!screen.on_frame(clock.now()));
    assert_eq!(screen.frames(), 3);
}

#[test]
fn second_click_on_a_popped_bubble_changes_nothing() {
    let mut screen = single_bubble_screen(PlayerId::Green);
    assert_eq!(screen.click(Vec2::new(10.0, 10.0)).len(), 1);

    screen.set_player(PlayerId::Red);
    assert!(screen.click(Vec2::new(10.0, 10.0)).is_empty());
    assert!(!screen.pop_bubble(0, PlayerId::Red));
    assert_eq!(
        screen.bubble(BubbleId(0)).and_then(|b| b.was_popped_by()),
        Some(PlayerId::Green)
    );
}
