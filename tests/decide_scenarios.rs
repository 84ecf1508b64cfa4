// End-to-end decision scenarios driven through the public Pilot API.

use snake_pilot::board::Board;
use snake_pilot::config::Config;
use snake_pilot::pilot::{Decision, Pilot};
use snake_pilot::types::{Coord, Direction};

fn config_with(resumable: bool, max_suspensions: usize) -> Config {
    let mut config = Config::default_hardcoded();
    config.search.resumable = resumable;
    config.search.max_suspensions_per_tick = max_suspensions;
    config
}

#[test]
fn empty_board_heads_for_the_apple() {
    // 4x4 fully empty grid, single-segment snake at the origin, apple in the
    // far corner: the move must approach the apple. The weighted tie-break
    // favors the vertical axis, so it is Down.
    let board = Board::from_body(4, vec![Coord::new(0, 0)], 1);
    let mut pilot = Pilot::new(config_with(false, 64));
    pilot.set_target(Coord::new(3, 3));

    match pilot.decide(&board, None) {
        Decision::Move(dir) => {
            assert_eq!(dir, Direction::Down);
            assert_ne!(dir, Direction::Up);
            assert_ne!(dir, Direction::Left);
        }
        other => panic!("expected a move, got {:?}", other),
    }
}

#[test]
fn never_steps_onto_the_tail_when_another_way_out_exists() {
    // The tail sits where the straight move points; the one open cell below
    // must win.
    let board = Board::from_body(
        5,
        vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(1, 1)],
        3,
    );
    let mut pilot = Pilot::new(config_with(false, 64));
    pilot.set_target(Coord::new(3, 0));

    assert_eq!(pilot.decide(&board, None), Decision::Move(Direction::Down));
}

#[test]
fn enclosed_head_reports_the_blocked_naive_direction() {
    // Width-one pocket with the snake's own body at every way out: no
    // viable direction remains, so the pilot reports the naive direction
    // and the board owner detects the collision on the next step.
    let board = Board::from_body(
        5,
        vec![
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(1, 1),
            Coord::new(1, 0),
        ],
        4,
    );
    let mut pilot = Pilot::new(config_with(false, 64));
    pilot.set_target(Coord::new(4, 4));

    let decision = pilot.decide(&board, None);
    assert_eq!(decision, Decision::Move(Direction::Down));

    let mut board = board;
    assert_eq!(
        board.step(Direction::Down),
        snake_pilot::board::StepOutcome::Died
    );
}

/// Board where the body walls off a six-cell pocket in the top-left and the
/// corrected naive move would step into it while the apple sits outside:
/// exactly the situation that must wake the full search.
fn pocket_board() -> Board {
    Board::from_body(
        6,
        vec![
            Coord::new(0, 2),
            Coord::new(1, 2),
            Coord::new(2, 2),
            Coord::new(3, 2),
            Coord::new(3, 1),
            Coord::new(3, 0),
        ],
        6,
    )
}

#[test]
fn search_steers_away_from_a_dead_pocket() {
    let board = pocket_board();
    let mut pilot = Pilot::new(config_with(false, 64));
    pilot.set_target(Coord::new(4, 0));

    // Up leads into the pocket; the search must pick the open side instead.
    match pilot.decide(&board, None) {
        Decision::Move(dir) => {
            assert_ne!(dir, Direction::Up);
            assert_eq!(dir, Direction::Down);
        }
        other => panic!("expected a move, got {:?}", other),
    }
}

#[test]
fn decisions_are_deterministic() {
    for _ in 0..3 {
        let board = pocket_board();
        let mut first = Pilot::new(config_with(false, 64));
        first.set_target(Coord::new(4, 0));
        let mut second = Pilot::new(config_with(false, 64));
        second.set_target(Coord::new(4, 0));

        assert_eq!(first.decide(&board, None), second.decide(&board, None));
    }
}

#[test]
fn suspended_search_resumes_to_the_same_move() {
    let board = pocket_board();

    // Synchronous reference run.
    let mut reference = Pilot::new(config_with(false, 64));
    reference.set_target(Coord::new(4, 0));
    let expected = reference.decide(&board, None);

    // Starved budget: two suspensions per tick forces the pilot to hand back
    // resume tokens while the board stays frozen.
    let mut pilot = Pilot::new(config_with(true, 2));
    pilot.set_target(Coord::new(4, 0));

    let mut resume = None;
    let mut pending_ticks = 0;
    let decision = loop {
        match pilot.decide(&board, resume.take()) {
            Decision::Searching(cursor) => {
                pending_ticks += 1;
                assert!(pending_ticks < 1000, "search never completed");
                resume = Some(cursor);
            }
            done => break done,
        }
    };

    assert!(pending_ticks > 0, "expected at least one suspended tick");
    assert_eq!(decision, expected);
}
