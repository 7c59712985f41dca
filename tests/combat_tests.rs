mod common;

use broadside::{AttackKind, Coord, GameError, MatchStatus, PlayerSlot};
use common::{playing_match, standard_fleet_cells, water_cells};

#[test]
fn miss_passes_the_turn() {
    let mut m = playing_match();
    let (outcome, entry) = m
        .resolve_attack(PlayerSlot::A, Coord::new(3, 3), AttackKind::Normal)
        .unwrap();
    assert_eq!(outcome.hits, 0);
    assert!(!outcome.ended);
    assert_eq!(m.current_turn(), Some(PlayerSlot::B));
    assert_eq!(m.board(PlayerSlot::A).shots().len(), 1);
    assert!(!m.board(PlayerSlot::A).shots()[0].hit);
    assert_eq!(entry.sequence, 1);
    assert!(!entry.hit);
}

#[test]
fn hit_marks_the_ship_and_sinks_on_last_cell() {
    let mut m = playing_match();
    m.resolve_attack(PlayerSlot::A, Coord::new(0, 8), AttackKind::Normal)
        .unwrap();
    let destroyer = &m.board(PlayerSlot::B).ships()[4];
    assert_eq!(destroyer.hit_mask(), &[true, false]);
    assert!(!destroyer.is_sunk());

    m.resolve_attack(PlayerSlot::B, Coord::new(9, 9), AttackKind::Normal)
        .unwrap();
    let (outcome, _) = m
        .resolve_attack(PlayerSlot::A, Coord::new(1, 8), AttackKind::Normal)
        .unwrap();
    assert_eq!(outcome.sunk, vec!["destroyer".to_string()]);
    assert!(m.board(PlayerSlot::B).ships()[4].is_sunk());
    assert_eq!(m.board(PlayerSlot::B).remaining_ships(), 4);
}

#[test]
fn only_the_player_to_move_may_attack() {
    let mut m = playing_match();
    let before = m.clone();
    assert_eq!(
        m.resolve_attack(PlayerSlot::B, Coord::new(0, 0), AttackKind::Normal),
        Err(GameError::NotYourTurn)
    );
    assert_eq!(m, before);
}

#[test]
fn attacks_outside_playing_are_wrong_phase() {
    let mut m = broadside::Match::new(broadside::MatchId(1), "X", common::alice());
    assert_eq!(
        m.resolve_attack(PlayerSlot::A, Coord::new(0, 0), AttackKind::Normal),
        Err(GameError::WrongPhase)
    );
}

#[test]
fn off_board_attack_is_rejected() {
    let mut m = playing_match();
    assert_eq!(
        m.resolve_attack(PlayerSlot::A, Coord::new(10, 2), AttackKind::Normal),
        Err(GameError::OutOfBounds(Coord::new(10, 2)))
    );
}

#[test]
fn repeating_a_cell_is_rejected_without_side_effects() {
    let mut m = playing_match();
    m.resolve_attack(PlayerSlot::A, Coord::new(5, 5), AttackKind::Normal)
        .unwrap();
    m.resolve_attack(PlayerSlot::B, Coord::new(5, 5), AttackKind::Normal)
        .unwrap();
    let before = m.clone();
    assert_eq!(
        m.resolve_attack(PlayerSlot::A, Coord::new(5, 5), AttackKind::Normal),
        Err(GameError::DuplicateAttack(Coord::new(5, 5)))
    );
    assert_eq!(m, before);
}

#[test]
fn bomb_overlapping_a_previous_shot_is_rejected_whole() {
    let mut m = playing_match();
    m.resolve_attack(PlayerSlot::A, Coord::new(6, 5), AttackKind::Normal)
        .unwrap();
    m.resolve_attack(PlayerSlot::B, Coord::new(9, 9), AttackKind::Normal)
        .unwrap();
    let before = m.clone();
    assert_eq!(
        m.resolve_attack(PlayerSlot::A, Coord::new(5, 5), AttackKind::Special),
        Err(GameError::DuplicateAttack(Coord::new(6, 5)))
    );
    assert_eq!(m, before);
    assert_eq!(m.board(PlayerSlot::A).special_charges(), 2);
}

#[test]
fn bomb_strikes_the_clipped_area_and_costs_one_charge() {
    let mut m = playing_match();
    // Centre (1, 1): area x 0..=2, y 0..=2 covers carrier cells (0..=2, 0)
    // and battleship cells (0..=2, 2).
    let (outcome, entry) = m
        .resolve_attack(PlayerSlot::A, Coord::new(1, 1), AttackKind::Special)
        .unwrap();
    assert_eq!(outcome.shots.len(), 9);
    assert_eq!(outcome.hits, 6);
    assert!(outcome.shots.iter().all(|s| s.kind == AttackKind::Special));
    assert_eq!(m.board(PlayerSlot::A).special_charges(), 1);
    assert_eq!(m.board(PlayerSlot::A).shots().len(), 9);
    assert_eq!(entry.coord, Coord::new(1, 1));
    assert_eq!(entry.kind, AttackKind::Special);
    assert!(entry.hit);
}

#[test]
fn corner_bomb_fires_four_shots() {
    let mut m = playing_match();
    let (outcome, _) = m
        .resolve_attack(PlayerSlot::A, Coord::new(0, 0), AttackKind::Special)
        .unwrap();
    assert_eq!(outcome.shots.len(), 4);
}

#[test]
fn missing_bomb_still_costs_a_charge() {
    let mut m = playing_match();
    let (outcome, entry) = m
        .resolve_attack(PlayerSlot::A, Coord::new(5, 1), AttackKind::Special)
        .unwrap();
    // Rows 0 and 2 at x 4..=6: carrier covers (4, 0) only.
    assert_eq!(outcome.hits, 1);
    assert!(entry.hit);

    m.resolve_attack(PlayerSlot::B, Coord::new(8, 5), AttackKind::Special)
        .unwrap();
    assert_eq!(m.board(PlayerSlot::B).special_charges(), 1);

    let (outcome, entry) = m
        .resolve_attack(PlayerSlot::A, Coord::new(8, 7), AttackKind::Special)
        .unwrap();
    assert_eq!(outcome.hits, 0);
    assert!(!entry.hit);
    assert_eq!(m.board(PlayerSlot::A).special_charges(), 0);
}

#[test]
fn third_bomb_has_no_charge() {
    let mut m = playing_match();
    let centres = [Coord::new(1, 1), Coord::new(5, 5)];
    let replies = [Coord::new(9, 1), Coord::new(9, 3)];
    for (c, r) in centres.iter().zip(replies.iter()) {
        m.resolve_attack(PlayerSlot::A, *c, AttackKind::Special).unwrap();
        m.resolve_attack(PlayerSlot::B, *r, AttackKind::Normal).unwrap();
    }
    let before = m.clone();
    assert_eq!(
        m.resolve_attack(PlayerSlot::A, Coord::new(8, 8), AttackKind::Special),
        Err(GameError::NoChargesRemaining)
    );
    assert_eq!(m, before);
    // Normal attacks are unaffected.
    m.resolve_attack(PlayerSlot::A, Coord::new(8, 8), AttackKind::Normal)
        .unwrap();
}

#[test]
fn sinking_the_last_ship_finishes_the_match() {
    let mut m = playing_match();
    let targets = standard_fleet_cells();
    let mut water = water_cells().into_iter();
    let last = targets.len() - 1;
    for (i, target) in targets.iter().enumerate() {
        let (outcome, entry) = m
            .resolve_attack(PlayerSlot::A, *target, AttackKind::Normal)
            .unwrap();
        assert_eq!(outcome.ended, i == last);
        assert_eq!(entry.sequence, m.moves_made());
        if i < last {
            assert_eq!(m.status(), MatchStatus::Playing);
            m.resolve_attack(PlayerSlot::B, water.next().unwrap(), AttackKind::Normal)
                .unwrap();
        }
    }
    assert_eq!(m.status(), MatchStatus::Finished);
    assert_eq!(m.winner(), Some(PlayerSlot::A));
    assert_eq!(m.winner_player(), Some(&common::alice()));
    assert_eq!(m.current_turn(), None);
    assert!(m.board(PlayerSlot::B).all_sunk());
    assert_eq!(m.moves_made(), 2 * targets.len() as u64 - 1);

    let before = m.clone();
    assert_eq!(
        m.resolve_attack(PlayerSlot::B, Coord::new(9, 9), AttackKind::Normal),
        Err(GameError::WrongPhase)
    );
    assert_eq!(m, before);
}
