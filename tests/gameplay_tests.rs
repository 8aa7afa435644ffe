//! Gameplay integration tests.
//!
//! These tests drive full sessions through the public API: selection
//! guards, move counting, mismatch timing, win detection, and the
//! best-score lifecycle across restarts.

use match_pairs::{
    CardId, FaceKey, GameConfig, GameSession, MemoryStore, RejectReason, ScoreStore,
    SelectOutcome, BEST_SCORE_KEY,
};

fn config(face_count: usize) -> GameConfig {
    GameConfig::new((0..face_count).map(|i| format!("asset-{i}.png")).collect())
}

fn session(face_count: usize, seed: u64) -> GameSession<MemoryStore> {
    GameSession::new(config(face_count), seed, MemoryStore::new())
}

/// Both ids carrying the given face in the current deck.
fn pair<S: ScoreStore>(session: &GameSession<S>, face: u16) -> (CardId, CardId) {
    let ids: Vec<CardId> = session
        .deck()
        .iter()
        .filter(|c| c.face == FaceKey::new(face))
        .map(|c| c.id)
        .collect();
    assert_eq!(ids.len(), 2, "every face occurs exactly twice");
    (ids[0], ids[1])
}

/// Match every pair in face order, returning the number of moves spent.
fn clear_deck<S: ScoreStore>(session: &mut GameSession<S>) -> u32 {
    let before = session.moves();
    for face in 0..session.total_pairs() as u16 {
        let (a, b) = pair(session, face);
        assert_eq!(session.select(a), SelectOutcome::FirstRevealed);
        let won = session.matches_found() as usize + 1 == session.total_pairs();
        assert_eq!(session.select(b), SelectOutcome::Matched { won });
    }
    session.moves() - before
}

/// Deliberately mismatch once (face 0 against face 1) and flip back.
fn mismatch_once<S: ScoreStore>(session: &mut GameSession<S>) {
    let (a, _) = pair(session, 0);
    let (b, _) = pair(session, 1);
    assert_eq!(session.select(a), SelectOutcome::FirstRevealed);
    let ticket = match session.select(b) {
        SelectOutcome::Mismatched(ticket) => ticket,
        other => panic!("expected mismatch, got {other:?}"),
    };
    assert!(session.flip_back(ticket));
}

// =============================================================================
// Move counting
// =============================================================================

/// A lone selection never increments moves; every completed pair
/// comparison increments exactly once.
#[test]
fn test_single_selection_is_not_a_move() {
    let mut session = session(4, 11);

    let (a, _) = pair(&session, 0);
    session.select(a);

    assert_eq!(session.moves(), 0);
}

/// 8 selections resolve as exactly 4 move increments.
#[test]
fn test_move_counting() {
    let mut session = session(4, 11);

    clear_deck(&mut session);

    assert_eq!(session.moves(), 4);
}

#[test]
fn test_no_premature_match() {
    let mut session = session(3, 5);
    let (a, _) = pair(&session, 0);

    session.select(a);

    // A revealed-but-unresolved card is never matched
    assert!(!session.deck().card(a).unwrap().matched);
    assert_eq!(session.matches_found(), 0);
}

#[test]
fn test_mismatches_count_as_moves() {
    let mut session = session(3, 5);

    mismatch_once(&mut session);
    assert_eq!(session.moves(), 1);
    assert_eq!(session.matches_found(), 0);

    mismatch_once(&mut session);
    assert_eq!(session.moves(), 2);
}

// =============================================================================
// Mismatch window
// =============================================================================

#[test]
fn test_mismatch_reset_leaves_cards_selectable() {
    let mut session = session(3, 9);
    let (a, _) = pair(&session, 0);
    let (b, _) = pair(&session, 1);

    session.select(a);
    let SelectOutcome::Mismatched(ticket) = session.select(b) else {
        panic!("expected mismatch");
    };

    // Window open: both face-up, session locked
    assert!(session.locked());
    assert!(session.deck().card(a).unwrap().revealed);
    assert!(session.deck().card(b).unwrap().revealed);

    assert!(session.flip_back(ticket));

    // Window closed: both hidden, both independently selectable again
    assert!(!session.locked());
    assert!(!session.deck().card(a).unwrap().revealed);
    assert!(!session.deck().card(b).unwrap().revealed);
    assert_eq!(session.select(b), SelectOutcome::FirstRevealed);
    assert!(matches!(
        session.select(a),
        SelectOutcome::Mismatched(_)
    ));
}

// =============================================================================
// Win and best score (5 pairs in 6 moves, then 8, then a 4-move win)
// =============================================================================

#[test]
fn test_win_best_score_scenario() {
    let mut store = MemoryStore::new();

    // Session 1: one mismatch + 5 matches = 6 moves, prior best none
    let mut session = GameSession::new(config(5), 42, &mut store);
    assert_eq!(session.best_score(), None);

    mismatch_once(&mut session);
    clear_deck(&mut session);

    assert!(session.won());
    assert_eq!(session.matches_found(), 5);
    assert_eq!(session.moves(), 6);
    assert_eq!(session.best_score(), Some(6));

    // Session 2: three mismatches + 5 matches = 8 moves, best unchanged
    session.restart();
    for _ in 0..3 {
        mismatch_once(&mut session);
    }
    clear_deck(&mut session);

    assert!(session.won());
    assert_eq!(session.moves(), 8);
    assert_eq!(session.best_score(), Some(6));
    drop(session);

    // Session 3: a 4-pair deck completed perfectly in 4 moves updates best
    let mut session = GameSession::new(config(4), 7, &mut store);
    assert_eq!(session.best_score(), Some(6)); // carried over from the store

    clear_deck(&mut session);

    assert!(session.won());
    assert_eq!(session.moves(), 4);
    assert_eq!(session.best_score(), Some(4));
    drop(session);

    assert_eq!(store.get(BEST_SCORE_KEY), Some(4));
}

#[test]
fn test_restart_is_idempotent_on_best_score() {
    let mut session = session(3, 3);
    clear_deck(&mut session);
    assert_eq!(session.best_score(), Some(3));

    session.restart();
    session.restart();

    assert_eq!(session.moves(), 0);
    assert_eq!(session.matches_found(), 0);
    assert_eq!(session.deck().len(), 6);
    assert_eq!(session.best_score(), Some(3));
}

// =============================================================================
// Superseded-delay safety
// =============================================================================

/// A mismatch ticket fired after restart must not mutate the new deck.
#[test]
fn test_superseded_ticket_cannot_touch_new_deck() {
    let mut session = session(3, 13);
    let (a, _) = pair(&session, 0);
    let (b, _) = pair(&session, 1);

    session.select(a);
    let SelectOutcome::Mismatched(ticket) = session.select(b) else {
        panic!("expected mismatch");
    };
    assert_eq!(ticket.generation, session.generation());

    session.restart();
    assert_ne!(ticket.generation, session.generation());

    let before = session.snapshot();
    assert!(!session.flip_back(ticket));
    assert_eq!(session.snapshot(), before);

    // The new deck plays normally afterwards
    let (a, b) = pair(&session, 0);
    session.select(a);
    assert_eq!(session.select(b), SelectOutcome::Matched { won: false });
}

#[test]
fn test_selection_during_window_is_rejected() {
    let mut session = session(3, 17);
    let (a, _) = pair(&session, 0);
    let (b, _) = pair(&session, 1);
    let (c, _) = pair(&session, 2);

    session.select(a);
    let SelectOutcome::Mismatched(ticket) = session.select(b) else {
        panic!("expected mismatch");
    };

    assert_eq!(
        session.select(c),
        SelectOutcome::Rejected(RejectReason::Locked)
    );
    assert_eq!(session.moves(), 1);

    assert!(session.flip_back(ticket));
    assert_eq!(session.select(c), SelectOutcome::FirstRevealed);
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn test_snapshot_is_detached_from_session() {
    let mut session = session(3, 21);
    let before = session.snapshot();

    let (a, b) = pair(&session, 0);
    session.select(a);
    session.select(b);

    // The earlier snapshot is unaffected by later commands
    assert_eq!(before.moves, 0);
    assert!(before.deck.iter().all(|c| !c.matched && !c.revealed));

    let after = session.snapshot();
    assert_eq!(after.moves, 1);
    assert_eq!(after.matches_found, 1);
    assert_eq!(after.scores(), session.scores());
}

#[test]
fn test_snapshot_serializes_for_adapters() {
    let session = session(2, 2);
    let snapshot = session.snapshot();

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: match_pairs::Snapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, snapshot);
}
