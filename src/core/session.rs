//! The selection/match state machine.
//!
//! ## Command flow
//!
//! A presentation adapter issues `select(card_id)`; the session
//! validates, mutates, and reports the transition through
//! `SelectOutcome`. Adapters drive side effects (sound, confetti,
//! persistence) off the outcome delta, not polled state.
//!
//! ## Timing model
//!
//! Single-threaded, command-at-a-time. The only suspension point is
//! the mismatch flip delay, which the core does not wait out itself:
//! a mismatch returns a `FlipTicket` stamped with the current deck
//! generation, the host schedules the delay, then calls `flip_back`.
//! `restart` bumps the generation, so a ticket from a superseded deck
//! fires as a silent no-op and can never mutate the new deck. `locked`
//! rejects selections while a ticket is outstanding, so no two
//! resolutions ever overlap.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::card::{CardId, CardIdAllocator};
use super::config::{GameConfig, BEST_SCORE_KEY};
use super::deck::Deck;
use super::rng::GameRng;
use super::snapshot::{ScoreView, Snapshot};
use crate::store::ScoreStore;

/// Why a `select` command was rejected.
///
/// Rejections are expected normal operation (rapid or racy clicks),
/// never failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// A pending pair is still being resolved.
    Locked,
    /// No card with that id in the current deck.
    NotFound,
    /// The card was already matched.
    AlreadyMatched,
    /// The card is already face-up (including the pending first pick).
    AlreadyRevealed,
    /// Both selections are already populated.
    PairPending,
}

/// Deferred flip-back handle for a mismatched pair.
///
/// The host owns the delay: wait `delay_ms`, then call
/// `GameSession::flip_back` with this ticket. Tickets from a
/// superseded deck generation are silent no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipTicket {
    /// First card of the mismatched pair.
    pub first: CardId,
    /// Second card of the mismatched pair.
    pub second: CardId,
    /// Deck generation this ticket was issued for.
    pub generation: u32,
    /// How long the pair should stay face-up, in milliseconds.
    pub delay_ms: u32,
}

/// Transition delta reported by `select`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The command was a no-op.
    Rejected(RejectReason),
    /// The card became the first pick and is now face-up.
    FirstRevealed,
    /// Second pick completed a matching pair. `won` is true when this
    /// match completed the whole deck.
    Matched {
        /// Did this match win the session?
        won: bool,
    },
    /// Second pick completed a non-matching pair; the host must
    /// schedule the ticket.
    Mismatched(FlipTicket),
}

/// A single game session: deck, selection state, and derived counters.
///
/// The best score is loaded from the injected `ScoreStore` at
/// construction and written back whenever a won session improves it.
/// Store failures are logged and swallowed - they never block gameplay.
pub struct GameSession<S: ScoreStore> {
    config: GameConfig,
    deck: Deck,
    first: Option<CardId>,
    second: Option<CardId>,
    locked: bool,
    moves: u32,
    matches_found: u32,
    best_score: Option<u32>,
    won: bool,
    /// Monotonic deck generation (increments on restart).
    generation: u32,
    ids: CardIdAllocator,
    rng: GameRng,
    store: S,
}

impl<S: ScoreStore> GameSession<S> {
    /// Create a session with a fresh shuffled deck and zeroed counters.
    ///
    /// The best score is loaded from `store`; an unavailable store
    /// falls back to `None`.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64, store: S) -> Self {
        let mut ids = CardIdAllocator::new();
        let mut rng = GameRng::new(seed);
        let deck = Deck::generate(config.face_count(), &mut ids, &mut rng);

        let best_score = match store.load(BEST_SCORE_KEY) {
            Ok(best) => best,
            Err(error) => {
                warn!(%error, "best score unavailable, starting without one");
                None
            }
        };

        Self {
            config,
            deck,
            first: None,
            second: None,
            locked: false,
            moves: 0,
            matches_found: 0,
            best_score,
            won: false,
            generation: 0,
            ids,
            rng,
            store,
        }
    }

    /// Create a session seeded from the host's entropy source.
    #[must_use]
    pub fn from_entropy(config: GameConfig, store: S) -> Self {
        Self::new(config, rand::random(), store)
    }

    // === Commands ===

    /// Select a card.
    ///
    /// Invalid selections (locked session, unknown/matched/revealed
    /// card, pair already pending) are rejected as no-ops. A valid
    /// pick is revealed in the deck immediately and stays face-up
    /// while any comparison is pending - the player sees both chosen
    /// cards during resolution.
    pub fn select(&mut self, id: CardId) -> SelectOutcome {
        if self.locked {
            return SelectOutcome::Rejected(RejectReason::Locked);
        }
        let Some(card) = self.deck.card(id).copied() else {
            return SelectOutcome::Rejected(RejectReason::NotFound);
        };
        if card.matched {
            return SelectOutcome::Rejected(RejectReason::AlreadyMatched);
        }
        if card.revealed {
            return SelectOutcome::Rejected(RejectReason::AlreadyRevealed);
        }
        if self.first.is_some() && self.second.is_some() {
            return SelectOutcome::Rejected(RejectReason::PairPending);
        }

        self.deck.set_revealed(id, true);

        match self.first {
            None => {
                self.first = Some(id);
                debug!(card = %id, "first pick revealed");
                SelectOutcome::FirstRevealed
            }
            Some(first) => {
                self.second = Some(id);
                debug!(card = %id, "second pick revealed, resolving");
                self.resolve(first, id)
            }
        }
    }

    /// Flip a mismatched pair back face-down.
    ///
    /// This is the deferred callback scheduled by the host after a
    /// `Mismatched` outcome. Returns `true` if the flip-back applied;
    /// a ticket from a superseded generation (or one already consumed)
    /// is a silent no-op returning `false`.
    pub fn flip_back(&mut self, ticket: FlipTicket) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "stale flip ticket ignored"
            );
            return false;
        }
        if !self.locked
            || self.first != Some(ticket.first)
            || self.second != Some(ticket.second)
        {
            return false;
        }

        self.deck.set_revealed(ticket.first, false);
        self.deck.set_revealed(ticket.second, false);
        self.first = None;
        self.second = None;
        self.locked = false;
        debug!(first = %ticket.first, second = %ticket.second, "mismatched pair hidden");
        true
    }

    /// Start over with a fresh deck.
    ///
    /// Clears the selection and zeroes `moves` and `matches_found`;
    /// the best score survives. Bumping the generation invalidates any
    /// in-flight `FlipTicket` from the previous deck.
    pub fn restart(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.deck = Deck::generate(self.config.face_count(), &mut self.ids, &mut self.rng);
        self.first = None;
        self.second = None;
        self.locked = false;
        self.moves = 0;
        self.matches_found = 0;
        self.won = false;
        debug!(generation = self.generation, "session restarted");
    }

    // === Resolution ===

    /// Resolve a completed pair. Runs exactly once per second pick.
    fn resolve(&mut self, first: CardId, second: CardId) -> SelectOutcome {
        self.locked = true;
        self.moves += 1;

        let faces_match = match (self.deck.card(first), self.deck.card(second)) {
            (Some(a), Some(b)) => a.face == b.face,
            _ => false,
        };

        if faces_match {
            // Matches resolve synchronously so the pair stays visibly
            // revealed without flicker.
            self.deck.set_matched(first);
            self.deck.set_matched(second);
            self.matches_found += 1;
            self.first = None;
            self.second = None;
            self.locked = false;

            let won = self.matches_found as usize == self.deck.total_pairs();
            if won {
                self.won = true;
                self.update_best_score();
            }
            debug!(moves = self.moves, matches = self.matches_found, won, "pair matched");
            SelectOutcome::Matched { won }
        } else {
            // Stay locked until the host fires the ticket.
            let ticket = FlipTicket {
                first,
                second,
                generation: self.generation,
                delay_ms: self.config.flip_delay_ms(),
            };
            debug!(moves = self.moves, "pair mismatched, awaiting flip-back");
            SelectOutcome::Mismatched(ticket)
        }
    }

    /// Fold the finished session into the best score and persist it.
    ///
    /// Saves are idempotent; a failing store leaves the in-memory
    /// value in place.
    fn update_best_score(&mut self) {
        let improved = self.best_score.map_or(true, |best| self.moves < best);
        if !improved {
            return;
        }

        self.best_score = Some(self.moves);
        if let Err(error) = self.store.save(BEST_SCORE_KEY, self.moves) {
            warn!(%error, "best score not persisted, keeping in-memory value");
        }
    }

    // === Observers ===

    /// Immutable snapshot for presentation adapters. O(1) deck clone.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            deck: self.deck.cards().clone(),
            moves: self.moves,
            matches_found: self.matches_found,
            best_score: self.best_score,
            locked: self.locked,
            total_pairs: self.deck.total_pairs(),
            won: self.won,
        }
    }

    /// Score tracker façade over the same fields the snapshot exposes.
    #[must_use]
    pub fn scores(&self) -> ScoreView {
        ScoreView {
            moves: self.moves,
            matches_found: self.matches_found,
            best_score: self.best_score,
        }
    }

    /// The current deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Is a pending pair being resolved?
    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Completed pair comparisons this session.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Confirmed matches this session.
    #[must_use]
    pub fn matches_found(&self) -> u32 {
        self.matches_found
    }

    /// Minimum moves across all won sessions, if any.
    #[must_use]
    pub fn best_score(&self) -> Option<u32> {
        self.best_score
    }

    /// Has every pair been matched?
    #[must_use]
    pub fn won(&self) -> bool {
        self.won
    }

    /// Current deck generation (increments on restart).
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of pairs in the deck.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.deck.total_pairs()
    }

    /// The injected persistence collaborator.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
