//! Deck generation and lookup.
//!
//! A deck is built by pairing each face twice (fresh unique ids per
//! card) and shuffling the result with an unbiased Fisher-Yates. Decks
//! are replaced wholesale on restart, never partially regenerated.
//!
//! Backed by `im::Vector` so per-command snapshots clone the deck in
//! O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardIdAllocator, FaceKey};
use super::rng::GameRng;

/// An ordered, shuffled deck of paired cards.
///
/// Invariants (generation postconditions, verified by tests):
/// - length is `2 * face_count`
/// - every `FaceKey` in `0..face_count` occurs exactly twice
/// - all ids are distinct
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Generate a shuffled deck of `2 * face_count` face-down cards.
    ///
    /// Each face produces two cards with fresh ids from `ids`. Ids are
    /// never shared between generations as long as the same allocator
    /// is reused.
    #[must_use]
    pub fn generate(face_count: usize, ids: &mut CardIdAllocator, rng: &mut GameRng) -> Self {
        let mut cards = Vec::with_capacity(face_count * 2);
        for face in 0..face_count {
            let face = FaceKey::new(face as u16);
            cards.push(Card::face_down(ids.alloc(), face));
            cards.push(Card::face_down(ids.alloc(), face));
        }
        rng.shuffle(&mut cards);

        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the deck empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    /// Iterate over cards in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Get the card at a deck position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Find a card's deck position by id.
    #[must_use]
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Find a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// The underlying persistent vector, for O(1) snapshot clones.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Flip a card face-up or face-down. Unknown ids are ignored.
    pub(crate) fn set_revealed(&mut self, id: CardId, revealed: bool) {
        if let Some(index) = self.position(id) {
            if let Some(card) = self.cards.get_mut(index) {
                card.revealed = revealed;
            }
        }
    }

    /// Mark a card as matched. Matched cards stay revealed so they
    /// render face-up without flicker.
    pub(crate) fn set_matched(&mut self, id: CardId) {
        if let Some(index) = self.position(id) {
            if let Some(card) = self.cards.get_mut(index) {
                card.matched = true;
                card.revealed = true;
            }
        }
    }
}
