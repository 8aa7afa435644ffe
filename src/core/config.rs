//! Game configuration.
//!
//! Hosts configure a session at startup by providing the face assets
//! (one per pair) and, optionally, the mismatch flip delay. The engine
//! never interprets asset references - they're opaque strings handed
//! back to presentation adapters through `face_asset`.

use serde::{Deserialize, Serialize};

use super::card::FaceKey;

/// Persistence key for the best score (a single fixed scalar).
pub const BEST_SCORE_KEY: &str = "bestScore";

/// Default mismatch flip delay in milliseconds.
///
/// The "memorization window": how long a mismatched pair stays face-up
/// before the host flips it back.
pub const DEFAULT_FLIP_DELAY_MS: u32 = 800;

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use match_pairs::core::{FaceKey, GameConfig};
///
/// let config = GameConfig::new(vec![
///     "books.jpg".into(),
///     "violin.jpg".into(),
///     "shoes.jpg".into(),
/// ])
/// .with_flip_delay_ms(500);
///
/// assert_eq!(config.face_count(), 3);
/// assert_eq!(config.face_asset(FaceKey::new(1)), Some("violin.jpg"));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Face asset references, one per pair. `FaceKey` indexes this list.
    faces: Vec<String>,

    /// Mismatch flip delay in milliseconds.
    flip_delay_ms: u32,
}

impl GameConfig {
    /// Create a configuration from distinct face assets.
    ///
    /// ## Panics
    ///
    /// Panics if `faces` is empty, holds duplicates, or exceeds the
    /// `FaceKey` range. A malformed face list is a programmer error,
    /// not a runtime-recoverable condition.
    #[must_use]
    pub fn new(faces: Vec<String>) -> Self {
        assert!(!faces.is_empty(), "Must have at least one face");
        assert!(
            faces.len() <= u16::MAX as usize,
            "At most 65535 faces supported"
        );
        for (i, face) in faces.iter().enumerate() {
            assert!(
                !faces[..i].contains(face),
                "Face assets must be distinct: {face:?}"
            );
        }

        Self {
            faces,
            flip_delay_ms: DEFAULT_FLIP_DELAY_MS,
        }
    }

    /// Set the mismatch flip delay.
    #[must_use]
    pub fn with_flip_delay_ms(mut self, delay_ms: u32) -> Self {
        self.flip_delay_ms = delay_ms;
        self
    }

    /// Number of distinct faces (= number of pairs in a deck).
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// All face asset references, indexed by `FaceKey`.
    #[must_use]
    pub fn faces(&self) -> &[String] {
        &self.faces
    }

    /// Resolve a face key to its asset reference.
    #[must_use]
    pub fn face_asset(&self, face: FaceKey) -> Option<&str> {
        self.faces.get(face.index()).map(String::as_str)
    }

    /// Mismatch flip delay in milliseconds.
    #[must_use]
    pub fn flip_delay_ms(&self) -> u32 {
        self.flip_delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_defaults() {
        let config = GameConfig::new(faces(&["a", "b", "c"]));

        assert_eq!(config.face_count(), 3);
        assert_eq!(config.flip_delay_ms(), DEFAULT_FLIP_DELAY_MS);
    }

    #[test]
    fn test_config_flip_delay() {
        let config = GameConfig::new(faces(&["a", "b"])).with_flip_delay_ms(250);
        assert_eq!(config.flip_delay_ms(), 250);
    }

    #[test]
    fn test_face_asset_lookup() {
        let config = GameConfig::new(faces(&["books", "violin"]));

        assert_eq!(config.face_asset(FaceKey::new(0)), Some("books"));
        assert_eq!(config.face_asset(FaceKey::new(1)), Some("violin"));
        assert_eq!(config.face_asset(FaceKey::new(2)), None);
    }

    #[test]
    #[should_panic(expected = "Must have at least one face")]
    fn test_config_empty_faces() {
        GameConfig::new(vec![]);
    }

    #[test]
    #[should_panic(expected = "Face assets must be distinct")]
    fn test_config_duplicate_faces() {
        GameConfig::new(faces(&["a", "b", "a"]));
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::new(faces(&["a", "b"])).with_flip_delay_ms(100);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.face_count(), 2);
        assert_eq!(deserialized.flip_delay_ms(), 100);
    }
}
