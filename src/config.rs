use crate::data::PHOTO_SEEDS;
use crate::gesture::SwipeThresholds;
use crate::motion::MotionTiming;
use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use log::{info, warn};
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "swipe_deck_config";
const MAX_DECK_SIZE: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub deck_size: usize,
    pub photos_per_profile: usize,
    pub thresholds: SwipeThresholds,
    pub timing: MotionTiming,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            deck_size: 12,
            photos_per_profile: 3,
            thresholds: SwipeThresholds::default(),
            timing: MotionTiming::default(),
        }
    }
}

impl DeckConfig {
    /// Pulls out-of-range values back to something the deck can use.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        self.deck_size = self.deck_size.clamp(1, MAX_DECK_SIZE);
        self.photos_per_profile = self.photos_per_profile.clamp(1, PHOTO_SEEDS.len());

        let thresholds = &mut self.thresholds;
        if !(thresholds.horizontal.is_finite() && thresholds.horizontal > 0.0) {
            thresholds.horizontal = defaults.thresholds.horizontal;
        }
        if !(thresholds.upward.is_finite() && thresholds.upward > 0.0) {
            thresholds.upward = defaults.thresholds.upward;
        }
        if !(thresholds.tap_tolerance.is_finite() && thresholds.tap_tolerance >= 0.0) {
            thresholds.tap_tolerance = defaults.thresholds.tap_tolerance;
        }
        if !(thresholds.double_tap_ms.is_finite() && thresholds.double_tap_ms >= 0.0) {
            thresholds.double_tap_ms = defaults.thresholds.double_tap_ms;
        }

        self
    }
}

pub fn load_config() -> DeckConfig {
    match LocalStorage::get::<DeckConfig>(STORAGE_KEY) {
        Ok(config) => {
            info!("Loaded deck config overrides from '{}'", STORAGE_KEY);
            config.sanitized()
        }
        Err(StorageError::KeyNotFound(_)) => DeckConfig::default(),
        Err(err) => {
            warn!("Falling back to default deck config: {}", err);
            DeckConfig::default()
        }
    }
}
