use crate::gesture::{GestureTracker, PointerSample, Release, SwipeThresholds};
use crate::profile::Profile;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissAction {
    Like,
    Nope,
    SuperLike,
}

impl DismissAction {
    pub const ALL: [DismissAction; 3] = [Self::Nope, Self::SuperLike, Self::Like];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Like => "Like",
            Self::Nope => "Nope",
            Self::SuperLike => "Super Like",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    Animating,
    Empty,
    NoCard,
    SinglePhoto,
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Animating => write!(f, "a dismissal is already in flight"),
            Self::Empty => write!(f, "the deck is empty"),
            Self::NoCard => write!(f, "no card is on top of the deck"),
            Self::SinglePhoto => write!(f, "the top profile has a single photo"),
        }
    }
}

impl std::error::Error for DeckError {}

/// Identifies one scheduled completion. Tickets are never reused, so a completion that
/// fires after a reset no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DismissTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDismissal {
    pub ticket: DismissTicket,
    pub action: DismissAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Dismissing(PendingDismissal),
    PhotoCycled,
    SnapBack,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckController {
    profiles: Vec<Profile>,
    in_flight: Option<PendingDismissal>,
    gesture: GestureTracker,
    next_ticket: u64,
}

impl DeckController {
    pub fn new(profiles: Vec<Profile>, thresholds: SwipeThresholds) -> Self {
        Self {
            profiles,
            in_flight: None,
            gesture: GestureTracker::new(thresholds),
            next_ticket: 0,
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn top(&self) -> Option<&Profile> {
        self.profiles.first()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending(&self) -> Option<PendingDismissal> {
        self.in_flight
    }

    pub fn gesture(&self) -> &GestureTracker {
        &self.gesture
    }

    /// The like/nope/superlike controls are disabled exactly in this state.
    pub fn controls_disabled(&self) -> bool {
        self.is_animating() || self.is_empty()
    }

    /// Starts the exit of the front card. The caller is expected to call
    /// [`DeckController::complete`] with the returned ticket once the animation ends.
    pub fn dismiss(&mut self, action: DismissAction) -> Result<PendingDismissal, DeckError> {
        if self.in_flight.is_some() {
            return Err(DeckError::Animating);
        }
        if self.profiles.is_empty() {
            return Err(DeckError::Empty);
        }

        let pending = PendingDismissal {
            ticket: DismissTicket(self.next_ticket),
            action,
        };
        self.next_ticket += 1;
        self.in_flight = Some(pending);
        self.gesture.abandon();
        Ok(pending)
    }

    /// Removes and returns the head if `ticket` is the dismissal in flight.
    pub fn complete(&mut self, ticket: DismissTicket) -> Option<Profile> {
        match self.in_flight {
            Some(pending) if pending.ticket == ticket => {
                self.in_flight = None;
                if self.profiles.is_empty() {
                    None
                } else {
                    Some(self.profiles.remove(0))
                }
            }
            _ => None,
        }
    }

    pub fn cycle_photo(&mut self) -> Result<usize, DeckError> {
        let top = self.profiles.first_mut().ok_or(DeckError::NoCard)?;
        top.advance_photo().ok_or(DeckError::SinglePhoto)
    }

    /// Replaces the deck and forgets every transient state. Any ticket issued before the
    /// reset stops matching.
    pub fn reset(&mut self, profiles: Vec<Profile>) {
        self.profiles = profiles;
        self.in_flight = None;
        self.gesture.clear();
    }

    /// Begins a drag on the front card. Returns `false` when the pointer is ignored.
    pub fn pointer_down(&mut self, sample: PointerSample) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        let Some(top) = self.profiles.first() else {
            return false;
        };
        let card_id = top.id.clone();
        self.gesture.begin(sample, &card_id)
    }

    pub fn pointer_move(&mut self, pointer_id: i32, x: f64, y: f64) -> Option<(f64, f64)> {
        self.gesture.update(pointer_id, x, y)
    }

    /// Resolves the drag of `pointer_id`. `None` means the event did not belong to the
    /// active gesture.
    pub fn pointer_up(&mut self, pointer_id: i32, timestamp: f64) -> Option<ReleaseOutcome> {
        let (drag, release) = self.gesture.release(pointer_id, timestamp)?;

        let still_on_top = self.top().map(|p| p.id == drag.card_id).unwrap_or(false);
        if self.in_flight.is_some() || !still_on_top {
            return Some(ReleaseOutcome::SnapBack);
        }

        let outcome = match release {
            Release::Dismiss(action) => match self.dismiss(action) {
                Ok(pending) => ReleaseOutcome::Dismissing(pending),
                Err(_) => ReleaseOutcome::SnapBack,
            },
            Release::DoubleTap => match self.cycle_photo() {
                Ok(_) => ReleaseOutcome::PhotoCycled,
                Err(_) => ReleaseOutcome::SnapBack,
            },
            Release::Tap | Release::SnapBack => ReleaseOutcome::SnapBack,
        };
        Some(outcome)
    }

    pub fn pointer_cancel(&mut self, pointer_id: i32) -> bool {
        self.gesture.cancel(pointer_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::PointerKind;
    use crate::profile::sample_profile;

    fn deck(count: usize, photos: usize) -> DeckController {
        let profiles = (0..count)
            .map(|i| sample_profile(&format!("p_{i}"), photos))
            .collect();
        DeckController::new(profiles, SwipeThresholds::default())
    }

    fn sample(pointer_id: i32, kind: PointerKind) -> PointerSample {
        PointerSample {
            pointer_id,
            kind,
            x: 200.0,
            y: 300.0,
        }
    }

    fn drag(deck: &mut DeckController, dx: f64, dy: f64, at: f64) -> Option<ReleaseOutcome> {
        assert!(deck.pointer_down(sample(1, PointerKind::Touch)));
        deck.pointer_move(1, 200.0 + dx, 300.0 + dy);
        deck.pointer_up(1, at)
    }

    #[test]
    fn completed_dismissals_remove_the_head() {
        let mut deck = deck(3, 2);
        let mut removed = Vec::new();

        for action in [DismissAction::Like, DismissAction::Nope, DismissAction::SuperLike] {
            let before = deck.len();
            let head = deck.top().map(|p| p.id.clone());
            let pending = deck.dismiss(action).expect("dismiss accepted");
            assert_eq!(pending.action, action);

            let profile = deck.complete(pending.ticket).expect("head removed");
            assert_eq!(Some(profile.id.clone()), head);
            assert_eq!(deck.len(), before - 1);
            removed.push(profile.id);
        }

        assert_eq!(removed, vec!["p_0", "p_1", "p_2"]);
        assert_eq!(deck.dismiss(DismissAction::Like), Err(DeckError::Empty));
    }

    #[test]
    fn dismiss_while_in_flight_is_rejected() {
        let mut deck = deck(3, 1);
        let pending = deck.dismiss(DismissAction::Like).expect("first accepted");
        assert_eq!(deck.dismiss(DismissAction::Nope), Err(DeckError::Animating));
        assert_eq!(deck.len(), 3);

        deck.complete(pending.ticket);
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.top().map(|p| p.id.as_str()), Some("p_1"));
    }

    #[test]
    fn completion_is_consumed_once() {
        let mut deck = deck(3, 1);
        let pending = deck.dismiss(DismissAction::Like).expect("accepted");
        assert!(deck.complete(pending.ticket).is_some());
        assert!(deck.complete(pending.ticket).is_none());
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn stale_ticket_after_reset_is_discarded() {
        let mut deck = deck(3, 1);
        let pending = deck.dismiss(DismissAction::Nope).expect("accepted");

        let fresh = (0..5).map(|i| sample_profile(&format!("q_{i}"), 2)).collect();
        deck.reset(fresh);
        assert!(!deck.is_animating());

        assert!(deck.complete(pending.ticket).is_none());
        assert_eq!(deck.len(), 5);

        let next = deck.dismiss(DismissAction::Like).expect("accepted after reset");
        assert_ne!(next.ticket, pending.ticket);
    }

    #[test]
    fn cycle_photo_round_trips() {
        let mut deck = deck(2, 3);
        for expected in [1, 2, 0] {
            assert_eq!(deck.cycle_photo(), Ok(expected));
        }
        assert_eq!(deck.top().map(|p| p.photo_index()), Some(0));
    }

    #[test]
    fn cycle_photo_single_photo_is_noop() {
        let mut deck = deck(1, 1);
        for _ in 0..3 {
            assert_eq!(deck.cycle_photo(), Err(DeckError::SinglePhoto));
        }
        assert_eq!(deck.top().map(|p| p.photo_index()), Some(0));

        let mut empty = DeckController::default();
        assert_eq!(empty.cycle_photo(), Err(DeckError::NoCard));
    }

    #[test]
    fn drag_gestures_map_to_outcomes() {
        let mut deck = deck(4, 2);

        let outcome = drag(&mut deck, 150.0, -10.0, 0.0);
        let Some(ReleaseOutcome::Dismissing(pending)) = outcome else {
            panic!("expected like, got {outcome:?}");
        };
        assert_eq!(pending.action, DismissAction::Like);
        deck.complete(pending.ticket);

        let outcome = drag(&mut deck, 40.0, 30.0, 100.0);
        assert_eq!(outcome, Some(ReleaseOutcome::SnapBack));
        assert_eq!(deck.len(), 3);
    }

    #[test]
    fn double_tap_cycles_photo_without_dismissing() {
        let mut deck = deck(2, 3);
        assert_eq!(drag(&mut deck, 2.0, 1.0, 1_000.0), Some(ReleaseOutcome::SnapBack));
        assert_eq!(
            drag(&mut deck, 5.0, 5.0, 1_250.0),
            Some(ReleaseOutcome::PhotoCycled)
        );
        assert_eq!(deck.len(), 2);
        assert!(!deck.is_animating());
        assert_eq!(deck.top().map(|p| p.photo_index()), Some(1));
    }

    #[test]
    fn pointer_is_ignored_while_animating() {
        let mut deck = deck(2, 1);
        deck.dismiss(DismissAction::Like).expect("accepted");
        assert!(!deck.pointer_down(sample(1, PointerKind::Mouse)));
    }

    #[test]
    fn keyboard_dismiss_mid_drag_discards_gesture() {
        let mut deck = deck(2, 1);
        assert!(deck.pointer_down(sample(7, PointerKind::Mouse)));
        deck.dismiss(DismissAction::Nope).expect("accepted");

        assert_eq!(deck.pointer_move(7, 900.0, 300.0), None);
        assert_eq!(deck.pointer_up(7, 10.0), None);
    }

    #[test]
    fn reset_clears_transient_state() {
        let mut deck = deck(2, 3);
        drag(&mut deck, 0.0, 0.0, 500.0);
        deck.pointer_down(sample(9, PointerKind::Touch));
        deck.dismiss(DismissAction::Like).expect("accepted");

        let fresh = (0..12).map(|i| sample_profile(&format!("r_{i}"), 3)).collect();
        deck.reset(fresh);

        assert_eq!(deck.len(), 12);
        assert!(!deck.is_animating());
        assert!(!deck.gesture().is_dragging());
        assert_eq!(deck.gesture().last_tap_at(), None);
    }

    #[test]
    fn controls_disabled_tracks_state() {
        let mut deck = deck(1, 1);
        assert!(!deck.controls_disabled());

        let pending = deck.dismiss(DismissAction::SuperLike).expect("accepted");
        assert!(deck.controls_disabled());

        deck.complete(pending.ticket);
        assert!(deck.is_empty());
        assert!(deck.controls_disabled());

        deck.reset(vec![sample_profile("s_0", 1)]);
        assert!(!deck.controls_disabled());
    }
}
