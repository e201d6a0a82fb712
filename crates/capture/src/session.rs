use image::GrayImage;

use album_core::StickerId;

use crate::enhance::{center_crop, enhance};
use crate::recognize::Recognizer;

/// Maximum pending-list size per commit.
pub const PENDING_CAPACITY: usize = 8;

/// Why an accept trigger was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptRejection {
    /// No detect has succeeded since the last accept/clear.
    NothingDetected,
    /// The detected id is already in the pending list.
    DuplicateInPending,
    /// The pending list already holds `PENDING_CAPACITY` ids.
    ListFull,
}

/// What a commit trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The pending list was handed off and cleared. Carries how many
    /// ids were committed.
    Committed(usize),
    /// The pending list was empty; nothing happened.
    NothingPending,
}

/// Transient per-session detection state. In-memory only, reset on
/// explicit clear; quitting the session persists nothing beyond what
/// commits already did.
#[derive(Debug, Clone, Default)]
pub struct DetectionState {
    last_detected: Option<StickerId>,
    pending: Vec<StickerId>,
}

impl DetectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_detected(&self) -> Option<StickerId> {
        self.last_detected
    }

    pub fn pending(&self) -> &[StickerId] {
        &self.pending
    }

    /// Trigger "detect": one shot against the recognizer, no retry
    /// loop. The frame is enhanced and the centered crop is tried
    /// first; the full frame is the fallback, matching how stickers are
    /// framed in practice. A miss leaves the state unchanged.
    pub fn detect<R: Recognizer>(&mut self, recognizer: &R, frame: &GrayImage) -> Option<StickerId> {
        let cropped = enhance(&center_crop(frame));
        let id = recognizer
            .recognize(&cropped)
            .or_else(|| recognizer.recognize(&enhance(frame)));
        if let Some(id) = id {
            self.last_detected = Some(id);
        }
        id
    }

    /// Trigger "accept": move the detected id into the pending list and
    /// clear the detection. Rejections are distinguishable no-ops.
    pub fn accept(&mut self) -> Result<StickerId, AcceptRejection> {
        let id = self.last_detected.ok_or(AcceptRejection::NothingDetected)?;
        if self.pending.contains(&id) {
            return Err(AcceptRejection::DuplicateInPending);
        }
        if self.pending.len() >= PENDING_CAPACITY {
            return Err(AcceptRejection::ListFull);
        }
        self.pending.push(id);
        self.last_detected = None;
        Ok(id)
    }

    /// Trigger "commit": hand the full pending list to the store
    /// boundary as a single request. On sink success the pending list
    /// is cleared; on sink failure it is left untouched so the user can
    /// retry.
    pub fn commit<E, F>(&mut self, sink: F) -> Result<CommitOutcome, E>
    where
        F: FnOnce(&[StickerId]) -> Result<(), E>,
    {
        if self.pending.is_empty() {
            return Ok(CommitOutcome::NothingPending);
        }
        sink(&self.pending)?;
        let committed = self.pending.len();
        self.pending.clear();
        Ok(CommitOutcome::Committed(committed))
    }

    /// Trigger "clear": empty the pending list unconditionally.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.last_detected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use album_core::{AddRequest, Collection, TOTAL_STICKERS};

    /// Scripted recognizer double: pops answers front to back.
    struct Scripted {
        answers: RefCell<Vec<Option<StickerId>>>,
    }

    impl Scripted {
        fn new(answers: Vec<Option<StickerId>>) -> Self {
            Self {
                answers: RefCell::new(answers),
            }
        }
    }

    impl Recognizer for Scripted {
        fn recognize(&self, _image: &GrayImage) -> Option<StickerId> {
            let mut answers = self.answers.borrow_mut();
            if answers.is_empty() {
                None
            } else {
                answers.remove(0)
            }
        }
    }

    fn frame() -> GrayImage {
        GrayImage::new(30, 30)
    }

    #[test]
    fn detect_stores_id_on_success() {
        let mut state = DetectionState::new();
        let recognizer = Scripted::new(vec![Some(42)]);
        assert_eq!(state.detect(&recognizer, &frame()), Some(42));
        assert_eq!(state.last_detected(), Some(42));
    }

    #[test]
    fn detect_miss_leaves_state_unchanged() {
        let mut state = DetectionState::new();
        // Both the cropped and the full-frame attempt miss.
        let recognizer = Scripted::new(vec![None, None]);
        assert_eq!(state.detect(&recognizer, &frame()), None);
        assert_eq!(state.last_detected(), None);
    }

    #[test]
    fn detect_falls_back_to_full_frame() {
        let mut state = DetectionState::new();
        let recognizer = Scripted::new(vec![None, Some(7)]);
        assert_eq!(state.detect(&recognizer, &frame()), Some(7));
    }

    #[test]
    fn accept_moves_id_to_pending() {
        let mut state = DetectionState::new();
        let recognizer = Scripted::new(vec![Some(12)]);
        state.detect(&recognizer, &frame());

        assert_eq!(state.accept(), Ok(12));
        assert_eq!(state.pending(), &[12]);
        assert_eq!(state.last_detected(), None);
    }

    #[test]
    fn accept_without_detection_rejected() {
        let mut state = DetectionState::new();
        assert_eq!(state.accept(), Err(AcceptRejection::NothingDetected));
    }

    #[test]
    fn accept_duplicate_in_pending_rejected() {
        let mut state = DetectionState::new();
        let recognizer = Scripted::new(vec![Some(12), Some(12)]);
        state.detect(&recognizer, &frame());
        state.accept().unwrap();

        state.detect(&recognizer, &frame());
        assert_eq!(state.accept(), Err(AcceptRejection::DuplicateInPending));
        // The rejected id stays detected so the user can clear instead.
        assert_eq!(state.last_detected(), Some(12));
        assert_eq!(state.pending(), &[12]);
    }

    #[test]
    fn accept_rejected_when_list_full() {
        let mut state = DetectionState::new();
        let ids: Vec<Option<StickerId>> = (1..=9).map(|id| Some(id as StickerId)).collect();
        let recognizer = Scripted::new(ids);

        for _ in 0..PENDING_CAPACITY {
            state.detect(&recognizer, &frame());
            state.accept().unwrap();
        }
        assert_eq!(state.pending().len(), PENDING_CAPACITY);

        state.detect(&recognizer, &frame());
        assert_eq!(state.accept(), Err(AcceptRejection::ListFull));
    }

    #[test]
    fn commit_empty_is_noop() {
        let mut state = DetectionState::new();
        let outcome: Result<_, ()> = state.commit(|_| panic!("sink must not run"));
        assert_eq!(outcome, Ok(CommitOutcome::NothingPending));
    }

    #[test]
    fn commit_clears_pending_on_success() {
        let mut state = DetectionState::new();
        let recognizer = Scripted::new(vec![Some(3), Some(9)]);
        for _ in 0..2 {
            state.detect(&recognizer, &frame());
            state.accept().unwrap();
        }

        let mut seen = Vec::new();
        let outcome: Result<_, ()> = state.commit(|ids| {
            seen = ids.to_vec();
            Ok(())
        });
        assert_eq!(outcome, Ok(CommitOutcome::Committed(2)));
        assert_eq!(seen, vec![3, 9]);
        assert!(state.pending().is_empty());
    }

    #[test]
    fn commit_failure_keeps_pending_for_retry() {
        let mut state = DetectionState::new();
        let recognizer = Scripted::new(vec![Some(3)]);
        state.detect(&recognizer, &frame());
        state.accept().unwrap();

        let outcome: Result<CommitOutcome, &str> = state.commit(|_| Err("disk full"));
        assert_eq!(outcome, Err("disk full"));
        assert_eq!(state.pending(), &[3]);
    }

    #[test]
    fn commit_through_store_boundary() {
        // Pending list handed to the add path as one request: 10 is
        // already owned so it counts as a duplicate, 20 is fresh.
        let mut collection: Collection = [(10, 1)].into_iter().collect();
        let mut state = DetectionState::new();
        let recognizer = Scripted::new(vec![Some(10), Some(20)]);
        for _ in 0..2 {
            state.detect(&recognizer, &frame());
            state.accept().unwrap();
        }

        let outcome = state.commit(|ids| {
            let request = AddRequest::new(ids.to_vec(), TOTAL_STICKERS)
                .map_err(|e| e.to_string())?;
            request.apply(&mut collection, true);
            Ok::<(), String>(())
        });
        assert_eq!(outcome, Ok(CommitOutcome::Committed(2)));
        assert_eq!(collection.count_of(10), 2);
        assert_eq!(collection.count_of(20), 1);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = DetectionState::new();
        let recognizer = Scripted::new(vec![Some(5), Some(6)]);
        state.detect(&recognizer, &frame());
        state.accept().unwrap();
        state.detect(&recognizer, &frame());

        state.clear();
        assert!(state.pending().is_empty());
        assert_eq!(state.last_detected(), None);
    }
}
