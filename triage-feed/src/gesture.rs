use crate::types::{ArticleId, GestureConfig};
use tracing::debug;

/// Irreversible outcome of a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    Dismiss,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging {
        origin_x: f64,
        origin_y: f64,
        delta_x: f64,
    },
    /// Commit scheduled; the card ignores pointer input until it settles.
    Committing(CommitKind),
    /// Dismissed card whose exit animation finished. Terminal.
    Settled,
}

/// Result of releasing (or leaving) a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Release {
    /// No drag was in progress.
    Ignored,
    /// Drag evaluated below threshold, or a no-op save.
    Cancel,
    /// Commit scheduled; the caller must fire it after the commit delay.
    Commit { id: ArticleId, kind: CommitKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTone {
    Dismiss,
    Save,
    /// Right swipe on an article that is already saved. Not actionable.
    AlreadySaved,
}

impl OverlayTone {
    pub fn label(&self) -> &'static str {
        match self {
            OverlayTone::Dismiss => "Dismiss",
            OverlayTone::Save => "Save",
            OverlayTone::AlreadySaved => "Already saved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub tone: OverlayTone,
    /// `min(1, |delta| / threshold)`.
    pub opacity: f64,
}

/// Per-card swipe state machine.
///
/// Idle -> Dragging on pointer-down, Dragging tracks the horizontal delta,
/// and pointer-up or pointer-leave evaluates the delta against the commit
/// threshold. A pending commit blocks further input until [`settle`] is
/// called, so one card can never fire twice.
///
/// [`settle`]: GestureTracker::settle
#[derive(Debug, Clone)]
pub struct GestureTracker {
    id: ArticleId,
    threshold: f64,
    already_saved: bool,
    phase: GesturePhase,
    flash_visible: bool,
}

impl GestureTracker {
    pub fn new(id: ArticleId, config: &GestureConfig) -> Self {
        Self {
            id,
            threshold: config.commit_threshold_px,
            already_saved: false,
            phase: GesturePhase::Idle,
            flash_visible: false,
        }
    }

    pub fn with_saved(mut self, already_saved: bool) -> Self {
        self.already_saved = already_saved;
        self
    }

    pub fn id(&self) -> &ArticleId {
        &self.id
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_saved(&self) -> bool {
        self.already_saved
    }

    pub fn set_saved(&mut self, saved: bool) {
        self.already_saved = saved;
    }

    /// False while a commit is pending or once the card has been dismissed.
    pub fn is_interactive(&self) -> bool {
        matches!(self.phase, GesturePhase::Idle | GesturePhase::Dragging { .. })
    }

    /// The card is playing its exit animation or is gone.
    pub fn is_leaving(&self) -> bool {
        matches!(
            self.phase,
            GesturePhase::Committing(CommitKind::Dismiss) | GesturePhase::Settled
        )
    }

    /// Horizontal visual offset. Zero unless dragging.
    pub fn offset(&self) -> f64 {
        match self.phase {
            GesturePhase::Dragging { delta_x, .. } => delta_x,
            _ => 0.0,
        }
    }

    pub fn flash_visible(&self) -> bool {
        self.flash_visible
    }

    pub fn show_flash(&mut self) {
        self.flash_visible = true;
    }

    pub fn clear_flash(&mut self) {
        self.flash_visible = false;
    }

    /// Returns whether the press started a drag.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        match self.phase {
            GesturePhase::Idle => {
                self.phase = GesturePhase::Dragging {
                    origin_x: x,
                    origin_y: y,
                    delta_x: 0.0,
                };
                true
            }
            GesturePhase::Dragging { .. } => false,
            GesturePhase::Committing(_) | GesturePhase::Settled => {
                debug!("Ignoring pointer-down on non-interactive card {}", self.id);
                false
            }
        }
    }

    /// Vertical motion is ignored; this is a one-axis gesture.
    pub fn pointer_move(&mut self, x: f64, _y: f64) {
        if let GesturePhase::Dragging { origin_x, delta_x, .. } = &mut self.phase {
            *delta_x = x - *origin_x;
        }
    }

    pub fn pointer_up(&mut self) -> Release {
        self.release()
    }

    /// Leaving the card mid-drag is evaluated exactly like a release.
    pub fn pointer_leave(&mut self) -> Release {
        self.release()
    }

    fn release(&mut self) -> Release {
        let delta = match self.phase {
            GesturePhase::Dragging { delta_x, .. } => delta_x,
            _ => return Release::Ignored,
        };

        if delta <= -self.threshold {
            debug!("Card {} committing dismiss at delta {}", self.id, delta);
            self.phase = GesturePhase::Committing(CommitKind::Dismiss);
            Release::Commit {
                id: self.id.clone(),
                kind: CommitKind::Dismiss,
            }
        } else if delta >= self.threshold && !self.already_saved {
            debug!("Card {} committing save at delta {}", self.id, delta);
            self.phase = GesturePhase::Committing(CommitKind::Save);
            self.flash_visible = true;
            Release::Commit {
                id: self.id.clone(),
                kind: CommitKind::Save,
            }
        } else {
            self.phase = GesturePhase::Idle;
            Release::Cancel
        }
    }

    /// Finish a pending commit. A dismissed card becomes `Settled` for good;
    /// a saved card returns to `Idle` and remembers it is saved.
    pub fn settle(&mut self) -> Option<CommitKind> {
        match self.phase {
            GesturePhase::Committing(CommitKind::Dismiss) => {
                self.phase = GesturePhase::Settled;
                Some(CommitKind::Dismiss)
            }
            GesturePhase::Committing(CommitKind::Save) => {
                self.phase = GesturePhase::Idle;
                self.already_saved = true;
                Some(CommitKind::Save)
            }
            _ => None,
        }
    }

    /// Overlay the presentation layer should draw while dragging.
    pub fn overlay(&self) -> Option<Overlay> {
        let delta = match self.phase {
            GesturePhase::Dragging { delta_x, .. } if delta_x != 0.0 => delta_x,
            _ => return None,
        };

        let tone = if delta < 0.0 {
            OverlayTone::Dismiss
        } else if self.already_saved {
            OverlayTone::AlreadySaved
        } else {
            OverlayTone::Save
        };

        Some(Overlay {
            tone,
            opacity: (delta.abs() / self.threshold).min(1.0),
        })
    }
}
