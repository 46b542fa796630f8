use crate::controller::FeedController;
use crate::criteria::FilterCriteria;
use crate::gesture::{CommitKind, GesturePhase, GestureTracker, Overlay, Release};
use crate::timer::TimerHandle;
use crate::types::{Article, ArticleId, GestureConfig, SummarySender};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
}

/// Everything that can happen to the feed. Timers feed back into the same
/// queue, so all state changes happen on the single runtime task.
#[derive(Debug)]
pub enum FeedEvent {
    ArticlesLoaded(Vec<Article>),
    CriteriaChanged(FilterCriteria),
    Pointer { id: ArticleId, event: PointerEvent },
    /// The presentation layer unmounted a card; its timers die with it.
    CardRemoved(ArticleId),
    /// Timer callbacks carry the generation of the session that scheduled
    /// them; events from an earlier session of the same card are dropped.
    CommitElapsed {
        id: ArticleId,
        kind: CommitKind,
        generation: u64,
    },
    FlashElapsed { id: ArticleId, generation: u64 },
    SendSummary,
    ResetSession,
    Shutdown,
}

/// Per-card view state published alongside the feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub phase: GesturePhase,
    pub offset: f64,
    pub overlay: Option<Overlay>,
    pub leaving: bool,
    pub saved_flash: bool,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    pub main: Vec<Article>,
    pub saved: Vec<Article>,
    pub caught_up: bool,
    pub cards: HashMap<ArticleId, CardView>,
}

struct CardSession {
    generation: u64,
    tracker: GestureTracker,
    commit_timer: Option<TimerHandle>,
    flash_timer: Option<TimerHandle>,
}

impl CardSession {
    /// A saved card with nothing left to animate no longer needs a session.
    fn is_retired(&self) -> bool {
        self.tracker.is_saved()
            && self.tracker.phase() == GesturePhase::Idle
            && !self.tracker.flash_visible()
            && self.commit_timer.is_none()
    }

    fn view(&self) -> CardView {
        CardView {
            phase: self.tracker.phase(),
            offset: self.tracker.offset(),
            overlay: self.tracker.overlay(),
            leaving: self.tracker.is_leaving(),
            saved_flash: self.tracker.flash_visible(),
        }
    }
}

/// Cloneable handle used by the presentation layer to push events.
#[derive(Clone)]
pub struct FeedHandle {
    sender: mpsc::UnboundedSender<FeedEvent>,
}

impl FeedHandle {
    pub fn send(&self, event: FeedEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    pub fn pointer(&self, id: impl Into<ArticleId>, event: PointerEvent) -> bool {
        self.send(FeedEvent::Pointer {
            id: id.into(),
            event,
        })
    }

    /// A full horizontal swipe: down, move by `delta_x`, up.
    pub fn swipe(&self, id: impl Into<ArticleId>, delta_x: f64) -> bool {
        let id = id.into();
        self.pointer(id.clone(), PointerEvent::Down { x: 200.0, y: 100.0 })
            && self.pointer(id.clone(), PointerEvent::Move { x: 200.0 + delta_x, y: 100.0 })
            && self.pointer(id, PointerEvent::Up)
    }
}

/// Single-task event loop owning the controller, the active criteria and
/// every live card session.
pub struct FeedRuntime {
    controller: FeedController,
    criteria: FilterCriteria,
    config: GestureConfig,
    cards: HashMap<ArticleId, CardSession>,
    next_generation: u64,
    summary_sender: Arc<dyn SummarySender>,
    events_tx: mpsc::UnboundedSender<FeedEvent>,
    events_rx: mpsc::UnboundedReceiver<FeedEvent>,
    snapshot_tx: watch::Sender<FeedSnapshot>,
}

impl FeedRuntime {
    pub fn new(config: GestureConfig, summary_sender: Arc<dyn SummarySender>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(FeedSnapshot {
            caught_up: true,
            ..Default::default()
        });

        Self {
            controller: FeedController::default(),
            criteria: FilterCriteria::default(),
            config,
            cards: HashMap::new(),
            next_generation: 0,
            summary_sender,
            events_tx,
            events_rx,
            snapshot_tx,
        }
    }

    pub fn handle(&self) -> FeedHandle {
        FeedHandle {
            sender: self.events_tx.clone(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn controller(&self) -> &FeedController {
        &self.controller
    }

    /// Generation of the live session for `id`, if the card has one.
    pub fn card_generation(&self, id: &ArticleId) -> Option<u64> {
        self.cards.get(id).map(|card| card.generation)
    }

    /// Process events until `Shutdown` arrives. Pending timers are aborted
    /// when the runtime is dropped.
    pub async fn run(mut self) -> FeedController {
        info!("Feed runtime started");
        while let Some(event) = self.events_rx.recv().await {
            if matches!(event, FeedEvent::Shutdown) {
                break;
            }
            self.process(event);
        }
        info!("Feed runtime stopped");
        self.cards.clear();
        self.controller
    }

    /// Apply a single event and publish the resulting snapshot.
    pub fn process(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::ArticlesLoaded(articles) => {
                self.controller.set_articles(articles);
                let controller = &self.controller;
                self.cards.retain(|id, _| controller.contains(id));
            }
            FeedEvent::CriteriaChanged(criteria) => {
                debug!("Criteria changed: {:?}", criteria);
                self.criteria = criteria;
            }
            FeedEvent::Pointer { id, event } => self.on_pointer(id, event),
            FeedEvent::CardRemoved(id) => {
                if self.cards.remove(&id).is_some() {
                    debug!("Card {} torn down", id);
                }
            }
            FeedEvent::CommitElapsed { id, kind, generation } => {
                self.on_commit_elapsed(id, kind, generation)
            }
            FeedEvent::FlashElapsed { id, generation } => {
                match self.cards.get_mut(&id) {
                    Some(card) if card.generation == generation => {
                        card.tracker.clear_flash();
                        card.flash_timer = None;
                    }
                    _ => debug!("Ignoring stale flash for {} (generation {})", id, generation),
                }
                self.retire_if_done(&id);
            }
            FeedEvent::SendSummary => self.send_summary(),
            FeedEvent::ResetSession => {
                self.cards.clear();
                self.controller.reset();
            }
            FeedEvent::Shutdown => {}
        }
        self.publish();
    }

    fn on_pointer(&mut self, id: ArticleId, event: PointerEvent) {
        if !self.controller.contains(&id) || self.controller.is_dismissed(&id) {
            debug!("Ignoring pointer event for unavailable card {}", id);
            return;
        }

        let already_saved = self.controller.is_saved(&id);
        let config = &self.config;
        let next_generation = &mut self.next_generation;
        let card = self.cards.entry(id.clone()).or_insert_with(|| {
            *next_generation += 1;
            CardSession {
                generation: *next_generation,
                tracker: GestureTracker::new(id.clone(), config).with_saved(already_saved),
                commit_timer: None,
                flash_timer: None,
            }
        });
        let generation = card.generation;

        let release = match event {
            PointerEvent::Down { x, y } => {
                card.tracker.pointer_down(x, y);
                return;
            }
            PointerEvent::Move { x, y } => {
                card.tracker.pointer_move(x, y);
                return;
            }
            PointerEvent::Up => card.tracker.pointer_up(),
            PointerEvent::Leave => card.tracker.pointer_leave(),
        };

        match release {
            Release::Commit { id: commit_id, kind } => {
                let tx = self.events_tx.clone();
                card.commit_timer = Some(TimerHandle::schedule(self.config.commit_delay, move || async move {
                    let _ = tx.send(FeedEvent::CommitElapsed {
                        id: commit_id,
                        kind,
                        generation,
                    });
                }));

                if kind == CommitKind::Save {
                    let tx = self.events_tx.clone();
                    card.flash_timer = Some(TimerHandle::schedule(self.config.saved_flash, move || async move {
                        let _ = tx.send(FeedEvent::FlashElapsed { id, generation });
                    }));
                }
            }
            Release::Cancel => self.retire_if_done(&id),
            Release::Ignored => {}
        }
    }

    fn on_commit_elapsed(&mut self, id: ArticleId, kind: CommitKind, generation: u64) {
        let Some(card) = self.cards.get_mut(&id) else {
            debug!("Ignoring stale {:?} commit for {}", kind, id);
            return;
        };
        if card.generation != generation {
            debug!(
                "Ignoring {:?} commit for {} from session {}, live session is {}",
                kind, id, generation, card.generation
            );
            return;
        }
        if card.tracker.settle() != Some(kind) {
            debug!("Ignoring {:?} commit for {} with no pending commit", kind, id);
            return;
        }
        card.commit_timer = None;

        match kind {
            CommitKind::Dismiss => {
                self.controller.dismiss(&id);
                self.cards.remove(&id);
            }
            CommitKind::Save => {
                self.controller.save(&id);
                self.retire_if_done(&id);
            }
        }
    }

    fn retire_if_done(&mut self, id: &ArticleId) {
        if self.cards.get(id).is_some_and(CardSession::is_retired) {
            debug!("Card {} is saved and settled, dropping its session", id);
            self.cards.remove(id);
        }
    }

    fn send_summary(&self) {
        if !self.controller.is_empty(&self.criteria) {
            debug!("Summary requested before the feed is caught up, ignoring");
            return;
        }

        let request = self.controller.summary_request();
        let sender = self.summary_sender.clone();
        info!("Sending summary with {} saved articles", request.saved.len());
        tokio::spawn(async move {
            if let Err(e) = sender.send_summary(&request).await {
                warn!("Summary delivery failed: {}", e);
            }
        });
    }

    fn publish(&self) {
        let snapshot = FeedSnapshot {
            main: self.controller.main_feed(&self.criteria).into_iter().cloned().collect(),
            saved: self.controller.saved_feed(&self.criteria).into_iter().cloned().collect(),
            caught_up: self.controller.is_empty(&self.criteria),
            cards: self
                .cards
                .iter()
                .map(|(id, card)| (id.clone(), card.view()))
                .collect(),
        };
        self.snapshot_tx.send_replace(snapshot);
    }
}
