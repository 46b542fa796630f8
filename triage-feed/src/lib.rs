pub mod types;
pub mod criteria;
pub mod sort;
pub mod pipeline;
pub mod gesture;
pub mod timer;
pub mod controller;
pub mod digest;
pub mod transform;
pub mod fetcher;
pub mod sources;
pub mod runtime;

pub use types::*;
pub use criteria::{CategoryFilter, FilterCriteria, SortKey};
pub use pipeline::{ViewMode, Visibility};
pub use gesture::{CommitKind, GesturePhase, GestureTracker, Overlay, OverlayTone, Release};
pub use timer::TimerHandle;
pub use controller::FeedController;
pub use digest::{compose_summary, LogSummarySender};
pub use transform::{transform_articles, RawArticle};
pub use fetcher::ArticleFetcher;
pub use sources::JsonFileSource;
pub use runtime::{CardView, FeedEvent, FeedHandle, FeedRuntime, FeedSnapshot, PointerEvent};
