// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! sprintdeck-storage: the project's `.teamclaude/` data root and every
//! file the core reads from or writes to it — debounced state snapshots,
//! history-on-stop, the replay log, and the memory/learnings/analytics
//! stores. No protocol or state-machine logic lives here; see
//! `sprintdeck-engine` for that.

pub mod analytics;
pub mod error;
pub mod history;
pub mod learnings_store;
pub mod memory_store;
pub mod paths;
pub mod persistence;
pub mod replay;

pub use analytics::{AnalyticsRecord, AnalyticsStore};
pub use error::PersistError;
pub use history::{HistoryRecord, HistoryWriter};
pub use learnings_store::LearningsStore;
pub use memory_store::MemoryStore;
pub use paths::Paths;
pub use persistence::{Persistence, DEBOUNCE_DELAY};
pub use replay::{read_recording, RecordedEvent, Recorder};
