use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Time of day given to drafts that don't carry one.
pub const DEFAULT_TIME: &str = "09:00";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tag {
    Work,
    Personal,
    Trading,
    Health,
}

/// A scheduled task. `priority` only orders tasks that share a `date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tag: Tag,
    pub priority: u32,
    pub completed: bool,
    pub date: NaiveDate,
    pub time: String,
}

impl Task {
    pub(crate) fn from_draft(draft: TaskDraft, priority: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description.filter(|d| !d.trim().is_empty()),
            tag: draft.tag,
            priority,
            completed: false,
            date: draft.date,
            time: draft.time,
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// A task payload before the list assigns `id`, `priority` and `completed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub tag: Tag,
    pub date: NaiveDate,
    pub time: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, tag: Tag, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: None,
            tag,
            date,
            time: DEFAULT_TIME.to_string(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

mod error;
mod notes;
mod planner;
mod prioritize;
mod schedule;
mod store;
mod tasks;

pub use error::{PlannerError, Result, StoreError};
pub use notes::Notes;
pub use planner::Planner;
pub use prioritize::{PrioritizeError, Prioritizer, TagWeightPrioritizer, TagWeights};
pub use schedule::{DaySchedule, WeekView, week_dates};
pub use store::{KeyValueStore, MemoryStore, SledStore, StoreFormat, TaskStore};
pub use tasks::{Outcome, TaskList};
