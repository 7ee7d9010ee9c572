//! The task collection and its write-through persistence.

use chrono::{NaiveDate, Weekday};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::schedule::{DaySchedule, WeekView, week_dates};
use crate::store::TaskStore;
use crate::{Task, TaskDraft};

/// What a mutation did. Invalid input is never an error: the collection is
/// left as it was and the caller learns why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NotFound,
    Rejected,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// Owns the task collection. Every applied mutation is written to the store
/// before returning; if that write fails the in-memory state is kept and the
/// error returned.
pub struct TaskList {
    tasks: Vec<Task>,
    store: TaskStore,
}

impl TaskList {
    pub fn load(store: TaskStore) -> Result<Self> {
        let tasks = store.load()?;
        Ok(Self { tasks, store })
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Appends a task built from `draft`. A blank title creates nothing.
    pub fn add(&mut self, draft: TaskDraft) -> Result<Option<Task>> {
        if !draft.has_title() {
            warn!("ignoring task draft with blank title");
            return Ok(None);
        }

        let task = Task::from_draft(draft, self.tasks.len() as u32);
        debug!(id = %task.id, priority = task.priority, "adding task");
        self.tasks.push(task.clone());
        self.persist()?;
        Ok(Some(task))
    }

    /// Replaces the task with the same id.
    pub fn update(&mut self, task: Task) -> Result<Outcome> {
        if !task.has_title() {
            warn!(id = %task.id, "rejecting update with blank title");
            return Ok(Outcome::Rejected);
        }
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) else {
            warn!(id = %task.id, "update for unknown task");
            return Ok(Outcome::NotFound);
        };

        debug!(id = %task.id, "updating task");
        *slot = task;
        self.persist()?;
        Ok(Outcome::Applied)
    }

    /// Edits the task with `id` in place. The edit is discarded when it
    /// leaves the title blank.
    pub fn modify(&mut self, id: &Uuid, edit: impl FnOnce(&mut Task)) -> Result<Outcome> {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == *id) else {
            warn!(%id, "modify for unknown task");
            return Ok(Outcome::NotFound);
        };

        let mut task = slot.clone();
        edit(&mut task);
        task.id = *id;
        if !task.has_title() {
            warn!(%id, "rejecting edit with blank title");
            return Ok(Outcome::Rejected);
        }

        debug!(%id, "modified task");
        *slot = task;
        self.persist()?;
        Ok(Outcome::Applied)
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<Outcome> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != *id);
        if self.tasks.len() == before {
            warn!(%id, "remove for unknown task");
            return Ok(Outcome::NotFound);
        }

        debug!(%id, "removed task");
        self.persist()?;
        Ok(Outcome::Applied)
    }

    pub fn toggle_complete(&mut self, id: &Uuid) -> Result<Outcome> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) else {
            warn!(%id, "toggle for unknown task");
            return Ok(Outcome::NotFound);
        };

        task.completed = !task.completed;
        debug!(%id, completed = task.completed, "toggled task");
        self.persist()?;
        Ok(Outcome::Applied)
    }

    /// Tasks scheduled on `date`, lowest priority first. Ties keep
    /// collection order.
    pub fn by_date(&self, date: NaiveDate) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| t.date == date)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.priority);
        tasks
    }

    /// One `by_date` list per day of the week containing `anchor`, each cut
    /// to `limit` tasks when given. `None` at the edges of the calendar.
    pub fn week_of(
        &self,
        anchor: NaiveDate,
        week_start: Weekday,
        limit: Option<usize>,
    ) -> Option<WeekView> {
        let days = week_dates(anchor, week_start)?
            .into_iter()
            .map(|date| DaySchedule::new(date, self.by_date(date), limit))
            .collect();
        Some(WeekView { days })
    }

    /// Rewrites priorities from a ranked id order: the task at position `i`
    /// gets priority `i`. Ids no longer in the collection are skipped and
    /// tasks missing from `order` keep their priority.
    pub(crate) fn apply_ranking(&mut self, order: &[Uuid]) -> Result<usize> {
        let mut applied = 0;
        for (index, id) in order.iter().enumerate() {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
                task.priority = index as u32;
                applied += 1;
            }
        }
        self.persist()?;
        Ok(applied)
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.tasks)
    }
}
