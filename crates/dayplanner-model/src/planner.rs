//! Shared handle over the task list used by request handlers.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use parking_lot::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{PlannerError, Result};
use crate::prioritize::Prioritizer;
use crate::schedule::WeekView;
use crate::store::TaskStore;
use crate::tasks::{Outcome, TaskList};
use crate::{Task, TaskDraft};

/// Cloneable access to one [`TaskList`]. CRUD calls run to completion under
/// the lock; `reprioritize` only holds it to take a snapshot and to commit.
#[derive(Clone)]
pub struct Planner {
    list: Arc<Mutex<TaskList>>,
    prioritizer: Arc<dyn Prioritizer>,
}

impl Planner {
    pub fn new(list: TaskList, prioritizer: Arc<dyn Prioritizer>) -> Self {
        Self {
            list: Arc::new(Mutex::new(list)),
            prioritizer,
        }
    }

    pub fn open(store: TaskStore, prioritizer: Arc<dyn Prioritizer>) -> Result<Self> {
        let list = TaskList::load(store)?;
        info!(count = list.len(), "task list loaded");
        Ok(Self::new(list, prioritizer))
    }

    pub fn all(&self) -> Vec<Task> {
        self.list.lock().all().to_vec()
    }

    pub fn get(&self, id: &Uuid) -> Option<Task> {
        self.list.lock().get(id).cloned()
    }

    pub fn add(&self, draft: TaskDraft) -> Result<Option<Task>> {
        self.list.lock().add(draft)
    }

    pub fn update(&self, task: Task) -> Result<Outcome> {
        self.list.lock().update(task)
    }

    /// Applies `edit` to the current record under one lock acquisition and
    /// returns the record as it stands afterwards.
    pub fn modify(
        &self,
        id: &Uuid,
        edit: impl FnOnce(&mut Task),
    ) -> Result<(Outcome, Option<Task>)> {
        let mut list = self.list.lock();
        let outcome = list.modify(id, edit)?;
        Ok((outcome, list.get(id).cloned()))
    }

    pub fn remove(&self, id: &Uuid) -> Result<Outcome> {
        self.list.lock().remove(id)
    }

    pub fn toggle_complete(&self, id: &Uuid) -> Result<Outcome> {
        self.list.lock().toggle_complete(id)
    }

    pub fn by_date(&self, date: NaiveDate) -> Vec<Task> {
        self.list.lock().by_date(date)
    }

    pub fn week_of(
        &self,
        anchor: NaiveDate,
        week_start: Weekday,
        limit: Option<usize>,
    ) -> Option<WeekView> {
        self.list.lock().week_of(anchor, week_start, limit)
    }

    /// Reorders the whole collection with the configured prioritizer and
    /// returns the collection as committed.
    pub async fn reprioritize(&self) -> Result<Vec<Task>> {
        let prioritizer = Arc::clone(&self.prioritizer);
        self.reprioritize_with(prioritizer.as_ref()).await
    }

    /// Like [`Planner::reprioritize`] with a caller-supplied policy.
    ///
    /// Priorities are rewritten all at once from a single ranking, or not at
    /// all. Tasks added while the prioritizer runs keep their priority and
    /// tasks removed meanwhile stay removed. When two calls overlap, the one
    /// that commits last decides the priorities.
    pub async fn reprioritize_with(&self, prioritizer: &dyn Prioritizer) -> Result<Vec<Task>> {
        let snapshot = self.all();
        let ids: Vec<Uuid> = snapshot.iter().map(|t| t.id).collect();

        let ranked = prioritizer.rank(snapshot).await.map_err(|e| {
            warn!(error = %e, "prioritizer failed, keeping current order");
            PlannerError::PrioritizationFailed {
                reason: e.to_string(),
            }
        })?;
        let order = ranked_order(&ids, &ranked).inspect_err(|e| {
            warn!(error = %e, "prioritizer returned an unusable ranking");
        })?;

        let mut list = self.list.lock();
        let applied = list.apply_ranking(&order)?;
        info!(ranked = order.len(), applied, "reprioritized tasks");
        Ok(list.all().to_vec())
    }
}

/// Ids of `ranked` in order, provided they are exactly the snapshot ids.
fn ranked_order(snapshot: &[Uuid], ranked: &[Task]) -> Result<Vec<Uuid>> {
    let failed = |reason: String| PlannerError::PrioritizationFailed { reason };

    if ranked.len() != snapshot.len() {
        return Err(failed(format!(
            "expected {} tasks back, got {}",
            snapshot.len(),
            ranked.len()
        )));
    }

    let expected: HashSet<&Uuid> = snapshot.iter().collect();
    let mut seen = HashSet::with_capacity(ranked.len());
    for task in ranked {
        if !expected.contains(&task.id) {
            return Err(failed(format!("unknown task {}", task.id)));
        }
        if !seen.insert(task.id) {
            return Err(failed(format!("task {} ranked twice", task.id)));
        }
    }
    Ok(ranked.iter().map(|t| t.id).collect())
}
