//! Pluggable task reordering.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::{Tag, Task};

#[derive(Debug, Error)]
pub enum PrioritizeError {
    #[error("prioritizer rejected the tasks: {0}")]
    Rejected(String),

    #[error("prioritizer unavailable: {0}")]
    Unavailable(String),
}

/// Reorders a set of tasks. Implementations must return the same tasks they
/// were given, in the order they should be worked on.
#[async_trait]
pub trait Prioritizer: Send + Sync {
    async fn rank(&self, tasks: Vec<Task>) -> Result<Vec<Task>, PrioritizeError>;
}

/// Weight per tag; a tag missing from the table weighs 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagWeights {
    weights: HashMap<Tag, u32>,
}

impl TagWeights {
    pub fn empty() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    pub fn with(mut self, tag: Tag, weight: u32) -> Self {
        self.weights.insert(tag, weight);
        self
    }

    pub fn weight(&self, tag: Tag) -> u32 {
        self.weights.get(&tag).copied().unwrap_or(0)
    }
}

impl Default for TagWeights {
    fn default() -> Self {
        Self::empty()
            .with(Tag::Work, 4)
            .with(Tag::Health, 3)
            .with(Tag::Personal, 2)
            .with(Tag::Trading, 1)
    }
}

/// Sorts tasks by descending tag weight, keeping input order among equal
/// weights.
#[derive(Debug, Clone, Default)]
pub struct TagWeightPrioritizer {
    weights: TagWeights,
    latency: Duration,
}

impl TagWeightPrioritizer {
    pub fn new(weights: TagWeights) -> Self {
        Self {
            weights,
            latency: Duration::ZERO,
        }
    }

    /// Waits this long before answering, like a remote ranking service would.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl Prioritizer for TagWeightPrioritizer {
    async fn rank(&self, mut tasks: Vec<Task>) -> Result<Vec<Task>, PrioritizeError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        tasks.sort_by_key(|t| Reverse(self.weights.weight(t.tag)));
        debug!(count = tasks.len(), "ranked tasks by tag weight");
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskDraft;
    use chrono::NaiveDate;

    fn tasks(tags: &[Tag]) -> Vec<Task> {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        tags.iter()
            .enumerate()
            .map(|(i, tag)| Task::from_draft(TaskDraft::new(format!("{tag:?} {i}"), *tag, date), i as u32))
            .collect()
    }

    #[tokio::test]
    async fn test_default_policy_order() {
        let input = tasks(&[Tag::Personal, Tag::Work, Tag::Trading, Tag::Health]);
        let ranked = TagWeightPrioritizer::default().rank(input).await.unwrap();
        let order: Vec<Tag> = ranked.iter().map(|t| t.tag).collect();
        assert_eq!(order, [Tag::Work, Tag::Health, Tag::Personal, Tag::Trading]);
    }

    #[tokio::test]
    async fn test_equal_weights_keep_input_order() {
        let input = tasks(&[Tag::Work, Tag::Trading, Tag::Work, Tag::Work]);
        let ids: Vec<_> = input.iter().map(|t| t.id).collect();
        let ranked = TagWeightPrioritizer::default().rank(input).await.unwrap();
        let ranked_ids: Vec<_> = ranked.iter().map(|t| t.id).collect();
        assert_eq!(ranked_ids, [ids[0], ids[2], ids[3], ids[1]]);
    }

    #[tokio::test]
    async fn test_missing_tag_weighs_zero() {
        let weights = TagWeights::empty().with(Tag::Trading, 10);
        assert_eq!(weights.weight(Tag::Work), 0);

        let input = tasks(&[Tag::Work, Tag::Trading]);
        let ranked = TagWeightPrioritizer::new(weights).rank(input).await.unwrap();
        assert_eq!(ranked[0].tag, Tag::Trading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_awaited() {
        let prioritizer = TagWeightPrioritizer::default().with_latency(Duration::from_secs(2));
        let started = tokio::time::Instant::now();
        prioritizer.rank(tasks(&[Tag::Work])).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
