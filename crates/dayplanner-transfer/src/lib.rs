use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tag {
    Work,
    Personal,
    Trading,
    Health,
}

/// Request to create a new task. Missing fields take the planner defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tag: Option<Tag>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<String>,
}

/// Request to update an existing task; absent fields are left as they are.
/// `"description": null` clears the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    pub tag: Option<Tag>,
    pub priority: Option<u32>,
    pub completed: Option<bool>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Response containing a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tag: Tag,
    pub priority: u32,
    pub completed: bool,
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub tasks: Vec<TaskResponse>,
    /// Tasks beyond the preview limit.
    pub more: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekResponse {
    pub days: Vec<DayResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotesBody {
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionQuery {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversionResponse {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub result: f64,
}

/// Calculator keys pressed in order, e.g. `["1", "2", "+", "3", "="]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorRequest {
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculatorResponse {
    pub display: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Countdown,
    Stopwatch,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Optional settings applied before the timer starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartTimerRequest {
    pub mode: Option<TimerMode>,
    pub minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimerResponse {
    pub mode: TimerMode,
    pub state: TimerState,
    pub seconds: u64,
    pub display: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
