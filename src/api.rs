use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate, Weekday};
use dayplanner_model::{
    DEFAULT_TIME, DaySchedule, Notes, Outcome, Planner, PlannerError, Tag as ModelTag, Task,
    TaskDraft,
};
use dayplanner_toolbox::{
    CalcError, Calculator, CurrencyError, RateTable, Timer, TimerError, TimerHandle,
    TimerMode as ToolTimerMode, TimerState as ToolTimerState,
};
use dayplanner_transfer::{
    CalculatorRequest, CalculatorResponse, ConversionQuery, ConversionResponse,
    CreateTaskRequest, DayResponse, ErrorResponse, NotesBody, StartTimerRequest, Tag,
    TaskResponse, TimerMode, TimerResponse, TimerState, UpdateTaskRequest, WeekResponse,
};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub planner: Planner,
    pub notes: Notes,
    pub timer: TimerHandle,
    pub rates: Arc<RateTable>,
    pub week_start: Weekday,
    pub week_preview: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/prioritize", post(prioritize_tasks))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tasks/{id}/toggle", post(toggle_task))
        .route("/days/{date}", get(day_tasks))
        .route("/weeks/{date}", get(week_tasks))
        .route("/notes", get(get_notes).put(put_notes))
        .route("/tools/currency", get(convert_currency))
        .route("/tools/calculator", post(calculate))
        .route("/timer", get(timer_status))
        .route("/timer/start", post(start_timer))
        .route("/timer/pause", post(pause_timer))
        .route("/timer/reset", post(reset_timer))
        .with_state(state)
}

// Task handlers

async fn list_tasks(State(state): State<AppState>) -> Json<Vec<TaskResponse>> {
    info!("Listing tasks");
    Json(state.planner.all().into_iter().map(task_to_response).collect())
}

async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), AppError> {
    info!(title = %req.title, "Creating task");
    let draft = TaskDraft {
        title: req.title,
        description: req.description,
        tag: req.tag.map(tag_to_model).unwrap_or(ModelTag::Work),
        date: req.date.unwrap_or_else(|| Local::now().date_naive()),
        time: req.time.unwrap_or_else(|| DEFAULT_TIME.to_string()),
    };
    let task = state
        .planner
        .add(draft)?
        .ok_or_else(|| AppError::Invalid("Task title must not be blank".to_string()))?;
    Ok((StatusCode::CREATED, Json(task_to_response(task))))
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponse>, AppError> {
    info!(%id, "Fetching task");
    let task = state.planner.get(&id).ok_or_else(|| not_found(&id))?;
    Ok(Json(task_to_response(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    info!(%id, "Updating task");
    let (outcome, task) = state.planner.modify(&id, |task| {
        if let Some(title) = req.title {
            task.title = title;
        }
        if let Some(description) = req.description {
            task.description = description.filter(|d| !d.trim().is_empty());
        }
        if let Some(tag) = req.tag {
            task.tag = tag_to_model(tag);
        }
        if let Some(priority) = req.priority {
            task.priority = priority;
        }
        if let Some(completed) = req.completed {
            task.completed = completed;
        }
        if let Some(date) = req.date {
            task.date = date;
        }
        if let Some(time) = req.time {
            task.time = time;
        }
    })?;

    match (outcome, task) {
        (Outcome::Applied, Some(task)) => Ok(Json(task_to_response(task))),
        (Outcome::Rejected, _) => Err(AppError::Invalid(
            "Task title must not be blank".to_string(),
        )),
        _ => Err(not_found(&id)),
    }
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!(%id, "Deleting task");
    match state.planner.remove(&id)? {
        Outcome::Applied => Ok(StatusCode::NO_CONTENT),
        _ => Err(not_found(&id)),
    }
}

async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponse>, AppError> {
    info!(%id, "Toggling task");
    if !state.planner.toggle_complete(&id)?.is_applied() {
        return Err(not_found(&id));
    }
    let task = state.planner.get(&id).ok_or_else(|| not_found(&id))?;
    Ok(Json(task_to_response(task)))
}

async fn prioritize_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, AppError> {
    info!("Reprioritizing tasks");
    let tasks = state.planner.reprioritize().await?;
    Ok(Json(tasks.into_iter().map(task_to_response).collect()))
}

async fn day_tasks(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Json<Vec<TaskResponse>> {
    info!(%date, "Listing tasks for day");
    Json(
        state
            .planner
            .by_date(date)
            .into_iter()
            .map(task_to_response)
            .collect(),
    )
}

async fn week_tasks(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<WeekResponse>, AppError> {
    info!(%date, "Listing tasks for week");
    let week = state
        .planner
        .week_of(date, state.week_start, Some(state.week_preview))
        .ok_or_else(|| {
            AppError::OutOfRange(format!("The week of {date} is outside the calendar"))
        })?;
    Ok(Json(WeekResponse {
        days: week.days.into_iter().map(day_to_response).collect(),
    }))
}

// Notes

async fn get_notes(State(state): State<AppState>) -> Result<Json<NotesBody>, AppError> {
    Ok(Json(NotesBody {
        notes: state.notes.read()?,
    }))
}

async fn put_notes(
    State(state): State<AppState>,
    Json(body): Json<NotesBody>,
) -> Result<Json<NotesBody>, AppError> {
    info!(len = body.notes.len(), "Saving notes");
    state.notes.write(&body.notes)?;
    Ok(Json(body))
}

// Toolbox

async fn convert_currency(
    State(state): State<AppState>,
    Query(query): Query<ConversionQuery>,
) -> Result<Json<ConversionResponse>, AppError> {
    let conversion = state.rates.convert(query.amount, &query.from, &query.to)?;
    Ok(Json(ConversionResponse {
        from: conversion.from,
        to: conversion.to,
        amount: conversion.amount,
        rate: conversion.rate,
        result: round_cents(conversion.result),
    }))
}

async fn calculate(Json(req): Json<CalculatorRequest>) -> Result<Json<CalculatorResponse>, AppError> {
    let mut calculator = Calculator::new();
    calculator.press_all(req.keys.iter().map(String::as_str))?;
    Ok(Json(CalculatorResponse {
        display: calculator.display().to_string(),
    }))
}

async fn timer_status(State(state): State<AppState>) -> Json<TimerResponse> {
    Json(timer_to_response(&state.timer.snapshot()))
}

async fn start_timer(
    State(state): State<AppState>,
    Json(req): Json<StartTimerRequest>,
) -> Result<Json<TimerResponse>, AppError> {
    state
        .timer
        .configure(req.mode.map(timer_mode_to_tool), req.minutes)?;
    let timer = state.timer.start()?;
    info!(seconds = timer.seconds(), "Timer started");
    Ok(Json(timer_to_response(&timer)))
}

async fn pause_timer(State(state): State<AppState>) -> Result<Json<TimerResponse>, AppError> {
    let timer = state.timer.pause()?;
    Ok(Json(timer_to_response(&timer)))
}

async fn reset_timer(State(state): State<AppState>) -> Json<TimerResponse> {
    Json(timer_to_response(&state.timer.reset()))
}

// Helper functions

fn not_found(id: &Uuid) -> AppError {
    AppError::NotFound(format!("Task with id {} not found", id))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn task_to_response(task: Task) -> TaskResponse {
    TaskResponse {
        id: task.id,
        title: task.title,
        description: task.description,
        tag: model_tag_to_transfer(task.tag),
        priority: task.priority,
        completed: task.completed,
        date: task.date,
        time: task.time,
    }
}

fn day_to_response(day: DaySchedule) -> DayResponse {
    DayResponse {
        date: day.date,
        tasks: day.tasks.into_iter().map(task_to_response).collect(),
        more: day.hidden,
    }
}

fn timer_to_response(timer: &Timer) -> TimerResponse {
    TimerResponse {
        mode: match timer.mode() {
            ToolTimerMode::Countdown => TimerMode::Countdown,
            ToolTimerMode::Stopwatch => TimerMode::Stopwatch,
        },
        state: match timer.state() {
            ToolTimerState::Idle => TimerState::Idle,
            ToolTimerState::Running => TimerState::Running,
            ToolTimerState::Paused => TimerState::Paused,
            ToolTimerState::Completed => TimerState::Completed,
        },
        seconds: timer.seconds(),
        display: timer.display(),
    }
}

fn timer_mode_to_tool(mode: TimerMode) -> ToolTimerMode {
    match mode {
        TimerMode::Countdown => ToolTimerMode::Countdown,
        TimerMode::Stopwatch => ToolTimerMode::Stopwatch,
    }
}

fn tag_to_model(tag: Tag) -> ModelTag {
    match tag {
        Tag::Work => ModelTag::Work,
        Tag::Personal => ModelTag::Personal,
        Tag::Trading => ModelTag::Trading,
        Tag::Health => ModelTag::Health,
    }
}

fn model_tag_to_transfer(tag: ModelTag) -> Tag {
    match tag {
        ModelTag::Work => Tag::Work,
        ModelTag::Personal => Tag::Personal,
        ModelTag::Trading => Tag::Trading,
        ModelTag::Health => Tag::Health,
    }
}

// Error handling

#[derive(Debug)]
pub enum AppError {
    Planner(PlannerError),
    NotFound(String),
    Invalid(String),
    OutOfRange(String),
    Timer(TimerError),
    Calculator(CalcError),
    Currency(CurrencyError),
}

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        AppError::Planner(err)
    }
}

impl From<TimerError> for AppError {
    fn from(err: TimerError) -> Self {
        AppError::Timer(err)
    }
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        AppError::Calculator(err)
    }
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        AppError::Currency(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Planner(err) if err.is_prioritization_failure() => {
                warn!(error = %err, "prioritization failed");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            AppError::Planner(err) => {
                error!(error = %err, "storage error while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::NotFound(msg) => {
                warn!(message = %msg, "resource not found");
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::Invalid(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::OutOfRange(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Timer(err) => (StatusCode::CONFLICT, err.to_string()),
            AppError::Calculator(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            AppError::Currency(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use chrono::Datelike;
    use axum::http::Request;
    use dayplanner_model::{
        KeyValueStore, MemoryStore, PrioritizeError, Prioritizer, StoreFormat,
        TagWeightPrioritizer, TaskStore,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct FailingPrioritizer;

    #[async_trait]
    impl Prioritizer for FailingPrioritizer {
        async fn rank(&self, _tasks: Vec<Task>) -> Result<Vec<Task>, PrioritizeError> {
            Err(PrioritizeError::Rejected("quota exceeded".to_string()))
        }
    }

    fn state_with(prioritizer: Arc<dyn Prioritizer>) -> AppState {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let planner = Planner::open(
            TaskStore::new(backend.clone(), StoreFormat::Json),
            prioritizer,
        )
        .unwrap();
        AppState {
            planner,
            notes: Notes::new(backend),
            timer: TimerHandle::new(Timer::countdown(5)),
            rates: Arc::new(RateTable::default()),
            week_start: Weekday::Sun,
            week_preview: 3,
        }
    }

    fn app() -> Router {
        router(state_with(Arc::new(TagWeightPrioritizer::default())))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        // Extractor rejections come back as plain text.
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    async fn create(app: &Router, title: &str, tag: &str, date: &str) -> Value {
        let (status, json) = send(
            app,
            "POST",
            "/tasks",
            Some(json!({ "title": title, "tag": tag, "date": date })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json
    }

    #[tokio::test]
    async fn test_task_crud() {
        let app = app();

        let created = create(&app, "Write report", "Work", "2024-03-14").await;
        assert_eq!(created["priority"], 0);
        assert_eq!(created["completed"], false);
        assert_eq!(created["time"], "09:00");
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(&app, "GET", &format!("/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/tasks/{id}"),
            Some(json!({ "title": "Write final report", "tag": "Health" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Write final report");
        assert_eq!(updated["tag"], "Health");
        assert_eq!(updated["date"], "2024-03-14");

        let (status, toggled) = send(&app, "POST", &format!("/tasks/{id}/toggle"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(toggled["completed"], true);

        let (status, _) = send(&app, "DELETE", &format!("/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &format!("/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, all) = send(&app, "GET", "/tasks", None).await;
        assert_eq!(all.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let app = app();
        let (status, body) = send(&app, "POST", "/tasks", Some(json!({ "title": "  " }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("blank"));

        let created = create(&app, "Keep", "Work", "2024-03-14").await;
        let id = created["id"].as_str().unwrap();
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/tasks/{id}"),
            Some(json!({ "title": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, all) = send(&app, "GET", "/tasks", None).await;
        assert_eq!(all[0]["title"], "Keep");
    }

    #[tokio::test]
    async fn test_unknown_task_is_not_found() {
        let app = app();
        let id = Uuid::new_v4();
        let (status, _) = send(&app, "GET", &format!("/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "POST", &format!("/tasks/{id}/toggle"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "PUT", &format!("/tasks/{id}"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_prioritize_and_day_view() {
        let app = app();
        for (title, tag) in [
            ("call mom", "Personal"),
            ("ship release", "Work"),
            ("rebalance", "Trading"),
            ("dentist", "Health"),
        ] {
            create(&app, title, tag, "2024-03-14").await;
        }

        let (status, tasks) = send(&app, "POST", "/tasks/prioritize", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tasks.as_array().unwrap().len(), 4);

        let (_, day) = send(&app, "GET", "/days/2024-03-14", None).await;
        let titles: Vec<&str> = day
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["ship release", "dentist", "call mom", "rebalance"]);
    }

    #[tokio::test]
    async fn test_prioritize_failure_is_bad_gateway() {
        let app = router(state_with(Arc::new(FailingPrioritizer)));
        create(&app, "a", "Trading", "2024-03-14").await;
        create(&app, "b", "Work", "2024-03-14").await;
        let (_, before) = send(&app, "GET", "/tasks", None).await;

        let (status, body) = send(&app, "POST", "/tasks/prioritize", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("prioritization failed"));

        let (_, after) = send(&app, "GET", "/tasks", None).await;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_week_view() {
        let app = app();
        for i in 0..4 {
            create(&app, &format!("monday {i}"), "Work", "2024-03-11").await;
        }
        create(&app, "saturday", "Health", "2024-03-16").await;

        let (status, week) = send(&app, "GET", "/weeks/2024-03-13", None).await;
        assert_eq!(status, StatusCode::OK);
        let days = week["days"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["date"], "2024-03-10");
        assert_eq!(days[1]["tasks"].as_array().unwrap().len(), 3);
        assert_eq!(days[1]["more"], 1);
        assert_eq!(days[6]["tasks"][0]["title"], "saturday");

        let (status, _) = send(&app, "GET", "/weeks/not-a-date", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_week_view_at_calendar_edges() {
        let last = NaiveDate::MAX;
        let mut state = state_with(Arc::new(TagWeightPrioritizer::default()));
        state.week_start = last.weekday().succ();
        let app = router(state);
        let (status, week) = send(&app, "GET", &format!("/weeks/{last}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let days = week["days"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[6]["date"], last.to_string());

        let mut state = state_with(Arc::new(TagWeightPrioritizer::default()));
        state.week_start = last.weekday();
        let app = router(state);
        let (status, _) = send(&app, "GET", &format!("/weeks/{last}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let first = NaiveDate::MIN;
        let mut state = state_with(Arc::new(TagWeightPrioritizer::default()));
        state.week_start = first.weekday().succ();
        let app = router(state);
        let (status, body) = send(&app, "GET", &format!("/weeks/{first}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("outside the calendar"));
    }

    #[tokio::test]
    async fn test_update_merges_and_clears_description() {
        let app = app();
        let created = create(&app, "Write report", "Work", "2024-03-14").await;
        let id = created["id"].as_str().unwrap().to_string();
        send(
            &app,
            "PUT",
            &format!("/tasks/{id}"),
            Some(json!({ "description": "Q1 numbers" })),
        )
        .await;
        send(&app, "POST", &format!("/tasks/{id}/toggle"), None).await;

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/tasks/{id}"),
            Some(json!({ "title": "Write final report" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["completed"], true);
        assert_eq!(updated["description"], "Q1 numbers");

        let (status, cleared) = send(
            &app,
            "PUT",
            &format!("/tasks/{id}"),
            Some(json!({ "description": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleared["description"], Value::Null);
        assert_eq!(cleared["title"], "Write final report");
    }

    #[tokio::test]
    async fn test_notes() {
        let app = app();
        let (_, empty) = send(&app, "GET", "/notes", None).await;
        assert_eq!(empty["notes"], "");

        let (status, _) = send(&app, "PUT", "/notes", Some(json!({ "notes": "buy milk" }))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, saved) = send(&app, "GET", "/notes", None).await;
        assert_eq!(saved["notes"], "buy milk");
    }

    #[tokio::test]
    async fn test_currency() {
        let app = app();
        let (status, body) = send(&app, "GET", "/tools/currency?from=USD&to=INR&amount=2.5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], 208.0);
        assert_eq!(body["rate"], 83.2);

        let (status, _) = send(&app, "GET", "/tools/currency?from=USD&to=XYZ&amount=1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_calculator() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/tools/calculator",
            Some(json!({ "keys": ["7", "+", "3", "×", "2", "="] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["display"], "20");

        let (status, _) = send(
            &app,
            "POST",
            "/tools/calculator",
            Some(json!({ "keys": ["1", "÷", "0", "="] })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_lifecycle() {
        let app = app();
        let (_, idle) = send(&app, "GET", "/timer", None).await;
        assert_eq!(idle["state"], "idle");

        let (status, started) = send(&app, "POST", "/timer/start", Some(json!({ "minutes": 1 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(started["state"], "running");
        assert_eq!(started["display"], "01:00");

        let (status, _) = send(&app, "POST", "/timer/start", Some(json!({}))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        tokio::time::sleep(std::time::Duration::from_millis(10_500)).await;
        let (_, paused) = send(&app, "POST", "/timer/pause", None).await;
        assert_eq!(paused["state"], "paused");
        assert_eq!(paused["seconds"], 50);

        let (_, reset) = send(&app, "POST", "/timer/reset", None).await;
        assert_eq!(reset["state"], "idle");
        assert_eq!(reset["seconds"], 0);

        let (_, stopwatch) = send(
            &app,
            "POST",
            "/timer/start",
            Some(json!({ "mode": "stopwatch" })),
        )
        .await;
        assert_eq!(stopwatch["mode"], "stopwatch");
        assert_eq!(stopwatch["display"], "00:00");
    }
}
