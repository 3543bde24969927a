//! Page fixtures and a local update server

use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Workout page with one group of each kind
pub const WORKOUT_PAGE: &str = r#"
[[standalone]]
id = "workout-date"
element = "input"
value = "2024-05-06"

[[containers]]
class = "exercise-info"
heading = "Bench Press"

[[containers.fields]]
element = "input"
name = "weight_used"
value = "135"

[[containers.fields]]
element = "input"
name = "sets_completed"
value = "3"

[[containers.fields]]
element = "input"
name = "reps_completed"
value = "8"

[[containers.fields]]
element = "input"
name = "difficulty"
value = "moderate"

[[containers.fields]]
element = "textarea"
name = "exercise_notes"

[[containers]]
class = "log-container-muscle"
heading = "Chest"

[[containers.fields]]
element = "select"
name = "pump_level"
value = "ok"

[[containers.fields]]
element = "select"
name = "pre_workout_soreness"
value = "none"

[[containers.fields]]
element = "select"
name = "pre_workout_recovery"
value = "good"

[[containers.fields]]
element = "textarea"
name = "muscle_group_notes"

[[containers]]
class = "log-container-overall"

[[containers.fields]]
element = "input"
name = "workout_id"
value = "7"

[[containers.fields]]
element = "input"
name = "workout_duration"
value = "60"

[[containers.fields]]
element = "select"
name = "workout_type"
value = "Push"

[[containers.fields]]
element = "select"
name = "performance_rating"
value = "good"

[[containers.fields]]
element = "select"
name = "fatigue_induced"
value = "moderate"

[[containers.fields]]
element = "textarea"
name = "workout_notes"
"#;

/// Scratch directory holding a page file and a config file
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        std::fs::write(dir.path().join("page.toml"), WORKOUT_PAGE)?;
        Ok(Self { dir })
    }

    pub fn page(&self) -> PathBuf {
        self.dir.path().join("page.toml")
    }

    pub fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn write_script(&self, script: &str) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join("edits.txt");
        std::fs::write(&path, script)?;
        Ok(path)
    }
}

/// Bodies received per endpoint, in arrival order
pub type Received = Arc<Mutex<Vec<(String, Value)>>>;

async fn accept(
    State(received): State<Received>,
    UrlPath(endpoint): UrlPath<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Ok(mut received) = received.lock() {
        received.push((endpoint.clone(), body));
    }
    if endpoint == "update_curr_workout_date" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "date is locked"})),
        );
    }
    (StatusCode::OK, Json(json!({"message": "updated"})))
}

/// Start a server that records every update and rejects date changes
pub async fn spawn_update_server() -> anyhow::Result<(String, Received)> {
    let received = Received::default();
    let app = Router::new()
        .route("/{endpoint}", post(accept))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{}", addr), received))
}
