use crate::task::{Task, TaskService};
use crate::web::AppState;
use crate::web::api::v1::ServerErrorResponse;
use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON representation of a Task for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskJson {
    /// Unique identifier for the task
    id: i32,
    /// Free-text status label, e.g. "In Progress"
    status: String,
    task_name: String,
    /// Username the task is assigned to
    assigned_to: String,
    task_description: String,
    is_urgent: bool,
    /// Due date as YYYY-MM-DD
    due_date: String,
    /// Username of the task's creator
    created_by: String,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            status: task.status().to_string(),
            task_name: task.task_name().to_string(),
            assigned_to: task.assigned_to().to_string(),
            task_description: task.task_description().to_string(),
            is_urgent: task.is_urgent(),
            due_date: task.due_date().to_string(),
            created_by: task.created_by().to_string(),
        }
    }
}

/// API response for listing all tasks.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TasksResponse {
    /// List of tasks
    pub tasks: Vec<TaskJson>,
    /// Total number of tasks
    pub count: usize,
}

/// Handler for GET /api/v1/tasks - Returns all tasks in JSON format.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = TasksResponse),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_handler(
    State(state): State<AppState>,
) -> Result<Json<TasksResponse>, (StatusCode, Json<ServerErrorResponse>)> {
    match TaskService::new(&state.db).get_all_tasks().await {
        Ok(tasks) => {
            let tasks: Vec<TaskJson> = tasks.into_iter().map(TaskJson::from).collect();
            let count = tasks.len();
            Ok(Json(TasksResponse { tasks, count }))
        }
        Err(err) => {
            tracing::error!("Failed to get tasks: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to retrieve tasks".to_string(),
                )),
            ))
        }
    }
}

/// Creates and returns the tasks API router.
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(get_tasks_handler))
        .with_state(state)
}
