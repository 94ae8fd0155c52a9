use askama::Template;
use axum::{
    Form, Router,
    extract::{Extension, Path, State},
    response::{Html, Redirect},
    routing::get,
};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::category::{Category, CategoryService};
use crate::task::{Task, TaskDetails, TaskService};
use crate::user::{User, UserService};
use crate::web::{AppState, PageContext, WebError, redirect_with_flash};

/// Form submitted by the add task page.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    task_name: String,
    /// Username the task is assigned to.
    user_name: String,
    #[serde(default)]
    task_description: String,
    /// Checkbox; present only when ticked.
    #[serde(default)]
    is_urgent: Option<String>,
    due_date: String,
}

/// Form submitted by the full edit page.
#[derive(Debug, Deserialize)]
pub struct EditTaskForm {
    status: String,
    task_name: String,
    user_name: String,
    #[serde(default)]
    task_description: String,
    #[serde(default)]
    is_urgent: Option<String>,
    due_date: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusForm {
    status: String,
}

impl TaskForm {
    /// Checks the required fields and returns the message to flash when one is unusable.
    fn validate(self) -> Result<TaskDetails, &'static str> {
        validate_details(
            self.task_name,
            self.user_name,
            self.task_description,
            self.is_urgent,
            self.due_date,
        )
    }
}

impl EditTaskForm {
    fn validate(self) -> Result<(String, TaskDetails), &'static str> {
        let status = validate_status(self.status)?;
        let details = validate_details(
            self.task_name,
            self.user_name,
            self.task_description,
            self.is_urgent,
            self.due_date,
        )?;
        Ok((status, details))
    }
}

fn validate_details(
    task_name: String,
    assigned_to: String,
    task_description: String,
    is_urgent: Option<String>,
    due_date: String,
) -> Result<TaskDetails, &'static str> {
    let task_name = task_name.trim().to_string();
    if task_name.is_empty() {
        return Err("Please enter a task name");
    }
    let assigned_to = assigned_to.trim().to_string();
    if assigned_to.is_empty() {
        return Err("Please choose who the task is assigned to");
    }
    let due_date = due_date.trim().to_string();
    if NaiveDate::parse_from_str(&due_date, "%Y-%m-%d").is_err() {
        return Err("Please enter a due date as YYYY-MM-DD");
    }
    Ok(TaskDetails {
        task_name,
        assigned_to,
        task_description,
        is_urgent: is_urgent.is_some(),
        due_date,
    })
}

fn validate_status(status: String) -> Result<String, &'static str> {
    let status = status.trim().to_string();
    if status.is_empty() {
        return Err("Please choose a status");
    }
    Ok(status)
}

#[derive(Template)]
#[template(path = "tasks.html")]
struct TasksTemplate {
    page: PageContext,
    tasks: Vec<Task>,
}

#[derive(Template)]
#[template(path = "add_task.html")]
struct AddTaskTemplate {
    page: PageContext,
    users: Vec<User>,
}

#[derive(Template)]
#[template(path = "edit_task.html")]
struct EditTaskTemplate {
    page: PageContext,
    task: Task,
    users: Vec<User>,
    categories: Vec<Category>,
}

#[derive(Template)]
#[template(path = "edit_task_status.html")]
struct EditTaskStatusTemplate {
    page: PageContext,
    task: Task,
    categories: Vec<Category>,
}

/// Handler for GET / and /get_tasks that lists every task.
#[tracing::instrument(skip(state, jar))]
async fn tasks_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    current_user: Option<Extension<CurrentUser>>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let tasks = TaskService::new(&state.db).get_all_tasks().await?;
    let (jar, page) = PageContext::take(jar, &state.auth, current_user.as_deref());
    let html = TasksTemplate { page, tasks }.render()?;
    Ok((jar, Html(html)))
}

/// Handler for serving the add task form.
#[tracing::instrument(skip(state, jar))]
async fn add_task_form_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let users = UserService::new(&state.db).get_all_users().await?;
    let (jar, page) = PageContext::take(jar, &state.auth, Some(&current_user));
    let html = AddTaskTemplate { page, users }.render()?;
    Ok((jar, Html(html)))
}

/// Handler for creating a task via POST request.
#[tracing::instrument(skip(state, jar))]
async fn add_task_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(current_user): Extension<CurrentUser>,
    Form(form): Form<TaskForm>,
) -> Result<(CookieJar, Redirect), WebError> {
    let details = match form.validate() {
        Ok(details) => details,
        Err(message) => return redirect_with_flash(jar, &state.auth, message, "/add_task"),
    };

    TaskService::new(&state.db)
        .create_task(details, current_user.username)
        .await?;
    redirect_with_flash(jar, &state.auth, "Task Successfully Added", "/get_tasks")
}

/// Handler for serving the full edit form of a task.
#[tracing::instrument(skip(state, jar))]
async fn edit_task_form_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let task = TaskService::new(&state.db).get_task_by_id(id).await?;
    let users = UserService::new(&state.db).get_all_users().await?;
    let categories = CategoryService::new(&state.db).get_all_categories().await?;

    let (jar, page) = PageContext::take(jar, &state.auth, Some(&current_user));
    let html = EditTaskTemplate {
        page,
        task,
        users,
        categories,
    }
    .render()?;
    Ok((jar, Html(html)))
}

/// Handler for updating a task via POST request.
#[tracing::instrument(skip(state, jar))]
async fn edit_task_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Form(form): Form<EditTaskForm>,
) -> Result<(CookieJar, Redirect), WebError> {
    let (status, details) = match form.validate() {
        Ok(valid) => valid,
        Err(message) => {
            return redirect_with_flash(jar, &state.auth, message, &format!("/edit_task/{id}"));
        }
    };

    TaskService::new(&state.db)
        .edit_task_by_id(id, status, details, current_user.username)
        .await?;
    redirect_with_flash(jar, &state.auth, "Task Successfully Updated", "/get_tasks")
}

/// Handler for serving the status-only edit form.
#[tracing::instrument(skip(state, jar))]
async fn edit_task_status_form_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let task = TaskService::new(&state.db).get_task_by_id(id).await?;
    let categories = CategoryService::new(&state.db).get_all_categories().await?;

    let (jar, page) = PageContext::take(jar, &state.auth, Some(&current_user));
    let html = EditTaskStatusTemplate {
        page,
        task,
        categories,
    }
    .render()?;
    Ok((jar, Html(html)))
}

/// Handler for changing only the status of a task via POST request.
#[tracing::instrument(skip(state, jar))]
async fn edit_task_status_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i32>,
    Form(form): Form<TaskStatusForm>,
) -> Result<(CookieJar, Redirect), WebError> {
    let status = match validate_status(form.status) {
        Ok(status) => status,
        Err(message) => {
            return redirect_with_flash(
                jar,
                &state.auth,
                message,
                &format!("/edit_task_status/{id}"),
            );
        }
    };

    TaskService::new(&state.db)
        .edit_task_status_by_id(id, status)
        .await?;
    redirect_with_flash(jar, &state.auth, "Task Successfully Updated", "/get_tasks")
}

/// Handler for GET /delete_task/{id}.
#[tracing::instrument(skip(state, jar))]
async fn delete_task_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> Result<(CookieJar, Redirect), WebError> {
    TaskService::new(&state.db).delete_task_by_id(id).await?;
    redirect_with_flash(jar, &state.auth, "Task Successfully Deleted", "/get_tasks")
}

/// Routes that list tasks and are open to every visitor.
pub fn create_task_list_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(tasks_handler))
        .route("/get_tasks", get(tasks_handler))
        .with_state(state)
}

/// Routes that change tasks. Callers must layer the login redirect on top.
pub fn create_task_router(state: AppState) -> Router {
    Router::new()
        .route("/add_task", get(add_task_form_handler).post(add_task_handler))
        .route(
            "/edit_task/{id}",
            get(edit_task_form_handler).post(edit_task_handler),
        )
        .route(
            "/edit_task_status/{id}",
            get(edit_task_status_form_handler).post(edit_task_status_handler),
        )
        .route("/delete_task/{id}", get(delete_task_handler))
        .with_state(state)
}
