use askama::Template;
use axum::{
    Router,
    extract::{Extension, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::CookieJar;

use crate::auth::CurrentUser;
use crate::task::{Task, TaskService};
use crate::user::{User, UserService};
use crate::web::{AppState, PageContext, WebError};

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate {
    page: PageContext,
    username: String,
    today: String,
    tasks: Vec<Task>,
    users: Vec<User>,
}

/// Handler for GET and POST /profile/{username}.
///
/// Always shows the logged-in user's own profile together with the tasks due
/// today; visitors without a session are sent to the login page.
#[tracing::instrument(skip(state, jar))]
async fn profile_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    current_user: Option<Extension<CurrentUser>>,
    Path(_username): Path<String>,
) -> Result<Response, WebError> {
    let Some(Extension(current_user)) = current_user else {
        return Ok(Redirect::to("/login").into_response());
    };

    let user_service = UserService::new(&state.db);
    let Some(user) = user_service.find_by_username(&current_user.username).await? else {
        tracing::warn!("Session refers to missing user {}", current_user.username);
        return Ok(Redirect::to("/login").into_response());
    };

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let tasks = TaskService::new(&state.db).get_tasks_due_on(&today).await?;
    let users = user_service.get_all_users().await?;

    let (jar, page) = PageContext::take(jar, &state.auth, Some(&current_user));
    let html = ProfileTemplate {
        page,
        username: user.username().to_string(),
        today,
        tasks,
        users,
    }
    .render()?;
    Ok((jar, Html(html)).into_response())
}

pub fn create_user_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/profile/{username}",
            get(profile_handler).post(profile_handler),
        )
        .with_state(state)
}
