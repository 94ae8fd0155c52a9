//! The "categories" pages. Besides the status labels they manage the team
//! members: `/edit_category/{id}` and `/delete_category/{id}` address users.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Extension, Path, State},
    response::{Html, Redirect},
    routing::get,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::category::{Category, CategoryService};
use crate::user::{User, UserService};
use crate::web::{AppState, PageContext, WebError, redirect_with_flash};

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    status: String,
}

#[derive(Debug, Deserialize)]
pub struct EditUserForm {
    name: String,
    department: String,
}

#[derive(Template)]
#[template(path = "categories.html")]
struct CategoriesTemplate {
    page: PageContext,
    users: Vec<User>,
    categories: Vec<Category>,
}

#[derive(Template)]
#[template(path = "add_category.html")]
struct AddCategoryTemplate {
    page: PageContext,
}

#[derive(Template)]
#[template(path = "edit_category.html")]
struct EditCategoryTemplate {
    page: PageContext,
    user: User,
}

/// Handler for GET /get_categories.
#[tracing::instrument(skip(state, jar))]
async fn categories_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    current_user: Option<Extension<CurrentUser>>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let users = UserService::new(&state.db).get_all_users().await?;
    let categories = CategoryService::new(&state.db).get_all_categories().await?;

    let (jar, page) = PageContext::take(jar, &state.auth, current_user.as_deref());
    let html = CategoriesTemplate {
        page,
        users,
        categories,
    }
    .render()?;
    Ok((jar, Html(html)))
}

#[tracing::instrument(skip(state, jar))]
async fn add_category_form_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let (jar, page) = PageContext::take(jar, &state.auth, Some(&current_user));
    let html = AddCategoryTemplate { page }.render()?;
    Ok((jar, Html(html)))
}

#[tracing::instrument(skip(state, jar))]
async fn add_category_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CategoryForm>,
) -> Result<(CookieJar, Redirect), WebError> {
    let status = form.status.trim();
    if status.is_empty() {
        return redirect_with_flash(jar, &state.auth, "Please enter a status", "/add_category");
    }

    CategoryService::new(&state.db)
        .create_category(status.to_string())
        .await?;
    redirect_with_flash(jar, &state.auth, "New Category Added", "/get_categories")
}

/// Handler for serving the edit form of a team member.
#[tracing::instrument(skip(state, jar))]
async fn edit_category_form_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let user = UserService::new(&state.db).get_user_by_id(id).await?;
    let (jar, page) = PageContext::take(jar, &state.auth, Some(&current_user));
    let html = EditCategoryTemplate { page, user }.render()?;
    Ok((jar, Html(html)))
}

/// Handler for updating a team member's name and department.
#[tracing::instrument(skip(state, jar))]
async fn edit_category_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i32>,
    Form(form): Form<EditUserForm>,
) -> Result<(CookieJar, Redirect), WebError> {
    let name = form.name.trim();
    let department = form.department.trim();
    if name.is_empty() || department.is_empty() {
        return redirect_with_flash(
            jar,
            &state.auth,
            "Please enter a name and department",
            &format!("/edit_category/{id}"),
        );
    }

    UserService::new(&state.db)
        .update_user_details(id, name.to_string(), department.to_string())
        .await?;
    redirect_with_flash(jar, &state.auth, "User Successfully Updated", "/get_categories")
}

/// Handler for GET /delete_category/{id}, which removes a team member.
#[tracing::instrument(skip(state, jar))]
async fn delete_category_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> Result<(CookieJar, Redirect), WebError> {
    UserService::new(&state.db).delete_user_by_id(id).await?;
    redirect_with_flash(jar, &state.auth, "User Successfully Deleted", "/get_categories")
}

pub fn create_category_list_router(state: AppState) -> Router {
    Router::new()
        .route("/get_categories", get(categories_handler))
        .with_state(state)
}

/// Routes that change categories or team members. Callers must layer the login redirect on top.
pub fn create_category_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/add_category",
            get(add_category_form_handler).post(add_category_handler),
        )
        .route(
            "/edit_category/{id}",
            get(edit_category_form_handler).post(edit_category_handler),
        )
        .route("/delete_category/{id}", get(delete_category_handler))
        .with_state(state)
}
