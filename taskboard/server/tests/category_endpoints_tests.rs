use axum::http::StatusCode;
use sea_orm::EntityTrait;
use taskboard_server::category::CategoryService;
use taskboard_server::entities::user;
use taskboard_server::task::TaskService;
use taskboard_server::user::UserService;

mod common;

use common::setup;

#[tokio::test]
async fn can_add_category_and_offer_it_as_task_status() {
    let mut client = setup().await.expect("Failed to set up test environment");
    client.register("alice", "s3cret").await;

    let response = client.post_form("/add_category", "status=Blocked").await;
    assert_eq!(response.location(), Some("/get_categories"));

    let page = client.follow(&response).await;
    assert_eq!(page.flash().as_deref(), Some("New Category Added"));
    assert!(page.body.contains("<li>Blocked</li>"));

    client
        .post_form(
            "/add_task",
            "task_name=Write+report&user_name=alice&due_date=2025-09-30",
        )
        .await;
    let task = TaskService::new(&client.state.db)
        .get_all_tasks()
        .await
        .unwrap()
        .remove(0);

    let form = client.get(&format!("/edit_task_status/{}", task.id())).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("<option value=\"Blocked\">Blocked</option>"));
}

#[tokio::test]
async fn rejects_blank_category() {
    let mut client = setup().await.expect("Failed to set up test environment");
    client.register("alice", "s3cret").await;

    let response = client.post_form("/add_category", "status=++").await;

    assert_eq!(response.location(), Some("/add_category"));
    let categories = CategoryService::new(&client.state.db)
        .get_all_categories()
        .await
        .unwrap();
    assert!(categories.is_empty());
}

#[tokio::test]
async fn categories_page_lists_team_members_for_anonymous_visitors() {
    let mut client = setup().await.expect("Failed to set up test environment");
    client.register("alice", "s3cret").await;
    client.clear_cookies();

    let page = client.get("/get_categories").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<td>alice</td>"));
    assert!(page.body.contains("<td>test user</td>"));
    assert!(!page.body.contains("/delete_category/"));
}

#[tokio::test]
async fn can_edit_team_member() {
    let mut client = setup().await.expect("Failed to set up test environment");
    client.register("alice", "s3cret").await;
    let alice = UserService::new(&client.state.db)
        .find_by_username("alice")
        .await
        .unwrap()
        .expect("alice should exist");

    let form = client.get(&format!("/edit_category/{}", alice.id())).await;
    assert_eq!(form.status, StatusCode::OK);

    let response = client
        .post_form(
            &format!("/edit_category/{}", alice.id()),
            "name=Alice+Smith&department=Finance",
        )
        .await;
    assert_eq!(response.location(), Some("/get_categories"));
    let page = client.follow(&response).await;
    assert_eq!(page.flash().as_deref(), Some("User Successfully Updated"));

    let updated = UserService::new(&client.state.db)
        .get_user_by_id(alice.id())
        .await
        .unwrap();
    assert_eq!(updated.username(), "alice");
    assert_eq!(updated.name(), "Alice Smith");
    assert_eq!(updated.department(), "Finance");
}

#[tokio::test]
async fn can_delete_team_member() {
    let mut client = setup().await.expect("Failed to set up test environment");
    client.register("bob", "pw").await;
    client.clear_cookies();
    client.register("alice", "s3cret").await;
    let bob = UserService::new(&client.state.db)
        .find_by_username("bob")
        .await
        .unwrap()
        .expect("bob should exist");

    let response = client.get(&format!("/delete_category/{}", bob.id())).await;

    assert_eq!(response.location(), Some("/get_categories"));
    let page = client.follow(&response).await;
    assert_eq!(page.flash().as_deref(), Some("User Successfully Deleted"));
    assert!(!page.body.contains("<td>bob</td>"));

    let missing = client.get(&format!("/delete_category/{}", bob.id())).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn anonymous_delete_redirects_and_keeps_user() {
    let mut client = setup().await.expect("Failed to set up test environment");
    client.register("alice", "s3cret").await;
    client.clear_cookies();
    let alice = UserService::new(&client.state.db)
        .find_by_username("alice")
        .await
        .unwrap()
        .expect("alice should exist");

    let response = client.get(&format!("/delete_category/{}", alice.id())).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
    let users = user::Entity::find()
        .all(client.state.db.as_ref())
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
}
