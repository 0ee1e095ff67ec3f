mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use common::{Factory, TestApp};

fn parse_timestamp(value: &serde_json::Value) -> OffsetDateTime {
    OffsetDateTime::parse(value.as_str().unwrap(), &Rfc3339).unwrap()
}

#[tokio::test]
async fn test_create_task_defaults() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/tasks/")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "project_id": project.id,
            "title": "Write docs"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Task created successfully");

    let task = &body["task"];
    assert_eq!(task["project_id"], project.id);
    assert_eq!(task["title"], "Write docs");
    assert_eq!(task["description"], "");
    assert_eq!(task["status"], "To Do");
    assert!(task["assigned_user_id"].is_null());
    assert_eq!(task["created_by"], auth.user_id);
    assert_eq!(parse_timestamp(&task["created_date"]), parse_timestamp(&task["modified_date"]));
}

#[tokio::test]
async fn test_create_task_with_all_fields() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let other = factory.create_user().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/tasks/")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "project_id": project.id,
            "title": "Review",
            "description": "Check the PR",
            "status": "In Progress",
            "assigned_user_id": other.user_id,
            "created_by": other.user_id,
            "created_date": "2025-04-28T18:44:50Z",
            "modified_date": "2025-04-28T18:44:50Z"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let task = &body["task"];
    assert_eq!(task["status"], "In Progress");
    assert_eq!(task["assigned_user_id"], other.user_id);
    assert_eq!(task["created_by"], other.user_id);
    assert_eq!(task["created_date"], "2025-04-28T18:44:50Z");
}

#[tokio::test]
async fn test_create_task_unknown_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/tasks/")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "project_id": 9999,
            "title": "Orphan"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_task_empty_title() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/tasks/")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "project_id": project.id,
            "title": ""
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_status_only() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;
    let task = factory.create_task(project.id, auth.user_id).await;

    tokio::time::sleep(Duration::from_millis(10)).await;

    let response = app
        .server
        .put(&format!("/tasks/{}", task.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "status": "Done" }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], task.id);
    assert_eq!(body["status"], "Done");
    assert_eq!(body["title"], task.title.as_str());
    assert_eq!(body["description"], task.description.as_str());
    assert_eq!(body["created_date"], task.created_date.as_str());

    let before = OffsetDateTime::parse(&task.modified_date, &Rfc3339).unwrap();
    assert!(parse_timestamp(&body["modified_date"]) > before);
}

#[tokio::test]
async fn test_update_clears_assignee_with_null() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;
    let task = factory
        .create_task_assigned(project.id, auth.user_id, Some(auth.user_id))
        .await;

    let response = app
        .server
        .put(&format!("/tasks/{}", task.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "assigned_user_id": null }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["assigned_user_id"].is_null());
    assert_eq!(body["status"], "To Do");
}

#[tokio::test]
async fn test_update_rejects_unknown_field() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;
    let task = factory.create_task(project.id, auth.user_id).await;

    let response = app
        .server
        .put(&format!("/tasks/{}", task.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "priority": "high" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_task() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .put("/tasks/9999")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "status": "Done" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_task() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;
    let task = factory.create_task(project.id, auth.user_id).await;

    let response = app
        .server
        .delete(&format!("/tasks/{}", task.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], format!("Task {} deleted", task.id));

    // Second delete finds nothing
    let response = app
        .server
        .delete(&format!("/tasks/{}", task.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_tasks_by_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let alice = factory.create_user().await;
    let bob = factory.create_user().await;
    let project = factory.create_project().await;
    let other = factory.create_project().await;

    let assigned = factory
        .create_task_assigned(project.id, alice.user_id, Some(bob.user_id))
        .await;
    let unassigned = factory.create_task(project.id, bob.user_id).await;
    factory.create_task(other.id, alice.user_id).await;

    let response = app
        .server
        .get("/tasks")
        .add_query_param("project_id", project.id)
        .add_header("Authorization", alice.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let tasks: serde_json::Value = response.json();
    assert_eq!(
        tasks[0],
        json!({
            "id": assigned.id,
            "projectId": project.id,
            "title": assigned.title,
            "description": assigned.description,
            "status": "To Do",
            "assignedUser": { "id": bob.user_id, "username": bob.username },
            "createdBy": { "id": alice.user_id, "username": alice.username },
            "createdDate": assigned.created_date,
            "modifiedDate": assigned.modified_date
        })
    );
    assert_eq!(tasks[1]["id"], unassigned.id);
    assert!(tasks[1]["assignedUser"].is_null());
    assert_eq!(tasks.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_tasks_empty_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .get("/tasks/")
        .add_query_param("project_id", project.id)
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_list_tasks_unknown_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .get("/tasks")
        .add_query_param("project_id", 9999)
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_is_free_text() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/tasks/")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "project_id": project.id,
            "title": "Blank status",
            "status": ""
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["task"]["status"], "");
    let task_id = body["task"]["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/tasks/{}", task_id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "status": "" }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_list_tasks_without_project_id() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .get("/tasks")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Validation error");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("project_id"));
}

#[tokio::test]
async fn test_non_numeric_task_id() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .delete("/tasks/abc")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Validation error");
}
