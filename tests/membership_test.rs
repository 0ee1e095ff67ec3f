mod common;

use axum::http::StatusCode;

use common::{Factory, TestApp};
use taskflow::repositories::MembershipRepository;

#[tokio::test]
async fn test_assign_user_to_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .post(&format!("/projects/{}/users/{}", project.id, auth.user_id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"],
        format!("User {} assigned to project {}", auth.user_id, project.id)
    );

    let count = MembershipRepository::count(&app.state.db, project.id, auth.user_id)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_assign_twice_is_rejected() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;
    factory.add_member(project.id, auth.user_id).await;

    let response = app
        .server
        .post(&format!("/projects/{}/users/{}", project.id, auth.user_id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["details"], "User is already assigned to this project");

    let count = MembershipRepository::count(&app.state.db, project.id, auth.user_id)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_assign_to_missing_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post(&format!("/projects/9999/users/{}", auth.user_id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["details"], "Project");
}

#[tokio::test]
async fn test_assign_missing_user() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .post(&format!("/projects/{}/users/9999", project.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["details"], "User");

    let count = MembershipRepository::count(&app.state.db, project.id, 9999)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_remove_user_from_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;
    factory.add_member(project.id, auth.user_id).await;

    let response = app
        .server
        .delete(&format!("/projects/{}/users/{}", project.id, auth.user_id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"],
        format!("User {} removed from project {}", auth.user_id, project.id)
    );

    let count = MembershipRepository::count(&app.state.db, project.id, auth.user_id)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_remove_non_member() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .delete(&format!("/projects/{}/users/{}", project.id, auth.user_id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["details"], "User is not part of the project");
}

#[tokio::test]
async fn test_membership_requires_auth() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .post(&format!("/projects/{}/users/{}", project.id, auth.user_id))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_numeric_ids_get_json_error() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/projects/first/users/me")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Validation error");
}
