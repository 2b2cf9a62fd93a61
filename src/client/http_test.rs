use mockito::Matcher;
use serde_json::json;

use super::*;

#[tokio::test]
async fn test_complete_task_success() {
    let mut server = mockito::Server::new_async().await;

    let handler = server
        .mock("POST", "/complete_task/42")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "message": "Done"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = HttpTaskServer::new().with_endpoint(&server.url());
    let res = client
        .complete_task(&TaskId::from(42), None)
        .await
        .expect("failed to complete task");

    assert!(res.success);
    assert_eq!(res.message, "Done");
    handler.assert_async().await;
}

#[tokio::test]
async fn test_complete_task_with_tier_sends_body() {
    let mut server = mockito::Server::new_async().await;

    let handler = server
        .mock("POST", "/complete_task/7")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"tier": "high"})))
        .with_status(200)
        .with_body(r#"{"success": true, "message": "Quest completed! HIGH tier +30 XP"}"#)
        .create_async()
        .await;

    let client = HttpTaskServer::new().with_endpoint(&format!("{}/", server.url()));
    let res = client
        .complete_task(&TaskId::new("7"), Some(Tier::High))
        .await
        .expect("failed to complete task");

    assert!(res.success);
    assert_eq!(res.message, "Quest completed! HIGH tier +30 XP");
    handler.assert_async().await;
}

#[tokio::test]
async fn test_complete_task_business_failure_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;

    let handler = server
        .mock("POST", "/complete_task/999")
        .with_status(404)
        .with_body(r#"{"success": false, "message": "Task not found"}"#)
        .create_async()
        .await;

    let client = HttpTaskServer::new().with_endpoint(&server.url());
    let res = client
        .complete_task(&TaskId::new("999"), None)
        .await
        .expect("a JSON body should decode regardless of status");

    assert!(!res.success);
    assert_eq!(res.message, "Task not found");
    handler.assert_async().await;
}

#[tokio::test]
async fn test_complete_task_passes_id_verbatim() {
    let mut server = mockito::Server::new_async().await;

    let handler = server
        .mock("POST", "/complete_task/abc-1")
        .with_status(400)
        .with_body(r#"{"success": false, "message": "Bad id"}"#)
        .create_async()
        .await;

    let client = HttpTaskServer::new().with_endpoint(&server.url());
    let res = client
        .complete_task(&TaskId::new("abc-1"), None)
        .await
        .expect("failed to complete task");

    assert_eq!(res.message, "Bad id");
    handler.assert_async().await;
}

#[tokio::test]
async fn test_complete_task_invalid_body() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/complete_task/1")
        .with_status(500)
        .with_body("<html>Internal Server Error</html>")
        .create_async()
        .await;

    let client = HttpTaskServer::new().with_endpoint(&server.url());
    let err = client
        .complete_task(&TaskId::new("1"), None)
        .await
        .expect_err("non-JSON body should fail");

    match err.downcast_ref::<ClientError>() {
        Some(ClientError::InvalidBody { status, .. }) => assert_eq!(*status, 500),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_task_transport_error() {
    // Nothing listens on port 1
    let client = HttpTaskServer::new()
        .with_endpoint("http://127.0.0.1:1")
        .with_timeout(time::Duration::from_secs(2));

    let err = client
        .complete_task(&TaskId::new("1"), None)
        .await
        .expect_err("unreachable server should fail");

    assert!(matches!(
        err.downcast_ref::<ClientError>(),
        Some(ClientError::Transport(_))
    ));
}

#[tokio::test]
async fn test_list_tasks() {
    let mut server = mockito::Server::new_async().await;

    let body = json!({
        "tasks": [
            {
                "id": 1,
                "title": "Laundry",
                "category": "Cleaning",
                "task_type": "daily",
                "high_description": "Wash, dry, fold and put away",
                "high_points": 30,
                "medium_description": "Wash and dry",
                "medium_points": 20,
                "low_description": "Start a load",
                "low_points": 10,
                "effort_type": "physical",
                "location_type": "indoor",
                "is_active": 1
            },
            { "id": 2, "title": "Call mom" }
        ]
    });

    let handler = server
        .mock("POST", "/api/tasks/filter")
        .match_body(Matcher::Json(json!({"category": "Cleaning"})))
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = HttpTaskServer::new().with_endpoint(&server.url());
    let tasks = client
        .list_tasks(&TaskFilter::default().with_category("Cleaning"))
        .await
        .expect("failed to list tasks");

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, TaskId::new("1"));
    assert_eq!(tasks[0].title, "Laundry");
    assert_eq!(tasks[0].points(Tier::High), 30);
    assert_eq!(tasks[0].points(Tier::Low), 10);
    assert_eq!(tasks[0].effort_type.as_deref(), Some("physical"));
    assert_eq!(tasks[1].id, TaskId::new("2"));
    assert_eq!(tasks[1].category, None);
    assert_eq!(tasks[1].points(Tier::Medium), 0);
    handler.assert_async().await;
}

#[tokio::test]
async fn test_list_tasks_server_error() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/api/tasks/filter")
        .with_status(500)
        .with_body(r#"{"error": "boom"}"#)
        .create_async()
        .await;

    let client = HttpTaskServer::new().with_endpoint(&server.url());
    let err = client
        .list_tasks(&TaskFilter::default())
        .await
        .expect_err("server error should fail");

    assert!(matches!(
        err.downcast_ref::<ClientError>(),
        Some(ClientError::Transport(_))
    ));
}

#[test]
fn test_from_server_config() {
    let config = ServerConfig {
        endpoint: "http://localhost:5000/".to_string(),
        timeout_secs: Some(5),
        ..Default::default()
    };

    let client = HttpTaskServer::from(&config);
    assert_eq!(client.endpoint(), "http://localhost:5000");
    assert_eq!(client.timeout(), Some(time::Duration::from_secs(5)));
}
