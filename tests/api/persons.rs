use std::collections::HashMap;

use reqwest::header::LOCATION;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::helpers::{person, spawn_app};

#[tokio::test]
async fn created_person_can_be_fetched_by_location() {
    let app = spawn_app().await;

    let response = app.post_person(&person("josé")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(LOCATION)
        .expect("header not found")
        .to_str()
        .expect("not ASCII value")
        .to_owned();
    assert!(location.starts_with("/persons/"));
    assert_eq!(Some(0), response.content_length());

    let response = app.get(&location).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response_body = response
        .json::<HashMap<String, Value>>()
        .await
        .unwrap();
    assert_eq!(response_body["id"], location.trim_start_matches("/persons/"));
    assert_eq!(response_body["nickname"], "josé");
    assert_eq!(response_body["name"], "José Roberto");
    assert_eq!(response_body["birth_date"], "2000-10-01");
    assert_eq!(response_body["stack"], json!(["C#", "Node", "Oracle"]));
}

#[tokio::test]
async fn portuguese_payload_is_accepted() {
    let app = spawn_app().await;

    let response = app
        .post_person(&json!({
            "apelido": "ana",
            "nome": "Ana Barbosa",
            "nascimento": "1985-09-23",
            "stack": ["Node", "Postgres"]
        }))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn second_person_with_same_nickname_is_rejected() {
    let app = spawn_app().await;

    let first = app.post_person(&person("josé")).await;
    let second = app.post_person(&person("josé")).await;

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.count().await, 1);
}

#[tokio::test]
async fn birth_date_boundaries() {
    let app = spawn_app().await;
    let cases = [
        ("2023-13-01", StatusCode::UNPROCESSABLE_ENTITY),
        ("20230101", StatusCode::BAD_REQUEST),
        ("1899-12-31", StatusCode::UNPROCESSABLE_ENTITY),
        ("1900-01-01", StatusCode::CREATED),
    ];

    for (index, (birth_date, expected)) in cases.into_iter().enumerate() {
        let mut body = person(&format!("dev{index}"));
        body["birth_date"] = json!(birth_date);

        let response = app.post_person(&body).await;

        assert_eq!(response.status(), expected, "birth_date {birth_date}");
    }
}

#[tokio::test]
async fn nickname_limit_is_32_code_points() {
    let app = spawn_app().await;

    let at_limit = app.post_person(&person(&"ã".repeat(32))).await;
    let over_limit = app.post_person(&person(&"a".repeat(33))).await;

    assert_eq!(at_limit.status(), StatusCode::CREATED);
    assert_eq!(over_limit.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn stack_accept_reject_matrix() {
    let app = spawn_app().await;
    let cases = [
        (None, StatusCode::BAD_REQUEST),
        (Some(Value::Null), StatusCode::BAD_REQUEST),
        (Some(json!([])), StatusCode::CREATED),
        (Some(json!([null])), StatusCode::UNPROCESSABLE_ENTITY),
        (Some(json!(["a".repeat(33)])), StatusCode::UNPROCESSABLE_ENTITY),
    ];

    for (index, (stack, expected)) in cases.into_iter().enumerate() {
        let mut body = person(&format!("dev{index}"));
        match stack {
            Some(stack) => body["stack"] = stack,
            None => {
                body.as_object_mut().unwrap().remove("stack");
            }
        }

        let response = app.post_person(&body).await;

        assert_eq!(response.status(), expected, "case {index}");
    }
}

#[tokio::test]
async fn search_matches_substrings_of_any_field() {
    let app = spawn_app().await;
    app.post_person(&person("josé")).await;
    app.post_person(&json!({
        "nickname": "ana",
        "name": "Ana Barbosa",
        "birth_date": "1985-09-23",
        "stack": ["Node", "Postgres"]
    }))
    .await;

    let node = app.get("/persons?t=node").await;
    assert_eq!(node.status(), StatusCode::OK);
    assert_eq!(node.json::<Vec<Value>>().await.unwrap().len(), 2);

    let barbosa = app.get("/persons?t=BARBO").await.json::<Vec<Value>>().await.unwrap();
    assert_eq!(barbosa.len(), 1);
    assert_eq!(barbosa[0]["nickname"], "ana");
}

#[tokio::test]
async fn search_without_match_is_an_empty_list() {
    let app = spawn_app().await;
    app.post_person(&person("josé")).await;

    let response = app.get("/persons?t=python").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<Vec<Value>>().await.unwrap(), Vec::<Value>::new());
}

#[tokio::test]
async fn search_without_term_is_bad_request() {
    let app = spawn_app().await;

    let response = app.get("/persons").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn count_grows_with_every_creation() {
    let app = spawn_app().await;
    let before = app.count().await;

    for nickname in ["a", "b", "c"] {
        app.post_person(&person(nickname)).await;
    }

    assert_eq!(app.count().await, before + 3);
}

#[tokio::test]
async fn unknown_person_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .get("/persons/e50408fa-e368-4ccd-9ade-851fdb553e0f")
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(Some(0), response.content_length());
}
