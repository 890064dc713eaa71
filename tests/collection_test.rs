mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_list_categories() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory.create_category().await;
    factory.create_category().await;

    let response = app.server.get("/api/categories").await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_collection() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let category = factory.create_category().await;

    let response = app
        .server
        .post("/api/collections")
        .json(&json!({
            "name": "Jazz on vinyl",
            "category_id": category.id,
            "description": "Pressings from the 50s and 60s"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Jazz on vinyl");
    assert_eq!(body["category_id"].as_i64().unwrap(), category.id as i64);
    assert_eq!(body["category_label"].as_str().unwrap(), category.label);
}

#[tokio::test]
async fn test_create_collection_requires_name() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let category = factory.create_category().await;

    let response = app
        .server
        .post("/api/collections")
        .json(&json!({
            "name": "",
            "category_id": category.id
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_collection_unknown_category() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/collections")
        .json(&json!({
            "name": "Lost collection",
            "category_id": 9999
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_collections() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory.create_collection().await;
    factory.create_collection().await;

    let response = app.server.get("/api/collections").await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    // Labels come joined in
    assert!(listed[0]["category_label"].as_str().is_some());
}

#[tokio::test]
async fn test_get_collection() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection().await;

    let response = app
        .server
        .get(&format!("/api/collections/{}", collection.id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["id"].as_i64().unwrap(), collection.id as i64);
    assert_eq!(body["name"].as_str().unwrap(), collection.name);
}

#[tokio::test]
async fn test_get_collection_not_found() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/collections/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_collection() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection().await;
    let other_category = factory.create_category().await;

    let response = app
        .server
        .put(&format!("/api/collections/{}", collection.id))
        .json(&json!({
            "name": "Renamed collection",
            "category_id": other_category.id
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Renamed collection");
    assert_eq!(
        body["category_id"].as_i64().unwrap(),
        other_category.id as i64
    );
}

#[tokio::test]
async fn test_delete_collection_cascades() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection().await;
    let item = factory.create_item(collection.id).await;
    factory.add_photos(item.id, 2).await;

    let response = app
        .server
        .delete(&format!("/api/collections/{}", collection.id))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/collections/{}", collection.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .get(&format!("/api/items/{}", item.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let photos = curio::repositories::PhotoRepository::list_by_item(&app.state.db, item.id)
        .await
        .unwrap();
    assert!(photos.is_empty());
}

#[tokio::test]
async fn test_delete_collection_not_found() {
    let app = TestApp::new().await;

    let response = app.server.delete("/api/collections/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
