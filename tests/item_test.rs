mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_item() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection().await;

    let response = app
        .server
        .post(&format!("/api/collections/{}/items", collection.id))
        .json(&json!({
            "title": "First pressing",
            "description": "Mint condition",
            "acquired_date": "2024-05-01"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["title"].as_str().unwrap(), "First pressing");
    assert_eq!(body["collection_id"].as_i64().unwrap(), collection.id as i64);
    // A new item has no photos, so no cover
    assert!(body["cover_photo_url"].is_null());
}

#[tokio::test]
async fn test_create_item_requires_title() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection().await;

    let response = app
        .server
        .post(&format!("/api/collections/{}/items", collection.id))
        .json(&json!({ "title": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_item_unknown_collection() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/collections/9999/items")
        .json(&json!({ "title": "Orphan" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_items() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection().await;

    factory.create_item(collection.id).await;
    factory.create_item(collection.id).await;

    let response = app
        .server
        .get(&format!("/api/collections/{}/items", collection.id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_item() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let item = factory.create_item_with_collection().await;

    let response = app.server.get(&format!("/api/items/{}", item.id)).await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["id"].as_i64().unwrap(), item.id as i64);
    assert_eq!(body["title"].as_str().unwrap(), item.title);
}

#[tokio::test]
async fn test_get_item_not_found() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/items/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_item() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let item = factory.create_item_with_collection().await;

    let response = app
        .server
        .put(&format!("/api/items/{}", item.id))
        .json(&json!({
            "title": "Renamed",
            "description": "Reassessed after grading"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["title"].as_str().unwrap(), "Renamed");
    assert_eq!(
        body["description"].as_str().unwrap(),
        "Reassessed after grading"
    );
}

#[tokio::test]
async fn test_update_item_requires_title() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let item = factory.create_item_with_collection().await;

    let response = app
        .server
        .put(&format!("/api/items/{}", item.id))
        .json(&json!({ "title": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_item_does_not_touch_cover() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let item = factory.create_item_with_collection().await;

    let photos = factory.add_photos(item.id, 2).await;
    let cover = photos.iter().find(|p| p.is_primary).unwrap().url.clone();

    app.server
        .put(&format!("/api/items/{}", item.id))
        .json(&json!({ "title": "Renamed" }))
        .await
        .assert_status(StatusCode::OK);

    let item_row = factory.item(item.id).await;
    assert_eq!(item_row.cover_photo_url.as_deref(), Some(cover.as_str()));
}

#[tokio::test]
async fn test_delete_item_removes_photos() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let item = factory.create_item_with_collection().await;

    factory.add_photos(item.id, 3).await;

    let response = app.server.delete(&format!("/api/items/{}", item.id)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let get_response = app.server.get(&format!("/api/items/{}", item.id)).await;
    get_response.assert_status(StatusCode::NOT_FOUND);

    // Photo rows went with the item
    let photos = curio::repositories::PhotoRepository::list_by_item(&app.state.db, item.id)
        .await
        .unwrap();
    assert!(photos.is_empty());
}

#[tokio::test]
async fn test_delete_item_not_found() {
    let app = TestApp::new().await;

    let response = app.server.delete("/api/items/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
