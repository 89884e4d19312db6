//! API integration tests for image retrieval and error handling.
//!
//! Tests verify:
//! - Image retrieval from batch folders (unbounded scan, first match wins)
//! - Error cases (unknown identifier, missing root folder, traversal ids)
//! - HTTP response codes, headers, and JSON error bodies
//! - Health check

use axum::http::StatusCode;

use super::test_utils::{body_bytes, body_json, get, image_tree, png_bytes, test_router, TEST_KEY};

// =============================================================================
// Image Retrieval
// =============================================================================

#[tokio::test]
async fn test_item_image_success() {
    let content = png_bytes("foo");
    let tree = image_tree(&[("batch-1", "foo.png", &content)]);
    let router = test_router(tree.path());

    let response = get(router, &format!("/item-image?id=foo&key={TEST_KEY}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "inline; filename=\"foo.png\""
    );

    let body = body_bytes(response).await;
    assert_eq!(body, content);
}

#[tokio::test]
async fn test_item_image_scans_any_subfolder() {
    // The lookup endpoint is not limited to the batch-N names.
    let content = png_bytes("x");
    let tree = image_tree(&[("misc-uploads", "item42.png", &content)]);
    let router = test_router(tree.path());

    let response = get(router, &format!("/item-image?id=item42&key={TEST_KEY}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, content);
}

#[tokio::test]
async fn test_item_image_duplicate_id_returns_one_of_them() {
    // Enumeration order is OS dependent; either file's bytes are acceptable.
    let one = png_bytes("one");
    let two = png_bytes("two");
    let tree = image_tree(&[("batch-1", "foo.png", &one), ("batch-2", "foo.png", &two)]);
    let router = test_router(tree.path());

    let response = get(router, &format!("/item-image?id=foo&key={TEST_KEY}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    assert!(body == one || body == two, "expected one of the two files");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_item_image_not_found() {
    let content = png_bytes("foo");
    let tree = image_tree(&[("batch-1", "foo.png", &content)]);
    let router = test_router(tree.path());

    let response = get(router, &format!("/item-image?id=missing&key={TEST_KEY}")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(error["error"], "not_found");
    assert_eq!(error["message"], "Item not found");
}

#[tokio::test]
async fn test_item_image_lookup_is_case_sensitive() {
    // Listing matches .PNG case-insensitively, lookup does not.
    let content = png_bytes("bar");
    let tree = image_tree(&[("batch-1", "BAR.PNG", &content)]);
    let router = test_router(tree.path());

    let response = get(router, &format!("/item-image?id=BAR&key={TEST_KEY}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_item_image_missing_root_folder() {
    let tree = image_tree(&[]);
    let root = tree.path().join("does-not-exist");
    let router = test_router(&root);

    let response = get(router, &format!("/item-image?id=foo&key={TEST_KEY}")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = body_json(response).await;
    assert_eq!(error["error"], "root_folder_missing");
    let message = error["message"].as_str().unwrap();
    assert!(
        message.contains("does-not-exist"),
        "message should name the root folder: {message}"
    );
}

#[tokio::test]
async fn test_item_image_missing_id_parameter() {
    let content = png_bytes("foo");
    let tree = image_tree(&[("batch-1", "foo.png", &content)]);
    let router = test_router(tree.path());

    let response = get(router, &format!("/item-image?key={TEST_KEY}")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "invalid_request");
}

#[tokio::test]
async fn test_item_image_traversal_id_rejected() {
    // A file outside the root must not be reachable through the id.
    let secret = png_bytes("secret");
    let tree = image_tree(&[("batch-1", "foo.png", &png_bytes("foo"))]);
    std::fs::write(tree.path().join("secret.png"), &secret).unwrap();

    // Root the store one level deeper so "../../" would escape it.
    let root = tree.path().join("batch-1");
    std::fs::create_dir_all(root.join("inner")).unwrap();
    let router = test_router(&root);

    for id in ["../../secret", "..%2F..%2Fsecret", "inner/../../secret"] {
        let response =
            get(router.clone(), &format!("/item-image?id={id}&key={TEST_KEY}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "id {id:?}");
    }
}

// =============================================================================
// Health Check
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let tree = image_tree(&[]);
    let router = test_router(tree.path());

    let response = get(router, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    assert_eq!(body, br#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_health_check_ignores_missing_root() {
    let tree = image_tree(&[]);
    let router = test_router(&tree.path().join("does-not-exist"));

    let response = get(router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}
