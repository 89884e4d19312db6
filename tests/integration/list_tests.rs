//! Listing integration tests.
//!
//! Tests verify:
//! - The response always holds exactly the six fixed batch keys
//! - Case-insensitive .png suffix filtering
//! - Missing folders and folders outside the fixed set
//! - Missing root folder returns 500

use axum::http::StatusCode;

use super::test_utils::{body_json, get, image_tree, png_bytes, test_router, TEST_KEY};

const BATCH_NAMES: [&str; 6] = [
    "batch-1", "batch-2", "batch-3", "batch-4", "batch-5", "batch-6",
];

#[tokio::test]
async fn test_list_images_always_six_batches() {
    let content = png_bytes("a");
    let tree = image_tree(&[("batch-1", "a.png", &content)]);
    let router = test_router(tree.path());

    let response = get(router, &format!("/list-images?key={TEST_KEY}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let images = body["images"].as_object().unwrap();
    let keys: Vec<_> = images.keys().map(String::as_str).collect();
    assert_eq!(keys, BATCH_NAMES);

    assert_eq!(images["batch-1"].as_array().unwrap().len(), 1);
    for batch in &BATCH_NAMES[1..] {
        assert!(images[*batch].as_array().unwrap().is_empty(), "{batch}");
    }
}

#[tokio::test]
async fn test_list_images_case_insensitive_suffix() {
    let content = png_bytes("bar");
    let tree = image_tree(&[
        ("batch-1", "BAR.PNG", &content),
        ("batch-1", "baz.PnG", &content),
    ]);
    let router = test_router(tree.path());

    let response = get(router, &format!("/list-images?key={TEST_KEY}")).await;
    let body = body_json(response).await;

    let mut names: Vec<_> = body["images"]["batch-1"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["BAR.PNG", "baz.PnG"]);
}

#[tokio::test]
async fn test_list_images_filters_non_png() {
    let content = png_bytes("a");
    let tree = image_tree(&[("batch-2", "a.png", &content)]);
    std::fs::write(tree.path().join("batch-2").join("notes.txt"), b"x").unwrap();
    std::fs::write(tree.path().join("batch-2").join("b.jpeg"), b"x").unwrap();
    let router = test_router(tree.path());

    let response = get(router, &format!("/list-images?key={TEST_KEY}")).await;
    let body = body_json(response).await;

    let names = body["images"]["batch-2"].as_array().unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0], "a.png");
}

#[tokio::test]
async fn test_list_images_ignores_folders_outside_fixed_set() {
    // batch-7 and arbitrary folders are served by /item-image but never
    // appear in the listing.
    let content = png_bytes("x");
    let tree = image_tree(&[("batch-7", "x.png", &content), ("misc", "y.png", &content)]);
    let router = test_router(tree.path());

    let response = get(router, &format!("/list-images?key={TEST_KEY}")).await;
    let body = body_json(response).await;

    let images = body["images"].as_object().unwrap();
    assert_eq!(images.len(), 6);
    assert!(!images.contains_key("batch-7"));
    assert!(!images.contains_key("misc"));
}

#[tokio::test]
async fn test_list_images_missing_root_folder() {
    let tree = image_tree(&[]);
    let router = test_router(&tree.path().join("does-not-exist"));

    let response = get(router, &format!("/list-images?key={TEST_KEY}")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = body_json(response).await;
    assert_eq!(error["error"], "root_folder_missing");
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("does-not-exist"));
}

#[tokio::test]
async fn test_list_images_all_folders_empty_or_absent() {
    let tree = image_tree(&[]);
    std::fs::create_dir_all(tree.path().join("batch-4")).unwrap();
    let router = test_router(tree.path());

    let response = get(router, &format!("/list-images?key={TEST_KEY}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let images = body["images"].as_object().unwrap();
    assert!(images.values().all(|v| v.as_array().unwrap().is_empty()));
}
