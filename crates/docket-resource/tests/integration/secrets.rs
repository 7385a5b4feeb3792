//! A `secret` attribute hidden from ordinary users.

use docket_core::Error;
use docket_query::ListQuery;
use serde_json::json;

use crate::common::{RecordingAuthorizer, TestHarness, User, attrs};

fn harness() -> TestHarness {
    TestHarness::with_controller(
        RecordingAuthorizer::allowing(),
        RecordingAuthorizer::allowing(),
        |builder| {
            builder
                .read_filter_with(|_: &User, key: &str| key != "secret")
                .write_filter_with(|_: &User, key: &str| key != "secret")
        },
    )
}

#[tokio::test]
async fn test_create_with_secret_is_rejected() {
    let harness = harness();
    let err = harness
        .resource
        .create(&User::new("u1"), attrs(json!({"title": "t", "secret": "s"})))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnwritableAttributes { .. }));
    assert_eq!(err.unwritable_keys().unwrap(), &["secret".to_string()]);
    assert!(harness.store_calls().is_empty());
}

#[tokio::test]
async fn test_secret_never_leaves_the_resource() {
    let harness = harness();
    let user = User::new("u1");
    let stored = harness
        .seed("d1", attrs(json!({"title": "t", "secret": "s"})))
        .await;

    let read = harness.resource.read(&user, &stored.id).await.unwrap();
    assert_eq!(read.attributes, attrs(json!({"title": "t"})));

    let listed = harness.resource.list(&user, &ListQuery::new()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(!listed[0].attributes.contains_key("secret"));

    let patched = harness
        .resource
        .patch(&user, &stored.id, attrs(json!({"title": "u"})))
        .await
        .unwrap();
    assert_eq!(patched.attributes, attrs(json!({"title": "u"})));

    // The hidden value is still stored.
    let current = harness.store.inner().snapshot().await;
    assert_eq!(current[0].attributes["secret"], json!("s"));
}

#[tokio::test]
async fn test_create_without_secret_succeeds() {
    let harness = harness();
    let created = harness
        .resource
        .create(&User::new("u1"), attrs(json!({"title": "t"})))
        .await
        .unwrap();
    assert_eq!(created.attributes, attrs(json!({"title": "t"})));
}
