//! Destroy semantics.

use docket_core::{Action, DocumentId, Error};
use docket_storage::testing::StoreCall;

use crate::common::{RecordingAuthorizer, TestHarness, User, attrs};

#[tokio::test]
async fn test_destroy_missing_is_silent_noop() {
    let harness = TestHarness::with_controller(
        RecordingAuthorizer::denying(),
        RecordingAuthorizer::denying(),
        |builder| builder,
    );
    let id = DocumentId::new("ghost");

    harness
        .resource
        .destroy(&User::new("u1"), &id)
        .await
        .unwrap();

    assert!(harness.collection.calls().is_empty());
    assert!(harness.document.calls().is_empty());
    assert_eq!(harness.store_calls(), vec![StoreCall::Read(id)]);
}

#[tokio::test]
async fn test_destroy_checks_stored_attributes() {
    let harness = TestHarness::new();
    let stored = harness
        .seed("d1", attrs(serde_json::json!({"ownerId": "u1"})))
        .await;

    harness
        .resource
        .destroy(&User::new("u1"), &stored.id)
        .await
        .unwrap();

    let calls = harness.document.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].action, Action::Destroy);
    assert_eq!(calls[0].new_attributes, None);
    assert_eq!(calls[0].old_attributes, Some(stored.attributes));
    assert_eq!(
        harness.store_calls(),
        vec![
            StoreCall::Read(stored.id.clone()),
            StoreCall::Destroy(stored.id)
        ]
    );
}

#[tokio::test]
async fn test_denied_destroy_keeps_document() {
    let harness = TestHarness::with_controller(
        RecordingAuthorizer::allowing(),
        RecordingAuthorizer::denying(),
        |builder| builder,
    );
    let stored = harness.seed("d1", attrs(serde_json::json!({}))).await;

    let err = harness
        .resource
        .destroy(&User::new("u1"), &stored.id)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Forbidden { .. }));
    assert!(!harness.store_calls().contains(&StoreCall::Destroy(stored.id)));
}
