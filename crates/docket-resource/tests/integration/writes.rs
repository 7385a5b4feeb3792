//! Write filter enforcement on replace and patch.

use std::sync::Arc;

use docket_acl::AccessController;
use docket_core::{Action, Attributes, DocumentId, Error};
use docket_resource::Resource;
use docket_storage::Store;
use docket_storage::testing::{RecordingStore, StoreCall};
use serde_json::json;

use crate::common::{RecordingAuthorizer, ReplaceOnlyStore, TestHarness, User, attrs};

/// Everything writable except `b`.
fn b_is_read_only() -> TestHarness {
    TestHarness::with_controller(
        RecordingAuthorizer::allowing(),
        RecordingAuthorizer::allowing(),
        |builder| builder.write_filter_with(|_: &User, key: &str| key != "b"),
    )
}

#[tokio::test]
async fn test_replace_fails_when_existing_attribute_unwritable() {
    let harness = b_is_read_only();
    let stored = harness.seed("d1", attrs(json!({"a": 1, "b": 2}))).await;

    let err = harness
        .resource
        .replace(&User::new("u1"), &stored.id, attrs(json!({"a": 5})))
        .await
        .unwrap_err();

    assert_eq!(err.unwritable_keys().unwrap(), &["b".to_string()]);
    assert!(harness.document.calls().is_empty());
    assert_eq!(harness.store_calls(), vec![StoreCall::Read(stored.id)]);
}

#[tokio::test]
async fn test_patch_succeeds_where_replace_fails() {
    let harness = b_is_read_only();
    let stored = harness.seed("d1", attrs(json!({"a": 1, "b": 2}))).await;

    let patched = harness
        .resource
        .patch(&User::new("u1"), &stored.id, attrs(json!({"a": 5})))
        .await
        .unwrap();

    assert_eq!(patched.attributes, attrs(json!({"a": 5, "b": 2})));

    let calls = harness.document.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].action, Action::Patch);
    assert_eq!(calls[0].new_attributes, Some(attrs(json!({"a": 5, "b": 2}))));
    assert_eq!(calls[0].old_attributes, Some(attrs(json!({"a": 1, "b": 2}))));

    // MemoryStore merges natively, so no full replace is issued.
    assert_eq!(
        harness.store_calls(),
        vec![
            StoreCall::Read(stored.id.clone()),
            StoreCall::ShallowUpdate(stored.id)
        ]
    );
}

#[tokio::test]
async fn test_patch_falls_back_to_replace_without_native_merge() {
    let store = Arc::new(RecordingStore::new(ReplaceOnlyStore::default()));
    let shared: Arc<dyn Store<Attributes>> = store.clone();
    let access = AccessController::<Attributes, User>::builder()
        .authorize_collection(RecordingAuthorizer::allowing())
        .authorize_document(RecordingAuthorizer::allowing())
        .write_filter_with(|_: &User, key: &str| key != "b")
        .build();
    let resource = Resource::with_shared_store("test", shared.clone(), access);

    let id = DocumentId::new("d1");
    shared
        .create(&id, attrs(json!({"a": 1, "b": 2})))
        .await
        .unwrap();
    store.clear();

    let patched = resource
        .patch(&User::new("u1"), &id, attrs(json!({"a": 5})))
        .await
        .unwrap();

    assert_eq!(patched.attributes, attrs(json!({"a": 5, "b": 2})));
    assert_eq!(
        store.calls(),
        vec![
            StoreCall::Read(id.clone()),
            StoreCall::ShallowUpdate(id.clone()),
            StoreCall::Replace(id.clone())
        ]
    );
    let stored = shared.read(&id).await.unwrap().unwrap();
    assert_eq!(stored.attributes, attrs(json!({"a": 5, "b": 2})));
}

#[tokio::test]
async fn test_unwritable_payload_rejected_before_load() {
    let harness = b_is_read_only();
    let id = DocumentId::new("d1");

    for result in [
        harness
            .resource
            .replace(&User::new("u1"), &id, attrs(json!({"b": 1})))
            .await,
        harness
            .resource
            .patch(&User::new("u1"), &id, attrs(json!({"b": 1})))
            .await,
    ] {
        let err = result.unwrap_err();
        assert!(matches!(err, Error::UnwritableAttributes { .. }));
    }
    assert!(harness.store_calls().is_empty());
}

#[tokio::test]
async fn test_missing_document_is_not_found() {
    let harness = TestHarness::new();
    let id = DocumentId::new("ghost");
    let user = User::new("u1");

    let read = harness.resource.read(&user, &id).await.unwrap_err();
    let replace = harness
        .resource
        .replace(&user, &id, attrs(json!({})))
        .await
        .unwrap_err();
    let patch = harness
        .resource
        .patch(&user, &id, attrs(json!({})))
        .await
        .unwrap_err();

    for err in [read, replace, patch] {
        assert!(matches!(err, Error::NotFound { .. }));
    }
    assert!(harness.document.calls().is_empty());
}

#[tokio::test]
async fn test_denied_replace_leaves_store_unchanged() {
    let harness = TestHarness::with_controller(
        RecordingAuthorizer::allowing(),
        RecordingAuthorizer::denying(),
        |builder| builder,
    );
    let stored = harness.seed("d1", attrs(json!({"a": 1}))).await;

    let err = harness
        .resource
        .replace(&User::new("u1"), &stored.id, attrs(json!({"a": 2})))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));

    let current = harness.store.inner().snapshot().await;
    assert_eq!(current[0].attributes, attrs(json!({"a": 1})));
}
