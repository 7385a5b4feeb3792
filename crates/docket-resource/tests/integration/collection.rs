//! Collection-level authorization.

use docket_core::{Action, Error};
use docket_query::ListQuery;

use crate::common::{RecordingAuthorizer, TestHarness, User, attrs};

fn denied() -> TestHarness {
    TestHarness::with_controller(
        RecordingAuthorizer::denying(),
        RecordingAuthorizer::allowing(),
        |builder| builder,
    )
}

#[tokio::test]
async fn test_denied_create_never_touches_store() {
    let harness = denied();
    let err = harness
        .resource
        .create(&User::new("u1"), attrs(serde_json::json!({"title": "x"})))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Forbidden { .. }));
    assert!(harness.store_calls().is_empty());
    assert!(harness.document.calls().is_empty());
}

#[tokio::test]
async fn test_denied_list_never_touches_store() {
    let harness = denied();
    harness.seed("d1", attrs(serde_json::json!({"title": "x"}))).await;

    let err = harness
        .resource
        .list(&User::new("u1"), &ListQuery::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Forbidden { .. }));
    assert!(harness.store_calls().is_empty());
}

#[tokio::test]
async fn test_collection_authorizer_sees_action_names() {
    let harness = TestHarness::new();
    let user = User::new("u1");
    harness
        .resource
        .create(&user, attrs(serde_json::json!({})))
        .await
        .unwrap();
    harness.resource.list(&user, &ListQuery::new()).await.unwrap();
    harness
        .resource
        .authorize_collection_action(&user, &Action::parse("export"))
        .await
        .unwrap();

    let actions: Vec<String> = harness
        .collection
        .calls()
        .into_iter()
        .map(|c| c.action.to_string())
        .collect();
    assert_eq!(actions, vec!["create", "list", "export"]);
}

#[tokio::test]
async fn test_create_runs_document_check_before_load() {
    let harness = TestHarness::new();
    let created = harness
        .resource
        .create(&User::new("u1"), attrs(serde_json::json!({"title": "x"})))
        .await
        .unwrap();

    let calls = harness.document.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].action, Action::Create);
    assert_eq!(calls[0].new_attributes, Some(created.attributes));
    assert_eq!(calls[0].old_attributes, None);
}
