//! Owner-only reads decided by a document authorizer closure.

use docket_acl::AccessController;
use docket_core::{Action, Attributes, DocumentId, Error};
use docket_resource::Resource;
use docket_storage::MemoryStore;
use serde_json::json;

use crate::common::{User, attrs};

fn owner_only() -> Resource<Attributes, User> {
    let access = AccessController::<Attributes, User>::builder()
        .authorize_collection_with(|_, _| true)
        .authorize_document_with(|session, action, _new, old| match old {
            None => true,
            Some(old) if *action == Action::Read => {
                old.get("ownerId").and_then(|v| v.as_str()) == Some(session.id.as_str())
            }
            Some(_) => false,
        })
        .build();
    let store = MemoryStore::with_documents([docket_core::Document::new(
        "d1",
        attrs(json!({"title": "t", "ownerId": "owner"})),
    )]);
    Resource::new("notes", store, access)
}

#[tokio::test]
async fn test_owner_reads() {
    let resource = owner_only();
    let doc = resource
        .read(&User::new("owner"), &DocumentId::new("d1"))
        .await
        .unwrap();
    assert_eq!(doc.attributes["title"], json!("t"));
}

#[tokio::test]
async fn test_stranger_is_forbidden() {
    let resource = owner_only();
    let err = resource
        .read(&User::new("stranger"), &DocumentId::new("d1"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn test_custom_action_uses_post_load_check() {
    let resource = owner_only();
    let err = resource
        .load_for_action(
            &User::new("owner"),
            &DocumentId::new("d1"),
            &Action::parse("publish"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
}
