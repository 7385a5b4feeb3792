//! Resources driven by a declarative role policy.

use docket_acl::{PolicyConfig, PolicySubject};
use docket_core::{Attributes, Error};
use docket_query::ListQuery;
use docket_resource::Resource;
use docket_storage::MemoryStore;
use serde_json::json;

use crate::common::attrs;

struct Member {
    id: String,
    roles: Vec<String>,
}

impl PolicySubject for Member {
    fn subject(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn roles(&self) -> &[String] {
        &self.roles
    }
}

fn member(id: &str, role: &str) -> Member {
    Member {
        id: id.to_string(),
        roles: vec![role.to_string()],
    }
}

const POLICY: &str = r#"
    owner_attribute = "ownerId"

    [[roles]]
    name = "author"
    collection_actions = ["create", "list"]
    document_actions = ["read"]
    owned_document_actions = ["create", "patch", "replace", "destroy"]
    readable = ["title", "ownerId"]
    writable = ["title", "ownerId"]

    [[roles]]
    name = "reader"
    collection_actions = ["list"]
    document_actions = ["read"]
    readable = ["title"]
"#;

fn resource() -> Resource<Attributes, Member> {
    let policy: PolicyConfig = toml::from_str(POLICY).unwrap();
    Resource::new("posts", MemoryStore::new(), policy.into_controller())
}

#[tokio::test]
async fn test_author_lifecycle() {
    let posts = resource();
    let alice = member("alice", "author");

    let created = posts
        .create(&alice, attrs(json!({"title": "hi", "ownerId": "alice"})))
        .await
        .unwrap();
    let patched = posts
        .patch(&alice, &created.id, attrs(json!({"title": "hello"})))
        .await
        .unwrap();
    assert_eq!(patched.attributes["title"], json!("hello"));

    posts.destroy(&alice, &created.id).await.unwrap();
    assert!(posts.list(&alice, &ListQuery::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_other_author_cannot_modify() {
    let posts = resource();
    let alice = member("alice", "author");
    let bob = member("bob", "author");

    let created = posts
        .create(&alice, attrs(json!({"title": "hi", "ownerId": "alice"})))
        .await
        .unwrap();

    let err = posts
        .patch(&bob, &created.id, attrs(json!({"title": "mine"})))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));

    // Bob may not create in Alice's name either.
    let err = posts
        .create(&bob, attrs(json!({"title": "x", "ownerId": "alice"})))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
}

#[tokio::test]
async fn test_reader_sees_only_titles() {
    let posts = resource();
    let alice = member("alice", "author");
    let carol = member("carol", "reader");

    posts
        .create(&alice, attrs(json!({"title": "hi", "ownerId": "alice"})))
        .await
        .unwrap();

    let listed = posts.list(&carol, &ListQuery::new()).await.unwrap();
    assert_eq!(listed[0].attributes, attrs(json!({"title": "hi"})));

    let err = posts
        .create(&carol, attrs(json!({"title": "x"})))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
}
