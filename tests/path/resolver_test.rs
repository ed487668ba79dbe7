//! Path resolution against stacks built through the public API.

use relnav::metadata::{ChildRelationshipSchema, ObjectSchema, RawField, StaticMetadataProvider};
use relnav::navigator::{NavigationErrorKind, PanelStack};
use relnav::path::{derive_segment, resolve, DottedPath};
use relnav::schema::HopKind;

fn provider() -> StaticMetadataProvider {
    let account = ObjectSchema {
        label: "Account".into(),
        fields: vec![
            RawField::plain("Name", "Account Name"),
            RawField::lookup("OwnerId", "Owner ID", ["User"]),
            RawField::lookup("ParentAccount", "Parent", ["Account"]),
        ],
        child_relationships: vec![ChildRelationshipSchema {
            relationship_name: "Contacts".into(),
            child_object: "Contact".into(),
            label: "Contacts".into(),
        }],
    };
    let user = ObjectSchema {
        label: "User".into(),
        fields: vec![
            RawField::plain("Email", "Email"),
            RawField::lookup("ManagerID", "Manager", ["User"]),
        ],
        child_relationships: vec![],
    };
    let contact = ObjectSchema {
        label: "Contact".into(),
        fields: vec![
            RawField::plain("Email", "Email"),
            RawField::lookup("OwnerId", "Owner ID", ["User"]),
        ],
        child_relationships: vec![],
    };

    StaticMetadataProvider::default()
        .with_object("Account", account)
        .with_object("User", user)
        .with_object("Contact", contact)
}

async fn walk(hops: &[&str]) -> PanelStack {
    let provider = provider();
    let mut stack = PanelStack::new();
    stack.open(&provider, "Account").await.unwrap();
    for (depth, hop) in hops.iter().enumerate() {
        stack.expand(&provider, depth, hop).await.unwrap();
    }
    stack
}

#[tokio::test]
async fn test_resolved_paths() {
    let cases: &[(&[&str], &str, &str)] = &[
        (&[], "Name", "Name"),
        (&["OwnerId"], "Email", "owner.Email"),
        (&["Contacts"], "Email", "Contacts.Email"),
        (&["OwnerId", "ManagerID"], "Email", "owner.manager.Email"),
        (&["Contacts", "OwnerId"], "Email", "Contacts.owner.Email"),
        (&["ParentAccount"], "Name", "parentaccount.Name"),
    ];

    for (hops, leaf, expected) in cases {
        let stack = walk(hops).await;
        let path = resolve(&stack, hops.len(), leaf).unwrap();
        assert_eq!(path.as_str(), *expected, "hops {:?}", hops);
    }
}

#[tokio::test]
async fn test_segment_count_is_depth_plus_one() {
    let stack = walk(&["OwnerId", "ManagerID", "ManagerID"]).await;

    for depth in 0..stack.len() {
        let leaf = if depth == 0 { "Name" } else { "Email" };
        let path = resolve(&stack, depth, leaf).unwrap();
        assert_eq!(path.segments().len(), depth + 1);
        assert_eq!(path.hop_count(), depth);
        assert_eq!(path.leaf(), leaf);
    }
}

#[tokio::test]
async fn test_resolving_shallower_panel_ignores_deeper_hops() {
    let stack = walk(&["OwnerId", "ManagerID"]).await;
    let path = resolve(&stack, 1, "Email").unwrap();
    assert_eq!(path.as_str(), "owner.Email");
}

#[tokio::test]
async fn test_resolve_rejects_missing_panel_and_field() {
    let stack = walk(&["OwnerId"]).await;

    let err = resolve(&stack, 3, "Email").unwrap_err();
    assert_eq!(err.kind(), NavigationErrorKind::InvalidSelection);

    let err = resolve(&stack, 1, "Name").unwrap_err();
    assert_eq!(err.kind(), NavigationErrorKind::InvalidSelection);

    let empty = PanelStack::new();
    assert!(resolve(&empty, 0, "Name").is_err());
}

#[tokio::test]
async fn test_resolve_rejects_leaf_that_is_not_one_segment() {
    let stack = walk(&["OwnerId"]).await;

    for leaf in ["", "Email.Domain", "."] {
        let err = resolve(&stack, 1, leaf).unwrap_err();
        assert_eq!(err.kind(), NavigationErrorKind::InvalidSelection, "{:?}", leaf);
    }
}

#[test]
fn test_segment_rules() {
    assert_eq!(derive_segment(HopKind::Lookup, "OwnerId"), "owner");
    assert_eq!(derive_segment(HopKind::Lookup, "Owner"), "owner");
    assert_eq!(derive_segment(HopKind::Lookup, "Id"), "id");
    assert_eq!(derive_segment(HopKind::ChildRelationship, "Contacts"), "Contacts");
    assert_eq!(derive_segment(HopKind::ChildRelationship, "AccountId"), "AccountId");
}

#[test]
fn test_dotted_path_parsing() {
    let path: DottedPath = "owner.manager.Email".parse().unwrap();
    assert_eq!(path.segments(), vec!["owner", "manager", "Email"]);

    assert!(DottedPath::parse("").is_err());
    assert!(DottedPath::parse("owner..Email").is_err());
    assert!(DottedPath::parse(".Email").is_err());
}
