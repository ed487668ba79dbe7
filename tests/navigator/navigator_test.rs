//! Navigator controller scenarios: full walks, errors and concurrent expands.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use relnav::metadata::{
    MetadataError, MetadataResult, ObjectInfo, RelationalFields, SchemaMetadataProvider,
    StaticMetadataProvider,
};
use relnav::navigator::{
    ExpandOutcome, FilterMode, NavigationError, NavigationErrorKind, NavigatorController,
    NavigatorEvent, NavigatorEvents,
};

const SCHEMA: &str = r#"{
  "objects": {
    "Account": {
      "label": "Account",
      "fields": [
        { "name": "Name", "label": "Account Name" },
        { "name": "OwnerId", "label": "Owner ID", "referenceTo": ["User"] },
        { "name": "ParentId", "label": "Parent Account ID", "referenceTo": ["Account"] }
      ],
      "childRelationships": [
        { "relationshipName": "Contacts", "childObject": "Contact", "label": "Contacts" },
        { "relationshipName": "Opportunities", "childObject": "Opportunity", "label": "Opportunities" }
      ]
    },
    "User": {
      "label": "User",
      "fields": [
        { "name": "Name", "label": "Full Name" },
        { "name": "Email", "label": "Email" },
        { "name": "ManagerId", "label": "Manager ID", "referenceTo": ["User"] }
      ]
    },
    "Contact": {
      "label": "Contact",
      "fields": [
        { "name": "Email", "label": "Email" },
        { "name": "OwnerId", "label": "Owner ID", "referenceTo": ["User"] }
      ]
    },
    "Opportunity": {
      "label": "Opportunity",
      "fields": [{ "name": "Amount", "label": "Amount" }]
    }
  }
}"#;

fn schema() -> StaticMetadataProvider {
    StaticMetadataProvider::from_json_str(SCHEMA).unwrap()
}

fn navigator() -> (NavigatorController<StaticMetadataProvider>, NavigatorEvents) {
    NavigatorController::new(Arc::new(schema()))
}

fn drain(events: &mut NavigatorEvents) -> Vec<NavigatorEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

/// Provider that parks requests for one object until released.
struct GatedProvider {
    inner: StaticMetadataProvider,
    gated_object: String,
    entered: Notify,
    release: Notify,
}

impl GatedProvider {
    fn new(gated_object: &str) -> Self {
        Self {
            inner: schema(),
            gated_object: gated_object.to_string(),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl SchemaMetadataProvider for GatedProvider {
    async fn get_relational_fields(&self, object_name: &str) -> MetadataResult<RelationalFields> {
        if object_name == self.gated_object {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.get_relational_fields(object_name).await
    }

    async fn list_objects(&self) -> MetadataResult<Vec<ObjectInfo>> {
        self.inner.list_objects().await
    }
}

/// Provider whose service is down for one object.
struct FailingProvider {
    inner: StaticMetadataProvider,
    failing_object: String,
}

#[async_trait]
impl SchemaMetadataProvider for FailingProvider {
    async fn get_relational_fields(&self, object_name: &str) -> MetadataResult<RelationalFields> {
        if object_name == self.failing_object {
            return Err(MetadataError::unavailable("connection reset"));
        }
        self.inner.get_relational_fields(object_name).await
    }

    async fn list_objects(&self) -> MetadataResult<Vec<ObjectInfo>> {
        self.inner.list_objects().await
    }
}

// =============================================================================
// Full walks
// =============================================================================

#[tokio::test]
async fn test_lookup_then_select() {
    let (nav, mut events) = navigator();
    nav.open("Account").await.unwrap();

    let outcome = nav.expand(0, "OwnerId").await.unwrap();
    assert_eq!(
        outcome,
        ExpandOutcome::Expanded {
            depth: 1,
            object_name: "User".into()
        }
    );

    let path = nav.select(1, "Name").await.unwrap();
    assert_eq!(path.as_str(), "owner.Name");

    assert_eq!(
        drain(&mut events),
        vec![
            NavigatorEvent::PathSelected { path },
            NavigatorEvent::NavigatorClosed
        ]
    );
    assert!(!nav.is_open().await);
}

#[tokio::test]
async fn test_child_relationship_then_select() {
    let (nav, _events) = navigator();
    nav.open("Account").await.unwrap();
    nav.set_filter_mode(0, FilterMode::ChildrenOnly).await.unwrap();
    nav.expand(0, "Contacts").await.unwrap();

    let path = nav.select(1, "Email").await.unwrap();
    assert_eq!(path.as_str(), "Contacts.Email");
}

#[tokio::test]
async fn test_two_lookups_then_select() {
    let (nav, _events) = navigator();
    nav.open("Account").await.unwrap();
    nav.expand(0, "OwnerId").await.unwrap();
    nav.expand(1, "ManagerId").await.unwrap();

    let path = nav.select(2, "Email").await.unwrap();
    assert_eq!(path.as_str(), "owner.manager.Email");
    assert_eq!(path.hop_count(), 2);
}

#[tokio::test]
async fn test_select_on_root_has_no_prefix() {
    let (nav, _events) = navigator();
    nav.open("Account").await.unwrap();

    let path = nav.select(0, "Name").await.unwrap();
    assert_eq!(path.as_str(), "Name");
}

#[tokio::test]
async fn test_reexpand_truncates_deeper_panels() {
    let (nav, _events) = navigator();
    nav.open("Account").await.unwrap();
    nav.expand(0, "ParentId").await.unwrap();
    nav.expand(1, "OwnerId").await.unwrap();
    assert_eq!(nav.depth().await, 3);

    nav.expand(0, "Contacts").await.unwrap();

    let panels = nav.panels().await;
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[1].object_name(), "Contact");
    assert_eq!(panels[1].hop_from_parent().unwrap().field_name, "Contacts");
}

#[tokio::test]
async fn test_expand_plain_field_is_noop() {
    let (nav, mut events) = navigator();
    nav.open("Account").await.unwrap();
    let generation = nav.generation().await;

    let outcome = nav.expand(0, "Name").await.unwrap();
    assert_eq!(outcome, ExpandOutcome::NotNavigable);
    assert_eq!(nav.depth().await, 1);
    assert_eq!(nav.generation().await, generation);
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_filter_and_search_views() {
    let (nav, _events) = navigator();
    nav.open("Account").await.unwrap();

    let names = |fields: Vec<relnav::FieldDescriptor>| {
        fields.into_iter().map(|f| f.name).collect::<Vec<_>>()
    };

    assert_eq!(
        names(nav.visible_fields(0).await.unwrap()),
        vec!["Name", "OwnerId", "ParentId"]
    );

    nav.set_filter_mode(0, FilterMode::ParentsOnly).await.unwrap();
    assert_eq!(
        names(nav.visible_fields(0).await.unwrap()),
        vec!["OwnerId", "ParentId"]
    );

    nav.set_search_text(0, "  OWN ").await.unwrap();
    assert_eq!(names(nav.visible_fields(0).await.unwrap()), vec!["OwnerId"]);

    nav.set_filter_mode(0, FilterMode::ChildrenOnly).await.unwrap();
    nav.set_search_text(0, "").await.unwrap();
    assert_eq!(
        names(nav.visible_fields(0).await.unwrap()),
        vec!["Contacts", "Opportunities"]
    );
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_depth_limit_leaves_stack_unchanged() {
    let (nav, mut events) = NavigatorController::with_max_depth(Arc::new(schema()), 3);
    nav.open("Account").await.unwrap();
    nav.expand(0, "OwnerId").await.unwrap();
    nav.expand(1, "ManagerId").await.unwrap();
    let before = nav.panels().await;

    let err = nav.expand(2, "ManagerId").await.unwrap_err();
    assert!(matches!(
        err,
        NavigationError::DepthLimitReached {
            depth: 2,
            max_depth: 3
        }
    ));
    assert!(!err.is_retriable());

    let after = nav.panels().await;
    assert_eq!(after.len(), before.len());
    assert_eq!(after[2].generation(), before[2].generation());

    assert!(matches!(
        drain(&mut events).as_slice(),
        [NavigatorEvent::NavigationError {
            kind: NavigationErrorKind::DepthLimitReached,
            ..
        }]
    ));
}

#[tokio::test]
async fn test_metadata_failure_is_retriable_and_keeps_stack() {
    let provider = FailingProvider {
        inner: schema(),
        failing_object: "User".into(),
    };
    let (nav, mut events) = NavigatorController::new(Arc::new(provider));
    nav.open("Account").await.unwrap();
    nav.expand(0, "Contacts").await.unwrap();

    let err = nav.expand(1, "OwnerId").await.unwrap_err();
    assert_eq!(err.kind(), NavigationErrorKind::MetadataUnavailable);
    assert!(err.is_retriable());

    let panels = nav.panels().await;
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[1].object_name(), "Contact");

    match drain(&mut events).as_slice() {
        [NavigatorEvent::NavigationError { kind, message }] => {
            assert_eq!(*kind, NavigationErrorKind::MetadataUnavailable);
            assert!(message.contains("User"));
        }
        other => panic!("unexpected events: {:?}", other),
    }

    // The failed request does not leave the depth busy.
    let retry = nav.expand(1, "OwnerId").await.unwrap_err();
    assert_eq!(retry.kind(), NavigationErrorKind::MetadataUnavailable);
}

#[tokio::test]
async fn test_select_unknown_leaf_is_invalid_selection() {
    let (nav, mut events) = navigator();
    nav.open("Account").await.unwrap();
    nav.expand(0, "OwnerId").await.unwrap();

    let err = nav.select(1, "Phone").await.unwrap_err();
    assert_eq!(err.kind(), NavigationErrorKind::InvalidSelection);
    assert!(nav.is_open().await);

    let err = nav.select(4, "Name").await.unwrap_err();
    assert_eq!(err.kind(), NavigationErrorKind::InvalidSelection);

    let events = drain(&mut events);
    assert_eq!(events.len(), 2);
    assert!(!events
        .iter()
        .any(|e| matches!(e, NavigatorEvent::PathSelected { .. })));
}

#[tokio::test]
async fn test_expand_unknown_field_is_invalid_selection() {
    let (nav, _events) = navigator();
    nav.open("Account").await.unwrap();

    let err = nav.expand(0, "NoSuchField").await.unwrap_err();
    assert_eq!(err.kind(), NavigationErrorKind::InvalidSelection);
    assert_eq!(nav.depth().await, 1);
}

// =============================================================================
// Concurrent expands
// =============================================================================

#[tokio::test]
async fn test_second_expand_at_same_depth_is_busy() {
    let provider = Arc::new(GatedProvider::new("User"));
    let (nav, _events) = NavigatorController::new(Arc::clone(&provider));
    let nav = Arc::new(nav);
    nav.open("Account").await.unwrap();

    let pending = tokio::spawn({
        let nav = Arc::clone(&nav);
        async move { nav.expand(0, "OwnerId").await }
    });
    provider.entered.notified().await;

    let err = nav.expand(0, "Contacts").await.unwrap_err();
    assert!(matches!(err, NavigationError::NavigationBusy { depth: 0 }));
    assert!(err.is_retriable());

    provider.release.notify_one();
    let outcome = pending.await.unwrap().unwrap();
    assert_eq!(
        outcome,
        ExpandOutcome::Expanded {
            depth: 1,
            object_name: "User".into()
        }
    );

    // Settled; the depth accepts new expands again.
    nav.expand(0, "Contacts").await.unwrap();
    assert_eq!(nav.panels().await[1].object_name(), "Contact");
}

#[tokio::test]
async fn test_response_after_reopen_is_discarded() {
    let provider = Arc::new(GatedProvider::new("User"));
    let (nav, _events) = NavigatorController::new(Arc::clone(&provider));
    let nav = Arc::new(nav);
    nav.open("Account").await.unwrap();

    let pending = tokio::spawn({
        let nav = Arc::clone(&nav);
        async move { nav.expand(0, "OwnerId").await }
    });
    provider.entered.notified().await;

    nav.open("Contact").await.unwrap();

    provider.release.notify_one();
    assert_eq!(pending.await.unwrap().unwrap(), ExpandOutcome::Stale);

    let panels = nav.panels().await;
    assert_eq!(panels.len(), 1);
    assert_eq!(panels[0].object_name(), "Contact");
}

#[tokio::test]
async fn test_response_after_close_is_discarded() {
    let provider = Arc::new(GatedProvider::new("User"));
    let (nav, mut events) = NavigatorController::new(Arc::clone(&provider));
    let nav = Arc::new(nav);
    nav.open("Account").await.unwrap();

    let pending = tokio::spawn({
        let nav = Arc::clone(&nav);
        async move { nav.expand(0, "OwnerId").await }
    });
    provider.entered.notified().await;

    nav.close().await;
    provider.release.notify_one();

    assert_eq!(pending.await.unwrap().unwrap(), ExpandOutcome::Stale);
    assert!(!nav.is_open().await);
    assert_eq!(drain(&mut events), vec![NavigatorEvent::NavigatorClosed]);
}

#[tokio::test]
async fn test_response_for_replaced_panel_is_discarded() {
    let provider = Arc::new(GatedProvider::new("Opportunity"));
    let (nav, _events) = NavigatorController::new(Arc::clone(&provider));
    let nav = Arc::new(nav);
    nav.open("Account").await.unwrap();
    nav.expand(0, "ParentId").await.unwrap();

    // Expand from depth 1, then replace depth 1 from the root before the
    // response arrives.
    let pending = tokio::spawn({
        let nav = Arc::clone(&nav);
        async move { nav.expand(1, "Opportunities").await }
    });
    provider.entered.notified().await;

    nav.expand(0, "OwnerId").await.unwrap();
    provider.release.notify_one();

    assert_eq!(pending.await.unwrap().unwrap(), ExpandOutcome::Stale);
    let panels = nav.panels().await;
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[1].object_name(), "User");
}
