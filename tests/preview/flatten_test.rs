//! Flattening realistic nested query results.

use relnav::path::DottedPath;
use relnav::preview::{flatten, flatten_many, flatten_str};
use serde_json::{json, Value};

fn path(s: &str) -> DottedPath {
    DottedPath::parse(s).unwrap()
}

fn account() -> Value {
    json!({
        "Id": "001A",
        "Name": "Acme",
        "Owner": {
            "Name": "Ada",
            "Manager": { "Name": "Grace", "Email": "grace@acme.test" }
        },
        "Contacts": [
            { "Email": "a@acme.test", "Owner": { "Name": "Ada" } },
            { "Email": "b@acme.test", "Owner": null },
            { "Email": null }
        ]
    })
}

#[test]
fn test_paths_built_by_navigator_match_result_keys() {
    let record = account();

    assert_eq!(flatten(&record, &path("Name")), vec![json!("Acme")]);
    assert_eq!(flatten(&record, &path("owner.Name")), vec![json!("Ada")]);
    assert_eq!(
        flatten(&record, &path("owner.manager.Email")),
        vec![json!("grace@acme.test")]
    );
}

#[test]
fn test_child_relationship_fans_out_in_order() {
    let record = account();

    assert_eq!(
        flatten(&record, &path("Contacts.Email")),
        vec![json!("a@acme.test"), json!("b@acme.test"), Value::Null]
    );
    assert_eq!(
        flatten(&record, &path("Contacts.owner.Name")),
        vec![json!("Ada"), Value::Null, Value::Null]
    );
}

#[test]
fn test_sparse_results_never_fail() {
    let record = json!({ "Name": "Globex", "Owner": null, "Contacts": [] });

    assert_eq!(flatten(&record, &path("owner.Name")), vec![Value::Null]);
    assert_eq!(flatten(&record, &path("owner.manager.Email")), vec![Value::Null]);
    assert!(flatten(&record, &path("Contacts.Email")).is_empty());
    assert_eq!(flatten(&record, &path("Phone")), vec![Value::Null]);
}

#[test]
fn test_non_object_records() {
    assert_eq!(flatten(&Value::Null, &path("Name")), vec![Value::Null]);
    assert_eq!(flatten(&json!("text"), &path("Name")), vec![Value::Null]);
    assert_eq!(
        flatten(&json!([{ "Name": "A" }, { "Name": "B" }]), &path("Name")),
        vec![json!("A"), json!("B")]
    );
}

#[test]
fn test_flatten_many_keeps_record_order() {
    let records = vec![
        account(),
        json!({ "Name": "Globex", "Contacts": [] }),
        json!({ "Name": "Initech", "Contacts": [{ "Email": "x@initech.test" }] }),
    ];

    assert_eq!(
        flatten_many(&records, &path("Contacts.Email")),
        vec![
            vec![json!("a@acme.test"), json!("b@acme.test"), Value::Null],
            vec![],
            vec![json!("x@initech.test")],
        ]
    );
}

#[test]
fn test_flatten_str_matches_typed_path() {
    let record = account();
    assert_eq!(
        flatten_str(&record, "Contacts.Email"),
        flatten(&record, &path("Contacts.Email"))
    );
}
