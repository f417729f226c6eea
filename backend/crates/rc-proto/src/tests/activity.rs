use crate::access_token;

#[test]
fn given_well_formed_activity_when_extracted_then_token_returned() {
    let message = serde_json::json!({
        "project": { "access_token": "p1", "name": "ignored" },
        "text": "hi",
    });

    assert_eq!(access_token(&message), Some("p1"));
}

#[test]
fn given_missing_project_when_extracted_then_none() {
    let message = serde_json::json!({ "text": "hi" });
    assert_eq!(access_token(&message), None);
}

#[test]
fn given_project_without_token_when_extracted_then_none() {
    let message = serde_json::json!({ "project": { "name": "p" } });
    assert_eq!(access_token(&message), None);
}

#[test]
fn given_non_string_token_when_extracted_then_none() {
    let message = serde_json::json!({ "project": { "access_token": 42 } });
    assert_eq!(access_token(&message), None);
}
