use msgboard_core::{postable_content, HelloResponse, Message, CONTENT_LIMIT};

#[test]
fn postable_content_trims_and_bounds() {
    assert_eq!(postable_content("  hi  "), Some("hi"));
    assert_eq!(postable_content(""), None);
    assert_eq!(postable_content("   \n\t"), None);

    let exact = "x".repeat(CONTENT_LIMIT);
    assert_eq!(postable_content(&exact), Some(exact.as_str()));

    let over = "x".repeat(CONTENT_LIMIT + 1);
    assert_eq!(postable_content(&over), None);
}

#[test]
fn limit_counts_characters_not_bytes() {
    // 280 two-byte characters are still within the limit.
    let content = "é".repeat(CONTENT_LIMIT);
    assert_eq!(postable_content(&content), Some(content.as_str()));
}

#[test]
fn message_uses_camel_case_created_at_on_the_wire() {
    let json = r#"{"id":1,"content":"hi","createdAt":"2024-01-01T00:00:00Z"}"#;
    let message: Message = serde_json::from_str(json).expect("parse message");
    assert_eq!(
        message,
        Message {
            id: 1,
            content: "hi".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    );

    let encoded = serde_json::to_string(&message).expect("encode message");
    assert!(encoded.contains("\"createdAt\""));
}

#[test]
fn hello_response_tolerates_missing_and_extra_fields() {
    let empty: HelloResponse = serde_json::from_str("{}").expect("parse empty");
    assert_eq!(empty.message, None);

    let full: HelloResponse =
        serde_json::from_str(r#"{"message":"Hello from Fiber","status":"ok"}"#)
            .expect("parse full");
    assert_eq!(full.message.as_deref(), Some("Hello from Fiber"));
}
