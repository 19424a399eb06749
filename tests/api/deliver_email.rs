use crate::helpers::{links, spawn_app};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn provider_accepts() -> Mock {
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg_123"})))
}

#[tokio::test]
async fn magic_link_email_is_delivered_once_with_its_subject_and_link() {
    let app = spawn_app().await;
    provider_accepts().expect(1).mount(&app.email_server).await;

    let response = app
        .post_email(&json!({
            "kind": "magic_link",
            "to": "a@example.com",
            "magicLink": "https://app.example.com/magic?t=abc"
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["id"], "msg_123");

    let sent = app.sent_emails().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Magic sign-in link for Trigger.dev");
    assert_eq!(sent[0].to, vec!["a@example.com".to_string()]);
    assert!(sent[0]
        .html
        .contains("https://app.example.com/magic?t=abc"));
    assert!(links(&sent[0].text).contains(&"https://app.example.com/magic?t=abc".to_string()));
}

#[tokio::test]
async fn invite_email_subject_names_the_organization() {
    let app = spawn_app().await;
    provider_accepts().expect(1).mount(&app.email_server).await;

    let response = app
        .post_email(&json!({
            "kind": "invite",
            "to": "b@example.com",
            "orgName": "Acme"
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let sent = app.sent_emails().await;
    assert_eq!(
        sent[0].subject,
        "You've been invited to join Acme on Trigger.dev"
    );
}

#[tokio::test]
async fn invite_email_links_to_the_invitation() {
    let app = spawn_app().await;
    provider_accepts().expect(1).mount(&app.email_server).await;

    app.post_email(&json!({
        "kind": "invite",
        "to": "b@example.com",
        "orgName": "Acme",
        "inviterName": "Wile E. Coyote",
        "inviteLink": "https://app.example.com/invites/42"
    }))
    .await;

    let sent = app.sent_emails().await;
    assert!(sent[0].text.contains("Wile E. Coyote has invited you"));
    assert!(links(&sent[0].text).contains(&"https://app.example.com/invites/42".to_string()));
    assert!(sent[0]
        .html
        .contains("href=\"https://app.example.com/invites/42\""));
}

#[tokio::test]
async fn unknown_kind_is_rejected_without_calling_the_provider() {
    let app = spawn_app().await;
    provider_accepts().expect(0).mount(&app.email_server).await;

    let response = app
        .post_email(&json!({
            "kind": "reset_password",
            "to": "c@example.com"
        }))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Unrecognized intent kind"));
}

#[tokio::test]
async fn invalid_requests_are_rejected_with_the_failing_fields() {
    let app = spawn_app().await;
    provider_accepts().expect(0).mount(&app.email_server).await;
    let test_cases = vec![
        (
            json!({"kind": "magic_link", "magicLink": "https://app.example.com/magic?t=abc"}),
            "to",
            "missing",
        ),
        (
            json!({"kind": "magic_link", "to": "a@example.com", "magicLink": "magic?t=abc"}),
            "magicLink",
            "invalid_url",
        ),
        (
            json!({"kind": "magic_link", "to": "not-an-email", "magicLink": "https://a.com"}),
            "to",
            "invalid_email",
        ),
        (
            json!({"kind": "invite", "to": "b@example.com", "orgName": "  "}),
            "orgName",
            "empty",
        ),
        (json!({"to": "b@example.com"}), "kind", "missing"),
    ];

    for (body, field, reason) in test_cases {
        let response = app.post_email(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {}.",
            body
        );
        let error: serde_json::Value = response.json().await.unwrap();
        assert!(
            error["fields"]
                .as_array()
                .unwrap()
                .contains(&json!({"field": field, "reason": reason})),
            "Expected `{}` to be reported as `{}` for {}, got {}",
            field,
            reason,
            body,
            error
        );
    }
}

#[tokio::test]
async fn a_non_json_body_is_rejected() {
    let app = spawn_app().await;
    provider_accepts().expect(0).mount(&app.email_server).await;

    let response = app
        .api_client
        .post(&format!("{}/emails", &app.address))
        .header("Content-Type", "text/plain")
        .body("kind=magic_link")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn a_provider_failure_is_reported_as_a_bad_gateway() {
    let app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_email(&json!({
            "kind": "magic_link",
            "to": "a@example.com",
            "magicLink": "https://app.example.com/magic?t=abc"
        }))
        .await;

    assert_eq!(502, response.status().as_u16());
}

#[tokio::test]
async fn a_provider_timeout_is_reported_as_a_bad_gateway() {
    let app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "msg_123"}))
                .set_delay(std::time::Duration::from_secs(180)),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_email(&json!({
            "kind": "magic_link",
            "to": "a@example.com",
            "magicLink": "https://app.example.com/magic?t=abc"
        }))
        .await;

    assert_eq!(502, response.status().as_u16());
}
