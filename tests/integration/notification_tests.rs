//! Webhook notification tests against a mock receiver

#[cfg(test)]
mod tests {
    use certforge::config::{NotificationsConfig, WebhookEndpointConfig};
    use certforge::core::models::{
        BatchResult, CertificateArtifact, EntryFailure, FailureReason,
    };
    use certforge::core::notify::{
        NotificationError, NotificationEventType, NotificationPayload, NotificationSink,
        SIGNATURE_HEADER, WebhookNotifier, build_notifier, generate_signature,
    };
    use chrono::Utc;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn result() -> BatchResult {
        BatchResult {
            batch_id: uuid::Uuid::new_v4(),
            total: 2,
            succeeded: vec![CertificateArtifact {
                student_name: "Ana Costa".to_string(),
                image_ref: "http://localhost:8080/artifacts/a/001-ana-costa.png".to_string(),
                document_ref: "http://localhost:8080/artifacts/b/001-ana-costa.pdf".to_string(),
            }],
            failed: vec![EntryFailure {
                student_name: "Bruno Lima".to_string(),
                reason: FailureReason::RenderTimeout,
                message: "Render timed out: deadline has elapsed".to_string(),
            }],
            started_at: Utc::now(),
            finished_at: Utc::now(),
            cancelled: false,
        }
    }

    fn endpoint(server: &MockServer, secret: Option<&str>) -> WebhookEndpointConfig {
        WebhookEndpointConfig {
            url: format!("{}/hooks/certificates", server.uri()),
            secret: secret.map(str::to_string),
            timeout_seconds: 5,
            max_retries: 2,
            retry_delay_ms: 10,
            ..WebhookEndpointConfig::default()
        }
    }

    #[tokio::test]
    async fn test_payload_is_posted_and_signed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hooks/certificates"))
            .and(header("content-type", "application/json"))
            .and(header_exists(SIGNATURE_HEADER))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(
            vec![endpoint(&server, Some("shared-secret"))],
            vec!["rh@example.com".to_string()],
        )
        .unwrap();
        let result = result();
        notifier.notify(&result).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let request = &requests[0];
        let body = String::from_utf8(request.body.clone()).unwrap();

        let signature = request
            .headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert_eq!(signature, generate_signature(&body, "shared-secret").unwrap());

        let payload: NotificationPayload = serde_json::from_str(&body).unwrap();
        assert_eq!(payload.event_type, NotificationEventType::BatchCompleted);
        assert_eq!(payload.recipients, vec!["rh@example.com"]);
        assert_eq!(payload.summary.succeeded, 1);
        assert_eq!(payload.summary.failed, 1);
        assert_eq!(payload.summary.failures_by_reason.get("RenderTimeout"), Some(&1));
        assert_eq!(payload.result, result);
    }

    #[tokio::test]
    async fn test_unsigned_without_secret() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(vec![endpoint(&server, None)], Vec::new()).unwrap();
        notifier.notify(&result()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get(SIGNATURE_HEADER).is_none());
    }

    #[tokio::test]
    async fn test_delivery_is_retried_then_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("receiver down"))
            .expect(3)
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(vec![endpoint(&server, None)], Vec::new()).unwrap();
        let err = notifier.notify(&result()).await.unwrap_err();

        match err {
            NotificationError::Multiple(failures) => {
                assert_eq!(failures.len(), 1);
                assert!(failures[0].contains("503"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(vec![endpoint(&server, None)], Vec::new()).unwrap();
        notifier.notify(&result()).await.unwrap();

        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_configured_notifier_skips_disabled_hooks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut disabled = endpoint(&server, None);
        disabled.url = format!("{}/hooks/disabled", server.uri());
        disabled.enabled = false;

        let notifier = build_notifier(&NotificationsConfig {
            log_summary: true,
            recipients: Vec::new(),
            webhooks: vec![endpoint(&server, None), disabled],
        })
        .unwrap();
        notifier.notify(&result()).await.unwrap();
    }
}
