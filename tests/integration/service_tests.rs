//! End-to-end batches through the fully wired service
//!
//! Roster export and conversion service are mocked; artifacts land in a
//! temporary directory through the local store.

#[cfg(test)]
mod tests {
    use crate::common::generation_request;
    use certforge::config::{Config, SeedTraining};
    use certforge::core::catalog::TrainingCatalog;
    use certforge::core::models::FailureReason;
    use certforge::Certforge;
    use std::path::Path;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SHEET_ID: &str = "1AbCdEfGhIjKlMnOpQrStUvWxYz";
    const PUBLIC_BASE: &str = "http://certs.test/artifacts";

    async fn service(server: &MockServer, storage: &Path) -> Certforge {
        let mut config = Config::default();
        config.roster.export_base_url = server.uri();
        config.roster.has_header = true;
        config.renderer.endpoint = format!("{}/convert", server.uri());
        config.batch.retry_base_delay_ms = 1;
        config.batch.retry_max_delay_ms = 2;
        config.storage.local.path = storage.to_string_lossy().into_owned();
        config.storage.local.public_base_url = PUBLIC_BASE.to_string();
        config.notifications.log_summary = false;
        config.catalog.trainings = vec![SeedTraining {
            id: Some("lideranca".to_string()),
            name: "Capacitação em Liderança".to_string(),
            workload: 16,
        }];
        config.validate().unwrap();

        Certforge::new(config).await.unwrap()
    }

    async fn mount_roster(server: &MockServer, csv: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/spreadsheets/d/{SHEET_ID}/export")))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/csv")
                    .set_body_string(csv),
            )
            .mount(server)
            .await;
    }

    fn stored_path(storage: &Path, url: &str) -> std::path::PathBuf {
        let relative = url
            .strip_prefix(PUBLIC_BASE)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or_else(|| panic!("unexpected artifact url {url}"));
        storage.join(relative)
    }

    #[tokio::test]
    async fn test_batch_writes_artifacts_to_local_store() {
        let server = MockServer::start().await;
        let storage = tempfile::tempdir().unwrap();
        mount_roster(&server, "Nome\nAna Costa\nBruno Lima\n").await;
        Mock::given(method("POST"))
            .and(path("/convert"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"rendered".to_vec()))
            .mount(&server)
            .await;

        let service = service(&server, storage.path()).await;
        let coordinator = service.coordinator();
        let handle = coordinator
            .submit_batch(generation_request("lideranca"))
            .await
            .unwrap();
        let result = coordinator.wait_for_completion(handle).await.unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.succeeded.len(), 2);
        for artifact in &result.succeeded {
            for url in [&artifact.image_ref, &artifact.document_ref] {
                let file = stored_path(storage.path(), url);
                assert_eq!(tokio::fs::read(&file).await.unwrap(), b"rendered");
            }
        }
        assert!(result.succeeded[1].document_ref.ends_with("/002-bruno-lima.pdf"));
        assert!(service.health_check().await.is_healthy());
    }

    #[tokio::test]
    async fn test_malformed_template_fails_only_affected_entries() {
        let server = MockServer::start().await;
        let storage = tempfile::tempdir().unwrap();
        mount_roster(&server, "Nome\nAna Costa\nBruno Lima\n").await;
        Mock::given(method("POST"))
            .and(body_string_contains("Bruno Lima"))
            .respond_with(ResponseTemplate::new(422).set_body_string("unknown placeholder"))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"rendered".to_vec()))
            .with_priority(2)
            .mount(&server)
            .await;

        let service = service(&server, storage.path()).await;
        let coordinator = service.coordinator();
        let handle = coordinator
            .submit_batch(generation_request("lideranca"))
            .await
            .unwrap();
        let result = coordinator.wait_for_completion(handle).await.unwrap();

        assert_eq!(result.succeeded.len(), 1);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].student_name, "Bruno Lima");
        assert_eq!(result.failed[0].reason, FailureReason::TemplateMalformed);
    }

    #[tokio::test]
    async fn test_seeded_catalog_is_available() {
        let server = MockServer::start().await;
        let storage = tempfile::tempdir().unwrap();
        let service = service(&server, storage.path()).await;

        let training = service.catalog().get("lideranca").await.unwrap();
        assert_eq!(training.workload, 16);
    }
}
