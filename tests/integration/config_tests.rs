//! Configuration loading and validation tests

#[cfg(test)]
mod tests {
    use certforge::config::{
        BatchConfig, Config, LogFormat, StorageBackend, Validate, WebhookEndpointConfig,
    };
    use certforge::core::batch::BatchSettings;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    const EXAMPLE: &str = include_str!("../../config/certforge.yaml.example");

    // ==================== Shipped example ====================

    #[test]
    fn test_example_config_parses_and_validates() {
        let config = Config::from_yaml_str(EXAMPLE).unwrap();
        config.validate().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.batch.retention_seconds, 86_400);

        let trainings: Vec<(&str, u32)> = config
            .catalog
            .trainings
            .iter()
            .map(|t| (t.name.as_str(), t.workload))
            .collect();
        assert_eq!(
            trainings,
            vec![
                ("Treinamento de Segurança do Trabalho", 8),
                ("Capacitação em Liderança", 16),
                ("Workshop de Inovação", 4),
            ]
        );
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "batch:\n  max_concurrency: 2\nrenderer:\n  api_key: k").unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.batch.max_concurrency, 2);
        assert_eq!(config.batch.max_retries, BatchConfig::default().max_retries);
        assert_eq!(config.renderer.api_key.as_deref(), Some("k"));
        assert_eq!(config.server, Default::default());
    }

    // ==================== Validation ====================

    #[test]
    fn test_s3_backend_requires_bucket() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::S3;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Storage config error"));
        assert!(err.contains("bucket"));
    }

    #[test]
    fn test_invalid_date_format_is_rejected() {
        let mut config = BatchConfig::default();
        config.date_format = "%d/%Q".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_webhook_url_must_be_http() {
        let mut config = Config::default();
        config.notifications.webhooks.push(WebhookEndpointConfig {
            url: "ftp://hooks.example.com".to_string(),
            ..WebhookEndpointConfig::default()
        });

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Notifications config error"));
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "certforge=loud".to_string();
        assert!(config.validate().is_err());
    }

    // ==================== Batch settings ====================

    #[test]
    fn test_batch_settings_follow_config() {
        let config = BatchConfig {
            max_concurrency: 6,
            max_retries: 4,
            retry_base_delay_ms: 50,
            render_timeout_seconds: 30,
            template_extensions: vec![".PPTX".to_string()],
            retention_seconds: 600,
            ..BatchConfig::default()
        };

        let settings = BatchSettings::from(&config);
        assert_eq!(settings.retention, Duration::from_secs(600));
        assert_eq!(settings.max_concurrency, 6);
        assert_eq!(settings.retry.max_attempts, 5);
        assert_eq!(settings.retry.base_delay, Duration::from_millis(50));
        assert_eq!(settings.render_timeout, Duration::from_secs(30));
        assert_eq!(settings.template_extensions, vec!["pptx"]);
    }
}
