//! Spreadsheet roster source tests against a mock export endpoint

#[cfg(test)]
mod tests {
    use certforge::config::RosterConfig;
    use certforge::core::roster::{RosterError, RosterSource, SheetsRosterSource};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SHEET_ID: &str = "1AbCdEfGhIjKlMnOpQrStUvWxYz";

    fn source(server: &MockServer, has_header: bool) -> SheetsRosterSource {
        SheetsRosterSource::new(RosterConfig {
            timeout_seconds: 5,
            has_header,
            export_base_url: server.uri(),
        })
        .unwrap()
    }

    fn csv(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/csv; charset=utf-8")
            .set_body_string(body)
    }

    #[tokio::test]
    async fn test_sheet_id_is_exported_as_csv() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/spreadsheets/d/{SHEET_ID}/export")))
            .and(query_param("format", "csv"))
            .respond_with(csv("Nome\nAna Costa\nBruno Lima\n\nCarla Souza\n"))
            .expect(1)
            .mount(&server)
            .await;

        let roster = source(&server, true).fetch_roster(SHEET_ID).await.unwrap();

        let names: Vec<&str> = roster
            .entries()
            .iter()
            .map(|e| e.student_name.as_str())
            .collect();
        assert_eq!(names, vec!["Ana Costa", "Bruno Lima", "Carla Souza"]);
        assert_eq!(roster.entries()[2].position, 2);
    }

    #[tokio::test]
    async fn test_direct_csv_url_is_fetched_as_is() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/turma.csv"))
            .respond_with(csv("Ana Costa,extra\nDiego Alves,extra\n"))
            .mount(&server)
            .await;

        let reference = format!("{}/turma.csv", server.uri());
        let roster = source(&server, false).fetch_roster(&reference).await.unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.entries()[1].student_name, "Diego Alves");
    }

    #[tokio::test]
    async fn test_missing_sheet_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = source(&server, false)
            .fetch_roster(SHEET_ID)
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::UnreachableSource(_)));
    }

    #[tokio::test]
    async fn test_login_page_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string("<html><body>Sign in</body></html>"),
            )
            .mount(&server)
            .await;

        let err = source(&server, false)
            .fetch_roster(SHEET_ID)
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::MalformedRoster(_)));
    }

    #[tokio::test]
    async fn test_header_only_sheet_is_an_empty_roster() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(csv("Nome\n"))
            .mount(&server)
            .await;

        let roster = source(&server, true).fetch_roster(SHEET_ID).await.unwrap();
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn test_unresolvable_reference() {
        let server = MockServer::start().await;
        let err = source(&server, false)
            .fetch_roster("not a sheet")
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::UnreachableSource(_)));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
