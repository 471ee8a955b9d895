//! API documentation.

use axum::response::Html;

/// Stoplight API documentation.
pub async fn handler() -> Html<String> {
    Html(
        r#"
<html lang="en">
<head>
    <title>Contact Intake API</title>
    <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
</head>
<body>
    <main role="main">
        <elements-api apiDescriptionUrl="/api/openapi.json" router="hash" />
    </main>
</body>
</html>
"#
        .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::infrastructure::http::{router, state::test_state};

    #[tokio::test]
    async fn test_docs_handler() -> TestResult {
        let state = test_state(None);

        let response = TestServer::new(router(state))?.get("/api").await;

        response.assert_status_ok();

        let raw_text = response.text();

        assert!(raw_text.contains("Contact Intake API"));
        assert!(raw_text.contains("/api/openapi.json"));

        Ok(())
    }
}
