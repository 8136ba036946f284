use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::config::Config;
use crate::core::{FetchError, FetchOutcome, Result};
use crate::extraction::{ExtractEmails, Extractor};

#[async_trait]
pub trait FetchPage: Send + Sync {
    /// Fetch one URL and extract its addresses. Failures are returned as
    /// `FetchOutcome::Failed`, never as panics or errors.
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Fetches pages over HTTP with one shared client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    extractor: Extractor,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        // reqwest keeps no cookies unless a cookie store is enabled
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            extractor: Extractor::new(config.scan_text.unwrap_or(false)),
        })
    }

    async fn fetch_body(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response.text().await.map_err(|err| {
            if err.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Parse(describe(&err))
            }
        })
    }
}

#[async_trait]
impl FetchPage for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        match self.fetch_body(url).await {
            Ok(body) => {
                let emails = self.extractor.extract_emails(&body);
                debug!("{url}: {} address(es) found", emails.len());
                FetchOutcome::Emails(emails)
            }
            Err(err) => {
                warn!("Error fetching {url}: {err}");
                FetchOutcome::Failed(err)
            }
        }
    }
}

/// Map a reqwest send error onto a fetch error kind
fn classify_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_builder() {
        FetchError::InvalidUrl(describe(&err))
    } else if let Some(status) = err.status() {
        FetchError::HttpStatus(status.as_u16())
    } else {
        FetchError::Network(describe(&err))
    }
}

/// Innermost cause is usually the useful part ("dns error", "connection refused")
fn describe(err: &reqwest::Error) -> String {
    std::error::Error::source(err)
        .map(|e| e.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::Server;
    use std::collections::BTreeSet;

    fn fetcher(timeout: u64) -> HttpFetcher {
        let config = Config {
            timeout: Some(timeout),
            ..Default::default()
        };
        HttpFetcher::new(&config).expect("client builds")
    }

    #[tokio::test]
    async fn test_fetch__extracts_mailto_links() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/contact")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="mailto:a@x.com">a</a><a href="mailto:b@x.com">b</a>"#)
            .create_async()
            .await;

        let outcome = fetcher(5).fetch(&(server.url() + "/contact")).await;

        let expected: BTreeSet<String> = ["a@x.com", "b@x.com"].map(String::from).into();
        assert_eq!(outcome, FetchOutcome::Emails(expected));
        assert_eq!(outcome.render_cell(false), "a@x.com, b@x.com");
    }

    #[tokio::test]
    async fn test_fetch__page_without_links__empty_set() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<html><body>Hello</body></html>")
            .create_async()
            .await;

        let outcome = fetcher(5).fetch(&(server.url() + "/")).await;

        assert_eq!(outcome, FetchOutcome::Emails(BTreeSet::new()));
        assert_eq!(outcome.render_cell(false), "No emails found");
    }

    #[tokio::test]
    async fn test_fetch__404__http_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/404")
            .with_status(404)
            .with_body(r#"<a href="mailto:hidden@x.com">x</a>"#)
            .create_async()
            .await;

        let outcome = fetcher(5).fetch(&(server.url() + "/404")).await;

        assert_eq!(outcome, FetchOutcome::Failed(FetchError::HttpStatus(404)));
        assert_eq!(outcome.render_cell(false), "Error fetching email");
    }

    #[tokio::test]
    async fn test_fetch__500__http_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/500")
            .with_status(500)
            .create_async()
            .await;

        let outcome = fetcher(5).fetch(&(server.url() + "/500")).await;

        assert_eq!(outcome, FetchOutcome::Failed(FetchError::HttpStatus(500)));
    }

    #[tokio::test]
    async fn test_fetch__timeout_reached() {
        // RFC 5737 TEST-NET-1 address, never answers
        let outcome = fetcher(1).fetch("http://192.0.2.1:80/").await;

        assert!(outcome.is_failure());
        assert_eq!(outcome.render_cell(false), "Error fetching email");
    }

    #[tokio::test]
    async fn test_fetch__connection_refused__network_error() {
        // Port 1 on localhost is closed in test environments
        let outcome = fetcher(5).fetch("http://127.0.0.1:1/").await;

        assert!(matches!(
            outcome,
            FetchOutcome::Failed(FetchError::Network(_)) | FetchOutcome::Failed(FetchError::Timeout)
        ));
    }

    #[tokio::test]
    async fn test_fetch__malformed_url__invalid_url_error() {
        let outcome = fetcher(5).fetch("not a url").await;

        assert!(matches!(
            outcome,
            FetchOutcome::Failed(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch__empty_url__invalid_url_error() {
        let outcome = fetcher(5).fetch("").await;

        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn test_fetch__custom_user_agent() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ua")
            .match_header("user-agent", "custom-agent/1.0")
            .with_status(200)
            .with_body(r#"<a href="mailto:ua@x.com">x</a>"#)
            .create_async()
            .await;
        let config = Config {
            user_agent: Some("custom-agent/1.0".to_string()),
            ..Default::default()
        };

        let outcome = HttpFetcher::new(&config)
            .unwrap()
            .fetch(&(server.url() + "/ua"))
            .await;

        assert_eq!(outcome.emails().collect::<Vec<_>>(), vec!["ua@x.com"]);
    }

    #[tokio::test]
    async fn test_fetch__scan_text_from_config() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/text")
            .with_status(200)
            .with_body("<p>write to info@example.com</p>")
            .create_async()
            .await;
        let config = Config {
            scan_text: Some(true),
            ..Default::default()
        };

        let outcome = HttpFetcher::new(&config)
            .unwrap()
            .fetch(&(server.url() + "/text"))
            .await;

        assert_eq!(outcome.emails().collect::<Vec<_>>(), vec!["info@example.com"]);
    }
}
