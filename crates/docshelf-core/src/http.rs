//! HTTP plumbing shared by the remote object and table stores.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};

use crate::config::remote::{RemoteConfig, RemoteCredentials};
use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

/// Authenticated client for the hosted REST APIs.
///
/// Credentials are resolved per call, so a client built from an incomplete
/// config can be constructed but every request fails with a configuration
/// error.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: Client,
    config: RemoteConfig,
    failure_kind: ErrorKind,
}

impl RemoteClient {
    /// Create a client. Non-2xx answers other than 404 and 409 are reported
    /// as `failure_kind`. Missing credentials only warn here.
    pub fn new(config: &RemoteConfig, failure_kind: ErrorKind) -> AppResult<Self> {
        config.warn_if_incomplete();
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            http,
            config: config.clone(),
            failure_kind,
        })
    }

    /// The underlying reqwest client.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// The remote settings this client was built from.
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Resolve the credentials, failing if either part is missing.
    pub fn credentials(&self) -> AppResult<RemoteCredentials> {
        self.config.credentials()
    }

    /// Attach the service key as `apikey` header and bearer token.
    pub fn authorize(request: RequestBuilder, creds: &RemoteCredentials) -> RequestBuilder {
        request
            .header("apikey", &creds.service_key)
            .bearer_auth(&creds.service_key)
    }

    /// Send a request and turn non-2xx answers into errors carrying the
    /// remote body verbatim.
    pub async fn send(&self, request: RequestBuilder, action: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("{action} request failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::new(
            status_kind(status, self.failure_kind),
            format!("{action} failed ({status}): {body}"),
        ))
    }
}

/// Error kind for a non-2xx status.
pub fn status_kind(status: StatusCode, fallback: ErrorKind) -> ErrorKind {
    match status {
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::CONFLICT => ErrorKind::Conflict,
        _ => fallback,
    }
}

/// Append path segments to `base`. Segments are split on `/` and each
/// piece is percent-encoded.
pub fn join_url<'a>(base: &str, segments: impl IntoIterator<Item = &'a str>) -> AppResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| AppError::configuration(format!("Invalid remote URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| AppError::configuration("Remote URL cannot be a base"))?
        .pop_if_empty()
        .extend(segments.into_iter().flat_map(|s| s.split('/')));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_encodes_segments() {
        let url = join_url(
            "https://project.example.co/",
            ["storage", "v1", "object", "documents", "u1/legacy #1 scan.pdf"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://project.example.co/storage/v1/object/documents/u1/legacy%20%231%20scan.pdf"
        );
    }

    #[test]
    fn test_join_url_rejects_bad_base() {
        let err = join_url("not a url", ["rest"]).unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[test]
    fn test_status_kind() {
        assert_eq!(
            status_kind(StatusCode::NOT_FOUND, ErrorKind::Storage),
            ErrorKind::NotFound
        );
        assert_eq!(
            status_kind(StatusCode::CONFLICT, ErrorKind::Database),
            ErrorKind::Conflict
        );
        assert_eq!(
            status_kind(StatusCode::BAD_REQUEST, ErrorKind::Database),
            ErrorKind::Database
        );
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let client = RemoteClient::new(&RemoteConfig::default(), ErrorKind::Storage).unwrap();
        assert!(client.credentials().unwrap_err().is(ErrorKind::Configuration));
    }
}
