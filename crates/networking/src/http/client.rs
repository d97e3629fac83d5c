//! Matching-service HTTP client with bearer-token authentication

use finders_core::{
    parse_candidates, CandidateMatch, ClaimReceipt, Error, FoundItemSubmission,
    FoundReportReceipt, ImageRef, ItemId, LostItemSubmission, QueryId, Result,
    SubmissionReceipt,
};
use finders_persistence::CandidateCache;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    multipart::{Form, Part},
    Client, Response, Url,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};

const USER_AGENT_VALUE: &str = concat!("campus-finders/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the matching service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root, e.g. `https://finders.example.ac.jp`
    pub base_url: String,
    /// Bearer token issued at login; requests are anonymous without one
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the lost-and-found matching service
///
/// Every request carries the bearer token (if configured). Candidate
/// lists can optionally be served from a shared in-memory cache so that
/// returning to the results screen for the same query does not refetch.
pub struct FindersClient {
    http: Client,
    base_url: Url,
    has_token: bool,
    /// Optional shared candidate cache
    cache: Option<Arc<CandidateCache>>,
}

impl FindersClient {
    /// Create a new client, validating the base URL and token
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut base = config.base_url.trim().trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)
            .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", config.base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base URL must be http or https, got '{}'",
                base_url.scheme()
            )));
        }

        let http = Client::builder()
            .default_headers(Self::default_headers(config.token.as_deref())?)
            .user_agent(USER_AGENT_VALUE)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            has_token: config.token.is_some(),
            cache: None,
        })
    }

    /// Create a new client with a shared candidate cache
    pub fn new_with_cache(config: &ClientConfig, cache: Arc<CandidateCache>) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.cache = Some(cache);
        Ok(client)
    }

    fn default_headers(token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| {
                    Error::Config("bearer token contains invalid characters".to_string())
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("invalid endpoint '{}': {}", path, e)))
    }

    /// Check if response indicates authentication failure
    fn check_auth_error(response: &Response) -> Option<Error> {
        match response.status().as_u16() {
            401 => Some(Error::TokenExpired),
            403 => Some(Error::AuthenticationError("Access forbidden".to_string())),
            _ => None,
        }
    }

    /// Turn any non-success status into an error carrying the body text
    async fn ensure_success(response: Response, what: &str) -> Result<Response> {
        if let Some(err) = Self::check_auth_error(&response) {
            error!("{} request rejected: {}", what, err);
            return Err(err);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} request failed: HTTP {} {}", what, status, body);
            return Err(Error::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            error!("Failed to parse {} response: {}", what, e);
            Error::InvalidData(e.to_string())
        })
    }

    /// Submit a lost-item query as multipart form data
    ///
    /// Returns the server-assigned identifier used to fetch candidates.
    #[instrument(
        skip(self, submission),
        fields(
            locations = submission.locations.len(),
            images = submission.images.len()
        )
    )]
    pub async fn submit_lost_item(
        &self,
        submission: &LostItemSubmission,
    ) -> Result<SubmissionReceipt> {
        let url = self.endpoint("api/lost-items")?;

        let mut form = Form::new();
        for (name, value) in submission.text_fields() {
            form = form.text(name, value);
        }
        for image in &submission.images {
            form = form.part("images", image_part(image).await?);
        }

        debug!("Submitting lost-item query to {}", url);

        let response = self.http.post(url).multipart(form).send().await?;
        let response = Self::ensure_success(response, "Lost-item submission").await?;
        let receipt: SubmissionReceipt = Self::read_json(response, "submission").await?;

        debug!("Lost-item query accepted with id {}", receipt.item_id);
        Ok(receipt)
    }

    /// Fetch the candidate found-items for a submitted query (cache-aware)
    ///
    /// A body that is not a JSON array is reported as `InvalidData`.
    #[instrument(skip(self))]
    pub async fn fetch_candidates(&self, query_id: QueryId) -> Result<Vec<CandidateMatch>> {
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.get(query_id) {
                debug!("Cache hit for query {}", query_id);
                return Ok(cached);
            }
        }

        let url = self.endpoint("api/matched-found-items")?;

        let response = self
            .http
            .get(url)
            .query(&[("lost_item_id", query_id.0)])
            .send()
            .await?;
        let response = Self::ensure_success(response, "Candidate fetch").await?;

        let body: serde_json::Value = Self::read_json(response, "candidate").await?;
        let candidates = parse_candidates(body).map_err(|e| {
            error!("Malformed candidate payload for query {}: {}", query_id, e);
            e
        })?;

        debug!("Fetched {} candidates for query {}", candidates.len(), query_id);

        if let Some(ref cache) = self.cache {
            cache.insert(query_id, candidates.clone());
        }

        Ok(candidates)
    }

    /// Register a found item with its photos and location
    #[instrument(skip(self, submission), fields(images = submission.images.len()))]
    pub async fn submit_found_item(
        &self,
        submission: &FoundItemSubmission,
    ) -> Result<FoundReportReceipt> {
        let url = self.endpoint("api/found-items")?;

        let mut form = Form::new();
        for (name, value) in submission.text_fields() {
            form = form.text(name, value);
        }
        for image in &submission.images {
            form = form.part("images", image_part(image).await?);
        }

        let response = self.http.post(url).multipart(form).send().await?;
        let response = Self::ensure_success(response, "Found-item report").await?;
        let receipt: FoundReportReceipt = Self::read_json(response, "found report").await?;

        debug!("Found item registered with id {}", receipt.item_id);
        Ok(receipt)
    }

    /// Ask the server to mark a candidate as claimed by the current user
    #[instrument(skip(self))]
    pub async fn claim_item(&self, item_id: ItemId) -> Result<ClaimReceipt> {
        let url = self.endpoint(&format!("api/found-items/{}/claim", item_id))?;

        let response = self.http.post(url).send().await?;
        let response = Self::ensure_success(response, "Claim").await?;
        let receipt: ClaimReceipt = Self::read_json(response, "claim").await?;

        debug!("Item {} claimed", receipt.item_id);
        Ok(receipt)
    }

    /// Resolve a candidate `image_url` into a fetchable URL.
    ///
    /// Absolute URLs pass through; bare paths are served from `/uploads/`.
    pub fn resolve_image_url(&self, image_url: &str) -> Option<String> {
        let trimmed = image_url.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Some(trimmed.to_string());
        }

        let path = trimmed.trim_start_matches('/');
        let path = if path.starts_with("uploads/") {
            path.to_string()
        } else {
            format!("uploads/{}", path)
        };
        self.base_url.join(&path).ok().map(|u| u.to_string())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn has_token(&self) -> bool {
        self.has_token
    }

    /// Get a reference to the cache (if one is attached)
    pub fn cache(&self) -> Option<&Arc<CandidateCache>> {
        self.cache.as_ref()
    }
}

/// Read a picked image into a multipart file part
async fn image_part(image: &ImageRef) -> Result<Part> {
    let path = image.as_str().strip_prefix("file://").unwrap_or(image.as_str());
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        error!("Failed to read attachment {}: {}", image, e);
        Error::AttachmentError(format!("{}: {}", image, e))
    })?;

    let name = image.file_name().to_string();
    let mime = mime_for(&name);
    Part::bytes(bytes)
        .file_name(name)
        .mime_str(mime)
        .map_err(|e| Error::AttachmentError(e.to_string()))
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "heic" => "image/heic",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> FindersClient {
        FindersClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            FindersClient::new(&ClientConfig::new("not a url")),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            FindersClient::new(&ClientConfig::new("ftp://example.com")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_rejects_token_with_newline() {
        let config = ClientConfig::new("https://example.com").with_token("abc\ndef");
        assert!(matches!(FindersClient::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("https://example.com/finders/");
        let url = c.endpoint("api/lost-items").unwrap();
        assert_eq!(url.as_str(), "https://example.com/finders/api/lost-items");
    }

    #[test]
    fn test_resolve_image_url() {
        let c = client("https://example.com");
        assert_eq!(
            c.resolve_image_url("uploads/wallet.jpg").as_deref(),
            Some("https://example.com/uploads/wallet.jpg")
        );
        assert_eq!(
            c.resolve_image_url("wallet.jpg").as_deref(),
            Some("https://example.com/uploads/wallet.jpg")
        );
        assert_eq!(
            c.resolve_image_url("https://cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(c.resolve_image_url("  "), None);
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("a.PNG"), "image/png");
        assert_eq!(mime_for("photo"), "image/jpeg");
    }
}
