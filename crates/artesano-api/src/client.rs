// Hand-crafted async HTTP client for the Artesano catalog API.
//
// Resources: /feedstocks, /products
// Listing is page-based (`page` is 0-based, `size` is clamped to 1..=100).

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::types;

/// Largest page size the backend honours.
pub const MAX_PAGE_SIZE: u32 = 100;

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the catalog REST API.
///
/// Holds a single `reqwest::Client` and the normalized base URL; every
/// resource path is joined onto that base.
#[derive(Debug, Clone)]
pub struct ArtesanoClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ArtesanoClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client with its own HTTP stack from a transport config.
    pub fn new(base_url: &str, transport: &crate::TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins keep any prefix
    /// (`http://host/api` → `http://host/api/`).
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) => err
                .message
                .or(err.error)
                .unwrap_or_else(|| status.to_string()),
            Err(_) if raw.is_empty() => status.to_string(),
            Err(_) => raw,
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// Query pairs shared by both list endpoints. An empty `q` is omitted.
    fn list_params(page: u32, size: u32, q: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", page.to_string()),
            ("size", size.clamp(1, MAX_PAGE_SIZE).to_string()),
        ];
        if let Some(q) = q.filter(|q| !q.is_empty()) {
            params.push(("q", q.to_owned()));
        }
        params
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Feedstocks ───────────────────────────────────────────────────

    pub async fn list_feedstocks(
        &self,
        page: u32,
        size: u32,
        q: Option<&str>,
    ) -> Result<types::Page<types::FeedstockResponse>, Error> {
        self.get_with_params("feedstocks", &Self::list_params(page, size, q))
            .await
    }

    pub async fn get_feedstock(&self, id: i64) -> Result<types::FeedstockResponse, Error> {
        self.get(&format!("feedstocks/{id}")).await
    }

    pub async fn create_feedstock(
        &self,
        body: &types::FeedstockCreateUpdate,
    ) -> Result<types::FeedstockResponse, Error> {
        self.post("feedstocks", body).await
    }

    pub async fn update_feedstock(
        &self,
        id: i64,
        body: &types::FeedstockCreateUpdate,
    ) -> Result<types::FeedstockResponse, Error> {
        self.put(&format!("feedstocks/{id}"), body).await
    }

    pub async fn delete_feedstock(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("feedstocks/{id}")).await
    }

    // ── Products ─────────────────────────────────────────────────────

    pub async fn list_products(
        &self,
        page: u32,
        size: u32,
        q: Option<&str>,
        search_type: Option<types::SearchType>,
    ) -> Result<types::Page<types::ProductResponse>, Error> {
        let mut params = Self::list_params(page, size, q);
        if let Some(st) = search_type {
            params.push(("searchType", st.as_str().to_owned()));
        }
        self.get_with_params("products", &params).await
    }

    pub async fn get_product(&self, id: i64) -> Result<types::ProductResponse, Error> {
        self.get(&format!("products/{id}")).await
    }

    pub async fn create_product(
        &self,
        body: &types::ProductCreateUpdate,
    ) -> Result<types::ProductResponse, Error> {
        self.post("products", body).await
    }

    pub async fn update_product(
        &self,
        id: i64,
        body: &types::ProductCreateUpdate,
    ) -> Result<types::ProductResponse, Error> {
        self.put(&format!("products/{id}"), body).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("products/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::ArtesanoClient;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            ArtesanoClient::from_reqwest("http://localhost:8080/api", reqwest::Client::new());
        assert!(matches!(
            client.map(|c| c.base_url().as_str().to_owned()).ok().as_deref(),
            Some("http://localhost:8080/api/")
        ));
    }

    #[test]
    fn empty_search_term_is_omitted() {
        let params = ArtesanoClient::list_params(0, 10, Some(""));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn page_size_is_clamped() {
        let params = ArtesanoClient::list_params(0, 500, None);
        assert_eq!(params[1], ("size", "100".to_owned()));
        let params = ArtesanoClient::list_params(0, 0, None);
        assert_eq!(params[1], ("size", "1".to_owned()));
    }
}
