use crate::config::ClientConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::utils::progress::Progress;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

// Upper bound on the body buffer reserved from a Content-Length header.
const MAX_PREALLOC: u64 = 1 << 20;

/// HTTP access to the catalog API. Cheap to clone; clones share one pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    config: ClientConfig,
    base: Url,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> CatalogResult<Self> {
        config.validate()?;
        let base = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, config, base })
    }

    pub fn from_env() -> CatalogResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds `{base}/{segments..}/?{query}`. Segments are percent-encoded
    /// individually, so a `/` inside a search word cannot change the route.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> CatalogResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GETs `url` and decodes the JSON body. When the server sends a length,
    /// each received chunk is reported to `progress`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        mut progress: Option<&mut Progress<'_>>,
    ) -> CatalogResult<T> {
        debug!("GET {}", url);

        let mut response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                endpoint: url.path().to_string(),
                status,
            });
        }

        let total = response.content_length();
        let mut body = Vec::with_capacity(total.unwrap_or(0).min(MAX_PREALLOC) as usize);
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            if let (Some(progress), Some(total)) = (progress.as_mut(), total) {
                progress.transferred(body.len() as u64, total);
            }
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn endpoint_appends_segments_with_trailing_slash() {
        let url = client("http://host:8000/api")
            .endpoint(&["search", "Caesar", "title+text"], &[("page", "2".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://host:8000/api/search/Caesar/title+text/?page=2");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_on_base() {
        let url = client("http://host:8000/api/").endpoint(&["books"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://host:8000/api/books/");
    }

    #[test]
    fn endpoint_escapes_segment_contents() {
        let url = client("http://host/api")
            .endpoint(&["search", "de bello/gallico", "text"], &[])
            .unwrap();
        assert_eq!(url.path(), "/api/search/de%20bello%2Fgallico/text/");
    }

    #[test]
    fn rejects_invalid_config() {
        let result = CatalogClient::new(ClientConfig::new("http://host/api").with_page_size(0));
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }
}
