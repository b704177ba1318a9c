use super::source::{FetchError, GraphSource};
use crate::model::{Application, GraphSnapshot};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::future::Future;

/// Talks to the directory/graph service over HTTP.
///
/// - `GET {base}/api/apps`
/// - `GET {base}/api/apps/{id}/graph`
#[derive(Debug, Clone)]
pub struct HttpGraphSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGraphSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let invalid = || FetchError::InvalidBaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn apps_url(&self) -> Result<Url, FetchError> {
        self.endpoint(&["api", "apps"])
    }

    /// The id becomes one percent-encoded path segment, so any directory id
    /// is reachable. Ids that would collapse the path are refused.
    fn graph_url(&self, app_id: &str) -> Result<Url, FetchError> {
        if matches!(app_id, "" | "." | "..") {
            return Err(FetchError::InvalidAppId(app_id.to_string()));
        }
        self.endpoint(&["api", "apps", app_id, "graph"])
    }
}

async fn get_json<T: DeserializeOwned>(client: reqwest::Client, url: Result<Url, FetchError>) -> Result<T, FetchError> {
    let url = url?;
    tracing::debug!(%url, "GET");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

impl GraphSource for HttpGraphSource {
    fn list_applications(&self) -> impl Future<Output = Result<Vec<Application>, FetchError>> + Send {
        get_json(self.client.clone(), self.apps_url())
    }

    fn fetch_graph(&self, app_id: &str) -> impl Future<Output = Result<GraphSnapshot, FetchError>> + Send {
        let client = self.client.clone();
        let url = self.graph_url(app_id);
        async move { get_json(client, url).await }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_strip_trailing_slash() {
        let source = HttpGraphSource::new("http://localhost:3000/");
        assert_eq!(source.apps_url().unwrap().as_str(), "http://localhost:3000/api/apps");
        assert_eq!(
            source.graph_url("prod-api").unwrap().as_str(),
            "http://localhost:3000/api/apps/prod-api/graph"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let source = HttpGraphSource::new("http://localhost:3000/graphs");
        assert_eq!(
            source.graph_url("auth").unwrap().as_str(),
            "http://localhost:3000/graphs/api/apps/auth/graph"
        );
    }

    #[test]
    fn test_any_directory_id_is_encoded_as_one_segment() {
        let source = HttpGraphSource::new("http://localhost:3000");
        assert_eq!(
            source.graph_url("billing v2").unwrap().as_str(),
            "http://localhost:3000/api/apps/billing%20v2/graph"
        );
        assert_eq!(
            source.graph_url("café").unwrap().as_str(),
            "http://localhost:3000/api/apps/caf%C3%A9/graph"
        );
        assert_eq!(
            source.graph_url("team/api").unwrap().as_str(),
            "http://localhost:3000/api/apps/team%2Fapi/graph"
        );
    }

    #[test]
    fn test_rejects_ids_that_collapse_the_path() {
        let source = HttpGraphSource::new("http://localhost:3000");
        for id in ["", ".", ".."] {
            assert!(matches!(source.graph_url(id), Err(FetchError::InvalidAppId(_))));
        }
    }

    #[test]
    fn test_unparseable_base_url() {
        let source = HttpGraphSource::new("not a url");
        assert!(matches!(source.apps_url(), Err(FetchError::InvalidBaseUrl(_))));
    }
}
