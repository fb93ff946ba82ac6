use crate::errors::RenderError;
use reqwest::header::CACHE_CONTROL;
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use tokio::fs;
use url::Url;

pub const DEFAULT_SOURCE: &str = "download-data.json";

/// Where the shared data document comes from. One call is one fetch.
pub trait DataSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, RenderError>> + Send;
}

#[derive(Debug, Clone)]
pub enum DocumentSource {
    File(PathBuf),
    Http { client: reqwest::Client, url: Url },
}

impl DocumentSource {
    /// `http://` and `https://` values select the HTTP source, anything else
    /// is a path on disk.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Ok(Self::Http {
                client: reqwest::Client::new(),
                url: Url::parse(raw)?,
            });
        }
        Ok(Self::File(PathBuf::from(raw)))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Http { url, .. } => url.to_string(),
        }
    }
}

impl Default for DocumentSource {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl DataSource for DocumentSource {
    async fn fetch(&self) -> Result<Vec<u8>, RenderError> {
        match self {
            Self::File(path) => Ok(fs::read(path).await?),
            Self::Http { client, url } => {
                let response = client
                    .get(url.clone())
                    .header(CACHE_CONTROL, "no-cache")
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

/// One fetch followed by one JSON decode.
pub async fn load_document<S: DataSource>(source: &S) -> Result<Value, RenderError> {
    let bytes = source.fetch().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_values_select_the_http_source() {
        let source = DocumentSource::parse("https://example.github.io/stats/download-data.json").unwrap();
        assert!(matches!(source, DocumentSource::Http { .. }));
        assert_eq!(source.describe(), "https://example.github.io/stats/download-data.json");
    }

    #[test]
    fn other_values_are_paths() {
        let source = DocumentSource::parse("data/download-data.json").unwrap();
        assert!(matches!(source, DocumentSource::File(ref path) if path.ends_with("download-data.json")));
    }

    #[tokio::test]
    async fn missing_file_is_a_fetch_error() {
        let source = DocumentSource::File(PathBuf::from("/nonexistent/download-data.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, RenderError::Fetch(_)));
    }
}
