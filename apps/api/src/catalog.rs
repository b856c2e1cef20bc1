//! Project catalog — read-only client for the external project store.
//!
//! The store is queried over HTTP (Supabase-style REST) and returns rows in
//! arbitrary order; the matcher imposes its own stability downstream. The
//! core never mutates the store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const CATALOG_PATH: &str = "/rest/v1/Projects";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned status {status}")]
    Api { status: u16 },
}

/// One staffing project as the store serves it. Field names follow the store
/// schema; identity is `ProjectID`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "ProjectID")]
    pub id: i64,
    #[serde(rename = "ProjectName")]
    pub name: String,
    #[serde(rename = "ClientName")]
    pub client: String,
    #[serde(rename = "Sector", default)]
    pub sector: Option<String>,
    #[serde(rename = "RiskLevel", default)]
    pub risk_level: Option<String>,
    #[serde(rename = "ExpectedProjectDurationMonths", default)]
    pub duration_months: Option<i64>,
    #[serde(rename = "NoOfResources", default)]
    pub resource_count: Option<i64>,
    #[serde(rename = "Deliverables", default)]
    pub deliverables: Option<String>,
    #[serde(rename = "GeneratedProject", default)]
    pub description: Option<String>,
}

/// Read-only access to the project catalog. Carried in `AppState` as
/// `Arc<dyn ProjectCatalog>` so the pipeline never depends on the transport.
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Project>, CatalogError>;
}

/// Production catalog client. Authenticates with the store's service key.
#[derive(Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCatalog {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl ProjectCatalog for HttpCatalog {
    async fn fetch(&self) -> Result<Vec<Project>, CatalogError> {
        let url = format!("{}{CATALOG_PATH}", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
            });
        }

        let projects: Vec<Project> = response.json().await?;
        debug!("catalog returned {} projects", projects.len());
        Ok(projects)
    }
}
