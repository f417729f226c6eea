use std::time::Duration;

use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a fine-grained project access check. Failures never
/// surface to the caller as errors, only as denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AclDecision {
    Authorized,
    Denied,
}

#[derive(Debug, Deserialize)]
struct AclResponse {
    result: AclResult,
}

#[derive(Debug, Deserialize)]
struct AclResult {
    check: bool,
}

/// Client for the web application's authorization API. Confirms that a
/// specific user may join a specific project room.
#[derive(Debug, Clone)]
pub struct AclGateway {
    client: Client,
    base_url: String,
}

impl AclGateway {
    /// `base_url` is scheme + authority, no trailing slash.
    pub fn from_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Authorization holds only when the endpoint responds with a body
    /// parsing to `{ result: { check: true } }`. Network failures,
    /// non-JSON bodies, and missing fields are logged and mapped to
    /// `Denied`.
    pub async fn check_access(&self, project: &str, user_id: i64) -> AclDecision {
        let url = format!("{}/api/auth/{}/{}.json", self.base_url, project, user_id);

        match self.fetch(&url).await {
            Ok(true) => {
                debug!("ACL check passed: project={project} user={user_id}");
                AclDecision::Authorized
            }
            Ok(false) => {
                debug!("ACL check denied: project={project} user={user_id}");
                AclDecision::Denied
            }
            Err(e) => {
                error!("ACL check failed, denying: {e}");
                AclDecision::Denied
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<bool, reqwest::Error> {
        let response: AclResponse = self
            .client
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?
            .json()
            .await?;

        Ok(response.result.check)
    }
}
