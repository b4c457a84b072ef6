//! Typed REST client for the campaign backend.
//!
//! Bearer-token auth from the shared session; JSON bodies throughout. No
//! retries and no backoff anywhere — the user (or the next edit) is the
//! retry mechanism.

use std::future::Future;
use std::pin::Pin;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use mailcraft_blocks::{AutoSavePayload, AutoSaveResponse, Block, Campaign};

use crate::errors::ApiError;
use crate::session::SharedSession;

/// Body of `POST /campaigns`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

/// Body of `POST /campaigns/:id/recipients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientSelection {
    #[serde(default)]
    pub list_ids: Vec<String>,
    #[serde(default)]
    pub segment_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,
}

/// The slice of the backend the auto-save coordinator needs; lets tests
/// substitute a recording backend for the real client.
pub trait SaveBackend: Send + Sync {
    fn auto_save<'a>(
        &'a self,
        campaign_id: &'a str,
        payload: AutoSavePayload,
    ) -> Pin<Box<dyn Future<Output = Result<AutoSaveResponse, ApiError>> + Send + 'a>>;
}

pub struct ApiClient {
    http: reqwest::Client,
    session: SharedSession,
}

impl ApiClient {
    pub fn new(session: SharedSession) -> Self {
        Self {
            http: reqwest::Client::new(),
            session,
        }
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let (url, token) = {
            let session = self.session.lock().unwrap();
            (format!("{}{}", session.base_url(), path), session.token().map(str::to_string))
        };

        let mut request = self.http.request(method, &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Credentials are stale; drop them so the shell re-authenticates.
            self.session.lock().unwrap().clear();
            return Err(ApiError::Unauthorized);
        }

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                code: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    // Campaigns

    pub async fn create_campaign(
        &self,
        request: &CreateCampaignRequest,
    ) -> Result<Campaign, ApiError> {
        self.request(Method::POST, "/campaigns", Some(request)).await
    }

    pub async fn get_campaign(&self, id: &str) -> Result<Campaign, ApiError> {
        self.request(Method::GET, &format!("/campaigns/{}", id), None::<&()>)
            .await
    }

    pub async fn update_campaign(&self, campaign: &Campaign) -> Result<Campaign, ApiError> {
        self.request(
            Method::PUT,
            &format!("/campaigns/{}", campaign.id),
            Some(campaign),
        )
        .await
    }

    pub async fn auto_save(
        &self,
        campaign_id: &str,
        payload: &AutoSavePayload,
    ) -> Result<AutoSaveResponse, ApiError> {
        self.request(
            Method::POST,
            &format!("/campaigns/{}/auto-save", campaign_id),
            Some(payload),
        )
        .await
    }

    pub async fn send_campaign(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        self.request(Method::POST, &format!("/campaigns/{}/send", id), None::<&()>)
            .await
    }

    pub async fn set_recipients(
        &self,
        campaign_id: &str,
        selection: &RecipientSelection,
    ) -> Result<serde_json::Value, ApiError> {
        self.request(
            Method::POST,
            &format!("/campaigns/{}/recipients", campaign_id),
            Some(selection),
        )
        .await
    }

    // Templates

    pub async fn list_templates(&self) -> Result<Vec<Template>, ApiError> {
        self.request(Method::GET, "/templates", None::<&()>)
            .await
    }

    pub async fn get_template(&self, id: &str) -> Result<Template, ApiError> {
        self.request(Method::GET, &format!("/templates/{}", id), None::<&()>)
            .await
    }

    pub async fn create_template(&self, template: &Template) -> Result<Template, ApiError> {
        self.request(Method::POST, "/templates", Some(template)).await
    }

    pub async fn update_template(&self, template: &Template) -> Result<Template, ApiError> {
        self.request(
            Method::PUT,
            &format!("/templates/{}", template.id),
            Some(template),
        )
        .await
    }

    pub async fn delete_template(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        self.request(Method::DELETE, &format!("/templates/{}", id), None::<&()>)
            .await
    }

    pub async fn clone_template(&self, id: &str) -> Result<Template, ApiError> {
        self.request(
            Method::POST,
            &format!("/templates/{}/clone", id),
            None::<&()>,
        )
        .await
    }

    pub async fn ready_to_use_templates(&self) -> Result<Vec<Template>, ApiError> {
        self.request(Method::GET, "/templates/ready-to-use", None::<&()>)
            .await
    }

    pub async fn saved_templates(&self) -> Result<Vec<Template>, ApiError> {
        self.request(Method::GET, "/templates/saved", None::<&()>)
            .await
    }
}

impl SaveBackend for ApiClient {
    fn auto_save<'a>(
        &'a self,
        campaign_id: &'a str,
        payload: AutoSavePayload,
    ) -> Pin<Box<dyn Future<Output = Result<AutoSaveResponse, ApiError>> + Send + 'a>> {
        Box::pin(async move { ApiClient::auto_save(self, campaign_id, &payload).await })
    }
}
