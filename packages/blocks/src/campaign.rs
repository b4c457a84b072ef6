//! Campaign wire types shared between the editor and the backend client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::block::Block;

/// Campaign lifecycle status. Parsing is case-insensitive; statuses this
/// client does not know about are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sending,
    Sent,
    Other(String),
}

impl CampaignStatus {
    /// Only draft campaigns may be overwritten by background saves.
    pub fn is_draft(&self) -> bool {
        matches!(self, CampaignStatus::Draft)
    }
}

impl FromStr for CampaignStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "draft" => CampaignStatus::Draft,
            "scheduled" => CampaignStatus::Scheduled,
            "sending" => CampaignStatus::Sending,
            "sent" => CampaignStatus::Sent,
            _ => CampaignStatus::Other(s.to_string()),
        })
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Scheduled => write!(f, "scheduled"),
            CampaignStatus::Sending => write!(f, "sending"),
            CampaignStatus::Sent => write!(f, "sent"),
            CampaignStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for CampaignStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CampaignStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("status parse is infallible"))
    }
}

impl Default for CampaignStatus {
    fn default() -> Self {
        CampaignStatus::Draft
    }
}

/// Mirror of the block tree kept under `design` for backend consumers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Design {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Rendered campaign content stored alongside the block tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CampaignContent {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub design: Design,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<CampaignContent>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_saved: Option<DateTime<Utc>>,
}

impl Campaign {
    pub fn subject(&self) -> &str {
        self.subject
            .as_deref()
            .or_else(|| self.content.as_ref().and_then(|c| c.subject.as_deref()))
            .unwrap_or(&self.name)
    }
}

/// Body of `POST /campaigns/:id/auto-save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoSavePayload {
    pub blocks: Vec<Block>,
    pub design: Design,
}

impl AutoSavePayload {
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let design = Design {
            blocks: blocks.clone(),
        };
        Self { blocks, design }
    }
}

/// Response of `POST /campaigns/:id/auto-save`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSaveResponse {
    pub last_saved: DateTime<Utc>,
}
