//! This module provides a client to the hosted record store
//!
//! The store exposes the `goals` table through a PostgREST-style REST endpoint: rows are
//! filtered and addressed with query parameters (`id=eq.<uuid>`), and writes are plain
//! JSON bodies.

use std::error::Error;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config;
use crate::day_log::DayLog;
use crate::goal::{GoalId, GoalRecord, StoredGoal, UserId};
use crate::resource::Resource;
use crate::traits::RecordSource;

/// The path of the goals table on the server
static GOALS_PATH: &str = "rest/v1/goals";

/// A [`RecordSource`] that persists goals in a hosted record store
pub struct Client {
    resource: Resource,
}

/// A goal row, as the record store returns it
#[derive(Deserialize)]
struct GoalRow {
    id: GoalId,
    user_id: UserId,
    name: String,
    days: DayLog,
    created_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl From<GoalRow> for StoredGoal {
    fn from(row: GoalRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            record: GoalRecord {
                user_id: row.user_id,
                name: row.name,
                days: row.days,
                updated_at: row.updated_at,
            },
        }
    }
}

/// The body of an insert or update: every column except the server-assigned ones
#[derive(Serialize)]
struct GoalRowBody<'a> {
    user_id: UserId,
    name: &'a str,
    days: &'a DayLog,
    updated_at: DateTime<Utc>,
}

impl<'a> From<&'a GoalRecord> for GoalRowBody<'a> {
    fn from(record: &'a GoalRecord) -> Self {
        Self {
            user_id: record.user_id,
            name: &record.name,
            days: &record.days,
            updated_at: record.updated_at,
        }
    }
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>, T: ToString, U: ToString>(base_url: S, api_key: T, access_token: U) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let url = Url::parse(base_url.as_ref())?;

        Ok(Self {
            resource: Resource::new(url, api_key.to_string(), access_token.to_string()),
        })
    }

    fn goals_url(&self) -> Url {
        self.resource.combine(GOALS_PATH).url().clone()
    }

    fn request(&self, method: Method, url: &Url) -> reqwest::RequestBuilder {
        reqwest::Client::new()
            .request(method, url.as_str())
            .header("apikey", self.resource.api_key())
            .bearer_auth(self.resource.access_token())
            .header("X-Client-Info", config::CLIENT_NAME.lock().unwrap().clone())
            .header(CONTENT_TYPE, "application/json")
    }
}

#[async_trait]
impl RecordSource for Client {
    async fn list(&self, owner: UserId) -> Result<Vec<StoredGoal>, Box<dyn Error + Send + Sync>> {
        let mut url = self.goals_url();
        url.query_pairs_mut()
            .append_pair("user_id", &format!("eq.{}", owner))
            .append_pair("order", "created_at.asc");

        let response = self.request(Method::GET, &url)
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let rows: Vec<GoalRow> = response.json().await?;
        log::debug!("The record store returned {} goal rows", rows.len());
        Ok(rows.into_iter().map(StoredGoal::from).collect())
    }

    async fn insert(&mut self, record: GoalRecord) -> Result<StoredGoal, Box<dyn Error + Send + Sync>> {
        let url = self.goals_url();

        let response = self.request(Method::POST, &url)
            // So that the response body is the created row, identity included
            .header("Prefer", "return=representation")
            .json(&GoalRowBody::from(&record))
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let mut rows: Vec<GoalRow> = response.json().await?;
        if rows.is_empty() {
            return Err("The record store returned no created row".into());
        }
        Ok(rows.remove(0).into())
    }

    async fn update(&mut self, id: GoalId, record: GoalRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut url = self.goals_url();
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));

        let response = self.request(Method::PATCH, &url)
            .json(&GoalRowBody::from(&record))
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(())
    }

    async fn delete(&mut self, id: GoalId) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut url = self.goals_url();
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));

        let response = self.request(Method::DELETE, &url)
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(())
    }
}
