//! Change-request table API client.
//!
//! Two calls per update: a lookup by change number to find the record's
//! `sys_id`, then an update of that record. Nothing is retried.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::config::ChangeConfig;
use crate::error::{ClientError, ClientResult};
use crate::status::{ChangeStatus, PipelineOutcome};

const TABLE_PATH: &[&str] = &["api", "now", "table", "change_request"];
const REQUEST_TIMEOUT_SECS: u64 = 30;
const ERROR_BODY_LIMIT: usize = 200;

/// A change record as returned by the table API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChangeRecord {
    pub sys_id: String,
    /// Every other field on the record, as returned.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ChangeRecord {
    /// A field rendered as a string, if present and scalar.
    pub fn field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChangeUpdate<'a> {
    state: ChangeStatus,
    work_notes: &'a str,
}

/// Client for the change-request table.
#[derive(Debug)]
pub struct ChangeClient {
    http: Client,
    table_url: Url,
    username: String,
    password: SecretString,
}

impl ChangeClient {
    pub fn new(config: ChangeConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let mut table_url = config.instance_url;
        table_url
            .path_segments_mut()
            .map_err(|()| ClientError::config_error("instance url cannot be a base"))?
            .pop_if_empty()
            .extend(TABLE_PATH);

        Ok(Self {
            http,
            table_url,
            username: config.username,
            password: config.password,
        })
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    /// Look a change request up by its number.
    pub async fn find_change_request(&self, number: &str) -> ClientResult<Option<ChangeRecord>> {
        let response = self
            .http
            .get(self.table_url.clone())
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(ACCEPT, "application/json")
            .query(&[
                ("sysparm_query", format!("number={number}")),
                ("sysparm_limit", "1".to_string()),
            ])
            .send()
            .await?;

        let response = check_status(response, "retrieving change request").await?;
        let body: Value = serde_json::from_str(&response.text().await?)?;
        first_record(body)
    }

    /// Set a change request's state and append a timestamped work note.
    pub async fn update_change_request(
        &self,
        number: &str,
        status: ChangeStatus,
        comments: &str,
    ) -> ClientResult<()> {
        let record = self
            .find_change_request(number)
            .await?
            .ok_or_else(|| {
                tracing::error!(number, "Change request not found");
                ClientError::ChangeNotFound {
                    number: number.to_string(),
                }
            })?;

        let note = work_note(comments, Utc::now());
        let update = ChangeUpdate {
            state: status,
            work_notes: &note,
        };

        let mut record_url = self.table_url.clone();
        record_url
            .path_segments_mut()
            .map_err(|()| ClientError::config_error("instance url cannot be a base"))?
            .push(&record.sys_id);

        let response = self
            .http
            .put(record_url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&update)?)
            .send()
            .await?;

        check_status(response, "updating change request").await?;
        tracing::info!(number, sys_id = %record.sys_id, %status, "Updated change request");
        Ok(())
    }

    /// Map a pipeline outcome to a state and record it on the change request.
    ///
    /// Returns the state that was applied.
    pub async fn report_outcome(
        &self,
        number: &str,
        outcome: &PipelineOutcome,
    ) -> ClientResult<ChangeStatus> {
        let status = outcome.target_status();
        let comments = format!("Pipeline completed with status: {outcome}");
        self.update_change_request(number, status, &comments).await?;
        Ok(status)
    }
}

/// Work-note text attached to every update.
pub fn work_note(comments: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "Pipeline update: {comments}\n\nTimestamp: {}",
        timestamp.to_rfc3339()
    )
}

/// Take the first record of a table query response, checking the fields the
/// update relies on.
fn first_record(body: Value) -> ClientResult<Option<ChangeRecord>> {
    let records = match body.get("result") {
        Some(Value::Array(records)) => records,
        Some(_) => return Err(ClientError::invalid_response("result", "expected an array")),
        None => return Err(ClientError::invalid_response("result", "missing")),
    };
    let Some(first) = records.first() else {
        return Ok(None);
    };
    let Value::Object(fields) = first else {
        return Err(ClientError::invalid_response("result[0]", "expected an object"));
    };

    let mut fields = fields.clone();
    match fields.remove("sys_id") {
        Some(Value::String(sys_id)) if !sys_id.is_empty() => {
            Ok(Some(ChangeRecord { sys_id, fields }))
        }
        _ => Err(ClientError::invalid_response("result[0].sys_id", "missing or not a string")),
    }
}

async fn check_status(response: Response, action: &str) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    tracing::error!(status = status.as_u16(), "Error {action}: {message}");
    Err(ClientError::api_error(status.as_u16(), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config(url: &str) -> ChangeConfig {
        ChangeConfig {
            instance_url: Url::parse(url).unwrap(),
            username: "u".to_string(),
            password: SecretString::from("p".to_string()),
        }
    }

    #[test]
    fn test_table_url_from_bare_host() {
        let client = ChangeClient::new(config("https://example.service-now.com")).unwrap();
        assert_eq!(
            client.table_url().as_str(),
            "https://example.service-now.com/api/now/table/change_request"
        );
    }

    #[test]
    fn test_table_url_keeps_path_prefix() {
        let client = ChangeClient::new(config("https://proxy.example.com/snow/")).unwrap();
        assert_eq!(
            client.table_url().as_str(),
            "https://proxy.example.com/snow/api/now/table/change_request"
        );
    }

    #[test]
    fn test_work_note_format() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 15, 12, 30, 0).unwrap();
        assert_eq!(
            work_note("Pipeline completed with status: success", ts),
            "Pipeline update: Pipeline completed with status: success\n\nTimestamp: 2026-10-15T12:30:00+00:00"
        );
    }

    #[test]
    fn test_change_record_fields() {
        let record: ChangeRecord = serde_json::from_value(serde_json::json!({
            "sys_id": "abc123",
            "number": "CHG0000001",
            "state": -4,
            "approval": {"link": "x", "value": "approved"}
        }))
        .unwrap();
        assert_eq!(record.sys_id, "abc123");
        assert_eq!(record.field("number").as_deref(), Some("CHG0000001"));
        assert_eq!(record.field("state").as_deref(), Some("-4"));
        assert_eq!(record.field("approval"), None);
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn test_first_record_of_lookup() {
        let record = first_record(serde_json::json!({
            "result": [{"sys_id": "abc123", "number": "CHG0000001"}]
        }))
        .unwrap()
        .unwrap();
        assert_eq!(record.sys_id, "abc123");
        assert_eq!(record.field("number").as_deref(), Some("CHG0000001"));
        assert!(!record.fields.contains_key("sys_id"));

        assert_eq!(first_record(serde_json::json!({"result": []})).unwrap(), None);
    }

    #[test]
    fn test_first_record_rejects_malformed_lookup() {
        let cases = [
            (serde_json::json!({"error": {"message": "nope"}}), "result"),
            (serde_json::json!({"result": {"sys_id": "abc"}}), "result"),
            (serde_json::json!({"result": ["abc"]}), "result[0]"),
            (serde_json::json!({"result": [{"number": "CHG0000001"}]}), "result[0].sys_id"),
            (serde_json::json!({"result": [{"sys_id": 7}]}), "result[0].sys_id"),
        ];
        for (body, expected) in cases {
            match first_record(body) {
                Err(ClientError::InvalidResponse { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidResponse for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_update_body_shape() {
        let body = serde_json::to_value(ChangeUpdate {
            state: ChangeStatus::Review,
            work_notes: "note",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"state": "Review", "work_notes": "note"}));
    }
}
