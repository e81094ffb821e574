use serde::{Serialize, Deserialize};
use time::{macros::format_description, OffsetDateTime, UtcOffset};
use uuid::Uuid;
use crate::{date_key::DateKey, date_set::DateSet, error::Result};

pub const SUBMIT_ACTION: &str = "submitVotes";
pub const VALIDITY_VALID: &str = "1";
/// Name of the single multipart field carrying the envelope.
pub const FORM_FIELD: &str = "data";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VotingRecord {
    pub voter_name: String,
    pub voting_date: DateKey,
    pub voting_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    pub validity_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitEnvelope {
    pub action: String,
    pub data: Vec<VotingRecord>,
}

impl SubmitEnvelope {
    pub fn new(data: Vec<VotingRecord>) -> Self {
        Self { action: SUBMIT_ACTION.to_string(), data }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Reply body the endpoint sends when it answers with JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One batch ready for delivery. The id only correlates log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionBatch {
    pub id: Uuid,
    pub envelope: SubmitEnvelope,
}

impl SubmissionBatch {
    pub fn len(&self) -> usize {
        self.envelope.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelope.data.is_empty()
    }
}

pub fn format_voting_time(now: OffsetDateTime, offset: UtcOffset) -> Result<String> {
    Ok(now
        .to_offset(offset)
        .format(format_description!("[year]/[month]/[day] [hour]:[minute]:[second]"))?)
}

/// One record per selected date, all sharing a single timestamp taken from `now`.
pub fn build_batch(
    dates: &DateSet,
    voter_name: &str,
    email_address: &str,
    now: OffsetDateTime,
    offset: UtcOffset,
) -> Result<SubmissionBatch> {
    let voting_time = format_voting_time(now, offset)?;
    let voter_name = voter_name.trim().to_string();
    let email_address = Some(email_address.trim())
        .filter(|email| !email.is_empty())
        .map(str::to_string);

    let data = dates
        .iter()
        .map(|voting_date| VotingRecord {
            voter_name: voter_name.clone(),
            voting_date,
            voting_time: voting_time.clone(),
            email_address: email_address.clone(),
            validity_status: VALIDITY_VALID.to_string(),
        })
        .collect();

    Ok(SubmissionBatch {
        id: Uuid::new_v4(),
        envelope: SubmitEnvelope::new(data),
    })
}
