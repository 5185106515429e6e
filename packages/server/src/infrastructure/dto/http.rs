//! HTTP API request/response DTOs.
//!
//! Field names are camelCase on the wire, matching the platform's frontend
//! convention. Write responses use the `{message, data}` envelope, reads use
//! `{data}`.

use serde::{Deserialize, Serialize};

use campuslink_shared::time::timestamp_to_rfc3339;

use crate::domain::{CallRequest, ParticipantEntry, Role, StudentProfile};

/// Body of POST /request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCallBody {
    pub college_id: Option<String>,
    #[serde(default)]
    pub student_ids: Vec<String>,
    pub message: Option<String>,
    pub conversation_id: Option<String>,
}

/// Body of POST /accept, /join and /complete
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestIdBody {
    pub request_id: Option<String>,
}

/// Body of POST /schedule
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBody {
    pub request_id: Option<String>,
    /// RFC 3339 timestamp
    pub scheduled_time: Option<String>,
}

/// One participant-log entry on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub user_id: String,
    pub user_type: Role,
    /// RFC 3339
    pub joined_at: String,
    /// RFC 3339, absent while the participant counts as joined
    pub left_at: Option<String>,
}

impl From<&ParticipantEntry> for ParticipantDto {
    fn from(entry: &ParticipantEntry) -> Self {
        Self {
            user_id: entry.user_id.as_str().to_string(),
            user_type: entry.role,
            joined_at: timestamp_to_rfc3339(entry.joined_at.value()),
            left_at: entry.left_at.map(|t| timestamp_to_rfc3339(t.value())),
        }
    }
}

/// Call request on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequestDto {
    pub id: String,
    pub recruiter_id: String,
    pub college_id: String,
    pub student_ids: Vec<String>,
    pub message: String,
    pub conversation_id: String,
    pub status: String,
    /// RFC 3339, absent until scheduled
    pub scheduled_time: Option<String>,
    pub room_id: Option<String>,
    pub participants: Vec<ParticipantDto>,
    /// RFC 3339
    pub created_at: String,
}

impl From<&CallRequest> for CallRequestDto {
    fn from(request: &CallRequest) -> Self {
        Self {
            id: request.id.as_str().to_string(),
            recruiter_id: request.recruiter_id.as_str().to_string(),
            college_id: request.college_id.as_str().to_string(),
            student_ids: request
                .student_ids
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            message: request.message.clone(),
            conversation_id: request.conversation_id.as_str().to_string(),
            status: request.status.as_str().to_string(),
            scheduled_time: request
                .scheduled_time
                .map(|t| timestamp_to_rfc3339(t.value())),
            room_id: request.room_id.as_ref().map(|r| r.as_str().to_string()),
            participants: request.participants.iter().map(ParticipantDto::from).collect(),
            created_at: timestamp_to_rfc3339(request.created_at.value()),
        }
    }
}

/// Student directory entry on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub course: String,
}

impl From<&StudentProfile> for StudentDto {
    fn from(profile: &StudentProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            roll_number: profile.roll_number.clone(),
            course: profile.course.clone(),
        }
    }
}

/// `{data}` read envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBody<T> {
    pub data: T,
}

/// `{message, data}` write envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDataBody<T> {
    pub message: String,
    pub data: T,
}

/// Join response: the room token rides next to the envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponseBody {
    pub message: String,
    pub room_id: String,
    pub data: CallRequestDto,
}

/// `{message}` error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
