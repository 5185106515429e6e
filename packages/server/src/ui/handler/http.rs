//! HTTP API endpoint handlers.
//!
//! Handlers convert wire input into domain value objects, call the use case,
//! and map the use case error onto an HTTP status. Failures commit nothing.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use campuslink_shared::time::parse_rfc3339;

use crate::{
    domain::{
        AuthUser, ConversationId, DEFAULT_REQUEST_MESSAGE, RepositoryError, RequestId, Timestamp,
        TransitionError, UserId,
    },
    infrastructure::dto::http::{
        CallRequestDto, DataBody, ErrorBody, JoinResponseBody, MessageDataBody, RequestCallBody,
        RequestIdBody, ScheduleBody, StudentDto,
    },
    ui::state::AppState,
    usecase::{
        AcceptRequestUseCase, CallFlowError, CompleteCallUseCase, JoinCallUseCase,
        ListRequestsUseCase, ListStudentsUseCase, RequestCallError, RequestCallUseCase,
        ScheduleCallUseCase,
    },
};

/// Error response carrying the HTTP status and a `{message}` body.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        tracing::error!("Store error: {}", error);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        }
    }
}

impl From<CallFlowError> for ApiError {
    fn from(error: CallFlowError) -> Self {
        match error {
            CallFlowError::NotFound => Self {
                status: StatusCode::NOT_FOUND,
                message: "Video call request not found".to_string(),
            },
            CallFlowError::Forbidden => Self {
                status: StatusCode::FORBIDDEN,
                message: "Not authorized for this video call request".to_string(),
            },
            CallFlowError::Transition(TransitionError::NotJoinable { .. }) => {
                Self::bad_request("Video call is not scheduled")
            }
            CallFlowError::Transition(TransitionError::OutsideJoinWindow) => {
                Self::bad_request("Video call time has passed or not yet started")
            }
            CallFlowError::Transition(transition) => Self::bad_request(transition.to_string()),
            CallFlowError::RoomAllocation(detail) => {
                tracing::error!("Room allocation failed: {}", detail);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal server error".to_string(),
                }
            }
            CallFlowError::Store(store) => store.into(),
        }
    }
}

impl From<RequestCallError> for ApiError {
    fn from(error: RequestCallError) -> Self {
        match error {
            RequestCallError::NotRecruiter => Self {
                status: StatusCode::FORBIDDEN,
                message: "Only a recruiter may request a video call".to_string(),
            },
            RequestCallError::IdAllocation(detail) => {
                tracing::error!("Request id allocation failed: {}", detail);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal server error".to_string(),
                }
            }
            RequestCallError::Store(store) => store.into(),
        }
    }
}

fn parse_request_id(value: Option<String>) -> Result<RequestId, ApiError> {
    let raw = value.ok_or_else(|| ApiError::bad_request("requestId is required"))?;
    RequestId::new(raw).map_err(|e| ApiError::bad_request(e.to_string()))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// POST /request: recruiter requests a video call
pub async fn request_video_call(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<RequestCallBody>,
) -> Result<(StatusCode, Json<MessageDataBody<CallRequestDto>>), ApiError> {
    let college_id = body
        .college_id
        .ok_or_else(|| ApiError::bad_request("collegeId is required"))?;
    let college_id =
        UserId::new(college_id).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let conversation_id = body
        .conversation_id
        .ok_or_else(|| ApiError::bad_request("conversationId is required"))?;
    let conversation_id =
        ConversationId::new(conversation_id).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let student_ids = body
        .student_ids
        .into_iter()
        .map(UserId::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let message = body
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_REQUEST_MESSAGE.to_string());

    let usecase = RequestCallUseCase::new(state.repository.clone());
    let request = usecase
        .execute(caller, college_id, student_ids, message, conversation_id)
        .await?;

    tracing::info!("Video call request '{}' created", request.id);
    Ok((
        StatusCode::CREATED,
        Json(MessageDataBody {
            message: "Video call request sent successfully".to_string(),
            data: CallRequestDto::from(&request),
        }),
    ))
}

/// GET /college-requests: all requests targeting the caller's college
pub async fn get_college_requests(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<DataBody<Vec<CallRequestDto>>>, ApiError> {
    let usecase = ListRequestsUseCase::new(state.repository.clone());
    let requests = usecase.college_requests(&caller).await?;
    Ok(Json(DataBody {
        data: requests.iter().map(CallRequestDto::from).collect(),
    }))
}

/// GET /recruiter-requests: all requests initiated by the caller
pub async fn get_recruiter_requests(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<DataBody<Vec<CallRequestDto>>>, ApiError> {
    let usecase = ListRequestsUseCase::new(state.repository.clone());
    let requests = usecase.recruiter_requests(&caller).await?;
    Ok(Json(DataBody {
        data: requests.iter().map(CallRequestDto::from).collect(),
    }))
}

/// POST /accept: target college accepts a request
pub async fn accept_video_call_request(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<RequestIdBody>,
) -> Result<Json<MessageDataBody<CallRequestDto>>, ApiError> {
    let request_id = parse_request_id(body.request_id)?;

    let usecase = AcceptRequestUseCase::new(state.repository.clone(), state.locks.clone());
    let request = usecase.execute(caller, request_id).await?;

    Ok(Json(MessageDataBody {
        message: "Video call request accepted".to_string(),
        data: CallRequestDto::from(&request),
    }))
}

/// POST /schedule: target college schedules an accepted request
pub async fn schedule_video_call(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<ScheduleBody>,
) -> Result<Json<MessageDataBody<CallRequestDto>>, ApiError> {
    let request_id = parse_request_id(body.request_id)?;
    let raw_time = body
        .scheduled_time
        .ok_or_else(|| ApiError::bad_request("scheduledTime is required"))?;
    let scheduled_time = parse_rfc3339(&raw_time)
        .map(Timestamp::new)
        .ok_or_else(|| ApiError::bad_request("scheduledTime must be an RFC 3339 timestamp"))?;

    let usecase = ScheduleCallUseCase::new(state.repository.clone(), state.locks.clone());
    let request = usecase.execute(caller, request_id, scheduled_time).await?;

    tracing::info!("Video call request '{}' scheduled", request.id);
    Ok(Json(MessageDataBody {
        message: "Video call scheduled successfully".to_string(),
        data: CallRequestDto::from(&request),
    }))
}

/// POST /join: eligible participant joins within the time window
pub async fn join_video_call(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<RequestIdBody>,
) -> Result<Json<JoinResponseBody>, ApiError> {
    let request_id = parse_request_id(body.request_id)?;

    let usecase = JoinCallUseCase::new(state.repository.clone(), state.locks.clone());
    let (room_id, request) = usecase.execute(caller, request_id).await?;

    tracing::info!(
        "Participant joined video call '{}' (room '{}')",
        request.id,
        room_id
    );
    Ok(Json(JoinResponseBody {
        message: "Joined video call successfully".to_string(),
        room_id: room_id.into_string(),
        data: CallRequestDto::from(&request),
    }))
}

/// POST /complete: administrative transition to the terminal status
pub async fn complete_video_call(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<RequestIdBody>,
) -> Result<Json<MessageDataBody<CallRequestDto>>, ApiError> {
    let request_id = parse_request_id(body.request_id)?;

    let usecase = CompleteCallUseCase::new(state.repository.clone(), state.locks.clone());
    let request = usecase.execute(caller, request_id).await?;

    Ok(Json(MessageDataBody {
        message: "Video call completed".to_string(),
        data: CallRequestDto::from(&request),
    }))
}

/// GET /scheduled-calls: upcoming/recent scheduled and active calls
pub async fn get_scheduled_calls(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<DataBody<Vec<CallRequestDto>>>, ApiError> {
    let usecase = ListRequestsUseCase::new(state.repository.clone());
    let requests = usecase.scheduled_calls(&caller).await?;
    Ok(Json(DataBody {
        data: requests.iter().map(CallRequestDto::from).collect(),
    }))
}

/// GET /students/{college_name}: directory listing for invitee selection
pub async fn get_students_by_college(
    State(state): State<Arc<AppState>>,
    Path(college_name): Path<String>,
) -> Result<Json<MessageDataBody<Vec<StudentDto>>>, ApiError> {
    let usecase = ListStudentsUseCase::new(state.directory.clone());
    let students = usecase.execute(&college_name).await?;

    Ok(Json(MessageDataBody {
        message: "Students fetched successfully".to_string(),
        data: students.iter().map(StudentDto::from).collect(),
    }))
}
