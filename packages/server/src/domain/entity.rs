//! Core domain models for the call coordination service.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    error::TransitionError,
    value_object::{ConversationId, RequestId, RoomId, Timestamp, UserId},
};

/// Tolerance window around the scheduled time during which join is permitted
/// (10 minutes, applied in both directions).
pub const JOIN_WINDOW_MILLIS: i64 = 10 * 60 * 1000;

/// Default human-readable message attached to a call request
pub const DEFAULT_REQUEST_MESSAGE: &str = "Video call request";

/// Participant class resolved by the identity collaborator.
///
/// Closed enumeration; the wire representation is the lowercase tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Recruiter,
    College,
    Student,
}

impl Role {
    /// Get the lowercase tag used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Recruiter => "recruiter",
            Role::College => "college",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a call request.
///
/// Variant order is the legal transition order; `Ord` follows it, so
/// "no regression" is `new >= old`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Pending,
    Accepted,
    Scheduled,
    Active,
    Completed,
}

impl CallStatus {
    /// Get the lowercase tag used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Pending => "pending",
            CallStatus::Accepted => "accepted",
            CallStatus::Scheduled => "scheduled",
            CallStatus::Active => "active",
            CallStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated caller identity, as resolved by the identity collaborator.
///
/// College members carry the owning college's id in `college_id`; for a main
/// college account that is the account's own id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: Role,
    pub college_id: Option<UserId>,
}

impl AuthUser {
    /// Create a recruiter identity.
    pub fn recruiter(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::Recruiter,
            college_id: None,
        }
    }

    /// Create a college identity (main account or member).
    pub fn college(user_id: UserId, college_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::College,
            college_id: Some(college_id),
        }
    }

    /// Create a student identity.
    pub fn student(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::Student,
            college_id: None,
        }
    }

    /// The college this caller acts for, if the caller is a college actor.
    pub fn college_scope(&self) -> Option<&UserId> {
        match self.role {
            Role::College => self.college_id.as_ref().or(Some(&self.user_id)),
            _ => None,
        }
    }
}

/// One entry in the append-only participant log.
///
/// Records an actual join event, distinct from the invitee set (who was
/// merely invited). `left_at` stays empty until a collaborator flow records
/// the departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantEntry {
    pub user_id: UserId,
    pub role: Role,
    pub joined_at: Timestamp,
    pub left_at: Option<Timestamp>,
}

impl ParticipantEntry {
    /// Whether this entry still counts as "currently joined".
    pub fn is_currently_joined(&self) -> bool {
        self.left_at.is_none()
    }
}

/// Persistent record of one requested/scheduled/active video interaction
/// between a recruiter, a college, and zero or more invited students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    /// Request identifier
    pub id: RequestId,
    /// Initiating recruiter (fixed at creation)
    pub recruiter_id: UserId,
    /// Target college (fixed at creation)
    pub college_id: UserId,
    /// Invited students, in invitation order (fixed at creation)
    pub student_ids: Vec<UserId>,
    /// Human-readable request message
    pub message: String,
    /// Conversation the request was negotiated in (audit linkage only)
    pub conversation_id: ConversationId,
    /// Lifecycle status, strictly forward-moving
    pub status: CallStatus,
    /// Scheduled call time; set before status may become Scheduled
    pub scheduled_time: Option<Timestamp>,
    /// Signaling room token; assigned on first successful join, then immutable
    pub room_id: Option<RoomId>,
    /// Append-only log of actual join events
    pub participants: Vec<ParticipantEntry>,
    /// Timestamp when the request was created
    pub created_at: Timestamp,
}

impl CallRequest {
    /// Create a new pending call request.
    pub fn new(
        id: RequestId,
        recruiter_id: UserId,
        college_id: UserId,
        student_ids: Vec<UserId>,
        message: String,
        conversation_id: ConversationId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            recruiter_id,
            college_id,
            student_ids,
            message,
            conversation_id,
            status: CallStatus::Pending,
            scheduled_time: None,
            room_id: None,
            participants: Vec::new(),
            created_at,
        }
    }

    /// Whether the caller is the initiating recruiter.
    pub fn is_initiator(&self, caller: &AuthUser) -> bool {
        caller.role == Role::Recruiter && caller.user_id == self.recruiter_id
    }

    /// Whether the caller acts for the target college.
    pub fn is_target_college(&self, caller: &AuthUser) -> bool {
        caller.college_scope() == Some(&self.college_id)
    }

    /// Whether the caller is a named invitee student.
    pub fn is_invitee(&self, caller: &AuthUser) -> bool {
        caller.role == Role::Student && self.student_ids.contains(&caller.user_id)
    }

    /// Whether the caller is eligible to join the resulting call.
    pub fn may_join(&self, caller: &AuthUser) -> bool {
        self.is_initiator(caller) || self.is_target_college(caller) || self.is_invitee(caller)
    }

    /// Whether the caller may drive administrative transitions (complete).
    pub fn may_administer(&self, caller: &AuthUser) -> bool {
        self.is_initiator(caller) || self.is_target_college(caller)
    }

    /// Whether the given identity has a currently-joined participant entry.
    pub fn has_joined_participant(&self, user_id: &UserId) -> bool {
        self.participants
            .iter()
            .any(|p| &p.user_id == user_id && p.is_currently_joined())
    }

    /// Accept the request (Pending → Accepted).
    ///
    /// Accepting an already-accepted request is an idempotent no-op.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - status advanced to Accepted
    /// * `Ok(false)` - already accepted, nothing changed
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::CannotAccept` for any later status; the
    /// enumeration never moves backwards.
    pub fn accept(&mut self) -> Result<bool, TransitionError> {
        match self.status {
            CallStatus::Pending => {
                self.status = CallStatus::Accepted;
                Ok(true)
            }
            CallStatus::Accepted => Ok(false),
            status => Err(TransitionError::CannotAccept { status }),
        }
    }

    /// Schedule the call (Accepted → Scheduled) for a future time.
    ///
    /// # Errors
    ///
    /// * `TransitionError::CannotSchedule` - status is not Accepted
    /// * `TransitionError::ScheduledTimeNotFuture` - `time` is not after `now`
    pub fn schedule(&mut self, time: Timestamp, now: Timestamp) -> Result<(), TransitionError> {
        if self.status != CallStatus::Accepted {
            return Err(TransitionError::CannotSchedule {
                status: self.status,
            });
        }
        if time <= now {
            return Err(TransitionError::ScheduledTimeNotFuture);
        }
        self.scheduled_time = Some(time);
        self.status = CallStatus::Scheduled;
        Ok(())
    }

    /// Join the call (Scheduled/Active → Active).
    ///
    /// Permitted only within `JOIN_WINDOW_MILLIS` of the scheduled time.
    /// `candidate_room` is used only if no room has been assigned yet; the
    /// effective room id is returned either way. A participant-log entry is
    /// appended unless the identity is already currently joined.
    ///
    /// Eligibility of the joining identity is the caller's concern
    /// (`may_join`); this method enforces the temporal rules only.
    ///
    /// # Errors
    ///
    /// * `TransitionError::NotJoinable` - status outside {Scheduled, Active}
    /// * `TransitionError::OutsideJoinWindow` - now is outside the window
    pub fn join(
        &mut self,
        user_id: UserId,
        role: Role,
        now: Timestamp,
        candidate_room: RoomId,
    ) -> Result<RoomId, TransitionError> {
        if !matches!(self.status, CallStatus::Scheduled | CallStatus::Active) {
            return Err(TransitionError::NotJoinable {
                status: self.status,
            });
        }
        let Some(scheduled) = self.scheduled_time else {
            // Scheduled/Active without a time cannot be constructed through
            // the transition methods; treat defensively as not joinable.
            return Err(TransitionError::NotJoinable {
                status: self.status,
            });
        };
        if now.abs_delta_millis(scheduled) > JOIN_WINDOW_MILLIS {
            return Err(TransitionError::OutsideJoinWindow);
        }

        let room_id = match &self.room_id {
            Some(existing) => existing.clone(),
            None => {
                self.room_id = Some(candidate_room.clone());
                candidate_room
            }
        };

        if !self.has_joined_participant(&user_id) {
            self.participants.push(ParticipantEntry {
                user_id,
                role,
                joined_at: now,
                left_at: None,
            });
        }

        self.status = CallStatus::Active;
        Ok(room_id)
    }

    /// Complete the call (Active → Completed).
    ///
    /// Out-of-band administrative transition; never inferred from the room
    /// becoming empty. Completed is terminal and permanently blocks rejoin.
    pub fn complete(&mut self) -> Result<(), TransitionError> {
        if self.status != CallStatus::Active {
            return Err(TransitionError::CannotComplete {
                status: self.status,
            });
        }
        self.status = CallStatus::Completed;
        Ok(())
    }
}

/// Student directory entry, as served by the directory collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub course: String,
    pub college: String,
}
