//! Domain layer error definitions.

use thiserror::Error;

use super::entity::CallStatus;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// RequestId validation error
    #[error("RequestId cannot be empty")]
    RequestIdEmpty,

    /// RequestId too long error
    #[error("RequestId cannot exceed {max} characters (got {actual})")]
    RequestIdTooLong { max: usize, actual: usize },

    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// ConversationId validation error
    #[error("ConversationId cannot be empty")]
    ConversationIdEmpty,

    /// ConversationId too long error
    #[error("ConversationId cannot exceed {max} characters (got {actual})")]
    ConversationIdTooLong { max: usize, actual: usize },
}

/// Errors related to CallRequest state transitions.
///
/// The status enumeration is strictly forward-moving; every variant here
/// names a transition the state machine refuses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Accept is only legal from Pending (or as a no-op from Accepted)
    #[error("cannot accept a call request in status '{status}'")]
    CannotAccept { status: CallStatus },

    /// Schedule is only legal from Accepted
    #[error("cannot schedule a call request in status '{status}'")]
    CannotSchedule { status: CallStatus },

    /// Scheduled time must lie in the future
    #[error("scheduled time must be in the future")]
    ScheduledTimeNotFuture,

    /// Join is only legal from Scheduled or Active
    #[error("call request in status '{status}' is not joinable")]
    NotJoinable { status: CallStatus },

    /// Join attempted outside the tolerance window around the scheduled time
    #[error("current time is outside the join window of the scheduled time")]
    OutsideJoinWindow,

    /// Complete is only legal from Active
    #[error("cannot complete a call request in status '{status}'")]
    CannotComplete { status: CallStatus },
}
