//! Domain factories for creating domain entities and value objects.

use super::{
    error::ValueObjectError,
    value_object::{RequestId, RoomId},
};

/// Factory for generating RequestId instances.
pub struct RequestIdFactory;

impl RequestIdFactory {
    /// Generate a new RequestId with a random UUID v4.
    pub fn generate() -> Result<RequestId, ValueObjectError> {
        let uuid = uuid::Uuid::new_v4();
        RequestId::from_uuid(uuid)
    }
}

/// Factory for generating RoomId instances.
///
/// This factory encapsulates the logic for generating new room tokens,
/// separating the generation concern from the validation logic in RoomId.
/// Room ids are allocated at most once per call request, on the first
/// successful join.
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a new RoomId with a random UUID v4.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for
    /// consistency with the domain error handling pattern.
    pub fn generate() -> Result<RoomId, ValueObjectError> {
        let uuid = uuid::Uuid::new_v4();
        RoomId::from_uuid(uuid)
    }
}
