//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod accept_request;
pub mod complete_call;
pub mod error;
pub mod join_call;
pub mod list_requests;
pub mod list_students;
pub mod locks;
pub mod request_call;
pub mod schedule_call;

pub use accept_request::AcceptRequestUseCase;
pub use complete_call::CompleteCallUseCase;
pub use error::{CallFlowError, RequestCallError};
pub use join_call::JoinCallUseCase;
pub use list_requests::{ListRequestsUseCase, SCHEDULED_VIEW_LOOKBACK_MILLIS};
pub use list_students::ListStudentsUseCase;
pub use locks::RequestLocks;
pub use request_call::RequestCallUseCase;
pub use schedule_call::ScheduleCallUseCase;
