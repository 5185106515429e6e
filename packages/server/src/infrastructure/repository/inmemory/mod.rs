//! InMemory 実装
//!
//! HashMap をインメモリ DB として使用する実装群。

pub mod call_request;
pub mod directory;
pub mod identity;

pub use call_request::InMemoryCallRequestRepository;
pub use directory::InMemoryStudentDirectory;
pub use identity::InMemoryIdentityProvider;
