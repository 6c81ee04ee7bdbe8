mod error;
mod reminder;
mod session;
mod shared;

pub use error::DoSpotError;
pub use reminder::*;
pub use session::{LoginUseCase, LogoutUseCase, RestoreSessionUseCase, Session};
pub use shared::usecase::{execute, UseCase};
