mod login;
mod logout;
mod restore_session;

pub use login::LoginUseCase;
pub use logout::LogoutUseCase;
pub use restore_session::RestoreSessionUseCase;

use dospot_domain::ID;

/// The logged in `User`. Created at login, consumed at logout and passed to
/// every operation that is scoped to one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: ID,
}

impl Session {
    pub(crate) fn new(user_id: ID) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> &ID {
        &self.user_id
    }
}
