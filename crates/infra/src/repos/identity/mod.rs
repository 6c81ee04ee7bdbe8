mod file;
mod inmemory;

pub use file::FileIdentityStore;
pub use inmemory::InMemoryIdentityStore;

use dospot_domain::ID;

/// Remembers which `User` is logged in on this installation.
///
/// A stored id means "logged in". There is only ever one.
pub trait IIdentityStore: Send + Sync {
    fn save(&self, user_id: &ID) -> anyhow::Result<()>;
    fn get(&self) -> anyhow::Result<Option<ID>>;
    fn clear(&self) -> anyhow::Result<()>;

    fn is_logged_in(&self) -> anyhow::Result<bool> {
        Ok(self.get()?.is_some())
    }
}
