use super::IIdentityStore;
use dospot_domain::ID;
use std::sync::Mutex;

pub struct InMemoryIdentityStore {
    user_id: Mutex<Option<ID>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            user_id: Mutex::new(None),
        }
    }
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IIdentityStore for InMemoryIdentityStore {
    fn save(&self, user_id: &ID) -> anyhow::Result<()> {
        *self.user_id.lock().unwrap() = Some(user_id.clone());
        Ok(())
    }

    fn get(&self) -> anyhow::Result<Option<ID>> {
        Ok(self.user_id.lock().unwrap().clone())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.user_id.lock().unwrap() = None;
        Ok(())
    }
}
