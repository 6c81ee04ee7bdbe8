use super::IIdentityStore;
use anyhow::Context;
use dospot_domain::ID;
use serde::{Deserialize, Serialize};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Keeps the logged in user in a small json file.
///
/// Writes go to a sibling temp file first and are then renamed over the
/// target, so a crash never leaves a half written file behind.
pub struct FileIdentityStore {
    path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityFile {
    user_id: ID,
}

impl FileIdentityStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl IIdentityStore for FileIdentityStore {
    fn save(&self, user_id: &ID) -> anyhow::Result<()> {
        let content = serde_json::to_vec(&IdentityFile {
            user_id: user_id.clone(),
        })?;
        let tmp = self.tmp_path();
        std::fs::write(&tmp, content)
            .with_context(|| format!("Unable to write identity file {:?}", tmp))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Unable to replace identity file {:?}", self.path))?;
        Ok(())
    }

    fn get(&self) -> anyhow::Result<Option<ID>> {
        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: IdentityFile = serde_json::from_slice(&content)
            .with_context(|| format!("Malformed identity file {:?}", self.path))?;
        Ok(Some(file.user_id))
    }

    fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
