use std::path::{Path, PathBuf};

use crate::{error::StoreError, types::Credential};

/// Durable storage of the OAuth credential.
///
/// Pure data access: the store neither validates nor interprets the
/// credential it reads or writes.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored credential.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if nothing was ever saved at this path
    /// - [`StoreError::Corrupt`] if the file is not a valid credential
    /// - [`StoreError::Io`] for any other read failure
    pub async fn load(&self) -> Result<Credential, StoreError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(serde_json::from_str(&content)?)
    }

    /// Replaces the stored credential.
    ///
    /// The JSON is written to a sibling temporary file which is then renamed
    /// over the target, so readers see either the old or the new credential.
    pub async fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(credential)?;
        let tmp = self.tmp_path();
        async_fs::write(&tmp, json).await?;
        restrict_permissions(&tmp).await?;

        if let Err(e) = async_fs::rename(&tmp, &self.path).await {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(StoreError::Io(e));
        }

        tracing::debug!(path = %self.path.display(), "credential saved");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "token.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    async_fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
