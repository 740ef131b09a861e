use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::domain::{PreferenceProfile, ProfileUpdate};

/// Errors raised when mutating or persisting the profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile is completed; reset it before making changes")]
    Locked,
    #[error("failed to access profile store: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile store is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Explicit owner of the user's profile state.
///
/// Mutations happen only through this context. Persistence is an explicit
/// boundary: [`ProfileContext::load`] at start-up and [`ProfileContext::save`]
/// when the caller decides to flush.
#[derive(Debug, Clone, Default)]
pub struct ProfileContext {
    profile: PreferenceProfile,
    path: Option<PathBuf>,
}

impl ProfileContext {
    /// In-memory context that is never written to disk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the profile stored at `path`; a missing file yields a fresh profile.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let path = path.as_ref().to_path_buf();
        let profile = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored profile; starting fresh");
                PreferenceProfile::default()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            profile,
            path: Some(path),
        })
    }

    /// Write the profile back to its backing file, if it has one.
    pub fn save(&self) -> Result<(), ProfileError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec_pretty(&self.profile)?)?;
        fs::rename(&staging, path)?;

        info!(path = %path.display(), completed = self.profile.completed, "profile saved");
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn profile(&self) -> &PreferenceProfile {
        &self.profile
    }

    pub fn is_completed(&self) -> bool {
        self.profile.completed
    }

    /// Merge a partial update. Completed profiles are frozen until [`reset`](Self::reset).
    pub fn update(&mut self, update: ProfileUpdate) -> Result<&PreferenceProfile, ProfileError> {
        if self.profile.completed {
            return Err(ProfileError::Locked);
        }

        update.apply_to(&mut self.profile);
        Ok(&self.profile)
    }

    /// Mark the profile completed. Repeated calls keep the first timestamp.
    pub fn complete(&mut self, now: DateTime<Utc>) -> &PreferenceProfile {
        if !self.profile.completed {
            self.profile.completed = true;
            self.profile.completed_at = Some(now);
        }
        &self.profile
    }

    /// Discard every answer and unlock the profile.
    pub fn reset(&mut self) {
        self.profile = PreferenceProfile::default();
    }
}
