use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::draft::state::DraftState;
use crate::error::DraftError;

/// Snapshot of a draft in progress, autosaved after every action so a crash
/// or accidental exit mid-draft costs nothing.
#[derive(Debug, Serialize, Deserialize)]
pub struct DraftSession {
    pub saved_at: DateTime<Utc>,
    pub bundle_path: String,
    pub state: DraftState,
}

impl DraftSession {
    pub fn new(bundle_path: &str, state: DraftState) -> Self {
        DraftSession {
            saved_at: Utc::now(),
            bundle_path: bundle_path.to_string(),
            state,
        }
    }

    pub fn session_path() -> PathBuf {
        let dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".draft_coach");

        let _ = fs::create_dir_all(&dir);

        dir.join("session.json")
    }

    pub fn load() -> Result<Option<Self>, DraftError> {
        let path = Self::session_path();

        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| DraftError::SessionError(format!("Failed to parse session: {}", e))),
            Err(_) => Ok(None),
        }
    }

    pub fn save(&self) -> Result<(), DraftError> {
        let path = Self::session_path();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DraftError::SessionError(format!("Failed to serialize session: {}", e)))?;

        fs::write(&path, json)
            .map_err(|e| DraftError::SessionError(format!("Failed to write session: {}", e)))?;

        Ok(())
    }

    pub fn clear() {
        let _ = fs::remove_file(Self::session_path());
    }

    pub fn age_minutes(&self) -> i64 {
        Utc::now().signed_duration_since(self.saved_at).num_minutes()
    }
}
