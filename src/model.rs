use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub shuffle_enabled: bool,
    #[serde(default)]
    pub last_playlist: Option<PathBuf>,
}
