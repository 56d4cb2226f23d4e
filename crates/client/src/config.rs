//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

/// Configuration required to run a skirmish.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub user_id: String,
    /// Directory holding the RON/TOML content files. `None` uses the bundled data.
    pub content_dir: Option<PathBuf>,
    pub save_data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub save_retry_delay: Duration,
    pub max_turns: u32,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let dirs = project_dirs();
        Self {
            user_id: "local-player".to_string(),
            content_dir: None,
            save_data_dir: dirs
                .as_ref()
                .map(|d| d.data_dir().join("characters"))
                .unwrap_or_else(|| PathBuf::from("save/characters")),
            log_dir: dirs
                .as_ref()
                .map(|d| d.cache_dir().join("logs"))
                .unwrap_or_else(|| env::temp_dir().join("skirmish").join("logs")),
            save_retry_delay: Duration::from_millis(500),
            max_turns: 20,
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAME_USER_ID` - Owner of the saved characters (default: local-player)
    /// - `CONTENT_DIR` - Content data directory (default: bundled data)
    /// - `SAVE_DATA_DIR` - Directory for character saves (default: platform-specific)
    /// - `SAVE_RETRY_DELAY_MS` - Delay before retrying a failed save (default: 500)
    /// - `MAX_TURNS` - Turn limit for the scripted encounter (default: 20)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(user) = env::var("GAME_USER_ID")
            && !user.trim().is_empty()
        {
            config.user_id = user;
        }

        config.content_dir = env::var("CONTENT_DIR").ok().map(PathBuf::from);

        if let Ok(dir) = env::var("SAVE_DATA_DIR") {
            config.save_data_dir = PathBuf::from(dir);
        }

        if let Some(delay) = read_env::<u64>("SAVE_RETRY_DELAY_MS") {
            config.save_retry_delay = Duration::from_millis(delay);
        }

        if let Some(turns) = read_env::<u32>("MAX_TURNS") {
            config.max_turns = turns.max(1);
        }

        config.session_id = env::var("GAME_SESSION_ID").ok();

        config
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "skirmish")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
