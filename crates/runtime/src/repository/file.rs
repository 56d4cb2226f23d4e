//! File-based CharacterGateway implementation.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use game_core::{CharacterId, CharacterRecord, UserId};

use super::{CharacterGateway, RepositoryError, Result};

/// Distinguishes temp files of writes that overlap.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// On-disk envelope around a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCharacter {
    owner: UserId,
    created_at: DateTime<Utc>,
    saved_at: DateTime<Utc>,
    record: CharacterRecord,
}

/// File-based implementation of [`CharacterGateway`].
///
/// # File Format
///
/// Each character is stored as `{character_id}.json`, pretty-printed, with the
/// record under `record` in its camelCase wire form next to the owner and
/// timestamps. Writes go to a unique temp file first and are renamed into
/// place. Files that fail to parse are skipped when listing a roster.
pub struct FileGateway {
    base_dir: PathBuf,
}

impl FileGateway {
    /// Opens (and creates if needed) a gateway rooted at `base_dir`.
    pub async fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a character file.
    fn character_path(&self, id: &CharacterId) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidId(id.clone()));
        }
        Ok(self.base_dir.join(format!("{}.json", id)))
    }

    fn temp_path(&self, id: &CharacterId) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.base_dir
            .join(format!("{}.{}.{}.tmp", id, std::process::id(), seq))
    }

    async fn read_stored(path: &Path) -> Result<Option<StoredCharacter>> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RepositoryError::Io(e)),
        }
    }
}

#[async_trait]
impl CharacterGateway for FileGateway {
    async fn fetch_roster(&self, owner: &UserId) -> Result<Vec<CharacterRecord>> {
        let mut owned = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read_stored(&path).await {
                Ok(Some(stored)) if &stored.owner == owner => owned.push(stored),
                Ok(_) => {}
                Err(RepositoryError::Json(e)) => {
                    tracing::warn!(
                        "Skipping unreadable character file {}: {}",
                        path.display(),
                        e
                    );
                }
                Err(e) => return Err(e),
            }
        }

        owned.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.record.id.cmp(&b.record.id))
        });

        tracing::debug!(
            "Loaded {} characters for {} from {}",
            owned.len(),
            owner,
            self.base_dir.display()
        );

        Ok(owned.into_iter().map(|stored| stored.record).collect())
    }

    async fn fetch_character(&self, id: &CharacterId) -> Result<Option<CharacterRecord>> {
        let path = self.character_path(id)?;
        Ok(Self::read_stored(&path).await?.map(|stored| stored.record))
    }

    async fn save_character(&self, owner: &UserId, record: &CharacterRecord) -> Result<()> {
        let path = self.character_path(&record.id)?;
        let temp_path = self.temp_path(&record.id);
        let now = Utc::now();

        let created_at = match Self::read_stored(&path).await? {
            Some(existing) if &existing.owner != owner => {
                return Err(RepositoryError::Forbidden {
                    character_id: record.id.clone(),
                    owner: owner.clone(),
                });
            }
            Some(existing) => existing.created_at,
            None => now,
        };

        let stored = StoredCharacter {
            owner: owner.clone(),
            created_at,
            saved_at: now,
            record: record.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&stored)?;

        // Write to temp file
        fs::write(&temp_path, bytes).await?;

        // Atomic rename
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!("Saved character {} to {}", record.id, path.display());

        Ok(())
    }
}
