use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use catalog_core::{FavoriteSet, ItemId};
use engine_logging::{engine_info, engine_warn};

use crate::persist::{AtomicFileWriter, PersistError};

/// Namespace key of the persisted favorites list.
pub const FAVORITES_KEY: &str = "pokemon-favorites";

/// Synchronous read access to the current favorites.
pub trait FavoriteSource: Send + Sync {
    fn favorite_ids(&self) -> Vec<ItemId>;
}

/// Favorites persisted as a JSON list of ids in `{dir}/pokemon-favorites.json`.
///
/// Every read goes to disk, so the file stays authoritative across processes.
pub struct FavoritesStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FavoritesStore {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{FAVORITES_KEY}.json"))
    }

    /// Missing or unreadable data yields an empty set.
    pub fn load(&self) -> FavoriteSet {
        let path = self.path();
        let content = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return FavoriteSet::new();
            }
            Err(err) => {
                engine_warn!("Failed to read favorites from {:?}: {}", path, err);
                return FavoriteSet::new();
            }
        };
        match serde_json::from_slice::<Vec<ItemId>>(&content) {
            Ok(ids) => FavoriteSet::from_ids(ids),
            Err(err) => {
                engine_warn!("Failed to parse favorites from {:?}: {}", path, err);
                FavoriteSet::new()
            }
        }
    }

    pub fn is_favorite(&self, id: ItemId) -> bool {
        self.load().contains(id)
    }

    pub fn add(&self, id: ItemId) -> Result<(), PersistError> {
        self.modify(|set| {
            set.insert(id);
        })
        .map(|_| ())
    }

    pub fn remove(&self, id: ItemId) -> Result<(), PersistError> {
        self.modify(|set| {
            set.remove(id);
        })
        .map(|_| ())
    }

    /// Flip membership and return the persisted state.
    pub fn toggle(&self, id: ItemId) -> Result<bool, PersistError> {
        let set = self.modify(|set| {
            set.toggle(id);
        })?;
        let now = set.contains(id);
        engine_info!("Favorite {} -> {}", id, now);
        Ok(now)
    }

    fn modify(&self, change: impl FnOnce(&mut FavoriteSet)) -> Result<FavoriteSet, PersistError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poison| poison.into_inner());
        let mut set = self.load();
        change(&mut set);
        let content = serde_json::to_vec(set.ids())?;
        let filename = format!("{FAVORITES_KEY}.json");
        AtomicFileWriter::new(self.dir.clone()).write(&filename, &content)?;
        Ok(set)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FavoriteSource for FavoritesStore {
    fn favorite_ids(&self) -> Vec<ItemId> {
        self.load().ids().to_vec()
    }
}
