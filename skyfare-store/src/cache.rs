use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use skyfare_shared::models::Profile;
use tracing::warn;

/// Disk cache of the signed-in profile, one JSON file. Read before any remote
/// profile lookup, overwritten on login/registration/update, removed on
/// logout and account deletion. Cache trouble is never an error: a corrupt or
/// unwritable file degrades to a remote lookup.
pub struct ProfileCache {
    path: PathBuf,
}

impl ProfileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Option<Profile> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    warn!("failed to read profile cache: {}", err);
                }
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!("ignoring corrupt profile cache: {}", err);
                None
            }
        }
    }

    pub fn store(&self, profile: &Profile) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!("failed to create profile cache directory: {}", err);
                    return;
                }
            }
        }

        match serde_json::to_string(profile) {
            Ok(raw) => {
                if let Err(err) = fs::write(&self.path, raw) {
                    warn!("failed to write profile cache: {}", err);
                }
            }
            Err(err) => warn!("failed to serialize profile cache: {}", err),
        }
    }

    pub fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != ErrorKind::NotFound {
                warn!("failed to clear profile cache: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_cache() -> ProfileCache {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "skyfare-cache-test-{}-{}.json",
            std::process::id(),
            n
        ));
        ProfileCache::new(path)
    }

    fn profile() -> Profile {
        Profile {
            id: "7".into(),
            uid: "u1".into(),
            email: "anna@example.com".into(),
            name: "Anna".into(),
            lastname: "Berg".into(),
            avatar: String::new(),
            telephone: "0612345678".into(),
        }
    }

    #[test]
    fn store_load_clear_round_trip() {
        let cache = temp_cache();
        assert!(cache.load().is_none());

        cache.store(&profile());
        assert_eq!(cache.load(), Some(profile()));

        cache.clear();
        assert!(cache.load().is_none());
        // Clearing twice is fine.
        cache.clear();
    }

    #[test]
    fn corrupt_content_is_treated_as_absent() {
        let cache = temp_cache();
        fs::write(&cache.path, "{not json").unwrap();
        assert!(cache.load().is_none());
        cache.clear();
    }
}
