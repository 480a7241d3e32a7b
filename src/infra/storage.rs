//! Durable storage backends for the locale preference.
//!
//! Documents use the envelope written by the blog's browser-side store,
//! `{"state":{"lang":"zh"},"version":0}`. The bare `{"lang":"zh"}` shape is
//! accepted on read.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::application::lock::mutex_lock;
use crate::application::repos::{PreferenceStorage, StorageError, StoredPreference};
use crate::domain::locale::Locale;

/// Namespace the preference lives under unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "lang-storage";

const PERSIST_VERSION: u32 = 0;
const SOURCE: &str = "infra::storage";

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    lang: String,
}

#[derive(Debug, Serialize)]
struct PersistedEnvelope<'a> {
    state: PersistedStateRef<'a>,
    version: u32,
}

#[derive(Debug, Serialize)]
struct PersistedStateRef<'a> {
    lang: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PersistedDocument {
    Envelope {
        state: PersistedState,
        #[serde(default)]
        version: u32,
    },
    Bare(PersistedState),
}

pub fn encode_preference(locale: Locale) -> Result<String, StorageError> {
    let envelope = PersistedEnvelope {
        state: PersistedStateRef {
            lang: locale.as_str(),
        },
        version: PERSIST_VERSION,
    };
    serde_json::to_string(&envelope).map_err(StorageError::malformed)
}

pub fn decode_preference(raw: &str) -> Result<StoredPreference, StorageError> {
    let document: PersistedDocument = serde_json::from_str(raw).map_err(StorageError::malformed)?;
    let state = match document {
        PersistedDocument::Envelope { state, version } => {
            if version != PERSIST_VERSION {
                debug!(
                    version,
                    "Reading locale preference written by another store version"
                );
            }
            state
        }
        PersistedDocument::Bare(state) => state,
    };
    Ok(StoredPreference { lang: state.lang })
}

/// One JSON document per namespace inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: PathBuf,
    namespace: String,
    path: PathBuf,
}

impl FileStorage {
    pub fn new(directory: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        let directory = directory.into();
        let namespace = namespace.into();
        let path = directory.join(format!("{namespace}.json"));
        Self {
            directory,
            namespace,
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStorage for FileStorage {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn load(&self) -> Result<Option<StoredPreference>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode_preference(&raw).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::unavailable(format!(
                "failed to read `{}`: {err}",
                self.path.display()
            ))),
        }
    }

    // Write to a sibling temp file, fsync, then rename over the target so a
    // reader never sees a partial document.
    fn save(&self, locale: Locale) -> Result<(), StorageError> {
        let document = encode_preference(locale)?;
        let unavailable = |err: std::io::Error| {
            StorageError::unavailable(format!(
                "failed to write `{}`: {err}",
                self.path.display()
            ))
        };

        fs::create_dir_all(&self.directory).map_err(unavailable)?;
        let mut file = NamedTempFile::new_in(&self.directory).map_err(unavailable)?;
        file.write_all(document.as_bytes()).map_err(unavailable)?;
        file.as_file().sync_all().map_err(unavailable)?;
        file.persist(&self.path)
            .map_err(|err| unavailable(err.error))?;
        sync_directory(&self.directory).map_err(unavailable)?;

        debug!(path = %self.path.display(), locale = %locale, "Persisted locale preference");
        Ok(())
    }
}

#[cfg(unix)]
fn sync_directory(directory: &Path) -> std::io::Result<()> {
    fs::File::open(directory)?.sync_all()
}

#[cfg(not(unix))]
fn sync_directory(_directory: &Path) -> std::io::Result<()> {
    Ok(())
}

/// In-process storage; writes can be made to fail on demand.
#[derive(Debug)]
pub struct MemoryStorage {
    namespace: String,
    document: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            document: Mutex::new(None),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Start from an already persisted document.
    pub fn with_raw(document: impl Into<String>) -> Self {
        let storage = Self::new();
        *mutex_lock(&storage.document, SOURCE, "with_raw") = Some(document.into());
        storage
    }

    pub fn raw(&self) -> Option<String> {
        mutex_lock(&self.document, SOURCE, "raw").clone()
    }

    /// Drop the stored document, as a user clearing site data would.
    pub fn clear(&self) {
        mutex_lock(&self.document, SOURCE, "clear").take();
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn load(&self) -> Result<Option<StoredPreference>, StorageError> {
        self.raw().as_deref().map(decode_preference).transpose()
    }

    fn save(&self, locale: Locale) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable("storage quota exceeded"));
        }
        let document = encode_preference(locale)?;
        *mutex_lock(&self.document, SOURCE, "save") = Some(document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_the_browser_store_envelope() {
        assert_eq!(
            encode_preference(Locale::Zh).unwrap(),
            r#"{"state":{"lang":"zh"},"version":0}"#
        );
    }

    #[test]
    fn decodes_envelope_and_bare_shapes() {
        let envelope = decode_preference(r#"{"state":{"lang":"zh"},"version":0}"#).unwrap();
        assert_eq!(envelope.lang, "zh");

        let bare = decode_preference(r#"{"lang":"en"}"#).unwrap();
        assert_eq!(bare.lang, "en");

        let versionless = decode_preference(r#"{"state":{"lang":"zh"}}"#).unwrap();
        assert_eq!(versionless.lang, "zh");
    }

    #[test]
    fn decoding_keeps_unsupported_codes_for_the_caller() {
        let stored = decode_preference(r#"{"state":{"lang":"fr"},"version":0}"#).unwrap();
        assert_eq!(stored.lang, "fr");
    }

    #[test]
    fn rejects_malformed_documents() {
        for raw in ["", "null", "{}", r#"{"state":{}}"#, r#"{"lang":3}"#] {
            assert!(
                matches!(decode_preference(raw), Err(StorageError::Malformed(_))),
                "`{raw}` should be malformed"
            );
        }
    }

    #[test]
    fn file_storage_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("state"), DEFAULT_NAMESPACE);

        assert_eq!(storage.load().unwrap(), None);
        storage.save(Locale::Zh).unwrap();

        assert_eq!(
            storage.path(),
            dir.path().join("state").join("lang-storage.json")
        );
        assert_eq!(
            fs::read_to_string(storage.path()).unwrap(),
            r#"{"state":{"lang":"zh"},"version":0}"#
        );
        assert_eq!(
            storage.load().unwrap(),
            Some(StoredPreference {
                lang: "zh".to_string()
            })
        );

        storage.save(Locale::En).unwrap();
        assert_eq!(storage.load().unwrap().unwrap().lang, "en");
    }

    #[test]
    fn file_storage_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path(), "lang-storage");
        storage.save(Locale::Zh).unwrap();
        storage.save(Locale::En).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("lang-storage.json")]);
    }

    #[test]
    fn memory_storage_can_fail_writes() {
        let storage = MemoryStorage::new();
        storage.fail_writes(true);
        assert!(matches!(
            storage.save(Locale::Zh),
            Err(StorageError::Unavailable(_))
        ));
        assert_eq!(storage.raw(), None);

        storage.fail_writes(false);
        storage.save(Locale::Zh).unwrap();
        assert!(storage.raw().is_some());
    }
}
