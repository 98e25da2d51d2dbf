//! YAML record storage.
//!
//! Each collection is a directory under the site data directory. A record lives in its own
//! sharded directory:
//!
//! `<SITE_DATA_DIR>/<collection>/<s1>/<s2>/<32hex-id>/record.yaml`
//!
//! where `s1`/`s2` are the first four hex characters of the id. Records are always written
//! whole: the new YAML goes to a temporary sibling which is then renamed over the old file, so
//! a reader never observes a half-written record and a failed save leaves the previous
//! version in place.

use crate::config::CoreConfig;
use crate::constants::RECORD_FILENAME;
use crate::entities::OrganisationInfo;
use crate::{SiteError, SiteResult};
use becc_uuid::RecordId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A record type stored in its own collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Collection directory name, also used in dashboard URLs (`projects`).
    const COLLECTION: &'static str;

    /// Display name of one record (`Project`), used in flash messages.
    const SINGULAR: &'static str;

    fn id(&self) -> &RecordId;

    /// Ordering used when listing the collection.
    fn cmp_for_listing(&self, other: &Self) -> Ordering;
}

/// Storage for one collection.
#[derive(Debug)]
pub struct RecordStore<R> {
    collection_dir: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            collection_dir: self.collection_dir.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            collection_dir: cfg.collection_dir(R::COLLECTION),
            _record: PhantomData,
        }
    }

    pub fn collection_dir(&self) -> &Path {
        &self.collection_dir
    }

    fn record_path(&self, id: &RecordId) -> PathBuf {
        id.sharded_dir(&self.collection_dir).join(RECORD_FILENAME)
    }

    /// Lists all records of the collection, sorted by [`Record::cmp_for_listing`].
    ///
    /// Traverses `<collection>/<s1>/<s2>/<id>/record.yaml`. A record that cannot be read or
    /// parsed is logged as a warning and skipped. A missing collection directory is an empty
    /// collection.
    pub fn list(&self) -> SiteResult<Vec<R>> {
        let mut records = Vec::new();

        let s1_iter = match fs::read_dir(&self.collection_dir) {
            Ok(it) => it,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(SiteError::FileRead(e)),
        };

        for s1 in s1_iter.flatten() {
            let s1_path = s1.path();
            if !s1_path.is_dir() {
                continue;
            }

            let s2_iter = match fs::read_dir(&s1_path) {
                Ok(it) => it,
                Err(_) => continue,
            };

            for s2 in s2_iter.flatten() {
                let s2_path = s2.path();
                if !s2_path.is_dir() {
                    continue;
                }

                let id_iter = match fs::read_dir(&s2_path) {
                    Ok(it) => it,
                    Err(_) => continue,
                };

                for id_ent in id_iter.flatten() {
                    let record_path = id_ent.path().join(RECORD_FILENAME);
                    if !record_path.is_file() {
                        continue;
                    }

                    match read_yaml::<R>(&record_path) {
                        Ok(record) => records.push(record),
                        Err(e) => {
                            tracing::warn!(
                                collection = R::COLLECTION,
                                "skipping unreadable record {}: {}",
                                record_path.display(),
                                e
                            );
                        }
                    }
                }
            }
        }

        records.sort_by(|a, b| a.cmp_for_listing(b));
        Ok(records)
    }

    /// Returns the record, or `None` if it does not exist.
    pub fn find(&self, id: &RecordId) -> SiteResult<Option<R>> {
        let path = self.record_path(id);
        if !path.is_file() {
            return Ok(None);
        }
        read_yaml(&path).map(Some)
    }

    /// Returns the record, or [`SiteError::NotFound`].
    pub fn get(&self, id: &RecordId) -> SiteResult<R> {
        self.find(id)?.ok_or_else(|| SiteError::NotFound {
            collection: R::COLLECTION,
            id: id.to_string(),
        })
    }

    pub fn exists(&self, id: &RecordId) -> bool {
        self.record_path(id).is_file()
    }

    /// Writes a new record.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::InvalidInput`] if a record with the same id already exists.
    pub fn insert(&self, record: &R) -> SiteResult<()> {
        let path = self.record_path(record.id());
        if path.exists() {
            return Err(SiteError::InvalidInput(format!(
                "{} {} already exists",
                R::SINGULAR,
                record.id()
            )));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(SiteError::StorageDirCreation)?;
        }
        write_yaml(&path, record)
    }

    /// Replaces an existing record wholesale.
    pub fn update(&self, record: &R) -> SiteResult<()> {
        let path = self.record_path(record.id());
        if !path.is_file() {
            return Err(SiteError::NotFound {
                collection: R::COLLECTION,
                id: record.id().to_string(),
            });
        }
        write_yaml(&path, record)
    }

    /// Removes the record's directory.
    pub fn delete(&self, id: &RecordId) -> SiteResult<()> {
        let dir = id.sharded_dir(&self.collection_dir);
        if !dir.join(RECORD_FILENAME).is_file() {
            return Err(SiteError::NotFound {
                collection: R::COLLECTION,
                id: id.to_string(),
            });
        }
        fs::remove_dir_all(&dir).map_err(SiteError::FileDelete)
    }

    pub fn count(&self) -> SiteResult<usize> {
        Ok(self.list()?.len())
    }
}

/// Storage for the singleton organisation profile (`<SITE_DATA_DIR>/organisation.yaml`).
#[derive(Clone, Debug)]
pub struct OrganisationStore {
    path: PathBuf,
}

impl OrganisationStore {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            path: cfg.organisation_file(),
        }
    }

    /// Reads the profile. `None` until one has been saved.
    pub fn load(&self) -> SiteResult<Option<OrganisationInfo>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        read_yaml(&self.path).map(Some)
    }

    pub fn save(&self, info: &OrganisationInfo) -> SiteResult<()> {
        write_yaml(&self.path, info)
    }
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> SiteResult<T> {
    let contents = fs::read_to_string(path).map_err(SiteError::FileRead)?;
    let de = serde_yaml::Deserializer::from_str(&contents);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let at = err.path().to_string();
        SiteError::YamlDeserialization {
            path: path.to_path_buf(),
            at,
            message: err.into_inner().to_string(),
        }
    })
}

/// Each write gets its own temporary file, so concurrent saves of one record never share one.
fn write_yaml<T: Serialize>(path: &Path, value: &T) -> SiteResult<()> {
    let yaml = serde_yaml::to_string(value).map_err(SiteError::YamlSerialization)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(SiteError::FileWrite)?;
    tmp.write_all(yaml.as_bytes()).map_err(SiteError::FileWrite)?;
    tmp.persist(path)
        .map(drop)
        .map_err(|e| SiteError::FileWrite(e.error))
}
