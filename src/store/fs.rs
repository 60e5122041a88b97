use std::{fs, path::{Path, PathBuf}};

use parking_lot::Mutex;
use tracing::warn;

use crate::{error::{Error, Result}, store::{validate_id, DocumentSource, RawDocument}};

/// A directory of documents, one regular file per document, id = file name.
/// Subdirectories and non-UTF-8 file names are ignored.
#[derive(Debug)]
pub struct FsStore {
    root: PathBuf,
    /// serializes writers so the last write to an id wins as a whole
    write_lock: Mutex<()>,
}

impl FsStore {
    /// Open `dir`, creating it (and its parents) if missing
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| Error::StoreOpen {
            path: root.clone(),
            source,
        })?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a document with `id` is stored at
    pub fn path_of(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.root.join(id))
    }
}

impl DocumentSource for FsStore {
    fn list(&self) -> Result<Vec<RawDocument>> {
        let read_dir = fs::read_dir(&self.root).map_err(|source| Error::StoreList { source })?;
        let mut docs = Vec::new();
        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(dir = %self.root.display(), error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(id) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %path.display(), "skipping file with non UTF-8 name");
                continue;
            };
            let bytes = fs::read(&path).map_err(|source| Error::StoreRead {
                id: id.clone(),
                source,
            });
            docs.push(RawDocument { id, bytes });
        }
        docs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(docs)
    }

    fn write(&self, id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_of(id)?;
        let _guard = self.write_lock.lock();
        fs::write(&path, bytes).map_err(|source| Error::StoreWrite {
            id: id.to_string(),
            source,
        })
    }
}
