use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use thiserror::Error;
use time::OffsetDateTime;

const NOTE_EXTENSION: &str = "md";

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid note name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl VaultError {
    fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => VaultError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::AlreadyExists => VaultError::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => VaultError::Io {
                action,
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// One entry of the vault listing. Derived from the directory, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub title: String,
    pub last_modified: OffsetDateTime,
}

/// Exclusive read/write handle on one note file. Dropping it closes the file.
#[derive(Debug)]
pub struct NoteHandle {
    path: PathBuf,
    file: File,
}

impl NoteHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
impl NoteHandle {
    /// A handle whose writes always fail.
    pub(crate) fn read_only(path: &Path) -> io::Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            file: File::open(path)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct VaultStore {
    root: Arc<PathBuf>,
}

impl VaultStore {
    /// Wraps an existing directory. Use [`init`] to create it first.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a note titled `name` would live at.
    pub fn note_path(&self, name: &str) -> Result<PathBuf, VaultError> {
        validate_name(name)?;
        Ok(self.root.join(format!("{name}.{NOTE_EXTENSION}")))
    }

    /// Path of a listed entry, as shown by [`VaultStore::list`].
    pub fn entry_path(&self, title: &str) -> Result<PathBuf, VaultError> {
        validate_entry(title)?;
        Ok(self.root.join(title))
    }

    /// Creates `<vault>/<name>.md`. Never overwrites an existing file.
    pub fn create(&self, name: &str) -> Result<NoteHandle, VaultError> {
        let path = self.note_path(name)?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|err| VaultError::io("creating", &path, err))?;
        tracing::info!(path = %path.display(), "created note");
        Ok(NoteHandle { path, file })
    }

    /// Returns the full current content plus a handle for a later rewrite.
    pub fn open(&self, path: &Path) -> Result<(String, NoteHandle), VaultError> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|err| VaultError::io("opening", path, err))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|err| VaultError::io("reading", path, err))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "opened note");
        Ok((
            content,
            NoteHandle {
                path: path.to_path_buf(),
                file,
            },
        ))
    }

    /// Rewrites the whole file from `content`.
    ///
    /// A failure after the truncate step can leave the file empty or short;
    /// callers must report that instead of claiming success.
    pub fn save(&self, handle: &mut NoteHandle, content: &str) -> Result<(), VaultError> {
        let path = handle.path.clone();
        handle
            .file
            .set_len(0)
            .map_err(|err| VaultError::io("truncating", &path, err))?;
        handle
            .file
            .seek(SeekFrom::Start(0))
            .map_err(|err| VaultError::io("seeking", &path, err))?;
        handle
            .file
            .write_all(content.as_bytes())
            .map_err(|err| VaultError::io("writing", &path, err))?;
        handle
            .file
            .sync_data()
            .map_err(|err| VaultError::io("flushing", &path, err))?;
        tracing::info!(path = %path.display(), bytes = content.len(), "saved note");
        Ok(())
    }

    pub fn delete(&self, path: &Path) -> Result<(), VaultError> {
        fs::remove_file(path).map_err(|err| VaultError::io("removing", path, err))?;
        tracing::info!(path = %path.display(), "deleted note");
        Ok(())
    }

    /// Every non-directory entry in the vault, sorted by title.
    pub fn list(&self) -> Result<Vec<NoteSummary>, VaultError> {
        let entries =
            fs::read_dir(&*self.root).map_err(|err| VaultError::io("reading", &self.root, err))?;
        let mut notes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| VaultError::io("reading", &self.root, err))?;
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    tracing::warn!(?err, entry = ?entry.file_name(), "skipping unreadable entry");
                    continue;
                }
            };
            if metadata.is_dir() {
                continue;
            }
            let Ok(modified) = metadata.modified() else {
                continue;
            };
            notes.push(NoteSummary {
                title: entry.file_name().to_string_lossy().into_owned(),
                last_modified: OffsetDateTime::from(modified),
            });
        }
        notes.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(notes)
    }
}

fn validate_name(name: &str) -> Result<(), VaultError> {
    let invalid = |reason| VaultError::InvalidName {
        name: name.to_string(),
        reason,
    };
    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains('\0') {
        return Err(invalid("name contains a NUL byte"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name contains a path separator"));
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid("name must be a plain file name")),
    }
}

/// Listed entries only need to name a file directly inside the vault. A `\`
/// is an ordinary file name character on unix, so it is accepted here.
fn validate_entry(title: &str) -> Result<(), VaultError> {
    if !title.contains('\0') && Path::new(title).file_name() == Some(OsStr::new(title)) {
        Ok(())
    } else {
        Err(VaultError::InvalidName {
            name: title.to_string(),
            reason: "entry is not a file directly inside the vault",
        })
    }
}

/// Creates the vault directory when missing and returns a store bound to it.
pub fn init(vault_dir: &Path) -> Result<VaultStore> {
    if !vault_dir.is_dir() {
        create_private_dir(vault_dir)
            .with_context(|| format!("creating vault directory {}", vault_dir.display()))?;
        tracing::info!(path = %vault_dir.display(), "created vault directory");
    }
    Ok(VaultStore::new(vault_dir))
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o755)
        .create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
