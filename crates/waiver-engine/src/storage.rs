//! Template storage
//!
//! Templates are looked up by file stem, ignoring case and extension. Some
//! template sets ship Word content under a `.pdf` name, so the extension is
//! never trusted; the bytes are validated when the document is parsed.

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::EngineError;
use crate::selector::TemplateId;

/// Folder holding the Arizona set inside the template archive
pub const DEFAULT_TEMPLATE_FOLDER: &str = "Arizona Templates";

/// Source of raw template bytes
pub trait TemplateStore {
    fn load(&self, id: TemplateId) -> Result<Vec<u8>, EngineError>;

    /// Whether `id` can currently be loaded
    fn contains(&self, id: TemplateId) -> bool {
        self.load(id).is_ok()
    }
}

impl<T: TemplateStore + ?Sized> TemplateStore for Box<T> {
    fn load(&self, id: TemplateId) -> Result<Vec<u8>, EngineError> {
        (**self).load(id)
    }

    fn contains(&self, id: TemplateId) -> bool {
        (**self).contains(id)
    }
}

fn stem_matches(path: &Path, stem: &str) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.trim().eq_ignore_ascii_case(stem))
}

fn single_match<T: std::fmt::Debug>(
    id: TemplateId,
    mut matches: Vec<T>,
) -> Result<T, EngineError> {
    match matches.len() {
        0 => Err(EngineError::TemplateNotFound(format!(
            "no file named '{}'",
            id.file_stem()
        ))),
        1 => Ok(matches.remove(0)),
        n => {
            warn!(template = id.slug(), candidates = ?matches, "Ambiguous template");
            Err(EngineError::TemplateNotFound(format!(
                "{} files named '{}'",
                n,
                id.file_stem()
            )))
        }
    }
}

/// Templates stored as files under a directory (searched recursively)
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collect(&self, dir: &Path, stem: &str, out: &mut Vec<PathBuf>) -> Result<(), EngineError> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                self.collect(&path, stem, out)?;
            } else if stem_matches(&path, stem) {
                out.push(path);
            }
        }
        Ok(())
    }
}

impl TemplateStore for DirectoryStore {
    fn load(&self, id: TemplateId) -> Result<Vec<u8>, EngineError> {
        let mut matches = Vec::new();
        self.collect(&self.root, id.file_stem(), &mut matches)?;
        let path = single_match(id, matches)?;
        debug!(template = id.slug(), path = %path.display(), "Loading template file");
        Ok(fs::read(path)?)
    }
}

/// Templates stored inside a zip archive
#[derive(Debug, Clone)]
pub struct ZipArchiveStore {
    archive: Vec<u8>,
    folder: String,
}

impl ZipArchiveStore {
    pub fn from_bytes(archive: Vec<u8>) -> Result<Self, EngineError> {
        ZipArchive::new(Cursor::new(archive.as_slice())).map_err(archive_error)?;
        Ok(Self {
            archive,
            folder: DEFAULT_TEMPLATE_FOLDER.to_string(),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        Self::from_bytes(fs::read(path)?)
    }

    /// Folder whose entries are preferred when a stem appears more than once
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    fn in_folder(&self, name: &str) -> bool {
        Path::new(name)
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|f| f.to_str())
            .is_some_and(|f| f.eq_ignore_ascii_case(&self.folder))
    }
}

fn archive_error(err: zip::result::ZipError) -> EngineError {
    EngineError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}

impl TemplateStore for ZipArchiveStore {
    fn load(&self, id: TemplateId) -> Result<Vec<u8>, EngineError> {
        let mut archive = ZipArchive::new(Cursor::new(self.archive.as_slice())).map_err(archive_error)?;

        let candidates: Vec<String> = archive
            .file_names()
            .filter(|name| !name.ends_with('/') && !name.starts_with("__MACOSX/"))
            .filter(|name| stem_matches(Path::new(name), id.file_stem()))
            .map(String::from)
            .collect();

        let (preferred, others): (Vec<String>, Vec<String>) =
            candidates.into_iter().partition(|name| self.in_folder(name));
        let name = if preferred.is_empty() {
            single_match(id, others)?
        } else {
            single_match(id, preferred)?
        };

        debug!(template = id.slug(), entry = %name, "Loading template from archive");
        let mut entry = archive.by_name(&name).map_err(archive_error)?;
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Templates held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    templates: HashMap<TemplateId, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, id: TemplateId, bytes: Vec<u8>) -> Self {
        self.insert(id, bytes);
        self
    }

    pub fn insert(&mut self, id: TemplateId, bytes: Vec<u8>) {
        self.templates.insert(id, bytes);
    }
}

impl TemplateStore for MemoryStore {
    fn load(&self, id: TemplateId) -> Result<Vec<u8>, EngineError> {
        self.templates
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::TemplateNotFound(id.slug().to_string()))
    }

    fn contains(&self, id: TemplateId) -> bool {
        self.templates.contains_key(&id)
    }
}

/// Open a directory or `.zip` template source
pub fn open_store(
    path: impl AsRef<Path>,
    folder: Option<&str>,
) -> Result<Box<dyn TemplateStore + Send + Sync>, EngineError> {
    let path = path.as_ref();
    let is_zip = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"));

    if is_zip {
        let mut store = ZipArchiveStore::from_path(path)?;
        if let Some(folder) = folder {
            store = store.with_folder(folder);
        }
        Ok(Box::new(store))
    } else if path.is_dir() {
        Ok(Box::new(DirectoryStore::new(path)))
    } else {
        Err(EngineError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("template source not found: {}", path.display()),
        )))
    }
}
