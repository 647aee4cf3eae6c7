use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use log::{debug, error, info, warn};
use time::OffsetDateTime;
use crate::errors::WikiError;
use crate::types::{Page, Title};

const PAGE_EXTENSION: &str = "txt";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Flat-file storage: one `<title>.txt` per page under the data directory
#[derive(Debug, Clone)]
pub struct PageStore {
    data_dir: PathBuf,
}

impl PageStore {
    /// Create a page store rooted at `data_dir`
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Creating PageStore with data directory: {:?}", data_dir);
        Self { data_dir }
    }

    /// Create the store, making the data directory if it does not exist yet
    pub fn open(data_dir: PathBuf) -> Result<Self, WikiError> {
        if !data_dir.is_dir() {
            info!("Creating data directory {:?}", data_dir);
            fs::create_dir_all(&data_dir)?;
        }
        Ok(Self::new(data_dir))
    }

    /// Path of the file backing `title`
    pub fn page_path(&self, title: &Title) -> PathBuf {
        self.data_dir.join(format!("{}.{}", title, PAGE_EXTENSION))
    }

    /// Read a page from disk
    pub fn load(&self, title: &Title) -> Result<Page, WikiError> {
        let path = self.page_path(title);
        debug!("Loading page '{}' from {:?}", title, path);

        match fs::read(&path) {
            Ok(body) => {
                debug!("Loaded page '{}', {} bytes", title, body.len());
                Ok(Page::new(title.clone(), body))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Page '{}' does not exist", title);
                Err(WikiError::PageNotFound(title.to_string()))
            }
            Err(e) => {
                error!("Failed to read page {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }

    /// Write a page to disk, replacing any previous content.
    ///
    /// The body goes to a temporary sibling first and is renamed into place,
    /// so concurrent writers to one title never leave a mixed file.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.page_path(&page.title);
        let tmp = self.data_dir.join(format!(
            ".{}.{}.{}.tmp",
            page.title,
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        debug!("Saving page '{}' ({} bytes) via {:?}", page.title, page.body.len(), tmp);

        let written = write_private(&tmp, &page.body).and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = written {
            error!("Failed to save page {:?}: {}", path, e);
            let _ = fs::remove_file(&tmp);
            return Err(WikiError::Persistence(e));
        }

        info!("Saved page '{}', {} bytes", page.title, page.body.len());
        Ok(())
    }

    /// Modification time of the page file, if it exists
    pub fn last_modified(&self, title: &Title) -> Option<OffsetDateTime> {
        let mtime = fs::metadata(self.page_path(title)).and_then(|m| m.modified()).ok()?;
        Some(OffsetDateTime::from(mtime))
    }

    /// Titles of every stored page, sorted case-insensitively
    pub fn list_titles(&self) -> Result<Vec<Title>, WikiError> {
        let entries = fs::read_dir(&self.data_dir).map_err(|e| {
            error!("Failed to read data directory {:?}: {}", self.data_dir, e);
            WikiError::Io(e)
        })?;

        let mut titles = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PAGE_EXTENSION) {
                continue;
            }
            // temp files and foreign names fail title validation
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(title) = Title::parse(stem) {
                titles.push(title);
            }
        }

        titles.sort_by(|a, b| {
            a.as_str()
                .to_lowercase()
                .cmp(&b.as_str().to_lowercase())
                .then_with(|| a.as_str().cmp(b.as_str()))
        });
        debug!("Listed {} pages in {:?}", titles.len(), self.data_dir);
        Ok(titles)
    }
}

fn write_private(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(body)?;
    file.sync_all()
}
