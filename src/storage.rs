use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

// Filesystem-backed store for uploaded files.
//
// Every file lives directly under one root directory, named by its upload
// filename. Saving an existing name overwrites it. Names are reduced to
// their final path component on both save and read, so a request can never
// reach outside the root.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Lists the stored filenames, sorted so the response order is stable.
    // A root directory that does not exist yet is an empty store.
    pub async fn list(&self) -> io::Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        names.sort();
        Ok(names)
    }

    // Writes `data` under the bare filename of `name`, creating the root
    // directory on first use. Returns the name the file was stored under.
    pub async fn save(&self, name: &str, data: &[u8]) -> io::Result<String> {
        let filename = Path::new(name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file.bin".to_string());

        fs::create_dir_all(&self.root).await?;
        fs::write(self.root.join(&filename), data).await?;
        Ok(filename)
    }

    // Reads a stored file back, or `None` if nothing is stored under that
    // name. Only the bare filename of `name` is looked up.
    pub async fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        let Some(filename) = Path::new(name).file_name() else {
            return Ok(None);
        };

        match fs::read(self.root.join(filename)).await {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_root_lists_empty() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("nothing-here"));
        assert_eq!(storage.list().await.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn save_then_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());

        let stored = storage.save("notes.txt", b"hello").await.unwrap();
        assert_eq!(stored, "notes.txt");
        assert_eq!(storage.read("notes.txt").await.unwrap(), Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn save_strips_path_components() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("store"));

        let stored = storage.save("../../etc/evil.txt", b"x").await.unwrap();
        assert_eq!(stored, "evil.txt");
        assert_eq!(storage.list().await.unwrap(), vec!["evil.txt".to_string()]);
        assert!(!dir.path().join("etc").exists());
    }

    #[tokio::test]
    async fn save_overwrites_same_name() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());

        storage.save("a.bin", b"old").await.unwrap();
        storage.save("a.bin", b"new").await.unwrap();
        assert_eq!(storage.read("a.bin").await.unwrap(), Some(b"new".to_vec()));
        assert_eq!(storage.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn read_unknown_name_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        assert_eq!(storage.read("nope.txt").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_sorted() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());

        storage.save("b.txt", b"2").await.unwrap();
        storage.save("a.txt", b"1").await.unwrap();
        assert_eq!(
            storage.list().await.unwrap(),
            vec!["a.txt".to_string(), "b.txt".to_string()]
        );
    }
}
