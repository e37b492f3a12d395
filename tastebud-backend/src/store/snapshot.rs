use super::StoreError;
use super::memory::{MemoryStore, StoreState};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

impl MemoryStore {
    /// Loads a store from a JSON snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let reader = BufReader::new(File::open(path)?);
        let state: StoreState = serde_json::from_reader(reader)?;
        Ok(Self::from_state(state))
    }

    /// Like `load`, but a missing file yields an empty store.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        match Self::load(&path) {
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "No snapshot at {}, starting with an empty store",
                    path.as_ref().display()
                );
                Ok(Self::new())
            }
            result => result,
        }
    }

    /// Writes the whole store as JSON. The file is replaced atomically, so a
    /// crash mid-write leaves the previous snapshot intact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let temp_path = path.with_extension("json.tmp");
        {
            let state = self.lock()?;
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            serde_json::to_writer(&mut writer, &*state)?;
            writer.flush()?;
        }
        std::fs::rename(&temp_path, path)?;
        Ok(())
    }
}
