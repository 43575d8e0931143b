//! # Asset Store
//!
//! Texture cache keyed by asset id. Sprites only store the id; the render
//! system resolves it here each frame.
//!
//! Decoding is left to a [`TextureLoader`] so the store works the same with a
//! GPU backend, the file reader below, or a fake in tests.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{GameError, GameResult};

/// Loaded texture data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    /// File the texture was loaded from.
    pub path: PathBuf,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Turns a file path into a texture.
pub trait TextureLoader {
    /// Loads the texture stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read or decoded.
    fn load(&mut self, path: &Path) -> io::Result<Texture>;
}

/// Reads texture files from disk without decoding them.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileTextureLoader;

impl TextureLoader for FileTextureLoader {
    fn load(&mut self, path: &Path) -> io::Result<Texture> {
        Ok(Texture {
            path: path.to_path_buf(),
            bytes: std::fs::read(path)?,
        })
    }
}

/// Cache of textures by asset id.
#[derive(Debug, Default)]
pub struct AssetStore<L: TextureLoader = FileTextureLoader> {
    loader: L,
    textures: HashMap<String, Texture>,
}

impl<L: TextureLoader> AssetStore<L> {
    /// Creates an empty store using `loader`.
    #[must_use]
    pub fn new(loader: L) -> Self {
        tracing::debug!("asset store created");
        Self {
            loader,
            textures: HashMap::new(),
        }
    }

    /// Loads `path` and stores it under `asset_id`, replacing any previous texture.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Asset`] if the loader fails; the store is unchanged.
    pub fn add_texture(&mut self, asset_id: &str, path: impl AsRef<Path>) -> GameResult<()> {
        let path = path.as_ref();
        let texture = self.loader.load(path).map_err(|e| GameError::Asset {
            asset_id: asset_id.to_owned(),
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        self.textures.insert(asset_id.to_owned(), texture);
        tracing::info!(asset_id, path = %path.display(), "texture added to the asset store");
        Ok(())
    }

    /// Returns the texture stored under `asset_id`.
    #[must_use]
    pub fn get_texture(&self, asset_id: &str) -> Option<&Texture> {
        self.textures.get(asset_id)
    }

    /// Returns `true` if a texture is stored under `asset_id`.
    #[must_use]
    pub fn contains(&self, asset_id: &str) -> bool {
        self.textures.contains_key(asset_id)
    }

    /// Number of stored textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Returns `true` if no texture is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Drops every texture.
    pub fn clear_assets(&mut self) {
        let count = self.textures.len();
        self.textures.clear();
        tracing::debug!(count, "asset store cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the path as bytes, or fails for paths containing "missing".
    struct FakeLoader {
        calls: usize,
    }

    impl TextureLoader for FakeLoader {
        fn load(&mut self, path: &Path) -> io::Result<Texture> {
            self.calls += 1;
            let text = path.to_string_lossy();
            if text.contains("missing") {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
            }
            Ok(Texture {
                path: path.to_path_buf(),
                bytes: text.as_bytes().to_vec(),
            })
        }
    }

    fn store() -> AssetStore<FakeLoader> {
        AssetStore::new(FakeLoader { calls: 0 })
    }

    #[test]
    fn test_add_and_get() {
        let mut assets = store();
        assets.add_texture("tank-image", "assets/tank.png").unwrap();

        assert!(assets.contains("tank-image"));
        assert_eq!(
            assets.get_texture("tank-image").unwrap().path,
            PathBuf::from("assets/tank.png")
        );
        assert!(assets.get_texture("truck-image").is_none());
    }

    #[test]
    fn test_failed_load_leaves_store_unchanged() {
        let mut assets = store();
        let err = assets.add_texture("ghost", "assets/missing.png").unwrap_err();

        assert!(matches!(err, GameError::Asset { ref asset_id, .. } if asset_id == "ghost"));
        assert!(assets.is_empty());
        assert_eq!(assets.loader.calls, 1);
    }

    #[test]
    fn test_readd_replaces() {
        let mut assets = store();
        assets.add_texture("tank-image", "a.png").unwrap();
        assets.add_texture("tank-image", "b.png").unwrap();

        assert_eq!(assets.len(), 1);
        assert_eq!(assets.get_texture("tank-image").unwrap().bytes, b"b.png");
    }

    #[test]
    fn test_clear_assets() {
        let mut assets = store();
        assets.add_texture("a", "a.png").unwrap();
        assets.add_texture("b", "b.png").unwrap();
        assets.clear_assets();
        assert!(assets.is_empty());
    }

    #[test]
    fn test_file_loader_reports_missing_file() {
        let mut assets = AssetStore::new(FileTextureLoader);
        let err = assets
            .add_texture("tank-image", "/definitely/not/here.png")
            .unwrap_err();
        assert!(matches!(err, GameError::Asset { .. }));
    }
}
