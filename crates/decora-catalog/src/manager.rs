use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{Catalog, CatalogError};

const TMP_SUFFIX: &str = "tmp";

/// Handles persistence for [`Catalog`] overrides.
#[derive(Debug, Clone)]
pub struct CatalogManager {
    catalog_path: PathBuf,
}

impl CatalogManager {
    pub fn new(catalog_path: PathBuf) -> Self {
        Self { catalog_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, CatalogError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join("catalog.json")))
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Loads the saved catalog, or the built-ins when nothing was saved yet.
    /// A saved catalog that breaks the structural rules is rejected.
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        if !self.catalog_path.exists() {
            return Ok(Catalog::default());
        }
        let data = fs::read_to_string(&self.catalog_path)?;
        let catalog: Catalog =
            serde_json::from_str(&data).map_err(|err| CatalogError::Serde(err.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validates and writes the catalog, replacing the file atomically.
    pub fn save(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        catalog.validate()?;
        if let Some(parent) = self.catalog_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(catalog)
            .map_err(|err| CatalogError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.catalog_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.catalog_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
