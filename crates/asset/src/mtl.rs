//! Minimal MTL parser: captures the diffuse texture map reference.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};

/// Material properties extracted from an MTL file.
///
/// Only the diffuse texture reference is read here; lighting coefficients
/// are filled in by the consumer's defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    /// Relative path of the diffuse texture, exactly as written in the file.
    pub diffuse_map: Option<String>,
}

impl Material {
    /// Resolve the diffuse map against the directory the MTL file came from.
    pub fn resolve_diffuse(&self, base_dir: impl AsRef<Path>) -> Option<PathBuf> {
        self.diffuse_map
            .as_ref()
            .map(|name| base_dir.as_ref().join(name))
    }
}

/// Load a material from a file path.
pub fn load_mtl_from_path(path: impl AsRef<Path>) -> Result<Material> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open MTL file: {}", path.as_ref().display()))?;
    let material = parse_mtl(BufReader::new(file))?;
    match &material.diffuse_map {
        Some(map) => log::info!("Parsed {}: map_Kd {}", path.as_ref().display(), map),
        None => log::warn!("Parsed {}: no map_Kd entry", path.as_ref().display()),
    }
    Ok(material)
}

/// Load a material from a [`BufRead`] implementation.
pub fn load_mtl_from_reader<R: BufRead>(reader: R) -> Result<Material> {
    parse_mtl(reader)
}

/// Convenience helper to parse an MTL string literal.
pub fn load_mtl_from_str(contents: &str) -> Result<Material> {
    parse_mtl(io::Cursor::new(contents))
}

fn parse_mtl<R: BufRead>(reader: R) -> Result<Material> {
    let mut material = Material::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else { continue };

        match tag {
            "map_Kd" => {
                let name = parts
                    .next()
                    .ok_or_else(|| anyhow!("map_Kd without a file name on line {}", line_no + 1))?;
                material.diffuse_map = Some(name.to_string());
            }
            _ => {
                // Ignore other commands (newmtl/Ka/Kd/Ks/Ns/d/illum/etc.)
            }
        }
    }

    Ok(material)
}
