//! Archive listing, extraction and inspection.

use crate::error::CommandError;
use novalogic_formats::image::DecodedImage;
use novalogic_formats::pff::{PffArchive, PffEntry};
use novalogic_formats::{FileKind, Preview};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Totals from an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractSummary {
    /// Files written
    pub files: usize,
    /// Bytes written
    pub bytes: u64,
    /// Entries skipped because an earlier entry had the same name
    pub duplicates: usize,
}

/// One listing line for an entry.
pub fn format_entry(entry: &PffEntry) -> String {
    let modified = entry
        .modified_utc()
        .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string());
    let flag = if entry.is_retrievable() { "" } else { " [deleted]" };
    format!(
        "{:<15} {:>19} {:<4} {:>10}{}",
        entry.name,
        modified,
        entry.extension().unwrap_or("-"),
        entry.size,
        flag
    )
}

/// Print every directory entry, deleted ones included.
pub fn list_entries<W: Write>(archive: &PffArchive, out: &mut W) -> Result<usize, CommandError> {
    let entries = archive.entries()?;
    for entry in entries.iter() {
        writeln!(out, "{}", format_entry(entry))?;
    }
    Ok(entries.len())
}

/// Check that an entry name is a plain file name.
pub fn safe_entry_name(name: &str) -> Result<&str, CommandError> {
    let unsafe_name = name.is_empty()
        || name.contains(['/', '\\', ':'])
        || name.contains("..")
        || name == ".";
    if unsafe_name {
        return Err(CommandError::UnsafeName(name.to_string()));
    }
    Ok(name)
}

/// Write every retrievable entry into `out_dir`.
///
/// Entries are written in parallel. When several entries share a name only
/// the first is written, matching what a lookup by name returns.
pub fn extract_all(archive: &PffArchive, out_dir: &Path) -> Result<ExtractSummary, CommandError> {
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    let mut entries = Vec::new();
    for entry in archive.live_entries()? {
        safe_entry_name(&entry.name)?;
        if seen.insert(entry.name.clone()) {
            entries.push(entry);
        } else {
            warn!("Skipping duplicate entry {} at index {}", entry.name, entry.index);
            duplicates += 1;
        }
    }

    fs::create_dir_all(out_dir).map_err(|source| CommandError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let sizes = entries
        .par_iter()
        .map(|entry| extract_entry(archive, entry, out_dir))
        .collect::<Result<Vec<u64>, CommandError>>()?;

    let summary = ExtractSummary {
        files: sizes.len(),
        bytes: sizes.iter().sum(),
        duplicates,
    };
    info!(
        "Extracted {} files ({} bytes) to {}",
        summary.files,
        summary.bytes,
        out_dir.display()
    );
    Ok(summary)
}

fn extract_entry(archive: &PffArchive, entry: &PffEntry, out_dir: &Path) -> Result<u64, CommandError> {
    let Some(data) = archive.contents(entry)? else {
        return Ok(0);
    };
    let path: PathBuf = out_dir.join(safe_entry_name(&entry.name)?);
    fs::write(&path, data).map_err(|source| CommandError::Write {
        path: path.clone(),
        source,
    })?;
    debug!("Wrote {} ({} bytes)", path.display(), data.len());
    Ok(data.len() as u64)
}

/// Decode one entry and describe it.
pub fn inspect(archive: &PffArchive, name: &str) -> Result<String, CommandError> {
    let data = archive
        .contents_by_name(name)?
        .ok_or_else(|| CommandError::EntryNotFound(name.to_string()))?;
    let preview = Preview::decode(name, data)?;
    Ok(describe(name, &preview))
}

fn describe_image(image: &DecodedImage) -> String {
    format!("{}x{} {:?}", image.width, image.height, image.format)
}

/// Human-readable summary of a decoded entry.
pub fn describe(name: &str, preview: &Preview) -> String {
    match preview {
        Preview::Pcx(pcx) => format!(
            "{name}: PCX version {}, {}",
            pcx.header.version,
            describe_image(&pcx.image)
        ),
        Preview::Tga(tga) => format!(
            "{name}: TGA ({:?}), {}",
            tga.variant,
            describe_image(&tga.image)
        ),
        Preview::Model(model) => {
            let mut lines = vec![format!(
                "{name}: 3DI model '{}', {} textures, {} LODs",
                model.name,
                model.textures.len(),
                model.lods.len()
            )];
            for texture in &model.textures {
                lines.push(format!(
                    "  texture {} '{}': {}x{}",
                    texture.index, texture.name, texture.width, texture.height
                ));
            }
            for (i, lod) in model.lods.iter().enumerate() {
                let meshes = lod
                    .build_meshes()
                    .map_or_else(|e| format!("meshes unavailable: {e}"), |m| format!("{} meshes", m.len()));
                lines.push(format!(
                    "  LOD {i}: {} vertices, {} faces, {} sub-objects, {} materials, {meshes}",
                    lod.vertices.len(),
                    lod.faces.len(),
                    lod.sub_objects.len(),
                    lod.materials.len()
                ));
            }
            lines.join("\n")
        }
        Preview::Raw(FileKind::Unknown, data) => format!("{name}: {} bytes", data.len()),
        Preview::Raw(kind, data) => format!("{name}: {kind:?}, {} bytes", data.len()),
    }
}
