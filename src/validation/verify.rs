//! Post-build verification of the written PNG files.
//!
//! Re-opens every file a build is expected to produce and checks that it
//! exists and has the right pixel dimensions.

use std::path::PathBuf;

use crate::catalog::{AssetGroup, Catalog, Layout};
use crate::error::Result;
use crate::render::{read_png, scaled_size};

/// Outcome for a single expected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Present and correctly sized, with its count of non-transparent pixels.
    Ok { opaque: usize },
    Missing,
    WrongSize { actual: (u32, u32) },
    Unreadable(String),
}

impl FileStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, FileStatus::Ok { .. })
    }
}

/// One expected output file and what was found on disk.
#[derive(Debug, Clone)]
pub struct FileCheck {
    pub asset: String,
    pub group: AssetGroup,
    pub path: PathBuf,
    /// Dimensions after scaling, `None` when the asset's size is unknown.
    pub expected: Option<(u32, u32)>,
    pub status: FileStatus,
}

/// Every file checked by [`verify_outputs`].
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub files: Vec<FileCheck>,
}

impl VerifyReport {
    pub fn failures(&self) -> impl Iterator<Item = &FileCheck> {
        self.files.iter().filter(|f| !f.status.is_ok())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_ok(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Check the files a build of `catalog` into `layout` at `scale` produces.
///
/// Fails only if `scale` overflows an asset's dimensions.
pub fn verify_outputs(catalog: &Catalog, layout: &Layout, scale: u32) -> Result<VerifyReport> {
    let files = catalog
        .assets()
        .iter()
        .map(|asset| -> Result<FileCheck> {
            let path = catalog.output_path(asset, layout);
            let expected = asset
                .size
                .map(|size| scaled_size(size, scale))
                .transpose()?;

            let status = if !path.exists() {
                FileStatus::Missing
            } else {
                match read_png(&path) {
                    Err(e) => FileStatus::Unreadable(e.to_string()),
                    Ok(canvas) => match expected {
                        Some(size) if size != canvas.size() => FileStatus::WrongSize {
                            actual: canvas.size(),
                        },
                        _ => FileStatus::Ok {
                            opaque: canvas.opaque_count(),
                        },
                    },
                }
            };

            Ok(FileCheck {
                asset: asset.name.clone(),
                group: asset.group,
                path,
                expected,
                status,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(VerifyReport { files })
}
