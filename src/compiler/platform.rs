//! Manifest selection for the host platform
//!
//! Manifests are tried in declaration order and the first one whose
//! `Platform.os` is `linux`, `*` or unset wins. A later manifest is never
//! consulted once one has been picked, even if its lifecycle turns out to be
//! unusable.

use tracing::debug;

use crate::error::{CompileError, Result};
use crate::recipe::RecipeTree;

/// OS tags that select a manifest on this host.
const MATCHING_OS: [&str; 2] = ["linux", "*"];

/// The manifest chosen for this platform.
#[derive(Debug, Clone, Copy)]
pub struct SelectedManifest<'a> {
    pub index: usize,
    pub manifest: &'a RecipeTree,
}

/// Pick the first manifest applicable to Linux.
///
/// Returns `Ok(None)` when no manifest applies. A recipe without a
/// `Manifests` sequence is a format error.
pub fn select_manifest(recipe: &RecipeTree) -> Result<Option<SelectedManifest<'_>>> {
    let manifests = recipe
        .get("manifests")
        .ok_or_else(|| CompileError::format("missing required field 'Manifests'"))?
        .expect_sequence("Manifests")?;

    for (index, manifest) in manifests.iter().enumerate() {
        let field = format!("Manifests[{}]", index);
        manifest.expect_mapping(&field)?;

        let os = manifest_os(manifest, &field)?;
        if os.is_empty() || MATCHING_OS.contains(&os) {
            debug!(index, os, "selected manifest");
            return Ok(Some(SelectedManifest { index, manifest }));
        }

        debug!(index, os, "skipping manifest for another platform");
    }

    Ok(None)
}

/// The manifest's `Platform.os` tag, empty when unset.
fn manifest_os<'a>(manifest: &'a RecipeTree, field: &str) -> Result<&'a str> {
    let Some(platform) = manifest.get_present("platform") else {
        return Ok("");
    };
    platform.expect_mapping(&format!("{}.Platform", field))?;

    match platform.get("os") {
        Some(os) => os.expect_scalar(&format!("{}.Platform.os", field)),
        None => Ok(""),
    }
}
