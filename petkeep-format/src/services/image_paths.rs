//! Image reference normalization
//!
//! Stored image references accumulate from uploads, CSV seeds, and manual
//! edits. Whatever their origin, each is stripped back to its filename and
//! rewritten under the canonical public path
//! `images/pet/{species}/{filename}`, resolved against the configured
//! asset base URL.

/// Rewrites image references to canonical public URLs
#[derive(Debug, Clone)]
pub struct ImagePathNormalizer {
    assets_base_url: String,
}

impl ImagePathNormalizer {
    /// `assets_base_url` is the configured absolute URL prefix, resolved
    /// via [`petkeep_common::config::resolve_assets_base_url`]
    pub fn new(assets_base_url: impl Into<String>) -> Self {
        let mut base = assets_base_url.into();
        // stored without trailing slashes so joins stay single-slashed
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            assets_base_url: base,
        }
    }

    /// Normalize a batch of references for one species.
    ///
    /// Idempotent: extraction strips back to the filename first, so an
    /// already-canonical URL maps to itself.
    pub fn normalize(&self, image_refs: &[String], species: &str) -> Vec<String> {
        tracing::debug!(
            count = image_refs.len(),
            species = %species,
            "Normalizing image references"
        );
        image_refs
            .iter()
            .map(|r| self.normalize_ref(r, species))
            .collect()
    }

    /// Rewrite one reference as `{base}/images/pet/{species}/{filename}`
    pub fn normalize_ref(&self, image_ref: &str, species: &str) -> String {
        format!(
            "{}/images/pet/{}/{}",
            self.assets_base_url,
            species,
            basename(image_ref)
        )
    }
}

/// Final path segment, ignoring trailing slashes
fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
