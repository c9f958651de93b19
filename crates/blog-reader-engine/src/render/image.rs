use thiserror::Error;

use crate::model::AssetRef;

/// Widest image the reader asks the asset pipeline for.
pub const DEFAULT_MAX_IMAGE_WIDTH: u32 = 1024;

const SANITY_CDN: &str = "https://cdn.sanity.io/images";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Malformed image asset reference '{reference}'")]
    MalformedRef { reference: String },

    #[error("No image source configured for asset '{reference}'")]
    Unconfigured { reference: String },
}

/// Resolves an asset reference to a URL no wider than `max_width` pixels.
pub trait ImageUrlBuilder: Send + Sync {
    fn url(&self, asset: &AssetRef, max_width: u32) -> Result<String, AssetError>;
}

/// Builds Sanity CDN URLs from `image-<id>-<w>x<h>-<ext>` references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanityImageUrlBuilder {
    pub project_id: String,
    pub dataset: String,
}

impl SanityImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }
}

/// Parsed form of an image asset reference.
#[derive(Debug, PartialEq, Eq)]
struct ImageRef<'a> {
    id: &'a str,
    width: u32,
    height: u32,
    format: &'a str,
}

fn parse_image_ref(reference: &str) -> Option<ImageRef<'_>> {
    let rest = reference.strip_prefix("image-")?;
    let mut parts = rest.rsplitn(3, '-');
    let format = parts.next()?;
    let dimensions = parts.next()?;
    let id = parts.next()?;

    let (width, height) = dimensions.split_once('x')?;
    let width = width.parse().ok()?;
    let height = height.parse().ok()?;

    if id.is_empty() || format.is_empty() {
        return None;
    }

    Some(ImageRef {
        id,
        width,
        height,
        format,
    })
}

impl ImageUrlBuilder for SanityImageUrlBuilder {
    fn url(&self, asset: &AssetRef, max_width: u32) -> Result<String, AssetError> {
        let image = parse_image_ref(&asset.reference).ok_or_else(|| AssetError::MalformedRef {
            reference: asset.reference.clone(),
        })?;

        Ok(format!(
            "{SANITY_CDN}/{}/{}/{}-{}x{}.{}?max-w={max_width}",
            self.project_id, self.dataset, image.id, image.width, image.height, image.format
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn asset(reference: &str) -> AssetRef {
        AssetRef {
            reference: reference.to_string(),
            kind: "reference".to_string(),
        }
    }

    #[test]
    fn test_sanity_url() {
        let builder = SanityImageUrlBuilder::new("proj", "production");

        let url = builder
            .url(&asset("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg"), 1024)
            .unwrap();

        assert_eq!(
            url,
            "https://cdn.sanity.io/images/proj/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg?max-w=1024"
        );
    }

    #[rstest]
    #[case::missing_prefix("file-abc-10x10-png")]
    #[case::missing_format("image-abc-10x10")]
    #[case::bad_dimensions("image-abc-tenxten-png")]
    #[case::empty("")]
    fn test_malformed_refs(#[case] reference: &str) {
        let builder = SanityImageUrlBuilder::new("proj", "production");

        let result = builder.url(&asset(reference), 1024);

        assert!(matches!(result, Err(AssetError::MalformedRef { .. })));
    }

    #[test]
    fn test_parse_image_ref() {
        assert_eq!(
            parse_image_ref("image-abc-640x480-webp"),
            Some(ImageRef {
                id: "abc",
                width: 640,
                height: 480,
                format: "webp",
            })
        );
    }
}
