//! Image and file asset URLs on the Sanity CDN.
//!
//! Asset references encode everything needed to build a URL:
//! `image-<id>-<width>x<height>-<format>` and `file-<id>-<extension>`.
//! Building a URL never touches the network.

use la_fleur_core::{Crop, Hotspot, ImageRef, VideoRef};
use url::Url;

const CDN_BASE: &str = "https://cdn.sanity.io";

/// How the image is fitted into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    Clip,
    Crop,
    Fill,
    FillMax,
    Max,
    Scale,
    Min,
}

impl FitMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clip => "clip",
            Self::Crop => "crop",
            Self::Fill => "fill",
            Self::FillMax => "fillmax",
            Self::Max => "max",
            Self::Scale => "scale",
            Self::Min => "min",
        }
    }
}

/// Requested output size and fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: Option<FitMode>,
}

impl ImageParams {
    /// A fixed `width` × `height` box, cropped to fill it.
    #[must_use]
    pub const fn cover(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            fit: Some(FitMode::Crop),
        }
    }

    /// Scale down to at most `width` pixels wide.
    #[must_use]
    pub const fn max_width(width: u32) -> Self {
        Self {
            width: Some(width),
            height: None,
            fit: Some(FitMode::Max),
        }
    }
}

/// The parts of an `image-…` asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImageAsset<'a> {
    id: &'a str,
    width: u32,
    height: u32,
    format: &'a str,
}

fn parse_image_ref(reference: &str) -> Option<ImageAsset<'_>> {
    let rest = reference.strip_prefix("image-")?;
    let (rest, format) = rest.rsplit_once('-')?;
    let (id, dimensions) = rest.rsplit_once('-')?;
    let (width, height) = dimensions.split_once('x')?;
    let width: u32 = width.parse().ok()?;
    let height: u32 = height.parse().ok()?;

    if id.is_empty() || format.is_empty() || width == 0 || height == 0 {
        return None;
    }

    Some(ImageAsset {
        id,
        width,
        height,
        format,
    })
}

fn parse_file_ref(reference: &str) -> Option<(&str, &str)> {
    let rest = reference.strip_prefix("file-")?;
    let (id, extension) = rest.rsplit_once('-')?;
    (!id.is_empty() && !extension.is_empty()).then_some((id, extension))
}

/// Pixel rectangle of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn crop_rect(crop: &Crop, width: u32, height: u32) -> Rect {
    let w = f64::from(width);
    let h = f64::from(height);
    let clamp = |v: f64| v.clamp(0.0, 1.0);

    let left = (clamp(crop.left) * w).round();
    let top = (clamp(crop.top) * h).round();
    let right = (clamp(crop.right) * w).round();
    let bottom = (clamp(crop.bottom) * h).round();

    Rect {
        left: left as u32,
        top: top as u32,
        width: (w - left - right).max(1.0) as u32,
        height: (h - top - bottom).max(1.0) as u32,
    }
}

/// Hotspot centre relative to `rect`, clamped into it.
fn focal_point(hotspot: &Hotspot, rect: Rect, width: u32, height: u32) -> (f64, f64) {
    let x = hotspot.x.mul_add(f64::from(width), -f64::from(rect.left)) / f64::from(rect.width);
    let y = hotspot.y.mul_add(f64::from(height), -f64::from(rect.top)) / f64::from(rect.height);
    (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
}

fn format_fraction(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Builds CDN URLs for one project and dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    #[must_use]
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// URL for an image at the requested size.
    ///
    /// Returns `None` for a malformed asset reference.
    #[must_use]
    pub fn image_url(&self, image: &ImageRef, params: ImageParams) -> Option<String> {
        let asset = parse_image_ref(&image.asset_ref)?;
        let mut url = Url::parse(&format!(
            "{CDN_BASE}/images/{}/{}/{}-{}x{}.{}",
            self.project_id, self.dataset, asset.id, asset.width, asset.height, asset.format
        ))
        .ok()?;

        let full = Rect {
            left: 0,
            top: 0,
            width: asset.width,
            height: asset.height,
        };
        let rect = image
            .crop
            .as_ref()
            .map_or(full, |crop| crop_rect(crop, asset.width, asset.height));

        let mut pairs: Vec<(&str, String)> = Vec::new();
        if rect != full {
            pairs.push((
                "rect",
                format!("{},{},{},{}", rect.left, rect.top, rect.width, rect.height),
            ));
        }
        if let Some(width) = params.width {
            pairs.push(("w", width.to_string()));
        }
        if let Some(height) = params.height {
            pairs.push(("h", height.to_string()));
        }
        if let Some(fit) = params.fit {
            pairs.push(("fit", fit.as_str().to_string()));
        }
        if let Some(hotspot) = &image.hotspot {
            let (x, y) = focal_point(hotspot, rect, asset.width, asset.height);
            if params.fit == Some(FitMode::Crop) {
                pairs.push(("crop", "focalpoint".to_string()));
            }
            pairs.push(("fp-x", format_fraction(x)));
            pairs.push(("fp-y", format_fraction(y)));
        }

        // An empty `query_pairs_mut` would still leave a trailing `?`
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(&pairs);
        }
        Some(url.into())
    }

    /// URL for a video (or any file) asset.
    ///
    /// Returns `None` for a malformed asset reference.
    #[must_use]
    pub fn file_url(&self, video: &VideoRef) -> Option<String> {
        let (id, extension) = parse_file_ref(&video.asset_ref)?;
        Some(format!(
            "{CDN_BASE}/files/{}/{}/{id}.{extension}",
            self.project_id, self.dataset
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const REF: &str = "image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg";

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new("zp7mbokg", "production")
    }

    #[test]
    fn test_parse_image_ref() {
        let asset = parse_image_ref(REF).unwrap();
        assert_eq!(asset.id, "Tb9Ew8CXIwaY6R1kjMvI0uRR");
        assert_eq!((asset.width, asset.height), (2000, 3000));
        assert_eq!(asset.format, "jpg");
    }

    #[test]
    fn test_malformed_refs() {
        for bad in [
            "",
            "image-abc",
            "image-abc-2000-jpg",
            "image-abc-0x10-jpg",
            "image--10x10-png",
            "file-abc-mp4",
            "https://example.com/a.jpg",
        ] {
            assert!(
                builder().image_url(&ImageRef::new(bad), ImageParams::default()).is_none(),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_plain_url() {
        let url = builder()
            .image_url(&ImageRef::new(REF), ImageParams::default())
            .unwrap();
        assert_eq!(
            url,
            "https://cdn.sanity.io/images/zp7mbokg/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"
        );
    }

    #[test]
    fn test_sized_url() {
        let url = builder()
            .image_url(&ImageRef::new(REF), ImageParams::cover(800, 900))
            .unwrap();
        assert!(url.ends_with("-2000x3000.jpg?w=800&h=900&fit=crop"), "{url}");
    }

    #[test]
    fn test_crop_rect() {
        let image = ImageRef {
            crop: Some(Crop {
                top: 0.1,
                bottom: 0.2,
                left: 0.25,
                right: 0.25,
            }),
            ..ImageRef::new(REF)
        };
        let url = builder().image_url(&image, ImageParams::max_width(400)).unwrap();
        assert!(url.contains("?rect=500%2C300%2C1000%2C2100&w=400&fit=max"), "{url}");
    }

    #[test]
    fn test_zero_crop_has_no_rect() {
        let image = ImageRef {
            crop: Some(Crop::default()),
            ..ImageRef::new(REF)
        };
        let url = builder().image_url(&image, ImageParams::default()).unwrap();
        assert!(!url.contains("rect="));
    }

    #[test]
    fn test_hotspot_focal_point() {
        let image = ImageRef {
            hotspot: Some(Hotspot {
                x: 0.5,
                y: 0.4,
                width: 0.3,
                height: 0.3,
            }),
            ..ImageRef::new(REF)
        };
        let url = builder().image_url(&image, ImageParams::cover(200, 200)).unwrap();
        assert!(
            url.ends_with("?w=200&h=200&fit=crop&crop=focalpoint&fp-x=0.5&fp-y=0.4"),
            "{url}"
        );
    }

    #[test]
    fn test_focal_point_relative_to_crop() {
        let image = ImageRef {
            hotspot: Some(Hotspot {
                x: 0.5,
                y: 0.5,
                width: 0.1,
                height: 0.1,
            }),
            crop: Some(Crop {
                top: 0.0,
                bottom: 0.0,
                left: 0.5,
                right: 0.0,
            }),
            asset_ref: "image-abc-1000x1000-png".to_string(),
        };
        let url = builder().image_url(&image, ImageParams::default()).unwrap();
        assert!(url.contains("rect=500%2C0%2C500%2C1000"), "{url}");
        assert!(url.contains("fp-x=0&fp-y=0.5"), "{url}");
    }

    #[test]
    fn test_query_decodes_as_pairs() {
        let image = ImageRef {
            crop: Some(Crop {
                top: 0.1,
                bottom: 0.2,
                left: 0.25,
                right: 0.25,
            }),
            ..ImageRef::new(REF)
        };
        let url = builder().image_url(&image, ImageParams::cover(400, 600)).unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("rect".to_string(), "500,300,1000,2100".to_string()),
                ("w".to_string(), "400".to_string()),
                ("h".to_string(), "600".to_string()),
                ("fit".to_string(), "crop".to_string()),
            ]
        );
        assert!(!url.ends_with('?'));
    }

    #[test]
    fn test_fit_modes() {
        let modes = [
            (FitMode::Clip, "clip"),
            (FitMode::Crop, "crop"),
            (FitMode::Fill, "fill"),
            (FitMode::FillMax, "fillmax"),
            (FitMode::Max, "max"),
            (FitMode::Scale, "scale"),
            (FitMode::Min, "min"),
        ];
        for (mode, name) in modes {
            assert_eq!(mode.as_str(), name);
        }
    }

    #[test]
    fn test_file_url() {
        let video = VideoRef {
            asset_ref: "file-7a1c2b3d4e5f-mp4".to_string(),
            caption: None,
        };
        assert_eq!(
            builder().file_url(&video).unwrap(),
            "https://cdn.sanity.io/files/zp7mbokg/production/7a1c2b3d4e5f.mp4"
        );

        let bad = VideoRef {
            asset_ref: "image-abc-1x1-jpg".to_string(),
            caption: None,
        };
        assert!(builder().file_url(&bad).is_none());
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_fraction(0.5), "0.5");
        assert_eq!(format_fraction(0.0), "0");
        assert_eq!(format_fraction(1.0), "1");
        assert_eq!(format_fraction(0.33333), "0.333");
    }
}
