//! Deferred image decoding
//!
//! All image work (floor-plan uploads, stored-plan reloads, dropped
//! furniture, custom thumbnails) flows through one queue that is drained at
//! a frame boundary, mirroring the storage layer's fire-and-poll shape.
//!
//! Every request carries a tag naming the state it belongs to (project id,
//! form generation). The shell applies an outcome only when its tag still
//! matches current state, so a decode that finishes after the user switches
//! projects is discarded instead of landing on the wrong plan.

use crate::catalog::FurnitureTemplate;
use crate::thumbnail;
use base64::Engine as _;
use macroquad::prelude::{FilterMode, Texture2D};
use std::collections::VecDeque;

/// What a decode request belongs to
#[derive(Debug, Clone)]
pub enum DecodeTarget {
    /// The active project's floor plan. `from_upload` distinguishes a fresh
    /// file-picker upload (which resizes the plan and persists the image)
    /// from re-decoding a stored project's image on load.
    FloorPlan {
        project_id: Option<String>,
        from_upload: bool,
    },
    /// A catalog template dropped onto the canvas at a world position
    DroppedItem {
        project_id: Option<String>,
        template: FurnitureTemplate,
        x: f32,
        y: f32,
    },
    /// The custom-furniture form's image, to be normalized into a thumbnail
    CustomThumbnail {
        generation: u64,
        name: String,
        width: f32,
        depth: f32,
        rotation: f32,
    },
}

impl DecodeTarget {
    /// Whether this outcome still belongs to current state.
    ///
    /// Project-tagged work must match the active project id; form-tagged
    /// work must match the form generation counter.
    pub fn matches(&self, active_project: Option<&str>, form_generation: u64) -> bool {
        match self {
            DecodeTarget::FloorPlan { project_id, .. }
            | DecodeTarget::DroppedItem { project_id, .. } => {
                project_id.as_deref() == active_project
            }
            DecodeTarget::CustomThumbnail { generation, .. } => *generation == form_generation,
        }
    }
}

/// Where a request's bytes come from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Raw bytes already in hand (file-picker reads)
    Bytes(Vec<u8>),
    /// A reference to resolve: data URL, http(s) URL, or a filesystem path
    Reference(String),
}

/// One queued decode request
#[derive(Debug)]
pub struct DecodeJob {
    pub target: DecodeTarget,
    pub source: ImageSource,
}

/// What a completed decode produced
#[derive(Debug)]
pub enum DecodeProduct {
    /// A GPU texture plus the source's pixel size and persistable data URL
    Raster {
        texture: Texture2D,
        width: u32,
        height: u32,
        data_url: String,
    },
    /// A normalized thumbnail, re-encoded as a PNG data URL
    Thumbnail { data_url: String },
}

/// A settled decode request
#[derive(Debug)]
pub struct DecodeOutcome {
    pub target: DecodeTarget,
    pub result: Result<DecodeProduct, String>,
}

/// FIFO queue of pending decode requests
#[derive(Default)]
pub struct DecodeQueue {
    jobs: VecDeque<DecodeJob>,
}

impl DecodeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, target: DecodeTarget, source: ImageSource) {
        self.jobs.push_back(DecodeJob { target, source });
    }

    /// Settle up to `budget` requests and return their outcomes.
    ///
    /// Creates GPU textures, so this must run on the render thread.
    pub fn pump(&mut self, budget: usize) -> Vec<DecodeOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..budget {
            let Some(job) = self.jobs.pop_front() else {
                break;
            };
            let result = settle(&job);
            outcomes.push(DecodeOutcome {
                target: job.target,
                result,
            });
        }
        outcomes
    }
}

fn settle(job: &DecodeJob) -> Result<DecodeProduct, String> {
    let bytes = match &job.source {
        ImageSource::Bytes(bytes) => bytes.clone(),
        ImageSource::Reference(reference) => fetch_bytes(reference)?,
    };

    match &job.target {
        DecodeTarget::CustomThumbnail { rotation, .. } => {
            let png = thumbnail::normalized_thumbnail(&bytes, *rotation)?;
            Ok(DecodeProduct::Thumbnail {
                data_url: encode_data_url(&png, "image/png"),
            })
        }
        _ => {
            let data_url = encode_data_url(&bytes, sniff_mime(&bytes));
            let (texture, width, height) = decode_texture(&bytes)?;
            Ok(DecodeProduct::Raster {
                texture,
                width,
                height,
                data_url,
            })
        }
    }
}

/// Decode image bytes into a GPU texture
pub fn decode_texture(bytes: &[u8]) -> Result<(Texture2D, u32, u32), String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {}", e))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let texture = Texture2D::from_rgba8(width as u16, height as u16, &rgba.into_raw());
    texture.set_filter(FilterMode::Linear);
    Ok((texture, width, height))
}

/// Resolve an image reference to raw bytes.
///
/// Supports `data:` URLs, `http(s)://` URLs (native only), and plain
/// filesystem paths.
pub fn fetch_bytes(reference: &str) -> Result<Vec<u8>, String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err("Empty image reference".to_string());
    }
    if reference.starts_with("data:") {
        return decode_data_url(reference);
    }
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return fetch_http(reference);
    }
    let path = reference.strip_prefix("file://").unwrap_or(reference);
    std::fs::read(path).map_err(|e| format!("Failed to read {}: {}", path, e))
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_http(url: &str) -> Result<Vec<u8>, String> {
    use std::io::Read;

    let response = ureq::get(url)
        .call()
        .map_err(|e| format!("Failed to fetch {}: {}", url, e))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| format!("Failed to read response body: {}", e))?;
    Ok(bytes)
}

#[cfg(target_arch = "wasm32")]
fn fetch_http(url: &str) -> Result<Vec<u8>, String> {
    Err(format!("URL fetch is not available on this platform: {}", url))
}

/// Encode bytes as a base64 data URL
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, encoded)
}

/// Decode the payload of a base64 data URL
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, String> {
    let payload = url
        .split_once("base64,")
        .map(|(_, payload)| payload)
        .ok_or_else(|| "Not a base64 data URL".to_string())?;
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("Invalid base64 payload: {}", e))
}

/// Best-effort MIME sniff from magic bytes, for data URL headers
fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8]) {
        "image/jpeg"
    } else if bytes.starts_with(b"BM") {
        "image/bmp"
    } else {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_round_trip() {
        let bytes = vec![0x89, b'P', b'N', b'G', 1, 2, 3, 4];
        let url = encode_data_url(&bytes, "image/png");
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&url).unwrap(), bytes);
    }

    #[test]
    fn test_decode_data_url_rejects_non_data() {
        assert!(decode_data_url("https://example.com/a.png").is_err());
        assert!(decode_data_url("data:image/png;base64,!!!").is_err());
    }

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(&[0x89, b'P', b'N', b'G', 0]), "image/png");
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF]), "image/jpeg");
        assert_eq!(sniff_mime(b"BM1234"), "image/bmp");
    }

    #[test]
    fn test_stale_project_tags_do_not_match() {
        let target = DecodeTarget::FloorPlan {
            project_id: Some("1700000000000".to_string()),
            from_upload: false,
        };
        assert!(target.matches(Some("1700000000000"), 0));
        assert!(!target.matches(Some("1700000000001"), 0));
        assert!(!target.matches(None, 0));

        let drop = DecodeTarget::DroppedItem {
            project_id: None,
            template: FurnitureTemplate {
                name: "Piano".into(),
                width: 1.5,
                depth: 0.6,
                image: None,
            },
            x: 10.0,
            y: 20.0,
        };
        assert!(drop.matches(None, 0));
        assert!(!drop.matches(Some("1700000000000"), 0));
    }

    #[test]
    fn test_stale_form_generation_does_not_match() {
        let target = DecodeTarget::CustomThumbnail {
            generation: 3,
            name: "Piano".into(),
            width: 1.5,
            depth: 0.6,
            rotation: 45.0,
        };
        assert!(target.matches(None, 3));
        assert!(!target.matches(None, 4));
    }

    #[test]
    fn test_fetch_bytes_data_url() {
        let url = encode_data_url(&[1, 2, 3], "image/png");
        assert_eq!(fetch_bytes(&url).unwrap(), vec![1, 2, 3]);
        assert!(fetch_bytes("").is_err());
    }
}
