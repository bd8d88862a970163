//! Image loading, caching, and terminal rendering for cards and avatars.
//!
//! The carousel never waits on images: downloads run on tokio tasks, results
//! come back over a channel, and until a card's image is ready the widget
//! draws a placeholder tile. Failures are recorded per URL and rendered as a
//! placeholder; there are no retries.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use image::DynamicImage;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

/// Cross-fade duration applied when an image finishes loading
pub const CROSS_FADE: Duration = Duration::from_millis(300);

/// Get the global image picker instance with automatic protocol detection
pub fn get_image_picker() -> &'static Picker {
    static PICKER: OnceLock<Picker> = OnceLock::new();
    PICKER.get_or_init(|| {
        // Query terminal capabilities for the best protocol, fall back to
        // halfblocks if the query fails
        Picker::from_query_stdio().unwrap_or_else(|_| Picker::from_fontsize((8, 16)))
    })
}

/// A decoded image with its terminal render state
pub struct CachedImage {
    /// The decoded image, already cover-cropped to the card aspect
    pub image: DynamicImage,
    /// Protocol-specific render state, built lazily on first draw
    protocol: Option<StatefulProtocol>,
    /// When the image became available, for the cross-fade reveal
    loaded_at: Instant,
}

impl CachedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            protocol: None,
            loaded_at: Instant::now(),
        }
    }

    /// Get the render protocol, building it on first use
    ///
    /// Protocol creation needs a mutable picker, so the probed global is
    /// copied per image; the terminal query itself still runs only once.
    pub fn protocol(&mut self) -> &mut StatefulProtocol {
        if self.protocol.is_none() {
            let mut picker = get_image_picker().clone();
            self.protocol = Some(picker.new_resize_protocol(self.image.clone()));
        }
        self.protocol.as_mut().expect("protocol just initialized")
    }

    /// Cross-fade progress in [0, 1] since the image loaded
    pub fn reveal(&self, now: Instant) -> f64 {
        let elapsed = now.duration_since(self.loaded_at);
        if elapsed >= CROSS_FADE {
            1.0
        } else {
            elapsed.as_secs_f64() / CROSS_FADE.as_secs_f64()
        }
    }
}

/// Image loading state
pub enum ImageState {
    /// Image is being downloaded
    Loading,
    /// Image loaded successfully
    Loaded(CachedImage),
    /// Image failed to load
    Failed(String),
}

/// Local disk cache for downloaded images
pub struct ImageDiskCache {
    cache_dir: PathBuf,
}

impl ImageDiskCache {
    pub fn new(data_dir: &Path) -> std::io::Result<Self> {
        let cache_dir = data_dir.join("image_cache");
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    /// Generate a cache filename from URL
    fn url_to_filename(url: &str) -> String {
        let mut hasher = DefaultHasher::new();
        url.hash(&mut hasher);
        let hash = hasher.finish();

        let ext = url
            .rsplit('.')
            .next()
            .and_then(|e| {
                let e = e.split('?').next().unwrap_or(e);
                if ["jpg", "jpeg", "png", "gif", "webp"].contains(&e.to_lowercase().as_str()) {
                    Some(e.to_lowercase())
                } else {
                    None
                }
            })
            .unwrap_or_else(|| "bin".to_string());

        format!("{:016x}.{}", hash, ext)
    }

    /// Get the cache path for a URL
    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(Self::url_to_filename(url))
    }

    /// Check if an image is cached
    pub fn is_cached(&self, url: &str) -> bool {
        self.cache_path(url).exists()
    }

    /// Load an image from the disk cache
    pub fn load(&self, url: &str) -> Option<DynamicImage> {
        let path = self.cache_path(url);
        if path.exists() {
            image::open(&path).ok()
        } else {
            None
        }
    }

    /// Save raw image bytes to the disk cache
    pub fn save(&self, url: &str, data: &[u8]) -> std::io::Result<()> {
        std::fs::write(self.cache_path(url), data)
    }
}

/// In-memory image cache for the deck (cards and avatars)
pub struct DeckImageCache {
    /// Image states keyed by URL
    images: HashMap<String, ImageState>,
    disk_cache: Option<ImageDiskCache>,
}

impl DeckImageCache {
    pub fn new(data_dir: Option<&PathBuf>) -> Self {
        let disk_cache = data_dir.and_then(|d| ImageDiskCache::new(d).ok());
        Self {
            images: HashMap::new(),
            disk_cache,
        }
    }

    /// Check if an image is ready
    pub fn is_ready(&self, url: &str) -> bool {
        matches!(self.images.get(url), Some(ImageState::Loaded(_)))
    }

    /// Check if an image is loading
    pub fn is_loading(&self, url: &str) -> bool {
        matches!(self.images.get(url), Some(ImageState::Loading))
    }

    /// Check if a load already failed
    pub fn is_failed(&self, url: &str) -> bool {
        matches!(self.images.get(url), Some(ImageState::Failed(_)))
    }

    /// Get a mutable loaded image for rendering
    pub fn get_mut(&mut self, url: &str) -> Option<&mut CachedImage> {
        match self.images.get_mut(url) {
            Some(ImageState::Loaded(data)) => Some(data),
            _ => None,
        }
    }

    /// Mark an image as loading
    pub fn start_loading(&mut self, url: &str) {
        self.images
            .entry(url.to_string())
            .or_insert(ImageState::Loading);
    }

    /// Set image as loaded
    pub fn set_loaded(&mut self, url: &str, image: DynamicImage) {
        self.images
            .insert(url.to_string(), ImageState::Loaded(CachedImage::new(image)));
    }

    /// Set image as failed
    pub fn set_failed(&mut self, url: &str, error: String) {
        self.images.insert(url.to_string(), ImageState::Failed(error));
    }

    /// Try to satisfy a URL from the disk cache
    pub fn try_load_from_disk(&mut self, url: &str) -> bool {
        if let Some(ref disk) = self.disk_cache {
            if let Some(img) = disk.load(url) {
                let img = cover_crop_square(&img);
                self.images
                    .insert(url.to_string(), ImageState::Loaded(CachedImage::new(img)));
                return true;
            }
        }
        false
    }

    /// Save raw bytes to the disk cache
    pub fn save_to_disk(&self, url: &str, data: &[u8]) {
        if let Some(ref disk) = self.disk_cache {
            if let Err(e) = disk.save(url, data) {
                tracing::debug!("Failed to cache image {}: {}", url, e);
            }
        }
    }

    /// Get loading status message for placeholder tiles
    pub fn status(&self, url: &str) -> Option<String> {
        match self.images.get(url) {
            Some(ImageState::Loading) => Some("Loading…".to_string()),
            Some(ImageState::Failed(err)) => Some(format!("Failed: {}", err)),
            _ => None,
        }
    }
}

/// Center-crop an image to a square, the card aspect
///
/// The cards render as squares, so cropping to the shorter edge at load time
/// gives "cover" fit once the terminal protocol scales it to the tile.
pub fn cover_crop_square(image: &DynamicImage) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    if w == h {
        return image.clone();
    }
    let side = w.min(h);
    let x = (w - side) / 2;
    let y = (h - side) / 2;
    image.crop_imm(x, y, side, side)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("swipedeck/0.1")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Download and decode an image, cover-cropped for card display
pub async fn download_image(url: &str) -> Result<(Vec<u8>, DynamicImage), String> {
    let response = http_client()
        .get(url)
        .header(reqwest::header::ACCEPT, "image/png,image/jpeg,image/*;q=0.8")
        .send()
        .await
        .map_err(|e| format!("request failed: {}", e))?
        .error_for_status()
        .map_err(|e| format!("bad status: {}", e))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("read failed: {}", e))?;

    let image = decode_image_bytes(&bytes)?;
    Ok((bytes.to_vec(), image))
}

/// Decode raw bytes and apply the card crop
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, String> {
    let image =
        image::load_from_memory(bytes).map_err(|e| format!("decode failed: {}", e))?;
    Ok(cover_crop_square(&image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_to_filename_is_stable() {
        let a = ImageDiskCache::url_to_filename("https://example.com/photo.jpg");
        let b = ImageDiskCache::url_to_filename("https://example.com/photo.jpg");
        assert_eq!(a, b);
        assert!(a.ends_with(".jpg"));
    }

    #[test]
    fn test_url_to_filename_extension_fallback() {
        let name = ImageDiskCache::url_to_filename("https://example.com/photo");
        assert!(name.ends_with(".bin"));

        let query = ImageDiskCache::url_to_filename("https://example.com/a.png?w=800");
        assert!(query.ends_with(".png"));
    }

    #[test]
    fn test_cover_crop_square() {
        let wide = DynamicImage::new_rgb8(400, 200);
        let cropped = cover_crop_square(&wide);
        assert_eq!((cropped.width(), cropped.height()), (200, 200));

        let tall = DynamicImage::new_rgb8(100, 300);
        let cropped = cover_crop_square(&tall);
        assert_eq!((cropped.width(), cropped.height()), (100, 100));
    }

    #[test]
    fn test_cache_state_transitions() {
        let mut cache = DeckImageCache::new(None);
        let url = "https://example.com/a.jpg";

        assert!(!cache.is_ready(url));
        cache.start_loading(url);
        assert!(cache.is_loading(url));

        cache.set_loaded(url, DynamicImage::new_rgb8(4, 4));
        assert!(cache.is_ready(url));
        assert!(cache.get_mut(url).is_some());

        cache.set_failed(url, "boom".to_string());
        assert!(cache.is_failed(url));
        assert!(cache.status(url).unwrap().contains("boom"));
    }

    #[test]
    fn test_start_loading_does_not_clobber_loaded() {
        let mut cache = DeckImageCache::new(None);
        let url = "https://example.com/a.jpg";
        cache.set_loaded(url, DynamicImage::new_rgb8(4, 4));
        cache.start_loading(url);
        assert!(cache.is_ready(url));
    }

    #[test]
    fn test_reveal_ramp() {
        let cached = CachedImage::new(DynamicImage::new_rgb8(4, 4));
        let start = cached.loaded_at;
        assert!(cached.reveal(start) < 1e-9);
        assert!((cached.reveal(start + CROSS_FADE) - 1.0).abs() < 1e-9);
        let half = cached.reveal(start + CROSS_FADE / 2);
        assert!(half > 0.4 && half < 0.6);
    }
}
