// src/integrations/photo/client.rs
//
// Photo host access for the export pipeline
//
// This is INFRASTRUCTURE, not DOMAIN: it fetches evidence photos from the
// image host and converts them to thumbnail-sized buffers. Which cell a
// photo lands in is decided elsewhere (domain::export::layout).

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use reqwest::Client;

use crate::domain::export::{IMAGE_HEIGHT_PX, IMAGE_WIDTH_PX};
use crate::error::AppResult;

/// Fetch-and-convert seam of the export pipeline.
/// Mocked in service tests so exports run without an image host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoFetcher: Send + Sync {
    /// Fetch a photo URI and return thumbnail-sized image bytes,
    /// ready for workbook embedding
    async fn fetch_thumbnail(&self, uri: &str) -> AppResult<Vec<u8>>;
}

/// Recompression settings.
///
/// Bounded dimensions and quality keep the generated workbook small even
/// when the host serves full-resolution survey photos.
#[derive(Debug, Clone)]
pub struct PhotoClientConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub jpeg_quality: u8,
    pub timeout: Duration,
}

impl Default for PhotoClientConfig {
    fn default() -> Self {
        Self {
            max_width: IMAGE_WIDTH_PX,
            max_height: IMAGE_HEIGHT_PX,
            jpeg_quality: 75,
            timeout: Duration::from_secs(20),
        }
    }
}

pub struct HttpPhotoClient {
    http_client: Client,
    config: PhotoClientConfig,
}

impl HttpPhotoClient {
    pub fn new(config: PhotoClientConfig) -> AppResult<Self> {
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Decode, resize within the configured bounds (aspect ratio kept),
    /// and re-encode as JPEG
    fn recompress(&self, bytes: &[u8]) -> AppResult<Vec<u8>> {
        let decoded = image::load_from_memory(bytes)?;
        let thumbnail = decoded.thumbnail(self.config.max_width, self.config.max_height);

        let mut output = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut output, self.config.jpeg_quality);
        thumbnail.write_with_encoder(encoder)?;

        Ok(output.into_inner())
    }
}

#[async_trait]
impl PhotoFetcher for HttpPhotoClient {
    async fn fetch_thumbnail(&self, uri: &str) -> AppResult<Vec<u8>> {
        let response = self.http_client.get(uri).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        self.recompress(&bytes)
    }
}
