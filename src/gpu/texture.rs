//! Gradient map textures for toon shading.
//!
//! A [`GradientMap`] is a 1-row lookup texture: the shader samples it at
//! the diffuse light term with a nearest sampler, so every texel becomes
//! one flat tone. A procedural three-tone ramp is uploaded at startup; the
//! configured image is decoded off the main thread by a [`GradientLoader`]
//! and swapped in once it arrives.

use std::sync::mpsc;

use super::pipeline_helpers::nearest_sampler;
use crate::error::SceneError;

/// Decoded RGBA8 gradient image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientImage {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Tightly packed RGBA8 rows.
    pub pixels: Vec<u8>,
}

impl GradientImage {
    /// One texel per tone, grey levels given in `tones`.
    #[must_use]
    pub fn from_tones(tones: &[u8]) -> Self {
        let pixels = tones.iter().flat_map(|&t| [t, t, t, 255]).collect();
        Self {
            width: tones.len().max(1) as u32,
            height: 1,
            pixels,
        }
    }

    /// The default three-tone ramp (shadow, mid, lit).
    #[must_use]
    pub fn three_tone() -> Self {
        Self::from_tones(&[0, 128, 255])
    }

    /// Decode a PNG or JPEG file held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Texture`] if the bytes are not a supported
    /// image.
    pub fn decode(bytes: &[u8]) -> Result<Self, SceneError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}

/// GPU gradient texture plus its nearest sampler.
pub struct GradientMap {
    /// The texture holding the gradient.
    pub texture: wgpu::Texture,
    /// Full view for binding.
    pub view: wgpu::TextureView,
    /// Nearest, clamp-to-edge sampler.
    pub sampler: wgpu::Sampler,
}

impl GradientMap {
    /// Upload `image` as a new gradient texture.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &GradientImage,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Gradient Map"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.width * 4),
                rows_per_image: Some(image.height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = nearest_sampler(device, "Gradient Sampler");
        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// Loads a gradient image in the background.
///
/// Native builds read and decode the file on a worker thread; wasm builds
/// fetch it over HTTP on the browser's event loop. Either way the result
/// is delivered through a channel polled with [`try_recv`](Self::try_recv).
pub struct GradientLoader {
    path: String,
    result_rx: mpsc::Receiver<Result<GradientImage, SceneError>>,
    #[cfg(not(target_arch = "wasm32"))]
    thread: Option<std::thread::JoinHandle<()>>,
}

impl GradientLoader {
    /// Start loading `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ThreadSpawn`] if the worker thread cannot be
    /// started.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn(path: &str) -> Result<Self, SceneError> {
        let (result_tx, result_rx) = mpsc::channel();
        let worker_path = path.to_owned();
        let thread = std::thread::Builder::new()
            .name("gradient-loader".into())
            .spawn(move || {
                let result = std::fs::read(&worker_path)
                    .map_err(SceneError::from)
                    .and_then(|bytes| GradientImage::decode(&bytes));
                let _ = result_tx.send(result);
            })
            .map_err(SceneError::ThreadSpawn)?;
        Ok(Self {
            path: path.to_owned(),
            result_rx,
            thread: Some(thread),
        })
    }

    /// Start fetching `path` relative to the page.
    ///
    /// # Errors
    ///
    /// Never fails on wasm; the signature matches the native loader.
    #[cfg(target_arch = "wasm32")]
    pub fn spawn(path: &str) -> Result<Self, SceneError> {
        let (result_tx, result_rx) = mpsc::channel();
        let url = path.to_owned();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_bytes(&url)
                .await
                .and_then(|bytes| GradientImage::decode(&bytes));
            let _ = result_tx.send(result);
        });
        Ok(Self {
            path: path.to_owned(),
            result_rx,
        })
    }

    /// Path or URL being loaded.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Non-blocking check for the finished load.
    ///
    /// Returns `Some` exactly once; afterwards the loader is spent.
    pub fn try_recv(&mut self) -> Option<Result<GradientImage, SceneError>> {
        let result = self.result_rx.try_recv().ok()?;
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(handle) = self.thread.take() {
                let _ = handle.join();
            }
        }
        Some(result)
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_bytes(url: &str) -> Result<Vec<u8>, SceneError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let web_err = |e: wasm_bindgen::JsValue| SceneError::Web(format!("{e:?}"));
    let window = web_sys::window()
        .ok_or_else(|| SceneError::Web("no window".to_owned()))?;
    let response: web_sys::Response =
        JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(web_err)?
            .dyn_into()
            .map_err(web_err)?;
    if !response.ok() {
        return Err(SceneError::Texture(format!(
            "{url}: HTTP {}",
            response.status()
        )));
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(web_err)?)
        .await
        .map_err(web_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_tone_ramp_layout() {
        let image = GradientImage::three_tone();
        assert_eq!((image.width, image.height), (3, 1));
        assert_eq!(
            image.pixels,
            [0, 0, 0, 255, 128, 128, 128, 255, 255, 255, 255, 255]
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = GradientImage::decode(b"not an image").unwrap_err();
        assert!(matches!(err, SceneError::Texture(_)));
    }

    #[test]
    fn decode_reads_png() {
        let mut bytes = Vec::new();
        let source = image::RgbaImage::from_raw(
            2,
            1,
            vec![10, 10, 10, 255, 200, 200, 200, 255],
        )
        .unwrap();
        source
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        let image = GradientImage::decode(&bytes).unwrap();
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(image.pixels[4], 200);
    }

    #[test]
    fn missing_file_reports_io_error() {
        let mut loader =
            GradientLoader::spawn("/nonexistent/gradient.png").unwrap();
        let result = loop {
            if let Some(result) = loader.try_recv() {
                break result;
            }
            std::thread::yield_now();
        };
        assert!(matches!(result, Err(SceneError::Io(_))));
        assert_eq!(loader.path(), "/nonexistent/gradient.png");
        assert!(loader.try_recv().is_none());
    }
}
