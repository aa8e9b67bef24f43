//! Raster surface the annotations are painted onto, plus pixel snapshots.

use thiserror::Error;

/// Errors that can occur while allocating or copying raster buffers.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),
}

/// Full-screen ARGB32 buffer exclusively owned by the engine.
///
/// Every mutation goes through a short-lived cairo context created per call,
/// so the buffer can be read back (for snapshots or host compositing) at any
/// point between operations.
pub struct Surface {
    image: cairo::ImageSurface,
}

/// An immutable copy of the surface pixels at one point in time.
pub struct Snapshot {
    image: cairo::ImageSurface,
}

fn create_image(width: i32, height: i32) -> Result<cairo::ImageSurface, SurfaceError> {
    if width <= 0 || height <= 0 {
        return Err(SurfaceError::InvalidSize { width, height });
    }
    Ok(cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        width,
        height,
    )?)
}

/// Copies the raw bytes of an image surface (row stride included).
fn read_bytes(image: &cairo::ImageSurface) -> Vec<u8> {
    let mut bytes = Vec::new();
    if let Err(err) = image.with_data(|data| bytes.extend_from_slice(data)) {
        log::warn!("Failed to read surface pixels: {err}");
    }
    bytes
}

impl Surface {
    /// Allocates a fully transparent surface.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        let image = create_image(width, height)?;
        log::debug!("Allocated {width}x{height} annotation surface");
        Ok(Self { image })
    }

    pub fn width(&self) -> i32 {
        self.image.width()
    }

    pub fn height(&self) -> i32 {
        self.image.height()
    }

    /// Backing image, for hosts that composite the surface onto a window.
    pub fn image(&self) -> &cairo::ImageSurface {
        &self.image
    }

    /// Runs `f` with a fresh cairo context targeting this surface.
    pub fn draw<F: FnOnce(&cairo::Context)>(&self, f: F) {
        match cairo::Context::new(&self.image) {
            Ok(ctx) => f(&ctx),
            Err(err) => log::error!("Failed to create drawing context: {err}"),
        }
    }

    /// Erases every pixel to transparent.
    pub fn clear(&self) {
        self.draw(|ctx| {
            ctx.set_operator(cairo::Operator::Clear);
            let _ = ctx.paint();
        });
    }

    /// Takes a full pixel copy of the current contents.
    pub fn snapshot(&self) -> Result<Snapshot, SurfaceError> {
        let image = create_image(self.width(), self.height())?;
        let ctx = cairo::Context::new(&image)?;
        ctx.set_source_surface(&self.image, 0.0, 0.0)?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.paint()?;
        drop(ctx);
        image.flush();
        Ok(Snapshot { image })
    }

    /// Replaces the contents with `snapshot`, anchored at the origin.
    ///
    /// Pixels the snapshot does not cover end up transparent.
    pub fn restore(&self, snapshot: &Snapshot) {
        self.draw(|ctx| {
            ctx.set_operator(cairo::Operator::Source);
            if ctx.set_source_surface(&snapshot.image, 0.0, 0.0).is_ok() {
                let _ = ctx.paint();
            }
        });
    }

    /// Resizes the backing buffer, keeping existing content at the origin.
    ///
    /// Content outside the new bounds is lost; newly exposed space is
    /// transparent. Returns `Ok(false)` when the size is unchanged.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<bool, SurfaceError> {
        if width == self.width() && height == self.height() {
            return Ok(false);
        }

        let preserved = self.snapshot()?;
        self.image = create_image(width, height)?;
        self.restore(&preserved);
        log::debug!("Resized annotation surface to {width}x{height}");
        Ok(true)
    }

    /// Raw ARGB32 bytes (native-endian, premultiplied, row stride included).
    pub fn pixels(&self) -> Vec<u8> {
        self.image.flush();
        read_bytes(&self.image)
    }

    /// Pixel at `(x, y)` as a native-endian ARGB32 word, if in bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        let stride = self.image.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;

        self.image.flush();
        let mut word = None;
        if let Err(err) = self.image.with_data(|data| {
            word = data
                .get(offset..offset + 4)
                .map(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]));
        }) {
            log::warn!("Failed to read surface pixel: {err}");
        }
        word
    }

    /// Alpha channel at `(x, y)`, if in bounds.
    pub fn alpha_at(&self, x: i32, y: i32) -> Option<u8> {
        self.pixel(x, y).map(|argb| (argb >> 24) as u8)
    }

    /// Counts pixels that are not fully transparent.
    pub fn painted_pixel_count(&self) -> usize {
        let width = self.width().max(0) as usize;
        let stride = self.image.stride() as usize;
        let bytes = self.pixels();

        bytes
            .chunks(stride.max(1))
            .map(|row| {
                row.chunks_exact(4)
                    .take(width)
                    .filter(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) >> 24 != 0)
                    .count()
            })
            .sum()
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.painted_pixel_count() == 0
    }
}

impl Snapshot {
    pub fn width(&self) -> i32 {
        self.image.width()
    }

    pub fn height(&self) -> i32 {
        self.image.height()
    }

    /// Raw ARGB32 bytes of the snapshot.
    pub fn pixels(&self) -> Vec<u8> {
        read_bytes(&self.image)
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
