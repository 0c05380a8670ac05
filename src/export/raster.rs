use std::fmt;

use crate::error::{PlotError, PlotResult};

/// Rendered image in Cairo's ARGB32 layout: premultiplied alpha, one
/// native-endian `u32` per pixel, rows `stride` bytes apart.
#[derive(Clone, PartialEq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    stride: usize,
    resolution: f64,
    data: Vec<u8>,
}

impl RasterImage {
    pub fn new(
        width: u32,
        height: u32,
        stride: usize,
        resolution: f64,
        data: Vec<u8>,
    ) -> PlotResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlotError::InvalidViewport { width, height });
        }
        let min_stride = (width as usize).checked_mul(4).ok_or_else(|| {
            PlotError::InvalidData(format!("width {width} overflows the row size"))
        })?;
        if stride < min_stride {
            return Err(PlotError::InvalidData(format!(
                "stride {stride} is too small for width {width}"
            )));
        }
        let expected = stride.checked_mul(height as usize).ok_or_else(|| {
            PlotError::InvalidData(format!(
                "image of {height} rows of {stride} bytes overflows the address space"
            ))
        })?;
        if data.len() < expected {
            return Err(PlotError::InvalidData(format!(
                "pixel buffer holds {} bytes, expected at least {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            resolution,
            data,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Dots per inch the image was rendered at.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied `0xAARRGGBB` value of one pixel.
    #[must_use]
    pub fn pixel_argb(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride + x as usize * 4;
        let bytes: [u8; 4] = self.data.get(offset..offset + 4)?.try_into().ok()?;
        Some(u32::from_ne_bytes(bytes))
    }

    #[cfg(feature = "cairo-backend")]
    fn to_surface(&self) -> PlotResult<cairo::ImageSurface> {
        let width = i32::try_from(self.width).map_err(|_| PlotError::InvalidViewport {
            width: self.width,
            height: self.height,
        })?;
        let height = i32::try_from(self.height).map_err(|_| PlotError::InvalidViewport {
            width: self.width,
            height: self.height,
        })?;
        let stride = i32::try_from(self.stride)
            .map_err(|_| PlotError::InvalidData("image stride overflows i32".to_owned()))?;
        cairo::ImageSurface::create_for_data(
            self.data.clone(),
            cairo::Format::ARgb32,
            width,
            height,
            stride,
        )
        .map_err(|err| PlotError::Export(format!("failed to wrap image data: {err}")))
    }

    /// Writes the image as PNG.
    #[cfg(feature = "cairo-backend")]
    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> PlotResult<()> {
        self.to_surface()?
            .write_to_png(writer)
            .map_err(|err| PlotError::Export(format!("failed to encode png: {err}")))
    }

    #[cfg(feature = "cairo-backend")]
    pub fn encode_png(&self) -> PlotResult<Vec<u8>> {
        let mut encoded = Vec::new();
        self.write_png(&mut encoded)?;
        Ok(encoded)
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("resolution", &self.resolution)
            .field("bytes", &self.data.len())
            .finish()
    }
}
