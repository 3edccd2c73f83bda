//! Planar floating point image buffers used between pipeline stages.
//!
//! Rows are stored contiguously without padding, so a plane can be split
//! into row chunks for parallel processing.

use imgref::ImgRef;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rgb::RGB;

/// Single-channel floating point image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageF {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl ImageF {
    /// Creates a new image filled with zeros.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Creates an image filled with a constant value.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Creates an image from existing row-major data.
    ///
    /// # Panics
    /// Panics if data length doesn't match width * height.
    #[cfg(any(test, feature = "internals"))]
    #[must_use]
    pub fn from_vec(data: Vec<f32>, width: usize, height: usize) -> Self {
        assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Image width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns a reference to a row.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Returns a mutable reference to a row.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    /// Gets a pixel value.
    #[cfg(any(test, feature = "internals"))]
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Sets a pixel value.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    /// Returns the raw row-major data.
    #[cfg(any(test, feature = "internals"))]
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the raw row-major data mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Checks if two images have the same dimensions.
    #[must_use]
    pub fn same_size(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Calls `f(y, row)` for every row; rows run in parallel with the
    /// `parallel` feature.
    pub fn for_each_row_mut<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut [f32]) + Sync + Send,
    {
        let width = self.width;
        if width == 0 {
            return;
        }

        #[cfg(feature = "parallel")]
        self.data
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));

        #[cfg(not(feature = "parallel"))]
        self.data
            .chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
}

/// Three-channel floating point image (R, G, B planes).
#[derive(Debug, Clone, PartialEq)]
pub struct Image3F {
    planes: [ImageF; 3],
}

impl Image3F {
    /// Creates a new zeroed 3-channel image.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            planes: [
                ImageF::new(width, height),
                ImageF::new(width, height),
                ImageF::new(width, height),
            ],
        }
    }

    /// Creates from three separate planes.
    ///
    /// # Panics
    /// Panics if the planes differ in size.
    #[must_use]
    pub fn from_planes(plane0: ImageF, plane1: ImageF, plane2: ImageF) -> Self {
        assert!(plane0.same_size(&plane1));
        assert!(plane0.same_size(&plane2));
        Self {
            planes: [plane0, plane1, plane2],
        }
    }

    /// Splits an interleaved RGB image into planes, honouring its stride.
    #[must_use]
    pub fn from_imgref(img: ImgRef<'_, RGB<f32>>) -> Self {
        let (width, height) = (img.width(), img.height());
        let mut out = Self::new(width, height);
        for (y, row) in img.rows().enumerate() {
            for (x, px) in row.iter().enumerate() {
                out.planes[0].set(x, y, px.r);
                out.planes[1].set(x, y, px.g);
                out.planes[2].set(x, y, px.b);
            }
        }
        out
    }

    /// Image width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.planes[0].width()
    }

    /// Image height.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.planes[0].height()
    }

    /// Returns a reference to a specific plane.
    #[inline]
    #[must_use]
    pub fn plane(&self, index: usize) -> &ImageF {
        &self.planes[index]
    }

    /// Returns a mutable reference to a specific plane.
    #[cfg(any(test, feature = "internals"))]
    #[inline]
    pub fn plane_mut(&mut self, index: usize) -> &mut ImageF {
        &mut self.planes[index]
    }
}
