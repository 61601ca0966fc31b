//! Conversions between OpenCV images and model tensors.

use crate::{utils::safe_cast::usize_to_i32, Error, Result};
use ndarray::Array4;
use opencv::core::{Mat, Size, Vec3f, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;

/// Resize a BGR image to `size` x `size` and pack it as a 1xHxWx3 RGB tensor
/// with values in `[0, 1]`
///
/// # Errors
///
/// Returns an error if the image is empty or an OpenCV operation fails
pub fn bgr_to_nhwc_tensor(image: &Mat, size: usize) -> Result<Array4<f32>> {
    if image.empty() || image.channels() != 3 {
        return Err(Error::InvalidInput(format!(
            "Expected a 3-channel image, got {}x{}x{}",
            image.rows(),
            image.cols(),
            image.channels()
        )));
    }

    let side = usize_to_i32(size)?;
    let mut resized = Mat::default();
    imgproc::resize(
        image,
        &mut resized,
        Size::new(side, side),
        0.0,
        0.0,
        InterpolationFlags::INTER_LINEAR as i32,
    )?;

    let mut rgb_image = Mat::default();
    imgproc::cvt_color(&resized, &mut rgb_image, imgproc::COLOR_BGR2RGB, 0)?;

    let mut float_image = Mat::default();
    rgb_image.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

    let channels = 3;
    let mut data = vec![0.0f32; size * size * channels];
    for row in 0..size {
        for col in 0..size {
            let pixel = float_image.at_2d::<Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
            let base = (row * size + col) * channels;
            data[base..base + channels].copy_from_slice(&pixel.0);
        }
    }

    Array4::from_shape_vec((1, size, size, channels), data)
        .map_err(|e| Error::ModelDataFormatError(format!("Failed to create array: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    #[test]
    fn test_tensor_shape_and_channel_order() {
        // Pure blue in BGR
        let image = Mat::new_rows_cols_with_default(10, 20, CV_8UC3, Scalar::new(255.0, 0.0, 0.0, 0.0)).unwrap();
        let tensor = bgr_to_nhwc_tensor(&image, 8).unwrap();
        assert_eq!(tensor.shape(), &[1, 8, 8, 3]);
        assert!((tensor[[0, 3, 3, 2]] - 1.0).abs() < 1e-6);
        assert!(tensor[[0, 3, 3, 0]].abs() < 1e-6);
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(bgr_to_nhwc_tensor(&Mat::default(), 8).is_err());
    }
}
