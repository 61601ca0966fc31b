//! Webcam hand tracking with an `ONNX` hand landmark model.
//!
//! The mirrored camera frame is split into a left and a right half; each half
//! is letterboxed to a square and run through the landmark model. Detections
//! are relabelled Left/Right from the model's handedness score and mapped
//! back to full-frame normalized coordinates.

use crate::{
    config::{CameraConfig, ModelConfig},
    constants::{HAND_MODEL_INPUT_SIZE, NUM_HAND_LANDMARKS},
    landmarks::{HandSample, HandSide, Landmark, LandmarkSource},
    utils::{image_conversion::bgr_to_nhwc_tensor, square_padding},
    Error, Result,
};
use log::{debug, info, warn};
use ndarray::{Array4, CowArray};
use opencv::{
    core::{self, Mat, Rect, Scalar, BORDER_CONSTANT},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// `cv::CAP_PROP_READ_TIMEOUT_MSEC`
const CAP_PROP_READ_TIMEOUT_MSEC: i32 = 54;

/// Values per landmark in the model output (x, y, z)
const COORDS_PER_LANDMARK: usize = 3;

/// A hand found in one image region
#[derive(Debug, Clone)]
pub struct HandDetection {
    /// Side from the handedness score
    pub side: HandSide,
    /// Landmarks in pixels of the analysed image
    pub landmarks: Vec<Landmark>,
    /// Hand presence score
    pub presence: f32,
}

/// Hand landmark detector using `ONNX` Runtime
pub struct HandLandmarkDetector {
    session: Session,
    input_size: i32,
    presence_threshold: f32,
}

impl HandLandmarkDetector {
    /// Create a detector from an `ONNX` model file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ONNX model file cannot be loaded
    /// - The model has no inputs or fewer than three outputs
    /// - The ONNX runtime environment cannot be created
    pub fn new<P: AsRef<Path>>(model_path: P, presence_threshold: f32) -> Result<Self> {
        info!(
            "Initializing HandLandmarkDetector with model: {}",
            model_path.as_ref().display()
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("hand_landmarks")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        if session.inputs.is_empty() {
            return Err(Error::ModelInputError("Model has no inputs".to_string()));
        }
        if session.outputs.len() < 3 {
            return Err(Error::ModelOutputError(format!(
                "Expected landmark, presence and handedness outputs, model has {}",
                session.outputs.len()
            )));
        }

        Ok(Self {
            session,
            input_size: HAND_MODEL_INPUT_SIZE,
            presence_threshold,
        })
    }

    /// Detect at most one hand in a square image
    ///
    /// # Errors
    ///
    /// Returns an error if preprocessing, inference or output parsing fails
    pub fn detect(&self, image: &Mat) -> Result<Option<HandDetection>> {
        #[allow(clippy::cast_sign_loss)] // Model input size is positive
        let input = bgr_to_nhwc_tensor(image, self.input_size as usize)?;
        let outputs = self.forward(input)?;
        self.postprocess(&outputs, image)
    }

    /// Run the model and flatten every output tensor
    fn forward(&self, input: Array4<f32>) -> Result<Vec<Vec<f32>>> {
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;

        outputs
            .into_iter()
            .map(|output| {
                let tensor = output.try_extract::<f32>()?;
                let values = tensor.view().iter().copied().collect();
                Ok(values)
            })
            .collect()
    }

    /// Pick the landmark and score tensors by size and scale to image pixels
    #[allow(clippy::cast_precision_loss)] // Pixel coordinates
    fn postprocess(&self, outputs: &[Vec<f32>], image: &Mat) -> Result<Option<HandDetection>> {
        let expected = NUM_HAND_LANDMARKS * COORDS_PER_LANDMARK;
        let marks = outputs
            .iter()
            .find(|o| o.len() >= expected)
            .ok_or_else(|| Error::ModelOutputError(format!("No output with {expected} landmark values")))?;
        let mut scores = outputs.iter().filter(|o| o.len() == 1).map(|o| o[0]);
        let presence = scores
            .next()
            .ok_or_else(|| Error::ModelOutputError("Missing hand presence score".to_string()))?;
        let handedness = scores
            .next()
            .ok_or_else(|| Error::ModelOutputError("Missing handedness score".to_string()))?;

        if presence < self.presence_threshold {
            return Ok(None);
        }

        let scale_x = image.cols() as f32 / self.input_size as f32;
        let scale_y = image.rows() as f32 / self.input_size as f32;
        let landmarks = marks[..expected]
            .chunks_exact(COORDS_PER_LANDMARK)
            .map(|c| Landmark::new(c[0] * scale_x, c[1] * scale_y, c[2] / self.input_size as f32))
            .collect();

        let side = if handedness > 0.5 { HandSide::Right } else { HandSide::Left };
        debug!("Hand detected: {side:?} presence {presence:.2} handedness {handedness:.2}");

        Ok(Some(HandDetection {
            side,
            landmarks,
            presence,
        }))
    }
}

/// Landmark source reading from a webcam
pub struct CameraHandSource {
    capture: VideoCapture,
    detector: HandLandmarkDetector,
    mirror: bool,
    read_timeout: Duration,
    name: String,
}

impl CameraHandSource {
    /// Open the camera and load the landmark model
    ///
    /// # Errors
    ///
    /// Returns an error if the camera cannot be opened or the model cannot be loaded
    pub fn new(camera: &CameraConfig, model: &ModelConfig) -> Result<Self> {
        info!("Opening camera {}", camera.index);
        let mut capture = VideoCapture::new(camera.index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(Error::Camera(format!("Camera {} could not be opened", camera.index)));
        }

        capture.set(CAP_PROP_FRAME_WIDTH, f64::from(camera.width))?;
        capture.set(CAP_PROP_FRAME_HEIGHT, f64::from(camera.height))?;
        // Reduce buffer size for lower latency
        capture.set(CAP_PROP_BUFFERSIZE, 1.0)?;
        #[allow(clippy::cast_precision_loss)] // Millisecond timeouts are small
        let timeout_applied = capture.set(CAP_PROP_READ_TIMEOUT_MSEC, camera.read_timeout_ms as f64)?;
        if !timeout_applied {
            debug!("Capture backend ignores read timeout; checking frame latency instead");
        }

        let detector = HandLandmarkDetector::new(&model.hand_landmarks, model.presence_threshold)?;

        Ok(Self {
            capture,
            detector,
            mirror: camera.mirror,
            read_timeout: Duration::from_millis(camera.read_timeout_ms),
            name: format!("camera {}", camera.index),
        })
    }

    fn grab_frame(&mut self) -> Result<Mat> {
        let started = Instant::now();
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Err(Error::Camera(format!("{} returned no frame", self.name)));
        }
        let latency = started.elapsed();
        if latency > self.read_timeout {
            return Err(Error::Camera(format!(
                "{} took {} ms to deliver a frame",
                self.name,
                latency.as_millis()
            )));
        }

        if self.mirror {
            let mut mirrored = Mat::default();
            core::flip(&frame, &mut mirrored, 1)?;
            frame = mirrored;
        }
        Ok(frame)
    }

    /// Detect a hand inside one region of the frame
    #[allow(clippy::cast_precision_loss)] // Pixel coordinates
    fn detect_region(&self, frame: &Mat, region: Rect) -> Result<Option<HandSample>> {
        let roi = Mat::roi(frame, region)?.try_clone()?;
        let (top, bottom, left, right) = square_padding(region.width, region.height);

        let mut square = Mat::default();
        core::copy_make_border(
            &roi,
            &mut square,
            top,
            bottom,
            left,
            right,
            BORDER_CONSTANT,
            Scalar::default(),
        )?;

        let Some(detection) = self.detector.detect(&square)? else {
            return Ok(None);
        };

        let frame_w = frame.cols() as f32;
        let frame_h = frame.rows() as f32;
        let landmarks: Vec<Landmark> = detection
            .landmarks
            .iter()
            .map(|lm| {
                Landmark::new(
                    (lm.x - left as f32 + region.x as f32) / frame_w,
                    (lm.y - top as f32 + region.y as f32) / frame_h,
                    lm.z,
                )
            })
            .collect();

        HandSample::from_slice(detection.side, &landmarks).map(Some)
    }
}

impl LandmarkSource for CameraHandSource {
    fn sample(&mut self) -> Result<Option<Vec<HandSample>>> {
        let frame = self.grab_frame()?;
        let width = frame.cols();
        let height = frame.rows();
        let half = width / 2;

        let regions = [Rect::new(0, 0, half, height), Rect::new(half, 0, width - half, height)];
        let mut samples = Vec::with_capacity(regions.len());
        for region in regions {
            if let Some(sample) = self.detect_region(&frame, region)? {
                samples.push(sample);
            }
        }
        Ok(Some(samples))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for CameraHandSource {
    fn drop(&mut self) {
        match self.capture.release() {
            Ok(()) => info!("Released {}", self.name),
            Err(e) => warn!("Failed to release {}: {e}", self.name),
        }
    }
}
