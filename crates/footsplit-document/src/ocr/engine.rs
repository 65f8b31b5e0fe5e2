// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR backend built on the `ocrs` crate, a pure-Rust OCR engine backed by
// neural network models executed via `rten`.
//
// # Model Setup
//
// The engine requires two model files:
//
// - **Detection model** (`text-detection.rten`) — locates text regions.
// - **Recognition model** (`text-recognition.rten`) — decodes characters from
//   detected regions.
//
// Running the `ocrs-cli` tool once downloads both:
//   ```sh
//   cargo install ocrs-cli
//   ocrs some-image.png  # downloads models to ~/.cache/ocrs/
//   ```
//
// The default cache directory is `$XDG_CACHE_HOME/ocrs` (typically `~/.cache/ocrs`).

use std::path::{Path, PathBuf};

use footsplit_core::error::{Result, SplitError};
use footsplit_core::{CharWhitelist, SegmentationMode};
use image::{DynamicImage, GrayImage};
use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

use super::{RecognitionRequest, TextRecognizer};

/// Default directory for cached OCR model files.
///
/// `$XDG_CACHE_HOME/ocrs`, falling back to `~/.cache/ocrs` when
/// `XDG_CACHE_HOME` is unset.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Where to find the OCR models.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub detection_model_path: PathBuf,
    pub recognition_model_path: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

impl OcrConfig {
    /// Expects the directory to contain `text-detection.rten` and
    /// `text-recognition.rten`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// The configured directory if given, else the default cache directory.
    pub fn from_optional_dir(dir: Option<&Path>) -> Self {
        dir.map_or_else(Self::default, Self::from_dir)
    }

    /// Verify that both model files exist.
    pub fn validate(&self) -> Result<()> {
        for (kind, path) in [
            ("detection", &self.detection_model_path),
            ("recognition", &self.recognition_model_path),
        ] {
            if !path.exists() {
                return Err(SplitError::Ocr(format!(
                    "{} model not found at {}; run `ocrs-cli` once to download models",
                    kind,
                    path.display()
                )));
            }
        }
        Ok(())
    }

    fn load_engine(&self, allowed_chars: Option<String>) -> Result<OcrsEngine> {
        let detection_model = Model::load_file(&self.detection_model_path).map_err(|err| {
            SplitError::Ocr(format!(
                "failed to load detection model from {}: {}",
                self.detection_model_path.display(),
                err
            ))
        })?;
        let recognition_model = Model::load_file(&self.recognition_model_path).map_err(|err| {
            SplitError::Ocr(format!(
                "failed to load recognition model from {}: {}",
                self.recognition_model_path.display(),
                err
            ))
        })?;

        OcrsEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            allowed_chars,
            ..Default::default()
        })
        .map_err(|err| SplitError::Ocr(format!("failed to initialise OCR engine: {}", err)))
    }
}

/// [`TextRecognizer`] backed by two `ocrs` engines: one restricted to the
/// configured whitelist and one unrestricted.
///
/// The character set is fixed when an `ocrs` engine is built, so each
/// whitelist needs its own engine.
///
/// **Important:** `ocrs` and `rten` must be compiled in release mode. Debug
/// builds are 10-100x slower.
pub struct OcrsRecognizer {
    whitelist: CharWhitelist,
    restricted: OcrsEngine,
    unrestricted: OcrsEngine,
}

impl OcrsRecognizer {
    /// Load the models named by `config`. This is the expensive step: build
    /// one recognizer per document run and reuse it for every page.
    #[instrument(skip_all, fields(
        detection = %config.detection_model_path.display(),
        recognition = %config.recognition_model_path.display(),
    ))]
    pub fn new(config: &OcrConfig, whitelist: CharWhitelist) -> Result<Self> {
        config.validate()?;

        info!("Loading OCR models");
        let restricted = config.load_engine(Some(whitelist.as_str().to_string()))?;
        let unrestricted = config.load_engine(None)?;

        info!("OCR engines initialised");
        Ok(Self {
            whitelist,
            restricted,
            unrestricted,
        })
    }

    fn engine_for(&self, whitelist: Option<&CharWhitelist>) -> Result<&OcrsEngine> {
        match whitelist {
            None => Ok(&self.unrestricted),
            Some(w) if *w == self.whitelist => Ok(&self.restricted),
            Some(w) => Err(SplitError::Ocr(format!(
                "whitelist {:?} was not loaded; this recognizer serves {:?}",
                w.as_str(),
                self.whitelist.as_str()
            ))),
        }
    }
}

impl TextRecognizer for OcrsRecognizer {
    #[instrument(skip_all, fields(
        width = image.width(),
        height = image.height(),
        segmentation = ?request.segmentation,
        restricted = request.whitelist.is_some(),
    ))]
    fn recognize(&self, image: &GrayImage, request: &RecognitionRequest) -> Result<String> {
        let engine = self.engine_for(request.whitelist.as_ref())?;

        let rgb = DynamicImage::ImageLuma8(image.clone()).to_rgb8();
        let (width, height) = rgb.dimensions();
        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            SplitError::Ocr(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;
        let input = engine
            .prepare_input(source)
            .map_err(|err| SplitError::Ocr(format!("OCR preprocessing failed: {}", err)))?;

        let words = engine
            .detect_words(&input)
            .map_err(|err| SplitError::Ocr(format!("word detection failed: {}", err)))?;
        let mut lines = engine.find_text_lines(&input, &words);
        debug!(words = words.len(), lines = lines.len(), "Text lines found");

        if request.segmentation == SegmentationMode::SingleLine && lines.len() > 1 {
            let merged: Vec<_> = lines.into_iter().flatten().collect();
            lines = vec![merged];
        }

        let texts = engine
            .recognize_text(&input, &lines)
            .map_err(|err| SplitError::Ocr(format!("line recognition failed: {}", err)))?;

        let text = texts
            .iter()
            .flatten()
            .map(|line| line.to_string())
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        debug!(chars = text.chars().count(), "OCR recognition complete");
        Ok(text)
    }
}
