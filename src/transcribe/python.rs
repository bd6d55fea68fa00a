use std::path::Path;

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyModule};

use super::error::TranscriptionError;
use super::{Transcriber, Transcription};

/// Languages the EasyOCR reader is built for by default.
pub const EASYOCR_DEFAULT_LANGUAGES: [&str; 1] = ["en"];

/// The TrOCR checkpoint loaded by default.
pub const TROCR_DEFAULT_MODEL: &str = "microsoft/trocr-base-handwritten";

///
/// A recogniser backed by a Python `easyocr.Reader`. Produces every text fragment found in an
/// image.
///
/// # Fields:
/// - `reader`: The initialised `easyocr.Reader` object
///
pub struct EasyOcrTranscriber {
    reader: Py<PyAny>,
}

impl EasyOcrTranscriber {
    ///
    /// Builds a new `easyocr.Reader`. This loads the detection and recognition models, which can
    /// take a while on first use.
    ///
    /// # Parameters:
    /// - `languages`: EasyOCR language codes, e.g. `["en"]`
    ///
    /// # Returns:
    /// - A new `EasyOcrTranscriber`
    /// - A `TranscriptionError::Python` if `easyocr` is missing or the reader fails to load
    ///
    pub fn new(languages: &[&str]) -> Result<EasyOcrTranscriber, TranscriptionError> {
        Python::with_gil(|py| -> Result<EasyOcrTranscriber, TranscriptionError> {
            let easyocr = PyModule::import(py, "easyocr")?;
            let reader = easyocr.getattr("Reader")?.call1((languages.to_vec(),))?;
            log::info!("Loaded EasyOCR reader for {:?}", languages);

            Ok(EasyOcrTranscriber { reader: reader.unbind() })
        })
    }

    ///
    /// Wraps a reader that was already created on the Python side.
    ///
    pub fn from_reader(reader: Py<PyAny>) -> EasyOcrTranscriber {
        EasyOcrTranscriber { reader }
    }
}

impl Transcriber for EasyOcrTranscriber {
    fn name(&self) -> &'static str {
        "EasyOCR"
    }

    fn transcribe(&self, path: &Path) -> Result<Transcription, TranscriptionError> {
        Python::with_gil(|py| -> Result<Transcription, TranscriptionError> {
            let kwargs = PyDict::new(py);
            kwargs.set_item("detail", 0)?;

            let result = self.reader.bind(py).call_method("readtext", (path.to_string_lossy().into_owned(),), Some(&kwargs))?;
            let lines: Vec<String> = result.extract()?;

            Ok(Transcription::Lines(lines))
        })
    }
}

///
/// A recogniser backed by a Hugging Face TrOCR encoder-decoder. Produces a single line of
/// generated text per image.
///
/// # Fields:
/// - `processor`: The `TrOCRProcessor`, used to prepare images and decode tokens
/// - `model`: The `VisionEncoderDecoderModel`
///
pub struct TrOcrTranscriber {
    processor: Py<PyAny>,
    model: Py<PyAny>,
}

impl TrOcrTranscriber {
    ///
    /// Loads a TrOCR processor and model from a pretrained checkpoint.
    ///
    /// # Parameters:
    /// - `model_name`: A Hugging Face model name, e.g. `TROCR_DEFAULT_MODEL`
    ///
    /// # Returns:
    /// - A new `TrOcrTranscriber`
    /// - A `TranscriptionError::Python` if `transformers` is missing or the checkpoint fails to load
    ///
    pub fn from_pretrained(model_name: &str) -> Result<TrOcrTranscriber, TranscriptionError> {
        Python::with_gil(|py| -> Result<TrOcrTranscriber, TranscriptionError> {
            let transformers = PyModule::import(py, "transformers")?;
            let processor = transformers.getattr("TrOCRProcessor")?.call_method1("from_pretrained", (model_name,))?;
            let model = transformers.getattr("VisionEncoderDecoderModel")?.call_method1("from_pretrained", (model_name,))?;
            log::info!("Loaded TrOCR checkpoint {}", model_name);

            Ok(TrOcrTranscriber { processor: processor.unbind(), model: model.unbind() })
        })
    }

    ///
    /// Wraps a processor and model that were already created on the Python side.
    ///
    pub fn from_parts(processor: Py<PyAny>, model: Py<PyAny>) -> TrOcrTranscriber {
        TrOcrTranscriber { processor, model }
    }
}

impl Transcriber for TrOcrTranscriber {
    fn name(&self) -> &'static str {
        "TrOCR"
    }

    fn transcribe(&self, path: &Path) -> Result<Transcription, TranscriptionError> {
        Python::with_gil(|py| -> Result<Transcription, TranscriptionError> {
            let image = PyModule::import(py, "PIL.Image")?.call_method1("open", (path.to_string_lossy().into_owned(),))?;
            let processor = self.processor.bind(py);

            let tensor_kwargs = PyDict::new(py);
            tensor_kwargs.set_item("return_tensors", "pt")?;
            let pixel_values = processor.call((image,), Some(&tensor_kwargs))?.getattr("pixel_values")?;

            let generated_ids = self.model.bind(py).call_method1("generate", (pixel_values,))?;

            let decode_kwargs = PyDict::new(py);
            decode_kwargs.set_item("skip_special_tokens", true)?;
            let decoded: Vec<String> = processor.call_method("batch_decode", (generated_ids,), Some(&decode_kwargs))?.extract()?;

            match decoded.into_iter().next() {
                Some(text) => Ok(Transcription::Caption(text)),
                None => Err(TranscriptionError::Backend { reason: "TrOCR decoded no text".to_owned() }),
            }
        })
    }
}
