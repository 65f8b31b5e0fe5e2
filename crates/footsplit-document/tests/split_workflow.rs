// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Whole-document splits through the public API, with fake rendering and OCR
// standing in for PDFium and the ocrs models.

use std::path::{Path, PathBuf};

use footsplit_core::error::{Result, SplitError};
use footsplit_core::{DetectionMode, FooterRecord, SplitConfig};
use footsplit_document::ocr::{RecognitionRequest, TextRecognizer};
use footsplit_document::render::PageRasterizer;
use footsplit_document::{PdfReader, RecognitionBackend, split_by_footer};
use image::{DynamicImage, GrayImage, Luma};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

/// Writes a Letter-sized document. `Some(text)` pages carry a Helvetica
/// footer 30pt above the bottom edge; `None` pages have no text at all.
fn write_document(dir: &Path, footers: &[Option<&str>]) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for footer in footers {
        let operations = match footer {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 10.into()]),
                Operation::new("Td", vec![72.into(), 30.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            None => Vec::new(),
        };
        let content = Content { operations }.encode().unwrap();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join("source.pdf");
    doc.save(&path).unwrap();
    path
}

/// Renders page `n` as a blank bitmap `100 + n` pixels wide, so the OCR
/// fake can tell pages apart by the width of the strip it receives.
struct WidthTaggedRasterizer {
    pages: u32,
}

impl PageRasterizer for WidthTaggedRasterizer {
    fn render_pages(
        &self,
        _path: &Path,
        _dpi: u32,
        visit: &mut dyn FnMut(u32, DynamicImage) -> Result<()>,
    ) -> Result<u32> {
        for page in 1..=self.pages {
            let bitmap = GrayImage::from_pixel(100 + page, 200, Luma([255]));
            visit(page, DynamicImage::ImageLuma8(bitmap))?;
        }
        Ok(self.pages)
    }
}

/// Reads "SCAN-A" for the first two pages and "SCAN-B" after that.
struct WidthOcr {
    upscale: u32,
}

impl TextRecognizer for WidthOcr {
    fn recognize(&self, image: &GrayImage, _request: &RecognitionRequest) -> Result<String> {
        let page = image.width() / self.upscale - 100;
        Ok(if page <= 2 { "SCAN-A" } else { "SCAN-B" }.to_string())
    }
}

struct FakeBackend {
    pages: u32,
    upscale: u32,
}

impl RecognitionBackend for FakeBackend {
    fn rasterizer(&self) -> Result<Box<dyn PageRasterizer>> {
        Ok(Box::new(WidthTaggedRasterizer { pages: self.pages }))
    }

    fn recognizer(&self) -> Result<Box<dyn TextRecognizer>> {
        Ok(Box::new(WidthOcr {
            upscale: self.upscale,
        }))
    }
}

/// Refuses to build anything; structured documents must never ask.
struct NoBackend;

impl RecognitionBackend for NoBackend {
    fn rasterizer(&self) -> Result<Box<dyn PageRasterizer>> {
        panic!("text-layer document asked for a rasterizer")
    }

    fn recognizer(&self) -> Result<Box<dyn TextRecognizer>> {
        Err(SplitError::BackendUnavailable("OCR"))
    }
}

fn config_in(dir: &Path) -> SplitConfig {
    SplitConfig {
        output_dir: dir.join("out"),
        ..SplitConfig::default()
    }
}

#[test]
fn text_layer_document_splits_on_footer_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(
        dir.path(),
        &[Some("PO-17"), Some("PO-18"), Some("PO-18"), Some("PO-17")],
    );
    let config = config_in(dir.path());
    let report = split_by_footer(&path, &config, &NoBackend, false).unwrap();

    assert_eq!(report.mode, DetectionMode::Structured);
    // A footer that reappears later starts a new part.
    let ranges: Vec<(u32, u32)> = report
        .parts
        .iter()
        .map(|p| (p.part.first_page, p.part.last_page))
        .collect();
    assert_eq!(ranges, vec![(1, 1), (2, 3), (4, 4)]);

    let sizes: Vec<usize> = report
        .part_paths()
        .iter()
        .map(|p| PdfReader::open(p).unwrap().page_count())
        .collect();
    assert_eq!(sizes, vec![1, 2, 1]);
    assert!(config.part_path(3).exists());
}

#[test]
fn page_without_text_switches_whole_document_to_recognition() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path(), &[Some("PO-17"), None, Some("PO-18")]);
    let config = config_in(dir.path());
    let backend = FakeBackend {
        pages: 3,
        upscale: config.upscale_factor,
    };
    let report = split_by_footer(&path, &config, &backend, false).unwrap();

    assert_eq!(report.mode, DetectionMode::Recognized);
    assert_eq!(
        report.records,
        vec![
            FooterRecord::new(1, "SCAN-A"),
            FooterRecord::new(2, "SCAN-A"),
            FooterRecord::new(3, "SCAN-B"),
        ]
    );
    assert_eq!(report.parts.len(), 2);
    assert_eq!(
        PdfReader::open(&report.parts[0].path).unwrap().page_count(),
        2
    );
}

#[test]
fn missing_recognition_backend_degrades_to_no_parts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path(), &[None, None]);
    let config = config_in(dir.path());
    let report = split_by_footer(&path, &config, &NoBackendAtAll, false).unwrap();

    assert!(report.records.is_empty());
    assert!(report.parts.is_empty());
    assert!(report.pipeline_failure.is_some());
}

struct NoBackendAtAll;

impl RecognitionBackend for NoBackendAtAll {
    fn rasterizer(&self) -> Result<Box<dyn PageRasterizer>> {
        Err(SplitError::BackendUnavailable("page rendering"))
    }

    fn recognizer(&self) -> Result<Box<dyn TextRecognizer>> {
        Err(SplitError::BackendUnavailable("OCR"))
    }
}
