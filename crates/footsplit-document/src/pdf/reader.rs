// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open, inspect, query the text layer of, and extract page ranges
// from existing PDF documents using the `lopdf` crate.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::Path;

use footsplit_core::error::{Result, SplitError};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tracing::{debug, info, instrument, warn};

use super::geometry::{PageGeometry, Rect};
use super::text_layer::{self, PageGlyphs, TextBlock};

/// Page trees deeper than this are treated as corrupt.
const MAX_TREE_DEPTH: usize = 64;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Reads an existing PDF and produces page-range subsets of it.
///
/// Wraps `lopdf::Document`. The source is never modified: every extraction
/// builds a fresh document from the pages it keeps.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// The file as loaded, handed to `pdf-extract` on the first text query.
    bytes: Vec<u8>,
    glyphs: OnceCell<PageGlyphs>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let bytes = std::fs::read(path_ref).map_err(|err| {
            SplitError::Pdf(format!("failed to open {}: {}", path_ref.display(), err))
        })?;
        let document = Document::load_mem(&bytes).map_err(|err| {
            SplitError::Pdf(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self {
            document,
            bytes,
            glyphs: OnceCell::new(),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            SplitError::Pdf(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self {
            document,
            bytes: data.to_vec(),
            glyphs: OnceCell::new(),
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Visible page box of a page (1-indexed): the CropBox, else the
    /// MediaBox, inherited through the page tree.
    pub fn page_geometry(&self, page_number: u32) -> Result<PageGeometry> {
        let page_id = self.page_id(page_number)?;
        let geometry = inherited_box(&self.document, page_id, b"CropBox")
            .or_else(|| inherited_box(&self.document, page_id, b"MediaBox"))
            .unwrap_or_else(|| {
                debug!(page_number, "Page has no usable box, assuming US Letter");
                PageGeometry::LETTER
            });
        Ok(geometry)
    }

    // -- Text layer -----------------------------------------------------------

    /// Text blocks of a page (1-indexed) whose content intersects `region`,
    /// in top-left page coordinates, ordered top to bottom.
    ///
    /// The whole document's text layer is read once, on the first call. A
    /// text layer that cannot be read is a [`SplitError::TextLayer`].
    #[instrument(skip(self), fields(page_number))]
    pub fn text_blocks_in(&self, page_number: u32, region: &Rect) -> Result<Vec<TextBlock>> {
        let geometry = self.page_geometry(page_number)?;
        let glyphs = self
            .glyphs()?
            .get(&page_number)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let inside: Vec<_> = text_layer::page_spans(glyphs, &geometry)
            .into_iter()
            .filter(|span| span.bbox.intersects(region))
            .collect();
        let blocks = text_layer::group_blocks(inside);
        debug!(page_number, blocks = blocks.len(), "Text blocks in region");
        Ok(blocks)
    }

    fn glyphs(&self) -> Result<&PageGlyphs> {
        if let Some(glyphs) = self.glyphs.get() {
            return Ok(glyphs);
        }
        let text_document = pdf_extract::Document::load_mem(&self.bytes)
            .map_err(|err| SplitError::TextLayer(format!("cannot parse document: {}", err)))?;
        let glyphs = text_layer::collect_glyphs(&text_document)?;
        Ok(self.glyphs.get_or_init(|| glyphs))
    }

    // -- Extraction -----------------------------------------------------------

    /// Extract a contiguous range of pages [start..=end] (1-indexed) into a new
    /// PDF returned as bytes. Page order is preserved.
    ///
    /// Only the objects the kept pages reach are copied, so the cost follows
    /// the size of the range rather than the size of the source.
    #[instrument(skip(self), fields(start, end))]
    pub fn extract_page_range(&self, start: u32, end: u32) -> Result<Vec<u8>> {
        let total = self.page_count() as u32;
        if start == 0 || start > end || end > total {
            return Err(SplitError::Pdf(format!(
                "page range {}..={} invalid for {} page document",
                start, end, total
            )));
        }

        let mut builder = PartBuilder::new(&self.document);
        for page_number in start..=end {
            builder.push_page(self.page_id(page_number)?)?;
        }
        let mut new_doc = builder.finish();

        let mut output = Vec::new();
        new_doc.save_to(&mut output).map_err(|err| {
            SplitError::Pdf(format!("failed to serialise page range: {}", err))
        })?;

        debug!(start, end, output_bytes = output.len(), "Page range extracted");
        Ok(output)
    }

    /// Extract pages [start..=end] and write them to `path`.
    pub fn write_page_range(&self, start: u32, end: u32, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.extract_page_range(start, end)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(start, end, "Wrote pages to {}", path.as_ref().display());
        Ok(())
    }

    // -- Helpers --------------------------------------------------------------

    fn page_id(&self, page_number: u32) -> Result<ObjectId> {
        let pages = self.document.get_pages();
        pages.get(&page_number).copied().ok_or_else(|| {
            SplitError::Pdf(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })
    }
}

// -- Part building ------------------------------------------------------------

/// Copies pages of a source document into a fresh one, together with every
/// object those pages reach. Each source object is copied at most once, so
/// fonts and images shared between pages stay shared.
struct PartBuilder<'a> {
    source: &'a Document,
    target: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    copied: HashMap<ObjectId, ObjectId>,
}

impl<'a> PartBuilder<'a> {
    fn new(source: &'a Document) -> Self {
        let mut target = Document::with_version(source.version.clone());
        let pages_id = target.new_object_id();
        Self {
            source,
            target,
            pages_id,
            kids: Vec::new(),
            copied: HashMap::new(),
        }
    }

    /// Append a page, materialising the attributes it inherits.
    fn push_page(&mut self, page_id: ObjectId) -> Result<()> {
        let source = self.source;
        let page = source
            .get_dictionary(page_id)
            .map_err(|err| SplitError::Pdf(format!("cannot read page {:?}: {}", page_id, err)))?;

        let new_id = self.target.new_object_id();
        self.copied.insert(page_id, new_id);

        let mut copy = self.copy_dictionary(page);
        for key in INHERITABLE {
            if !page.has(key)
                && let Some(value) = inherited_attribute(source, page_id, key)
            {
                let value = self.copy_value(value);
                copy.set(key, value);
            }
        }
        copy.set("Parent", self.pages_id);

        self.target.objects.insert(new_id, Object::Dictionary(copy));
        self.kids.push(Object::Reference(new_id));
        Ok(())
    }

    fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        self.target.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.target.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.target.trailer.set("Root", catalog_id);
        self.target
    }

    fn copy_reference(&mut self, id: ObjectId) -> Object {
        if let Some(new_id) = self.copied.get(&id) {
            return Object::Reference(*new_id);
        }
        let new_id = self.target.new_object_id();
        self.copied.insert(id, new_id);

        let source = self.source;
        let copy = match source.get_object(id) {
            Ok(object) => self.copy_value(object),
            Err(err) => {
                warn!(?id, %err, "Cannot resolve reference, using Null");
                Object::Null
            }
        };
        self.target.objects.insert(new_id, copy);
        Object::Reference(new_id)
    }

    fn copy_value(&mut self, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self.copy_reference(*id),
            Object::Array(items) => Object::Array(items.iter().map(|item| self.copy_value(item)).collect()),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(dict)),
            Object::Stream(stream) => {
                let dict = self.copy_dictionary(&stream.dict);
                Object::Stream(Stream::new(dict, stream.content.clone()))
            }
            other => other.clone(),
        }
    }

    /// Copy a dictionary, leaving out `/Parent`: pages are re-parented by
    /// [`PartBuilder::push_page`] and pages outside the part are never pulled
    /// in through a back-reference.
    fn copy_dictionary(&mut self, dict: &Dictionary) -> Dictionary {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            if key.as_slice() == b"Parent" {
                continue;
            }
            let value = self.copy_value(value);
            copy.set(key.clone(), value);
        }
        copy
    }
}

/// Look up a page attribute, walking up the page tree for inherited values.
fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return Some(resolve(doc, value));
        }
        let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn inherited_box(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<PageGeometry> {
    let values: Vec<f32> = inherited_attribute(doc, page_id, key)?
        .as_array()
        .ok()?
        .iter()
        .filter_map(|o| number(resolve(doc, o)))
        .collect();
    match values.as_slice() {
        [llx, lly, urx, ury] => {
            let geometry = PageGeometry::from_box(*llx, *lly, *urx, *ury);
            (geometry.width > 0.0 && geometry.height > 0.0).then_some(geometry)
        }
        _ => None,
    }
}

/// Follow an indirect reference, returning the object itself when it cannot
/// be resolved.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        other => other,
    }
}

/// Numeric value of an Integer or Real object.
fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}
