// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test fixtures — small PDFs built in memory with lopdf.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

#[derive(Debug, Clone)]
enum Item {
    Plain { x: f32, y: f32, size: f32, text: String },
    Scaled { scale: f32, x: f32, y: f32, size: f32, text: String },
    Form { x: f32, y: f32, size: f32, text: String },
}

/// One page of a fixture document. Coordinates are PDF user space.
#[derive(Debug, Clone)]
pub(crate) struct PageSpec {
    width: f32,
    height: f32,
    items: Vec<Item>,
    /// Contents stream claims Flate compression but holds no deflate data.
    corrupt_contents: bool,
}

impl PageSpec {
    pub(crate) fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    pub(crate) fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
            corrupt_contents: false,
        }
    }

    /// Body text near the top and `text` as a footer 30pt above the bottom.
    pub(crate) fn footer(self, text: &str) -> Self {
        let top = self.height - 72.0;
        self.text_at(72.0, top, 12.0, "Body text").text_at(72.0, 30.0, 10.0, text)
    }

    pub(crate) fn text_at(mut self, x: f32, y: f32, size: f32, text: &str) -> Self {
        self.items.push(Item::Plain { x, y, size, text: text.into() });
        self
    }

    /// Text drawn under a uniform `scale` transform.
    pub(crate) fn scaled_text(mut self, scale: f32, x: f32, y: f32, size: f32, text: &str) -> Self {
        self.items.push(Item::Scaled { scale, x, y, size, text: text.into() });
        self
    }

    /// Text drawn inside a form XObject.
    pub(crate) fn form_text(mut self, x: f32, y: f32, size: f32, text: &str) -> Self {
        self.items.push(Item::Form { x, y, size, text: text.into() });
        self
    }

    /// A page whose content stream cannot be decoded.
    pub(crate) fn corrupt_contents(mut self) -> Self {
        self.corrupt_contents = true;
        self
    }
}

fn show(font: &str, x: f32, y: f32, size: f32, text_op: Operation) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), Object::Real(size)]),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        text_op,
        Operation::new("ET", vec![]),
    ]
}

fn encode(operations: Vec<Operation>) -> Vec<u8> {
    Content { operations }.encode().unwrap()
}

/// Build a PDF with one page per `PageSpec`.
pub(crate) fn build_pdf(pages: &[PageSpec]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let helvetica = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let fonts = dictionary! { "F1" => helvetica };
    let shared_resources = doc.add_object(dictionary! { "Font" => fonts.clone() });

    let mut kids: Vec<Object> = Vec::new();
    for layout in pages {
        let mut operations = Vec::new();
        let mut xobjects = Dictionary::new();

        for (idx, item) in layout.items.iter().enumerate() {
            match item {
                Item::Plain { x, y, size, text } => {
                    let tj = Operation::new("Tj", vec![Object::string_literal(text.as_str())]);
                    operations.extend(show("F1", *x, *y, *size, tj));
                }
                Item::Scaled { scale, x, y, size, text } => {
                    operations.push(Operation::new("q", vec![]));
                    operations.push(Operation::new(
                        "cm",
                        vec![Object::Real(*scale), 0.into(), 0.into(), Object::Real(*scale), 0.into(), 0.into()],
                    ));
                    let tj = Operation::new("Tj", vec![Object::string_literal(text.as_str())]);
                    operations.extend(show("F1", *x, *y, *size, tj));
                    operations.push(Operation::new("Q", vec![]));
                }
                Item::Form { x, y, size, text } => {
                    let tj = Operation::new("Tj", vec![Object::string_literal(text.as_str())]);
                    let form = Stream::new(
                        dictionary! {
                            "Type" => "XObject",
                            "Subtype" => "Form",
                            "BBox" => vec![0.into(), 0.into(), Object::Real(layout.width), Object::Real(layout.height)],
                            "Resources" => dictionary! { "Font" => fonts.clone() },
                        },
                        encode(show("F1", *x, *y, *size, tj)),
                    );
                    let name = format!("Fm{idx}");
                    xobjects.set(name.as_bytes().to_vec(), doc.add_object(form));
                    operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
                }
            }
        }

        let contents = if layout.corrupt_contents {
            Stream::new(
                dictionary! { "Filter" => "FlateDecode" },
                b"\x00\x01 not deflate data (".to_vec(),
            )
        } else {
            Stream::new(Dictionary::new(), encode(operations))
        };
        let content_id = doc.add_object(contents);
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), Object::Real(layout.width), Object::Real(layout.height)],
        };
        if !xobjects.is_empty() {
            page.set(
                "Resources",
                dictionary! { "Font" => fonts.clone(), "XObject" => xobjects },
            );
        }
        kids.push(doc.add_object(page).into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => shared_resources,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

/// Write a fixture PDF into `dir` and return its path.
pub(crate) fn write_pdf(dir: &Path, name: &str, pages: &[PageSpec]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(pages)).unwrap();
    path
}
