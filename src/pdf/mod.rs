//! # PDF Writer
//!
//! A from-scratch PDF 1.7 [`DocumentWriter`]. Drawing commands are turned
//! into content-stream operators as they arrive; everything else (fonts,
//! images, transparency states, link annotations, the page tree) is laid out
//! as numbered objects in [`DocumentWriter::finalize`].
//!
//! ```text
//! 1 0 obj  Catalog
//! 2 0 obj  Pages
//! 3..      Page objects, one per handle, in creation order
//! ..       Content streams, /Link annotations
//! ..       Type1 fonts, image XObjects, ExtGStates, Info
//! xref / trailer / %%EOF
//! ```
//!
//! Page objects are numbered before anything else so link annotations can
//! point at any page, including ones later in the document.

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::draw::{DrawCommand, Rect, Stroke};
use crate::error::{FolioError, Stage};
use crate::font::StandardFont;
use crate::image_loader::{self, DecodedImage, Pixels};
use crate::style::Color;
use crate::writer::{DocumentWriter, EmbeddedImage, ImageHandle, PageHandle};

/// Bezier control distance for a quarter circle.
const KAPPA: f64 = 0.552_284_749_8;
const PRODUCER: &str = concat!("folio ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default)]
pub struct PdfWriter {
    pages: Vec<PageBuffer>,
    images: Vec<DecodedImage>,
    title: Option<String>,
}

#[derive(Debug, Default)]
struct PageBuffer {
    width: f64,
    height: f64,
    content: String,
    fonts: BTreeSet<StandardFont>,
    images: BTreeSet<usize>,
    /// Fill/stroke alpha in thousandths.
    alphas: BTreeSet<u32>,
    links: Vec<(Rect, PageHandle)>,
}

/// Numbered objects; index 0 is the free-list head and stays empty.
struct ObjectTable {
    objects: Vec<Vec<u8>>,
}

impl ObjectTable {
    fn new() -> Self {
        Self {
            objects: vec![Vec::new()],
        }
    }

    fn reserve(&mut self) -> usize {
        self.objects.push(Vec::new());
        self.objects.len() - 1
    }

    fn push(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(data);
        self.objects.len() - 1
    }

    fn set(&mut self, id: usize, data: Vec<u8>) {
        self.objects[id] = data;
    }

    fn push_stream(&mut self, dict: &str, body: &[u8]) -> usize {
        let mut data = Vec::with_capacity(body.len() + dict.len() + 32);
        let _ = write!(data, "<< {} /Length {} >>\nstream\n", dict, body.len());
        data.extend_from_slice(body);
        data.extend_from_slice(b"\nendstream");
        self.push(data)
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title for the Info dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_mut(&mut self, page: PageHandle) -> Option<&mut PageBuffer> {
        let found = self.pages.get_mut(page.0);
        if found.is_none() {
            log::warn!("ignoring drawing on unknown page handle {}", page.0);
        }
        found
    }

    fn write_command(&mut self, page: PageHandle, command: &DrawCommand) {
        let image_count = self.images.len();
        let Some(buf) = self.page_mut(page) else {
            return;
        };
        let s = &mut buf.content;

        match command {
            DrawCommand::Rect { rect, fill, stroke } => {
                let op = paint_op(*fill, *stroke);
                if op.is_empty() {
                    return;
                }
                s.push_str("q\n");
                write_paint_state(s, *fill, *stroke);
                let _ = write!(s, "{:.2} {:.2} {:.2} {:.2} re\n{}\nQ\n", rect.x, rect.y, rect.width, rect.height, op);
            }

            DrawCommand::Line { from, to, stroke } => {
                s.push_str("q\n");
                write_paint_state(s, None, Some(*stroke));
                let _ = write!(s, "{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n", from.0, from.1, to.0, to.1);
            }

            DrawCommand::Path {
                points,
                closed,
                fill,
                stroke,
            } => {
                let op = paint_op(*fill, *stroke);
                let Some(((x0, y0), rest)) = points.split_first() else {
                    return;
                };
                if op.is_empty() {
                    return;
                }
                s.push_str("q\n");
                write_paint_state(s, *fill, *stroke);
                let _ = writeln!(s, "{:.2} {:.2} m", x0, y0);
                for (x, y) in rest {
                    let _ = writeln!(s, "{:.2} {:.2} l", x, y);
                }
                if *closed {
                    s.push_str("h\n");
                }
                let _ = write!(s, "{}\nQ\n", op);
            }

            DrawCommand::Circle {
                cx,
                cy,
                radius,
                fill,
                stroke,
            } => {
                let op = paint_op(*fill, *stroke);
                if op.is_empty() || *radius <= 0.0 {
                    return;
                }
                s.push_str("q\n");
                write_paint_state(s, *fill, *stroke);
                write_circle(s, *cx, *cy, *radius);
                let _ = write!(s, "{}\nQ\n", op);
            }

            DrawCommand::Text {
                x,
                y,
                text,
                font,
                size,
                color,
                rotation,
            } => {
                if text.is_empty() {
                    return;
                }
                buf.fonts.insert(*font);
                let s = &mut buf.content;
                let _ = write!(
                    s,
                    "BT\n{:.3} {:.3} {:.3} rg\n/{} {:.1} Tf\n",
                    color.r,
                    color.g,
                    color.b,
                    font_resource(*font),
                    size
                );
                if *rotation == 0.0 {
                    let _ = writeln!(s, "{:.2} {:.2} Td", x, y);
                } else {
                    let (sin, cos) = rotation.to_radians().sin_cos();
                    let _ = writeln!(s, "{:.4} {:.4} {:.4} {:.4} {:.2} {:.2} Tm", cos, sin, -sin, cos, x, y);
                }
                let _ = write!(s, "({}) Tj\nET\n", encode_text(text));
            }

            DrawCommand::Image {
                image,
                rect,
                opacity,
            } => {
                if image.0 >= image_count {
                    log::warn!("ignoring unknown image handle {}", image.0);
                    return;
                }
                buf.images.insert(image.0);
                let alpha = alpha_key(*opacity);
                let s = &mut buf.content;
                s.push_str("q\n");
                if alpha < 1000 {
                    let _ = writeln!(s, "/GS{} gs", alpha);
                }
                let _ = write!(
                    s,
                    "{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                    rect.width, rect.height, rect.x, rect.y, image.0
                );
                if alpha < 1000 {
                    buf.alphas.insert(alpha);
                }
            }
        }
    }

    fn encode(self) -> Vec<u8> {
        let mut table = ObjectTable::new();
        let catalog_id = table.reserve();
        let pages_id = table.reserve();
        let page_ids: Vec<usize> = self.pages.iter().map(|_| table.reserve()).collect();

        let used_fonts: BTreeSet<StandardFont> = self.pages.iter().flat_map(|p| p.fonts.iter().copied()).collect();
        let font_ids: Vec<(StandardFont, usize)> = used_fonts
            .into_iter()
            .map(|font| {
                let dict = format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.pdf_name()
                );
                (font, table.push(dict.into_bytes()))
            })
            .collect();

        let image_ids: Vec<usize> = self.images.iter().map(|img| write_image_xobject(&mut table, img)).collect();

        let used_alphas: BTreeSet<u32> = self.pages.iter().flat_map(|p| p.alphas.iter().copied()).collect();
        let alpha_ids: Vec<(u32, usize)> = used_alphas
            .into_iter()
            .map(|a| {
                let v = a as f64 / 1000.0;
                let dict = format!("<< /Type /ExtGState /ca {:.3} /CA {:.3} >>", v, v);
                (a, table.push(dict.into_bytes()))
            })
            .collect();

        for (page, &page_id) in self.pages.iter().zip(&page_ids) {
            let compressed = compress_to_vec_zlib(page.content.as_bytes(), 6);
            let content_id = table.push_stream("/Filter /FlateDecode", &compressed);

            let annots: Vec<usize> = page
                .links
                .iter()
                .filter_map(|(rect, target)| {
                    let dest = page_ids.get(target.0)?;
                    let dict = format!(
                        "<< /Type /Annot /Subtype /Link /Rect [{:.2} {:.2} {:.2} {:.2}] /Border [0 0 0] /Dest [{} 0 R /Fit] >>",
                        rect.x,
                        rect.y,
                        rect.right(),
                        rect.top(),
                        dest
                    );
                    Some(table.push(dict.into_bytes()))
                })
                .collect();

            let mut resources = String::new();
            let fonts: Vec<String> = font_ids
                .iter()
                .filter(|(f, _)| page.fonts.contains(f))
                .map(|(f, id)| format!("/{} {} 0 R", font_resource(*f), id))
                .collect();
            if !fonts.is_empty() {
                let _ = write!(resources, "/Font << {} >> ", fonts.join(" "));
            }
            if !page.images.is_empty() {
                let xobjects: Vec<String> = page
                    .images
                    .iter()
                    .map(|&i| format!("/Im{} {} 0 R", i, image_ids[i]))
                    .collect();
                let _ = write!(resources, "/XObject << {} >> ", xobjects.join(" "));
            }
            let states: Vec<String> = alpha_ids
                .iter()
                .filter(|(a, _)| page.alphas.contains(a))
                .map(|(a, id)| format!("/GS{} {} 0 R", a, id))
                .collect();
            if !states.is_empty() {
                let _ = write!(resources, "/ExtGState << {} >> ", states.join(" "));
            }

            let mut dict = format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.2} {:.2}] /Contents {} 0 R /Resources << {}>>",
                pages_id, page.width, page.height, content_id, resources
            );
            if !annots.is_empty() {
                let refs: Vec<String> = annots.iter().map(|id| format!("{} 0 R", id)).collect();
                let _ = write!(dict, " /Annots [{}]", refs.join(" "));
            }
            dict.push_str(" >>");
            table.set(page_id, dict.into_bytes());
        }

        table.set(
            catalog_id,
            format!("<< /Type /Catalog /Pages {} 0 R /PageMode /UseNone >>", pages_id).into_bytes(),
        );
        let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
        table.set(
            pages_id,
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), page_ids.len()).into_bytes(),
        );

        let mut info = String::from("<< ");
        if let Some(title) = &self.title {
            let _ = write!(info, "/Title ({}) ", encode_text(title));
        }
        let _ = write!(info, "/Producer ({}) /Creator (folio) >>", PRODUCER);
        let info_id = table.push(info.into_bytes());

        serialize(&table, catalog_id, info_id)
    }
}

impl DocumentWriter for PdfWriter {
    fn create_page(&mut self, width: f64, height: f64) -> Result<PageHandle, FolioError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(FolioError::writer(
                Stage::Allocate,
                None,
                format!("invalid page size {} x {}", width, height),
            ));
        }
        self.pages.push(PageBuffer {
            width,
            height,
            ..PageBuffer::default()
        });
        Ok(PageHandle(self.pages.len() - 1))
    }

    fn draw(&mut self, page: PageHandle, command: &DrawCommand) {
        self.write_command(page, command);
    }

    fn add_link(&mut self, page: PageHandle, rect: Rect, target: PageHandle) {
        if target.0 >= self.pages.len() {
            log::warn!("ignoring link to unknown page handle {}", target.0);
            return;
        }
        if let Some(buf) = self.page_mut(page) {
            buf.links.push((rect, target));
        }
    }

    fn embed_image(&mut self, bytes: &[u8]) -> Result<EmbeddedImage, FolioError> {
        let decoded = image_loader::decode(bytes)?;
        let embedded = EmbeddedImage {
            handle: ImageHandle(self.images.len()),
            width_px: decoded.width_px,
            height_px: decoded.height_px,
        };
        self.images.push(decoded);
        Ok(embedded)
    }

    fn finalize(self) -> Result<Vec<u8>, FolioError> {
        if self.pages.is_empty() {
            return Err(FolioError::writer(Stage::Encode, None, "document has no pages"));
        }
        Ok(self.encode())
    }
}

/// Resource name for a font, stable across pages.
fn font_resource(font: StandardFont) -> String {
    let index = StandardFont::ALL.iter().position(|f| *f == font).unwrap_or(0);
    format!("F{}", index)
}

fn alpha_key(opacity: f64) -> u32 {
    (opacity.clamp(0.0, 1.0) * 1000.0).round() as u32
}

fn paint_op(fill: Option<Color>, stroke: Option<Stroke>) -> &'static str {
    match (fill.is_some(), stroke.is_some()) {
        (true, true) => "B",
        (true, false) => "f",
        (false, true) => "S",
        (false, false) => "",
    }
}

fn write_paint_state(s: &mut String, fill: Option<Color>, stroke: Option<Stroke>) {
    if let Some(c) = fill {
        let _ = writeln!(s, "{:.3} {:.3} {:.3} rg", c.r, c.g, c.b);
    }
    if let Some(st) = stroke {
        let _ = write!(s, "{:.3} {:.3} {:.3} RG\n{:.2} w\n", st.color.r, st.color.g, st.color.b, st.width);
        if let Some((on, off)) = st.dash {
            let _ = writeln!(s, "[{:.2} {:.2}] 0 d", on, off);
        }
    }
}

fn write_circle(s: &mut String, cx: f64, cy: f64, r: f64) {
    let k = r * KAPPA;
    let _ = writeln!(s, "{:.2} {:.2} m", cx + r, cy);
    let _ = writeln!(s, "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c", cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    let _ = writeln!(s, "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c", cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    let _ = writeln!(s, "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c", cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    let _ = writeln!(s, "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c", cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    s.push_str("h\n");
}

fn write_image_xobject(table: &mut ObjectTable, image: &DecodedImage) -> usize {
    let (w, h) = (image.width_px, image.height_px);
    match &image.pixels {
        Pixels::Jpeg { data, color } => {
            let mut dict = format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace {} /BitsPerComponent 8 /Filter /DCTDecode",
                w,
                h,
                color.pdf_color_space()
            );
            if let Some(decode) = color.decode_array() {
                let _ = write!(dict, " /Decode {}", decode);
            }
            table.push_stream(&dict, data)
        }
        Pixels::Rgb { rgb, alpha } => {
            let smask = alpha.as_ref().map(|a| {
                let dict = format!(
                    "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceGray /BitsPerComponent 8 /Filter /FlateDecode",
                    w, h
                );
                table.push_stream(&dict, &compress_to_vec_zlib(a, 6))
            });
            let mut dict = format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode",
                w, h
            );
            if let Some(id) = smask {
                let _ = write!(dict, " /SMask {} 0 R", id);
            }
            table.push_stream(&dict, &compress_to_vec_zlib(rgb, 6))
        }
    }
}

/// Encode text as the inside of a PDF literal string in WinAnsiEncoding.
/// Characters outside the encoding become `?`.
fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match unicode_to_winansi(ch).unwrap_or(b'?') {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b @ 0x20..=0x7E => out.push(b as char),
            b => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}

/// Windows-1252 code for a character, if it has one.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    let b = match cp {
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => return None,
    };
    Some(b)
}

fn serialize(table: &ObjectTable, root: usize, info: usize) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    let mut offsets = vec![0usize; table.objects.len()];

    out.extend_from_slice(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n");

    for (id, data) in table.objects.iter().enumerate().skip(1) {
        offsets[id] = out.len();
        let _ = write!(out, "{} 0 obj\n", id);
        out.extend_from_slice(data);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref = out.len();
    let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", table.objects.len());
    for offset in &offsets[1..] {
        let _ = write!(out, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        table.objects.len(),
        root,
        info,
        xref
    );
    out
}
