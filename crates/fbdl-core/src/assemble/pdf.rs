//! Image-only PDF writer.
//!
//! One page per image, sized to the image in points (1 px = 1 pt). Gray and
//! three-component JPEG data is embedded as-is through `DCTDecode`; anything
//! else (other formats, CMYK/YCCK JPEG) is transcoded to RGB JPEG first.

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegDecoder;
use image::{ColorType, DynamicImage, ImageDecoder, ImageFormat};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// A page ready for embedding: JPEG bytes plus what the PDF needs to know.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    /// `DeviceRGB` or `DeviceGray`.
    pub color_space: &'static str,
    pub jpeg: Vec<u8>,
}

impl PageImage {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_bytes(bytes).with_context(|| format!("decode {}", path.display()))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if image::guess_format(&bytes)? == ImageFormat::Jpeg {
            let decoder = JpegDecoder::new(Cursor::new(&bytes))?;
            let (width, height) = decoder.dimensions();
            // The decoder reports CMYK input as Rgb8, so check the frame itself.
            let color_space =
                passthrough_color_space(jpeg_components(&bytes), decoder.color_type());
            if let Some(color_space) = color_space {
                return Ok(Self {
                    width,
                    height,
                    color_space,
                    jpeg: bytes,
                });
            }
        }

        let decoded = image::load_from_memory(&bytes)?;
        let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
        let mut out = Cursor::new(Vec::new());
        rgb.write_to(&mut out, ImageFormat::Jpeg)?;
        Ok(Self {
            width: rgb.width(),
            height: rgb.height(),
            color_space: "DeviceRGB",
            jpeg: out.into_inner(),
        })
    }
}

/// Color space for embedding the JPEG unchanged, if its data fits one.
fn passthrough_color_space(components: Option<u8>, color: ColorType) -> Option<&'static str> {
    match (components, color) {
        (Some(1), ColorType::L8) => Some("DeviceGray"),
        (Some(3), ColorType::Rgb8) => Some("DeviceRGB"),
        _ => None,
    }
}

/// Component count from the first SOF marker segment.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut i = 2;
    loop {
        if *bytes.get(i)? != 0xFF {
            return None;
        }
        while *bytes.get(i)? == 0xFF {
            i += 1;
        }
        let marker = *bytes.get(i)?;
        i += 1;
        match marker {
            0x01 | 0xD0..=0xD7 => continue,
            0xD9 | 0xDA => return None,
            _ => {}
        }
        let len = usize::from(u16::from_be_bytes([*bytes.get(i)?, *bytes.get(i + 1)?]));
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            // length(2) precision(1) height(2) width(2) components(1)
            return bytes.get(i + 7).copied();
        }
        i += len;
    }
}

/// Writes `images` to `output` as an image-only PDF titled `title`.
pub fn build_image_pdf(images: &[PathBuf], output: &Path, title: &str) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(images.len());

    for path in images {
        let page = PageImage::load(path)?;
        let (w, h) = (i64::from(page.width), i64::from(page.height));

        let image_id = doc.add_object(
            Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => w,
                    "Height" => h,
                    "ColorSpace" => page.color_space,
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                page.jpeg,
            )
            .with_compression(false),
        );

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Integer(w),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(h),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(w),
                Object::Integer(h),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
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
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => pdf_text(title),
        "Producer" => Object::string_literal(concat!("fbdl ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    doc.save(output)
        .with_context(|| format!("write {}", output.display()))?;
    Ok(())
}

/// PDF text string: UTF-16BE with BOM, so any title survives.
fn pdf_text(s: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
