// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Encoding a finished buffer and putting it on disk.  The encoder is
//! picked by the file's extension.

use buffer::PixelBuffer;
use error::Error;
use image::jpeg::JPEGEncoder;
use image::png::PNGEncoder;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs;
use std::path::Path;

const JPEG_QUALITY: u8 = 90;

/// JPEG frame headers hold each dimension in 16 bits.
pub const JPEG_MAX_SIDE: usize = 65_535;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Format {
    Jpeg,
    Png,
    Pnm,
}

fn format_of(path: &Path) -> Result<Format, Error> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => Ok(Format::Jpeg),
        "png" => Ok(Format::Png),
        "pnm" | "ppm" => Ok(Format::Pnm),
        _ => Err(Error::UnsupportedFormat(extension)),
    }
}

/// Unpack `0xRRGGBB` pixels into the byte triples encoders expect.
pub fn to_rgb(buffer: &PixelBuffer) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(buffer.as_slice().len() * 3);
    for pixel in buffer.as_slice() {
        bytes.push((pixel >> 16) as u8);
        bytes.push((pixel >> 8) as u8);
        bytes.push(*pixel as u8);
    }
    bytes
}

fn encode(format: Format, buffer: &PixelBuffer) -> Result<Vec<u8>, Error> {
    let pixels = to_rgb(buffer);
    let (width, height) = (buffer.width() as u32, buffer.height() as u32);
    let mut encoded = Vec::new();
    match format {
        Format::Jpeg => {
            if buffer.width() > JPEG_MAX_SIDE || buffer.height() > JPEG_MAX_SIDE {
                return Err(Error::TooLarge(
                    "JPEG",
                    JPEG_MAX_SIDE,
                    buffer.width(),
                    buffer.height(),
                ));
            }
            let mut encoder = JPEGEncoder::new_with_quality(&mut encoded, JPEG_QUALITY);
            encoder.encode(&pixels, width, height, ColorType::RGB(8))?;
        }
        Format::Png => {
            PNGEncoder::new(&mut encoded).encode(&pixels, width, height, ColorType::RGB(8))?;
        }
        Format::Pnm => {
            let mut encoder = PNMEncoder::new(&mut encoded)
                .with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
            encoder.encode(&pixels[..], width, height, ColorType::RGB(8))?;
        }
    }
    Ok(encoded)
}

/// Write `buffer` to `path` as JPEG, PNG or binary PPM.  The whole
/// image is encoded in memory first, so a refused extension or a
/// failed encode never leaves a file behind.
pub fn write_image(path: &Path, buffer: &PixelBuffer) -> Result<(), Error> {
    let encoded = encode(format_of(path)?, buffer)?;
    fs::write(path, &encoded)?;
    debug!(
        "wrote {}x{} image ({} bytes) to {}",
        buffer.width(),
        buffer.height(),
        encoded.len(),
        path.display()
    );
    Ok(())
}
