//! PNG text-chunk reading.
//!
//! Recovers the embedded key/value text segments of a PNG (tEXt, zTXt and
//! iTXt chunks) into an [`ImageMetadata`]. Latin-1 chunks (tEXt/zTXt) are the
//! dedicated text-chunk source and are consumed first; iTXt chunks play the
//! role of the generic info map and are merged only for keys not already
//! present. Nothing of the image payload itself is decoded beyond what is
//! needed to walk the chunk stream.

use crate::errors::ExtractError;
use crate::types::ImageMetadata;
use tracing::warn;

/// Reads the text metadata of a PNG byte stream.
///
/// Text chunks may legally appear after the image data, so the decode is run
/// to completion before collecting; a truncated tail is tolerated and never
/// discards chunks that were already read. Returns `ExtractError::InvalidPng`
/// only when the stream is not a PNG at all.
pub fn read_png_metadata(bytes: &[u8]) -> Result<ImageMetadata, ExtractError> {
    let decoder = png::Decoder::new(bytes);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ExtractError::InvalidPng(e.to_string()))?;

    if let Err(e) = reader.finish() {
        warn!("PNG decode did not run to completion, keeping metadata read so far: {e}");
    }

    let info = reader.info();
    let mut metadata = ImageMetadata::new();

    for chunk in &info.uncompressed_latin1_text {
        metadata.insert(chunk.keyword.clone(), chunk.text.clone());
    }
    for chunk in &info.compressed_latin1_text {
        match chunk.get_text() {
            Ok(text) => {
                metadata.insert(chunk.keyword.clone(), text);
            }
            Err(e) => warn!("Skipping undecodable zTXt chunk '{}': {e}", chunk.keyword),
        }
    }
    // iTXt last: the generic info source only fills keys the dedicated text
    // chunks did not claim.
    for chunk in &info.utf8_text {
        match chunk.get_text() {
            Ok(text) => {
                metadata.insert(chunk.keyword.clone(), text);
            }
            Err(e) => warn!("Skipping undecodable iTXt chunk '{}': {e}", chunk.keyword),
        }
    }

    Ok(metadata)
}

/// Encodes a 1x1 grayscale PNG carrying the given text chunks. Shared by
/// the unit tests in this crate.
#[cfg(test)]
pub(crate) fn encode_png(
    text: &[(&str, &str)],
    ztxt: &[(&str, &str)],
    itxt: &[(&str, &str)],
) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, 1, 1);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        for (key, value) in text {
            encoder
                .add_text_chunk(key.to_string(), value.to_string())
                .expect("tEXt chunk");
        }
        for (key, value) in ztxt {
            encoder
                .add_ztxt_chunk(key.to_string(), value.to_string())
                .expect("zTXt chunk");
        }
        for (key, value) in itxt {
            encoder
                .add_itxt_chunk(key.to_string(), value.to_string())
                .expect("iTXt chunk");
        }
        let mut writer = encoder.write_header().expect("PNG header");
        writer.write_image_data(&[0]).expect("PNG image data");
        writer.finish().expect("PNG trailer");
    }
    buf
}
