//! JPEG EXIF stripping.
//!
//! A JPEG is a sequence of segments introduced by `FF xx` markers. Up to the
//! first start-of-scan every segment except the standalone markers carries a
//! big-endian length that counts itself. The sanitizer walks these header
//! segments, drops every APP1 segment whose payload starts with `Exif\0\0`, and
//! copies everything else verbatim. From SOS onward the stream is copied as-is
//! once it has been checked to end in an EOI marker.
//!
//! Segments preserved byte-for-byte include APP0 (JFIF), APP1 carrying XMP,
//! APP2 (ICC), COM, quantization/Huffman tables, frame headers and all scans.

use std::ops::Range;

use thiserror::Error;

/// JPEG marker bytes.
mod markers {
    pub const PREFIX: u8 = 0xFF;

    pub const SOI: u8 = 0xD8; // Start of image.
    pub const EOI: u8 = 0xD9; // End of image.
    pub const SOS: u8 = 0xDA; // Start of scan.
    pub const TEM: u8 = 0x01;
    pub const STUFFED: u8 = 0x00;

    pub const RST0: u8 = 0xD0;
    pub const RST7: u8 = 0xD7;

    pub const APP1: u8 = 0xE1; // EXIF, XMP.
}

/// Identifier at the start of an EXIF APP1 payload.
pub const EXIF_IDENTIFIER: &[u8; 6] = b"Exif\0\0";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("data too short to be a JPEG ({len} bytes)")]
    TooShort { len: usize },

    #[error("missing JPEG start-of-image marker")]
    MissingSoi,

    #[error("expected marker at offset {offset}, found byte 0x{found:02X}")]
    UnexpectedByte { offset: usize, found: u8 },

    #[error("unexpected marker 0x{marker:02X} at offset {offset}")]
    UnexpectedMarker { offset: usize, marker: u8 },

    #[error("segment 0x{marker:02X} at offset {offset} has invalid length {length}")]
    InvalidSegmentLength { offset: usize, marker: u8, length: u16 },

    #[error("truncated {what} at offset {offset}")]
    Truncated { offset: usize, what: &'static str },

    #[error("no start-of-scan marker before end of image")]
    MissingScan,

    #[error("image data is not terminated by an end-of-image marker")]
    MissingEoi,
}

/// Result of a successful sanitize call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeReport {
    pub data: Vec<u8>,
    pub exif_segments_removed: usize,
    pub bytes_removed: usize,
}

impl SanitizeReport {
    /// True when no EXIF segment was present and `data` equals the input.
    pub fn is_unchanged(&self) -> bool {
        self.exif_segments_removed == 0
    }
}

fn is_standalone_marker(marker: u8) -> bool {
    marker == markers::TEM || (markers::RST0..=markers::RST7).contains(&marker)
}

fn read_length(data: &[u8], pos: usize, marker: u8, segment_start: usize) -> Result<usize, ParseError> {
    if pos + 2 > data.len() {
        return Err(ParseError::Truncated {
            offset: segment_start,
            what: "segment header",
        });
    }

    let length = u16::from_be_bytes([data[pos], data[pos + 1]]);
    if length < 2 {
        return Err(ParseError::InvalidSegmentLength {
            offset: segment_start,
            marker,
            length,
        });
    }

    let length = length as usize;
    if pos + length > data.len() {
        return Err(ParseError::Truncated {
            offset: segment_start,
            what: "segment",
        });
    }

    Ok(length)
}

/// Walk the header segments. Returns the EXIF segment ranges to drop and the
/// offset just past the first SOS marker.
fn scan_header_segments(data: &[u8]) -> Result<(Vec<Range<usize>>, usize), ParseError> {
    let mut exif_ranges = Vec::new();
    let mut pos = 2;

    loop {
        if pos >= data.len() {
            return Err(ParseError::MissingScan);
        }
        if data[pos] != markers::PREFIX {
            return Err(ParseError::UnexpectedByte {
                offset: pos,
                found: data[pos],
            });
        }

        let segment_start = pos;

        // Any number of FF fill bytes may precede a marker.
        while pos < data.len() && data[pos] == markers::PREFIX {
            pos += 1;
        }
        if pos >= data.len() {
            return Err(ParseError::Truncated {
                offset: segment_start,
                what: "marker",
            });
        }

        let marker = data[pos];
        pos += 1;

        match marker {
            markers::SOS => return Ok((exif_ranges, pos)),
            markers::EOI => return Err(ParseError::MissingScan),
            markers::SOI | markers::STUFFED => {
                return Err(ParseError::UnexpectedMarker {
                    offset: pos - 2,
                    marker,
                })
            }
            m if is_standalone_marker(m) => continue,
            _ => {}
        }

        let length = read_length(data, pos, marker, segment_start)?;
        let end = pos + length;

        if marker == markers::APP1 && data[pos + 2..end].starts_with(EXIF_IDENTIFIER) {
            exif_ranges.push(segment_start..end);
        }

        pos = end;
    }
}

/// Check that the scan section starting right after an SOS marker is complete.
fn verify_scans(data: &[u8], after_sos: usize) -> Result<(), ParseError> {
    let header = read_length(data, after_sos, markers::SOS, after_sos - 2)?;
    let mut pos = after_sos + header;

    while pos + 1 < data.len() {
        if data[pos] != markers::PREFIX {
            pos += 1;
            continue;
        }

        match data[pos + 1] {
            markers::EOI => return Ok(()),
            markers::STUFFED => pos += 2,
            m if (markers::RST0..=markers::RST7).contains(&m) => pos += 2,
            markers::PREFIX => pos += 1,
            marker => {
                // Table or scan header between scans.
                let length = read_length(data, pos + 2, marker, pos)?;
                pos += 2 + length;
            }
        }
    }

    Err(ParseError::MissingEoi)
}

/// Remove EXIF segments and report what was removed.
pub fn sanitize_with_report(data: &[u8]) -> Result<SanitizeReport, ParseError> {
    if data.len() < 4 {
        return Err(ParseError::TooShort { len: data.len() });
    }
    if data[0] != markers::PREFIX || data[1] != markers::SOI {
        return Err(ParseError::MissingSoi);
    }

    let (exif_ranges, after_sos) = scan_header_segments(data)?;
    verify_scans(data, after_sos)?;

    if exif_ranges.is_empty() {
        return Ok(SanitizeReport {
            data: data.to_vec(),
            exif_segments_removed: 0,
            bytes_removed: 0,
        });
    }

    let bytes_removed: usize = exif_ranges.iter().map(|r| r.len()).sum();
    let mut output = Vec::with_capacity(data.len() - bytes_removed);
    let mut copied_to = 0;
    for range in &exif_ranges {
        output.extend_from_slice(&data[copied_to..range.start]);
        copied_to = range.end;
    }
    output.extend_from_slice(&data[copied_to..]);

    tracing::debug!(
        exif_segments_removed = exif_ranges.len(),
        bytes_removed,
        "Removed EXIF segments"
    );

    Ok(SanitizeReport {
        data: output,
        exif_segments_removed: exif_ranges.len(),
        bytes_removed,
    })
}

/// Remove EXIF metadata from JPEG data. Input without EXIF comes back unchanged.
pub fn sanitize(data: &[u8]) -> Result<Vec<u8>, ParseError> {
    sanitize_with_report(data).map(|report| report.data)
}
