//! Hand-assembled JPEG byte streams for tests.
//!
//! The images are structurally valid marker streams (SOI, APPn, tables, frame,
//! scan, EOI). Building blocks are public so tests can assemble the exact
//! expected output of a sanitize call.

/// Wrap `payload` in a length-prefixed marker segment.
pub fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let length = (payload.len() + 2) as u16;
    let mut out = Vec::with_capacity(payload.len() + 4);
    out.extend_from_slice(&[0xFF, marker]);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn soi() -> Vec<u8> {
    vec![0xFF, 0xD8]
}

pub fn eoi() -> Vec<u8> {
    vec![0xFF, 0xD9]
}

/// APP0 JFIF 1.01, 1:1 aspect, no thumbnail.
pub fn app0_jfif() -> Vec<u8> {
    let mut payload = b"JFIF\0".to_vec();
    payload.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
    segment(0xE0, &payload)
}

/// APP1 EXIF segment: big-endian TIFF header with a camera make and GPS-ish bytes.
pub fn app1_exif() -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(b"MM\x00\x2A\x00\x00\x00\x08");
    payload.extend_from_slice(b"Make=Canon;Model=EOS 5D;GPS=51.5007N,0.1246W;");
    // FF D9 inside a segment payload must not confuse the scanner.
    payload.extend_from_slice(&[0xFF, 0xD9, 0x00, 0x01]);
    segment(0xE1, &payload)
}

/// APP1 carrying XMP rather than EXIF. Not an EXIF segment.
pub fn app1_xmp() -> Vec<u8> {
    let mut payload = b"http://ns.adobe.com/xap/1.0/\0".to_vec();
    payload.extend_from_slice(b"<x:xmpmeta xmlns:x=\"adobe:ns:meta/\"/>");
    segment(0xE1, &payload)
}

/// COM segment.
pub fn comment(text: &[u8]) -> Vec<u8> {
    segment(0xFE, text)
}

fn dqt() -> Vec<u8> {
    let mut payload = vec![0x00];
    payload.extend(1..=64u8);
    segment(0xDB, &payload)
}

fn sof0() -> Vec<u8> {
    // 8-bit precision, 1x1, one component (id 1, 1x1 sampling, table 0).
    segment(
        0xC0,
        &[0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00],
    )
}

fn dht(class_and_id: u8) -> Vec<u8> {
    let mut payload = vec![class_and_id];
    let mut counts = [0u8; 16];
    counts[0] = 1;
    payload.extend_from_slice(&counts);
    payload.push(0x00);
    segment(0xC4, &payload)
}

fn sos() -> Vec<u8> {
    segment(0xDA, &[0x01, 0x01, 0x00, 0x00, 0x3F, 0x00])
}

/// Entropy-coded bytes including a stuffed 0xFF and a restart marker.
fn scan_data() -> Vec<u8> {
    vec![0xFB, 0xD3, 0xFF, 0x00, 0x28, 0xA2, 0xFF, 0xD0, 0x80, 0x0F]
}

/// Everything after the application segments: tables, frame, one scan, EOI.
pub fn image_body() -> Vec<u8> {
    [dqt(), sof0(), dht(0x00), dht(0x10), sos(), scan_data(), eoi()].concat()
}

/// Two scans separated by a table segment whose payload contains `FF D9`.
pub fn progressive_body() -> Vec<u8> {
    let mut tricky_table = vec![0x00];
    let mut counts = [0u8; 16];
    counts[1] = 2;
    tricky_table.extend_from_slice(&counts);
    tricky_table.extend_from_slice(&[0xFF, 0xD9]);
    [
        dqt(),
        segment(0xC2, &[0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00]),
        dht(0x00),
        sos(),
        scan_data(),
        segment(0xC4, &tricky_table),
        sos(),
        scan_data(),
        eoi(),
    ]
    .concat()
}

/// Minimal JFIF image without metadata.
pub fn minimal_jpeg() -> Vec<u8> {
    [soi(), app0_jfif(), image_body()].concat()
}

/// JFIF image with one EXIF segment after APP0.
pub fn jpeg_with_exif() -> Vec<u8> {
    [soi(), app0_jfif(), app1_exif(), image_body()].concat()
}

/// Image whose metadata block mixes EXIF, XMP and a comment.
pub fn jpeg_with_exif_and_xmp() -> Vec<u8> {
    [
        soi(),
        app1_exif(),
        app0_jfif(),
        app1_xmp(),
        comment(b"shot on holiday"),
        app1_exif(),
        image_body(),
    ]
    .concat()
}

/// Progressive-style image with EXIF and a table between scans.
pub fn progressive_jpeg_with_exif() -> Vec<u8> {
    [soi(), app1_exif(), progressive_body()].concat()
}
