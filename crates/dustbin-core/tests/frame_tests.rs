use dustbin_core::{Frame, FrameError, extract_jpeg};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0xFF, 0xD9];

#[test]
fn extracts_image_surrounded_by_padding() {
    let mut raw = vec![0u8; 16];
    raw.extend_from_slice(JPEG);
    raw.extend_from_slice(&[0xAA; 32]);

    let frame = extract_jpeg(&raw).unwrap();
    assert_eq!(frame.as_bytes(), JPEG);
}

#[test]
fn stops_at_first_end_marker() {
    let mut raw = JPEG.to_vec();
    raw.extend_from_slice(JPEG);

    assert_eq!(extract_jpeg(&raw).unwrap().len(), JPEG.len());
}

#[test]
fn rejects_empty_capture() {
    assert_eq!(extract_jpeg(&[]).unwrap_err(), FrameError::Empty);
    assert_eq!(Frame::new(&[]).unwrap_err(), FrameError::Empty);
}

#[test]
fn rejects_capture_without_start() {
    assert_eq!(
        extract_jpeg(&[0u8; 64]).unwrap_err(),
        FrameError::MissingStart
    );
}

#[test]
fn rejects_truncated_image() {
    let raw = &JPEG[..JPEG.len() - 2];
    assert_eq!(extract_jpeg(raw).unwrap_err(), FrameError::Truncated);
}

#[test]
fn frame_requires_start_marker() {
    assert!(Frame::new(JPEG).is_ok());
    assert_eq!(
        Frame::new(b"not a jpeg").unwrap_err(),
        FrameError::MissingStart
    );
}
