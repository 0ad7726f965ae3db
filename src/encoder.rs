//! Turns raw stereo frame bytes into decimated sample text.

/// Keep one frame out of this many.
pub const DECIMATION: usize = 10;

/// Bytes per interleaved 16-bit stereo frame.
pub const FRAME_BYTES: usize = 4;

const MIDPOINT: u16 = 0x8000;

/// Selects which half of each stereo frame is encoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channel {
    /// First sample of each frame.
    Left,
    /// Second sample of each frame.
    Right,
}

impl Default for Channel {
    fn default() -> Self {
        Self::Left
    }
}

impl Channel {
    #[inline]
    fn byte_offset(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 2,
        }
    }
}

/// Maps an unsigned 16-bit word onto a signed sample.
///
/// Words below `0x8000` pass through, words above it are read as two's complement.
/// `0x8000` itself (which would be `-32768`) becomes `0`, so output values always
/// lie in `-32767..=32767`.
#[inline]
pub fn signed_sample(raw: u16) -> i16 {
    if raw == MIDPOINT {
        0
    } else {
        raw as i16
    }
}

/// Reads the little-endian word of `channel` in frame `index`.
///
/// Panics if the frame lies outside `frames`.
#[inline]
pub fn channel_value(frames: &[u8], index: usize, channel: Channel) -> u16 {
    let at = index * FRAME_BYTES + channel.byte_offset();
    u16::from_le_bytes([frames[at], frames[at + 1]])
}

/// Number of values `encode_frames` emits for `frames` frames.
#[inline]
pub fn output_len(frames: usize, step: usize) -> usize {
    (frames + step - 1) / step
}

/// Encodes every `step`th frame of `frames` as `value,` text.
///
/// `frames` is interleaved 16-bit little-endian stereo data. Bytes past the last
/// whole frame are ignored.
///
/// # Panics
///
/// Panics if `step` is zero.
pub fn encode_frames(frames: &[u8], step: usize, channel: Channel) -> String {
    assert!(step > 0, "decimation step must be at least 1");
    let count = frames.len() / FRAME_BYTES;
    // Widest value is "-32767," at 7 bytes.
    let mut text = String::with_capacity(output_len(count, step) * 7);
    for index in (0..count).step_by(step) {
        let sample = signed_sample(channel_value(frames, index, channel));
        text.push_str(&sample.to_string());
        text.push(',');
    }
    text
}
