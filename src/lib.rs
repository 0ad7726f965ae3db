//! # wav2txt
//!
//! wav2txt turns 16-bit stereo WAV files into plain text that small playback programs can embed.
//!
//! ## Usage
//!
//! `convert()` handles the whole job: it checks the input path, parses the WAV with a `Decoder`,
//! keeps every tenth left-channel sample, and writes them as `value,` text next to the input
//! (`song.wav` becomes `song.txt`).
//!
//! For finer control, open a `Decoder` yourself, call `convert::encode()` to get the text, and
//! write it with `convert::write_output()`. `encoder::encode_frames()` works on raw frame bytes
//! with no I/O at all.

pub mod convert;
mod decoder;
pub mod encoder;

pub use convert::{convert, ConvertError, ConvertOptions, Conversion};
pub use decoder::*;
pub use encoder::Channel;
