//! File-level conversion: input checks, output naming and the write.

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

use crate::decoder::{AudioInfo, Decoder, DecoderError};
use crate::encoder::{self, Channel, DECIMATION};

const OUTPUT_EXTENSION: &str = "txt";

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Keep one frame out of this many.
    pub step: usize,
    /// Which channel of each frame to encode.
    pub channel: Channel,
    /// Where to write the text. Derived from the input path when `None`.
    pub output: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            step: DECIMATION,
            channel: Channel::Left,
            output: None,
        }
    }
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Frames declared by the input.
    pub frames: u32,
    /// Values written to the output.
    pub points: usize,
    /// The file that was written.
    pub output: PathBuf,
}

/// An error encountered while converting a file.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Invalid file, check the path: {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid file, check the path: {} is not a regular file", .0.display())]
    NotAFile(PathBuf),
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    #[error("decimation step must be at least 1")]
    InvalidStep,
    #[error(transparent)]
    Decoder(#[from] DecoderError),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Checks that `path` names an existing regular file.
pub fn check_input<P: AsRef<Path>>(path: P) -> Result<(), ConvertError> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(ConvertError::NotAFile(path.to_owned())),
        Err(_) => Err(ConvertError::NotFound(path.to_owned())),
    }
}

/// Derives the text file name for `input`.
///
/// The last three characters of the path are replaced with `txt`, so `a.wav`
/// becomes `a.txt`. No check is made that they actually spell an extension.
pub fn output_path<P: AsRef<Path>>(input: P) -> Result<PathBuf, ConvertError> {
    let input = input.as_ref();
    let s = input
        .to_str()
        .ok_or_else(|| ConvertError::NonUtf8Path(input.to_owned()))?;
    let stem = match s.char_indices().rev().nth(2) {
        Some((at, _)) => &s[..at],
        None => "",
    };
    Ok(PathBuf::from(format!("{}{}", stem, OUTPUT_EXTENSION)))
}

/// Decodes every frame of `decoder` and encodes it according to `options`.
pub fn encode<R: Read>(decoder: Decoder<R>, options: &ConvertOptions) -> Result<String, ConvertError> {
    if options.step == 0 {
        return Err(ConvertError::InvalidStep);
    }
    decoder.validate_layout()?;
    let frames = decoder.into_frame_bytes()?;
    let text = encoder::encode_frames(&frames, options.step, options.channel);
    debug!(bytes = frames.len(), chars = text.len(), "encoded frames");
    Ok(text)
}

/// Writes `text` as the entire contents of `path`, replacing any existing file.
pub fn write_output<P: AsRef<Path>>(path: P, text: &str) -> Result<(), ConvertError> {
    let path = path.as_ref();
    fs::write(path, text).map_err(|source| ConvertError::Write {
        path: path.to_owned(),
        source,
    })
}

/// Converts the WAV file at `input` into a text file.
///
/// Nothing is written unless decoding succeeds.
pub fn convert<P: AsRef<Path>>(input: P, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    convert_with(input, options, |_| {})
}

/// Like `convert`, but calls `on_open` with the parsed header before any samples are read.
pub fn convert_with<P, F>(input: P, options: &ConvertOptions, on_open: F) -> Result<Conversion, ConvertError>
where
    P: AsRef<Path>,
    F: FnOnce(&AudioInfo),
{
    let input = input.as_ref();
    check_input(input)?;
    let output = match &options.output {
        Some(path) => path.clone(),
        None => output_path(input)?,
    };

    let decoder = Decoder::open(input)?;
    let info = decoder.info();
    on_open(&info);
    let text = encode(decoder, options)?;
    write_output(&output, &text)?;

    let frames = info.frames();
    let points = encoder::output_len(frames as usize, options.step);
    info!(input = %input.display(), output = %output.display(), frames, points, "converted");
    Ok(Conversion {
        frames,
        points,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_extension_becomes_txt() {
        assert_eq!(output_path("song.wav").unwrap(), PathBuf::from("song.txt"));
        assert_eq!(output_path("dir/SONG.WAV").unwrap(), PathBuf::from("dir/SONG.txt"));
    }

    #[test]
    fn last_three_characters_are_replaced_blindly() {
        assert_eq!(output_path("clip.aiff").unwrap(), PathBuf::from("clip.atxt"));
        assert_eq!(output_path("ab").unwrap(), PathBuf::from("txt"));
        assert_eq!(output_path("ñandú.wav").unwrap(), PathBuf::from("ñandú.txt"));
    }

    #[test]
    fn default_options_keep_every_tenth_left_sample() {
        let options = ConvertOptions::default();
        assert_eq!(options.step, 10);
        assert_eq!(options.channel, Channel::Left);
        assert!(options.output.is_none());
    }

    #[test]
    fn missing_input_is_not_found() {
        let err = check_input("/definitely/not/here.wav").unwrap_err();
        assert!(matches!(err, ConvertError::NotFound(_)));
    }

    #[test]
    fn directory_input_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_input(dir.path()).unwrap_err();
        assert!(matches!(err, ConvertError::NotAFile(_)));
    }

    #[test]
    fn header_is_reported_before_anything_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hook.wav");
        let err = convert_with(&input, &ConvertOptions::default(), |_| {
            panic!("no header for a missing file")
        })
        .unwrap_err();
        assert!(matches!(err, ConvertError::NotFound(_)));

        std::fs::write(&input, "not a wav").unwrap();
        let mut called = false;
        let err = convert_with(&input, &ConvertOptions::default(), |_| called = true).unwrap_err();
        assert!(matches!(err, ConvertError::Decoder(DecoderError::Format(_))));
        assert!(!called);
    }
}
