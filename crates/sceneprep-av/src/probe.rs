//! Duration and stream probing via ffprobe.

use crate::tools::require_tool;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Measures the playable duration of one media file.
///
/// One operation, one failure kind: the review stager depends on nothing
/// else, and tests substitute a fake implementation.
pub trait DurationProber {
    /// Duration of the file in seconds.
    fn duration_seconds(&self, file: &Path) -> Result<f64>;
}

/// Extracts per-clip technical details for the metadata walk.
pub trait DetailProber {
    fn details(&self, file: &Path) -> Result<VideoDetails>;
}

/// Technical details of one clip, as far as the prober could determine them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoDetails {
    pub duration_seconds: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Probing backend that shells out to ffprobe.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    tool: PathBuf,
}

impl FfprobeProber {
    /// Resolve ffprobe from the search path.
    pub fn new() -> Result<Self> {
        Ok(Self {
            tool: require_tool("ffprobe")?,
        })
    }

    fn run(&self, args: &[&str], file: &Path) -> Result<String> {
        let output = Command::new(&self.tool)
            .args(args)
            .arg(file)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found("ffprobe")
                } else {
                    Error::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::tool_failed("ffprobe", stderr.to_string()));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::parse_error("ffprobe", format!("invalid UTF-8: {e}")))
    }
}

impl DurationProber for FfprobeProber {
    fn duration_seconds(&self, file: &Path) -> Result<f64> {
        let json = self.run(
            &[
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "json",
            ],
            file,
        )?;
        parse_duration_output(&json)
    }
}

impl DetailProber for FfprobeProber {
    fn details(&self, file: &Path) -> Result<VideoDetails> {
        let json = self.run(
            &[
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ],
            file,
        )?;
        parse_details_output(&json)
    }
}

fn parse_duration_output(json: &str) -> Result<f64> {
    let output: FfprobeOutput = serde_json::from_str(json)?;

    output
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| Error::parse_error("ffprobe", "no duration field in format section"))
}

fn parse_details_output(json: &str) -> Result<VideoDetails> {
    let output: FfprobeOutput = serde_json::from_str(json)?;

    let duration_seconds = output
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.parse::<f64>().ok());

    let video = output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));

    Ok(VideoDetails {
        duration_seconds,
        width: video.and_then(|s| s.width),
        height: video.and_then(|s| s.height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        let json = r#"{"format": {"duration": "12.345000"}}"#;
        assert_eq!(parse_duration_output(json).unwrap(), 12.345);
    }

    #[test]
    fn test_parse_duration_missing_field() {
        let err = parse_duration_output(r#"{"format": {}}"#).unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));

        let err = parse_duration_output(r#"{}"#).unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn test_parse_duration_non_numeric() {
        let err = parse_duration_output(r#"{"format": {"duration": "N/A"}}"#).unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn test_parse_duration_malformed_json() {
        let err = parse_duration_output("mkv: not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_parse_details() {
        let json = r#"{
            "format": {"duration": "61.5"},
            "streams": [
                {"codec_type": "audio", "channels": 2},
                {"codec_type": "video", "width": 1920, "height": 1080}
            ]
        }"#;

        let details = parse_details_output(json).unwrap();
        assert_eq!(details.duration_seconds, Some(61.5));
        assert_eq!(details.width, Some(1920));
        assert_eq!(details.height, Some(1080));
    }

    #[test]
    fn test_parse_details_without_video_stream() {
        let json = r#"{"format": {}, "streams": [{"codec_type": "audio"}]}"#;
        let details = parse_details_output(json).unwrap();
        assert_eq!(details, VideoDetails::default());
    }
}
