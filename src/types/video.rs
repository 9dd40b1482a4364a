//! Video resources returned by the video endpoint family.
//!
//! Video payloads already nest their `user` object, so these types decode
//! without any tree rewriting.

use serde::{Deserialize, Serialize};

use super::User;
use crate::normalize::Payload;

/// One page of video results.
#[derive(Serialize, Deserialize)]
pub struct VideoPage {
    /// Total number of results across all pages.
    pub total_results: u64,

    /// 1-based index of this page.
    pub page: u32,

    /// Page size that was requested from the API.
    pub per_page: u32,

    /// The videos on this page.
    pub videos: Vec<Video>,

    /// URL of the next page, when the server reports one.
    pub next_page: Option<String>,
}

impl Payload for VideoPage {}

/// A single video with its encoded files and preview pictures.
#[derive(Serialize, Deserialize)]
pub struct Video {
    /// Numeric video identifier.
    pub id: u64,

    /// Pixel width of the original file.
    pub width: u32,

    /// Pixel height of the original file.
    pub height: u32,

    /// Web page for this video.
    pub url: String,

    /// Thumbnail image URL.
    pub image: String,

    /// Duration in seconds.
    pub duration: u32,

    /// Who uploaded the video.
    pub user: User,

    /// Encoded files available for this video.
    pub video_files: Vec<VideoFile>,

    /// Preview pictures sampled from the video.
    pub video_pictures: Vec<VideoPicture>,
}

impl Payload for Video {}

/// One encoded file of a video.
#[derive(Serialize, Deserialize)]
pub struct VideoFile {
    /// Numeric file identifier.
    pub id: u64,

    /// Quality tier ("hd", "sd", ...).
    pub quality: String,

    /// MIME type of the file.
    pub file_type: String,

    /// Pixel width of this encoding.
    pub width: u32,

    /// Pixel height of this encoding.
    pub height: u32,

    /// Direct URL of the file.
    pub link: String,
}

/// One preview picture sampled from a video.
#[derive(Serialize, Deserialize)]
pub struct VideoPicture {
    /// Numeric picture identifier.
    pub id: u64,

    /// URL of the picture.
    pub picture: String,

    /// Position in the preview sequence.
    #[serde(rename = "nr")]
    pub index: u32,
}
