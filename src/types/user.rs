//! Attribution shared by photo and video resources.

use serde::{Deserialize, Serialize};

/// The person who took or uploaded a piece of media.
///
/// Video payloads nest this object as `user`. Photo payloads report the same
/// data as flat `photographer*` fields and are rewritten into this shape
/// before decoding.
#[derive(Serialize, Deserialize)]
pub struct User {
    /// Numeric user identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Profile page URL.
    pub url: String,
}
