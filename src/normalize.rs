//! Pre-decode normalization of wire-format quirks.
//!
//! The photo endpoints report attribution as three flat `photographer*`
//! fields while the video endpoints nest a `user` object. Decoding goes
//! through [`Payload`] so the photo types can rewrite the raw JSON tree
//! into the nested shape before the typed decode runs.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::downloader::truncate_body;
use crate::Error;

/// A response body that may need its raw JSON tree adjusted before decoding.
pub trait Payload: DeserializeOwned {
    /// Rewrites wire-format quirks on the raw tree. The default is a no-op.
    fn prepare(_raw: &mut Value) {}

    /// Parses a response body, applying [`prepare`](Payload::prepare) between
    /// the raw parse and the typed decode.
    fn from_json(body: &str) -> Result<Self, Error> {
        let mut raw: Value = serde_json::from_str(body).map_err(|e| {
            tracing::error!(
                "Failed to parse response body: {} | body: {}",
                e,
                truncate_body(body)
            );
            Error::Decode(e)
        })?;
        Self::prepare(&mut raw);
        serde_json::from_value(raw).map_err(|e| {
            tracing::error!(
                "Unexpected response shape: {} | body: {}",
                e,
                truncate_body(body)
            );
            Error::Decode(e)
        })
    }
}

/// Synthesizes a nested `user` object from the flat `photographer_id`,
/// `photographer` and `photographer_url` fields of one photo item.
///
/// Items that already carry a `user` object, and items missing any of the
/// three flat fields, are left untouched; the typed decode then reports the
/// real shape mismatch.
pub(crate) fn nest_photographer(item: &mut Value) {
    let obj = match item.as_object_mut() {
        Some(obj) => obj,
        None => return,
    };
    if obj.contains_key("user") {
        return;
    }
    let id = obj.get("photographer_id").cloned();
    let name = obj.get("photographer").cloned();
    let url = obj.get("photographer_url").cloned();
    if let (Some(id), Some(name), Some(url)) = (id, name, url) {
        obj.insert("user".to_string(), json!({ "id": id, "name": name, "url": url }));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{nest_photographer, Payload};
    use crate::Error;

    #[derive(serde::Deserialize)]
    struct Blob {
        value: i64,
    }
    impl Payload for Blob {}

    #[test]
    fn default_prepare_is_a_no_op() {
        let blob = Blob::from_json(r#"{"value": 3}"#).unwrap();
        assert_eq!(blob.value, 3);
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let result = Blob::from_json("{not json");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn shape_mismatch_is_a_decode_error() {
        let result = Blob::from_json(r#"{"value": "three"}"#);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn nests_flat_photographer_fields() {
        let mut item = json!({
            "id": 1024,
            "photographer_id": 7,
            "photographer": "Ada",
            "photographer_url": "http://x"
        });
        nest_photographer(&mut item);

        assert_eq!(item["user"], json!({ "id": 7, "name": "Ada", "url": "http://x" }));
        // The flat fields stay in place; the typed decode simply ignores them.
        assert_eq!(item["photographer"], "Ada");
    }

    #[test]
    fn existing_user_object_is_left_verbatim() {
        let mut item = json!({
            "id": 1024,
            "user": { "id": 99, "name": "Grace", "url": "http://y" },
            "photographer_id": 7,
            "photographer": "Ada",
            "photographer_url": "http://x"
        });
        nest_photographer(&mut item);

        assert_eq!(item["user"], json!({ "id": 99, "name": "Grace", "url": "http://y" }));
    }

    #[test]
    fn partial_flat_fields_are_left_untouched() {
        let mut item = json!({
            "id": 1024,
            "photographer": "Ada"
        });
        nest_photographer(&mut item);

        assert!(item.get("user").is_none());
    }

    #[test]
    fn non_object_items_are_ignored() {
        let mut item = json!([1, 2, 3]);
        nest_photographer(&mut item);
        assert_eq!(item, json!([1, 2, 3]));
    }
}
