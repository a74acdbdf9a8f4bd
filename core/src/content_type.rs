//! Content-type token handling.
//!
//! Serializers are registered under the MIME subtype alone (`"json"`), so
//! outgoing requests expand a token to `application/<token>` and incoming
//! `content-type` headers are cut back down to the token.

/// Extract the subtype token from a MIME content type.
///
/// Only the first `/` and the first `;` matter. Input without a `/` is
/// returned unchanged, which lets a bare token pass through.
pub fn get_content_type(content_type: &str) -> &str {
    let Some(slash) = content_type.find('/') else {
        return content_type;
    };
    match content_type.find(';') {
        Some(semicolon) if semicolon > slash => &content_type[slash + 1..semicolon],
        // A ';' ahead of the '/' yields the span between them, both ends kept.
        Some(semicolon) => &content_type[semicolon..=slash],
        None => &content_type[slash + 1..],
    }
}

/// Expand a serializer token into a request `content-type` value.
pub fn request_content_type(token: &str) -> String {
    format!("application/{token}")
}
