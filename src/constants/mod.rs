pub mod generation_prompt;

/// Upper bound for JSON request bodies, matching the upload cap.
pub const JSON_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Upper bound for a multipart upload, fields included.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
