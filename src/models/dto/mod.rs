pub mod request;

pub use request::{GenerateTestRequest, UploadForm};
