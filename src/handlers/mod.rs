pub mod generation_handler;

pub use generation_handler::{generate_test, health_check, upload_and_generate};
