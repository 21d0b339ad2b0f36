mod encoding;
mod logging;
mod strings;

pub use encoding::decode_base64_text;
pub use logging::setup_logging;
pub use strings::title_case;
