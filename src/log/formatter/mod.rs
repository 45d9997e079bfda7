mod apache_formatter;
mod core;
mod escape;
mod json_formatter;

pub use apache_formatter::{ApacheFormatter, ApacheFormatterConfig, APACHE_TIME_FORMAT};
pub use core::LogFormatter;
pub use escape::HtmlEscapeFormatter;
pub use json_formatter::{JsonFormatter, JsonFormatterConfig};
