//! 访问日志模块
//!
//! 把一次 HTTP 请求的访问信息渲染为一行日志，并写入 appender。
//!
//! # 特性
//!
//! - 两种输出格式：Apache 单行文本、JSON 对象（默认）
//! - JSON 输出不转义 `<`、`>`、`&`
//! - JSON 编码失败时输出 `{"Error": "..."}`，格式化本身不会失败
//! - 多种输出目标：ConsoleAppender、FileAppender、FacadeAppender
//! - 基于配置的动态创建
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use accesslog::log::*;
//! use chrono::Local;
//! use std::time::Duration;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config: AccessLoggerConfig = json5::from_str(r#"
//!         {
//!             format: "APACHE_FORMAT",
//!             appender: {
//!                 type: "ConsoleAppender",
//!                 options: {
//!                     target: "stdout"
//!                 }
//!             }
//!         }
//!     "#)?;
//!
//!     let logger = AccessLogger::new(config)?;
//!
//!     let record = AccessLogRecord::new(Local::now().fixed_offset())
//!         .with_remote_addr("10.0.0.1")
//!         .with_request("GET", "GET / HTTP/1.1", "HTTP/1.1")
//!         .with_response(200, 512, Duration::from_millis(12));
//!
//!     logger.access(&record)?;
//!     logger.log(&record, AccessLogFormat::Json)?;
//!
//!     Ok(())
//! }
//! ```

pub mod access_log_record;
pub mod access_logger;
pub mod appender;
pub mod body_value;
pub mod error;
pub mod format;
pub mod formatter;
pub mod level;

// 重新导出核心类型
pub use access_log_record::{AccessLogRecord, RequestBody};
pub use access_logger::{access_log, AccessLogger, AccessLoggerConfig};
pub use body_value::BodyValue;
pub use error::AccessLogError;
pub use format::{AccessLogFormat, APACHE_FORMAT, JSON_FORMAT};
pub use level::LogLevel;

pub use appender::{
    create_appender_from_options, register_appenders, ConsoleAppender, ConsoleAppenderConfig,
    FacadeAppender, FacadeAppenderConfig, FileAppender, FileAppenderConfig, LogAppender, Target,
};
pub use formatter::{
    ApacheFormatter, ApacheFormatterConfig, HtmlEscapeFormatter, JsonFormatter,
    JsonFormatterConfig, LogFormatter, APACHE_TIME_FORMAT,
};
