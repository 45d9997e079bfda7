//! accesslog - HTTP 访问日志格式化库
//!
//! 将一次 HTTP 请求的访问信息渲染为一行日志，并交给外部输出器写出。
//!
//! ## 模块
//!
//! - **cfg**: 配置与类型注册（TypeOptions、trait 注册表）
//! - **log**: 访问日志记录、格式化器、输出器以及分发器
//!
//! ## 输出格式
//!
//! - **Apache**: 固定格式的单行文本
//! - **JSON**: 结构化对象（默认格式，不做 HTML 转义）

pub mod cfg;
pub mod log;

// 重新导出主要的公共 API
pub use cfg::{create_trait_from_type_options, register_trait, TypeOptions};

pub use self::log::{
    access_log, AccessLogError, AccessLogFormat, AccessLogRecord, AccessLogger,
    AccessLoggerConfig, BodyValue, LogAppender, LogFormatter, LogLevel, APACHE_FORMAT,
    JSON_FORMAT,
};
