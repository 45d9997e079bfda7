use crate::cfg::{create_trait_from_type_options, TypeOptions};
use crate::log::{
    access_log_record::AccessLogRecord,
    appender::{register_appenders, LogAppender},
    format::AccessLogFormat,
    formatter::{
        ApacheFormatter, ApacheFormatterConfig, JsonFormatter, JsonFormatterConfig, LogFormatter,
    },
    level::LogLevel,
};
use anyhow::Result;
use once_cell::sync::Lazy;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::sync::Arc;

/// AccessLogger 配置
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct AccessLoggerConfig {
    /// 默认输出格式（格式标记），无法识别的标记按 JSON 处理
    pub format: AccessLogFormat,

    /// Apache 格式化器配置
    pub apache: ApacheFormatterConfig,

    /// JSON 格式化器配置
    pub json: JsonFormatterConfig,

    /// Appender 配置
    #[default(TypeOptions::new("ConsoleAppender"))]
    pub appender: TypeOptions,
}

/// 两种格式化器，按格式选择其一并去掉输出两端的空白
struct Formatters {
    apache: ApacheFormatter,
    json: JsonFormatter,
}

impl Formatters {
    fn new(apache: ApacheFormatterConfig, json: JsonFormatterConfig) -> Self {
        Self {
            apache: ApacheFormatter::new(apache),
            json: JsonFormatter::new(json),
        }
    }

    fn render(&self, record: &AccessLogRecord, format: AccessLogFormat) -> String {
        let formatted = match format {
            AccessLogFormat::Apache => self.apache.format(record),
            AccessLogFormat::Json => self.json.format(record),
        };

        let trimmed = formatted.trim();
        if trimmed.len() == formatted.len() {
            formatted
        } else {
            trimmed.to_string()
        }
    }
}

/// `access_log` 使用的默认格式化器
static DEFAULT_FORMATTERS: Lazy<Formatters> = Lazy::new(|| {
    Formatters::new(
        ApacheFormatterConfig::default(),
        JsonFormatterConfig::default(),
    )
});

/// 访问日志分发器
///
/// 按格式选择 Apache 或 JSON 格式化器，去掉输出两端的空白后以
/// `LogLevel::Access` 写入 appender。分发器本身不保存跨调用的状态
pub struct AccessLogger {
    format: AccessLogFormat,
    formatters: Formatters,
    appender: Arc<dyn LogAppender>,
}

impl AccessLogger {
    /// 从配置创建 AccessLogger
    ///
    /// 每次调用都会注册内置 Appender（重复注册会覆盖同名条目），注册失败时返回错误
    pub fn new(config: AccessLoggerConfig) -> Result<Self> {
        register_appenders()?;

        let appender_box: Box<dyn LogAppender> = create_trait_from_type_options(&config.appender)?;
        tracing::debug!(
            format = %config.format,
            appender = %config.appender.type_name,
            "access logger created"
        );

        Ok(Self {
            format: config.format,
            formatters: Formatters::new(config.apache, config.json),
            appender: Arc::from(appender_box),
        })
    }

    /// 使用默认格式化器和指定的 appender 创建 AccessLogger
    pub fn with_appender(appender: Arc<dyn LogAppender>) -> Self {
        Self {
            format: AccessLogFormat::default(),
            formatters: Formatters::new(
                ApacheFormatterConfig::default(),
                JsonFormatterConfig::default(),
            ),
            appender,
        }
    }

    /// 设置默认输出格式
    pub fn with_format(mut self, format: AccessLogFormat) -> Self {
        self.format = format;
        self
    }

    /// 默认输出格式
    pub fn default_format(&self) -> AccessLogFormat {
        self.format
    }

    /// 按指定格式渲染记录，返回去掉两端空白后的日志行
    pub fn format(&self, record: &AccessLogRecord, format: AccessLogFormat) -> String {
        self.formatters.render(record, format)
    }

    /// 按指定格式输出访问日志，只会返回 appender 的写入错误
    pub fn log(&self, record: &AccessLogRecord, format: AccessLogFormat) -> Result<()> {
        let line = self.format(record, format);
        self.appender.append(LogLevel::Access, &line)
    }

    /// 按格式标记输出访问日志，无法识别的标记按 JSON 处理
    pub fn log_token(&self, record: &AccessLogRecord, token: &str) -> Result<()> {
        self.log(record, AccessLogFormat::from_token(token))
    }

    /// 按默认格式输出访问日志
    pub fn access(&self, record: &AccessLogRecord) -> Result<()> {
        self.log(record, self.format)
    }

    /// 刷新 appender
    pub fn flush(&self) -> Result<()> {
        self.appender.flush()
    }
}

/// 使用默认格式化器把一条访问日志写入指定 appender
///
/// # 示例
///
/// ```ignore
/// let appender = ConsoleAppender::new(ConsoleAppenderConfig::default());
/// access_log(&appender, &record, APACHE_FORMAT)?;
/// ```
pub fn access_log(appender: &dyn LogAppender, record: &AccessLogRecord, token: &str) -> Result<()> {
    let line = DEFAULT_FORMATTERS.render(record, AccessLogFormat::from_token(token));
    appender.append(LogLevel::Access, &line)
}
