use crate::log::access_log_record::AccessLogRecord;
use crate::log::formatter::LogFormatter;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::fmt::Write;

/// Apache 风格时间格式：日/月份缩写/四位年份 时:分:秒（24 小时制）
pub const APACHE_TIME_FORMAT: &str = "%d/%b/%Y %H:%M:%S";

/// ApacheFormatter 配置
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct ApacheFormatterConfig {
    /// 请求时间的 strftime 格式
    #[default(APACHE_TIME_FORMAT.to_string())]
    pub time_format: String,
}

/// Apache 访问日志格式化器
///
/// 输出格式：
/// `<remote_addr> - - [<time>] "<request> <status> <bytes>" <elapsed_seconds> <referrer> <user_agent>\n`
///
/// 除请求组两侧的引号外不做任何转义或加引号，时间按记录自身的时区输出
pub struct ApacheFormatter {
    config: ApacheFormatterConfig,
}

impl ApacheFormatter {
    pub fn new(config: ApacheFormatterConfig) -> Self {
        Self { config }
    }
}

impl LogFormatter for ApacheFormatter {
    fn format(&self, record: &AccessLogRecord) -> String {
        // 预分配容量：固定部分与数字字段约 64 字节 + 各字符串字段
        let capacity = 64
            + record.remote_addr.len()
            + record.request.len()
            + record.http_referrer.len()
            + record.http_user_agent.len();
        let mut result = String::with_capacity(capacity);

        // 写入 String 不会失败
        let _ = writeln!(
            result,
            "{} - - [{}] \"{} {} {}\" {:.6} {} {}",
            record.remote_addr,
            record.request_time.format(&self.config.time_format),
            record.request,
            record.status,
            record.body_bytes_sent,
            record.elapsed_time.as_secs_f64(),
            record.http_referrer,
            record.http_user_agent,
        );

        result
    }
}

crate::impl_from!(ApacheFormatterConfig => ApacheFormatter);
crate::impl_box_from!(ApacheFormatter => dyn LogFormatter);
