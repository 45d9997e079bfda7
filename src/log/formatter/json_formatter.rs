use crate::log::access_log_record::AccessLogRecord;
use crate::log::error::AccessLogError;
use crate::log::formatter::escape::HtmlEscapeFormatter;
use crate::log::formatter::LogFormatter;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// JsonFormatter 配置
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct JsonFormatterConfig {
    /// 是否转义 HTML 敏感字符（`<`、`>`、`&`），访问日志默认关闭
    #[default = false]
    pub escape_html: bool,
}

/// JSON 格式化器
///
/// 将访问日志记录编码为单行 JSON 对象
pub struct JsonFormatter {
    config: JsonFormatterConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonFormatterConfig) -> Self {
        Self { config }
    }

    /// 编码访问日志记录，请求体中存在无法编码的值时返回错误
    pub fn encode(&self, record: &AccessLogRecord) -> Result<String, AccessLogError> {
        let mut buf = Vec::with_capacity(512);
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut buf,
            HtmlEscapeFormatter::new(self.config.escape_html),
        );
        record.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }
}

impl LogFormatter for JsonFormatter {
    fn format(&self, record: &AccessLogRecord) -> String {
        match self.encode(record) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "access log json encoding failed");
                error_payload(&e)
            }
        }
    }
}

/// 编码失败时输出的日志内容：`{"Error": "<message>"}`
fn error_payload(err: &AccessLogError) -> String {
    let message = serde_json::Value::String(err.to_string());
    format!(r#"{{"Error": {}}}"#, message)
}

crate::impl_from!(JsonFormatterConfig => JsonFormatter);
crate::impl_box_from!(JsonFormatter => dyn LogFormatter);
