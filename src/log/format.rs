use serde::{Deserialize, Serialize};
use std::fmt;

/// Apache 格式的选择标记
pub const APACHE_FORMAT: &str = "APACHE_FORMAT";
/// JSON 格式的选择标记
pub const JSON_FORMAT: &str = "JSON_FORMAT";

/// 访问日志输出格式
///
/// 由格式标记选择：`APACHE_FORMAT` 对应 Apache，其余任何标记（包括空串和
/// `JSON_FORMAT`）都回落到 JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessLogFormat {
    /// Apache 风格的单行文本
    Apache,
    /// 结构化 JSON（默认）
    #[default]
    Json,
}

impl AccessLogFormat {
    /// 解析格式标记，无法识别的标记回落到 JSON
    pub fn from_token(token: &str) -> Self {
        match token {
            APACHE_FORMAT => AccessLogFormat::Apache,
            JSON_FORMAT => AccessLogFormat::Json,
            _ => AccessLogFormat::Json,
        }
    }

    /// 格式对应的标记
    pub fn token(&self) -> &'static str {
        match self {
            AccessLogFormat::Apache => APACHE_FORMAT,
            AccessLogFormat::Json => JSON_FORMAT,
        }
    }
}

impl From<&str> for AccessLogFormat {
    fn from(token: &str) -> Self {
        AccessLogFormat::from_token(token)
    }
}

impl From<String> for AccessLogFormat {
    fn from(token: String) -> Self {
        AccessLogFormat::from_token(&token)
    }
}

impl From<AccessLogFormat> for String {
    fn from(format: AccessLogFormat) -> Self {
        format.token().to_string()
    }
}

impl fmt::Display for AccessLogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token() {
        assert_eq!(AccessLogFormat::from_token("APACHE_FORMAT"), AccessLogFormat::Apache);
        assert_eq!(AccessLogFormat::from_token("JSON_FORMAT"), AccessLogFormat::Json);
    }

    #[test]
    fn test_unknown_token_falls_back_to_json() {
        assert_eq!(AccessLogFormat::from_token(""), AccessLogFormat::Json);
        assert_eq!(AccessLogFormat::from_token("apache_format"), AccessLogFormat::Json);
        assert_eq!(AccessLogFormat::from_token(" APACHE_FORMAT"), AccessLogFormat::Json);
        assert_eq!(AccessLogFormat::from("XML_FORMAT"), AccessLogFormat::Json);
    }

    #[test]
    fn test_default_is_json() {
        assert_eq!(AccessLogFormat::default(), AccessLogFormat::Json);
    }

    #[test]
    fn test_serde_uses_tokens() {
        assert_eq!(
            serde_json::to_string(&AccessLogFormat::Apache).unwrap(),
            "\"APACHE_FORMAT\""
        );

        let format: AccessLogFormat = serde_json::from_str("\"APACHE_FORMAT\"").unwrap();
        assert_eq!(format, AccessLogFormat::Apache);

        let format: AccessLogFormat = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(format, AccessLogFormat::Json);
    }

    #[test]
    fn test_display() {
        assert_eq!(AccessLogFormat::Apache.to_string(), APACHE_FORMAT);
        assert_eq!(AccessLogFormat::Json.to_string(), JSON_FORMAT);
    }
}
