use crate::log::body_value::BodyValue;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_with::{serde_as, DurationNanoSeconds};
use std::collections::BTreeMap;
use std::time::Duration;

/// 请求体的键值表示，按 key 排序输出
pub type RequestBody = BTreeMap<String, BodyValue>;

/// 访问日志记录
///
/// 描述一次 HTTP 请求的访问信息。由调用方按请求构造，格式化期间只读。
/// 字段名与 JSON 输出的 key 一一对应（qt_* 字段见 serde rename）。
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccessLogRecord {
    /// 客户端地址
    pub remote_addr: String,
    /// 请求时间，保留原始时区
    pub request_time: DateTime<FixedOffset>,
    /// HTTP 方法
    pub request_method: String,
    /// 原始请求行
    pub request: String,
    /// 协议版本
    pub server_protocol: String,
    pub host: String,
    /// 响应状态码
    pub status: u16,
    /// 响应体字节数
    pub body_bytes_sent: i64,
    /// 请求耗时，JSON 中编码为纳秒整数
    #[serde_as(as = "DurationNanoSeconds<u64>")]
    pub elapsed_time: Duration,
    pub http_referrer: String,
    pub http_user_agent: String,
    pub remote_user: String,
    #[serde(rename = "qt_user_id")]
    pub user_id: String,
    #[serde(rename = "qt_access_token")]
    pub access_token: String,
    #[serde(rename = "qt_device_id")]
    pub device_id: String,
    pub client_id: String,
    /// 请求体，原样输出；None 编码为 null
    pub request_body: Option<RequestBody>,
}

impl AccessLogRecord {
    /// 以请求时间创建记录，其余字段为空
    pub fn new(request_time: DateTime<FixedOffset>) -> Self {
        Self {
            request_time,
            ..Default::default()
        }
    }

    /// 设置客户端地址
    pub fn with_remote_addr(mut self, remote_addr: impl Into<String>) -> Self {
        self.remote_addr = remote_addr.into();
        self
    }

    /// 设置方法、请求行与协议
    pub fn with_request(
        mut self,
        method: impl Into<String>,
        request: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        self.request_method = method.into();
        self.request = request.into();
        self.server_protocol = protocol.into();
        self
    }

    /// 设置响应状态、响应体大小与耗时
    pub fn with_response(mut self, status: u16, body_bytes_sent: i64, elapsed: Duration) -> Self {
        self.status = status;
        self.body_bytes_sent = body_bytes_sent;
        self.elapsed_time = elapsed;
        self
    }

    /// 向请求体追加一个键值
    pub fn with_body_entry(mut self, key: impl Into<String>, value: impl Into<BodyValue>) -> Self {
        self.request_body
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .unwrap()
    }

    #[test]
    fn test_record_defaults_are_empty() {
        let record = AccessLogRecord::default();

        assert!(record.remote_addr.is_empty());
        assert!(record.user_id.is_empty());
        assert!(record.client_id.is_empty());
        assert_eq!(record.status, 0);
        assert_eq!(record.elapsed_time, Duration::ZERO);
        assert!(record.request_body.is_none());
    }

    #[test]
    fn test_record_builder() {
        let record = AccessLogRecord::new(request_time())
            .with_remote_addr("10.0.0.1")
            .with_request("GET", "GET /index.html HTTP/1.1", "HTTP/1.1")
            .with_response(200, 512, Duration::from_millis(15))
            .with_body_entry("page", 2)
            .with_body_entry("q", "rust");

        assert_eq!(record.remote_addr, "10.0.0.1");
        assert_eq!(record.request_method, "GET");
        assert_eq!(record.server_protocol, "HTTP/1.1");
        assert_eq!(record.status, 200);
        assert_eq!(record.body_bytes_sent, 512);

        let body = record.request_body.unwrap();
        assert_eq!(body.len(), 2);
        assert_eq!(body["page"], BodyValue::I64(2));
        assert_eq!(body["q"], BodyValue::String("rust".to_string()));
    }
}
