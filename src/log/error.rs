use thiserror::Error;

/// 访问日志编码错误
///
/// 只由 JSON 编码路径产生，分发器会把它恢复为 `{"Error": ...}` 日志行
#[derive(Error, Debug)]
pub enum AccessLogError {
    #[error("{0}")]
    Encode(#[from] serde_json::Error),
    #[error("encoded output is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
