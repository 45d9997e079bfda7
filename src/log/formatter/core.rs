use crate::log::access_log_record::AccessLogRecord;

/// 访问日志格式化器 trait
///
/// 负责将 AccessLogRecord 格式化为字符串。格式化不会失败：
/// 编码错误由实现自行转换为可输出的日志内容
pub trait LogFormatter: Send + Sync {
    /// 格式化访问日志记录
    fn format(&self, record: &AccessLogRecord) -> String;
}
