use crate::log::level::LogLevel;
use anyhow::Result;

/// 日志输出器 trait
///
/// 接收分类标记和已格式化完成的日志行，负责写出到目标介质。
/// 写出的缓冲与并发控制由实现自行负责
pub trait LogAppender: Send + Sync {
    /// 输出日志
    fn append(&self, level: LogLevel, formatted_message: &str) -> Result<()>;

    /// 刷新缓冲区（默认实现为空操作）
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
