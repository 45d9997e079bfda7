use crate::log::appender::LogAppender;
use crate::log::level::LogLevel;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// FileAppender 配置
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FileAppenderConfig {
    /// 日志文件路径
    pub file_path: String,
}

/// 文件输出器
///
/// 以追加方式写入文件，每条日志一行
pub struct FileAppender {
    file: Mutex<File>,
    config: FileAppenderConfig,
}

impl FileAppender {
    /// 从配置创建 FileAppender，父目录不存在时自动创建
    pub fn new(config: FileAppenderConfig) -> Result<Self> {
        let path = PathBuf::from(&config.file_path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create log dir {}", parent.display()))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open log file {}", path.display()))?;

        Ok(Self {
            file: Mutex::new(file),
            config,
        })
    }

    /// 获取日志文件路径
    pub fn path(&self) -> &str {
        &self.config.file_path
    }
}

impl TryFrom<FileAppenderConfig> for FileAppender {
    type Error = anyhow::Error;

    fn try_from(config: FileAppenderConfig) -> Result<Self> {
        FileAppender::new(config)
    }
}

impl LogAppender for FileAppender {
    fn append(&self, _level: LogLevel, formatted_message: &str) -> Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow!("log file lock poisoned"))?;
        // 一次写入整行，避免与其它进程的追加交错
        let mut line = String::with_capacity(formatted_message.len() + 1);
        line.push_str(formatted_message);
        line.push('\n');
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow!("log file lock poisoned"))?;
        file.flush()?;
        Ok(())
    }
}

crate::impl_box_from!(FileAppender => dyn LogAppender);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_appender_append() -> Result<()> {
        let temp_file = tempfile::NamedTempFile::new()?;
        let config = FileAppenderConfig {
            file_path: temp_file.path().to_string_lossy().to_string(),
        };

        let appender = FileAppender::new(config)?;

        appender.append(LogLevel::Access, "First message")?;
        appender.append(LogLevel::Access, "Second message")?;
        appender.flush()?;

        // 验证文件内容
        let contents = std::fs::read_to_string(temp_file.path())?;
        assert_eq!(contents, "First message\nSecond message\n");

        Ok(())
    }

    #[test]
    fn test_file_appender_creates_parent_dir() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let log_path = temp_dir.path().join("nested").join("access.log");

        let appender = FileAppender::new(FileAppenderConfig {
            file_path: log_path.to_string_lossy().to_string(),
        })?;
        appender.append(LogLevel::Access, "hello")?;

        assert_eq!(appender.path(), log_path.to_string_lossy());
        assert_eq!(std::fs::read_to_string(&log_path)?, "hello\n");
        Ok(())
    }

    #[test]
    fn test_file_appender_appends_to_existing() -> Result<()> {
        let temp_file = tempfile::NamedTempFile::new()?;
        std::fs::write(temp_file.path(), "existing\n")?;

        let appender = FileAppender::new(FileAppenderConfig {
            file_path: temp_file.path().to_string_lossy().to_string(),
        })?;
        appender.append(LogLevel::Access, "new")?;

        assert_eq!(std::fs::read_to_string(temp_file.path())?, "existing\nnew\n");
        Ok(())
    }

    #[test]
    fn test_file_appender_open_failure() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        // 目录本身不能作为日志文件打开
        let result = FileAppender::new(FileAppenderConfig {
            file_path: temp_dir.path().to_string_lossy().to_string(),
        });

        assert!(result.is_err());
        Ok(())
    }
}
