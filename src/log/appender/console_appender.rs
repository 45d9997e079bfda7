use crate::log::appender::LogAppender;
use crate::log::level::LogLevel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::io::{self, Write};

/// 终端输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
}

/// ConsoleAppender 配置
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct ConsoleAppenderConfig {
    /// 输出目标
    pub target: Target,
}

/// 终端输出器
///
/// 每条日志输出为一行
pub struct ConsoleAppender {
    config: ConsoleAppenderConfig,
}

impl ConsoleAppender {
    pub fn new(config: ConsoleAppenderConfig) -> Self {
        Self { config }
    }
}

impl LogAppender for ConsoleAppender {
    fn append(&self, _level: LogLevel, formatted_message: &str) -> Result<()> {
        match self.config.target {
            Target::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", formatted_message)?;
                stdout.flush()?;
            }
            Target::Stderr => {
                let mut stderr = io::stderr().lock();
                writeln!(stderr, "{}", formatted_message)?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.config.target {
            Target::Stdout => io::stdout().flush()?,
            Target::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }
}

crate::impl_from!(ConsoleAppenderConfig => ConsoleAppender);
crate::impl_box_from!(ConsoleAppender => dyn LogAppender);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_appender_append() {
        let appender = ConsoleAppender::new(ConsoleAppenderConfig::default());

        let result = appender.append(LogLevel::Access, "Test message");
        assert!(result.is_ok());
    }

    #[test]
    fn test_console_appender_stderr() {
        let appender = ConsoleAppender::new(ConsoleAppenderConfig {
            target: Target::Stderr,
        });

        assert!(appender.append(LogLevel::Access, "Test message").is_ok());
        assert!(appender.flush().is_ok());
    }

    #[test]
    fn test_console_appender_config() {
        assert_eq!(ConsoleAppenderConfig::default().target, Target::Stdout);

        let config: ConsoleAppenderConfig =
            serde_json::from_value(serde_json::json!({ "target": "stderr" })).unwrap();
        assert_eq!(config.target, Target::Stderr);
    }

    #[test]
    fn test_console_appender_from_config() {
        let config = ConsoleAppenderConfig {
            target: Target::Stderr,
        };

        let appender = ConsoleAppender::from(config);
        assert_eq!(appender.config.target, Target::Stderr);
    }
}
