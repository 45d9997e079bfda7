use crate::log::appender::LogAppender;
use crate::log::level::LogLevel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// FacadeAppender 配置
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct FacadeAppenderConfig {
    /// log 记录的 target
    #[default("access_log".to_string())]
    pub target: String,
}

/// log 门面输出器
///
/// 把日志行交给 `log` crate，由宿主程序安装的 logger 决定去向
pub struct FacadeAppender {
    config: FacadeAppenderConfig,
}

impl FacadeAppender {
    pub fn new(config: FacadeAppenderConfig) -> Self {
        Self { config }
    }
}

impl LogAppender for FacadeAppender {
    fn append(&self, level: LogLevel, formatted_message: &str) -> Result<()> {
        log::log!(target: self.config.target.as_str(), level.as_log_level(), "{}", formatted_message);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        log::logger().flush();
        Ok(())
    }
}

crate::impl_from!(FacadeAppenderConfig => FacadeAppender);
crate::impl_box_from!(FacadeAppender => dyn LogAppender);
