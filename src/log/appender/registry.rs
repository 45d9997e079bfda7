use crate::cfg::{create_trait_from_type_options, register_trait, TypeOptions};
use crate::log::appender::LogAppender;
use crate::log::appender::{
    console_appender::{ConsoleAppender, ConsoleAppenderConfig},
    facade_appender::{FacadeAppender, FacadeAppenderConfig},
    file_appender::{FileAppender, FileAppenderConfig},
};
use anyhow::Result;

/// 注册所有 Appender 实现
pub fn register_appenders() -> Result<()> {
    register_trait::<ConsoleAppender, dyn LogAppender, ConsoleAppenderConfig>("ConsoleAppender")?;
    register_trait::<FileAppender, dyn LogAppender, FileAppenderConfig>("FileAppender")?;
    register_trait::<FacadeAppender, dyn LogAppender, FacadeAppenderConfig>("FacadeAppender")?;
    Ok(())
}

/// 从 TypeOptions 创建 Appender
pub fn create_appender_from_options(options: &TypeOptions) -> Result<Box<dyn LogAppender>> {
    create_trait_from_type_options(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::level::LogLevel;

    #[test]
    fn test_register_appenders() -> Result<()> {
        register_appenders()?;

        let opts = TypeOptions::from_json(
            r#"
            {
                "type": "ConsoleAppender",
                "options": {
                    "target": "stdout"
                }
            }
        "#,
        )?;

        let appender = create_appender_from_options(&opts)?;
        assert!(appender.append(LogLevel::Access, "test message").is_ok());

        Ok(())
    }

    #[test]
    fn test_create_file_appender() -> Result<()> {
        register_appenders()?;

        let temp_file = tempfile::NamedTempFile::new()?;
        let opts = TypeOptions {
            type_name: "FileAppender".to_string(),
            options: serde_json::json!({
                "file_path": temp_file.path().to_string_lossy(),
            }),
        };

        let appender = create_appender_from_options(&opts)?;
        appender.append(LogLevel::Access, "test message")?;

        assert_eq!(std::fs::read_to_string(temp_file.path())?, "test message\n");
        Ok(())
    }

    #[test]
    fn test_create_file_appender_missing_path() -> Result<()> {
        register_appenders()?;

        let opts = TypeOptions::new("FileAppender");
        assert!(create_appender_from_options(&opts).is_err());
        Ok(())
    }

    #[test]
    fn test_create_facade_appender_without_options() -> Result<()> {
        register_appenders()?;

        let opts = TypeOptions::from_json(r#"{ type: "FacadeAppender" }"#)?;
        let appender = create_appender_from_options(&opts)?;
        assert!(appender.append(LogLevel::Access, "test message").is_ok());
        Ok(())
    }

    #[test]
    fn test_unknown_appender() -> Result<()> {
        register_appenders()?;

        let opts = TypeOptions::new("KafkaAppender");
        let err = create_appender_from_options(&opts)
            .err()
            .expect("unknown appender should fail");
        assert!(err.to_string().contains("KafkaAppender"));
        Ok(())
    }
}
