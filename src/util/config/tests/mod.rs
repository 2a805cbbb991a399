//! Config 单元测试

use crate::util::config::{parse_config, AutotestConfig, ConfigError, LogConfig, ENV_LOG_FILE, ENV_LOG_LEVEL};
use crate::util::logger::LogLevel;
use std::path::PathBuf;

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AutotestConfig::default());
        assert_eq!(config.log.level, LogLevel::Info);
        assert!(config.log.stdout);
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            r#"
            [log]
            level = "trace"
            stdout = false
            file = "autotest.log"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.log,
            LogConfig {
                level: LogLevel::Trace,
                stdout: false,
                file: Some(PathBuf::from("autotest.log")),
            }
        );
    }

    #[test]
    fn test_partial_log_section() {
        let config = parse_config("[log]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(config.log.level, LogLevel::Warn);
        assert!(config.log.stdout);
    }

    #[test]
    fn test_bad_level_is_parse_error() {
        let err = parse_config("[log]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}

#[cfg(test)]
mod env_tests {
    use super::*;

    #[test]
    fn test_env_overrides() {
        let mut config = AutotestConfig::default();
        config
            .apply_env_from(|key| match key {
                ENV_LOG_LEVEL => Some("debug".to_string()),
                ENV_LOG_FILE => Some("/tmp/co.log".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/co.log")));
    }

    #[test]
    fn test_empty_file_env_disables_file() {
        let mut config = AutotestConfig::default();
        config.log.file = Some(PathBuf::from("x.log"));
        config
            .apply_env_from(|key| (key == ENV_LOG_FILE).then(String::new))
            .unwrap();
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_invalid_env_level() {
        let mut config = AutotestConfig::default();
        let err = config
            .apply_env_from(|key| (key == ENV_LOG_LEVEL).then(|| "nope".to_string()))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for COROUTINES_LOG_LEVEL: 'nope'");
    }
}
