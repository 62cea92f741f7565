// ==========================================
// 伊斯兰金融合规工作流 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、校验、保存
// 存储: JSON 配置文件（缺失时使用默认值）
// 优先级: 环境变量 > 配置文件 > 默认值
// ==========================================

use crate::config::policy_profile::PolicyProfile;
use crate::domain::validation::PolicyConstraint;
use crate::engine::DEFAULT_ASSIGNEE_ROLE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 支持的界面语言
pub const SUPPORTED_LOCALES: &[&str] = &["zh-CN", "en"];

/// 默认语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

// ==========================================
// AssemblerConfig - 装配配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssemblerConfig {
    /// 目录根路径（None 使用内置目录）
    pub catalog_dir: Option<PathBuf>,

    /// 步骤/模块未指定负责角色时的默认角色
    pub default_assignee_role: String,

    pub locale: String,

    pub policy: PolicyProfile,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            catalog_dir: None,
            default_assignee_role: DEFAULT_ASSIGNEE_ROLE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            policy: PolicyProfile::default(),
        }
    }
}

impl AssemblerConfig {
    pub fn constraints(&self) -> Vec<PolicyConstraint> {
        self.policy.constraints()
    }

    /// 校验配置取值
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_assignee_role.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "defaultAssigneeRole".to_string(),
                value: self.default_assignee_role.clone(),
            });
        }
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "locale".to_string(),
                value: self.locale.clone(),
            });
        }
        if self.policy.max_total_duration_days == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "policy.maxTotalDurationDays".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误: {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置项取值非法: {key}={value}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
    config: AssemblerConfig,
}

impl ConfigManager {
    /// 从配置文件加载,并应用进程环境变量覆写
    ///
    /// # 参数
    /// - path: 配置文件路径（不存在时使用默认值）
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::load_with_overrides(path, std::env::vars())
    }

    /// 从配置文件加载,并应用给定的覆写变量
    ///
    /// 只识别 `config_keys` 中的变量,其余忽略
    pub fn load_with_overrides<I>(path: impl AsRef<Path>, vars: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let path = path.as_ref().to_path_buf();

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str::<AssemblerConfig>(&raw).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            debug!(path = %path.display(), "配置文件不存在,使用默认配置");
            AssemblerConfig::default()
        };

        apply_overrides(&mut config, vars)?;
        config.validate()?;

        info!(
            path = %path.display(),
            locale = %config.locale,
            catalog_dir = ?config.catalog_dir,
            "配置加载完成"
        );
        Ok(Self { path, config })
    }

    /// 内存配置（不关联文件内容）
    pub fn from_config(path: impl Into<PathBuf>, config: AssemblerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            path: path.into(),
            config,
        })
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 更新配置（校验通过才生效）
    pub fn update(&mut self, config: AssemblerConfig) -> ConfigResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// 保存到配置文件
    pub fn save(&self) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = self.config_snapshot()?;
        std::fs::write(&self.path, json).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "配置已保存");
        Ok(())
    }

    /// 配置快照（JSON）
    pub fn config_snapshot(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(&self.config).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// 应用环境变量覆写
fn apply_overrides<I>(config: &mut AssemblerConfig, vars: I) -> ConfigResult<()>
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }

        match key.as_str() {
            config_keys::CATALOG_DIR => {
                config.catalog_dir = Some(PathBuf::from(trimmed));
            }
            config_keys::LOCALE => {
                config.locale = trimmed.to_string();
            }
            config_keys::MAX_DURATION_DAYS => {
                let days = trimmed
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: key.clone(),
                        value: trimmed.to_string(),
                    })?;
                config.policy.max_total_duration_days = Some(days);
            }
            _ => continue,
        }
        debug!(key = %key, value = %trimmed, "环境变量覆写配置");
    }
    Ok(())
}

/// 获取默认配置文件路径
///
/// 优先级: GRC_WORKFLOW_CONFIG > {config_dir}/grc-workflow/config.json > ./grc_workflow.json
pub fn get_default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(config_keys::CONFIG_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(dir) => dir.join("grc-workflow").join("config.json"),
        None => PathBuf::from("./grc_workflow.json"),
    }
}

// ==========================================
// 配置键常量（环境变量）
// ==========================================
pub mod config_keys {
    // 配置文件路径
    pub const CONFIG_PATH: &str = "GRC_WORKFLOW_CONFIG";

    // 目录根路径
    pub const CATALOG_DIR: &str = "GRC_WORKFLOW_CATALOG_DIR";

    // 界面语言
    pub const LOCALE: &str = "GRC_WORKFLOW_LOCALE";

    // 总工期上限（天）
    pub const MAX_DURATION_DAYS: &str = "GRC_WORKFLOW_MAX_DURATION_DAYS";

    // 日志输出格式（text / json,由 logging::init 读取）
    pub const LOG_FORMAT: &str = "GRC_WORKFLOW_LOG_FORMAT";
}
