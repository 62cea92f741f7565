// ==========================================
// 伊斯兰金融合规工作流 - 配置层
// ==========================================
// 职责: 装配配置管理,支持文件 + 环境变量多级覆写
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod policy_profile;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, get_default_config_path, AssemblerConfig, ConfigError, ConfigManager,
    ConfigResult,
};
pub use policy_profile::PolicyProfile;
