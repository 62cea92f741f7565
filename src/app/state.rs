// ==========================================
// 伊斯兰金融合规工作流 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 显式构造、显式重置,核心不持有全局单例
// ==========================================

use std::sync::Arc;

use tracing::info;

use crate::api::{ApiResult, WorkflowApi};
use crate::catalog::{
    builtin_source, CatalogSource, CatalogStats, CatalogStore, DirectoryCatalogSource,
};
use crate::config::{get_default_config_path, ConfigManager};
use crate::engine::WorkflowEventPublisher;

/// 应用状态
///
/// 包含配置、目录存储和 API 实例,由宿主应用持有
#[derive(Debug)]
pub struct AppState {
    /// 配置管理器
    pub config: ConfigManager,

    /// 目录存储（可原子重载）
    pub catalog: Arc<CatalogStore>,

    /// 工作流 API
    pub workflow_api: Arc<WorkflowApi>,
}

impl AppState {
    /// 创建应用状态
    ///
    /// # 参数
    /// - config: 已加载的配置
    ///
    /// # 说明
    /// - 先装入内置目录,配置了 catalogDir 时再从目录重载
    /// - 目录重载失败直接返回错误
    pub async fn new(config: ConfigManager) -> ApiResult<Self> {
        Self::build(config, None).await
    }

    /// 创建应用状态（带事件发布者）
    pub async fn with_publisher(
        config: ConfigManager,
        publisher: Arc<dyn WorkflowEventPublisher>,
    ) -> ApiResult<Self> {
        Self::build(config, Some(publisher)).await
    }

    /// 使用默认配置文件路径创建
    pub async fn from_default_config() -> ApiResult<Self> {
        let config = ConfigManager::load(get_default_config_path())?;
        Self::new(config).await
    }

    async fn build(
        config: ConfigManager,
        publisher: Option<Arc<dyn WorkflowEventPublisher>>,
    ) -> ApiResult<Self> {
        crate::i18n::set_locale(&config.config().locale);

        let catalog = Arc::new(CatalogStore::builtin()?);
        if let Some(dir) = &config.config().catalog_dir {
            catalog.reload(&DirectoryCatalogSource::new(dir.clone())).await?;
        }
        let stats = catalog.snapshot()?.stats();

        let mut api = WorkflowApi::new(catalog.clone(), config.config());
        if let Some(publisher) = publisher {
            api = api.with_event_publisher(publisher);
        }

        info!(
            config_path = %config.path().display(),
            catalog_origin = %stats.origin,
            modules = stats.module_count,
            templates = stats.template_count,
            "应用状态初始化完成"
        );

        Ok(Self {
            config,
            catalog,
            workflow_api: Arc::new(api),
        })
    }

    /// 按当前配置重新加载目录
    ///
    /// 失败时保留原目录
    pub async fn reset_catalog(&self) -> ApiResult<CatalogStats> {
        let source = catalog_source(&self.config);
        self.workflow_api.reload_catalog(source.as_ref()).await
    }
}

/// 配置对应的目录数据源
fn catalog_source(config: &ConfigManager) -> Box<dyn CatalogSource> {
    match &config.config().catalog_dir {
        Some(dir) => Box::new(DirectoryCatalogSource::new(dir.clone())),
        None => Box::new(builtin_source()),
    }
}
