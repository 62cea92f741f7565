// ==========================================
// 伊斯兰金融合规工作流 - 目录数据源
// ==========================================
// 职责: 定义目录文档读取接口（不含解析/校验）
// 实现: 目录文件夹 (tokio::fs) / 内存文档
// 布局: <root>/modules/*.json + <root>/templates/*.json
// ==========================================

use crate::catalog::document::{DocumentKind, RawDocument};
use anyhow::{bail, Context};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MODULES_DIR: &str = "modules";
pub const TEMPLATES_DIR: &str = "templates";

// ==========================================
// CatalogSource Trait
// ==========================================
// 用途: 目录重载时的文档来源
// 实现者: DirectoryCatalogSource / StaticCatalogSource / BuiltinCatalogSource
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// 数据源描述（写入目录 origin,用于日志与错误定位）
    fn describe(&self) -> String;

    /// 读取全部原始文档
    async fn load_documents(&self) -> anyhow::Result<Vec<RawDocument>>;
}

// ==========================================
// DirectoryCatalogSource - 文件夹数据源
// ==========================================
#[derive(Debug, Clone)]
pub struct DirectoryCatalogSource {
    root: PathBuf,
}

impl DirectoryCatalogSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 列出子目录下的 *.json 文件（按文件名排序,保证加载顺序确定）
    async fn list_json_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
            bail!("目录不存在: {}", dir.display());
        }

        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("无法读取目录: {}", dir.display()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_json = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if is_json && entry.file_type().await?.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    async fn read_document(kind: DocumentKind, path: PathBuf) -> anyhow::Result<RawDocument> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("无法读取目录文件: {}", path.display()))?;

        Ok(RawDocument {
            kind,
            origin: path.display().to_string(),
            content,
        })
    }
}

#[async_trait]
impl CatalogSource for DirectoryCatalogSource {
    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }

    async fn load_documents(&self) -> anyhow::Result<Vec<RawDocument>> {
        let module_files = Self::list_json_files(&self.root.join(MODULES_DIR)).await?;
        let template_files = Self::list_json_files(&self.root.join(TEMPLATES_DIR)).await?;

        debug!(
            root = %self.root.display(),
            modules = module_files.len(),
            templates = template_files.len(),
            "读取目录文件"
        );

        let reads = module_files
            .into_iter()
            .map(|p| Self::read_document(DocumentKind::Module, p))
            .chain(
                template_files
                    .into_iter()
                    .map(|p| Self::read_document(DocumentKind::Template, p)),
            );

        // try_join_all 保持输入顺序
        try_join_all(reads).await
    }
}

// ==========================================
// StaticCatalogSource - 内存数据源
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    name: String,
    documents: Vec<RawDocument>,
}

impl StaticCatalogSource {
    pub fn new(name: impl Into<String>, documents: Vec<RawDocument>) -> Self {
        Self {
            name: name.into(),
            documents,
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    fn describe(&self) -> String {
        format!("static:{}", self.name)
    }

    async fn load_documents(&self) -> anyhow::Result<Vec<RawDocument>> {
        Ok(self.documents.clone())
    }
}
