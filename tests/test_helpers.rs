// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的交易配置、目录文件夹、工作流构造等功能
// ==========================================
#![allow(dead_code)]

use chrono::NaiveDate;
use grc_workflow::catalog::{MODULES_DIR, TEMPLATES_DIR};
use grc_workflow::domain::deal::DealConfiguration;
use grc_workflow::domain::types::{Jurisdiction, ProductType};
use serde_json::Value;
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 创建测试交易配置
pub fn create_test_deal(
    deal_id: &str,
    jurisdiction: Jurisdiction,
    product_type: ProductType,
) -> DealConfiguration {
    DealConfiguration::new(deal_id, jurisdiction, product_type)
}

/// Qatar Ijarah 测试交易
pub fn qatar_ijarah_deal() -> DealConfiguration {
    create_test_deal("DEAL-QA-IJR-001", Jurisdiction::Qatar, ProductType::Ijarah)
}

/// 装配起始日
pub fn test_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
}

/// 仓库内置目录路径
pub fn builtin_catalog_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("catalog")
}

/// 创建空的临时目录文件夹（含 modules/ 与 templates/）
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
pub fn create_empty_catalog_dir() -> Result<TempDir, Box<dyn Error>> {
    let dir = TempDir::new()?;
    std::fs::create_dir_all(dir.path().join(MODULES_DIR))?;
    std::fs::create_dir_all(dir.path().join(TEMPLATES_DIR))?;
    Ok(dir)
}

/// 复制内置目录到临时文件夹
pub fn copy_builtin_catalog() -> Result<TempDir, Box<dyn Error>> {
    let dir = create_empty_catalog_dir()?;
    for sub in [MODULES_DIR, TEMPLATES_DIR] {
        for entry in std::fs::read_dir(builtin_catalog_dir().join(sub))? {
            let entry = entry?;
            std::fs::copy(entry.path(), dir.path().join(sub).join(entry.file_name()))?;
        }
    }
    Ok(dir)
}

/// 写入模块文档
pub fn write_module(root: &Path, module: &Value) -> Result<PathBuf, Box<dyn Error>> {
    let id = module["id"].as_str().unwrap_or("unnamed");
    let path = root.join(MODULES_DIR).join(format!("{}.json", id));
    std::fs::write(&path, serde_json::to_string_pretty(module)?)?;
    Ok(path)
}

/// 写入模板文档
pub fn write_template(root: &Path, file_name: &str, template: &Value) -> Result<PathBuf, Box<dyn Error>> {
    let path = root.join(TEMPLATES_DIR).join(format!("{}.json", file_name));
    std::fs::write(&path, serde_json::to_string_pretty(template)?)?;
    Ok(path)
}

/// 写入原始文本（用于畸形文档测试）
pub fn write_raw(root: &Path, sub: &str, file_name: &str, content: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = root.join(sub).join(file_name);
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Qatar Ijarah 关键路径（内置目录）
pub fn qatar_ijarah_critical_path() -> Vec<String> {
    [
        "deal_origination.intake",
        "deal_origination.kyc",
        "deal_origination.credit",
        "shariah_structuring.structure_memo",
        "shariah_structuring.fatwa",
        "qcb_regulatory.qcb_notification",
        "qcb_regulatory.qcb_no_objection",
        "ijarah_documentation.lease_agreement",
        "ijarah_documentation.signing",
        "aaoifi_reporting.accounting_entries",
        "aaoifi_reporting.shariah_audit_plan",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
