// ==========================================
// 伊斯兰金融合规工作流 - 交易配置
// ==========================================
// 红线: 引擎只读取交易配置,从不修改
// ==========================================

use crate::domain::types::{AccountingFramework, DealScale, Jurisdiction, ProductType};
use serde::{Deserialize, Serialize};

// ==========================================
// DealConfiguration - 交易配置 (UI 输入)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealConfiguration {
    /// 交易 ID（用于生成确定性任务 ID）
    pub deal_id: String,

    /// 交易名称
    #[serde(default)]
    pub deal_name: String,

    /// 司法辖区
    pub jurisdiction: Jurisdiction,

    /// 产品类型
    pub product_type: ProductType,

    /// 会计准则
    pub accounting_framework: AccountingFramework,

    /// 影响力指标（ESG / 社会影响）
    #[serde(default)]
    pub impact_metrics: Vec<String>,

    /// 交易规模
    pub scale: DealScale,
}

impl DealConfiguration {
    /// 创建交易配置（默认 AAOIFI + MEDIUM）
    pub fn new(
        deal_id: impl Into<String>,
        jurisdiction: Jurisdiction,
        product_type: ProductType,
    ) -> Self {
        Self {
            deal_id: deal_id.into(),
            deal_name: String::new(),
            jurisdiction,
            product_type,
            accounting_framework: AccountingFramework::Aaoifi,
            impact_metrics: Vec::new(),
            scale: DealScale::Medium,
        }
    }

    /// 模板查找键
    pub fn template_key(&self) -> (Jurisdiction, ProductType) {
        (self.jurisdiction, self.product_type)
    }
}
