// ==========================================
// 伊斯兰金融合规工作流 - 领域类型定义
// ==========================================
// 职责: 司法辖区、产品类型、任务优先级等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与前端/目录 JSON 一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 司法辖区 (Jurisdiction)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Jurisdiction {
    Qatar,       // 卡塔尔 (QCB / QFC)
    Uae,         // 阿联酋
    SaudiArabia, // 沙特
    Bahrain,     // 巴林
    Malaysia,    // 马来西亚
    UnitedKingdom,
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jurisdiction::Qatar => write!(f, "QATAR"),
            Jurisdiction::Uae => write!(f, "UAE"),
            Jurisdiction::SaudiArabia => write!(f, "SAUDI_ARABIA"),
            Jurisdiction::Bahrain => write!(f, "BAHRAIN"),
            Jurisdiction::Malaysia => write!(f, "MALAYSIA"),
            Jurisdiction::UnitedKingdom => write!(f, "UNITED_KINGDOM"),
        }
    }
}

// ==========================================
// 产品类型 (Product Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Ijarah,     // 租赁
    Murabaha,   // 成本加利润销售
    Musharakah, // 合伙
    Mudarabah,  // 信托合伙
    Sukuk,      // 伊斯兰债券
    Istisna,    // 制造订货
    Wakala,     // 代理
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Ijarah => write!(f, "IJARAH"),
            ProductType::Murabaha => write!(f, "MURABAHA"),
            ProductType::Musharakah => write!(f, "MUSHARAKAH"),
            ProductType::Mudarabah => write!(f, "MUDARABAH"),
            ProductType::Sukuk => write!(f, "SUKUK"),
            ProductType::Istisna => write!(f, "ISTISNA"),
            ProductType::Wakala => write!(f, "WAKALA"),
        }
    }
}

// ==========================================
// 会计准则 (Accounting Framework)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountingFramework {
    Aaoifi, // AAOIFI 伊斯兰会计准则
    Ifrs,   // 国际财务报告准则
    Local,  // 本地准则
}

impl fmt::Display for AccountingFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountingFramework::Aaoifi => write!(f, "AAOIFI"),
            AccountingFramework::Ifrs => write!(f, "IFRS"),
            AccountingFramework::Local => write!(f, "LOCAL"),
        }
    }
}

// ==========================================
// 交易规模 (Deal Scale)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealScale {
    Small,
    Medium,
    Large,
    Sovereign, // 主权级
}

impl fmt::Display for DealScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealScale::Small => write!(f, "SMALL"),
            DealScale::Medium => write!(f, "MEDIUM"),
            DealScale::Large => write!(f, "LARGE"),
            DealScale::Sovereign => write!(f, "SOVEREIGN"),
        }
    }
}

// ==========================================
// 任务优先级 (Task Priority)
// ==========================================
// 顺序: Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,    // 普通
    Medium, // 下游存在硬关卡
    High,   // 关键路径 / 硬关卡
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "LOW"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::High => write!(f, "HIGH"),
        }
    }
}

// ==========================================
// 任务状态 (Task Status)
// ==========================================
// 生成时只会出现 READY / WAITING,其余状态由外部协作方推进
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Ready,      // 无前置依赖,可立即开始
    Waiting,    // 等待前置步骤完成
    InProgress, // 进行中
    Completed,  // 已完成
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Ready => write!(f, "READY"),
            TaskStatus::Waiting => write!(f, "WAITING"),
            TaskStatus::InProgress => write!(f, "IN_PROGRESS"),
            TaskStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}
