// ==========================================
// 伊斯兰金融合规工作流 - 工作流装配引擎
// ==========================================
// 职责: 扁平化步骤、跨模块依赖、环检测、排期、关键路径
// 输入: 目录快照 + 交易配置
// 输出: Workflow 值对象
// ==========================================
// 注: 关键路径平局一律按步骤声明顺序裁决
// ==========================================

mod core;
mod graph;
mod schedule;

#[cfg(test)]
mod tests;

pub use core::{global_step_id, WorkflowAssembler};
