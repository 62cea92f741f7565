// ==========================================
// 伊斯兰金融合规工作流 - 引擎编排器
// ==========================================
// 用途: 协调 装配 -> 校验 -> 任务生成 的执行顺序
// 红线: 配置完整性错误直接传播; 校验违规作为数据返回
// ==========================================

use crate::catalog::ModuleCatalog;
use crate::domain::deal::DealConfiguration;
use crate::domain::task::Task;
use crate::domain::validation::{PolicyConstraint, ValidationResult};
use crate::domain::workflow::Workflow;
use crate::engine::error::EngineResult;
use crate::engine::{PolicyValidator, TaskGenerator, WorkflowAssembler};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

// ==========================================
// WorkflowPlan - 编排结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowPlan {
    pub workflow: Workflow,
    pub validation: ValidationResult,
    /// 校验未通过时为空
    pub tasks: Vec<Task>,
}

impl WorkflowPlan {
    pub fn is_valid(&self) -> bool {
        self.validation.valid
    }
}

// ==========================================
// WorkflowOrchestrator - 引擎编排器
// ==========================================
#[derive(Debug, Default)]
pub struct WorkflowOrchestrator {
    assembler: WorkflowAssembler,
    validator: PolicyValidator,
    generator: TaskGenerator,
}

impl WorkflowOrchestrator {
    pub fn new() -> Self {
        Self::with_generator(TaskGenerator::new())
    }

    /// 指定任务生成器（默认负责角色来自配置）
    pub fn with_generator(generator: TaskGenerator) -> Self {
        Self {
            assembler: WorkflowAssembler::new(),
            validator: PolicyValidator::new(),
            generator,
        }
    }

    /// 装配 + 校验（不生成任务）
    pub fn preview(
        &self,
        catalog: &ModuleCatalog,
        deal: &DealConfiguration,
        constraints: &[PolicyConstraint],
    ) -> EngineResult<(Workflow, ValidationResult)> {
        let workflow = self.assembler.assemble(catalog, deal)?;
        let validation = self.validator.validate(&workflow, constraints);
        Ok((workflow, validation))
    }

    /// 执行完整流程
    ///
    /// # 参数
    /// - catalog: 目录快照
    /// - deal: 交易配置
    /// - constraints: 政策约束
    /// - start_date: 装配起始日（任务截止日基准）
    #[instrument(skip(self, catalog, deal, constraints), fields(deal_id = %deal.deal_id))]
    pub fn plan(
        &self,
        catalog: &ModuleCatalog,
        deal: &DealConfiguration,
        constraints: &[PolicyConstraint],
        start_date: NaiveDate,
    ) -> EngineResult<WorkflowPlan> {
        // 步骤1+2: 装配 + 校验
        let (workflow, validation) = self.preview(catalog, deal, constraints)?;

        // 步骤3: 任务生成（仅校验通过时）
        let tasks = if validation.valid {
            self.generator.generate(&workflow, &validation, start_date)?
        } else {
            debug!(errors = validation.errors.len(), "校验未通过,跳过任务生成");
            Vec::new()
        };

        info!(
            template = %workflow.template_name,
            valid = validation.valid,
            tasks = tasks.len(),
            "编排完成"
        );

        Ok(WorkflowPlan {
            workflow,
            validation,
            tasks,
        })
    }
}
