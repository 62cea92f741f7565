// ==========================================
// 伊斯兰金融合规工作流 - 工作流 API
// ==========================================
// 职责:
// - 交易配置页: 辖区/产品选项
// - 工作流预览、校验、任务生成
// - 目录重载
// 说明:
// - 每次调用取一次目录快照,整个调用期间不受重载影响
// - 事件发布失败只记录日志,不影响调用结果
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::catalog::{CatalogSource, CatalogStats, CatalogStore};
use crate::config::AssemblerConfig;
use crate::domain::deal::DealConfiguration;
use crate::domain::module::WorkflowTemplate;
use crate::domain::types::{Jurisdiction, ProductType};
use crate::domain::validation::{PolicyConstraint, ValidationResult};
use crate::domain::workflow::{Workflow, WorkflowSummary};
use crate::engine::{
    OptionalEventPublisher, TaskGenerator, WorkflowEvent, WorkflowEventPublisher,
    WorkflowEventType, WorkflowOrchestrator, WorkflowPlan,
};
use crate::i18n::validation_message;

// ==========================================
// WorkflowApi - 工作流 API
// ==========================================
#[derive(Debug)]
pub struct WorkflowApi {
    store: Arc<CatalogStore>,
    orchestrator: WorkflowOrchestrator,
    constraints: Vec<PolicyConstraint>,
    events: OptionalEventPublisher,
}

impl WorkflowApi {
    pub fn new(store: Arc<CatalogStore>, config: &AssemblerConfig) -> Self {
        Self {
            store,
            orchestrator: WorkflowOrchestrator::with_generator(TaskGenerator::with_default_role(
                config.default_assignee_role.clone(),
            )),
            constraints: config.constraints(),
            events: OptionalEventPublisher::none(),
        }
    }

    /// 注入事件发布者
    pub fn with_event_publisher(mut self, publisher: Arc<dyn WorkflowEventPublisher>) -> Self {
        self.events = OptionalEventPublisher::with_publisher(publisher);
        self
    }

    pub fn constraints(&self) -> &[PolicyConstraint] {
        &self.constraints
    }

    // ==========================================
    // 目录查询
    // ==========================================

    pub fn list_templates(&self) -> ApiResult<Vec<WorkflowTemplate>> {
        let catalog = self.store.snapshot()?;
        Ok(catalog.templates().cloned().collect())
    }

    pub fn list_jurisdictions(&self) -> ApiResult<Vec<Jurisdiction>> {
        Ok(self.store.snapshot()?.jurisdictions())
    }

    /// 某辖区可选的产品类型
    pub fn list_products(&self, jurisdiction: Jurisdiction) -> ApiResult<Vec<ProductType>> {
        Ok(self.store.snapshot()?.products_for(jurisdiction))
    }

    // ==========================================
    // 工作流
    // ==========================================

    /// 工作流预览（装配 + 校验,不生成任务）
    pub fn preview_workflow(
        &self,
        deal: &DealConfiguration,
    ) -> ApiResult<(Workflow, ValidationResult)> {
        validate_deal_input(deal)?;
        let catalog = self.store.snapshot()?;

        let (workflow, validation) =
            self.orchestrator
                .preview(&catalog, deal, &self.constraints)?;
        self.publish(WorkflowEvent::for_deal(
            deal.deal_id.clone(),
            WorkflowEventType::WorkflowAssembled,
            Some(workflow.template_name.clone()),
        ));
        if !validation.valid {
            self.publish_violations(deal, &validation);
        }
        Ok((workflow, validation))
    }

    /// 校验交易工作流
    pub fn validate_deal(&self, deal: &DealConfiguration) -> ApiResult<ValidationResult> {
        let (_, validation) = self.preview_workflow(deal)?;
        Ok(validation)
    }

    /// 看板摘要
    pub fn workflow_summary(&self, deal: &DealConfiguration) -> ApiResult<WorkflowSummary> {
        let (workflow, _) = self.preview_workflow(deal)?;
        Ok(workflow.summary())
    }

    /// 完整编排: 装配 -> 校验 -> 任务生成
    ///
    /// # 参数
    /// - deal: 交易配置
    /// - start_date: 装配起始日
    pub fn plan_deal(
        &self,
        deal: &DealConfiguration,
        start_date: NaiveDate,
    ) -> ApiResult<WorkflowPlan> {
        validate_deal_input(deal)?;
        let catalog = self.store.snapshot()?;

        let plan = self
            .orchestrator
            .plan(&catalog, deal, &self.constraints, start_date)?;

        if plan.is_valid() {
            self.publish(
                WorkflowEvent::for_deal(
                    deal.deal_id.clone(),
                    WorkflowEventType::TasksGenerated,
                    Some(plan.workflow.template_name.clone()),
                )
                .with_steps(plan.tasks.iter().map(|t| t.step_id.clone()).collect()),
            );
        } else {
            self.publish_violations(deal, &plan.validation);
        }

        info!(
            deal_id = %deal.deal_id,
            valid = plan.is_valid(),
            tasks = plan.tasks.len(),
            "交易编排完成"
        );
        Ok(plan)
    }

    /// 校验违规的用户提示（当前语言）
    pub fn localized_errors(validation: &ValidationResult) -> Vec<String> {
        validation.errors.iter().map(validation_message).collect()
    }

    // ==========================================
    // 目录维护
    // ==========================================

    /// 从数据源重载目录（失败时保留当前目录）
    pub async fn reload_catalog<S>(&self, source: &S) -> ApiResult<CatalogStats>
    where
        S: CatalogSource + ?Sized,
    {
        let stats = self.store.reload(source).await?;
        self.publish(WorkflowEvent::catalog(stats.origin.clone()));
        Ok(stats)
    }

    // ==========================================
    // 内部方法
    // ==========================================

    fn publish_violations(&self, deal: &DealConfiguration, validation: &ValidationResult) {
        let step_ids: Vec<String> = validation
            .errors
            .iter()
            .filter_map(|e| e.step_id().map(str::to_string))
            .collect();
        self.publish(
            WorkflowEvent::for_deal(
                deal.deal_id.clone(),
                WorkflowEventType::ValidationFailed,
                None,
            )
            .with_steps(step_ids),
        );
    }

    fn publish(&self, event: WorkflowEvent) {
        let event_type = event.event_type;
        if let Err(e) = self.events.publish(event) {
            warn!(event_type = event_type.as_str(), error = %e, "工作流事件发布失败");
        }
    }
}

/// 交易配置入参校验
fn validate_deal_input(deal: &DealConfiguration) -> ApiResult<()> {
    if deal.deal_id.trim().is_empty() {
        return Err(ApiError::InvalidInput("dealId 不能为空".to_string()));
    }
    Ok(())
}
