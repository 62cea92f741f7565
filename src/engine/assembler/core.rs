// ==========================================
// 伊斯兰金融合规工作流 - 工作流装配引擎
// ==========================================
// 红线: 跨模块依赖只连接同一模板内的模块
// 红线: 依赖图必须无环,否则整个装配失败
// ==========================================
// 职责: 模板 + 模块 -> 扁平化工作流
// 输入: 交易配置 + 目录快照
// 输出: Workflow (拓扑序步骤 + 排期 + 关键路径)
// ==========================================

use crate::catalog::document::STEP_ID_SEPARATOR;
use crate::catalog::ModuleCatalog;
use crate::domain::deal::DealConfiguration;
use crate::domain::module::WorkflowModule;
use crate::domain::workflow::{Workflow, WorkflowStep};
use crate::engine::error::{EngineError, EngineResult, NotFoundKind};
use crate::engine::resolver::{ResolvedTemplate, TemplateResolver};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

use super::graph::StepGraph;
use super::schedule;

/// 生成全局步骤 ID
pub fn global_step_id(module_id: &str, local_id: &str) -> String {
    format!("{}{}{}", module_id, STEP_ID_SEPARATOR, local_id)
}

// ==========================================
// WorkflowAssembler - 工作流装配引擎
// ==========================================
// 无状态引擎,目录快照通过参数传入
#[derive(Debug, Default)]
pub struct WorkflowAssembler {
    resolver: TemplateResolver,
}

impl WorkflowAssembler {
    pub fn new() -> Self {
        Self {
            resolver: TemplateResolver::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 装配交易工作流
    ///
    /// # 错误
    /// - `NotFound`: 模板/模块/步骤引用不存在
    /// - `Cycle`: 依赖图存在环
    /// - `DurationOverflow`: 累计工期超出范围
    #[instrument(skip(self, catalog, deal), fields(
        deal_id = %deal.deal_id,
        jurisdiction = %deal.jurisdiction,
        product_type = %deal.product_type
    ))]
    pub fn assemble(
        &self,
        catalog: &ModuleCatalog,
        deal: &DealConfiguration,
    ) -> EngineResult<Workflow> {
        let resolved = self
            .resolver
            .resolve(catalog, deal.jurisdiction, deal.product_type)?;
        self.assemble_resolved(deal, &resolved)
    }

    /// 基于已解析模板装配
    pub fn assemble_resolved(
        &self,
        deal: &DealConfiguration,
        resolved: &ResolvedTemplate<'_>,
    ) -> EngineResult<Workflow> {
        // 1. 扁平化
        let mut steps = self.flatten(&resolved.modules)?;

        // 2. 跨模块依赖
        self.link_modules(resolved, &mut steps);

        // 3. 建图
        let graph = self.build_graph(&steps)?;

        // 4. 环检测
        if let Some(cycle) = graph.find_cycle() {
            let step_ids: Vec<String> = cycle.iter().map(|&i| steps[i].id.clone()).collect();
            warn!(cycle = ?step_ids, "依赖图存在环,装配失败");
            return Err(EngineError::Cycle { step_ids });
        }

        // 5. 排期 + 关键路径
        let order = graph.topological_order();
        let durations: Vec<u32> = steps.iter().map(|s| s.duration_days).collect();
        let sched = schedule::compute(&graph, &durations, &order).map_err(|node| {
            warn!(step_id = %steps[node].id, "累计工期溢出,装配失败");
            EngineError::DurationOverflow {
                step_id: steps[node].id.clone(),
            }
        })?;

        for (i, step) in steps.iter_mut().enumerate() {
            step.earliest_start = sched.earliest_start[i];
            step.earliest_finish = sched.earliest_finish[i];
            step.latest_start = sched.latest_start[i];
            step.latest_finish = sched.latest_finish[i];
            step.slack = sched.slack(i);
        }

        let critical_path: Vec<String> = sched
            .critical_path
            .iter()
            .map(|&i| steps[i].id.clone())
            .collect();

        // 6. 按拓扑序输出
        let mut slots: Vec<Option<WorkflowStep>> = steps.into_iter().map(Some).collect();
        let ordered: Vec<WorkflowStep> = order.iter().filter_map(|&i| slots[i].take()).collect();

        info!(
            template = %resolved.template.name,
            steps = ordered.len(),
            critical_path_len = critical_path.len(),
            total_duration_days = sched.total_duration_days,
            "工作流装配完成"
        );

        Ok(Workflow {
            deal_id: deal.deal_id.clone(),
            jurisdiction: deal.jurisdiction,
            product_type: deal.product_type,
            template_name: resolved.template.name.clone(),
            steps: ordered,
            critical_path,
            total_duration_days: sched.total_duration_days,
        })
    }

    // ==========================================
    // 扁平化
    // ==========================================

    /// 按模块引用顺序拼接步骤,局部依赖改写为全局 ID
    fn flatten(&self, modules: &[&WorkflowModule]) -> EngineResult<Vec<WorkflowStep>> {
        let mut steps = Vec::new();

        for module in modules {
            for step in &module.steps {
                let mut depends_on: Vec<String> = Vec::with_capacity(step.depends_on.len());
                for local in &step.depends_on {
                    let global = global_step_id(&module.id, local);
                    if module.step(local).is_none() {
                        return Err(EngineError::not_found(NotFoundKind::Step, global));
                    }
                    if !depends_on.contains(&global) {
                        depends_on.push(global);
                    }
                }

                steps.push(WorkflowStep {
                    id: global_step_id(&module.id, &step.id),
                    module_id: module.id.clone(),
                    name: step.name.clone(),
                    depends_on,
                    duration_days: step.duration_days,
                    evidence_required: step.evidence_required.clone(),
                    evidence_provided: step.evidence_provided.clone(),
                    hard_gate: module.is_hard_gate_step(step),
                    assignee_role: step
                        .assignee_role
                        .clone()
                        .or_else(|| module.owner_role.clone()),
                    earliest_start: 0,
                    earliest_finish: 0,
                    latest_start: 0,
                    latest_finish: 0,
                    slack: 0,
                });
            }
        }

        Ok(steps)
    }

    // ==========================================
    // 跨模块依赖
    // ==========================================

    /// 模块 B 声明依赖模块 A 时: B 的每个入口步骤依赖 A 的每个终止步骤
    ///
    /// - 入口步骤: 模块内无局部依赖
    /// - 终止步骤: 模块内没有其他步骤依赖它
    /// - A 不在本模板中时忽略该依赖
    fn link_modules(&self, resolved: &ResolvedTemplate<'_>, steps: &mut [WorkflowStep]) {
        for module in &resolved.modules {
            for dep_module_id in &module.depends_on {
                let dep_module = match resolved.position_of(dep_module_id) {
                    Some(pos) => resolved.modules[pos],
                    None => {
                        debug!(
                            module_id = %module.id,
                            dependency = %dep_module_id,
                            "依赖模块不在当前模板中,忽略"
                        );
                        continue;
                    }
                };

                let terminals: Vec<String> = terminal_local_steps(dep_module)
                    .into_iter()
                    .map(|local| global_step_id(&dep_module.id, local))
                    .collect();

                let entries: Vec<String> = module
                    .steps
                    .iter()
                    .filter(|s| s.depends_on.is_empty())
                    .map(|s| global_step_id(&module.id, &s.id))
                    .collect();

                for step in steps.iter_mut().filter(|s| entries.contains(&s.id)) {
                    for terminal in &terminals {
                        if !step.depends_on.contains(terminal) {
                            step.depends_on.push(terminal.clone());
                        }
                    }
                }
            }
        }
    }

    // ==========================================
    // 建图
    // ==========================================

    fn build_graph(&self, steps: &[WorkflowStep]) -> EngineResult<StepGraph> {
        let index: HashMap<&str, usize> = steps
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();

        let mut deps = Vec::with_capacity(steps.len());
        for step in steps {
            let mut node_deps = Vec::with_capacity(step.depends_on.len());
            for dep in &step.depends_on {
                let &i = index
                    .get(dep.as_str())
                    .ok_or_else(|| EngineError::not_found(NotFoundKind::Step, dep.clone()))?;
                node_deps.push(i);
            }
            deps.push(node_deps);
        }

        Ok(StepGraph::new(deps))
    }
}

/// 模块内的终止步骤（局部 ID,按声明顺序）
fn terminal_local_steps(module: &WorkflowModule) -> Vec<&str> {
    module
        .steps
        .iter()
        .filter(|candidate| {
            !module
                .steps
                .iter()
                .any(|s| s.depends_on.iter().any(|d| *d == candidate.id))
        })
        .map(|s| s.id.as_str())
        .collect()
}
