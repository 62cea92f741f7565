use super::*;
use crate::catalog::ModuleCatalog;
use crate::domain::deal::DealConfiguration;
use crate::domain::module::{ModuleStep, WorkflowModule, WorkflowTemplate};
use crate::domain::types::{Jurisdiction, ProductType};
use super::graph::StepGraph;
use super::schedule;
use crate::engine::error::{EngineError, NotFoundKind};
use crate::engine::resolver::ResolvedTemplate;
use std::collections::HashMap;

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建只含一个 Qatar Ijarah 模板的目录
fn create_test_catalog(module_refs: &[&str], modules: Vec<WorkflowModule>) -> ModuleCatalog {
    ModuleCatalog::from_parts(
        "test",
        modules,
        vec![WorkflowTemplate::new(
            Jurisdiction::Qatar,
            ProductType::Ijarah,
            module_refs,
        )],
    )
    .unwrap()
}

fn create_test_deal() -> DealConfiguration {
    DealConfiguration::new("DEAL-T1", Jurisdiction::Qatar, ProductType::Ijarah)
}

/// A: a1 -> a2 (2, 3) ; B: b1 (1), 模块级依赖 A
fn create_scenario_modules(a1: u32, a2: u32, b1: u32) -> Vec<WorkflowModule> {
    vec![
        WorkflowModule::new(
            "A",
            vec![
                ModuleStep::new("a1", "A1", a1),
                ModuleStep::new("a2", "A2", a2).depends_on(&["a1"]),
            ],
        ),
        WorkflowModule::new("B", vec![ModuleStep::new("b1", "B1", b1)]).depends_on(&["A"]),
    ]
}

fn step_ids(workflow: &crate::domain::workflow::Workflow) -> Vec<&str> {
    workflow.steps.iter().map(|s| s.id.as_str()).collect()
}

// ==========================================
// 正常案例测试
// ==========================================

#[test]
fn test_two_module_scenario() {
    let catalog = create_test_catalog(&["A", "B"], create_scenario_modules(2, 3, 1));
    let workflow = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap();

    assert_eq!(step_ids(&workflow), vec!["A.a1", "A.a2", "B.b1"]);
    assert_eq!(workflow.step("B.b1").unwrap().depends_on, vec!["A.a2".to_string()]);
    assert_eq!(workflow.critical_path, vec!["A.a1", "A.a2", "B.b1"]);
    assert_eq!(workflow.total_duration_days, 6);

    let b1 = workflow.step("B.b1").unwrap();
    assert_eq!(b1.earliest_start, 5);
    assert_eq!(b1.earliest_finish, 6);
    assert_eq!(b1.slack, 0);
}

#[test]
fn test_empty_template_yields_empty_workflow() {
    let catalog = create_test_catalog(&[], Vec::new());
    let workflow = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap();

    assert!(workflow.is_empty());
    assert!(workflow.critical_path.is_empty());
    assert_eq!(workflow.total_duration_days, 0);
}

#[test]
fn test_every_dependency_resolves_within_workflow() {
    let catalog = create_test_catalog(&["A", "B"], create_scenario_modules(2, 3, 1));
    let workflow = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap();

    let mut position = HashMap::new();
    for (i, step) in workflow.steps.iter().enumerate() {
        position.insert(step.id.as_str(), i);
    }
    for (i, step) in workflow.steps.iter().enumerate() {
        for dep in &step.depends_on {
            // 依赖存在且在拓扑序中位于前面
            let dep_pos = position.get(dep.as_str()).copied().unwrap();
            assert!(dep_pos < i, "{} 应排在 {} 之前", dep, step.id);
        }
    }
}

#[test]
fn test_parallel_branches_and_slack() {
    // x(1) -> {y(5), z(2)} -> w(1)
    let modules = vec![WorkflowModule::new(
        "M",
        vec![
            ModuleStep::new("x", "X", 1),
            ModuleStep::new("y", "Y", 5).depends_on(&["x"]),
            ModuleStep::new("z", "Z", 2).depends_on(&["x"]),
            ModuleStep::new("w", "W", 1).depends_on(&["y", "z"]),
        ],
    )];
    let catalog = create_test_catalog(&["M"], modules);
    let workflow = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap();

    assert_eq!(workflow.total_duration_days, 7);
    assert_eq!(workflow.critical_path, vec!["M.x", "M.y", "M.w"]);

    let z = workflow.step("M.z").unwrap();
    assert_eq!(z.earliest_start, 1);
    assert_eq!(z.latest_start, 4);
    assert_eq!(z.slack, 3);
}

#[test]
fn test_critical_path_tie_breaks_by_declaration_order() {
    // 两个终止步骤 EF 相同,取先声明者
    let modules = vec![WorkflowModule::new(
        "M",
        vec![
            ModuleStep::new("p", "P", 3),
            ModuleStep::new("q", "Q", 3),
        ],
    )];
    let catalog = create_test_catalog(&["M"], modules);
    let workflow = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap();

    assert_eq!(workflow.critical_path, vec!["M.p"]);
    assert_eq!(workflow.total_duration_days, 3);
    assert_eq!(workflow.terminal_steps().len(), 2);
}

#[test]
fn test_dependency_tie_breaks_by_declaration_order() {
    // r 依赖 q、p (均 EF=2),回溯取先声明的 p
    let modules = vec![WorkflowModule::new(
        "M",
        vec![
            ModuleStep::new("p", "P", 2),
            ModuleStep::new("q", "Q", 2),
            ModuleStep::new("r", "R", 1).depends_on(&["q", "p"]),
        ],
    )];
    let catalog = create_test_catalog(&["M"], modules);
    let workflow = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap();

    assert_eq!(workflow.critical_path, vec!["M.p", "M.r"]);
}

#[test]
fn test_module_listed_before_its_dependency_is_reordered() {
    // B 在模板中排在 A 前面,但依赖 A: 输出保持拓扑一致
    let catalog = create_test_catalog(&["B", "A"], create_scenario_modules(2, 3, 1));
    let workflow = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap();

    assert_eq!(step_ids(&workflow), vec!["A.a1", "A.a2", "B.b1"]);
    assert_eq!(workflow.total_duration_days, 6);
}

#[test]
fn test_dependency_on_module_outside_template_is_ignored() {
    let mut modules = create_scenario_modules(2, 3, 1);
    modules.push(WorkflowModule::new("C", vec![ModuleStep::new("c1", "C1", 9)]));
    modules[1].depends_on.push("C".to_string());

    let catalog = create_test_catalog(&["A", "B"], modules);
    let workflow = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap();

    assert_eq!(workflow.step("B.b1").unwrap().depends_on, vec!["A.a2".to_string()]);
    assert!(workflow.step("C.c1").is_none());
}

#[test]
fn test_entry_steps_link_to_every_terminal_step() {
    // A 有两个终止步骤,B 有两个入口步骤
    let modules = vec![
        WorkflowModule::new(
            "A",
            vec![ModuleStep::new("t1", "T1", 1), ModuleStep::new("t2", "T2", 4)],
        ),
        WorkflowModule::new(
            "B",
            vec![
                ModuleStep::new("e1", "E1", 1),
                ModuleStep::new("e2", "E2", 1),
                ModuleStep::new("f", "F", 1).depends_on(&["e1", "e2"]),
            ],
        )
        .depends_on(&["A"]),
    ];
    let catalog = create_test_catalog(&["A", "B"], modules);
    let workflow = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap();

    for entry in ["B.e1", "B.e2"] {
        assert_eq!(
            workflow.step(entry).unwrap().depends_on,
            vec!["A.t1".to_string(), "A.t2".to_string()]
        );
    }
    // f 只依赖模块内步骤
    assert_eq!(
        workflow.step("B.f").unwrap().depends_on,
        vec!["B.e1".to_string(), "B.e2".to_string()]
    );
    assert_eq!(workflow.critical_path, vec!["A.t2", "B.e1", "B.f"]);
}

#[test]
fn test_hard_gate_and_role_inheritance() {
    let modules = vec![WorkflowModule::new(
        "G",
        vec![
            ModuleStep::new("g1", "G1", 1),
            ModuleStep::new("g2", "G2", 1).depends_on(&["g1"]).hard_gate(false),
        ],
    )
    .hard_gate(true)
    .owner_role("shariah_board")];
    let catalog = create_test_catalog(&["G"], modules);
    let workflow = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap();

    assert!(workflow.step("G.g1").unwrap().hard_gate);
    assert!(!workflow.step("G.g2").unwrap().hard_gate);
    assert_eq!(
        workflow.step("G.g1").unwrap().assignee_role.as_deref(),
        Some("shariah_board")
    );
}

// ==========================================
// 性质测试
// ==========================================

#[test]
fn test_duration_increase_on_critical_path_is_exact() {
    let base = create_test_catalog(&["A", "B"], create_scenario_modules(2, 3, 1));
    let longer = create_test_catalog(&["A", "B"], create_scenario_modules(2, 7, 1));
    let assembler = WorkflowAssembler::new();

    let w1 = assembler.assemble(&base, &create_test_deal()).unwrap();
    let w2 = assembler.assemble(&longer, &create_test_deal()).unwrap();
    assert_eq!(w2.total_duration_days, w1.total_duration_days + 4);
}

#[test]
fn test_duration_increase_off_critical_path_is_bounded() {
    // x(1) -> {y(5), z(2)}: z 增加 2 天仍不超过 y
    let build = |z: u32| {
        create_test_catalog(
            &["M"],
            vec![WorkflowModule::new(
                "M",
                vec![
                    ModuleStep::new("x", "X", 1),
                    ModuleStep::new("y", "Y", 5).depends_on(&["x"]),
                    ModuleStep::new("z", "Z", z).depends_on(&["x"]),
                ],
            )],
        )
    };
    let assembler = WorkflowAssembler::new();
    let w1 = assembler.assemble(&build(2), &create_test_deal()).unwrap();
    let w2 = assembler.assemble(&build(4), &create_test_deal()).unwrap();
    let w3 = assembler.assemble(&build(9), &create_test_deal()).unwrap();

    assert_eq!(w1.total_duration_days, 6);
    assert_eq!(w2.total_duration_days, 6);
    // 增加 7 天,总工期增加不超过 7
    assert_eq!(w3.total_duration_days, 10);
    assert!(w3.total_duration_days - w1.total_duration_days <= 7);
}

#[test]
fn test_assembly_is_deterministic() {
    let catalog = create_test_catalog(&["A", "B"], create_scenario_modules(2, 3, 1));
    let assembler = WorkflowAssembler::new();
    let first = assembler.assemble(&catalog, &create_test_deal()).unwrap();
    for _ in 0..10 {
        let again = assembler.assemble(&catalog, &create_test_deal()).unwrap();
        assert_eq!(again, first);
    }
}

// ==========================================
// 错误案例测试
// ==========================================

#[test]
fn test_self_module_dependency_is_cycle() {
    let modules = vec![WorkflowModule::new(
        "A",
        vec![
            ModuleStep::new("a1", "A1", 2),
            ModuleStep::new("a2", "A2", 3).depends_on(&["a1"]),
        ],
    )
    .depends_on(&["A"])];
    let catalog = create_test_catalog(&["A"], modules);

    let err = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap_err();
    match err {
        EngineError::Cycle { step_ids } => {
            assert!(step_ids.contains(&"A.a1".to_string()));
            assert!(step_ids.contains(&"A.a2".to_string()));
            assert_eq!(step_ids.first(), step_ids.last());
        }
        other => panic!("期望 Cycle, 实际: {:?}", other),
    }
}

#[test]
fn test_single_step_self_dependency_is_cycle() {
    let modules = vec![WorkflowModule::new(
        "S",
        vec![ModuleStep::new("s", "S", 1).depends_on(&["s"])],
    )];
    let catalog = create_test_catalog(&["S"], modules);

    let err = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Cycle {
            step_ids: vec!["S.s".to_string(), "S.s".to_string()]
        }
    );
}

#[test]
fn test_mutual_module_dependency_is_cycle() {
    let modules = vec![
        WorkflowModule::new("A", vec![ModuleStep::new("a", "A", 1)]).depends_on(&["B"]),
        WorkflowModule::new("B", vec![ModuleStep::new("b", "B", 1)]).depends_on(&["A"]),
    ];
    let catalog = create_test_catalog(&["A", "B"], modules);

    let err = WorkflowAssembler::new()
        .assemble(&catalog, &create_test_deal())
        .unwrap_err();
    assert!(matches!(err, EngineError::Cycle { .. }));
}

#[test]
fn test_unknown_template_propagates_not_found() {
    let catalog = create_test_catalog(&[], Vec::new());
    let deal = DealConfiguration::new("DEAL-T2", Jurisdiction::Bahrain, ProductType::Wakala);

    let err = WorkflowAssembler::new().assemble(&catalog, &deal).unwrap_err();
    assert!(matches!(
        err,
        EngineError::NotFound {
            kind: NotFoundKind::Template,
            ..
        }
    ));
}

#[test]
fn test_duration_overflow_is_reported() {
    // 绕过目录加载校验,直接装配超大工期
    let template = WorkflowTemplate::new(Jurisdiction::Qatar, ProductType::Ijarah, &["A", "B"]);
    let modules = create_scenario_modules(u32::MAX, 1, 1);
    let resolved = ResolvedTemplate {
        template: &template,
        modules: modules.iter().collect(),
    };

    let err = WorkflowAssembler::new()
        .assemble_resolved(&create_test_deal(), &resolved)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::DurationOverflow {
            step_id: "A.a2".to_string()
        }
    );
}

#[test]
fn test_single_step_at_u32_max_still_schedules() {
    let template = WorkflowTemplate::new(Jurisdiction::Qatar, ProductType::Ijarah, &["A"]);
    let modules = vec![WorkflowModule::new(
        "A",
        vec![ModuleStep::new("a1", "A1", u32::MAX)],
    )];
    let resolved = ResolvedTemplate {
        template: &template,
        modules: modules.iter().collect(),
    };

    let workflow = WorkflowAssembler::new()
        .assemble_resolved(&create_test_deal(), &resolved)
        .unwrap();
    assert_eq!(workflow.total_duration_days, u32::MAX);
}

// ==========================================
// 依赖图规模测试
// ==========================================

/// 0 <- 1 <- 2 <- ... <- (n-1)
fn create_chain_graph(n: usize) -> Vec<Vec<usize>> {
    (0..n)
        .map(|i| if i == 0 { Vec::new() } else { vec![i - 1] })
        .collect()
}

#[test]
fn test_deep_chain_has_no_cycle() {
    let n = 200_000;
    let graph = StepGraph::new(create_chain_graph(n));
    assert!(graph.find_cycle().is_none());

    let order = graph.topological_order();
    let sched = schedule::compute(&graph, &vec![1; n], &order).unwrap();
    assert_eq!(sched.total_duration_days, n as u32);
    assert_eq!(sched.critical_path.len(), n);
}

#[test]
fn test_deep_chain_cycle_is_closed() {
    let n = 200_000;
    let mut deps = create_chain_graph(n);
    deps[0].push(n - 1);
    let graph = StepGraph::new(deps);

    let cycle = graph.find_cycle().unwrap();
    assert_eq!(cycle.len(), n + 1);
    assert_eq!(cycle.first(), cycle.last());
    assert_eq!(cycle[1], n - 1);
}

#[test]
fn test_global_step_id_format() {
    assert_eq!(global_step_id("qcb_regulatory", "qcb_notification"), "qcb_regulatory.qcb_notification");
}
