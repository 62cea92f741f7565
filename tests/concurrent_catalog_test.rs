// ==========================================
// 目录并发访问测试
// ==========================================
// 测试目标: 装配线程与目录替换并发时,每次装配只看到完整的新/旧目录
// 覆盖范围: CatalogStore::snapshot / CatalogStore::replace
// ==========================================

mod test_helpers;

use grc_workflow::catalog::{builtin_catalog, CatalogStore, ModuleCatalog};
use grc_workflow::domain::module::{ModuleStep, WorkflowModule, WorkflowTemplate};
use grc_workflow::domain::types::{Jurisdiction, ProductType};
use grc_workflow::engine::WorkflowAssembler;
use std::sync::Arc;
use std::thread;
use test_helpers::qatar_ijarah_deal;

/// 与内置目录同键（Qatar/Ijarah）但结构不同的目录
fn create_alternate_catalog() -> ModuleCatalog {
    ModuleCatalog::from_parts(
        "alternate",
        vec![
            WorkflowModule::new("intake", vec![ModuleStep::new("open", "Open", 1)]),
            WorkflowModule::new("approval", vec![ModuleStep::new("sign", "Sign", 4)])
                .depends_on(&["intake"])
                .hard_gate(true),
        ],
        vec![WorkflowTemplate::new(
            Jurisdiction::Qatar,
            ProductType::Ijarah,
            &["intake", "approval"],
        )],
    )
    .unwrap()
}

#[test]
fn test_assembly_never_sees_partial_catalog() {
    let store = Arc::new(CatalogStore::builtin().unwrap());
    let deal = qatar_ijarah_deal();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let deal = deal.clone();
            thread::spawn(move || {
                let assembler = WorkflowAssembler::new();
                for _ in 0..200 {
                    let catalog = store.snapshot().unwrap();
                    let workflow = assembler.assemble(&catalog, &deal).unwrap();
                    // 只允许两种完整结果
                    match workflow.steps.len() {
                        15 => assert_eq!(workflow.total_duration_days, 30),
                        2 => assert_eq!(workflow.total_duration_days, 5),
                        n => panic!("出现不完整目录的装配结果: {} 个步骤", n),
                    }
                }
            })
        })
        .collect();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..50 {
                let catalog = if i % 2 == 0 {
                    create_alternate_catalog()
                } else {
                    builtin_catalog().unwrap()
                };
                store.replace(catalog).unwrap();
            }
        })
    };

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    // 写线程最后一次替换为内置目录
    assert_eq!(store.snapshot().unwrap().stats().template_count, 3);
}
