use super::graph::StepGraph;

// ==========================================
// Schedule - 排期计算结果（按扁平化下标）
// ==========================================
#[derive(Debug, Clone, Default)]
pub(super) struct Schedule {
    pub earliest_start: Vec<u32>,
    pub earliest_finish: Vec<u32>,
    pub latest_start: Vec<u32>,
    pub latest_finish: Vec<u32>,
    pub total_duration_days: u32,
    /// 关键路径（正向顺序）
    pub critical_path: Vec<usize>,
}

impl Schedule {
    pub(super) fn slack(&self, node: usize) -> u32 {
        self.latest_start[node].saturating_sub(self.earliest_start[node])
    }
}

/// 计算排期
///
/// # 参数
/// - `graph`: 无环依赖图
/// - `durations`: 各步骤工期（天）
/// - `order`: 拓扑序
///
/// # 规则
/// 1. 正推: ES = max(依赖 EF, 0); EF = ES + 工期
/// 2. 总工期 = 终止步骤 EF 最大值
/// 3. 逆推: LF = min(后继 LS),终止步骤 LF = 总工期; LS = LF - 工期
/// 4. 关键路径: 从 EF 最大的终止步骤出发,逐层回溯 EF 最大的依赖
///    平局按声明顺序（下标小者优先）
///
/// # 错误
/// - `Err(node)`: 步骤 node 的 EF 超出 u32 范围
pub(super) fn compute(
    graph: &StepGraph,
    durations: &[u32],
    order: &[usize],
) -> Result<Schedule, usize> {
    let n = graph.len();
    if n == 0 {
        return Ok(Schedule::default());
    }

    // 1. 正推
    let mut es = vec![0u32; n];
    let mut ef = vec![0u32; n];
    for &node in order {
        es[node] = graph
            .deps(node)
            .iter()
            .map(|&d| ef[d])
            .max()
            .unwrap_or(0);
        ef[node] = es[node].checked_add(durations[node]).ok_or(node)?;
    }

    // 2. 总工期 + 关键路径终点
    let mut end: Option<usize> = None;
    for node in (0..n).filter(|&i| graph.is_terminal(i)) {
        match end {
            Some(best) if ef[node] <= ef[best] => {}
            _ => end = Some(node),
        }
    }
    let total = end.map(|e| ef[e]).unwrap_or(0);

    // 3. 逆推
    let mut ls = vec![0u32; n];
    let mut lf = vec![0u32; n];
    for &node in order.iter().rev() {
        lf[node] = graph
            .dependents(node)
            .iter()
            .map(|&d| ls[d])
            .min()
            .unwrap_or(total);
        ls[node] = lf[node].saturating_sub(durations[node]);
    }

    // 4. 关键路径回溯
    let mut critical_path = Vec::new();
    let mut cursor = end;
    while let Some(node) = cursor {
        critical_path.push(node);
        cursor = latest_finishing_dep(graph, &ef, node);
    }
    critical_path.reverse();

    Ok(Schedule {
        earliest_start: es,
        earliest_finish: ef,
        latest_start: ls,
        latest_finish: lf,
        total_duration_days: total,
        critical_path,
    })
}

/// EF 最大的依赖; 平局取下标最小者
fn latest_finishing_dep(graph: &StepGraph, ef: &[u32], node: usize) -> Option<usize> {
    let mut best: Option<usize> = None;
    for &dep in graph.deps(node) {
        best = match best {
            None => Some(dep),
            Some(b) if ef[dep] > ef[b] || (ef[dep] == ef[b] && dep < b) => Some(dep),
            keep => keep,
        };
    }
    best
}
