use std::cmp::Reverse;
use std::collections::BinaryHeap;

// ==========================================
// StepGraph - 步骤依赖图（按扁平化下标）
// ==========================================
// deps[i]: 步骤 i 依赖的步骤下标
// 下标即声明顺序,所有平局都按下标升序裁决
#[derive(Debug, Clone)]
pub(super) struct StepGraph {
    deps: Vec<Vec<usize>>,
    dependents: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl StepGraph {
    pub(super) fn new(deps: Vec<Vec<usize>>) -> Self {
        let mut dependents = vec![Vec::new(); deps.len()];
        for (node, node_deps) in deps.iter().enumerate() {
            for &dep in node_deps {
                dependents[dep].push(node);
            }
        }
        Self { deps, dependents }
    }

    pub(super) fn len(&self) -> usize {
        self.deps.len()
    }

    pub(super) fn deps(&self, node: usize) -> &[usize] {
        &self.deps[node]
    }

    pub(super) fn dependents(&self, node: usize) -> &[usize] {
        &self.dependents[node]
    }

    pub(super) fn is_terminal(&self, node: usize) -> bool {
        self.dependents[node].is_empty()
    }

    // ==========================================
    // 环检测 (DFS + 显式栈)
    // ==========================================

    /// 查找一个环
    ///
    /// 显式栈迭代,依赖链深度不受线程栈大小限制
    ///
    /// # 返回
    /// - `Some(path)`: 依赖链 path[0] -> path[1] -> ... -> path[0]（首尾相同）
    /// - `None`: 无环
    pub(super) fn find_cycle(&self) -> Option<Vec<usize>> {
        let mut marks = vec![Mark::Unvisited; self.len()];
        // (节点, 下一个待访问依赖的位置); 栈内节点即当前 DFS 路径
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for start in 0..self.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            marks[start] = Mark::OnStack;
            stack.push((start, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                let dep = match self.deps[node].get(next) {
                    Some(&dep) => dep,
                    None => {
                        stack.pop();
                        marks[node] = Mark::Done;
                        continue;
                    }
                };
                frame.1 += 1;

                match marks[dep] {
                    Mark::OnStack => {
                        let pos = stack.iter().position(|&(n, _)| n == dep).unwrap_or(0);
                        let mut cycle: Vec<usize> = stack[pos..].iter().map(|&(n, _)| n).collect();
                        cycle.push(dep);
                        return Some(cycle);
                    }
                    Mark::Unvisited => {
                        marks[dep] = Mark::OnStack;
                        stack.push((dep, 0));
                    }
                    Mark::Done => {}
                }
            }
        }
        None
    }

    // ==========================================
    // 拓扑排序 (Kahn, 就绪节点按声明顺序出队)
    // ==========================================

    /// 稳定拓扑序; 调用前必须确认无环
    pub(super) fn topological_order(&self) -> Vec<usize> {
        let mut in_degree: Vec<usize> = self.deps.iter().map(|d| d.len()).collect();
        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &deg)| deg == 0)
            .map(|(node, _)| Reverse(node))
            .collect();

        let mut order = Vec::with_capacity(self.len());
        while let Some(Reverse(node)) = ready.pop() {
            order.push(node);
            for &next in &self.dependents[node] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }
        order
    }
}
