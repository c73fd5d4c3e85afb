/// 页面跳转能力，由展示层实现
pub trait Navigator {
    /// 返回上一页
    fn go_back(&mut self);

    /// 跳转到成绩榜
    fn show_results(&mut self);
}

/// 跳转目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Back,
    Results,
}

/// 只记录跳转目标的实现，用于命令行和测试
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<Destination>,
}

impl RecordingNavigator {
    /// 最近一次跳转
    pub fn last(&self) -> Option<Destination> {
        self.visited.last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn go_back(&mut self) {
        tracing::info!("↩️ 返回上一页");
        self.visited.push(Destination::Back);
    }

    fn show_results(&mut self) {
        tracing::info!("🏆 跳转到成绩榜");
        self.visited.push(Destination::Results);
    }
}
