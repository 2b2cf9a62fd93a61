use super::{TaskFilter, TaskId, Tier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CompleteTask { id: TaskId, tier: Option<Tier> },
    FetchTasks(TaskFilter),
}
