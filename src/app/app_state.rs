#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use crate::app::ui::TaskList;
use crate::models::{Action, Task, TaskFilter, Tier};

pub(crate) struct AppState {
    pub task_list: TaskList,
    pub filter: TaskFilter,
    pub loading: bool,
    ready: bool,
}

impl AppState {
    pub fn new(tasks: Vec<Task>, filter: TaskFilter) -> AppState {
        AppState {
            task_list: TaskList::new(tasks),
            filter,
            loading: false,
            ready: false,
        }
    }

    /// Returns true only the first time it is called.
    pub fn mark_ready(&mut self) -> bool {
        !std::mem::replace(&mut self.ready, true)
    }

    pub fn complete_selected(&self, tier: Option<Tier>) -> Option<Action> {
        self.task_list.selected().map(|task| Action::CompleteTask {
            id: task.id.clone(),
            tier,
        })
    }

    pub fn reload(&mut self) -> Action {
        self.loading = true;
        Action::FetchTasks(self.filter.clone())
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.task_list.set_tasks(tasks);
        self.loading = false;
    }
}
