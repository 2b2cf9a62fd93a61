pub mod help;
pub mod notice;
pub mod task_list;
pub mod utils;

pub use notice::{Notice, Present};
pub use task_list::TaskList;
