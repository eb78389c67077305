mod add_task_form;
mod filter_bar;
mod task_list;
mod task_row;
mod theme_toggle;

pub use add_task_form::AddTaskForm;
pub use filter_bar::FilterBar;
pub use task_list::TaskList;
pub use task_row::TaskRow;
pub use theme_toggle::ThemeToggle;
