mod add_task_button;
mod filter_bar;
mod task_list;
mod task_list_row;
mod theme_toggle;

pub use add_task_button::AddTaskButton;
pub use filter_bar::FilterBar;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
pub use theme_toggle::ThemeToggle;
