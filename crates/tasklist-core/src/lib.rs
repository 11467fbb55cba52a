//! Task list state, commands, rendering and persistence shared by the
//! browser and command-line front ends.

pub mod config;
pub mod controller;
pub mod filter;
pub mod render;
pub mod storage;
pub mod store;
pub mod task;
pub mod theme;

pub use config::Config;
pub use controller::{TaskListController, TextPrompt};
pub use filter::Filter;
pub use render::{ListBody, TaskListView, TaskRow};
pub use storage::{KeyValueStore, MemoryStore, Persistence};
pub use store::TaskStore;
pub use task::Task;
pub use theme::Theme;
