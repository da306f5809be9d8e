pub mod attention;
pub mod folder;
pub mod sort;
pub mod task;

pub use attention::{AttentionReport, attention_required, attention_required_at};
pub use folder::{Folder, TitleParts, decode_title, encode_title};
pub use sort::{sort_tasks, sort_tasks_at};
pub use task::{Priority, Task, start_of_today};
