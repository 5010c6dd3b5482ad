use serde::{Deserialize, Serialize};

use crate::tasks::repo::Task;

/// Request body for task creation. Title is optional at the decode stage so
/// a missing title yields the documented 400 rather than a decode rejection.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for editing a task. Both fields overwrite what is stored.
#[derive(Debug, Deserialize)]
pub struct EditTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Query parameters for the task listing.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub success: bool,
    pub task: Task,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub success: bool,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub message: String,
}
