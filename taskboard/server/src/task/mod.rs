use crate::entities::task;
use sea_orm::*;

pub mod api;
pub mod web;

pub use web::{create_task_list_router, create_task_router};

/// Status every new task starts with.
pub const DEFAULT_TASK_STATUS: &str = "In Progress";

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Task {
    id: i32,
    status: String,
    task_name: String,
    assigned_to: String,
    task_description: String,
    is_urgent: bool,
    due_date: String,
    created_by: String,
}

impl Task {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn assigned_to(&self) -> &str {
        &self.assigned_to
    }

    pub fn task_description(&self) -> &str {
        &self.task_description
    }

    pub fn is_urgent(&self) -> bool {
        self.is_urgent
    }

    /// Due date as `YYYY-MM-DD`.
    pub fn due_date(&self) -> &str {
        &self.due_date
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Self {
            id: model.id,
            status: model.status,
            task_name: model.task_name,
            assigned_to: model.assigned_to,
            task_description: model.task_description,
            is_urgent: model.is_urgent,
            due_date: model.due_date,
            created_by: model.created_by,
        }
    }
}

/// Editable task fields, shared by task creation and the full edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    pub task_name: String,
    pub assigned_to: String,
    pub task_description: String,
    pub is_urgent: bool,
    pub due_date: String,
}

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    #[error("Task with ID {0} not found")]
    TaskNotFound(i32),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub struct TaskService<'a> {
    db: &'a DatabaseConnection,
}

impl TaskService<'_> {
    pub fn new(db: &DatabaseConnection) -> TaskService<'_> {
        TaskService { db }
    }

    /// Creates a task in the default status, owned by `created_by`.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(
        &self,
        details: TaskDetails,
        created_by: String,
    ) -> Result<Task, TaskServiceError> {
        let active_model = task::ActiveModel {
            status: ActiveValue::Set(DEFAULT_TASK_STATUS.to_string()),
            task_name: ActiveValue::Set(details.task_name),
            assigned_to: ActiveValue::Set(details.assigned_to),
            task_description: ActiveValue::Set(details.task_description),
            is_urgent: ActiveValue::Set(details.is_urgent),
            due_date: ActiveValue::Set(details.due_date),
            created_by: ActiveValue::Set(created_by),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Task::from(created_model))
    }

    /// Retrieves every task in creation order.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    /// Retrieves the tasks whose due date equals `due_date` (`YYYY-MM-DD`).
    #[tracing::instrument(skip(self))]
    pub async fn get_tasks_due_on(&self, due_date: &str) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = task::Entity::find()
            .filter(task::Column::DueDate.eq(due_date))
            .order_by_asc(task::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_task_by_id(&self, id: i32) -> Result<Task, TaskServiceError> {
        let model = task::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        Ok(Task::from(model))
    }

    /// Overwrites status and the editable details of a task. The editor is
    /// recorded as `created_by`.
    #[tracing::instrument(skip(self))]
    pub async fn edit_task_by_id(
        &self,
        id: i32,
        status: String,
        details: TaskDetails,
        edited_by: String,
    ) -> Result<Task, TaskServiceError> {
        let mut active_model = self.find_model(id).await?;
        active_model.status = ActiveValue::Set(status);
        active_model.task_name = ActiveValue::Set(details.task_name);
        active_model.assigned_to = ActiveValue::Set(details.assigned_to);
        active_model.task_description = ActiveValue::Set(details.task_description);
        active_model.is_urgent = ActiveValue::Set(details.is_urgent);
        active_model.due_date = ActiveValue::Set(details.due_date);
        active_model.created_by = ActiveValue::Set(edited_by);
        let updated_model = active_model.update(self.db).await?;
        Ok(Task::from(updated_model))
    }

    /// Changes only the status of a task.
    #[tracing::instrument(skip(self))]
    pub async fn edit_task_status_by_id(
        &self,
        id: i32,
        status: String,
    ) -> Result<Task, TaskServiceError> {
        let mut active_model = self.find_model(id).await?;
        active_model.status = ActiveValue::Set(status);
        let updated_model = active_model.update(self.db).await?;
        Ok(Task::from(updated_model))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_task_by_id(&self, id: i32) -> Result<Task, TaskServiceError> {
        let deleted = self.get_task_by_id(id).await?;
        task::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(deleted)
    }

    async fn find_model(&self, id: i32) -> Result<task::ActiveModel, TaskServiceError> {
        let model = task::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        Ok(model.into())
    }
}
