use crate::entities::category;
use sea_orm::*;

pub mod web;

pub use web::{create_category_list_router, create_category_router};

/// A status label offered when editing tasks.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Category {
    id: i32,
    status: String,
}

impl Category {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl From<category::Model> for Category {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            status: model.status,
        }
    }
}

/// Error type for CategoryService operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryServiceError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl CategoryService<'_> {
    pub fn new(db: &DatabaseConnection) -> CategoryService<'_> {
        CategoryService { db }
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_category(&self, status: String) -> Result<Category, CategoryServiceError> {
        let active_model = category::ActiveModel {
            status: ActiveValue::Set(status),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Category::from(created_model))
    }

    /// Retrieves every category ordered by its status label.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_categories(&self) -> Result<Vec<Category>, CategoryServiceError> {
        let categories = category::Entity::find()
            .order_by_asc(category::Column::Status)
            .all(self.db)
            .await?
            .into_iter()
            .map(Category::from)
            .collect();
        Ok(categories)
    }
}
