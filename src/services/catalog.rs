//! Catalog service: authors, categories, publishers, locations, documents and copies

use std::collections::{HashMap, HashSet};

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        category::{Category, CreateCategory, UpdateCategory},
        copy::{Copy, CreateCopy, UpdateCopy},
        document::{CreateDocument, Document, UpdateDocument},
        location::{CreateLocation, Location, UpdateLocation},
        publisher::{CreatePublisher, Publisher, UpdatePublisher},
    },
    repository::Repository,
};

/// Whether re-parenting `id` under `new_parent` would close a loop.
/// `links` maps every category to its current parent.
pub fn would_create_cycle(id: i32, new_parent: i32, links: &HashMap<i32, Option<i32>>) -> bool {
    let mut seen = HashSet::new();
    let mut current = Some(new_parent);
    while let Some(node) = current {
        if node == id {
            return true;
        }
        if !seen.insert(node) {
            // pre-existing loop not involving `id`
            return false;
        }
        current = links.get(&node).copied().flatten();
    }
    false
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // --- authors ---

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, data: CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        if self
            .repository
            .authors
            .name_exists(&data.lastname, data.firstname.as_deref(), None)
            .await?
        {
            return Err(AppError::BusinessRule("Author already exists".to_string()));
        }
        let author = self.repository.authors.create(&data).await?;
        tracing::info!(author_id = author.id, "Author created");
        Ok(author)
    }

    pub async fn update_author(&self, id: i32, data: UpdateAuthor) -> AppResult<Author> {
        data.validate()?;
        let current = self.repository.authors.get_by_id(id).await?;

        let birth = data.birth_date.or(current.birth_date);
        let death = data.death_date.or(current.death_date);
        if let (Some(birth), Some(death)) = (birth, death) {
            if death < birth {
                return Err(AppError::Validation("Death date cannot precede birth date".to_string()));
            }
        }

        if data.lastname.is_some() || data.firstname.is_some() {
            let lastname = data.lastname.as_deref().unwrap_or(&current.lastname);
            let firstname = data.firstname.as_deref().or(current.firstname.as_deref());
            if self.repository.authors.name_exists(lastname, firstname, Some(id)).await? {
                return Err(AppError::BusinessRule("Author already exists".to_string()));
            }
        }

        self.repository.authors.update(id, &data).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.delete(id).await
    }

    // --- categories ---

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn category_children(&self, id: i32) -> AppResult<Vec<Category>> {
        self.repository.categories.get_by_id(id).await?;
        self.repository.categories.list_children(id).await
    }

    pub async fn create_category(&self, data: CreateCategory) -> AppResult<Category> {
        data.validate()?;
        if self.repository.categories.name_exists(&data.name, None).await? {
            return Err(AppError::BusinessRule(format!("Category '{}' already exists", data.name)));
        }
        if let Some(parent_id) = data.parent_id {
            if !self.repository.categories.exists(parent_id).await? {
                return Err(AppError::BusinessRule(format!("Parent category {} does not exist", parent_id)));
            }
        }
        self.repository.categories.create(&data).await
    }

    pub async fn update_category(&self, id: i32, data: UpdateCategory) -> AppResult<Category> {
        data.validate()?;
        self.repository.categories.get_by_id(id).await?;

        if let Some(ref name) = data.name {
            if self.repository.categories.name_exists(name, Some(id)).await? {
                return Err(AppError::BusinessRule(format!("Category '{}' already exists", name)));
            }
        }
        if let Some(parent_id) = data.parent_id {
            let links = self.repository.categories.parent_links().await?;
            if !links.contains_key(&parent_id) {
                return Err(AppError::BusinessRule(format!("Parent category {} does not exist", parent_id)));
            }
            if would_create_cycle(id, parent_id, &links) {
                return Err(AppError::BusinessRule(
                    "A category cannot be its own ancestor".to_string(),
                ));
            }
        }

        self.repository.categories.update(id, &data).await
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.delete(id).await
    }

    // --- publishers ---

    pub async fn list_publishers(&self) -> AppResult<Vec<Publisher>> {
        self.repository.publishers.list().await
    }

    pub async fn get_publisher(&self, id: i32) -> AppResult<Publisher> {
        self.repository.publishers.get_by_id(id).await
    }

    pub async fn create_publisher(&self, data: CreatePublisher) -> AppResult<Publisher> {
        data.validate()?;
        if self.repository.publishers.name_exists(&data.name, None).await? {
            return Err(AppError::BusinessRule(format!("Publisher '{}' already exists", data.name)));
        }
        self.repository.publishers.create(&data).await
    }

    pub async fn update_publisher(&self, id: i32, data: UpdatePublisher) -> AppResult<Publisher> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if self.repository.publishers.name_exists(name, Some(id)).await? {
                return Err(AppError::BusinessRule(format!("Publisher '{}' already exists", name)));
            }
        }
        self.repository.publishers.update(id, &data).await
    }

    pub async fn delete_publisher(&self, id: i32) -> AppResult<Publisher> {
        self.repository.publishers.delete(id).await
    }

    // --- locations ---

    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        self.repository.locations.list().await
    }

    pub async fn get_location(&self, id: i32) -> AppResult<Location> {
        self.repository.locations.get_by_id(id).await
    }

    pub async fn create_location(&self, data: CreateLocation) -> AppResult<Location> {
        data.validate()?;
        if self.repository.locations.shelf_code_exists(&data.shelf_code, None).await? {
            return Err(AppError::BusinessRule(format!("Shelf code '{}' already exists", data.shelf_code)));
        }
        self.repository.locations.create(&data).await
    }

    pub async fn update_location(&self, id: i32, data: UpdateLocation) -> AppResult<Location> {
        data.validate()?;
        if let Some(ref shelf_code) = data.shelf_code {
            if self.repository.locations.shelf_code_exists(shelf_code, Some(id)).await? {
                return Err(AppError::BusinessRule(format!("Shelf code '{}' already exists", shelf_code)));
            }
        }
        self.repository.locations.update(id, &data).await
    }

    pub async fn delete_location(&self, id: i32) -> AppResult<Location> {
        self.repository.locations.delete(id).await
    }

    // --- documents ---

    pub async fn list_documents(&self) -> AppResult<Vec<Document>> {
        self.repository.documents.list().await
    }

    pub async fn get_document(&self, id: i32) -> AppResult<Document> {
        self.repository.documents.get_by_id(id).await
    }

    pub async fn create_document(&self, data: CreateDocument, created_by: i32) -> AppResult<Document> {
        data.validate()?;
        if let Some(ref isbn) = data.isbn {
            if self.repository.documents.isbn_exists(isbn, None).await? {
                return Err(AppError::BusinessRule(format!("ISBN '{}' already registered", isbn)));
            }
        }
        self.check_document_refs(Some(data.category_id), Some(data.publisher_id), &data.author_ids)
            .await?;

        let document = self.repository.documents.create(&data, created_by).await?;
        tracing::info!(document_id = document.id, created_by, "Document created");
        Ok(document)
    }

    pub async fn update_document(&self, id: i32, data: UpdateDocument) -> AppResult<Document> {
        data.validate()?;
        self.repository.documents.get_by_id(id).await?;

        if let Some(ref isbn) = data.isbn {
            if self.repository.documents.isbn_exists(isbn, Some(id)).await? {
                return Err(AppError::BusinessRule(format!("ISBN '{}' already registered", isbn)));
            }
        }
        let author_ids = data.author_ids.as_deref().unwrap_or(&[]);
        self.check_document_refs(data.category_id, data.publisher_id, author_ids)
            .await?;

        self.repository.documents.update(id, &data).await
    }

    pub async fn delete_document(&self, id: i32) -> AppResult<Document> {
        self.repository.documents.delete(id).await
    }

    async fn check_document_refs(
        &self,
        category_id: Option<i32>,
        publisher_id: Option<i32>,
        author_ids: &[i32],
    ) -> AppResult<()> {
        if let Some(category_id) = category_id {
            if !self.repository.categories.exists(category_id).await? {
                return Err(AppError::BusinessRule(format!("Category {} does not exist", category_id)));
            }
        }
        if let Some(publisher_id) = publisher_id {
            if !self.repository.publishers.exists(publisher_id).await? {
                return Err(AppError::BusinessRule(format!("Publisher {} does not exist", publisher_id)));
            }
        }
        if !author_ids.is_empty() {
            let missing = self.repository.authors.missing_ids(author_ids).await?;
            if !missing.is_empty() {
                return Err(AppError::BusinessRule(format!("Unknown author ids: {:?}", missing)));
            }
        }
        Ok(())
    }

    // --- copies ---

    pub async fn list_copies(&self) -> AppResult<Vec<Copy>> {
        self.repository.copies.list().await
    }

    pub async fn get_copy(&self, id: i32) -> AppResult<Copy> {
        self.repository.copies.get_by_id(id).await
    }

    pub async fn create_copy(&self, data: CreateCopy, added_by: i32) -> AppResult<Copy> {
        data.validate()?;
        if self
            .repository
            .copies
            .inventory_number_exists(&data.inventory_number, None)
            .await?
        {
            return Err(AppError::BusinessRule(format!(
                "Inventory number '{}' already exists",
                data.inventory_number
            )));
        }
        self.check_copy_refs(Some(data.document_id), Some(data.location_id)).await?;

        self.repository.copies.create(&data, added_by).await
    }

    pub async fn update_copy(&self, id: i32, data: UpdateCopy) -> AppResult<Copy> {
        data.validate()?;
        self.repository.copies.get_by_id(id).await?;

        if let Some(ref inventory_number) = data.inventory_number {
            if self
                .repository
                .copies
                .inventory_number_exists(inventory_number, Some(id))
                .await?
            {
                return Err(AppError::BusinessRule(format!(
                    "Inventory number '{}' already exists",
                    inventory_number
                )));
            }
        }
        self.check_copy_refs(data.document_id, data.location_id).await?;

        self.repository.copies.update(id, &data).await
    }

    pub async fn delete_copy(&self, id: i32) -> AppResult<Copy> {
        self.repository.copies.delete(id).await
    }

    async fn check_copy_refs(&self, document_id: Option<i32>, location_id: Option<i32>) -> AppResult<()> {
        if let Some(document_id) = document_id {
            if !self.repository.documents.exists(document_id).await? {
                return Err(AppError::BusinessRule(format!("Document {} does not exist", document_id)));
            }
        }
        if let Some(location_id) = location_id {
            if !self.repository.locations.exists(location_id).await? {
                return Err(AppError::BusinessRule(format!("Location {} does not exist", location_id)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(pairs: &[(i32, Option<i32>)]) -> HashMap<i32, Option<i32>> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_self_parent_is_cycle() {
        let links = links(&[(1, None)]);
        assert!(would_create_cycle(1, 1, &links));
    }

    #[test]
    fn test_descendant_parent_is_cycle() {
        // 1 <- 2 <- 3
        let links = links(&[(1, None), (2, Some(1)), (3, Some(2))]);
        assert!(would_create_cycle(1, 3, &links));
    }

    #[test]
    fn test_sibling_parent_is_fine() {
        let links = links(&[(1, None), (2, Some(1)), (3, Some(1))]);
        assert!(!would_create_cycle(2, 3, &links));
        assert!(!would_create_cycle(3, 1, &links));
    }

    #[test]
    fn test_existing_loop_terminates() {
        let links = links(&[(1, None), (5, Some(6)), (6, Some(5))]);
        assert!(!would_create_cycle(1, 5, &links));
    }
}
