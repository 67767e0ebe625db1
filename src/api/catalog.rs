//! Catalog endpoints: authors, categories, publishers, locations, documents and copies

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        category::{Category, CreateCategory, UpdateCategory},
        copy::{Copy, CreateCopy, UpdateCopy},
        document::{CreateDocument, Document, UpdateDocument},
        location::{CreateLocation, Location, UpdateLocation},
        publisher::{CreatePublisher, Publisher, UpdatePublisher},
    },
    AppState,
};

use super::AuthenticatedUser;

/// List authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of authors", body = Vec<Author>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Author>>> {
    Ok(Json(state.services.catalog.list_authors().await?))
}

/// Get an author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    Ok(Json(state.services.catalog.get_author(id).await?))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(data): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let created = state.services.catalog.create_author(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an author
#[utoipa::path(
    patch,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    Ok(Json(state.services.catalog.update_author(id, data).await?))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Deleted author", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    Ok(Json(state.services.catalog.delete_author(id).await?))
}

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.services.catalog.list_categories().await?))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.services.catalog.get_category(id).await?))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(data): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let created = state.services.catalog.create_category(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a category
#[utoipa::path(
    patch,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.services.catalog.update_category(id, data).await?))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted category", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.services.catalog.delete_category(id).await?))
}

/// List the direct children of a category
#[utoipa::path(
    get,
    path = "/categories/{id}/children",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Child categories", body = Vec<Category>),
        (status = 404, description = "Category not found")
    )
)]
pub async fn list_category_children(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.services.catalog.category_children(id).await?))
}

/// List publishers
#[utoipa::path(
    get,
    path = "/publishers",
    tag = "publishers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of publishers", body = Vec<Publisher>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_publishers(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Publisher>>> {
    Ok(Json(state.services.catalog.list_publishers().await?))
}

/// Get a publisher by ID
#[utoipa::path(
    get,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Publisher ID")),
    responses(
        (status = 200, description = "Publisher details", body = Publisher),
        (status = 404, description = "Publisher not found")
    )
)]
pub async fn get_publisher(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Publisher>> {
    Ok(Json(state.services.catalog.get_publisher(id).await?))
}

/// Create a publisher
#[utoipa::path(
    post,
    path = "/publishers",
    tag = "publishers",
    security(("bearer_auth" = [])),
    request_body = CreatePublisher,
    responses(
        (status = 201, description = "Publisher created", body = Publisher),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_publisher(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(data): Json<CreatePublisher>,
) -> AppResult<(StatusCode, Json<Publisher>)> {
    let created = state.services.catalog.create_publisher(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a publisher
#[utoipa::path(
    patch,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Publisher ID")),
    request_body = UpdatePublisher,
    responses(
        (status = 200, description = "Publisher updated", body = Publisher),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Publisher not found")
    )
)]
pub async fn update_publisher(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdatePublisher>,
) -> AppResult<Json<Publisher>> {
    Ok(Json(state.services.catalog.update_publisher(id, data).await?))
}

/// Delete a publisher
#[utoipa::path(
    delete,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Publisher ID")),
    responses(
        (status = 200, description = "Deleted publisher", body = Publisher),
        (status = 404, description = "Publisher not found")
    )
)]
pub async fn delete_publisher(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Publisher>> {
    Ok(Json(state.services.catalog.delete_publisher(id).await?))
}

/// List locations
#[utoipa::path(
    get,
    path = "/locations",
    tag = "locations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of locations", body = Vec<Location>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_locations(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Location>>> {
    Ok(Json(state.services.catalog.list_locations().await?))
}

/// Get a location by ID
#[utoipa::path(
    get,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location details", body = Location),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_location(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Location>> {
    Ok(Json(state.services.catalog.get_location(id).await?))
}

/// Create a location
#[utoipa::path(
    post,
    path = "/locations",
    tag = "locations",
    security(("bearer_auth" = [])),
    request_body = CreateLocation,
    responses(
        (status = 201, description = "Location created", body = Location),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_location(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(data): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    let created = state.services.catalog.create_location(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a location
#[utoipa::path(
    patch,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Location ID")),
    request_body = UpdateLocation,
    responses(
        (status = 200, description = "Location updated", body = Location),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Location not found")
    )
)]
pub async fn update_location(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLocation>,
) -> AppResult<Json<Location>> {
    Ok(Json(state.services.catalog.update_location(id, data).await?))
}

/// Delete a location
#[utoipa::path(
    delete,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Deleted location", body = Location),
        (status = 404, description = "Location not found")
    )
)]
pub async fn delete_location(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Location>> {
    Ok(Json(state.services.catalog.delete_location(id).await?))
}

/// List documents
#[utoipa::path(
    get,
    path = "/documents",
    tag = "documents",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of documents", body = Vec<Document>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_documents(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Document>>> {
    Ok(Json(state.services.catalog.list_documents().await?))
}

/// Get a document by ID
#[utoipa::path(
    get,
    path = "/documents/{id}",
    tag = "documents",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document details", body = Document),
        (status = 404, description = "Document not found")
    )
)]
pub async fn get_document(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Document>> {
    Ok(Json(state.services.catalog.get_document(id).await?))
}

/// Create a document
#[utoipa::path(
    post,
    path = "/documents",
    tag = "documents",
    security(("bearer_auth" = [])),
    request_body = CreateDocument,
    responses(
        (status = 201, description = "Document created", body = Document),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_document(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(data): Json<CreateDocument>,
) -> AppResult<(StatusCode, Json<Document>)> {
    let created = state.services.catalog.create_document(data, user.id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a document
#[utoipa::path(
    patch,
    path = "/documents/{id}",
    tag = "documents",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Document ID")),
    request_body = UpdateDocument,
    responses(
        (status = 200, description = "Document updated", body = Document),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Document not found")
    )
)]
pub async fn update_document(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateDocument>,
) -> AppResult<Json<Document>> {
    Ok(Json(state.services.catalog.update_document(id, data).await?))
}

/// Delete a document
#[utoipa::path(
    delete,
    path = "/documents/{id}",
    tag = "documents",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Deleted document", body = Document),
        (status = 404, description = "Document not found")
    )
)]
pub async fn delete_document(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Document>> {
    Ok(Json(state.services.catalog.delete_document(id).await?))
}

/// List copies
#[utoipa::path(
    get,
    path = "/copies",
    tag = "copies",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of copies", body = Vec<Copy>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_copies(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Copy>>> {
    Ok(Json(state.services.catalog.list_copies().await?))
}

/// Get a copy by ID
#[utoipa::path(
    get,
    path = "/copies/{id}",
    tag = "copies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy details", body = Copy),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_copy(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Copy>> {
    Ok(Json(state.services.catalog.get_copy(id).await?))
}

/// Create a copy
#[utoipa::path(
    post,
    path = "/copies",
    tag = "copies",
    security(("bearer_auth" = [])),
    request_body = CreateCopy,
    responses(
        (status = 201, description = "Copy created", body = Copy),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_copy(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(data): Json<CreateCopy>,
) -> AppResult<(StatusCode, Json<Copy>)> {
    let created = state.services.catalog.create_copy(data, user.id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a copy
#[utoipa::path(
    patch,
    path = "/copies/{id}",
    tag = "copies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Copy ID")),
    request_body = UpdateCopy,
    responses(
        (status = 200, description = "Copy updated", body = Copy),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_copy(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCopy>,
) -> AppResult<Json<Copy>> {
    Ok(Json(state.services.catalog.update_copy(id, data).await?))
}

/// Delete a copy
#[utoipa::path(
    delete,
    path = "/copies/{id}",
    tag = "copies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Deleted copy", body = Copy),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn delete_copy(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Copy>> {
    Ok(Json(state.services.catalog.delete_copy(id).await?))
}
