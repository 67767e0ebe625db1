//! System users, roles and permissions administration

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        role::{NamePayload, Permission, Role, RoleDetails, UpdateNamePayload},
        user::{RegisterUser, UpdateUser, User},
    },
    repository::Repository,
    services::auth::AuthService,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    auth: AuthService,
}

impl UsersService {
    pub fn new(repository: Repository, auth: AuthService) -> Self {
        Self { repository, auth }
    }

    // --- users ---

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn create(&self, data: RegisterUser) -> AppResult<User> {
        self.auth.register(data).await
    }

    pub async fn update(&self, id: i32, data: UpdateUser) -> AppResult<User> {
        data.validate()?;
        self.repository.users.get_by_id(id).await?;

        if let Some(ref username) = data.username {
            if self.repository.users.username_exists(username, Some(id)).await? {
                return Err(AppError::BusinessRule("Username already registered".to_string()));
            }
        }
        if let Some(ref email) = data.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::BusinessRule("Email already registered".to_string()));
            }
        }

        let hash = match data.password {
            Some(ref password) => Some(self.auth.hash_password(password)?),
            None => None,
        };

        let user = self.repository.users.update(id, &data, hash).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, id: i32) -> AppResult<User> {
        let user = self.repository.users.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(user)
    }

    pub async fn roles_of(&self, user_id: i32) -> AppResult<Vec<Role>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.users.get_roles(user_id).await
    }

    pub async fn assign_role(&self, user_id: i32, role_id: i32) -> AppResult<Vec<Role>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.roles.get_role(role_id).await?;
        self.repository.users.assign_role(user_id, role_id).await?;
        self.repository.users.get_roles(user_id).await
    }

    pub async fn remove_role(&self, user_id: i32, role_id: i32) -> AppResult<Vec<Role>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.users.remove_role(user_id, role_id).await?;
        self.repository.users.get_roles(user_id).await
    }

    // --- roles ---

    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.repository.roles.list_roles().await
    }

    pub async fn get_role(&self, id: i32) -> AppResult<RoleDetails> {
        let role = self.repository.roles.get_role(id).await?;
        let permissions = self.repository.roles.role_permissions(id).await?;
        Ok(RoleDetails { role, permissions })
    }

    pub async fn create_role(&self, data: NamePayload) -> AppResult<Role> {
        data.validate()?;
        if self.repository.roles.role_name_exists(&data.name, None).await? {
            return Err(AppError::BusinessRule(format!("Role '{}' already exists", data.name)));
        }
        self.repository.roles.create_role(&data.name).await
    }

    pub async fn update_role(&self, id: i32, data: UpdateNamePayload) -> AppResult<Role> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if self.repository.roles.role_name_exists(name, Some(id)).await? {
                return Err(AppError::BusinessRule(format!("Role '{}' already exists", name)));
            }
        }
        self.repository.roles.rename_role(id, data.name.as_deref()).await
    }

    pub async fn delete_role(&self, id: i32) -> AppResult<Role> {
        self.repository.roles.delete_role(id).await
    }

    pub async fn grant_permission(&self, role_id: i32, permission_id: i32) -> AppResult<RoleDetails> {
        self.repository.roles.get_role(role_id).await?;
        self.repository.roles.get_permission(permission_id).await?;
        self.repository.roles.grant(role_id, permission_id).await?;
        self.get_role(role_id).await
    }

    pub async fn revoke_permission(&self, role_id: i32, permission_id: i32) -> AppResult<RoleDetails> {
        self.repository.roles.get_role(role_id).await?;
        self.repository.roles.revoke(role_id, permission_id).await?;
        self.get_role(role_id).await
    }

    // --- permissions ---

    pub async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.repository.roles.list_permissions().await
    }

    pub async fn get_permission(&self, id: i32) -> AppResult<Permission> {
        self.repository.roles.get_permission(id).await
    }

    pub async fn create_permission(&self, data: NamePayload) -> AppResult<Permission> {
        data.validate()?;
        if self.repository.roles.permission_name_exists(&data.name, None).await? {
            return Err(AppError::BusinessRule(format!("Permission '{}' already exists", data.name)));
        }
        self.repository.roles.create_permission(&data.name).await
    }

    pub async fn update_permission(&self, id: i32, data: UpdateNamePayload) -> AppResult<Permission> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if self.repository.roles.permission_name_exists(name, Some(id)).await? {
                return Err(AppError::BusinessRule(format!("Permission '{}' already exists", name)));
            }
        }
        self.repository.roles.rename_permission(id, data.name.as_deref()).await
    }

    pub async fn delete_permission(&self, id: i32) -> AppResult<Permission> {
        self.repository.roles.delete_permission(id).await
    }
}
