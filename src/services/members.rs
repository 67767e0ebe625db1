//! Members and member types (lending policies)

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        loan::Loan,
        member::{CreateMember, CreateMemberType, Member, MemberType, UpdateMember, UpdateMemberType},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // --- member types ---

    pub async fn list_types(&self) -> AppResult<Vec<MemberType>> {
        self.repository.member_types.list().await
    }

    pub async fn get_type(&self, id: i32) -> AppResult<MemberType> {
        self.repository.member_types.get_by_id(id).await
    }

    pub async fn create_type(&self, data: CreateMemberType) -> AppResult<MemberType> {
        data.validate()?;
        if self.repository.member_types.name_exists(&data.name, None).await? {
            return Err(AppError::BusinessRule(format!("Member type '{}' already exists", data.name)));
        }
        self.repository.member_types.create(&data).await
    }

    pub async fn update_type(&self, id: i32, data: UpdateMemberType) -> AppResult<MemberType> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if self.repository.member_types.name_exists(name, Some(id)).await? {
                return Err(AppError::BusinessRule(format!("Member type '{}' already exists", name)));
            }
        }
        self.repository.member_types.update(id, &data).await
    }

    pub async fn delete_type(&self, id: i32) -> AppResult<MemberType> {
        self.repository.member_types.get_by_id(id).await?;
        let members = self.repository.members.count_by_type(id).await?;
        if members > 0 {
            return Err(AppError::BusinessRule(format!(
                "Member type {} is still assigned to {} member(s)",
                id, members
            )));
        }
        self.repository.member_types.delete(id).await
    }

    // --- members ---

    pub async fn list(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    pub async fn loans(&self, id: i32) -> AppResult<Vec<Loan>> {
        self.repository.members.get_by_id(id).await?;
        self.repository.loans.list_by_member(id).await
    }

    pub async fn create(&self, data: CreateMember) -> AppResult<Member> {
        data.validate()?;
        if self.repository.members.email_exists(&data.email, None).await? {
            return Err(AppError::BusinessRule("Email already registered".to_string()));
        }
        self.check_member_type(data.member_type_id).await?;

        let member = self.repository.members.create(&data).await?;
        tracing::info!(member_id = member.id, member_type = %member.member_type_name, "Member created");
        Ok(member)
    }

    pub async fn update(&self, id: i32, data: UpdateMember) -> AppResult<Member> {
        data.validate()?;
        self.repository.members.get_by_id(id).await?;

        if let Some(ref email) = data.email {
            if self.repository.members.email_exists(email, Some(id)).await? {
                return Err(AppError::BusinessRule("Email already registered".to_string()));
            }
        }
        if let Some(member_type_id) = data.member_type_id {
            self.check_member_type(member_type_id).await?;
        }

        self.repository.members.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<Member> {
        let member = self.repository.members.delete(id).await?;
        tracing::info!(member_id = id, "Member deleted");
        Ok(member)
    }

    async fn check_member_type(&self, member_type_id: i32) -> AppResult<()> {
        if self.repository.member_types.find_by_id(member_type_id).await?.is_none() {
            return Err(AppError::BusinessRule(format!(
                "Member type {} does not exist",
                member_type_id
            )));
        }
        Ok(())
    }
}
