//! Request DTOs with validation.
//!
//! Bodies use the camelCase field names of the JSON API. Identifiers and
//! enum tags arrive as strings and are parsed by the `into_*` conversions
//! so that malformed values surface as `400` responses.

use serde::{Deserialize, Serialize};
use validator::Validate;

use quickdesk_core::error::AppError;
use quickdesk_core::types::{CategoryId, UserId};
use quickdesk_entity::category::UpdateCategory;
use quickdesk_entity::question::{UpdateQuestion, VoteType};
use quickdesk_entity::ticket::{TicketPriority, TicketStatus, UpdateTicket};
use quickdesk_entity::user::{UpdateUser, UserRole};
use quickdesk_service::{
    NewCategory, NewQuestion, NewTicket, NewUser, ProfileUpdate, RegisterRequest, TicketChanges,
};

use crate::extractors::parse_id;

/// Empty and `"all"` category values mean "no category".
fn optional_category(value: Option<String>) -> Result<Option<CategoryId>, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(|v| parse_id(&v))
        .transpose()
}

fn category_list(values: Option<Vec<String>>) -> Result<Option<Vec<CategoryId>>, AppError> {
    values
        .map(|list| list.iter().map(|v| parse_id(v)).collect::<Result<Vec<_>, _>>())
        .transpose()
}

fn optional_role(value: Option<String>) -> Result<Option<UserRole>, AppError> {
    value.map(|r| r.parse::<UserRole>()).transpose()
}

// -- Auth --

/// `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub password: String,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
        }
    }
}

/// `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// `PUT /auth/profile`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub language: Option<String>,
    pub category_in_interest: Option<Vec<String>>,
}

impl ProfileBody {
    pub fn into_update(self) -> Result<ProfileUpdate, AppError> {
        Ok(ProfileUpdate {
            name: self.name,
            language: self.language,
            categories_of_interest: category_list(self.category_in_interest)?,
        })
    }
}

/// `PUT /auth/approve-upgrade/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApproveUpgradeBody {
    pub approved: bool,
}

// -- Tickets --

/// `POST /tickets`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTicketBody {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title and description are required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Title and description are required"))]
    pub description: String,
    pub category: Option<String>,
    pub priority: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateTicketBody {
    pub fn into_new_ticket(self) -> Result<NewTicket, AppError> {
        Ok(NewTicket {
            title: self.title,
            description: self.description,
            category: optional_category(self.category)?,
            priority: self
                .priority
                .map(|p| p.parse::<TicketPriority>())
                .transpose()?,
            tags: self.tags,
        })
    }
}

/// `PATCH /tickets/{id}`: any subset of fields plus an optional status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTicketBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

impl UpdateTicketBody {
    pub fn into_changes(self) -> Result<TicketChanges, AppError> {
        Ok(TicketChanges {
            fields: UpdateTicket {
                title: self.title,
                description: self.description,
                category: optional_category(self.category)?,
                priority: self
                    .priority
                    .map(|p| p.parse::<TicketPriority>())
                    .transpose()?,
                tags: self.tags,
            },
            status: self.status.map(|s| s.parse::<TicketStatus>()).transpose()?,
        })
    }
}

/// `PATCH /tickets/{id}/assign`. Without `agentId` the caller assigns
/// themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignBody {
    pub agent_id: Option<String>,
}

impl AssignBody {
    pub fn agent(&self) -> Result<Option<UserId>, AppError> {
        self.agent_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(parse_id)
            .transpose()
    }
}

/// `POST /tickets/{id}/comments`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment content is required"))]
    pub content: String,
    #[serde(default)]
    pub is_internal: bool,
}

// -- Questions --

/// `POST /questions`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuestionBody {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title and description are required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Title and description are required"))]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
}

impl CreateQuestionBody {
    pub fn into_new_question(self) -> Result<NewQuestion, AppError> {
        Ok(NewQuestion {
            title: self.title,
            description: self.description,
            tags: self.tags,
            category: optional_category(self.category)?,
        })
    }
}

/// `PUT /questions/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateQuestionBody {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

impl UpdateQuestionBody {
    pub fn into_update(self) -> Result<UpdateQuestion, AppError> {
        Ok(UpdateQuestion {
            title: self.title,
            description: self.description,
            tags: self.tags,
            category: optional_category(self.category)?,
        })
    }
}

/// `POST /questions/{id}/vote`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VoteBody {
    #[serde(rename = "type", default)]
    pub vote_type: String,
}

impl VoteBody {
    pub fn vote_type(&self) -> Result<VoteType, AppError> {
        self.vote_type.parse()
    }
}

/// `POST /questions/{id}/answer`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnswerBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "Answer content is required"))]
    pub content: String,
}

// -- Admin --

/// `POST /admin/categories`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryBody {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl From<CreateCategoryBody> for NewCategory {
    fn from(body: CreateCategoryBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            color: body.color,
        }
    }
}

/// `PUT /admin/categories/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryBody {
    #[validate(length(min = 1, max = 100, message = "Category name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl From<UpdateCategoryBody> for UpdateCategory {
    fn from(body: UpdateCategoryBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            color: body.color,
        }
    }
}

/// `POST /admin/users`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub password: String,
    pub role: Option<String>,
    pub language: Option<String>,
    pub category_in_interest: Option<Vec<String>>,
}

impl CreateUserBody {
    pub fn into_new_user(self) -> Result<NewUser, AppError> {
        Ok(NewUser {
            name: self.name,
            email: self.email,
            password: self.password,
            role: optional_role(self.role)?,
            language: self.language,
            categories_of_interest: category_list(self.category_in_interest)?,
        })
    }
}

/// `PUT /admin/users/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub role: Option<String>,
    pub language: Option<String>,
    pub category_in_interest: Option<Vec<String>>,
}

impl UpdateUserBody {
    pub fn into_update(self) -> Result<UpdateUser, AppError> {
        Ok(UpdateUser {
            name: self.name,
            email: self.email,
            role: optional_role(self.role)?,
            language: self.language,
            categories_of_interest: category_list(self.category_in_interest)?,
        })
    }
}

/// `PUT /admin/users/{id}/role`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeRoleBody {
    #[serde(default)]
    pub role: String,
}

/// `PUT /admin/users/{id}/reset-password`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordBody {
    pub new_password: Option<String>,
}

/// `DELETE /admin/users/bulk`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteBody {
    pub user_ids: Option<Vec<String>>,
}

impl BulkDeleteBody {
    /// Parsed ids; a missing or malformed array is rejected.
    pub fn ids(&self) -> Result<Vec<UserId>, AppError> {
        parse_user_ids(self.user_ids.as_deref(), "Invalid user IDs array")
    }
}

/// `PUT /admin/users/bulk/roles`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkRolesBody {
    pub user_ids: Option<Vec<String>>,
    pub new_role: Option<String>,
}

impl BulkRolesBody {
    pub fn ids(&self) -> Result<Vec<UserId>, AppError> {
        parse_user_ids(self.user_ids.as_deref(), "Invalid parameters")
    }

    pub fn role(&self) -> Result<Option<UserRole>, AppError> {
        optional_role(self.new_role.clone())
    }
}

fn parse_user_ids(ids: Option<&[String]>, message: &str) -> Result<Vec<UserId>, AppError> {
    let ids = ids.ok_or_else(|| AppError::validation(message))?;
    ids.iter()
        .map(|id| id.parse().map_err(|_| AppError::validation(message)))
        .collect()
}
