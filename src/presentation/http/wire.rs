//! JSON shapes shared by several resources. Field names follow the frontend
//! contract, so most structs rename fields one by one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::mess::Mess;
use crate::domain::subscriptions::{SubscriptionPlan, UserSubscription};
use crate::domain::users::User;

/// A reference that is either the bare id or the record it points at.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(Uuid),
    Populated(T),
}

impl<T> Ref<T> {
    pub fn resolve(id: Uuid, found: Option<T>) -> Self {
        match found {
            Some(v) => Ref::Populated(v),
            None => Ref::Id(id),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessMessage {
    pub success: bool,
    pub message: String,
}

impl SuccessMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of an account; the password hash never leaves the service.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserOut {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(rename = "Login_Role")]
    pub login_role: String,
    #[serde(rename = "UserID")]
    pub user_number: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserOut {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            record_id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            login_role: u.login_role.as_str().to_string(),
            user_number: u.user_number,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRef {
    pub fn with_email(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: Some(u.email.clone()),
        }
    }

    pub fn name_only(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessOut {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    #[serde(rename = "Mess_ID")]
    pub mess_number: i64,
    #[serde(rename = "Mess_Name")]
    pub name: String,
    #[serde(rename = "Mobile_No")]
    pub mobile_no: String,
    #[serde(rename = "Capacity")]
    pub capacity: i32,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Owner_ID")]
    pub owner_id: Uuid,
    #[serde(rename = "UserID")]
    pub owner_number: i64,
    #[serde(rename = "Description")]
    pub description: String,
    pub average_rating: f64,
    pub total_ratings: usize,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Ratings")]
    pub ratings: Vec<i32>,
    #[serde(rename = "RatedBy")]
    pub rated_by: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<&Mess> for MessOut {
    fn from(m: &Mess) -> Self {
        Self {
            id: m.id,
            record_id: m.id,
            mess_number: m.mess_number,
            name: m.name.clone(),
            mobile_no: m.mobile_no.clone(),
            capacity: m.capacity,
            address: m.address.clone(),
            owner_id: m.owner_id,
            owner_number: m.owner_number,
            description: m.description.clone(),
            average_rating: m.average_rating(),
            total_ratings: m.total_ratings(),
            image: m.image.clone(),
            ratings: m.ratings.iter().map(|r| r.rating).collect(),
            rated_by: m.ratings.iter().map(|r| r.user_id).collect(),
            created_at: m.created_at,
        }
    }
}

/// A few identifying fields of a mess, embedded in other records.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessBrief {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "Mess_Name")]
    pub name: String,
    #[serde(rename = "Address", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "Image", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MessBrief {
    pub fn name_only(m: &Mess) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            address: None,
            image: None,
        }
    }

    pub fn located(m: &Mess) -> Self {
        Self {
            address: Some(m.address.clone()),
            ..Self::name_only(m)
        }
    }

    pub fn pictured(m: &Mess) -> Self {
        Self {
            image: Some(m.image.clone()),
            ..Self::located(m)
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanBrief {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub plan_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl PlanBrief {
    pub fn name_only(p: &SubscriptionPlan) -> Self {
        Self {
            id: p.id,
            plan_name: p.plan_name.clone(),
            meal_type: None,
            duration: None,
            price: None,
        }
    }

    pub fn summary(p: &SubscriptionPlan) -> Self {
        Self {
            meal_type: Some(p.meal_type.as_str().to_string()),
            duration: Some(p.duration.as_str().to_string()),
            ..Self::name_only(p)
        }
    }

    pub fn priced(p: &SubscriptionPlan) -> Self {
        Self {
            price: Some(p.price),
            ..Self::summary(p)
        }
    }
}

/// Subscription reference embedded in passes and check-ins.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionBrief {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub plan_id: PlanBrief,
}

impl SubscriptionBrief {
    pub fn bare(s: &UserSubscription, plan: PlanBrief) -> Self {
        Self {
            id: s.id,
            status: None,
            start_date: None,
            end_date: None,
            plan_id: plan,
        }
    }

    pub fn with_status(s: &UserSubscription, plan: PlanBrief) -> Self {
        Self {
            status: Some(s.status.as_str().to_string()),
            ..Self::bare(s, plan)
        }
    }

    pub fn with_window(s: &UserSubscription, plan: PlanBrief) -> Self {
        Self {
            start_date: Some(s.start_date),
            end_date: Some(s.end_date),
            ..Self::with_status(s, plan)
        }
    }
}
