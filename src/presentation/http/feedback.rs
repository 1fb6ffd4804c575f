use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::feedback::FeedbackEntryDto;
use crate::application::use_cases::feedback::list_feedback::ListFeedback;
use crate::application::use_cases::feedback::submit_feedback::SubmitFeedback;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiResult;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitFeedbackBody {
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    #[serde(default)]
    pub comments: String,
    pub rating: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackOut {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    pub comments: String,
    pub rating: i32,
    pub submitted_at: DateTime<Utc>,
    pub username: String,
}

impl From<FeedbackEntryDto> for FeedbackOut {
    fn from(d: FeedbackEntryDto) -> Self {
        let f = d.feedback;
        Self {
            id: f.id,
            record_id: f.id,
            user_id: f.user_id,
            comments: f.comments,
            rating: f.rating,
            submitted_at: f.submitted_at,
            username: d.username,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackSubmitted {
    pub message: String,
    pub feedback: FeedbackOut,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackList {
    pub feedbacks: Vec<FeedbackOut>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_feedback).post(submit_feedback))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/feedback", tag = "Feedback", request_body = SubmitFeedbackBody, responses(
    (status = 200, body = FeedbackSubmitted),
    (status = 400, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn submit_feedback(
    State(ctx): State<AppContext>,
    Json(body): Json<SubmitFeedbackBody>,
) -> ApiResult<Json<FeedbackSubmitted>> {
    let users = ctx.user_repo();
    let feedback = ctx.feedback_repo();
    let uc = SubmitFeedback {
        users: users.as_ref(),
        feedback: feedback.as_ref(),
    };
    let entry = uc.execute(body.user_id, body.comments, body.rating).await?;
    Ok(Json(FeedbackSubmitted {
        message: "Feedback submitted successfully".into(),
        feedback: entry.into(),
    }))
}

#[utoipa::path(get, path = "/api/feedback", tag = "Feedback", responses((status = 200, body = FeedbackList)))]
pub async fn list_feedback(State(ctx): State<AppContext>) -> ApiResult<Json<FeedbackList>> {
    let users = ctx.user_repo();
    let feedback = ctx.feedback_repo();
    let uc = ListFeedback {
        users: users.as_ref(),
        feedback: feedback.as_ref(),
    };
    let entries = uc.execute().await?;
    Ok(Json(FeedbackList {
        feedbacks: entries.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::users::LoginRole;
    use crate::testing::{MemoryStore, seed_user, test_context};

    #[tokio::test]
    async fn submit_and_list() {
        let store = Arc::new(MemoryStore::default());
        let diner = seed_user(&store, "meera", LoginRole::User).await;
        let ctx = test_context(store);

        let Json(created) = submit_feedback(
            State(ctx.clone()),
            Json(SubmitFeedbackBody {
                user_id: diner.id,
                comments: "Dal was great".into(),
                rating: 5,
            }),
        )
        .await
        .unwrap();
        assert_eq!(created.feedback.username, "meera");

        let err = submit_feedback(
            State(ctx.clone()),
            Json(SubmitFeedbackBody {
                user_id: diner.id,
                comments: String::new(),
                rating: 9,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Rating must be between 1 and 5");

        let Json(list) = list_feedback(State(ctx)).await.unwrap();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["feedbacks"][0]["userID"], serde_json::json!(diner.id));
        assert_eq!(json["feedbacks"][0]["comments"], "Dal was great");
    }
}
