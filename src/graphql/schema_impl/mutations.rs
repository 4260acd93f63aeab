use async_graphql::{Context, Object};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    errors::AppResult,
    models::dto::{
        request::{AnswerSubmission, SubmitQuizInput},
        response::GradedSubmission,
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn submit_quiz(
        &self,
        ctx: &Context<'_>,
        input: SubmitQuizInput,
    ) -> AppResult<GradedSubmission> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        input.validate()?;

        let summary = state
            .quiz_service
            .submit(&claims.sub, AnswerSubmission::from(input))
            .await?;
        Ok(GradedSubmission::from(summary))
    }
}
