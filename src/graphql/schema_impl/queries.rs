use async_graphql::{Context, Object, ID};
use chrono::NaiveDate;

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    errors::AppResult,
    models::{
        domain::catalog::{College, CollegeSortKey, Scholarship, ScholarshipSortKey},
        dto::{
            request::{CollegeSearchParams, ScholarshipSearchParams},
            response::{QuizForTaking, QuizResultDto, QuizSummaryDto},
        },
    },
    services::catalog_service::{search_colleges, search_scholarships},
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn quizzes(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<Vec<QuizSummaryDto>> {
        let state = ctx.data::<AppState>()?;
        extract_claims_from_context(ctx)?;

        let offset = offset.unwrap_or(0).max(0);
        let limit = limit.unwrap_or(20).clamp(1, 100);

        state.quiz_service.list_quizzes(offset, limit).await
    }

    /// A quiz with its answers withheld.
    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> AppResult<QuizForTaking> {
        let state = ctx.data::<AppState>()?;
        extract_claims_from_context(ctx)?;

        let quiz = state.quiz_service.get_quiz(id.as_str()).await?;
        Ok(QuizForTaking::from(&quiz))
    }

    async fn my_results(&self, ctx: &Context<'_>) -> AppResult<Vec<QuizResultDto>> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let results = state.quiz_service.results(&claims.sub).await?;
        Ok(results.into_iter().map(QuizResultDto::from).collect())
    }

    async fn colleges(
        &self,
        q: Option<String>,
        min_sat: Option<u32>,
        max_tuition: Option<u32>,
        country: Option<String>,
        min_acceptance: Option<f64>,
        max_acceptance: Option<f64>,
        sort_by: Option<CollegeSortKey>,
        ascending: Option<bool>,
    ) -> Vec<College> {
        search_colleges(&CollegeSearchParams {
            q,
            min_sat,
            max_tuition,
            country,
            min_acceptance,
            max_acceptance,
            sort_by,
            ascending,
        })
    }

    async fn scholarships(
        &self,
        q: Option<String>,
        min_amount: Option<u32>,
        country: Option<String>,
        deadline_after: Option<NaiveDate>,
        sort_by: Option<ScholarshipSortKey>,
        ascending: Option<bool>,
    ) -> Vec<Scholarship> {
        search_scholarships(&ScholarshipSearchParams {
            q,
            min_amount,
            country,
            deadline_after,
            sort_by,
            ascending,
        })
    }
}
