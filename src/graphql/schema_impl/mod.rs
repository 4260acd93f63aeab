pub mod mutations;
pub mod queries;

use async_graphql::{EmptySubscription, Schema as GraphQLSchema, SchemaBuilder};

use crate::app_state::AppState;

pub use mutations::MutationRoot;
pub use queries::QueryRoot;

pub const MAX_QUERY_DEPTH: usize = 16;
pub const MAX_QUERY_COMPLEXITY: usize = 500;

/// Resolvers read `AppState` from schema data and the caller's `Claims` from request data.
pub type Schema = GraphQLSchema<QueryRoot, MutationRoot, EmptySubscription>;

fn builder() -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    GraphQLSchema::build(QueryRoot, MutationRoot, EmptySubscription)
        .limit_depth(MAX_QUERY_DEPTH)
        .limit_complexity(MAX_QUERY_COMPLEXITY)
}

pub fn create_schema(app_state: AppState) -> Schema {
    builder().data(app_state).finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdl_exposes_quiz_operations() {
        let sdl = builder().finish().sdl();

        assert!(sdl.contains("submitQuiz"));
        assert!(sdl.contains("SubmitQuizInput"));
        assert!(sdl.contains("myResults"));
        assert!(sdl.contains("CollegeSortKey"));
    }

    #[actix_rt::test]
    async fn deeply_nested_queries_are_rejected() {
        let schema = builder().finish();

        let shallow = schema.execute("{ __typename }").await;
        assert!(shallow.errors.is_empty());

        let nesting = MAX_QUERY_DEPTH;
        let query = format!(
            "{{ __schema {{ types {{ fields {{ type {{ {} name {} }} }} }} }} }}",
            "ofType { ".repeat(nesting),
            "} ".repeat(nesting)
        );
        let deep = schema.execute(query.as_str()).await;
        assert!(!deep.errors.is_empty());
    }

    #[actix_rt::test]
    async fn resolvers_without_state_report_an_error() {
        let schema = builder().finish();

        let response = schema.execute("{ myResults { score } }").await;
        assert_eq!(response.errors.len(), 1);
    }
}
