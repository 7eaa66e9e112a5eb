mod evaluation;

use std::sync::Arc;

use anyhow::anyhow;
use async_graphql::{Context, EmptySubscription, Object, Schema, SimpleObject};
use platform_api::{ApiError, ApiResult};
use products_hr::{EvaluationDesk, HrError};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::instrument;

pub use evaluation::{HrMutation, HrQuery};

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The process-wide desk; resolvers lock it for one transition at a time.
pub type SharedDesk = Arc<Mutex<EvaluationDesk>>;

pub fn build_schema(desk: SharedDesk) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(desk)
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> ApiResult<HealthPayload> {
        Ok(HealthPayload { ok: true })
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> ApiResult<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    async fn hr(&self) -> HrQuery {
        HrQuery
    }
}

#[Object]
impl MutationRoot {
    async fn hr(&self) -> HrMutation {
        HrMutation
    }
}

#[derive(Clone, Debug, SimpleObject, Serialize)]
pub struct HealthPayload {
    pub ok: bool,
}

fn shared_desk(ctx: &Context<'_>) -> async_graphql::Result<SharedDesk> {
    ctx.data::<SharedDesk>()
        .cloned()
        .map_err(|_| platform_api::internal_error(anyhow!("missing evaluation desk")))
}

fn api_error(err: HrError) -> ApiError {
    match err {
        HrError::UnknownEmployee(id) => ApiError::NotFound(format!("employee {id}")),
        HrError::UnknownCriterion { .. } | HrError::RatingOutOfRange(_) => {
            ApiError::InvalidInput(err.to_string())
        }
        HrError::EditorClosed | HrError::DuplicateEmployee(_) => {
            ApiError::Conflict(err.to_string())
        }
        HrError::IncompleteEvaluation { missing, .. } => ApiError::IncompleteEvaluation { missing },
    }
}
