//! GraphQL schema: query and mutation roots for the book catalogue.
//!
//! Resolvers take typed arguments, validate at the boundary, and delegate to
//! the injected [`AwardService`]. The award mutations share a single
//! NotFound contract: unknown award name, absent or unparseable id, and
//! missing record all surface the same fixed message with a 404 status in
//! the error extensions, so callers cannot distinguish the sub-cause.

use std::sync::Arc;

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Result, Schema, ID};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

use crate::catalog::service::AwardService;
use crate::catalog::{Award, AwardName};

/// Fixed reason string shared by every NotFound case in the award mutations.
pub const NOT_FOUND_ERROR_MESSAGE: &str = "Award not found";

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Errors surfaced to GraphQL callers.
///
/// The HTTP-style status travels in the error extensions; the message is
/// the whole client-visible payload. Persistence detail is logged
/// server-side and never leaks here.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", NOT_FOUND_ERROR_MESSAGE)]
    NotFound,
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("status", i32::from(self.status().as_u16()));
            e.set("code", self.code());
        })
    }
}

/// Log a persistence failure and hand the caller an opaque 500.
fn service_error(err: crate::catalog::repo::AwardRepoError) -> async_graphql::Error {
    tracing::error!("award persistence failed: {err}");
    ApiError::Internal.extend()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every award in the catalogue.
    async fn awards(&self, ctx: &Context<'_>) -> Result<Vec<Award>> {
        let service = ctx.data::<Arc<dyn AwardService>>()?;
        service.find_all().await.map_err(service_error)
    }

    /// A single award, or null when the id is unknown or unparseable.
    async fn award(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Award>> {
        let service = ctx.data::<Arc<dyn AwardService>>()?;
        let Ok(id) = id.parse::<i64>() else {
            return Ok(None);
        };
        service.find_by_id(id).await.map_err(service_error)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Add an award to the catalogue.
    ///
    /// `award_name` is resolved against the closed enumeration with an exact
    /// match; anything else is NotFound and nothing is persisted. The
    /// operation is fire-and-forget and returns `true` on success.
    async fn add_award(
        &self,
        ctx: &Context<'_>,
        award_name: String,
        category: String,
        year: i32,
    ) -> Result<bool> {
        let service = ctx.data::<Arc<dyn AwardService>>()?;

        let award_name = award_name
            .parse::<AwardName>()
            .map_err(|_| ApiError::NotFound.extend())?;

        let award = Award::new(award_name, category, year);
        service.save(&award).await.map_err(service_error)?;
        Ok(true)
    }

    /// Delete an award by id and return it.
    ///
    /// An absent or unparseable id is NotFound before any lookup happens.
    /// A known id triggers exactly one lookup and, when the award exists,
    /// exactly one delete with the looked-up award, which is then returned
    /// to the caller as-is.
    async fn delete_award(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Award> {
        let service = ctx.data::<Arc<dyn AwardService>>()?;

        let id = id.ok_or_else(|| ApiError::NotFound.extend())?;
        let id = id
            .parse::<i64>()
            .map_err(|_| ApiError::NotFound.extend())?;

        let award = service
            .find_by_id(id)
            .await
            .map_err(service_error)?
            .ok_or_else(|| ApiError::NotFound.extend())?;

        service.delete_award(&award).await.map_err(service_error)?;
        Ok(award)
    }
}

/// Build the schema with the award service injected as context data.
#[must_use]
pub fn build_schema(service: Arc<dyn AwardService>) -> ApiSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

/// GraphQL playground handler (mounted only when enabled in config).
pub async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

pub async fn graphql_handler(
    schema: Extension<ApiSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error_carries_fixed_message_and_status() {
        let err = ApiError::NotFound.extend();
        assert_eq!(err.message, NOT_FOUND_ERROR_MESSAGE);

        let extensions = err.extensions.expect("extensions set");
        assert_eq!(
            extensions.get("status"),
            Some(&async_graphql::Value::from(404))
        );
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("NOT_FOUND"))
        );
    }

    #[test]
    fn internal_error_reveals_nothing() {
        let err = ApiError::Internal.extend();
        assert_eq!(err.message, "Internal server error");

        let extensions = err.extensions.expect("extensions set");
        assert_eq!(
            extensions.get("status"),
            Some(&async_graphql::Value::from(500))
        );
    }
}
