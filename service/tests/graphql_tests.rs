//! Schema-level tests for the award mutations and queries.
//!
//! Each test builds the real schema over a recording mock service, executes
//! a GraphQL document, and asserts on both the JSON response and the calls
//! the mock captured: what was saved, which ids were looked up, what was
//! deleted.

use std::sync::Arc;

use serde_json::Value;

use bookcatalog_api::catalog::service::mock::MockAwardService;
use bookcatalog_api::catalog::{
    Award, AwardName, Book, GenreName, LanguageName, PublishingFormat,
};
use bookcatalog_api::graphql::{build_schema, ApiSchema, NOT_FOUND_ERROR_MESSAGE};

fn schema_with(mock: &Arc<MockAwardService>) -> ApiSchema {
    build_schema(mock.clone())
}

async fn execute(schema: &ApiSchema, document: &str) -> Value {
    let response = schema.execute(document).await;
    serde_json::to_value(response).unwrap()
}

fn stored_award() -> Award {
    let book = Book {
        id: Some(7),
        title: "TestTitle".to_string(),
        language: LanguageName::Afrikaans,
        blurb: "Blurb".to_string(),
        genre: GenreName::Adventure,
        format: PublishingFormat::Hardcover,
    };

    Award {
        id: Some(1),
        award_name: AwardName::OrwellPrize,
        category: "test".to_string(),
        year: 2010,
        books: vec![book],
    }
}

#[tokio::test]
async fn test_add_award_saves_award() {
    let mock = Arc::new(MockAwardService::new());
    let schema = schema_with(&mock);

    let result = execute(
        &schema,
        r#"mutation { addAward(awardName: "PORTICO_PRIZE", category: "test", year: 1994) }"#,
    )
    .await;

    assert!(result["errors"].is_null(), "unexpected errors: {result}");
    assert_eq!(result["data"]["addAward"], Value::Bool(true));

    let saved = mock.saved_awards();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].award_name, AwardName::PorticoPrize);
    assert_eq!(saved[0].category, "test");
    assert_eq!(saved[0].year, 1994);
    assert_eq!(saved[0].id, None);
}

#[tokio::test]
async fn test_add_award_unknown_name_is_not_found() {
    let mock = Arc::new(MockAwardService::new());
    let schema = schema_with(&mock);

    let result = execute(
        &schema,
        r#"mutation { addAward(awardName: "DUMMY", category: "drama", year: 2005) }"#,
    )
    .await;

    assert!(result["data"].is_null());
    assert_eq!(result["errors"][0]["message"], NOT_FOUND_ERROR_MESSAGE);
    assert_eq!(result["errors"][0]["extensions"]["status"], 404);
    assert_eq!(result["errors"][0]["extensions"]["code"], "NOT_FOUND");

    // Nothing was persisted
    assert!(mock.saved_awards().is_empty());
}

#[tokio::test]
async fn test_delete_award_without_id_is_not_found() {
    let mock = Arc::new(MockAwardService::new());
    let schema = schema_with(&mock);

    let result = execute(&schema, "mutation { deleteAward { id awardName } }").await;

    assert!(result["data"].is_null());
    assert_eq!(result["errors"][0]["message"], NOT_FOUND_ERROR_MESSAGE);
    assert_eq!(result["errors"][0]["extensions"]["status"], 404);

    // Fails before the service is ever consulted
    assert!(mock.find_calls().is_empty());
    assert!(mock.deleted_awards().is_empty());
}

#[tokio::test]
async fn test_delete_award_unparseable_id_is_not_found() {
    let mock = Arc::new(MockAwardService::new());
    let schema = schema_with(&mock);

    let result = execute(
        &schema,
        r#"mutation { deleteAward(id: "not-a-number") { id } }"#,
    )
    .await;

    assert!(result["data"].is_null());
    assert_eq!(result["errors"][0]["message"], NOT_FOUND_ERROR_MESSAGE);
    assert!(mock.find_calls().is_empty());
}

#[tokio::test]
async fn test_delete_award_unknown_id_is_not_found_after_one_lookup() {
    let mock = Arc::new(MockAwardService::new());
    let schema = schema_with(&mock);

    let result = execute(&schema, r#"mutation { deleteAward(id: "1") { id } }"#).await;

    assert!(result["data"].is_null());
    assert_eq!(result["errors"][0]["message"], NOT_FOUND_ERROR_MESSAGE);
    assert_eq!(result["errors"][0]["extensions"]["status"], 404);

    // Exactly one lookup, no delete
    assert_eq!(mock.find_calls(), vec![1]);
    assert!(mock.deleted_awards().is_empty());
}

#[tokio::test]
async fn test_delete_award_returns_deleted_award() {
    let mock = Arc::new(MockAwardService::new());
    let award = stored_award();
    mock.insert(1, award.clone());
    let schema = schema_with(&mock);

    let result = execute(
        &schema,
        r#"
        mutation {
            deleteAward(id: "1") {
                id
                awardName
                category
                year
                books { title language genre format }
            }
        }
        "#,
    )
    .await;

    assert!(result["errors"].is_null(), "unexpected errors: {result}");

    let deleted = &result["data"]["deleteAward"];
    assert_eq!(deleted["id"], 1);
    assert_eq!(deleted["awardName"], "ORWELL_PRIZE");
    assert_eq!(deleted["category"], "test");
    assert_eq!(deleted["year"], 2010);
    assert_eq!(deleted["books"][0]["title"], "TestTitle");
    assert_eq!(deleted["books"][0]["language"], "AFRIKAANS");
    assert_eq!(deleted["books"][0]["genre"], "ADVENTURE");
    assert_eq!(deleted["books"][0]["format"], "HARDCOVER");

    // Exactly one lookup, exactly one delete, and the delete payload is the
    // looked-up award itself
    assert_eq!(mock.find_calls(), vec![1]);
    assert_eq!(mock.deleted_awards(), vec![award]);
}

#[tokio::test]
async fn test_awards_query_lists_stored_awards() {
    let mock = Arc::new(MockAwardService::new());
    mock.insert(1, stored_award());
    mock.insert(
        2,
        Award {
            id: Some(2),
            award_name: AwardName::BookerPrize,
            category: "fiction".to_string(),
            year: 2019,
            books: Vec::new(),
        },
    );
    let schema = schema_with(&mock);

    let result = execute(&schema, "{ awards { id awardName year } }").await;

    assert!(result["errors"].is_null(), "unexpected errors: {result}");
    let awards = result["data"]["awards"].as_array().unwrap();
    assert_eq!(awards.len(), 2);
    assert_eq!(awards[0]["awardName"], "ORWELL_PRIZE");
    assert_eq!(awards[1]["awardName"], "BOOKER_PRIZE");
    assert_eq!(awards[1]["year"], 2019);
}

#[tokio::test]
async fn test_award_query_returns_null_for_unknown_id() {
    let mock = Arc::new(MockAwardService::new());
    let schema = schema_with(&mock);

    let result = execute(&schema, r#"{ award(id: "99") { awardName } }"#).await;

    assert!(result["errors"].is_null(), "unexpected errors: {result}");
    assert!(result["data"]["award"].is_null());
    assert_eq!(mock.find_calls(), vec![99]);
}

#[tokio::test]
async fn test_award_query_finds_stored_award() {
    let mock = Arc::new(MockAwardService::new());
    mock.insert(1, stored_award());
    let schema = schema_with(&mock);

    let result = execute(&schema, r#"{ award(id: "1") { awardName category } }"#).await;

    assert!(result["errors"].is_null(), "unexpected errors: {result}");
    assert_eq!(result["data"]["award"]["awardName"], "ORWELL_PRIZE");
    assert_eq!(result["data"]["award"]["category"], "test");
}
