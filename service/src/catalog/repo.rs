//! Award repository for database operations.
//!
//! Free functions over a [`PgPool`], one statement each, in the style of the
//! rest of the persistence layer. Rows store enumeration values as their
//! stable string form; decoding goes back through the exact-match parsers,
//! so a row that violates the closed-set invariant surfaces as
//! [`AwardRepoError::CorruptRow`] instead of leaking a raw string.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::award::Award;
use super::model::Book;

/// Error types for award persistence.
#[derive(Debug, thiserror::Error)]
pub enum AwardRepoError {
    /// A stored enumeration value no longer parses. Should be unreachable
    /// while writes go through the typed model.
    #[error("corrupt row: {0}")]
    CorruptRow(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn decode_award(row: &PgRow) -> Result<Award, AwardRepoError> {
    let name: String = row.try_get("award_name")?;
    let award_name = name
        .parse()
        .map_err(|e: super::award::UnknownAwardName| AwardRepoError::CorruptRow(e.to_string()))?;

    Ok(Award {
        id: Some(row.try_get("id")?),
        award_name,
        category: row.try_get("category")?,
        year: row.try_get("year")?,
        books: Vec::new(),
    })
}

fn decode_book(row: &PgRow) -> Result<Book, AwardRepoError> {
    let language: String = row.try_get("language")?;
    let genre: String = row.try_get("genre")?;
    let format: String = row.try_get("format")?;

    let corrupt = |e: super::model::UnknownVariant| AwardRepoError::CorruptRow(e.to_string());

    Ok(Book {
        id: Some(row.try_get("id")?),
        title: row.try_get("title")?,
        language: language.parse().map_err(corrupt)?,
        blurb: row.try_get("blurb")?,
        genre: genre.parse().map_err(corrupt)?,
        format: format.parse().map_err(corrupt)?,
    })
}

/// Insert an award and its book associations in one transaction.
///
/// Only books that already carry a database id are linked; the award
/// operations never create or mutate book rows.
///
/// # Errors
///
/// Returns [`AwardRepoError::Database`] on any statement failure.
pub async fn insert_award(pool: &PgPool, award: &Award) -> Result<i64, AwardRepoError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        r"
        INSERT INTO awards (award_name, category, year)
        VALUES ($1, $2, $3)
        RETURNING id
        ",
    )
    .bind(award.award_name.as_str())
    .bind(&award.category)
    .bind(award.year)
    .fetch_one(&mut *tx)
    .await?;
    let id: i64 = row.try_get("id")?;

    for book in &award.books {
        if let Some(book_id) = book.id {
            sqlx::query(
                r"
                INSERT INTO award_books (award_id, book_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(id)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(id)
}

/// Look up an award by id, with its associated books.
///
/// # Errors
///
/// Returns [`AwardRepoError::Database`] on query failure and
/// [`AwardRepoError::CorruptRow`] if a stored enumeration value is invalid.
pub async fn get_award_by_id(pool: &PgPool, id: i64) -> Result<Option<Award>, AwardRepoError> {
    let row = sqlx::query(
        r"
        SELECT id, award_name, category, year
        FROM awards
        WHERE id = $1
        ",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        None => Ok(None),
        Some(row) => {
            let mut award = decode_award(&row)?;
            award.books = books_for_award(pool, id).await?;
            Ok(Some(award))
        }
    }
}

/// List every award in the catalogue, books included.
///
/// # Errors
///
/// Returns [`AwardRepoError::Database`] on query failure and
/// [`AwardRepoError::CorruptRow`] if a stored enumeration value is invalid.
pub async fn list_awards(pool: &PgPool) -> Result<Vec<Award>, AwardRepoError> {
    let rows = sqlx::query(
        r"
        SELECT id, award_name, category, year
        FROM awards
        ORDER BY id
        ",
    )
    .fetch_all(pool)
    .await?;

    let mut awards = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut award = decode_award(row)?;
        if let Some(id) = award.id {
            award.books = books_for_award(pool, id).await?;
        }
        awards.push(award);
    }
    Ok(awards)
}

/// Delete an award row. The join table cascades, dropping the book
/// associations without touching the books themselves.
///
/// # Errors
///
/// Returns [`AwardRepoError::Database`] on statement failure.
pub async fn delete_award(pool: &PgPool, id: i64) -> Result<(), AwardRepoError> {
    sqlx::query("DELETE FROM awards WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

async fn books_for_award(pool: &PgPool, award_id: i64) -> Result<Vec<Book>, AwardRepoError> {
    let rows = sqlx::query(
        r"
        SELECT b.id, b.title, b.language, b.blurb, b.genre, b.format
        FROM books b
        JOIN award_books ab ON ab.book_id = b.id
        WHERE ab.award_id = $1
        ORDER BY b.id
        ",
    )
    .bind(award_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(decode_book).collect()
}
