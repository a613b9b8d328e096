//! # Game Repository
//!
//! Database operations for the game catalogue.
//!
//! ## Name Search
//! `search_name` holds the name lowercased in Rust at insert time, and the
//! search term is lowercased the same way, so accented capitals ("Éclipse")
//! match too.
//!
//! ```text
//! GET /games?name=AZ
//!       │
//!       ▼
//! g.search_name LIKE '%az%' ESCAPE '\'
//!       │
//!       ▼
//! ┌────┬────────────┬─────────────┬──────────────┐
//! │ id │ name       │ categoryId  │ categoryName │
//! ├────┼────────────┼─────────────┼──────────────┤
//! │ 1  │ Azul       │ 2           │ Abstract     │ ← MATCH
//! │ 4  │ Blue Lazul │ 2           │ Abstract     │ ← MATCH
//! └────┴────────────┴─────────────┴──────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::contains_pattern;
use crate::error::{DbError, DbResult};
use meeple_core::{Game, GameId, GameWithCategory, NewGame};

/// Repository for game database operations.
#[derive(Debug, Clone)]
pub struct GameRepository {
    pool: SqlitePool,
}

impl GameRepository {
    /// Creates a new GameRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GameRepository { pool }
    }

    /// Lists games joined with their category name.
    ///
    /// ## Arguments
    /// * `name_filter` - case-insensitive substring of the game name;
    ///   `None` lists every game
    pub async fn list(&self, name_filter: Option<&str>) -> DbResult<Vec<GameWithCategory>> {
        debug!(name_filter = ?name_filter, "Listing games");

        let games = sqlx::query_as::<_, GameWithCategory>(
            r#"
            SELECT
                g.id,
                g.name,
                g.image,
                g.category_id,
                g.stock_total,
                g.price_per_day,
                c.name AS category_name
            FROM games g
            INNER JOIN categories c ON c.id = g.category_id
            WHERE ?1 IS NULL OR g.search_name LIKE ?1 ESCAPE '\'
            ORDER BY g.id
            "#,
        )
        .bind(name_filter.map(contains_pattern))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = games.len(), "Game list returned");
        Ok(games)
    }

    /// Gets a game by its ID.
    pub async fn get_by_id(&self, id: GameId) -> DbResult<Option<Game>> {
        let game = sqlx::query_as::<_, Game>(
            r#"
            SELECT id, name, image, category_id, stock_total, price_per_day
            FROM games
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }

    /// Returns true if a game with this exact name exists.
    pub async fn name_taken(&self, name: &str) -> DbResult<bool> {
        let taken: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM games WHERE name = ?1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(taken)
    }

    /// Returns true if a game with this ID exists.
    pub async fn exists(&self, id: GameId) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM games WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Inserts a new game.
    ///
    /// ## Returns
    /// * `Ok(Game)` - the stored row, with its generated id
    /// * `Err(DbError::UniqueViolation)` - the name is already used
    /// * `Err(DbError::ForeignKeyViolation)` - `category_id` does not exist
    pub async fn insert(&self, game: &NewGame) -> DbResult<Game> {
        debug!(name = %game.name, category_id = game.category_id, "Inserting game");

        let created = sqlx::query_as::<_, Game>(
            r#"
            INSERT INTO games (name, search_name, image, category_id, stock_total, price_per_day)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, name, image, category_id, stock_total, price_per_day
            "#,
        )
        .bind(&game.name)
        .bind(game.name.to_lowercase())
        .bind(&game.image)
        .bind(game.category_id)
        .bind(game.stock_total)
        .bind(game.price_per_day)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("name", &game.name),
            other => other,
        })?;

        info!(id = created.id, name = %created.name, "Game created");
        Ok(created)
    }
}
