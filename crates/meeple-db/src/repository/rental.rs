//! # Rental Repository
//!
//! Database operations for rentals: stock checks, guarded inserts, returns.
//!
//! ## Guarded Insert
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                Why the stock check lives in the INSERT                  │
//! │                                                                         │
//! │  ❌ Check-then-insert (two statements)                                 │
//! │     Request A: open=1 < stock=2 ✓ ─┐                                   │
//! │     Request B: open=1 < stock=2 ✓ ─┤ both insert → open=3 > stock=2    │
//! │                                                                         │
//! │  ✅ One conditional statement                                          │
//! │     INSERT INTO rentals (...)                                          │
//! │     SELECT ... FROM games g                                            │
//! │     WHERE g.id = ?                                                     │
//! │       AND g.stock_total > (open rentals of g)                          │
//! │                                                                         │
//! │     SQLite runs one writer at a time, so the second request sees the   │
//! │     first one's row and inserts nothing.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use meeple_core::{
    CategoryId, CustomerId, GameId, Money, NewRental, Rental, RentalCustomer, RentalFilter,
    RentalGame, RentalId, RentalView, StockSnapshot,
};

/// Outcome of [`RentalRepository::create_guarded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentalInsert {
    /// A copy was free; the rental is stored.
    Created(Rental),
    /// Every copy is out. Nothing was written.
    Unavailable(StockSnapshot),
}

/// Repository for rental database operations.
#[derive(Debug, Clone)]
pub struct RentalRepository {
    pool: SqlitePool,
}

const RENTAL_COLUMNS: &str =
    "id, customer_id, game_id, rent_date, days_rented, return_date, original_price, delay_fee";

impl RentalRepository {
    /// Creates a new RentalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RentalRepository { pool }
    }

    /// Reads a game's stock and open-rental count.
    ///
    /// ## Returns
    /// * `Ok(Some(snapshot))` - the game exists
    /// * `Ok(None)` - no game with this id (not the same as "no stock")
    pub async fn stock_snapshot(&self, game_id: GameId) -> DbResult<Option<StockSnapshot>> {
        stock_snapshot(&self.pool, game_id).await
    }

    /// Opens a rental if, and only if, a copy of the game is free.
    ///
    /// ## What This Does
    /// 1. Begins a transaction
    /// 2. Runs the conditional `INSERT … SELECT` (see module docs)
    /// 3. If nothing was inserted, reads the stock snapshot in the same
    ///    transaction to report why
    /// 4. Commits
    ///
    /// ## Arguments
    /// * `rental` - validated payload
    /// * `rent_date` - today
    /// * `original_price` - quote computed from the game's current price
    ///
    /// ## Returns
    /// * `Ok(RentalInsert::Created)` - stored, `return_date` and `delay_fee` null
    /// * `Ok(RentalInsert::Unavailable)` - all copies rented
    /// * `Err(DbError::NotFound)` - no such game
    /// * `Err(DbError::ForeignKeyViolation)` - no such customer
    pub async fn create_guarded(
        &self,
        rental: &NewRental,
        rent_date: NaiveDate,
        original_price: Money,
    ) -> DbResult<RentalInsert> {
        debug!(
            customer_id = rental.customer_id,
            game_id = rental.game_id,
            days_rented = rental.days_rented,
            "Creating rental"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let sql = format!(
            r#"
            INSERT INTO rentals (
                customer_id, game_id, rent_date, days_rented,
                return_date, original_price, delay_fee
            )
            SELECT ?1, g.id, ?3, ?4, NULL, ?5, NULL
            FROM games g
            WHERE g.id = ?2
              AND g.stock_total > (
                  SELECT COUNT(*) FROM rentals r
                  WHERE r.game_id = g.id AND r.return_date IS NULL
              )
            RETURNING {RENTAL_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Rental>(&sql)
            .bind(rental.customer_id)
            .bind(rental.game_id)
            .bind(rent_date)
            .bind(rental.days_rented)
            .bind(original_price.cents())
            .fetch_optional(&mut *tx)
            .await?;

        let outcome = match created {
            Some(rental) => RentalInsert::Created(rental),
            None => match stock_snapshot(&mut *tx, rental.game_id).await? {
                Some(snapshot) => RentalInsert::Unavailable(snapshot),
                None => return Err(DbError::not_found("Game", rental.game_id)),
            },
        };

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        match &outcome {
            RentalInsert::Created(rental) => info!(
                id = rental.id,
                game_id = rental.game_id,
                original_price = rental.original_price,
                "Rental created"
            ),
            RentalInsert::Unavailable(snapshot) => debug!(
                game_id = snapshot.game_id,
                stock_total = snapshot.stock_total,
                open_rentals = snapshot.open_rentals,
                "Rental refused, no copy available"
            ),
        }

        Ok(outcome)
    }

    /// Gets a rental by its ID.
    pub async fn get_by_id(&self, id: RentalId) -> DbResult<Option<Rental>> {
        let sql = format!("SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = ?1");

        let rental = sqlx::query_as::<_, Rental>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rental)
    }

    /// Lists rentals with their customer and game, filters combined with AND.
    pub async fn list(&self, filter: &RentalFilter) -> DbResult<Vec<RentalView>> {
        debug!(
            customer_id = ?filter.customer_id,
            game_id = ?filter.game_id,
            "Listing rentals"
        );

        let rows = sqlx::query_as::<_, RentalViewRow>(
            r#"
            SELECT
                r.id,
                r.customer_id,
                r.game_id,
                r.rent_date,
                r.days_rented,
                r.return_date,
                r.original_price,
                r.delay_fee,
                cu.name AS customer_name,
                g.name AS game_name,
                g.category_id,
                ca.name AS category_name
            FROM rentals r
            INNER JOIN customers cu ON cu.id = r.customer_id
            INNER JOIN games g ON g.id = r.game_id
            INNER JOIN categories ca ON ca.id = g.category_id
            WHERE (?1 IS NULL OR r.customer_id = ?1)
              AND (?2 IS NULL OR r.game_id = ?2)
            ORDER BY r.id
            "#,
        )
        .bind(filter.customer_id)
        .bind(filter.game_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RentalView::from).collect())
    }

    /// Closes an open rental.
    ///
    /// ## Returns
    /// * `Ok(Some(rental))` - the closed rental
    /// * `Ok(None)` - the rental does not exist or was already closed
    pub async fn mark_returned(
        &self,
        id: RentalId,
        return_date: NaiveDate,
        delay_fee: Money,
    ) -> DbResult<Option<Rental>> {
        debug!(id = id, %return_date, delay_fee = delay_fee.cents(), "Returning rental");

        let sql = format!(
            r#"
            UPDATE rentals
            SET return_date = ?2, delay_fee = ?3
            WHERE id = ?1 AND return_date IS NULL
            RETURNING {RENTAL_COLUMNS}
            "#
        );

        let closed = sqlx::query_as::<_, Rental>(&sql)
            .bind(id)
            .bind(return_date)
            .bind(delay_fee.cents())
            .fetch_optional(&self.pool)
            .await?;

        if closed.is_some() {
            info!(id = id, "Rental returned");
        }

        Ok(closed)
    }
}

async fn stock_snapshot<'e, E>(executor: E, game_id: GameId) -> DbResult<Option<StockSnapshot>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: Option<(i64, i64, i64)> = sqlx::query_as(
        r#"
        SELECT
            g.id,
            g.stock_total,
            (SELECT COUNT(*) FROM rentals r
             WHERE r.game_id = g.id AND r.return_date IS NULL)
        FROM games g
        WHERE g.id = ?1
        "#,
    )
    .bind(game_id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(|(id, stock_total, open)| StockSnapshot::new(id, stock_total, open)))
}

/// Flat row of the rentals ⋈ customers ⋈ games ⋈ categories join.
#[derive(Debug, sqlx::FromRow)]
struct RentalViewRow {
    id: RentalId,
    customer_id: CustomerId,
    game_id: GameId,
    rent_date: NaiveDate,
    days_rented: i64,
    return_date: Option<NaiveDate>,
    original_price: i64,
    delay_fee: Option<i64>,
    customer_name: String,
    game_name: String,
    category_id: CategoryId,
    category_name: String,
}

impl From<RentalViewRow> for RentalView {
    fn from(row: RentalViewRow) -> Self {
        RentalView {
            id: row.id,
            customer_id: row.customer_id,
            game_id: row.game_id,
            rent_date: row.rent_date,
            days_rented: row.days_rented,
            return_date: row.return_date,
            original_price: row.original_price,
            delay_fee: row.delay_fee,
            customer: RentalCustomer {
                id: row.customer_id,
                name: row.customer_name,
            },
            game: RentalGame {
                id: row.game_id,
                name: row.game_name,
                category_id: row.category_id,
                category_name: row.category_name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support;
    use crate::{Database, DbConfig};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn new_rental(customer_id: i64, game_id: i64) -> NewRental {
        NewRental {
            customer_id,
            game_id,
            days_rented: 3,
        }
    }

    async fn rent(db: &Database, customer_id: i64, game_id: i64) -> RentalInsert {
        db.rentals()
            .create_guarded(&new_rental(customer_id, game_id), today(), Money::from_cents(4500))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_open_rental() {
        let db = test_support::db().await;
        let category = test_support::category(&db, "Strategy").await;
        let game = test_support::game(&db, category.id, "Catan", 2).await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;

        let RentalInsert::Created(rental) = rent(&db, ana.id, game.id).await else {
            panic!("expected a created rental");
        };

        assert_eq!(rental.rent_date, today());
        assert_eq!(rental.days_rented, 3);
        assert_eq!(rental.original_price, 4500);
        assert_eq!(rental.return_date, None);
        assert_eq!(rental.delay_fee, None);
        assert_eq!(db.rentals().get_by_id(rental.id).await.unwrap(), Some(rental));
    }

    #[tokio::test]
    async fn test_guard_refuses_when_stock_exhausted() {
        let db = test_support::db().await;
        let category = test_support::category(&db, "Strategy").await;
        let game = test_support::game(&db, category.id, "Catan", 2).await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;

        assert!(matches!(rent(&db, ana.id, game.id).await, RentalInsert::Created(_)));
        assert!(matches!(rent(&db, ana.id, game.id).await, RentalInsert::Created(_)));

        let third = rent(&db, ana.id, game.id).await;
        assert_eq!(third, RentalInsert::Unavailable(StockSnapshot::new(game.id, 2, 2)));

        let open = db.rentals().list(&RentalFilter::default()).await.unwrap();
        assert_eq!(open.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_stock_is_unavailable() {
        let db = test_support::db().await;
        let category = test_support::category(&db, "Strategy").await;
        let game = test_support::game(&db, category.id, "Catan", 0).await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;

        assert!(matches!(rent(&db, ana.id, game.id).await, RentalInsert::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_concurrent_requests_never_overbook() {
        // A file-backed pool so the requests really run on separate connections
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("race.db")).max_connections(5))
            .await
            .unwrap();
        let category = test_support::category(&db, "Strategy").await;
        let game = test_support::game(&db, category.id, "Catan", 3).await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;

        let (customer_id, game_id) = (ana.id, game.id);
        let mut handles = Vec::new();
        for _ in 0..10 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                db.rentals()
                    .create_guarded(
                        &new_rental(customer_id, game_id),
                        today(),
                        Money::from_cents(4500),
                    )
                    .await
                    .unwrap()
            }));
        }

        let mut created = 0;
        for handle in handles {
            if let RentalInsert::Created(_) = handle.await.unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 3);
        let snapshot = db.rentals().stock_snapshot(game.id).await.unwrap().unwrap();
        assert_eq!(snapshot.open_rentals, 3);
        assert!(!snapshot.is_available());
    }

    #[tokio::test]
    async fn test_unknown_game_is_not_found() {
        let db = test_support::db().await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;

        let err = db
            .rentals()
            .create_guarded(&new_rental(ana.id, 99), today(), Money::from_cents(4500))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(db.rentals().stock_snapshot(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_customer_is_foreign_key_violation() {
        let db = test_support::db().await;
        let category = test_support::category(&db, "Strategy").await;
        let game = test_support::game(&db, category.id, "Catan", 1).await;

        let err = db
            .rentals()
            .create_guarded(&new_rental(99, game.id), today(), Money::from_cents(4500))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_joins_and_filters_with_and() {
        let db = test_support::db().await;
        let category = test_support::category(&db, "Strategy").await;
        let catan = test_support::game(&db, category.id, "Catan", 5).await;
        let azul = test_support::game(&db, category.id, "Azul", 5).await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;
        let bruno = test_support::customer(&db, "Bruno Lima", "98765432100").await;

        rent(&db, ana.id, catan.id).await;
        rent(&db, ana.id, azul.id).await;
        rent(&db, bruno.id, catan.id).await;

        let repo = db.rentals();
        let all = repo.list(&RentalFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].customer.name, "Ana Souza");
        assert_eq!(all[0].game.name, "Catan");
        assert_eq!(all[0].game.category_name, "Strategy");

        let by_customer = RentalFilter {
            customer_id: Some(ana.id),
            game_id: None,
        };
        assert_eq!(repo.list(&by_customer).await.unwrap().len(), 2);

        let both = RentalFilter {
            customer_id: Some(ana.id),
            game_id: Some(catan.id),
        };
        let hits = repo.list(&both).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer_id, ana.id);
        assert_eq!(hits[0].game_id, catan.id);
    }

    #[tokio::test]
    async fn test_mark_returned_frees_a_copy() {
        let db = test_support::db().await;
        let category = test_support::category(&db, "Strategy").await;
        let game = test_support::game(&db, category.id, "Catan", 1).await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;

        let RentalInsert::Created(rental) = rent(&db, ana.id, game.id).await else {
            panic!("expected a created rental");
        };
        assert!(matches!(rent(&db, ana.id, game.id).await, RentalInsert::Unavailable(_)));

        let returned_on = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        let closed = db
            .rentals()
            .mark_returned(rental.id, returned_on, Money::from_cents(3000))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.return_date, Some(returned_on));
        assert_eq!(closed.delay_fee, Some(3000));

        // A second return is a no-op
        let again = db
            .rentals()
            .mark_returned(rental.id, returned_on, Money::zero())
            .await
            .unwrap();
        assert!(again.is_none());

        assert!(matches!(rent(&db, ana.id, game.id).await, RentalInsert::Created(_)));
    }
}
