//! # Customer Repository
//!
//! Database operations for customers.
//!
//! A customer's cpf is unique across the table. Updates keep that true:
//! a customer may keep their own cpf, but never take another customer's.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::contains_pattern;
use crate::error::{DbError, DbResult};
use meeple_core::{Customer, CustomerId, CustomerInput};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists customers, optionally filtered by a cpf substring.
    ///
    /// Stored cpfs are ASCII digits, so no case folding is needed on the column.
    pub async fn list(&self, cpf_filter: Option<&str>) -> DbResult<Vec<Customer>> {
        debug!(cpf_filter = ?cpf_filter, "Listing customers");

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, cpf, birthday
            FROM customers
            WHERE ?1 IS NULL OR cpf LIKE ?1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(cpf_filter.map(contains_pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Gets a customer by its ID.
    pub async fn get_by_id(&self, id: CustomerId) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, cpf, birthday FROM customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Returns true if a customer with this ID exists.
    pub async fn exists(&self, id: CustomerId) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM customers WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Returns the id of the customer holding `cpf`, if any.
    ///
    /// Callers compare the owner with the customer being updated to tell
    /// "unchanged cpf" apart from "cpf taken by someone else".
    pub async fn cpf_owner(&self, cpf: &str) -> DbResult<Option<CustomerId>> {
        let owner: Option<CustomerId> =
            sqlx::query_scalar("SELECT id FROM customers WHERE cpf = ?1")
                .bind(cpf)
                .fetch_optional(&self.pool)
                .await?;

        Ok(owner)
    }

    /// Inserts a new customer.
    ///
    /// ## Arguments
    /// * `customer` - validated payload
    /// * `birthday` - the payload's birthday, already parsed by validation
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - the cpf is already registered
    pub async fn insert(&self, customer: &CustomerInput, birthday: NaiveDate) -> DbResult<Customer> {
        debug!(name = %customer.name, "Inserting customer");

        let created = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, phone, cpf, birthday)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, phone, cpf, birthday
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.cpf)
        .bind(birthday)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| cpf_conflict(e, &customer.cpf))?;

        info!(id = created.id, "Customer created");
        Ok(created)
    }

    /// Replaces every field of customer `id`.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - the updated row
    /// * `Err(DbError::NotFound)` - no customer with this id
    /// * `Err(DbError::UniqueViolation)` - the cpf belongs to another customer
    pub async fn update(
        &self,
        id: CustomerId,
        customer: &CustomerInput,
        birthday: NaiveDate,
    ) -> DbResult<Customer> {
        debug!(id = id, "Updating customer");

        let updated = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET
                name = ?2,
                phone = ?3,
                cpf = ?4,
                birthday = ?5
            WHERE id = ?1
            RETURNING id, name, phone, cpf, birthday
            "#,
        )
        .bind(id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.cpf)
        .bind(birthday)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| cpf_conflict(e, &customer.cpf))?
        .ok_or_else(|| DbError::not_found("Customer", id))?;

        info!(id = id, "Customer updated");
        Ok(updated)
    }
}

fn cpf_conflict(err: sqlx::Error, cpf: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { .. } => DbError::duplicate("cpf", cpf),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support;

    fn input(name: &str, cpf: &str) -> CustomerInput {
        CustomerInput {
            name: name.to_string(),
            phone: "2134567890".to_string(),
            cpf: cpf.to_string(),
            birthday: "1985-11-02".to_string(),
        }
    }

    fn birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 11, 2).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_support::db().await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;

        let found = db.customers().get_by_id(ana.id).await.unwrap().unwrap();
        assert_eq!(found, ana);
        assert_eq!(found.birthday, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
        assert!(db.customers().get_by_id(ana.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_cpf_substring() {
        let db = test_support::db().await;
        test_support::customer(&db, "Ana Souza", "12345678901").await;
        test_support::customer(&db, "Bruno Lima", "98765432100").await;

        let repo = db.customers();
        assert_eq!(repo.list(None).await.unwrap().len(), 2);

        let hits = repo.list(Some("456")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ana Souza");

        assert!(repo.list(Some("000")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cpf_owner() {
        let db = test_support::db().await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;

        let repo = db.customers();
        assert_eq!(repo.cpf_owner("12345678901").await.unwrap(), Some(ana.id));
        assert_eq!(repo.cpf_owner("98765432100").await.unwrap(), None);
        assert!(repo.exists(ana.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_keeps_own_cpf() {
        let db = test_support::db().await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;

        let updated = db
            .customers()
            .update(ana.id, &input("Ana Maria Souza", "12345678901"), birthday())
            .await
            .unwrap();

        assert_eq!(updated.id, ana.id);
        assert_eq!(updated.name, "Ana Maria Souza");
        assert_eq!(updated.birthday, birthday());
    }

    #[tokio::test]
    async fn test_update_rejects_other_customers_cpf() {
        let db = test_support::db().await;
        let ana = test_support::customer(&db, "Ana Souza", "12345678901").await;
        test_support::customer(&db, "Bruno Lima", "98765432100").await;

        let err = db
            .customers()
            .update(ana.id, &input("Ana Souza", "98765432100"), birthday())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "cpf"));
    }

    #[tokio::test]
    async fn test_update_unknown_customer() {
        let db = test_support::db().await;

        let err = db
            .customers()
            .update(7, &input("Ana Souza", "12345678901"), birthday())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_insert_duplicate_cpf() {
        let db = test_support::db().await;
        test_support::customer(&db, "Ana Souza", "12345678901").await;

        let err = db
            .customers()
            .insert(&input("Bruno Lima", "12345678901"), birthday())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
