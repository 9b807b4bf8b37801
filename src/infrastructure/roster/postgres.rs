//! PostgreSQL roster store with connection pooling

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, Row, Transaction};
use tracing::debug;

use crate::domain::person::{NewPerson, Person, PersonChanges, PersonId};
use crate::domain::roster::{PersonQuery, RosterStore, TeamQuery};
use crate::domain::team::{NewTeam, Team, TeamChanges, TeamId};
use crate::domain::DomainError;

use super::migrations::PostgresMigrator;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/roster".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// Roster store backed by `teams` and `people` tables
#[derive(Debug, Clone)]
pub struct PostgresRosterStore {
    pool: PgPool,
}

impl PostgresRosterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, then bring the schema up to date
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        PostgresMigrator::new(pool.clone()).run_all().await?;

        Ok(Self::new(pool))
    }

    async fn begin(&self) -> Result<Transaction<'_, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))
    }
}

async fn commit(tx: Transaction<'_, Postgres>) -> Result<(), DomainError> {
    tx.commit()
        .await
        .map_err(|e| DomainError::storage(format!("Failed to commit transaction: {}", e)))
}

fn team_from_row(row: &PgRow) -> Result<Team, DomainError> {
    let id: i64 = row.try_get("id").map_err(row_error)?;
    let name: String = row.try_get("name").map_err(row_error)?;

    Ok(Team::new(TeamId::new(id as u64), name))
}

fn person_from_row(row: &PgRow) -> Result<Person, DomainError> {
    let id: i64 = row.try_get("id").map_err(row_error)?;
    let first_name: String = row.try_get("first_name").map_err(row_error)?;
    let last_name: String = row.try_get("last_name").map_err(row_error)?;
    let email: String = row.try_get("email").map_err(row_error)?;
    let team_id: Option<i64> = row.try_get("team_id").map_err(row_error)?;

    Ok(
        Person::new(PersonId::new(id as u64), first_name, last_name, email)
            .with_team(team_id.map(|t| TeamId::new(t as u64))),
    )
}

fn row_error(e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Failed to decode row: {}", e))
}

/// Translate constraint violations into field validation errors
fn write_error(e: sqlx::Error, context: &str) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        match db.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                return match db.constraint() {
                    Some(c) if c.contains("email") => DomainError::invalid_field(
                        "email",
                        "person with this email already exists.",
                    ),
                    _ => DomainError::invalid_field("name", "team with this name already exists."),
                };
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return DomainError::invalid_field("team", "Referenced team does not exist.");
            }
            _ => {}
        }
    }

    DomainError::storage(format!("{}: {}", context, e))
}

fn to_db_ids(ids: &[TeamId]) -> Vec<i64> {
    ids.iter().map(|id| id.value() as i64).collect()
}

const PERSON_COLUMNS: &str = "id, first_name, last_name, email, team_id";

#[async_trait]
impl RosterStore for PostgresRosterStore {
    async fn create_team(&self, team: NewTeam) -> Result<Team, DomainError> {
        let row = sqlx::query("INSERT INTO teams (name) VALUES ($1) RETURNING id, name")
            .bind(team.name())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| write_error(e, "Failed to create team"))?;

        team_from_row(&row)
    }

    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM teams WHERE id = $1")
            .bind(id.value() as i64)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        row.as_ref().map(team_from_row).transpose()
    }

    async fn list_teams(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name FROM teams
            WHERE $1::TEXT IS NULL OR strpos(lower(name), lower($1)) > 0
            ORDER BY id
            "#,
        )
        .bind(query.name_contains.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list teams: {}", e)))?;

        rows.iter().map(team_from_row).collect()
    }

    async fn find_teams(&self, ids: &[TeamId]) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM teams WHERE id = ANY($1) ORDER BY id")
            .bind(to_db_ids(ids))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find teams: {}", e)))?;

        rows.iter().map(team_from_row).collect()
    }

    async fn update_team(&self, id: TeamId, changes: TeamChanges) -> Result<Team, DomainError> {
        let row = sqlx::query(
            "UPDATE teams SET name = COALESCE($2, name) WHERE id = $1 RETURNING id, name",
        )
        .bind(id.value() as i64)
        .bind(changes.name())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update team"))?;

        match row {
            Some(row) => team_from_row(&row),
            None => Err(DomainError::not_found(format!("Team {} not found", id))),
        }
    }

    async fn delete_team(&self, id: TeamId) -> Result<bool, DomainError> {
        let mut tx = self.begin().await?;

        let cleared = sqlx::query("UPDATE people SET team_id = NULL WHERE team_id = $1")
            .bind(id.value() as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to clear team members: {}", e)))?;

        let deleted = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.value() as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team: {}", e)))?;

        commit(tx).await?;

        debug!(
            team_id = %id,
            members_cleared = cleared.rows_affected(),
            "Deleted team"
        );

        Ok(deleted.rows_affected() > 0)
    }

    async fn create_person(&self, person: NewPerson) -> Result<Person, DomainError> {
        let sql = format!(
            "INSERT INTO people (first_name, last_name, email) VALUES ($1, $2, $3) RETURNING {}",
            PERSON_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(person.first_name())
            .bind(person.last_name())
            .bind(person.email())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| write_error(e, "Failed to create person"))?;

        person_from_row(&row)
    }

    async fn get_person(&self, id: PersonId) -> Result<Option<Person>, DomainError> {
        let sql = format!("SELECT {} FROM people WHERE id = $1", PERSON_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.value() as i64)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get person: {}", e)))?;

        row.as_ref().map(person_from_row).transpose()
    }

    async fn list_people(&self, query: &PersonQuery) -> Result<Vec<Person>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM people
            WHERE $1::TEXT IS NULL OR strpos(lower(last_name), lower($1)) > 0
            ORDER BY id
            "#,
            PERSON_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(query.last_name_contains.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list people: {}", e)))?;

        rows.iter().map(person_from_row).collect()
    }

    async fn find_members(&self, team_ids: &[TeamId]) -> Result<Vec<Person>, DomainError> {
        let sql = format!(
            "SELECT {} FROM people WHERE team_id = ANY($1) ORDER BY id",
            PERSON_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(to_db_ids(team_ids))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find members: {}", e)))?;

        rows.iter().map(person_from_row).collect()
    }

    async fn update_person(
        &self,
        id: PersonId,
        changes: PersonChanges,
    ) -> Result<Person, DomainError> {
        let sql = format!(
            r#"
            UPDATE people SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email)
            WHERE id = $1
            RETURNING {}
            "#,
            PERSON_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id.value() as i64)
            .bind(changes.first_name())
            .bind(changes.last_name())
            .bind(changes.email())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, "Failed to update person"))?;

        match row {
            Some(row) => person_from_row(&row),
            None => Err(DomainError::not_found(format!("Person {} not found", id))),
        }
    }

    async fn assign_team(
        &self,
        id: PersonId,
        team: Option<TeamId>,
    ) -> Result<Person, DomainError> {
        let mut tx = self.begin().await?;

        if let Some(team_id) = team {
            // FOR SHARE keeps the team from being deleted before commit
            let exists = sqlx::query("SELECT id FROM teams WHERE id = $1 FOR SHARE")
                .bind(team_id.value() as i64)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to look up team: {}", e)))?;

            if exists.is_none() {
                return Err(DomainError::invalid_field(
                    "team",
                    format!("Invalid pk \"{}\" - object does not exist.", team_id),
                ));
            }
        }

        let sql = format!(
            "UPDATE people SET team_id = $2 WHERE id = $1 RETURNING {}",
            PERSON_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id.value() as i64)
            .bind(team.map(|t| t.value() as i64))
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| write_error(e, "Failed to assign team"))?;

        let person = match row {
            Some(row) => person_from_row(&row)?,
            None => return Err(DomainError::not_found(format!("Person {} not found", id))),
        };

        commit(tx).await?;
        Ok(person)
    }

    async fn delete_person(&self, id: PersonId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id.value() as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete person: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_defaults() {
        let config = PostgresConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
    }

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://db/roster").with_max_connections(3);
        assert_eq!(config.url, "postgres://db/roster");
        assert_eq!(config.max_connections, 3);
    }

    #[test]
    fn test_to_db_ids() {
        let ids = [TeamId::new(1), TeamId::new(7)];
        assert_eq!(to_db_ids(&ids), vec![1, 7]);
    }

    #[test]
    fn test_non_database_error_is_storage() {
        let err = write_error(sqlx::Error::RowNotFound, "Failed to create team");
        assert!(matches!(err, DomainError::Storage { .. }));
    }
}
