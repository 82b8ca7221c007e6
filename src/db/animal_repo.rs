//! Animal repository for Farmstead
//!
//! Creation issues the identifier and stamps the record; updates build a
//! dynamic SET clause from the allow-list fields so a single statement
//! changes exactly the fields the client sent.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::{
    db::{repository::RepositoryResult, DbPool},
    models::{Animal, AnimalUpdate, NewAnimal},
};

/// Animal repository trait
#[async_trait]
pub trait AnimalRepository: Send + Sync {
    /// Insert a new animal, issuing its identifier
    async fn insert(&self, animal: NewAnimal) -> RepositoryResult<Animal>;

    /// Fetch every animal record
    async fn find_all(&self) -> RepositoryResult<Vec<Animal>>;

    /// Find an animal by identifier
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Animal>>;

    /// Find an animal by its unique tag
    async fn find_by_tag(&self, tag_id: &str) -> RepositoryResult<Option<Animal>>;

    /// Apply a partial update; returns the updated record, or None when no
    /// record has the identifier
    async fn update(&self, id: Uuid, update: &AnimalUpdate) -> RepositoryResult<Option<Animal>>;

    /// Count stored animals
    async fn count(&self) -> RepositoryResult<i64>;
}

/// PostgreSQL implementation of AnimalRepository
pub struct PgAnimalRepository {
    pool: DbPool,
}

impl PgAnimalRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn row_to_animal(row: &sqlx::postgres::PgRow) -> RepositoryResult<Animal> {
        Ok(Animal {
            id: row.try_get("id")?,
            tag_id: row.try_get("tag_id")?,
            species: row.try_get("species")?,
            breed: row.try_get("breed")?,
            age_months: row.try_get("age_months")?,
            weight_kg: row.try_get("weight_kg")?,
            health_status: row.try_get("health_status")?,
            temperature: row.try_get("temperature")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, tag_id, species, breed, age_months, weight_kg,
           health_status, temperature, notes, created_at
    FROM animals
"#;

#[async_trait]
impl AnimalRepository for PgAnimalRepository {
    async fn insert(&self, animal: NewAnimal) -> RepositoryResult<Animal> {
        let record = Animal {
            id: Uuid::new_v4(),
            tag_id: animal.tag_id,
            species: animal.species,
            breed: animal.breed,
            age_months: animal.age_months,
            weight_kg: animal.weight_kg,
            health_status: animal.health_status,
            temperature: animal.temperature,
            notes: animal.notes,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO animals (
                id, tag_id, species, breed, age_months, weight_kg,
                health_status, temperature, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.id)
        .bind(&record.tag_id)
        .bind(&record.species)
        .bind(&record.breed)
        .bind(record.age_months)
        .bind(record.weight_kg)
        .bind(&record.health_status)
        .bind(record.temperature)
        .bind(&record.notes)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Animal>> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_animal).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Animal>> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_animal(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_tag(&self, tag_id: &str) -> RepositoryResult<Option<Animal>> {
        let row = sqlx::query(&format!("{} WHERE tag_id = $1", SELECT_COLUMNS))
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_animal(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, update: &AnimalUpdate) -> RepositoryResult<Option<Animal>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE animals SET ");

        {
            let mut fields = builder.separated(", ");
            if let Some(tag_id) = &update.tag_id {
                fields.push("tag_id = ").push_bind_unseparated(tag_id.clone());
            }
            if let Some(species) = &update.species {
                fields.push("species = ").push_bind_unseparated(species.clone());
            }
            if let Some(breed) = &update.breed {
                fields.push("breed = ").push_bind_unseparated(breed.clone());
            }
            if let Some(age_months) = update.age_months {
                fields.push("age_months = ").push_bind_unseparated(age_months);
            }
            if let Some(weight_kg) = update.weight_kg {
                fields.push("weight_kg = ").push_bind_unseparated(weight_kg);
            }
            if let Some(health_status) = &update.health_status {
                fields
                    .push("health_status = ")
                    .push_bind_unseparated(health_status.clone());
            }
            if let Some(temperature) = update.temperature {
                fields.push("temperature = ").push_bind_unseparated(temperature);
            }
            if let Some(notes) = &update.notes {
                fields.push("notes = ").push_bind_unseparated(notes.clone());
            }
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM animals")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
