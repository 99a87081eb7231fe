use sea_orm::{
    DatabaseConnection, EntityTrait, QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
};

/// Fields known before the user has rated a movie. Rating, ranking and
/// review start out unset.
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub img_url: Option<String>,
}

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All movies, best-rated first. SQLite sorts NULL lowest, so unrated
    /// movies come last under the descending order.
    pub async fn list_by_rating(&self) -> AppResult<Vec<movie::Model>> {
        let movies =
            movie::Entity::find().order_by_desc(movie::Column::Rating).all(&self.db).await?;
        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound)
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<i32> {
        let model = movie::ActiveModel {
            title: Set(new.title.clone()),
            year: Set(new.year),
            description: Set(new.description),
            img_url: Set(new.img_url),
            ..Default::default()
        };

        let res = movie::Entity::insert(model).exec(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict(new.title)
            } else {
                e.into()
            }
        })?;

        Ok(res.last_insert_id)
    }

    pub async fn set_rating(&self, id: i32, rating: f64, review: String) -> AppResult<()> {
        let model = movie::ActiveModel {
            id: Set(id),
            rating: Set(Some(rating)),
            review: Set(Some(review)),
            ..Default::default()
        };

        movie::Entity::update(model).exec(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => AppError::NotFound,
            other => other.into(),
        })?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Rewrites the ranking column for every listed movie in one
    /// transaction so concurrent readers never observe a partial rewrite.
    pub async fn persist_rankings(&self, rankings: &[(i32, i32)]) -> AppResult<()> {
        let txn = self.db.begin().await?;

        for &(id, rank) in rankings {
            let model = movie::ActiveModel {
                id: Set(id),
                ranking: Set(Some(rank)),
                ..Default::default()
            };
            movie::Entity::update(model).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}
