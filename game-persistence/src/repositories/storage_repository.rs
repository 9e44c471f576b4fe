use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    TransactionTrait,
};

use crate::entities::{local_storage, prelude::*};
use crate::error::StorageError;
use crate::slots::StoredValue;

/// Version written with every slot. Rows carrying any other version are
/// discarded on read instead of being parsed with the wrong shape.
pub const STORAGE_SCHEMA_VERSION: i32 = 1;

/// A serialized value ready to be written to its slot.
#[derive(Debug, Clone)]
pub struct StorageEntry {
    key: &'static str,
    value: String,
}

impl StorageEntry {
    pub fn of<T: StoredValue>(value: &T) -> Result<Self, StorageError> {
        let value = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: T::KEY,
            source,
        })?;
        Ok(Self { key: T::KEY, value })
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

#[derive(Clone)]
pub struct LocalStorageRepository {
    db: DatabaseConnection,
}

impl LocalStorageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn load<T: StoredValue>(&self) -> Result<Option<T>, StorageError> {
        let Some(row) = LocalStorage::find_by_id(T::KEY.to_string()).one(&self.db).await? else {
            return Ok(None);
        };

        if row.schema_version != STORAGE_SCHEMA_VERSION {
            tracing::warn!(
                "Discarding '{}' stored with schema version {} (expected {})",
                T::KEY,
                row.schema_version,
                STORAGE_SCHEMA_VERSION
            );
            self.delete_keys(&[T::KEY]).await?;
            return Ok(None);
        }

        match serde_json::from_str(&row.value) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!("Discarding unreadable '{}': {}", T::KEY, err);
                self.delete_keys(&[T::KEY]).await?;
                Ok(None)
            }
        }
    }

    pub async fn save<T: StoredValue>(&self, value: &T) -> Result<(), StorageError> {
        let entry = StorageEntry::of(value)?;
        upsert(&self.db, entry).await?;
        Ok(())
    }

    pub async fn delete<T: StoredValue>(&self) -> Result<(), StorageError> {
        self.delete_keys(&[T::KEY]).await
    }

    /// Write several slots in one transaction: either all land or none do.
    pub async fn save_all(&self, entries: Vec<StorageEntry>) -> Result<(), StorageError> {
        let txn = self.db.begin().await?;
        for entry in entries {
            upsert(&txn, entry).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn delete_keys(&self, keys: &[&'static str]) -> Result<(), StorageError> {
        LocalStorage::delete_many()
            .filter(local_storage::Column::StorageKey.is_in(keys.iter().copied()))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn contains(&self, key: &str) -> Result<bool, StorageError> {
        let row = LocalStorage::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(row.is_some())
    }
}

async fn upsert<C: ConnectionTrait>(conn: &C, entry: StorageEntry) -> Result<(), DbErr> {
    let model = local_storage::ActiveModel {
        storage_key: ActiveValue::Set(entry.key.to_string()),
        value: ActiveValue::Set(entry.value),
        schema_version: ActiveValue::Set(STORAGE_SCHEMA_VERSION),
        updated_at: ActiveValue::Set(chrono::Utc::now().into()),
    };

    LocalStorage::insert(model)
        .on_conflict(
            OnConflict::column(local_storage::Column::StorageKey)
                .update_columns([
                    local_storage::Column::Value,
                    local_storage::Column::SchemaVersion,
                    local_storage::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
