//! MongoDB implementation of the user repository.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use serde::Deserialize;
use tracing::instrument;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const EMAIL_INDEX_NAME: &str = "idx_email_unique";

/// Read-side view of a user document. The `password` field is projected away.
#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    age: i32,
    email: String,
    address: String,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        User {
            id: r.id.to_hex(),
            name: r.name,
            age: r.age,
            email: r.email,
            address: r.address,
        }
    }
}

/// MongoDB repository for user documents.
///
/// Natural (storage) order is used for paging; no sort is applied.
pub struct MongoUserRepository {
    database: Database,
    users: Collection<UserRecord>,
    documents: Collection<Document>,
}

impl MongoUserRepository {
    /// Creates a repository over `collection_name` in `database`.
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            database: database.clone(),
            users: database.collection::<UserRecord>(collection_name),
            documents: database.collection::<Document>(collection_name),
        }
    }

    /// Name of the underlying collection.
    pub fn collection_name(&self) -> &str {
        self.documents.name()
    }

    /// Drops the underlying collection. Used by integration tests for cleanup.
    pub async fn drop_collection(&self) -> Result<(), AppError> {
        self.documents.drop().await?;
        Ok(())
    }

    fn projection() -> Document {
        doc! { "password": 0 }
    }

    fn id_filter(id: &str) -> Option<Document> {
        ObjectId::parse_str(id).ok().map(|oid| doc! { "_id": oid })
    }

    fn insert_document(new_user: &NewUser) -> Document {
        doc! {
            "name": &new_user.name,
            "age": new_user.age,
            "email": &new_user.email,
            "password": &new_user.password_hash,
            "address": &new_user.address,
        }
    }

    /// Builds the `$set` body from the supplied fields only.
    fn set_document(patch: &UserPatch) -> Document {
        let mut set = doc! {};

        if let Some(ref name) = patch.name {
            set.insert("name", name);
        }
        if let Some(age) = patch.age {
            set.insert("age", age);
        }
        if let Some(ref email) = patch.email {
            set.insert("email", email);
        }
        if let Some(ref password_hash) = patch.password_hash {
            set.insert("password", password_hash);
        }
        if let Some(ref address) = patch.address {
            set.insert("address", address);
        }

        set
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self), fields(collection = %self.collection_name()))]
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(EMAIL_INDEX_NAME.to_string())
                    .build(),
            )
            .build();

        self.documents.create_index(index).await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }

    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    async fn insert(&self, new_user: NewUser) -> Result<String, AppError> {
        let result = self
            .documents
            .insert_one(Self::insert_document(&new_user))
            .await?;

        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| AppError::upstream("inserted document has no ObjectId"))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Some(filter) = Self::id_filter(id) else {
            return Ok(None);
        };

        let record = self
            .users
            .find_one(filter)
            .projection(Self::projection())
            .await?;

        Ok(record.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_page(&self, offset: u64, limit: i64) -> Result<Vec<User>, AppError> {
        let cursor = self
            .users
            .find(doc! {})
            .skip(offset)
            .limit(limit)
            .projection(Self::projection())
            .await?;

        let records: Vec<UserRecord> = cursor.try_collect().await?;

        Ok(records.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>, AppError> {
        let Some(filter) = Self::id_filter(id) else {
            return Ok(None);
        };

        let record = self
            .users
            .find_one_and_update(filter, doc! { "$set": Self::set_document(&patch) })
            .return_document(ReturnDocument::After)
            .projection(Self::projection())
            .await?;

        Ok(record.map(User::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(filter) = Self::id_filter(id) else {
            return Ok(false);
        };

        let result = self.documents.delete_one(filter).await?;

        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64, AppError> {
        let count = self.documents.count_documents(doc! {}).await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
