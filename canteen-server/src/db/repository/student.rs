//! Student Repository
//!
//! Read access to the student table. The order service uses it to fetch
//! the canonical email when computing the hostel tag.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Student;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "student";

#[derive(Clone)]
pub struct StudentRepository {
    base: BaseRepository,
}

impl StudentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find by identity string ("student:key" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Student>> {
        let record_id = if let Ok(rid) = id.parse::<RecordId>()
            && rid.table() == TABLE
        {
            rid
        } else {
            RecordId::from_table_key(TABLE, id)
        };
        let student: Option<Student> = self.base.db().select(record_id).await?;
        Ok(student)
    }

    /// Canonical email of a student, if the record exists
    pub async fn email_of(&self, id: &str) -> RepoResult<Option<String>> {
        Ok(self.find_by_id(id).await?.map(|s| s.email))
    }

    /// Insert a student record (seeding and tests)
    pub async fn create(&self, student: Student) -> RepoResult<Student> {
        let created: Option<Student> = self.base.db().create(TABLE).content(student).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create student".to_string()))
    }
}
