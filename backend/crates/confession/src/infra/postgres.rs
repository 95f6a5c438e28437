//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{ConfessionId, ReplyId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{Confession, Reply, Vote};
use crate::domain::read_model::{BoardStats, MoodCount, RecentActivity, TagCount};
use crate::domain::repository::{
    ConfessionRepository, ReplyRepository, StatsRepository, VoteRepository,
};
use crate::domain::value_object::search::like_pattern;
use crate::domain::value_object::{
    Author, Content, ModerationRecord, Mood, Page, SearchCriteria, SortKey, SortOrder, Tags,
    VoteCounts, VoteTarget, VoteType,
};
use crate::error::{ConfessionError, ConfessionResult};

/// Public and not disapproved by a successful moderation check
const LISTED: &str = "is_public AND (moderation_approved OR moderation_service_failed)";

const CONFESSION_COLUMNS: &str = r#"
    confession_id,
    tx_id,
    content,
    author,
    author_user_id,
    is_public,
    mood,
    tags,
    moderation_approved,
    moderation_flagged,
    moderation_reviewed,
    moderation_service_failed,
    moderation_enhancement,
    gateway_url,
    explorer_url,
    upvotes,
    downvotes,
    created_at
"#;

const REPLY_COLUMNS: &str = r#"
    reply_id,
    confession_id,
    parent_reply_id,
    content,
    author,
    author_user_id,
    upvotes,
    downvotes,
    created_at
"#;

/// PostgreSQL-backed confession board repository
#[derive(Clone)]
pub struct PgConfessionRepository {
    pool: PgPool,
}

impl PgConfessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Confession Repository Implementation
// ============================================================================

impl ConfessionRepository for PgConfessionRepository {
    async fn create(&self, confession: &Confession) -> ConfessionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO confessions (
                confession_id,
                tx_id,
                content,
                author,
                author_user_id,
                is_public,
                mood,
                tags,
                moderation_approved,
                moderation_flagged,
                moderation_reviewed,
                moderation_service_failed,
                moderation_enhancement,
                gateway_url,
                explorer_url,
                upvotes,
                downvotes,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(confession.confession_id.as_uuid())
        .bind(&confession.tx_id)
        .bind(confession.content.as_str())
        .bind(confession.author.as_str())
        .bind(confession.author_user_id.map(|id| id.into_uuid()))
        .bind(confession.is_public)
        .bind(confession.mood.map(|m| m.code()))
        .bind(confession.tags.as_slice())
        .bind(confession.moderation.approved)
        .bind(confession.moderation.flagged)
        .bind(confession.moderation.reviewed)
        .bind(confession.moderation.service_failed)
        .bind(confession.moderation.enhancement.as_deref())
        .bind(&confession.gateway_url)
        .bind(&confession.explorer_url)
        .bind(confession.votes.upvotes)
        .bind(confession.votes.downvotes)
        .bind(confession.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, confession_id: ConfessionId) -> ConfessionResult<Option<Confession>> {
        let sql = format!("SELECT {CONFESSION_COLUMNS} FROM confessions WHERE confession_id = $1");
        let row = sqlx::query_as::<_, ConfessionRow>(&sql)
            .bind(confession_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_confession()).transpose()
    }

    async fn find_by_tx_id(&self, tx_id: &str) -> ConfessionResult<Option<Confession>> {
        let sql = format!("SELECT {CONFESSION_COLUMNS} FROM confessions WHERE tx_id = $1");
        let row = sqlx::query_as::<_, ConfessionRow>(&sql)
            .bind(tx_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_confession()).transpose()
    }

    async fn list_public(&self, page: Page) -> ConfessionResult<Vec<Confession>> {
        let sql = format!(
            "SELECT {CONFESSION_COLUMNS} FROM confessions WHERE {LISTED} \
             ORDER BY created_at DESC, confession_id DESC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, ConfessionRow>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_confession()).collect()
    }

    async fn list_trending(&self, limit: i64) -> ConfessionResult<Vec<Confession>> {
        let sql = format!(
            "SELECT {CONFESSION_COLUMNS} FROM confessions WHERE {LISTED} \
             ORDER BY upvotes DESC, created_at DESC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, ConfessionRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_confession()).collect()
    }

    async fn search(&self, criteria: &SearchCriteria) -> ConfessionResult<Vec<Confession>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {CONFESSION_COLUMNS} FROM confessions WHERE {LISTED}"));

        if !criteria.query.is_empty() {
            qb.push(" AND content ILIKE ")
                .push_bind(like_pattern(&criteria.query));
        }
        if let Some(mood) = criteria.mood {
            qb.push(" AND mood = ").push_bind(mood.code());
        }
        if !criteria.tags.is_empty() {
            qb.push(" AND tags && ").push_bind(criteria.tags.clone());
        }

        qb.push(match (criteria.sort_by, criteria.sort_order) {
            (SortKey::Timestamp, SortOrder::Desc) => " ORDER BY created_at DESC, confession_id DESC",
            (SortKey::Timestamp, SortOrder::Asc) => " ORDER BY created_at ASC, confession_id ASC",
            (SortKey::Upvotes, SortOrder::Desc) => " ORDER BY upvotes DESC, created_at DESC",
            (SortKey::Upvotes, SortOrder::Asc) => " ORDER BY upvotes ASC, created_at DESC",
        });
        qb.push(" LIMIT ")
            .push_bind(criteria.page.limit)
            .push(" OFFSET ")
            .push_bind(criteria.page.offset);

        let rows = qb
            .build_query_as::<ConfessionRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_confession()).collect()
    }

    async fn trending_tags(&self, limit: i64) -> ConfessionResult<Vec<TagCount>> {
        let sql = format!(
            "SELECT tag, COUNT(*) AS count \
             FROM confessions, unnest(tags) AS tag \
             WHERE {LISTED} \
             GROUP BY tag \
             ORDER BY count DESC, tag ASC \
             LIMIT $1"
        );
        let rows = sqlx::query_as::<_, TagCountRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| TagCount {
                tag: r.tag,
                count: r.count,
            })
            .collect())
    }

    async fn update_moderation(
        &self,
        confession_id: ConfessionId,
        record: &ModerationRecord,
    ) -> ConfessionResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE confessions SET
                moderation_approved = $2,
                moderation_flagged = $3,
                moderation_reviewed = $4,
                moderation_service_failed = $5,
                moderation_enhancement = $6
            WHERE confession_id = $1
            "#,
        )
        .bind(confession_id.as_uuid())
        .bind(record.approved)
        .bind(record.flagged)
        .bind(record.reviewed)
        .bind(record.service_failed)
        .bind(record.enhancement.as_deref())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(ConfessionError::ConfessionNotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Reply Repository Implementation
// ============================================================================

impl ReplyRepository for PgConfessionRepository {
    async fn create(&self, reply: &Reply) -> ConfessionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO replies (
                reply_id,
                confession_id,
                parent_reply_id,
                content,
                author,
                author_user_id,
                upvotes,
                downvotes,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(reply.reply_id.as_uuid())
        .bind(reply.confession_id.as_uuid())
        .bind(reply.parent_reply_id.map(|id| id.into_uuid()))
        .bind(reply.content.as_str())
        .bind(reply.author.as_str())
        .bind(reply.author_user_id.map(|id| id.into_uuid()))
        .bind(reply.votes.upvotes)
        .bind(reply.votes.downvotes)
        .bind(reply.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, reply_id: ReplyId) -> ConfessionResult<Option<Reply>> {
        let sql = format!("SELECT {REPLY_COLUMNS} FROM replies WHERE reply_id = $1");
        let row = sqlx::query_as::<_, ReplyRow>(&sql)
            .bind(reply_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ReplyRow::into_reply))
    }

    async fn list_for_confession(
        &self,
        confession_id: ConfessionId,
        page: Page,
    ) -> ConfessionResult<Vec<Reply>> {
        let sql = format!(
            "SELECT {REPLY_COLUMNS} FROM replies WHERE confession_id = $1 \
             ORDER BY created_at ASC, reply_id ASC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ReplyRow>(&sql)
            .bind(confession_id.as_uuid())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ReplyRow::into_reply).collect())
    }
}

// ============================================================================
// Vote Repository Implementation
// ============================================================================

impl VoteRepository for PgConfessionRepository {
    async fn cast(&self, vote: &Vote) -> ConfessionResult<VoteCounts> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO votes (
                vote_id,
                target_kind,
                target_id,
                voter_identity,
                vote_type,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(vote.vote_id.as_uuid())
        .bind(vote.target.kind_id())
        .bind(vote.target.uuid())
        .bind(&vote.voter_identity)
        .bind(vote.vote_type.id())
        .bind(vote.created_at)
        .execute(&mut *tx)
        .await;

        // Dropping `tx` on any early return rolls the vote back
        if let Err(e) = inserted {
            return Err(vote_insert_error(e));
        }

        let (table, id_column, not_found) = match vote.target {
            VoteTarget::Confession(_) => (
                "confessions",
                "confession_id",
                ConfessionError::ConfessionNotFound,
            ),
            VoteTarget::Reply(_) => ("replies", "reply_id", ConfessionError::ReplyNotFound),
        };
        let counter = match vote.vote_type {
            VoteType::Upvote => "upvotes",
            VoteType::Downvote => "downvotes",
        };
        let sql = format!(
            "UPDATE {table} SET {counter} = {counter} + 1 \
             WHERE {id_column} = $1 RETURNING upvotes, downvotes"
        );

        let counts = sqlx::query_as::<_, (i64, i64)>(&sql)
            .bind(vote.target.uuid())
            .fetch_optional(&mut *tx)
            .await?;

        let Some((upvotes, downvotes)) = counts else {
            return Err(not_found);
        };

        tx.commit().await?;

        Ok(VoteCounts::new(upvotes, downvotes))
    }
}

/// The `(target_id, voter_identity)` unique index is the duplicate-vote guard
fn vote_insert_error(e: sqlx::Error) -> ConfessionError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => ConfessionError::DuplicateVote,
        _ => ConfessionError::Database(e),
    }
}

// ============================================================================
// Stats Repository Implementation
// ============================================================================

impl StatsRepository for PgConfessionRepository {
    async fn board_stats(&self, since: DateTime<Utc>) -> ConfessionResult<BoardStats> {
        let counts = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM confessions) AS total_confessions,
                (SELECT COUNT(*) FROM confessions WHERE is_public) AS public_confessions,
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM replies) AS total_replies,
                (SELECT COUNT(*) FROM confessions WHERE created_at >= $1) AS recent_confessions,
                (SELECT COUNT(*) FROM replies WHERE created_at >= $1) AS recent_replies,
                (SELECT COUNT(*) FROM users WHERE created_at >= $1) AS recent_users
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT mood, COUNT(*) AS count FROM confessions \
             WHERE {LISTED} AND mood IS NOT NULL \
             GROUP BY mood ORDER BY count DESC, mood ASC"
        );
        let mood_rows = sqlx::query_as::<_, MoodCountRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let mood_distribution = mood_rows
            .into_iter()
            .filter_map(|r| match r.mood.parse::<Mood>() {
                Ok(mood) => Some(MoodCount {
                    mood,
                    count: r.count,
                }),
                Err(_) => {
                    tracing::warn!(mood = %r.mood, "Skipping unknown stored mood");
                    None
                }
            })
            .collect();

        Ok(BoardStats {
            total_confessions: counts.total_confessions,
            public_confessions: counts.public_confessions,
            total_users: counts.total_users,
            total_replies: counts.total_replies,
            mood_distribution,
            last_24h: RecentActivity {
                confessions: counts.recent_confessions,
                replies: counts.recent_replies,
                new_users: counts.recent_users,
            },
        })
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ConfessionRow {
    confession_id: Uuid,
    tx_id: String,
    content: String,
    author: String,
    author_user_id: Option<Uuid>,
    is_public: bool,
    mood: Option<String>,
    tags: Vec<String>,
    moderation_approved: bool,
    moderation_flagged: bool,
    moderation_reviewed: bool,
    moderation_service_failed: bool,
    moderation_enhancement: Option<String>,
    gateway_url: String,
    explorer_url: String,
    upvotes: i64,
    downvotes: i64,
    created_at: DateTime<Utc>,
}

impl ConfessionRow {
    fn into_confession(self) -> ConfessionResult<Confession> {
        let mood = self
            .mood
            .as_deref()
            .map(str::parse::<Mood>)
            .transpose()
            .map_err(|e| ConfessionError::Internal(format!("Invalid stored mood: {e}")))?;

        Ok(Confession {
            confession_id: ConfessionId::from_uuid(self.confession_id),
            tx_id: self.tx_id,
            content: Content::from_stored(self.content),
            author: Author::from_stored(self.author),
            author_user_id: self.author_user_id.map(Into::into),
            is_public: self.is_public,
            mood,
            tags: Tags::from_stored(self.tags),
            moderation: ModerationRecord {
                approved: self.moderation_approved,
                flagged: self.moderation_flagged,
                reviewed: self.moderation_reviewed,
                service_failed: self.moderation_service_failed,
                enhancement: self.moderation_enhancement,
            },
            gateway_url: self.gateway_url,
            explorer_url: self.explorer_url,
            votes: VoteCounts::new(self.upvotes, self.downvotes),
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReplyRow {
    reply_id: Uuid,
    confession_id: Uuid,
    parent_reply_id: Option<Uuid>,
    content: String,
    author: String,
    author_user_id: Option<Uuid>,
    upvotes: i64,
    downvotes: i64,
    created_at: DateTime<Utc>,
}

impl ReplyRow {
    fn into_reply(self) -> Reply {
        Reply {
            reply_id: ReplyId::from_uuid(self.reply_id),
            confession_id: ConfessionId::from_uuid(self.confession_id),
            parent_reply_id: self.parent_reply_id.map(ReplyId::from_uuid),
            content: Content::from_stored(self.content),
            author: Author::from_stored(self.author),
            author_user_id: self.author_user_id.map(Into::into),
            votes: VoteCounts::new(self.upvotes, self.downvotes),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TagCountRow {
    tag: String,
    count: i64,
}

#[derive(sqlx::FromRow)]
struct MoodCountRow {
    mood: String,
    count: i64,
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total_confessions: i64,
    public_confessions: i64,
    total_users: i64,
    total_replies: i64,
    recent_confessions: i64,
    recent_replies: i64,
    recent_users: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct FakeDbError {
        kind: ErrorKind,
        code: &'static str,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "database error {}", self.code)
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match &self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(kind: ErrorKind, code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { kind, code }))
    }

    #[test]
    fn unique_violation_on_vote_insert_is_duplicate_vote() {
        let error = vote_insert_error(db_error(ErrorKind::UniqueViolation, "23505"));
        assert!(matches!(error, ConfessionError::DuplicateVote));
    }

    #[test]
    fn other_vote_insert_failures_stay_database_errors() {
        let error = vote_insert_error(db_error(ErrorKind::ForeignKeyViolation, "23503"));
        assert!(matches!(error, ConfessionError::Database(_)));

        let error = vote_insert_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(error, ConfessionError::Database(_)));
    }

    #[test]
    fn migration_guarantees_user_columns_used_by_stats() {
        let migration = include_str!(
            "../../../../../database/migrations/20250101000000_confessions.sql"
        );
        assert!(migration.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(
            migration
                .contains("ALTER TABLE users ADD COLUMN IF NOT EXISTS created_at TIMESTAMPTZ")
        );
    }
}
