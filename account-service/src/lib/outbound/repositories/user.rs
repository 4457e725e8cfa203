use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSummary;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

// Follower and following ids are aggregated from `user_follows` so one row
// carries the whole aggregate. Ids come back in follow order.
const SELECT_USER: &str = r#"
    SELECT u.id, u.fullname, u.username, u.email, u.password_hash, u.gender, u.avatar,
           u.created_at,
           ARRAY(SELECT f.follower_id FROM user_follows f WHERE f.followee_id = u.id ORDER BY f.created_at) AS followers,
           ARRAY(SELECT f.followee_id FROM user_follows f WHERE f.follower_id = u.id ORDER BY f.created_at) AS following
    FROM users u
"#;

const SELECT_SUMMARY: &str = r#"
    SELECT u.id, u.avatar, u.username, u.fullname,
           ARRAY(SELECT f.follower_id FROM user_follows f WHERE f.followee_id = u.id ORDER BY f.created_at) AS followers,
           ARRAY(SELECT f.followee_id FROM user_follows f WHERE f.follower_id = u.id ORDER BY f.created_at) AS following
    FROM users u
    WHERE u.id = ANY($1)
    ORDER BY array_position($1, u.id)
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    fullname: String,
    username: String,
    email: String,
    password_hash: String,
    gender: String,
    avatar: String,
    created_at: DateTime<Utc>,
    followers: Vec<Uuid>,
    following: Vec<Uuid>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(r.id),
            fullname: r.fullname,
            username: Username::new(r.username)?,
            email: EmailAddress::new(r.email)?,
            password_hash: r.password_hash,
            gender: r.gender,
            avatar: r.avatar,
            followers: r.followers.into_iter().map(UserId).collect(),
            following: r.following.into_iter().map(UserId).collect(),
            created_at: r.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    avatar: String,
    username: String,
    fullname: String,
    followers: Vec<Uuid>,
    following: Vec<Uuid>,
}

impl TryFrom<SummaryRow> for UserSummary {
    type Error = UserError;

    fn try_from(r: SummaryRow) -> Result<Self, Self::Error> {
        Ok(UserSummary {
            id: UserId(r.id),
            avatar: r.avatar,
            username: Username::new(r.username)?,
            fullname: r.fullname,
            followers: r.followers.into_iter().map(UserId).collect(),
            following: r.following.into_iter().map(UserId).collect(),
        })
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str) -> Result<Option<User>, UserError> {
        let query = format!("{} WHERE {} = $1", SELECT_USER, filter);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, fullname, username, email, password_hash, gender, avatar, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.0)
        .bind(&user.fullname)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.gender)
        .bind(&user.avatar)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return UserError::UsernameAlreadyExists(
                            user.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                    }
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let query = format!("{} WHERE u.id = $1", SELECT_USER);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        self.find_one("u.username", username.as_str()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.find_one("u.email", email).await
    }

    async fn find_summaries(&self, ids: &[UserId]) -> Result<Vec<UserSummary>, UserError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query_as::<_, SummaryRow>(SELECT_SUMMARY)
            .bind(uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(UserSummary::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = include_str!("../../../../migrations/20240101000000_create_users.sql");

    fn column_type(column: &str) -> Option<&'static str> {
        SCHEMA
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with(column))
            .and_then(|line| line.split_whitespace().nth(1))
    }

    #[test]
    fn test_free_text_columns_are_unbounded() {
        for column in ["fullname", "username", "email", "gender", "avatar"] {
            assert_eq!(column_type(column), Some("TEXT"), "column {}", column);
        }
    }

    #[test]
    fn test_summaries_follow_requested_order() {
        assert!(SELECT_SUMMARY.contains("ORDER BY array_position($1, u.id)"));
    }

    #[test]
    fn test_user_row_keeps_long_gender() {
        let gender = "a gender description well past sixteen characters";
        let row = UserRow {
            id: Uuid::new_v4(),
            fullname: "Jane Doe".to_string(),
            username: "janedoe".to_string(),
            email: "jane@x.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            gender: gender.to_string(),
            avatar: "https://example.com/a.png".to_string(),
            created_at: Utc::now(),
            followers: vec![Uuid::new_v4()],
            following: Vec::new(),
        };
        let follower = row.followers[0];

        let user = User::try_from(row).unwrap();

        assert_eq!(user.gender, gender);
        assert_eq!(user.followers, vec![UserId(follower)]);
    }

    #[test]
    fn test_summary_row_rejects_blank_username() {
        let row = SummaryRow {
            id: Uuid::new_v4(),
            avatar: String::new(),
            username: "   ".to_string(),
            fullname: "Nobody".to_string(),
            followers: Vec::new(),
            following: Vec::new(),
        };

        assert!(matches!(
            UserSummary::try_from(row),
            Err(UserError::InvalidUsername(_))
        ));
    }
}
