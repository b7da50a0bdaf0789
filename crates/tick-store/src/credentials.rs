use rusqlite::OptionalExtension;
use tick_core::GithubToken;
use tracing::instrument;

use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers::check;

const UPSERT_TOKEN: &str = "INSERT OR REPLACE INTO githubToken (id, token) VALUES (0, ?1)";
const SELECT_TOKEN: &str = "SELECT token FROM githubToken WHERE id = 0";

/// The single stored GitHub token.
pub struct CredentialRepo {
    db: Database,
}

impl CredentialRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Store `token`, replacing any previous one.
    #[instrument(skip_all)]
    pub fn set_token(&self, token: &GithubToken) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            check("save_token", UPSERT_TOKEN, conn.execute(UPSERT_TOKEN, [token.expose()]))?;
            Ok(())
        })
    }

    /// The stored token, or `None` when none has been configured.
    pub fn token(&self) -> Result<Option<GithubToken>, StoreError> {
        self.db.with_conn(|conn| {
            let raw = check(
                "get_token",
                SELECT_TOKEN,
                conn.query_row(SELECT_TOKEN, [], |row| row.get::<_, String>(0))
                    .optional(),
            )?;
            Ok(raw.map(GithubToken::from_stored))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_repo() -> CredentialRepo {
        CredentialRepo::new(Database::in_memory().unwrap())
    }

    #[test]
    fn no_token_configured() {
        assert!(test_repo().token().unwrap().is_none());
    }

    #[test]
    fn stored_token_round_trips() {
        let repo = test_repo();
        let raw = "0123456789abcdef0123456789abcdef01234567";
        repo.set_token(&GithubToken::parse(raw).unwrap()).unwrap();
        assert_eq!(repo.token().unwrap().unwrap().expose(), raw);
    }

    #[test]
    fn setting_again_replaces() {
        let repo = test_repo();
        repo.set_token(&GithubToken::parse(&"a".repeat(40)).unwrap()).unwrap();
        repo.set_token(&GithubToken::parse(&"b".repeat(40)).unwrap()).unwrap();

        assert_eq!(repo.token().unwrap().unwrap().expose(), "b".repeat(40));
        let rows: i64 = repo
            .db
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM githubToken", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn empty_stored_token_is_distinct_from_missing() {
        let repo = test_repo();
        repo.db
            .with_conn(|conn| {
                conn.execute("INSERT INTO githubToken (id, token) VALUES (0, '')", [])?;
                Ok(())
            })
            .unwrap();
        let token = repo.token().unwrap();
        assert_eq!(token.map(|t| t.expose().to_string()), Some(String::new()));
    }
}
