use tabled::Tabled;

use crate::cli::ListArgs;
use crate::commands::Session;
use crate::error::{Result, UsersError};
use crate::output::{self, truncate};
use crate::store::UserBackend;
use crate::types::User;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Address")]
    address: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        let (first, second) = user.fields.address.lines();
        Self {
            id: user.id,
            name: truncate(&user.fields.name, 30),
            email: user.fields.email.clone(),
            address: format!("{first}\n{second}"),
        }
    }
}

#[derive(Tabled)]
struct ExpandedUserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Website")]
    website: String,
    #[tabled(rename = "Company")]
    company: String,
}

impl From<&User> for ExpandedUserRow {
    fn from(user: &User) -> Self {
        let row = UserRow::from(user);
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            address: row.address,
            phone: user.fields.phone.clone().unwrap_or_default(),
            website: user.fields.website.clone().unwrap_or_default(),
            company: user
                .fields
                .company
                .as_ref()
                .map(|c| truncate(&c.name, 30))
                .unwrap_or_default(),
        }
    }
}

fn compact_line(user: &User) -> String {
    format!("{}\t{} <{}>", user.id, user.fields.name, user.fields.email)
}

/// Users to show, or the saved error from the last failed load. The error
/// stands in for the list until a load succeeds.
async fn current_users<B: UserBackend>(session: &mut Session<B>, refresh: bool) -> Result<&[User]> {
    if refresh {
        session.load_all().await?;
    } else {
        session.ensure_loaded().await?;
    }

    if let Some(error) = session.store.error() {
        return Err(UsersError::LoadFailed(error.to_string()));
    }
    Ok(session.store.users())
}

pub async fn list(session: &mut Session, args: ListArgs) -> Result<()> {
    let users = current_users(session, args.refresh).await?;
    if users.is_empty() {
        output::print_message("No users found. Add a new user to get started.");
        return Ok(());
    }

    if args.expand {
        output::print_table(users, |u| ExpandedUserRow::from(u), compact_line);
    } else {
        output::print_table(users, |u| UserRow::from(u), compact_line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_file::StateFile;
    use crate::store::fake::FakeBackend;
    use crate::store::UserStore;
    use crate::types::{sample_draft, Company};

    fn session(dir: &tempfile::TempDir, users: Vec<User>) -> Session<FakeBackend> {
        let state = StateFile::new(dir.path().join("state.json"));
        Session::new(UserStore::default(), FakeBackend::with_users(users), state)
    }

    #[tokio::test]
    async fn test_saved_load_error_replaces_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, vec![User::new(1, sample_draft("A", "a@x.com"))]);
        current_users(&mut session, true).await.unwrap();

        session.client.fail_fetch.set(true);
        assert!(current_users(&mut session, true).await.is_err());

        // A later plain list does not reload but still reports the failure.
        let err = current_users(&mut session, false).await.unwrap_err();
        assert!(matches!(err, UsersError::LoadFailed(ref msg) if msg.contains("503")));
        assert_eq!(session.client.fetches.get(), 2);
    }

    #[tokio::test]
    async fn test_successful_refresh_clears_saved_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, vec![User::new(1, sample_draft("A", "a@x.com"))]);
        session.client.fail_fetch.set(true);
        assert!(current_users(&mut session, false).await.is_err());

        session.client.fail_fetch.set(false);
        let users = current_users(&mut session, true).await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(current_users(&mut session, false).await.is_ok());
    }

    #[test]
    fn test_row_joins_address_lines() {
        let user = User::new(1, sample_draft("Leanne Graham", "Sincere@april.biz"));
        let row = UserRow::from(&user);
        assert_eq!(row.address, "Kulas Light, Apt. 556\nGwenborough, 92998-3874");
    }

    #[test]
    fn test_expanded_row_fills_secondary_fields() {
        let mut draft = sample_draft("A", "a@x.com");
        draft.website = Some("hildegard.org".to_string());
        draft.company = Some(Company {
            name: "Romaguera-Crona".to_string(),
            ..Company::default()
        });
        let row = ExpandedUserRow::from(&User::new(1, draft));
        assert_eq!(row.phone, "");
        assert_eq!(row.website, "hildegard.org");
        assert_eq!(row.company, "Romaguera-Crona");
    }

    #[test]
    fn test_compact_line() {
        let user = User::new(9, sample_draft("B", "b@x.com"));
        assert_eq!(compact_line(&user), "9\tB <b@x.com>");
    }
}
