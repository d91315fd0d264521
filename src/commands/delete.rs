use std::io::{self, BufRead, Write};

use crate::commands::Session;
use crate::error::Result;
use crate::output;

pub async fn delete(session: &mut Session, id: u64, yes: bool) -> Result<()> {
    session.ensure_loaded().await?;

    let Some(user) = session.store.get(id) else {
        output::print_message(&format!("No user with id {id}"));
        return Ok(());
    };

    if !yes {
        let prompt = format!("Are you sure you want to delete {}? [y/N] ", user.name());
        if !confirm(&prompt, &mut io::stdin().lock(), &mut io::stderr())? {
            output::print_message("Aborted.");
            return Ok(());
        }
    }

    let name = user.name().to_string();
    session.store.delete(&session.client, id).await?;
    session.commit()?;

    output::print_message(&format!("Deleted user {id} - {name}"));
    Ok(())
}

/// Ask a yes/no question; anything other than "y" or "yes" is a no.
fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
