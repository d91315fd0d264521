use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::commands::Session;
use crate::error::Result;
use crate::output::{self, format_relative};

#[derive(Serialize)]
struct Status {
    endpoint: String,
    remote_writes: bool,
    state_file: String,
    users: usize,
    loaded: bool,
    synced_at: Option<DateTime<Utc>>,
    error: Option<String>,
}

pub fn run(session: &Session) -> Result<()> {
    let store = &session.store;
    let status = Status {
        endpoint: session.client.endpoint().to_string(),
        remote_writes: session.client.remote_writes(),
        state_file: session.state_path().display().to_string(),
        users: store.users().len(),
        loaded: store.is_loaded(),
        synced_at: store.synced_at(),
        error: store.error().map(String::from),
    };

    output::print_item(&status, |s| {
        println!("Endpoint:      {}", s.endpoint);
        println!(
            "Writes:        {}",
            if s.remote_writes { "remote" } else { "local only" }
        );
        println!("State file:    {}", s.state_file);
        println!("Users:         {}", s.users);
        println!("Loaded:        {}", if s.loaded { "yes" } else { "no" });
        println!(
            "Last sync:     {}",
            s.synced_at
                .map(format_relative)
                .unwrap_or_else(|| "never".to_string())
        );
        if let Some(error) = &s.error {
            println!("Last error:    {}", error.red());
        }
    });

    Ok(())
}
