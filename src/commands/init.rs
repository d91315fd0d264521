use std::io::{self, Write};

use serde::Serialize;

use crate::config::{parse_endpoint, Config, DEFAULT_ENDPOINT};
use crate::error::{Result, UsersError};

#[derive(Serialize)]
struct ConfigFile {
    endpoint: String,
    remote_writes: bool,
}

fn prompt(question: &str) -> io::Result<String> {
    print!("{question}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Users CLI Configuration");
    println!("=======================\n");

    let endpoint = prompt(&format!("Endpoint URL [{DEFAULT_ENDPOINT}]: "))?;
    let endpoint = if endpoint.is_empty() {
        DEFAULT_ENDPOINT.to_string()
    } else {
        parse_endpoint(&endpoint)?.to_string()
    };

    let remote_writes = prompt("Send create/update/delete to the endpoint? [y/N] ")?
        .eq_ignore_ascii_case("y");

    let contents = toml::to_string(&ConfigFile {
        endpoint,
        remote_writes,
    })?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| UsersError::ConfigWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, contents).map_err(|e| UsersError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("Run 'users' to load and list users.");

    Ok(())
}
