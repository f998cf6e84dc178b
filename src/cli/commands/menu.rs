//! `passvault menu` — interactive add / remove / retrieve / list loop.
//!
//! The vault is unlocked once into a `Session`; every change is written
//! back to disk immediately.  A failed action is reported and the menu
//! keeps running.

use std::path::Path;

use dialoguer::{Input, Password, Select};

use crate::cli::commands::unlock::unlock_or_init;
use crate::cli::output;
use crate::cli::{persist, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::Session;

const ACTIONS: &[&str] = &[
    "Add password",
    "Remove password",
    "Retrieve password",
    "Show passwords list",
    "Save and show checksum",
    "Exit",
];

/// Execute the `menu` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (path, vault, created) = unlock_or_init(cli)?;
    if created {
        output::success(&format!("Vault created at {}", path.display()));
    }

    let mut session = Session::new();
    session.attach(vault);

    loop {
        let choice = Select::new()
            .with_prompt("Password Manager")
            .items(ACTIONS)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        let outcome = match choice {
            0 => add(&mut session, &path),
            1 => remove(&mut session, &path),
            2 => retrieve(&session),
            3 => list(&session),
            4 => save(&session, &path),
            _ => break,
        };

        if let Err(e) = outcome {
            output::error(&e.to_string());
        }
    }

    session.lock();
    output::info("Exiting Password Manager...");
    Ok(())
}

fn add(session: &mut Session, path: &Path) -> Result<()> {
    let domain = ask_domain()?;
    let secret = Password::new()
        .with_prompt(format!("Enter password for {domain}"))
        .interact()
        .map_err(prompt_error)?;
    let secret = zeroize::Zeroizing::new(secret);

    session.set(&domain, &secret)?;
    persist(path, session.vault()?)?;
    output::success(&format!("Password for {domain} added successfully."));
    Ok(())
}

fn remove(session: &mut Session, path: &Path) -> Result<()> {
    let domain = ask_domain()?;

    if session.remove(&domain)? {
        persist(path, session.vault()?)?;
        output::success(&format!("Password for {domain} removed successfully."));
    } else {
        output::info(&format!("No password found for {domain}."));
    }
    Ok(())
}

fn retrieve(session: &Session) -> Result<()> {
    let domain = ask_domain()?;

    match session.get(&domain)? {
        Some(secret) => {
            let secret = zeroize::Zeroizing::new(secret);
            println!("Password for {domain}: {}", secret.as_str());
        }
        None => output::info(&format!("No password found for {domain}.")),
    }
    Ok(())
}

fn list(session: &Session) -> Result<()> {
    output::print_domains_table(&session.vault()?.domains());
    Ok(())
}

fn save(session: &Session, path: &Path) -> Result<()> {
    let dump = persist(path, session.vault()?)?;
    output::success(&format!("Vault saved to {}", path.display()));
    output::info(&format!("Checksum: {}", dump.checksum));
    Ok(())
}

fn ask_domain() -> Result<String> {
    Input::<String>::new()
        .with_prompt("Domain")
        .interact_text()
        .map_err(prompt_error)
}

fn prompt_error(e: dialoguer::Error) -> PassVaultError {
    PassVaultError::CommandFailed(format!("prompt: {e}"))
}
