use std::io::{self, BufRead, Write};

use consumption_core::{ClientConfig, ConsumptionStore};
use consumption_dashboard::views::shell::HELP;
use consumption_dashboard::{Command, Control, Shell};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they never interleave with the rendered screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, timeout = ?config.timeout, "starting dashboard");

    let mut shell = Shell::new(ConsumptionStore::new(config.client()), config.transport());
    shell.mount();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}\n{HELP}", shell.render())?;
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(stdout, "> ")?;
            stdout.flush()?;
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Help) => writeln!(stdout, "{HELP}")?,
            Ok(command) => match shell.handle(command) {
                Ok(Control::Quit) => break,
                Ok(Control::Continue) => writeln!(stdout, "{}", shell.render())?,
                Err(err) => writeln!(stdout, "{err}")?,
            },
            Err(err) => writeln!(stdout, "{err}")?,
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    tracing::info!("dashboard closed");
    Ok(())
}
