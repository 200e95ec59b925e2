pub mod console;

use crate::config::letters::FileLetterSink;
use crate::core::manager::SubscriptionManager;
use crate::core::seed::SeedData;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use console::Console;
use std::io::{self, BufRead, Write};

/// Runs one interactive session on stdin/stdout.
pub fn run<C: ConfigProvider>(config: &C) -> Result<usize> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(config, stdin.lock(), stdout.lock())
}

/// Loads the seed data, opens the letters file, drives the console until
/// the user finishes, then flushes the letters. Returns the number of
/// letters written.
pub fn run_session<C, R, W>(config: &C, input: R, output: W) -> Result<usize>
where
    C: ConfigProvider,
    R: BufRead,
    W: Write,
{
    let seed = SeedData::from_file(config.seed_path())?;
    let letters = FileLetterSink::open(config.letters_path(), config.append_letters())?;
    let mut manager = SubscriptionManager::new(seed, letters, config.organization());

    let session = Console::new(&mut manager, input, output)
        .with_reminder_after(config.reminder_after())
        .with_greeting(config.show_greeting())
        .run();

    // letters written before a console failure still reach the file
    let letters_written = manager.letters_written();
    let shutdown = manager.shutdown();
    session?;
    let letters = shutdown?;

    tracing::info!(
        "📁 Session finished, {} letter(s) in {}",
        letters_written,
        letters.path().display()
    );
    Ok(letters_written)
}
