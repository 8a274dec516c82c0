//! Interactive question loop over stdin.

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::{App, EMPTY_CORPUS_ADVISORY};

/// Input that ends the loop.
const QUIT_COMMANDS: &[&str] = &["quit", "exit", ":q"];

/// Read questions line by line until EOF or a quit command.
///
/// `refresh` refetches every source and starts a new conversation.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be flushed.
pub(crate) async fn run(app: &App) -> anyhow::Result<()> {
    let mut session = app.session().await;
    let corpus = session.corpus().await;
    if corpus.is_empty() {
        eprintln!("{EMPTY_CORPUS_ADVISORY}");
    } else {
        println!("Loaded {} articles. Ask me anything, or type `help`.", corpus.len());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&query.to_lowercase().as_str()) {
            break;
        }

        if query.eq_ignore_ascii_case("refresh") {
            let corpus = session.refresh().await;
            if corpus.is_empty() {
                eprintln!("{EMPTY_CORPUS_ADVISORY}");
            } else {
                println!("Refreshed: {} articles loaded.", corpus.len());
            }
            continue;
        }

        println!("{}\n", session.ask(query).await);
    }

    tracing::debug!(turns = session.history().len(), "chat ended");
    Ok(())
}
