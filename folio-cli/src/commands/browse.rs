//! Interactive browse loop

use super::Context;
use anyhow::Result;
use folio_core::controller::render_saved;
use folio_core::{BookCache, BookSource, PageState, Summarizer, ViewController};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  search <id>   Look up a book by id
  summary       Generate an LLM analysis of the current book
  back          Back to the book content
  exit          Exit the current book
  saved         List saved books
  clear         Clear saved books
  help          Show this help
  quit          Leave folio";

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Search(String),
    Summary,
    Back,
    Exit,
    Saved,
    Clear,
    Help,
    Quit,
}

/// Parse a command line; `None` for blank lines
fn parse_action(line: &str) -> std::result::Result<Option<Action>, String> {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    let action = match command.to_lowercase().as_str() {
        "" => return Ok(None),
        "search" | "s" => Action::Search(arg.to_string()),
        "summary" | "analysis" => Action::Summary,
        "back" => Action::Back,
        "exit" => Action::Exit,
        "saved" | "list" => Action::Saved,
        "clear" => Action::Clear,
        "help" | "?" => Action::Help,
        "quit" | "q" => Action::Quit,
        other => return Err(format!("Unknown command: {} (try \"help\")", other)),
    };
    Ok(Some(action))
}

fn prompt() -> Result<()> {
    print!("folio> ");
    std::io::stdout().flush()?;
    Ok(())
}

/// Run one search, showing the loading page while the fetch is in flight
async fn search<C: BookCache, S: BookSource>(
    controller: &mut ViewController<C>,
    source: &S,
    input: String,
) {
    controller.set_input(input);
    if let Some(pending) = controller.begin_search() {
        println!("{}", controller.render());
        let result = source.fetch(pending.book_id()).await;
        controller.complete_fetch(pending, result);
    }
}

async fn summarize<C: BookCache, S: Summarizer>(
    controller: &mut ViewController<C>,
    summarizer: &S,
) -> bool {
    let showing_analysis = controller.state().summary().is_some();
    if !matches!(controller.state(), PageState::Loaded { .. }) {
        println!("Load a book first with \"search <id>\".");
        return false;
    }
    if showing_analysis {
        println!("Already showing the analysis; \"back\" returns to the book.");
        return false;
    }

    println!("(GENERATING ANALYSIS ... )");
    controller.request_summary(summarizer).await;
    true
}

/// Clear saved books, reporting a failed write instead of ending the session
fn clear_saved<C: BookCache>(controller: &mut ViewController<C>) -> String {
    match controller.clear_saved() {
        Ok(()) => "No saved books yet!".to_string(),
        Err(e) => format!("ERROR: {}", e),
    }
}

/// Browse books interactively
pub async fn browse(ctx: &Context) -> Result<()> {
    let mut controller = ctx.controller()?;
    let client = ctx.client();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Project Gutenberg Browser\n");
    println!("Saved Books:\n{}\n", render_saved(controller.saved()));
    println!("{}", HELP);

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let action = match parse_action(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match action {
            Action::Search(input) => search(&mut controller, &client, input).await,
            Action::Summary => {
                if !summarize(&mut controller, &client).await {
                    continue;
                }
            }
            Action::Back => {
                if !controller.back_to_content() {
                    println!("Nothing to go back from.");
                    continue;
                }
            }
            Action::Exit => {
                if !controller.exit() {
                    println!("No book is open.");
                }
                continue;
            }
            Action::Saved => {
                println!("{}", render_saved(controller.saved()));
                continue;
            }
            Action::Clear => {
                println!("{}", clear_saved(&mut controller));
                continue;
            }
            Action::Help => {
                println!("{}", HELP);
                continue;
            }
            Action::Quit => break,
        }

        println!("{}", controller.render());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::cache::CacheResult;
    use folio_core::error::CacheError;
    use folio_core::{Book, BookId, MetadataEntry};

    /// Cache whose backing storage refuses every write
    struct ReadOnlyCache {
        entries: Vec<MetadataEntry>,
    }

    impl BookCache for ReadOnlyCache {
        fn list(&self) -> &[MetadataEntry] {
            &self.entries
        }

        fn get(&self, _id: BookId) -> Option<Book> {
            None
        }

        fn put(&mut self, _id: BookId, _book: &Book) -> CacheResult<bool> {
            Err(CacheError::Rejected("storage is read-only".to_string()))
        }

        fn clear(&mut self) -> CacheResult<()> {
            Err(CacheError::Rejected("storage is read-only".to_string()))
        }
    }

    #[test]
    fn test_parse_search() {
        assert_eq!(
            parse_action("search 1234"),
            Ok(Some(Action::Search("1234".to_string())))
        );
        assert_eq!(
            parse_action("  S   84  "),
            Ok(Some(Action::Search("84".to_string())))
        );
        assert_eq!(parse_action("search"), Ok(Some(Action::Search(String::new()))));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_action("summary"), Ok(Some(Action::Summary)));
        assert_eq!(parse_action("BACK"), Ok(Some(Action::Back)));
        assert_eq!(parse_action("exit"), Ok(Some(Action::Exit)));
        assert_eq!(parse_action("saved"), Ok(Some(Action::Saved)));
        assert_eq!(parse_action("clear"), Ok(Some(Action::Clear)));
        assert_eq!(parse_action("?"), Ok(Some(Action::Help)));
        assert_eq!(parse_action("q"), Ok(Some(Action::Quit)));
    }

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!(parse_action("   "), Ok(None));
        assert!(parse_action("fly").unwrap_err().contains("Unknown command"));
    }

    #[test]
    fn test_clear_failure_is_reported() {
        let mut controller = ViewController::new(ReadOnlyCache {
            entries: Vec::new(),
        });

        let message = clear_saved(&mut controller);
        assert_eq!(message, "ERROR: storage is read-only");
    }

    #[test]
    fn test_clear_success() {
        let mut controller = ViewController::new(folio_core::MemoryCache::in_memory());
        assert_eq!(clear_saved(&mut controller), "No saved books yet!");
    }
}
