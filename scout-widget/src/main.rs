use std::io::BufRead;
use std::time::Duration;

use anyhow::Result;
use dotenv::dotenv;

use scout_widget::collection::SearchCollection;
use scout_widget::form::{FormEvent, SearchForm};
use scout_widget::transport::SearchClient;
use scout_widget::view::ListView;

/// Line-oriented demo host for the widget: each line is submitted as a
/// search term, `next` loads the next page, an empty line clears.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    // Config via env: SCOUT_SEARCH_URL (default local dev server)
    let endpoint = std::env::var("SCOUT_SEARCH_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000/search".to_string());

    eprintln!("scout demo shell\n  endpoint: {endpoint}\n  type a term to search, `next` for the next page, empty line to clear");

    let collection = SearchCollection::new(SearchClient::new_tcp(), &endpoint);
    let mut events = collection.subscribe();
    let mut view = ListView::new(collection.clone());
    let mut form = SearchForm::new();

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == "next" {
            if !collection.has_next_page() {
                eprintln!("[shell] no further pages");
                continue;
            }
            collection.load_next_page();
        } else {
            form.set_value(&line);
            match form.submit() {
                FormEvent::Search(term) => {
                    view.show_loading_message();
                    collection.perform_search(&term);
                }
                FormEvent::Clear => {
                    view.clear();
                    println!("(cleared)");
                    continue;
                }
            }
        }

        match tokio::time::timeout(Duration::from_secs(10), events.recv()).await {
            Ok(Some(_)) => {
                view.pump();
                println!("{}", view.html());
                if collection.has_next_page() {
                    eprintln!(
                        "[shell] {} of {} results loaded",
                        collection.items().len(),
                        collection.total_count()
                    );
                }
            }
            Ok(None) => break,
            Err(_) => eprintln!("[shell] no response within 10s"),
        }
    }
    Ok(())
}
