use photo_lookup::utils::display::DisplayFormatter;
use photo_lookup::{Config, LookupOutcome, PhotoService};
use std::error::Error;
use std::io::{self, Write};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photo_lookup=info".into()),
        )
        .init();

    info!("Starting photo lookup");

    let config = Config::from_env();
    debug!(
        "Photo endpoint: {}, gallery endpoint: {}, cache ttl: {:?}",
        config.photo_api_url, config.gallery_api_url, config.cache_ttl
    );

    let service = PhotoService::from_config(&config);
    let display = DisplayFormatter::new();
    service.preload().await;

    print_help();

    let mut current_url: Option<String> = None;
    let mut input = String::new();
    loop {
        input.clear();
        print!("> ");
        io::stdout().flush()?;
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "exit" => {
                debug!("Received exit command");
                break;
            }
            "help" => print_help(),
            "download" => println!("{}", display.format_download(current_url.as_deref())),
            "gallery" | "gallery html" => {
                let html = input.trim().ends_with("html");
                println!("Loading photos...");
                match service.fetch_gallery().await {
                    Ok(records) if html => println!("{}", display.format_gallery_html(&records)),
                    Ok(records) => println!("{}", display.format_gallery_table(&records)),
                    Err(e) => {
                        error!(status = ?e.status(), "Gallery load error: {}", e);
                        println!("{}", display.format_error(e));
                    }
                }
            }
            code => {
                println!("Searching...");
                match service.find_photo(code).await {
                    Ok(LookupOutcome::Found { code, record }) => {
                        current_url = record.download_url.clone();
                        println!("{}", display.format_photo_found(&code, &record));
                    }
                    Ok(LookupOutcome::NotFound { code, .. }) => {
                        println!("{}", display.format_not_found(&code));
                    }
                    Err(e) => {
                        error!(status = ?e.status(), "Search failed: {}", e);
                        println!("{}", display.format_error(e));
                    }
                }
            }
        }
    }

    info!("Shutting down");
    Ok(())
}

fn print_help() {
    println!("=== Photo Lookup ===");
    println!("Commands:");
    println!("  <photo code> - Find a photo by its code");
    println!("  download     - Show the link of the last photo found");
    println!("  gallery      - List the gallery");
    println!("  gallery html - Print the gallery as HTML cards");
    println!("  help         - Show this list");
    println!("  exit         - Exit the program");
}
