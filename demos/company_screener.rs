use company_screener::llm::{load_card_image, GeminiClient};
use company_screener::{render_search_state, CompanyGateway, ScreenerConfig, Screener};
use dotenv::dotenv;
use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

fn read_line(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn print_help() {
    println!("Commands:");
    println!("  search        look up a company (prompts for name and address)");
    println!("  scan <path>   pre-fill the form from a business card image");
    println!("  json          print the last result as JSON");
    println!("  quit          exit");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let config = ScreenerConfig::from_env();
    if !config.has_api_key() {
        println!("⚠️  GEMINI_API_KEY is not set; lookups will fail with an API key error.");
    }

    let gateway = CompanyGateway::new(GeminiClient::from_config(&config));
    let mut screener = Screener::new();

    println!("🏢 Company Information Screener ({})", config.model);
    print_help();
    println!("------------------------------------------------------------------");

    loop {
        screener.clear_expired_banner(Instant::now());
        if let Some(banner) = screener.banner(Instant::now()) {
            eprintln!("❌ {}", banner);
        }

        let command = read_line("> ")?;
        let (verb, arg) = match command.split_once(' ') {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (command.as_str(), ""),
        };

        match verb {
            "quit" | "exit" => break,
            "" => continue,
            "help" => print_help(),
            "scan" => {
                if arg.is_empty() {
                    eprintln!("❌ Usage: scan <path to image>");
                    continue;
                }
                let image = match load_card_image(Path::new(arg)).await {
                    Ok(image) => image,
                    Err(e) => {
                        eprintln!("❌ {}", e);
                        continue;
                    }
                };
                println!("📇 Reading business card...");
                if let Err(e) = screener.scan_card(&gateway, &image).await {
                    eprintln!("❌ {}", e);
                    continue;
                }
                if screener.banner(Instant::now()).is_none() {
                    println!(
                        "✅ Form pre-filled: {} / {}",
                        screener.form.company_name, screener.form.company_address
                    );
                }
            }
            "search" => {
                let name = read_line(&format!(
                    "Company Name [{}]: ",
                    screener.form.company_name
                ))?;
                if !name.is_empty() {
                    screener.set_company_name(name);
                }
                let address = read_line(&format!(
                    "Company Address (Optional) [{}]: ",
                    screener.form.company_address
                ))?;
                if !address.is_empty() {
                    screener.set_company_address(address);
                }

                println!("\nSearching...");
                let state = screener.search(&gateway).await;
                println!("\n{}", render_search_state(state));
                println!("------------------------------------------------------------------");
            }
            "json" => match screener.result() {
                Some(profile) => println!("{}", serde_json::to_string_pretty(profile)?),
                None => println!("No result yet."),
            },
            other => eprintln!("❌ Unknown command: {}", other),
        }
    }

    Ok(())
}
