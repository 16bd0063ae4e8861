// src/main.rs

use clap::Parser;
use tracing::info;

use dream_painter::{
    DreamClient, DreamConfig, DreamRequest, Outcome, classify, validate_input, validate_style,
};

/// Paint a dream: send a dream description to the generation agent and
/// print the illustrated diagnosis, or the agent's guidance when the text
/// is not a dream.
#[derive(Parser, Debug)]
#[command(name = "dream-painter", version)]
struct Args {
    /// The dream description (3-1000 characters)
    #[arg(long)]
    text: String,

    /// Art style: Ghibli, "Van Gogh", Cthulhu, Minimalist, Cyber_Xianxia
    #[arg(long)]
    style: String,

    /// Verbose pipeline logging
    #[arg(long, env = "DREAM_DEBUG_LOGGING")]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = DreamConfig::from_env();
    dream_painter::diagnostics::init(args.debug || config.is_debug());

    // Input-stage failures are field-level feedback, not global notices
    if let Err(e) = validate_input(&args.text) {
        eprintln!("--text: {e}");
        std::process::exit(2);
    }
    let style = match validate_style(Some(&args.style)) {
        Ok(style) => style,
        Err(e) => {
            eprintln!("--style: {e}");
            std::process::exit(2);
        }
    };

    let client = match DreamClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", classify(&e).message);
            std::process::exit(1);
        }
    };

    let request = DreamRequest {
        text: args.text,
        style,
    };

    info!(%style, "generating dream book");
    match client.generate(&request).await {
        Ok(result) => match result.outcome() {
            Outcome::Guide => {
                println!("That doesn't read like a dream. The agent suggests:");
                println!();
                println!("{}", result.advice);
            }
            Outcome::Complete => {
                println!("Your dream book is ready.");
                println!();
                if let Some(url) = &result.image_url {
                    println!("Illustration : {url}");
                }
                if let Some(diagnosis) = &result.diagnosis {
                    println!("Diagnosis    : {diagnosis}");
                }
                println!("Advice       : {}", result.advice);
                if !result.keywords.is_empty() {
                    println!("Keywords     : {}", result.keywords.join(", "));
                }
            }
            Outcome::Malformed => {
                eprintln!("The agent reply came back incomplete, please retry.");
                std::process::exit(1);
            }
        },
        Err(e) => {
            let notice = classify(&e);
            eprintln!("{}", notice.message);
            std::process::exit(1);
        }
    }

    Ok(())
}
