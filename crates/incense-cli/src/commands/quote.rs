use chrono::NaiveDate;
use clap::Subcommand;
use incense_core::{archive, quote_for, quote_of_the_day, Quote, SystemClock};

#[derive(Subcommand)]
pub enum QuoteAction {
    /// Today's quote
    Today {
        /// Use this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Every quote, in selection order
    Archive {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_quote(quote: &Quote) {
    println!("\"{}\"\n    -- {}", quote.text, quote.author);
}

pub fn run(action: QuoteAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuoteAction::Today { date, json } => {
            let quote = match date {
                Some(date) => quote_for(date),
                None => quote_of_the_day(&SystemClock),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(quote)?);
            } else {
                print_quote(quote);
            }
        }
        QuoteAction::Archive { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(archive())?);
            } else {
                for (i, quote) in archive().iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    print_quote(quote);
                }
            }
        }
    }
    Ok(())
}
