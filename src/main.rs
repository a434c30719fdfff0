use anyhow::Result;
use std::env;

use journalizer::{LexiconExtractor, LogObserver, TransactionBuilder};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: journalizer <transaction text>");
        eprintln!("  e.g. journalizer \"Paid rent for the shop on 1st January 2024, $500\"");
        std::process::exit(1);
    }

    let text = args.join(" ");

    let builder = TransactionBuilder::new(
        Box::new(LexiconExtractor::with_defaults()),
        Box::new(LogObserver),
    );

    let record = builder.build(&text)?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
