use anyhow::Context;
use clap::Parser;
use pangyo_menu_api::{Variant, parse_menu, pdf};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Print the first page of a menu PDF and the parsed week as JSON.
/// Run with RUST_LOG=debug to see raw and filtered lines.
#[derive(Debug, Parser)]
#[command(name = "dump-menu", about = "Dump the parsed weekly menu of a local PDF")]
struct Cli {
    /// Menu PDF to read
    #[arg(default_value = "/tmp/menu.pdf")]
    path: PathBuf,

    /// Sheet layout
    #[arg(value_enum, default_value_t = Variant::Full)]
    variant: Variant,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let layout = cli.variant.layout();

    let bytes = fs::read(&cli.path).with_context(|| format!("Failed to read {:?}", cli.path))?;
    let text = pdf::extract_first_page(&bytes)?;

    println!("=== FIRST PAGE TEXT ===");
    for (i, line) in text.lines().enumerate() {
        if !line.trim().is_empty() {
            println!("{}: {:?}", i, line);
        }
    }

    let menus = parse_menu(&text, &layout);
    println!("{}", serde_json::to_string_pretty(&menus)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_full_layout() {
        let cli = Cli::try_parse_from(["dump-menu"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("/tmp/menu.pdf"));
        assert_eq!(cli.variant, Variant::Full);
    }

    #[test]
    fn accepts_lunch_only_variant() {
        let cli = Cli::try_parse_from(["dump-menu", "week.pdf", "lunch_only"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("week.pdf"));
        assert_eq!(cli.variant, Variant::LunchOnly);
    }

    #[test]
    fn rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["dump-menu", "week.pdf", "lunchonly"]).is_err());
    }
}
