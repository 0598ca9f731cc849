use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use atcd_core::{FamilyHistory, HistoryParagraph, PediatricHistory};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "atcd")]
#[command(about = "Encode, decode and check antecedents paragraphs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON record as its paragraph
    Encode {
        #[arg(long, value_enum)]
        kind: Kind,
        /// Read from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Decode a paragraph into pretty-printed JSON
    Decode {
        #[arg(long, value_enum)]
        kind: Kind,
        /// Read from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Verify that a paragraph is stable under decode then encode
    Check {
        #[arg(long, value_enum)]
        kind: Kind,
        /// Read from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Pediatric,
    Family,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("atcd_cli=info".parse()?)
                .add_directive("atcd_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Encode { kind, input } => encode(kind, &read_input(input.as_ref())?)?,
        Commands::Decode { kind, input } => decode(kind, &read_input(input.as_ref())?)?,
        Commands::Check { kind, input } => check(kind, &read_input(input.as_ref())?)?,
    };
    println!("{output}");

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn encode(kind: Kind, json: &str) -> Result<String> {
    let paragraph = match kind {
        Kind::Pediatric => serde_json::from_str::<PediatricHistory>(json)
            .context("Invalid pediatric record")?
            .to_paragraph(),
        Kind::Family => serde_json::from_str::<FamilyHistory>(json)
            .context("Invalid family record")?
            .to_paragraph(),
    };
    tracing::info!(?kind, len = paragraph.len(), "Encoded paragraph");
    Ok(paragraph)
}

fn decode(kind: Kind, paragraph: &str) -> Result<String> {
    let json = match kind {
        Kind::Pediatric => serde_json::to_string_pretty(&PediatricHistory::from_paragraph(paragraph))?,
        Kind::Family => serde_json::to_string_pretty(&FamilyHistory::from_paragraph(paragraph))?,
    };
    Ok(json)
}

fn normalize(kind: Kind, paragraph: &str) -> String {
    match kind {
        Kind::Pediatric => PediatricHistory::normalize_paragraph(paragraph),
        Kind::Family => FamilyHistory::normalize_paragraph(paragraph),
    }
}

/// Canonical form of the paragraph, or an error when one more
/// decode/encode pass still changes it.
fn check(kind: Kind, paragraph: &str) -> Result<String> {
    let paragraph = paragraph.trim();
    let first = normalize(kind, paragraph);
    let second = normalize(kind, &first);

    if first != second {
        bail!("Paragraph is not stable after re-encoding:\n  {first}\n  {second}");
    }
    if first == paragraph {
        tracing::info!(?kind, "Paragraph is canonical");
    } else {
        tracing::info!(?kind, "Paragraph is stable once normalized");
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_family() {
        let paragraph = encode(Kind::Family, r#"{"consanguinite":"no"}"#).unwrap();
        assert_eq!(paragraph, "Consanguinité: non");
    }

    #[test]
    fn test_encode_rejects_bad_json() {
        let err = encode(Kind::Pediatric, "not json").unwrap_err();
        assert!(err.to_string().contains("Invalid pediatric record"));
    }

    #[test]
    fn test_decode_pretty_json() {
        let json = decode(Kind::Family, "Fratrie: Nombre: 2").unwrap();
        assert_eq!(json, "{\n  \"nombreFratrie\": \"2\"\n}");
    }

    #[test]
    fn test_check_canonical_paragraph() {
        let paragraph = "GROSSESSE ET NAISSANCE: Grossesse suivi. ATCDS MÉDICAUX: Asthme\n";
        assert_eq!(
            check(Kind::Pediatric, paragraph).unwrap(),
            "GROSSESSE ET NAISSANCE: Grossesse suivi. ATCDS MÉDICAUX: Asthme"
        );
    }

    #[test]
    fn test_check_normalizes_hand_edited_paragraph() {
        let paragraph = "Père: Profession: ingénieur, senior";
        assert_eq!(check(Kind::Family, paragraph).unwrap(), "Père: Profession: ingénieur");
    }
}
