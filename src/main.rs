//! `spoken` - print a scripture passage from the local archives.
//!
//! Usage: spoken <reference> [translation] [--json]

use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use spoken::bible::PassageReference;
use spoken::config::Config;
use spoken::locator::ArchiveLocator;
use spoken::services::scripture::{TextSource, UsfmZipSource};
use spoken::types::{TranslationCode, Verse};
use spoken::usfm::CancelToken;

const USAGE: &str = "Usage: spoken <reference> [translation] [--json]";

/// Superscript digit mapping
const SUPERSCRIPT_DIGITS: &[char] = &['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Convert a verse number to superscript Unicode characters
fn to_superscript(n: u32) -> String {
    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter_map(|d| SUPERSCRIPT_DIGITS.get(d as usize).copied())
        .collect()
}

/// Plain-text layout: prose verses run together, poetry verses get their own
/// indented line, and a blank line separates paragraphs.
fn render_plain(verses: &[Verse]) -> String {
    fn flush(out: &mut String, prose: &mut String) {
        if !prose.is_empty() {
            out.push_str(prose);
            out.push('\n');
            prose.clear();
        }
    }

    let mut out = String::new();
    let mut prose = String::new();
    for (i, verse) in verses.iter().enumerate() {
        if verse.is_new_paragraph && i > 0 {
            flush(&mut out, &mut prose);
            out.push('\n');
        }
        let numbered = format!("{}{}", to_superscript(verse.number), verse.text);
        if verse.is_poetry {
            flush(&mut out, &mut prose);
            out.push_str(&"  ".repeat(usize::from(verse.poetry_level)));
            out.push_str(&numbered);
            out.push('\n');
        } else {
            if !prose.is_empty() {
                prose.push(' ');
            }
            prose.push_str(&numbered);
        }
    }
    flush(&mut out, &mut prose);
    out
}

struct Args {
    reference: String,
    translation: Option<String>,
    json: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Option<Args> {
    let (flags, positional): (Vec<String>, Vec<String>) =
        args.into_iter().partition(|a| a.starts_with("--"));
    let json = flags.iter().any(|f| f == "--json");
    let mut positional = positional.into_iter();
    let reference = positional.next()?;
    Some(Args { reference, translation: positional.next(), json })
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let translation = args
        .translation
        .map_or_else(|| config.default_translation.clone(), TranslationCode::new);

    let reference: PassageReference = args.reference.parse()?;
    let source = UsfmZipSource::new(ArchiveLocator::from_config(&config));
    let verses: Vec<Verse> = source
        .verses(translation.as_str(), &reference, CancelToken::new())
        .collect();

    if args.json {
        for verse in &verses {
            println!("{}", serde_json::to_string(verse)?);
        }
    } else {
        println!("{reference} ({translation})\n");
        print!("{}", render_plain(&verses));
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
