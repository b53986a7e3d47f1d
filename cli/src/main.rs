//! Verity command line: interactive prompt, one-shot checks, batch files.
//!
//! All I/O policy lives here: configuration loading, credential resolution
//! from the environment, result printing, export, and history. The pipeline
//! crates only ever see pre-validated values.

mod export;
mod history;

use anyhow::{Context, bail};
use export::export_result;
use history::History;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;
use verity_config::{AnalyzerMode, ExportFormat, ReasoningProvider, Settings};
use verity_engine::{
    ClaimAnalyzer, EvidenceExtractor, ExtractorConfig, FactChecker, KeywordAnalyzer,
    PipelineConfig, SemanticAnalyzer,
};
use verity_providers::{Provider, ReasoningClient, ReasoningConfig};
use verity_types::{Claim, ClaimOutcome, FactCheckResult};
use verity_wiki::{WikipediaClient, WikipediaConfig};

const USAGE: &str = "verity - fact-check claims against Wikipedia

USAGE:
  verity [OPTIONS] [CLAIM...]

ARGS:
  [CLAIM...]          claim to check once; without one, an interactive
                      prompt starts (quit/exit/q to leave)

OPTIONS:
  --config <FILE>     settings file (default: ./verity.toml)
  --batch <FILE>      check one claim per line from FILE
  --analyzer <MODE>   keyword | semantic (overrides the config file)
  --export [FORMAT]   write each result to the export directory;
                      FORMAT is json | csv (default from config)
  -h, --help          print this help";

const SNIPPET_CHARS: usize = 200;
const MAX_PRINTED_EVIDENCE: usize = 3;

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    batch: Option<PathBuf>,
    analyzer: Option<AnalyzerMode>,
    /// `Some(None)` means export with the config file's default format.
    export: Option<Option<ExportFormat>>,
    claim: Option<String>,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut words = Vec::new();
    let mut iter = args.into_iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--config" => {
                parsed.config = Some(PathBuf::from(required_value(&mut iter, "--config")?));
            }
            "--batch" => {
                parsed.batch = Some(PathBuf::from(required_value(&mut iter, "--batch")?));
            }
            "--analyzer" => {
                parsed.analyzer = Some(
                    required_value(&mut iter, "--analyzer")?
                        .parse()
                        .map_err(anyhow::Error::msg)?,
                );
            }
            "--export" => {
                let format = iter.peek().and_then(|v| v.parse::<ExportFormat>().ok());
                if format.is_some() {
                    iter.next();
                }
                parsed.export = Some(format);
            }
            other if other.starts_with('-') => bail!("unknown option: {other}\n\n{USAGE}"),
            _ => words.push(arg),
        }
    }
    if !words.is_empty() {
        parsed.claim = Some(words.join(" "));
    }
    Ok(parsed)
}

fn required_value(
    iter: &mut impl Iterator<Item = String>,
    flag: &str,
) -> anyhow::Result<String> {
    iter.next()
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value\n\n{USAGE}"))
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("verity=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

struct ExportTarget {
    dir: PathBuf,
    format: ExportFormat,
}

struct App {
    checker: FactChecker<WikipediaClient>,
    analyzer: ClaimAnalyzer,
    history: History,
    export: Option<ExportTarget>,
}

impl App {
    fn build(
        settings: &Settings,
        mode: AnalyzerMode,
        export: Option<Option<ExportFormat>>,
    ) -> anyhow::Result<Self> {
        let wiki_config = WikipediaConfig {
            base_url: Url::parse(settings.wikipedia.base_url())
                .context("invalid wikipedia base_url")?,
            timeout: Duration::from_secs(settings.wikipedia.timeout_seconds()),
            user_agent: settings.wikipedia.user_agent().to_owned(),
        };
        let source = WikipediaClient::new(wiki_config).context("building wikipedia client")?;

        let extractor = EvidenceExtractor::new(ExtractorConfig {
            max_sentences: settings.evidence.max_sentences(),
            min_keyword_length: settings.evidence.min_keyword_length(),
            negation_terms: settings.evidence.negation_terms(),
            negation_window: settings.evidence.negation_window(),
            location_terms: settings.evidence.location_terms(),
        });
        let pipeline = PipelineConfig {
            max_articles: settings.wikipedia.max_articles(),
            confidence_enabled: settings.analyzer.confidence_enabled,
        };

        Ok(Self {
            checker: FactChecker::new(source, extractor, pipeline),
            analyzer: build_analyzer(settings, mode)?,
            history: History::new(
                settings.history.path(),
                settings.history.max_entries(),
            ),
            export: export.map(|format| ExportTarget {
                dir: settings.export.directory(),
                format: format.unwrap_or(settings.export.default_format),
            }),
        })
    }

    /// Post-check bookkeeping; never fatal for the session.
    fn finish(&self, result: &FactCheckResult) {
        if let Err(err) = self.history.record(result) {
            tracing::warn!(error = %err, "failed to record history");
        }
        if let Some(target) = &self.export {
            match export_result(&target.dir, target.format, result) {
                Ok(path) => println!("Exported to {}", path.display()),
                Err(err) => tracing::warn!(error = %err, "export failed"),
            }
        }
    }
}

fn build_analyzer(settings: &Settings, mode: AnalyzerMode) -> anyhow::Result<ClaimAnalyzer> {
    match mode {
        AnalyzerMode::Keyword => Ok(ClaimAnalyzer::Keyword(KeywordAnalyzer::new(
            settings.evidence.min_keyword_length(),
        ))),
        AnalyzerMode::Semantic => {
            let reasoning = &settings.reasoning;
            let (provider, endpoint) = match reasoning.provider {
                ReasoningProvider::OpenAi => {
                    (Provider::OpenAi, reasoning.openai_endpoint.as_deref())
                }
                ReasoningProvider::Ollama => {
                    (Provider::Ollama, reasoning.ollama_endpoint.as_deref())
                }
            };
            // The credential is resolved here and nowhere else.
            let api_key = match provider {
                Provider::OpenAi => {
                    let var = reasoning.api_key_env();
                    Some(std::env::var(var).with_context(|| {
                        format!("the semantic analyzer with openai needs the {var} environment variable")
                    })?)
                }
                Provider::Ollama => None,
            };

            let mut config = ReasoningConfig::new(provider, reasoning.model(), api_key)?
                .with_timeout(Duration::from_secs(reasoning.timeout_seconds()));
            if let Some(endpoint) = endpoint {
                config = config
                    .with_endpoint(Url::parse(endpoint).context("invalid reasoning endpoint")?);
            }
            Ok(ClaimAnalyzer::Semantic(SemanticAnalyzer::new(
                ReasoningClient::new(config)?,
            )))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }
    init_tracing();

    let settings = Settings::load(args.config.as_deref())?;
    let mode = args.analyzer.unwrap_or(settings.analyzer.mode);
    let app = App::build(&settings, mode, args.export)?;

    if let Some(path) = &args.batch {
        run_batch_file(&app, path).await
    } else if let Some(text) = &args.claim {
        run_one_shot(&app, text).await
    } else {
        run_interactive(&app).await
    }
}

async fn run_one_shot(app: &App, text: &str) -> anyhow::Result<()> {
    let claim = Claim::new(text)?;
    let result = app.checker.check(&claim, &app.analyzer).await?;
    print_result(&result);
    app.finish(&result);
    Ok(())
}

async fn run_batch_file(app: &App, path: &Path) -> anyhow::Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading batch file {}", path.display()))?;
    let claims: Vec<Claim> = raw.lines().filter_map(|line| Claim::new(line).ok()).collect();
    if claims.is_empty() {
        bail!("no claims found in {}", path.display());
    }

    let outcomes = app.checker.run_batch(&claims, &app.analyzer, true).await;
    let mut failed = 0;
    for (i, outcome) in outcomes.iter().enumerate() {
        println!("\n[{}/{}] {}", i + 1, outcomes.len(), outcome.claim());
        match outcome {
            ClaimOutcome::Completed(result) => {
                print_result(result);
                app.finish(result);
            }
            ClaimOutcome::Failed(failure) => {
                failed += 1;
                println!("Check failed ({}): {}", failure.kind, failure.message);
            }
        }
    }
    println!(
        "\nDone: {} checked, {failed} failed.",
        outcomes.len() - failed
    );
    Ok(())
}

async fn run_interactive(app: &App) -> anyhow::Result<()> {
    println!("Verity fact checker. Enter a claim, or quit to leave.");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "quit" | "exit" | "q") {
            break;
        }

        let Ok(claim) = Claim::new(input) else {
            continue;
        };
        match app.checker.check(&claim, &app.analyzer).await {
            Ok(result) => {
                print_result(&result);
                app.finish(&result);
            }
            Err(err) => println!("Check failed ({}): {err}", err.kind()),
        }
    }
    Ok(())
}

fn print_result(result: &FactCheckResult) {
    println!("Verdict: {}", result.verdict);
    if let Some(confidence) = result.confidence {
        println!("Confidence: {confidence}%");
    }
    if let Some(explanation) = result.explanation.as_deref().filter(|e| !e.is_empty()) {
        println!("Explanation: {explanation}");
    }
    if !result.evidence.is_empty() {
        println!("Evidence:");
        for sentence in result.evidence.iter().take(MAX_PRINTED_EVIDENCE) {
            println!("  - {}", snippet(&sentence.text));
        }
    }
    if !result.sources.is_empty() {
        println!("Sources:");
        for (i, source) in result.sources.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, source.title, source.url);
        }
    }
}

fn snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_CHARS {
        text.to_owned()
    } else {
        let head: String = text.chars().take(SNIPPET_CHARS).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, parse_args, snippet};
    use verity_config::{AnalyzerMode, ExportFormat};

    fn args(list: &[&str]) -> anyhow::Result<CliArgs> {
        parse_args(list.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn bare_words_become_the_claim() {
        let parsed = args(&["The", "Earth", "is", "round"]).unwrap();
        assert_eq!(parsed.claim.as_deref(), Some("The Earth is round"));
        assert!(parsed.batch.is_none());
    }

    #[test]
    fn flags_are_recognized() {
        let parsed = args(&[
            "--config",
            "custom.toml",
            "--analyzer",
            "semantic",
            "--batch",
            "claims.txt",
        ])
        .unwrap();
        assert_eq!(parsed.config.as_deref().unwrap().to_str(), Some("custom.toml"));
        assert_eq!(parsed.analyzer, Some(AnalyzerMode::Semantic));
        assert_eq!(parsed.batch.as_deref().unwrap().to_str(), Some("claims.txt"));
    }

    #[test]
    fn export_format_is_optional() {
        let explicit = args(&["--export", "csv", "some", "claim"]).unwrap();
        assert_eq!(explicit.export, Some(Some(ExportFormat::Csv)));
        assert_eq!(explicit.claim.as_deref(), Some("some claim"));

        let defaulted = args(&["--export", "some", "claim"]).unwrap();
        assert_eq!(defaulted.export, Some(None));
        assert_eq!(defaulted.claim.as_deref(), Some("some claim"));
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(args(&["--frobnicate"]).is_err());
        assert!(args(&["--config"]).is_err());
    }

    #[test]
    fn snippets_cap_long_text() {
        let long = "a".repeat(300);
        let rendered = snippet(&long);
        assert_eq!(rendered.chars().count(), 203);
        assert!(rendered.ends_with("..."));
        assert_eq!(snippet("short"), "short");
    }
}
