//! CASHOUT: in-play draw bet Hold / Cash Out advisor
//!
//! Entry point. Loads configuration, initialises structured logging and
//! runs the terminal calculator: fill in the fields, get a decision,
//! adjust and recalculate until `:quit`.

use anyhow::Result;
use std::io::{self, IsTerminal};
use tracing::{error, info};

use cashout::config::{self, AppConfig};
use cashout::form::console::{Prompt, PromptAction};
use cashout::form::{FormSession, Outcome};
use cashout::report::{self, OutputFormat, ResultPanel};
use cashout::strategy::{self, DecisionEngine};

const BANNER: &str = r#"
  Draw Bet Decision Calculator
  Enter the in-play stats; blank keeps the last value.
  Commands: :reset  :quit
"#;

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path =
        std::env::var("CASHOUT_CONFIG").unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = AppConfig::load_or_default(&config_path)?;

    init_logging(&cfg);

    let engine = DecisionEngine::new(cfg.policy.resolve()?);
    info!(
        config = %config_path,
        preset = %cfg.policy.preset,
        overrides = cfg.policy.overrides.len(),
        late_game_minute = ?engine.policy().late_game_minute,
        probability_cap = engine.policy().probability_cap,
        "CASHOUT starting up"
    );

    println!("{BANNER}");

    let colour = io::stdout().is_terminal() && cfg.output.format == OutputFormat::Text;
    let mut prompt = Prompt::new(io::stdin().lock(), io::stdout().lock());
    let mut form = FormSession::new();

    loop {
        match prompt.fill(&mut form)? {
            PromptAction::Quit => break,
            PromptAction::Reset => {
                form.reset();
                prompt.show("Fields cleared.")?;
            }
            PromptAction::Calculate => {
                let outcome = form.calculate(&engine).clone();
                let text = match cfg.output.format {
                    OutputFormat::Text if colour => {
                        let panel = ResultPanel::from_outcome(&outcome);
                        panel.tone.paint(&panel.text)
                    }
                    format => report::render(&outcome, format)?,
                };
                prompt.show(&text)?;

                if cfg.output.compare_presets {
                    if let Outcome::Computed(_) = outcome {
                        show_comparison(&mut prompt, &form)?;
                    }
                }
            }
        }
    }

    info!("CASHOUT shut down cleanly.");
    Ok(())
}

/// Print the same snapshot evaluated under every preset.
fn show_comparison<R: io::BufRead, W: io::Write>(
    prompt: &mut Prompt<R, W>,
    form: &FormSession,
) -> Result<()> {
    match cashout::form::parse_snapshot(form).and_then(|s| strategy::compare_presets(&s)) {
        Ok(results) => prompt.show(&report::render_comparison(&results)),
        Err(e) => {
            error!(error = %e, "Preset comparison failed");
            Ok(())
        }
    }
}

/// Initialise the `tracing` subscriber. Logs go to stderr so the result
/// panel on stdout stays readable.
fn init_logging(cfg: &AppConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.filter));

    let json_logging = cfg.logging.json || std::env::var("CASHOUT_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    }
}
