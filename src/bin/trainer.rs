use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dialoguer::{Input, Select};

use preflop_trainer::trainer::{
    config::AdvisorConfig,
    helpers::{
        accuracy_str, action_label, chart_header, chart_rows, feedback_message, hand_str, localized,
    },
    Action, Advisor, Locale, OfflineAdvisor, Position, Trainer, TrainerConfig,
};

/// Drill 6-max preflop decisions in the terminal.
#[derive(Parser, Debug)]
#[command(name = "preflop-trainer", version)]
struct Args {
    /// JSON config file; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Starting seat (UTG, MP, CO, BTN, SB, BB).
    #[arg(long)]
    position: Option<Position>,
    /// Seed for reproducible deals.
    #[arg(long)]
    seed: Option<u64>,
    /// Display language (en, zh).
    #[arg(long)]
    locale: Option<Locale>,
    /// JSON range chart replacing the built-in one.
    #[arg(long)]
    ranges: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<TrainerConfig> {
        let mut config = match &self.config {
            Some(path) => TrainerConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => TrainerConfig::default(),
        };
        if let Some(position) = self.position {
            config.position = position;
        }
        if let Some(seed) = self.seed {
            config.rng_seed = Some(seed);
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(ranges) = self.ranges {
            config.ranges = Some(ranges);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Args::parse().into_config()?;
    let mut trainer = Trainer::new(&config).context("starting trainer")?;
    let advisor = advisor(&config.advisor);

    show_hand(&trainer);
    loop {
        let input: String = Input::new()
            .with_prompt(prompt(&trainer))
            .allow_empty(true)
            .report(false)
            .interact_text()?;
        match input.trim().to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => break,
            "" | "n" => match trainer.next_hand() {
                Some(_) => show_hand(&trainer),
                None => println!(
                    "{}",
                    localized(trainer.locale(), "Decide on this hand first.", "请先对这手牌做出决定。")
                ),
            },
            "p" => {
                let position = choose_position(trainer.position())?;
                trainer.select_position(position);
                show_hand(&trainer);
            }
            "s" => show_stats(&trainer),
            "g" => show_chart(&trainer),
            "a" => match trainer.advice(advisor.as_ref()) {
                Some(text) => println!("\n{}\n", text),
                None => println!(
                    "{}",
                    localized(trainer.locale(), "Decide first, then ask.", "请先做出决定，再请求讲解。")
                ),
            },
            key => match key.parse::<Action>() {
                Ok(action) => match trainer.decide(action) {
                    Some(feedback) => println!(
                        "{}",
                        feedback_message(&feedback, trainer.position(), trainer.locale())
                    ),
                    None => println!(
                        "{}",
                        localized(trainer.locale(), "Already graded. Press Enter for the next hand.", "本手已评分，按回车发下一手。")
                    ),
                },
                Err(e) => println!("{}", e),
            },
        }
    }
    Ok(())
}

fn advisor(config: &AdvisorConfig) -> Box<dyn Advisor> {
    #[cfg(feature = "gemini")]
    {
        let gemini = preflop_trainer::trainer::GeminiAdvisor::new(config);
        if gemini.has_credential() {
            return Box::new(gemini);
        }
        log::warn!("{} is not set; coaching is offline", config.api_key_env);
    }
    #[cfg(not(feature = "gemini"))]
    let _ = config;
    Box::new(OfflineAdvisor)
}

fn prompt(trainer: &Trainer) -> String {
    let locale = trainer.locale();
    let position = trainer.position();
    let keys = format!(
        "f {} / o {} / r {}",
        action_label(Action::Fold, position, locale),
        action_label(Action::Open, position, locale),
        action_label(Action::ThreeBet, position, locale),
    );
    format!("{} | n p s g a q", keys)
}

fn show_hand(trainer: &Trainer) {
    let position = trainer.position();
    if let Some(hand) = trainer.hand() {
        let stats = trainer.stats(position);
        println!(
            "\n{:<16} {}  ({})   {} {}  streak {}",
            position.full_name(),
            hand_str(hand),
            hand,
            stats.total,
            accuracy_str(stats),
            stats.streak,
        );
    }
}

fn choose_position(current: Position) -> anyhow::Result<Position> {
    let names = Position::ALL.map(|p| p.full_name());
    let selection = Select::new()
        .with_prompt("Position")
        .report(false)
        .items(&names)
        .default(current.index())
        .interact()?;
    Ok(Position::ALL[selection])
}

fn show_stats(trainer: &Trainer) {
    let locale = trainer.locale();
    println!();
    for position in Position::ALL {
        let stats = trainer.stats(position);
        println!(
            "{:<4} {:>4}/{:<4} {:>5}  streak {}",
            position,
            stats.correct,
            stats.total,
            accuracy_str(stats),
            stats.streak,
        );
    }
    let position = trainer.position();
    for mistake in trainer.stats(position).mistakes.iter().take(5) {
        println!(
            "  {:<4} {} -> {}",
            mistake.hand,
            action_label(mistake.chosen, position, locale),
            action_label(mistake.correct, position, locale),
        );
    }
    println!();
}

fn show_chart(trainer: &Trainer) {
    let position = trainer.position();
    let current = trainer.hand().map(|h| h.label());
    println!("\n{}", chart_header(trainer.table(), position, trainer.locale()));
    for row in chart_rows(trainer.table(), position, current) {
        println!("{}", row);
    }
    println!();
}
