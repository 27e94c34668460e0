use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;

use hanyu_review::terminal::run_session;
use hanyu_review::{ClientConfig, LessonApi, RemoteSource, ScreenController};
use review_core::types::ScreenKind;

#[derive(Parser)]
#[command(name = "hanyu-review", version, about = "Review lesson vocabulary and example sentences")]
struct Cli {
    #[arg(short, long, default_value_t = 1, help = "Lesson to open")]
    lesson: i64,

    #[arg(short, long, help = "Review example sentences instead of words")]
    grammar: bool,

    #[arg(short, long, help = "Continue from the lesson the backend last saw")]
    resume: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    hanyu_review::init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    let api = LessonApi::new(&config);

    let mut lesson_id = cli.lesson;
    if cli.resume {
        match api.resume().await {
            Ok(point) => lesson_id = point.lesson_id,
            Err(e) => tracing::warn!(error = %e, "cannot resume, opening lesson {}", lesson_id),
        }
    }

    let kind = if cli.grammar {
        ScreenKind::Grammar
    } else {
        ScreenKind::Vocabulary
    };

    let mut screen = ScreenController::new(
        kind,
        lesson_id,
        RemoteSource::new(api.clone()),
        Arc::new(api),
        config.progress_debounce,
    );
    screen.load().await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_session(&mut screen, stdin, &mut stdout).await
}
