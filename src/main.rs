use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bevy_utils::tracing::{info, warn};
use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tissue_sandbox::content::sqlite::{install_schema, insert_components};
use tissue_sandbox::content::{
    translate, ComponentRepository, SqliteComponentRepository, TranslationOutcome,
};
use tissue_sandbox::core::config::{SandboxConfig, DEFAULT_CONFIG_PATH};
use tissue_sandbox::core::world::{Sandbox, SandboxIntent};
use tissue_sandbox::data::components::{
    builtin_catalog, builtin_components, load_component_catalog, CatalogError, Category,
    ComponentCatalog,
};
use tissue_sandbox::data::lessons::{builtin_lessons, load_lesson_catalog, LessonCatalog};
use tissue_sandbox::data::phrasebook::Phrasebook;
use tissue_sandbox::simulation::lesson::{LessonError, LessonSession};
use tissue_sandbox::simulation::speech::{SpeechRequest, SpeechSink};
use tissue_sandbox::simulation::stack::LayerId;
use tissue_sandbox::simulation::writing::{Point, WritingPad};
use tissue_sandbox::ui::report::{render_catalog, render_report, render_stack};
use tissue_sandbox::ui::theme::{render_theme, Theme};
use tissue_sandbox::ui::tutor::{render_lessons, render_session};

const COMMANDS: &str = "Commands: catalog [category] | place <id>... | remove <layer> | clear | stack | analyze | lessons | lesson <id> | next | answer <n> | translate <text> | say <text> | trace <x,y>... | pad [clear] | theme | help | quit";

#[derive(Parser)]
#[command(name = "tissue-sandbox")]
#[command(version, about = "Layer cells, scaffolds and growth factors and see what grows", long_about = None)]
struct Cli {
    /// Config file (defaults to ./assets/config/sandbox.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON component catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// SQLite content database; takes precedence over --catalog
    #[arg(long)]
    db: Option<PathBuf>,

    /// JSON lesson file
    #[arg(long)]
    lessons: Option<PathBuf>,

    /// Seed for outcome narratives
    #[arg(long)]
    seed: Option<u64>,

    /// Write the built-in catalog to a new content database and exit
    #[arg(long, value_name = "PATH")]
    export_db: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Prints speech requests in place of a synthesizer.
struct ConsoleSpeech;

impl SpeechSink for ConsoleSpeech {
    fn speak(&mut self, request: &SpeechRequest) {
        println!("(speaking {} at {}x) {}", request.lang, request.rate, request.text);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = &cli.export_db {
        return match export_builtin_catalog(path) {
            Ok(()) => {
                println!("Wrote built-in catalog to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Failed to export catalog: {}", err);
                ExitCode::FAILURE
            }
        };
    }

    let config = match &cli.config {
        Some(path) => SandboxConfig::load(path),
        None => {
            info!(path = DEFAULT_CONFIG_PATH, "looking for default config");
            SandboxConfig::load_default()
        }
    };
    let mut config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {}", err);
            return ExitCode::FAILURE;
        }
    };
    apply_overrides(&mut config, &cli);

    let catalog = load_catalog(&config);
    let lessons = load_lessons(&config);
    let mut sandbox = Sandbox::new(catalog, config.seed);

    println!("Tissue Sandbox");
    println!("{}", COMMANDS);
    run_repl(&mut sandbox, &lessons, config.theme);
    ExitCode::SUCCESS
}

fn apply_overrides(config: &mut SandboxConfig, cli: &Cli) {
    if cli.catalog.is_some() {
        config.catalog_path = cli.catalog.clone();
    }
    if cli.db.is_some() {
        config.content_db = cli.db.clone();
    }
    if cli.lessons.is_some() {
        config.lessons_path = cli.lessons.clone();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
}

fn load_catalog(config: &SandboxConfig) -> ComponentCatalog {
    let loaded = if let Some(path) = &config.content_db {
        SqliteComponentRepository::open(path).and_then(|repo| {
            let stats = repo.stats()?;
            info!(
                cells = stats.cells,
                scaffolds = stats.scaffolds,
                growth_factors = stats.growth_factors,
                "content db opened"
            );
            repo.load_catalog()
        })
    } else if let Some(path) = &config.catalog_path {
        load_component_catalog(path)
    } else {
        return builtin_catalog();
    };

    match loaded {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("Failed to load catalog: {}", err);
            warn!("falling back to built-in catalog");
            builtin_catalog()
        }
    }
}

fn load_lessons(config: &SandboxConfig) -> LessonCatalog {
    let Some(path) = &config.lessons_path else {
        return builtin_lessons();
    };
    match load_lesson_catalog(path) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("Failed to load lessons from {}: {}", path.display(), err);
            builtin_lessons()
        }
    }
}

fn export_builtin_catalog(path: &Path) -> Result<(), CatalogError> {
    let conn = Connection::open(path)?;
    install_schema(&conn, env!("CARGO_PKG_VERSION"))?;
    insert_components(&conn, &builtin_components())?;
    Ok(())
}

fn run_repl(sandbox: &mut Sandbox, lessons: &LessonCatalog, mut theme: Theme) {
    let phrasebook = Phrasebook;
    let mut speech = ConsoleSpeech;
    let mut session: Option<LessonSession> = None;
    let mut pad = WritingPad::default();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" => break,
            "help" => println!("{}", COMMANDS),
            "catalog" => {
                if rest.is_empty() {
                    print!("{}", render_catalog(sandbox.catalog(), None));
                } else {
                    match rest.parse::<Category>() {
                        Ok(category) => print!("{}", render_catalog(sandbox.catalog(), Some(category))),
                        Err(err) => println!("{}", err),
                    }
                }
            }
            "place" => {
                if rest.is_empty() {
                    println!("Usage: place <component_id>...");
                    continue;
                }
                let intents = rest
                    .split_whitespace()
                    .map(|id| SandboxIntent::Place {
                        component_id: id.to_string(),
                    })
                    .collect();
                print!("{}", render_stack(&sandbox.tick(intents)));
            }
            "remove" => match rest.trim_start_matches('#').parse::<u32>() {
                Ok(id) => print!("{}", render_stack(&sandbox.remove(LayerId(id)))),
                Err(_) => println!("Usage: remove <layer>"),
            },
            "clear" => print!("{}", render_stack(&sandbox.clear())),
            "stack" => print!("{}", render_stack(&sandbox.snapshot())),
            "analyze" => print!("{}", render_report(&sandbox.analyze())),
            "lessons" => print!("{}", render_lessons(lessons)),
            "lesson" => {
                let lesson = rest.parse::<u32>().ok().and_then(|id| lessons.get(id));
                match lesson {
                    Some(lesson) => {
                        let started = LessonSession::start(lesson.clone());
                        print!("{}", render_session(&started));
                        session = Some(started);
                    }
                    None => println!("Usage: lesson <id> (see `lessons`)"),
                }
            }
            "next" => {
                let Some(active) = session.as_mut() else {
                    println!("No lesson in progress.");
                    continue;
                };
                match active.advance() {
                    Ok(()) => print!("{}", render_session(active)),
                    Err(LessonError::AnswerRequired) => println!("Answer the quiz first: answer <n>"),
                    Err(err) => println!("{}", err),
                }
            }
            "answer" => {
                let Some(active) = session.as_mut() else {
                    println!("No lesson in progress.");
                    continue;
                };
                let Ok(choice) = rest.parse::<usize>() else {
                    println!("Usage: answer <n>");
                    continue;
                };
                match active.answer(choice) {
                    Ok(verdict) => {
                        println!("{}", verdict.message());
                        print!("{}", render_session(active));
                    }
                    Err(err) => println!("{}", err),
                }
            }
            "translate" => match translate(&phrasebook, None, rest) {
                Some(outcome) => {
                    println!("{}", outcome.display());
                    if let TranslationOutcome::Translated {
                        speech: Some(request),
                        ..
                    } = &outcome
                    {
                        speech.speak(request);
                    }
                }
                None => println!("Usage: translate <text>"),
            },
            "say" => match SpeechRequest::mandarin(rest) {
                Some(request) => speech.speak(&request),
                None => println!("Usage: say <text>"),
            },
            "trace" => {
                let points: Option<Vec<Point>> = rest.split_whitespace().map(parse_point).collect();
                match points {
                    Some(points) if !points.is_empty() => {
                        let mut points = points.into_iter();
                        if let Some(start) = points.next() {
                            pad.pen_down(start);
                        }
                        for point in points {
                            pad.pen_move(point);
                        }
                        pad.pen_up();
                        println!("{} stroke(s) on the pad", pad.strokes().len());
                    }
                    _ => println!("Usage: trace <x,y> <x,y>..."),
                }
            }
            "pad" => {
                if rest == "clear" {
                    pad.clear();
                }
                println!("{} stroke(s) on the pad", pad.strokes().len());
            }
            "theme" => {
                theme = theme.toggled();
                println!("{}", render_theme(theme));
            }
            _ => println!("Unknown command: {} (try `help`)", cmd),
        }
    }
}

fn parse_point(raw: &str) -> Option<Point> {
    let (x, y) = raw.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}
