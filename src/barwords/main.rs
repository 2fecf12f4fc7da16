use barwords::api::{BarwordsApi, BarwordsPaths, CmdMessage, ConfigAction, MessageLevel};
use barwords::config::{self, BarwordsConfig};
use barwords::error::{BarwordsError, Result};
use barwords::layout::Layout;
use barwords::protocol::{ConversionRequest, ConversionResponse};
use barwords::store::fs::FileStore;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands, LayoutCommands, WordCommands};

const HOME_ENV: &str = "BARWORDS_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: BarwordsApi<FileStore>,
    dictionary_path: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Encode { words, layout } => handle_encode(&mut ctx, words, layout),
        Commands::Decode { barcode, layout } => handle_decode(&mut ctx, barcode, layout),
        Commands::Convert { input } => handle_convert(&mut ctx, input),
        Commands::Layouts(cmd) => match cmd {
            LayoutCommands::List => handle_layouts_list(&ctx),
            LayoutCommands::Show { name } => handle_layouts_show(&ctx, &name),
            LayoutCommands::Import { file } => handle_layouts_import(&mut ctx, &file),
            LayoutCommands::Delete { name } => handle_layouts_delete(&mut ctx, &name),
        },
        Commands::Words(WordCommands::Build {
            input,
            output,
            min_length,
            max_words,
        }) => handle_words_build(&ctx, &input, output, min_length, max_words),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
        Commands::Init => handle_init(&mut ctx),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_home(cli: &Cli) -> Result<PathBuf> {
    if let Some(home) = &cli.home {
        return Ok(home.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "barwords", "barwords")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| BarwordsError::Api("Could not determine data dir".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let home = resolve_home(cli)?;
    let config = BarwordsConfig::load(&home)?;

    let store = FileStore::open(config.layouts_path(&home))?;
    let dictionary_path = config.dictionary_path(&home);
    let api = BarwordsApi::new(store, BarwordsPaths::new(home));

    Ok(AppContext {
        api,
        dictionary_path,
    })
}

fn handle_encode(ctx: &mut AppContext, words: Vec<String>, layout: Option<String>) -> Result<()> {
    ctx.api.load_dictionary(&ctx.dictionary_path)?;
    let result = ctx.api.encode(layout.as_deref(), &words)?;
    if let Some(barcode) = &result.barcode {
        println!("{}", barcode);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_decode(ctx: &mut AppContext, barcode: String, layout: Option<String>) -> Result<()> {
    ctx.api.load_dictionary(&ctx.dictionary_path)?;
    let result = ctx.api.decode(layout.as_deref(), &barcode)?;
    for word in &result.words {
        println!("{}", word);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_convert(ctx: &mut AppContext, input: Option<PathBuf>) -> Result<()> {
    let body = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            body
        }
    };

    let response = match serde_json::from_str::<ConversionRequest>(&body) {
        Ok(request) => match ctx.api.load_dictionary(&ctx.dictionary_path) {
            Ok(_) => ctx.api.handle(&request),
            Err(e) => ConversionResponse::from(e),
        },
        Err(e) => ConversionResponse::from(BarwordsError::Api(format!(
            "Invalid request body: {}",
            e
        ))),
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_layouts_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_layouts()?;
    for layout in &result.layouts {
        println!(
            "{:<24} {:>3} chars  {} rules",
            layout.name().bold(),
            layout.total_length(),
            layout.rules().len()
        );
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_layouts_show(ctx: &AppContext, name: &str) -> Result<()> {
    let result = ctx.api.show_layout(name)?;
    for layout in &result.layouts {
        print_layout(layout);
    }
    Ok(())
}

fn handle_layouts_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)?;
    let result = ctx.api.import_layouts(&json)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_layouts_delete(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.delete_layout(name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_words_build(
    ctx: &AppContext,
    input: &Path,
    output: Option<PathBuf>,
    min_length: Option<usize>,
    max_words: Option<usize>,
) -> Result<()> {
    let result = ctx.api.build_words(input, output, min_length, max_words)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if let Some(cfg) = &result.config {
        if result.messages.is_empty() {
            for key in config::KEYS {
                if let Some(value) = cfg.get(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn print_layout(layout: &Layout) {
    println!(
        "{} ({} characters)",
        layout.name().bold(),
        layout.total_length()
    );
    let mut offset = 0;
    for rule in layout.rules() {
        let span = format!("{:>3}..{:<3}", offset, offset + rule.length());
        let line = format!("  {}  {}", span, rule);
        if rule.maps_to_word() {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
        offset += rule.length();
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
