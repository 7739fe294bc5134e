mod command;
mod config;
mod renderer;
mod session;

use clap::Parser;
use tictactoe_engine::{GameMode, log, logger};

use renderer::TerminalRenderer;
use session::{LocalGameSession, run_local_game};

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Play 3x3 tic-tac-toe in the terminal")]
struct Args {
    /// Overrides the configured mode: pvp or pvb
    #[arg(long)]
    mode: Option<GameMode>,

    /// Path to the YAML config file
    #[arg(long)]
    config: Option<String>,

    /// Writes the effective settings back to the config file
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager = config::get_config_manager(args.config.as_deref());
    let mut cfg = match config_manager.get_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            log!("Failed to load config, using defaults: {}", e);
            config::Config::default()
        }
    };

    if let Some(mode) = args.mode {
        cfg.mode = mode;
    }

    if args.save_config
        && let Err(e) = config_manager.set_config(&cfg)
    {
        log!("Failed to save config: {}", e);
    }

    log!("Starting game in {} mode, bot plays {}", cfg.mode, cfg.bot_mark);

    let mut session = LocalGameSession::new(&cfg);
    session.add_observer(TerminalRenderer::new(std::io::stdout(), cfg.show_indices));

    run_local_game(&mut session).await?;

    log!(
        "Session ended in {} mode, last game: {}",
        session.mode(),
        session.engine().borrow().status()
    );
    Ok(())
}
