use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scriptsmith::{Created, Project};
use scriptsmith::app::App;
use scriptsmith::cli::{Cli, Commands, ScriptArgs};
use scriptsmith::ui::render_app;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.command.is_some())?;

    let project = Project::new(&cli.assets);
    match &cli.command {
        Some(Commands::Render(args)) => render_once(args),
        Some(Commands::Create(args)) => create_once(&project, args, cli.select.as_deref()),
        None => interactive(project, &cli),
    }
}

fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match log_file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(File::create(path)?)),
        ),
        None => None,
    };
    // The form owns the terminal, so interactive sessions only log to a file.
    let stderr_layer = (to_stderr && file_layer.is_none())
        .then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr));
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "scriptsmith=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;
    Ok(())
}

fn render_once(args: &ScriptArgs) -> Result<(), Box<dyn std::error::Error>> {
    let selection = args.to_selection()?;
    println!("{}", selection.generated());
    Ok(())
}

fn create_once(
    project: &Project,
    args: &ScriptArgs,
    selected: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = args.to_selection()?;
    let created = project.create_script(&selection, selected).inspect_err(|err| {
        error!(error = %err, "create failed");
    })?;
    print_created(&created);
    Ok(())
}

fn interactive(project: Project, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;

    let app = App::new(project, cli.select.clone());
    let result = run_app(terminal, app);

    execute!(io::stdout(), DisableMouseCapture)?;
    ratatui::restore();

    if let Some(created) = result?.created {
        print_created(&created);
    }
    Ok(())
}

fn print_created(created: &Created) {
    if let Some(base) = &created.singleton_base {
        println!("Created {}", base.display());
    }
    println!("Created {}", created.script.display());
}

fn run_app(mut terminal: DefaultTerminal, mut app: App) -> Result<App, Box<dyn std::error::Error>> {
    let tick_rate = Duration::from_millis(100);
    info!(root = %app.project.root().display(), "creator opened");
    loop {
        terminal.draw(|frame| render_app(frame, &mut app))?;

        if app.should_quit {
            break;
        }

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        app.on_key(key);
                    }
                }
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }
    }
    Ok(app)
}
