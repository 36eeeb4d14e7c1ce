use clap::Parser;
use secretvault::cli::{commands, load_settings, output, App, Cli, Commands};
use secretvault::errors::Result;

fn main() {
    let cli = Cli::parse();
    secretvault::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => with_app(&cli, commands::init::execute),
        Commands::List { ref entry_type } => {
            with_app(&cli, |app| commands::list::execute(app, entry_type.as_deref()))
        }
        Commands::Show {
            ref id,
            reveal,
            ref copy,
        } => with_app(&cli, |app| {
            commands::show::execute(app, id, reveal, copy.as_deref())
        }),
        Commands::Add {
            ref entry_type,
            ref title,
            ref fields,
            generate_password,
        } => with_app(&cli, |app| {
            commands::add::execute(app, entry_type, title.as_deref(), fields, generate_password)
        }),
        Commands::Edit {
            ref id,
            ref title,
            ref fields,
        } => with_app(&cli, |app| {
            commands::edit::execute(app, id, title.as_deref(), fields)
        }),
        Commands::Delete { ref id, force } => {
            with_app(&cli, |app| commands::delete::execute(app, id, force))
        }
        Commands::Backup => with_app(&cli, commands::backup::execute),
        Commands::Restore => with_app(&cli, commands::restore::execute),
        Commands::Generate { length } => {
            load_settings(&cli).and_then(|s| commands::generate::execute(&s, length))
        }
        Commands::Version => commands::version::execute(),
        Commands::Completions { ref shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Run a vault command, then wait for any queued backup to finish.
fn with_app(cli: &Cli, command: impl FnOnce(&App) -> Result<()>) -> Result<()> {
    let app = App::from_cli(cli)?;
    let result = command(&app);
    app.finish();
    result
}
