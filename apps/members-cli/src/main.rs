use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use members_directory::config::{MembersDirectoryConfig, MODULE_NAME};
use members_directory::contract::client::DirectoryGateway;
use members_directory::contract::model::{MemberId, MemberPatch, NewMember};
use members_directory::domain::render::DirectoryRender;
use members_directory::domain::role_gate::RoleGate;
use members_directory::domain::viewer::ViewerContext;
use members_directory::infra::{FileRoleFlagStore, HttpDirectoryGateway, InMemoryDirectoryGateway};
use members_directory::DirectoryView;
use runtime::{AppConfig, CliArgs};

/// Members directory - list, search, create and edit organisation members
#[derive(Parser)]
#[command(name = "members-cli")]
#[command(about = "Members directory - list, search, create and edit organisation members")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use a seeded in-memory directory instead of the backend
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List members, optionally filtered by name or email
    List {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Create a member (privileged viewers only)
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Edit an existing member
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.client.home_dir));
    tracing::info!("members-cli starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let module_config = MembersDirectoryConfig::from_module_value(config.module_config(MODULE_NAME))?;

    let action = match cli.command.unwrap_or(Commands::List {
        search: String::new(),
    }) {
        Commands::Check => return check_config(&module_config),
        Commands::List { search } => Action::List { search },
        Commands::Create { name, email } => Action::Create(NewMember { name, email }),
        Commands::Edit { id, name, email } => Action::Edit(MemberId::new(id), MemberPatch { name, email }),
    };

    run(action, &config, &module_config, cli.mock).await
}

/// What to do with the mounted view.
enum Action {
    List { search: String },
    Create(NewMember),
    Edit(MemberId, MemberPatch),
}

fn check_config(module_config: &MembersDirectoryConfig) -> Result<()> {
    let base = module_config.api_base()?;
    let privileged = module_config.privileged()?;
    println!("Configuration OK");
    println!("  backend:         {base}");
    println!("  privileged role: {privileged}");
    println!("  role flag key:   {}", module_config.role_flag_key);
    Ok(())
}

fn build_gateway(module_config: &MembersDirectoryConfig, mock: bool) -> Result<Arc<dyn DirectoryGateway>> {
    if mock {
        tracing::info!("Using in-memory directory");
        return Ok(Arc::new(InMemoryDirectoryGateway::seeded()));
    }
    let gateway = HttpDirectoryGateway::new(module_config.api_base()?, module_config.request_timeout)
        .context("Failed to build HTTP client")?;
    Ok(Arc::new(gateway))
}

async fn run(
    action: Action,
    config: &AppConfig,
    module_config: &MembersDirectoryConfig,
    mock: bool,
) -> Result<()> {
    let gateway = build_gateway(module_config, mock)?;
    let store = FileRoleFlagStore::new(module_config.storage_path(Path::new(&config.client.home_dir)));
    let viewer = ViewerContext::load(&store, &module_config.role_flag_key);
    let view = DirectoryView::new(gateway, RoleGate::new(module_config.privileged()?));

    if let Err(e) = view.mount().await {
        tracing::warn!(error = %e, "Initial fetch failed");
    }

    match action {
        Action::List { search } => view.set_query(search),
        Action::Create(draft) => {
            view.open_create(&viewer)
                .context("Cannot open the create form")?;
            let outcome = view
                .submit_create(draft)
                .await
                .context("Creating member failed")?;
            println!("Created member {}", outcome.member.id);
        }
        Action::Edit(id, patch) => {
            view.open_edit(&id).context("Cannot open the edit form")?;
            let outcome = view
                .submit_edit(&id, patch)
                .await
                .context("Updating member failed")?;
            println!("Updated member {}", outcome.member.id);
        }
    }

    let render = view.render(&viewer);
    print_render(&render);

    match render.fetch_error {
        Some(e) => Err(anyhow!("Directory is out of date: {e}")),
        None => Ok(()),
    }
}

fn print_render(render: &DirectoryRender) {
    if let Some(trigger) = render.create_trigger {
        println!("[{}]", trigger.label);
    }
    if !render.query.is_empty() {
        println!("Search: {}", render.query);
    }
    println!("{:<8} {:<24} {:<28} {:<8}", "ID", "NAME", "EMAIL", "ROLE");
    for row in &render.rows {
        println!(
            "{:<8} {:<24} {:<28} {:<8}",
            row.id.as_str(),
            row.name,
            row.email,
            row.role.tag()
        );
    }
    println!("{} member(s)", render.rows.len());
}
