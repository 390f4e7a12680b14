use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use ums_console::cli::{access, tenant, units};
use ums_console::logging::init_tracing;
use ums_console::state::init_app_state;
use ums_models::ids::FacultyId;
use ums_models::platforms::PlatformApp;

#[derive(Parser)]
#[command(name = "ums-console")]
#[command(about = "UMS Console - Tenant administration for a University Management System", long_about = None)]
struct Cli {
    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the institution summary
    Intro,
    /// Manage faculties
    Faculties {
        #[command(subcommand)]
        command: FacultyCommands,
    },
    /// Manage schools
    Schools {
        #[command(subcommand)]
        command: SchoolCommands,
    },
    /// Manage certification programs
    Programs {
        #[command(subcommand)]
        command: ProgramCommands,
    },
    /// App access and desktop offices
    Platforms {
        #[command(subcommand)]
        command: PlatformCommands,
    },
    /// Enabled UMS modules
    Modules {
        #[command(subcommand)]
        command: ModuleCommands,
    },
    /// Roles and their permissions
    Roles {
        #[command(subcommand)]
        command: RoleCommands,
    },
    /// Permanently delete the institution
    DeleteTenant,
}

#[derive(Subcommand)]
enum FacultyCommands {
    List,
    Create {
        name: String,

        /// Manual code (2-4 letters); derived from the name when omitted
        #[arg(short = 'c', long)]
        code: Option<String>,

        /// Length of the derived code
        #[arg(long, default_value = "3", value_parser = clap::value_parser!(u8).range(2..=4))]
        code_length: u8,

        #[arg(short = 'd', long)]
        description: Option<String>,

        #[arg(long)]
        dean: Option<String>,
    },
    Delete {
        /// Position in `faculties list`
        position: usize,
    },
}

#[derive(Subcommand)]
enum SchoolCommands {
    List {
        /// Only schools of this faculty
        #[arg(short = 'f', long)]
        faculty: Option<FacultyId>,
    },
}

#[derive(Subcommand)]
enum ProgramCommands {
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum AppArg {
    Teacher,
    Student,
}

impl From<AppArg> for PlatformApp {
    fn from(arg: AppArg) -> Self {
        match arg {
            AppArg::Teacher => PlatformApp::TeacherApp,
            AppArg::Student => PlatformApp::StudentApp,
        }
    }
}

#[derive(Subcommand)]
enum PlatformCommands {
    Show,
    Enable {
        app: AppArg,
    },
    Disable {
        app: AppArg,
    },
    /// Toggle desktop access for an office, e.g. `finance_office`
    Office {
        office: String,
    },
}

#[derive(Subcommand)]
enum ModuleCommands {
    List,
    /// Toggle one or more modules, e.g. `library hostel`
    Toggle {
        #[arg(required = true)]
        modules: Vec<String>,
    },
}

#[derive(Subcommand)]
enum RoleCommands {
    List,
    /// Show or change a role's permissions
    Permissions {
        /// Position in `roles list`
        position: usize,

        /// Permission names or categories to grant
        #[arg(long, value_delimiter = ',')]
        grant: Vec<String>,

        /// Permission names or categories to revoke
        #[arg(long, value_delimiter = ',')]
        revoke: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let state = init_app_state()?;
    let _guards = init_tracing(&state.console_config.log_dir)?;
    let yes = cli.yes;

    match cli.command {
        Commands::Intro => tenant::show_intro(&state).await,
        Commands::Faculties { command } => match command {
            FacultyCommands::List => units::list_faculties(&state).await,
            FacultyCommands::Create {
                name,
                code,
                code_length,
                description,
                dean,
            } => {
                units::create_faculty(
                    &state,
                    name,
                    code,
                    usize::from(code_length),
                    description,
                    dean,
                )
                .await
            }
            FacultyCommands::Delete { position } => {
                units::delete_faculty(&state, position, yes).await
            }
        },
        Commands::Schools {
            command: SchoolCommands::List { faculty },
        } => units::list_schools(&state, faculty).await,
        Commands::Programs {
            command: ProgramCommands::List,
        } => units::list_programs(&state).await,
        Commands::Platforms { command } => match command {
            PlatformCommands::Show => access::show_platforms(&state).await,
            PlatformCommands::Enable { app } => access::set_app(&state, app.into(), true, yes).await,
            PlatformCommands::Disable { app } => {
                access::set_app(&state, app.into(), false, yes).await
            }
            PlatformCommands::Office { office } => access::toggle_office(&state, &office).await,
        },
        Commands::Modules { command } => match command {
            ModuleCommands::List => access::list_modules(&state).await,
            ModuleCommands::Toggle { modules } => access::toggle_modules(&state, &modules).await,
        },
        Commands::Roles { command } => match command {
            RoleCommands::List => access::list_roles(&state).await,
            RoleCommands::Permissions {
                position,
                grant,
                revoke,
            } => access::role_permissions(&state, position, &grant, &revoke).await,
        },
        Commands::DeleteTenant => tenant::delete_tenant(&state).await,
    }
}
