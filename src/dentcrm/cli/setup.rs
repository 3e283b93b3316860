use clap::{Args, Parser, Subcommand};
use dentcrm::model::Role;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2026-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "dentcrm", bin_name = "dentcrm", version = get_version())]
#[command(about = "Local patient, inventory and session store for a dental clinic", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides DENTCRM_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a login session
    Login {
        #[arg(long)]
        user_id: String,

        #[arg(long)]
        email: String,

        /// dentist, clinic or other
        #[arg(long)]
        role: Role,

        /// Bearer token issued by the backend
        #[arg(long)]
        token: Option<String>,
    },

    /// Forget the current session
    Logout,

    /// Show the current session
    Whoami,

    /// Patient records
    #[command(subcommand, alias = "pt")]
    Patient(PatientCommands),

    /// Inventory products
    #[command(subcommand, alias = "inv")]
    Product(ProductCommands),

    /// Show where the store lives and what it holds
    Status,

    /// Wipe patients, inventory and session
    Reset {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PatientCommands {
    /// Add a patient
    #[command(alias = "n")]
    Add(PatientArgs),

    /// List patients in the order they were added
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one patient
    Show { id: i64 },
}

#[derive(Args, Debug)]
pub struct PatientArgs {
    #[arg(long)]
    pub name: String,

    /// Explicit id (defaults to the next free one)
    #[arg(long)]
    pub id: Option<i64>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<String>,

    #[arg(long)]
    pub fiscal_code: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Add a product
    #[command(alias = "n")]
    Add(ProductArgs),

    /// List products in the order they were added
    #[command(alias = "ls")]
    List {
        /// Matches name, SKU or UDI
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one product
    Show { id: i64 },
}

#[derive(Args, Debug)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub id: Option<i64>,

    #[arg(long)]
    pub sku: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub quantity: Option<u32>,

    #[arg(long)]
    pub unit: Option<String>,

    /// Unique device identifier
    #[arg(long)]
    pub udi: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_login() {
        let cli = Cli::try_parse_from([
            "dentcrm", "login", "--user-id", "u1", "--email", "a@b.com", "--role", "dentist",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Login { user_id, role, token, .. }) => {
                assert_eq!(user_id, "u1");
                assert_eq!(role, Role::Dentist);
                assert!(token.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_patient_add_with_global_home() {
        let cli = Cli::try_parse_from([
            "dentcrm", "patient", "add", "--name", "Mario Rossi", "--home", "/tmp/x",
        ])
        .unwrap();
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::Patient(PatientCommands::Add(args))) => {
                assert_eq!(args.name, "Mario Rossi");
                assert!(args.id.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_role() {
        let parsed = Cli::try_parse_from([
            "dentcrm", "login", "--user-id", "u1", "--email", "a@b.com", "--role", "nurse",
        ]);
        assert!(parsed.is_err());
    }
}
