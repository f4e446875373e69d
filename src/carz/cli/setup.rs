use clap::{Args, Parser, Subcommand};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.1" for releases, "0.3.1@abc1234 2024-01-15 14:30" for dev builds
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
#[command(name = "carz", bin_name = "carz", version = get_version())]
#[command(about = "Keep track of your die-cast car collection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cars, with optional filters and sorting
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add a car to the collection
    #[command(alias = "a")]
    Add(CarFields),

    /// Edit a car in place (only the given fields change)
    #[command(alias = "e")]
    Edit {
        /// Position of the car (e.g. 3)
        position: String,

        #[command(flatten)]
        fields: CarFields,
    },

    /// Delete one or more cars
    #[command(alias = "rm")]
    Delete {
        /// Positions of the cars (e.g. 1 3 5 or 2-4)
        #[arg(required = true, num_args = 1..)]
        positions: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Toggle favorite on one or more cars
    #[command(alias = "f")]
    Fav {
        /// Positions of the cars (e.g. 1 3 5 or 2-4)
        #[arg(required = true, num_args = 1..)]
        positions: Vec<String>,
    },

    /// Show all details of a car
    #[command(alias = "v")]
    Show {
        /// Position of the car
        position: String,
    },

    /// Show the favorites showcase
    Showcase,

    /// Average value by pack status
    Stats,

    /// Get or set configuration (dark-mode, showcase-limit, default-sort)
    Config {
        /// Configuration key
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Check the collection for inconsistencies and fix them
    Doctor,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only cars with this pack status (e.g. Opened, In-Pack)
    #[arg(short, long)]
    pub pack: Option<String>,

    /// Only cars in this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort by name, rating or price (defaults to the configured sort)
    #[arg(short, long)]
    pub sort: Option<String>,
}

/// Car fields as typed by the user. Validation happens in the library, so
/// every field is optional here.
#[derive(Args, Debug, Default, Clone)]
pub struct CarFields {
    /// Name of the car
    #[arg(long)]
    pub name: Option<String>,

    /// Value in rupees (whole number, 0 or more)
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Type (e.g. Mainline, Premium)
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Pack status (Opened or In-Pack)
    #[arg(long)]
    pub pack: Option<String>,

    /// Category (e.g. Muscle, JDM)
    #[arg(long)]
    pub category: Option<String>,

    /// Rating from 0 to 5
    #[arg(long, allow_hyphen_values = true)]
    pub rating: Option<String>,

    /// Wiki link
    #[arg(long)]
    pub wiki: Option<String>,

    /// Marketplace link
    #[arg(long)]
    pub marketplace: Option<String>,
}
