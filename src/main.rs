//! gog command-line interface
//!
//! Google Workspace from the terminal, with dynamic shell completion

use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use gog::Config;
use std::process;

/// Display an error and its chain of causes
fn display_error(err: &anyhow::Error) {
    eprintln!("error: {err}");

    let mut source = err.source();
    while let Some(err) = source {
        eprintln!("caused by: {err}");
        source = err.source();
    }
}

#[derive(Parser)]
#[command(name = "gog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Google Workspace from the command line", long_about = None)]
#[command(disable_help_subcommand = true)]
pub(crate) struct Cli {
    #[command(flatten)]
    globals: GlobalFlags,

    #[command(subcommand)]
    command: Commands,
}

/// Flags accepted by every command
#[derive(Args, Debug)]
pub(crate) struct GlobalFlags {
    /// Account email to act as
    #[arg(long, short = 'a', global = true, env = "GOG_ACCOUNT", value_name = "EMAIL")]
    pub(crate) account: Option<String>,

    /// OAuth client name (selects stored client credentials)
    #[arg(long, global = true, value_name = "NAME")]
    pub(crate) client: Option<String>,

    /// Output JSON
    #[arg(long, short = 'j', global = true)]
    pub(crate) json: bool,

    /// Output plain tab-separated text
    #[arg(long, global = true, conflicts_with = "json")]
    pub(crate) plain: bool,

    /// Colorize output
    #[arg(long, global = true, value_name = "MODE", value_parser = ["auto", "always", "never"])]
    pub(crate) color: Option<String>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub(crate) verbose: bool,

    /// Print debug logs to stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts and credentials
    Auth {
        #[command(subcommand)]
        #[allow(dead_code, reason = "Only the selected path is reported")]
        subcommand: AuthCommands,
    },

    /// Gmail
    Gmail {
        #[command(subcommand)]
        #[allow(dead_code, reason = "Only the selected path is reported")]
        subcommand: GmailCommands,
    },

    /// Google Classroom
    Classroom {
        #[command(subcommand)]
        #[allow(dead_code, reason = "Only the selected path is reported")]
        subcommand: ClassroomCommands,
    },

    /// Print a shell completion script
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,

        /// Print a static script instead of one that calls back into gog
        #[arg(long = "static")]
        static_script: bool,
    },

    /// Resolve completions for a partial command line (used by completion scripts)
    #[command(name = gog::COMPLETE_COMMAND, hide = true)]
    Complete {
        /// Index of the word being completed (negative: the last word)
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        cword: i64,

        /// Words of the command line, program name first
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

#[derive(Subcommand)]
#[allow(dead_code, reason = "Arguments are validated but not sent anywhere")]
enum AuthCommands {
    /// Authorize an account
    Add {
        /// Account email
        email: String,

        /// Services to authorize (comma-separated)
        #[arg(long)]
        services: Option<String>,

        /// Print the authorization URL instead of opening a browser
        #[arg(long)]
        manual: bool,

        /// Always show the consent screen
        #[arg(long)]
        force_consent: bool,
    },

    /// List stored accounts
    List {
        /// Verify that stored tokens are still valid
        #[arg(long)]
        check: bool,
    },

    /// Remove a stored account
    #[command(visible_alias = "rm")]
    Remove {
        /// Account email
        email: String,
    },

    /// Service account keys
    #[command(name = "service-account")]
    ServiceAccount {
        #[command(subcommand)]
        subcommand: ServiceAccountCommands,
    },
}

#[derive(Subcommand)]
#[allow(dead_code, reason = "Arguments are validated but not sent anywhere")]
enum ServiceAccountCommands {
    /// Store a service account key for impersonation or direct access
    Set {
        /// Email to impersonate, or the service account email with --direct
        email: String,

        /// Path to service account JSON key file
        #[arg(long, required = true)]
        key: String,

        /// Use the service account directly, without impersonation
        #[arg(long)]
        direct: bool,
    },

    /// Remove a stored service account key
    Unset {
        /// Email (impersonated user, or service account email with --direct)
        email: String,

        /// Remove the direct service account key
        #[arg(long)]
        direct: bool,
    },

    /// Show stored service account key status
    Status {
        /// Email (impersonated user, or service account email with --direct)
        email: String,

        /// Check the direct service account key
        #[arg(long)]
        direct: bool,
    },
}

#[derive(Subcommand)]
#[allow(dead_code, reason = "Arguments are validated but not sent anywhere")]
enum GmailCommands {
    /// Search threads using Gmail query syntax
    Search {
        /// Search query
        query: Vec<String>,

        /// Max results
        #[arg(long, visible_alias = "limit", default_value_t = 10)]
        max: i64,

        /// Page token
        #[arg(long)]
        page: Option<String>,
    },

    /// Thread operations
    Thread {
        #[command(subcommand)]
        subcommand: ThreadCommands,
    },

    /// Get a message
    Get {
        /// Message ID
        message_id: String,

        /// Message format
        #[arg(long, default_value = "full", value_parser = ["full", "metadata", "raw"])]
        format: String,
    },

    /// Download a single attachment
    Attachment {
        /// Message ID
        message_id: String,

        /// Attachment ID
        attachment_id: String,

        /// Output path
        #[arg(long)]
        out: Option<String>,
    },

    /// Print Gmail web URLs for threads
    Url {
        /// Thread IDs
        #[arg(required = true)]
        thread_ids: Vec<String>,
    },

    /// Gmail history
    History {
        /// Start history ID
        #[arg(long)]
        since: Option<String>,

        /// Max results
        #[arg(long, visible_alias = "limit", default_value_t = 100)]
        max: i64,
    },

    /// Label operations
    Labels {
        #[command(subcommand)]
        subcommand: LabelsCommands,
    },

    /// Batch operations
    Batch {
        #[command(subcommand)]
        subcommand: BatchCommands,
    },

    /// Send an email
    Send {
        /// Recipients (comma-separated)
        #[arg(long, required = true)]
        to: String,

        /// CC recipients (comma-separated)
        #[arg(long)]
        cc: Option<String>,

        /// BCC recipients (comma-separated)
        #[arg(long)]
        bcc: Option<String>,

        /// Subject
        #[arg(long, required = true)]
        subject: String,

        /// Plain text body
        #[arg(long)]
        body: Option<String>,

        /// Attachment paths (repeatable)
        #[arg(long)]
        attach: Vec<String>,
    },

    /// Draft operations
    Drafts {
        #[command(subcommand)]
        subcommand: DraftsCommands,
    },

    /// Settings and admin
    Settings {
        #[command(subcommand)]
        subcommand: SettingsCommands,
    },

    /// Manage Gmail watch (moved to `gmail settings watch`)
    #[command(hide = true)]
    Watch,

    /// Auto-forwarding settings (moved to `gmail settings autoforward`)
    #[command(hide = true)]
    Autoforward,

    /// Delegate operations (moved to `gmail settings delegates`)
    #[command(hide = true)]
    Delegates,

    /// Filter operations (moved to `gmail settings filters`)
    #[command(hide = true)]
    Filters,

    /// Forwarding addresses (moved to `gmail settings forwarding`)
    #[command(hide = true)]
    Forwarding,

    /// Send-as settings (moved to `gmail settings sendas`)
    #[command(hide = true)]
    Sendas,

    /// Vacation responder (moved to `gmail settings vacation`)
    #[command(hide = true)]
    Vacation,
}

#[derive(Subcommand)]
#[allow(dead_code, reason = "Arguments are validated but not sent anywhere")]
enum ThreadCommands {
    /// Get a thread with all messages
    Get {
        /// Thread ID
        thread_id: String,

        /// Download attachments
        #[arg(long)]
        download: bool,
    },

    /// Modify labels on a thread
    Modify {
        /// Thread ID
        thread_id: String,

        /// Labels to add (comma-separated, name or ID)
        #[arg(long)]
        add: Option<String>,

        /// Labels to remove (comma-separated, name or ID)
        #[arg(long)]
        remove: Option<String>,
    },
}

#[derive(Subcommand)]
#[allow(dead_code, reason = "Arguments are validated but not sent anywhere")]
enum LabelsCommands {
    /// List labels
    List,

    /// Get label details (including counts)
    Get {
        /// Label ID or name
        label: String,
    },

    /// Create a new label
    Create {
        /// Label name
        name: String,
    },

    /// Modify labels on threads
    Modify {
        /// Thread IDs
        #[arg(required = true)]
        thread_ids: Vec<String>,

        /// Labels to add (comma-separated, name or ID)
        #[arg(long)]
        add: Option<String>,

        /// Labels to remove (comma-separated, name or ID)
        #[arg(long)]
        remove: Option<String>,
    },
}

#[derive(Subcommand)]
#[allow(dead_code, reason = "Arguments are validated but not sent anywhere")]
enum BatchCommands {
    /// Permanently delete messages
    Delete {
        /// Message IDs
        #[arg(required = true)]
        message_ids: Vec<String>,
    },

    /// Modify labels on messages
    Modify {
        /// Message IDs
        #[arg(required = true)]
        message_ids: Vec<String>,

        /// Labels to add (comma-separated, name or ID)
        #[arg(long)]
        add: Option<String>,

        /// Labels to remove (comma-separated, name or ID)
        #[arg(long)]
        remove: Option<String>,
    },
}

#[derive(Subcommand)]
#[allow(dead_code, reason = "Arguments are validated but not sent anywhere")]
enum DraftsCommands {
    /// List drafts
    List,

    /// Delete a draft
    Delete {
        /// Draft ID
        draft_id: String,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Filter operations
    Filters,
    /// Delegate operations
    Delegates,
    /// Forwarding addresses
    Forwarding,
    /// Auto-forwarding settings
    Autoforward,
    /// Send-as settings
    Sendas,
    /// Vacation responder
    Vacation,
    /// Manage Gmail watch
    Watch,
}

#[derive(Subcommand)]
enum ClassroomCommands {
    /// Courses
    Courses {
        #[command(subcommand)]
        subcommand: CoursesCommands,
    },
}

/// Optional course fields shared by create and update
#[derive(Args)]
#[allow(dead_code, reason = "Arguments are validated but not sent anywhere")]
struct CourseFields {
    /// Owner user ID or email
    #[arg(long)]
    owner: Option<String>,

    /// Section
    #[arg(long)]
    section: Option<String>,

    /// Description heading
    #[arg(long)]
    description_heading: Option<String>,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Room
    #[arg(long)]
    room: Option<String>,

    /// Course state (ACTIVE, ARCHIVED, PROVISIONED, DECLINED)
    #[arg(long)]
    state: Option<String>,
}

#[derive(Subcommand)]
#[allow(dead_code, reason = "Arguments are validated but not sent anywhere")]
enum CoursesCommands {
    /// List courses
    List {
        /// Course states filter (comma-separated)
        #[arg(long)]
        state: Option<String>,

        /// Filter by teacher user ID or email
        #[arg(long)]
        teacher: Option<String>,

        /// Filter by student user ID or email
        #[arg(long)]
        student: Option<String>,

        /// Max results
        #[arg(long, visible_alias = "limit", default_value_t = 100)]
        max: i64,

        /// Page token
        #[arg(long)]
        page: Option<String>,
    },

    /// Get a course
    Get {
        /// Course ID or alias
        course_id: String,
    },

    /// Create a course
    Create {
        /// Course name
        #[arg(long, required = true)]
        name: String,

        #[command(flatten)]
        fields: CourseFields,
    },

    /// Update a course
    Update {
        /// Course ID or alias
        course_id: String,

        /// Course name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: CourseFields,
    },

    /// Delete a course
    #[command(visible_alias = "rm")]
    Delete {
        /// Course ID or alias
        course_id: String,
    },

    /// Archive a course
    Archive {
        /// Course ID or alias
        course_id: String,
    },

    /// Unarchive a course
    Unarchive {
        /// Course ID or alias
        course_id: String,
    },

    /// Join a course
    Join {
        /// Course ID or alias
        course_id: String,

        /// Join as student or teacher
        #[arg(long, default_value = "student", value_parser = ["student", "teacher"])]
        role: String,
    },

    /// Leave a course
    Leave {
        /// Course ID or alias
        course_id: String,
    },

    /// Print Classroom web URLs for courses
    Url {
        /// Course IDs
        #[arg(required = true)]
        course_ids: Vec<String>,
    },
}

/// Names of the subcommands selected in `matches`, outermost first
fn subcommand_path(matches: &ArgMatches) -> Vec<&str> {
    let mut path = Vec::new();
    let mut current = matches;
    while let Some((name, sub_matches)) = current.subcommand() {
        path.push(name);
        current = sub_matches;
    }
    path
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    // Configuration problems only matter to the commands that read it
    let config = Config::load();
    let config_debug = config.as_ref().is_ok_and(Config::debug_enabled);

    gog::init_debug(cli.globals.debug || gog::env_vars::gog_debug() || config_debug);

    let result = match cli.command {
        Commands::Completion {
            shell,
            static_script,
        } => commands::completion::run(shell, static_script),
        Commands::Complete { cword, words } => commands::complete::run(config, cword, &words),
        Commands::Auth { .. } | Commands::Gmail { .. } | Commands::Classroom { .. } => {
            commands::google::run(&cli.globals, &subcommand_path(&matches))
        }
    };

    if let Err(e) = result {
        display_error(&e);
        process::exit(1);
    }
}

mod commands;
