//! Terminal front-end for administering the member roster

mod render;
mod session_file;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;

use roster_api::filter::{MemberFilter, SearchField, SortDirection, SortField};
use roster_api::model::{Gender, MemberDraft, MemberStatus};
use roster_client::{
    AgentApi, ApiFailure, AuthApi, ClientConfig, CredentialStore, HttpGateway, MemberApi,
};
use roster_console::{FilterStore, ListSnapshot, MemberListSession, feedback};

#[derive(Debug, Parser)]
#[command(
    name = "roster-admin",
    about = "Administer the member roster from the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in and keep the session for later commands
    Login {
        login_id: String,
        #[arg(long, env = "ROSTER_PASSWORD")]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// List members matching a filter
    List(FilterArgs),
    /// Show one member
    Show { login_id: String },
    /// Register a new member
    Register(DraftArgs),
    /// Replace an existing member's details
    Edit {
        login_id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Flip a member between valid and invalid
    SwitchStatus {
        id: String,
        /// valid or invalid
        status: MemberStatus,
    },
    /// Archive an active member or restore an archived one
    ToggleArchive { id: String },
    /// Export the filtered list as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Where to write the file
        #[arg(long)]
        out: PathBuf,
    },
    /// List agents
    Agents,
}

#[derive(Debug, Parser)]
struct FilterArgs {
    /// Free text matched against the searchable fields
    #[arg(long)]
    search: Option<String>,
    /// Restrict the free-text search to these fields (repeatable)
    #[arg(long = "search-field")]
    search_fields: Vec<SearchField>,
    /// Exact login id
    #[arg(long)]
    login_id: Option<String>,
    /// Name fragment
    #[arg(long)]
    name: Option<String>,
    /// Phone fragment
    #[arg(long)]
    phone: Option<String>,
    /// Minimum number of recorded transactions
    #[arg(long)]
    transaction_count: Option<u64>,
    /// Members referred by this member id
    #[arg(long)]
    referrer_id: Option<String>,
    /// Members managed by this agent id
    #[arg(long)]
    agent_id: Option<String>,
    /// Business standing, valid or invalid
    #[arg(long)]
    status: Option<MemberStatus>,
    /// Browse archived members instead of active ones
    #[arg(long)]
    archived: bool,
    /// Registered on or after this date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Registered on or before this date (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<NaiveDate>,
    /// Field the list is ordered by
    #[arg(long, default_value = "createdAt")]
    sort_by: SortField,
    /// ASC or DESC
    #[arg(long, default_value = "DESC")]
    order: SortDirection,
    /// Rows per page (10, 20, 50 or 100)
    #[arg(long, default_value_t = 20)]
    limit: u32,
    /// Page to fetch
    #[arg(long, default_value_t = 1)]
    page: u32,
}

impl FilterArgs {
    fn to_filter(&self) -> MemberFilter {
        MemberFilter {
            search: self.search.clone(),
            search_fields: self.search_fields.clone(),
            login_id: self.login_id.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            transaction_count: self.transaction_count,
            referrer_id: self.referrer_id.clone(),
            agent_id: self.agent_id.clone(),
            status: self.status,
            is_active: !self.archived,
            start_date: self.start_date,
            end_date: self.end_date,
            sort_by: self.sort_by,
            order_by: self.order,
            limit: self.limit,
            current_page: self.page,
        }
    }
}

#[derive(Debug, Parser)]
struct DraftArgs {
    /// Full name
    #[arg(long)]
    name: String,
    /// Email address
    #[arg(long)]
    email: String,
    /// male or female
    #[arg(long)]
    gender: Gender,
    /// Primary phone number
    #[arg(long)]
    phone: String,
    /// Secondary phone number
    #[arg(long)]
    alt_phone: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    date_of_birth: NaiveDate,
    /// Referring member's id; omit for members who joined directly
    #[arg(long)]
    referrer_id: Option<String>,
    /// Managing agent's id
    #[arg(long)]
    agent_id: Option<String>,
    /// Membership fee rate in percent
    #[arg(long)]
    membership_fee_rate: f64,
    /// Referral fee rate in percent
    #[arg(long)]
    referral_fee_rate: f64,
}

impl DraftArgs {
    fn to_draft(&self) -> MemberDraft {
        MemberDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            gender: self.gender,
            phone: self.phone.clone(),
            alt_phone: self.alt_phone.clone(),
            date_of_birth: self.date_of_birth,
            referrer_id: self.referrer_id.clone(),
            agent_id: self.agent_id.clone(),
            membership_fee_rate: self.membership_fee_rate,
            referral_fee_rate: self.referral_fee_rate,
        }
    }
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_env("ROSTER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Unwrap an operation outcome, or print the user-facing text and exit.
fn or_exit<T>(outcome: Result<T, ApiFailure>) -> T {
    match outcome {
        Ok(value) => value,
        Err(failure) => {
            debug!("operation failed: {:?}", failure);
            eprintln!("{}", feedback::user_message(&failure));
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let credentials = Arc::new(match session_file::load() {
        Some(session) => CredentialStore::restored(session),
        None => CredentialStore::new(),
    });
    let gateway = Arc::new(HttpGateway::new(config, credentials.clone())?);

    match cli.command {
        Commands::Login { login_id, password } => {
            let auth = AuthApi::new(gateway.clone(), credentials.clone());
            let session = or_exit(auth.login(&login_id, &password).await);
            session_file::save(&session)?;
            println!(
                "Logged in as {} ({})",
                session.user.name, session.user.login_id
            );
        }
        Commands::Logout => {
            let auth = AuthApi::new(gateway.clone(), credentials.clone());
            auth.logout();
            session_file::remove()?;
            println!("Logged out");
        }
        Commands::List(args) => {
            let members = MemberApi::new(gateway.clone());
            let store = Arc::new(FilterStore::with_filter(args.to_filter()));
            let session = MemberListSession::new(Arc::new(members), store);
            match session.refresh().await {
                ListSnapshot::Loaded(page) => {
                    render::member_table(&page.rows);
                    if let Some(line) = session.showing_line() {
                        println!("{line} (page {} of {})", page.page, page.total_pages);
                    }
                }
                ListSnapshot::Failed(text) => {
                    eprintln!("{text}");
                    std::process::exit(1);
                }
                ListSnapshot::Empty => {}
            }
        }
        Commands::Show { login_id } => {
            let members = MemberApi::new(gateway.clone());
            let member = or_exit(members.get(&login_id).await);
            render::member_detail(&member);
        }
        Commands::Register(args) => {
            let members = MemberApi::new(gateway.clone());
            let member = or_exit(members.register(&args.to_draft()).await);
            println!(
                "Registered {} with login id {}",
                member.name, member.login_id
            );
        }
        Commands::Edit { login_id, draft } => {
            let members = MemberApi::new(gateway.clone());
            or_exit(members.edit(&login_id, &draft.to_draft()).await);
            println!("Updated member {login_id}");
        }
        Commands::SwitchStatus { id, status } => {
            let members = MemberApi::new(gateway.clone());
            or_exit(members.switch_status(&id, status).await);
            println!("Member {id} is now {}", status.as_str());
        }
        Commands::ToggleArchive { id } => {
            let members = MemberApi::new(gateway.clone());
            or_exit(members.toggle_archive(&id).await);
            println!("Toggled archive state of member {id}");
        }
        Commands::Export { filter, out } => {
            let members = MemberApi::new(gateway.clone());
            let mut filter = filter.to_filter();
            filter.normalize();
            let bytes = or_exit(members.export_csv(&filter).await);
            std::fs::write(&out, &bytes).with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote {} bytes to {}", bytes.len(), out.display());
        }
        Commands::Agents => {
            let agents = AgentApi::new(gateway.clone());
            let rows = or_exit(agents.list().await);
            render::agent_table(&rows);
        }
    }

    Ok(())
}
