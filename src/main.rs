mod auth;
mod chats;
mod config;
mod error;
mod logging;
mod output;
mod participants;
mod prompt;
mod service;
mod session;
mod telegram;

use clap::Parser;
use std::path::PathBuf;

use crate::auth::TerminalAuth;
use crate::config::Config;
use crate::error::Result;
use crate::output::{JsonFormat, ParticipantListOutput};
use crate::prompt::Prompter;
use crate::service::ChatService;

#[derive(Parser)]
#[command(
    name = "tg-members",
    version,
    about = "Print the usernames or phone numbers of a Telegram chat's recent members",
    after_help = "Examples:\n  tg-members --api-id 12345 --api-hash abc... --phone +15550000000 --chat-title \"Team\"\n  TG_API_ID=12345 TG_API_HASH=abc... TG_PHONE=+15550000000 tg-members --chat-title \"Team\" --json"
)]
struct Cli {
    #[arg(long, env = "TG_API_ID", help = "Application api_id from my.telegram.org")]
    api_id: i32,

    #[arg(long, env = "TG_API_HASH", hide_env_values = true, help = "Application api_hash")]
    api_hash: String,

    #[arg(long, env = "TG_PHONE", help = "Phone number of the account to log in with")]
    phone: String,

    #[arg(long, env = "TG_CHAT_TITLE", help = "Exact title of the chat to list")]
    chat_title: String,

    #[arg(long, env = "TG_SESSION_PATH", help = "Session file (defaults to ~/.local/share/tg-members/user.session)")]
    session: Option<PathBuf>,

    #[arg(long, help = "Output JSON instead of text lines")]
    json: bool,

    #[arg(long, requires = "json", help = "Single-line JSON")]
    compact: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init();

    if let Err(error) = run(cli).await {
        tracing::error!(%error, "run failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::new(cli.api_id, cli.api_hash, cli.phone, cli.chat_title, cli.session)?;
    let json = cli.json.then(|| output::resolve_json_format(cli.compact));
    let auth = TerminalAuth::new(config.phone.clone(), Prompter::stdout());

    let title = config.chat_title.clone();
    session::run(&config, &auth, |service| async move { report_chat(&service, &title, json).await }).await
}

/// Finds the chat titled `title` and prints its recent participants.
async fn report_chat<S: ChatService + ?Sized>(service: &S, title: &str, json: Option<JsonFormat>) -> Result<()> {
    let Some(chat) = chats::find_chat(service, title).await? else {
        tracing::info!(title, "no chat with that title");
        return Ok(());
    };

    let access_hash = match chats::resolve_access_hash(&chat) {
        Ok(access_hash) => access_hash,
        Err(error) => {
            tracing::error!(%error, id = chat.id, "error while resolving chat access hash");
            return Err(error);
        }
    };

    let users = participants::list_participants(service, chat.id, access_hash).await?;
    let output = ParticipantListOutput {
        participants: participants::report(&users),
        chat,
    };
    output::print_participants(&output, json)?;
    Ok(())
}
