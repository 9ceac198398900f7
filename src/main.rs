//! CareScan CLI
//!
//! Terminal front end for the screening service:
//! - Register, log in, check the current user
//! - Analyze an image, calculate risk, save the questionnaire
//! - List past analyses
//! - Host the compiled browser bundle

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carescan::client::{Action, Backend, HttpBackend};
use carescan::config::{generate_default_config, Config};
use carescan::forms::{check_upload_size, guess_content_type, ImageUpload, RiskForm};
use carescan::models::{AnalysisResult, BreastDensity, MedicalHistory};
use carescan::views::{AuthPanel, AuthTab, Dashboard, HistoryView, Notice, NoticeKind, RiskBadge};
use carescan::Session;

#[derive(Parser)]
#[command(name = "carescan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Breast-health screening client")]
#[command(long_about = "CareScan talks to the screening API: upload images for analysis,\nassess your risk from a short questionnaire and review your history.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token from `carescan login`
    #[arg(long, env = "CARESCAN_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        /// Full name
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },

    /// Log in and print a token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Show the user behind the token
    Whoami,

    /// Upload an image for analysis (max 10MB)
    Analyze {
        /// Path to the image
        path: PathBuf,
    },

    /// Calculate risk from questionnaire answers
    Assess(Questionnaire),

    /// Save questionnaire answers as your medical history
    SaveHistory(Questionnaire),

    /// Show your saved medical history
    History,

    /// List past analyses, newest first
    Analyses,

    /// Check that the API is reachable
    Status,

    /// Serve the compiled browser bundle
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Directory containing index.html
        #[arg(long)]
        ui_dir: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Questionnaire answers; omitted optional ages are sent as null
#[derive(Args)]
pub struct Questionnaire {
    /// Age in years
    #[arg(long)]
    age: String,
    /// Close relative diagnosed with breast cancer
    #[arg(long)]
    family_history: bool,
    /// Previous breast biopsies
    #[arg(long)]
    previous_biopsies: bool,
    /// Currently on hormone therapy
    #[arg(long)]
    hormone_therapy: bool,
    /// Age at first pregnancy
    #[arg(long)]
    first_pregnancy_age: Option<String>,
    /// Age at first menstruation
    #[arg(long)]
    menstruation_age: Option<String>,
    /// Breast density: fatty, scattered, normal, dense
    #[arg(long)]
    density: Option<String>,
}

impl Questionnaire {
    fn to_form(&self) -> anyhow::Result<RiskForm> {
        let mut form = RiskForm::default();
        form.age = self.age.clone();
        form.family_history = self.family_history;
        form.previous_biopsies = self.previous_biopsies;
        form.hormone_therapy = self.hormone_therapy;
        form.first_pregnancy_age = self.first_pregnancy_age.clone().unwrap_or_default();
        form.menstruation_age = self.menstruation_age.clone().unwrap_or_default();
        if let Some(density) = &self.density {
            form.breast_density = BreastDensity::parse(density)
                .ok_or_else(|| anyhow!("Unknown breast density: {}", density))?;
        }
        Ok(form)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config);

    let backend = HttpBackend::new(&config.api.base_url);
    let json = cli.format == "json";

    match cli.command {
        Commands::Register {
            email,
            name,
            password,
        } => {
            let mut panel = AuthPanel::default();
            panel.select_tab(AuthTab::Register);
            panel.register.email = email;
            panel.register.full_name = name;
            panel.register.password = password;
            authenticate(panel, &backend, json).await?;
        }

        Commands::Login { email, password } => {
            let mut panel = AuthPanel::default();
            panel.login.email = email;
            panel.login.password = password;
            authenticate(panel, &backend, json).await?;
        }

        Commands::Whoami => {
            let session = require_session(&backend, cli.token.as_deref()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&session.user)?);
            } else {
                println!("{} <{}>", session.user.full_name, session.user.email);
            }
        }

        Commands::Analyze { path } => {
            let session = require_session(&backend, cli.token.as_deref()).await?;

            let size = tokio::fs::metadata(&path)
                .await
                .with_context(|| format!("Cannot read {:?}", path))?
                .len();
            check_upload_size(size)?;

            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Cannot read {:?}", path))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "upload".to_string());
            let upload = ImageUpload::new(file_name.clone(), guess_content_type(&file_name), bytes);

            let mut dashboard = Dashboard::new();
            if let Err(notice) = dashboard.select_image(upload) {
                bail!(notice.message);
            }
            eprintln!("{}", dashboard.image.submit_label());
            let notices = dashboard.submit_image(&backend, &session).await;
            report(&notices)?;

            if let Some(result) = dashboard.image_result() {
                print_result(result, json)?;
            }
        }

        Commands::Assess(answers) => {
            let session = require_session(&backend, cli.token.as_deref()).await?;
            let mut dashboard = Dashboard::new();
            dashboard.risk.form = answers.to_form()?;

            let notices = dashboard.calculate_risk(&backend, &session).await;
            report(&notices)?;

            if let Some(result) = dashboard.risk_result() {
                print_result(result, json)?;
            }
        }

        Commands::SaveHistory(answers) => {
            let session = require_session(&backend, cli.token.as_deref()).await?;
            let mut dashboard = Dashboard::new();
            dashboard.risk.form = answers.to_form()?;

            let notices = dashboard.save_history(&backend, &session).await;
            report(&notices)?;

            if let Some(history) = &dashboard.medical_history {
                print_history(history, json)?;
            }
        }

        Commands::History => {
            let session = require_session(&backend, cli.token.as_deref()).await?;
            let mut dashboard = Dashboard::new();
            let notices: Vec<Notice> = dashboard
                .refresh_medical_history(&backend, &session)
                .await
                .into_iter()
                .collect();
            report(&notices)?;

            match &dashboard.medical_history {
                Some(history) => print_history(history, json)?,
                None if json => println!("null"),
                None => println!("No medical history saved yet."),
            }
        }

        Commands::Analyses => {
            let session = require_session(&backend, cli.token.as_deref()).await?;
            let mut dashboard = Dashboard::new();
            let notices: Vec<Notice> = dashboard
                .refresh_analyses(&backend, &session)
                .await
                .into_iter()
                .collect();
            report(&notices)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard.analyses)?);
                return Ok(());
            }

            match dashboard.history_view() {
                HistoryView::Empty(placeholder) => println!("{}", placeholder),
                HistoryView::Cards(cards) => {
                    println!("{:<16} {:<16} {:<20} {}", "RISK", "TYPE", "DATE", "ID");
                    for card in cards {
                        println!(
                            "{} {:<14} {:<16} {:<20} {}",
                            card.badge.icon.glyph(),
                            card.badge.label,
                            card.title,
                            card.created_at,
                            card.id
                        );
                    }
                }
            }
        }

        Commands::Status => match backend.service_info().await {
            Ok(info) => {
                println!("API: {}", backend.base_url());
                println!("Status: reachable ({})", info.message);
            }
            Err(e) => {
                println!("API: {}", backend.base_url());
                bail!("API is not reachable: {}", e);
            }
        },

        Commands::Serve { host, port, ui_dir } => {
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            if let Some(dir) = ui_dir {
                server.ui_dir = dir.to_string_lossy().to_string();
            }
            carescan::server::serve(&server).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Cannot write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "carescan={level},tower_http={level}",
            level = config.logging.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Submit the panel and print the new session
async fn authenticate(
    mut panel: AuthPanel,
    backend: &HttpBackend,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = None;
    panel.submit(backend, |s| session = Some(s)).await;

    let Some(session) = session else {
        let fallback = match panel.tab {
            AuthTab::Login => Action::Login,
            AuthTab::Register => Action::Register,
        };
        bail!(panel
            .error
            .unwrap_or_else(|| fallback.fallback_message().to_string()));
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "token": session.token,
                "user": session.user,
            }))?
        );
    } else {
        println!("Signed in as {} <{}>", session.user.full_name, session.user.email);
        println!("export CARESCAN_TOKEN={}", session.token);
    }
    Ok(())
}

/// Rebuild a session from a token by asking the API who it belongs to
async fn require_session(backend: &HttpBackend, token: Option<&str>) -> anyhow::Result<Session> {
    let token = token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| anyhow!("Not signed in: pass --token or set CARESCAN_TOKEN (see `carescan login`)"))?;

    let user = backend
        .current_user(token)
        .await
        .map_err(|e| anyhow!("Session rejected: {}", e.detail().unwrap_or("invalid token")))?;
    Ok(Session::new(token, user))
}

/// Print notices; fail if any of them is an error
fn report(notices: &[Notice]) -> anyhow::Result<()> {
    let mut first_error = None;
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => eprintln!("✓ {}", notice.message),
            NoticeKind::Error => {
                eprintln!("✕ {}", notice.message);
                first_error.get_or_insert_with(|| notice.message.clone());
            }
        }
    }
    match first_error {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

fn print_result(result: &AnalysisResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let badge = RiskBadge::for_level(result.risk_level.as_str());
    println!("{} {}", badge.icon.glyph(), badge.label);
    println!();
    println!("{}", result.result);
    if !result.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &result.recommendations {
            println!("  - {}", rec);
        }
    }
    Ok(())
}

fn print_history(history: &MedicalHistory, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(history)?);
        return Ok(());
    }

    let yes_no = |b: bool| if b { "Yes" } else { "No" };
    let optional = |v: Option<u32>| v.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string());

    println!("Age:                  {}", history.age);
    println!("Family history:       {}", yes_no(history.family_history));
    println!("Previous biopsies:    {}", yes_no(history.previous_biopsies));
    println!("Hormone therapy:      {}", yes_no(history.hormone_therapy));
    println!("First pregnancy age:  {}", optional(history.first_pregnancy_age));
    println!("Menstruation age:     {}", optional(history.menstruation_age));
    println!(
        "Breast density:       {}",
        history
            .breast_density
            .map(|d| d.label())
            .unwrap_or("N/A")
    );
    Ok(())
}
