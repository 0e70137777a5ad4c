//! Command-line and environment configuration

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the forms server
#[derive(Parser, Debug, Clone)]
#[command(name = "forms-api")]
#[command(about = "Fills legal document templates from form submissions")]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, env = "FORMS_PORT", default_value = "3002")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, env = "FORMS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:forms.db?mode=rwc")]
    pub database_url: String,

    /// Maximum pooled database connections
    #[arg(long, env = "FORMS_DB_CONNECTIONS", default_value = "5")]
    pub db_connections: u32,

    /// Directory holding the template archives
    #[arg(long, env = "FORMS_TEMPLATES_DIR", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Directory generated documents are written to until downloaded
    #[arg(long, env = "FORMS_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Minutes a generated document stays available for download
    #[arg(long, env = "FORMS_DOCUMENT_TTL_MINUTES", default_value = "60")]
    pub document_ttl_minutes: u32,

    /// IANA zone used to stamp records
    #[arg(long, env = "FORMS_TIMEZONE", default_value = "America/Guayaquil")]
    pub timezone: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
