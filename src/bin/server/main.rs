#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Contact intake API for the marketing site

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use contact_intake::{
    domain::contact::service::{ContactIntakeImpl, SiteSettings},
    infrastructure::{
        cache::memory::MemoryRateLimitStore,
        email::resend::{ResendConfig, ResendMailer},
        http::{HttpServer, HttpServerConfig},
    },
};
use tracing::warn;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The contact pipeline configuration
    #[clap(flatten)]
    pub resend: ResendConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if args.resend.api_key.is_none() {
        warn!("RESEND_API_KEY is not set; submissions will be rejected");
    }

    let settings = SiteSettings::from(&args.resend);
    let mailer = Arc::new(ResendMailer::new(args.resend.clone()));
    let rate_limits = Arc::new(MemoryRateLimitStore::new());

    let contact = ContactIntakeImpl::new(mailer, rate_limits, settings);

    HttpServer::new(contact, args.resend, args.server)
        .await?
        .run()
        .await
}
