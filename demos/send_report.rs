use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use mail_dispatch::{domain::communication::mailer::Mailer, infrastructure::email::sender::MailSender};

/// Email a report through the configured SMTP account
#[derive(Parser)]
pub struct Args {
    /// Path of the JSON mail settings file
    #[arg(long, env = "MAIL_SETTINGS", default_value = "mail_settings.json")]
    pub settings: PathBuf,

    /// The name shown in the From header
    #[arg(long, env = "MAIL_SENDER_NAME", default_value = "Reports")]
    pub sender_name: String,

    /// The sender's email address
    #[arg(long, env = "MAIL_SENDER_ADDRESS")]
    pub sender_address: String,

    /// The recipient's email address
    #[arg(long)]
    pub to: String,

    /// The subject of the email
    #[arg(long, default_value = "Daily Report")]
    pub subject: String,

    /// The plain text body of the email
    #[arg(long, default_value = "See attached summary.")]
    pub message: String,

    /// A file to attach
    #[arg(long)]
    pub attach: Option<PathBuf>,
}

pub fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mailer = MailSender::new(&args.settings, &args.sender_name, &args.sender_address)?;

    let sent = match &args.attach {
        Some(file_name) => {
            mailer.send_mail_with_attachment(&args.to, &args.subject, &args.message, file_name)
        }
        None => mailer.send_mail(&args.to, &args.subject, &args.message),
    };

    if !sent {
        bail!("could not send email to {}", args.to);
    }

    println!("Sent email to {}", args.to);

    Ok(())
}
