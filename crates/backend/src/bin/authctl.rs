use anyhow::Context;
use clap::{Parser, Subcommand};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared_types::{Credentials, ErrorResponse, ProfileResponse, RegisterResponse, TokenResponse};

#[derive(Parser)]
#[command(name = "authctl")]
#[command(about = "CLI for registering, logging in and checking tokens against the auth server")]
struct Cli {
    /// Auth server URL to connect to.
    #[arg(
        short,
        long,
        default_value = "http://localhost:8080",
        env = "AUTH_API_URL"
    )]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        /// Email address, used as the login name.
        email: String,

        /// Password for the account. Must be shorter than 72 bytes.
        password: String,
    },

    /// Log in and print a session token
    ///
    /// The token is valid for one hour by default. Pass it to `profile`
    /// or send it as `Authorization: Bearer <token>`.
    Login {
        email: String,
        password: String,
    },

    /// Show the account a token belongs to
    Profile {
        /// Token printed by `login`.
        #[arg(env = "AUTH_TOKEN")]
        token: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let base_url = cli.base_url.trim_end_matches('/');

    match cli.command {
        Commands::Register { email, password } => {
            let response = client
                .post(format!("{}/register", base_url))
                .json(&Credentials {
                    email: email.clone(),
                    password,
                })
                .send()
                .await
                .context("Failed to reach auth server")?;
            let body: RegisterResponse = parse_response(response).await?;
            println!("{}: {}", email, body.status);
        }
        Commands::Login { email, password } => {
            let response = client
                .post(format!("{}/login", base_url))
                .json(&Credentials { email, password })
                .send()
                .await
                .context("Failed to reach auth server")?;
            let body: TokenResponse = parse_response(response).await?;
            println!("{}", body.token);
        }
        Commands::Profile { token } => {
            let response = client
                .get(format!("{}/profile", base_url))
                .bearer_auth(token)
                .send()
                .await
                .context("Failed to reach auth server")?;
            let body: ProfileResponse = parse_response(response).await?;
            println!("Logged in as {}", body.email);
        }
    }

    Ok(())
}

/// Decode a success body, or turn the server's error body into an error.
async fn parse_response<T: DeserializeOwned>(response: Response) -> anyhow::Result<T> {
    let status = response.status();
    if status.is_success() {
        return response.json().await.context("Invalid response body");
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(err) => match err.details {
            Some(details) => format!("{} ({})", err.error, details),
            None => err.error,
        },
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    anyhow::bail!("{}: {}", status, message)
}
