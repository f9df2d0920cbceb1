use serde::Serialize;

use crate::board::IssuedToken;
use crate::cli::api_client::{ApiClient, TOKEN_ENV};
use crate::cli::error::CliResult;
use crate::db::UserSummary;

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Register an account and print the issued token
pub async fn register(
    api_client: &ApiClient,
    request: RegisterRequest<'_>,
    format: &str,
) -> CliResult<String> {
    let response = api_client
        .post("/api/v1/users/register")
        .json(&request)
        .send()
        .await?;

    let issued: IssuedToken = ApiClient::handle_response(response).await?;
    format_issued("Registered", &issued, format)
}

/// Log in and print a fresh token
pub async fn login(
    api_client: &ApiClient,
    request: LoginRequest<'_>,
    format: &str,
) -> CliResult<String> {
    let response = api_client
        .post("/api/v1/users/login")
        .json(&request)
        .send()
        .await?;

    let issued: IssuedToken = ApiClient::handle_response(response).await?;
    format_issued("Logged in as", &issued, format)
}

/// Show the account behind the current token
pub async fn whoami(api_client: &ApiClient) -> CliResult<String> {
    api_client.require_token()?;
    let response = api_client.get("/api/v1/users/me").send().await?;
    let me: UserSummary = ApiClient::handle_response(response).await?;
    Ok(format!("{} <{}> ({})", me.name, me.email, me.id))
}

fn format_issued(verb: &str, issued: &IssuedToken, format: &str) -> CliResult<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(issued)?),
        _ => Ok(format!(
            "✓ {} {} <{}> ({})\n\nexport {}={}",
            verb, issued.name, issued.email, issued.id, TOKEN_ENV, issued.token
        )),
    }
}
