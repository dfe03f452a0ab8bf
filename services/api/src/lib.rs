mod cli;
mod infra;
mod routes;
mod score;
mod server;

use method_advisor::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
