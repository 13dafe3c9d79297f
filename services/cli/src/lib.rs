mod cli;
mod demo;
mod directory;

use community_hub::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
