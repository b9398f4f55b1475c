use sea_orm_migration::prelude::*;

use partline_identity_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
