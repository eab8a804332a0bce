use sea_orm_migration::{prelude::*, sea_orm::TransactionTrait};

use crate::seeder;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let transaction = db.begin().await?;

        seeder::fixed_roles(&transaction).await?;
        seeder::default_pricing_settings(&transaction).await?;
        seeder::bootstrap_admin(&transaction).await?;

        transaction.commit().await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(String::from("cannot be reverted")))
    }
}
