pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_admin_session_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    // Keep our bookkeeping table apart from any host application's migrations.
    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("model_portfolio_migrations").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_admin_session_table::Migration)]
    }
}
