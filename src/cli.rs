//! CLI helper functions

use crate::{
    clean::{
        CardCleaner, DateEventCleaner, OrderCleaner, ProductCleaner, StoreCleaner, UserCleaner,
    },
    client::StoresApi,
    config::{Entity, Settings},
    database::{DatabaseConnector, TableExtractor, TableLoader},
    etl::Pipeline,
    extract::{DocumentExtractor, ObjectStoreExtractor, StoresExtractor},
};
use eyre::{Context, Result, eyre};
use owo_colors::OwoColorize;
use std::path::Path;

/// Build a connector from a credentials file
pub fn load_connector(path: impl AsRef<Path>) -> Result<DatabaseConnector> {
    let path = path.as_ref();
    log::debug!("Reading credentials from {}", path.display());
    DatabaseConnector::from_file(path).context("Failed to create database connector")
}

/// List table names in the source or destination database
pub fn list_tables(settings: &Settings, target: bool) -> Result<Vec<String>> {
    let creds = match target {
        true => &settings.target_creds,
        false => &settings.source_creds,
    };
    let connector = load_connector(creds)?;
    log::info!("Listing tables in {}", connector.credentials().bright_black());
    connector.list_tables()
}

/// Run extract → clean → load for one entity
///
/// Returns the number of rows written to the destination table
pub async fn run_entity(entity: Entity, settings: &Settings) -> Result<usize> {
    let target = TableLoader::new(load_connector(&settings.target_creds)?, entity.target_table());

    match entity {
        Entity::Users => {
            let source = load_connector(&settings.source_creds)?;
            let extractor = TableExtractor::new(source, &settings.users_table);
            let cleaner = UserCleaner::new().drop_birth_after_join(settings.drop_birth_after_join);
            Pipeline::new(extractor, cleaner, target).run().await
        }
        Entity::Cards => {
            let url = Settings::require(&settings.card_details_url, "CARD_DETAILS_URL")?;
            let extractor = DocumentExtractor::new(url)?.with_wide_column("card_provider");
            Pipeline::new(extractor, CardCleaner, target).run().await
        }
        Entity::Stores => {
            let api_settings = settings
                .stores_api
                .clone()
                .ok_or_else(|| eyre!("STORES_API_URL environment variable not set"))?;
            let api = StoresApi::try_new(api_settings).context("Failed to create stores API client")?;
            Pipeline::new(StoresExtractor::new(api), StoreCleaner, target)
                .run()
                .await
        }
        Entity::Products => {
            let url = Settings::require(&settings.products_url, "PRODUCTS_URL")?;
            let extractor = ObjectStoreExtractor::new(url)?;
            Pipeline::new(extractor, ProductCleaner::new(), target)
                .run()
                .await
        }
        Entity::Orders => {
            let source = load_connector(&settings.source_creds)?;
            let extractor = TableExtractor::new(source, &settings.orders_table);
            Pipeline::new(extractor, OrderCleaner, target).run().await
        }
        Entity::DateEvents => {
            let url = Settings::require(&settings.date_details_url, "DATE_DETAILS_URL")?;
            let extractor = ObjectStoreExtractor::new(url)?;
            Pipeline::new(extractor, DateEventCleaner, target).run().await
        }
    }
}

/// Run several entity pipelines in order
///
/// Without `keep_going` the first failure aborts the run. With it, failures
/// are logged, the remaining entities still run, and the run fails at the
/// end naming every failed entity.
pub async fn run_entities(
    entities: &[Entity],
    settings: &Settings,
    keep_going: bool,
) -> Result<usize> {
    let mut total = 0;
    let mut failed = Vec::new();

    for entity in entities {
        log::info!(
            "Running {} pipeline into {}",
            entity.cyan(),
            entity.target_table().bright_black()
        );
        match run_entity(*entity, settings)
            .await
            .with_context(|| format!("{} pipeline failed", entity))
        {
            Ok(count) => {
                log::info!("✓ Loaded {} {} row(s)", count, entity);
                total += count;
            }
            Err(e) if keep_going => {
                log::error!("{:#}", e);
                failed.push(entity.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    if !failed.is_empty() {
        eyre::bail!("{} pipeline(s) failed: {}", failed.len(), failed.join(", "));
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbCredentials;
    use crate::table::{Cell, Table};
    use std::io::Write;
    use tempfile::TempDir;

    fn write_creds(dir: &TempDir, name: &str) -> std::path::PathBuf {
        let db = dir.path().join(format!("{}.db", name));
        let path = dir.path().join(format!("{}.yaml", name));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "RDS_DATABASE: {}", db.display()).unwrap();
        path
    }

    fn settings(dir: &TempDir) -> Settings {
        Settings {
            source_creds: write_creds(dir, "source"),
            target_creds: write_creds(dir, "target"),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_run_orders() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);

        let header = ["level_0", "index", "first_name", "last_name", "1", "store_code"];
        let orders = Table::from_rows(
            header.iter().map(|s| s.to_string()).collect(),
            vec![vec![
                Cell::Int(0),
                Cell::Int(0),
                Cell::Null,
                Cell::Null,
                Cell::Null,
                Cell::from("BL-8387506C"),
            ]],
        )
        .unwrap();
        load_connector(&settings.source_creds)
            .unwrap()
            .upload_table(&orders, "orders_table")
            .unwrap();

        let count = run_entity(Entity::Orders, &settings).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(list_tables(&settings, true).unwrap(), vec!["orders_table".to_string()]);

        let target = DatabaseConnector::new(DbCredentials::read(&settings.target_creds).unwrap());
        let loaded = target.read_table("orders_table").unwrap();
        assert_eq!(loaded.column_names(), vec!["store_code"]);
    }

    #[tokio::test]
    async fn test_missing_setting() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);

        let err = run_entity(Entity::Products, &settings).await.unwrap_err();
        assert!(err.to_string().contains("PRODUCTS_URL"));
    }

    #[tokio::test]
    async fn test_keep_going_reports_failures() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);

        // no source tables exist, so both pipelines fail
        let err = run_entities(&[Entity::Users, Entity::Orders], &settings, true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("2 pipeline(s) failed"));

        let err = run_entities(&[Entity::Users, Entity::Orders], &settings, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("users pipeline failed"));
    }
}
