//! Paginated stores API extractor

use crate::client::StoresApi;
use crate::etl::Extractor;
use crate::table::Table;
use eyre::{Context, Result};

/// Extracts every store record from the stores API
///
/// Fetches the store count first, then requests each index from `0` to
/// `count - 1` one at a time. Rows keep request order.
///
/// # Example
/// ```no_run
/// use sales_data_etl::client::StoresApi;
/// use sales_data_etl::config::StoresApiSettings;
/// use sales_data_etl::etl::Extractor;
/// use sales_data_etl::extract::StoresExtractor;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("https://api.example.com/prod/")?;
/// let api = StoresApi::try_new(StoresApiSettings::new(url, "key"))?;
/// let stores = StoresExtractor::new(api).extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct StoresExtractor {
    api: StoresApi,
}

impl StoresExtractor {
    pub fn new(api: StoresApi) -> Self {
        Self { api }
    }
}

impl Extractor for StoresExtractor {
    async fn extract(&self) -> Result<Table> {
        let count = self
            .api
            .number_of_stores()
            .await
            .with_context(|| format!("Failed to count stores at {}", self.api))?;
        log::info!("Fetching {} store(s) from {}", count, self.api);

        let mut table = Table::new();
        for index in 0..count {
            let record = self.api.store(index).await?;
            log::debug!("Fetched store {}", index);
            table.push_record(&record);
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoresApiSettings;
    use crate::table::Cell;
    use httpmock::prelude::*;
    use serde_json::json;
    use url::Url;

    #[tokio::test]
    async fn test_extract_all_stores_in_order() {
        let server = MockServer::start();
        server
            .mock(|when, then| {
                when.method(GET).path("/prod/number_stores");
                then.status(200).json_body(json!({"number_stores": 3}));
            });
        let mut records = Vec::new();
        for i in 0..3 {
            let mock = server
                .mock(|when, then| {
                    when.method(GET)
                        .path(format!("/prod/store_details/{}", i))
                        .header("x-api-key", "secret");
                    then.status(200).json_body(json!({
                        "index": i,
                        "store_code": format!("ST-{}", i),
                        "country_code": "GB"
                    }));
                });
            records.push(mock);
        }

        let url = Url::parse(&server.url("/prod/")).unwrap();
        let api = StoresApi::try_new(StoresApiSettings::new(url, "secret")).unwrap();
        let table = StoresExtractor::new(api).extract().await.unwrap();

        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.column_names(), vec!["index", "store_code", "country_code"]);
        for i in 0..3 {
            assert_eq!(table.cell("index", i).unwrap(), &Cell::Int(i as i64));
        }
        for mock in records {
            mock.assert_calls(1);
        }
    }

    #[tokio::test]
    async fn test_zero_stores() {
        let server = MockServer::start();
        server
            .mock(|when, then| {
                when.method(GET).path("/prod/number_stores");
                then.status(200).json_body(json!({"number_stores": 0}));
            });

        let url = Url::parse(&server.url("/prod/")).unwrap();
        let api = StoresApi::try_new(StoresApiSettings::new(url, "secret")).unwrap();
        let table = StoresExtractor::new(api).extract().await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_failed_record_aborts() {
        let server = MockServer::start();
        server
            .mock(|when, then| {
                when.method(GET).path("/prod/number_stores");
                then.status(200).json_body(json!({"number_stores": 2}));
            });
        server
            .mock(|when, then| {
                when.method(GET).path("/prod/store_details/0");
                then.status(200).json_body(json!({"index": 0}));
            });
        server
            .mock(|when, then| {
                when.method(GET).path("/prod/store_details/1");
                then.status(500);
            });

        let url = Url::parse(&server.url("/prod/")).unwrap();
        let api = StoresApi::try_new(StoresApiSettings::new(url, "secret")).unwrap();
        assert!(StoresExtractor::new(api).extract().await.is_err());
    }
}
