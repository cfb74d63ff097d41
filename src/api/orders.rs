use std::path::Path;

use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, info};
use url::Url;

use super::{ApiClient, ApiError};

/// Relations the vendor should embed within each order.
/// Commas are part of the vendor's syntax, so this is not form-encoded.
const ORDER_INCLUDES: &str =
    "table,employee,fiscalization,transactions,items,items.product,promotions,promotions.items";

/// Orders per page. The vendor's maximum.
const PAGE_SIZE: u32 = 100;

/// Permissions for written order files: owner-writable, world-readable.
#[cfg(unix)]
const OUTPUT_FILE_MODE: u32 = 0o644;

/// Identifies a single page of an organization's orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersQuery {
    pub organization_id: String,
    pub page: String,
    pub date_from: String,
}

impl ApiClient {
    /// Builds the URL for the given page of orders.
    pub fn orders_url(&self, query: &OrdersQuery) -> Result<Url, ApiError> {
        let mut url = self.base_url().clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::RequestBuild(self.base_url().clone()))?
            .pop_if_empty()
            .push(&query.organization_id)
            .push("orders");

        url.set_query(Some(&format!("include={ORDER_INCLUDES}&size={PAGE_SIZE}")));
        url.query_pairs_mut()
            .append_pair("date_from", &query.date_from)
            .append_pair("page", &query.page);

        Ok(url)
    }

    /// Fetches one page of orders, writing the raw response to `output_path`.
    ///
    /// The file is only touched once the full body has been received with
    /// a `200 OK`. Any existing file is overwritten.
    pub async fn fetch_orders(
        &self,
        query: &OrdersQuery,
        output_path: impl AsRef<Path>,
    ) -> Result<(), ApiError> {
        let output_path = output_path.as_ref();
        let url = self.orders_url(query)?;
        debug!(%url, "requesting orders");

        let result = self
            .http()
            .get(url)
            .bearer_auth(self.access_token())
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = result.status();
        if status != reqwest::StatusCode::OK {
            return Err(ApiError::Status { status });
        }

        let body = result.bytes().await.map_err(ApiError::Body)?;
        write_output(output_path, &body).await?;

        info!(
            organization_id = %query.organization_id,
            page = %query.page,
            bytes = body.len(),
            path = %output_path.display(),
            "saved orders"
        );
        Ok(())
    }
}

async fn write_output(path: &Path, contents: &[u8]) -> Result<(), ApiError> {
    let persist_error = |source: std::io::Error| ApiError::Persist {
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(OUTPUT_FILE_MODE);

    let mut file = options.open(path).await.map_err(persist_error)?;
    file.write_all(contents).await.map_err(persist_error)?;
    file.flush().await.map_err(persist_error)
}

/// Fetches one page of orders from the vendor's API and saves it to `output_path`.
///
/// Only a wrapper over `ApiClient::new(token)?.fetch_orders(..)` against the
/// fixed vendor host; use [`ApiClient::with_base_url`] to target another root.
pub async fn fetch_orders(
    organization_id: &str,
    page: &str,
    date_from: &str,
    token: &str,
    output_path: impl AsRef<Path>,
) -> Result<(), ApiError> {
    let query = OrdersQuery {
        organization_id: organization_id.to_string(),
        page: page.to_string(),
        date_from: date_from.to_string(),
    };
    ApiClient::new(token.to_string())?
        .fetch_orders(&query, output_path)
        .await
}
