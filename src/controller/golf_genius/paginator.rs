use crate::config::AuditConfig;
use crate::controller::golf_genius::client::{QueryParams, RemoteFetcher};
use crate::controller::golf_genius::endpoints::ListShape;
use crate::error::AuditError;
use crate::model::{truncate_for_log, unwrap_list};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PageWarning {
    pub resource: String,
    pub page: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paginated {
    pub items: Vec<Value>,
    pub pages_read: u32,
    /// Set when pagination stopped early; `items` then holds what arrived
    /// before the failing page.
    pub warning: Option<PageWarning>,
    /// Entries that were not objects; counted toward page length, never parsed.
    pub rejected: Vec<Value>,
}

pub struct Paginator<'a> {
    fetcher: &'a dyn RemoteFetcher,
    page_size: usize,
    max_pages: u32,
}

impl<'a> Paginator<'a> {
    #[must_use]
    pub fn new(fetcher: &'a dyn RemoteFetcher, page_size: usize, max_pages: u32) -> Self {
        Self {
            fetcher,
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
        }
    }

    #[must_use]
    pub fn from_config(fetcher: &'a dyn RemoteFetcher, config: &AuditConfig) -> Self {
        Self::new(fetcher, config.page_size, config.max_pages)
    }

    /// Reads pages 1, 2, .. of `path` until a short or empty page.
    ///
    /// # Errors
    ///
    /// Will return `Err` only for an authentication failure; every other
    /// failure ends pagination with a warning and the items read so far
    pub async fn paginate(
        &self,
        path: &str,
        query: &QueryParams,
        shape: ListShape,
    ) -> Result<Paginated, AuditError> {
        let mut result = Paginated::default();
        let mut page: u32 = 1;

        loop {
            let mut page_query = query.clone();
            page_query.insert("page".into(), page.to_string());

            let list = match self.fetcher.fetch(path, &page_query).await {
                Ok(payload) => match unwrap_list(payload, shape.singular, shape.plural) {
                    Some(list) => list,
                    None => {
                        result.warning = Some(stop_warning(
                            path,
                            page,
                            format!("unexpected {} page shape", shape.plural),
                        ));
                        break;
                    }
                },
                Err(err @ AuditError::Auth(_)) => return Err(err),
                Err(err) => {
                    result.warning = Some(stop_warning(path, page, err.to_string()));
                    break;
                }
            };

            // short-page test uses what the remote sent, readable or not
            let count = list.raw_len();
            info!("  Page {page}: {count} {}", shape.plural);
            for entry in &list.rejected {
                warn!(
                    "{path} page {page}: unreadable {} entry {}",
                    shape.singular,
                    truncate_for_log(&entry.to_string(), 80)
                );
            }
            result.items.extend(list.items);
            result.rejected.extend(list.rejected);
            result.pages_read = page;

            if count < self.page_size {
                break;
            }
            if page >= self.max_pages {
                result.warning = Some(stop_warning(
                    path,
                    page,
                    format!("stopped at page {page} to prevent an endless listing"),
                ));
                break;
            }
            page += 1;
        }

        info!("  Total {} collected: {}", shape.plural, result.items.len());
        Ok(result)
    }
}

fn stop_warning(path: &str, page: u32, reason: String) -> PageWarning {
    warn!("{path}: pagination stopped at page {page}: {reason}");
    PageWarning {
        resource: path.to_string(),
        page,
        reason,
    }
}
