// ── Catalog facade ──
//
// Owns the HTTP client and the CatalogStore. Reads go straight to the
// backend and land in the store through sequenced fetches; writes are
// routed through a command channel to a single processor task.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use artesano_api::transport::{TlsMode, TransportConfig};
use artesano_api::{ArtesanoClient, types};

use crate::command::{Command, CommandEnvelope, CommandResult, FeedstockRequest, ProductRequest};
use crate::config::{CatalogConfig, TlsVerification};
use crate::convert::page_from;
use crate::error::CoreError;
use crate::form::{FeedstockForm, ProductForm};
use crate::guard;
use crate::listing::{FEEDSTOCK_OPTIONS_LIMIT, ListView};
use crate::model::{EntityId, Feedstock, Page, Product};
use crate::store::CatalogStore;
use crate::stream::ResourceStream;

const COMMAND_CHANNEL_SIZE: usize = 64;

// ── Catalog ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<CatalogInner>`. Call [`start()`](Self::start)
/// before executing commands and [`shutdown()`](Self::shutdown) when done.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    config: CatalogConfig,
    client: ArtesanoClient,
    store: Arc<CatalogStore>,
    command_tx: mpsc::Sender<CommandEnvelope>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Catalog {
    /// Build the HTTP client for `config`. Does not start the command
    /// processor.
    pub fn new(config: CatalogConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = ArtesanoClient::new(config.base_url.as_str(), &transport)?;
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);

        Ok(Self {
            inner: Arc::new(CatalogInner {
                config,
                client,
                store: Arc::new(CatalogStore::new()),
                command_tx,
                command_rx: Mutex::new(Some(command_rx)),
                cancel: CancellationToken::new(),
                task_handle: Mutex::new(None),
            }),
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Spawn the command processor. Calling it twice is a no-op.
    pub async fn start(&self) {
        let Some(rx) = self.inner.command_rx.lock().await.take() else {
            return;
        };
        let handle = tokio::spawn(command_processor_task(self.clone(), rx));
        *self.inner.task_handle.lock().await = Some(handle);
        info!(url = %self.inner.config.base_url, "catalog started");
    }

    /// Stop the command processor and wait for it to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        if let Some(handle) = self.inner.task_handle.lock().await.take() {
            let _ = handle.await;
        }
        debug!("catalog stopped");
    }

    /// One-shot: start, run closure, shut down.
    pub async fn oneshot<F, Fut, T>(config: CatalogConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Catalog) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let catalog = Catalog::new(config)?;
        catalog.start().await;
        let result = f(catalog.clone()).await;
        catalog.shutdown().await;
        result
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a command through the processor task and await the result.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        if self.inner.cancel.is_cancelled() || self.inner.task_handle.lock().await.is_none() {
            return Err(CoreError::CatalogStopped);
        }

        let (tx, rx) = tokio::sync::oneshot::channel();
        self.inner
            .command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::CatalogStopped)?;

        rx.await.map_err(|_| CoreError::CatalogStopped)?
    }

    // ── Subscriptions ────────────────────────────────────────────

    pub fn feedstocks(&self) -> ResourceStream<Feedstock> {
        self.inner.store.subscribe_feedstocks()
    }

    pub fn products(&self) -> ResourceStream<Product> {
        self.inner.store.subscribe_products()
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Fetch the page `view` points at and offer it to the store. The page
    /// is returned even if a newer fetch made it stale for the store.
    pub async fn fetch_feedstocks(&self, view: &ListView) -> Result<Page<Feedstock>, CoreError> {
        let query = view.query();
        let store = &self.inner.store;
        let ticket = store.begin_feedstock_fetch();
        debug!(seq = ticket.seq(), ?query, "fetching feedstocks");

        match self
            .inner
            .client
            .list_feedstocks(query.page, query.size, query.q.as_deref())
            .await
        {
            Ok(page) => {
                let page: Page<Feedstock> = page_from(page);
                store.apply_feedstock_page(ticket, page.clone());
                Ok(page)
            }
            Err(e) => {
                warn!(error = %e, "feedstock fetch failed");
                store.fail_feedstock_fetch(ticket);
                Err(self.convert_err(e))
            }
        }
    }

    pub async fn fetch_products(&self, view: &ListView) -> Result<Page<Product>, CoreError> {
        let query = view.query();
        let store = &self.inner.store;
        let ticket = store.begin_product_fetch();
        debug!(seq = ticket.seq(), ?query, "fetching products");

        match self
            .inner
            .client
            .list_products(query.page, query.size, query.q.as_deref(), query.search_type)
            .await
        {
            Ok(page) => {
                let page: Page<Product> = page_from(page);
                store.apply_product_page(ticket, page.clone());
                Ok(page)
            }
            Err(e) => {
                warn!(error = %e, "product fetch failed");
                store.fail_product_fetch(ticket);
                Err(self.convert_err(e))
            }
        }
    }

    /// Feedstocks for the product form's selector. Must not touch the
    /// store: `delete_feedstock_in_view` counts the stored page.
    pub async fn feedstock_options(&self) -> Result<Vec<Feedstock>, CoreError> {
        let page = self
            .inner
            .client
            .list_feedstocks(0, FEEDSTOCK_OPTIONS_LIMIT, None)
            .await
            .map_err(|e| self.convert_err(e))?;
        Ok(page.items.into_iter().map(Feedstock::from).collect())
    }

    pub async fn get_feedstock(&self, id: EntityId) -> Result<Feedstock, CoreError> {
        self.inner
            .client
            .get_feedstock(id.get())
            .await
            .map(Feedstock::from)
            .map_err(|e| self.convert_err(e).for_entity("Feedstock", id))
    }

    pub async fn get_product(&self, id: EntityId) -> Result<Product, CoreError> {
        self.inner
            .client
            .get_product(id.get())
            .await
            .map(Product::from)
            .map_err(|e| self.convert_err(e).for_entity("Product", id))
    }

    // ── Writes ───────────────────────────────────────────────────

    pub async fn create_feedstock(&self, request: FeedstockRequest) -> Result<Feedstock, CoreError> {
        expect_feedstock(self.execute(Command::CreateFeedstock(request)).await?)
    }

    pub async fn update_feedstock(
        &self,
        id: EntityId,
        request: FeedstockRequest,
    ) -> Result<Feedstock, CoreError> {
        expect_feedstock(self.execute(Command::UpdateFeedstock { id, request }).await?)
    }

    /// Delete a feedstock unless products still use it. A locked feedstock
    /// never reaches the backend.
    pub async fn delete_feedstock(&self, feedstock: &Feedstock) -> Result<(), CoreError> {
        guard::check_feedstock_deletable(feedstock)?;
        self.execute(Command::DeleteFeedstock { id: feedstock.id })
            .await
            .map(|_| ())
    }

    pub async fn create_product(&self, request: ProductRequest) -> Result<Product, CoreError> {
        expect_product(self.execute(Command::CreateProduct(request)).await?)
    }

    pub async fn update_product(
        &self,
        id: EntityId,
        request: ProductRequest,
    ) -> Result<Product, CoreError> {
        expect_product(self.execute(Command::UpdateProduct { id, request }).await?)
    }

    pub async fn delete_product(&self, id: EntityId) -> Result<(), CoreError> {
        self.execute(Command::DeleteProduct { id }).await.map(|_| ())
    }

    // ── List-screen flows ────────────────────────────────────────

    /// Submit the feedstock form, then reload the first page of `view`'s
    /// size with filters cleared. A failed reload is logged, not returned:
    /// the feedstock was created.
    pub async fn submit_feedstock_form(
        &self,
        form: &FeedstockForm,
        view: &mut ListView,
    ) -> Result<Feedstock, CoreError> {
        let created = self.create_feedstock(form.to_request()?).await?;
        view.clear_filters();
        if let Err(e) = self.fetch_feedstocks(view).await {
            warn!(error = %e, "refetch after create failed");
        }
        Ok(created)
    }

    pub async fn submit_product_form(
        &self,
        form: &ProductForm,
        view: &mut ListView,
    ) -> Result<Product, CoreError> {
        let created = self.create_product(form.to_request()?).await?;
        view.clear_filters();
        if let Err(e) = self.fetch_products(view).await {
            warn!(error = %e, "refetch after create failed");
        }
        Ok(created)
    }

    /// Guarded delete from a list screen. On success the view steps back a
    /// page if it just emptied a later page, and the page is refetched. On
    /// failure `view` is left untouched.
    pub async fn delete_feedstock_in_view(
        &self,
        feedstock: &Feedstock,
        view: &mut ListView,
    ) -> Result<(), CoreError> {
        // The stored page is the one `view` last fetched: only list fetches
        // write to it (`feedstock_options` bypasses the store).
        let items_on_page = self.inner.store.feedstocks_snapshot().items.len();
        self.delete_feedstock(feedstock).await?;
        view.after_delete(items_on_page);
        if let Err(e) = self.fetch_feedstocks(view).await {
            warn!(error = %e, "refetch after delete failed");
        }
        Ok(())
    }

    /// Delete a product, then refetch the current page as-is.
    pub async fn delete_product_in_view(
        &self,
        id: EntityId,
        view: &ListView,
    ) -> Result<(), CoreError> {
        self.delete_product(id).await?;
        if let Err(e) = self.fetch_products(view).await {
            warn!(error = %e, "refetch after delete failed");
        }
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────

    fn convert_err(&self, err: artesano_api::Error) -> CoreError {
        convert_err(&self.inner.config, err)
    }
}

// ── Background tasks ─────────────────────────────────────────────

async fn command_processor_task(catalog: Catalog, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = catalog.inner.cancel.clone();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let result = route_command(&catalog, envelope.command).await;
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

// ── Command routing ──────────────────────────────────────────────

/// Route a command to the matching API call.
async fn route_command(catalog: &Catalog, cmd: Command) -> Result<CommandResult, CoreError> {
    let client = &catalog.inner.client;
    let config = &catalog.inner.config;

    match cmd {
        // ── Feedstocks ───────────────────────────────────────────
        Command::CreateFeedstock(request) => {
            let body = types::FeedstockCreateUpdate::from(&request);
            let created = Feedstock::from(
                client
                    .create_feedstock(&body)
                    .await
                    .map_err(|e| convert_err(config, e))?,
            );
            info!(id = %created.id, code = %created.code, "feedstock created");
            catalog.inner.store.prepend_feedstock(created.clone());
            Ok(CommandResult::Feedstock(created))
        }

        Command::UpdateFeedstock { id, request } => {
            let body = types::FeedstockCreateUpdate::from(&request);
            let updated = client
                .update_feedstock(id.get(), &body)
                .await
                .map_err(|e| convert_err(config, e).for_entity("Feedstock", id))?;
            Ok(CommandResult::Feedstock(updated.into()))
        }

        Command::DeleteFeedstock { id } => {
            client
                .delete_feedstock(id.get())
                .await
                .map_err(|e| convert_err(config, e).for_entity("Feedstock", id))?;
            info!(%id, "feedstock deleted");
            Ok(CommandResult::Ok)
        }

        // ── Products ─────────────────────────────────────────────
        Command::CreateProduct(request) => {
            let body = types::ProductCreateUpdate::from(&request);
            let created = Product::from(
                client
                    .create_product(&body)
                    .await
                    .map_err(|e| convert_err(config, e))?,
            );
            info!(id = %created.id, code = %created.code, "product created");
            Ok(CommandResult::Product(created))
        }

        Command::UpdateProduct { id, request } => {
            let body = types::ProductCreateUpdate::from(&request);
            let updated = client
                .update_product(id.get(), &body)
                .await
                .map_err(|e| convert_err(config, e).for_entity("Product", id))?;
            Ok(CommandResult::Product(updated.into()))
        }

        Command::DeleteProduct { id } => {
            client
                .delete_product(id.get())
                .await
                .map_err(|e| convert_err(config, e).for_entity("Product", id))?;
            info!(%id, "product deleted");
            Ok(CommandResult::Ok)
        }
    }
}

fn expect_feedstock(result: CommandResult) -> Result<Feedstock, CoreError> {
    match result {
        CommandResult::Feedstock(f) => Ok(f),
        other => Err(CoreError::Internal(format!(
            "expected a feedstock, got {other:?}"
        ))),
    }
}

fn expect_product(result: CommandResult) -> Result<Product, CoreError> {
    match result {
        CommandResult::Product(p) => Ok(p),
        other => Err(CoreError::Internal(format!("expected a product, got {other:?}"))),
    }
}

// ── Transport helpers ────────────────────────────────────────────

/// Convert an API error, filling in the configured timeout.
fn convert_err(config: &CatalogConfig, err: artesano_api::Error) -> CoreError {
    match CoreError::from(err) {
        CoreError::Timeout { .. } => CoreError::Timeout {
            timeout_secs: config.timeout.as_secs(),
        },
        other => other,
    }
}

fn build_transport(config: &CatalogConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
