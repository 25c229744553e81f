use crate::*;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

pub type TransactionsResult = Result<Vec<Transaction>, BatchError<Transaction, FetchError>>;

/// Client for the Chain.com blockchain query, webhook and notification
/// endpoints. Every request is authenticated with the configured API key.
#[derive(Clone)]
pub struct ChainClient {
    client: Client,
    config: ChainConfig,
    root_url: Url,
}

impl ChainClient {
    pub fn new(client: Option<Client>, config: ChainConfig) -> FetchResult<Self> {
        let root_url =
            parse_root_url(config.root_url.as_deref().unwrap_or(DEFAULT_ROOT_URL))?;
        Ok(Self {
            client: client.unwrap_or_else(Client::new),
            config,
            root_url,
        })
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    fn network_url<S: AsRef<str>>(&self, segments: &[S]) -> Url {
        let network = join_segments(&self.root_url, &[self.config.network.as_str()]);
        join_segments(&network, segments)
    }

    async fn execute_raw(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> FetchResult<Vec<u8>> {
        tracing::log::debug!(target: LOG_TARGET, "{} {}", method, url);
        let response = request
            .basic_auth(&self.config.api_key_id, Some(&self.config.api_key_secret))
            .timeout(self.config.timeout_duration.unwrap_or(DEFAULT_TIMEOUT))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        if status != reqwest::StatusCode::OK {
            return Err(api_error(&url, status, &body));
        }
        Ok(body.to_vec())
    }

    async fn request_json<T: DeserializeOwned>(&self, method: Method, url: Url) -> FetchResult<T> {
        let request = self.client.request(method.clone(), url.clone());
        let body = self.execute_raw(method, url, request).await?;
        decode_json(&body)
    }

    async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> FetchResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.request(method.clone(), url.clone()).json(body);
        let body = self.execute_raw(method, url, request).await?;
        decode_json(&body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        self.request_json(Method::GET, url).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        self.request_json(Method::DELETE, url).await
    }

    /// Basic balance details of one address.
    pub async fn get_address(&self, hash: &str) -> FetchResult<Address> {
        self.get_address_multi(&[hash])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::UnknownResponse(format!("no address {}", hash)))
    }

    /// Balance details of up to `MAX_ADDRESSES` addresses in one request.
    pub async fn get_address_multi<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> FetchResult<Vec<Address>> {
        let joined = validate_addresses(hashes)?;
        self.get_json(self.network_url(&["addresses", joined.as_str()]))
            .await
    }

    pub async fn get_address_transactions(
        &self,
        hash: &str,
        limit: Option<u32>,
    ) -> FetchResult<Vec<Transaction>> {
        self.get_address_transactions_multi(&[hash], limit).await
    }

    /// Latest transactions touching any of the addresses. A `limit` of `None`
    /// or zero means `DEFAULT_ADDRESS_TRANSACTIONS_LIMIT`.
    pub async fn get_address_transactions_multi<S: AsRef<str>>(
        &self,
        hashes: &[S],
        limit: Option<u32>,
    ) -> FetchResult<Vec<Transaction>> {
        let joined = validate_addresses(hashes)?;
        let limit = address_transactions_limit(limit)?;
        let mut url = self.network_url(&["addresses", joined.as_str(), "transactions"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.get_json(url).await
    }

    pub async fn get_address_unspent_outputs(&self, hash: &str) -> FetchResult<Vec<Output>> {
        self.get_address_unspent_outputs_multi(&[hash]).await
    }

    /// Unspent outputs of the addresses, usable as inputs of a new transaction.
    pub async fn get_address_unspent_outputs_multi<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> FetchResult<Vec<Output>> {
        let joined = validate_addresses(hashes)?;
        self.get_json(self.network_url(&["addresses", joined.as_str(), "unspents"]))
            .await
    }

    pub async fn get_block_by_hash(&self, hash: &str) -> FetchResult<Block> {
        self.get_json(self.network_url(&["blocks", hash])).await
    }

    pub async fn get_block_by_height(&self, height: u64) -> FetchResult<Block> {
        self.get_json(self.network_url(&["blocks", height.to_string().as_str()]))
            .await
    }

    pub async fn get_latest_block(&self) -> FetchResult<Block> {
        self.get_json(self.network_url(&["blocks", "latest"])).await
    }

    /// A transaction with its inputs and outputs.
    pub async fn get_transaction(&self, hash: &str) -> FetchResult<Transaction> {
        self.get_json(self.network_url(&["transactions", hash])).await
    }

    /// Fetches every transaction with one request per hash, running
    /// `config.num_workers` requests at a time. Transactions come back in the
    /// order of `hashes`; on failure the error still holds the ones that were
    /// fetched.
    pub async fn get_transaction_multi(&self, hashes: Vec<String>) -> TransactionsResult {
        let client = self.clone();
        fetch_batch(hashes, self.config.num_workers, move |hash: String| {
            let client = client.clone();
            async move { client.get_transaction(&hash).await }
        })
        .await
    }

    /// All transactions of a block, in block order.
    pub async fn get_block_transactions(&self, block: &Block) -> TransactionsResult {
        self.get_transaction_multi(block.transaction_hashes.clone())
            .await
    }

    /// Broadcasts a signed transaction given in hex and returns its hash.
    pub async fn send_transaction(&self, hex: &str) -> FetchResult<String> {
        #[derive(Serialize)]
        struct SendRequest<'a> {
            hex: &'a str,
        }
        #[derive(serde::Deserialize)]
        struct SendResponse {
            #[serde(default)]
            transaction_hash: Option<String>,
        }

        let url = self.network_url(&["transactions"]);
        let request = self.client.put(url.clone()).json(&SendRequest { hex });
        let body = self.execute_raw(Method::PUT, url, request).await?;
        let response: SendResponse = decode_json(&body)?;
        match response.transaction_hash {
            Some(hash) if !hash.is_empty() => Ok(hash),
            _ => Err(FetchError::UnknownResponse(
                String::from_utf8_lossy(&body).into_owned(),
            )),
        }
    }

    pub async fn create_webhook(&self, id: &str, url: &str) -> FetchResult<Webhook> {
        let webhook = Webhook {
            id: id.to_string(),
            url: url.to_string(),
        };
        self.send_json(Method::POST, self.network_url(&["webhooks"]), &webhook)
            .await
    }

    pub async fn list_webhooks(&self) -> FetchResult<Vec<Webhook>> {
        self.get_json(self.network_url(&["webhooks"])).await
    }

    /// Points an existing webhook at a new URL. Its events are kept.
    pub async fn update_webhook(&self, id: &str, url: &str) -> FetchResult<Webhook> {
        let webhook = Webhook {
            id: id.to_string(),
            url: url.to_string(),
        };
        self.send_json(Method::PUT, self.network_url(&["webhooks", id]), &webhook)
            .await
    }

    /// Deletes a webhook together with all of its events. The API answers with
    /// the list of deleted webhooks.
    pub async fn delete_webhook(&self, id: &str) -> FetchResult<Vec<Webhook>> {
        self.delete_json(self.network_url(&["webhooks", id])).await
    }

    pub async fn create_webhook_event(
        &self,
        webhook_id: &str,
        event: WebhookEventType,
        network: Network,
        address: &str,
        confirmations: i64,
    ) -> FetchResult<WebhookEvent> {
        #[derive(Serialize)]
        struct CreateEventRequest<'a> {
            event: WebhookEventType,
            block_chain: Network,
            address: &'a str,
            confirmations: i64,
        }

        let request = CreateEventRequest {
            event,
            block_chain: network,
            address,
            confirmations,
        };
        self.send_json(
            Method::POST,
            self.network_url(&["webhooks", webhook_id, "events"]),
            &request,
        )
        .await
    }

    pub async fn list_webhook_events(&self, webhook_id: &str) -> FetchResult<Vec<WebhookEvent>> {
        self.get_json(self.network_url(&["webhooks", webhook_id, "events"]))
            .await
    }

    /// Stops all further POST requests for the event.
    pub async fn delete_webhook_event(
        &self,
        webhook_id: &str,
        event: WebhookEventType,
        address: &str,
    ) -> FetchResult<WebhookEvent> {
        self.delete_json(self.network_url(&[
            "webhooks",
            webhook_id,
            "events",
            event.as_str(),
            address,
        ]))
        .await
    }

    pub async fn create_new_transaction_notification(
        &self,
        url: &str,
    ) -> FetchResult<Notification> {
        self.create_notification(NotificationType::NewTransaction, url)
            .await
    }

    pub async fn create_new_block_notification(&self, url: &str) -> FetchResult<Notification> {
        self.create_notification(NotificationType::NewBlock, url)
            .await
    }

    /// Subscribes `url` to notifications of the given type on the configured
    /// network.
    pub async fn create_notification(
        &self,
        kind: NotificationType,
        url: &str,
    ) -> FetchResult<Notification> {
        #[derive(Serialize)]
        struct CreateNotificationRequest<'a> {
            #[serde(rename = "type")]
            kind: NotificationType,
            block_chain: Network,
            url: &'a str,
        }

        let request = CreateNotificationRequest {
            kind,
            block_chain: self.config.network,
            url,
        };
        self.send_json(
            Method::POST,
            join_segments(&self.root_url, &["notifications"]),
            &request,
        )
        .await
    }

    pub async fn list_notifications(&self) -> FetchResult<Vec<Notification>> {
        self.get_json(join_segments(&self.root_url, &["notifications"]))
            .await
    }

    pub async fn delete_notification(&self, id: &str) -> FetchResult<Notification> {
        self.delete_json(join_segments(&self.root_url, &["notifications", id]))
            .await
    }
}
