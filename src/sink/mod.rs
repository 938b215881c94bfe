//! Record sinks.
//!
//! The parser's only contract with the outside world: hand over one area
//! record and its ordered child collections. [`RecordSink`] is the port;
//! [`HttpSink`] posts to the per-kind backend services and [`MemorySink`]
//! captures records in arrival order for tests. Sinks must tolerate
//! concurrent use, since each file is migrated on its own worker task.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::area::types::{
    AreaRecord, ItemRecord, MobileRecord, ResetRecord, RoomRecord, ShopRecord, SpecialRecord,
};
use crate::config::SinkConfig;

/// Destination for migrated records. One call per record; implementations
/// own transport, retries, and anything else past serialization.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn put_area(&self, area: &AreaRecord) -> Result<()>;
    async fn put_room(&self, room: &RoomRecord) -> Result<()>;
    async fn put_mobile(&self, mobile: &MobileRecord) -> Result<()>;
    async fn put_item(&self, item: &ItemRecord) -> Result<()>;
    async fn put_shop(&self, shop: &ShopRecord) -> Result<()>;
    async fn put_reset(&self, reset: &ResetRecord) -> Result<()>;
    async fn put_special(&self, special: &SpecialRecord) -> Result<()>;
}

/// Posts each record as JSON to its kind's backend service.
pub struct HttpSink {
    client: reqwest::Client,
    config: SinkConfig,
}

impl HttpSink {
    pub fn new(config: SinkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building http client")?;
        Ok(Self { client, config })
    }

    async fn post<T: Serialize + ?Sized>(&self, base: &str, resource: &str, payload: &T) -> Result<()> {
        let url = format!("{}{}", base, resource);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("posting to {}", url))?;
        let status = response.status();
        if !status.is_success() {
            bail!("{} returned {}", url, status);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordSink for HttpSink {
    async fn put_area(&self, area: &AreaRecord) -> Result<()> {
        self.post(&self.config.area_url, "areas", area).await
    }
    async fn put_room(&self, room: &RoomRecord) -> Result<()> {
        self.post(&self.config.room_url, "room", room).await
    }
    async fn put_mobile(&self, mobile: &MobileRecord) -> Result<()> {
        self.post(&self.config.mobile_url, "mobile", mobile).await
    }
    async fn put_item(&self, item: &ItemRecord) -> Result<()> {
        self.post(&self.config.item_url, "item", item).await
    }
    async fn put_shop(&self, shop: &ShopRecord) -> Result<()> {
        self.post(&self.config.shop_url, "shop", shop).await
    }
    async fn put_reset(&self, reset: &ResetRecord) -> Result<()> {
        self.post(&self.config.reset_url, "reset", reset).await
    }
    async fn put_special(&self, special: &SpecialRecord) -> Result<()> {
        self.post(&self.config.special_url, "special", special).await
    }
}

/// One captured record, tagged by kind, in the order the sink received it.
#[derive(Debug, Clone)]
pub enum SinkRecord {
    Area(AreaRecord),
    Room(RoomRecord),
    Mobile(MobileRecord),
    Item(ItemRecord),
    Shop(ShopRecord),
    Reset(ResetRecord),
    Special(SpecialRecord),
}

/// In-memory sink for tests and dry runs: every record lands in a single
/// ordered log, so delivery-order assertions are trivial.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<SinkRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().await.clone()
    }

    async fn push(&self, record: SinkRecord) {
        self.records.lock().await.push(record);
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn put_area(&self, area: &AreaRecord) -> Result<()> {
        self.push(SinkRecord::Area(area.clone())).await;
        Ok(())
    }
    async fn put_room(&self, room: &RoomRecord) -> Result<()> {
        self.push(SinkRecord::Room(room.clone())).await;
        Ok(())
    }
    async fn put_mobile(&self, mobile: &MobileRecord) -> Result<()> {
        self.push(SinkRecord::Mobile(mobile.clone())).await;
        Ok(())
    }
    async fn put_item(&self, item: &ItemRecord) -> Result<()> {
        self.push(SinkRecord::Item(item.clone())).await;
        Ok(())
    }
    async fn put_shop(&self, shop: &ShopRecord) -> Result<()> {
        self.push(SinkRecord::Shop(shop.clone())).await;
        Ok(())
    }
    async fn put_reset(&self, reset: &ResetRecord) -> Result<()> {
        self.push(SinkRecord::Reset(reset.clone())).await;
        Ok(())
    }
    async fn put_special(&self, special: &SpecialRecord) -> Result<()> {
        self.push(SinkRecord::Special(special.clone())).await;
        Ok(())
    }
}
