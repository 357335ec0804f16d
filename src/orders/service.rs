//! Order intake orchestration
//!
//! Composition root of the subsystem: validates submissions, assembles the
//! persisted record, and coordinates the store, the statistics aggregator
//! and the export generator.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::export::{ExportError, ExportFile, ExportGenerator};
use crate::orders::model;
use crate::orders::{Order, OrderStore, OrderSubmission};
use crate::stats::{StatsAggregator, StatsRecord};
use crate::utils::{AppError, AppResult, validation};

#[derive(Clone)]
pub struct OrderService {
    inner: Arc<Inner>,
}

struct Inner {
    store: OrderStore,
    stats: StatsAggregator,
    generator: ExportGenerator,
    /// Serializes export snapshots against queue resets
    maintenance: Mutex<()>,
    /// Millis of the last issued serial; keeps serials strictly increasing
    /// even when two submissions land in the same millisecond
    last_serial_millis: Mutex<i64>,
}

impl OrderService {
    pub fn new(store: OrderStore, stats: StatsAggregator, generator: ExportGenerator) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                stats,
                generator,
                maintenance: Mutex::new(()),
                last_serial_millis: Mutex::new(0),
            }),
        }
    }

    /// Accept a new order submission.
    ///
    /// Validates required fields (one error listing everything missing),
    /// builds the record with a generated serial and defaulted special
    /// notes, appends it durably, then updates statistics best-effort: a
    /// stats failure is logged but never rolls back the accepted order.
    pub fn submit(&self, submission: OrderSubmission) -> AppResult<Order> {
        let mut missing = Vec::new();
        validation::require_field(
            &mut missing,
            "Customer_Name",
            submission.customer_name.as_deref(),
        );
        validation::require_field(&mut missing, "Mobile_No", submission.mobile_no.as_deref());
        validation::require_field(
            &mut missing,
            "Description",
            submission.description.as_deref(),
        );
        validation::require_field(&mut missing, "Street", submission.street.as_deref());
        validation::require_field(&mut missing, "City", submission.city.as_deref());
        validation::require_field(
            &mut missing,
            "Alternative_Contact",
            submission.alternative_contact.as_deref(),
        );
        validation::require_weight(&mut missing, "totalWeight", submission.total_weight);

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let alternative_contact = submission.alternative_contact.unwrap_or_default();
        let order = Order {
            serial: self.next_serial(),
            description: submission.description.unwrap_or_default(),
            total_weight: submission.total_weight.unwrap_or_default(),
            package_volume: String::new(),
            cod_value: String::new(),
            special_notes: submission
                .special_notes
                .filter(|notes| !notes.trim().is_empty())
                .unwrap_or_else(|| model::default_special_notes(&alternative_contact)),
            customer_name: submission.customer_name.unwrap_or_default(),
            mobile_no: submission.mobile_no.unwrap_or_default(),
            street: submission.street.unwrap_or_default(),
            city: submission.city.unwrap_or_default(),
            package_ref: String::new(),
            merchant_name: String::new(),
            warehouse_name: String::new(),
            has_pod: String::new(),
            seller_name: String::new(),
        };

        self.inner
            .store
            .append(order.clone())
            .map_err(|e| AppError::Persistence(e.to_string()))?;

        // The order is already durable; stale stats are preferable to a
        // lost order, so this failure does not fail the submission.
        if let Err(e) = self.inner.stats.record_submission(Utc::now()) {
            tracing::warn!(
                "Statistics update failed after order {}: {}",
                order.serial,
                e
            );
        }

        tracing::info!(serial = %order.serial, customer = %order.customer_name, "Order accepted");
        Ok(order)
    }

    /// Export all pending orders to the next numbered workbook.
    ///
    /// Holds the maintenance lock so the snapshot cannot interleave with a
    /// concurrent reset.
    pub fn export_orders(&self) -> AppResult<ExportFile> {
        let _guard = self.inner.maintenance.lock();
        let orders = self.inner.store.list_all();
        match self.inner.generator.export_all(&orders) {
            Ok(file) => Ok(file),
            Err(ExportError::Empty) => Err(AppError::NoOrders),
            Err(e) => Err(AppError::Export(e.to_string())),
        }
    }

    /// Clear the order queue. Statistics and the export counter are
    /// untouched: they track historical volume, not queue depth.
    pub fn reset_orders(&self) -> AppResult<()> {
        let _guard = self.inner.maintenance.lock();
        self.inner
            .store
            .clear()
            .map_err(|e| AppError::Persistence(e.to_string()))?;
        tracing::info!("Order queue cleared");
        Ok(())
    }

    pub fn get_stats(&self) -> StatsRecord {
        self.inner.stats.read()
    }

    pub fn order_count(&self) -> usize {
        self.inner.store.count()
    }

    pub fn list_orders(&self) -> Vec<Order> {
        self.inner.store.list_all()
    }

    /// Time-based serial, strictly increasing across calls
    fn next_serial(&self) -> String {
        let mut last = self.inner.last_serial_millis.lock();
        let mut millis = Utc::now().timestamp_millis();
        if millis <= *last {
            millis = *last + 1;
        }
        *last = millis;
        format!("ORD{millis}")
    }
}
