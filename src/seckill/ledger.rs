//! # Stock Ledger
//!
//! The in-memory counter store at the heart of the flash sale. It maps a
//! product id to a pair of counters `(available, sold)` and guarantees that
//! checking and claiming stock is one indivisible step.
//!
//! ## Atomicity
//!
//! Both counters for a product are packed into a single `AtomicU64`
//! (`available` in the high 32 bits, `sold` in the low 32 bits). A
//! reservation is one compare-and-swap over that word: the check
//! `available >= quantity` and the transfer `available -= q; sold += q`
//! either apply together or not at all. No caller can observe a state where
//! the check has passed but the decrement has not applied, which is exactly
//! the race that causes oversell.
//!
//! Packing also makes [`StockLedger::peek`] an exactly-consistent snapshot:
//! a single atomic load reads both counters at the same instant, so
//! `available + sold` always equals the seeded stock.
//!
//! ## Per-product independence
//!
//! Cells live in a [`DashMap`], so reservations against different products
//! never contend on a common lock. Contention exists only between concurrent
//! claims on the *same* product, where it is the point.
//!
//! ## Compensation
//!
//! [`StockLedger::try_reserve`] hands back a [`Reservation`] guard. The claim
//! is provisional until [`Reservation::confirm`] is called; a guard dropped
//! unconfirmed returns the units to `available`. Putting the release in
//! `Drop` means compensation runs even when the caller is cancelled between
//! reserving and committing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors produced by ledger operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The provided quantity is invalid (zero).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
}

/// Point-in-time view of a product's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockSnapshot {
    pub available: u32,
    pub sold: u32,
}

const fn pack(available: u32, sold: u32) -> u64 {
    ((available as u64) << 32) | sold as u64
}

const fn unpack(bits: u64) -> (u32, u32) {
    ((bits >> 32) as u32, bits as u32)
}

/// One product's counters, packed into a single atomic word.
#[derive(Debug)]
struct StockCell {
    bits: AtomicU64,
}

impl StockCell {
    fn new(initial_stock: u32) -> Self {
        Self {
            bits: AtomicU64::new(pack(initial_stock, 0)),
        }
    }

    fn snapshot(&self) -> StockSnapshot {
        let (available, sold) = unpack(self.bits.load(Ordering::Acquire));
        StockSnapshot { available, sold }
    }

    /// Atomically moves `quantity` units from `available` to `sold`.
    /// Returns the observed `available` on shortage, without mutating.
    fn try_reserve(&self, quantity: u32) -> Result<(), u32> {
        let mut current = self.bits.load(Ordering::Acquire);
        loop {
            let (available, sold) = unpack(current);
            if available < quantity {
                return Err(available);
            }
            let next = pack(available - quantity, sold + quantity);
            match self.bits.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(()),
                Err(observed) => current = observed,
            }
        }
    }

    /// Atomically moves `quantity` units from `sold` back to `available`.
    /// Inverse of `try_reserve`; only called for unconfirmed reservations,
    /// so `sold >= quantity` holds.
    fn release(&self, quantity: u32) {
        let mut current = self.bits.load(Ordering::Acquire);
        loop {
            let (available, sold) = unpack(current);
            debug_assert!(sold >= quantity, "release exceeds sold count");
            let next = pack(available + quantity, sold.saturating_sub(quantity));
            match self.bits.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }
}

/// A provisional stock claim.
///
/// Produced by [`StockLedger::try_reserve`]. Call [`Reservation::confirm`]
/// once the order has been durably written; dropping the guard unconfirmed
/// releases the claimed units back to `available`.
#[must_use = "an unconfirmed reservation is released on drop"]
#[derive(Debug)]
pub struct Reservation {
    cell: Arc<StockCell>,
    product_id: String,
    quantity: u32,
    confirmed: bool,
}

impl Reservation {
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Makes the claim permanent: the units stay counted as sold.
    pub fn confirm(mut self) {
        self.confirmed = true;
        debug!(product_id = %self.product_id, quantity = self.quantity, "reservation confirmed");
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        if !self.confirmed {
            self.cell.release(self.quantity);
            warn!(
                product_id = %self.product_id,
                quantity = self.quantity,
                "reservation released"
            );
        }
    }
}

/// In-memory, atomically-updated counter store for flash-sale stock.
///
/// Inject as `Arc<StockLedger>`; every test can construct a fresh, isolated
/// instance. Counters exist only after [`StockLedger::seed`]; an unseeded
/// product reads as zero stock, matching a missing counter key in the
/// original deployment.
pub struct StockLedger {
    cells: DashMap<String, Arc<StockCell>>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }

    /// Installs (or resets) the counters for a product to
    /// `(initial_stock, 0)`.
    ///
    /// Must be called strictly before the sale window opens and before the
    /// first `try_reserve` for the product; re-seeding during an active sale
    /// is out of contract.
    pub fn seed(&self, product_id: &str, initial_stock: u32) {
        self.cells
            .insert(product_id.to_string(), Arc::new(StockCell::new(initial_stock)));
        debug!(product_id, initial_stock, "ledger seeded");
    }

    /// Atomically claims `quantity` units of a product.
    ///
    /// Returns a [`Reservation`] guard on success. Fails with
    /// [`LedgerError::InsufficientStock`] (no mutation) when the product has
    /// fewer than `quantity` units available (including when it was never
    /// seeded), and with [`LedgerError::InvalidQuantity`] for a zero quantity.
    pub fn try_reserve(&self, product_id: &str, quantity: u32) -> Result<Reservation, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity(quantity));
        }

        let Some(cell) = self.cells.get(product_id).map(|entry| entry.value().clone()) else {
            return Err(LedgerError::InsufficientStock {
                requested: quantity,
                available: 0,
            });
        };

        cell.try_reserve(quantity)
            .map_err(|available| LedgerError::InsufficientStock {
                requested: quantity,
                available,
            })?;

        Ok(Reservation {
            cell,
            product_id: product_id.to_string(),
            quantity,
            confirmed: false,
        })
    }

    /// Point-in-time snapshot of a product's counters, or `None` if the
    /// product was never seeded. Staleness relative to concurrent
    /// reservations is fine; the snapshot itself is internally consistent.
    pub fn peek(&self, product_id: &str) -> Option<StockSnapshot> {
        self.cells.get(product_id).map(|entry| entry.value().snapshot())
    }
}

impl Default for StockLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn reserve_and_confirm_moves_stock_to_sold() {
        let ledger = StockLedger::new();
        ledger.seed("product_1", 10);

        let reservation = ledger.try_reserve("product_1", 3).unwrap();
        assert_eq!(reservation.product_id(), "product_1");
        assert_eq!(reservation.quantity(), 3);
        reservation.confirm();

        assert_eq!(
            ledger.peek("product_1").unwrap(),
            StockSnapshot { available: 7, sold: 3 }
        );
    }

    #[test]
    fn insufficient_stock_leaves_counters_untouched() {
        let ledger = StockLedger::new();
        ledger.seed("product_1", 2);

        let err = ledger.try_reserve("product_1", 3).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientStock { requested: 3, available: 2 }
        );
        assert_eq!(
            ledger.peek("product_1").unwrap(),
            StockSnapshot { available: 2, sold: 0 }
        );
    }

    #[test]
    fn unseeded_product_reads_as_zero_stock() {
        let ledger = StockLedger::new();

        let err = ledger.try_reserve("ghost", 1).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientStock { requested: 1, available: 0 }
        );
        assert_eq!(ledger.peek("ghost"), None);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let ledger = StockLedger::new();
        ledger.seed("product_1", 5);

        let err = ledger.try_reserve("product_1", 0).unwrap_err();
        assert_eq!(err, LedgerError::InvalidQuantity(0));
        assert_eq!(
            ledger.peek("product_1").unwrap(),
            StockSnapshot { available: 5, sold: 0 }
        );
    }

    #[test]
    fn dropped_reservation_is_released() {
        let ledger = StockLedger::new();
        ledger.seed("product_1", 10);

        {
            let _reservation = ledger.try_reserve("product_1", 4).unwrap();
            assert_eq!(
                ledger.peek("product_1").unwrap(),
                StockSnapshot { available: 6, sold: 4 }
            );
            // dropped unconfirmed
        }

        assert_eq!(
            ledger.peek("product_1").unwrap(),
            StockSnapshot { available: 10, sold: 0 }
        );
    }

    #[test]
    fn concurrent_reservations_never_oversell() {
        const INITIAL: u32 = 100;
        const THREADS: usize = 8;
        const ATTEMPTS_PER_THREAD: usize = 50;

        let ledger = Arc::new(StockLedger::new());
        ledger.seed("product_1", INITIAL);

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    let mut won = 0u32;
                    for _ in 0..ATTEMPTS_PER_THREAD {
                        if let Ok(reservation) = ledger.try_reserve("product_1", 1) {
                            reservation.confirm();
                            won += 1;
                        }
                        // Conservation holds at every observation point.
                        let snap = ledger.peek("product_1").unwrap();
                        assert_eq!(snap.available + snap.sold, INITIAL);
                    }
                    won
                })
            })
            .collect();

        let total_won: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        // 400 attempts against 100 units: exactly 100 wins, stock exhausted.
        assert_eq!(total_won, INITIAL);
        assert_eq!(
            ledger.peek("product_1").unwrap(),
            StockSnapshot { available: 0, sold: INITIAL }
        );
    }

    #[test]
    fn products_are_independent() {
        let ledger = StockLedger::new();
        ledger.seed("product_1", 5);
        ledger.seed("product_2", 7);

        ledger.try_reserve("product_1", 5).unwrap().confirm();

        assert_eq!(
            ledger.peek("product_1").unwrap(),
            StockSnapshot { available: 0, sold: 5 }
        );
        assert_eq!(
            ledger.peek("product_2").unwrap(),
            StockSnapshot { available: 7, sold: 0 }
        );
    }
}
