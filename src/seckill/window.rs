//! Sale-window gate: decides whether a purchase attempt arrives inside the
//! configured sale interval. Pure function of the product's window and the
//! caller-supplied instant; both boundary instants count as open.

use chrono::{DateTime, Utc};

use crate::model::Product;

/// Where an instant falls relative to a product's sale window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleWindowStatus {
    /// `now` is before `start_time`.
    NotStarted,
    /// `start_time <= now <= end_time`.
    Open,
    /// `now` is after `end_time`.
    Closed,
}

/// Classifies `now` against the product's sale window.
pub fn status(product: &Product, now: DateTime<Utc>) -> SaleWindowStatus {
    if now < product.start_time {
        SaleWindowStatus::NotStarted
    } else if now > product.end_time {
        SaleWindowStatus::Closed
    } else {
        SaleWindowStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn product_with_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Product {
        Product {
            id: "product_1".to_string(),
            name: "Limited Widget".to_string(),
            price: 25.0,
            stock: 100,
            seckill_stock: 10,
            start_time: start,
            end_time: end,
            created_at: start - Duration::days(1),
        }
    }

    #[test]
    fn classifies_before_during_after() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let product = product_with_window(start, end);

        assert_eq!(status(&product, start - Duration::seconds(1)), SaleWindowStatus::NotStarted);
        assert_eq!(status(&product, start + Duration::minutes(30)), SaleWindowStatus::Open);
        assert_eq!(status(&product, end + Duration::seconds(1)), SaleWindowStatus::Closed);
    }

    #[test]
    fn boundary_instants_are_open() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let product = product_with_window(start, end);

        assert_eq!(status(&product, start), SaleWindowStatus::Open);
        assert_eq!(status(&product, end), SaleWindowStatus::Open);
    }

    #[test]
    fn instant_window_is_open_at_that_instant() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let product = product_with_window(instant, instant);

        assert_eq!(status(&product, instant), SaleWindowStatus::Open);
        assert_eq!(status(&product, instant + Duration::seconds(1)), SaleWindowStatus::Closed);
    }
}
