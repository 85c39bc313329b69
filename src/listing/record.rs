// src/listing/record.rs
use std::fmt;

use serde::Deserialize;

/// Column labels of the exported table, in `to_csv_record` order.
pub const COLUMNS: [&str; 10] = [
    "Link",
    "Article",
    "Name",
    "Brand",
    "Brand ID",
    "Price",
    "Sale price",
    "Rating",
    "Reviews",
    "Sold",
];

/// Product entry as the listing endpoints return it. Every field is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: u64,
    pub name: String,
    pub brand: String,
    pub brand_id: u64,
    #[serde(rename = "priceU")]
    pub price_u: u64,
    #[serde(rename = "salePriceU")]
    pub sale_price_u: u64,
    pub rating: f64,
    pub feedbacks: u64,
}

/// Units sold, as reported by the sales endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoldCount {
    Count(u64),
    /// The lookup timed out while connecting.
    NoData,
}

impl fmt::Display for SoldCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SoldCount::Count(n) => write!(f, "{}", n),
            SoldCount::NoData => write!(f, "no data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: u64,
    pub name: String,
    pub brand: String,
    pub brand_id: u64,
    pub url: String,
    /// Whole currency units, truncated from the minor-unit price.
    pub price: u64,
    pub sale_price: u64,
    pub rating: f64,
    pub review_count: u64,
    /// Filled in by sales enrichment; `None` until then.
    pub sold: Option<SoldCount>,
}

impl ProductRecord {
    pub fn from_raw(raw: RawProduct, site_base: &str) -> Self {
        Self {
            url: product_link(site_base, raw.id),
            id: raw.id,
            name: raw.name,
            brand: raw.brand,
            brand_id: raw.brand_id,
            price: raw.price_u / 100,
            sale_price: raw.sale_price_u / 100,
            rating: raw.rating,
            review_count: raw.feedbacks,
            sold: None,
        }
    }

    pub fn to_csv_record(&self) -> Vec<String> {
        vec![
            self.url.clone(),
            self.id.to_string(),
            self.name.clone(),
            self.brand.clone(),
            self.brand_id.to_string(),
            self.price.to_string(),
            self.sale_price.to_string(),
            self.rating.to_string(),
            self.review_count.to_string(),
            self.sold.map(|s| s.to_string()).unwrap_or_default(),
        ]
    }
}

pub fn product_link(site_base: &str, id: u64) -> String {
    format!("{}/catalog/{}/detail.aspx", site_base.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(price_u: u64, sale_price_u: u64) -> RawProduct {
        RawProduct {
            id: 9_001,
            name: "Boot".into(),
            brand: "Acme".into(),
            brand_id: 77,
            price_u,
            sale_price_u,
            rating: 4.5,
            feedbacks: 12,
        }
    }

    #[test]
    fn prices_are_truncated_to_whole_units() {
        let rec = ProductRecord::from_raw(raw(123_456, 99_999), "https://www.wildberries.ru");
        assert_eq!(rec.price, 1_234);
        assert_eq!(rec.sale_price, 999);

        let small = ProductRecord::from_raw(raw(99, 100), "https://www.wildberries.ru");
        assert_eq!(small.price, 0);
        assert_eq!(small.sale_price, 1);
    }

    #[test]
    fn link_points_at_product_page() {
        let rec = ProductRecord::from_raw(raw(100, 100), "https://www.wildberries.ru/");
        assert_eq!(rec.url, "https://www.wildberries.ru/catalog/9001/detail.aspx");
        assert_eq!(rec.sold, None);
    }

    #[test]
    fn csv_record_follows_column_order() {
        let mut rec = ProductRecord::from_raw(raw(250_000, 199_900), "https://www.wildberries.ru");
        let row = rec.to_csv_record();
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[1], "9001");
        assert_eq!(row[5], "2500");
        assert_eq!(row[6], "1999");
        assert_eq!(row[7], "4.5");
        assert_eq!(row[9], "");

        rec.sold = Some(SoldCount::NoData);
        assert_eq!(rec.to_csv_record()[9], "no data");
        rec.sold = Some(SoldCount::Count(42));
        assert_eq!(rec.to_csv_record()[9], "42");
    }

    #[test]
    fn missing_field_fails_deserialization() {
        let json = r#"{"id":1,"name":"x","brand":"b","brandId":2,"priceU":100,"rating":5,"feedbacks":0}"#;
        assert!(serde_json::from_str::<RawProduct>(json).is_err());
    }
}
